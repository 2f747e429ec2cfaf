//! Result-type migration: rewrite spell parameter classes from
//! `Map<String, Object>` returns to the builder-style result type.
//!
//! Reads each configured file, runs the ordered substitution rules over the whole
//! text, and writes the result back.

mod migrate;
mod param_name;
mod rules;

pub use migrate::{
    migrate_file, run_migration, run_migration_with_rules, FileOutcome, FileStatus, FileTarget,
    MigrateOptions, MigrationReport,
};
pub use param_name::{default_param_names, resolve_param_name, ParamNameRule, DEFAULT_PARAM_NAME};
pub use rules::{
    apply_rules, default_rules, ReplaceFn, Replacement, RuleContext, RuleHits, SubstitutionRule,
    CHAIN_INDENT, DEFAULT_RESULT_TYPE,
};
