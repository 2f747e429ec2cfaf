//! Batch migration: rewrite every configured parameter file in turn.
//!
//! For each target this:
//! 1. Skips (with a diagnostic) files that are not on disk
//! 2. Resolves the file's parameter name
//! 3. Runs the substitution rules over the whole text
//! 4. Overwrites the file with the result (unless dry-run)
//!
//! Progress lines go to the caller's writer. Any read or write failure aborts the
//! batch; files after the failing one are left untouched.

use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

use super::param_name::resolve_param_name;
use super::rules::{
    apply_rules, default_rules, detect_newline, RuleContext, RuleHits, SubstitutionRule,
};
use crate::config::MigrationConfig;
use crate::error::{Error, Result};
use crate::utils::io;

// ============================================================================
// Types
// ============================================================================

/// A configured file name and its resolved location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTarget {
    pub name: String,
    pub path: PathBuf,
}

impl FileTarget {
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MigrateOptions {
    /// Match and report without writing anything.
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// Content changed and (unless dry-run) was written back.
    Rewritten,
    /// No rule matched; the file was still written back unless dry-run.
    Unchanged,
    /// Not on disk; skipped.
    Missing,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub file: String,
    pub path: String,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param_name: Option<String>,
    pub rules: Vec<RuleHits>,
    pub replacements: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MigrationReport {
    pub base_dir: String,
    pub files: Vec<FileOutcome>,
    pub total_files: usize,
    pub rewritten: usize,
    pub unchanged: usize,
    pub missing: usize,
    pub total_replacements: usize,
    pub dry_run: bool,
}

impl MigrationReport {
    fn new(base_dir: String, dry_run: bool) -> Self {
        Self {
            base_dir,
            files: Vec::new(),
            total_files: 0,
            rewritten: 0,
            unchanged: 0,
            missing: 0,
            total_replacements: 0,
            dry_run,
        }
    }

    fn record(&mut self, outcome: FileOutcome) {
        self.total_files += 1;
        self.total_replacements += outcome.replacements;
        match outcome.status {
            FileStatus::Rewritten => self.rewritten += 1,
            FileStatus::Unchanged => self.unchanged += 1,
            FileStatus::Missing => self.missing += 1,
        }
        self.files.push(outcome);
    }
}

// ============================================================================
// Single file
// ============================================================================

/// Rewrite one file in place with the given rules.
pub fn migrate_file(
    target: &FileTarget,
    rules: &[SubstitutionRule],
    config: &MigrationConfig,
    options: MigrateOptions,
) -> Result<FileOutcome> {
    let display = target.path.display().to_string();
    let content = io::read_file(&target.path, &format!("read {}", display))?;

    let param_name = resolve_param_name(
        &target.name,
        &config.param_names,
        &config.default_param_name,
    );
    let ctx = RuleContext {
        param_name: &param_name,
        result_type: &config.result_type,
        newline: detect_newline(&content),
    };

    let (rewritten, hits) = apply_rules(&content, rules, &ctx);
    let replacements: usize = hits.iter().map(|h| h.replacements).sum();

    if !options.dry_run {
        io::write_file(&target.path, &rewritten, &format!("write {}", display))?;
    }

    let status = if rewritten != content {
        FileStatus::Rewritten
    } else {
        FileStatus::Unchanged
    };

    Ok(FileOutcome {
        file: target.name.clone(),
        path: display,
        status,
        param_name: Some(param_name),
        rules: hits,
        replacements,
    })
}

// ============================================================================
// Batch
// ============================================================================

fn emit(out: &mut dyn Write, line: String) -> Result<()> {
    writeln!(out, "{}", line)
        .map_err(|e| Error::internal_io(e.to_string(), Some("write progress".to_string())))
}

/// Migrate every configured file, in order, with the default rule table.
pub fn run_migration(
    config: &MigrationConfig,
    options: MigrateOptions,
    out: &mut dyn Write,
) -> Result<MigrationReport> {
    let rules = default_rules(&config.result_type)?;
    run_migration_with_rules(config, &rules, options, out)
}

/// Migrate every configured file with an explicit rule table.
pub fn run_migration_with_rules(
    config: &MigrationConfig,
    rules: &[SubstitutionRule],
    options: MigrateOptions,
    out: &mut dyn Write,
) -> Result<MigrationReport> {
    let mut report =
        MigrationReport::new(config.base_dir.display().to_string(), options.dry_run);

    if options.dry_run {
        log_status!("migrate", "Dry run: no files will be written");
    }

    for target in config.targets() {
        if !target.exists() {
            emit(out, format!("File not found: {}", target.path.display()))?;
            report.record(FileOutcome {
                file: target.name.clone(),
                path: target.path.display().to_string(),
                status: FileStatus::Missing,
                param_name: None,
                rules: Vec::new(),
                replacements: 0,
            });
            continue;
        }

        emit(out, format!("Fixing: {}", target.path.display()))?;
        let outcome = migrate_file(&target, rules, config, options)?;

        if outcome.replacements == 0 {
            log_status!("migrate", "No patterns matched in {}", outcome.file);
        } else {
            log_status!(
                "migrate",
                "{} replacement(s) in {} (param '{}')",
                outcome.replacements,
                outcome.file,
                outcome.param_name.as_deref().unwrap_or_default()
            );
        }

        report.record(outcome);
    }

    emit(out, "Done!".to_string())?;

    Ok(report)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const LEGACY: &str = "public Map<String, Object> compute(SpellComputationContext context, Object inputValue) {\n        if (base <= 0) return emptyResult();\n        return buildResult(finalValue)\n            .put(\"mana_cost\", cost)\n            .build();\n    }\n";

    fn config_for(dir: &TempDir, files: &[&str]) -> MigrationConfig {
        MigrationConfig {
            base_dir: dir.path().to_path_buf(),
            files: files.iter().map(|f| f.to_string()).collect(),
            ..MigrationConfig::default()
        }
    }

    fn run(config: &MigrationConfig, options: MigrateOptions) -> (Result<MigrationReport>, String) {
        let mut out: Vec<u8> = Vec::new();
        let result = run_migration(config, options, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn rewrites_file_with_derived_param_name() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("SpeedParameter.java"), LEGACY).unwrap();

        let config = config_for(&dir, &["SpeedParameter.java"]);
        let (result, _) = run(&config, MigrateOptions::default());
        let report = result.unwrap();

        let content = fs::read_to_string(dir.path().join("SpeedParameter.java")).unwrap();
        assert!(content.contains(".putValue(\"speed\", finalValue)"));
        assert!(content.contains("            .putValue(\"mana_cost\", cost)"));
        assert!(!content.contains("emptyResult"));
        assert_eq!(report.rewritten, 1);
        assert_eq!(report.files[0].param_name.as_deref(), Some("speed"));
        assert_eq!(report.total_replacements, 4);
    }

    #[test]
    fn missing_file_is_reported_and_batch_continues() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("RangeParameter.java"), LEGACY).unwrap();

        let config = config_for(&dir, &["DurationParameter.java", "RangeParameter.java"]);
        let (result, out) = run(&config, MigrateOptions::default());
        let report = result.unwrap();

        let missing = dir.path().join("DurationParameter.java");
        let fixed = dir.path().join("RangeParameter.java");
        assert_eq!(
            out,
            format!(
                "File not found: {}\nFixing: {}\nDone!\n",
                missing.display(),
                fixed.display()
            )
        );
        assert_eq!(report.missing, 1);
        assert_eq!(report.rewritten, 1);
        assert_eq!(report.files[0].status, FileStatus::Missing);

        let content = fs::read_to_string(fixed).unwrap();
        assert!(content.contains(".putValue(\"range\", finalValue)"));
    }

    #[test]
    fn crlf_sources_keep_crlf_line_endings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("SpeedParameter.java");
        fs::write(&path, LEGACY.replace('\n', "\r\n")).unwrap();

        let config = config_for(&dir, &["SpeedParameter.java"]);
        run(&config, MigrateOptions::default()).0.unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains(".builder()\r\n            .putValue(\"speed\", finalValue)\r\n"));
        assert_eq!(content.matches('\n').count(), content.matches("\r\n").count());
    }

    #[test]
    fn all_missing_still_completes() {
        let dir = TempDir::new().unwrap();
        let config = config_for(&dir, &["A.java", "B.java"]);
        let (result, out) = run(&config, MigrateOptions::default());
        let report = result.unwrap();

        assert_eq!(report.missing, 2);
        assert!(out.ends_with("Done!\n"));
    }

    #[test]
    fn dry_run_leaves_files_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("HealingParameter.java");
        fs::write(&path, LEGACY).unwrap();

        let config = config_for(&dir, &["HealingParameter.java"]);
        let (result, out) = run(&config, MigrateOptions { dry_run: true });
        let report = result.unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), LEGACY);
        assert!(out.contains("Fixing: "));
        assert!(report.dry_run);
        assert_eq!(report.files[0].status, FileStatus::Rewritten);
    }

    #[test]
    fn second_run_changes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("TickRateParameter.java");
        fs::write(&path, LEGACY).unwrap();

        let config = config_for(&dir, &["TickRateParameter.java"]);
        run(&config, MigrateOptions::default()).0.unwrap();
        let after_first = fs::read_to_string(&path).unwrap();

        let report = run(&config, MigrateOptions::default()).0.unwrap();
        let after_second = fs::read_to_string(&path).unwrap();

        assert_eq!(after_first, after_second);
        assert_eq!(report.unchanged, 1);
        assert_eq!(report.total_replacements, 0);
    }

    #[test]
    fn unreadable_file_halts_the_batch() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("PierceCountParameter.java"), [0xffu8, 0xfe, 0x00]).unwrap();
        fs::write(dir.path().join("RadiusParameter.java"), LEGACY).unwrap();

        let config = config_for(&dir, &["PierceCountParameter.java", "RadiusParameter.java"]);
        let (result, out) = run(&config, MigrateOptions::default());

        let err = result.unwrap_err();
        assert_eq!(err.code.as_str(), "internal.io_error");
        assert!(!out.contains("Done!"));
        assert_eq!(
            fs::read_to_string(dir.path().join("RadiusParameter.java")).unwrap(),
            LEGACY
        );
    }

    #[test]
    fn single_line_end_to_end() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("BounceCountParameter.java");
        fs::write(
            &path,
            "public Map<String, Object> compute(SpellComputationContext context, Object inputValue) { return buildResult(42); }",
        )
        .unwrap();

        let config = config_for(&dir, &["BounceCountParameter.java"]);
        run(&config, MigrateOptions::default()).0.unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "public com.example.examplemod.core.spells.computation.SpellComputationResult compute(SpellComputationContext context, Object inputValue) { return com.example.examplemod.core.spells.computation.SpellComputationResult.builder()\n            .putValue(\"value\", 42); }"
        );
    }
}
