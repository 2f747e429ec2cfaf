//! Substitution rules: the ordered regex table that migrates a parameter class
//! from `Map<String, Object>` results to the builder-style result type.
//!
//! Rules are plain data so each one can be exercised against a snippet on its own.
//! They run in table order and each rule sees the output of the previous one.

use regex::{Captures, NoExpand, Regex};
use serde::Serialize;

use crate::error::{Error, Result};

/// Default fully-qualified builder result type.
pub const DEFAULT_RESULT_TYPE: &str =
    "com.example.examplemod.core.spells.computation.SpellComputationResult";

/// Leading whitespace of a continued builder chain inside `compute()`.
pub const CHAIN_INDENT: &str = "            ";

const SIGNATURE_PATTERN: &str =
    r"public Map<String, Object> compute\(SpellComputationContext context, Object inputValue\)";
const EMPTY_RESULT_PATTERN: &str = r"return emptyResult\(\);";
// [^)]+ stops at the first ')', so nested calls in the argument get truncated.
const BUILD_RESULT_PATTERN: &str = r"return buildResult\(([^)]+)\)";
const PUT_PATTERN: &str = r"            \.put\(";

// ============================================================================
// Types
// ============================================================================

/// Per-file values available to computed replacements.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub param_name: &'a str,
    pub result_type: &'a str,
    /// Line terminator used when a replacement spans lines.
    pub newline: &'a str,
}

/// The file's line terminator: `\r\n` if it has any, otherwise `\n`.
pub fn detect_newline(content: &str) -> &'static str {
    if content.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

/// Replacement computed from the match captures and the file context.
pub type ReplaceFn = fn(&Captures<'_>, &RuleContext<'_>) -> String;

/// How matched text is replaced.
#[derive(Clone)]
pub enum Replacement {
    /// Inserted as-is; `$` is not expanded.
    Static(String),
    /// Built per match.
    Computed(ReplaceFn),
}

impl std::fmt::Debug for Replacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Replacement::Static(s) => f.debug_tuple("Static").field(s).finish(),
            Replacement::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SubstitutionRule {
    pub name: &'static str,
    pub description: &'static str,
    pub pattern: Regex,
    pub replacement: Replacement,
}

impl SubstitutionRule {
    pub fn new(
        name: &'static str,
        description: &'static str,
        pattern: &str,
        replacement: Replacement,
    ) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| Error::refactor_invalid_pattern(name, pattern, e.to_string()))?;

        Ok(Self {
            name,
            description,
            pattern,
            replacement,
        })
    }

    /// Apply this rule to the whole text, returning the new text and the match count.
    pub fn apply(&self, text: &str, ctx: &RuleContext<'_>) -> (String, usize) {
        let hits = self.pattern.find_iter(text).count();
        if hits == 0 {
            return (text.to_string(), 0);
        }

        let rewritten = match &self.replacement {
            Replacement::Static(s) => self.pattern.replace_all(text, NoExpand(s)),
            Replacement::Computed(f) => self
                .pattern
                .replace_all(text, |caps: &Captures<'_>| f(caps, ctx)),
        };

        (rewritten.into_owned(), hits)
    }
}

/// Number of substitutions a single rule made in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleHits {
    pub rule: String,
    pub replacements: usize,
}

// ============================================================================
// Rule table
// ============================================================================

fn build_result_opening(caps: &Captures<'_>, ctx: &RuleContext<'_>) -> String {
    format!(
        "return {}.builder(){}{}.putValue(\"{}\", {})",
        ctx.result_type, ctx.newline, CHAIN_INDENT, ctx.param_name, &caps[1]
    )
}

/// The migration rules in application order.
///
/// The `build_result` rule only opens the builder chain. It relies on the source
/// already finishing the chain (`.build()`) further down; nothing checks that.
pub fn default_rules(result_type: &str) -> Result<Vec<SubstitutionRule>> {
    Ok(vec![
        SubstitutionRule::new(
            "signature",
            "compute() returns the builder result type instead of Map<String, Object>",
            SIGNATURE_PATTERN,
            Replacement::Static(format!(
                "public {} compute(SpellComputationContext context, Object inputValue)",
                result_type
            )),
        )?,
        SubstitutionRule::new(
            "empty_result",
            "return emptyResult(); becomes an empty builder",
            EMPTY_RESULT_PATTERN,
            Replacement::Static(format!("return {}.builder().build();", result_type)),
        )?,
        SubstitutionRule::new(
            "build_result",
            "return buildResult(x) opens a builder chain with .putValue(\"<param>\", x)",
            BUILD_RESULT_PATTERN,
            Replacement::Computed(build_result_opening),
        )?,
        SubstitutionRule::new(
            "put_value",
            "indented .put( calls in the chain become .putValue(",
            PUT_PATTERN,
            Replacement::Static(format!("{}.putValue(", CHAIN_INDENT)),
        )?,
    ])
}

/// Run every rule in order over `content`.
pub fn apply_rules(
    content: &str,
    rules: &[SubstitutionRule],
    ctx: &RuleContext<'_>,
) -> (String, Vec<RuleHits>) {
    let mut text = content.to_string();
    let mut hits = Vec::with_capacity(rules.len());

    for rule in rules {
        let (next, count) = rule.apply(&text, ctx);
        text = next;
        hits.push(RuleHits {
            rule: rule.name.to_string(),
            replacements: count,
        });
    }

    (text, hits)
}

// ============================================================================
// Tests
// ============================================================================
