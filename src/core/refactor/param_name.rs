//! Parameter name resolution: file name → key used in `.putValue("<key>", ...)`.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fallback key when no marker matches.
pub const DEFAULT_PARAM_NAME: &str = "value";

/// A substring marker and the parameter name it selects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamNameRule {
    pub marker: String,
    pub name: String,
}

impl ParamNameRule {
    pub fn new(marker: &str, name: &str) -> Self {
        Self {
            marker: marker.to_string(),
            name: name.to_string(),
        }
    }
}

/// Built-in marker table, in priority order.
pub fn default_param_names() -> Vec<ParamNameRule> {
    [
        ("Duration", "duration"),
        ("Growth", "growth_rate"),
        ("Healing", "healing"),
        ("Homing", "homing_strength"),
        ("Penetration", "penetration"),
        ("Pierce", "pierce_count"),
        ("Radius", "radius"),
        ("Range", "range"),
        ("Speed", "speed"),
        ("TickRate", "tick_rate"),
    ]
    .into_iter()
    .map(|(marker, name)| ParamNameRule::new(marker, name))
    .collect()
}

/// Resolve the parameter name for a file.
///
/// Only the base name is inspected, so `impl/RangeParameter.java` and
/// `RangeParameter.java` resolve identically. Markers are case-sensitive and the
/// first one contained in the name wins. Never fails.
pub fn resolve_param_name(file: &str, rules: &[ParamNameRule], default: &str) -> String {
    let base = Path::new(file)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| file.to_string());

    rules
        .iter()
        .find(|rule| base.contains(&rule.marker))
        .map(|rule| rule.name.clone())
        .unwrap_or_else(|| default.to_string())
}
