use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::refactor::{
    default_param_names, FileTarget, ParamNameRule, DEFAULT_PARAM_NAME, DEFAULT_RESULT_TYPE,
};
use crate::utils::io;

const DEFAULT_BASE_DIR: &str =
    "C:/GYM/MOD/CombatMetaphysics/src/main/java/com/example/examplemod/core/spells/parameters/impl";

const DEFAULT_FILES: &[&str] = &[
    "DurationParameter.java",
    "GrowthRateParameter.java",
    "HealingParameter.java",
    "HomingStrengthParameter.java",
    "PenetrationParameter.java",
    "PierceCountParameter.java",
    "RadiusParameter.java",
    "RangeParameter.java",
    "SpeedParameter.java",
    "TickRateParameter.java",
];

/// Everything a migration run needs. Every field can be overridden via a
/// `paramfix.json` file; omitted fields keep the built-in values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationConfig {
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    #[serde(default = "default_files")]
    pub files: Vec<String>,

    /// Fully-qualified builder result type written into rewritten sources.
    #[serde(default = "default_result_type")]
    pub result_type: String,

    #[serde(default = "default_param_names")]
    pub param_names: Vec<ParamNameRule>,

    #[serde(default = "default_param_name")]
    pub default_param_name: String,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            files: default_files(),
            result_type: default_result_type(),
            param_names: default_param_names(),
            default_param_name: default_param_name(),
        }
    }
}

fn default_base_dir() -> PathBuf {
    PathBuf::from(DEFAULT_BASE_DIR)
}

fn default_files() -> Vec<String> {
    DEFAULT_FILES.iter().map(|f| f.to_string()).collect()
}

fn default_result_type() -> String {
    DEFAULT_RESULT_TYPE.to_string()
}

fn default_param_name() -> String {
    DEFAULT_PARAM_NAME.to_string()
}

impl MigrationConfig {
    /// Resolve each configured file name against the base directory, in order.
    pub fn targets(&self) -> Vec<FileTarget> {
        self.files
            .iter()
            .map(|name| FileTarget {
                name: name.clone(),
                path: self.base_dir.join(name),
            })
            .collect()
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.result_type.trim().is_empty() {
            return Err(Error::config_invalid_value(
                "result_type",
                Some(self.result_type.clone()),
                "must not be empty",
            )
            .with_hint("Set result_type to a fully-qualified class name"));
        }

        if self.default_param_name.trim().is_empty() {
            return Err(Error::config_invalid_value(
                "default_param_name",
                None,
                "must not be empty",
            ));
        }

        for (index, rule) in self.param_names.iter().enumerate() {
            if rule.marker.is_empty() || rule.name.is_empty() {
                return Err(Error::config_invalid_value(
                    format!("param_names[{}]", index),
                    Some(format!("{} -> {}", rule.marker, rule.name)),
                    "marker and name must both be non-empty",
                ));
            }
        }

        Ok(())
    }
}

/// Parse and validate a config from JSON text.
pub fn parse_config(content: &str, source: &str) -> Result<MigrationConfig> {
    let config: MigrationConfig =
        serde_json::from_str(content).map_err(|e| Error::config_invalid_json(source, e))?;
    config.validate()?;
    Ok(config)
}

/// Load a config file.
pub fn load_config(path: &Path) -> Result<MigrationConfig> {
    let content = io::read_file(path, &format!("read {}", path.display()))?;
    parse_config(&content, &path.display().to_string())
}

/// Load `path` when given, otherwise use the built-in configuration.
pub fn load_or_default(path: Option<&Path>) -> Result<MigrationConfig> {
    match path {
        Some(p) => load_config(p),
        None => Ok(MigrationConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_lists_ten_files_in_order() {
        let config = MigrationConfig::default();
        assert_eq!(config.files.len(), 10);
        assert_eq!(config.files[0], "DurationParameter.java");
        assert_eq!(config.files[9], "TickRateParameter.java");
        assert_eq!(config.default_param_name, "value");
    }

    #[test]
    fn targets_join_base_dir() {
        let config = MigrationConfig::default().with_base_dir("/tmp/impl");
        let targets = config.targets();
        assert_eq!(targets[0].path, PathBuf::from("/tmp/impl/DurationParameter.java"));
        assert_eq!(targets[0].name, "DurationParameter.java");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = parse_config(r#"{"base_dir": "/work/impl"}"#, "inline").unwrap();
        assert_eq!(config.base_dir, PathBuf::from("/work/impl"));
        assert_eq!(config.files.len(), 10);
        assert_eq!(config.result_type, DEFAULT_RESULT_TYPE);
        assert_eq!(config.param_names, default_param_names());
    }

    #[test]
    fn param_names_can_be_replaced() {
        let config = parse_config(
            r#"{"param_names": [{"marker": "Bounce", "name": "bounce_count"}]}"#,
            "inline",
        )
        .unwrap();
        assert_eq!(config.param_names, vec![ParamNameRule::new("Bounce", "bounce_count")]);
    }

    #[test]
    fn invalid_json_is_config_error() {
        let err = parse_config("{ not json", "paramfix.json").unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_json");
        assert_eq!(err.details["path"], "paramfix.json");
    }

    #[test]
    fn empty_result_type_is_rejected() {
        let err = parse_config(r#"{"result_type": "  "}"#, "inline").unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_value");
        assert_eq!(err.details["key"], "result_type");
    }

    #[test]
    fn empty_marker_is_rejected() {
        let err = parse_config(r#"{"param_names": [{"marker": "", "name": "x"}]}"#, "inline")
            .unwrap_err();
        assert_eq!(err.details["key"], "param_names[0]");
    }

    #[test]
    fn load_config_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("paramfix.json");
        std::fs::write(&path, r#"{"files": ["SpeedParameter.java"]}"#).unwrap();

        let config = load_or_default(Some(&path)).unwrap();
        assert_eq!(config.files, vec!["SpeedParameter.java".to_string()]);
    }

    #[test]
    fn load_config_missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/paramfix.json")).unwrap_err();
        assert_eq!(err.code.as_str(), "internal.io_error");
    }
}
