use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "los_report.toml";

/// Report settings read from `los_report.toml`. Every field has a default,
/// so an empty file is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportConfig {
    pub model_name: String,
    pub artifacts_dir: PathBuf,
    pub metrics_file: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            model_name: "LOS regressor".to_string(),
            artifacts_dir: PathBuf::from("artifacts"),
            metrics_file: "metrics.json".to_string(),
        }
    }
}

impl ReportConfig {
    /// Where the JSON report lands when no explicit output path is given
    pub fn metrics_path(&self) -> PathBuf {
        self.artifacts_dir.join(&self.metrics_file)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

pub fn parse_config(text: &str) -> Result<ReportConfig, toml::de::Error> {
    toml::from_str::<ReportConfig>(text)
}
