use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Env var naming an optional JSON config file.
pub const CONFIG_ENV: &str = "TRIP_CONFIG";
pub const INPUT_DIR_ENV: &str = "TRIP_INPUT_DIR";
pub const OUTPUT_ENV: &str = "TRIP_OUTPUT";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    pub input_dir: PathBuf,
    pub file_prefix: String,
    pub file_extension: String,
    pub output_path: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("../"),
            file_prefix: "trip".to_string(),
            file_extension: "json".to_string(),
            output_path: PathBuf::from("features.csv"),
        }
    }
}

impl ReportConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("invalid config JSON in {}", path.display()))
    }

    /// Defaults, then the file named by `TRIP_CONFIG`, then the
    /// `TRIP_INPUT_DIR` / `TRIP_OUTPUT` overrides.
    pub fn from_env() -> Result<Self> {
        Self::resolve(|key| std::env::var(key).ok())
    }

    fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = match lookup(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path))?,
            None => Self::default(),
        };
        if let Some(dir) = lookup(INPUT_DIR_ENV) {
            cfg.input_dir = PathBuf::from(dir);
        }
        if let Some(out) = lookup(OUTPUT_ENV) {
            cfg.output_path = PathBuf::from(out);
        }
        Ok(cfg)
    }
}
