//! Configuration loading for beatmap

mod schema;

pub use schema::{Config, SeverityThresholds};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = ".beatmaprc.json";

/// Find and load a config file. Searches the work directory then parents;
/// falls back to defaults when no file exists.
pub fn load_config(work_dir: &Path, custom_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(p) = custom_path {
        let path = if p.is_absolute() {
            p.to_path_buf()
        } else {
            work_dir.join(p)
        };
        if path.exists() {
            Some(path)
        } else {
            anyhow::bail!("Config file not found: {}", path.display());
        }
    } else {
        find_config_in_parents(work_dir)
    };

    match path {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON in config: {}", path.display()))?;
            config
                .validate()
                .with_context(|| format!("Invalid config: {}", path.display()))?;
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

/// Search for .beatmaprc.json in directory and its parents
fn find_config_in_parents(mut dir: &Path) -> Option<PathBuf> {
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}
