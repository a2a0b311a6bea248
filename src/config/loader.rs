use std::fs;
use std::path::{Path, PathBuf};

use super::validation::validate_config_result;
use super::{ScorecastConfig, ADVISORY_COMMAND_ENV};
use crate::errors::{Error, Result, ResultExt};

pub const CONFIG_FILE_NAME: &str = ".scorecast.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Parse and validate config from a TOML string.
pub fn parse_and_validate_config(contents: &str) -> Result<ScorecastConfig> {
    let config = toml::from_str::<ScorecastConfig>(contents)?;
    validate_config_result(&config)?;
    Ok(config)
}

/// Load an explicitly named config file. Any problem is an error.
pub fn load_config_from_path(path: &Path) -> Result<ScorecastConfig> {
    let contents = fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("Failed to read {}", path.display()))?;
    let config = parse_and_validate_config(&contents)
        .context(format!("Invalid config {}", path.display()))?;
    Ok(apply_env_overrides(config))
}

/// Find `.scorecast.toml` in the working directory or its ancestors.
///
/// A missing file means defaults. An unreadable or invalid file is reported
/// on stderr and then also replaced by defaults.
pub fn load_config() -> ScorecastConfig {
    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return apply_env_overrides(ScorecastConfig::default());
        }
    };

    let config = directory_ancestors(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            ScorecastConfig::default()
        });
    apply_env_overrides(config)
}

/// `start` followed by its parents, at most `max_depth` entries.
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

fn try_load_config_from_path(path: &Path) -> Option<ScorecastConfig> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            // a missing file just means "keep looking"
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!("Failed to read config file {}: {}", path.display(), e);
            }
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", path.display());
            Some(config)
        }
        Err(e) => {
            eprintln!(
                "Warning: ignoring {}: {}. Using defaults.",
                path.display(),
                e
            );
            Some(ScorecastConfig::default())
        }
    }
}

fn apply_env_overrides(mut config: ScorecastConfig) -> ScorecastConfig {
    let command = std::env::var(ADVISORY_COMMAND_ENV).ok();
    if command.is_some() {
        log::debug!("Advisory command taken from {}", ADVISORY_COMMAND_ENV);
    }
    config.advisory = config.advisory.with_command_override(command);
    config
}
