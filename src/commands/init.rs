use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = r#"# Scorecast Configuration

[series]
# One label per period; the number of labels is the series length.
labels = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"]

[advisory]
# Program that receives a JSON request on stdin and answers with JSON on stdout.
# Can also be set with SCORECAST_ADVISORY_COMMAND. Without it, targets are
# estimated from the score history.
# command = "scorecast-advisor"
# args = []
timeout_seconds = 30
enabled = true

[portfolio]
indicators_per_grouping = 23

[[portfolio.groupings]]
id = "stamping"
name = "Stamping"

[[portfolio.groupings]]
id = "components"
name = "Components"

[[portfolio.groupings]]
id = "electrophoresis"
name = "Electrophoresis"

[[portfolio.groupings]]
id = "manual_assembly"
name = "Manual Assembly"

[[portfolio.groupings]]
id = "electric_assembly"
name = "Electric Assembly"

[[portfolio.groupings]]
id = "innovation"
name = "Innovation Products"

[[portfolio.groupings]]
id = "new_products"
name = "New Products"
"#;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    write_default_config(&config_path, force)?;
    println!("Created {CONFIG_FILE_NAME} configuration file");
    Ok(())
}

pub fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }
    Ok(io::write_file(path, DEFAULT_CONFIG)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::parse_and_validate_config;
    use crate::config::ScorecastConfig;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_matches_builtin_defaults() {
        let parsed = parse_and_validate_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(parsed, ScorecastConfig::default());
    }

    #[test]
    fn test_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "# mine").unwrap();

        assert!(write_default_config(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine");

        write_default_config(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
