//! Advisory service settings.
//!
//! ```toml
//! [advisory]
//! command = "scorecast-advisor"
//! args = ["--model", "fast"]
//! timeout_seconds = 30
//! enabled = true
//! ```
//!
//! Without a command, or with `enabled = false`, every recommendation comes
//! from the fallback formula.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable that replaces `advisory.command`.
pub const ADVISORY_COMMAND_ENV: &str = "SCORECAST_ADVISORY_COMMAND";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryConfig {
    /// Program that answers advisory requests on stdin/stdout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Extra arguments passed to the program
    #[serde(default)]
    pub args: Vec<String>,

    /// Upper bound for one call in seconds (default: 30)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Set to false to always use the fallback (default: true)
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            command: None,
            args: Vec::new(),
            timeout_seconds: default_timeout_seconds(),
            enabled: default_enabled(),
        }
    }
}

impl AdvisoryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// The command to run, if the advisory service is switched on.
    pub fn active_command(&self) -> Option<&str> {
        if !self.enabled {
            return None;
        }
        self.command
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    /// Apply an override taken from [`ADVISORY_COMMAND_ENV`].
    pub fn with_command_override(mut self, command: Option<String>) -> Self {
        if let Some(command) = command.filter(|c| !c.trim().is_empty()) {
            self.command = Some(command);
        }
        self
    }
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AdvisoryConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.enabled);
        assert_eq!(config.active_command(), None);
    }

    #[test]
    fn test_disabled_hides_command() {
        let config = AdvisoryConfig {
            command: Some("advisor".into()),
            enabled: false,
            ..Default::default()
        };
        assert_eq!(config.active_command(), None);
    }

    #[test]
    fn test_override_replaces_command() {
        let config = AdvisoryConfig {
            command: Some("old".into()),
            ..Default::default()
        }
        .with_command_override(Some("new".into()));
        assert_eq!(config.active_command(), Some("new"));

        let unchanged = config.clone().with_command_override(Some("  ".into()));
        assert_eq!(unchanged.active_command(), Some("new"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AdvisoryConfig = toml::from_str(r#"command = "advisor""#).unwrap();
        assert_eq!(config.timeout_seconds, 30);
        assert!(config.enabled);
        assert!(config.args.is_empty());
    }
}
