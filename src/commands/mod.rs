pub mod analyze;
pub mod init;
pub mod report;
pub mod template;

use crate::config::{load_config, load_config_from_path, ScorecastConfig};
use crate::io::{create_writer, OutputFormat, OutputWriter};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Explicit `--config` file, or the discovered one.
pub fn resolve_config(explicit: Option<&Path>) -> Result<ScorecastConfig> {
    match explicit {
        Some(path) => Ok(load_config_from_path(path)?),
        None => Ok(load_config()),
    }
}

/// Writer for `output`, or stdout. File output is never colored.
pub(crate) fn open_writer(
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<Box<dyn OutputWriter>> {
    let out: Box<dyn Write> = match output {
        Some(path) => {
            colored::control::set_override(false);
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(std::io::stdout()),
    };
    Ok(create_writer(format, out))
}
