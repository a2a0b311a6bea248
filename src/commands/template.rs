use crate::config::ScorecastConfig;
use crate::io::{file_exists, write_portfolio};
use anyhow::Result;
use std::path::Path;

/// Write an all-zero portfolio laid out as `config` describes.
pub fn write_template(config: &ScorecastConfig, path: &Path, force: bool) -> Result<()> {
    if file_exists(path) && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    let portfolio = config.catalog()?;
    write_portfolio(path, &portfolio)?;
    log::info!(
        "Wrote {} groupings with {} indicators each to {}",
        config.portfolio.groupings.len(),
        config.portfolio.indicators_per_grouping,
        path.display()
    );
    Ok(())
}
