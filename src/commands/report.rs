use super::open_writer;
use crate::io::{read_portfolio, OutputFormat};
use crate::report::build_report;
use anyhow::Result;
use std::path::Path;

pub fn report_portfolio(
    portfolio: &Path,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let portfolio = read_portfolio(portfolio)?;
    let report = build_report(&portfolio);
    tracing::info!(
        active = report.tally.total(),
        groupings = report.groupings.len(),
        "Portfolio report built"
    );

    let mut writer = open_writer(format, output)?;
    writer.write_report(&report)
}
