use crate::io::writers::{JsonWriter, TerminalWriter};
use crate::report::{IndicatorAnalysis, PortfolioReport};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &PortfolioReport) -> anyhow::Result<()>;

    fn write_analysis(&mut self, analysis: &IndicatorAnalysis) -> anyhow::Result<()>;
}

pub fn create_writer<'a>(
    format: OutputFormat,
    out: Box<dyn Write + 'a>,
) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(out)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(out)),
    }
}
