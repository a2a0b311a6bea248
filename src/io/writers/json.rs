use crate::io::output::OutputWriter;
use crate::report::{IndicatorAnalysis, PortfolioReport};
use serde::Serialize;
use std::io::Write;

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_json<T: Serialize>(&mut self, value: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.writer.write_all(json.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &PortfolioReport) -> anyhow::Result<()> {
        self.write_json(report)
    }

    fn write_analysis(&mut self, analysis: &IndicatorAnalysis) -> anyhow::Result<()> {
        self.write_json(analysis)
    }
}
