use crate::io::output::OutputWriter;
use crate::report::{GroupingReport, IndicatorAnalysis, PortfolioReport};
use crate::status::Status;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};
use std::io::Write;

const RULE: &str = "═══════════════════════════════════════════";

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &PortfolioReport) -> anyhow::Result<()> {
        write!(self.writer, "{}", format_report(report))?;
        self.writer.flush()?;
        Ok(())
    }

    fn write_analysis(&mut self, analysis: &IndicatorAnalysis) -> anyhow::Result<()> {
        write!(self.writer, "{}", format_analysis(analysis))?;
        self.writer.flush()?;
        Ok(())
    }
}

pub fn format_report(report: &PortfolioReport) -> String {
    let mut out = header("PORTFOLIO STATUS REPORT");
    out.push_str(&format!(
        "Generated: {}\n\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    if report.groupings.is_empty() {
        let message = if report.is_empty_portfolio {
            "No scores recorded yet. Enter scores to start tracking."
        } else {
            "No active indicators."
        };
        out.push_str(&format!("{}\n", message.dimmed()));
        return out;
    }

    let tally = Status::ALL
        .iter()
        .map(|status| {
            let count = report.tally.count(*status).to_string();
            format!("{} {}", colorize_status(*status, &count), status.label())
        })
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(&format!("{tally}\n"));

    for grouping in &report.groupings {
        out.push('\n');
        out.push_str(&format_grouping(grouping));
    }
    out
}

fn format_grouping(grouping: &GroupingReport) -> String {
    let mut table = new_table(&["Indicator", "Last", "Target", "Warning", "Status"]);
    for row in &grouping.rows {
        table.add_row(vec![
            Cell::new(&row.name),
            number_cell(Some(row.last_value)),
            number_cell(row.recommended_score),
            number_cell(row.warning_score),
            status_cell(row.status),
        ]);
    }

    format!(
        "{} ({} active)\n{table}\n",
        grouping.name.bold(),
        grouping.active_count()
    )
}

pub fn format_analysis(analysis: &IndicatorAnalysis) -> String {
    let mut out = header(&format!(
        "{} / {}",
        analysis.grouping_name, analysis.indicator_name
    ));

    let stats = &analysis.statistics;
    out.push_str(&format!(
        "Mean {:.2}  Std dev {:.2}  Min {:.2}  Max {:.2}  Stability {}\n",
        stats.mean, stats.std_dev, stats.min, stats.max, analysis.stability
    ));
    out.push_str(&format!(
        "Status: {}\n\n",
        colorize_status(analysis.status, analysis.status.label())
    ));

    let mut history = new_table(&["Period", "Label", "Score"]);
    for point in &analysis.history {
        history.add_row(vec![
            Cell::new(point.sequence).set_alignment(CellAlignment::Right),
            Cell::new(&point.label),
            number_cell(Some(point.value)),
        ]);
    }
    out.push_str(&format!("{history}\n\n"));

    match &analysis.recommendation {
        Some(rec) => {
            out.push_str(&format!("{}\n", "Recommendation".bold()));
            out.push_str(&format!(
                "  Target {:.2} ({:+.1}σ)  Warning {:.2}  Difficulty {}\n",
                rec.recommended_score(),
                analysis.sigma_distance,
                rec.warning_score(),
                rec.difficulty()
            ));
            if rec.is_estimated() {
                out.push_str(&format!(
                    "  {}\n",
                    "Advisory service unavailable; values estimated from the history.".yellow()
                ));
            }
            out.push_str(&format!("  {}\n", rec.reasoning()));
            for (i, advice) in rec.advice().iter().enumerate() {
                out.push_str(&format!("  {}. {}\n", i + 1, advice));
            }
        }
        None => {
            out.push_str(&format!(
                "{}\n",
                "No recommendation yet. Run with --recommend to compute one.".dimmed()
            ));
        }
    }

    if let (Some(first), Some(last)) = (analysis.curve.first(), analysis.curve.last()) {
        out.push_str(&format!(
            "\nDistribution: {} points over [{:.2}, {:.2}]\n",
            analysis.curve.len(),
            first.x,
            last.x
        ));
    }
    out
}

fn header(title: &str) -> String {
    format!(
        "\n{}\n  {}\n{}\n",
        RULE.cyan(),
        title.bold().cyan(),
        RULE.cyan()
    )
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.to_vec());
    table
}

fn number_cell(value: Option<f64>) -> Cell {
    let text = value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"));
    Cell::new(text).set_alignment(CellAlignment::Right)
}

fn status_cell(status: Status) -> Cell {
    let cell = Cell::new(status.label());
    match status {
        Status::Pending => cell,
        Status::Abnormal => cell.fg(Color::Red),
        Status::Achieved => cell.fg(Color::Green),
        Status::InProgress => cell.fg(Color::Yellow),
    }
}

fn colorize_status(status: Status, text: &str) -> ColoredString {
    match status {
        Status::Pending => text.dimmed(),
        Status::Abnormal => text.red(),
        Status::Achieved => text.green(),
        Status::InProgress => text.yellow(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommend::fallback_recommendation;
    use crate::report::build_report;
    use crate::stats::summarize_series;
    use crate::store::{IndicatorKey, Portfolio};
    use crate::testkit::sample_portfolio;

    fn plain<F: FnOnce() -> String>(render: F) -> String {
        colored::control::set_override(false);
        render()
    }

    #[test]
    fn test_empty_portfolio_message() {
        let portfolio = crate::store::build_catalog(&[("a", "A")], 1, &["Jan"]).unwrap();
        let out = plain(|| format_report(&build_report(&portfolio)));
        assert!(out.contains("No scores recorded yet"));
    }

    #[test]
    fn test_report_lists_active_groupings_only() {
        let out = plain(|| format_report(&build_report(&sample_portfolio())));
        assert!(out.contains("Alpha Line (1 active)"));
        assert!(!out.contains("Beta Line"));
        assert!(out.contains("Indicator 1"));
        assert!(out.contains("70.00"));
    }

    #[test]
    fn test_analysis_with_estimated_recommendation() {
        let key = IndicatorKey::new("alpha", "alpha-01");
        let portfolio: Portfolio = sample_portfolio();
        let (_, indicator) = portfolio.indicator(&key).unwrap();
        let rec = fallback_recommendation(&summarize_series(indicator.series()));
        let portfolio = portfolio
            .attach_recommendation(&key, rec, indicator.version())
            .unwrap();
        let (grouping, indicator) = portfolio.indicator(&key).unwrap();

        let out = plain(|| format_analysis(&IndicatorAnalysis::of(grouping, indicator)));
        assert!(out.contains("Alpha Line / Indicator 1"));
        assert!(out.contains("Target 73.54 (+0.5σ)"));
        assert!(out.contains("values estimated"));
        assert!(out.contains("3. "));
    }
}
