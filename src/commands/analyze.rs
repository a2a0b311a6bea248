use super::open_writer;
use crate::config::ScorecastConfig;
use crate::engine::ScoreEngine;
use crate::io::{read_portfolio, write_portfolio, OutputFormat};
use crate::store::IndicatorKey;
use anyhow::Result;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub portfolio: PathBuf,
    pub key: IndicatorKey,
    pub recommend: bool,
    pub save: bool,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

pub fn analyze_indicator(config: &ScorecastConfig, options: AnalyzeOptions) -> Result<()> {
    let portfolio = read_portfolio(&options.portfolio)?;
    let engine = ScoreEngine::new(portfolio, config.recommendation_provider());

    if options.recommend {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let outcome = runtime.block_on(engine.request_recommendation(&options.key))?;

        if options.save && outcome.is_applied() {
            write_portfolio(&options.portfolio, &engine.snapshot())?;
            log::info!(
                "Saved recommendation for {} to {}",
                options.key,
                options.portfolio.display()
            );
        }
    }

    let analysis = engine.get_analysis(&options.key)?;
    let mut writer = open_writer(options.format, options.output.as_deref())?;
    writer.write_analysis(&analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_contains_error;
    use crate::io::read_portfolio;
    use crate::testkit::sample_portfolio;
    use tempfile::TempDir;

    fn options(dir: &TempDir, save: bool) -> AnalyzeOptions {
        AnalyzeOptions {
            portfolio: dir.path().join("portfolio.json"),
            key: IndicatorKey::new("alpha", "alpha-01"),
            recommend: true,
            save,
            format: OutputFormat::Json,
            output: Some(dir.path().join("analysis.json")),
        }
    }

    #[test]
    fn test_recommend_and_save() {
        let dir = TempDir::new().unwrap();
        let options = options(&dir, true);
        write_portfolio(&options.portfolio, &sample_portfolio()).unwrap();

        analyze_indicator(&ScorecastConfig::default(), options.clone()).unwrap();

        let saved = read_portfolio(&options.portfolio).unwrap();
        let (_, indicator) = saved.indicator(&options.key).unwrap();
        let rec = indicator.recommendation().unwrap();
        assert!(rec.is_estimated());
        assert_eq!(rec.recommended_score(), 73.54);

        let written = std::fs::read_to_string(dir.path().join("analysis.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["status"], "in_progress");
        assert_eq!(value["sigma_distance"], 0.5);
    }

    #[test]
    fn test_without_save_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let options = options(&dir, false);
        write_portfolio(&options.portfolio, &sample_portfolio()).unwrap();
        let before = std::fs::read_to_string(&options.portfolio).unwrap();

        analyze_indicator(&ScorecastConfig::default(), options.clone()).unwrap();
        assert_eq!(std::fs::read_to_string(&options.portfolio).unwrap(), before);
    }

    #[test]
    fn test_unknown_indicator() {
        let dir = TempDir::new().unwrap();
        let mut options = options(&dir, false);
        options.key = IndicatorKey::new("alpha", "nope");
        write_portfolio(&options.portfolio, &sample_portfolio()).unwrap();

        assert_contains_error!(
            analyze_indicator(&ScorecastConfig::default(), options),
            "nope"
        );
    }
}
