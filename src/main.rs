use anyhow::Result;
use clap::Parser;
use scorecast::cli::{Cli, Commands};
use scorecast::commands::{self, analyze::AnalyzeOptions};
use scorecast::observability::{init_logging, install_panic_hook};
use scorecast::store::IndicatorKey;

fn main() -> Result<()> {
    install_panic_hook();
    let cli = Cli::parse();
    init_logging(cli.verbosity);
    if cli.plain {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Init { force } => commands::init::init_config(force),
        Commands::Template { path, force } => {
            let config = commands::resolve_config(cli.config.as_deref())?;
            commands::template::write_template(&config, &path, force)?;
            println!("Created {}", path.display());
            Ok(())
        }
        Commands::Report {
            portfolio,
            format,
            output,
        } => commands::report::report_portfolio(&portfolio, format.into(), output.as_deref()),
        Commands::Analyze {
            portfolio,
            grouping,
            indicator,
            recommend,
            save,
            format,
            output,
        } => {
            let config = commands::resolve_config(cli.config.as_deref())?;
            let options = AnalyzeOptions {
                portfolio,
                key: IndicatorKey::new(grouping.as_str(), indicator.as_str()),
                recommend,
                save,
                format: format.into(),
                output,
            };
            commands::analyze::analyze_indicator(&config, options)
        }
    }
}
