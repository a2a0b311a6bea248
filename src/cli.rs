use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "scorecast")]
#[command(about = "Score statistics, targets and status reports for indicator portfolios", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Config file (defaults to .scorecast.toml in this or a parent directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub plain: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default .scorecast.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Write an empty portfolio file laid out as configured
    Template {
        /// Portfolio file to create
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Status report over every active indicator
    Report {
        /// Portfolio file
        portfolio: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Statistics, distribution and recommendation for one indicator
    Analyze {
        /// Portfolio file
        portfolio: PathBuf,

        /// Grouping id
        #[arg(short, long)]
        grouping: String,

        /// Indicator id
        #[arg(short, long)]
        indicator: String,

        /// Compute a fresh recommendation
        #[arg(long)]
        recommend: bool,

        /// Store the fresh recommendation back into the portfolio file
        #[arg(long, requires = "recommend")]
        save: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Terminal,
}

impl From<OutputFormat> for crate::io::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => crate::io::OutputFormat::Json,
            OutputFormat::Terminal => crate::io::OutputFormat::Terminal,
        }
    }
}
