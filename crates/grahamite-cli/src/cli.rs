//! CLI argument definitions for Grahamite.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `screen` | Screen a ticker list and report buy recommendations |
//! | `analyze` | Analyze individual symbols with a full criteria report |
//! | `extract-tickers` | Extract symbols from a vendor export JSON |
//! | `clean` | Remove unavailable tickers from the ticker list |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `table` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--audit-log` | `assumptions.log` | Append-only assumption/error log |
//! | `--mode` | `concurrent` | Scheduling (concurrent, sequential) |
//! | `--max-concurrency` | `8` | Task bound in concurrent mode |
//! | `--delay-ms` | `1000` | Inter-request delay in sequential mode |
//! | `--timeout-ms` | `10000` | Provider HTTP timeout per call |
//! | `--default-yield` | `0.044` | Fallback bond yield (decimal) |
//! | `--default-growth` | `0.03` | Fallback growth rate (decimal) |

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Grahamite - value-investing stock screener
///
/// Screens ticker symbols against an adjusted-Graham intrinsic-value
/// heuristic and a fixed battery of value/quality criteria.
#[derive(Debug, Parser)]
#[command(
    name = "grahamite",
    author,
    version,
    about = "Value-investing stock screener"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Append-only audit log for assumptions, warnings, and errors.
    #[arg(long, global = true, default_value = "assumptions.log")]
    pub audit_log: PathBuf,

    /// Scheduling model for batch analysis.
    #[arg(long, global = true, value_enum, default_value_t = SchedulingMode::Concurrent)]
    pub mode: SchedulingMode,

    /// Maximum in-flight ticker analyses in concurrent mode.
    #[arg(long, global = true, default_value_t = 8)]
    pub max_concurrency: usize,

    /// Delay between provider requests in sequential mode, in milliseconds.
    #[arg(long, global = true, default_value_t = 1000)]
    pub delay_ms: u64,

    /// Provider HTTP timeout per call, in milliseconds.
    #[arg(long, global = true, default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Fallback bond yield used when the reference fetch fails.
    #[arg(long, global = true, default_value_t = 0.044)]
    pub default_yield: f64,

    /// Fallback growth rate used when income history is insufficient.
    #[arg(long, global = true, default_value_t = 0.03)]
    pub default_growth: f64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchedulingMode {
    Concurrent,
    Sequential,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Screen every ticker in the ticker file.
    Screen(ScreenArgs),
    /// Analyze one or more symbols directly.
    Analyze(AnalyzeArgs),
    /// Extract ticker symbols from a vendor export JSON.
    ExtractTickers(ExtractTickersArgs),
    /// Remove unavailable tickers from the ticker file.
    Clean(CleanArgs),
}

#[derive(Debug, Args)]
pub struct ScreenArgs {
    /// JSON array of ticker symbols to screen.
    #[arg(long, default_value = "tickers.json")]
    pub tickers_file: PathBuf,

    /// Output file for tickers whose data was unavailable.
    #[arg(long, default_value = "unavailable_tickers.json")]
    pub unavailable_file: PathBuf,

    /// Also print tickers classified NotBuy.
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Symbols to analyze.
    #[arg(required = true)]
    pub symbols: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ExtractTickersArgs {
    /// Vendor export file containing InstrumentDisplayDatas.
    #[arg(long, default_value = "etoro_info.json")]
    pub input: PathBuf,

    /// Destination ticker file.
    #[arg(long, default_value = "tickers.json")]
    pub output: PathBuf,
}

#[derive(Debug, Args)]
pub struct CleanArgs {
    /// Ticker file to rewrite in place.
    #[arg(long, default_value = "tickers.json")]
    pub tickers_file: PathBuf,

    /// File listing tickers to remove.
    #[arg(long, default_value = "unavailable_tickers.json")]
    pub unavailable_file: PathBuf,
}
