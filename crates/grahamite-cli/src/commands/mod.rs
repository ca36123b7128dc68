mod analyze;
mod clean;
mod extract;
mod screen;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use grahamite_core::{
    AnalyzerConfig, AuditSink, BatchAnalyzer, FileAuditSink, Scheduling, YahooProvider,
};

use crate::cli::{Cli, Command, SchedulingMode};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<ExitCode, CliError> {
    match &cli.command {
        Command::Screen(args) => screen::run(cli, args).await,
        Command::Analyze(args) => analyze::run(cli, args).await,
        Command::ExtractTickers(args) => extract::run(args),
        Command::Clean(args) => clean::run(args),
    }
}

/// Builds the analyzer and its audit sink for one batch run.
///
/// The sink is opened here, shared by every component, and flushed by the
/// calling command once the run is over.
pub(crate) fn build_analyzer(cli: &Cli) -> Result<(BatchAnalyzer, Arc<dyn AuditSink>), CliError> {
    let audit: Arc<dyn AuditSink> = Arc::new(FileAuditSink::open(&cli.audit_log)?);

    let scheduling = match cli.mode {
        SchedulingMode::Concurrent => Scheduling::Concurrent {
            max_concurrency: cli.max_concurrency,
        },
        SchedulingMode::Sequential => Scheduling::Sequential {
            delay: Duration::from_millis(cli.delay_ms),
        },
    };

    let config = AnalyzerConfig {
        scheduling,
        default_yield: cli.default_yield,
        default_growth: cli.default_growth,
    };

    let provider = Arc::new(YahooProvider::new(cli.timeout_ms));
    let analyzer = BatchAnalyzer::new(provider, audit.clone(), config);
    Ok((analyzer, audit))
}
