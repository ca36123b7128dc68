use std::process::ExitCode;

use grahamite_core::{AuditSink, Symbol};

use crate::cli::{AnalyzeArgs, Cli};
use crate::error::CliError;
use crate::output;

use super::build_analyzer;

pub async fn run(cli: &Cli, args: &AnalyzeArgs) -> Result<ExitCode, CliError> {
    let symbols = args
        .symbols
        .iter()
        .map(|raw| Symbol::parse(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let (analyzer, audit) = build_analyzer(cli)?;
    let result = analyzer.run(&symbols).await;

    // A one-off analysis always shows the full report.
    output::render(&result, cli.format, cli.pretty, true)?;
    audit.flush()?;

    Ok(ExitCode::SUCCESS)
}
