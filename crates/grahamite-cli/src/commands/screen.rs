use std::fs;
use std::process::ExitCode;

use grahamite_core::{AuditSink, Symbol};

use crate::cli::{Cli, ScreenArgs};
use crate::error::CliError;
use crate::output;

use super::build_analyzer;

pub async fn run(cli: &Cli, args: &ScreenArgs) -> Result<ExitCode, CliError> {
    // The only fatal condition: no ticker list means nothing to analyze.
    let raw = fs::read_to_string(&args.tickers_file).map_err(|error| CliError::MissingTickers {
        path: args.tickers_file.clone(),
        reason: error.to_string(),
    })?;
    let tickers: Vec<String> = serde_json::from_str(&raw)?;
    let symbols = tickers
        .iter()
        .map(|raw| Symbol::parse(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let (analyzer, audit) = build_analyzer(cli)?;
    let result = analyzer.run(&symbols).await;

    output::render(&result, cli.format, cli.pretty, args.verbose)?;

    // Errored tickers feed the separate clean step later.
    let errors: Vec<&str> = result.errors.iter().map(Symbol::as_str).collect();
    fs::write(
        &args.unavailable_file,
        serde_json::to_string_pretty(&errors)?,
    )?;

    audit.flush()?;

    Ok(ExitCode::SUCCESS)
}
