use std::collections::HashSet;
use std::fs;
use std::process::ExitCode;

use crate::cli::CleanArgs;
use crate::error::CliError;

/// Removes tickers flagged unavailable by a previous screen run, rewriting
/// the ticker file in place.
pub fn run(args: &CleanArgs) -> Result<ExitCode, CliError> {
    let tickers: Vec<String> =
        serde_json::from_str(&fs::read_to_string(&args.tickers_file).map_err(|error| {
            CliError::MissingTickers {
                path: args.tickers_file.clone(),
                reason: error.to_string(),
            }
        })?)?;
    let unavailable: HashSet<String> =
        serde_json::from_str(&fs::read_to_string(&args.unavailable_file).map_err(|error| {
            CliError::Command(format!(
                "could not read unavailable file '{}': {error}",
                args.unavailable_file.display()
            ))
        })?)?;

    let before = tickers.len();
    let filtered: Vec<String> = tickers
        .into_iter()
        .filter(|ticker| !unavailable.contains(ticker))
        .collect();

    fs::write(
        &args.tickers_file,
        serde_json::to_string_pretty(&filtered)?,
    )?;
    println!(
        "Removed {} tickers; {} remain in '{}'",
        before - filtered.len(),
        filtered.len(),
        args.tickers_file.display()
    );

    Ok(ExitCode::SUCCESS)
}
