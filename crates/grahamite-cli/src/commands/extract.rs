use std::fs;
use std::process::ExitCode;

use serde::Deserialize;

use crate::cli::ExtractTickersArgs;
use crate::error::CliError;

#[derive(Debug, Deserialize)]
struct VendorExport {
    #[serde(rename = "InstrumentDisplayDatas", default)]
    instruments: Vec<VendorInstrument>,
}

#[derive(Debug, Deserialize)]
struct VendorInstrument {
    #[serde(rename = "SymbolFull", default)]
    symbol_full: Option<String>,
}

/// Pulls `SymbolFull` values out of a vendor export into a plain ticker
/// list. Instruments without a symbol are skipped, not an error.
pub fn run(args: &ExtractTickersArgs) -> Result<ExitCode, CliError> {
    let raw = fs::read_to_string(&args.input).map_err(|error| {
        CliError::Command(format!(
            "could not read vendor export '{}': {error}",
            args.input.display()
        ))
    })?;
    let export: VendorExport = serde_json::from_str(&raw)?;

    let tickers: Vec<String> = export
        .instruments
        .into_iter()
        .filter_map(|instrument| instrument.symbol_full)
        .collect();

    if tickers.is_empty() {
        return Err(CliError::Command(String::from(
            "no tickers were extracted from the vendor export",
        )));
    }

    fs::write(&args.output, serde_json::to_string_pretty(&tickers)?)?;
    println!(
        "Extracted {} tickers and saved to '{}'",
        tickers.len(),
        args.output.display()
    );

    Ok(ExitCode::SUCCESS)
}
