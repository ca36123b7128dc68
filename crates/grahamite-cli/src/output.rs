use grahamite_core::{BatchResult, TickerReport};

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(
    result: &BatchResult,
    format: OutputFormat,
    pretty: bool,
    verbose: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => render_table(result, verbose),
    }

    Ok(())
}

fn render_table(result: &BatchResult, verbose: bool) {
    println!("\nBuy Recommendations:");
    if result.buys.is_empty() {
        println!("  (none)");
    }
    for report in &result.buys {
        render_report(report, result.outlier_threshold);
    }

    if verbose {
        println!("\nNot Buy:");
        for report in &result.not_buys {
            render_report(report, result.outlier_threshold);
        }
    }

    if let Some(threshold) = result.outlier_threshold {
        println!("\nOutlier threshold (median + 3\u{3c3}): {threshold:.2}");
    }

    if !result.errors.is_empty() {
        println!("\nUnavailable tickers:");
        for symbol in &result.errors {
            println!("  {symbol}");
        }
    }
}

fn render_report(report: &TickerReport, outlier_threshold: Option<f64>) {
    let flag = match outlier_threshold {
        Some(threshold) if report.intrinsic_value > threshold => " [outlier]",
        _ => "",
    };
    println!(
        "\n{} (intrinsic {:.2}, margin {:.1}%){flag}:",
        report.symbol, report.intrinsic_value, report.margin_of_safety
    );
    for criterion in &report.criteria {
        let status = if criterion.passed { "PASS" } else { "FAIL" };
        match criterion.observed {
            Some(value) => println!("  {}: {status} ({value:.2})", criterion.name),
            None => println!("  {}: {status} (n/a)", criterion.name),
        }
    }
}
