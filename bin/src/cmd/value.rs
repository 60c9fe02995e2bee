//! Value command implementation.

use crate::Format;
use anyhow::{Context, Result};
use intrinsic::{Pipeline, ValuationConfig, report};
use intrinsic_fmp::FmpClient;
use intrinsic_traits::MarketDataProvider;
use intrinsic_yahoo::YahooClient;
use std::time::Duration;
use tracing::warn;

/// Split arguments on commas, then on whitespace within each entry.
///
/// A blank comma-separated entry is kept as `""` so it still counts toward
/// the pipeline's ticker cap.
fn split_tickers(tickers: &[String]) -> Vec<&str> {
    tickers
        .iter()
        .flat_map(|t| t.split(','))
        .flat_map(|entry| {
            let words: Vec<&str> = entry.split_whitespace().collect();
            if words.is_empty() { vec![""] } else { words }
        })
        .collect()
}

/// Primary then secondary source, both with the given timeout.
fn providers(timeout: Duration) -> Result<Vec<Box<dyn MarketDataProvider>>> {
    let fmp = FmpClient::from_env().unwrap_or_else(|e| {
        warn!(error = %e, "FMP_API_KEY not set, primary source will be skipped");
        FmpClient::unauthenticated()
    });
    let fmp = fmp
        .with_timeout(timeout)
        .context("failed to build FMP client")?;
    let yahoo = YahooClient::new()
        .with_timeout(timeout)
        .context("failed to build Yahoo client")?;

    Ok(vec![Box::new(fmp), Box::new(yahoo)])
}

/// Value the given tickers and print the ranked report.
pub(crate) async fn value_tickers(
    tickers: &[String],
    discount_rate: f64,
    terminal_growth: f64,
    format: Format,
    timeout_secs: u64,
) -> Result<()> {
    let config = ValuationConfig::new(discount_rate, terminal_growth);
    let pipeline = Pipeline::new(providers(Duration::from_secs(timeout_secs))?, config)?;

    let symbols = split_tickers(tickers);
    let mut rows = pipeline.run(&symbols).await;
    report::rank(&mut rows);

    match format {
        Format::Json => {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        Format::Text => {
            println!("\n╔══════════════════════════════════════════════════════════════╗");
            println!("║                    Intrinsic Valuation                       ║");
            println!("╚══════════════════════════════════════════════════════════════╝\n");
            println!(
                "Discount rate: {:.2}%   Terminal growth: {:.2}%   Sources: {}",
                config.discount_rate * 100.0,
                config.terminal_growth_rate * 100.0,
                pipeline.provider_names().join(", ")
            );
            println!();

            if rows.is_empty() {
                println!("Please enter valid tickers to display data.");
                return Ok(());
            }
            print!("{}", report::render_text(&rows));
            println!("Run `intrinsic guide` for how to interpret this report.");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_tickers() {
        let args = vec!["AAPL,KO".to_string(), " MSFT  GOOG ".to_string()];
        assert_eq!(split_tickers(&args), vec!["AAPL", "KO", "MSFT", "GOOG"]);

        let args = vec!["AAA,,, ,,,BBB".to_string()];
        assert_eq!(split_tickers(&args), vec!["AAA", "", "", "", "", "", "BBB"]);
    }

    #[test]
    fn test_providers_order() {
        let providers = providers(Duration::from_secs(5)).unwrap();
        let names: Vec<&str> = providers.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["fmp", "yahoo"]);
    }
}
