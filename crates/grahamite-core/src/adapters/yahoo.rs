use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;

use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::provider::{MarketDataProvider, ProviderError};
use crate::{Symbol, TickerSnapshot};

const QUOTE_SUMMARY_MODULES: &str =
    "price,summaryDetail,defaultKeyStatistics,financialData,incomeStatementHistory";

/// Market-data provider backed by Yahoo Finance's unofficial API.
///
/// One quoteSummary call per ticker covers the metrics snapshot and the
/// annual net-income history; the chart endpoint supplies reference-yield
/// closes. All calls go through the injected [`HttpClient`].
#[derive(Clone)]
pub struct YahooProvider {
    http_client: Arc<dyn HttpClient>,
    timeout_ms: u64,
}

impl YahooProvider {
    pub fn new(timeout_ms: u64) -> Self {
        Self {
            http_client: Arc::new(ReqwestHttpClient::new()),
            timeout_ms,
        }
    }

    pub fn with_http_client(http_client: Arc<dyn HttpClient>, timeout_ms: u64) -> Self {
        Self {
            http_client,
            timeout_ms,
        }
    }

    async fn fetch(&self, url: String) -> Result<String, ProviderError> {
        let request = HttpRequest::get(url)
            .with_header("referer", "https://finance.yahoo.com/")
            .with_timeout_ms(self.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|error| {
            ProviderError::unavailable(format!("yahoo transport error: {}", error.message()))
        })?;

        if response.status == 429 {
            return Err(ProviderError::rate_limited("yahoo rate limited the request"));
        }
        if !response.is_success() {
            return Err(ProviderError::unavailable(format!(
                "yahoo returned status {}",
                response.status
            )));
        }

        Ok(response.body)
    }

    fn parse_snapshot(symbol: &Symbol, body: &str) -> Result<TickerSnapshot, ProviderError> {
        let parsed: YahooQuoteSummaryResponse = serde_json::from_str(body).map_err(|error| {
            ProviderError::internal(format!("failed to parse yahoo quoteSummary: {error}"))
        })?;

        if let Some(error) = parsed.quote_summary.error {
            return Err(ProviderError::unavailable(format!(
                "yahoo API error: {error}"
            )));
        }

        let result = parsed
            .quote_summary
            .result
            .into_iter()
            .next()
            .ok_or_else(|| {
                ProviderError::missing_data(format!("yahoo returned no data for {symbol}"))
            })?;

        let price = result.price.unwrap_or_default();
        let summary = result.summary_detail.unwrap_or_default();
        let statistics = result.default_key_statistics.unwrap_or_default();
        let financial = result.financial_data.unwrap_or_default();

        // Yahoo reports dividend yield as a fraction; criteria work in
        // percentage points.
        let dividend_yield = summary
            .dividend_yield
            .and_then(YahooRawValue::into_raw)
            .map_or(0.0, |fraction| fraction * 100.0);

        // Statements arrive newest first; history is kept oldest to newest
        // with sparse entries dropped.
        let mut net_income_history: Vec<f64> = result
            .income_statement_history
            .map(|history| history.income_statement_history)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|statement| statement.net_income.and_then(YahooRawValue::into_raw))
            .collect();
        net_income_history.reverse();

        TickerSnapshot::new(
            symbol.clone(),
            price
                .regular_market_price
                .and_then(YahooRawValue::into_raw)
                .unwrap_or(0.0),
            statistics.trailing_eps.and_then(YahooRawValue::into_raw),
            summary
                .trailing_pe
                .and_then(YahooRawValue::into_raw)
                .unwrap_or(0.0),
            statistics
                .price_to_book
                .and_then(YahooRawValue::into_raw)
                .unwrap_or(0.0),
            financial
                .debt_to_equity
                .and_then(YahooRawValue::into_raw)
                .unwrap_or(0.0),
            dividend_yield,
            net_income_history,
        )
        .map_err(|error| ProviderError::internal(format!("invalid yahoo snapshot: {error}")))
    }

    fn parse_chart_closes(body: &str) -> Result<Vec<f64>, ProviderError> {
        let parsed: YahooChartResponse = serde_json::from_str(body).map_err(|error| {
            ProviderError::internal(format!("failed to parse yahoo chart: {error}"))
        })?;

        if let Some(error) = parsed.chart.error {
            return Err(ProviderError::unavailable(format!(
                "yahoo API error: {error}"
            )));
        }

        let closes = parsed
            .chart
            .result
            .into_iter()
            .next()
            .and_then(|result| result.indicators.quote.into_iter().next())
            .map(|quote| quote.close.into_iter().flatten().collect::<Vec<f64>>())
            .unwrap_or_default();

        if closes.is_empty() {
            return Err(ProviderError::missing_data("yahoo chart had no closes"));
        }

        Ok(closes)
    }
}

impl MarketDataProvider for YahooProvider {
    fn snapshot<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<TickerSnapshot, ProviderError>> + Send + 'a>> {
        Box::pin(async move {
            let url = format!(
                "https://query2.finance.yahoo.com/v10/finance/quoteSummary/{}?modules={}",
                urlencoding::encode(symbol.as_str()),
                QUOTE_SUMMARY_MODULES
            );
            let body = self.fetch(url).await?;
            Self::parse_snapshot(symbol, &body)
        })
    }

    fn bond_yield_series<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f64>, ProviderError>> + Send + 'a>> {
        Box::pin(async move {
            let url = format!(
                "https://query1.finance.yahoo.com/v8/finance/chart/{}?range=5d&interval=1d",
                urlencoding::encode(symbol.as_str())
            );
            let body = self.fetch(url).await?;
            Self::parse_chart_closes(&body)
        })
    }
}

// Yahoo Finance API response structures

#[derive(Debug, Clone, Deserialize)]
struct YahooQuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: YahooQuoteSummaryData,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooQuoteSummaryData {
    #[serde(default)]
    result: Vec<YahooQuoteSummaryResult>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooQuoteSummaryResult {
    #[serde(default)]
    price: Option<YahooPriceData>,
    #[serde(rename = "summaryDetail", default)]
    summary_detail: Option<YahooSummaryDetailData>,
    #[serde(rename = "defaultKeyStatistics", default)]
    default_key_statistics: Option<YahooKeyStatisticsData>,
    #[serde(rename = "financialData", default)]
    financial_data: Option<YahooFinancialData>,
    #[serde(rename = "incomeStatementHistory", default)]
    income_statement_history: Option<YahooIncomeStatementHistory>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct YahooPriceData {
    #[serde(rename = "regularMarketPrice", default)]
    regular_market_price: Option<YahooRawValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct YahooSummaryDetailData {
    #[serde(rename = "trailingPE", default)]
    trailing_pe: Option<YahooRawValue>,
    #[serde(rename = "dividendYield", default)]
    dividend_yield: Option<YahooRawValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct YahooKeyStatisticsData {
    #[serde(rename = "trailingEps", default)]
    trailing_eps: Option<YahooRawValue>,
    #[serde(rename = "priceToBook", default)]
    price_to_book: Option<YahooRawValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct YahooFinancialData {
    #[serde(rename = "debtToEquity", default)]
    debt_to_equity: Option<YahooRawValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct YahooIncomeStatementHistory {
    #[serde(rename = "incomeStatementHistory", default)]
    income_statement_history: Vec<YahooIncomeStatement>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooIncomeStatement {
    #[serde(rename = "netIncome", default)]
    net_income: Option<YahooRawValue>,
}

/// Yahoo wraps numeric values with formatting metadata; only `raw` matters.
#[derive(Debug, Clone, Deserialize)]
struct YahooRawValue {
    #[serde(default)]
    raw: Option<f64>,
}

impl YahooRawValue {
    fn into_raw(self) -> Option<f64> {
        self.raw.filter(|v| v.is_finite())
    }
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartData,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartData {
    #[serde(default)]
    result: Vec<YahooChartResult>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResult {
    indicators: YahooChartIndicators,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartIndicators {
    quote: Vec<YahooChartQuote>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartQuote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}
