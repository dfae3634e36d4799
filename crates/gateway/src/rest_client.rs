//! Minimal Binance spot REST client
//!
//! Only the two public market-data endpoints the pipeline needs:
//! the latest ticker price and recent klines.

use chrono::{DateTime, Utc};
use reqwest::Client;
use sentinel_core::{Price, Sample, Timestamp};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use std::time::Duration;

use crate::error::RestError;

/// Public Binance spot endpoint
pub const DEFAULT_REST_URL: &str = "https://api.binance.com";

/// Largest `limit` the klines endpoint accepts
pub const MAX_KLINES: usize = 1000;

const CLOSE_PRICE_INDEX: usize = 4;
const CLOSE_TIME_INDEX: usize = 6;

/// `GET /api/v3/ticker/price` response body
#[derive(Debug, Clone, Deserialize)]
pub struct TickerPrice {
    pub symbol: String,
    pub price: String,
}

/// REST API client for Binance public market data
#[derive(Clone)]
pub struct BinanceRestClient {
    client: Client,
    base_url: String,
}

impl BinanceRestClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, RestError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Latest traded price for `symbol`
    pub async fn ticker_price(&self, symbol: &str) -> Result<Price, RestError> {
        let path = format!("/api/v3/ticker/price?symbol={}", symbol);
        let ticker: TickerPrice = self.get(&path).await?;
        parse_ticker(&ticker)
    }

    /// Up to `limit` most recent closed 1m candles as samples, oldest first
    pub async fn klines(&self, symbol: &str, limit: usize) -> Result<Vec<Sample>, RestError> {
        let limit = limit.clamp(1, MAX_KLINES);
        let path = format!(
            "/api/v3/klines?symbol={}&interval=1m&limit={}",
            symbol, limit
        );
        let rows: Vec<Vec<Value>> = self.get(&path).await?;
        rows.iter().map(|row| parse_kline(row)).collect()
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, RestError> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.client.get(&url).send().await?;

        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, RestError> {
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            if let Ok(err) = serde_json::from_str::<ApiError>(&text) {
                return Err(RestError::Api {
                    code: err.code,
                    msg: err.msg,
                });
            }
            return Err(RestError::Parse(format!("HTTP {}: {}", status, text)));
        }

        serde_json::from_str(&text).map_err(|e| RestError::Parse(e.to_string()))
    }
}

#[derive(Deserialize)]
struct ApiError {
    code: i32,
    msg: String,
}

/// Parse the ticker's decimal string, rejecting anything that is not a usable price
pub fn parse_ticker(ticker: &TickerPrice) -> Result<Price, RestError> {
    parse_price(&ticker.price)
        .ok_or_else(|| RestError::Parse(format!("{}: unusable price {:?}", ticker.symbol, ticker.price)))
}

/// Close price and close time of one kline row
pub fn parse_kline(row: &[Value]) -> Result<Sample, RestError> {
    let close = row
        .get(CLOSE_PRICE_INDEX)
        .and_then(Value::as_str)
        .and_then(parse_price)
        .ok_or_else(|| RestError::Parse(format!("kline without usable close price: {:?}", row)))?;

    let close_time = row
        .get(CLOSE_TIME_INDEX)
        .and_then(Value::as_i64)
        .and_then(millis_to_timestamp)
        .ok_or_else(|| RestError::Parse(format!("kline without usable close time: {:?}", row)))?;

    Ok(Sample::new(close_time, close))
}

fn parse_price(raw: &str) -> Option<Price> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|p| Sample::is_usable_price(*p))
}

fn millis_to_timestamp(ms: i64) -> Option<Timestamp> {
    DateTime::<Utc>::from_timestamp_millis(ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ticker(price: &str) -> TickerPrice {
        TickerPrice {
            symbol: "BTCUSDT".to_string(),
            price: price.to_string(),
        }
    }

    #[test]
    fn test_parse_ticker() {
        assert_eq!(parse_ticker(&ticker("64123.45000000")).unwrap(), 64123.45);
    }

    #[test]
    fn test_parse_ticker_rejects_unusable_prices() {
        for raw in ["", "abc", "0.00000000", "-5", "NaN", "inf"] {
            assert!(
                matches!(parse_ticker(&ticker(raw)), Err(RestError::Parse(_))),
                "accepted {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_ticker_body_deserializes() {
        let body = r#"{"symbol":"BTCUSDT","price":"64000.01000000"}"#;
        let ticker: TickerPrice = serde_json::from_str(body).unwrap();
        assert_eq!(ticker.symbol, "BTCUSDT");
        assert_eq!(parse_ticker(&ticker).unwrap(), 64000.01);
    }

    #[test]
    fn test_parse_kline_uses_close_price_and_close_time() {
        let row = json!([
            1_700_000_000_000_i64,
            "100.0",
            "101.0",
            "99.0",
            "100.5",
            "12.3",
            1_700_000_059_999_i64,
            "1234.5",
            42,
            "6.0",
            "600.0",
            "0"
        ]);
        let row = row.as_array().unwrap();

        let sample = parse_kline(row).unwrap();
        assert_eq!(sample.price(), 100.5);
        assert_eq!(sample.timestamp().timestamp_millis(), 1_700_000_059_999);
    }

    #[test]
    fn test_parse_kline_rejects_short_rows() {
        let row = json!([1_700_000_000_000_i64, "100.0"]);
        assert!(parse_kline(row.as_array().unwrap()).is_err());
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = BinanceRestClient::new("http://localhost:8080/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
