use async_trait::async_trait;
use sentinel_core::Sample;
use sentinel_ports::{Clock, HistorySource, SampleSource, SourceError};
use std::sync::Arc;
use tracing::debug;

use super::FreshnessGuard;
use crate::rest_client::BinanceRestClient;

/// Live price source polling the Binance ticker endpoint
///
/// The ticker carries no timestamp of its own, so each price is stamped
/// with the injected clock at the moment the response is parsed.
pub struct BinanceTickerSource {
    client: BinanceRestClient,
    symbol: String,
    clock: Arc<dyn Clock>,
    freshness: FreshnessGuard,
}

impl BinanceTickerSource {
    pub fn new(client: BinanceRestClient, symbol: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self {
            client,
            symbol: symbol.into(),
            clock,
            freshness: FreshnessGuard::default(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

#[async_trait]
impl SampleSource for BinanceTickerSource {
    async fn pull(&mut self) -> Result<Sample, SourceError> {
        let price = self.client.ticker_price(&self.symbol).await?;
        let sample = Sample::new(self.clock.now(), price);
        debug!("{} ticker {} at {}", self.symbol, price, sample.timestamp());
        self.freshness.check(sample)
    }

    fn name(&self) -> &str {
        "BinanceTicker"
    }
}

/// Recent one-minute closes from the Binance klines endpoint
///
/// The newest kline is usually still open and its close time lies in the
/// future; anything closing after the clock's current time is dropped so
/// the first live sample is never older than the prefilled history.
pub struct BinanceKlineHistory {
    client: BinanceRestClient,
    symbol: String,
    clock: Arc<dyn Clock>,
}

impl BinanceKlineHistory {
    pub fn new(client: BinanceRestClient, symbol: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self {
            client,
            symbol: symbol.into(),
            clock,
        }
    }
}

#[async_trait]
impl HistorySource for BinanceKlineHistory {
    async fn recent(&self, limit: usize) -> Result<Vec<Sample>, SourceError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        // One extra row to make up for the open candle; the endpoint caps at
        // MAX_KLINES, so only limits below that get the full count back
        let now = self.clock.now();
        let mut samples = self.client.klines(&self.symbol, limit + 1).await?;
        samples.retain(|s| s.timestamp() <= now);
        if samples.len() > limit {
            samples.drain(..samples.len() - limit);
        }
        debug!("Fetched {} closed klines for {}", samples.len(), self.symbol);
        Ok(samples)
    }
}
