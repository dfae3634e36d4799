use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sentinel_core::{Price, Sample};
use sentinel_ports::{Clock, SampleSource, SourceError};
use std::f64::consts::TAU;
use std::sync::Arc;

use super::FreshnessGuard;

/// Parameters of the geometric random walk, per step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkParams {
    pub start_price: Price,
    /// Mean log return per step
    pub drift: f64,
    /// Standard deviation of the log return per step
    pub volatility: f64,
}

impl Default for WalkParams {
    fn default() -> Self {
        Self {
            start_price: 50_000.0,
            drift: 0.0,
            volatility: 0.001,
        }
    }
}

/// Seeded geometric random walk stamped by the injected clock
///
/// The same seed always produces the same price path, which makes it
/// useful for demos and soak runs without network access.
pub struct SimulatedSource {
    rng: StdRng,
    params: WalkParams,
    price: Price,
    clock: Arc<dyn Clock>,
    freshness: FreshnessGuard,
}

impl SimulatedSource {
    pub fn new(seed: u64, params: WalkParams, clock: Arc<dyn Clock>) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            params,
            price: params.start_price,
            clock,
            freshness: FreshnessGuard::default(),
        }
    }

    pub fn current_price(&self) -> Price {
        self.price
    }

    // Box-Muller
    fn standard_normal(&mut self) -> f64 {
        let u1: f64 = 1.0 - self.rng.r#gen::<f64>();
        let u2: f64 = self.rng.r#gen::<f64>();
        (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
    }

    fn step(&mut self) -> Price {
        let z = self.standard_normal();
        let next = self.price * (self.params.drift + self.params.volatility * z).exp();
        if Sample::is_usable_price(next) {
            self.price = next;
        }
        self.price
    }
}

#[async_trait]
impl SampleSource for SimulatedSource {
    async fn pull(&mut self) -> Result<Sample, SourceError> {
        let price = self.step();
        self.freshness.check(Sample::new(self.clock.now(), price))
    }

    fn name(&self) -> &str {
        "Simulated"
    }
}
