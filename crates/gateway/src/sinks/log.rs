use sentinel_core::Emission;
use sentinel_ports::{SignalSink, SinkError};
use tracing::info;

/// Reports each cycle as a tracing line
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl LogSink {
    pub fn new() -> Self {
        Self
    }
}

impl SignalSink for LogSink {
    fn emit(&mut self, emission: &Emission) -> Result<(), SinkError> {
        match emission {
            Emission::WarmingUp(w) => {
                info!(
                    "Warming up at {} ({} buffered), waiting on: {}",
                    w.price,
                    w.buffered,
                    w.missing.join(", ")
                );
            }
            Emission::Signal(s) => {
                info!(
                    "{} (conf {:.2}) at {} [rsi {:.2}, macd_diff {:.4}]",
                    s.label, s.confidence, s.price, s.features.rsi, s.features.macd_diff
                );
            }
        }
        Ok(())
    }
}
