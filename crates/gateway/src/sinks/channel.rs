use sentinel_core::Emission;
use sentinel_ports::{SignalSink, SinkError};
use tokio::sync::mpsc;

/// Forwards emissions to an in-process receiver
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Emission>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<Emission>) -> Self {
        Self { tx }
    }

    /// Create a sink together with its receiving end
    pub fn pair() -> (Self, mpsc::UnboundedReceiver<Emission>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl SignalSink for ChannelSink {
    fn emit(&mut self, emission: &Emission) -> Result<(), SinkError> {
        self.tx
            .send(emission.clone())
            .map_err(|_| SinkError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use sentinel_core::WarmUp;

    fn warm_up() -> Emission {
        Emission::WarmingUp(WarmUp {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            price: 100.0,
            buffered: 1,
            missing: vec!["rsi".to_string()],
        })
    }

    #[test]
    fn test_emissions_arrive_in_order() {
        let (mut sink, mut rx) = ChannelSink::pair();
        sink.emit(&warm_up()).unwrap();
        sink.emit(&warm_up()).unwrap();

        assert_eq!(rx.try_recv().unwrap(), warm_up());
        assert_eq!(rx.try_recv().unwrap(), warm_up());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_dropped_receiver_is_closed() {
        let (mut sink, rx) = ChannelSink::pair();
        drop(rx);

        assert!(matches!(sink.emit(&warm_up()), Err(SinkError::Closed)));
    }
}
