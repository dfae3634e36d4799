use sentinel_core::Emission;
use sentinel_ports::{SignalSink, SinkError};
use tracing::warn;

/// Emits to every inner sink in order
///
/// One failing sink does not stop the others from receiving the emission;
/// the first error is returned after all of them have been tried.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Box<dyn SignalSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: Box<dyn SignalSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn push(&mut self, sink: Box<dyn SignalSink>) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    fn for_each(
        &mut self,
        mut op: impl FnMut(&mut dyn SignalSink) -> Result<(), SinkError>,
    ) -> Result<(), SinkError> {
        let mut first_err = None;
        for (idx, sink) in self.sinks.iter_mut().enumerate() {
            if let Err(e) = op(sink.as_mut()) {
                if first_err.is_some() {
                    warn!("Sink {} also failed: {}", idx, e);
                } else {
                    first_err = Some(e);
                }
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}

impl SignalSink for FanoutSink {
    fn emit(&mut self, emission: &Emission) -> Result<(), SinkError> {
        self.for_each(|sink| sink.emit(emission))
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.for_each(|sink| sink.flush())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::ChannelSink;
    use chrono::{TimeZone, Utc};
    use sentinel_core::WarmUp;

    struct BrokenSink;

    impl SignalSink for BrokenSink {
        fn emit(&mut self, _emission: &Emission) -> Result<(), SinkError> {
            Err(SinkError::Closed)
        }
    }

    fn warm_up() -> Emission {
        Emission::WarmingUp(WarmUp {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            price: 100.0,
            buffered: 3,
            missing: vec!["macd".to_string()],
        })
    }

    #[test]
    fn test_failing_sink_does_not_starve_the_rest() {
        let (channel, mut rx) = ChannelSink::pair();
        let mut fanout = FanoutSink::new()
            .with(Box::new(BrokenSink))
            .with(Box::new(channel));

        let result = fanout.emit(&warm_up());

        assert!(matches!(result, Err(SinkError::Closed)));
        assert_eq!(rx.try_recv().unwrap(), warm_up());
    }

    #[test]
    fn test_empty_fanout_is_ok() {
        let mut fanout = FanoutSink::new();
        assert!(fanout.is_empty());
        assert!(fanout.emit(&warm_up()).is_ok());
        assert!(fanout.flush().is_ok());
    }
}
