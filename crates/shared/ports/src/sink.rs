use sentinel_core::Emission;

use crate::error::SinkError;

/// Port for publishing per-cycle emissions
///
/// What happens to an emission (log line, file, database, dashboard)
/// is up to the implementation.
pub trait SignalSink: Send {
    fn emit(&mut self, emission: &Emission) -> Result<(), SinkError>;

    /// Flush buffered output, called when the loop stops
    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}
