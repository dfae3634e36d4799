//! Signal sinks

mod channel;
mod fanout;
mod jsonl;
mod log;

pub use channel::ChannelSink;
pub use fanout::FanoutSink;
pub use jsonl::JsonLinesSink;
pub use log::LogSink;
