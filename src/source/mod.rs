//! Sample source abstraction for receiving probe readings.
//!
//! A probe runs on its own cadence and hands samples over through a
//! [`SampleSource`]. The collector polls every source once per tick and must
//! never wait on one, so `poll` is strictly non-blocking.

mod channel;
pub(crate) mod sample;

pub use channel::ChannelSource;
pub use sample::Sample;

use std::fmt::Debug;

/// Trait for receiving samples from a running probe.
///
/// # Example
///
/// ```
/// use netwatch::{ChannelSource, Sample, SampleSource};
///
/// let (tx, mut source) = ChannelSource::create("sine:localhost");
/// assert!(source.poll().is_none());
///
/// tx.try_send(Sample::from(vec![1.0])).unwrap();
/// assert_eq!(source.poll().unwrap().values(), &[1.0]);
/// ```
pub trait SampleSource: Send + Debug {
    /// Take the oldest pending sample, if one has arrived.
    ///
    /// Returns `None` immediately when nothing is ready.
    fn poll(&mut self) -> Option<Sample>;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;

    /// Returns an error message once the producer has gone away.
    fn error(&self) -> Option<&str>;
}
