//! Channel-based sample source.
//!
//! Receives samples via a single-slot tokio mpsc channel. The producer awaits
//! while the slot is full, so samples arrive in emission order and are never
//! reordered; the collector side only ever uses `try_recv`.

use tokio::sync::mpsc;

use super::{Sample, SampleSource};

/// Number of samples that can wait in the handoff channel.
pub const HANDOFF_CAPACITY: usize = 1;

/// A sample source fed by a probe task through an mpsc channel.
///
/// # Example
///
/// ```
/// use netwatch::{ChannelSource, SampleSource};
///
/// let (tx, source) = ChannelSource::create("multi:demo");
/// assert_eq!(source.description(), "multi:demo");
/// # drop(tx);
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: mpsc::Receiver<Sample>,
    description: String,
    last_error: Option<String>,
}

impl ChannelSource {
    /// Create a new channel source.
    ///
    /// # Arguments
    ///
    /// * `receiver` - The receiving end of the probe's handoff channel
    /// * `description` - Where the samples come from (usually `type:target`)
    pub fn new(receiver: mpsc::Receiver<Sample>, description: &str) -> Self {
        Self {
            receiver,
            description: description.to_string(),
            last_error: None,
        }
    }

    /// Create a channel pair for handing samples to a ChannelSource.
    ///
    /// Returns (sender, source); the sender belongs to the probe task.
    pub fn create(description: &str) -> (mpsc::Sender<Sample>, Self) {
        let (tx, rx) = mpsc::channel(HANDOFF_CAPACITY);
        (tx, Self::new(rx, description))
    }
}

impl SampleSource for ChannelSource {
    fn poll(&mut self) -> Option<Sample> {
        match self.receiver.try_recv() {
            Ok(sample) => Some(sample),
            Err(mpsc::error::TryRecvError::Empty) => None,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                if self.last_error.is_none() {
                    self.last_error = Some("Probe stopped producing samples".to_string());
                }
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_source_poll_empty() {
        let (_tx, mut source) = ChannelSource::create("test");
        assert!(source.poll().is_none());
        assert!(source.error().is_none());
    }

    #[test]
    fn test_channel_source_fifo() {
        let (tx, mut source) = ChannelSource::create("test");

        tx.try_send(Sample::from(vec![1.0])).unwrap();
        // Single slot: a second sample has to wait for the collector.
        assert!(tx.try_send(Sample::from(vec![2.0])).is_err());

        assert_eq!(source.poll(), Some(Sample::from(vec![1.0])));
        tx.try_send(Sample::from(vec![2.0])).unwrap();
        assert_eq!(source.poll(), Some(Sample::from(vec![2.0])));
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_send_waits_for_free_slot() {
        use tokio_test::{assert_pending, assert_ready_ok, task};

        let (tx, mut source) = ChannelSource::create("test");
        tx.try_send(Sample::from(vec![1.0])).unwrap();

        let mut send = task::spawn(tx.send(Sample::from(vec![2.0])));
        assert_pending!(send.poll());

        assert_eq!(source.poll(), Some(Sample::from(vec![1.0])));
        assert!(send.is_woken());
        assert_ready_ok!(send.poll());
        assert_eq!(source.poll(), Some(Sample::from(vec![2.0])));
    }

    #[test]
    fn test_channel_source_disconnected() {
        let (tx, mut source) = ChannelSource::create("test");
        tx.try_send(Sample::from(vec![3.0])).unwrap();
        drop(tx);

        // Pending sample is still delivered after the producer is gone.
        assert!(source.poll().is_some());
        assert!(source.poll().is_none());
        assert_eq!(source.error(), Some("Probe stopped producing samples"));
    }
}
