//! Bounded per-panel history backing the strip charts.

use crate::source::Sample;

/// Fixed-capacity circular buffer of the most recent samples for one panel.
///
/// One slot is written per successful collection and the oldest sample is
/// overwritten first. Slots that were never written stay empty; traversal
/// still visits them so that the newest sample always lands in the right-most
/// plot column.
#[derive(Debug, Clone)]
pub struct HistoryRing {
    slots: Vec<Option<Sample>>,
    /// Next slot to write, which is also the oldest slot.
    cursor: usize,
    written: usize,
}

impl HistoryRing {
    /// Create an empty ring with `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero; the layout rejects such windows first.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "history ring needs at least one slot");
        Self {
            slots: vec![None; capacity],
            cursor: 0,
            written: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots holding a sample.
    pub fn len(&self) -> usize {
        self.written.min(self.capacity())
    }

    pub fn is_empty(&self) -> bool {
        self.written == 0
    }

    /// Total samples ever written, including overwritten ones.
    pub fn total_written(&self) -> usize {
        self.written
    }

    /// Write a sample at the cursor and advance it.
    pub fn push(&mut self, sample: Sample) {
        self.slots[self.cursor] = Some(sample);
        self.cursor = (self.cursor + 1) % self.capacity();
        self.written += 1;
    }

    /// Every slot in ring order, oldest first, empty slots included.
    pub fn slots(&self) -> impl Iterator<Item = Option<&Sample>> + '_ {
        let (newer, older) = self.slots.split_at(self.cursor);
        older.iter().chain(newer.iter()).map(Option::as_ref)
    }

    /// Stored samples in write order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Sample> + '_ {
        self.slots().flatten()
    }

    /// The most recently written sample.
    pub fn latest(&self) -> Option<&Sample> {
        if self.is_empty() {
            return None;
        }
        let index = (self.cursor + self.capacity() - 1) % self.capacity();
        self.slots[index].as_ref()
    }
}
