//! Summary statistics over a panel's history.

use super::history::HistoryRing;
use crate::source::sample::is_reading;

/// Statistics shown under each chart and used to scale it.
///
/// Only strictly positive finite values count as readings; `NaN` error markers
/// and non-positive "no reading" markers are skipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelStats {
    /// Largest reading across all series and slots, 0.0 when there is none.
    pub max: f64,
    /// Smallest reading, if any.
    pub min: Option<f64>,
    /// Mean of the readings. `NaN` when there were none.
    pub avg: f64,
    /// First-series value of the newest sample, 0.0 for an empty ring.
    pub last: f64,
    /// Number of readings that went into the average.
    pub count: usize,
    /// Widest sample seen, in series.
    pub series: usize,
}

impl PanelStats {
    /// Walk the ring oldest to newest and accumulate.
    pub fn from_ring(ring: &HistoryRing) -> Self {
        let mut max = 0.0_f64;
        let mut min: Option<f64> = None;
        let mut total = 0.0;
        let mut count = 0usize;
        let mut series = 0;

        for sample in ring.iter() {
            series = series.max(sample.series());
            for &v in sample.values() {
                if !is_reading(v) {
                    continue;
                }
                max = max.max(v);
                min = Some(min.map_or(v, |m| m.min(v)));
                total += v;
                count += 1;
            }
        }

        let last = ring.latest().and_then(|s| s.first()).unwrap_or(0.0);

        Self {
            max,
            min,
            // NaN when count is 0.
            avg: total / count as f64,
            last,
            count,
            series,
        }
    }

    /// The `L=.. M=.. A=..` overlay text.
    pub fn overlay(&self) -> String {
        format!("L={:.1} M={:.1} A={:.1}", self.last, self.max, self.avg)
    }
}
