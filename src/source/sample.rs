/// One multi-series reading, produced atomically by a probe.
///
/// Position in the vector is the series identity (and picks the plot colour).
/// `NaN` marks an explicit error reading and values `<= 0` mark "no reading
/// this cycle"; both are excluded from statistics.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sample(Vec<f64>);

impl Sample {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// Number of co-plotted series in this sample.
    pub fn series(&self) -> usize {
        self.0.len()
    }

    /// Value of series `index`, if present.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    pub fn first(&self) -> Option<f64> {
        self.get(0)
    }
}

impl From<Vec<f64>> for Sample {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

/// Whether a value is a real reading (as opposed to a sentinel).
pub(crate) fn is_reading(v: f64) -> bool {
    v.is_finite() && v > 0.0
}
