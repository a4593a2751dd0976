//! Probe registry: maps a probe type name to a factory that starts a producer.
//!
//! A probe is started once per panel. `start` returns promptly with a
//! [`SampleSource`]; the actual sampling runs on a tokio task at the probe's
//! own cadence and hands samples over through a single-slot channel.
//!
//! ```text
//!  "sine:host" ──▶ ProbeRegistry::start ──▶ Probe::start ──▶ tokio task
//!                                                │               │
//!                                                ▼               ▼
//!                                     Box<dyn SampleSource> ◀── mpsc(1)
//! ```

mod synthetic;

pub use synthetic::{Shape, SyntheticProbe, Waveform};

use std::collections::BTreeMap;
use std::time::Duration;

use tokio::sync::watch;

use crate::error::{ConfigError, ProbeError};
use crate::source::SampleSource;

/// Runtime context handed to every probe factory.
#[derive(Debug, Clone)]
pub struct ProbeContext {
    /// Nominal sampling interval (the display tick rate).
    pub interval: Duration,
    /// Flips to `true` when the dashboard shuts down. Producers check it
    /// between emissions.
    pub shutdown: watch::Receiver<bool>,
}

impl ProbeContext {
    pub fn new(interval: Duration, shutdown: watch::Receiver<bool>) -> Self {
        Self { interval, shutdown }
    }
}

/// A named producer of samples for a target.
///
/// Implementations must return promptly from `start`, spawning their
/// producer on the current tokio runtime, and fail only when the target is
/// structurally invalid for this probe type.
pub trait Probe: Send + Sync {
    /// Type tag used on the command line (`<name>:<target>`).
    fn name(&self) -> &'static str;

    /// One-line description for `--list`.
    fn describe(&self) -> &'static str;

    /// Reject a target without starting anything.
    fn check_target(&self, target: &str) -> Result<(), ProbeError> {
        validate_target(target)
    }

    /// Launch a producer for `target` and return its sample source.
    fn start(&self, target: &str, ctx: &ProbeContext)
        -> Result<Box<dyn SampleSource>, ProbeError>;
}

/// Registered probe types, keyed by name.
#[derive(Default)]
pub struct ProbeRegistry {
    probes: BTreeMap<&'static str, Box<dyn Probe>>,
}

impl ProbeRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in synthetic probes (`sine`, `lagsine`, `multi`).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(SyntheticProbe::sine()));
        registry.register(Box::new(SyntheticProbe::lagsine()));
        registry.register(Box::new(SyntheticProbe::multi()));
        registry
    }

    /// Add a probe type, replacing any existing one with the same name.
    pub fn register(&mut self, probe: Box<dyn Probe>) {
        self.probes.insert(probe.name(), probe);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Probe> {
        self.probes.get(name).map(|p| p.as_ref())
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&'static str> {
        self.probes.keys().copied().collect()
    }

    /// `(name, description)` pairs in sorted order.
    pub fn describe(&self) -> Vec<(&'static str, &'static str)> {
        self.probes.values().map(|p| (p.name(), p.describe())).collect()
    }

    /// Look up `kind` and check `target` without starting a producer.
    pub fn check(&self, kind: &str, target: &str) -> Result<(), ConfigError> {
        self.lookup(kind)?
            .check_target(target)
            .map_err(|source| ConfigError::Probe {
                kind: kind.to_string(),
                source,
            })
    }

    fn lookup(&self, kind: &str) -> Result<&dyn Probe, ConfigError> {
        self.get(kind).ok_or_else(|| ConfigError::UnknownProbe {
            kind: kind.to_string(),
            available: self.names().join(", "),
        })
    }

    /// Look up `kind` and start it against `target`.
    pub fn start(
        &self,
        kind: &str,
        target: &str,
        ctx: &ProbeContext,
    ) -> Result<Box<dyn SampleSource>, ConfigError> {
        let probe = self.lookup(kind)?;
        probe.start(target, ctx).map_err(|source| ConfigError::Probe {
            kind: kind.to_string(),
            source,
        })
    }
}

impl std::fmt::Debug for ProbeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProbeRegistry").field("probes", &self.names()).finish()
    }
}

/// Reject empty targets and targets with whitespace or control characters.
pub fn validate_target(target: &str) -> Result<(), ProbeError> {
    if target.is_empty() {
        return Err(ProbeError::InvalidTarget {
            target: target.to_string(),
            reason: "target is empty",
        });
    }
    if target.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ProbeError::InvalidTarget {
            target: target.to_string(),
            reason: "target contains whitespace or control characters",
        });
    }
    Ok(())
}
