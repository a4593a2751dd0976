//! Panels: one monitored target, its sample source and its history.

use std::fmt;
use std::str::FromStr;

use tracing::warn;

use super::history::HistoryRing;
use crate::error::ConfigError;
use crate::probe::{ProbeContext, ProbeRegistry};
use crate::source::SampleSource;

/// Upper bound on the number of panels.
pub const MAX_PANELS: usize = 255;

/// Whether a panel received a sample in the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Freshness {
    /// A new sample was written this tick.
    Fresh,
    /// Nothing arrived this tick; the ring is unchanged.
    #[default]
    Stale,
}

/// A parsed `type:target` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSpec {
    pub kind: String,
    pub target: String,
}

impl FromStr for PanelSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(kind), Some(target), None) => Ok(Self {
                kind: kind.to_string(),
                target: target.to_string(),
            }),
            _ => Err(ConfigError::MalformedTarget(s.to_string())),
        }
    }
}

impl fmt::Display for PanelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.target)
    }
}

/// Per-target state: probe handle plus bounded history.
#[derive(Debug)]
pub struct Panel {
    pub kind: String,
    pub target: String,
    source: Box<dyn SampleSource>,
    ring: HistoryRing,
    freshness: Freshness,
    disconnect_reported: bool,
}

impl Panel {
    pub fn new(spec: PanelSpec, source: Box<dyn SampleSource>, capacity: usize) -> Self {
        Self {
            kind: spec.kind,
            target: spec.target,
            source,
            ring: HistoryRing::new(capacity),
            freshness: Freshness::Stale,
            disconnect_reported: false,
        }
    }

    pub fn ring(&self) -> &HistoryRing {
        &self.ring
    }

    pub fn freshness(&self) -> Freshness {
        self.freshness
    }

    /// Non-blocking fetch of the next sample into the ring.
    ///
    /// Leaves the ring untouched and marks the panel stale when nothing has
    /// arrived since the previous tick.
    pub fn collect(&mut self) -> Freshness {
        self.freshness = match self.source.poll() {
            Some(sample) => {
                self.ring.push(sample);
                Freshness::Fresh
            }
            None => {
                if !self.disconnect_reported {
                    if let Some(err) = self.source.error() {
                        warn!("{}: {}", self.source.description(), err);
                        self.disconnect_reported = true;
                    }
                }
                Freshness::Stale
            }
        };
        self.freshness
    }
}

/// Parse every `type:target` argument and start one probe per panel.
///
/// Syntax, probe type and target of every argument are checked before any
/// probe is started, so a bad argument never leaves half the dashboard running.
pub fn parse_panels<S: AsRef<str>>(
    args: &[S],
    registry: &ProbeRegistry,
    ctx: &ProbeContext,
    capacity: usize,
) -> Result<Vec<Panel>, ConfigError> {
    if args.is_empty() {
        return Err(ConfigError::NoTargets);
    }
    if args.len() > MAX_PANELS {
        return Err(ConfigError::TooManyTargets(args.len()));
    }

    let specs = args
        .iter()
        .map(|arg| arg.as_ref().parse::<PanelSpec>())
        .collect::<Result<Vec<_>, _>>()?;

    for spec in &specs {
        registry.check(&spec.kind, &spec.target)?;
    }

    specs
        .into_iter()
        .map(|spec| {
            let source = registry.start(&spec.kind, &spec.target, ctx)?;
            Ok(Panel::new(spec, source, capacity))
        })
        .collect()
}
