//! Synthetic probes standing in for real sensors.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use super::{Probe, ProbeContext};
use crate::error::ProbeError;
use crate::source::{ChannelSource, Sample, SampleSource};

/// Phase advance per emitted sample.
const PHASE_STEP: f64 = 0.1;

/// Shape of the generated signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// One series: `sin(phase) + 1`.
    Sine,
    /// Three series: `sin(phase) + 1`, `cos(phase) + 1` and a uniform value in `[0, 2)`.
    Multi,
}

/// Deterministic signal generator behind the synthetic probes.
#[derive(Debug)]
pub struct Waveform {
    shape: Shape,
    phase: f64,
    rng: StdRng,
}

impl Waveform {
    pub fn new(shape: Shape) -> Self {
        Self::with_rng(shape, StdRng::from_os_rng())
    }

    /// Use a fixed seed for the random series.
    pub fn seeded(shape: Shape, seed: u64) -> Self {
        Self::with_rng(shape, StdRng::seed_from_u64(seed))
    }

    fn with_rng(shape: Shape, rng: StdRng) -> Self {
        Self {
            shape,
            phase: 0.0,
            rng,
        }
    }

    /// Produce the next sample and advance the phase.
    pub fn next_sample(&mut self) -> Sample {
        let i = self.phase;
        self.phase += PHASE_STEP;
        match self.shape {
            Shape::Sine => Sample::new(vec![i.sin() + 1.0]),
            Shape::Multi => Sample::new(vec![
                i.sin() + 1.0,
                i.cos() + 1.0,
                self.rng.random::<f64>() * 2.0,
            ]),
        }
    }
}

/// A probe that ignores its target and emits a generated waveform.
#[derive(Debug, Clone)]
pub struct SyntheticProbe {
    name: &'static str,
    about: &'static str,
    shape: Shape,
    /// Emission period as a multiple of the nominal interval.
    slowdown: u32,
}

impl SyntheticProbe {
    /// Single sine series at the nominal interval.
    pub fn sine() -> Self {
        Self {
            name: "sine",
            about: "sine wave at the tick rate",
            shape: Shape::Sine,
            slowdown: 1,
        }
    }

    /// Single sine series at five times the nominal interval, so most ticks are stale.
    pub fn lagsine() -> Self {
        Self {
            name: "lagsine",
            about: "sine wave at 1/5 of the tick rate (exercises stale ticks)",
            shape: Shape::Sine,
            slowdown: 5,
        }
    }

    /// Two waves plus a random series at the nominal interval.
    pub fn multi() -> Self {
        Self {
            name: "multi",
            about: "sine, cosine and random series at the tick rate",
            shape: Shape::Multi,
            slowdown: 1,
        }
    }

    /// Emission period for a given nominal interval.
    pub fn period(&self, interval: Duration) -> Duration {
        interval * self.slowdown
    }
}

impl Probe for SyntheticProbe {
    fn name(&self) -> &'static str {
        self.name
    }

    fn describe(&self) -> &'static str {
        self.about
    }

    fn start(
        &self,
        target: &str,
        ctx: &ProbeContext,
    ) -> Result<Box<dyn SampleSource>, ProbeError> {
        self.check_target(target)?;

        let description = format!("{}:{}", self.name, target);
        let (tx, source) = ChannelSource::create(&description);
        spawn_producer(
            Waveform::new(self.shape),
            self.period(ctx.interval),
            tx,
            ctx.shutdown.clone(),
            description,
        );
        Ok(Box::new(source))
    }
}

/// Emit one sample per period until shutdown or until the collector side is dropped.
///
/// The send awaits while the handoff slot is full, so a slow collector delays
/// the producer instead of losing or reordering samples.
fn spawn_producer(
    mut wave: Waveform,
    period: Duration,
    tx: mpsc::Sender<Sample>,
    mut shutdown: watch::Receiver<bool>,
    description: String,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = shutdown.changed() => break,
            }

            let sample = wave.next_sample();
            tokio::select! {
                sent = tx.send(sample) => {
                    if sent.is_err() {
                        break;
                    }
                }
                _ = shutdown.changed() => break,
            }
        }

        debug!("Probe {} stopped", description);
    })
}
