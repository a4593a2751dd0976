//! # netwatch
//!
//! Live telemetry strip charts in the terminal: one panel per monitored
//! target, each showing the recent history of its probe as a scrolling
//! column chart with last/max/average statistics.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         scheduler                            │
//! │   every tick:  App::collect() ────────▶  App::render()       │
//! │                     │                        │               │
//! │                     ▼                        ▼               │
//! │  ┌────────┐    ┌──────────┐    ┌─────────┐    ┌──────────┐   │
//! │  │ probe  │───▶│  source  │───▶│  data   │───▶│    ui    │   │
//! │  │ (task) │    │ (mpsc 1) │    │ (rings) │    │ (surface)│   │
//! │  └────────┘    └──────────┘    └─────────┘    └──────────┘   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`probe`]**: [`ProbeRegistry`] of named probe types and the synthetic
//!   `sine`, `lagsine` and `multi` producers
//! - **[`source`]**: The non-blocking [`SampleSource`] handle a panel polls
//! - **[`data`]**: [`Panel`] state, its [`HistoryRing`] and [`PanelStats`]
//! - **[`ui`]**: The [`Surface`](ui::Surface) abstraction, the braille
//!   terminal canvas and the strip chart renderer
//! - **[`scheduler`]**: The fixed-interval tick loop
//! - **[`config`]**: Layered settings and their resolution into a [`DisplayConfig`]
//! - **[`lifecycle`]**: Relaunching the dashboard as a supervised worker
//!
//! ## Usage
//!
//! ```bash
//! netwatch sine:localhost multi:demo
//! netwatch --fs --bg 202020 lagsine:slow
//! ```
//!
//! ### As a library
//!
//! ```
//! use netwatch::{ChannelSource, Panel, PanelSpec, Sample};
//!
//! let (tx, source) = ChannelSource::create("custom:sensor");
//! let spec: PanelSpec = "custom:sensor".parse().unwrap();
//! let mut panel = Panel::new(spec, Box::new(source), 100);
//!
//! tx.try_send(Sample::from(vec![0.5, 1.5])).unwrap();
//! panel.collect();
//! assert_eq!(panel.ring().len(), 1);
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod lifecycle;
pub mod probe;
pub mod scheduler;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, TickReport};
pub use config::{DisplayConfig, Layout, Overrides, Settings};
pub use data::{parse_panels, Freshness, HistoryRing, Panel, PanelSpec, PanelStats};
pub use error::{ConfigError, ProbeError};
pub use probe::{Probe, ProbeContext, ProbeRegistry};
pub use source::{ChannelSource, Sample, SampleSource};
