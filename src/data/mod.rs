//! Per-panel data: bounded history, statistics and the collection step.
//!
//! ## Submodules
//!
//! - [`duration`]: Parsing and formatting of interval strings (e.g., "1s", "500ms")
//! - [`history`]: The fixed-capacity [`HistoryRing`] behind each chart
//! - [`panel`]: [`Panel`] construction from `type:target` arguments and collection
//! - [`stats`]: [`PanelStats`] (last/max/min/avg) computed over a ring
//!
//! ## Data Flow
//!
//! ```text
//! probe task ──mpsc(1)──▶ Panel::collect()
//!                               │
//!                               ├──▶ HistoryRing::push()   (fresh tick)
//!                               └──▶ Freshness::Stale      (nothing arrived)
//!
//! HistoryRing ──▶ PanelStats::from_ring() ──▶ ui::plot
//! ```

pub mod duration;
pub mod history;
pub mod panel;
pub mod stats;

pub use history::HistoryRing;
pub use panel::{parse_panels, Freshness, Panel, PanelSpec, MAX_PANELS};
pub use stats::PanelStats;
