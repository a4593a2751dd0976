//! Fixed-interval driver for collect/render cycles.
//!
//! The first tick fires immediately. A tick that overruns pushes the next one
//! back rather than firing a burst to catch up.

use std::io;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error};

use crate::app::App;
use crate::ui::Surface;

/// Run ticks every `tick_interval` until `shutdown` flips to `true`.
///
/// Returns the surface so the caller can restore the terminal it owns. A
/// failed `present` ends the loop with that error.
pub async fn run<S: Surface + Send>(
    mut app: App,
    mut surface: S,
    mut shutdown: watch::Receiver<bool>,
) -> io::Result<S> {
    let period = app.config().tick_interval;
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    debug!("Scheduler started with {} panels every {:?}", app.panels().len(), period);

    loop {
        if *shutdown.borrow() {
            break;
        }
        tokio::select! {
            _ = ticker.tick() => {}
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
                continue;
            }
        }

        match app.tick(&mut surface) {
            Ok(report) => debug!(
                "Tick {}: {} fresh, {} stale",
                app.ticks(),
                report.fresh,
                report.stale
            ),
            Err(e) => {
                error!("Failed to draw frame: {}", e);
                return Err(e);
            }
        }
    }

    debug!("Scheduler stopped after {} ticks", app.ticks());
    Ok(surface)
}
