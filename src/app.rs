//! Dashboard state and the per-tick collect/render step.

use std::io;

use crate::config::DisplayConfig;
use crate::data::{Freshness, Panel, PanelStats};
use crate::ui::{render_panel, Surface};

/// Outcome of one collection pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Panels that received a new sample.
    pub fresh: usize,
    /// Panels that kept their previous history.
    pub stale: usize,
}

/// Main application state: the panels, in command-line order, and the
/// resolved display settings.
#[derive(Debug)]
pub struct App {
    panels: Vec<Panel>,
    config: DisplayConfig,
    ticks: u64,
}

impl App {
    pub fn new(panels: Vec<Panel>, config: DisplayConfig) -> Self {
        Self {
            panels,
            config,
            ticks: 0,
        }
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Number of completed ticks.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Poll every panel once. Never waits on a probe.
    pub fn collect(&mut self) -> TickReport {
        let mut report = TickReport::default();
        for panel in &mut self.panels {
            match panel.collect() {
                Freshness::Fresh => report.fresh += 1,
                Freshness::Stale => report.stale += 1,
            }
        }
        report
    }

    /// Clear the surface and draw every panel, returning their statistics.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) -> Vec<PanelStats> {
        surface.set_color(self.config.theme.background);
        surface.clear();
        self.panels
            .iter()
            .enumerate()
            .map(|(index, panel)| render_panel(surface, panel, index, &self.config))
            .collect()
    }

    /// One full cycle: collect from all panels, then redraw and present.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) -> io::Result<TickReport> {
        let report = self.collect();
        self.render(surface);
        surface.present()?;
        self.ticks += 1;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{parse_panels, PanelSpec};
    use crate::probe::{ProbeContext, ProbeRegistry};
    use crate::source::{ChannelSource, Sample};
    use crate::ui::surface::recording::{Op, RecordingSurface};
    use crate::ui::{PanelGeometry, Rgb};
    use std::time::Duration;
    use tokio::sync::watch;

    fn config_with_capacity(capacity: usize) -> DisplayConfig {
        let mut config = DisplayConfig::default();
        config.layout.window_width = capacity as i32 + 2 + 2 * config.layout.margin;
        config
    }

    #[tokio::test(start_paused = true)]
    async fn test_sine_history_keeps_newest_samples() {
        let (_stop, rx) = watch::channel(false);
        let ctx = ProbeContext::new(Duration::from_secs(1), rx);
        let registry = ProbeRegistry::with_defaults();
        let panels = parse_panels(&["sine:localhost"], &registry, &ctx, 10).unwrap();
        let mut app = App::new(panels, config_with_capacity(10));

        let mut fresh = 0;
        while fresh < 12 {
            fresh += app.collect().fresh;
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        // Samples 3..=12 survive, oldest first; sample k has phase 0.1 * (k - 1).
        let ring = app.panels()[0].ring();
        assert_eq!(ring.len(), 10);
        let values: Vec<f64> = ring.iter().map(|s| s.values()[0]).collect();
        for (i, v) in values.iter().enumerate() {
            let k = i + 3;
            let expected = (0.1 * (k - 1) as f64).sin() + 1.0;
            assert!((v - expected).abs() < 1e-9, "slot {} holds {}", i, v);
        }
    }

    #[test]
    fn test_silent_probe_renders_stale_panel() {
        let (_tx, source) = ChannelSource::create("test:quiet");
        let spec: PanelSpec = "test:quiet".parse().unwrap();
        let panel = Panel::new(spec, Box::new(source), 10);
        let mut app = App::new(vec![panel], config_with_capacity(10));
        let mut surface = RecordingSurface::new();

        let report = app.tick(&mut surface).unwrap();
        assert_eq!(report, TickReport { fresh: 0, stale: 1 });
        assert_eq!(surface.frames, 1);
        assert_eq!(surface.lines().count(), 0);
        assert_eq!(surface.rects()[0].1, Rgb::SALMON);

        let stats = app.render(&mut surface);
        assert!(stats[0].avg.is_nan());
        assert_eq!(stats[0].max, 0.0);
        assert!(surface
            .texts()
            .contains(&("L=0.0 M=0.0 A=NaN".to_string(), Rgb::SALMON)));
    }

    #[test]
    fn test_tick_clears_with_background_then_draws_each_panel() {
        let (tx_a, a) = ChannelSource::create("test:a");
        let (_tx_b, b) = ChannelSource::create("test:b");
        let panels = vec![
            Panel::new("test:a".parse().unwrap(), Box::new(a), 4),
            Panel::new("test:b".parse().unwrap(), Box::new(b), 4),
        ];
        let mut app = App::new(panels, config_with_capacity(4));
        let mut surface = RecordingSurface::new();

        tx_a.try_send(Sample::from(vec![1.0])).unwrap();
        let report = app.tick(&mut surface).unwrap();
        assert_eq!(report, TickReport { fresh: 1, stale: 1 });
        assert_eq!(app.ticks(), 1);

        assert_eq!(surface.ops[0], Op::Clear(Rgb::GREY));
        let rects = surface.rects();
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0].1, Rgb::WHITE);
        assert_eq!(rects[1].1, Rgb::SALMON);
        let layout = &app.config().layout;
        assert_eq!(rects[1].0, PanelGeometry::new(layout, 1).border);
    }

    #[tokio::test(start_paused = true)]
    async fn test_multi_series_use_palette_colors() {
        let (_stop, rx) = watch::channel(false);
        let ctx = ProbeContext::new(Duration::from_secs(1), rx);
        let registry = ProbeRegistry::with_defaults();
        let panels = parse_panels(&["multi:demo"], &registry, &ctx, 4).unwrap();
        let mut app = App::new(panels, config_with_capacity(4));
        let mut surface = RecordingSurface::new();

        while app.tick(&mut surface).unwrap().fresh == 0 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        let x = PanelGeometry::new(&app.config().layout, 0).first_column + 3;
        let colors: Vec<Rgb> = surface.column(x).into_iter().map(|(_, _, c)| c).collect();
        assert_eq!(colors, vec![Rgb::GREEN, Rgb::BLUE, Rgb::ORANGE]);
    }
}
