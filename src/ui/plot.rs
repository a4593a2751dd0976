//! Strip chart rendering.
//!
//! Each panel is drawn as a bordered chart with one pixel column per history
//! slot, oldest on the left. Heights autoscale every frame to the largest
//! reading currently in the ring, so the same value can render at different
//! heights as the history scrolls.
//!
//! ```text
//!  target                    ◀── title
//! ┌──────────────────────┐
//! │        ▂▃▅▆▇█▇▆▅▃▂   │   ◀── one column per slot
//! │  ▁▂▃▅▇            ▁▂ │
//! └──────────────────────┘
//!  L=1.2 M=2.0 A=1.1         ◀── overlay
//! ```

use crate::config::{DisplayConfig, Layout};
use crate::data::{Panel, PanelStats};
use crate::source::sample::is_reading;
use crate::source::Sample;

use super::surface::{PixelRect, Surface};
use super::theme::{Rgb, Theme};

/// Height of the marker drawn for non-positive "no reading" values.
pub const NO_DATA_HEIGHT: i32 = 2;

/// Pixel positions of one panel's parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelGeometry {
    /// Top-left of the target label.
    pub title: (i32, i32),
    /// Chart border.
    pub border: PixelRect,
    /// Row that column heights are measured up from.
    pub baseline: i32,
    /// x of the column for the oldest slot.
    pub first_column: i32,
    /// Top-left of the statistics line.
    pub overlay: (i32, i32),
}

impl PanelGeometry {
    /// Placement of the panel at `index` (top to bottom).
    pub fn new(layout: &Layout, index: usize) -> Self {
        let top = index as i32 * layout.target_size + 1;
        let border_top = top + layout.margin + layout.header_height;
        let border = PixelRect::new(
            layout.margin,
            border_top,
            layout.panel_width(),
            layout.panel_height,
        );
        Self {
            title: (layout.margin, top + layout.margin),
            border,
            baseline: border.bottom() - 1,
            first_column: layout.margin + 1,
            overlay: (layout.margin, border_top + layout.panel_height),
        }
    }
}

/// What a drawn segment represents, which decides its colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    /// Non-finite value: explicit error reading.
    Error,
    /// Non-positive value: no reading this cycle.
    NoData,
    /// A real reading.
    Reading,
}

/// A vertical span above the baseline, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub low: i32,
    pub high: i32,
    pub mark: Mark,
}

/// Maps values to pixel heights against the current ring maximum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    max: f64,
    panel_height: i32,
}

impl Projector {
    pub fn new(max: f64, panel_height: i32) -> Self {
        Self { max, panel_height }
    }

    /// Tallest column that still fits inside the border.
    pub fn full_height(&self) -> i32 {
        self.panel_height - 3
    }

    /// Height of a positive reading: `v / max` of the plot height.
    pub fn scaled(&self, v: f64) -> i32 {
        let h = ((v / self.max) * (self.panel_height - 2) as f64) as i32 - 1;
        h.clamp(0, self.full_height())
    }

    /// Height of the column for `v`, sentinels included.
    pub fn height(&self, v: f64) -> i32 {
        if !v.is_finite() {
            self.full_height()
        } else if v > 0.0 {
            self.scaled(v)
        } else {
            NO_DATA_HEIGHT
        }
    }

    /// Segment for series `series` with value `v`, given the same series' value
    /// in the previous column.
    ///
    /// The first series is always a bar from the baseline. Later series join
    /// their previous height to the current one so they read as a line.
    pub fn segment(&self, series: usize, v: f64, prev: Option<f64>) -> Segment {
        if !v.is_finite() {
            return Segment {
                low: 0,
                high: self.full_height(),
                mark: Mark::Error,
            };
        }
        if v <= 0.0 {
            return Segment {
                low: 0,
                high: NO_DATA_HEIGHT,
                mark: Mark::NoData,
            };
        }

        let h = self.scaled(v);
        match prev.filter(|&p| series > 0 && is_reading(p)) {
            Some(p) => {
                let hp = self.scaled(p);
                Segment {
                    low: h.min(hp),
                    high: h.max(hp),
                    mark: Mark::Reading,
                }
            }
            None => Segment {
                low: 0,
                high: h,
                mark: Mark::Reading,
            },
        }
    }
}

fn mark_color(theme: &Theme, mark: Mark, series: usize) -> Rgb {
    match mark {
        Mark::Error => theme.error,
        Mark::NoData => theme.no_data,
        Mark::Reading => theme.series_color(series),
    }
}

/// Draw panel `index` and return the statistics shown in its overlay.
pub fn render_panel<S: Surface + ?Sized>(
    surface: &mut S,
    panel: &Panel,
    index: usize,
    config: &DisplayConfig,
) -> PanelStats {
    let geometry = PanelGeometry::new(&config.layout, index);
    let theme = &config.theme;
    let frame_color = theme.frame_color(panel.freshness());

    surface.set_color(frame_color);
    surface.draw_rect(geometry.border);
    surface.draw_text(geometry.title.0, geometry.title.1, &panel.target);

    let ring = panel.ring();
    let stats = PanelStats::from_ring(ring);
    let projector = Projector::new(stats.max, config.layout.panel_height);

    let mut prev: Option<&Sample> = None;
    for (i, slot) in ring.slots().enumerate() {
        let x = geometry.first_column + i as i32;
        if let Some(sample) = slot {
            for (j, &v) in sample.values().iter().enumerate() {
                let segment = projector.segment(j, v, prev.and_then(|p| p.get(j)));
                surface.set_color(mark_color(theme, segment.mark, j));
                surface.draw_line(
                    x,
                    geometry.baseline - segment.low,
                    x,
                    geometry.baseline - segment.high,
                );
            }
        }
        prev = slot;
    }

    surface.set_color(frame_color);
    surface.draw_text(geometry.overlay.0, geometry.overlay.1, &stats.overlay());
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Freshness, PanelSpec};
    use crate::source::ChannelSource;
    use crate::ui::surface::recording::RecordingSurface;
    use tokio::sync::mpsc;

    fn config(capacity: usize) -> DisplayConfig {
        let mut config = DisplayConfig::default();
        // panel_width - 2 == capacity
        config.layout.window_width = capacity as i32 + 2 + 2 * config.layout.margin;
        config
    }

    fn panel(capacity: usize) -> (mpsc::Sender<Sample>, Panel) {
        let (tx, source) = ChannelSource::create("test:host");
        let spec: PanelSpec = "test:host".parse().unwrap();
        (tx, Panel::new(spec, Box::new(source), capacity))
    }

    fn feed(tx: &mpsc::Sender<Sample>, panel: &mut Panel, values: &[f64]) {
        tx.try_send(Sample::from(values.to_vec())).unwrap();
        assert_eq!(panel.collect(), Freshness::Fresh);
    }

    #[test]
    fn test_geometry() {
        let layout = Layout::default();
        let g0 = PanelGeometry::new(&layout, 0);
        let g1 = PanelGeometry::new(&layout, 1);

        assert_eq!(g0.border, PixelRect::new(4, 13, 172, 40));
        assert_eq!(g0.title, (4, 5));
        assert_eq!(g0.baseline, 51);
        assert_eq!(g0.first_column, 5);
        assert_eq!(g0.overlay, (4, 53));
        assert_eq!(g1.border.y - g0.border.y, layout.target_size);

        // The last column still sits inside the right border.
        let last = g0.first_column + layout.ring_capacity() as i32 - 1;
        assert_eq!(last, g0.border.right() - 1);
    }

    #[test]
    fn test_autoscale_is_proportional() {
        let panel_height = 42;
        let a = Projector::new(2.0, panel_height);
        let b = Projector::new(4.0, panel_height);

        // (v / M) * (panel_height - 2) - 1
        assert_eq!(a.height(1.0), 19);
        assert_eq!(b.height(1.0), 9);
        assert_eq!(a.height(2.0), a.full_height());
    }

    #[test]
    fn test_sentinel_heights() {
        let p = Projector::new(10.0, 40);
        assert_eq!(p.height(f64::NAN), 37);
        assert_eq!(p.height(f64::INFINITY), 37);
        assert_eq!(p.height(0.0), NO_DATA_HEIGHT);
        assert_eq!(p.height(-3.0), NO_DATA_HEIGHT);
    }

    #[test]
    fn test_segments() {
        let p = Projector::new(2.0, 42);

        // First series: bar from the baseline even with a previous value.
        let s = p.segment(0, 1.0, Some(2.0));
        assert_eq!((s.low, s.high, s.mark), (0, 19, Mark::Reading));

        // Later series: joins previous and current heights.
        let s = p.segment(1, 1.0, Some(2.0));
        assert_eq!((s.low, s.high), (19, 39));
        let s = p.segment(1, 2.0, Some(1.0));
        assert_eq!((s.low, s.high), (19, 39));

        // No usable previous value: bar from the baseline.
        let s = p.segment(1, 1.0, None);
        assert_eq!((s.low, s.high), (0, 19));
        let s = p.segment(1, 1.0, Some(f64::NAN));
        assert_eq!((s.low, s.high), (0, 19));

        assert_eq!(p.segment(2, f64::NAN, Some(1.0)).mark, Mark::Error);
        assert_eq!(p.segment(2, 0.0, Some(1.0)).mark, Mark::NoData);
    }

    #[test]
    fn test_render_columns_oldest_left() {
        let config = config(4);
        let (tx, mut panel) = panel(4);
        feed(&tx, &mut panel, &[1.0]);
        feed(&tx, &mut panel, &[2.0]);

        let mut surface = RecordingSurface::new();
        let stats = render_panel(&mut surface, &panel, 0, &config);
        assert_eq!(stats.max, 2.0);

        let g = PanelGeometry::new(&config.layout, 0);
        // Two empty slots first, then the samples in write order.
        assert!(surface.column(g.first_column).is_empty());
        assert!(surface.column(g.first_column + 1).is_empty());
        let full = Projector::new(2.0, config.layout.panel_height).full_height();
        assert_eq!(
            surface.column(g.first_column + 3),
            vec![(g.baseline, g.baseline - full, Rgb::GREEN)]
        );
        let half = Projector::new(2.0, config.layout.panel_height).scaled(1.0);
        assert_eq!(
            surface.column(g.first_column + 2),
            vec![(g.baseline, g.baseline - half, Rgb::GREEN)]
        );
    }

    #[test]
    fn test_same_value_rescales_between_frames() {
        let config = config(8);
        let (tx, mut panel) = panel(2);
        let x = PanelGeometry::new(&config.layout, 0).first_column;

        feed(&tx, &mut panel, &[1.0]);
        feed(&tx, &mut panel, &[2.0]);
        let mut first = RecordingSurface::new();
        render_panel(&mut first, &panel, 0, &config);

        // Ring is [2.0, 4.0] now; 2.0 is drawn against a max of 4.0.
        feed(&tx, &mut panel, &[4.0]);
        let mut second = RecordingSurface::new();
        render_panel(&mut second, &panel, 0, &config);

        let p = config.layout.panel_height;
        let (_, top_first, _) = first.column(x + 1)[0];
        let (_, top_second, _) = second.column(x)[0];
        let base = PanelGeometry::new(&config.layout, 0).baseline;
        assert_eq!(base - top_first, Projector::new(2.0, p).scaled(2.0));
        assert_eq!(base - top_second, Projector::new(4.0, p).scaled(2.0));
        assert!(base - top_second < base - top_first);
    }

    #[test]
    fn test_nan_renders_full_height_error_column() {
        let config = config(4);
        let (tx, mut panel) = panel(4);
        feed(&tx, &mut panel, &[1.0, 1.5, 0.5]);
        feed(&tx, &mut panel, &[2.0, f64::NAN, 1.0]);

        let mut surface = RecordingSurface::new();
        let stats = render_panel(&mut surface, &panel, 0, &config);
        assert_eq!(stats.max, 2.0);

        let g = PanelGeometry::new(&config.layout, 0);
        let full = config.layout.panel_height - 3;
        let column = surface.column(g.first_column + 3);
        assert_eq!(column.len(), 3);
        assert_eq!(column[1], (g.baseline, g.baseline - full, Rgb::SALMON));
    }

    #[test]
    fn test_no_data_marker() {
        let config = config(4);
        let (tx, mut panel) = panel(4);
        feed(&tx, &mut panel, &[0.0]);

        let mut surface = RecordingSurface::new();
        let stats = render_panel(&mut surface, &panel, 0, &config);
        assert!(stats.avg.is_nan());

        let g = PanelGeometry::new(&config.layout, 0);
        assert_eq!(
            surface.column(g.first_column + 3),
            vec![(g.baseline, g.baseline - NO_DATA_HEIGHT, config.theme.no_data)]
        );
    }

    #[test]
    fn test_frame_and_labels() {
        let config = config(4);
        let (tx, mut panel) = panel(4);
        feed(&tx, &mut panel, &[1.0]);

        let mut surface = RecordingSurface::new();
        render_panel(&mut surface, &panel, 0, &config);
        assert_eq!(surface.rects()[0].1, Rgb::WHITE);
        assert_eq!(
            surface.texts(),
            vec![
                ("host".to_string(), Rgb::WHITE),
                ("L=1.0 M=1.0 A=1.0".to_string(), Rgb::WHITE),
            ]
        );

        // Nothing new arrives: same data, stale frame colour.
        assert_eq!(panel.collect(), Freshness::Stale);
        let mut surface = RecordingSurface::new();
        render_panel(&mut surface, &panel, 0, &config);
        assert_eq!(surface.rects()[0].1, Rgb::SALMON);
        assert!(surface.texts().iter().all(|(_, c)| *c == Rgb::SALMON));
    }
}
