//! Rendering: pixel surfaces and the strip chart renderer.
//!
//! - [`surface`]: The [`Surface`] drawing primitives, in pixels
//! - [`canvas`]: [`CanvasSurface`], a braille canvas on a ratatui terminal
//! - [`plot`]: Per-panel geometry, value projection and [`render_panel`]
//! - [`terminal`]: Entering and leaving the alternate screen
//! - [`theme`]: [`Rgb`] colours and the resolved [`Theme`]

pub mod canvas;
pub mod plot;
pub mod surface;
pub mod terminal;
pub mod theme;

pub use canvas::CanvasSurface;
pub use plot::{render_panel, PanelGeometry, Projector};
pub use surface::{PixelRect, Surface};
pub use theme::{Rgb, Theme};
