//! Terminal surface: a ratatui braille canvas where every braille dot is one pixel.

use std::io;

use ratatui::backend::Backend;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Context, Line};
use ratatui::Terminal;

use super::surface::{PixelRect, Surface};
use super::theme::Rgb;

/// Braille dots per terminal column.
pub const PIXELS_PER_COLUMN: i32 = 2;
/// Braille dots per terminal row.
pub const PIXELS_PER_ROW: i32 = 4;

#[derive(Debug, Clone)]
enum Shape {
    Line { x1: i32, y1: i32, x2: i32, y2: i32, color: Rgb },
    Text { x: i32, y: i32, text: String, color: Rgb },
}

/// A [`Surface`] that buffers one frame of shapes and paints them on `present`.
pub struct CanvasSurface<B: Backend> {
    terminal: Terminal<B>,
    color: Rgb,
    background: Rgb,
    shapes: Vec<Shape>,
}

impl<B: Backend> CanvasSurface<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            color: Rgb::WHITE,
            background: Rgb(0, 0, 0),
            shapes: Vec::new(),
        }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

impl<B: Backend> Surface for CanvasSurface<B> {
    fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    fn clear(&mut self) {
        self.background = self.color;
        self.shapes.clear();
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        let color = self.color;
        self.shapes.push(Shape::Line { x1, y1, x2, y2, color });
    }

    fn draw_rect(&mut self, rect: PixelRect) {
        let (left, top, right, bottom) = (rect.x, rect.y, rect.right(), rect.bottom());
        self.draw_line(left, top, right, top);
        self.draw_line(left, bottom, right, bottom);
        self.draw_line(left, top, left, bottom);
        self.draw_line(right, top, right, bottom);
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> (i32, i32) {
        let color = self.color;
        self.shapes.push(Shape::Text {
            x,
            y,
            text: text.to_string(),
            color,
        });
        (text.chars().count() as i32 * PIXELS_PER_COLUMN, PIXELS_PER_ROW)
    }

    fn present(&mut self) -> io::Result<()> {
        let background = Color::from(self.background);
        let shapes = &self.shapes;

        self.terminal.draw(|frame| {
            let area = frame.area();
            if area.width == 0 || area.height == 0 {
                return;
            }
            let width = area.width as i32 * PIXELS_PER_COLUMN;
            let height = area.height as i32 * PIXELS_PER_ROW;

            let canvas = Canvas::default()
                .background_color(background)
                .marker(Marker::Braille)
                .x_bounds([0.0, (width - 1) as f64])
                .y_bounds([0.0, (height - 1) as f64])
                .paint(|ctx| paint(ctx, shapes, height));

            frame.render_widget(canvas, area);
        })?;
        Ok(())
    }
}

/// Flip from top-down pixel rows to the canvas's bottom-up coordinates.
fn paint(ctx: &mut Context<'_>, shapes: &[Shape], height: i32) {
    let flip = |y: i32| (height - 1 - y) as f64;
    for shape in shapes {
        match shape {
            Shape::Line {
                x1,
                y1,
                x2,
                y2,
                color,
            } => ctx.draw(&Line {
                x1: *x1 as f64,
                y1: flip(*y1),
                x2: *x2 as f64,
                y2: flip(*y2),
                color: Color::from(*color),
            }),
            Shape::Text { x, y, text, color } => ctx.print(
                *x as f64,
                flip(*y),
                Span::styled(text.clone(), Style::default().fg(Color::from(*color))),
            ),
        }
    }
}
