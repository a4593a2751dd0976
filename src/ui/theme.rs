//! Colour theme for the strip charts.
//!
//! All colours are configured as six hex digits (`RRGGBB`) and resolved once
//! at startup into an immutable [`Theme`].

use std::fmt;
use std::str::FromStr;

use ratatui::style::Color;

use crate::data::Freshness;
use crate::error::ConfigError;

/// An opaque 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xFF, 0xFF, 0xFF);
    pub const GREY: Rgb = Rgb(0x64, 0x64, 0x64);
    pub const SALMON: Rgb = Rgb(0xFF, 0x64, 0x64);
    pub const GREEN: Rgb = Rgb(0x00, 0xFF, 0x00);
    pub const BLUE: Rgb = Rgb(0x00, 0x00, 0xFF);
    pub const ORANGE: Rgb = Rgb(0xFF, 0x7F, 0x00);

    /// Parse an `RRGGBB` string, naming `field` in the error.
    pub fn parse(field: &'static str, value: &str) -> Result<Self, ConfigError> {
        value.parse().map_err(|_| ConfigError::InvalidColor {
            field,
            value: value.to_string(),
        })
    }
}

/// Error returned when a colour string is not six hex digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRgbError;

impl FromStr for Rgb {
    type Err = ParseRgbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseRgbError);
        }
        let channel = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).map_err(|_| ParseRgbError);
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.0, rgb.1, rgb.2)
    }
}

/// Colours used by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Border and text colour for panels that received a sample this tick.
    pub foreground: Rgb,
    /// Clear colour.
    pub background: Rgb,
    /// Stale border/text, and `NaN` error columns.
    pub error: Rgb,
    /// Marker for non-positive "no reading" values.
    pub no_data: Rgb,
    /// Series colours, indexed by series position.
    pub palette: Vec<Rgb>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            foreground: Rgb::WHITE,
            background: Rgb::GREY,
            error: Rgb::SALMON,
            no_data: Rgb::GREEN,
            palette: vec![Rgb::GREEN, Rgb::BLUE, Rgb::ORANGE],
        }
    }
}

impl Theme {
    /// Colour for series `index`. Series beyond the palette wrap around.
    pub fn series_color(&self, index: usize) -> Rgb {
        self.palette[index % self.palette.len()]
    }

    /// Border and label colour for a panel in the given state.
    pub fn frame_color(&self, freshness: Freshness) -> Rgb {
        match freshness {
            Freshness::Fresh => self.foreground,
            Freshness::Stale => self.error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgb() {
        assert_eq!("FF7F00".parse::<Rgb>(), Ok(Rgb::ORANGE));
        assert_eq!("00ff00".parse::<Rgb>(), Ok(Rgb::GREEN));
        assert_eq!(Rgb::ORANGE.to_string(), "FF7F00");
    }

    #[test]
    fn test_parse_rgb_rejects_malformed() {
        for bad in ["", "FFF", "FFFFFFF", "GG0000", "#FFFFF", "ff ff0"] {
            assert!(bad.parse::<Rgb>().is_err(), "{bad:?} should not parse");
        }
        let err = Rgb::parse("bg", "12345").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidColor { field: "bg", .. }));
    }

    #[test]
    fn test_series_color_wraps() {
        let theme = Theme::default();
        assert_eq!(theme.series_color(0), Rgb::GREEN);
        assert_eq!(theme.series_color(1), Rgb::BLUE);
        assert_eq!(theme.series_color(2), Rgb::ORANGE);
        assert_eq!(theme.series_color(3), Rgb::GREEN);
        assert_eq!(theme.series_color(7), Rgb::BLUE);
    }

    #[test]
    fn test_frame_color() {
        let theme = Theme::default();
        assert_eq!(theme.frame_color(Freshness::Fresh), Rgb::WHITE);
        assert_eq!(theme.frame_color(Freshness::Stale), Rgb::SALMON);
    }

    #[test]
    fn test_into_ratatui_color() {
        assert_eq!(Color::from(Rgb(1, 2, 3)), Color::Rgb(1, 2, 3));
    }
}
