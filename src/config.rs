//! Layered settings: built-in defaults, an optional TOML file, then
//! `NETWATCH_*` environment variables. Command-line colour and full-screen
//! flags are applied last by [`Settings::resolve`].
//!
//! ```toml
//! tick_interval = "500ms"
//! window_width = 240
//! background = "202020"
//! palette = ["00FF00", "00A0FF", "FF7F00", "FF00FF"]
//! ```

use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Deserializer};

use crate::data::duration::parse_duration;
use crate::data::MAX_PANELS;
use crate::error::ConfigError;
use crate::ui::canvas::PIXELS_PER_ROW;
use crate::ui::{Rgb, Theme};

/// Largest panel pitch for which every panel's coordinates fit in an `i32`.
pub const MAX_TARGET_SIZE: i32 = i32::MAX / (MAX_PANELS as i32 + 1);

/// Raw settings as read from file and environment.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Scheduler tick and nominal probe interval, e.g. "1s".
    pub tick_interval: String,
    /// Window width in pixels (two per terminal column).
    pub window_width: i32,
    pub margin: i32,
    /// Space above the chart border reserved for the target label.
    pub header_height: i32,
    /// Chart height in pixels.
    pub panel_height: i32,
    /// Vertical pixels allotted to each panel.
    pub target_size: i32,
    pub foreground: String,
    pub background: String,
    pub error_color: String,
    pub no_data_color: String,
    /// A list, or one comma-separated string (as environment variables give).
    #[serde(deserialize_with = "deserialize_palette")]
    pub palette: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorList {
    Many(Vec<String>),
    Joined(String),
}

fn deserialize_palette<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match ColorList::deserialize(deserializer)? {
        ColorList::Many(colors) => colors,
        ColorList::Joined(joined) => joined
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect(),
    })
}

impl Default for Settings {
    fn default() -> Self {
        let theme = Theme::default();
        Self {
            tick_interval: "1s".to_string(),
            window_width: 180,
            margin: 4,
            header_height: 8,
            panel_height: 40,
            target_size: 64,
            foreground: theme.foreground.to_string(),
            background: theme.background.to_string(),
            error_color: theme.error.to_string(),
            no_data_color: theme.no_data.to_string(),
            palette: theme.palette.iter().map(Rgb::to_string).collect(),
        }
    }
}

/// Command-line values that take precedence over loaded settings.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub foreground: Option<String>,
    pub background: Option<String>,
    /// Stretch the window to the full terminal width.
    pub full_screen: bool,
}

/// Fixed pixel geometry of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub window_width: i32,
    pub margin: i32,
    pub header_height: i32,
    pub panel_height: i32,
    pub target_size: i32,
}

impl Default for Layout {
    fn default() -> Self {
        let s = Settings::default();
        Self {
            window_width: s.window_width,
            margin: s.margin,
            header_height: s.header_height,
            panel_height: s.panel_height,
            target_size: s.target_size,
        }
    }
}

impl Layout {
    /// Width of a panel's border rectangle.
    pub fn panel_width(&self) -> i32 {
        self.window_width - 2 * self.margin
    }

    /// History slots per panel: one per pixel column inside the border.
    pub fn ring_capacity(&self) -> usize {
        (self.panel_width() - 2).max(0) as usize
    }

    /// Total height needed for `panels` panels.
    pub fn window_height(&self, panels: usize) -> i32 {
        panels as i32 * self.target_size
    }

    /// Check that panels fit the window and do not overlap each other.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, value, reason| ConfigError::InvalidLayout {
            field,
            value,
            reason,
        };
        if self.margin < 0 {
            return Err(invalid("margin", self.margin, "must not be negative"));
        }
        if self.header_height < 0 {
            return Err(invalid("header_height", self.header_height, "must not be negative"));
        }
        if self.panel_height < 4 {
            return Err(invalid("panel_height", self.panel_height, "must be at least 4"));
        }
        if self.target_size > MAX_TARGET_SIZE {
            return Err(invalid("target_size", self.target_size, "is too large"));
        }
        let needed = self.margin as i64
            + self.header_height as i64
            + self.panel_height as i64
            + PIXELS_PER_ROW as i64;
        if (self.target_size as i64) < needed {
            return Err(invalid(
                "target_size",
                self.target_size,
                "leaves no room for the chart and its labels",
            ));
        }
        if self.margin > self.window_width / 2 || self.ring_capacity() == 0 {
            return Err(ConfigError::WindowTooSmall {
                width: self.window_width,
            });
        }
        Ok(())
    }
}

/// Everything the scheduler and renderer need, resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    pub tick_interval: Duration,
    pub layout: Layout,
    pub theme: Theme,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            layout: Layout::default(),
            theme: Theme::default(),
        }
    }
}

impl Settings {
    /// Load defaults, then `path` (if given), then `NETWATCH_*` variables.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_with(path, environment())
    }

    fn load_with(path: Option<&Path>, env: Environment) -> Result<Self, config::ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        builder.add_source(env).build()?.try_deserialize()
    }

    /// Apply command-line overrides and validate everything.
    ///
    /// `terminal_width` is the usable width in pixels; the window never
    /// exceeds it, and full-screen mode uses all of it.
    pub fn resolve(
        &self,
        overrides: &Overrides,
        terminal_width: i32,
    ) -> Result<DisplayConfig, ConfigError> {
        let tick_interval = parse_duration(&self.tick_interval)?;
        if tick_interval.is_zero() {
            return Err(ConfigError::InvalidDuration(self.tick_interval.clone()));
        }

        let foreground = overrides.foreground.as_deref().unwrap_or(&self.foreground);
        let background = overrides.background.as_deref().unwrap_or(&self.background);

        let palette = self
            .palette
            .iter()
            .map(|c| Rgb::parse("palette", c))
            .collect::<Result<Vec<_>, _>>()?;
        if palette.is_empty() {
            return Err(ConfigError::InvalidColor {
                field: "palette",
                value: String::new(),
            });
        }

        let theme = Theme {
            foreground: Rgb::parse("fg", foreground)?,
            background: Rgb::parse("bg", background)?,
            error: Rgb::parse("error_color", &self.error_color)?,
            no_data: Rgb::parse("no_data_color", &self.no_data_color)?,
            palette,
        };

        let window_width = if overrides.full_screen {
            terminal_width
        } else {
            self.window_width.min(terminal_width)
        };
        let layout = Layout {
            window_width,
            margin: self.margin,
            header_height: self.header_height,
            panel_height: self.panel_height,
            target_size: self.target_size,
        };
        layout.validate()?;

        Ok(DisplayConfig {
            tick_interval,
            layout,
            theme,
        })
    }
}

/// `NETWATCH_TICK_INTERVAL=500ms`, `NETWATCH_PALETTE=FF0000,00FF00`, ...
fn environment() -> Environment {
    Environment::with_prefix("NETWATCH")
        .prefix_separator("_")
        .separator("__")
}
