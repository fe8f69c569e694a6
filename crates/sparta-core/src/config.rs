use crate::{color::Rgba, logging};

/// Configuration for a Sparta application.
///
/// Built with [`Config::default`] and the `with_*` methods, or from the
/// environment with [`Config::from_env`].
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// `tracing` filter directives used by `sparta::init`.
    pub log_filter: String,
    /// Capacity of the bounded queue carrying commands from other threads.
    pub injection_capacity: usize,
    /// Maximum number of native color values a backend keeps allocated.
    pub color_cache_capacity: usize,
    /// Font size in pixels for widget text.
    pub font_size: f32,
    /// Extra pixels between text lines.
    pub line_spacing: f32,
    pub default_foreground: Rgba,
    pub default_background: Rgba,
    /// Size of a main window without explicit geometry, in character cells.
    pub default_window_cells: (i32, i32),
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_filter: logging::DEFAULT_FILTER.to_string(),
            injection_capacity: 256,
            color_cache_capacity: 64,
            font_size: 13.0,
            line_spacing: 2.0,
            default_foreground: Rgba::BLACK,
            default_background: Rgba::WHITE,
            default_window_cells: (80, 20),
        }
    }
}

impl Config {
    /// Defaults overridden by `SPARTA_LOG`, `SPARTA_FONT_SIZE` and
    /// `SPARTA_QUEUE_CAPACITY`. Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Config::default();
        if let Ok(filter) = std::env::var("SPARTA_LOG") {
            config.log_filter = filter;
        }
        if let Some(size) = parse_env::<f32>("SPARTA_FONT_SIZE") {
            config.font_size = size;
        }
        if let Some(capacity) = parse_env::<usize>("SPARTA_QUEUE_CAPACITY") {
            config.injection_capacity = capacity.max(1);
        }
        config
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    pub fn with_injection_capacity(mut self, capacity: usize) -> Self {
        self.injection_capacity = capacity.max(1);
        self
    }

    pub fn with_color_cache_capacity(mut self, capacity: usize) -> Self {
        self.color_cache_capacity = capacity.max(2);
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_colors(mut self, foreground: Rgba, background: Rgba) -> Self {
        self.default_foreground = foreground;
        self.default_background = background;
        self
    }

    pub fn with_default_window_cells(mut self, columns: i32, rows: i32) -> Self {
        self.default_window_cells = (columns, rows);
        self
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("ignoring {}={:?}: not a valid value", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.default_foreground, Rgba::BLACK);
        assert_eq!(config.default_background, Rgba::WHITE);
        assert_eq!(config.default_window_cells, (80, 20));
        assert!(config.injection_capacity > 0);
    }

    #[test]
    fn test_builder_clamps_capacities() {
        let config = Config::default()
            .with_injection_capacity(0)
            .with_color_cache_capacity(0);
        assert_eq!(config.injection_capacity, 1);
        assert_eq!(config.color_cache_capacity, 2);
    }
}
