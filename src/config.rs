//! Configuration for tscolumns
//!
//! Centralized rendering configuration with sensible defaults.

/// Controls how a store is previewed as a table
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Preview Truncation
    // -------------------------------------------------------------------------
    /// Stores with more rows than this are truncated in previews
    pub preview_threshold: usize,

    /// Rows shown from the start of a truncated preview
    pub preview_head: usize,

    /// Rows shown from the end of a truncated preview
    pub preview_tail: usize,

    // -------------------------------------------------------------------------
    // Cell Formatting
    // -------------------------------------------------------------------------
    /// Marker placed in every cell of the row separating head and tail
    pub ellipsis: String,

    /// Text shown for `Value::Null` cells
    pub missing: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preview_threshold: 20,
            preview_head: 8,
            preview_tail: 8,
            ellipsis: "...".to_string(),
            missing: String::new(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the row count above which previews are truncated
    pub fn preview_threshold(mut self, rows: usize) -> Self {
        self.config.preview_threshold = rows;
        self
    }

    /// Set the number of leading rows in a truncated preview
    pub fn preview_head(mut self, rows: usize) -> Self {
        self.config.preview_head = rows;
        self
    }

    /// Set the number of trailing rows in a truncated preview
    pub fn preview_tail(mut self, rows: usize) -> Self {
        self.config.preview_tail = rows;
        self
    }

    /// Set the ellipsis marker
    pub fn ellipsis(mut self, marker: impl Into<String>) -> Self {
        self.config.ellipsis = marker.into();
        self
    }

    /// Set the placeholder for null cells
    pub fn missing(mut self, placeholder: impl Into<String>) -> Self {
        self.config.missing = placeholder.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
