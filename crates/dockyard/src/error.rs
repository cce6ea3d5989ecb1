//! Error types for the widget toolkit.
//!
//! The widget tree API does not return errors: misuse is a silent no-op and
//! broken invariants trip `debug_assert!`. The only fallible entry points are
//! setup-time ones: constructing a [`MainWindow`](crate::MainWindow) or
//! swapping its renderer, and loading a [`UiConfig`](crate::UiConfig).

use dockyard_render::RenderError;
use thiserror::Error;

/// Errors that can occur while loading a [`UiConfig`](crate::UiConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The TOML text could not be parsed into a config.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field holds a value outside its valid range.
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Setup-time errors.
#[derive(Error, Debug)]
pub enum DockyardError {
    /// The renderer reported a failure when checked after construction.
    #[error("renderer error: {0}")]
    Renderer(#[from] RenderError),

    /// The configuration is invalid.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for setup-time operations.
pub type DockyardResult<T> = Result<T, DockyardError>;
