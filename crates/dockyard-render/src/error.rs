//! Error types for the render crate.

use thiserror::Error;

/// Setup-time renderer failures.
///
/// A renderer reports these through [`Renderer::status`](crate::Renderer::status);
/// hosts check it once after construction. They are not per-frame errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// A requested font face could not be loaded.
    #[error("font not found: {face}")]
    FontNotFound { face: String },

    /// The drawing context could not be created.
    #[error("failed to initialize drawing context: {0}")]
    ContextInit(String),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
