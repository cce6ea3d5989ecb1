//! Error types for Dockyard core helpers.
//!
//! The widget tree API itself never fails; misuse is a no-op. These errors
//! are returned by the few helpers that report on tree contents.

use std::fmt;

use crate::WidgetId;

/// Errors raised by core helpers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The widget id does not refer to a live widget.
    InvalidWidget(WidgetId),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWidget(id) => write!(f, "Invalid or destroyed widget id {id:?}"),
        }
    }
}

impl std::error::Error for CoreError {}

/// Result type for core helpers.
pub type CoreResult<T> = Result<T, CoreError>;
