//! Widget foundation.
//!
//! Widgets live in the [`MainWindow`](crate::MainWindow) arena and are
//! addressed by [`WidgetId`](dockyard_core::WidgetId). The generic node data
//! (tree links, geometry, flags) is shared by every widget; per-type behavior
//! implements the [`Widget`] trait.
//!
//! # Modules
//!
//! - [`layout`] - rect resolution and the stack layout
//! - [`widgets`] - the concrete widgets

pub(crate) mod base;
mod geometry;
pub mod layout;
pub(crate) mod painting;
mod traits;
pub mod widgets;

pub use base::WidgetKind;
pub use geometry::{Align, Stretch};
pub use traits::{DrawContext, Widget};
