//! Prelude module for Dockyard.
//!
//! ```
//! use dockyard::prelude::*;
//! ```
//!
//! This provides access to:
//! - The root (`MainWindow`) and its config (`UiConfig`)
//! - Widget foundation (`Widget`, `DrawContext`, `WidgetId`, `WidgetKind`)
//! - Events and input (`Event`, `EventKind`, `KeyCode`, `MouseButton`)
//! - Geometry and rendering types (`Point`, `Size`, `Rect`, `Color`)

// ============================================================================
// Root
// ============================================================================

pub use crate::{DockPosition, DockyardError, MainWindow, UiConfig};

// ============================================================================
// Widget Foundation
// ============================================================================

pub use crate::widget::{Align, DrawContext, Stretch, Widget, WidgetKind};
pub use dockyard_core::WidgetId;

// ============================================================================
// Events and Input
// ============================================================================

pub use crate::cursor::CursorShape;
pub use crate::event::{Event, EventKind, Key, KeyCode, MouseButton};

// ============================================================================
// Geometry and Rendering
// ============================================================================

pub use dockyard_core::{Border, Point, Rect, Size};
pub use dockyard_render::{Color, FontSpec, RecordingRenderer, Renderer};
