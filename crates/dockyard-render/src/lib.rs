//! Renderer collaborator for Dockyard.
//!
//! The widget toolkit computes geometry and delegates everything visual to
//! an implementation of [`Renderer`]: text metrics, word wrapping and a small
//! set of 2D draw primitives.
//!
//! # Getting Started
//!
//! ```
//! use dockyard_core::Point;
//! use dockyard_render::{Color, FontSpec, RecordingRenderer, Renderer};
//!
//! let mut renderer = RecordingRenderer::new();
//! renderer.status().expect("renderer failed to initialize");
//!
//! let font = FontSpec::new("sans", 14.0);
//! let size = renderer.measure_text(&font, "Hello");
//! assert_eq!(size.h, renderer.line_height(&font));
//!
//! renderer.draw_text(&font, "Hello", Point::new(4, 4), Color::BLACK);
//! assert_eq!(renderer.log().texts(), vec!["Hello".to_string()]);
//! ```

mod error;
mod recording;
mod renderer;
mod types;

pub use error::{RenderError, RenderResult};
pub use recording::{DrawCommand, DrawLog, RecordingRenderer};
pub use renderer::{Renderer, break_line};
pub use types::{Color, FontSpec, LineBreak};

// Re-export geometry so backends need a single import.
pub use dockyard_core::{Border, Point, Rect, Size};
