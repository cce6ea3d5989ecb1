//! Dockyard - a retained-mode widget toolkit with dockable windows.
//!
//! This is the main crate: the widget tree, the layout engine, the input
//! router, window docking and the draw traversal. Geometry and handler lists
//! come from `dockyard-core`; drawing goes through the [`Renderer`] trait of
//! `dockyard-render`.
//!
//! # Example
//!
//! ```
//! use dockyard::prelude::*;
//! use dockyard::widgets::{Button, Label};
//!
//! let mut ui = MainWindow::new(Box::new(RecordingRenderer::new()), Size::new(640, 480))?;
//!
//! let greeting = Label::create(&mut ui, "Hello");
//! ui.add(greeting);
//!
//! let quit = Button::create(&mut ui, "Quit");
//! ui.set_align(quit, Align::RIGHT | Align::BOTTOM);
//! ui.add(quit);
//!
//! ui.connect(quit, |event| {
//!     if let EventKind::ButtonClicked { .. } = event.kind {
//!         println!("bye");
//!     }
//! });
//!
//! ui.mouse_move(Point::new(5, 5), Point::ZERO);
//! ui.draw();
//! # Ok::<(), dockyard::DockyardError>(())
//! ```

pub mod config;
pub mod cursor;
mod error;
pub mod event;
mod main_window;
pub mod prelude;
pub mod widget;

pub use widget::widgets;

pub use config::{Padding, UiConfig};
pub use cursor::CursorShape;
pub use error::{ConfigError, DockyardError, DockyardResult};
pub use event::{Event, EventKind, Key, KeyCode, Listener, MouseButton};
pub use main_window::{DockPosition, MainWindow};
pub use widget::{Align, DrawContext, Stretch, Widget, WidgetKind};

pub use dockyard_core::logging;
pub use dockyard_core::{Border, ConnectionId, Point, Rect, Size, WidgetId};

/// Renderer collaborator types.
pub mod render {
    pub use dockyard_render::*;
}

pub use dockyard_render::{
    Color, DrawCommand, DrawLog, FontSpec, RecordingRenderer, RenderError, Renderer,
};

static_assertions::assert_impl_all!(DockPosition: Copy, Send, Sync);
static_assertions::assert_impl_all!(Stretch: Copy);
static_assertions::assert_impl_all!(Align: Copy);
