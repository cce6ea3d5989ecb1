//! Core systems for Dockyard.
//!
//! This crate provides the foundational value types shared by the renderer
//! collaborator and the widget toolkit:
//!
//! - **Geometry**: integer [`Point`], [`Size`], [`Rect`] and [`Border`] with
//!   intersection and containment helpers
//! - **Widget ids**: the [`WidgetId`] arena key used by every widget tree
//! - **Handler lists**: [`Signal<Args>`], an ordered, single-threaded list of
//!   callbacks that can be blocked while state is rebuilt
//! - **Logging**: `tracing` targets, convenience macros, [`PerfSpan`] and the
//!   [`WidgetTreeDebug`] formatter
//!
//! # Signal Example
//!
//! ```
//! use dockyard_core::Signal;
//!
//! let mut value_changed = Signal::<i32>::new();
//! let id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(&42);
//! value_changed.disconnect(id);
//! ```
//!
//! # Geometry Example
//!
//! ```
//! use dockyard_core::{Point, Rect};
//!
//! let a = Rect::new(0, 0, 100, 50);
//! let b = Rect::new(50, 25, 100, 50);
//!
//! assert_eq!(a.intersect(&b), Some(Rect::new(50, 25, 50, 25)));
//! assert!(a.contains(Point::new(10, 10)));
//! ```

mod error;
pub mod geometry;
pub mod logging;
pub mod signal;

pub use error::{CoreError, CoreResult};
pub use geometry::{Border, Point, Rect, Size};
pub use logging::{NodeDescription, PerfSpan, TreeFormatOptions, TreeSource, TreeStyle, WidgetTreeDebug};
pub use signal::{ConnectionId, Signal};

slotmap::new_key_type! {
    /// A stable handle to a widget stored in a widget tree.
    ///
    /// Ids stay valid until the widget is destroyed. A destroyed id is never
    /// reused for another widget, so holding a stale id is safe: lookups on it
    /// simply fail.
    pub struct WidgetId;
}

// Value types must stay cheap to pass around by copy.
static_assertions::assert_impl_all!(WidgetId: Copy, Send, Sync);
static_assertions::assert_impl_all!(Point: Copy, Send, Sync);
static_assertions::assert_impl_all!(Size: Copy, Send, Sync);
static_assertions::assert_impl_all!(Rect: Copy, Send, Sync);
static_assertions::assert_impl_all!(Border: Copy, Send, Sync);
