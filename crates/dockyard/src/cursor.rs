//! Mouse cursor shapes.
//!
//! The [`MainWindow`](crate::MainWindow) resets its cursor to
//! [`CursorShape::Arrow`] at the start of every mouse-move dispatch; widgets
//! set another shape while handling the move (window borders, text fields).
//! The last setter in traversal order wins. Hosts read the result with
//! [`MainWindow::cursor`](crate::MainWindow::cursor) and convert it with
//! [`CursorShape::to_cursor_icon`].

use cursor_icon::CursorIcon;

/// The shape of the mouse cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorShape {
    /// The default arrow cursor.
    #[default]
    Arrow,
    /// Text insertion cursor.
    IBeam,
    /// Resize along the north/south axis.
    ResizeNS,
    /// Resize along the east/west axis.
    ResizeEW,
    /// Resize along the north-east/south-west diagonal.
    ResizeNESW,
    /// Resize along the north-west/south-east diagonal.
    ResizeNWSE,
}

impl CursorShape {
    /// Convert to the platform-neutral cursor icon.
    pub fn to_cursor_icon(self) -> CursorIcon {
        match self {
            CursorShape::Arrow => CursorIcon::Default,
            CursorShape::IBeam => CursorIcon::Text,
            CursorShape::ResizeNS => CursorIcon::NsResize,
            CursorShape::ResizeEW => CursorIcon::EwResize,
            CursorShape::ResizeNESW => CursorIcon::NeswResize,
            CursorShape::ResizeNWSE => CursorIcon::NwseResize,
        }
    }
}

impl From<CursorShape> for CursorIcon {
    fn from(shape: CursorShape) -> Self {
        shape.to_cursor_icon()
    }
}
