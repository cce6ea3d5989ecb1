//! Shared colors and paint helpers for the built-in widgets.
//!
//! These are neutral defaults; a host wanting its own look draws custom
//! widgets or wraps the renderer.

use dockyard_core::Rect;
use dockyard_render::Color;

use super::traits::DrawContext;

pub(crate) const BACKGROUND: Color = Color::rgb(0xEE, 0xEE, 0xEE);
pub(crate) const FACE: Color = Color::rgb(0xDD, 0xDD, 0xDD);
pub(crate) const FACE_HOVER: Color = Color::rgb(0xE8, 0xE8, 0xF4);
pub(crate) const FACE_PRESSED: Color = Color::rgb(0xBB, 0xBB, 0xCC);
pub(crate) const BORDER: Color = Color::rgb(0x88, 0x88, 0x88);
pub(crate) const TEXT: Color = Color::BLACK;
pub(crate) const FIELD: Color = Color::WHITE;
pub(crate) const SELECTION: Color = Color::rgb(0x33, 0x66, 0xCC);
pub(crate) const SELECTED_TEXT: Color = Color::WHITE;
pub(crate) const HEADER: Color = Color::rgb(0x44, 0x55, 0x77);
pub(crate) const HEADER_TEXT: Color = Color::WHITE;
pub(crate) const OVERLAY: Color = Color::rgba(0x33, 0x66, 0xCC, 0x60);

/// Fill `rect` and outline it.
pub(crate) fn panel(ctx: &mut DrawContext<'_>, rect: Rect, fill: Color) {
    ctx.fill_rect(rect, fill);
    ctx.stroke_rect(rect, BORDER);
}

/// The face color of a clickable widget.
pub(crate) fn face(hover: bool, pressed: bool) -> Color {
    if pressed {
        FACE_PRESSED
    } else if hover {
        FACE_HOVER
    } else {
        FACE
    }
}
