//! Core widget trait definitions.
//!
//! This module defines the [`Widget`] trait: the per-type behavior hooked
//! into the generic tree, layout, input and draw code.
//!
//! # Key Types
//!
//! - [`Widget`] - Callbacks with passthrough or no-op defaults
//! - [`DrawContext`] - Rendering context passed to [`Widget::draw`]
//!
//! # Callback Protocol
//!
//! Behaviors are stored inside the [`MainWindow`] arena. While one of a
//! widget's callbacks runs, its behavior is detached from the tree so the
//! callback can receive `&mut MainWindow`. Tree operations the callback
//! performs on its *own* id therefore see no behavior and fall back to the
//! defaults (stored rect, stored visibility). Callbacks reach their own state
//! through `self`.

use std::any::Any;

use dockyard_core::{Point, Rect, Size, WidgetId};
use dockyard_render::{Color, DrawCommand, FontSpec, Renderer};

use crate::event::{KeyCode, MouseButton};
use crate::main_window::MainWindow;

/// Context provided while drawing a widget.
///
/// Collects the widget's draw commands into the frame's display list and
/// answers text metrics from the current renderer. Passed to
/// [`Widget::draw`].
pub struct DrawContext<'a> {
    commands: &'a mut Vec<DrawCommand>,
    metrics: &'a dyn Renderer,
    rect: Rect,
    font: FontSpec,
    hover: bool,
    focused: bool,
}

impl<'a> DrawContext<'a> {
    pub(crate) fn new(
        commands: &'a mut Vec<DrawCommand>,
        metrics: &'a dyn Renderer,
        rect: Rect,
        font: FontSpec,
    ) -> Self {
        Self {
            commands,
            metrics,
            rect,
            font,
            hover: false,
            focused: false,
        }
    }

    pub(crate) fn with_hover(mut self, hover: bool) -> Self {
        self.hover = hover;
        self
    }

    pub(crate) fn with_focus(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// The widget's absolute rect.
    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The widget's resolved font.
    #[inline]
    pub fn font(&self) -> &FontSpec {
        &self.font
    }

    /// Whether the mouse is over the widget.
    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.hover
    }

    /// Whether the widget holds keyboard focus.
    #[inline]
    pub fn has_focus(&self) -> bool {
        self.focused
    }

    /// Measure text in the widget's font.
    pub fn text_size(&self, text: &str) -> Size {
        self.metrics.measure_text(&self.font, text)
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    pub fn stroke_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::StrokeRect { rect, color, width: 1 });
    }

    pub fn draw_line(&mut self, from: Point, to: Point, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    /// Draw text with its top-left corner at `origin`.
    pub fn draw_text(&mut self, text: &str, origin: Point, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            origin,
            font: self.font.clone(),
            color,
        });
    }

    /// Draw text vertically centered in `rect`, starting at its left edge.
    pub fn draw_text_left(&mut self, text: &str, rect: Rect, color: Color) {
        let size = self.text_size(text);
        self.draw_text(text, Point::new(rect.x, rect.y + (rect.h - size.h) / 2), color);
    }

    /// Draw text centered in `rect`.
    pub fn draw_text_centered(&mut self, text: &str, rect: Rect, color: Color) {
        let size = self.text_size(text);
        let origin = Point::new(rect.x + (rect.w - size.w) / 2, rect.y + (rect.h - size.h) / 2);
        self.draw_text(text, origin, color);
    }
}

/// Per-type widget behavior.
///
/// Every method has a default, so a behavior only implements what it needs.
/// An absent `set_rect` stores the rect verbatim, an absent `measure` keeps
/// the current size, and absent input callbacks do nothing.
///
/// Positions passed to input callbacks are absolute MainWindow coordinates.
///
/// # Example
///
/// ```
/// use dockyard::{Color, DrawContext, MainWindow, Size, Widget, WidgetId};
///
/// struct Swatch(Color);
///
/// impl Widget for Swatch {
///     fn measure(&mut self, _ui: &MainWindow, _id: WidgetId) -> Size {
///         Size::new(24, 24)
///     }
///
///     fn draw(&self, _ui: &MainWindow, _id: WidgetId, ctx: &mut DrawContext<'_>) {
///         let rect = ctx.rect();
///         ctx.fill_rect(rect, self.0);
///     }
/// }
/// ```
#[allow(unused_variables)]
pub trait Widget: Any {
    /// Text shown for this widget in tree dumps.
    fn label(&self) -> String {
        String::new()
    }

    /// The size this widget needs. Zero components keep the current size.
    fn measure(&mut self, ui: &MainWindow, id: WidgetId) -> Size {
        Size::ZERO
    }

    /// Paint the widget. `ctx.rect()` is absolute.
    fn draw(&self, ui: &MainWindow, id: WidgetId, ctx: &mut DrawContext<'_>) {}

    /// Apply a resolved, parent-relative rect.
    fn set_rect(&mut self, ui: &mut MainWindow, id: WidgetId, rect: Rect) {
        ui.store_rect(id, rect);
    }

    fn set_visible(&mut self, ui: &mut MainWindow, id: WidgetId, visible: bool) {
        ui.store_visible(id, visible);
    }

    fn font_changed(&mut self, ui: &mut MainWindow, id: WidgetId) {}

    /// A new renderer reached this widget.
    fn renderer_changed(&mut self, ui: &mut MainWindow, id: WidgetId) {}

    /// The widget is about to be freed. Children are already gone.
    fn destroy(&mut self, ui: &mut MainWindow, id: WidgetId) {}

    /// The widget was attached to `parent`.
    fn added(&mut self, ui: &mut MainWindow, id: WidgetId, parent: WidgetId) {}

    fn mouse_button_down(&mut self, ui: &mut MainWindow, id: WidgetId, button: MouseButton, pos: Point) {}

    fn mouse_button_up(&mut self, ui: &mut MainWindow, id: WidgetId, button: MouseButton, pos: Point) {}

    fn mouse_move(&mut self, ui: &mut MainWindow, id: WidgetId, pos: Point, delta: Point) {}

    fn mouse_wheel_move(&mut self, ui: &mut MainWindow, id: WidgetId, pos: Point, delta: Point) {}

    fn mouse_hover_on(&mut self, ui: &mut MainWindow, id: WidgetId) {}

    fn mouse_hover_off(&mut self, ui: &mut MainWindow, id: WidgetId) {}

    fn key_down(&mut self, ui: &mut MainWindow, id: WidgetId, key: KeyCode) {}

    fn key_up(&mut self, ui: &mut MainWindow, id: WidgetId, key: KeyCode) {}

    fn text_input(&mut self, ui: &mut MainWindow, id: WidgetId, text: &str) {}

    /// Absolute clip rect for this widget's children, intersected with the
    /// inherited one. `None` inherits unchanged.
    fn children_clip_rect(&self, ui: &MainWindow, id: WidgetId) -> Option<Rect> {
        None
    }
}
