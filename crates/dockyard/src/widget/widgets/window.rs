//! Window widget.
//!
//! A [`Window`] is a movable, resizable panel with a title header. Windows are
//! direct children of the MainWindow root; their contents go into an inner
//! content container sized to fit inside the header and border.
//!
//! Dragging the header of a floating window moves it and shows the dock
//! icons; releasing over an icon docks it. Dragging the header of a docked
//! window further than the configured threshold tears it off again. The
//! border resizes, limited to the inner edge while docked.
//!
//! # Example
//!
//! ```
//! use dockyard::{MainWindow, Rect, RecordingRenderer, Size};
//! use dockyard::widgets::{Button, Window};
//!
//! let mut ui = MainWindow::new(Box::new(RecordingRenderer::new()), Size::new(800, 600))?;
//! let tools = Window::create(&mut ui, "Tools");
//! ui.set_rect(tools, Rect::new(40, 40, 200, 300));
//! ui.add(tools);
//!
//! let ok = Button::create(&mut ui, "OK");
//! Window::add(&mut ui, tools, ok);
//! assert_eq!(ui.parent(ok), Window::content(&ui, tools));
//! # Ok::<(), dockyard::DockyardError>(())
//! ```

use dockyard_core::logging::targets;
use dockyard_core::{Border, Point, Rect, Size, WidgetId};

use crate::cursor::CursorShape;
use crate::event::MouseButton;
use crate::main_window::{DockPosition, MainWindow};
use crate::widget::painting;
use crate::widget::{DrawContext, Stretch, Widget, WidgetKind};

/// Which border edges a resize drag moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Edges {
    left: bool,
    right: bool,
    top: bool,
    bottom: bool,
}

impl Edges {
    fn any(self) -> bool {
        self.left || self.right || self.top || self.bottom
    }

    /// Drop the edges a window docked at `position` may not move.
    fn allowed_at(self, position: DockPosition) -> Edges {
        match position {
            DockPosition::None => self,
            DockPosition::North => Edges { bottom: self.bottom, ..Edges::default() },
            DockPosition::South => Edges { top: self.top, ..Edges::default() },
            DockPosition::West => Edges { right: self.right, ..Edges::default() },
            DockPosition::East => Edges { left: self.left, ..Edges::default() },
        }
    }

    fn cursor(self) -> CursorShape {
        match (self.left || self.right, self.top || self.bottom) {
            (true, false) => CursorShape::ResizeEW,
            (false, true) => CursorShape::ResizeNS,
            (true, true) if (self.left && self.top) || (self.right && self.bottom) => {
                CursorShape::ResizeNWSE
            }
            (true, true) => CursorShape::ResizeNESW,
            (false, false) => CursorShape::Arrow,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Drag {
    #[default]
    None,
    Header,
    Resize(Edges),
}

/// A movable, dockable window.
#[derive(Debug, Clone, Default)]
pub struct Window {
    title: String,
    content: Option<WidgetId>,
    /// Higher draws later and wins hit-tests among floating windows.
    pub(crate) draw_priority: i32,
    /// Size to restore when the window is undocked.
    pub(crate) size_before_docking: Size,
    drag: Drag,
    drag_start_pos: Point,
    drag_start_rect: Rect,
    /// Set while a docked window's header is held, until it tears off.
    undock_start: Option<Point>,
}

impl Window {
    /// Create a detached window with an empty content container.
    pub fn create(ui: &mut MainWindow, title: &str) -> WidgetId {
        let id = ui.create(
            WidgetKind::Window,
            Box::new(Window {
                title: title.to_string(),
                ..Window::default()
            }),
        );

        let content = ui.create_container();
        ui.set_stretch(content, Stretch::ALL);
        ui.set_margin(content, content_margin(ui));
        ui.add_child(id, content);
        if let Some(window) = ui.widget_mut::<Window>(id) {
            window.content = Some(content);
        }
        id
    }

    /// Add a child to the window's content. Windows are rejected.
    pub fn add(ui: &mut MainWindow, window: WidgetId, child: WidgetId) -> bool {
        if matches!(ui.kind(child), Some(WidgetKind::Window | WidgetKind::MainWindow)) {
            tracing::trace!(target: targets::TREE, ?child, "window content rejects windows");
            return false;
        }
        match Self::content(ui, window) {
            Some(content) => ui.add_child(content, child),
            None => false,
        }
    }

    /// The container holding the window's children.
    pub fn content(ui: &MainWindow, window: WidgetId) -> Option<WidgetId> {
        ui.widget::<Window>(window).and_then(|w| w.content)
    }

    pub fn set_title(ui: &mut MainWindow, window: WidgetId, title: &str) {
        if let Some(w) = ui.widget_mut::<Window>(window) {
            w.title = title.to_string();
        }
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    pub fn draw_priority(&self) -> i32 {
        self.draw_priority
    }

    /// Absolute rect of the title header.
    fn header_rect(ui: &MainWindow, abs: Rect) -> Rect {
        let b = ui.config().window_border_size;
        Rect::new(abs.x + b, abs.y + b, abs.w - 2 * b, ui.config().window_header_height)
    }

    /// The border edges under `pos`, limited to what the dock position allows.
    fn edges_at(ui: &MainWindow, id: WidgetId, abs: Rect, pos: Point) -> Edges {
        if !abs.contains(pos) {
            return Edges::default();
        }
        let b = ui.config().window_border_size;
        let edges = Edges {
            left: pos.x < abs.x + b,
            right: pos.x >= abs.right() - b,
            top: pos.y < abs.y + b,
            bottom: pos.y >= abs.bottom() - b,
        };
        edges.allowed_at(ui.window_dock_position(id))
    }

    fn resized_rect(&self, ui: &MainWindow, edges: Edges, pos: Point) -> Rect {
        let b = ui.config().window_border_size;
        let min = Size::new(2 * b, ui.config().window_header_height + 2 * b);
        let delta = pos - self.drag_start_pos;
        let start = self.drag_start_rect;
        let mut rect = start;

        if edges.left {
            rect.w = (start.w - delta.x).max(min.w);
            rect.x = start.right() - rect.w;
        } else if edges.right {
            rect.w = (start.w + delta.x).max(min.w);
        }
        if edges.top {
            rect.h = (start.h - delta.y).max(min.h);
            rect.y = start.bottom() - rect.h;
        } else if edges.bottom {
            rect.h = (start.h + delta.y).max(min.h);
        }
        rect
    }

    /// Tear a docked window off once the header has been dragged far enough.
    fn maybe_tear_off(&mut self, ui: &mut MainWindow, id: WidgetId, pos: Point) {
        let Some(start) = self.undock_start else {
            return;
        };
        let threshold = i64::from(ui.config().undock_threshold);
        if pos.distance_squared(start) <= threshold * threshold {
            return;
        }
        self.undock_start = None;
        ui.undock_with_size(id, Some(self.size_before_docking));

        let b = ui.config().window_border_size;
        let header = ui.config().window_header_height;
        let size = ui.rect(id).size();
        ui.set_position(id, Point::new(pos.x - size.w / 2, pos.y - b - header / 2));
        ui.set_moving_window(Some(id));
        tracing::debug!(target: targets::DOCKING, window = ?id, "torn off");
    }
}

fn content_margin(ui: &MainWindow) -> Border {
    let b = ui.config().window_border_size;
    Border::new(ui.config().window_header_height + b, b, b, b)
}

impl Widget for Window {
    fn label(&self) -> String {
        self.title.clone()
    }

    fn added(&mut self, ui: &mut MainWindow, id: WidgetId, parent: WidgetId) {
        if parent != ui.root() {
            return;
        }
        // New windows open above the existing ones.
        self.draw_priority = ui
            .children(parent)
            .iter()
            .filter(|&&c| c != id)
            .filter_map(|&c| ui.widget::<Window>(c))
            .map(|w| w.draw_priority + 1)
            .max()
            .unwrap_or(0);
    }

    fn draw(&self, ui: &MainWindow, _id: WidgetId, ctx: &mut DrawContext<'_>) {
        let rect = ctx.rect();
        painting::panel(ctx, rect, painting::BACKGROUND);
        let header = Self::header_rect(ui, rect);
        ctx.fill_rect(header, painting::HEADER);
        let b = ui.config().window_border_size;
        let text_rect = Rect::new(header.x + b, header.y, header.w - b, header.h);
        ctx.draw_text_left(&self.title, text_rect, painting::HEADER_TEXT);
    }

    fn mouse_button_down(&mut self, ui: &mut MainWindow, id: WidgetId, button: MouseButton, pos: Point) {
        if button != MouseButton::Left || self.drag != Drag::None {
            return;
        }
        let abs = ui.absolute_rect(id);
        self.drag_start_pos = pos;
        self.drag_start_rect = ui.rect(id);

        let edges = Self::edges_at(ui, id, abs, pos);
        if edges.any() {
            self.drag = Drag::Resize(edges);
        } else if Self::header_rect(ui, abs).contains(pos) {
            self.drag = Drag::Header;
            if ui.window_dock_position(id) == DockPosition::None {
                ui.set_moving_window(Some(id));
            } else {
                self.undock_start = Some(pos);
            }
        } else {
            return;
        }
        ui.push_lock_input(id);
    }

    fn mouse_move(&mut self, ui: &mut MainWindow, id: WidgetId, pos: Point, delta: Point) {
        if ui.input_lock() != Some(id) {
            let edges = Self::edges_at(ui, id, ui.absolute_rect(id), pos);
            if edges.any() {
                ui.set_cursor(edges.cursor());
            }
            return;
        }

        match self.drag {
            Drag::None => {}
            Drag::Header if self.undock_start.is_some() => self.maybe_tear_off(ui, id, pos),
            Drag::Header => {
                if ui.window_dock_position(id) == DockPosition::None {
                    let rect = ui.rect(id);
                    ui.set_position(id, Point::new(rect.x + delta.x, rect.y + delta.y));
                }
            }
            Drag::Resize(edges) => {
                ui.set_cursor(edges.cursor());
                let rect = self.resized_rect(ui, edges, pos);
                ui.set_rect(id, rect);
                if ui.window_dock_position(id) != DockPosition::None {
                    ui.docked_window_resized(id);
                }
            }
        }
    }

    fn mouse_button_up(&mut self, ui: &mut MainWindow, id: WidgetId, button: MouseButton, _pos: Point) {
        if button != MouseButton::Left || self.drag == Drag::None {
            return;
        }
        self.drag = Drag::None;
        self.undock_start = None;
        ui.pop_lock_input(id);
    }
}

#[cfg(test)]
mod tests {
    use dockyard_render::RecordingRenderer;

    use super::*;

    fn ui() -> MainWindow {
        MainWindow::new(Box::new(RecordingRenderer::new()), Size::new(800, 600))
            .expect("recording renderer never fails")
    }

    fn floating(ui: &mut MainWindow, title: &str, rect: Rect) -> WidgetId {
        let id = Window::create(ui, title);
        ui.set_rect(id, rect);
        ui.add(id);
        id
    }

    #[test]
    fn test_content_fills_inside_header() {
        let mut ui = ui();
        let id = floating(&mut ui, "Tools", Rect::new(10, 10, 200, 100));
        let content = Window::content(&ui, id).expect("window has content");
        // header 20 + border 4
        assert_eq!(ui.rect(content), Rect::new(4, 24, 192, 72));
    }

    #[test]
    fn test_add_rejects_windows() {
        let mut ui = ui();
        let outer = floating(&mut ui, "Outer", Rect::new(0, 0, 100, 100));
        let inner = Window::create(&mut ui, "Inner");
        assert!(!Window::add(&mut ui, outer, inner));
        assert_eq!(ui.parent(inner), None);
    }

    #[test]
    fn test_new_windows_open_on_top() {
        let mut ui = ui();
        let a = floating(&mut ui, "A", Rect::new(0, 0, 100, 100));
        let b = floating(&mut ui, "B", Rect::new(50, 50, 100, 100));
        let priority = |ui: &MainWindow, id| ui.widget::<Window>(id).map(|w| w.draw_priority());
        assert!(priority(&ui, b) > priority(&ui, a));

        ui.mouse_move(Point::new(60, 60), Point::ZERO);
        assert_eq!(ui.hover_window(), Some(b));
    }

    #[test]
    fn test_drag_header_moves() {
        let mut ui = ui();
        let id = floating(&mut ui, "Tools", Rect::new(100, 100, 200, 150));
        let grab = Point::new(150, 110);
        ui.mouse_move(grab, Point::ZERO);
        ui.mouse_button_down(MouseButton::Left, grab);
        assert_eq!(ui.moving_window(), Some(id));
        assert!(ui.is_visible(ui.dock_icons()));

        ui.mouse_move(Point::new(180, 130), Point::new(30, 20));
        assert_eq!(ui.rect(id).origin(), Point::new(130, 120));

        ui.mouse_button_up(MouseButton::Left, Point::new(180, 130));
        assert_eq!(ui.moving_window(), None);
        assert_eq!(ui.input_lock(), None);
        assert!(!ui.is_visible(ui.dock_icons()));
    }

    #[test]
    fn test_resize_clamps_to_minimum() {
        let mut ui = ui();
        let id = floating(&mut ui, "Tools", Rect::new(100, 100, 200, 150));
        // left border
        let grab = Point::new(101, 200);
        ui.mouse_move(grab, Point::ZERO);
        ui.mouse_button_down(MouseButton::Left, grab);
        assert_eq!(ui.cursor(), CursorShape::ResizeEW);

        ui.mouse_move(Point::new(500, 200), Point::new(399, 0));
        // minimum width 2 * border, right edge kept at 300
        assert_eq!(ui.rect(id), Rect::new(292, 100, 8, 150));
        ui.mouse_button_up(MouseButton::Left, Point::new(500, 200));
        assert_eq!(ui.moving_window(), None);
    }

    #[test]
    fn test_docked_resize_only_inner_edge() {
        let mut ui = ui();
        let id = floating(&mut ui, "Tools", Rect::new(100, 100, 200, 150));
        ui.dock_window(id, DockPosition::West);
        let rect = ui.rect(id);

        // outer (left) border does nothing
        let outer = Point::new(1, rect.y + 60);
        ui.mouse_move(outer, Point::ZERO);
        ui.mouse_button_down(MouseButton::Left, outer);
        assert_eq!(ui.input_lock(), None);

        // inner (right) border widens the slot
        let inner = Point::new(rect.right() - 1, rect.y + 60);
        ui.mouse_move(inner, inner - outer);
        ui.mouse_button_down(MouseButton::Left, inner);
        let wider = inner + Point::new(40, 0);
        ui.mouse_move(wider, Point::new(40, 0));
        ui.mouse_button_up(MouseButton::Left, wider);

        assert_eq!(ui.rect(id).w, rect.w + 40);
        assert_eq!(ui.content_rect().x, rect.w + 40);
    }

    #[test]
    fn test_tear_off_after_threshold() {
        let mut ui = ui();
        let id = floating(&mut ui, "Tools", Rect::new(100, 100, 200, 150));
        ui.dock_window(id, DockPosition::West);

        let grab = Point::new(50, 10);
        ui.mouse_move(grab, Point::ZERO);
        ui.mouse_button_down(MouseButton::Left, grab);

        ui.mouse_move(Point::new(60, 10), Point::new(10, 0));
        assert_eq!(ui.window_dock_position(id), DockPosition::West);

        ui.mouse_move(Point::new(300, 300), Point::new(240, 290));
        assert_eq!(ui.window_dock_position(id), DockPosition::None);
        assert_eq!(ui.rect(id), Rect::new(200, 286, 200, 150));
        assert_eq!(ui.moving_window(), Some(id));

        ui.mouse_button_up(MouseButton::Left, Point::new(300, 300));
        assert_eq!(ui.window_dock_position(id), DockPosition::None);
    }
}
