//! Input routing: hover, input locks, focus and the cursor.
//!
//! Mouse input goes to the top of the input-lock stack when one is pushed.
//! Otherwise the topmost visible Window under the cursor (floating windows
//! above docked ones, then by draw priority) is the *hover window*, and only
//! widgets belonging to it can hover. With no hover window, only widgets
//! outside any window can.

use dockyard_core::logging::targets;
use dockyard_core::{Point, WidgetId};

use super::MainWindow;
use crate::cursor::CursorShape;
use crate::event::{KeyCode, MouseButton};
use crate::widget::WidgetKind;
use crate::widgets::Window;

#[derive(Clone, Copy)]
enum ButtonAction {
    Down(MouseButton),
    Up(MouseButton),
    Wheel(Point),
}

impl MainWindow {
    // =========================================================================
    // State
    // =========================================================================

    pub fn keyboard_focus(&self) -> Option<WidgetId> {
        self.keyboard_focus
    }

    /// Give a widget keyboard focus. Key and text input only reach the
    /// focused widget while it is visible.
    pub fn set_keyboard_focus(&mut self, id: Option<WidgetId>) {
        self.keyboard_focus = id.filter(|&id| self.nodes.contains_key(id));
    }

    pub fn cursor(&self) -> CursorShape {
        self.cursor
    }

    /// Set the cursor shape. Reset to [`CursorShape::Arrow`] at the start of
    /// every mouse move, so widgets set it from their move handlers.
    pub fn set_cursor(&mut self, cursor: CursorShape) {
        self.cursor = cursor;
    }

    pub fn is_shift_down(&self) -> bool {
        self.shift_down
    }

    pub fn is_control_down(&self) -> bool {
        self.control_down
    }

    /// The last mouse position seen.
    pub fn mouse_position(&self) -> Point {
        self.mouse_pos
    }

    /// The Window under the cursor at the last mouse move.
    pub fn hover_window(&self) -> Option<WidgetId> {
        self.hover_window
    }

    // =========================================================================
    // Input lock
    // =========================================================================

    /// Route all mouse input to `id` until it is popped.
    pub fn push_lock_input(&mut self, id: WidgetId) {
        debug_assert!(self.nodes.contains_key(id), "lock on unknown widget");
        tracing::trace!(target: targets::INPUT, ?id, depth = self.lock_stack.len() + 1, "push input lock");
        self.lock_stack.push(id);
    }

    /// Pop the input lock, but only if `id` is on top.
    pub fn pop_lock_input(&mut self, id: WidgetId) {
        if self.lock_stack.last() == Some(&id) {
            self.lock_stack.pop();
            tracing::trace!(target: targets::INPUT, ?id, depth = self.lock_stack.len(), "pop input lock");
        } else {
            tracing::trace!(target: targets::INPUT, ?id, top = ?self.lock_stack.last(), "ignored pop of non-top lock");
        }
    }

    /// The widget currently receiving all mouse input, if any.
    pub fn input_lock(&self) -> Option<WidgetId> {
        self.lock_stack.last().copied()
    }

    // =========================================================================
    // Mouse
    // =========================================================================

    /// Feed a mouse move. `pos` is absolute, `delta` the movement since the
    /// previous move.
    pub fn mouse_move(&mut self, pos: Point, delta: Point) {
        self.mouse_pos = pos;
        self.cursor = CursorShape::Arrow;

        if let Some(top) = self.input_lock() {
            let scope = self.owning_window(top);
            self.hover_walk(top, pos, delta, scope, Some(top));
        } else {
            self.hover_window = self.window_at(pos);
            self.hover_walk(self.root, pos, delta, self.hover_window, None);
        }

        if self.moving_window.is_some() {
            self.update_dock_preview(pos);
        }
    }

    pub fn mouse_button_down(&mut self, button: MouseButton, pos: Point) {
        if pos != self.mouse_pos {
            self.mouse_move(pos, pos - self.mouse_pos);
        }
        self.keyboard_focus = None;

        if let Some(top) = self.input_lock() {
            self.with_behavior(top, |b, ui| b.mouse_button_down(ui, top, button, pos));
            return;
        }

        let start = match self.hover_window {
            Some(window) => {
                self.raise_window(window);
                window
            }
            None => self.root,
        };
        self.dispatch_button(start, ButtonAction::Down(button), pos);
    }

    pub fn mouse_button_up(&mut self, button: MouseButton, pos: Point) {
        if pos != self.mouse_pos {
            self.mouse_move(pos, pos - self.mouse_pos);
        }

        if let Some(moving) = self.moving_window
            && !self.is_hidden(self.dock_preview)
        {
            let position = self.dock_preview_position;
            self.dock_window(moving, position);
        }
        self.set_moving_window(None);

        if let Some(top) = self.input_lock() {
            self.with_behavior(top, |b, ui| b.mouse_button_up(ui, top, button, pos));
            return;
        }
        let start = self.hover_window.unwrap_or(self.root);
        self.dispatch_button(start, ButtonAction::Up(button), pos);
    }

    /// Feed a wheel movement at the last mouse position.
    pub fn mouse_wheel_move(&mut self, delta: Point) {
        let pos = self.mouse_pos;
        if let Some(top) = self.input_lock() {
            self.with_behavior(top, |b, ui| b.mouse_wheel_move(ui, top, pos, delta));
            return;
        }
        let start = self.hover_window.unwrap_or(self.root);
        self.dispatch_button(start, ButtonAction::Wheel(delta), pos);
    }

    /// Deliver a button press or release to the hovered widgets under `id`.
    /// Used by input-locked widgets to pass clicks on to their parts.
    pub(crate) fn forward_button(&mut self, id: WidgetId, button: MouseButton, down: bool, pos: Point) {
        let action = if down {
            ButtonAction::Down(button)
        } else {
            ButtonAction::Up(button)
        };
        for child in self.children(id).to_vec() {
            if self.is_hovered(child) {
                self.dispatch_button(child, action, pos);
            }
        }
    }

    /// Deliver a button or wheel action to `id` and its hovered descendants.
    fn dispatch_button(&mut self, id: WidgetId, action: ButtonAction, pos: Point) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let needs_visible = !matches!(action, ButtonAction::Wheel(_));
        if needs_visible && !self.is_visible(id) {
            return;
        }
        if node.hover {
            self.with_behavior(id, |b, ui| match action {
                ButtonAction::Down(button) => b.mouse_button_down(ui, id, button, pos),
                ButtonAction::Up(button) => b.mouse_button_up(ui, id, button, pos),
                ButtonAction::Wheel(delta) => b.mouse_wheel_move(ui, id, pos, delta),
            });
        }

        for child in self.children(id).to_vec() {
            if self.is_hovered(child) {
                self.dispatch_button(child, action, pos);
            }
        }
    }

    // =========================================================================
    // Hover
    // =========================================================================

    /// The topmost visible window containing `pos`.
    fn window_at(&self, pos: Point) -> Option<WidgetId> {
        self.children(self.root)
            .iter()
            .copied()
            .filter(|&id| self.kind(id) == Some(WidgetKind::Window))
            .filter(|&id| !self.is_hidden(id) && self.absolute_rect(id).contains(pos))
            .max_by_key(|&id| self.window_stacking_key(id))
    }

    /// Sort key for window stacking: floating above docked, then priority.
    pub(crate) fn window_stacking_key(&self, window: WidgetId) -> (bool, i32) {
        let floating = self.window_dock_position(window).index().is_none();
        let priority = self
            .widget::<Window>(window)
            .map_or(0, |w| w.draw_priority());
        (floating, priority)
    }

    fn hover_walk(
        &mut self,
        id: WidgetId,
        pos: Point,
        delta: Point,
        scope: Option<WidgetId>,
        lock_top: Option<WidgetId>,
    ) {
        if self.is_hidden(id) {
            for hidden in self.subtree(id) {
                self.set_hover(hidden, false);
            }
            return;
        }

        let hovering = self.is_hovering(id, pos, scope);
        self.set_hover(id, hovering);
        if hovering || lock_top == Some(id) {
            self.with_behavior(id, |b, ui| b.mouse_move(ui, id, pos, delta));
        }

        self.resolve_overlap(id, pos);
        for child in self.children(id).to_vec() {
            self.hover_walk(child, pos, delta, scope, lock_top);
        }
    }

    fn set_hover(&mut self, id: WidgetId, hover: bool) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if node.hover == hover {
            return;
        }
        node.hover = hover;
        if hover {
            self.with_behavior(id, |b, ui| b.mouse_hover_on(ui, id));
        } else {
            self.with_behavior(id, |b, ui| b.mouse_hover_off(ui, id));
        }
    }

    /// Flag children that lose a hit-test to an overlapping `overlap` sibling.
    fn resolve_overlap(&mut self, id: WidgetId, pos: Point) {
        let children = self.children(id).to_vec();
        for &child in &children {
            if let Some(node) = self.nodes.get_mut(child) {
                node.ignore = false;
            }
        }

        let hits: Vec<(WidgetId, bool)> = children
            .iter()
            .copied()
            .filter(|&c| !self.is_hidden(c) && self.absolute_rect(c).contains(pos))
            .filter_map(|c| self.nodes.get(c).map(|n| (c, n.overlap)))
            .collect();

        for (i, &(a, a_overlap)) in hits.iter().enumerate() {
            for &(b, b_overlap) in &hits[i + 1..] {
                let loser = match (a_overlap, b_overlap) {
                    (true, false) => b,
                    (false, true) => a,
                    _ => continue,
                };
                if let Some(node) = self.nodes.get_mut(loser) {
                    node.ignore = true;
                }
            }
        }
    }

    fn is_hovering(&self, id: WidgetId, pos: Point, scope: Option<WidgetId>) -> bool {
        let Some(node) = self.nodes.get(id) else {
            return false;
        };
        if node.ignore || self.owning_window(id) != scope {
            return false;
        }

        let in_combo = self.find_ancestor_of_kind(id, WidgetKind::Combo).is_some();
        if let Some(window) = self.owning_window(id)
            && window != id
            && !in_combo
            && !self.absolute_rect(window).contains(pos)
        {
            return false;
        }

        let mut current = id;
        loop {
            let Some(node) = self.nodes.get(current) else {
                break;
            };
            if node.input_not_clipped_to_parent {
                break;
            }
            let Some(parent) = node.parent else {
                break;
            };
            if !self.absolute_rect(parent).contains(pos) {
                return false;
            }
            current = parent;
        }

        self.absolute_rect(id).contains(pos)
    }

    // =========================================================================
    // Keyboard
    // =========================================================================

    /// The focused widget, if it is visible.
    fn focus_target(&self) -> Option<WidgetId> {
        self.keyboard_focus.filter(|&id| self.is_visible(id))
    }

    fn latch_modifiers(&mut self, key: KeyCode, down: bool) {
        let key = key.key();
        if key.is_shift() {
            self.shift_down = down;
        }
        if key.is_control() {
            self.control_down = down;
        }
    }

    pub fn key_down(&mut self, key: KeyCode) {
        self.latch_modifiers(key, true);
        if let Some(focus) = self.focus_target() {
            self.with_behavior(focus, |b, ui| b.key_down(ui, focus, key));
        }
    }

    pub fn key_up(&mut self, key: KeyCode) {
        self.latch_modifiers(key, false);
        if let Some(focus) = self.focus_target() {
            self.with_behavior(focus, |b, ui| b.key_up(ui, focus, key));
        }
    }

    /// Feed decoded text, such as a typed character.
    pub fn text_input(&mut self, text: &str) {
        if let Some(focus) = self.focus_target() {
            self.with_behavior(focus, |b, ui| b.text_input(ui, focus, text));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use dockyard_core::{Rect, Size};
    use dockyard_render::RecordingRenderer;

    use super::*;
    use crate::event::Key;
    use crate::widget::Widget;

    #[derive(Default)]
    struct Recorder {
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Widget for Recorder {
        fn mouse_button_down(&mut self, _ui: &mut MainWindow, _id: WidgetId, _b: MouseButton, _p: Point) {
            self.log.borrow_mut().push("down");
        }

        fn mouse_hover_on(&mut self, _ui: &mut MainWindow, _id: WidgetId) {
            self.log.borrow_mut().push("hover_on");
        }

        fn mouse_hover_off(&mut self, _ui: &mut MainWindow, _id: WidgetId) {
            self.log.borrow_mut().push("hover_off");
        }

        fn key_down(&mut self, _ui: &mut MainWindow, _id: WidgetId, _key: KeyCode) {
            self.log.borrow_mut().push("key");
        }
    }

    fn ui() -> MainWindow {
        MainWindow::new(Box::new(RecordingRenderer::new()), Size::new(400, 300))
            .expect("recording renderer never fails")
    }

    fn recorder(ui: &mut MainWindow, rect: Rect) -> (WidgetId, Rc<RefCell<Vec<&'static str>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let id = ui.create_widget(Recorder { log: log.clone() });
        ui.set_rect(id, rect);
        ui.add(id);
        (id, log)
    }

    #[test]
    fn test_hover_on_and_off() {
        let mut ui = ui();
        let (id, log) = recorder(&mut ui, Rect::new(10, 10, 50, 50));

        ui.mouse_move(Point::new(20, 20), Point::ZERO);
        assert!(ui.is_hovered(id));
        ui.mouse_move(Point::new(200, 200), Point::ZERO);
        assert!(!ui.is_hovered(id));
        assert_eq!(*log.borrow(), vec!["hover_on", "hover_off"]);
    }

    #[test]
    fn test_hidden_widget_loses_hover() {
        let mut ui = ui();
        let (id, _log) = recorder(&mut ui, Rect::new(10, 10, 50, 50));
        ui.mouse_move(Point::new(20, 20), Point::ZERO);
        ui.set_visible(id, false);
        ui.mouse_move(Point::new(21, 20), Point::ZERO);
        assert!(!ui.is_hovered(id));
    }

    #[test]
    fn test_overlap_flag_wins() {
        let mut ui = ui();
        let (a, _) = recorder(&mut ui, Rect::new(0, 0, 100, 100));
        let (b, _) = recorder(&mut ui, Rect::new(50, 50, 100, 100));
        ui.set_overlap(b, true);

        ui.mouse_move(Point::new(75, 75), Point::ZERO);
        assert!(!ui.is_hovered(a));
        assert!(ui.is_hovered(b));

        ui.mouse_move(Point::new(25, 25), Point::ZERO);
        assert!(ui.is_hovered(a));
        assert!(!ui.is_hovered(b));
    }

    #[test]
    fn test_lock_routes_exclusively() {
        let mut ui = ui();
        let (a, a_log) = recorder(&mut ui, Rect::new(0, 0, 50, 50));
        let (_b, b_log) = recorder(&mut ui, Rect::new(100, 0, 50, 50));

        ui.push_lock_input(a);
        ui.mouse_button_down(MouseButton::Left, Point::new(120, 10));
        assert_eq!(*a_log.borrow(), vec!["down"]);
        assert!(b_log.borrow().is_empty());
    }

    #[test]
    fn test_pop_only_top() {
        let mut ui = ui();
        let a = ui.create_container();
        let b = ui.create_container();
        ui.push_lock_input(a);
        ui.push_lock_input(b);
        ui.pop_lock_input(a);
        assert_eq!(ui.input_lock(), Some(b));
        ui.pop_lock_input(b);
        ui.pop_lock_input(a);
        assert_eq!(ui.input_lock(), None);
    }

    #[test]
    fn test_click_clears_focus_and_keys_need_visibility() {
        let mut ui = ui();
        let (id, log) = recorder(&mut ui, Rect::new(0, 0, 50, 50));
        ui.set_keyboard_focus(Some(id));
        ui.key_down(KeyCode::new(Key::Enter));
        assert_eq!(*log.borrow(), vec!["key"]);

        ui.set_visible(id, false);
        ui.key_down(KeyCode::new(Key::Enter));
        assert_eq!(log.borrow().len(), 1);

        ui.mouse_button_down(MouseButton::Left, Point::new(300, 300));
        assert_eq!(ui.keyboard_focus(), None);
    }

    #[test]
    fn test_modifier_latches() {
        let mut ui = ui();
        ui.key_down(KeyCode::new(Key::LeftShift));
        assert!(ui.is_shift_down());
        ui.key_down(KeyCode::new(Key::RightControl));
        assert!(ui.is_control_down());
        ui.key_up(KeyCode::new(Key::LeftShift));
        assert!(!ui.is_shift_down());
    }

    #[test]
    fn test_cursor_resets_on_move() {
        let mut ui = ui();
        ui.set_cursor(CursorShape::IBeam);
        ui.mouse_move(Point::new(1, 1), Point::ZERO);
        assert_eq!(ui.cursor(), CursorShape::Arrow);
    }
}
