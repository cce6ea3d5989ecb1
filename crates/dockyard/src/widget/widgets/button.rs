//! Button implementation.
//!
//! [`Button`] is the behavior behind every clickable widget: push buttons,
//! check boxes, radio buttons, tab buttons and menu bar buttons. The variants
//! differ in how they measure and draw ([`ButtonStyle`]) and in how a click
//! changes their set state ([`SetBehavior`]).
//!
//! # Events
//!
//! - [`EventKind::ButtonPressed`] when pressed
//! - [`EventKind::ButtonClicked`] when released over the button, carrying the
//!   new set state
//!
//! While pressed, a button holds the input lock so the release is delivered
//! even if the cursor has left it.
//!
//! # Example
//!
//! ```
//! use dockyard::{MainWindow, RecordingRenderer, Size};
//! use dockyard::widgets::{Button, SetBehavior};
//!
//! let mut ui = MainWindow::new(Box::new(RecordingRenderer::new()), Size::new(200, 100))?;
//! let toggle = Button::new("Bold")
//!     .with_set_behavior(SetBehavior::Toggle)
//!     .into_widget(&mut ui);
//! ui.add(toggle);
//! # Ok::<(), dockyard::DockyardError>(())
//! ```

use dockyard_core::{Border, Point, Rect, Size, WidgetId};

use crate::event::{Event, EventKind, Listener, MouseButton};
use crate::main_window::MainWindow;
use crate::widget::painting;
use crate::widget::{DrawContext, Widget, WidgetKind};

/// How a click changes a button's set state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SetBehavior {
    /// Never set; `is_set` is always false.
    #[default]
    Default,
    /// Each click flips the state.
    Toggle,
    /// The first click sets it; later clicks keep it set.
    Sticky,
}

/// How a button measures and paints itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonStyle {
    #[default]
    Push,
    /// Box followed by the label.
    Check,
    /// Round mark followed by the label.
    Radio,
    /// A tab of a [`TabBar`](super::TabBar).
    Tab,
    /// An entry of a [`MenuBar`](super::MenuBar).
    MenuBar,
}

/// A clickable button.
#[derive(Debug, Clone, Default)]
pub struct Button {
    label: String,
    style: ButtonStyle,
    set_behavior: SetBehavior,
    is_set: bool,
    pressed: bool,
    padding: Option<Border>,
    listeners: Vec<Listener>,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Create a detached push button.
    pub fn create(ui: &mut MainWindow, label: &str) -> WidgetId {
        Self::new(label).into_widget(ui)
    }

    pub fn with_style(mut self, style: ButtonStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_set_behavior(mut self, behavior: SetBehavior) -> Self {
        self.set_behavior = behavior;
        self
    }

    /// Override the configured padding.
    pub fn with_padding(mut self, padding: Border) -> Self {
        self.padding = Some(padding);
        self
    }

    /// Add an internal listener, run after the public handlers.
    pub fn with_listener(mut self, listener: Listener) -> Self {
        self.listeners.push(listener);
        self
    }

    /// Insert the button into `ui` as a detached widget.
    pub fn into_widget(self, ui: &mut MainWindow) -> WidgetId {
        let kind = match self.style {
            ButtonStyle::Check => WidgetKind::CheckBox,
            ButtonStyle::Radio => WidgetKind::RadioButton,
            ButtonStyle::MenuBar => WidgetKind::MenuBarButton,
            ButtonStyle::Push | ButtonStyle::Tab => WidgetKind::Button,
        };
        ui.create(kind, Box::new(self))
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn style(&self) -> ButtonStyle {
        self.style
    }

    #[inline]
    pub fn set_behavior(&self) -> SetBehavior {
        self.set_behavior
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.is_set
    }

    /// Whether the button is held down.
    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn set_label(ui: &mut MainWindow, id: WidgetId, label: &str) {
        if let Some(button) = ui.widget_mut::<Button>(id) {
            button.label = label.to_string();
            ui.resize_to_measured(id);
            ui.refresh_rect(id);
        }
    }

    pub fn set_set_behavior(ui: &mut MainWindow, id: WidgetId, behavior: SetBehavior) {
        if let Some(button) = ui.widget_mut::<Button>(id) {
            button.set_behavior = behavior;
        }
    }

    /// Set the state directly, without events.
    pub fn set_is_set(ui: &mut MainWindow, id: WidgetId, is_set: bool) {
        if let Some(button) = ui.widget_mut::<Button>(id) {
            button.is_set = is_set;
        }
    }

    pub fn add_listener(ui: &mut MainWindow, id: WidgetId, listener: Listener) {
        if let Some(button) = ui.widget_mut::<Button>(id) {
            button.listeners.push(listener);
        }
    }

    fn padding(&self, ui: &MainWindow) -> Border {
        self.padding.unwrap_or_else(|| ui.config().button_padding.into())
    }

    fn next_state(&self) -> bool {
        match self.set_behavior {
            SetBehavior::Default => false,
            SetBehavior::Toggle => !self.is_set,
            SetBehavior::Sticky => true,
        }
    }

    /// The square mark of a check or radio button, in absolute coordinates.
    fn mark_rect(&self, ui: &MainWindow, rect: Rect) -> Rect {
        let size = ui.config().check_box_size;
        Rect::new(rect.x, rect.y + (rect.h - size) / 2, size, size)
    }
}

impl Widget for Button {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn measure(&mut self, ui: &MainWindow, id: WidgetId) -> Size {
        let text = ui.text_size(id, &self.label);
        let padding = self.padding(ui);
        match self.style {
            ButtonStyle::Push => Size::new(
                text.w + padding.horizontal(),
                text.h + padding.vertical(),
            ),
            ButtonStyle::Tab => {
                let tab = ui.config().tab_padding;
                Size::new(text.w + tab * 2, text.h + padding.vertical())
            }
            ButtonStyle::MenuBar => {
                let menu = ui.config().menu_bar_padding;
                Size::new(text.w + menu * 2, text.h)
            }
            ButtonStyle::Check | ButtonStyle::Radio => {
                let mark = ui.config().check_box_size;
                Size::new(mark + padding.left + text.w, text.h.max(mark))
            }
        }
    }

    fn draw(&self, ui: &MainWindow, _id: WidgetId, ctx: &mut DrawContext<'_>) {
        let rect = ctx.rect();
        let hover = ctx.is_hovered();
        match self.style {
            ButtonStyle::Push | ButtonStyle::Tab => {
                let down = self.pressed || self.is_set;
                painting::panel(ctx, rect, painting::face(hover, down));
                ctx.draw_text_centered(&self.label, rect, painting::TEXT);
            }
            ButtonStyle::MenuBar => {
                if hover || self.pressed {
                    ctx.fill_rect(rect, painting::face(hover, self.pressed));
                }
                ctx.draw_text_centered(&self.label, rect, painting::TEXT);
            }
            ButtonStyle::Check | ButtonStyle::Radio => {
                let mark = self.mark_rect(ui, rect);
                painting::panel(ctx, mark, painting::FIELD);
                if self.is_set {
                    let inset = (mark.w / 4).max(1);
                    let dot = Rect::new(
                        mark.x + inset,
                        mark.y + inset,
                        mark.w - inset * 2,
                        mark.h - inset * 2,
                    );
                    ctx.fill_rect(dot, painting::SELECTION);
                }
                let text_x = mark.right() + self.padding(ui).left;
                let text_rect = Rect::new(text_x, rect.y, rect.right() - text_x, rect.h);
                ctx.draw_text_left(&self.label, text_rect, painting::TEXT);
            }
        }
    }

    fn added(&mut self, ui: &mut MainWindow, id: WidgetId, parent: WidgetId) {
        if self.style == ButtonStyle::Radio && !has_radio_sibling(ui, id, parent) {
            self.is_set = true;
        }
    }

    fn mouse_button_down(&mut self, ui: &mut MainWindow, id: WidgetId, button: MouseButton, _pos: Point) {
        if button != MouseButton::Left || self.pressed {
            return;
        }
        self.pressed = true;
        ui.push_lock_input(id);
        ui.emit(Event::new(id, EventKind::ButtonPressed), &self.listeners);
    }

    fn mouse_button_up(&mut self, ui: &mut MainWindow, id: WidgetId, button: MouseButton, pos: Point) {
        if button != MouseButton::Left || !self.pressed {
            return;
        }
        self.pressed = false;
        ui.pop_lock_input(id);
        if !ui.absolute_rect(id).contains(pos) {
            return;
        }

        self.is_set = self.next_state();
        if self.style == ButtonStyle::Radio && self.is_set {
            clear_radio_siblings(ui, id);
        }
        ui.emit(
            Event::new(id, EventKind::ButtonClicked { is_set: self.is_set }),
            &self.listeners,
        );
    }
}

fn radio_siblings(ui: &MainWindow, id: WidgetId, parent: WidgetId) -> Vec<WidgetId> {
    ui.children(parent)
        .iter()
        .copied()
        .filter(|&c| c != id && ui.kind(c) == Some(WidgetKind::RadioButton))
        .collect()
}

fn has_radio_sibling(ui: &MainWindow, id: WidgetId, parent: WidgetId) -> bool {
    !radio_siblings(ui, id, parent).is_empty()
}

fn clear_radio_siblings(ui: &mut MainWindow, id: WidgetId) {
    let Some(parent) = ui.parent(id) else {
        return;
    };
    for sibling in radio_siblings(ui, id, parent) {
        Button::set_is_set(ui, sibling, false);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use dockyard_render::RecordingRenderer;

    use super::*;

    fn ui() -> MainWindow {
        MainWindow::new(Box::new(RecordingRenderer::new()), Size::new(300, 200))
            .expect("recording renderer never fails")
    }

    fn click(ui: &mut MainWindow, pos: Point) {
        ui.mouse_move(pos, Point::ZERO);
        ui.mouse_button_down(MouseButton::Left, pos);
        ui.mouse_button_up(MouseButton::Left, pos);
    }

    #[test]
    fn test_measure_adds_padding() {
        let mut ui = ui();
        let id = Button::create(&mut ui, "OK");
        ui.add(id);
        // 2 graphemes * 7 + 16, 18 + 8
        assert_eq!(ui.rect(id).size(), Size::new(30, 26));
    }

    #[test]
    fn test_press_locks_input() {
        let mut ui = ui();
        let id = Button::create(&mut ui, "OK");
        ui.add(id);
        ui.mouse_move(Point::new(5, 5), Point::ZERO);
        ui.mouse_button_down(MouseButton::Left, Point::new(5, 5));
        assert_eq!(ui.input_lock(), Some(id));
        assert!(ui.widget::<Button>(id).is_some_and(|b| b.is_pressed()));

        ui.mouse_button_up(MouseButton::Left, Point::new(250, 150));
        assert_eq!(ui.input_lock(), None);
    }

    #[test]
    fn test_release_outside_does_not_click() {
        let mut ui = ui();
        let id = Button::new("OK")
            .with_set_behavior(SetBehavior::Toggle)
            .into_widget(&mut ui);
        ui.add(id);
        let clicks = Rc::new(RefCell::new(0));
        let c = clicks.clone();
        ui.connect(id, move |e| {
            if matches!(e.kind, EventKind::ButtonClicked { .. }) {
                *c.borrow_mut() += 1;
            }
        });

        ui.mouse_move(Point::new(5, 5), Point::ZERO);
        ui.mouse_button_down(MouseButton::Left, Point::new(5, 5));
        ui.mouse_move(Point::new(200, 150), Point::new(195, 145));
        ui.mouse_button_up(MouseButton::Left, Point::new(200, 150));

        assert_eq!(*clicks.borrow(), 0);
        assert!(ui.widget::<Button>(id).is_some_and(|b| !b.is_set()));
    }

    #[test]
    fn test_radio_group() {
        let mut ui = ui();
        let group = ui.create_container();
        ui.set_rect(group, Rect::new(0, 0, 300, 200));
        ui.add(group);
        let a = Button::new("a")
            .with_style(ButtonStyle::Radio)
            .with_set_behavior(SetBehavior::Sticky)
            .into_widget(&mut ui);
        let b = Button::new("b")
            .with_style(ButtonStyle::Radio)
            .with_set_behavior(SetBehavior::Sticky)
            .into_widget(&mut ui);
        ui.add_child(group, a);
        ui.add_child(group, b);
        ui.set_position(b, Point::new(0, 50));

        let is_set = |ui: &MainWindow, id| ui.widget::<Button>(id).is_some_and(|b| b.is_set());
        assert!(is_set(&ui, a));
        assert!(!is_set(&ui, b));

        click(&mut ui, Point::new(5, 55));
        assert!(!is_set(&ui, a));
        assert!(is_set(&ui, b));
    }
}
