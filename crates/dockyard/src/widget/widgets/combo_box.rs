//! Combo box widget implementation.
//!
//! A [`Combo`] shows its selected item and opens a dropdown [`List`] below
//! itself when clicked. While open, the dropdown holds the input lock: a
//! click on a row selects it and closes the dropdown, a click anywhere else
//! only closes it.
//!
//! Open dropdowns are painted after every window, so they are never covered.

use dockyard_core::logging::targets;
use dockyard_core::{Point, Rect, Size, WidgetId};

use super::list::List;
use crate::event::{Event, EventKind, Listener, MouseButton};
use crate::main_window::MainWindow;
use crate::widget::painting;
use crate::widget::{DrawContext, Widget, WidgetKind};

/// A dropdown selector.
#[derive(Debug, Clone, Default)]
pub struct Combo {
    list: Option<WidgetId>,
    /// Rows in the dropdown. Kept here because the list's own state is
    /// unreachable while its click callback is running.
    item_count: usize,
    open: bool,
    selected: Option<usize>,
    listeners: Vec<Listener>,
}

impl Combo {
    pub fn create(ui: &mut MainWindow) -> WidgetId {
        let id = ui.create(WidgetKind::Combo, Box::new(Combo::default()));

        let list = List::create_dropdown(ui, dropdown_selected);
        ui.set_input_not_clipped_to_parent(list, true);
        ui.add_child(id, list);
        ui.store_visible(list, false);

        if let Some(this) = ui.widget_mut::<Combo>(id) {
            this.list = Some(list);
        }
        id
    }

    pub fn add_listener(ui: &mut MainWindow, id: WidgetId, listener: Listener) {
        if let Some(this) = ui.widget_mut::<Combo>(id) {
            this.listeners.push(listener);
        }
    }

    pub fn add_item(ui: &mut MainWindow, id: WidgetId, text: &str) {
        let Some(list) = Self::list(ui, id) else {
            return;
        };
        List::add_item(ui, list, text);
        if let Some(this) = ui.widget_mut::<Combo>(id) {
            this.item_count += 1;
        }
        ui.resize_to_measured(id);
        ui.relayout_subtree(id);
    }

    pub fn clear(ui: &mut MainWindow, id: WidgetId) {
        let Some(list) = Self::list(ui, id) else {
            return;
        };
        List::clear(ui, list);
        if let Some(this) = ui.widget_mut::<Combo>(id) {
            this.selected = None;
            this.item_count = 0;
        }
        ui.relayout_subtree(id);
    }

    /// The dropdown list.
    pub fn list(ui: &MainWindow, id: WidgetId) -> Option<WidgetId> {
        ui.widget::<Combo>(id).and_then(|c| c.list).or_else(|| {
            ui.children(id)
                .iter()
                .copied()
                .find(|&c| ui.kind(c) == Some(WidgetKind::List))
        })
    }

    pub fn selected(ui: &MainWindow, id: WidgetId) -> Option<usize> {
        ui.widget::<Combo>(id).and_then(|c| c.selected)
    }

    /// Text of the selected item.
    pub fn selected_text(ui: &MainWindow, id: WidgetId) -> Option<&str> {
        let index = Self::selected(ui, id)?;
        let list = Self::list(ui, id)?;
        List::items(ui, list).get(index).map(String::as_str)
    }

    pub fn is_open(ui: &MainWindow, id: WidgetId) -> bool {
        ui.widget::<Combo>(id).is_some_and(|c| c.open)
    }

    /// Select an item and fire `ListItemSelected` from the combo.
    ///
    /// Out-of-range indices are ignored.
    pub fn select(ui: &mut MainWindow, id: WidgetId, index: usize) {
        let Some(this) = ui.widget_mut::<Combo>(id) else {
            return;
        };
        if index >= this.item_count {
            tracing::debug!(target: targets::INPUT, combo = ?id, index, "selection out of range");
            return;
        }
        this.selected = Some(index);
        let listeners = this.listeners.clone();
        ui.emit(Event::new(id, EventKind::ListItemSelected { index }), &listeners);
    }

    /// Hide the dropdown and release its input lock.
    pub fn close(ui: &mut MainWindow, id: WidgetId) {
        let Some(list) = Self::list(ui, id) else {
            return;
        };
        ui.set_visible(list, false);
        ui.pop_lock_input(list);
        if let Some(this) = ui.widget_mut::<Combo>(id) {
            this.open = false;
        }
        tracing::trace!(target: targets::INPUT, combo = ?id, "dropdown closed");
    }
}

/// Listener on the dropdown list.
fn dropdown_selected(ui: &mut MainWindow, event: &Event) {
    let EventKind::ListItemSelected { index } = event.kind else {
        return;
    };
    let Some(combo) = ui.parent(event.source) else {
        return;
    };
    Combo::close(ui, combo);
    Combo::select(ui, combo, index);
}

impl Widget for Combo {
    fn label(&self) -> String {
        format!("Combo(selected={:?}, items={})", self.selected, self.item_count)
    }

    fn measure(&mut self, ui: &MainWindow, id: WidgetId) -> Size {
        let pad = ui.config().list_item_padding;
        let text_w = self
            .list
            .map(|list| {
                List::items(ui, list)
                    .iter()
                    .map(|item| ui.text_size(id, item).w)
                    .max()
                    .unwrap_or(0)
            })
            .unwrap_or(0);
        Size::new(
            text_w + 2 * pad + ui.config().scroll_button_size,
            ui.line_height(id) + 2 * pad,
        )
    }

    fn set_rect(&mut self, ui: &mut MainWindow, id: WidgetId, rect: Rect) {
        ui.store_rect(id, rect);
        if let Some(list) = self.list {
            let height = List::dropdown_height(ui, list);
            ui.set_rect(list, Rect::new(0, rect.h, rect.w, height));
        }
    }

    fn draw(&self, ui: &MainWindow, _id: WidgetId, ctx: &mut DrawContext<'_>) {
        let rect = ctx.rect();
        let fill = if ctx.is_hovered() || self.open {
            painting::FACE_HOVER
        } else {
            painting::FIELD
        };
        painting::panel(ctx, rect, fill);

        let arrow_w = ui.config().scroll_button_size.min(rect.w);
        let arrow = Rect::new(rect.right() - arrow_w, rect.y, arrow_w, rect.h);
        painting::panel(ctx, arrow, painting::FACE);
        ctx.draw_text_centered("v", arrow, painting::TEXT);

        let text = self
            .list
            .zip(self.selected)
            .and_then(|(list, index)| List::items(ui, list).get(index));
        if let Some(text) = text {
            let pad = ui.config().list_item_padding;
            let text_rect = Rect::new(rect.x + pad, rect.y, rect.w - arrow_w - pad, rect.h);
            ctx.draw_text_left(text, text_rect, painting::TEXT);
        }
    }

    fn mouse_button_down(&mut self, ui: &mut MainWindow, id: WidgetId, button: MouseButton, _pos: Point) {
        if button != MouseButton::Left || self.open {
            return;
        }
        let Some(list) = self.list else {
            return;
        };
        if self.item_count == 0 {
            return;
        }
        self.open = true;
        ui.set_visible(list, true);
        ui.push_lock_input(list);
        tracing::trace!(target: targets::INPUT, combo = ?id, "dropdown opened");
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use dockyard_render::{DrawLog, RecordingRenderer};

    use super::*;
    use crate::widgets::Window;

    fn setup_logged() -> (MainWindow, WidgetId, DrawLog) {
        let renderer = RecordingRenderer::new();
        let log = renderer.log();
        let mut ui = MainWindow::new(Box::new(renderer), Size::new(300, 300))
            .expect("recording renderer never fails");
        let id = Combo::create(&mut ui);
        ui.set_rect(id, Rect::new(10, 10, 100, 22));
        ui.add(id);
        for item in ["red", "green", "blue"] {
            Combo::add_item(&mut ui, id, item);
        }
        (ui, id, log)
    }

    fn setup() -> (MainWindow, WidgetId) {
        let (ui, id, _log) = setup_logged();
        (ui, id)
    }

    fn click(ui: &mut MainWindow, pos: Point) {
        ui.mouse_move(pos, Point::ZERO);
        ui.mouse_button_down(MouseButton::Left, pos);
        ui.mouse_button_up(MouseButton::Left, pos);
    }

    #[test]
    fn test_open_locks_dropdown() {
        let (mut ui, id) = setup();
        let list = Combo::list(&ui, id).expect("combo owns a list");
        assert!(ui.is_hidden(list));

        click(&mut ui, Point::new(20, 20));
        assert!(Combo::is_open(&ui, id));
        assert!(!ui.is_hidden(list));
        assert_eq!(ui.input_lock(), Some(list));
        assert_eq!(ui.absolute_rect(list), Rect::new(10, 32, 100, 66));
    }

    #[test]
    fn test_pick_item_closes_and_fires() {
        let (mut ui, id) = setup();
        let picked = Rc::new(RefCell::new(Vec::new()));
        let sink = picked.clone();
        ui.connect(id, move |e| sink.borrow_mut().push(e.kind.clone()));

        click(&mut ui, Point::new(20, 20));
        click(&mut ui, Point::new(20, 59));

        assert!(!Combo::is_open(&ui, id));
        assert_eq!(ui.input_lock(), None);
        assert_eq!(Combo::selected(&ui, id), Some(1));
        assert_eq!(Combo::selected_text(&ui, id), Some("green"));
        assert_eq!(*picked.borrow(), vec![EventKind::ListItemSelected { index: 1 }]);
    }

    #[test]
    fn test_select_ignores_out_of_range() {
        let (mut ui, id) = setup();
        Combo::select(&mut ui, id, 3);
        assert_eq!(Combo::selected(&ui, id), None);
        Combo::select(&mut ui, id, 2);
        assert_eq!(Combo::selected_text(&ui, id), Some("blue"));

        Combo::clear(&mut ui, id);
        Combo::select(&mut ui, id, 0);
        assert_eq!(Combo::selected(&ui, id), None);
    }

    #[test]
    fn test_click_outside_only_closes() {
        let (mut ui, id) = setup();
        click(&mut ui, Point::new(20, 20));
        click(&mut ui, Point::new(250, 250));
        assert!(!Combo::is_open(&ui, id));
        assert_eq!(Combo::selected(&ui, id), None);
        assert_eq!(ui.input_lock(), None);
    }

    #[test]
    fn test_open_dropdown_draws_last() {
        let (mut ui, id, log) = setup_logged();
        let window = Window::create(&mut ui, "Over");
        ui.set_rect(window, Rect::new(0, 40, 200, 100));
        ui.add(window);

        click(&mut ui, Point::new(20, 20));
        assert!(Combo::is_open(&ui, id));
        ui.draw();

        let texts = log.texts();
        assert_eq!(texts.last().map(String::as_str), Some("blue"));
        let title_at = texts.iter().position(|t| t == "Over").expect("window title drawn");
        let red_at = texts.iter().rposition(|t| t == "red").expect("dropdown drawn");
        assert!(title_at < red_at);
    }
}
