//! List widget implementation.
//!
//! A [`List`] shows rows of text, one line-height (plus padding) tall each,
//! and keeps at most one row selected. When the rows do not fit, a vertical
//! [`Scroller`] appears along the right edge; its value is the index of the
//! first shown row.
//!
//! The same widget backs the dropdown of a [`Combo`](super::Combo). In that
//! mode it holds the input lock while open, so a click outside it closes the
//! combo instead of reaching whatever lies below.

use dockyard_core::{Point, Rect, Size, WidgetId};

use super::combo_box::Combo;
use super::scroller::Scroller;
use crate::event::{Event, EventKind, Listener, MouseButton};
use crate::main_window::MainWindow;
use crate::widget::layout::Orientation;
use crate::widget::painting;
use crate::widget::{Align, DrawContext, Stretch, Widget, WidgetKind};

/// A list of selectable text rows.
#[derive(Debug, Clone, Default)]
pub struct List {
    items: Vec<String>,
    selected: Option<usize>,
    hover_item: Option<usize>,
    first_visible: usize,
    scroller: Option<WidgetId>,
    dropdown: bool,
    listeners: Vec<Listener>,
}

impl List {
    /// Create a detached, empty list.
    pub fn create(ui: &mut MainWindow) -> WidgetId {
        Self::create_inner(ui, false, Vec::new())
    }

    /// Create the dropdown list of a combo.
    pub(crate) fn create_dropdown(ui: &mut MainWindow, listener: Listener) -> WidgetId {
        Self::create_inner(ui, true, vec![listener])
    }

    fn create_inner(ui: &mut MainWindow, dropdown: bool, listeners: Vec<Listener>) -> WidgetId {
        let list = List {
            dropdown,
            listeners,
            ..List::default()
        };
        let id = ui.create(WidgetKind::List, Box::new(list));

        let scroller = Scroller::create_with_listener(ui, Orientation::Vertical, Some(list_scrolled));
        ui.set_stretch(scroller, Stretch::HEIGHT);
        ui.set_align(scroller, Align::RIGHT);
        ui.add_child(id, scroller);
        ui.store_visible(scroller, false);

        if let Some(this) = ui.widget_mut::<List>(id) {
            this.scroller = Some(scroller);
        }
        id
    }

    pub fn add_listener(ui: &mut MainWindow, id: WidgetId, listener: Listener) {
        if let Some(this) = ui.widget_mut::<List>(id) {
            this.listeners.push(listener);
        }
    }

    pub fn add_item(ui: &mut MainWindow, id: WidgetId, text: &str) {
        if let Some(this) = ui.widget_mut::<List>(id) {
            this.items.push(text.to_string());
            ui.resize_to_measured(id);
            ui.relayout_subtree(id);
        }
    }

    /// Remove every row and the selection.
    pub fn clear(ui: &mut MainWindow, id: WidgetId) {
        if let Some(this) = ui.widget_mut::<List>(id) {
            this.items.clear();
            this.selected = None;
            this.hover_item = None;
            this.first_visible = 0;
            ui.resize_to_measured(id);
            ui.relayout_subtree(id);
        }
    }

    pub fn items(ui: &MainWindow, id: WidgetId) -> &[String] {
        match ui.widget::<List>(id) {
            Some(this) => &this.items,
            None => &[],
        }
    }

    pub fn selected(ui: &MainWindow, id: WidgetId) -> Option<usize> {
        ui.widget::<List>(id).and_then(|l| l.selected)
    }

    pub fn hover_item(ui: &MainWindow, id: WidgetId) -> Option<usize> {
        ui.widget::<List>(id).and_then(|l| l.hover_item)
    }

    /// Index of the first shown row.
    pub fn first_visible(ui: &MainWindow, id: WidgetId) -> usize {
        ui.widget::<List>(id).map_or(0, |l| l.first_visible)
    }

    pub fn scroller(ui: &MainWindow, id: WidgetId) -> Option<WidgetId> {
        ui.widget::<List>(id).and_then(|l| l.scroller)
    }

    /// Select a row and fire `ListItemSelected`.
    pub fn select_item(ui: &mut MainWindow, id: WidgetId, index: usize) {
        let Some(this) = ui.widget_mut::<List>(id) else {
            return;
        };
        if index >= this.items.len() {
            return;
        }
        this.selected = Some(index);
        let listeners = this.listeners.clone();
        ui.emit(Event::new(id, EventKind::ListItemSelected { index }), &listeners);
    }

    /// Height of the dropdown: all rows up to the configured maximum.
    pub(crate) fn dropdown_height(ui: &MainWindow, id: WidgetId) -> i32 {
        let rows = Self::items(ui, id).len().min(ui.config().list_max_dropdown_items);
        item_height(ui, id) * rows as i32
    }

    fn visible_scroller(&self, ui: &MainWindow) -> Option<WidgetId> {
        self.scroller.filter(|&s| !ui.is_hidden(s))
    }

    fn over_scroller(&self, ui: &MainWindow, pos: Point) -> bool {
        self.visible_scroller(ui)
            .is_some_and(|s| ui.absolute_rect(s).contains(pos))
    }

    /// The row under `pos`, if any.
    fn row_at(&self, ui: &MainWindow, id: WidgetId, pos: Point) -> Option<usize> {
        let abs = ui.absolute_rect(id);
        let ih = item_height(ui, id);
        if ih <= 0 || !abs.contains(pos) || self.over_scroller(ui, pos) {
            return None;
        }
        let row = ((pos.y - abs.y) / ih) as usize + self.first_visible;
        (row < self.items.len()).then_some(row)
    }

    fn select(&mut self, ui: &mut MainWindow, id: WidgetId, index: usize) {
        self.selected = Some(index);
        let listeners = self.listeners.clone();
        ui.emit(Event::new(id, EventKind::ListItemSelected { index }), &listeners);
    }

    /// Pick up a scroller change made while this list's callback runs.
    fn sync_from_scroller(&mut self, ui: &MainWindow) {
        if let Some(scroller) = self.scroller {
            self.first_visible = Scroller::value(ui, scroller).max(0) as usize;
        }
    }
}

fn item_height(ui: &MainWindow, id: WidgetId) -> i32 {
    ui.line_height(id) + 2 * ui.config().list_item_padding
}

/// Show the scroller if the rows overflow and clamp `first_visible`.
fn sync_scroller(
    ui: &mut MainWindow,
    id: WidgetId,
    scroller: WidgetId,
    len: usize,
    first_visible: usize,
) -> usize {
    let ih = item_height(ui, id);
    let rows = if ih > 0 { (ui.rect(id).h / ih).max(0) as usize } else { 0 };

    if rows > 0 && len > rows {
        let max = len - rows;
        let first = first_visible.min(max);
        ui.set_visible(scroller, true);
        Scroller::set_max_value(ui, scroller, max as i32);
        Scroller::set_nub_scale(ui, scroller, rows as f32 / len as f32);
        Scroller::set_value(ui, scroller, first as i32);
        first
    } else {
        ui.set_visible(scroller, false);
        Scroller::set_max_value(ui, scroller, 0);
        0
    }
}

/// Listener on the list's scroller.
fn list_scrolled(ui: &mut MainWindow, event: &Event) {
    let EventKind::ScrollerValueChanged { value, .. } = event.kind else {
        return;
    };
    let Some(list) = ui.parent(event.source) else {
        return;
    };
    if let Some(this) = ui.widget_mut::<List>(list) {
        this.first_visible = value.max(0) as usize;
    }
}

impl Widget for List {
    fn measure(&mut self, ui: &MainWindow, id: WidgetId) -> Size {
        let pad = ui.config().list_item_padding;
        let text_w = self
            .items
            .iter()
            .map(|item| ui.text_size(id, item).w)
            .max()
            .unwrap_or(0);
        let max_rows = ui.config().list_max_dropdown_items;
        let rows = if self.dropdown {
            self.items.len().min(max_rows)
        } else {
            self.items.len()
        };
        let scroll_w = if self.dropdown && self.items.len() > max_rows {
            ui.config().scroll_button_size
        } else {
            0
        };
        Size::new(text_w + 2 * pad + scroll_w, item_height(ui, id) * rows as i32)
    }

    fn set_rect(&mut self, ui: &mut MainWindow, id: WidgetId, rect: Rect) {
        ui.store_rect(id, rect);
        if let Some(scroller) = self.scroller {
            self.first_visible = sync_scroller(ui, id, scroller, self.items.len(), self.first_visible);
        }
    }

    fn draw(&self, ui: &MainWindow, id: WidgetId, ctx: &mut DrawContext<'_>) {
        let rect = ctx.rect();
        painting::panel(ctx, rect, painting::FIELD);

        let ih = item_height(ui, id);
        if ih <= 0 {
            return;
        }
        let pad = ui.config().list_item_padding;
        let width = match self.visible_scroller(ui) {
            Some(s) => rect.w - ui.rect(s).w,
            None => rect.w,
        };
        for (row, item) in self.items.iter().enumerate().skip(self.first_visible) {
            let y = rect.y + (row - self.first_visible) as i32 * ih;
            if y >= rect.bottom() {
                break;
            }
            let row_rect = Rect::new(rect.x, y, width, ih);
            let color = if self.selected == Some(row) {
                ctx.fill_rect(row_rect, painting::SELECTION);
                painting::SELECTED_TEXT
            } else {
                if self.hover_item == Some(row) {
                    ctx.fill_rect(row_rect, painting::FACE_HOVER);
                }
                painting::TEXT
            };
            ctx.draw_text(item, Point::new(rect.x + pad, y + pad), color);
        }
    }

    fn mouse_move(&mut self, ui: &mut MainWindow, id: WidgetId, pos: Point, _delta: Point) {
        self.hover_item = self.row_at(ui, id, pos);
    }

    fn mouse_hover_off(&mut self, _ui: &mut MainWindow, _id: WidgetId) {
        self.hover_item = None;
    }

    fn mouse_button_down(&mut self, ui: &mut MainWindow, id: WidgetId, button: MouseButton, pos: Point) {
        if self.dropdown && !ui.absolute_rect(id).contains(pos) {
            if let Some(combo) = ui.parent(id) {
                Combo::close(ui, combo);
            }
            return;
        }
        if self.over_scroller(ui, pos) {
            // Locked dropdowns receive clicks first; hand them to the scroller.
            if self.dropdown {
                ui.forward_button(id, button, true, pos);
                self.sync_from_scroller(ui);
            }
            return;
        }
        if button != MouseButton::Left {
            return;
        }
        if let Some(row) = self.row_at(ui, id, pos) {
            self.select(ui, id, row);
        }
    }

    fn mouse_wheel_move(&mut self, ui: &mut MainWindow, _id: WidgetId, pos: Point, delta: Point) {
        let Some(scroller) = self.visible_scroller(ui) else {
            return;
        };
        if !self.dropdown && self.over_scroller(ui, pos) {
            return;
        }
        Scroller::set_value(ui, scroller, self.first_visible as i32 - delta.y);
        self.sync_from_scroller(ui);
    }

    fn children_clip_rect(&self, ui: &MainWindow, id: WidgetId) -> Option<Rect> {
        Some(ui.absolute_rect(id))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use dockyard_render::{DrawCommand, RecordingRenderer};

    use super::*;

    /// A list 100 wide and four rows (22px each) tall.
    fn setup(items: usize) -> (MainWindow, WidgetId) {
        let mut ui = MainWindow::new(Box::new(RecordingRenderer::new()), Size::new(300, 300))
            .expect("recording renderer never fails");
        let id = List::create(&mut ui);
        ui.set_rect(id, Rect::new(0, 0, 100, 88));
        ui.add(id);
        for i in 0..items {
            List::add_item(&mut ui, id, &format!("item {i}"));
        }
        (ui, id)
    }

    fn click(ui: &mut MainWindow, pos: Point) {
        ui.mouse_move(pos, Point::ZERO);
        ui.mouse_button_down(MouseButton::Left, pos);
        ui.mouse_button_up(MouseButton::Left, pos);
    }

    #[test]
    fn test_click_selects_row() {
        let (mut ui, id) = setup(3);
        let selected = Rc::new(RefCell::new(Vec::new()));
        let sink = selected.clone();
        ui.connect(id, move |e| {
            if let EventKind::ListItemSelected { index } = e.kind {
                sink.borrow_mut().push(index);
            }
        });

        click(&mut ui, Point::new(10, 30));
        assert_eq!(List::selected(&ui, id), Some(1));
        // below the last row
        click(&mut ui, Point::new(10, 80));
        assert_eq!(*selected.borrow(), vec![1]);
    }

    #[test]
    fn test_hover_item_tracks_mouse() {
        let (mut ui, id) = setup(3);
        ui.mouse_move(Point::new(10, 50), Point::ZERO);
        assert_eq!(List::hover_item(&ui, id), Some(2));
        ui.mouse_move(Point::new(200, 200), Point::ZERO);
        assert_eq!(List::hover_item(&ui, id), None);
    }

    #[test]
    fn test_scroller_appears_on_overflow() {
        let (ui, id) = setup(4);
        let scroller = List::scroller(&ui, id).expect("list has a scroller");
        assert!(ui.is_hidden(scroller));

        let (mut ui, id) = setup(10);
        let scroller = List::scroller(&ui, id).expect("list has a scroller");
        assert!(!ui.is_hidden(scroller));
        assert_eq!(Scroller::max_value(&ui, scroller), 6);
        assert_eq!(ui.rect(scroller), Rect::new(84, 0, 16, 88));

        Scroller::set_value(&mut ui, scroller, 3);
        assert_eq!(List::first_visible(&ui, id), 3);
        click(&mut ui, Point::new(10, 5));
        assert_eq!(List::selected(&ui, id), Some(3));
    }

    #[test]
    fn test_wheel_scrolls() {
        let (mut ui, id) = setup(10);
        ui.mouse_move(Point::new(10, 10), Point::ZERO);
        ui.mouse_wheel_move(Point::new(0, -2));
        assert_eq!(List::first_visible(&ui, id), 2);
        ui.mouse_wheel_move(Point::new(0, -20));
        assert_eq!(List::first_visible(&ui, id), 6);
    }

    #[test]
    fn test_rows_draw_one_item_height_apart() {
        let renderer = RecordingRenderer::new();
        let log = renderer.log();
        let mut ui = MainWindow::new(Box::new(renderer), Size::new(300, 300))
            .expect("recording renderer never fails");
        let id = List::create(&mut ui);
        ui.set_rect(id, Rect::new(10, 20, 100, 88));
        ui.add(id);
        for item in ["alpha", "beta", "gamma"] {
            List::add_item(&mut ui, id, item);
        }

        ui.draw();
        let rows: Vec<(String, Point)> = log
            .commands()
            .into_iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, origin, .. } => Some((text, origin)),
                _ => None,
            })
            .collect();
        assert_eq!(
            rows,
            vec![
                ("alpha".to_string(), Point::new(12, 22)),
                ("beta".to_string(), Point::new(12, 44)),
                ("gamma".to_string(), Point::new(12, 66)),
            ]
        );
    }

    #[test]
    fn test_clear_hides_scroller() {
        let (mut ui, id) = setup(10);
        List::clear(&mut ui, id);
        let scroller = List::scroller(&ui, id).expect("list has a scroller");
        assert!(ui.is_hidden(scroller));
        assert!(List::items(&ui, id).is_empty());
        assert_eq!(List::selected(&ui, id), None);
    }
}
