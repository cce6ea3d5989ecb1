//! TabBar widget implementation.
//!
//! A [`TabBar`] holds a row of tab buttons, exactly one of which is selected
//! once any exist. When the tabs are wider than the bar, two scroll buttons
//! appear at its right end and the row scrolls by whole tabs.
//!
//! # Events
//!
//! The bar itself is the source of:
//!
//! - [`EventKind::TabAdded`]
//! - [`EventKind::TabRemoved`]
//! - [`EventKind::TabChanged`] when the selection moves
//!
//! # Example
//!
//! ```
//! use dockyard::{EventKind, MainWindow, Rect, RecordingRenderer, Size};
//! use dockyard::widgets::TabBar;
//!
//! let mut ui = MainWindow::new(Box::new(RecordingRenderer::new()), Size::new(400, 300))?;
//! let bar = TabBar::create(&mut ui);
//! ui.set_rect(bar, Rect::new(0, 0, 400, 24));
//! ui.add(bar);
//!
//! ui.connect(bar, |event| {
//!     if let EventKind::TabChanged { index, .. } = event.kind {
//!         println!("tab {index}");
//!     }
//! });
//! TabBar::add_tab(&mut ui, bar, "Home");
//! TabBar::add_tab(&mut ui, bar, "Settings");
//! TabBar::select_tab(&mut ui, bar, 1);
//! assert_eq!(TabBar::selected(&ui, bar), Some(1));
//! # Ok::<(), dockyard::DockyardError>(())
//! ```

use dockyard_core::logging::targets;
use dockyard_core::{Border, Rect, Size, WidgetId};

use super::button::{Button, ButtonStyle, SetBehavior};
use crate::event::{Event, EventKind, Listener};
use crate::main_window::MainWindow;
use crate::widget::painting;
use crate::widget::{DrawContext, Widget, WidgetKind};

/// A row of selectable tabs.
#[derive(Debug, Clone, Default)]
pub struct TabBar {
    tabs: Vec<WidgetId>,
    selected: Option<usize>,
    /// Index of the first shown tab.
    scroll_offset: usize,
    scroll_left: Option<WidgetId>,
    scroll_right: Option<WidgetId>,
    listeners: Vec<Listener>,
}

impl TabBar {
    /// Create a detached, empty tab bar.
    pub fn create(ui: &mut MainWindow) -> WidgetId {
        let id = ui.create(WidgetKind::TabBar, Box::new(TabBar::default()));
        let left = scroll_button(ui, id, "<");
        let right = scroll_button(ui, id, ">");
        if let Some(bar) = ui.widget_mut::<TabBar>(id) {
            bar.scroll_left = Some(left);
            bar.scroll_right = Some(right);
        }
        id
    }

    /// Add an internal listener for the bar's events.
    pub fn add_listener(ui: &mut MainWindow, bar: WidgetId, listener: Listener) {
        if let Some(this) = ui.widget_mut::<TabBar>(bar) {
            this.listeners.push(listener);
        }
    }

    /// Append a tab. The first tab of an empty bar becomes selected.
    pub fn add_tab(ui: &mut MainWindow, bar: WidgetId, label: &str) -> Option<WidgetId> {
        ui.widget::<TabBar>(bar)?;
        let tab = Button::new(label)
            .with_style(ButtonStyle::Tab)
            .with_set_behavior(SetBehavior::Sticky)
            .with_listener(tab_clicked)
            .into_widget(ui);
        ui.add_child(bar, tab);

        let this = ui.widget_mut::<TabBar>(bar)?;
        this.tabs.push(tab);
        let index = this.tabs.len() - 1;
        let needs_selection = this.selected.is_none();

        emit(ui, bar, EventKind::TabAdded { index, tab });
        if needs_selection {
            Self::select_tab(ui, bar, index);
        }
        relayout(ui, bar);
        Some(tab)
    }

    /// Remove and destroy the tab at `index`. A removed selected tab passes
    /// the selection to its neighbour.
    pub fn remove_tab(ui: &mut MainWindow, bar: WidgetId, index: usize) -> bool {
        let Some(this) = ui.widget_mut::<TabBar>(bar) else {
            return false;
        };
        if index >= this.tabs.len() {
            tracing::trace!(target: targets::TREE, ?bar, index, "no such tab");
            return false;
        }
        let tab = this.tabs.remove(index);
        let remaining = this.tabs.len();
        let reselect = match this.selected {
            Some(s) if s == index => {
                this.selected = None;
                (remaining > 0).then(|| index.min(remaining - 1))
            }
            Some(s) if s > index => {
                this.selected = Some(s - 1);
                None
            }
            _ => None,
        };

        ui.destroy_child(bar, tab);
        emit(ui, bar, EventKind::TabRemoved { index, tab });
        if let Some(next) = reselect {
            Self::select_tab(ui, bar, next);
        }
        relayout(ui, bar);
        true
    }

    /// Remove every tab.
    pub fn clear_tabs(ui: &mut MainWindow, bar: WidgetId) {
        let Some(this) = ui.widget_mut::<TabBar>(bar) else {
            return;
        };
        let tabs = std::mem::take(&mut this.tabs);
        this.selected = None;
        this.scroll_offset = 0;

        for (index, tab) in tabs.into_iter().enumerate().rev() {
            ui.destroy_child(bar, tab);
            emit(ui, bar, EventKind::TabRemoved { index, tab });
        }
        relayout(ui, bar);
    }

    /// Select the tab at `index`. Fires `TabChanged` if the selection moved.
    pub fn select_tab(ui: &mut MainWindow, bar: WidgetId, index: usize) {
        let Some(this) = ui.widget_mut::<TabBar>(bar) else {
            return;
        };
        let Some(&tab) = this.tabs.get(index) else {
            return;
        };
        if this.selected == Some(index) {
            return;
        }
        this.selected = Some(index);
        if index < this.scroll_offset {
            this.scroll_offset = index;
        }
        let tabs = this.tabs.clone();

        for (i, &t) in tabs.iter().enumerate() {
            Button::set_is_set(ui, t, i == index);
        }
        emit(ui, bar, EventKind::TabChanged { index, tab });
        relayout(ui, bar);
    }

    pub fn selected(ui: &MainWindow, bar: WidgetId) -> Option<usize> {
        ui.widget::<TabBar>(bar).and_then(|b| b.selected)
    }

    /// The tab buttons, in order.
    pub fn tabs(ui: &MainWindow, bar: WidgetId) -> &[WidgetId] {
        match ui.widget::<TabBar>(bar) {
            Some(this) => &this.tabs,
            None => &[],
        }
    }

    pub fn scroll_offset(ui: &MainWindow, bar: WidgetId) -> usize {
        ui.widget::<TabBar>(bar).map_or(0, |b| b.scroll_offset)
    }

    /// The (left, right) scroll buttons.
    pub fn scroll_buttons(ui: &MainWindow, bar: WidgetId) -> Option<(WidgetId, WidgetId)> {
        let this = ui.widget::<TabBar>(bar)?;
        Some((this.scroll_left?, this.scroll_right?))
    }
}

impl Widget for TabBar {
    fn measure(&mut self, ui: &MainWindow, id: WidgetId) -> Size {
        let padding: Border = ui.config().button_padding.into();
        Size::new(0, ui.line_height(id) + padding.vertical())
    }

    fn set_rect(&mut self, ui: &mut MainWindow, id: WidgetId, rect: Rect) {
        ui.store_rect(id, rect);
        self.scroll_offset = layout_tabs(
            ui,
            id,
            &self.tabs,
            self.scroll_offset,
            self.scroll_left.zip(self.scroll_right),
        );
    }

    fn draw(&self, _ui: &MainWindow, _id: WidgetId, ctx: &mut DrawContext<'_>) {
        let rect = ctx.rect();
        ctx.fill_rect(rect, painting::FACE);
    }

    fn children_clip_rect(&self, ui: &MainWindow, id: WidgetId) -> Option<Rect> {
        Some(ui.absolute_rect(id))
    }
}

fn scroll_button(ui: &mut MainWindow, bar: WidgetId, label: &str) -> WidgetId {
    let button = Button::new(label).with_listener(scroll_clicked).into_widget(ui);
    ui.set_overlap(button, true);
    ui.set_draw_last(button, true);
    ui.add_child(bar, button);
    ui.store_visible(button, false);
    button
}

fn emit(ui: &mut MainWindow, bar: WidgetId, kind: EventKind) {
    let listeners = ui
        .widget::<TabBar>(bar)
        .map(|b| b.listeners.clone())
        .unwrap_or_default();
    ui.emit(Event::new(bar, kind), &listeners);
}

/// Re-run the tab layout with the bar's stored state.
fn relayout(ui: &mut MainWindow, bar: WidgetId) {
    let Some(this) = ui.widget::<TabBar>(bar) else {
        return;
    };
    let tabs = this.tabs.clone();
    let offset = this.scroll_offset;
    let scroll = this.scroll_left.zip(this.scroll_right);

    let offset = layout_tabs(ui, bar, &tabs, offset, scroll);
    if let Some(this) = ui.widget_mut::<TabBar>(bar) {
        this.scroll_offset = offset;
    }
}

/// Place the tabs from `offset` onward and show the scroll buttons if they
/// overflow. Returns the clamped offset.
fn layout_tabs(
    ui: &mut MainWindow,
    bar: WidgetId,
    tabs: &[WidgetId],
    offset: usize,
    scroll: Option<(WidgetId, WidgetId)>,
) -> usize {
    let Size { w, h } = ui.rect(bar).size();
    let widths: Vec<i32> = tabs.iter().map(|&t| ui.rect(t).w).collect();
    let total: i32 = widths.iter().sum();
    let overflow = total > w;

    let button = ui.config().scroll_button_size;
    let available = if overflow { w - 2 * button } else { w };
    let mut offset = if overflow {
        offset.min(tabs.len().saturating_sub(1))
    } else {
        0
    };
    // Don't leave empty space at the end when scrolling back would fill it.
    while offset > 0 && widths[offset - 1..].iter().sum::<i32>() <= available {
        offset -= 1;
    }

    let mut x = 0;
    for (i, (&tab, &tab_w)) in tabs.iter().zip(&widths).enumerate() {
        let shown = i >= offset && x < available;
        if shown {
            ui.set_rect(tab, Rect::new(x, 0, tab_w, h));
            x += tab_w;
        }
        ui.set_visible(tab, shown);
    }

    if let Some((left, right)) = scroll {
        ui.set_rect(left, Rect::new(w - 2 * button, 0, button, h));
        ui.set_rect(right, Rect::new(w - button, 0, button, h));
        ui.set_visible(left, overflow);
        ui.set_visible(right, overflow);
    }
    offset
}

/// Listener on every tab button: a click selects it.
fn tab_clicked(ui: &mut MainWindow, event: &Event) {
    if !matches!(event.kind, EventKind::ButtonClicked { .. }) {
        return;
    }
    let Some(bar) = ui.parent(event.source) else {
        return;
    };
    let index = TabBar::tabs(ui, bar).iter().position(|&t| t == event.source);
    if let Some(index) = index {
        TabBar::select_tab(ui, bar, index);
    }
}

/// Listener on the scroll buttons: shift the row by one tab.
fn scroll_clicked(ui: &mut MainWindow, event: &Event) {
    if !matches!(event.kind, EventKind::ButtonClicked { .. }) {
        return;
    }
    let Some(bar) = ui.parent(event.source) else {
        return;
    };
    let Some(this) = ui.widget_mut::<TabBar>(bar) else {
        return;
    };
    if this.scroll_left == Some(event.source) {
        this.scroll_offset = this.scroll_offset.saturating_sub(1);
    } else {
        this.scroll_offset += 1;
    }
    relayout(ui, bar);
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use dockyard_core::Point;
    use dockyard_render::RecordingRenderer;

    use super::*;
    use crate::event::MouseButton;

    fn setup(width: i32) -> (MainWindow, WidgetId) {
        let mut ui = MainWindow::new(Box::new(RecordingRenderer::new()), Size::new(400, 300))
            .expect("recording renderer never fails");
        let bar = TabBar::create(&mut ui);
        ui.set_rect(bar, Rect::new(0, 0, width, 24));
        ui.add(bar);
        (ui, bar)
    }

    fn record(ui: &mut MainWindow, bar: WidgetId) -> Rc<RefCell<Vec<EventKind>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        ui.connect(bar, move |e| sink.borrow_mut().push(e.kind.clone()));
        events
    }

    fn click(ui: &mut MainWindow, pos: Point) {
        ui.mouse_move(pos, Point::ZERO);
        ui.mouse_button_down(MouseButton::Left, pos);
        ui.mouse_button_up(MouseButton::Left, pos);
    }

    #[test]
    fn test_first_tab_auto_selected() {
        let (mut ui, bar) = setup(400);
        let events = record(&mut ui, bar);
        let a = TabBar::add_tab(&mut ui, bar, "A").expect("bar exists");
        let b = TabBar::add_tab(&mut ui, bar, "B").expect("bar exists");

        assert_eq!(TabBar::selected(&ui, bar), Some(0));
        assert_eq!(
            *events.borrow(),
            vec![
                EventKind::TabAdded { index: 0, tab: a },
                EventKind::TabChanged { index: 0, tab: a },
                EventKind::TabAdded { index: 1, tab: b },
            ]
        );
        // 7 + 2 * 8 each
        assert_eq!(ui.rect(a), Rect::new(0, 0, 23, 24));
        assert_eq!(ui.rect(b), Rect::new(23, 0, 23, 24));
    }

    #[test]
    fn test_click_selects_tab() {
        let (mut ui, bar) = setup(400);
        TabBar::add_tab(&mut ui, bar, "A");
        let b = TabBar::add_tab(&mut ui, bar, "B").expect("bar exists");
        let events = record(&mut ui, bar);

        click(&mut ui, Point::new(30, 10));
        assert_eq!(TabBar::selected(&ui, bar), Some(1));
        assert_eq!(*events.borrow(), vec![EventKind::TabChanged { index: 1, tab: b }]);

        // Clicking the selected tab again changes nothing.
        click(&mut ui, Point::new(30, 10));
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn test_remove_selected_moves_selection() {
        let (mut ui, bar) = setup(400);
        for label in ["A", "B", "C"] {
            TabBar::add_tab(&mut ui, bar, label);
        }
        TabBar::select_tab(&mut ui, bar, 2);
        let c = TabBar::tabs(&ui, bar)[2];
        assert!(TabBar::remove_tab(&mut ui, bar, 2));
        assert!(!ui.contains(c));
        assert_eq!(TabBar::selected(&ui, bar), Some(1));

        TabBar::remove_tab(&mut ui, bar, 0);
        assert_eq!(TabBar::selected(&ui, bar), Some(0));
        assert!(!TabBar::remove_tab(&mut ui, bar, 5));
    }

    #[test]
    fn test_clear_tabs() {
        let (mut ui, bar) = setup(400);
        TabBar::add_tab(&mut ui, bar, "A");
        TabBar::add_tab(&mut ui, bar, "B");
        let events = record(&mut ui, bar);
        TabBar::clear_tabs(&mut ui, bar);

        assert!(TabBar::tabs(&ui, bar).is_empty());
        assert_eq!(TabBar::selected(&ui, bar), None);
        assert!(matches!(
            events.borrow().as_slice(),
            [EventKind::TabRemoved { index: 1, .. }, EventKind::TabRemoved { index: 0, .. }]
        ));
        // scroll buttons survive
        assert_eq!(ui.children(bar).len(), 2);
    }

    #[test]
    fn test_overflow_scrolls_by_whole_tabs() {
        let (mut ui, bar) = setup(80);
        for label in ["A", "B", "C", "D"] {
            TabBar::add_tab(&mut ui, bar, label);
        }
        let (left, right) = TabBar::scroll_buttons(&ui, bar).expect("bar has scroll buttons");
        assert!(ui.is_visible(right));
        assert_eq!(ui.rect(left), Rect::new(48, 0, 16, 24));

        click(&mut ui, Point::new(70, 10));
        assert_eq!(TabBar::scroll_offset(&ui, bar), 1);
        let tabs = TabBar::tabs(&ui, bar).to_vec();
        assert!(ui.is_hidden(tabs[0]));
        assert_eq!(ui.rect(tabs[1]).x, 0);

        click(&mut ui, Point::new(55, 10));
        assert_eq!(TabBar::scroll_offset(&ui, bar), 0);
    }

    #[test]
    fn test_fitting_tabs_hide_scroll_buttons() {
        let (mut ui, bar) = setup(400);
        TabBar::add_tab(&mut ui, bar, "A");
        let (left, right) = TabBar::scroll_buttons(&ui, bar).expect("bar has scroll buttons");
        assert!(ui.is_hidden(left));
        assert!(ui.is_hidden(right));
    }
}
