//! Tabbed container implementation.
//!
//! A [`Tabbed`] stacks a [`TabBar`] above a set of pages. Each page is a
//! [`TabPage`] container filling the area below the bar; only the page of
//! the selected tab is visible.

use dockyard_core::{Border, Rect, WidgetId};

use super::frame::add_to_content;
use super::tab_bar::TabBar;
use crate::event::{Event, EventKind};
use crate::main_window::MainWindow;
use crate::widget::painting;
use crate::widget::{DrawContext, Stretch, Widget, WidgetKind};

/// A tab bar with one page per tab.
#[derive(Debug, Clone, Default)]
pub struct Tabbed {
    bar: Option<WidgetId>,
    pages: Vec<WidgetId>,
}

/// The container behind one tab of a [`Tabbed`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TabPage;

impl TabPage {
    /// Add a child to a page. Windows are rejected.
    pub fn add(ui: &mut MainWindow, page: WidgetId, child: WidgetId) -> bool {
        if ui.kind(page) != Some(WidgetKind::TabPage) {
            return false;
        }
        add_to_content(ui, page, child)
    }
}

impl Widget for TabPage {}

impl Tabbed {
    pub fn create(ui: &mut MainWindow) -> WidgetId {
        let id = ui.create(WidgetKind::Tabbed, Box::new(Tabbed::default()));
        let bar = TabBar::create(ui);
        ui.set_stretch(bar, Stretch::WIDTH);
        ui.add_child(id, bar);
        TabBar::add_listener(ui, bar, tab_changed);
        if let Some(this) = ui.widget_mut::<Tabbed>(id) {
            this.bar = Some(bar);
        }
        id
    }

    /// Append a page with its tab. The first page is shown right away.
    pub fn add_page(ui: &mut MainWindow, tabbed: WidgetId, label: &str) -> Option<WidgetId> {
        let bar = Self::tab_bar(ui, tabbed)?;
        let page = ui.create(WidgetKind::TabPage, Box::new(TabPage));
        ui.set_stretch(page, Stretch::ALL);
        ui.set_margin(page, page_margin(ui, bar));
        ui.add_child(tabbed, page);
        ui.store_visible(page, false);

        ui.widget_mut::<Tabbed>(tabbed)?.pages.push(page);
        TabBar::add_tab(ui, bar, label)?;
        Some(page)
    }

    /// Remove and destroy the page at `index` together with its tab.
    pub fn remove_page(ui: &mut MainWindow, tabbed: WidgetId, index: usize) -> bool {
        let Some(bar) = Self::tab_bar(ui, tabbed) else {
            return false;
        };
        let Some(this) = ui.widget_mut::<Tabbed>(tabbed) else {
            return false;
        };
        if index >= this.pages.len() {
            return false;
        }
        let page = this.pages.remove(index);
        ui.destroy_child(tabbed, page);
        TabBar::remove_tab(ui, bar, index)
    }

    pub fn tab_bar(ui: &MainWindow, tabbed: WidgetId) -> Option<WidgetId> {
        ui.widget::<Tabbed>(tabbed).and_then(|t| t.bar)
    }

    pub fn pages(ui: &MainWindow, tabbed: WidgetId) -> &[WidgetId] {
        match ui.widget::<Tabbed>(tabbed) {
            Some(this) => &this.pages,
            None => &[],
        }
    }

    pub fn page(ui: &MainWindow, tabbed: WidgetId, index: usize) -> Option<WidgetId> {
        Self::pages(ui, tabbed).get(index).copied()
    }

    /// The page of the selected tab.
    pub fn current_page(ui: &MainWindow, tabbed: WidgetId) -> Option<WidgetId> {
        let bar = Self::tab_bar(ui, tabbed)?;
        Self::page(ui, tabbed, TabBar::selected(ui, bar)?)
    }

    pub fn select_page(ui: &mut MainWindow, tabbed: WidgetId, index: usize) {
        if let Some(bar) = Self::tab_bar(ui, tabbed) {
            TabBar::select_tab(ui, bar, index);
        }
    }
}

fn page_margin(ui: &MainWindow, bar: WidgetId) -> Border {
    Border::new(ui.rect(bar).h, 0, 0, 0)
}

/// Listener on the tab bar: show the selected page only.
fn tab_changed(ui: &mut MainWindow, event: &Event) {
    let EventKind::TabChanged { index, .. } = event.kind else {
        return;
    };
    let Some(tabbed) = ui.parent(event.source) else {
        return;
    };
    let pages = Tabbed::pages(ui, tabbed).to_vec();
    for (i, page) in pages.into_iter().enumerate() {
        ui.set_visible(page, i == index);
    }
}

impl Widget for Tabbed {
    fn label(&self) -> String {
        format!("Tabbed(pages={})", self.pages.len())
    }

    fn set_rect(&mut self, ui: &mut MainWindow, id: WidgetId, rect: Rect) {
        ui.store_rect(id, rect);
        let Some(bar) = self.bar else {
            return;
        };
        let margin = page_margin(ui, bar);
        for &page in &self.pages {
            if ui.margin(page) != margin {
                ui.set_margin(page, margin);
            }
        }
    }

    fn draw(&self, _ui: &MainWindow, _id: WidgetId, ctx: &mut DrawContext<'_>) {
        let rect = ctx.rect();
        painting::panel(ctx, rect, painting::BACKGROUND);
    }
}

#[cfg(test)]
mod tests {
    use dockyard_core::{Point, Size};
    use dockyard_render::RecordingRenderer;

    use super::*;
    use crate::event::MouseButton;
    use crate::widgets::{Label, Window};

    fn setup() -> (MainWindow, WidgetId) {
        let mut ui = MainWindow::new(Box::new(RecordingRenderer::new()), Size::new(400, 300))
            .expect("recording renderer never fails");
        let tabbed = Tabbed::create(&mut ui);
        ui.set_rect(tabbed, Rect::new(0, 0, 200, 150));
        ui.add(tabbed);
        (ui, tabbed)
    }

    #[test]
    fn test_first_page_shown_below_bar() {
        let (mut ui, tabbed) = setup();
        let a = Tabbed::add_page(&mut ui, tabbed, "A").expect("page added");
        let b = Tabbed::add_page(&mut ui, tabbed, "B").expect("page added");

        assert!(!ui.is_hidden(a));
        assert!(ui.is_hidden(b));
        assert_eq!(Tabbed::current_page(&ui, tabbed), Some(a));
        assert_eq!(ui.absolute_rect(a), Rect::new(0, 26, 200, 124));
    }

    #[test]
    fn test_clicking_tab_switches_page() {
        let (mut ui, tabbed) = setup();
        let a = Tabbed::add_page(&mut ui, tabbed, "A").expect("page added");
        let b = Tabbed::add_page(&mut ui, tabbed, "B").expect("page added");
        let bar = Tabbed::tab_bar(&ui, tabbed).expect("tabbed has a bar");
        let tab_b = TabBar::tabs(&ui, bar)[1];

        let pos = ui.absolute_rect(tab_b).center();
        ui.mouse_move(pos, Point::ZERO);
        ui.mouse_button_down(MouseButton::Left, pos);
        ui.mouse_button_up(MouseButton::Left, pos);

        assert!(ui.is_hidden(a));
        assert!(!ui.is_hidden(b));
        assert_eq!(Tabbed::current_page(&ui, tabbed), Some(b));
    }

    #[test]
    fn test_remove_selected_page_shows_neighbour() {
        let (mut ui, tabbed) = setup();
        Tabbed::add_page(&mut ui, tabbed, "A");
        let b = Tabbed::add_page(&mut ui, tabbed, "B").expect("page added");

        assert!(Tabbed::remove_page(&mut ui, tabbed, 0));
        assert_eq!(Tabbed::pages(&ui, tabbed), &[b]);
        assert!(!ui.is_hidden(b));
        assert!(!Tabbed::remove_page(&mut ui, tabbed, 3));
    }

    #[test]
    fn test_page_accepts_widgets_not_windows() {
        let (mut ui, tabbed) = setup();
        let page = Tabbed::add_page(&mut ui, tabbed, "A").expect("page added");
        let label = Label::create(&mut ui, "hi");
        let window = Window::create(&mut ui, "W");

        assert!(TabPage::add(&mut ui, page, label));
        assert!(!TabPage::add(&mut ui, page, window));
        assert_eq!(ui.absolute_rect(label).origin(), Point::new(0, 26));
    }
}
