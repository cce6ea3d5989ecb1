//! Menu bar implementation.
//!
//! A [`MenuBar`] lays its buttons out left to right at their measured
//! widths. Installed with [`MainWindow::set_menu_bar`], it spans the top of
//! the MainWindow and pushes the content area and dock slots down by its
//! height.

use dockyard_core::{Rect, Size, WidgetId};

use super::button::{Button, ButtonStyle};
use crate::event::Listener;
use crate::main_window::MainWindow;
use crate::widget::painting;
use crate::widget::{DrawContext, Widget, WidgetKind};

/// A horizontal row of menu buttons.
#[derive(Debug, Clone, Default)]
pub struct MenuBar {
    buttons: Vec<WidgetId>,
}

impl MenuBar {
    pub fn create(ui: &mut MainWindow) -> WidgetId {
        ui.create(WidgetKind::MenuBar, Box::new(MenuBar::default()))
    }

    /// Append a button. `listener`, if given, receives its events.
    pub fn add_button(
        ui: &mut MainWindow,
        bar: WidgetId,
        label: &str,
        listener: Option<Listener>,
    ) -> Option<WidgetId> {
        ui.widget::<MenuBar>(bar)?;
        let mut button = Button::new(label).with_style(ButtonStyle::MenuBar);
        if let Some(listener) = listener {
            button = button.with_listener(listener);
        }
        let button = button.into_widget(ui);
        ui.add_child(bar, button);

        let this = ui.widget_mut::<MenuBar>(bar)?;
        this.buttons.push(button);
        let buttons = this.buttons.clone();
        layout_buttons(ui, bar, &buttons);
        Some(button)
    }

    pub fn buttons(ui: &MainWindow, bar: WidgetId) -> &[WidgetId] {
        match ui.widget::<MenuBar>(bar) {
            Some(this) => &this.buttons,
            None => &[],
        }
    }
}

fn layout_buttons(ui: &mut MainWindow, bar: WidgetId, buttons: &[WidgetId]) {
    let height = ui.rect(bar).h;
    let mut x = 0;
    for &button in buttons {
        let w = ui.rect(button).w;
        ui.set_rect(button, Rect::new(x, 0, w, height));
        x += w;
    }
}

impl Widget for MenuBar {
    fn measure(&mut self, ui: &MainWindow, id: WidgetId) -> Size {
        Size::new(0, ui.line_height(id) + 2 * ui.config().menu_bar_padding)
    }

    fn set_rect(&mut self, ui: &mut MainWindow, id: WidgetId, rect: Rect) {
        ui.store_rect(id, rect);
        layout_buttons(ui, id, &self.buttons);
    }

    fn draw(&self, _ui: &MainWindow, _id: WidgetId, ctx: &mut DrawContext<'_>) {
        let rect = ctx.rect();
        ctx.fill_rect(rect, painting::FACE);
        let bottom = Rect::new(rect.x, rect.bottom() - 1, rect.w, 1);
        ctx.fill_rect(bottom, painting::BORDER);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use dockyard_core::Point;
    use dockyard_render::RecordingRenderer;

    use super::*;
    use crate::event::{EventKind, MouseButton};
    use crate::main_window::DockPosition;
    use crate::widgets::Window;

    fn setup() -> (MainWindow, WidgetId) {
        let mut ui = MainWindow::new(Box::new(RecordingRenderer::new()), Size::new(800, 600))
            .expect("recording renderer never fails");
        let bar = MenuBar::create(&mut ui);
        ui.set_menu_bar(bar);
        (ui, bar)
    }

    #[test]
    fn test_buttons_laid_out_left_to_right() {
        let (mut ui, bar) = setup();
        let file = MenuBar::add_button(&mut ui, bar, "File", None).expect("button added");
        let edit = MenuBar::add_button(&mut ui, bar, "Edit", None).expect("button added");

        assert_eq!(ui.rect(bar), Rect::new(0, 0, 800, 30));
        assert_eq!(ui.kind(file), Some(WidgetKind::MenuBarButton));
        assert_eq!(ui.rect(file), Rect::new(0, 0, 40, 30));
        assert_eq!(ui.rect(edit), Rect::new(40, 0, 40, 30));
    }

    #[test]
    fn test_menu_bar_shifts_content_and_docks() {
        let (mut ui, _bar) = setup();
        assert_eq!(ui.content_rect(), Rect::new(0, 30, 800, 570));
        assert_eq!(ui.dock_icon_rect(DockPosition::North).y, 46);

        let window = Window::create(&mut ui, "Tools");
        ui.set_rect(window, Rect::new(100, 100, 200, 100));
        ui.add(window);
        ui.dock_window(window, DockPosition::North);
        assert_eq!(ui.rect(window).y, 30);
    }

    #[test]
    fn test_button_click_fires() {
        let (mut ui, bar) = setup();
        let file = MenuBar::add_button(&mut ui, bar, "File", None).expect("button added");
        let clicks = Rc::new(RefCell::new(0));
        let sink = clicks.clone();
        ui.connect(file, move |e| {
            if let EventKind::ButtonClicked { .. } = e.kind {
                *sink.borrow_mut() += 1;
            }
        });

        let pos = Point::new(10, 10);
        ui.mouse_move(pos, Point::ZERO);
        ui.mouse_button_down(MouseButton::Left, pos);
        ui.mouse_button_up(MouseButton::Left, pos);
        assert_eq!(*clicks.borrow(), 1);
    }
}
