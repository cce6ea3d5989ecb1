//! CheckBox widget.
//!
//! A [`Button`] with the check style and toggle behavior: each click flips
//! its state and reports it in [`EventKind::ButtonClicked`](crate::EventKind::ButtonClicked).
//!
//! # Example
//!
//! ```
//! use dockyard::{MainWindow, RecordingRenderer, Size};
//! use dockyard::widgets::CheckBox;
//!
//! let mut ui = MainWindow::new(Box::new(RecordingRenderer::new()), Size::new(200, 100))?;
//! let wrap = CheckBox::create(&mut ui, "Word wrap");
//! CheckBox::set_checked(&mut ui, wrap, true);
//! assert!(CheckBox::is_checked(&ui, wrap));
//! # Ok::<(), dockyard::DockyardError>(())
//! ```

use dockyard_core::WidgetId;

use super::button::{Button, ButtonStyle, SetBehavior};
use crate::main_window::MainWindow;

/// Constructors and accessors for check boxes.
pub struct CheckBox;

impl CheckBox {
    pub fn create(ui: &mut MainWindow, label: &str) -> WidgetId {
        Button::new(label)
            .with_style(ButtonStyle::Check)
            .with_set_behavior(SetBehavior::Toggle)
            .into_widget(ui)
    }

    pub fn is_checked(ui: &MainWindow, id: WidgetId) -> bool {
        ui.widget::<Button>(id).is_some_and(Button::is_set)
    }

    pub fn set_checked(ui: &mut MainWindow, id: WidgetId, checked: bool) {
        Button::set_is_set(ui, id, checked);
    }
}

#[cfg(test)]
mod tests {
    use dockyard_core::{Point, Size};
    use dockyard_render::RecordingRenderer;

    use super::*;
    use crate::event::MouseButton;
    use crate::widget::WidgetKind;

    #[test]
    fn test_click_toggles() {
        let mut ui = MainWindow::new(Box::new(RecordingRenderer::new()), Size::new(200, 100))
            .expect("recording renderer never fails");
        let id = CheckBox::create(&mut ui, "On");
        ui.add(id);
        assert_eq!(ui.kind(id), Some(WidgetKind::CheckBox));
        // 16 box + 8 padding + 2 * 7
        assert_eq!(ui.rect(id).size(), Size::new(38, 18));

        let pos = Point::new(3, 3);
        ui.mouse_move(pos, Point::ZERO);
        for expected in [true, false, true] {
            ui.mouse_button_down(MouseButton::Left, pos);
            ui.mouse_button_up(MouseButton::Left, pos);
            assert_eq!(CheckBox::is_checked(&ui, id), expected);
        }
    }
}
