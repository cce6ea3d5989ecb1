//! RadioButton widget.
//!
//! Radio buttons are grouped by parent: setting one unsets its sibling radio
//! buttons. The first radio button added to a parent starts out set.

use dockyard_core::WidgetId;

use super::button::{Button, ButtonStyle, SetBehavior};
use crate::main_window::MainWindow;

/// Constructors and accessors for radio buttons.
pub struct RadioButton;

impl RadioButton {
    pub fn create(ui: &mut MainWindow, label: &str) -> WidgetId {
        Button::new(label)
            .with_style(ButtonStyle::Radio)
            .with_set_behavior(SetBehavior::Sticky)
            .into_widget(ui)
    }

    pub fn is_checked(ui: &MainWindow, id: WidgetId) -> bool {
        ui.widget::<Button>(id).is_some_and(Button::is_set)
    }

    /// The set radio button among `parent`'s children.
    pub fn checked_in(ui: &MainWindow, parent: WidgetId) -> Option<WidgetId> {
        ui.children(parent)
            .iter()
            .copied()
            .find(|&c| Self::is_checked(ui, c))
    }
}
