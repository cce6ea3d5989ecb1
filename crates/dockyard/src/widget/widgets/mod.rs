//! Standard widgets for Dockyard.
//!
//! Every widget here is created with an associated `create` function that
//! returns its [`WidgetId`](dockyard_core::WidgetId); operations are
//! associated functions taking the [`MainWindow`](crate::MainWindow) and the
//! id.
//!
//! - [`Window`]: floating or docked window with header and resize borders
//! - [`Button`], [`CheckBox`], [`RadioButton`]: clickable buttons
//! - [`Label`]: static text, optionally word-wrapped
//! - [`Frame`], [`GroupBox`]: bordered containers
//! - [`Scroller`]: scroll bar
//! - [`List`], [`Combo`]: item selection
//! - [`TabBar`], [`Tabbed`]: tabs and tabbed pages
//! - [`TextEdit`], [`Spinner`]: text and number entry
//! - [`MenuBar`]: the row of menu buttons along the top of the MainWindow

mod button;
mod checkbox;
mod combo_box;
mod dock_overlay;
mod frame;
mod group_box;
mod label;
mod list;
mod menu_bar;
mod radio_button;
mod scroller;
mod spin_box;
mod tab_bar;
mod tab_widget;
mod text_edit;
mod window;

pub use button::{Button, ButtonStyle, SetBehavior};
pub use checkbox::CheckBox;
pub use combo_box::Combo;
pub use dock_overlay::{DockIcons, DockPreview};
pub use frame::{Frame, FrameShape};
pub use group_box::GroupBox;
pub use label::Label;
pub use list::List;
pub use menu_bar::MenuBar;
pub use radio_button::RadioButton;
pub use scroller::{Scroller, ScrollerNub};
pub use spin_box::Spinner;
pub use tab_bar::TabBar;
pub use tab_widget::{TabPage, Tabbed};
pub use text_edit::TextEdit;
pub use window::Window;
