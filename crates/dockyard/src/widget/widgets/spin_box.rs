//! Spinner widget implementation.
//!
//! A [`Spinner`] is a [`TextEdit`] showing an integer, with "+" and "-"
//! buttons stacked at its right end. The buttons are flagged `overlap`, so
//! they win hit-testing over the text field they are drawn on.
//!
//! Typed text counts as the value as soon as it parses as an integer. Text
//! that does not parse leaves the last committed value in place.

use dockyard_core::{Rect, Size, WidgetId};

use super::button::Button;
use super::text_edit::TextEdit;
use crate::event::{Event, EventKind};
use crate::main_window::MainWindow;
use crate::widget::{Stretch, Widget, WidgetKind};

/// An integer entry with step buttons.
#[derive(Debug, Clone)]
pub struct Spinner {
    value: i32,
    min: i32,
    max: i32,
    step: i32,
    edit: Option<WidgetId>,
    inc: Option<WidgetId>,
    dec: Option<WidgetId>,
}

impl Default for Spinner {
    fn default() -> Self {
        Self {
            value: 0,
            min: i32::MIN,
            max: i32::MAX,
            step: 1,
            edit: None,
            inc: None,
            dec: None,
        }
    }
}

impl Spinner {
    pub fn create(ui: &mut MainWindow) -> WidgetId {
        let id = ui.create(WidgetKind::Spinner, Box::new(Spinner::default()));

        let edit = TextEdit::create_with_text(ui, "0");
        ui.set_stretch(edit, Stretch::ALL);
        ui.add_child(id, edit);

        let inc = step_button(ui, id, "+");
        let dec = step_button(ui, id, "-");

        if let Some(this) = ui.widget_mut::<Spinner>(id) {
            this.edit = Some(edit);
            this.inc = Some(inc);
            this.dec = Some(dec);
        }
        id
    }

    /// The current value: the field's text when it parses, clamped to the
    /// range, otherwise the last committed value.
    pub fn value(ui: &MainWindow, id: WidgetId) -> i32 {
        let Some(this) = ui.widget::<Spinner>(id) else {
            return 0;
        };
        this.edit
            .and_then(|edit| parse_value(TextEdit::text(ui, edit)))
            .map_or(this.value, |typed| typed.clamp(this.min, this.max))
    }

    /// Set the value, clamped to the range, and show it in the text field.
    pub fn set_value(ui: &mut MainWindow, id: WidgetId, value: i32) {
        let Some(this) = ui.widget_mut::<Spinner>(id) else {
            return;
        };
        this.value = value.clamp(this.min, this.max);
        let text = this.value.to_string();
        let edit = this.edit;
        if let Some(edit) = edit {
            TextEdit::set_text(ui, edit, &text);
        }
    }

    /// Set the allowed range. Bounds given in the wrong order are swapped.
    pub fn set_range(ui: &mut MainWindow, id: WidgetId, min: i32, max: i32) {
        let Some(this) = ui.widget_mut::<Spinner>(id) else {
            return;
        };
        this.min = min.min(max);
        this.max = max.max(min);
        let value = this.value;
        Self::set_value(ui, id, value);
    }

    pub fn range(ui: &MainWindow, id: WidgetId) -> (i32, i32) {
        ui.widget::<Spinner>(id)
            .map_or((i32::MIN, i32::MAX), |s| (s.min, s.max))
    }

    pub fn set_step(ui: &mut MainWindow, id: WidgetId, step: i32) {
        if let Some(this) = ui.widget_mut::<Spinner>(id) {
            this.step = step.max(1);
        }
    }

    /// The text field.
    pub fn edit(ui: &MainWindow, id: WidgetId) -> Option<WidgetId> {
        ui.widget::<Spinner>(id).and_then(|s| s.edit)
    }

    /// The (increment, decrement) buttons.
    pub fn buttons(ui: &MainWindow, id: WidgetId) -> Option<(WidgetId, WidgetId)> {
        let this = ui.widget::<Spinner>(id)?;
        Some((this.inc?, this.dec?))
    }
}

fn step_button(ui: &mut MainWindow, spinner: WidgetId, label: &str) -> WidgetId {
    let button = Button::new(label).with_listener(step_pressed).into_widget(ui);
    ui.set_overlap(button, true);
    ui.add_child(spinner, button);
    button
}

/// Listener on the step buttons. Acts on press, like the scroller's buttons.
fn step_pressed(ui: &mut MainWindow, event: &Event) {
    if event.kind != EventKind::ButtonPressed {
        return;
    }
    let Some(spinner) = ui.parent(event.source) else {
        return;
    };
    let Some(this) = ui.widget::<Spinner>(spinner) else {
        return;
    };
    let delta = if this.inc == Some(event.source) {
        this.step
    } else {
        -this.step
    };
    let value = Spinner::value(ui, spinner).saturating_add(delta);
    Spinner::set_value(ui, spinner, value);
}

/// Parse typed text, saturating out-of-range numbers.
fn parse_value(text: &str) -> Option<i32> {
    let wide: i64 = text.trim().parse().ok()?;
    Some(wide.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
}

impl Widget for Spinner {
    fn label(&self) -> String {
        format!("Spinner({})", self.value)
    }

    fn measure(&mut self, ui: &MainWindow, id: WidgetId) -> Size {
        Size::new(0, ui.line_height(id) + 2 * ui.config().text_edit_border)
    }

    fn set_rect(&mut self, ui: &mut MainWindow, id: WidgetId, rect: Rect) {
        ui.store_rect(id, rect);
        let w = ui.config().scroll_button_size.min(rect.w);
        let top = rect.h / 2;
        if let Some(inc) = self.inc {
            ui.set_rect(inc, Rect::new(rect.w - w, 0, w, top));
        }
        if let Some(dec) = self.dec {
            ui.set_rect(dec, Rect::new(rect.w - w, top, w, rect.h - top));
        }
    }
}

#[cfg(test)]
mod tests {
    use dockyard_core::Point;
    use dockyard_render::RecordingRenderer;

    use super::*;
    use crate::event::MouseButton;

    fn setup() -> (MainWindow, WidgetId) {
        let mut ui = MainWindow::new(Box::new(RecordingRenderer::new()), Size::new(300, 200))
            .expect("recording renderer never fails");
        let id = Spinner::create(&mut ui);
        ui.set_rect(id, Rect::new(10, 10, 100, 0));
        ui.add(id);
        (ui, id)
    }

    fn click(ui: &mut MainWindow, pos: Point) {
        ui.mouse_move(pos, Point::ZERO);
        ui.mouse_button_down(MouseButton::Left, pos);
        ui.mouse_button_up(MouseButton::Left, pos);
    }

    #[test]
    fn test_buttons_sit_over_the_edit() {
        let (mut ui, id) = setup();
        let (inc, dec) = Spinner::buttons(&ui, id).expect("spinner has buttons");
        let edit = Spinner::edit(&ui, id).expect("spinner has an edit");
        assert_eq!(ui.absolute_rect(edit), Rect::new(10, 10, 100, 26));
        assert_eq!(ui.absolute_rect(inc), Rect::new(94, 10, 16, 13));
        assert_eq!(ui.absolute_rect(dec), Rect::new(94, 23, 16, 13));

        ui.mouse_move(Point::new(100, 15), Point::ZERO);
        assert!(ui.is_hovered(inc));
        assert!(!ui.is_hovered(edit));
    }

    #[test]
    fn test_step_buttons_change_value() {
        let (mut ui, id) = setup();
        let (inc, dec) = Spinner::buttons(&ui, id).expect("spinner has buttons");
        Spinner::set_range(&mut ui, id, 0, 2);

        let up = ui.absolute_rect(inc).center();
        let down = ui.absolute_rect(dec).center();
        for _ in 0..3 {
            click(&mut ui, up);
        }
        assert_eq!(Spinner::value(&ui, id), 2);

        click(&mut ui, down);
        assert_eq!(Spinner::value(&ui, id), 1);
        let edit = Spinner::edit(&ui, id).expect("spinner has an edit");
        assert_eq!(TextEdit::text(&ui, edit), "1");
    }

    #[test]
    fn test_typed_text_becomes_value() {
        let (mut ui, id) = setup();
        let edit = Spinner::edit(&ui, id).expect("spinner has an edit");
        let (inc, _) = Spinner::buttons(&ui, id).expect("spinner has buttons");

        // Right of the "0", left of the step buttons.
        click(&mut ui, Point::new(80, 15));
        assert_eq!(ui.keyboard_focus(), Some(edit));
        ui.text_input("42");
        assert_eq!(TextEdit::text(&ui, edit), "042");
        assert_eq!(Spinner::value(&ui, id), 42);

        let up = ui.absolute_rect(inc).center();
        click(&mut ui, up);
        assert_eq!(Spinner::value(&ui, id), 43);
        assert_eq!(TextEdit::text(&ui, edit), "43");
    }

    #[test]
    fn test_unparsable_text_keeps_last_value() {
        let (mut ui, id) = setup();
        Spinner::set_range(&mut ui, id, 0, 100);
        Spinner::set_value(&mut ui, id, 7);
        let edit = Spinner::edit(&ui, id).expect("spinner has an edit");

        TextEdit::set_text(&mut ui, edit, "seven");
        assert_eq!(Spinner::value(&ui, id), 7);
        TextEdit::set_text(&mut ui, edit, "99999999999");
        assert_eq!(Spinner::value(&ui, id), 100);
        TextEdit::set_text(&mut ui, edit, " -3 ");
        assert_eq!(Spinner::value(&ui, id), 0);
    }

    #[test]
    fn test_set_value_clamps() {
        let (mut ui, id) = setup();
        Spinner::set_range(&mut ui, id, 10, -10);
        assert_eq!(Spinner::range(&ui, id), (-10, 10));
        Spinner::set_value(&mut ui, id, 50);
        assert_eq!(Spinner::value(&ui, id), 10);
    }
}
