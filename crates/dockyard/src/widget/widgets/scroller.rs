//! Scroller widget implementation.
//!
//! A [`Scroller`] selects an integer value in `0..=max_value`. It is built
//! from three parts: a decrement button at the start of the track, an
//! increment button at its end, and a nub in between whose position mirrors
//! the value. Dragging the nub maps its position back to a value; the
//! buttons and the mouse wheel move the value by `step`.
//!
//! Every change fires [`EventKind::ScrollerValueChanged`] from the scroller.

use dockyard_core::{Point, Rect, Size, WidgetId};

use super::button::Button;
use crate::event::{Event, EventKind, Listener, MouseButton};
use crate::main_window::MainWindow;
use crate::widget::layout::Orientation;
use crate::widget::painting;
use crate::widget::{DrawContext, Widget, WidgetKind};

/// A scroll bar.
#[derive(Debug, Clone)]
pub struct Scroller {
    orientation: Orientation,
    value: i32,
    max_value: i32,
    step: i32,
    /// Nub length as a share of the track, in `0.0..=1.0`.
    nub_scale: f32,
    dec: Option<WidgetId>,
    inc: Option<WidgetId>,
    nub: Option<WidgetId>,
    listeners: Vec<Listener>,
}

impl Default for Scroller {
    fn default() -> Self {
        Self {
            orientation: Orientation::Vertical,
            value: 0,
            max_value: 0,
            step: 1,
            nub_scale: 0.0,
            dec: None,
            inc: None,
            nub: None,
            listeners: Vec::new(),
        }
    }
}

/// The state the part layout depends on.
#[derive(Debug, Clone, Copy)]
struct Parts {
    orientation: Orientation,
    value: i32,
    max_value: i32,
    nub_scale: f32,
    dec: WidgetId,
    inc: WidgetId,
    nub: WidgetId,
}

impl Scroller {
    /// Create a detached scroller with its buttons and nub.
    pub fn create(ui: &mut MainWindow, orientation: Orientation) -> WidgetId {
        Self::create_with_listener(ui, orientation, None)
    }

    /// Create a scroller whose events also reach `listener`.
    pub(crate) fn create_with_listener(
        ui: &mut MainWindow,
        orientation: Orientation,
        listener: Option<Listener>,
    ) -> WidgetId {
        let scroller = Scroller {
            orientation,
            listeners: listener.into_iter().collect(),
            ..Scroller::default()
        };
        let id = ui.create(WidgetKind::Scroller, Box::new(scroller));

        let (dec_label, inc_label) = match orientation {
            Orientation::Horizontal => ("<", ">"),
            Orientation::Vertical => ("^", "v"),
        };
        let dec = Button::new(dec_label).with_listener(step_pressed).into_widget(ui);
        let inc = Button::new(inc_label).with_listener(step_pressed).into_widget(ui);
        let nub = ui.create(WidgetKind::Widget, Box::new(ScrollerNub::default()));
        for part in [dec, inc, nub] {
            ui.add_child(id, part);
        }

        if let Some(this) = ui.widget_mut::<Scroller>(id) {
            this.dec = Some(dec);
            this.inc = Some(inc);
            this.nub = Some(nub);
        }
        id
    }

    pub fn add_listener(ui: &mut MainWindow, id: WidgetId, listener: Listener) {
        if let Some(this) = ui.widget_mut::<Scroller>(id) {
            this.listeners.push(listener);
        }
    }

    pub fn value(ui: &MainWindow, id: WidgetId) -> i32 {
        ui.widget::<Scroller>(id).map_or(0, |s| s.value)
    }

    pub fn max_value(ui: &MainWindow, id: WidgetId) -> i32 {
        ui.widget::<Scroller>(id).map_or(0, |s| s.max_value)
    }

    /// The (decrement, increment, nub) parts.
    pub fn parts(ui: &MainWindow, id: WidgetId) -> Option<(WidgetId, WidgetId, WidgetId)> {
        let this = ui.widget::<Scroller>(id)?;
        Some((this.dec?, this.inc?, this.nub?))
    }

    /// Set the value, clamped to `0..=max_value`. Fires
    /// `ScrollerValueChanged` if it changed.
    pub fn set_value(ui: &mut MainWindow, id: WidgetId, value: i32) {
        let Some(this) = ui.widget_mut::<Scroller>(id) else {
            return;
        };
        let old = this.value;
        this.value = value.clamp(0, this.max_value);
        let (new, listeners, parts) = (this.value, this.listeners.clone(), this.layout_state());
        value_changed(ui, id, old, new, &listeners, parts);
    }

    /// Set the upper bound, clamping the value into range.
    pub fn set_max_value(ui: &mut MainWindow, id: WidgetId, max_value: i32) {
        let Some(this) = ui.widget_mut::<Scroller>(id) else {
            return;
        };
        let old = this.value;
        this.max_value = max_value.max(0);
        this.value = this.value.min(this.max_value);
        let (new, listeners, parts) = (this.value, this.listeners.clone(), this.layout_state());
        value_changed(ui, id, old, new, &listeners, parts);
    }

    pub fn set_step(ui: &mut MainWindow, id: WidgetId, step: i32) {
        if let Some(this) = ui.widget_mut::<Scroller>(id) {
            this.step = step.max(1);
        }
    }

    /// Set the nub length as a share of the track.
    pub fn set_nub_scale(ui: &mut MainWindow, id: WidgetId, scale: f32) {
        let Some(this) = ui.widget_mut::<Scroller>(id) else {
            return;
        };
        this.nub_scale = scale.clamp(0.0, 1.0);
        if let Some(parts) = this.layout_state() {
            layout_parts(ui, id, parts);
        }
    }

    fn layout_state(&self) -> Option<Parts> {
        Some(Parts {
            orientation: self.orientation,
            value: self.value,
            max_value: self.max_value,
            nub_scale: self.nub_scale,
            dec: self.dec?,
            inc: self.inc?,
            nub: self.nub?,
        })
    }
}

/// Emit the change, if any, and move the nub.
fn value_changed(
    ui: &mut MainWindow,
    id: WidgetId,
    old: i32,
    value: i32,
    listeners: &[Listener],
    parts: Option<Parts>,
) {
    if let Some(parts) = parts {
        layout_parts(ui, id, parts);
    }
    if old != value {
        ui.emit(
            Event::new(id, EventKind::ScrollerValueChanged { old_value: old, value }),
            listeners,
        );
    }
}

/// Position along `orientation`.
fn along(orientation: Orientation, point: Point) -> i32 {
    match orientation {
        Orientation::Horizontal => point.x,
        Orientation::Vertical => point.y,
    }
}

/// Track length and nub length for a scroller of `size`.
fn track_metrics(ui: &MainWindow, size: Size, parts: &Parts) -> (i32, i32) {
    let button = ui.config().scroll_button_size;
    let track = (parts.orientation.main(size) - 2 * button).max(0);
    let nub = ((track as f32 * parts.nub_scale) as i32)
        .max(ui.config().scroller_nub_min_size)
        .min(track);
    (track, nub)
}

fn layout_parts(ui: &mut MainWindow, id: WidgetId, parts: Parts) {
    let size = ui.rect(id).size();
    let button = ui.config().scroll_button_size;
    let (track, nub_len) = track_metrics(ui, size, &parts);
    let travel = track - nub_len;
    let nub_pos = if parts.max_value > 0 {
        (i64::from(parts.value) * i64::from(travel) / i64::from(parts.max_value)) as i32
    } else {
        0
    };

    let (dec, inc, nub) = match parts.orientation {
        Orientation::Vertical => (
            Rect::new(0, 0, size.w, button),
            Rect::new(0, size.h - button, size.w, button),
            Rect::new(0, button + nub_pos, size.w, nub_len),
        ),
        Orientation::Horizontal => (
            Rect::new(0, 0, button, size.h),
            Rect::new(size.w - button, 0, button, size.h),
            Rect::new(button + nub_pos, 0, nub_len, size.h),
        ),
    };
    ui.set_rect(parts.dec, dec);
    ui.set_rect(parts.inc, inc);
    ui.set_rect(parts.nub, nub);
}

impl Widget for Scroller {
    fn measure(&mut self, ui: &MainWindow, _id: WidgetId) -> Size {
        let button = ui.config().scroll_button_size;
        match self.orientation {
            Orientation::Vertical => Size::new(button, 0),
            Orientation::Horizontal => Size::new(0, button),
        }
    }

    fn set_rect(&mut self, ui: &mut MainWindow, id: WidgetId, rect: Rect) {
        ui.store_rect(id, rect);
        if let Some(parts) = self.layout_state() {
            layout_parts(ui, id, parts);
        }
    }

    fn draw(&self, _ui: &MainWindow, _id: WidgetId, ctx: &mut DrawContext<'_>) {
        let rect = ctx.rect();
        painting::panel(ctx, rect, painting::BACKGROUND);
    }

    fn mouse_wheel_move(&mut self, ui: &mut MainWindow, id: WidgetId, _pos: Point, delta: Point) {
        let old = self.value;
        self.value = (self.value - along(self.orientation, delta) * self.step).clamp(0, self.max_value);
        let listeners = self.listeners.clone();
        value_changed(ui, id, old, self.value, &listeners, self.layout_state());
    }
}

/// Listener on the step buttons.
fn step_pressed(ui: &mut MainWindow, event: &Event) {
    if event.kind != EventKind::ButtonPressed {
        return;
    }
    let Some(scroller) = ui.parent(event.source) else {
        return;
    };
    let Some(this) = ui.widget::<Scroller>(scroller) else {
        return;
    };
    let step = if this.dec == Some(event.source) {
        -this.step
    } else {
        this.step
    };
    let value = this.value + step;
    Scroller::set_value(ui, scroller, value);
}

/// The draggable part of a scroller.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollerNub {
    /// Cursor offset from the nub's leading edge while dragging.
    drag_offset: Option<i32>,
}

impl Widget for ScrollerNub {
    fn draw(&self, _ui: &MainWindow, _id: WidgetId, ctx: &mut DrawContext<'_>) {
        let rect = ctx.rect();
        painting::panel(ctx, rect, painting::face(ctx.is_hovered(), self.drag_offset.is_some()));
    }

    fn mouse_button_down(&mut self, ui: &mut MainWindow, id: WidgetId, button: MouseButton, pos: Point) {
        if button != MouseButton::Left || self.drag_offset.is_some() {
            return;
        }
        let Some(orientation) = ui
            .parent(id)
            .and_then(|s| ui.widget::<Scroller>(s))
            .map(|s| s.orientation)
        else {
            return;
        };
        let start = along(orientation, ui.absolute_rect(id).origin());
        self.drag_offset = Some(along(orientation, pos) - start);
        ui.push_lock_input(id);
    }

    fn mouse_move(&mut self, ui: &mut MainWindow, id: WidgetId, pos: Point, _delta: Point) {
        let Some(offset) = self.drag_offset else {
            return;
        };
        let Some(scroller) = ui.parent(id) else {
            return;
        };
        let Some(parts) = ui.widget::<Scroller>(scroller).and_then(Scroller::layout_state) else {
            return;
        };
        let abs = ui.absolute_rect(scroller);
        let (track, nub_len) = track_metrics(ui, abs.size(), &parts);
        let travel = track - nub_len;
        if travel <= 0 {
            return;
        }

        let track_start = along(parts.orientation, abs.origin()) + ui.config().scroll_button_size;
        let nub_pos = (along(parts.orientation, pos) - offset - track_start).clamp(0, travel);
        let value = (i64::from(nub_pos) * i64::from(parts.max_value) / i64::from(travel)) as i32;
        Scroller::set_value(ui, scroller, value);
    }

    fn mouse_button_up(&mut self, ui: &mut MainWindow, id: WidgetId, button: MouseButton, _pos: Point) {
        if button != MouseButton::Left || self.drag_offset.take().is_none() {
            return;
        }
        ui.pop_lock_input(id);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use dockyard_render::RecordingRenderer;

    use super::*;

    /// A vertical scroller at (0, 0, 16, 132): a 100px track.
    fn setup() -> (MainWindow, WidgetId) {
        let mut ui = MainWindow::new(Box::new(RecordingRenderer::new()), Size::new(300, 300))
            .expect("recording renderer never fails");
        let id = Scroller::create(&mut ui, Orientation::Vertical);
        ui.set_rect(id, Rect::new(0, 0, 16, 132));
        ui.add(id);
        Scroller::set_max_value(&mut ui, id, 10);
        Scroller::set_nub_scale(&mut ui, id, 0.2);
        (ui, id)
    }

    fn record(ui: &mut MainWindow, id: WidgetId) -> Rc<RefCell<Vec<(i32, i32)>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        ui.connect(id, move |e| {
            if let EventKind::ScrollerValueChanged { old_value, value } = e.kind {
                sink.borrow_mut().push((old_value, value));
            }
        });
        seen
    }

    #[test]
    fn test_parts_layout() {
        let (ui, id) = setup();
        let (dec, inc, nub) = Scroller::parts(&ui, id).expect("scroller has parts");
        assert_eq!(ui.rect(dec), Rect::new(0, 0, 16, 16));
        assert_eq!(ui.rect(inc), Rect::new(0, 116, 16, 16));
        assert_eq!(ui.rect(nub), Rect::new(0, 16, 16, 20));
    }

    #[test]
    fn test_set_value_clamps_and_fires() {
        let (mut ui, id) = setup();
        let seen = record(&mut ui, id);
        Scroller::set_value(&mut ui, id, 50);
        Scroller::set_value(&mut ui, id, 50);
        Scroller::set_value(&mut ui, id, -3);
        assert_eq!(*seen.borrow(), vec![(0, 10), (10, 0)]);

        Scroller::set_value(&mut ui, id, 5);
        let (_, _, nub) = Scroller::parts(&ui, id).expect("scroller has parts");
        // travel 80, half way
        assert_eq!(ui.rect(nub).y, 16 + 40);
    }

    #[test]
    fn test_step_buttons() {
        let (mut ui, id) = setup();
        Scroller::set_step(&mut ui, id, 3);
        let inc_pos = Point::new(8, 120);
        ui.mouse_move(inc_pos, Point::ZERO);
        ui.mouse_button_down(MouseButton::Left, inc_pos);
        ui.mouse_button_up(MouseButton::Left, inc_pos);
        assert_eq!(Scroller::value(&ui, id), 3);

        let dec_pos = Point::new(8, 4);
        ui.mouse_move(dec_pos, Point::ZERO);
        ui.mouse_button_down(MouseButton::Left, dec_pos);
        assert_eq!(Scroller::value(&ui, id), 0);
    }

    #[test]
    fn test_nub_drag_maps_to_value() {
        let (mut ui, id) = setup();
        let grab = Point::new(8, 20);
        ui.mouse_move(grab, Point::ZERO);
        ui.mouse_button_down(MouseButton::Left, grab);
        let (_, _, nub) = Scroller::parts(&ui, id).expect("scroller has parts");
        assert_eq!(ui.input_lock(), Some(nub));

        // 40 of 80 pixels of travel
        ui.mouse_move(Point::new(8, 60), Point::new(0, 40));
        assert_eq!(Scroller::value(&ui, id), 5);
        // past the end clamps, even off the scroller
        ui.mouse_move(Point::new(200, 280), Point::new(192, 220));
        assert_eq!(Scroller::value(&ui, id), 10);

        ui.mouse_button_up(MouseButton::Left, Point::new(200, 280));
        assert_eq!(ui.input_lock(), None);
    }

    #[test]
    fn test_zero_max_does_not_divide() {
        let (mut ui, id) = setup();
        Scroller::set_max_value(&mut ui, id, 0);
        let grab = Point::new(8, 20);
        ui.mouse_move(grab, Point::ZERO);
        ui.mouse_button_down(MouseButton::Left, grab);
        ui.mouse_move(Point::new(8, 90), Point::new(0, 70));
        assert_eq!(Scroller::value(&ui, id), 0);
    }

    #[test]
    fn test_wheel_steps() {
        let (mut ui, id) = setup();
        ui.mouse_move(Point::new(8, 60), Point::ZERO);
        ui.mouse_wheel_move(Point::new(0, -2));
        assert_eq!(Scroller::value(&ui, id), 2);
    }
}
