//! Frame composition: pass order, culling and clipping.

use dockyard::widgets::{Combo, Window};
use dockyard::{
    Color, DockPosition, DrawCommand, DrawContext, DrawLog, MainWindow, MouseButton, Point,
    Rect, RecordingRenderer, Size, Widget, WidgetId,
};

struct Named(&'static str);

impl Widget for Named {
    fn draw(&self, _ui: &MainWindow, _id: WidgetId, ctx: &mut DrawContext<'_>) {
        ctx.draw_text(self.0, Point::ZERO, Color::BLACK);
    }
}

fn setup() -> (MainWindow, DrawLog) {
    let renderer = RecordingRenderer::new();
    let log = renderer.log();
    let ui = MainWindow::new(Box::new(renderer), Size::new(800, 600))
        .expect("recording renderer never fails");
    (ui, log)
}

fn named(ui: &mut MainWindow, name: &'static str, rect: Rect) -> WidgetId {
    let id = ui.create_widget(Named(name));
    ui.set_rect(id, rect);
    id
}

fn window(ui: &mut MainWindow, title: &str, rect: Rect) -> WidgetId {
    let id = Window::create(ui, title);
    ui.set_rect(id, rect);
    ui.add(id);
    id
}

fn position(texts: &[String], text: &str) -> usize {
    texts
        .iter()
        .position(|t| t == text)
        .unwrap_or_else(|| panic!("{text:?} not drawn in {texts:?}"))
}

#[test]
fn test_frame_pass_order() {
    let (mut ui, log) = setup();
    let content = named(&mut ui, "content", Rect::new(400, 400, 50, 50));
    ui.add(content);

    let combo = Combo::create(&mut ui);
    ui.set_rect(combo, Rect::new(500, 500, 120, 0));
    ui.add(combo);
    Combo::add_item(&mut ui, combo, "choice");
    Combo::select(&mut ui, combo, 0);

    let floating = window(&mut ui, "Floating", Rect::new(100, 100, 200, 200));
    // Created later, so it carries the higher priority.
    let docked = window(&mut ui, "Docked", Rect::new(300, 100, 200, 200));
    ui.dock_window(docked, DockPosition::West);
    assert_eq!(ui.window_dock_position(floating), DockPosition::None);

    ui.draw();
    let texts = log.texts();
    let content_at = position(&texts, "content");
    let docked_at = position(&texts, "Docked");
    let floating_at = position(&texts, "Floating");
    let combo_at = position(&texts, "choice");
    assert!(content_at < docked_at);
    assert!(docked_at < floating_at);
    assert!(floating_at < combo_at);

    let commands = log.commands();
    assert_eq!(commands.first(), Some(&DrawCommand::BeginFrame(Size::new(800, 600))));
    assert_eq!(commands.last(), Some(&DrawCommand::EndFrame));
}

#[test]
fn test_dock_overlays_draw_last_while_dragging() {
    let (mut ui, log) = setup();
    let tools = window(&mut ui, "Tools", Rect::new(300, 300, 200, 150));

    let grab = Point::new(400, 310);
    ui.mouse_move(grab, Point::ZERO);
    ui.mouse_button_down(MouseButton::Left, grab);
    assert_eq!(ui.moving_window(), Some(tools));

    ui.draw();
    let commands = log.commands();
    let last_title = commands
        .iter()
        .rposition(|c| matches!(c, DrawCommand::Text { text, .. } if text == "Tools"))
        .expect("window title drawn");
    let icon = ui.dock_icon_rect(DockPosition::South);
    let last_icon_fill = commands
        .iter()
        .rposition(|c| matches!(c, DrawCommand::FillRect { rect, .. } if icon.contains_rect(rect)))
        .expect("dock icons drawn");
    assert!(last_title < last_icon_fill);

    ui.mouse_button_up(MouseButton::Left, grab);
}

#[test]
fn test_children_outside_their_window_are_culled() {
    let (mut ui, log) = setup();
    let host = window(&mut ui, "Host", Rect::new(100, 100, 100, 100));
    let inside = named(&mut ui, "inside", Rect::new(0, 0, 20, 20));
    let outside = named(&mut ui, "outside", Rect::new(500, 500, 20, 20));
    Window::add(&mut ui, host, inside);
    Window::add(&mut ui, host, outside);

    ui.draw();
    let texts = log.texts();
    assert!(texts.iter().any(|t| t == "inside"));
    assert!(!texts.iter().any(|t| t == "outside"));
}

#[test]
fn test_each_frame_starts_with_full_clip() {
    let (mut ui, log) = setup();
    ui.draw();
    log.clear();
    ui.draw();

    let commands = log.commands();
    assert_eq!(commands[0], DrawCommand::BeginFrame(Size::new(800, 600)));
    assert_eq!(commands[1], DrawCommand::SetClip(Rect::new(0, 0, 800, 600)));
}
