//! Overlays shown while a window is dragged.
//!
//! [`DockIcons`] paints the four drop targets near the MainWindow edges and
//! [`DockPreview`] shades the area a window would occupy if dropped on the
//! hovered target. Both are owned by the MainWindow, flagged draw-manually
//! and painted after everything else.

use dockyard_core::{Rect, WidgetId};

use crate::main_window::{DockPosition, MainWindow};
use crate::widget::painting;
use crate::widget::{DrawContext, Widget};

/// The four dock drop targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct DockIcons;

impl Widget for DockIcons {
    fn draw(&self, ui: &MainWindow, _id: WidgetId, ctx: &mut DrawContext<'_>) {
        for position in DockPosition::ALL {
            let icon = ui.dock_icon_rect(position);
            let fill = if ui.dock_preview_position() == position {
                painting::SELECTION
            } else {
                painting::FACE
            };
            painting::panel(ctx, icon, fill);
            ctx.fill_rect(edge_marker(icon, position), painting::HEADER);
        }
    }
}

/// A strip along the icon's side that matches its dock edge.
fn edge_marker(icon: Rect, position: DockPosition) -> Rect {
    let t = (icon.w / 4).max(1);
    match position {
        DockPosition::North => Rect::new(icon.x, icon.y, icon.w, t),
        DockPosition::South => Rect::new(icon.x, icon.bottom() - t, icon.w, t),
        DockPosition::West => Rect::new(icon.x, icon.y, t, icon.h),
        DockPosition::East => Rect::new(icon.right() - t, icon.y, t, icon.h),
        DockPosition::None => Rect::ZERO,
    }
}

/// The translucent drop preview.
#[derive(Debug, Clone, Copy, Default)]
pub struct DockPreview;

impl Widget for DockPreview {
    fn draw(&self, _ui: &MainWindow, _id: WidgetId, ctx: &mut DrawContext<'_>) {
        let rect = ctx.rect();
        ctx.fill_rect(rect, painting::OVERLAY);
        ctx.stroke_rect(rect, painting::SELECTION);
    }
}

#[cfg(test)]
mod tests {
    use dockyard_core::Size;
    use dockyard_render::{DrawCommand, RecordingRenderer};

    use super::*;
    use crate::widgets::Window;

    #[test]
    fn test_icons_and_preview_draw_last() {
        let renderer = RecordingRenderer::new();
        let log = renderer.log();
        let mut ui = MainWindow::new(Box::new(renderer), Size::new(800, 600))
            .expect("recording renderer never fails");
        let window = Window::create(&mut ui, "Tools");
        ui.set_rect(window, Rect::new(300, 200, 200, 150));
        ui.add(window);

        ui.set_moving_window(Some(window));
        let west = ui.dock_icon_rect(DockPosition::West);
        ui.update_dock_preview(west.center());
        assert_eq!(ui.dock_preview_position(), DockPosition::West);
        ui.draw();

        let fills: Vec<(Rect, _)> = log
            .commands()
            .into_iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect { rect, color } => Some((rect, color)),
                _ => None,
            })
            .collect();
        let preview = ui.dock_preview_rect(window, DockPosition::West);
        let preview_at = fills
            .iter()
            .position(|&(r, c)| r == preview && c == painting::OVERLAY)
            .expect("preview drawn");
        let icon_at = fills
            .iter()
            .position(|&(r, c)| r == west && c == painting::SELECTION)
            .expect("highlighted icon drawn");
        assert!(preview_at < icon_at);
        assert_eq!(fills.last().map(|f| f.0), Some(edge_marker(
            ui.dock_icon_rect(DockPosition::West),
            DockPosition::West,
        )));

        ui.set_moving_window(None);
        log.clear();
        ui.draw();
        assert!(!log.commands().iter().any(|c| matches!(
            c,
            DrawCommand::FillRect { color, .. } if *color == painting::OVERLAY
        )));
    }
}
