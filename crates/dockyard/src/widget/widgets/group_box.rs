//! GroupBox widget implementation.
//!
//! A [`GroupBox`] is a framed container with a title along its top edge. The
//! content starts below the title, so its top inset follows the font's line
//! height.

use dockyard_core::{Border, Point, Rect, Size, WidgetId};

use super::frame::{FRAME_BORDER, add_to_content, inset_content};
use crate::main_window::MainWindow;
use crate::widget::painting;
use crate::widget::{DrawContext, Widget, WidgetKind};

/// A titled container.
#[derive(Debug, Clone, Default)]
pub struct GroupBox {
    title: String,
    content: Option<WidgetId>,
}

impl GroupBox {
    pub fn create(ui: &mut MainWindow, title: &str) -> WidgetId {
        let id = ui.create(
            WidgetKind::GroupBox,
            Box::new(GroupBox {
                title: title.to_string(),
                content: None,
            }),
        );
        let content = inset_content(ui, id, Border::uniform(FRAME_BORDER));
        if let Some(group) = ui.widget_mut::<GroupBox>(id) {
            group.content = Some(content);
        }
        id
    }

    /// Add a child below the title. Windows are rejected.
    pub fn add(ui: &mut MainWindow, group: WidgetId, child: WidgetId) -> bool {
        match Self::content(ui, group) {
            Some(content) => add_to_content(ui, content, child),
            None => false,
        }
    }

    pub fn content(ui: &MainWindow, group: WidgetId) -> Option<WidgetId> {
        ui.widget::<GroupBox>(group).and_then(|g| g.content)
    }

    pub fn set_title(ui: &mut MainWindow, group: WidgetId, title: &str) {
        if let Some(g) = ui.widget_mut::<GroupBox>(group) {
            g.title = title.to_string();
        }
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    fn update_content_margin(&self, ui: &mut MainWindow, id: WidgetId) {
        let Some(content) = self.content else {
            return;
        };
        let top = ui.line_height(id) + FRAME_BORDER;
        let margin = Border::new(top, FRAME_BORDER, FRAME_BORDER, FRAME_BORDER);
        if ui.margin(content) != margin {
            ui.set_margin(content, margin);
        }
    }
}

impl Widget for GroupBox {
    fn label(&self) -> String {
        self.title.clone()
    }

    fn measure(&mut self, ui: &MainWindow, id: WidgetId) -> Size {
        let title = ui.text_size(id, &self.title);
        Size::new(title.w + 4 * FRAME_BORDER, title.h + 2 * FRAME_BORDER)
    }

    fn added(&mut self, ui: &mut MainWindow, id: WidgetId, _parent: WidgetId) {
        self.update_content_margin(ui, id);
    }

    fn renderer_changed(&mut self, ui: &mut MainWindow, id: WidgetId) {
        self.update_content_margin(ui, id);
    }

    fn font_changed(&mut self, ui: &mut MainWindow, id: WidgetId) {
        self.update_content_margin(ui, id);
    }

    fn draw(&self, ui: &MainWindow, id: WidgetId, ctx: &mut DrawContext<'_>) {
        let rect = ctx.rect();
        let half = ui.line_height(id) / 2;
        let body = Rect::new(rect.x, rect.y + half, rect.w, rect.h - half);
        ctx.stroke_rect(body, painting::BORDER);
        let origin = Point::new(rect.x + 2 * FRAME_BORDER, rect.y);
        ctx.draw_text(&self.title, origin, painting::TEXT);
    }
}

#[cfg(test)]
mod tests {
    use dockyard_render::RecordingRenderer;

    use super::*;

    #[test]
    fn test_content_starts_below_title() {
        let mut ui = MainWindow::new(Box::new(RecordingRenderer::new()), Size::new(320, 240))
            .expect("recording renderer never fails");
        let group = GroupBox::create(&mut ui, "Options");
        ui.set_rect(group, Rect::new(0, 0, 200, 100));
        ui.add(group);

        let content = GroupBox::content(&ui, group).expect("group box has content");
        // line height 18 + border 2
        assert_eq!(ui.rect(content), Rect::new(2, 20, 196, 78));
    }

    #[test]
    fn test_detached_group_box_has_no_title_inset() {
        let mut ui = MainWindow::new(Box::new(RecordingRenderer::new()), Size::new(320, 240))
            .expect("recording renderer never fails");
        let group = GroupBox::create(&mut ui, "Options");
        let content = GroupBox::content(&ui, group).expect("group box has content");
        assert_eq!(ui.margin(content), Border::uniform(FRAME_BORDER));
    }
}
