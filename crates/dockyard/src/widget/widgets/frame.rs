//! Frame widget implementation.
//!
//! This module provides [`Frame`], a container with an optional border. Its
//! children live in an inner content widget inset by the border width.
//!
//! # Example
//!
//! ```
//! use dockyard::{MainWindow, Rect, RecordingRenderer, Size};
//! use dockyard::widgets::{Frame, FrameShape, Label};
//!
//! let mut ui = MainWindow::new(Box::new(RecordingRenderer::new()), Size::new(320, 240))?;
//! let frame = Frame::create(&mut ui, FrameShape::Panel);
//! ui.set_rect(frame, Rect::new(10, 10, 200, 100));
//! ui.add(frame);
//!
//! let note = Label::create(&mut ui, "inside");
//! Frame::add(&mut ui, frame, note);
//! # Ok::<(), dockyard::DockyardError>(())
//! ```

use dockyard_core::logging::targets;
use dockyard_core::{Border, WidgetId};

use crate::main_window::MainWindow;
use crate::widget::painting;
use crate::widget::{DrawContext, Stretch, Widget, WidgetKind};

/// Width of the frame border in pixels.
pub(crate) const FRAME_BORDER: i32 = 2;

/// The look of the frame border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameShape {
    /// No border is drawn, but the inset is kept.
    NoFrame,
    /// A plain outline.
    #[default]
    Box,
    /// An outline over a filled background.
    Panel,
}

/// A bordered container.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    shape: FrameShape,
    content: Option<WidgetId>,
}

impl Frame {
    pub fn create(ui: &mut MainWindow, shape: FrameShape) -> WidgetId {
        let id = ui.create(
            WidgetKind::Frame,
            Box::new(Frame {
                shape,
                content: None,
            }),
        );
        let content = inset_content(ui, id, Border::uniform(FRAME_BORDER));
        if let Some(frame) = ui.widget_mut::<Frame>(id) {
            frame.content = Some(content);
        }
        id
    }

    /// Add a child to the frame's content. Windows are rejected.
    pub fn add(ui: &mut MainWindow, frame: WidgetId, child: WidgetId) -> bool {
        match ui.widget::<Frame>(frame).and_then(|f| f.content) {
            Some(content) => add_to_content(ui, content, child),
            None => false,
        }
    }

    pub fn content(ui: &MainWindow, frame: WidgetId) -> Option<WidgetId> {
        ui.widget::<Frame>(frame).and_then(|f| f.content)
    }

    #[inline]
    pub fn shape(&self) -> FrameShape {
        self.shape
    }
}

impl Widget for Frame {
    fn draw(&self, _ui: &MainWindow, _id: WidgetId, ctx: &mut DrawContext<'_>) {
        let rect = ctx.rect();
        match self.shape {
            FrameShape::NoFrame => {}
            FrameShape::Box => ctx.stroke_rect(rect, painting::BORDER),
            FrameShape::Panel => painting::panel(ctx, rect, painting::BACKGROUND),
        }
    }
}

/// Create a content container filling `parent` inside `margin`.
pub(crate) fn inset_content(ui: &mut MainWindow, parent: WidgetId, margin: Border) -> WidgetId {
    let content = ui.create_container();
    ui.set_stretch(content, Stretch::ALL);
    ui.set_margin(content, margin);
    ui.add_child(parent, content);
    content
}

/// Add `child` to a container's content widget, refusing windows.
pub(crate) fn add_to_content(ui: &mut MainWindow, content: WidgetId, child: WidgetId) -> bool {
    if matches!(ui.kind(child), Some(WidgetKind::Window | WidgetKind::MainWindow)) {
        tracing::trace!(target: targets::TREE, ?child, "container rejects windows");
        return false;
    }
    ui.add_child(content, child)
}

#[cfg(test)]
mod tests {
    use dockyard_core::{Rect, Size};
    use dockyard_render::RecordingRenderer;

    use super::*;
    use crate::widgets::Window;

    #[test]
    fn test_content_inset_by_border() {
        let mut ui = MainWindow::new(Box::new(RecordingRenderer::new()), Size::new(320, 240))
            .expect("recording renderer never fails");
        let frame = Frame::create(&mut ui, FrameShape::Box);
        ui.set_rect(frame, Rect::new(10, 10, 100, 50));
        ui.add(frame);

        let content = Frame::content(&ui, frame).expect("frame has content");
        assert_eq!(ui.rect(content), Rect::new(2, 2, 96, 46));

        let child = ui.create_container();
        ui.set_rect(child, Rect::new(0, 0, 10, 10));
        assert!(Frame::add(&mut ui, frame, child));
        assert_eq!(ui.absolute_rect(child), Rect::new(12, 12, 10, 10));

        let window = Window::create(&mut ui, "no");
        assert!(!Frame::add(&mut ui, frame, window));
    }
}
