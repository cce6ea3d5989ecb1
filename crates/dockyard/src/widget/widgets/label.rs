//! Label widget for text display.
//!
//! A label sizes itself to its text: the widest line by the number of lines.
//! With word wrap enabled it keeps its width and wraps the text to it,
//! growing or shrinking in height instead.
//!
//! # Example
//!
//! ```
//! use dockyard::{MainWindow, RecordingRenderer, Size};
//! use dockyard::widgets::Label;
//!
//! let mut ui = MainWindow::new(Box::new(RecordingRenderer::new()), Size::new(320, 240))?;
//! let hello = Label::create(&mut ui, "Hello");
//! ui.add(hello);
//! assert_eq!(ui.rect(hello).size(), Size::new(35, 18));
//!
//! Label::set_text(&mut ui, hello, "Hello\nWorld");
//! assert_eq!(ui.rect(hello).size(), Size::new(35, 36));
//! # Ok::<(), dockyard::DockyardError>(())
//! ```

use dockyard_core::{Point, Size, WidgetId};

use crate::main_window::MainWindow;
use crate::widget::painting;
use crate::widget::{DrawContext, Widget, WidgetKind};

/// A widget that displays text.
#[derive(Debug, Clone, Default)]
pub struct Label {
    text: String,
    word_wrap: bool,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            word_wrap: false,
        }
    }

    /// Wrap the text to the label's width.
    pub fn with_word_wrap(mut self, wrap: bool) -> Self {
        self.word_wrap = wrap;
        self
    }

    pub fn create(ui: &mut MainWindow, text: &str) -> WidgetId {
        Self::new(text).into_widget(ui)
    }

    pub fn into_widget(self, ui: &mut MainWindow) -> WidgetId {
        ui.create(WidgetKind::Label, Box::new(self))
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn word_wrap(&self) -> bool {
        self.word_wrap
    }

    pub fn set_text(ui: &mut MainWindow, id: WidgetId, text: &str) {
        if let Some(label) = ui.widget_mut::<Label>(id) {
            label.text = text.to_string();
            ui.resize_to_measured(id);
            ui.refresh_rect(id);
        }
    }

    pub fn set_word_wrap(ui: &mut MainWindow, id: WidgetId, wrap: bool) {
        if let Some(label) = ui.widget_mut::<Label>(id) {
            label.word_wrap = wrap;
            ui.resize_to_measured(id);
            ui.refresh_rect(id);
        }
    }

    /// Width to wrap at: the requested width, else the current one.
    fn wrap_width(ui: &MainWindow, id: WidgetId) -> i32 {
        match ui.user_rect(id).w {
            0 => ui.rect(id).w,
            w => w,
        }
    }

    /// The lines as drawn at the current width.
    fn lines<'t>(&'t self, ui: &MainWindow, id: WidgetId) -> Vec<&'t str> {
        let width = Self::wrap_width(ui, id);
        if self.word_wrap && width > 0 {
            self.text
                .split('\n')
                .flat_map(|paragraph| {
                    let wrapped = ui.wrap_text(id, paragraph, width);
                    if wrapped.is_empty() { vec![paragraph] } else { wrapped }
                })
                .collect()
        } else {
            self.text.split('\n').collect()
        }
    }
}

impl Widget for Label {
    fn label(&self) -> String {
        self.text.clone()
    }

    fn measure(&mut self, ui: &MainWindow, id: WidgetId) -> Size {
        let lines = self.lines(ui, id);
        let line_height = ui.line_height(id);
        let height = line_height * lines.len() as i32;
        if self.word_wrap && Self::wrap_width(ui, id) > 0 {
            return Size::new(0, height);
        }
        let width = lines
            .iter()
            .map(|line| ui.text_size(id, line).w)
            .max()
            .unwrap_or(0);
        Size::new(width, height)
    }

    fn draw(&self, ui: &MainWindow, id: WidgetId, ctx: &mut DrawContext<'_>) {
        let rect = ctx.rect();
        let line_height = ui.line_height(id);
        for (i, line) in self.lines(ui, id).into_iter().enumerate() {
            let origin = Point::new(rect.x, rect.y + line_height * i as i32);
            ctx.draw_text(line, origin, painting::TEXT);
        }
    }
}

#[cfg(test)]
mod tests {
    use dockyard_core::Rect;
    use dockyard_render::{DrawCommand, RecordingRenderer};

    use super::*;

    #[test]
    fn test_detached_label_measures_on_attach() {
        let mut ui = MainWindow::new(Box::new(RecordingRenderer::new()), Size::new(320, 240))
            .expect("recording renderer never fails");
        let id = Label::create(&mut ui, "Hi");
        assert_eq!(ui.rect(id).size(), Size::ZERO);
        ui.add(id);
        assert_eq!(ui.rect(id).size(), Size::new(14, 18));
    }

    #[test]
    fn test_word_wrap_grows_height() {
        let mut ui = MainWindow::new(Box::new(RecordingRenderer::new()), Size::new(320, 240))
            .expect("recording renderer never fails");
        let id = Label::new("aaaa bbbb cccc").with_word_wrap(true).into_widget(&mut ui);
        ui.set_width(id, 70);
        ui.add(id);
        let rect = ui.rect(id);
        assert_eq!(rect.w, 70);
        assert!(rect.h >= 36, "wrapped onto several lines, got {rect:?}");
    }

    #[test]
    fn test_draws_each_line() {
        let renderer = RecordingRenderer::new();
        let log = renderer.log();
        let mut ui = MainWindow::new(Box::new(renderer), Size::new(320, 240))
            .expect("recording renderer never fails");
        let id = Label::create(&mut ui, "one\ntwo");
        ui.set_rect(id, Rect::new(10, 10, 0, 0));
        ui.add(id);
        ui.draw();

        let texts: Vec<(String, Point)> = log
            .commands()
            .into_iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, origin, .. } => Some((text, origin)),
                _ => None,
            })
            .collect();
        assert_eq!(
            texts,
            vec![
                ("one".to_string(), Point::new(10, 10)),
                ("two".to_string(), Point::new(10, 28)),
            ]
        );
    }
}
