//! A headless renderer that records draw commands.
//!
//! [`RecordingRenderer`] has deterministic text metrics and appends every
//! draw call to a shared [`DrawLog`]. It backs the toolkit's tests and can
//! serve hosts that translate the command list to their own backend.
//!
//! # Metrics
//!
//! - glyph advance: `ceil(size * 0.5)` per grapheme cluster
//! - line height: `ceil(size * 1.25)`

use std::sync::Arc;

use dockyard_core::{Point, Rect, Size};
use parking_lot::Mutex;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::{RenderError, RenderResult};
use crate::renderer::Renderer;
use crate::types::{Color, FontSpec};

/// Font size used when a caller passes an unresolved spec.
const FALLBACK_SIZE: f32 = 14.0;

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    BeginFrame(Size),
    EndFrame,
    SetClip(Rect),
    FillRect { rect: Rect, color: Color },
    StrokeRect { rect: Rect, color: Color, width: i32 },
    Line { from: Point, to: Point, color: Color },
    Text { text: String, origin: Point, font: FontSpec, color: Color },
}

impl DrawCommand {
    /// Issue this command against `renderer`.
    pub fn replay(&self, renderer: &mut dyn Renderer) {
        match self {
            DrawCommand::BeginFrame(size) => renderer.begin_frame(*size),
            DrawCommand::EndFrame => renderer.end_frame(),
            DrawCommand::SetClip(rect) => renderer.set_clip_rect(*rect),
            DrawCommand::FillRect { rect, color } => renderer.fill_rect(*rect, *color),
            DrawCommand::StrokeRect { rect, color, width } => {
                renderer.stroke_rect(*rect, *color, *width)
            }
            DrawCommand::Line { from, to, color } => renderer.draw_line(*from, *to, *color),
            DrawCommand::Text { text, origin, font, color } => {
                renderer.draw_text(font, text, *origin, *color)
            }
        }
    }
}

/// A shared, cloneable handle to the recorded commands.
#[derive(Debug, Clone, Default)]
pub struct DrawLog {
    commands: Arc<Mutex<Vec<DrawCommand>>>,
}

impl DrawLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, command: DrawCommand) {
        self.commands.lock().push(command);
    }

    /// Copy out every recorded command.
    pub fn commands(&self) -> Vec<DrawCommand> {
        self.commands.lock().clone()
    }

    /// The text of every `Text` command, in draw order.
    pub fn texts(&self) -> Vec<String> {
        self.commands
            .lock()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.commands.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.lock().is_empty()
    }

    pub fn clear(&self) {
        self.commands.lock().clear();
    }
}

/// A renderer with fixed metrics that records every draw call.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    log: DrawLog,
    error: Option<RenderError>,
}

impl RecordingRenderer {
    /// Create a renderer with a fresh log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer that appends to an existing log.
    pub fn with_log(log: DrawLog) -> Self {
        Self { log, error: None }
    }

    /// Make [`Renderer::status`] report `error`.
    pub fn with_error(mut self, error: RenderError) -> Self {
        self.error = Some(error);
        self
    }

    /// The log this renderer writes to.
    pub fn log(&self) -> DrawLog {
        self.log.clone()
    }

    fn size_of(font: &FontSpec) -> f32 {
        if font.size > 0.0 {
            font.size
        } else {
            FALLBACK_SIZE
        }
    }

    /// Horizontal advance of one grapheme cluster.
    pub fn glyph_advance(font: &FontSpec) -> i32 {
        (Self::size_of(font) * 0.5).ceil() as i32
    }
}

impl Renderer for RecordingRenderer {
    fn status(&self) -> RenderResult<()> {
        match &self.error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn line_height(&self, font: &FontSpec) -> i32 {
        (Self::size_of(font) * 1.25).ceil() as i32
    }

    fn measure_text(&self, font: &FontSpec, text: &str) -> Size {
        let clusters = text.graphemes(true).filter(|g| *g != "\n").count() as i32;
        Size::new(clusters * Self::glyph_advance(font), self.line_height(font))
    }

    fn begin_frame(&mut self, size: Size) {
        self.log.push(DrawCommand::BeginFrame(size));
    }

    fn end_frame(&mut self) {
        self.log.push(DrawCommand::EndFrame);
    }

    fn set_clip_rect(&mut self, rect: Rect) {
        self.log.push(DrawCommand::SetClip(rect));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.log.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: i32) {
        self.log.push(DrawCommand::StrokeRect { rect, color, width });
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color) {
        self.log.push(DrawCommand::Line { from, to, color });
    }

    fn draw_text(&mut self, font: &FontSpec, text: &str, origin: Point, color: Color) {
        self.log.push(DrawCommand::Text {
            text: text.to_string(),
            origin,
            font: font.clone(),
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics() {
        let renderer = RecordingRenderer::new();
        let font = FontSpec::new("sans", 14.0);
        assert_eq!(renderer.line_height(&font), 18);
        assert_eq!(RecordingRenderer::glyph_advance(&font), 7);
        assert_eq!(renderer.measure_text(&font, "abc"), Size::new(21, 18));
        // Combining sequences count once.
        assert_eq!(renderer.measure_text(&font, "e\u{301}").w, 7);
    }

    #[test]
    fn test_unresolved_font_uses_fallback() {
        let renderer = RecordingRenderer::new();
        assert_eq!(renderer.line_height(&FontSpec::default()), 18);
    }

    #[test]
    fn test_line_break_uses_metrics() {
        let renderer = RecordingRenderer::new();
        let font = FontSpec::new("sans", 20.0); // 10px per glyph
        let lb = renderer.line_break(&font, "aaaa bbbb", 50).unwrap();
        assert_eq!(lb.slice("aaaa bbbb"), "aaaa");
        assert_eq!(lb.next, Some(5));
    }

    #[test]
    fn test_records_commands() {
        let mut renderer = RecordingRenderer::new();
        let log = renderer.log();
        renderer.begin_frame(Size::new(10, 10));
        renderer.fill_rect(Rect::new(0, 0, 10, 10), Color::WHITE);
        renderer.draw_text(&FontSpec::new("sans", 14.0), "hi", Point::ZERO, Color::BLACK);
        renderer.end_frame();

        assert_eq!(log.len(), 4);
        assert_eq!(log.texts(), vec!["hi".to_string()]);
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_replay_reproduces_commands() {
        let mut source = RecordingRenderer::new();
        let recorded = source.log();
        source.begin_frame(Size::new(20, 20));
        source.set_clip_rect(Rect::new(0, 0, 20, 20));
        source.stroke_rect(Rect::new(1, 1, 5, 5), Color::BLACK, 2);
        source.draw_line(Point::ZERO, Point::new(5, 5), Color::WHITE);
        source.draw_text(&FontSpec::new("sans", 14.0), "x", Point::new(2, 3), Color::BLACK);
        source.end_frame();

        let mut target = RecordingRenderer::new();
        let replayed = target.log();
        for command in recorded.commands() {
            command.replay(&mut target);
        }
        assert_eq!(replayed.commands(), recorded.commands());
    }

    #[test]
    fn test_status_error() {
        let renderer = RecordingRenderer::new().with_error(RenderError::FontNotFound {
            face: "missing".into(),
        });
        assert_eq!(
            renderer.status(),
            Err(RenderError::FontNotFound { face: "missing".into() })
        );
        assert!(RecordingRenderer::new().status().is_ok());
    }
}
