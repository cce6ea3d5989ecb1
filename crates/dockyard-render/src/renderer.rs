//! The renderer collaborator interface.
//!
//! The widget toolkit never rasterizes anything itself. It computes
//! rectangles, then asks a [`Renderer`] for text metrics and issues draw
//! primitives against it. Concrete backends (GPU, software, recording)
//! implement this trait.

use dockyard_core::{Point, Rect, Size};
use unicode_segmentation::UnicodeSegmentation;

use crate::error::RenderResult;
use crate::types::{Color, FontSpec, LineBreak};

/// A 2D drawing surface plus text metrics.
///
/// All coordinates are absolute window pixels. Fonts passed in are already
/// resolved (no inherited fields).
pub trait Renderer {
    /// Report setup failures (missing fonts, context creation).
    ///
    /// Checked once by the host after construction.
    fn status(&self) -> RenderResult<()> {
        Ok(())
    }

    // =========================================================================
    // Text metrics
    // =========================================================================

    /// Height of one line of text in the given font.
    fn line_height(&self, font: &FontSpec) -> i32;

    /// Size of a single run of text (no wrapping).
    fn measure_text(&self, font: &FontSpec, text: &str) -> Size;

    /// Find the first line of `text` when wrapped to `wrap_width`.
    ///
    /// A `wrap_width` of zero or less only breaks at hard newlines.
    fn line_break(&self, font: &FontSpec, text: &str, wrap_width: i32) -> Option<LineBreak> {
        break_line(|run| self.measure_text(font, run).w, text, wrap_width)
    }

    // =========================================================================
    // Frame
    // =========================================================================

    /// Start a frame covering `size`.
    fn begin_frame(&mut self, size: Size);

    /// Finish the current frame.
    fn end_frame(&mut self);

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Replace the current clip rect.
    fn set_clip_rect(&mut self, rect: Rect);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: i32);

    fn draw_line(&mut self, from: Point, to: Point, color: Color);

    /// Draw a single line of text with its top-left corner at `origin`.
    fn draw_text(&mut self, font: &FontSpec, text: &str, origin: Point, color: Color);
}

/// Word-wrap helper shared by renderers.
///
/// `measure` returns the pixel width of a run. Lines break at word
/// boundaries; a single word wider than `wrap_width` is split between
/// grapheme clusters, always keeping at least one cluster per line.
pub fn break_line<F>(measure: F, text: &str, wrap_width: i32) -> Option<LineBreak>
where
    F: Fn(&str) -> i32,
{
    if text.is_empty() {
        return None;
    }

    let start = text.len() - text.trim_start_matches(' ').len();
    let hard_end = text[start..].find('\n').map_or(text.len(), |i| start + i);
    let line = &text[start..hard_end];

    let mut end = line.len();
    if wrap_width > 0 && measure(line) > wrap_width {
        let mut fit = 0;
        for (idx, word) in line.split_word_bound_indices() {
            let candidate = idx + word.len();
            if measure(line[..candidate].trim_end()) > wrap_width {
                break;
            }
            fit = candidate;
        }

        if fit == 0 {
            for (idx, grapheme) in line.grapheme_indices(true) {
                let candidate = idx + grapheme.len();
                if fit > 0 && measure(&line[..candidate]) > wrap_width {
                    break;
                }
                fit = candidate;
            }
        }
        end = fit;
    }

    let len = line[..end].trim_end().len();

    // Skip the spaces at a soft break and the newline at a hard one.
    let mut next = start + end;
    next += text[next..hard_end].len() - text[next..hard_end].trim_start_matches(' ').len();
    if next == hard_end && hard_end < text.len() {
        next += 1;
    }

    Some(LineBreak {
        start,
        len,
        next: (next < text.len()).then_some(next),
    })
}
