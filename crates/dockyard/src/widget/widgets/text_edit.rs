//! Single-line text field.
//!
//! Positions inside the text are grapheme indices, so a cursor never lands
//! inside a multi-codepoint character. Clicking the field focuses it; a
//! shift-click or a drag extends the selection from its anchor.
//!
//! # Keys
//!
//! | Key | Effect |
//! |-----|--------|
//! | Left / Right | move one grapheme, extend with shift |
//! | Home / End | jump to either end, extend with shift |
//! | Backspace / Delete | remove the selection or one grapheme |

use std::ops::Range;

use dockyard_core::{Border, Point, Rect, Size, WidgetId};
use unicode_segmentation::UnicodeSegmentation;

use crate::cursor::CursorShape;
use crate::event::{Key, KeyCode, MouseButton};
use crate::main_window::MainWindow;
use crate::widget::painting;
use crate::widget::{DrawContext, Widget, WidgetKind};

/// An editable line of text.
#[derive(Debug, Clone, Default)]
pub struct TextEdit {
    text: String,
    /// Grapheme index of the caret.
    cursor: usize,
    /// The fixed end of the selection, if one is being made.
    anchor: Option<usize>,
    dragging: bool,
}

impl TextEdit {
    pub fn create(ui: &mut MainWindow) -> WidgetId {
        ui.create(WidgetKind::TextEdit, Box::new(TextEdit::default()))
    }

    pub fn create_with_text(ui: &mut MainWindow, text: &str) -> WidgetId {
        let mut edit = TextEdit::default();
        edit.replace_text(text);
        ui.create(WidgetKind::TextEdit, Box::new(edit))
    }

    pub fn text(ui: &MainWindow, id: WidgetId) -> &str {
        ui.widget::<TextEdit>(id).map_or("", |e| e.text.as_str())
    }

    /// Replace the text. The caret moves to the end and the selection is
    /// dropped.
    pub fn set_text(ui: &mut MainWindow, id: WidgetId, text: &str) {
        if let Some(edit) = ui.widget_mut::<TextEdit>(id) {
            edit.replace_text(text);
        }
    }

    pub fn cursor(ui: &MainWindow, id: WidgetId) -> usize {
        ui.widget::<TextEdit>(id).map_or(0, |e| e.cursor)
    }

    /// The selected grapheme range, if it is not empty.
    pub fn selection(ui: &MainWindow, id: WidgetId) -> Option<Range<usize>> {
        ui.widget::<TextEdit>(id).and_then(TextEdit::selection_range)
    }

    pub fn selected_text(ui: &MainWindow, id: WidgetId) -> Option<&str> {
        let edit = ui.widget::<TextEdit>(id)?;
        let range = edit.selection_range()?;
        let start = byte_offset(&edit.text, range.start);
        let end = byte_offset(&edit.text, range.end);
        Some(&edit.text[start..end])
    }

    fn replace_text(&mut self, text: &str) {
        self.text = text.chars().filter(|c| !c.is_control()).collect();
        self.cursor = grapheme_count(&self.text);
        self.anchor = None;
    }

    fn selection_range(&self) -> Option<Range<usize>> {
        let anchor = self.anchor?;
        let range = anchor.min(self.cursor)..anchor.max(self.cursor);
        (!range.is_empty()).then_some(range)
    }

    /// Move the caret, extending the selection or dropping it.
    fn move_to(&mut self, target: usize, extend: bool) {
        if extend {
            self.anchor.get_or_insert(self.cursor);
        } else {
            self.anchor = None;
        }
        self.cursor = target.min(grapheme_count(&self.text));
    }

    fn delete_selection(&mut self) -> bool {
        let Some(range) = self.selection_range() else {
            self.anchor = None;
            return false;
        };
        self.remove_graphemes(range.clone());
        self.cursor = range.start;
        self.anchor = None;
        true
    }

    fn remove_graphemes(&mut self, range: Range<usize>) {
        let start = byte_offset(&self.text, range.start);
        let end = byte_offset(&self.text, range.end);
        self.text.replace_range(start..end, "");
    }

    fn insert(&mut self, text: &str) {
        let text: String = text.chars().filter(|c| !c.is_control()).collect();
        if text.is_empty() {
            return;
        }
        self.delete_selection();
        let at = byte_offset(&self.text, self.cursor);
        self.text.insert_str(at, &text);
        // Inserted marks may merge with the preceding grapheme.
        self.cursor = grapheme_count(&self.text[..at + text.len()]);
    }

    fn backspace(&mut self) {
        if self.delete_selection() || self.cursor == 0 {
            return;
        }
        self.remove_graphemes(self.cursor - 1..self.cursor);
        self.cursor -= 1;
    }

    fn delete_forward(&mut self) {
        if self.delete_selection() || self.cursor >= grapheme_count(&self.text) {
            return;
        }
        self.remove_graphemes(self.cursor..self.cursor + 1);
    }

    fn handle_key(&mut self, key: Key, shift: bool) {
        let len = grapheme_count(&self.text);
        match key {
            Key::Left => {
                let target = match self.selection_range() {
                    Some(range) if !shift => range.start,
                    _ => self.cursor.saturating_sub(1),
                };
                self.move_to(target, shift);
            }
            Key::Right => {
                let target = match self.selection_range() {
                    Some(range) if !shift => range.end,
                    _ => self.cursor + 1,
                };
                self.move_to(target, shift);
            }
            Key::Home => self.move_to(0, shift),
            Key::End => self.move_to(len, shift),
            Key::Backspace => self.backspace(),
            Key::Delete => self.delete_forward(),
            _ => {}
        }
    }

    /// The area the text is drawn in.
    fn text_rect(ui: &MainWindow, id: WidgetId) -> Rect {
        let border = ui.config().text_edit_border;
        ui.absolute_rect(id).deflate(Border::uniform(border))
    }

    /// The grapheme boundary nearest to `x`.
    fn index_at(&self, ui: &MainWindow, id: WidgetId, x: i32) -> usize {
        let left = Self::text_rect(ui, id).x;
        let mut best = (0, (x - left).abs());
        for (i, (offset, grapheme)) in self.text.grapheme_indices(true).enumerate() {
            let end = offset + grapheme.len();
            let distance = (x - left - ui.text_size(id, &self.text[..end]).w).abs();
            if distance < best.1 {
                best = (i + 1, distance);
            }
        }
        best.0
    }
}

fn grapheme_count(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Byte offset of grapheme `index`, or the text length past the end.
fn byte_offset(text: &str, index: usize) -> usize {
    text.grapheme_indices(true)
        .nth(index)
        .map_or(text.len(), |(offset, _)| offset)
}

impl Widget for TextEdit {
    fn label(&self) -> String {
        format!("TextEdit({:?})", self.text)
    }

    fn measure(&mut self, ui: &MainWindow, id: WidgetId) -> Size {
        Size::new(0, ui.line_height(id) + 2 * ui.config().text_edit_border)
    }

    fn draw(&self, ui: &MainWindow, id: WidgetId, ctx: &mut DrawContext<'_>) {
        let rect = ctx.rect();
        ctx.fill_rect(rect, painting::FIELD);
        let outline = if ctx.has_focus() {
            painting::SELECTION
        } else {
            painting::BORDER
        };
        ctx.stroke_rect(rect, outline);

        let text_rect = Self::text_rect(ui, id);
        let x_of = |ctx: &DrawContext<'_>, index: usize| {
            text_rect.x + ctx.text_size(&self.text[..byte_offset(&self.text, index)]).w
        };

        if let Some(range) = self.selection_range() {
            let start = x_of(ctx, range.start);
            let end = x_of(ctx, range.end);
            let highlight = Rect::new(start, text_rect.y, end - start, text_rect.h);
            ctx.fill_rect(highlight, painting::SELECTION);
        }
        if !self.text.is_empty() {
            ctx.draw_text(&self.text, text_rect.origin(), painting::TEXT);
        }
        if ctx.has_focus() {
            let caret = Rect::new(x_of(ctx, self.cursor), text_rect.y, 1, text_rect.h);
            ctx.fill_rect(caret, painting::TEXT);
        }
    }

    fn mouse_move(&mut self, ui: &mut MainWindow, id: WidgetId, pos: Point, _delta: Point) {
        if Self::text_rect(ui, id).contains(pos) {
            ui.set_cursor(CursorShape::IBeam);
        }
        if self.dragging {
            let target = self.index_at(ui, id, pos.x);
            self.move_to(target, true);
        }
    }

    fn mouse_button_down(&mut self, ui: &mut MainWindow, id: WidgetId, button: MouseButton, pos: Point) {
        if button != MouseButton::Left {
            return;
        }
        ui.set_keyboard_focus(Some(id));
        let target = self.index_at(ui, id, pos.x);
        self.move_to(target, ui.is_shift_down());
        self.dragging = true;
        ui.push_lock_input(id);
    }

    fn mouse_button_up(&mut self, ui: &mut MainWindow, id: WidgetId, button: MouseButton, _pos: Point) {
        if button != MouseButton::Left || !self.dragging {
            return;
        }
        self.dragging = false;
        ui.pop_lock_input(id);
    }

    fn key_down(&mut self, ui: &mut MainWindow, _id: WidgetId, key: KeyCode) {
        self.handle_key(key.key(), key.shift() || ui.is_shift_down());
    }

    fn text_input(&mut self, _ui: &mut MainWindow, _id: WidgetId, text: &str) {
        self.insert(text);
    }
}

#[cfg(test)]
mod tests {
    use dockyard_render::RecordingRenderer;

    use super::*;

    fn edit(text: &str) -> TextEdit {
        let mut edit = TextEdit::default();
        edit.replace_text(text);
        edit
    }

    fn setup(text: &str) -> (MainWindow, WidgetId) {
        let mut ui = MainWindow::new(Box::new(RecordingRenderer::new()), Size::new(300, 200))
            .expect("recording renderer never fails");
        let id = TextEdit::create_with_text(&mut ui, text);
        ui.set_rect(id, Rect::new(10, 10, 200, 0));
        ui.add(id);
        (ui, id)
    }

    #[test]
    fn test_cursor_moves_by_grapheme() {
        // "e" followed by a combining acute accent is one grapheme.
        let mut e = edit("ae\u{301}b");
        assert_eq!(e.cursor, 3);
        e.handle_key(Key::Left, false);
        e.handle_key(Key::Backspace, false);
        assert_eq!(e.text, "ab");
        assert_eq!(e.cursor, 1);
    }

    #[test]
    fn test_shift_extends_selection() {
        let mut e = edit("hello");
        e.handle_key(Key::Home, false);
        e.handle_key(Key::Right, true);
        e.handle_key(Key::Right, true);
        assert_eq!(e.selection_range(), Some(0..2));

        e.handle_key(Key::Right, false);
        assert_eq!(e.selection_range(), None);
        assert_eq!(e.cursor, 2);

        e.handle_key(Key::End, true);
        e.handle_key(Key::Delete, false);
        assert_eq!(e.text, "he");
    }

    #[test]
    fn test_insert_replaces_selection() {
        let mut e = edit("abc");
        e.handle_key(Key::Left, true);
        e.insert("XY\n");
        assert_eq!(e.text, "abXY");
        assert_eq!(e.cursor, 4);
    }

    #[test]
    fn test_measure_is_line_plus_border() {
        let (ui, id) = setup("");
        assert_eq!(ui.rect(id), Rect::new(10, 10, 200, 26));
    }

    #[test]
    fn test_click_focuses_and_places_cursor() {
        let (mut ui, id) = setup("hello");
        // text starts at x 14; 7px per grapheme
        let pos = Point::new(14 + 14 + 2, 20);
        ui.mouse_move(pos, Point::ZERO);
        assert_eq!(ui.cursor(), CursorShape::IBeam);

        ui.mouse_button_down(MouseButton::Left, pos);
        ui.mouse_button_up(MouseButton::Left, pos);
        assert_eq!(ui.keyboard_focus(), Some(id));
        assert_eq!(TextEdit::cursor(&ui, id), 2);

        ui.text_input("__");
        assert_eq!(TextEdit::text(&ui, id), "he__llo");
    }

    #[test]
    fn test_shift_click_uses_latch() {
        let (mut ui, id) = setup("hello");
        let start = Point::new(14, 20);
        ui.mouse_button_down(MouseButton::Left, start);
        ui.mouse_button_up(MouseButton::Left, start);

        ui.key_down(KeyCode::new(Key::LeftShift));
        let end = Point::new(14 + 28, 20);
        ui.mouse_button_down(MouseButton::Left, end);
        ui.mouse_button_up(MouseButton::Left, end);
        ui.key_up(KeyCode::new(Key::LeftShift));

        assert_eq!(TextEdit::selection(&ui, id), Some(0..4));
        assert_eq!(TextEdit::selected_text(&ui, id), Some("hell"));
    }
}
