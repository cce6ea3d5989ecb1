//! Draw traversal.
//!
//! A frame is painted in three passes so windows cover content and open
//! dropdowns cover everything:
//!
//! 1. the root subtree, skipping windows and combos
//! 2. the windows, docked ones first, then by ascending draw priority
//! 3. every visible combo subtree, exempt from window culling
//!
//! The dock preview and dock icons are painted last. Within one walk,
//! children flagged `draw_last` follow their normally ordered siblings.

use dockyard_core::logging::targets;
use dockyard_core::{PerfSpan, Rect, WidgetId};
use dockyard_render::{DrawCommand, Renderer};

use super::MainWindow;
use crate::widget::{DrawContext, WidgetKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Content,
    Windows,
    Combos,
}

/// Where one frame's commands collect while the tree is walked.
struct DisplayList<'a> {
    commands: Vec<DrawCommand>,
    metrics: &'a dyn Renderer,
}

impl MainWindow {
    /// Paint one frame with the current renderer.
    ///
    /// Widgets draw into a display list while the renderer stays attached,
    /// so text metrics queried from `draw` are live. The list is then
    /// replayed into the renderer.
    pub fn draw(&mut self) {
        let _span = PerfSpan::new("draw");
        let Some(commands) = self.record_frame() else {
            return;
        };
        let Some(renderer) = self.renderer.as_deref_mut() else {
            return;
        };
        for command in &commands {
            command.replay(renderer);
        }
    }

    /// Build the display list for one frame.
    fn record_frame(&self) -> Option<Vec<DrawCommand>> {
        let metrics = self.renderer.as_deref()?;
        let mut frame = DisplayList {
            commands: Vec::new(),
            metrics,
        };

        let full = self.rect(self.root);
        frame.commands.push(DrawCommand::BeginFrame(full.size()));
        frame.commands.push(DrawCommand::SetClip(full));

        self.draw_subtree(&mut frame, self.root, full, Pass::Content);

        let mut windows: Vec<WidgetId> = self
            .children(self.root)
            .iter()
            .copied()
            .filter(|&id| self.kind(id) == Some(WidgetKind::Window) && !self.is_hidden(id))
            .collect();
        windows.sort_by_key(|&id| self.window_stacking_key(id));
        for &window in &windows {
            self.draw_subtree(&mut frame, window, full, Pass::Windows);
        }

        let combos: Vec<WidgetId> = self
            .subtree(self.root)
            .into_iter()
            .filter(|&id| self.kind(id) == Some(WidgetKind::Combo) && self.is_visible(id))
            .collect();
        for &combo in &combos {
            self.draw_subtree(&mut frame, combo, full, Pass::Combos);
        }

        for overlay in [self.dock_preview, self.dock_icons] {
            if !self.is_hidden(overlay) {
                self.draw_node(&mut frame, overlay);
            }
        }

        frame.commands.push(DrawCommand::EndFrame);
        tracing::trace!(
            target: targets::DRAW,
            windows = windows.len(),
            combos = combos.len(),
            commands = frame.commands.len(),
            "frame drawn"
        );
        Some(frame.commands)
    }

    fn draw_subtree(&self, frame: &mut DisplayList<'_>, id: WidgetId, clip: Rect, pass: Pass) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if node.hidden || node.draw_manually {
            return;
        }
        let entry = match pass {
            Pass::Content => id == self.root,
            Pass::Windows => node.kind == WidgetKind::Window,
            Pass::Combos => node.kind == WidgetKind::Combo,
        };
        if !entry {
            let deferred = match pass {
                Pass::Content => matches!(node.kind, WidgetKind::Window | WidgetKind::Combo),
                Pass::Windows => node.kind == WidgetKind::Combo,
                Pass::Combos => false,
            };
            if deferred {
                return;
            }
        }

        if pass != Pass::Combos
            && let Some(window) = node.window
            && !self.absolute_rect(window).intersects(&self.absolute_rect(id))
        {
            return;
        }

        self.draw_node(frame, id);

        let child_clip = match node.behavior.as_ref().and_then(|b| b.children_clip_rect(self, id)) {
            Some(rect) => clip.intersect(&rect).unwrap_or_else(|| self.rect(self.root)),
            None => clip,
        };
        if child_clip != clip {
            frame.commands.push(DrawCommand::SetClip(child_clip));
        }

        let (last, normal): (Vec<WidgetId>, Vec<WidgetId>) = node
            .children
            .iter()
            .partition(|&&c| self.nodes.get(c).is_some_and(|n| n.draw_last));
        for child in normal.into_iter().chain(last) {
            self.draw_subtree(frame, child, child_clip, pass);
        }

        if child_clip != clip {
            frame.commands.push(DrawCommand::SetClip(clip));
        }
    }

    /// Paint a single widget, without its children.
    fn draw_node(&self, frame: &mut DisplayList<'_>, id: WidgetId) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let Some(behavior) = node.behavior.as_deref() else {
            return;
        };
        let mut ctx = DrawContext::new(
            &mut frame.commands,
            frame.metrics,
            self.absolute_rect(id),
            self.font(id),
        )
        .with_hover(node.hover)
        .with_focus(self.keyboard_focus == Some(id));
        behavior.draw(self, id, &mut ctx);
    }
}
