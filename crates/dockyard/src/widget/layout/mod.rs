//! Rect resolution and layouts.
//!
//! Layout is eager: every mutator that can affect a rect runs the pipeline
//! below before returning, so rects are always consistent with the current
//! inputs.
//!
//! # The Pipeline
//!
//! For a widget and a candidate rect:
//!
//! 1. Resolve the candidate against the parent with
//!    [`MainWindow::aligned_stretched_rect`]. Stretch wins on any axis it
//!    covers; align is only consulted on the others. Children of a
//!    [`StackLayout`] skip this step, their layout owns their rects.
//! 2. Hand the result to the widget's [`Widget::set_rect`](crate::Widget::set_rect)
//!    callback, which stores it by default.
//! 3. If the stored rect changed, re-run the pipeline for every child using
//!    the child's current rect as the candidate.
//! 4. If the parent is a stack layout and the size changed, reflow the
//!    parent.
//!
//! The recursion of step 3 runs from an explicit work list, so deep trees do
//! not grow the call stack.

mod stack_layout;

pub use stack_layout::{Orientation, StackLayout};

use dockyard_core::logging::targets;
use dockyard_core::{PerfSpan, Rect, WidgetId};

use crate::main_window::MainWindow;
use crate::widget::{Align, Stretch, WidgetKind};

/// One pending step of the layout pipeline.
struct LayoutStep {
    id: WidgetId,
    /// `None` reads the widget's current rect when the step runs.
    candidate: Option<Rect>,
    /// Recurse into children even when the rect is unchanged.
    force: bool,
}

impl MainWindow {
    /// Resolve `candidate` against the widget's parent, margin, stretch and
    /// align.
    ///
    /// Returns `candidate` unchanged for detached widgets and for children of
    /// a stack layout.
    pub fn aligned_stretched_rect(&self, id: WidgetId, candidate: Rect) -> Rect {
        let Some(node) = self.nodes.get(id) else {
            return candidate;
        };
        let Some(parent) = node.parent.and_then(|p| self.nodes.get(p)) else {
            return candidate;
        };
        if parent.kind == WidgetKind::Layout {
            return candidate;
        }

        let pw = parent.rect.w;
        let ph = parent.rect.h;
        let m = node.margin;
        let mut rect = candidate;

        if node.stretch.contains(Stretch::WIDTH) {
            rect.w = scaled(pw, node.stretch_width_scale) - m.left - m.right;
            rect.x = m.left;
        } else if node.align.contains(Align::LEFT) {
            rect.x = m.left;
        } else if node.align.contains(Align::CENTER) {
            rect.x = m.left + (pw - m.right) / 2 - rect.w / 2;
        } else if node.align.contains(Align::RIGHT) {
            rect.x = pw - m.right - rect.w;
        }

        if node.stretch.contains(Stretch::HEIGHT) {
            rect.h = scaled(ph, node.stretch_height_scale) - m.top - m.bottom;
            rect.y = m.top;
        } else if node.align.contains(Align::TOP) {
            rect.y = m.top;
        } else if node.align.contains(Align::MIDDLE) {
            rect.y = m.top + (ph - m.bottom) / 2 - rect.h / 2;
        } else if node.align.contains(Align::BOTTOM) {
            rect.y = ph - m.bottom - rect.h;
        }

        rect
    }

    /// Re-apply the widget's current rect through the layout pipeline.
    ///
    /// Used after margin, stretch, align or spacing changes.
    pub fn refresh_rect(&mut self, id: WidgetId) {
        self.run_layout(LayoutStep {
            id,
            candidate: None,
            force: false,
        });
    }

    /// Run the pipeline with a new candidate rect, leaving `user_rect` alone.
    pub(crate) fn set_rect_internal(&mut self, id: WidgetId, rect: Rect) {
        self.run_layout(LayoutStep {
            id,
            candidate: Some(rect),
            force: false,
        });
    }

    /// Re-resolve every node of a subtree, changed or not.
    pub(crate) fn relayout_subtree(&mut self, id: WidgetId) {
        self.run_layout(LayoutStep {
            id,
            candidate: None,
            force: true,
        });
    }

    fn run_layout(&mut self, first: LayoutStep) {
        let _span = first.force.then(|| PerfSpan::new("layout"));
        let mut work = vec![first];

        while let Some(step) = work.pop() {
            let Some(node) = self.nodes.get(step.id) else {
                continue;
            };
            let id = step.id;
            let before = node.rect;
            let resolved = self.aligned_stretched_rect(id, step.candidate.unwrap_or(before));

            if self
                .with_behavior(id, |b, ui| b.set_rect(ui, id, resolved))
                .is_none()
            {
                self.store_rect(id, resolved);
            }

            let after = self.rect(id);
            if after != before {
                tracing::trace!(target: targets::LAYOUT, ?id, ?before, ?after, "rect changed");
            }

            if after != before || step.force {
                work.extend(self.children(id).iter().rev().map(|&child| LayoutStep {
                    id: child,
                    candidate: None,
                    force: step.force,
                }));
            }

            if after.size() != before.size()
                && let Some(parent) = self.parent(id)
                && self.kind(parent) == Some(WidgetKind::Layout)
                && !self.reflowing.contains(&parent)
            {
                self.reflow_stack(parent);
            }
        }
    }

    /// Size every node of the subtree to its measured size.
    ///
    /// Non-zero `user_rect` components win over the measurement. A zero
    /// measurement keeps the current size rather than collapsing it.
    pub(crate) fn resize_to_measured(&mut self, id: WidgetId) {
        for node_id in self.subtree(id) {
            let measured = self
                .with_behavior(node_id, |b, ui| b.measure(ui, node_id))
                .unwrap_or_default();
            let Some(node) = self.nodes.get_mut(node_id) else {
                continue;
            };
            let user = node.user_rect;
            if user.w != 0 {
                node.rect.w = user.w;
            } else if measured.w != 0 {
                node.rect.w = measured.w;
            }
            if user.h != 0 {
                node.rect.h = user.h;
            } else if measured.h != 0 {
                node.rect.h = measured.h;
            }
        }
    }
}

fn scaled(length: i32, scale: f32) -> i32 {
    let scale = if scale < 0.01 { 1.0 } else { scale };
    (length as f32 * scale) as i32
}
