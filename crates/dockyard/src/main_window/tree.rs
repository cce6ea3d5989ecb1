//! Attach, detach and destroy.

use dockyard_core::WidgetId;
use dockyard_core::logging::targets;

use super::MainWindow;
use crate::widget::WidgetKind;

impl MainWindow {
    /// Add a widget to the MainWindow.
    ///
    /// Windows become direct children of the root so they float above the
    /// content; everything else goes into the content widget.
    pub fn add(&mut self, child: WidgetId) -> bool {
        match self.kind(child) {
            Some(WidgetKind::Window) => self.add_child(self.root, child),
            Some(WidgetKind::MainWindow) | None => {
                tracing::trace!(target: targets::TREE, ?child, "rejected add to MainWindow");
                false
            }
            Some(_) => self.add_child(self.content, child),
        }
    }

    /// Detach a widget added with [`add`](Self::add).
    pub fn remove(&mut self, child: WidgetId) -> bool {
        match self.parent(child) {
            Some(parent) => self.remove_child(parent, child),
            None => false,
        }
    }

    /// Attach `child` as the last child of `parent`.
    ///
    /// Rejected (returning `false`) when `child` is a MainWindow, already has
    /// a parent, is an ancestor of `parent`, or is a Window going anywhere
    /// but the root.
    pub fn add_child(&mut self, parent: WidgetId, child: WidgetId) -> bool {
        let (Some(parent_kind), Some(child_kind)) = (self.kind(parent), self.kind(child)) else {
            debug_assert!(false, "add_child with unknown widget");
            return false;
        };

        let rejected = if child_kind == WidgetKind::MainWindow {
            Some("child is a MainWindow")
        } else if child_kind == WidgetKind::Window && parent_kind != WidgetKind::MainWindow {
            Some("windows can only be added to the MainWindow")
        } else if self.parent(child).is_some() {
            Some("child already has a parent")
        } else if self.is_ancestor_or_self(child, parent) {
            Some("child is an ancestor of parent")
        } else {
            None
        };
        if let Some(reason) = rejected {
            tracing::trace!(target: targets::TREE, ?parent, ?child, reason, "rejected add_child");
            return false;
        }

        let main_window = self.main_window_of(parent);
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
        self.assign_tree_links(child, main_window);

        if main_window.is_some() {
            self.propagate_renderer(child);
        }
        self.resize_to_measured(child);
        self.relayout_subtree(child);
        if parent_kind == WidgetKind::Layout {
            self.reflow_stack(parent);
        }

        tracing::debug!(target: targets::TREE, ?parent, ?child, kind = child_kind.name(), "attached");
        self.with_behavior(child, |b, ui| b.added(ui, child, parent));
        true
    }

    /// Detach `child` from `parent` without destroying it.
    ///
    /// A no-op when `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: WidgetId, child: WidgetId) -> bool {
        let Some(node) = self.nodes.get_mut(parent) else {
            return false;
        };
        let Some(pos) = node.children.iter().position(|&c| c == child) else {
            tracing::trace!(target: targets::TREE, ?parent, ?child, "remove of a non-child");
            return false;
        };
        node.children.remove(pos);
        let parent_kind = node.kind;

        if self.kind(child) == Some(WidgetKind::Window) {
            self.forget_docked(child);
        }

        let subtree = self.subtree(child);
        for &id in &subtree {
            if let Some(node) = self.nodes.get_mut(id) {
                node.hover = false;
                node.ignore = false;
            }
        }
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = None;
        }
        self.assign_tree_links(child, None);

        self.lock_stack.retain(|id| !subtree.contains(id));
        if self.keyboard_focus.is_some_and(|id| subtree.contains(&id)) {
            self.keyboard_focus = None;
        }
        if self.hover_window.is_some_and(|id| subtree.contains(&id)) {
            self.hover_window = None;
        }
        if self.moving_window.is_some_and(|id| subtree.contains(&id)) {
            self.set_moving_window(None);
        }

        if parent_kind == WidgetKind::Layout {
            self.reflow_stack(parent);
        }
        tracing::debug!(target: targets::TREE, ?parent, ?child, "detached");
        true
    }

    /// Detach a widget and free it together with all its descendants.
    ///
    /// Each node's `destroy` callback fires after its children are gone.
    pub fn destroy(&mut self, id: WidgetId) {
        if id == self.root {
            tracing::trace!(target: targets::TREE, "the root is destroyed with the MainWindow");
            return;
        }
        if let Some(parent) = self.parent(id) {
            self.remove_child(parent, id);
        }
        self.free_subtree(id);
    }

    /// [`remove_child`](Self::remove_child), then free the child if it was
    /// actually removed.
    pub fn destroy_child(&mut self, parent: WidgetId, child: WidgetId) -> bool {
        if !self.remove_child(parent, child) {
            return false;
        }
        self.free_subtree(child);
        true
    }

    fn free_subtree(&mut self, id: WidgetId) {
        let mut order = self.subtree(id);
        order.reverse();
        for node_id in order {
            self.with_behavior(node_id, |b, ui| b.destroy(ui, node_id));
            if let Some(node) = self.nodes.get(node_id)
                && let Some(parent) = node.parent
                && let Some(parent_node) = self.nodes.get_mut(parent)
            {
                parent_node.children.retain(|&c| c != node_id);
            }
            self.handlers.remove(node_id);
            self.nodes.remove(node_id);
        }
        tracing::debug!(target: targets::TREE, ?id, "destroyed");
    }

    /// Set `main_window` on the subtree and recompute each node's nearest
    /// Window ancestor.
    fn assign_tree_links(&mut self, id: WidgetId, main_window: Option<WidgetId>) {
        for node_id in self.subtree(id) {
            let window = self.parent(node_id).and_then(|p| self.owning_window(p));
            if let Some(node) = self.nodes.get_mut(node_id) {
                node.main_window = main_window;
                node.window = window;
            }
        }
    }

    /// Hand the current renderer to a subtree, firing `renderer_changed` on
    /// every node that did not have it yet.
    pub(crate) fn propagate_renderer(&mut self, id: WidgetId) {
        let generation = self.renderer_generation;
        for node_id in self.subtree(id) {
            let Some(node) = self.nodes.get_mut(node_id) else {
                continue;
            };
            if node.renderer == Some(generation) {
                continue;
            }
            node.renderer = Some(generation);
            self.with_behavior(node_id, |b, ui| b.renderer_changed(ui, node_id));
        }
    }
}

impl Drop for MainWindow {
    fn drop(&mut self) {
        let root = self.root;
        self.free_subtree(root);
    }
}
