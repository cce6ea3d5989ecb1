//! Tracing targets, the widget tree dump and perf spans.
//!
//! # Tracing Integration
//!
//! Dockyard uses the `tracing` crate for instrumentation. Nothing is printed
//! unless the host installs a subscriber:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("dockyard::docking=debug")
//!         .init();
//! }
//! ```
//!
//! Structural misuse of the tree API (adding a window to a layout, popping an
//! input lock that is not on top) is silently ignored, but always leaves a
//! `trace` event behind on the relevant target.
//!
//! # Debug Visualization
//!
//! Any tree implementing [`TreeSource`] can be printed with
//! [`WidgetTreeDebug`]:
//!
//! ```ignore
//! let debug = WidgetTreeDebug::new();
//! println!("{}", debug.format_subtree(&tree, root)?);
//! ```

use std::fmt::Write as FmtWrite;

use crate::{CoreError, CoreResult, Rect, WidgetId};

/// `tracing` targets, one per subsystem.
pub mod targets {
    /// Core utilities: tree dumps.
    pub const CORE: &str = "dockyard_core";
    /// Handler list target.
    pub const SIGNAL: &str = "dockyard_core::signal";
    /// Widget tree attach/detach/destroy.
    pub const TREE: &str = "dockyard::tree";
    /// Rect resolution and stack layouts.
    pub const LAYOUT: &str = "dockyard::layout";
    /// Input routing, hover, focus and input locks.
    pub const INPUT: &str = "dockyard::input";
    /// Window docking.
    pub const DOCKING: &str = "dockyard::docking";
    /// Draw traversal.
    pub const DRAW: &str = "dockyard::draw";
}

/// A description of one node, as needed by [`WidgetTreeDebug`].
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDescription {
    /// Short type name, e.g. `Button`.
    pub kind: &'static str,
    /// Human readable label (title, text), may be empty.
    pub label: String,
    /// The node's current parent-relative rect.
    pub rect: Rect,
    pub hidden: bool,
    pub hover: bool,
    /// Children in tree order.
    pub children: Vec<WidgetId>,
}

/// Read access to a widget tree for debug formatting.
pub trait TreeSource {
    /// Describe a node, or `None` if the id is not part of the tree.
    fn describe(&self, id: WidgetId) -> Option<NodeDescription>;
}

/// How branches are drawn in a tree dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// `|`, `+--` and `` `-- ``.
    Ascii,
    #[default]
    Unicode,
    /// Dashes only, no vertical rules.
    Compact,
}

/// What a tree dump includes.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    pub style: TreeStyle,
    pub show_ids: bool,
    pub show_rects: bool,
    /// Append `hidden` and `hover` markers.
    pub show_flags: bool,
    /// Nodes deeper than this are left out.
    pub max_depth: Option<usize>,
    /// Spaces after each vertical rule.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: false,
            show_rects: true,
            show_flags: true,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Everything, ids included.
    pub fn detailed() -> Self {
        Self {
            show_ids: true,
            ..Default::default()
        }
    }

    /// Kinds and labels only.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_rects: false,
            show_flags: false,
            ..Default::default()
        }
    }
}

/// Renders a [`TreeSource`] as indented text.
#[derive(Debug, Clone, Default)]
pub struct WidgetTreeDebug {
    options: TreeFormatOptions,
}

impl WidgetTreeDebug {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Dump `root` and everything below it.
    ///
    /// Fails if any id reachable from `root` is not in the tree.
    pub fn format_subtree(&self, tree: &dyn TreeSource, root: WidgetId) -> CoreResult<String> {
        let mut output = String::new();
        self.format_subtree_into(tree, root, 0, true, &mut output)?;
        crate::dockyard_trace!(root = ?root, lines = output.lines().count(), "tree formatted");
        Ok(output)
    }

    fn format_subtree_into(
        &self,
        tree: &dyn TreeSource,
        id: WidgetId,
        depth: usize,
        is_last: bool,
        output: &mut String,
    ) -> CoreResult<()> {
        if self.options.max_depth.is_some_and(|max| depth > max) {
            crate::dockyard_debug!(id = ?id, depth, "tree dump cut at max depth");
            return Ok(());
        }

        let Some(node) = tree.describe(id) else {
            crate::dockyard_warn!(id = ?id, "tree dump reached a dangling child");
            return Err(CoreError::InvalidWidget(id));
        };

        output.push_str(&self.line_prefix(depth, is_last));
        output.push_str(node.kind);
        if !node.label.is_empty() {
            // Writing into a String cannot fail.
            let _ = write!(output, " \"{}\"", node.label);
        }
        if self.options.show_ids {
            let _ = write!(output, " [{:?}]", id);
        }
        if self.options.show_rects {
            let r = node.rect;
            let _ = write!(output, " ({}, {}, {}x{})", r.x, r.y, r.w, r.h);
        }
        if self.options.show_flags {
            if node.hidden {
                output.push_str(" hidden");
            }
            if node.hover {
                output.push_str(" hover");
            }
        }
        output.push('\n');

        let child_count = node.children.len();
        for (i, child) in node.children.into_iter().enumerate() {
            self.format_subtree_into(tree, child, depth + 1, i + 1 == child_count, output)?;
        }
        Ok(())
    }

    fn line_prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, tee, corner) = match self.options.style {
            TreeStyle::Ascii => ("|", "+--", "`--"),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500}", "\u{2514}\u{2500}\u{2500}"),
            TreeStyle::Compact => ("", "-", "-"),
        };

        let mut prefix = String::new();
        for _ in 0..(depth - 1) {
            prefix.push_str(branch);
            for _ in 0..self.options.indent_size {
                prefix.push(' ');
            }
        }
        prefix.push_str(if is_last { corner } else { tee });
        prefix.push(' ');
        prefix
    }
}

/// Keeps an `info` span on `dockyard::perf` entered until dropped.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "dockyard::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// `trace!` on the core target.
#[macro_export]
macro_rules! dockyard_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: $crate::logging::targets::CORE, $($arg)*)
    };
}

#[macro_export]
macro_rules! dockyard_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: $crate::logging::targets::CORE, $($arg)*)
    };
}

#[macro_export]
macro_rules! dockyard_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: $crate::logging::targets::CORE, $($arg)*)
    };
}
