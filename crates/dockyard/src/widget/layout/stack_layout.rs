//! Stack layout: children placed one after another along an axis.
//!
//! A `StackLayout` owns the rects of its children. On the primary axis each
//! child keeps its own size unless it stretches on that axis, in which case
//! it receives an equal share of the space left over. On the cross axis a
//! stretched child fills the layout; otherwise its align flags place it.
//!
//! # Example
//!
//! ```
//! use dockyard::{MainWindow, Rect, RecordingRenderer, Size, Stretch};
//! use dockyard::widget::layout::{Orientation, StackLayout};
//!
//! let mut ui = MainWindow::new(Box::new(RecordingRenderer::new()), Size::new(400, 300))?;
//! let column = StackLayout::create(&mut ui, Orientation::Vertical);
//! ui.set_rect(column, Rect::new(0, 0, 100, 100));
//! ui.add(column);
//!
//! let top = ui.create_container();
//! ui.set_rect(top, Rect::new(0, 0, 100, 30));
//! let rest = ui.create_container();
//! ui.set_stretch(rest, Stretch::ALL);
//! StackLayout::add(&mut ui, column, top);
//! StackLayout::add(&mut ui, column, rest);
//!
//! assert_eq!(ui.rect(rest), Rect::new(0, 30, 100, 70));
//! # Ok::<(), dockyard::DockyardError>(())
//! ```

use dockyard_core::logging::targets;
use dockyard_core::{Border, Rect, Size, WidgetId};

use crate::main_window::MainWindow;
use crate::widget::{Align, Stretch, Widget, WidgetKind};

/// The primary axis of a layout or scroller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Items are arranged left to right.
    Horizontal,
    /// Items are arranged top to bottom.
    #[default]
    Vertical,
}

impl Orientation {
    /// Get the cross (perpendicular) orientation.
    #[inline]
    pub fn cross(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// Length of `size` along this axis.
    #[inline]
    pub fn main(self, size: Size) -> i32 {
        match self {
            Orientation::Horizontal => size.w,
            Orientation::Vertical => size.h,
        }
    }

    /// Leading and trailing margin along this axis.
    #[inline]
    fn margins(self, m: Border) -> (i32, i32) {
        match self {
            Orientation::Horizontal => (m.left, m.right),
            Orientation::Vertical => (m.top, m.bottom),
        }
    }

    fn stretch(self) -> Stretch {
        match self {
            Orientation::Horizontal => Stretch::WIDTH,
            Orientation::Vertical => Stretch::HEIGHT,
        }
    }

    /// The (centered, far-edge) align flags that act on this axis.
    fn align_flags(self) -> (Align, Align) {
        match self {
            Orientation::Horizontal => (Align::CENTER, Align::RIGHT),
            Orientation::Vertical => (Align::MIDDLE, Align::BOTTOM),
        }
    }

    /// Build a rect from primary and cross axis position and length.
    fn rect(self, main_pos: i32, main_len: i32, cross_pos: i32, cross_len: i32) -> Rect {
        match self {
            Orientation::Horizontal => Rect::new(main_pos, cross_pos, main_len, cross_len),
            Orientation::Vertical => Rect::new(cross_pos, main_pos, cross_len, main_len),
        }
    }
}

/// A layout that stacks its children along one axis.
#[derive(Debug, Clone, Default)]
pub struct StackLayout {
    orientation: Orientation,
    spacing: i32,
}

impl StackLayout {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            spacing: 0,
        }
    }

    /// Create a detached stack layout widget.
    pub fn create(ui: &mut MainWindow, orientation: Orientation) -> WidgetId {
        ui.create(WidgetKind::Layout, Box::new(Self::new(orientation)))
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn spacing(&self) -> i32 {
        self.spacing
    }

    /// Add a child. Windows are rejected.
    pub fn add(ui: &mut MainWindow, layout: WidgetId, child: WidgetId) -> bool {
        if matches!(ui.kind(child), Some(WidgetKind::Window | WidgetKind::MainWindow)) {
            tracing::trace!(target: targets::TREE, ?child, "stack layout rejects windows");
            return false;
        }
        ui.add_child(layout, child)
    }

    pub fn set_spacing(ui: &mut MainWindow, layout: WidgetId, spacing: i32) {
        if let Some(this) = ui.widget_mut::<StackLayout>(layout) {
            this.spacing = spacing;
            ui.reflow_stack(layout);
        }
    }

    pub fn set_orientation(ui: &mut MainWindow, layout: WidgetId, orientation: Orientation) {
        if let Some(this) = ui.widget_mut::<StackLayout>(layout) {
            this.orientation = orientation;
            ui.reflow_stack(layout);
        }
    }
}

impl Widget for StackLayout {
    fn set_rect(&mut self, ui: &mut MainWindow, id: WidgetId, rect: Rect) {
        ui.store_rect(id, rect);
        ui.reflow_stack_with(id, self.orientation, self.spacing);
    }
}

impl MainWindow {
    /// Reflow a stack layout's children with its current settings.
    pub(crate) fn reflow_stack(&mut self, id: WidgetId) {
        let Some(layout) = self.widget::<StackLayout>(id) else {
            return;
        };
        let (orientation, spacing) = (layout.orientation, layout.spacing);
        self.reflow_stack_with(id, orientation, spacing);
    }

    pub(crate) fn reflow_stack_with(&mut self, id: WidgetId, orientation: Orientation, spacing: i32) {
        let size = self.rect(id).size();
        let children = self.children(id).to_vec();
        let cross = orientation.cross();
        let main_stretch = orientation.stretch();
        let cross_stretch = cross.stretch();
        let (cross_center, cross_far) = cross.align_flags();

        // Space left for stretching children.
        let mut available = orientation.main(size);
        let mut stretching = 0;
        for (i, &child) in children.iter().enumerate() {
            if i > 0 {
                available -= spacing;
            }
            let (lead, trail) = orientation.margins(self.margin(child));
            available -= lead + trail;
            if self.stretch(child).contains(main_stretch) {
                stretching += 1;
            } else {
                available -= orientation.main(self.rect(child).size());
            }
        }
        let share = if stretching > 0 {
            available.max(0) / stretching
        } else {
            0
        };

        self.reflowing.push(id);
        let cross_len = orientation.cross().main(size);
        let mut offset = 0;
        for (i, &child) in children.iter().enumerate() {
            if i > 0 {
                offset += spacing;
            }
            let margin = self.margin(child);
            let (lead, trail) = orientation.margins(margin);
            let (cross_lead, cross_trail) = cross.margins(margin);
            let stretch = self.stretch(child);
            let align = self.align(child);
            let current = self.rect(child).size();

            offset += lead;
            let main_len = if stretch.contains(main_stretch) {
                share
            } else {
                orientation.main(current)
            };

            let (cross_pos, child_cross) = if stretch.contains(cross_stretch) {
                (cross_lead, cross_len - cross_lead - cross_trail)
            } else {
                let len = cross.main(current);
                let pos = if align.contains(cross_center) {
                    cross_lead + (cross_len - cross_trail) / 2 - len / 2
                } else if align.contains(cross_far) {
                    cross_len - cross_trail - len
                } else {
                    cross_lead
                };
                (pos, len)
            };

            let rect = orientation.rect(offset, main_len, cross_pos, child_cross);
            self.set_rect_internal(child, rect);
            offset += main_len + trail;
        }
        self.reflowing.retain(|&l| l != id);

        tracing::trace!(target: targets::LAYOUT, ?id, children = children.len(), share, "stack reflow");
    }
}
