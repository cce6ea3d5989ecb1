//! The MainWindow: widget arena, input router and docking host.
//!
//! A [`MainWindow`] owns every widget of one UI in a slot-map arena keyed by
//! [`WidgetId`]. Its synthetic root node (kind [`WidgetKind::MainWindow`])
//! holds:
//!
//! - the *content* widget, a catch-all container for non-window widgets
//! - every floating or docked [`Window`](crate::widgets::Window)
//! - one consolidation [`TabBar`](crate::widgets::TabBar) per dock position
//! - the dock icon and dock preview overlays
//! - the optional menu bar
//!
//! All entry points run to completion before returning; layout is eager, so
//! every rect is current as soon as a mutator returns.
//!
//! # Example
//!
//! ```
//! use dockyard::{DockPosition, MainWindow, RecordingRenderer, Size};
//! use dockyard::widgets::{Button, Window};
//!
//! let mut ui = MainWindow::new(Box::new(RecordingRenderer::new()), Size::new(800, 600))?;
//!
//! let tools = Window::create(&mut ui, "Tools");
//! ui.set_rect(tools, dockyard::Rect::new(50, 50, 300, 200));
//! ui.add(tools);
//!
//! let ok = Button::create(&mut ui, "OK");
//! Window::add(&mut ui, tools, ok);
//!
//! ui.dock_window(tools, DockPosition::West);
//! assert_eq!(ui.window_dock_position(tools), DockPosition::West);
//! # Ok::<(), dockyard::DockyardError>(())
//! ```

mod docking;
mod draw;
mod events;
mod input;
mod tree;

pub use docking::DockPosition;

use std::any::Any;

use dockyard_core::logging::{NodeDescription, TreeSource};
use dockyard_core::{Border, Point, Rect, Signal, Size, WidgetId, WidgetTreeDebug};
use dockyard_render::{FontSpec, Renderer};
use slotmap::{SecondaryMap, SlotMap};

use crate::config::UiConfig;
use crate::cursor::CursorShape;
use crate::error::DockyardResult;
use crate::event::Event;
use crate::widget::base::WidgetNode;
use crate::widget::{Align, Stretch, Widget, WidgetKind};
use crate::widgets::{DockIcons, DockPreview, TabBar};

/// The root of a widget tree.
pub struct MainWindow {
    pub(crate) nodes: SlotMap<WidgetId, WidgetNode>,
    renderer: Option<Box<dyn Renderer>>,
    renderer_generation: u64,
    config: UiConfig,

    root: WidgetId,
    content: WidgetId,
    menu_bar: Option<WidgetId>,

    // Input state
    lock_stack: Vec<WidgetId>,
    keyboard_focus: Option<WidgetId>,
    hover_window: Option<WidgetId>,
    moving_window: Option<WidgetId>,
    cursor: CursorShape,
    shift_down: bool,
    control_down: bool,
    mouse_pos: Point,

    // Docking state, indexed by `DockPosition::index`
    docks: [Vec<WidgetId>; 4],
    /// Slot thickness, including the tab bar of shared North/South slots.
    dock_thickness: [i32; 4],
    dock_tab_bars: [WidgetId; 4],
    dock_icons: WidgetId,
    dock_preview: WidgetId,
    dock_preview_position: DockPosition,

    // Events
    handlers: SecondaryMap<WidgetId, Signal<Event>>,
    central_handler: Option<Box<dyn FnMut(&Event)>>,

    /// Stack layouts currently inside their own reflow.
    pub(crate) reflowing: Vec<WidgetId>,
}

impl MainWindow {
    /// Create a MainWindow of `size` with the default config.
    ///
    /// Fails if the renderer reports a setup error.
    pub fn new(renderer: Box<dyn Renderer>, size: Size) -> DockyardResult<Self> {
        Self::with_config(renderer, size, UiConfig::default())
    }

    /// Create a MainWindow with a custom config.
    pub fn with_config(
        renderer: Box<dyn Renderer>,
        size: Size,
        config: UiConfig,
    ) -> DockyardResult<Self> {
        config.validate()?;
        renderer.status()?;

        let mut nodes = SlotMap::with_key();
        let mut root_node = WidgetNode::new(WidgetKind::MainWindow, None);
        root_node.rect = Rect::from_origin_size(Point::ZERO, size);
        root_node.user_rect = root_node.rect;
        root_node.renderer = Some(1);
        let root = nodes.insert(root_node);
        nodes[root].main_window = Some(root);

        let mut ui = Self {
            nodes,
            renderer: Some(renderer),
            renderer_generation: 1,
            config,
            root,
            content: WidgetId::default(),
            menu_bar: None,
            lock_stack: Vec::new(),
            keyboard_focus: None,
            hover_window: None,
            moving_window: None,
            cursor: CursorShape::Arrow,
            shift_down: false,
            control_down: false,
            mouse_pos: Point::ZERO,
            docks: Default::default(),
            dock_thickness: [0; 4],
            dock_tab_bars: [WidgetId::default(); 4],
            dock_icons: WidgetId::default(),
            dock_preview: WidgetId::default(),
            dock_preview_position: DockPosition::None,
            handlers: SecondaryMap::new(),
            central_handler: None,
            reflowing: Vec::new(),
        };

        ui.content = ui.create_container();
        ui.add_child(root, ui.content);

        for position in DockPosition::ALL {
            let bar = TabBar::create(&mut ui);
            ui.store_visible(bar, false);
            TabBar::add_listener(&mut ui, bar, MainWindow::dock_tab_changed);
            ui.add_child(root, bar);
            if let Some(index) = position.index() {
                ui.dock_tab_bars[index] = bar;
            }
        }

        ui.dock_preview = ui.create(WidgetKind::Widget, Box::new(DockPreview));
        ui.dock_icons = ui.create(WidgetKind::Widget, Box::new(DockIcons));
        for overlay in [ui.dock_preview, ui.dock_icons] {
            if let Some(node) = ui.nodes.get_mut(overlay) {
                node.draw_manually = true;
                node.hidden = true;
            }
            ui.add_child(root, overlay);
        }

        ui.update_content_rect();
        Ok(ui)
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// The synthetic root widget.
    #[inline]
    pub fn root(&self) -> WidgetId {
        self.root
    }

    /// The container that receives non-window widgets passed to [`add`](Self::add).
    #[inline]
    pub fn content(&self) -> WidgetId {
        self.content
    }

    #[inline]
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Check that `id` refers to a live widget.
    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn kind(&self, id: WidgetId) -> Option<WidgetKind> {
        self.nodes.get(id).map(|n| n.kind)
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// Children in tree order; empty for unknown ids.
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.nodes.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// The root this widget is attached to, `None` while detached.
    pub fn main_window_of(&self, id: WidgetId) -> Option<WidgetId> {
        self.nodes.get(id).and_then(|n| n.main_window)
    }

    /// The nearest Window ancestor.
    pub fn window_of(&self, id: WidgetId) -> Option<WidgetId> {
        self.nodes.get(id).and_then(|n| n.window)
    }

    /// The Window a widget belongs to for hit-testing: itself if it is a
    /// Window, otherwise its nearest Window ancestor.
    pub(crate) fn owning_window(&self, id: WidgetId) -> Option<WidgetId> {
        let node = self.nodes.get(id)?;
        if node.kind == WidgetKind::Window {
            Some(id)
        } else {
            node.window
        }
    }

    /// Check whether `ancestor` is `id` or one of its ancestors.
    pub fn is_ancestor_or_self(&self, ancestor: WidgetId, id: WidgetId) -> bool {
        let mut current = Some(id);
        while let Some(cur) = current {
            if cur == ancestor {
                return true;
            }
            current = self.parent(cur);
        }
        false
    }

    /// The first ancestor (or `id` itself) of the given kind.
    pub fn find_ancestor_of_kind(&self, id: WidgetId, kind: WidgetKind) -> Option<WidgetId> {
        let mut current = Some(id);
        while let Some(cur) = current {
            if self.kind(cur) == Some(kind) {
                return Some(cur);
            }
            current = self.parent(cur);
        }
        None
    }

    /// Every widget in the subtree rooted at `id`, pre-order.
    pub(crate) fn subtree(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            if let Some(node) = self.nodes.get(cur) {
                out.push(cur);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    // =========================================================================
    // Creation
    // =========================================================================

    /// Create a detached widget of `kind` with a behavior.
    pub(crate) fn create(&mut self, kind: WidgetKind, behavior: Box<dyn Widget>) -> WidgetId {
        self.nodes.insert(WidgetNode::new(kind, Some(behavior)))
    }

    /// Create a detached widget without behavior.
    pub(crate) fn create_plain(&mut self, kind: WidgetKind) -> WidgetId {
        self.nodes.insert(WidgetNode::new(kind, None))
    }

    /// Create a detached custom widget.
    pub fn create_widget(&mut self, behavior: impl Widget) -> WidgetId {
        self.create(WidgetKind::Widget, Box::new(behavior))
    }

    /// Create a detached, behavior-less container.
    pub fn create_container(&mut self) -> WidgetId {
        self.create_plain(WidgetKind::Widget)
    }

    // =========================================================================
    // Behavior access
    // =========================================================================

    /// Borrow a widget's behavior as a concrete type.
    ///
    /// Returns `None` for unknown ids, for a different type, or while the
    /// widget's own callback is running.
    pub fn widget<T: Widget>(&self, id: WidgetId) -> Option<&T> {
        let behavior: &dyn Any = self.nodes.get(id)?.behavior.as_deref()?;
        behavior.downcast_ref::<T>()
    }

    /// Mutably borrow a widget's behavior as a concrete type.
    pub fn widget_mut<T: Widget>(&mut self, id: WidgetId) -> Option<&mut T> {
        let behavior: &mut dyn Any = self.nodes.get_mut(id)?.behavior.as_deref_mut()?;
        behavior.downcast_mut::<T>()
    }

    /// Run `f` with the widget's behavior detached from the tree.
    pub(crate) fn with_behavior<R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut dyn Widget, &mut MainWindow) -> R,
    ) -> Option<R> {
        let mut behavior = self.nodes.get_mut(id)?.behavior.take()?;
        let result = f(behavior.as_mut(), self);
        if let Some(node) = self.nodes.get_mut(id) {
            node.behavior = Some(behavior);
        }
        Some(result)
    }

    // =========================================================================
    // Geometry accessors
    // =========================================================================

    /// Resolved rect, relative to the parent.
    pub fn rect(&self, id: WidgetId) -> Rect {
        self.nodes.get(id).map_or(Rect::ZERO, |n| n.rect)
    }

    /// The last explicitly requested rect.
    pub fn user_rect(&self, id: WidgetId) -> Rect {
        self.nodes.get(id).map_or(Rect::ZERO, |n| n.user_rect)
    }

    /// Rect in MainWindow coordinates.
    pub fn absolute_rect(&self, id: WidgetId) -> Rect {
        let Some(node) = self.nodes.get(id) else {
            return Rect::ZERO;
        };
        let mut rect = node.rect;
        let mut current = node.parent;
        while let Some(parent) = current {
            let Some(p) = self.nodes.get(parent) else {
                break;
            };
            rect = rect.offset(p.rect.x, p.rect.y);
            current = p.parent;
        }
        rect
    }

    pub fn margin(&self, id: WidgetId) -> Border {
        self.nodes.get(id).map_or(Border::ZERO, |n| n.margin)
    }

    pub fn stretch(&self, id: WidgetId) -> Stretch {
        self.nodes.get(id).map_or(Stretch::NONE, |n| n.stretch)
    }

    pub fn align(&self, id: WidgetId) -> Align {
        self.nodes.get(id).map_or(Align::NONE, |n| n.align)
    }

    /// The MainWindow's own size.
    pub fn size(&self) -> Size {
        self.rect(self.root).size()
    }

    // =========================================================================
    // Geometry mutators
    // =========================================================================

    /// Request a rect and re-run layout for the widget and its subtree.
    pub fn set_rect(&mut self, id: WidgetId, rect: Rect) {
        let Some(node) = self.nodes.get_mut(id) else {
            debug_assert!(false, "set_rect on unknown widget");
            return;
        };
        node.user_rect = rect;
        self.set_rect_internal(id, rect);
    }

    pub fn set_position(&mut self, id: WidgetId, pos: Point) {
        let mut rect = self.rect(id);
        rect.x = pos.x;
        rect.y = pos.y;
        self.set_rect(id, rect);
    }

    pub fn set_width(&mut self, id: WidgetId, w: i32) {
        let mut rect = self.rect(id);
        rect.w = w;
        self.set_rect(id, rect);
    }

    pub fn set_height(&mut self, id: WidgetId, h: i32) {
        let mut rect = self.rect(id);
        rect.h = h;
        self.set_rect(id, rect);
    }

    pub fn set_margin(&mut self, id: WidgetId, margin: Border) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.margin = margin;
            self.refresh_rect(id);
        }
    }

    pub fn set_stretch(&mut self, id: WidgetId, stretch: Stretch) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.stretch = stretch;
            self.refresh_rect(id);
        }
    }

    /// Scale factors applied to the parent size when stretching. Values
    /// below 0.01 count as 1.0.
    pub fn set_stretch_scale(&mut self, id: WidgetId, width: f32, height: f32) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.stretch_width_scale = width;
            node.stretch_height_scale = height;
            self.refresh_rect(id);
        }
    }

    pub fn set_align(&mut self, id: WidgetId, align: Align) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.align = align;
            self.refresh_rect(id);
        }
    }

    /// Store a rect without running layout. Used by [`Widget::set_rect`]
    /// implementations.
    pub fn store_rect(&mut self, id: WidgetId, rect: Rect) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.rect = rect;
        }
    }

    // =========================================================================
    // Flags
    // =========================================================================

    /// Show or hide a widget through its `set_visible` callback.
    pub fn set_visible(&mut self, id: WidgetId, visible: bool) {
        if self
            .with_behavior(id, |b, ui| b.set_visible(ui, id, visible))
            .is_none()
        {
            self.store_visible(id, visible);
        }
    }

    /// Store visibility without callbacks. Used by [`Widget::set_visible`]
    /// implementations.
    pub fn store_visible(&mut self, id: WidgetId, visible: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.hidden = !visible;
        }
    }

    /// The widget's own hidden flag.
    pub fn is_hidden(&self, id: WidgetId) -> bool {
        self.nodes.get(id).is_none_or(|n| n.hidden)
    }

    /// Visible when the widget and every ancestor are not hidden.
    pub fn is_visible(&self, id: WidgetId) -> bool {
        let mut current = Some(id);
        while let Some(cur) = current {
            let Some(node) = self.nodes.get(cur) else {
                return false;
            };
            if node.hidden {
                return false;
            }
            current = node.parent;
        }
        true
    }

    pub fn is_hovered(&self, id: WidgetId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.hover)
    }

    /// Let this widget win hit-testing over overlapping siblings.
    pub fn set_overlap(&mut self, id: WidgetId, overlap: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.overlap = overlap;
        }
    }

    pub fn set_draw_last(&mut self, id: WidgetId, draw_last: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.draw_last = draw_last;
        }
    }

    pub fn set_draw_manually(&mut self, id: WidgetId, draw_manually: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.draw_manually = draw_manually;
        }
    }

    pub fn set_input_not_clipped_to_parent(&mut self, id: WidgetId, value: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.input_not_clipped_to_parent = value;
        }
    }

    // =========================================================================
    // Fonts and text metrics
    // =========================================================================

    /// The widget's font with unset fields filled from the config.
    pub fn font(&self, id: WidgetId) -> FontSpec {
        let fallback = self.config.default_font();
        self.nodes
            .get(id)
            .map_or_else(|| fallback.clone(), |n| n.font.resolved(&fallback))
    }

    /// Set a widget's font. An empty face or zero size inherits the default.
    pub fn set_font(&mut self, id: WidgetId, face: &str, size: f32) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        node.font = FontSpec::new(face, size);
        self.with_behavior(id, |b, ui| b.font_changed(ui, id));
        self.resize_to_measured(id);
        self.refresh_rect(id);
    }

    /// The renderer, if the widget has received it.
    fn renderer_for(&self, id: WidgetId) -> Option<&dyn Renderer> {
        let node = self.nodes.get(id)?;
        if node.main_window.is_none() || node.renderer != Some(self.renderer_generation) {
            return None;
        }
        self.renderer.as_deref()
    }

    /// Measure text in the widget's font. Zero until the widget is attached.
    pub fn text_size(&self, id: WidgetId, text: &str) -> Size {
        self.renderer_for(id)
            .map_or(Size::ZERO, |r| r.measure_text(&self.font(id), text))
    }

    /// Line height of the widget's font. Zero until the widget is attached.
    pub fn line_height(&self, id: WidgetId) -> i32 {
        self.renderer_for(id)
            .map_or(0, |r| r.line_height(&self.font(id)))
    }

    /// Break `text` into lines no wider than `wrap_width`, in the widget's font.
    pub fn wrap_text<'t>(&self, id: WidgetId, text: &'t str, wrap_width: i32) -> Vec<&'t str> {
        let mut lines = Vec::new();
        let Some(renderer) = self.renderer_for(id) else {
            return lines;
        };
        let font = self.font(id);
        let mut offset = 0;
        while let Some(lb) = renderer.line_break(&font, &text[offset..], wrap_width) {
            lines.push(lb.slice(&text[offset..]));
            match lb.next {
                Some(next) if next > 0 => offset += next,
                _ => break,
            }
        }
        lines
    }

    // =========================================================================
    // Renderer
    // =========================================================================

    /// Swap the renderer, notify every attached widget and re-measure.
    pub fn set_renderer(&mut self, renderer: Box<dyn Renderer>) -> DockyardResult<()> {
        renderer.status()?;
        self.renderer = Some(renderer);
        self.renderer_generation += 1;
        if let Some(root) = self.nodes.get_mut(self.root) {
            root.renderer = Some(self.renderer_generation);
        }

        let children = self.children(self.root).to_vec();
        for child in children {
            self.propagate_renderer(child);
            self.resize_to_measured(child);
            self.refresh_rect(child);
        }
        self.update_content_rect();
        Ok(())
    }

    // =========================================================================
    // Debugging
    // =========================================================================

    /// Render the whole tree as text.
    pub fn dump_tree(&self) -> String {
        WidgetTreeDebug::new()
            .format_subtree(self, self.root)
            .unwrap_or_default()
    }
}

impl TreeSource for MainWindow {
    fn describe(&self, id: WidgetId) -> Option<NodeDescription> {
        let node = self.nodes.get(id)?;
        Some(NodeDescription {
            kind: node.kind.name(),
            label: node.behavior.as_ref().map(|b| b.label()).unwrap_or_default(),
            rect: node.rect,
            hidden: node.hidden,
            hover: node.hover,
            children: node.children.clone(),
        })
    }
}

impl std::fmt::Debug for MainWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MainWindow")
            .field("widgets", &self.nodes.len())
            .field("size", &self.size())
            .field("keyboard_focus", &self.keyboard_focus)
            .field("lock_stack", &self.lock_stack)
            .finish()
    }
}
