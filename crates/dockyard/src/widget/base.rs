//! Widget tree nodes.
//!
//! Every widget is a [`WidgetNode`] stored in the MainWindow's arena. The
//! node holds what the generic tree, layout and input code needs; anything
//! widget-specific lives in the node's boxed [`Widget`] behavior.

use dockyard_core::{Border, Rect, WidgetId};
use dockyard_render::FontSpec;

use super::geometry::{Align, Stretch};
use super::traits::Widget;

/// The type tag of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WidgetKind {
    MainWindow,
    Window,
    Button,
    Combo,
    List,
    Scroller,
    TabBar,
    TabPage,
    Tabbed,
    TextEdit,
    /// A stack layout.
    Layout,
    Label,
    GroupBox,
    Frame,
    MenuBar,
    MenuBarButton,
    Spinner,
    RadioButton,
    CheckBox,
    /// A generic container or custom widget.
    #[default]
    Widget,
}

impl WidgetKind {
    /// Short display name.
    pub fn name(self) -> &'static str {
        match self {
            WidgetKind::MainWindow => "MainWindow",
            WidgetKind::Window => "Window",
            WidgetKind::Button => "Button",
            WidgetKind::Combo => "Combo",
            WidgetKind::List => "List",
            WidgetKind::Scroller => "Scroller",
            WidgetKind::TabBar => "TabBar",
            WidgetKind::TabPage => "TabPage",
            WidgetKind::Tabbed => "Tabbed",
            WidgetKind::TextEdit => "TextEdit",
            WidgetKind::Layout => "StackLayout",
            WidgetKind::Label => "Label",
            WidgetKind::GroupBox => "GroupBox",
            WidgetKind::Frame => "Frame",
            WidgetKind::MenuBar => "MenuBar",
            WidgetKind::MenuBarButton => "MenuBarButton",
            WidgetKind::Spinner => "Spinner",
            WidgetKind::RadioButton => "RadioButton",
            WidgetKind::CheckBox => "CheckBox",
            WidgetKind::Widget => "Widget",
        }
    }
}

/// One node of the widget tree.
pub(crate) struct WidgetNode {
    pub kind: WidgetKind,

    pub parent: Option<WidgetId>,
    pub children: Vec<WidgetId>,
    /// The root this node is attached to, `None` while detached.
    pub main_window: Option<WidgetId>,
    /// Nearest Window ancestor.
    pub window: Option<WidgetId>,

    /// Resolved rect, relative to the parent.
    pub rect: Rect,
    /// Explicitly requested rect. Zero width/height means "use measured".
    pub user_rect: Rect,
    pub margin: Border,
    pub stretch: Stretch,
    pub stretch_width_scale: f32,
    pub stretch_height_scale: f32,
    pub align: Align,

    pub hidden: bool,
    pub hover: bool,
    /// Set for one hit-test pass when an overlapping sibling wins.
    pub ignore: bool,
    pub overlap: bool,
    /// Skipped by the tree walk; drawn explicitly by its owner.
    pub draw_manually: bool,
    /// Drawn after all normally ordered siblings.
    pub draw_last: bool,
    pub input_not_clipped_to_parent: bool,

    /// Unset fields fall back to the configured default font.
    pub font: FontSpec,
    /// Generation of the renderer last propagated to this node.
    pub renderer: Option<u64>,

    /// Taken out while one of its callbacks runs.
    pub behavior: Option<Box<dyn Widget>>,
}

impl WidgetNode {
    pub fn new(kind: WidgetKind, behavior: Option<Box<dyn Widget>>) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            main_window: None,
            window: None,
            rect: Rect::ZERO,
            user_rect: Rect::ZERO,
            margin: Border::ZERO,
            stretch: Stretch::NONE,
            stretch_width_scale: 1.0,
            stretch_height_scale: 1.0,
            align: Align::NONE,
            hidden: false,
            hover: false,
            ignore: false,
            overlap: false,
            draw_manually: false,
            draw_last: false,
            input_not_clipped_to_parent: false,
            font: FontSpec::default(),
            renderer: None,
            behavior,
        }
    }
}
