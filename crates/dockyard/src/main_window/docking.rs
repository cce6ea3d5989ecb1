//! Window docking.
//!
//! Each of the four dock positions holds an ordered list of docked windows.
//! All occupants of a slot share one rect; only one of them is visible at a
//! time, picked with the slot's consolidation tab bar, which shows once two
//! or more windows share the slot.
//!
//! Slot geometry, for a MainWindow of width `W` and height `H` with a menu
//! bar of height `mh`:
//!
//! ```text
//! North  (0, mh, W, tN)
//! South  (0, H - tS, W, tS)
//! West   (0, mh + tN, tW, H - mh - tN - tS)
//! East   (W - tE, mh + tN, tE, H - mh - tN - tS)
//! ```
//!
//! where `t*` is each slot's thickness (0 while empty). With two or more
//! occupants the tab bar takes the bottom `dock_tab_bar_height` pixels of the
//! slot. The content widget fills what is left.

use dockyard_core::logging::targets;
use dockyard_core::{Point, Rect, Size, WidgetId};

use super::MainWindow;
use crate::event::{Event, EventKind};
use crate::widget::{Stretch, WidgetKind};
use crate::widgets::{TabBar, Window};

/// Where a Window is docked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DockPosition {
    North,
    South,
    East,
    West,
    /// Floating.
    #[default]
    None,
}

impl DockPosition {
    /// The four real dock positions.
    pub const ALL: [DockPosition; 4] = [
        DockPosition::North,
        DockPosition::South,
        DockPosition::East,
        DockPosition::West,
    ];

    /// Index into per-position tables, `None` for [`DockPosition::None`].
    pub fn index(self) -> Option<usize> {
        match self {
            DockPosition::North => Some(0),
            DockPosition::South => Some(1),
            DockPosition::East => Some(2),
            DockPosition::West => Some(3),
            DockPosition::None => None,
        }
    }

    /// North and South slots grow downwards and upwards; their thickness is
    /// a height.
    fn is_horizontal(self) -> bool {
        matches!(self, DockPosition::North | DockPosition::South)
    }
}

impl MainWindow {
    // =========================================================================
    // Queries
    // =========================================================================

    /// Where `window` is docked, [`DockPosition::None`] when floating.
    pub fn window_dock_position(&self, window: WidgetId) -> DockPosition {
        DockPosition::ALL
            .into_iter()
            .find(|p| p.index().is_some_and(|i| self.docks[i].contains(&window)))
            .unwrap_or(DockPosition::None)
    }

    /// Windows docked at `position`, in docking order.
    pub fn docked_windows(&self, position: DockPosition) -> &[WidgetId] {
        position.index().map_or(&[], |i| self.docks[i].as_slice())
    }

    /// The consolidation tab bar of a dock position.
    pub fn dock_tab_bar(&self, position: DockPosition) -> Option<WidgetId> {
        position.index().map(|i| self.dock_tab_bars[i])
    }

    /// The window currently being dragged around, if any.
    pub fn moving_window(&self) -> Option<WidgetId> {
        self.moving_window
    }

    /// The dock preview overlay widget.
    pub fn dock_preview(&self) -> WidgetId {
        self.dock_preview
    }

    /// The dock icon overlay widget.
    pub fn dock_icons(&self) -> WidgetId {
        self.dock_icons
    }

    /// The position the preview overlay currently shows.
    pub fn dock_preview_position(&self) -> DockPosition {
        self.dock_preview_position
    }

    /// The area left to the content widget.
    pub fn content_rect(&self) -> Rect {
        self.rect(self.content)
    }

    pub fn menu_bar(&self) -> Option<WidgetId> {
        self.menu_bar
    }

    fn menu_bar_height(&self) -> i32 {
        self.menu_bar
            .filter(|&m| !self.is_hidden(m))
            .map_or(0, |m| self.rect(m).h)
    }

    fn thickness(&self, position: DockPosition) -> i32 {
        position.index().map_or(0, |i| self.dock_thickness[i])
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// The full rect of a slot with the given thickness.
    fn slot_rect(&self, position: DockPosition, thickness: i32) -> Rect {
        let Size { w, h } = self.size();
        let mh = self.menu_bar_height();
        let north = self.thickness(DockPosition::North);
        let south = self.thickness(DockPosition::South);
        let side_h = h - mh - north - south;
        match position {
            DockPosition::North => Rect::new(0, mh, w, thickness),
            DockPosition::South => Rect::new(0, h - thickness, w, thickness),
            DockPosition::West => Rect::new(0, mh + north, thickness, side_h),
            DockPosition::East => Rect::new(w - thickness, mh + north, thickness, side_h),
            DockPosition::None => Rect::ZERO,
        }
    }

    /// The rect occupants of a slot get, leaving room for the tab bar when
    /// the slot is shared.
    fn occupant_rect(&self, slot: Rect, occupants: usize) -> Rect {
        if occupants >= 2 {
            let tab_h = self.config.dock_tab_bar_height;
            Rect::new(slot.x, slot.y, slot.w, slot.h - tab_h)
        } else {
            slot
        }
    }

    /// Thickness a window gets when docked into an empty slot.
    fn initial_thickness(&self, window: WidgetId, position: DockPosition) -> i32 {
        let size = self.size();
        let current = self.rect(window).size();
        let fraction = self.config.dock_size_fraction;
        if position.is_horizontal() {
            current.h.min((size.h as f32 * fraction) as i32)
        } else {
            current.w.min((size.w as f32 * fraction) as i32)
        }
    }

    /// Where `window` would end up if docked at `position`.
    pub fn dock_preview_rect(&self, window: WidgetId, position: DockPosition) -> Rect {
        let Some(index) = position.index() else {
            return Rect::ZERO;
        };
        let occupants = self.docks[index].len();
        if occupants == 0 {
            let thickness = self.initial_thickness(window, position);
            self.slot_rect(position, thickness)
        } else {
            let slot = self.slot_rect(position, self.dock_thickness[index]);
            self.occupant_rect(slot, occupants + 1)
        }
    }

    /// Absolute rect of the dock icon for `position`.
    pub fn dock_icon_rect(&self, position: DockPosition) -> Rect {
        let Size { w, h } = self.size();
        let mh = self.menu_bar_height();
        let s = self.config.dock_icon_size;
        let m = self.config.dock_icon_margin;
        let side_y = mh + (h - mh) / 2 - s / 2;
        match position {
            DockPosition::North => Rect::new(w / 2 - s / 2, mh + m, s, s),
            DockPosition::South => Rect::new(w / 2 - s / 2, h - m - s, s, s),
            DockPosition::West => Rect::new(m, side_y, s, s),
            DockPosition::East => Rect::new(w - m - s, side_y, s, s),
            DockPosition::None => Rect::ZERO,
        }
    }

    // =========================================================================
    // Docking
    // =========================================================================

    /// Dock a window at `position`.
    ///
    /// Already-docked-there is a no-op; a window docked elsewhere is undocked
    /// first. The window becomes the visible occupant of the slot.
    pub fn dock_window(&mut self, window: WidgetId, position: DockPosition) {
        debug_assert!(position != DockPosition::None, "dock_window with DockPosition::None");
        let Some(index) = position.index() else {
            return;
        };
        if self.kind(window) != Some(WidgetKind::Window) || self.parent(window) != Some(self.root) {
            debug_assert!(false, "dock_window needs a Window attached to the MainWindow");
            return;
        }
        let current = self.window_dock_position(window);
        if current == position {
            tracing::trace!(target: targets::DOCKING, ?window, ?position, "already docked");
            return;
        }
        if current != DockPosition::None {
            self.undock_window(window);
        }

        for other in self.docks[index].clone() {
            self.set_visible(other, false);
        }

        let size = self.rect(window).size();
        if let Some(w) = self.widget_mut::<Window>(window) {
            w.size_before_docking = size;
        }
        if self.docks[index].is_empty() {
            self.dock_thickness[index] = self.initial_thickness(window, position);
        }
        self.docks[index].push(window);
        self.set_visible(window, true);

        self.reanchor_docks();
        self.rebuild_dock_tabs(position);
        tracing::debug!(
            target: targets::DOCKING,
            ?window,
            ?position,
            occupants = self.docks[index].len(),
            "docked"
        );
    }

    /// Undock a window, restoring the size it had before docking.
    pub fn undock_window(&mut self, window: WidgetId) -> bool {
        let restore = self.widget::<Window>(window).map(|w| w.size_before_docking);
        self.undock_with_size(window, restore)
    }

    /// Undock with an explicit restore size, for callers holding the
    /// window's behavior.
    pub(crate) fn undock_with_size(&mut self, window: WidgetId, restore: Option<Size>) -> bool {
        let position = self.window_dock_position(window);
        let Some(index) = position.index() else {
            return false;
        };
        self.docks[index].retain(|&w| w != window);

        let remaining = self.docks[index].clone();
        if remaining.is_empty() {
            self.dock_thickness[index] = 0;
        } else if !remaining.iter().any(|&w| !self.is_hidden(w)) {
            self.set_visible(remaining[0], true);
        }

        if let Some(size) = restore.filter(|s| !s.is_empty()) {
            let rect = self.rect(window);
            self.set_rect(window, Rect::new(rect.x, rect.y, size.w, size.h));
        }

        self.reanchor_docks();
        self.rebuild_dock_tabs(position);
        tracing::debug!(target: targets::DOCKING, ?window, ?position, "undocked");
        true
    }

    /// Drop a window from the dock lists without touching its geometry.
    /// Used when the window leaves the tree.
    pub(crate) fn forget_docked(&mut self, window: WidgetId) {
        let position = self.window_dock_position(window);
        let Some(index) = position.index() else {
            return;
        };
        self.docks[index].retain(|&w| w != window);
        if self.docks[index].is_empty() {
            self.dock_thickness[index] = 0;
        } else if !self.docks[index].iter().any(|&w| !self.is_hidden(w)) {
            let first = self.docks[index][0];
            self.set_visible(first, true);
        }
        self.reanchor_docks();
        self.rebuild_dock_tabs(position);
    }

    /// A docked window was resized by the user; adopt its new thickness.
    pub(crate) fn docked_window_resized(&mut self, window: WidgetId) {
        let position = self.window_dock_position(window);
        let Some(index) = position.index() else {
            return;
        };
        let rect = self.rect(window);
        let tab_h = if self.docks[index].len() >= 2 {
            self.config.dock_tab_bar_height
        } else {
            0
        };
        self.dock_thickness[index] = if position.is_horizontal() {
            rect.h + tab_h
        } else {
            rect.w
        };
        self.reanchor_docks();
    }

    /// Recompute every slot, its occupants and its tab bar, then the content
    /// rect.
    pub(crate) fn reanchor_docks(&mut self) {
        for position in DockPosition::ALL {
            let Some(index) = position.index() else {
                continue;
            };
            let bar = self.dock_tab_bars[index];
            let occupants = self.docks[index].clone();
            if occupants.is_empty() {
                self.store_visible(bar, false);
                continue;
            }

            let slot = self.slot_rect(position, self.dock_thickness[index]);
            let rect = self.occupant_rect(slot, occupants.len());
            for window in occupants.iter().copied() {
                if self.rect(window) != rect {
                    self.set_rect(window, rect);
                }
            }

            let tab_h = self.config.dock_tab_bar_height;
            self.set_rect(bar, Rect::new(slot.x, slot.bottom() - tab_h, slot.w, tab_h));
            self.set_visible(bar, occupants.len() >= 2);
        }
        self.update_content_rect();
    }

    /// Fill the slot's tab bar with one tab per occupant and select the
    /// visible one, without reacting to the tab events this fires.
    fn rebuild_dock_tabs(&mut self, position: DockPosition) {
        let Some(index) = position.index() else {
            return;
        };
        let bar = self.dock_tab_bars[index];
        let occupants = self.docks[index].clone();

        self.set_events_blocked(bar, true);
        TabBar::clear_tabs(self, bar);
        for &window in &occupants {
            let title = self
                .widget::<Window>(window)
                .map(|w| w.title().to_string())
                .unwrap_or_default();
            TabBar::add_tab(self, bar, &title);
        }
        if let Some(visible) = occupants.iter().position(|&w| !self.is_hidden(w)) {
            TabBar::select_tab(self, bar, visible);
        }
        self.set_events_blocked(bar, false);
    }

    /// Listener on the consolidation tab bars: show the selected occupant.
    pub(crate) fn dock_tab_changed(ui: &mut MainWindow, event: &Event) {
        let EventKind::TabChanged { index, .. } = event.kind else {
            return;
        };
        let Some(slot) = ui.dock_tab_bars.iter().position(|&bar| bar == event.source) else {
            return;
        };
        let occupants = ui.docks[slot].clone();
        if index >= occupants.len() {
            return;
        }
        for (i, window) in occupants.into_iter().enumerate() {
            ui.set_visible(window, i == index);
        }
        tracing::debug!(target: targets::DOCKING, slot, index, "dock tab selected");
    }

    /// Shrink the content widget around the occupied slots.
    pub(crate) fn update_content_rect(&mut self) {
        let Size { w, h } = self.size();
        let mh = self.menu_bar_height();
        let north = self.thickness(DockPosition::North);
        let south = self.thickness(DockPosition::South);
        let west = self.thickness(DockPosition::West);
        let east = self.thickness(DockPosition::East);

        let rect = Rect::new(west, mh + north, w - west - east, h - mh - north - south);
        self.set_rect(self.content, rect);
        self.set_rect(self.dock_icons, Rect::new(0, 0, w, h));
    }

    // =========================================================================
    // Moving windows and the preview
    // =========================================================================

    /// Mark a window as being dragged, showing the dock icons while one is.
    pub(crate) fn set_moving_window(&mut self, window: Option<WidgetId>) {
        self.moving_window = window;
        self.store_visible(self.dock_icons, window.is_some());
        if window.is_none() {
            self.store_visible(self.dock_preview, false);
            self.dock_preview_position = DockPosition::None;
        }
    }

    /// Show the preview for the dock icon under `pos`, or hide it.
    pub(crate) fn update_dock_preview(&mut self, pos: Point) {
        let Some(window) = self.moving_window else {
            return;
        };
        let hit = DockPosition::ALL
            .into_iter()
            .find(|&p| self.dock_icon_rect(p).contains(pos));

        match hit {
            Some(position) => {
                let rect = self.dock_preview_rect(window, position);
                self.set_rect(self.dock_preview, rect);
                self.store_visible(self.dock_preview, true);
                self.dock_preview_position = position;
            }
            None => {
                self.store_visible(self.dock_preview, false);
                self.dock_preview_position = DockPosition::None;
            }
        }
    }

    /// Give `window` the highest draw priority, renumbering the others in
    /// their current order.
    pub(crate) fn raise_window(&mut self, window: WidgetId) {
        let mut others: Vec<(i32, WidgetId)> = self
            .children(self.root)
            .iter()
            .copied()
            .filter(|&id| id != window)
            .filter_map(|id| self.widget::<Window>(id).map(|w| (w.draw_priority(), id)))
            .collect();
        others.sort_by_key(|&(priority, _)| priority);

        let top = others.len() as i32;
        for (i, (_, id)) in others.into_iter().enumerate() {
            if let Some(w) = self.widget_mut::<Window>(id) {
                w.draw_priority = i as i32;
            }
        }
        if let Some(w) = self.widget_mut::<Window>(window) {
            w.draw_priority = top;
        }
    }

    // =========================================================================
    // Resizing and menu bar
    // =========================================================================

    /// Resize the MainWindow, re-anchoring docked windows and the content.
    pub fn set_size(&mut self, size: Size) {
        self.set_rect(self.root, Rect::new(0, 0, size.w, size.h));
        self.reanchor_docks();
        tracing::debug!(target: targets::DOCKING, ?size, "main window resized");
    }

    /// Install a menu bar along the top edge, replacing any previous one.
    pub fn set_menu_bar(&mut self, menu_bar: WidgetId) {
        if let Some(old) = self.menu_bar.take() {
            self.remove_child(self.root, old);
        }
        if !self.add_child(self.root, menu_bar) {
            return;
        }
        self.menu_bar = Some(menu_bar);
        if let Some(node) = self.nodes.get_mut(menu_bar) {
            node.rect.x = 0;
            node.rect.y = 0;
        }
        self.set_stretch(menu_bar, Stretch::WIDTH);
        self.reanchor_docks();
    }
}
