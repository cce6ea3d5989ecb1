//! Toolkit configuration.
//!
//! [`UiConfig`] holds every metric the core needs (header heights, dock icon
//! sizes, paddings). Visual styling is left to the renderer; these are the
//! numbers that affect geometry and hit-testing.
//!
//! # Loading from TOML
//!
//! ```
//! use dockyard::UiConfig;
//!
//! let config = UiConfig::from_toml_str(r#"
//! window_header_height = 24
//! dock_size_fraction = 0.25
//!
//! [button_padding]
//! top = 2
//! bottom = 2
//! "#).unwrap();
//!
//! assert_eq!(config.window_header_height, 24);
//! assert_eq!(config.button_padding.left, 8);
//! ```

use dockyard_core::Border;
use dockyard_render::FontSpec;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Per-side padding, as stored in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            top: 4,
            right: 8,
            bottom: 4,
            left: 8,
        }
    }
}

impl From<Padding> for Border {
    fn from(p: Padding) -> Self {
        Border::new(p.top, p.right, p.bottom, p.left)
    }
}

/// Geometry metrics used by the toolkit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub default_font_face: String,
    pub default_font_size: f32,

    pub window_header_height: i32,
    pub window_border_size: i32,

    /// Side length of each of the four dock icons.
    pub dock_icon_size: i32,
    /// Distance of a dock icon from its MainWindow edge.
    pub dock_icon_margin: i32,
    /// Largest share of the MainWindow a freshly docked window may take.
    pub dock_size_fraction: f32,
    /// Drag distance (pixels) after which a docked window tears off.
    pub undock_threshold: i32,
    pub dock_tab_bar_height: i32,

    pub scroll_button_size: i32,
    pub scroller_nub_min_size: i32,

    pub button_padding: Padding,
    pub tab_padding: i32,
    pub list_item_padding: i32,
    /// Dropdown lists show at most this many rows before scrolling.
    pub list_max_dropdown_items: usize,
    pub text_edit_border: i32,
    pub check_box_size: i32,
    pub menu_bar_padding: i32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_font_face: "sans".to_string(),
            default_font_size: 14.0,
            window_header_height: 20,
            window_border_size: 4,
            dock_icon_size: 48,
            dock_icon_margin: 16,
            dock_size_fraction: 0.3,
            undock_threshold: 20,
            dock_tab_bar_height: 22,
            scroll_button_size: 16,
            scroller_nub_min_size: 8,
            button_padding: Padding::default(),
            tab_padding: 8,
            list_item_padding: 2,
            list_max_dropdown_items: 8,
            text_edit_border: 4,
            check_box_size: 16,
            menu_bar_padding: 6,
        }
    }
}

impl UiConfig {
    /// Parse and validate a config from TOML text. Missing fields keep their
    /// defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: UiConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config back to TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Check every field is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.dock_size_fraction > 0.0 && self.dock_size_fraction <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "dock_size_fraction",
                reason: format!("{} is not in (0, 1]", self.dock_size_fraction),
            });
        }
        if self.default_font_size <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "default_font_size",
                reason: format!("{} is not positive", self.default_font_size),
            });
        }

        let sizes = [
            ("window_header_height", self.window_header_height),
            ("window_border_size", self.window_border_size),
            ("dock_icon_size", self.dock_icon_size),
            ("dock_icon_margin", self.dock_icon_margin),
            ("undock_threshold", self.undock_threshold),
            ("dock_tab_bar_height", self.dock_tab_bar_height),
            ("scroll_button_size", self.scroll_button_size),
            ("scroller_nub_min_size", self.scroller_nub_min_size),
            ("tab_padding", self.tab_padding),
            ("list_item_padding", self.list_item_padding),
            ("text_edit_border", self.text_edit_border),
            ("check_box_size", self.check_box_size),
            ("menu_bar_padding", self.menu_bar_padding),
        ];
        for (field, value) in sizes {
            if value < 0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("{value} is negative"),
                });
            }
        }
        Ok(())
    }

    /// The font used wherever a widget does not set its own.
    pub fn default_font(&self) -> FontSpec {
        FontSpec::new(self.default_font_face.clone(), self.default_font_size)
    }
}
