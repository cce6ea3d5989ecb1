//! Input and widget event types.
//!
//! Input flows in as plain method calls on [`MainWindow`](crate::MainWindow)
//! (`mouse_move`, `key_down`, ...). Widgets report back through [`Event`]s,
//! which are delivered in a fixed order:
//!
//! 1. handlers connected directly on the firing widget, in connection order
//! 2. the MainWindow's single centralized handler, if one is set
//! 3. internal listeners supplied by the firing code (composite widgets use
//!    these to react to their own parts)

use dockyard_core::WidgetId;

use crate::main_window::MainWindow;

/// Something a widget reports to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// The widget that fired the event.
    pub source: WidgetId,
    pub kind: EventKind,
}

impl Event {
    pub fn new(source: WidgetId, kind: EventKind) -> Self {
        Self { source, kind }
    }
}

/// The payload of an [`Event`].
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// A button was pressed down.
    ButtonPressed,
    /// A button was released over itself. `is_set` is the button's state
    /// after the click.
    ButtonClicked { is_set: bool },
    /// A list row was selected.
    ListItemSelected { index: usize },
    ScrollerValueChanged { old_value: i32, value: i32 },
    TabChanged { index: usize, tab: WidgetId },
    TabAdded { index: usize, tab: WidgetId },
    TabRemoved { index: usize, tab: WidgetId },
}

/// An internal listener, called after the public handlers.
pub type Listener = fn(&mut MainWindow, &Event);

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    Other(u16),
}

/// Abstract keys the toolkit understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Unknown,
    Backspace,
    Delete,
    Enter,
    Escape,
    Tab,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    LeftShift,
    RightShift,
    LeftControl,
    RightControl,
    /// A host-specific key code, passed through untouched.
    Other(u16),
}

impl Key {
    fn code(self) -> u32 {
        match self {
            Key::Unknown => 0,
            Key::Backspace => 1,
            Key::Delete => 2,
            Key::Enter => 3,
            Key::Escape => 4,
            Key::Tab => 5,
            Key::Left => 6,
            Key::Right => 7,
            Key::Up => 8,
            Key::Down => 9,
            Key::Home => 10,
            Key::End => 11,
            Key::PageUp => 12,
            Key::PageDown => 13,
            Key::LeftShift => 14,
            Key::RightShift => 15,
            Key::LeftControl => 16,
            Key::RightControl => 17,
            Key::Other(raw) => OTHER_BASE + u32::from(raw),
        }
    }

    fn from_code(code: u32) -> Key {
        match code {
            1 => Key::Backspace,
            2 => Key::Delete,
            3 => Key::Enter,
            4 => Key::Escape,
            5 => Key::Tab,
            6 => Key::Left,
            7 => Key::Right,
            8 => Key::Up,
            9 => Key::Down,
            10 => Key::Home,
            11 => Key::End,
            12 => Key::PageUp,
            13 => Key::PageDown,
            14 => Key::LeftShift,
            15 => Key::RightShift,
            16 => Key::LeftControl,
            17 => Key::RightControl,
            c if (OTHER_BASE..=OTHER_BASE + u32::from(u16::MAX)).contains(&c) => {
                Key::Other((c - OTHER_BASE) as u16)
            }
            _ => Key::Unknown,
        }
    }

    pub fn is_shift(self) -> bool {
        matches!(self, Key::LeftShift | Key::RightShift)
    }

    pub fn is_control(self) -> bool {
        matches!(self, Key::LeftControl | Key::RightControl)
    }
}

const OTHER_BASE: u32 = 0x100;

/// A key plus modifier bits, packed into one integer.
///
/// Bits above the plain key code flag shift and control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCode(u32);

impl KeyCode {
    pub const SHIFT_BIT: u32 = 1 << 30;
    pub const CONTROL_BIT: u32 = 1 << 31;
    const KEY_MASK: u32 = !(Self::SHIFT_BIT | Self::CONTROL_BIT);

    pub fn new(key: Key) -> Self {
        Self(key.code())
    }

    /// Wrap a raw packed value.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub fn with_shift(self) -> Self {
        Self(self.0 | Self::SHIFT_BIT)
    }

    pub fn with_control(self) -> Self {
        Self(self.0 | Self::CONTROL_BIT)
    }

    /// The key with the modifier bits masked out.
    pub fn key(self) -> Key {
        Key::from_code(self.0 & Self::KEY_MASK)
    }

    pub fn shift(self) -> bool {
        self.0 & Self::SHIFT_BIT != 0
    }

    pub fn control(self) -> bool {
        self.0 & Self::CONTROL_BIT != 0
    }
}

impl From<Key> for KeyCode {
    fn from(key: Key) -> Self {
        KeyCode::new(key)
    }
}
