//! Stretch and alignment flags.
//!
//! A widget's rect is resolved against its parent from three inputs: the
//! requested rect, [`Stretch`] and [`Align`]. Stretch wins on any axis it
//! covers; align is only consulted on axes that are not stretched.

use std::ops::{BitOr, BitOrAssign};

/// Which axes a widget fills in its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Stretch(u8);

impl Stretch {
    pub const NONE: Stretch = Stretch(0);
    pub const WIDTH: Stretch = Stretch(1 << 0);
    pub const HEIGHT: Stretch = Stretch(1 << 1);
    pub const ALL: Stretch = Stretch(0b11);

    /// Check if every flag in `other` is set.
    pub fn contains(&self, other: Stretch) -> bool {
        (self.0 & other.0) == other.0 && other.0 != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Stretch {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Stretch(self.0 | rhs.0)
    }
}

impl BitOrAssign for Stretch {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Where a non-stretched widget sits inside its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Align(u8);

impl Align {
    pub const NONE: Align = Align(0);
    pub const LEFT: Align = Align(1 << 0);
    pub const CENTER: Align = Align(1 << 1);
    pub const RIGHT: Align = Align(1 << 2);
    pub const TOP: Align = Align(1 << 3);
    pub const MIDDLE: Align = Align(1 << 4);
    pub const BOTTOM: Align = Align(1 << 5);

    pub fn contains(&self, other: Align) -> bool {
        (self.0 & other.0) == other.0 && other.0 != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Align {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Align(self.0 | rhs.0)
    }
}

impl BitOrAssign for Align {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stretch_flags() {
        let s = Stretch::WIDTH | Stretch::HEIGHT;
        assert_eq!(s, Stretch::ALL);
        assert!(s.contains(Stretch::WIDTH));
        assert!(!Stretch::WIDTH.contains(Stretch::HEIGHT));
        assert!(!Stretch::ALL.contains(Stretch::NONE));
        assert!(Stretch::default().is_empty());
    }

    #[test]
    fn test_align_flags() {
        let mut a = Align::RIGHT;
        a |= Align::BOTTOM;
        assert!(a.contains(Align::RIGHT));
        assert!(a.contains(Align::BOTTOM));
        assert!(!a.contains(Align::CENTER));
    }
}
