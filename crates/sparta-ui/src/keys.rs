//! Key, mouse button and modifier vocabulary.
//!
//! Key codes use X11 keysym values: printable keys are their Unicode scalar
//! value, everything else lives in the `0xff00..=0xffff` block. A key event
//! carries the code positive on press and negated on release.

/// A keyboard key code. Negative values are releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(pub i32);

impl Key {
    /// Bit set on every non-character key code.
    pub const NO_CHAR: i32 = 0x8000;

    pub const BACKSPACE: Key = Key(0xff08);
    pub const TAB: Key = Key(0xff09);
    pub const CLEAR: Key = Key(0xff0b);
    pub const RETURN: Key = Key(0xff0d);
    pub const PAUSE: Key = Key(0xff13);
    pub const SCROLL_LOCK: Key = Key(0xff14);
    pub const SYS_REQ: Key = Key(0xff15);
    pub const ESCAPE: Key = Key(0xff1b);
    pub const HOME: Key = Key(0xff50);
    pub const LEFT: Key = Key(0xff51);
    pub const UP: Key = Key(0xff52);
    pub const RIGHT: Key = Key(0xff53);
    pub const DOWN: Key = Key(0xff54);
    pub const PAGE_UP: Key = Key(0xff55);
    pub const PAGE_DOWN: Key = Key(0xff56);
    pub const END: Key = Key(0xff57);
    pub const SELECT: Key = Key(0xff60);
    pub const PRINT: Key = Key(0xff61);
    pub const EXECUTE: Key = Key(0xff62);
    pub const INSERT: Key = Key(0xff63);
    pub const MENU: Key = Key(0xff67);
    pub const HELP: Key = Key(0xff6a);
    pub const NUM_LOCK: Key = Key(0xff7f);
    pub const SHIFT: Key = Key(0xffe1);
    pub const CONTROL: Key = Key(0xffe3);
    pub const CAPS_LOCK: Key = Key(0xffe5);
    pub const ALT: Key = Key(0xffe9);
    pub const ALT_GR: Key = Key(0xffea);
    pub const SUPER_L: Key = Key(0xffeb);
    pub const SUPER_R: Key = Key(0xffec);
    pub const DELETE: Key = Key(0xffff);

    pub const PAD_SPACE: Key = Key(0xff80);
    pub const PAD_TAB: Key = Key(0xff89);
    pub const PAD_ENTER: Key = Key(0xff8d);
    pub const PAD_F1: Key = Key(0xff91);
    pub const PAD_F2: Key = Key(0xff92);
    pub const PAD_F3: Key = Key(0xff93);
    pub const PAD_F4: Key = Key(0xff94);
    pub const PAD_HOME: Key = Key(0xff95);
    pub const PAD_LEFT: Key = Key(0xff96);
    pub const PAD_UP: Key = Key(0xff97);
    pub const PAD_RIGHT: Key = Key(0xff98);
    pub const PAD_DOWN: Key = Key(0xff99);
    pub const PAD_PAGE_UP: Key = Key(0xff9a);
    pub const PAD_PAGE_DOWN: Key = Key(0xff9b);
    pub const PAD_END: Key = Key(0xff9c);
    pub const PAD_BEGIN: Key = Key(0xff9d);
    pub const PAD_INSERT: Key = Key(0xff9e);
    pub const PAD_DELETE: Key = Key(0xff9f);
    pub const PAD_MULTIPLY: Key = Key(0xffaa);
    pub const PAD_ADD: Key = Key(0xffab);
    pub const PAD_SEPARATOR: Key = Key(0xffac);
    pub const PAD_SUBTRACT: Key = Key(0xffad);
    pub const PAD_DECIMAL: Key = Key(0xffae);
    pub const PAD_DIVIDE: Key = Key(0xffaf);
    pub const PAD_0: Key = Key(0xffb0);
    pub const PAD_EQUAL: Key = Key(0xffbd);

    pub const F1: Key = Key(0xffbe);
    pub const F12: Key = Key(0xffc9);
    pub const F24: Key = Key(0xffd5);

    /// Keypad digit `n` (0-9).
    pub const fn pad_digit(n: u8) -> Key {
        Key(Self::PAD_0.0 + (n % 10) as i32)
    }

    /// Function key `F<n>` for `n` in `1..=24`.
    pub const fn function(n: u8) -> Option<Key> {
        if n >= 1 && n <= 24 {
            Some(Key(Self::F1.0 + n as i32 - 1))
        } else {
            None
        }
    }

    pub const fn from_char(c: char) -> Key {
        Key(c as i32)
    }

    pub const fn is_release(self) -> bool {
        self.0 < 0
    }

    /// The key code without press/release sign.
    pub const fn code(self) -> Key {
        Key(self.0.abs())
    }

    /// The release event for this key.
    pub const fn released(self) -> Key {
        Key(-self.0.abs())
    }

    pub const fn is_char(self) -> bool {
        let code = self.0.abs();
        code != 0 && !(code >= 0xff00 && code <= 0xffff)
    }

    pub fn as_char(self) -> Option<char> {
        if !self.is_char() {
            return None;
        }
        char::from_u32(self.0.unsigned_abs())
    }
}

/// A mouse button. Negative values are releases, zero is pointer motion.
///
/// The wheel reuses the button slot: [`MouseButton::WHEEL`] scrolls up,
/// its negation scrolls down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseButton(pub i32);

impl MouseButton {
    pub const MOTION: MouseButton = MouseButton(0);
    pub const LEFT: MouseButton = MouseButton(1);
    pub const RIGHT: MouseButton = MouseButton(2);
    pub const WHEEL: MouseButton = MouseButton(3);
    pub const MIDDLE: MouseButton = MouseButton(4);
    pub const WHEEL_DOWN: MouseButton = MouseButton(-3);

    pub const fn is_press(self) -> bool {
        self.0 > 0
    }

    pub const fn is_release(self) -> bool {
        self.0 < 0
    }

    pub const fn released(self) -> MouseButton {
        MouseButton(-self.0.abs())
    }
}

bitflags::bitflags! {
    /// Keyboard modifiers and held mouse buttons at the time of an event.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u32 {
        const SHIFT = 1;
        const LOCK = 2;
        const CTRL = 4;
        const ALT = 8;
        const ALT_GR = 128;
        const BUTTON_LEFT = 256;
        const BUTTON_MIDDLE = 512;
        const BUTTON_RIGHT = 1024;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_release_sign() {
        let k = Key::from_char('a');
        assert!(!k.is_release());
        assert!(k.released().is_release());
        assert_eq!(k.released().code(), k);
    }

    #[test]
    fn test_char_classification() {
        assert_eq!(Key::from_char('q').as_char(), Some('q'));
        assert_eq!(Key::from_char('é').released().as_char(), Some('é'));
        assert!(!Key::UP.is_char());
        assert_eq!(Key::RETURN.as_char(), None);
        assert_ne!(Key::F1.0 & Key::NO_CHAR, 0);
    }

    #[test]
    fn test_function_keys() {
        assert_eq!(Key::function(1), Some(Key::F1));
        assert_eq!(Key::function(12), Some(Key::F12));
        assert_eq!(Key::function(24), Some(Key::F24));
        assert_eq!(Key::function(0), None);
        assert_eq!(Key::function(25), None);
        assert_eq!(Key::pad_digit(9), Key(0xffb9));
    }
}
