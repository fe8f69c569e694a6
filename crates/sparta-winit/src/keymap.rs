//! Translation of winit input vocabulary into toolkit key codes.

use sparta_ui::{Key, Modifiers, MouseButton};
use winit::event::MouseButton as WinitButton;
use winit::keyboard::{Key as WinitKey, KeyLocation, ModifiersState, NamedKey};

/// The press code for a logical key, `None` for keys the toolkit has no
/// code for (dead keys, unidentified keys).
pub fn key_code(key: &WinitKey, location: KeyLocation) -> Option<Key> {
    match key {
        WinitKey::Named(named) => named_key(*named, location),
        WinitKey::Character(text) => {
            let mut chars = text.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            if location == KeyLocation::Numpad {
                return Some(pad_char(c).unwrap_or(Key::from_char(c)));
            }
            Some(Key::from_char(c))
        }
        WinitKey::Unidentified(_) | WinitKey::Dead(_) => None,
    }
}

fn named_key(named: NamedKey, location: KeyLocation) -> Option<Key> {
    let numpad = location == KeyLocation::Numpad;
    let key = match named {
        NamedKey::Enter if numpad => Key::PAD_ENTER,
        NamedKey::Enter => Key::RETURN,
        NamedKey::Tab => Key::TAB,
        NamedKey::Space => Key::from_char(' '),
        NamedKey::Backspace => Key::BACKSPACE,
        NamedKey::Escape => Key::ESCAPE,
        NamedKey::Delete if numpad => Key::PAD_DELETE,
        NamedKey::Delete => Key::DELETE,
        NamedKey::Insert if numpad => Key::PAD_INSERT,
        NamedKey::Insert => Key::INSERT,
        NamedKey::Home if numpad => Key::PAD_HOME,
        NamedKey::Home => Key::HOME,
        NamedKey::End if numpad => Key::PAD_END,
        NamedKey::End => Key::END,
        NamedKey::PageUp if numpad => Key::PAD_PAGE_UP,
        NamedKey::PageUp => Key::PAGE_UP,
        NamedKey::PageDown if numpad => Key::PAD_PAGE_DOWN,
        NamedKey::PageDown => Key::PAGE_DOWN,
        NamedKey::ArrowUp if numpad => Key::PAD_UP,
        NamedKey::ArrowUp => Key::UP,
        NamedKey::ArrowDown if numpad => Key::PAD_DOWN,
        NamedKey::ArrowDown => Key::DOWN,
        NamedKey::ArrowLeft if numpad => Key::PAD_LEFT,
        NamedKey::ArrowLeft => Key::LEFT,
        NamedKey::ArrowRight if numpad => Key::PAD_RIGHT,
        NamedKey::ArrowRight => Key::RIGHT,
        NamedKey::Clear if numpad => Key::PAD_BEGIN,
        NamedKey::Clear => Key::CLEAR,
        NamedKey::Pause => Key::PAUSE,
        NamedKey::ScrollLock => Key::SCROLL_LOCK,
        NamedKey::PrintScreen => Key::PRINT,
        NamedKey::Select => Key::SELECT,
        NamedKey::Execute => Key::EXECUTE,
        NamedKey::ContextMenu => Key::MENU,
        NamedKey::Help => Key::HELP,
        NamedKey::NumLock => Key::NUM_LOCK,
        NamedKey::CapsLock => Key::CAPS_LOCK,
        NamedKey::Shift => Key::SHIFT,
        NamedKey::Control => Key::CONTROL,
        NamedKey::Alt => Key::ALT,
        NamedKey::AltGraph => Key::ALT_GR,
        NamedKey::Super if location == KeyLocation::Right => Key::SUPER_R,
        NamedKey::Super => Key::SUPER_L,
        NamedKey::F1 => Key::F1,
        NamedKey::F2 => Key(Key::F1.0 + 1),
        NamedKey::F3 => Key(Key::F1.0 + 2),
        NamedKey::F4 => Key(Key::F1.0 + 3),
        NamedKey::F5 => Key(Key::F1.0 + 4),
        NamedKey::F6 => Key(Key::F1.0 + 5),
        NamedKey::F7 => Key(Key::F1.0 + 6),
        NamedKey::F8 => Key(Key::F1.0 + 7),
        NamedKey::F9 => Key(Key::F1.0 + 8),
        NamedKey::F10 => Key(Key::F1.0 + 9),
        NamedKey::F11 => Key(Key::F1.0 + 10),
        NamedKey::F12 => Key::F12,
        other => {
            tracing::trace!("no key code for {:?}", other);
            return None;
        }
    };
    Some(key)
}

fn pad_char(c: char) -> Option<Key> {
    let key = match c {
        '0'..='9' => Key::pad_digit(c as u8 - b'0'),
        '*' => Key::PAD_MULTIPLY,
        '+' => Key::PAD_ADD,
        ',' => Key::PAD_SEPARATOR,
        '-' => Key::PAD_SUBTRACT,
        '.' => Key::PAD_DECIMAL,
        '/' => Key::PAD_DIVIDE,
        '=' => Key::PAD_EQUAL,
        ' ' => Key::PAD_SPACE,
        _ => return None,
    };
    Some(key)
}

pub fn mouse_button(button: WinitButton) -> Option<MouseButton> {
    match button {
        WinitButton::Left => Some(MouseButton::LEFT),
        WinitButton::Right => Some(MouseButton::RIGHT),
        WinitButton::Middle => Some(MouseButton::MIDDLE),
        _ => None,
    }
}

/// The held-button bit for `button` in [`Modifiers`].
pub fn button_mask(button: MouseButton) -> Modifiers {
    match button.0.abs() {
        1 => Modifiers::BUTTON_LEFT,
        2 => Modifiers::BUTTON_RIGHT,
        4 => Modifiers::BUTTON_MIDDLE,
        _ => Modifiers::empty(),
    }
}

pub fn modifiers(state: ModifiersState) -> Modifiers {
    let mut out = Modifiers::empty();
    out.set(Modifiers::SHIFT, state.shift_key());
    out.set(Modifiers::CTRL, state.control_key());
    out.set(Modifiers::ALT, state.alt_key());
    out
}

#[cfg(test)]
mod tests {
    use winit::keyboard::SmolStr;

    use super::*;

    fn character(s: &str) -> WinitKey {
        WinitKey::Character(SmolStr::new(s))
    }

    #[test]
    fn test_named_keys() {
        let standard = KeyLocation::Standard;
        assert_eq!(key_code(&WinitKey::Named(NamedKey::ArrowUp), standard), Some(Key::UP));
        assert_eq!(key_code(&WinitKey::Named(NamedKey::Enter), standard), Some(Key::RETURN));
        assert_eq!(key_code(&WinitKey::Named(NamedKey::F5), standard), Key::function(5));
        assert_eq!(key_code(&WinitKey::Named(NamedKey::F12), standard), Key::function(12));
        assert_eq!(
            key_code(&WinitKey::Named(NamedKey::Space), standard),
            Some(Key::from_char(' '))
        );
    }

    #[test]
    fn test_numpad_keys() {
        let numpad = KeyLocation::Numpad;
        assert_eq!(key_code(&character("7"), numpad), Some(Key::pad_digit(7)));
        assert_eq!(key_code(&character("+"), numpad), Some(Key::PAD_ADD));
        assert_eq!(key_code(&WinitKey::Named(NamedKey::Enter), numpad), Some(Key::PAD_ENTER));
        assert_eq!(key_code(&WinitKey::Named(NamedKey::ArrowLeft), numpad), Some(Key::PAD_LEFT));
    }

    #[test]
    fn test_characters() {
        let standard = KeyLocation::Standard;
        assert_eq!(key_code(&character("a"), standard), Some(Key::from_char('a')));
        assert_eq!(key_code(&character("Ä"), standard), Some(Key::from_char('Ä')));
        assert_eq!(key_code(&character("ab"), standard), None);
    }

    #[test]
    fn test_modifiers_and_buttons() {
        let state = ModifiersState::SHIFT | ModifiersState::CONTROL;
        assert_eq!(modifiers(state), Modifiers::SHIFT | Modifiers::CTRL);
        assert_eq!(mouse_button(WinitButton::Right), Some(MouseButton::RIGHT));
        assert_eq!(mouse_button(WinitButton::Back), None);
        assert_eq!(button_mask(MouseButton::LEFT.released()), Modifiers::BUTTON_LEFT);
    }
}
