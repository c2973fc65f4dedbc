//! USB keyboard typer
//!
//! Macros (leader sequences, screenshot, hide) are sent as individual key
//! taps, each a `KeyPress` followed by a `KeyRelease`.

use usbd_human_interface_device::page::Keyboard;

use crate::{KeyAction, Mods};

/// An ActionHandler is something that is able to take actions.
pub trait ActionHandler {
    fn enqueue_actions<I: Iterator<Item = KeyAction>>(&mut self, events: I);
}

/// The key, and whether it is shifted, that types `ch` on a US layout.
/// Letters are typed lower case.
fn char_key(ch: char) -> Option<(Keyboard, bool)> {
    let (key, shifted) = match ch {
        'a'..='z' => (offset(Keyboard::A, ch as u8 - b'a'), false),
        'A'..='Z' => (offset(Keyboard::A, ch as u8 - b'A'), true),
        '1'..='9' => (offset(Keyboard::Keyboard1, ch as u8 - b'1'), false),
        '0' => (Keyboard::Keyboard0, false),
        ' ' => (Keyboard::Space, false),
        '\n' => (Keyboard::ReturnEnter, false),
        '-' => (Keyboard::Minus, false),
        '_' => (Keyboard::Minus, true),
        '=' => (Keyboard::Equal, false),
        '+' => (Keyboard::Equal, true),
        '.' => (Keyboard::Dot, false),
        '>' => (Keyboard::Dot, true),
        ',' => (Keyboard::Comma, false),
        '<' => (Keyboard::Comma, true),
        '/' => (Keyboard::ForwardSlash, false),
        '?' => (Keyboard::ForwardSlash, true),
        '\\' => (Keyboard::Backslash, false),
        '|' => (Keyboard::Backslash, true),
        ';' => (Keyboard::Semicolon, false),
        ':' => (Keyboard::Semicolon, true),
        '\'' => (Keyboard::Apostrophe, false),
        '"' => (Keyboard::Apostrophe, true),
        '[' => (Keyboard::LeftBrace, false),
        '{' => (Keyboard::LeftBrace, true),
        ']' => (Keyboard::RightBrace, false),
        '}' => (Keyboard::RightBrace, true),
        '`' => (Keyboard::Grave, false),
        '~' => (Keyboard::Grave, true),
        '!' => (Keyboard::Keyboard1, true),
        '@' => (Keyboard::Keyboard2, true),
        '#' => (Keyboard::Keyboard3, true),
        '$' => (Keyboard::Keyboard4, true),
        '%' => (Keyboard::Keyboard5, true),
        '^' => (Keyboard::Keyboard6, true),
        '&' => (Keyboard::Keyboard7, true),
        '*' => (Keyboard::Keyboard8, true),
        '(' => (Keyboard::Keyboard9, true),
        ')' => (Keyboard::Keyboard0, true),
        _ => return None,
    };
    Some((key, shifted))
}

/// The key `n` codes after `base`.  Letters and digits are contiguous in the
/// keyboard usage page.
fn offset(base: Keyboard, n: u8) -> Keyboard {
    (base as u8 + n).into()
}

/// Tap a single key with the given modifiers.
pub fn tap<H: ActionHandler>(usb: &mut H, key: Keyboard, mods: Mods) {
    usb.enqueue_actions([KeyAction::KeyPress(key, mods), KeyAction::KeyRelease].into_iter());
}

/// Enqueue an action as keypresses.  Characters without a key are skipped.
pub fn enqueue_action<H: ActionHandler>(usb: &mut H, text: &str) {
    for (key, shifted) in text.chars().filter_map(char_key) {
        tap(usb, key, if shifted { Mods::SHIFT } else { Mods::empty() });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    impl ActionHandler for Vec<KeyAction> {
        fn enqueue_actions<I: Iterator<Item = KeyAction>>(&mut self, events: I) {
            self.extend(events);
        }
    }

    #[test]
    fn typed_arrow() {
        let mut out = Vec::new();
        enqueue_action(&mut out, "->");
        assert_eq!(
            out,
            [
                KeyAction::KeyPress(Keyboard::Minus, Mods::empty()),
                KeyAction::KeyRelease,
                KeyAction::KeyPress(Keyboard::Dot, Mods::SHIFT),
                KeyAction::KeyRelease,
            ]
        );
    }

    #[test]
    fn letters_and_digits() {
        assert_eq!(char_key('h'), Some((Keyboard::H, false)));
        assert_eq!(char_key('Q'), Some((Keyboard::Q, true)));
        assert_eq!(char_key('5'), Some((Keyboard::Keyboard5, false)));
        assert_eq!(char_key('\u{e9}'), None);

        let mut out = Vec::new();
        enqueue_action(&mut out, "\u{e9}|");
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], KeyAction::KeyPress(Keyboard::Backslash, Mods::SHIFT));
    }
}
