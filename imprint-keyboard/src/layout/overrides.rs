//! Shifted key overrides.
//!
//! With shift held, the opening brackets send their closing bracket, and the
//! volume keys skip tracks.

use usbd_human_interface_device::page::{Consumer, Keyboard};

use crate::keycode::{k, s, Keycode};
use crate::Mods;

struct Override {
    trigger: Keycode,
    replacement: Keycode,
}

static OVERRIDES: [Override; 5] = [
    Override { trigger: s(Keyboard::LeftBrace), replacement: s(Keyboard::RightBrace) },
    Override { trigger: k(Keyboard::LeftBrace), replacement: k(Keyboard::RightBrace) },
    Override { trigger: s(Keyboard::Keyboard9), replacement: s(Keyboard::Keyboard0) },
    Override {
        trigger: Keycode::Media(Consumer::VolumeIncrement),
        replacement: Keycode::Media(Consumer::ScanNextTrack),
    },
    Override {
        trigger: Keycode::Media(Consumer::VolumeDecrement),
        replacement: Keycode::Media(Consumer::ScanPreviousTrack),
    },
];

/// The keycode to use instead of `keycode` with `mods` active.  The shift
/// that triggered an override is not sent, unless the replacement has it.
pub fn find(keycode: &Keycode, mods: Mods) -> Option<Keycode> {
    if !mods.has_shift() {
        return None;
    }
    OVERRIDES
        .iter()
        .find(|o| o.trigger == *keycode)
        .map(|o| o.replacement)
}
