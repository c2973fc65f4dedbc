//! Imprint keyboard keymap engine

#![cfg_attr(not(any(feature = "std", test)), no_std)]
// #![deny(missing_docs)]

extern crate alloc;

use alloc::vec::Vec;

use bitflags::bitflags;

pub use usbd_human_interface_device::page::{Consumer, Keyboard};

pub use layer::{Layer, LayerStack};
pub use layout::{LayoutActions, LayoutManager};
pub use leds::{Indication, LedState};
pub use settings::Settings;
pub use timer::Instant;

pub mod keycode;
pub mod keymap;
pub mod keys;
pub mod layer;
pub mod layout;
pub mod leds;
pub mod settings;
pub mod timer;
pub mod usb_typer;

#[cfg(test)]
mod testlog;

cfg_if::cfg_if! {
    if #[cfg(feature = "defmt")] {
        mod log {
            pub use defmt::{debug, info, warn};
        }
    } else {
        mod log {
            pub use ::log::{debug, info, warn};
        }
    }
}

/// Which half of the keyboard.
#[derive(Eq, PartialEq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Side {
    Left,
    Right,
}

/// Key events indicate keys going up or down.  The value is the scan position,
/// see [`keys`].
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum KeyEvent {
    Press(u8),
    Release(u8),
}

#[cfg(feature = "defmt")]
impl defmt::Format for KeyEvent {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            KeyEvent::Press(k) => defmt::write!(fmt, "KeyEvent::Press({})", k),
            KeyEvent::Release(k) => defmt::write!(fmt, "KeyEvent::Release({})", k),
        }
    }
}

impl KeyEvent {
    pub fn key(&self) -> u8 {
        match self {
            KeyEvent::Press(k) => *k,
            KeyEvent::Release(k) => *k,
        }
    }

    pub fn is_press(&self) -> bool {
        match self {
            KeyEvent::Press(_) => true,
            KeyEvent::Release(_) => false,
        }
    }
}

/// Indicates keypress that should be sent to the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// A single typed key, used by macros.  Followed by a `KeyRelease`.
    KeyPress(Keyboard, Mods),
    /// Release everything sent by a `KeyPress`.
    KeyRelease,
    /// The full set of keys held down, modifiers included as their modifier
    /// key codes.
    KeySet(Vec<Keyboard>),
    /// A consumer (media) key goes down.
    Consumer(Consumer),
    /// The consumer key is released.
    ConsumerRelease,
}

bitflags! {
    /// A modifier map. This indicates what modifiers should be held down when
    /// this keypress is sent.  Bit layout matches the HID modifier byte.
    #[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Debug)]
    pub struct Mods: u8 {
        const CONTROL = 0b0000_0001;
        const SHIFT = 0b0000_0010;
        const ALT = 0b0000_0100;
        const GUI = 0b0000_1000;
        const RIGHT_CONTROL = 0b0001_0000;
        const RIGHT_SHIFT = 0b0010_0000;
        const RIGHT_ALT = 0b0100_0000;
        const RIGHT_GUI = 0b1000_0000;

        const MEH = Self::CONTROL.bits() | Self::SHIFT.bits() | Self::ALT.bits();
        const HYPER = Self::MEH.bits() | Self::GUI.bits();
        const SHIFT_MASK = Self::SHIFT.bits() | Self::RIGHT_SHIFT.bits();
    }
}

static MOD_KEYS: [(Mods, Keyboard); 8] = [
    (Mods::CONTROL, Keyboard::LeftControl),
    (Mods::SHIFT, Keyboard::LeftShift),
    (Mods::ALT, Keyboard::LeftAlt),
    (Mods::GUI, Keyboard::LeftGUI),
    (Mods::RIGHT_CONTROL, Keyboard::RightControl),
    (Mods::RIGHT_SHIFT, Keyboard::RightShift),
    (Mods::RIGHT_ALT, Keyboard::RightAlt),
    (Mods::RIGHT_GUI, Keyboard::RightGUI),
];

impl Mods {
    /// The modifier bit for a modifier key, empty for anything else.
    pub fn from_key(key: Keyboard) -> Mods {
        MOD_KEYS
            .iter()
            .find(|(_, k)| *k == key)
            .map(|(m, _)| *m)
            .unwrap_or(Mods::empty())
    }

    /// The modifier keys that make up this set.
    pub fn keys(self) -> impl Iterator<Item = Keyboard> {
        MOD_KEYS
            .iter()
            .filter(move |(m, _)| self.contains(*m))
            .map(|(_, k)| *k)
    }

    pub fn has_shift(self) -> bool {
        self.intersects(Mods::SHIFT_MASK)
    }
}

/// Mouse buttons on the pointing devices.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MouseButton {
    Left,
    Right,
}

/// Requests for the pointing devices driver.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PointerAction {
    /// A mouse button changes state.
    Button { button: MouseButton, pressed: bool },
    /// Toggle the slow "sniping" mode of the pointer on the given side.
    SnipingToggle(Side),
    /// Make drag-scroll available on a pointer.  Sent at start-up.
    DragScroll { side: Side, enabled: bool },
    /// Drag-scroll is in effect while the key is held.
    DragScrollHold { side: Side, held: bool },
}
