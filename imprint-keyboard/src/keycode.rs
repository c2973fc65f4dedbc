//! Logical keycodes
//!
//! A keymap entry says what a physical key does on a given layer.  Most are
//! plain HID keys, some carry modifiers, and the rest drive one of the
//! behaviors in [`crate::layout`].

use usbd_human_interface_device::page::{Consumer, Keyboard};

use crate::layer::Layer;
use crate::{Mods, MouseButton};

/// The tap dances in the keymap.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TapDance {
    /// One tap: one-shot Num layer.  Two taps: num word.
    OneShotNumWord,
}

/// Keys with behavior specific to this keymap.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Custom {
    /// Area screenshot (GUI+Shift+4), then the Nav layer.
    Screenshot,
    /// Back to the base layer, from any overlay.
    LayerClear,
    /// Hide the current application (GUI+H).
    Hide,
}

/// Modes of the right hand pointing device.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PointerMode {
    /// Toggles slow pointer movement.
    Sniping,
    /// The pointer scrolls while held.
    DragScroll,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Keycode {
    /// Does nothing.
    No,
    /// Falls through to the next active layer below.
    Trans,
    /// A plain key.
    Key(Keyboard),
    /// A key sent with modifiers held, such as `(` or GUI+C.
    Modded(Mods, Keyboard),
    /// Tap for the key, hold for the modifiers.
    ModTap(Mods, Keyboard),
    /// The held half of a mod-tap, once decided.
    Modifier(Mods),
    /// Modifiers for the next key.
    OneShotMod(Mods),
    /// Layer for the next key.
    OneShotLayer(Layer),
    /// Layer while held, toggled after enough taps.
    TapToggle(Layer),
    /// Starts a leader sequence.
    Leader,
    TapDance(TapDance),
    Media(Consumer),
    Mouse(MouseButton),
    Pointer(PointerMode),
    Custom(Custom),
}

impl Keycode {
    /// Keys that only modify other keys.  These don't use up one-shot layers or
    /// modifiers.
    pub fn is_modifier(&self) -> bool {
        match self {
            Keycode::Key(k) => !Mods::from_key(*k).is_empty(),
            Keycode::Modifier(_) | Keycode::OneShotMod(_) => true,
            _ => false,
        }
    }

    /// The HID key this sends, if it sends one.  For a mod-tap this is the tap.
    pub fn basic(&self) -> Option<Keyboard> {
        match self {
            Keycode::Key(k) | Keycode::Modded(_, k) | Keycode::ModTap(_, k) => Some(*k),
            _ => None,
        }
    }

    /// The modifiers that are part of the keycode itself.
    pub fn mods(&self) -> Mods {
        match self {
            Keycode::Modded(m, _) | Keycode::Modifier(m) | Keycode::OneShotMod(m) => *m,
            _ => Mods::empty(),
        }
    }
}

/// A plain key.
pub const fn k(key: Keyboard) -> Keycode {
    Keycode::Key(key)
}

/// A shifted key.
pub const fn s(key: Keyboard) -> Keycode {
    Keycode::Modded(Mods::SHIFT, key)
}

/// A key with modifiers.
pub const fn m(mods: Mods, key: Keyboard) -> Keycode {
    Keycode::Modded(mods, key)
}

/// A mod-tap.
pub const fn mt(mods: Mods, key: Keyboard) -> Keycode {
    Keycode::ModTap(mods, key)
}

/// Digits, 1 through 0 in HID order.
pub fn is_digit(key: Keyboard) -> bool {
    matches!(
        key,
        Keyboard::Keyboard1
            | Keyboard::Keyboard2
            | Keyboard::Keyboard3
            | Keyboard::Keyboard4
            | Keyboard::Keyboard5
            | Keyboard::Keyboard6
            | Keyboard::Keyboard7
            | Keyboard::Keyboard8
            | Keyboard::Keyboard9
            | Keyboard::Keyboard0
    )
}

/// Letters a through z.
pub fn is_letter(key: Keyboard) -> bool {
    let code = key as u8;
    code >= Keyboard::A as u8 && code <= Keyboard::Z as u8
}
