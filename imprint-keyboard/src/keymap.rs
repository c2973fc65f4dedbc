//! The keymap
//!
//! Four layers over the letters-only Imprint.  The base layer is Engram, with
//! home row mods.  The tables are laid out the way the board is: three finger
//! rows, then the upper and lower thumb rows, left half first.

use usbd_human_interface_device::page::{Consumer, Keyboard as K};

use crate::keycode::{k, m, mt, s, Custom, Keycode, PointerMode, TapDance};
use crate::keys::NKEYS;
use crate::layer::{Layer, LayerStack};
use crate::{Mods, MouseButton};

const ____: Keycode = Keycode::Trans;

// Home row mods.
const HM_C: Keycode = mt(Mods::CONTROL, K::C);
const HM_I: Keycode = mt(Mods::ALT, K::I);
const HM_E: Keycode = mt(Mods::HYPER, K::E);
const HM_A: Keycode = mt(Mods::GUI, K::A);
const HM_H: Keycode = mt(Mods::RIGHT_GUI, K::H);
const HM_T: Keycode = mt(Mods::HYPER, K::T);
const HM_S: Keycode = mt(Mods::RIGHT_ALT, K::S);
const HM_N: Keycode = mt(Mods::RIGHT_CONTROL, K::N);

const OS_MEH: Keycode = Keycode::OneShotMod(Mods::MEH);
const OS_SHFT: Keycode = Keycode::OneShotMod(Mods::SHIFT);
const OS_SYM: Keycode = Keycode::OneShotLayer(Layer::Sym);
const TT_NAV: Keycode = Keycode::TapToggle(Layer::Nav);
const LEAD: Keycode = Keycode::Leader;
const NUMW: Keycode = Keycode::TapDance(TapDance::OneShotNumWord);

// Hyper chords, picked up by the host for the browser and the assistant.
const BRWSR: Keycode = m(Mods::HYPER, K::Keyboard2);
const ASSIST: Keycode = m(Mods::HYPER, K::Grave);

const SCRSH: Keycode = Keycode::Custom(Custom::Screenshot);
const LRCL: Keycode = Keycode::Custom(Custom::LayerClear);
const HIDE: Keycode = Keycode::Custom(Custom::Hide);

pub(crate) const VOLU: Keycode = Keycode::Media(Consumer::VolumeIncrement);
pub(crate) const VOLD: Keycode = Keycode::Media(Consumer::VolumeDecrement);
const MPLY: Keycode = Keycode::Media(Consumer::PlayPause);
const MUTE: Keycode = Keycode::Media(Consumer::Mute);

const BTN1: Keycode = Keycode::Mouse(MouseButton::Left);
const BTN2: Keycode = Keycode::Mouse(MouseButton::Right);
const DRAG: Keycode = Keycode::Pointer(PointerMode::DragScroll);
const SNIPE: Keycode = Keycode::Pointer(PointerMode::Sniping);

// Shifted symbols.
const LPRN: Keycode = s(K::Keyboard9);
const LCBR: Keycode = s(K::LeftBrace);
const PLUS: Keycode = s(K::Equal);
const ASTR: Keycode = s(K::Keyboard8);
const TILD: Keycode = s(K::Grave);
const AMPR: Keycode = s(K::Keyboard7);
const PIPE: Keycode = s(K::Backslash);

#[rustfmt::skip]
static ENGRAM: [Keycode; NKEYS] = [
    k(K::Tab),    k(K::B), k(K::Y), k(K::O), k(K::U), k(K::Z),
        k(K::Q),   k(K::L), k(K::D), k(K::W), k(K::V), k(K::Semicolon),
    k(K::Escape), HM_C,    HM_I,    HM_E,    HM_A,    k(K::Comma),
        k(K::Dot), HM_H,    HM_T,    HM_S,    HM_N,    k(K::Apostrophe),
    OS_MEH,       k(K::G), k(K::X), k(K::J), k(K::K), LPRN,
        LCBR,      k(K::R), k(K::M), k(K::F), k(K::P), k(K::ForwardSlash),

    k(K::LeftArrow), k(K::RightArrow), LEAD, OS_SYM, BRWSR,
        TT_NAV, SCRSH, k(K::ReturnEnter), k(K::UpArrow), k(K::DownArrow),
    k(K::DeleteBackspace), NUMW, k(K::LeftBrace),
        ASSIST, OS_SHFT, k(K::Space),
];

#[rustfmt::skip]
static NUM: [Keycode; NKEYS] = [
    ____, ____,         ____,         ____,         ____,         ____,
        ____,          PLUS,         k(K::Minus),  k(K::ForwardSlash), ASTR, k(K::Backslash),
    LRCL, k(K::Keyboard1), k(K::Keyboard2), k(K::Keyboard3), k(K::Keyboard4), k(K::Keyboard5),
        k(K::Keyboard6), k(K::Keyboard7), k(K::Keyboard8), k(K::Keyboard9), k(K::Keyboard0), ____,
    ____, ____,         ____,         ____,         ____,         ____,
        ____,          k(K::Comma),  k(K::Dot),    ____,         ____,   ____,

    ____, ____, ____, ____, ____,
        ____, ____, ____, ____, ____,
    ____, ____, ____,
        ____, ____, ____,
];

#[rustfmt::skip]
static SYM: [Keycode; NKEYS] = [
    ____, ____,       ____, ____,        ____, ____,
        ____, ____,         ____, ____, ____, k(K::Backslash),
    LRCL, k(K::Grave), TILD, k(K::Equal), AMPR, ____,
        ____, PIPE,         PLUS, ____, ASTR, ____,
    ____, ____,       ____, ____,        ____, ____,
        ____, k(K::Dot),    k(K::ForwardSlash), ____, ____, ____,

    ____, ____, ____, ____, ____,
        ____, ____, ____, ____, ____,
    ____, ____, ____,
        ____, ____, k(K::Minus),
];

#[rustfmt::skip]
static NAV: [Keycode; NKEYS] = [
    ____, VOLU, VOLD, MPLY,            MUTE,          ____,
        HIDE, DRAG, ____, ____, ____, ____,
    LRCL, BTN1, BTN2, k(K::LeftShift), k(K::LeftGUI), ____,
        BTN1, BTN2, ____, ____, ____, ____,
    ____, SNIPE, ____, ____,           ____,          ____,
        ____, ____, ____, ____, ____, ____,

    ____, ____, ____, ____, ____,
        ____, ____, ____, ____, ____,
    ____, ____, ____,
        ____, ____, ____,
];

/// The layer tables, indexed by [`Layer::index`].
pub static KEYMAP: [&[Keycode; NKEYS]; 4] = [&ENGRAM, &NUM, &SYM, &NAV];

/// The table for a single layer.
pub fn layer_table(layer: Layer) -> &'static [Keycode; NKEYS] {
    KEYMAP[layer.index()]
}

/// Resolve the keycode for `pos`, using the highest active layer that doesn't
/// have the position transparent.
pub fn resolve(layers: &LayerStack, pos: usize) -> Keycode {
    if pos >= NKEYS {
        return Keycode::No;
    }
    layers
        .active()
        .map(|layer| KEYMAP[layer.index()][pos])
        .find(|code| *code != Keycode::Trans)
        .unwrap_or(Keycode::No)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::*;

    #[test]
    fn base_layer() {
        let layers = LayerStack::new();
        assert_eq!(resolve(&layers, KEY_B), k(K::B));
        assert_eq!(resolve(&layers, KEY_A), mt(Mods::GUI, K::A));
        assert_eq!(resolve(&layers, KEY_NUM), NUMW);
        assert_eq!(resolve(&layers, NKEYS), Keycode::No);
    }

    #[test]
    fn base_is_complete() {
        assert!(ENGRAM.iter().all(|code| *code != Keycode::Trans));
    }

    #[test]
    fn overlays_fall_through() {
        let mut layers = LayerStack::new();
        layers.on(Layer::Num);
        assert_eq!(resolve(&layers, KEY_C), k(K::Keyboard1));
        assert_eq!(resolve(&layers, KEY_N), k(K::Keyboard0));
        assert_eq!(resolve(&layers, KEY_R), k(K::Comma));
        assert_eq!(resolve(&layers, KEY_Q), k(K::Q));

        // Nav shadows Num where both have something.
        layers.on(Layer::Nav);
        assert_eq!(resolve(&layers, KEY_C), BTN1);
        assert_eq!(resolve(&layers, KEY_T), k(K::Keyboard8));
    }

    #[test]
    fn sym_layer() {
        let mut layers = LayerStack::new();
        layers.on(Layer::Sym);
        assert_eq!(resolve(&layers, KEY_SPACE), k(K::Minus));
        assert_eq!(resolve(&layers, KEY_H), PIPE);
        assert_eq!(resolve(&layers, KEY_ESC), LRCL);
    }
}
