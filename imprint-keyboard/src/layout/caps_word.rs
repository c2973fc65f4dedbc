//! Caps word
//!
//! Shifts letters until the end of the current word.

use usbd_human_interface_device::page::Keyboard;

use super::state::KeyboardState;
use crate::keycode::{is_digit, is_letter, Keycode};
use crate::leds::LedState;
use crate::log::info;
use crate::timer::{self, Instant};
use crate::Mods;

/// What a key does to caps word.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Class {
    /// Typed shifted, the word continues.
    Shifted,
    /// Typed as is, the word continues.
    Continue,
    /// Doesn't affect the word.
    Ignore,
    /// Ends the word.
    Stop,
}

fn classify(keycode: &Keycode, mods: Mods, leader: bool) -> Class {
    if keycode.is_modifier() {
        return Class::Ignore;
    }
    if !mods.difference(Mods::SHIFT_MASK).is_empty() {
        return Class::Stop;
    }
    match keycode {
        Keycode::Key(key) if is_letter(*key) || *key == Keyboard::Minus => Class::Shifted,
        Keycode::Key(key)
            if is_digit(*key)
                || matches!(key, Keyboard::DeleteBackspace | Keyboard::DeleteForward) =>
        {
            Class::Continue
        }
        Keycode::Key(Keyboard::Space) if leader => Class::Continue,
        Keycode::Modded(m, Keyboard::Minus) if *m == Mods::SHIFT => Class::Continue,
        Keycode::Leader => Class::Continue,
        Keycode::No
        | Keycode::Trans
        | Keycode::OneShotLayer(_)
        | Keycode::TapToggle(_)
        | Keycode::TapDance(_) => Class::Ignore,
        _ => Class::Stop,
    }
}

pub struct CapsWord {
    active: bool,
    deadline: Instant,
    timeout: u32,
}

impl CapsWord {
    pub fn new(timeout_ms: u32) -> Self {
        CapsWord {
            active: false,
            deadline: Instant::from_ticks(0),
            timeout: timeout_ms,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn on(&mut self, now: Instant, state: &mut KeyboardState) {
        if self.active {
            return;
        }
        self.active = true;
        self.deadline = timer::after(now, self.timeout);
        state.indicate(LedState::CapsWord);
        info!("caps word on");
    }

    pub fn off(&mut self, state: &mut KeyboardState) {
        if !self.active {
            return;
        }
        self.active = false;
        let top = state.layers().highest();
        state.indicate(top.into());
        info!("caps word off");
    }

    /// A key is pressed, with `mods` active.  Returns true if the key should
    /// be shifted.
    pub fn press(
        &mut self,
        keycode: &Keycode,
        mods: Mods,
        leader: bool,
        now: Instant,
        state: &mut KeyboardState,
    ) -> bool {
        if !self.active {
            return false;
        }
        match classify(keycode, mods, leader) {
            Class::Shifted => {
                self.deadline = timer::after(now, self.timeout);
                true
            }
            Class::Continue => {
                self.deadline = timer::after(now, self.timeout);
                false
            }
            Class::Ignore => false,
            Class::Stop => {
                self.off(state);
                false
            }
        }
    }

    pub fn idle(&mut self, now: Instant, state: &mut KeyboardState) {
        if self.active && timer::expired(now, self.deadline) {
            self.off(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keycode::{k, m, s};
    use crate::layer::Layer;
    use crate::leds::{Effect, Indication};

    #[test]
    fn classes() {
        let none = Mods::empty();
        assert_eq!(classify(&k(Keyboard::Q), none, false), Class::Shifted);
        assert_eq!(classify(&k(Keyboard::Minus), none, false), Class::Shifted);
        assert_eq!(classify(&s(Keyboard::Minus), none, false), Class::Continue);
        assert_eq!(classify(&k(Keyboard::Keyboard4), none, false), Class::Continue);
        assert_eq!(classify(&k(Keyboard::Space), none, false), Class::Stop);
        assert_eq!(classify(&k(Keyboard::Space), none, true), Class::Continue);
        assert_eq!(classify(&k(Keyboard::LeftShift), none, false), Class::Ignore);
        assert_eq!(classify(&Keycode::OneShotLayer(Layer::Sym), none, false), Class::Ignore);
        assert_eq!(classify(&k(Keyboard::Q), Mods::RIGHT_GUI, false), Class::Stop);
        assert_eq!(classify(&k(Keyboard::Q), Mods::SHIFT, false), Class::Shifted);
        assert_eq!(classify(&m(Mods::HYPER, Keyboard::Keyboard2), none, false), Class::Stop);
        assert_eq!(classify(&k(Keyboard::Dot), none, false), Class::Stop);
    }

    #[test]
    fn word_then_timeout() {
        let mut state = KeyboardState::new();
        let mut caps = CapsWord::new(5000);
        assert!(!caps.press(&k(Keyboard::A), Mods::empty(), false, Instant::from_ticks(0), &mut state));

        caps.on(Instant::from_ticks(0), &mut state);
        assert_eq!(state.indication().effect, Effect::GradientUpDown);
        assert!(caps.press(&k(Keyboard::A), Mods::empty(), false, Instant::from_ticks(100), &mut state));
        caps.idle(Instant::from_ticks(5099), &mut state);
        assert!(caps.is_active());
        caps.idle(Instant::from_ticks(5100), &mut state);
        assert!(!caps.is_active());
        assert_eq!(state.indication(), Indication::default());
    }
}
