//! Num word
//!
//! Num word turns the Num layer on for typing a single number.  The layer
//! stays on as long as the keys typed are ones that make up a number: digits,
//! the separators, corrections and shift.  Any other key turns it off before
//! that key is handled.  Not typing anything for the timeout also turns it
//! off.
//!
//! Num word shares the layer with the one-shot Num key without any
//! coordination.  Turning num word off turns the layer off, whoever turned it
//! on.

use usbd_human_interface_device::page::Keyboard;

use super::state::KeyboardState;
use crate::keycode::{is_digit, Keycode};
use crate::layer::Layer;
use crate::leds::LedState;
use crate::log::info;
use crate::timer::{self, Instant};
use crate::Mods;

pub struct NumWord {
    active: bool,
    deadline: Instant,
    timeout: u32,
}

impl NumWord {
    pub fn new(timeout_ms: u32) -> Self {
        NumWord {
            active: false,
            deadline: Instant::from_ticks(0),
            timeout: timeout_ms,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// When num word will turn off if nothing else is typed.  Only meaningful
    /// while active.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Turn num word on.  Does nothing if it is already on, and in particular
    /// doesn't move the deadline.
    pub fn activate(&mut self, now: Instant, state: &mut KeyboardState) {
        if self.active {
            return;
        }
        self.active = true;
        self.deadline = timer::after(now, self.timeout);
        state.layer_on(Layer::Num);
        state.indicate(LedState::NumWord);
        info!("num word on");
    }

    pub fn deactivate(&mut self, state: &mut KeyboardState) {
        if !self.active {
            return;
        }
        self.active = false;
        state.layer_off(Layer::Num);
        let top = state.layers().highest();
        state.indicate(top.into());
        info!("num word off");
    }

    /// Look at a key on its way to be handled, pressed or released.  Keys
    /// that don't belong in a number end num word.  Every key restarts the
    /// timeout.  Handling of the key always continues.
    pub fn process(&mut self, keycode: &Keycode, time: Instant, state: &mut KeyboardState) -> bool {
        if self.active && !continues(keycode) {
            self.deactivate(state);
        }
        self.deadline = timer::after(time, self.timeout);
        true
    }

    /// Turn off once the deadline is reached.
    pub fn idle(&mut self, now: Instant, state: &mut KeyboardState) {
        if self.active && timer::expired(now, self.deadline) {
            self.deactivate(state);
        }
    }
}

fn continues(keycode: &Keycode) -> bool {
    match keycode {
        Keycode::Key(key) => {
            is_digit(*key)
                || matches!(
                    key,
                    Keyboard::Comma
                        | Keyboard::Dot
                        | Keyboard::DeleteForward
                        | Keyboard::DeleteBackspace
                        | Keyboard::LeftShift
                )
        }
        Keycode::OneShotMod(mods) => *mods == Mods::SHIFT,
        _ => false,
    }
}
