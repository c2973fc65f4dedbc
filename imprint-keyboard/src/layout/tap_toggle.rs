//! Tap-toggle layers.
//!
//! The layer is on while the key is held.  Tapping it enough times in a row
//! locks it on, and the next press of the key unlocks it.

use super::state::KeyboardState;
use crate::layer::Layer;
use crate::log::info;
use crate::timer::{self, Instant};

pub struct TapToggle {
    layer: Option<Layer>,
    count: u8,
    required: u8,
    locked: bool,
    unlocking: bool,
    pressed_at: Instant,
    released_at: Instant,
}

impl TapToggle {
    pub fn new(required: u8) -> Self {
        TapToggle {
            layer: None,
            count: 0,
            required,
            locked: false,
            unlocking: false,
            pressed_at: Instant::from_ticks(0),
            released_at: Instant::from_ticks(0),
        }
    }

    pub fn press(&mut self, layer: Layer, now: Instant, term: u32, state: &mut KeyboardState) {
        // A layer clear also unlocks.
        if self.locked && !state.layers().is_on(layer) {
            self.locked = false;
        }
        if self.locked {
            self.locked = false;
            self.unlocking = true;
            self.count = 0;
            state.layer_off(layer);
            return;
        }
        if self.layer == Some(layer) && timer::elapsed(now, self.released_at) < term {
            self.count = self.count.saturating_add(1);
        } else {
            self.count = 1;
        }
        self.layer = Some(layer);
        self.pressed_at = now;
        state.layer_on(layer);
    }

    pub fn release(&mut self, layer: Layer, now: Instant, term: u32, state: &mut KeyboardState) {
        self.released_at = now;
        if self.unlocking {
            self.unlocking = false;
            self.layer = None;
            return;
        }
        if timer::elapsed(now, self.pressed_at) >= term {
            // Held, not tapped.
            self.count = 0;
        }
        if self.count >= self.required {
            info!("tap toggle: layer locked");
            self.count = 0;
            self.locked = true;
        } else {
            state.layer_off(layer);
        }
    }

    /// Some other key was pressed, which breaks the run of taps.
    pub fn interrupt(&mut self) {
        if !self.locked {
            self.layer = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: u32) -> Instant {
        Instant::from_ticks(ms)
    }

    #[test]
    fn momentary() {
        let mut state = KeyboardState::new();
        let mut tt = TapToggle::new(5);
        tt.press(Layer::Nav, at(0), 200, &mut state);
        assert!(state.layers().is_on(Layer::Nav));
        tt.release(Layer::Nav, at(500), 200, &mut state);
        assert!(!state.layers().is_on(Layer::Nav));
    }

    #[test]
    fn tapped_into_lock() {
        let mut state = KeyboardState::new();
        let mut tt = TapToggle::new(5);
        for i in 0..4 {
            tt.press(Layer::Nav, at(i * 100), 200, &mut state);
            tt.release(Layer::Nav, at(i * 100 + 30), 200, &mut state);
            assert!(!state.layers().is_on(Layer::Nav));
        }
        tt.press(Layer::Nav, at(400), 200, &mut state);
        tt.release(Layer::Nav, at(430), 200, &mut state);
        assert!(state.layers().is_on(Layer::Nav));

        // Typing on the layer leaves it locked.
        tt.interrupt();
        assert!(state.layers().is_on(Layer::Nav));

        tt.press(Layer::Nav, at(2000), 200, &mut state);
        assert!(!state.layers().is_on(Layer::Nav));
        tt.release(Layer::Nav, at(2030), 200, &mut state);
        assert!(!state.layers().is_on(Layer::Nav));
    }

    #[test]
    fn interrupted_run() {
        let mut state = KeyboardState::new();
        let mut tt = TapToggle::new(2);
        tt.press(Layer::Nav, at(0), 200, &mut state);
        tt.release(Layer::Nav, at(30), 200, &mut state);
        tt.interrupt();
        tt.press(Layer::Nav, at(60), 200, &mut state);
        tt.release(Layer::Nav, at(90), 200, &mut state);
        assert!(!state.layers().is_on(Layer::Nav));
    }
}
