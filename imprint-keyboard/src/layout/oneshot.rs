//! One-shot layers and modifiers.

use super::state::KeyboardState;
use crate::layer::Layer;
use crate::Mods;

/// A layer that applies to the next key pressed.
///
/// If other keys are pressed while the trigger is still down, the layer acts
/// like a momentary layer instead, and goes away with the trigger.
#[derive(Default)]
pub struct OneShotLayer {
    layer: Option<Layer>,
    held: bool,
    used: bool,
}

impl OneShotLayer {
    pub fn start(&mut self, layer: Layer, state: &mut KeyboardState) {
        if let Some(old) = self.layer.take() {
            if old != layer {
                state.layer_off(old);
            }
        }
        state.layer_on(layer);
        self.layer = Some(layer);
        self.held = true;
        self.used = false;
    }

    pub fn is_active(&self) -> bool {
        self.layer.is_some()
    }

    pub fn trigger_released(&mut self, state: &mut KeyboardState) {
        if self.layer.is_none() {
            return;
        }
        self.held = false;
        if self.used {
            self.clear(state);
        }
    }

    /// A key was pressed, and has already been looked up on the layer.
    pub fn key_pressed(&mut self, state: &mut KeyboardState) {
        if self.layer.is_none() {
            return;
        }
        if self.held {
            self.used = true;
        } else {
            self.clear(state);
        }
    }

    pub fn clear(&mut self, state: &mut KeyboardState) {
        if let Some(layer) = self.layer.take() {
            state.layer_off(layer);
        }
        self.held = false;
        self.used = false;
    }
}

/// Modifiers that apply to the next key pressed.
///
/// While the key is down the modifiers are simply held.  Tapping it without
/// pressing anything else arms them for the next key.
#[derive(Default)]
pub struct OneShotMods {
    held: Mods,
    armed: Mods,
    used: bool,
}

impl OneShotMods {
    pub fn press(&mut self, mods: Mods) {
        self.held |= mods;
        self.used = false;
    }

    /// Returns true if the modifiers were armed.
    pub fn release(&mut self, mods: Mods) -> bool {
        self.held.remove(mods);
        if self.used {
            false
        } else {
            self.armed |= mods;
            true
        }
    }

    pub fn armed(&self) -> Mods {
        self.armed
    }

    /// Another key was pressed.  Returns the armed modifiers for it, which
    /// are now used up.
    pub fn take(&mut self) -> Mods {
        if !self.held.is_empty() {
            self.used = true;
        }
        core::mem::replace(&mut self.armed, Mods::empty())
    }

    /// Drop any armed modifiers.  Returns true if there were some.
    pub fn cancel(&mut self) -> bool {
        let had = !self.armed.is_empty();
        self.armed = Mods::empty();
        had
    }
}
