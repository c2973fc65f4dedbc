//! Layer and indicator state.
//!
//! The behaviors all change layers through here, so that every layer change
//! picks the indicator for whatever layer ends up on top.

use crate::layer::{Layer, LayerStack};
use crate::leds::{Indication, LedState};

pub struct KeyboardState {
    layers: LayerStack,
    shown: Indication,
    reported: Indication,
}

impl Default for KeyboardState {
    fn default() -> Self {
        KeyboardState::new()
    }
}

impl KeyboardState {
    pub fn new() -> Self {
        KeyboardState {
            layers: LayerStack::new(),
            shown: Indication::default(),
            reported: Indication::default(),
        }
    }

    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    pub fn layer_on(&mut self, layer: Layer) {
        let before = self.layers;
        self.layers.on(layer);
        self.layers_changed(before);
    }

    pub fn layer_off(&mut self, layer: Layer) {
        let before = self.layers;
        self.layers.off(layer);
        self.layers_changed(before);
    }

    pub fn layer_clear(&mut self) {
        let before = self.layers;
        self.layers.clear();
        self.layers_changed(before);
    }

    fn layers_changed(&mut self, before: LayerStack) {
        if before != self.layers {
            let top = self.layers.highest();
            self.indicate(top.into());
        }
    }

    /// Show the given state on the LEDs.
    pub fn indicate(&mut self, state: LedState) {
        self.shown = state.apply(self.shown);
    }

    /// What the LEDs currently show.
    pub fn indication(&self) -> Indication {
        self.shown
    }

    /// The indication, if it differs from what was last taken.
    pub fn take_indication(&mut self) -> Option<Indication> {
        if self.shown != self.reported {
            self.reported = self.shown;
            Some(self.shown)
        } else {
            None
        }
    }
}
