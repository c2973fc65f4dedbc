//! RGB layer indication.
//!
//! The board's RGB matrix shows which layer is on top, and a couple of
//! transient states (caps word, num word).  The engine only decides what the
//! LEDs should show; the driver lives with the host.

use smart_leds::hsv::{hsv2rgb, Hsv};
use smart_leds::RGB8;

use crate::layer::Layer;

/// A color, as hue/saturation/value.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color {
    pub hue: u8,
    pub sat: u8,
    pub val: u8,
}

impl Color {
    pub const PURPLE: Color = Color::new(191, 255, 255);
    pub const MAGENTA: Color = Color::new(213, 255, 255);
    pub const CYAN: Color = Color::new(128, 255, 255);
    pub const CORAL: Color = Color::new(11, 176, 255);

    pub const fn new(hue: u8, sat: u8, val: u8) -> Color {
        Color { hue, sat, val }
    }

    pub fn rgb(self) -> RGB8 {
        hsv2rgb(Hsv {
            hue: self.hue,
            sat: self.sat,
            val: self.val,
        })
    }
}

/// The animation the matrix runs with.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    Solid,
    GradientLeftRight,
    GradientUpDown,
}

/// What the LEDs are showing.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Indication {
    pub color: Color,
    pub effect: Effect,
}

impl Default for Indication {
    fn default() -> Self {
        LedState::Layer(Layer::Engram).indication()
    }
}

/// The states that have a distinct indication.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedState {
    Layer(Layer),
    CapsWord,
    NumWord,
}

impl From<Layer> for LedState {
    fn from(layer: Layer) -> Self {
        LedState::Layer(layer)
    }
}

impl LedState {
    /// The full indication for this state, starting from the base color.
    pub fn indication(self) -> Indication {
        self.apply(Indication {
            color: Color::PURPLE,
            effect: Effect::Solid,
        })
    }

    /// Apply this state on top of what is currently shown.  The transient
    /// states only change the effect, and keep the layer's color.
    pub fn apply(self, current: Indication) -> Indication {
        let (color, effect) = match self {
            LedState::Layer(Layer::Engram) => (Some(Color::PURPLE), Effect::Solid),
            LedState::Layer(Layer::Num) => (Some(Color::MAGENTA), Effect::GradientLeftRight),
            LedState::Layer(Layer::Sym) => (Some(Color::CYAN), Effect::GradientLeftRight),
            LedState::Layer(Layer::Nav) => (Some(Color::CORAL), Effect::GradientLeftRight),
            LedState::CapsWord => (None, Effect::GradientUpDown),
            LedState::NumWord => (None, Effect::GradientLeftRight),
        };
        Indication {
            color: color.unwrap_or(current.color),
            effect,
        }
    }
}
