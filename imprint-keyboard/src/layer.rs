//! The layer stack.
//!
//! The base (Engram) layer is always active.  Overlay layers are kept in a
//! set, and when resolving a key the highest numbered active layer is
//! consulted first.

use enumset::{EnumSet, EnumSetType};

/// The layers of the keymap, in priority order.
#[derive(EnumSetType, Debug)]
#[cfg_attr(feature = "std", derive(clap::ValueEnum))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Layer {
    Engram = 0,
    Num = 1,
    Sym = 2,
    Nav = 3,
}

impl Layer {
    /// Every layer, lowest priority first.
    pub const ALL: [Layer; 4] = [Layer::Engram, Layer::Num, Layer::Sym, Layer::Nav];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// The set of active overlay layers.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct LayerStack {
    overlays: EnumSet<Layer>,
}

impl LayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_on(&self, layer: Layer) -> bool {
        layer == Layer::Engram || self.overlays.contains(layer)
    }

    pub fn on(&mut self, layer: Layer) {
        if layer != Layer::Engram {
            self.overlays.insert(layer);
        }
    }

    pub fn off(&mut self, layer: Layer) {
        self.overlays.remove(layer);
    }

    /// Turn off every overlay, leaving just the base layer.
    pub fn clear(&mut self) {
        self.overlays.clear();
    }

    /// The highest active layer.
    pub fn highest(&self) -> Layer {
        self.overlays.iter().last().unwrap_or(Layer::Engram)
    }

    /// Active layers, highest priority first.
    pub fn active(&self) -> impl Iterator<Item = Layer> + '_ {
        Layer::ALL.iter().rev().copied().filter(|l| self.is_on(*l))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn highest_wins() {
        let mut layers = LayerStack::new();
        assert_eq!(layers.highest(), Layer::Engram);
        layers.on(Layer::Nav);
        layers.on(Layer::Num);
        assert_eq!(layers.highest(), Layer::Nav);
        let order: Vec<Layer> = layers.active().collect();
        assert_eq!(order, [Layer::Nav, Layer::Num, Layer::Engram]);
        layers.off(Layer::Nav);
        assert_eq!(layers.highest(), Layer::Num);
    }

    #[test]
    fn base_stays_on() {
        let mut layers = LayerStack::new();
        layers.off(Layer::Engram);
        assert!(layers.is_on(Layer::Engram));
        layers.on(Layer::Engram);
        assert_eq!(layers, LayerStack::new());
        layers.on(Layer::Sym);
        assert!(layers.is_on(Layer::Sym));
        layers.clear();
        assert!(!layers.is_on(Layer::Sym));
        assert_eq!(layers, LayerStack::new());
    }
}
