//! Mod-tap decisions.
//!
//! A mod-tap key is undecided when pressed.  Releasing it within the tapping
//! term makes it a tap of its key.  Still holding it when the term runs out
//! makes it a hold of its modifiers.  Other keys pressed in the meantime wait
//! for the decision.

use usbd_human_interface_device::page::Keyboard;

use crate::keycode::Keycode;
use crate::timer::{self, Instant};
use crate::Mods;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Decision {
    Tap,
    Hold,
}

#[derive(Clone, Copy, Debug)]
pub struct PendingTap {
    pub pos: u8,
    pub mods: Mods,
    pub tap: Keyboard,
    pub pressed_at: Instant,
    deadline: Instant,
}

impl PendingTap {
    pub fn new(pos: u8, mods: Mods, tap: Keyboard, now: Instant, term: u32) -> Self {
        PendingTap {
            pos,
            mods,
            tap,
            pressed_at: now,
            deadline: timer::after(now, term),
        }
    }

    /// Has the key been held long enough to be a hold?
    pub fn held_out(&self, now: Instant) -> bool {
        timer::expired(now, self.deadline)
    }

    /// The keycode the key acts as, once decided.
    pub fn keycode(&self, decision: Decision) -> Keycode {
        match decision {
            Decision::Tap => Keycode::Key(self.tap),
            Decision::Hold => Keycode::Modifier(self.mods),
        }
    }
}
