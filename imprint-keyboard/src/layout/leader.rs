//! Leader sequences
//!
//! The leader key starts a short sequence of keys that is then looked up in
//! the sequence table.  The keys of a sequence aren't typed.  A sequence ends
//! when it fills up, when it is a single key sequence that matched, or when
//! the leader timeout passes.

use arrayvec::ArrayVec;
use usbd_human_interface_device::page::Keyboard;

use crate::keycode::Keycode;
use crate::log::{debug, info};
use crate::timer::{self, Instant};

/// The longest sequence.
const MAX_SEQUENCE: usize = 5;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LeaderAction {
    /// Type out some text.
    Type(&'static str),
    /// Reboot into the bootloader.
    Bootloader,
}

struct Sequence {
    keys: &'static [Keyboard],
    action: LeaderAction,
}

static SEQUENCES: [Sequence; 7] = [
    Sequence { keys: &[Keyboard::Space], action: LeaderAction::Type("_") },
    Sequence { keys: &[Keyboard::Dot], action: LeaderAction::Type("->") },
    Sequence { keys: &[Keyboard::ForwardSlash], action: LeaderAction::Type("./") },
    Sequence { keys: &[Keyboard::A], action: LeaderAction::Type("&&") },
    Sequence { keys: &[Keyboard::H], action: LeaderAction::Type("||") },
    Sequence { keys: &[Keyboard::E], action: LeaderAction::Type("==") },
    Sequence {
        keys: &[Keyboard::B, Keyboard::O, Keyboard::O, Keyboard::T],
        action: LeaderAction::Bootloader,
    },
];

pub struct Leader {
    active: bool,
    keys: ArrayVec<Keycode, MAX_SEQUENCE>,
    timer: Instant,
    timeout: u32,
    per_key: bool,
}

impl Leader {
    pub fn new(timeout_ms: u32, per_key: bool) -> Self {
        Leader {
            active: false,
            keys: ArrayVec::new(),
            timer: Instant::from_ticks(0),
            timeout: timeout_ms,
            per_key,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn start(&mut self, now: Instant) {
        debug!("leader start");
        self.active = true;
        self.keys.clear();
        self.timer = now;
    }

    /// Add a key to the sequence.  Returns true when the sequence is over, and
    /// [`finish`](Self::finish) should be called.
    pub fn add(&mut self, keycode: Keycode, now: Instant) -> bool {
        // Mod-taps count as their tap.
        let keycode = match keycode {
            Keycode::ModTap(_, key) => Keycode::Key(key),
            other => other,
        };
        if self.keys.try_push(keycode).is_err() {
            return true;
        }
        if self.per_key {
            self.timer = now;
        }
        self.keys.is_full() || (self.keys.len() == 1 && self.lookup().is_some())
    }

    /// Has the sequence timed out?
    pub fn expired(&self, now: Instant) -> bool {
        self.active && timer::elapsed(now, self.timer) > self.timeout
    }

    /// End the sequence, returning the action it matched.
    pub fn finish(&mut self) -> Option<LeaderAction> {
        let action = self.lookup();
        info!("leader end, {} keys, matched: {}", self.keys.len(), action.is_some());
        self.active = false;
        self.keys.clear();
        action
    }

    fn lookup(&self) -> Option<LeaderAction> {
        SEQUENCES
            .iter()
            .find(|seq| {
                seq.keys.len() == self.keys.len()
                    && seq
                        .keys
                        .iter()
                        .zip(self.keys.iter())
                        .all(|(want, got)| *got == Keycode::Key(*want))
            })
            .map(|seq| seq.action)
    }
}
