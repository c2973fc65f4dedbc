//! Tap dance counting.
//!
//! Taps of a dance key are counted while each one comes soon enough after
//! the previous.  The dance finishes when the tapping term passes without
//! another tap, or when some other key is pressed.  It is reset once it has
//! finished and the key is up.

use crate::keycode::TapDance;
use crate::timer::{self, Instant};

/// A dance that has finished, and how many taps it got.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Finish {
    pub dance: TapDance,
    pub count: u8,
}

struct Dance {
    dance: TapDance,
    pos: u8,
    count: u8,
    pressed: bool,
    finished: bool,
    last_press: Instant,
}

#[derive(Default)]
pub struct TapDances {
    current: Option<Dance>,
}

impl TapDances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, dance: TapDance, pos: u8, now: Instant) {
        if let Some(d) = self.current.as_mut() {
            if d.pos == pos && !d.finished {
                d.count = d.count.saturating_add(1);
                d.pressed = true;
                d.last_press = now;
                return;
            }
        }
        self.current = Some(Dance {
            dance,
            pos,
            count: 1,
            pressed: true,
            finished: false,
            last_press: now,
        });
    }

    /// The dance key is released.  Returns the dance if it is to be reset.
    pub fn release(&mut self, pos: u8) -> Option<Finish> {
        let d = self.current.as_mut()?;
        if d.pos != pos {
            return None;
        }
        d.pressed = false;
        if d.finished {
            self.current.take().map(|d| d.finish())
        } else {
            None
        }
    }

    /// Another key is being pressed.  Returns the finished dance, and whether
    /// it has been reset as well.
    pub fn interrupt(&mut self, pos: u8) -> Option<(Finish, bool)> {
        let other = matches!(&self.current, Some(d) if d.pos != pos);
        if other {
            self.finish()
        } else {
            None
        }
    }

    /// Finish the dance if the tapping term has passed since the last tap.
    pub fn expire(&mut self, now: Instant, term: u32) -> Option<(Finish, bool)> {
        let due = matches!(
            &self.current,
            Some(d) if !d.finished && timer::elapsed(now, d.last_press) > term
        );
        if due {
            self.finish()
        } else {
            None
        }
    }

    fn finish(&mut self) -> Option<(Finish, bool)> {
        let d = self.current.as_mut()?;
        if d.finished {
            return None;
        }
        d.finished = true;
        let finish = d.finish();
        let reset = !d.pressed;
        if reset {
            self.current = None;
        }
        Some((finish, reset))
    }
}

impl Dance {
    fn finish(&self) -> Finish {
        Finish {
            dance: self.dance,
            count: self.count,
        }
    }
}
