//! Keys on the Imprint (letters only)
//!
//! Each half has three rows of six finger keys, a row of five upper thumb
//! keys, and three lower thumb keys.  Scan positions follow the order the
//! layout tables are written in: each row runs from the left outer column to
//! the right outer column, across both halves.
//!
//! The names below are the legends on the base (Engram) layer.

use crate::Side;

/// All of the scan positions fit within this.
pub const NKEYS: usize = 52;

// Top finger row.
pub const KEY_TAB: usize = 0;
pub const KEY_B: usize = 1;
pub const KEY_Y: usize = 2;
pub const KEY_O: usize = 3;
pub const KEY_U: usize = 4;
pub const KEY_Z: usize = 5;
pub const KEY_Q: usize = 6;
pub const KEY_L: usize = 7;
pub const KEY_D: usize = 8;
pub const KEY_W: usize = 9;
pub const KEY_V: usize = 10;
pub const KEY_SEMI: usize = 11;

// Home row.  The letter keys here are mod-taps.
pub const KEY_ESC: usize = 12;
pub const KEY_C: usize = 13;
pub const KEY_I: usize = 14;
pub const KEY_E: usize = 15;
pub const KEY_A: usize = 16;
pub const KEY_COMMA: usize = 17;
pub const KEY_DOT: usize = 18;
pub const KEY_H: usize = 19;
pub const KEY_T: usize = 20;
pub const KEY_S: usize = 21;
pub const KEY_N: usize = 22;
pub const KEY_APOST: usize = 23;

// Bottom finger row.
pub const KEY_MEH: usize = 24;
pub const KEY_G: usize = 25;
pub const KEY_X: usize = 26;
pub const KEY_J: usize = 27;
pub const KEY_K: usize = 28;
pub const KEY_LPAREN: usize = 29;
pub const KEY_LBRACE: usize = 30;
pub const KEY_R: usize = 31;
pub const KEY_M: usize = 32;
pub const KEY_F: usize = 33;
pub const KEY_P: usize = 34;
pub const KEY_SLASH: usize = 35;

// Upper thumb row.
pub const KEY_LEFT: usize = 36;
pub const KEY_RIGHT: usize = 37;
pub const KEY_LEAD: usize = 38;
pub const KEY_SYM: usize = 39;
pub const KEY_BROWSER: usize = 40;
pub const KEY_NAV: usize = 41;
pub const KEY_SCREENSHOT: usize = 42;
pub const KEY_ENTER: usize = 43;
pub const KEY_UP: usize = 44;
pub const KEY_DOWN: usize = 45;

// Lower thumb row.
pub const KEY_BSPC: usize = 46;
pub const KEY_NUM: usize = 47;
pub const KEY_LBRACKET: usize = 48;
pub const KEY_AI: usize = 49;
pub const KEY_SHIFT: usize = 50;
pub const KEY_SPACE: usize = 51;

/// Which half a scan position is on.
pub fn side_of(pos: usize) -> Side {
    let left = match pos {
        0..=35 => pos % 12 < 6,
        36..=45 => pos < 41,
        _ => pos < 49,
    };
    if left {
        Side::Left
    } else {
        Side::Right
    }
}
