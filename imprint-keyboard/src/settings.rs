//! Keymap settings.
//!
//! The timing of the behaviors can be tuned without rebuilding the keymap.
//! The settings are stored as a CBOR map, and anything that fails to decode
//! falls back to the defaults.

use alloc::vec::Vec;
use core::convert::Infallible;

use minicbor::{Decode, Encode};

use crate::log::warn;

/// Timing and counts used by the layout.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
#[cbor(tag(0x696d7072696e74))]
#[cbor(map)]
pub struct Settings {
    /// Mod-tap hold and tap dance decisions are made after this long.
    #[n(1)]
    pub tapping_term_ms: u32,

    /// How long num word stays on with no keys typed.
    #[n(2)]
    pub num_word_timeout_ms: u32,

    /// Leader sequences end after this long.
    #[n(3)]
    pub leader_timeout_ms: u32,

    /// When true the leader timeout restarts with each key of the sequence,
    /// otherwise it runs from the leader key.
    #[n(4)]
    pub leader_per_key_timing: bool,

    #[n(5)]
    pub caps_word_idle_timeout_ms: u32,

    /// Taps needed to lock a tap-toggle layer on.
    #[n(6)]
    pub tapping_toggle: u8,
}

pub const SETTINGS_TAG: u64 = 0x696d7072696e74;

impl Default for Settings {
    fn default() -> Self {
        Settings {
            tapping_term_ms: 200,
            num_word_timeout_ms: 5000,
            leader_timeout_ms: 300,
            leader_per_key_timing: true,
            caps_word_idle_timeout_ms: 5000,
            tapping_toggle: 5,
        }
    }
}

impl Settings {
    pub fn decode(buffer: &[u8]) -> Result<Settings, minicbor::decode::Error> {
        minicbor::decode(buffer)
    }

    /// Decode settings, using the defaults if the buffer doesn't hold a valid
    /// record.
    pub fn decode_or_default(buffer: &[u8]) -> Settings {
        match Self::decode(buffer) {
            Ok(settings) => settings,
            Err(_) => {
                warn!("Fail to read Settings, using defaults");
                Settings::default()
            }
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, minicbor::encode::Error<Infallible>> {
        minicbor::to_vec(self)
    }
}
