//! Key event scripts.
//!
//! A script is a line per step:
//!
//! ```text
//! # double tap num, then type 12
//! tap 47
//! tick 50
//! tap 47
//! tick 250
//! press 13
//! release 13
//! tap 14
//! ```
//!
//! Key numbers are scan positions.  Blank lines and `#` comments are ignored.

use anyhow::{anyhow, Result};
use imprint_keyboard::keys::NKEYS;
use imprint_keyboard::KeyEvent;
use regex::Regex;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Event(KeyEvent),
    Tick(usize),
}

pub fn parse(text: &str) -> Result<Vec<Step>> {
    let line_re = Regex::new(r"^(press|release|tap|tick)\s+(\d+)$")?;
    let mut steps = Vec::new();

    for (num, line) in text.lines().enumerate() {
        let line = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line,
        }
        .trim();
        if line.is_empty() {
            continue;
        }

        let caps = line_re
            .captures(line)
            .ok_or_else(|| anyhow!("line {}: unrecognized step {:?}", num + 1, line))?;
        let value: usize = caps[2].parse()?;

        if &caps[1] == "tick" {
            steps.push(Step::Tick(value));
            continue;
        }

        if value >= NKEYS {
            return Err(anyhow!("line {}: no key at position {}", num + 1, value));
        }
        let key = value as u8;
        match &caps[1] {
            "press" => steps.push(Step::Event(KeyEvent::Press(key))),
            "release" => steps.push(Step::Event(KeyEvent::Release(key))),
            _ => {
                steps.push(Step::Event(KeyEvent::Press(key)));
                steps.push(Step::Event(KeyEvent::Release(key)));
            }
        }
    }

    Ok(steps)
}
