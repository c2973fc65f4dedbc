//! Tests for num word
//!
//! Num word is reached by double tapping the num key, and keeps the Num layer
//! on while a number is typed.  These run whole key sequences through the
//! layout and check what it reports.

mod common;

use common::*;
use imprint_keyboard::keys::*;
use imprint_keyboard::{Indication, Keyboard, Layer, LedState, Settings};

fn num_indication() -> Indication {
    LedState::Layer(Layer::Num).indication()
}

/// Double tap the num key, starting at the current time, and let the tap
/// dance finish.
fn double_tap_num(tests: &mut Vec<ActorStep>) {
    tap(tests, KEY_NUM);
    tests.push(ActorStep::Tick(50));
    tap(tests, KEY_NUM);
    // The dance finishes once the term has passed since the last tap.
    tests.push(ActorStep::Tick(200));
    tests.push(ActorStep::Tick(1));
}

#[test]
fn number_then_word() {
    let mut tests = startup();
    double_tap_num(&mut tests);
    expect_indicator(&mut tests, num_indication());

    type_key(&mut tests, KEY_C, Keyboard::Keyboard1);
    type_key(&mut tests, KEY_R, Keyboard::Comma);
    type_key(&mut tests, KEY_A, Keyboard::Keyboard4);
    type_key(&mut tests, KEY_M, Keyboard::Dot);
    type_key(&mut tests, KEY_N, Keyboard::Keyboard0);

    // A letter ends num word, and is typed from the base layer.
    press(&mut tests, KEY_Q);
    expect_keys(&mut tests, &[Keyboard::Q]);
    expect_indicator(&mut tests, Indication::default());
    release(&mut tests, KEY_Q);
    expect_keys(&mut tests, &[]);

    // The home row is back to home row mods.
    tap_key(&mut tests, KEY_C, Keyboard::C);
    run(&tests);
}

#[test]
fn corrections_and_shift_continue() {
    let mut tests = startup();
    double_tap_num(&mut tests);
    expect_indicator(&mut tests, num_indication());

    type_key(&mut tests, KEY_I, Keyboard::Keyboard2);
    type_key(&mut tests, KEY_BSPC, Keyboard::DeleteBackspace);

    // Holding the one-shot shift is fine too.
    press(&mut tests, KEY_SHIFT);
    expect_keys(&mut tests, &[Keyboard::LeftShift]);
    release(&mut tests, KEY_SHIFT);
    expect_keys(&mut tests, &[]);
    expect_indicator(&mut tests, LedState::CapsWord.apply(num_indication()));

    // The armed shift is used on the digit.
    press(&mut tests, KEY_E);
    expect_keys(&mut tests, &[Keyboard::Keyboard3, Keyboard::LeftShift]);
    expect_indicator(&mut tests, num_indication());
    release(&mut tests, KEY_E);
    expect_keys(&mut tests, &[]);

    type_key(&mut tests, KEY_T, Keyboard::Keyboard8);
    run(&tests);
}

#[test]
fn one_shot_meh_ends_it() {
    let caps = LedState::CapsWord.apply(Indication::default());

    let mut tests = startup();
    double_tap_num(&mut tests);
    expect_indicator(&mut tests, num_indication());

    // Only the one-shot shift continues a number.
    press(&mut tests, KEY_MEH);
    expect_keys(
        &mut tests,
        &[Keyboard::LeftControl, Keyboard::LeftShift, Keyboard::LeftAlt],
    );
    expect_indicator(&mut tests, Indication::default());
    release(&mut tests, KEY_MEH);
    expect_keys(&mut tests, &[]);
    expect_indicator(&mut tests, caps);

    // The armed Meh goes with a key from the base layer.
    press(&mut tests, KEY_Q);
    expect_keys(
        &mut tests,
        &[
            Keyboard::Q,
            Keyboard::LeftControl,
            Keyboard::LeftShift,
            Keyboard::LeftAlt,
        ],
    );
    expect_indicator(&mut tests, Indication::default());
    release(&mut tests, KEY_Q);
    expect_keys(&mut tests, &[]);
    run(&tests);
}

#[test]
fn times_out() {
    let mut tests = startup();
    double_tap_num(&mut tests);
    expect_indicator(&mut tests, num_indication());

    // Each key restarts the timeout.
    tests.push(ActorStep::Tick(3000));
    type_key(&mut tests, KEY_H, Keyboard::Keyboard7);
    tests.push(ActorStep::Tick(4999));
    tests.push(ActorStep::Tick(1));
    expect_indicator(&mut tests, Indication::default());

    tests.push(ActorStep::Tick(10));
    tap_key(&mut tests, KEY_H, Keyboard::H);
    run(&tests);
}

#[test]
fn shorter_timeout() {
    let mut tests = startup();
    double_tap_num(&mut tests);
    expect_indicator(&mut tests, num_indication());
    tests.push(ActorStep::Tick(999));
    type_key(&mut tests, KEY_S, Keyboard::Keyboard9);
    tests.push(ActorStep::Tick(1000));
    expect_indicator(&mut tests, Indication::default());

    let settings = Settings {
        num_word_timeout_ms: 1000,
        ..Settings::default()
    };
    run_with(&tests, settings);
}

#[test]
fn release_after_num_word_ends() {
    let mut tests = startup();
    double_tap_num(&mut tests);
    expect_indicator(&mut tests, num_indication());

    press(&mut tests, KEY_C);
    expect_keys(&mut tests, &[Keyboard::Keyboard1]);
    press(&mut tests, KEY_Q);
    expect_keys(&mut tests, &[Keyboard::Q, Keyboard::Keyboard1]);
    expect_indicator(&mut tests, Indication::default());

    // The digit is still released, even though its layer is gone.
    release(&mut tests, KEY_C);
    expect_keys(&mut tests, &[Keyboard::Q]);
    release(&mut tests, KEY_Q);
    expect_keys(&mut tests, &[]);
    run(&tests);
}

#[test]
fn num_key_restarts_it() {
    let mut tests = startup();
    double_tap_num(&mut tests);
    expect_indicator(&mut tests, num_indication());

    // The num key isn't part of a number, so the first tap ends num word and
    // the dance turns it back on.
    press(&mut tests, KEY_NUM);
    expect_indicator(&mut tests, Indication::default());
    release(&mut tests, KEY_NUM);
    tests.push(ActorStep::Tick(50));
    tap(&mut tests, KEY_NUM);
    tests.push(ActorStep::Tick(201));
    expect_indicator(&mut tests, num_indication());
    type_key(&mut tests, KEY_C, Keyboard::Keyboard1);
    run(&tests);
}

#[test]
fn single_tap_is_one_shot() {
    let mut tests = startup();
    tap(&mut tests, KEY_NUM);
    tests.push(ActorStep::Tick(200));
    tests.push(ActorStep::Tick(1));
    expect_indicator(&mut tests, num_indication());

    // One digit, then back to the base layer.
    press(&mut tests, KEY_C);
    expect_keys(&mut tests, &[Keyboard::Keyboard1]);
    expect_indicator(&mut tests, Indication::default());
    release(&mut tests, KEY_C);
    expect_keys(&mut tests, &[]);

    type_key(&mut tests, KEY_B, Keyboard::B);
    run(&tests);
}

#[test]
fn interrupted_single_tap() {
    let mut tests = startup();
    tap(&mut tests, KEY_NUM);
    tests.push(ActorStep::Tick(50));

    // The next key finishes the dance, and is looked up on the Num layer.
    // The layer is on and off again before anything is reported.
    type_key(&mut tests, KEY_I, Keyboard::Keyboard2);
    tap_key(&mut tests, KEY_I, Keyboard::I);
    run(&tests);
}
