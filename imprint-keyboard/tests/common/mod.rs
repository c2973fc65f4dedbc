//! The test actor shared by the layout tests.
//!
//! A test is a script of steps: time passing, key events, and the actions
//! expected from the layout in response.

#![allow(dead_code)]

use std::{cell::RefCell, collections::VecDeque};

use futures::executor::block_on;
use imprint_keyboard::{
    Indication, KeyAction, KeyEvent, Keyboard, LayoutActions, LayoutManager, PointerAction,
    Settings, Side,
};

/// Actions. This is essentially an encoding of LayoutActions.
#[derive(PartialEq, Eq, Debug)]
pub enum Actions {
    SendKey(KeyAction),
    SetIndicator(Indication),
    SendPointer(PointerAction),
    EnterBootloader,
}

/// Our Actor steps are each one of these.
pub enum ActorStep {
    /// Cause this much time to pass for the layout engine (in its ticks).
    Tick(usize),
    /// Send an action.
    Event(KeyEvent),
    /// Expect this action.
    Action(Actions),
}

/// Keep track of the actions from the layout.
pub struct TestActor {
    /// Actions that have been queued up.
    pub actions: RefCell<VecDeque<Actions>>,
}

impl TestActor {
    pub fn new() -> Self {
        Self {
            actions: RefCell::new(VecDeque::new()),
        }
    }
}

impl LayoutActions for TestActor {
    async fn send_key(&self, key: KeyAction) {
        println!("send_key called with key: {:?}", key);
        self.actions.borrow_mut().push_back(Actions::SendKey(key));
    }

    async fn set_indicator(&self, indication: Indication) {
        println!("set_indicator called with: {:?}", indication);
        self.actions
            .borrow_mut()
            .push_back(Actions::SetIndicator(indication));
    }

    async fn send_pointer(&self, action: PointerAction) {
        println!("send_pointer called with: {:?}", action);
        self.actions
            .borrow_mut()
            .push_back(Actions::SendPointer(action));
    }

    async fn enter_bootloader(&self) {
        println!("enter_bootloader called");
        self.actions.borrow_mut().push_back(Actions::EnterBootloader);
    }
}

/// Run the script against a fresh layout.
pub fn run(tests: &[ActorStep]) {
    run_with(tests, Settings::default())
}

pub fn run_with(tests: &[ActorStep], settings: Settings) {
    block_on(async {
        let mut layout = LayoutManager::new(settings);
        let actor = TestActor::new();

        for step in tests {
            match step {
                ActorStep::Tick(t) => {
                    layout.tick(&actor, *t).await;
                }
                ActorStep::Event(e) => {
                    layout.handle_event(*e, &actor).await;
                }
                ActorStep::Action(a) => {
                    let act = actor.actions.borrow_mut().pop_front();
                    match act {
                        Some(act) => {
                            assert_eq!(&act, a);
                        }
                        None => {
                            panic!("Expected action {:?}, but none found", a);
                        }
                    }
                }
            }
        }

        if !actor.actions.borrow().is_empty() {
            panic!(
                "Expected no actions to be pending, but found {:?}",
                actor.actions.borrow()
            );
        }
    });
}

/// What the layout reports when it first runs.
pub fn startup() -> Vec<ActorStep> {
    let mut tests = vec![
        ActorStep::Tick(1),
        ActorStep::Action(Actions::SetIndicator(Indication::default())),
    ];
    for side in [Side::Left, Side::Right] {
        tests.push(ActorStep::Action(Actions::SendPointer(
            PointerAction::DragScroll {
                side,
                enabled: true,
            },
        )));
    }
    tests
}

pub fn press(tests: &mut Vec<ActorStep>, pos: usize) {
    tests.push(ActorStep::Event(KeyEvent::Press(pos as u8)));
}

pub fn release(tests: &mut Vec<ActorStep>, pos: usize) {
    tests.push(ActorStep::Event(KeyEvent::Release(pos as u8)));
}

/// Press and release, with no time in between.
pub fn tap(tests: &mut Vec<ActorStep>, pos: usize) {
    press(tests, pos);
    release(tests, pos);
}

pub fn expect_keys(tests: &mut Vec<ActorStep>, keys: &[Keyboard]) {
    tests.push(ActorStep::Action(Actions::SendKey(KeyAction::KeySet(
        keys.to_vec(),
    ))));
}

pub fn expect_indicator(tests: &mut Vec<ActorStep>, indication: Indication) {
    tests.push(ActorStep::Action(Actions::SetIndicator(indication)));
}

/// Tap a home row mod-tap.  Nothing is reported until the release decides it
/// was a tap, then the key goes down and up.
pub fn tap_key(tests: &mut Vec<ActorStep>, pos: usize, key: Keyboard) {
    press(tests, pos);
    release(tests, pos);
    expect_keys(tests, &[key]);
    expect_keys(tests, &[]);
}

/// Tap a key that sends `key`, expecting the down and up reports.
pub fn type_key(tests: &mut Vec<ActorStep>, pos: usize, key: Keyboard) {
    press(tests, pos);
    expect_keys(tests, &[key]);
    release(tests, pos);
    expect_keys(tests, &[]);
}
