//! Layout management
//!
//! Key events come through here on their way to the host.  A press is looked
//! up on the layer stack, and the keycode found is offered to each of the
//! behaviors, in this order, before it gets its default handling:
//!
//! - An undecided mod-tap holds up everything behind it until it becomes a
//!   tap or a hold.
//! - Num word sees every key first, and may turn its layer off.
//! - Caps word may shift the key.
//! - A leader sequence in progress swallows the key.
//! - The custom keycodes, tap dances and one-shot keys.
//! - The shifted key overrides.
//!
//! The keycode found at press time is remembered for the position, so its
//! release is handled the same way even if the layers changed in between.
//!
//! Handling an event or a tick only queues up what should happen.  The queue
//! is then given to the [`LayoutActions`] at the end.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use arraydeque::ArrayDeque;
use usbd_human_interface_device::page::Keyboard;

use crate::keycode::{Custom, Keycode, PointerMode, TapDance};
use crate::keymap;
use crate::keys::NKEYS;
use crate::layer::Layer;
use crate::leds::{Indication, LedState};
use crate::log::{debug, info, warn};
use crate::settings::Settings;
use crate::timer::{self, Instant};
use crate::usb_typer::{self, ActionHandler};
use crate::{KeyAction, KeyEvent, Mods, MouseButton, PointerAction, Side};

use self::caps_word::CapsWord;
use self::hold_tap::{Decision, PendingTap};
use self::leader::{Leader, LeaderAction};
use self::oneshot::{OneShotLayer, OneShotMods};
use self::tap_dance::{Finish, TapDances};
use self::tap_toggle::TapToggle;

pub use self::num_word::NumWord;
pub use self::state::KeyboardState;

mod caps_word;
mod hold_tap;
mod leader;
mod num_word;
mod oneshot;
mod overrides;
mod state;
mod tap_dance;
mod tap_toggle;

/// How many events can wait behind an undecided mod-tap.
const BACKLOG: usize = 8;

/// What the layout asks of the rest of the keyboard.
pub trait LayoutActions {
    /// Send a key report to the host.
    async fn send_key(&self, key: KeyAction);

    /// Change what the RGB matrix shows.
    async fn set_indicator(&self, indication: Indication);

    async fn send_pointer(&self, action: PointerAction);

    /// Reboot into the bootloader.  Doesn't need to return.
    async fn enter_bootloader(&self);
}

#[derive(Debug)]
enum Output {
    Key(KeyAction),
    Indicator(Indication),
    Pointer(PointerAction),
    Bootloader,
}

#[derive(Default)]
struct Outbox(Vec<Output>);

impl ActionHandler for Outbox {
    fn enqueue_actions<I: Iterator<Item = KeyAction>>(&mut self, events: I) {
        self.0.extend(events.map(Output::Key));
    }
}

/// A key event, and when it happened.
#[derive(Clone, Copy, Debug)]
struct Timed {
    event: KeyEvent,
    time: Instant,
}

/// What a pressed key was resolved to.
#[derive(Clone, Copy, Debug)]
struct Pressed {
    keycode: Keycode,
    /// Handled entirely on the press, the release does nothing.
    swallowed: bool,
}

/// What a pressed key contributes to the host's view of the keyboard.
#[derive(Clone, Copy, Debug)]
enum Held {
    Key {
        key: Keyboard,
        mods: Mods,
        /// Modifiers to hide from the host while this key is down.
        suppress: Mods,
    },
    Mods(Mods),
    Media,
    Mouse(MouseButton),
    DragScroll,
}

/// The layout manager.
pub struct LayoutManager {
    settings: Settings,
    now: Instant,
    started: bool,

    state: KeyboardState,
    num_word: NumWord,
    dances: TapDances,
    oneshot_layer: OneShotLayer,
    oneshot_mods: OneShotMods,
    caps_word: CapsWord,
    leader: Leader,
    toggle: TapToggle,

    /// The last tap of the one-shot shift, for double tapping into caps word.
    shift_tap: Option<Instant>,

    pending: Option<PendingTap>,
    backlog: ArrayDeque<Timed, BACKLOG>,

    pressed: [Option<Pressed>; NKEYS],
    held: BTreeMap<u8, Held>,
    last_report: Vec<Keyboard>,

    outbox: Outbox,
}

impl Default for LayoutManager {
    fn default() -> Self {
        LayoutManager::new(Settings::default())
    }
}

impl LayoutManager {
    pub fn new(settings: Settings) -> Self {
        LayoutManager {
            num_word: NumWord::new(settings.num_word_timeout_ms),
            caps_word: CapsWord::new(settings.caps_word_idle_timeout_ms),
            leader: Leader::new(settings.leader_timeout_ms, settings.leader_per_key_timing),
            toggle: TapToggle::new(settings.tapping_toggle),
            settings,
            now: Instant::from_ticks(0),
            started: false,
            state: KeyboardState::new(),
            dances: TapDances::new(),
            oneshot_layer: OneShotLayer::default(),
            oneshot_mods: OneShotMods::default(),
            shift_tap: None,
            pending: None,
            backlog: ArrayDeque::new(),
            pressed: [None; NKEYS],
            held: BTreeMap::new(),
            last_report: Vec::new(),
            outbox: Outbox::default(),
        }
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    pub fn state(&self) -> &KeyboardState {
        &self.state
    }

    pub fn num_word(&self) -> &NumWord {
        &self.num_word
    }

    pub fn caps_word_active(&self) -> bool {
        self.caps_word.is_active()
    }

    pub fn leader_active(&self) -> bool {
        self.leader.is_active()
    }

    /// Let `ticks` milliseconds pass.
    pub async fn tick<A: LayoutActions>(&mut self, actions: &A, ticks: usize) {
        self.start();
        for _ in 0..ticks {
            self.now = timer::after(self.now, 1);
            self.housekeeping();
        }
        self.flush(actions).await;
    }

    /// Handle a single key event.
    pub async fn handle_event<A: LayoutActions>(&mut self, event: KeyEvent, actions: &A) {
        self.start();
        if event.key() as usize >= NKEYS {
            warn!("Key event for unknown position {}", event.key());
            return;
        }

        let mut timed = Timed {
            event,
            time: self.now,
        };
        // A full backlog forces the decision that made it fill up, which lets
        // it drain.
        while let Err(full) = self.backlog.push_back(timed) {
            warn!("Key backlog full");
            timed = full.element;
            self.settle(Decision::Hold);
            self.pump();
        }
        self.pump();
        self.flush(actions).await;
    }

    /// The first call reports the startup state.
    fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        let shown = self.state.indication();
        self.emit(Output::Indicator(shown));
        for side in [Side::Left, Side::Right] {
            self.emit(Output::Pointer(PointerAction::DragScroll { side, enabled: true }));
        }
    }

    async fn flush<A: LayoutActions>(&mut self, actions: &A) {
        for output in core::mem::take(&mut self.outbox.0) {
            match output {
                Output::Key(key) => actions.send_key(key).await,
                Output::Indicator(indication) => actions.set_indicator(indication).await,
                Output::Pointer(action) => actions.send_pointer(action).await,
                Output::Bootloader => actions.enter_bootloader().await,
            }
        }
    }

    fn emit(&mut self, output: Output) {
        self.outbox.0.push(output);
    }

    /// Everything driven by time.
    fn housekeeping(&mut self) {
        let now = self.now;
        if let Some(pending) = self.pending {
            if pending.held_out(now) {
                self.settle(Decision::Hold);
                self.pump();
            }
        }
        if let Some((finish, reset)) = self.dances.expire(now, self.settings.tapping_term_ms) {
            self.dance_finished(finish, now);
            if reset {
                self.dance_reset(finish);
            }
        }
        if self.leader.expired(now) {
            self.leader_finish();
        }
        self.caps_word.idle(now, &mut self.state);
        self.num_word.idle(now, &mut self.state);
        self.sync();
    }

    /// Process backlogged events, until one has to wait for a mod-tap
    /// decision.
    fn pump(&mut self) {
        loop {
            if let Some(pending) = self.pending {
                let released = self
                    .backlog
                    .iter()
                    .any(|t| t.event == KeyEvent::Release(pending.pos));
                if !released {
                    break;
                }
                self.settle(Decision::Tap);
            }
            let Some(timed) = self.backlog.pop_front() else {
                break;
            };
            self.process(timed);
        }
    }

    /// Decide the pending mod-tap.
    fn settle(&mut self, decision: Decision) {
        if let Some(pending) = self.pending.take() {
            debug!("Mod-tap at {}: {:?}", pending.pos, decision);
            self.press(pending.pos, pending.keycode(decision), pending.pressed_at);
            self.sync();
        }
    }

    fn process(&mut self, timed: Timed) {
        match timed.event {
            KeyEvent::Press(pos) => {
                self.interrupt(pos, timed.time);
                let keycode = keymap::resolve(self.state.layers(), pos as usize);
                match keycode {
                    Keycode::ModTap(mods, tap) if !self.leader.is_active() => {
                        self.pending = Some(PendingTap::new(
                            pos,
                            mods,
                            tap,
                            timed.time,
                            self.settings.tapping_term_ms,
                        ));
                    }
                    _ => self.press(pos, keycode, timed.time),
                }
            }
            KeyEvent::Release(pos) => self.release(pos, timed.time),
        }
        self.sync();
    }

    /// A key is being pressed, which finishes any tap dance on another key.
    fn interrupt(&mut self, pos: u8, time: Instant) {
        if let Some((finish, reset)) = self.dances.interrupt(pos) {
            self.dance_finished(finish, time);
            if reset {
                self.dance_reset(finish);
            }
        }
    }

    fn press(&mut self, pos: u8, keycode: Keycode, time: Instant) {
        let mut swallowed = false;

        if !self.num_word.process(&keycode, time, &mut self.state) {
            self.pressed[pos as usize] = Some(Pressed {
                keycode,
                swallowed: true,
            });
            return;
        }

        if !matches!(keycode, Keycode::TapToggle(_)) {
            self.toggle.interrupt();
        }
        if !matches!(keycode, Keycode::OneShotMod(_)) {
            self.shift_tap = None;
        }

        let mods = self.active_mods() | self.oneshot_mods.armed();
        let leading = self.leader.is_active();
        let shift = self.caps_word.press(&keycode, mods, leading, time, &mut self.state);

        if leading && !keycode.is_modifier() {
            self.pressed[pos as usize] = Some(Pressed {
                keycode,
                swallowed: true,
            });
            if self.leader.add(keycode, time) {
                self.leader_finish();
            }
            return;
        }

        match keycode {
            Keycode::No | Keycode::Trans => {}
            Keycode::Key(_) | Keycode::Modded(..) | Keycode::Media(_) => {
                self.register(pos, keycode, shift);
            }
            Keycode::ModTap(_, tap) => self.register(pos, Keycode::Key(tap), shift),
            Keycode::Modifier(mods) => {
                self.held.insert(pos, Held::Mods(mods));
            }
            Keycode::OneShotMod(mods) => swallowed = self.oneshot_mod_press(pos, mods, time),
            Keycode::OneShotLayer(layer) => self.oneshot_layer.start(layer, &mut self.state),
            Keycode::TapToggle(layer) => {
                self.toggle
                    .press(layer, time, self.settings.tapping_term_ms, &mut self.state);
            }
            Keycode::Leader => {
                self.leader.start(time);
                swallowed = true;
            }
            Keycode::TapDance(dance) => self.dances.press(dance, pos, time),
            Keycode::Mouse(button) => {
                self.held.insert(pos, Held::Mouse(button));
                self.emit(Output::Pointer(PointerAction::Button {
                    button,
                    pressed: true,
                }));
            }
            Keycode::Pointer(PointerMode::Sniping) => {
                self.emit(Output::Pointer(PointerAction::SnipingToggle(Side::Right)));
            }
            Keycode::Pointer(PointerMode::DragScroll) => {
                self.held.insert(pos, Held::DragScroll);
                self.emit(Output::Pointer(PointerAction::DragScrollHold {
                    side: Side::Right,
                    held: true,
                }));
            }
            Keycode::Custom(custom) => swallowed = self.custom(custom),
        }

        if !keycode.is_modifier()
            && !matches!(keycode, Keycode::OneShotLayer(_) | Keycode::TapDance(_))
        {
            self.oneshot_layer.key_pressed(&mut self.state);
        }

        self.pressed[pos as usize] = Some(Pressed { keycode, swallowed });
    }

    fn release(&mut self, pos: u8, time: Instant) {
        let Some(pressed) = self.pressed[pos as usize].take() else {
            debug!("Release of {} without a press", pos);
            return;
        };

        if !self.num_word.process(&pressed.keycode, time, &mut self.state) {
            return;
        }

        if !pressed.swallowed {
            match pressed.keycode {
                Keycode::OneShotLayer(_) => self.oneshot_layer.trigger_released(&mut self.state),
                Keycode::OneShotMod(mods) => self.oneshot_mod_release(mods, time),
                Keycode::TapToggle(layer) => {
                    self.toggle
                        .release(layer, time, self.settings.tapping_term_ms, &mut self.state);
                }
                Keycode::TapDance(_) => {
                    if let Some(finish) = self.dances.release(pos) {
                        self.dance_reset(finish);
                    }
                }
                _ => {}
            }
        }

        match self.held.remove(&pos) {
            Some(Held::Media) => self.emit(Output::Key(KeyAction::ConsumerRelease)),
            Some(Held::Mouse(button)) => self.emit(Output::Pointer(PointerAction::Button {
                button,
                pressed: false,
            })),
            Some(Held::DragScroll) => self.emit(Output::Pointer(PointerAction::DragScrollHold {
                side: Side::Right,
                held: false,
            })),
            _ => {}
        }
    }

    /// Default handling of keys that go to the host.
    fn register(&mut self, pos: u8, keycode: Keycode, caps_shift: bool) {
        if let Keycode::Key(key) = keycode {
            let mods = Mods::from_key(key);
            if !mods.is_empty() {
                self.held.insert(pos, Held::Mods(mods));
                return;
            }
        }

        let armed = self.oneshot_mods.take();
        if !armed.is_empty() {
            self.oneshot_mods_changed();
        }

        let (keycode, suppress) = match overrides::find(&keycode, self.active_mods() | armed) {
            Some(replacement) => {
                debug!("Key override at {}", pos);
                (replacement, Mods::SHIFT_MASK.difference(replacement.mods()))
            }
            None => (keycode, Mods::empty()),
        };

        match keycode {
            Keycode::Media(code) => {
                self.held.insert(pos, Held::Media);
                self.emit(Output::Key(KeyAction::Consumer(code)));
            }
            _ => {
                if let Some(key) = keycode.basic() {
                    let mut mods = keycode.mods() | armed;
                    if caps_shift {
                        mods |= Mods::SHIFT;
                    }
                    self.held.insert(
                        pos,
                        Held::Key {
                            key,
                            mods: mods.difference(suppress),
                            suppress,
                        },
                    );
                }
            }
        }
    }

    /// Modifiers held down, less any suppressed by an override.
    fn active_mods(&self) -> Mods {
        let mut mods = Mods::empty();
        let mut suppress = Mods::empty();
        for held in self.held.values() {
            match held {
                Held::Key {
                    mods: m,
                    suppress: s,
                    ..
                } => {
                    mods |= *m;
                    suppress |= *s;
                }
                Held::Mods(m) => mods |= *m,
                _ => {}
            }
        }
        mods.difference(suppress)
    }

    /// The keys the host should see as down, in usage order.
    fn report(&self) -> Vec<Keyboard> {
        let mut keys: Vec<Keyboard> = self.active_mods().keys().collect();
        for held in self.held.values() {
            if let Held::Key { key, .. } = held {
                keys.push(*key);
            }
        }
        keys.sort_by_key(|key| *key as u8);
        keys.dedup();
        keys
    }

    /// Send whatever changed for the host and the LEDs.
    fn sync(&mut self) {
        let report = self.report();
        if report != self.last_report {
            self.emit(Output::Key(KeyAction::KeySet(report.clone())));
            self.last_report = report;
        }
        if let Some(indication) = self.state.take_indication() {
            self.emit(Output::Indicator(indication));
        }
    }

    /// Typed keys release everything when they are done.
    fn typed(&mut self) {
        self.last_report.clear();
    }

    /// Returns true if the key is swallowed.
    fn custom(&mut self, custom: Custom) -> bool {
        match custom {
            Custom::Screenshot => {
                usb_typer::tap(&mut self.outbox, Keyboard::Keyboard4, Mods::GUI | Mods::SHIFT);
                self.typed();
                self.state.layer_on(Layer::Nav);
                true
            }
            Custom::LayerClear => {
                if self.state.layers().highest() != Layer::Engram {
                    self.state.layer_clear();
                    true
                } else {
                    false
                }
            }
            Custom::Hide => {
                usb_typer::tap(&mut self.outbox, Keyboard::H, Mods::GUI);
                self.typed();
                false
            }
        }
    }

    /// Returns true if the key is swallowed.
    fn oneshot_mod_press(&mut self, pos: u8, mods: Mods, time: Instant) -> bool {
        if mods.has_shift() {
            if let Some(last) = self.shift_tap.take() {
                if timer::elapsed(time, last) < self.settings.tapping_term_ms {
                    if self.oneshot_mods.cancel() {
                        self.oneshot_mods_changed();
                    }
                    self.caps_word.on(time, &mut self.state);
                    return true;
                }
            }
        }
        self.oneshot_mods.press(mods);
        self.held.insert(pos, Held::Mods(mods));
        false
    }

    fn oneshot_mod_release(&mut self, mods: Mods, time: Instant) {
        if self.oneshot_mods.release(mods) {
            if mods.has_shift() {
                self.shift_tap = Some(time);
            }
            self.oneshot_mods_changed();
        }
    }

    /// Armed shift shows as caps word.
    fn oneshot_mods_changed(&mut self) {
        let led = if self.oneshot_mods.armed().has_shift() {
            LedState::CapsWord
        } else {
            self.state.layers().highest().into()
        };
        self.state.indicate(led);
    }

    fn dance_finished(&mut self, finish: Finish, time: Instant) {
        debug!("Tap dance finished, {} taps", finish.count);
        match finish.dance {
            TapDance::OneShotNumWord => match finish.count {
                1 => self.oneshot_layer.start(Layer::Num, &mut self.state),
                2 => self.num_word.activate(time, &mut self.state),
                _ => {}
            },
        }
    }

    fn dance_reset(&mut self, finish: Finish) {
        match finish.dance {
            TapDance::OneShotNumWord => {
                if finish.count == 1 {
                    self.oneshot_layer.trigger_released(&mut self.state);
                }
            }
        }
    }

    fn leader_finish(&mut self) {
        match self.leader.finish() {
            Some(LeaderAction::Type(text)) => {
                usb_typer::enqueue_action(&mut self.outbox, text);
                self.typed();
            }
            Some(LeaderAction::Bootloader) => {
                info!("Entering bootloader");
                self.emit(Output::Bootloader);
            }
            None => {}
        }
    }
}
