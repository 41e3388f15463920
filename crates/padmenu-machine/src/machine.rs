#![forbid(unsafe_code)]

//! State-machine compiler and runtime.
//!
//! States are identified by a token type implementing [`StateToken`],
//! a closed enumeration in clients, so an unknown transition target is a
//! compile-time impossibility everywhere except when resolving persisted
//! symbols from old save data, which remains a runtime case with a
//! default-state fallback.
//!
//! Handlers and hooks receive the client context `C` explicitly; nothing
//! is captured through an ambient receiver. A handler requests a
//! transition by returning `Some(target)`, which the runtime applies
//! immediately after the handler returns, still inside the same
//! [`Machine::handle_event`] call.
//!
//! # Invariants
//!
//! 1. Exactly one state is active at any time, and it is always a declared
//!    state.
//! 2. A transition to the already-active state is an identity no-op: zero
//!    hook calls.
//! 3. A real transition runs old `exit` then new `enter`, in that order,
//!    with no interleaving. Validation happens before either hook, so a
//!    failed transition fires neither.
//! 4. Compiled states are immutable after [`MachineBuilder::build`].

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::hash::Hash;

use padmenu_core::config::InputMap;
use padmenu_core::event::{EventKind, GamepadButton, GamepadEvent};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Identity of a state: a copyable token with a stable symbolic name.
///
/// The symbol is what save data stores; `from_symbol` is the single
/// runtime door through which old or foreign save data re-enters the
/// closed token set.
pub trait StateToken: Copy + Eq + Hash + fmt::Debug + 'static {
    /// Stable symbolic name, used in persisted blobs.
    fn symbol(&self) -> &'static str;

    /// Resolve a persisted symbol, if it names a known token.
    fn from_symbol(symbol: &str) -> Option<Self>
    where
        Self: Sized;
}

/// Compiled event predicate.
///
/// One variant per public registration method on [`Bindings`]; new gesture
/// kinds extend this enum and never change dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The given button was pressed.
    Press(GamepadButton),
    /// The given button was released.
    Release(GamepadButton),
    /// D-pad left, or the configured nav axis pushed negative.
    NavLeft,
    /// D-pad right, or the configured nav axis pushed positive.
    NavRight,
}

impl Trigger {
    fn matches(self, evt: &GamepadEvent, map: &InputMap) -> bool {
        match self {
            Trigger::Press(code) => evt.is_press(code),
            Trigger::Release(code) => evt.is_release(code),
            Trigger::NavLeft => {
                evt.is_press(GamepadButton::DpadLeft)
                    || (evt.kind.contains(EventKind::AXIS)
                        && evt.axis == Some(map.nav_axis)
                        && evt.value < -map.deadzone)
            }
            Trigger::NavRight => {
                evt.is_press(GamepadButton::DpadRight)
                    || (evt.kind.contains(EventKind::AXIS)
                        && evt.axis == Some(map.nav_axis)
                        && evt.value > map.deadzone)
            }
        }
    }
}

type Handler<S, C> = Box<dyn FnMut(&mut C) -> Option<S>>;
type Hook<C> = Box<dyn FnMut(&mut C)>;

fn noop_hook<C>() -> Hook<C> {
    Box::new(|_| {})
}

/// Registration surface a state descriptor runs against.
///
/// Each call appends one (trigger, handler) pair in call order. Dispatch
/// tries pairs in *reverse* call order, so later registrations act as more
/// specific overrides of earlier, more general bindings.
pub struct Bindings<S, C> {
    handlers: Vec<(Trigger, Handler<S, C>)>,
}

impl<S, C> Bindings<S, C> {
    fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Run `handler` when `button` is pressed.
    pub fn on_press(
        &mut self,
        button: GamepadButton,
        handler: impl FnMut(&mut C) -> Option<S> + 'static,
    ) {
        self.handlers.push((Trigger::Press(button), Box::new(handler)));
    }

    /// Run `handler` when `button` is released.
    pub fn on_release(
        &mut self,
        button: GamepadButton,
        handler: impl FnMut(&mut C) -> Option<S> + 'static,
    ) {
        self.handlers
            .push((Trigger::Release(button), Box::new(handler)));
    }

    /// Run `handler` on a leftward directional gesture (D-pad left or
    /// negative nav-axis motion).
    pub fn on_nav_left(&mut self, handler: impl FnMut(&mut C) -> Option<S> + 'static) {
        self.handlers.push((Trigger::NavLeft, Box::new(handler)));
    }

    /// Run `handler` on a rightward directional gesture.
    pub fn on_nav_right(&mut self, handler: impl FnMut(&mut C) -> Option<S> + 'static) {
        self.handlers.push((Trigger::NavRight, Box::new(handler)));
    }
}

struct CompiledState<S, C> {
    handlers: Vec<(Trigger, Handler<S, C>)>,
    enter: Hook<C>,
    exit: Hook<C>,
}

/// Error from assembling a machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The same token was declared twice.
    DuplicateState(&'static str),
    /// A hook or the initial state references an undeclared token.
    UnknownState(&'static str),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::DuplicateState(symbol) => {
                write!(f, "state {symbol:?} declared twice")
            }
            BuildError::UnknownState(symbol) => {
                write!(f, "state {symbol:?} was never declared")
            }
        }
    }
}

impl Error for BuildError {}

/// Compiles state descriptors and a transition table into a [`Machine`].
///
/// Descriptors and hooks may be registered in any order; hooks are merged
/// onto the compiled states at [`build`](Self::build), and states missing
/// from the transition table (or missing one of the two hooks) get no-op
/// defaults.
pub struct MachineBuilder<S: StateToken, C> {
    input: InputMap,
    states: HashMap<S, CompiledState<S, C>>,
    enter_hooks: Vec<(S, Hook<C>)>,
    exit_hooks: Vec<(S, Hook<C>)>,
}

impl<S: StateToken, C> MachineBuilder<S, C> {
    /// Builder with the given input mapping for directional triggers.
    #[must_use]
    pub fn new(input: InputMap) -> Self {
        Self {
            input,
            states: HashMap::new(),
            enter_hooks: Vec::new(),
            exit_hooks: Vec::new(),
        }
    }

    /// Declare a state by running its descriptor against a fresh
    /// [`Bindings`] context. The descriptor is invoked exactly once.
    pub fn state(
        &mut self,
        token: S,
        descriptor: impl FnOnce(&mut Bindings<S, C>),
    ) -> Result<(), BuildError> {
        if self.states.contains_key(&token) {
            return Err(BuildError::DuplicateState(token.symbol()));
        }
        let mut bindings = Bindings::new();
        descriptor(&mut bindings);
        self.states.insert(
            token,
            CompiledState {
                handlers: bindings.handlers,
                enter: noop_hook(),
                exit: noop_hook(),
            },
        );
        Ok(())
    }

    /// Record an enter hook for `token`, merged at build time.
    pub fn on_enter(&mut self, token: S, hook: impl FnMut(&mut C) + 'static) {
        self.enter_hooks.push((token, Box::new(hook)));
    }

    /// Record an exit hook for `token`, merged at build time.
    pub fn on_exit(&mut self, token: S, hook: impl FnMut(&mut C) + 'static) {
        self.exit_hooks.push((token, Box::new(hook)));
    }

    /// Merge the transition table and produce the machine with `initial`
    /// active. `initial` becomes the permanent default state.
    pub fn build(mut self, initial: S) -> Result<Machine<S, C>, BuildError> {
        for (token, hook) in self.enter_hooks.drain(..) {
            self.states
                .get_mut(&token)
                .ok_or(BuildError::UnknownState(token.symbol()))?
                .enter = hook;
        }
        for (token, hook) in self.exit_hooks.drain(..) {
            self.states
                .get_mut(&token)
                .ok_or(BuildError::UnknownState(token.symbol()))?
                .exit = hook;
        }
        if !self.states.contains_key(&initial) {
            return Err(BuildError::UnknownState(initial.symbol()));
        }
        Ok(Machine {
            input: self.input,
            states: self.states,
            default_state: initial,
            active: initial,
        })
    }
}

/// Persisted shape of a machine: the active state's symbolic name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedMachine {
    /// Symbol of the state that was active at save time.
    pub active_state: String,
}

/// Compiled event-dispatch machine. One state is active at all times.
pub struct Machine<S: StateToken, C> {
    input: InputMap,
    states: HashMap<S, CompiledState<S, C>>,
    default_state: S,
    active: S,
}

impl<S: StateToken, C> fmt::Debug for Machine<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("default_state", &self.default_state)
            .field("active", &self.active)
            .field("states", &self.states.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl<S: StateToken, C> Machine<S, C> {
    /// The currently active state.
    #[must_use]
    pub fn active(&self) -> S {
        self.active
    }

    /// Whether `token` was declared on this machine.
    #[must_use]
    pub fn is_declared(&self, token: S) -> bool {
        self.states.contains_key(&token)
    }

    /// Dispatch one event against the active state.
    ///
    /// Handlers are tried most-recently-registered first; the first
    /// matching trigger runs its handler and consumes the event, applying
    /// any transition the handler requested before this call returns.
    /// Returns `false` when no trigger matched.
    pub fn handle_event(&mut self, evt: &GamepadEvent, ctx: &mut C) -> bool {
        let requested = {
            let state = self
                .states
                .get_mut(&self.active)
                .expect("active state is always declared");
            let mut matched = None;
            for (trigger, handler) in state.handlers.iter_mut().rev() {
                if trigger.matches(evt, &self.input) {
                    matched = Some(handler(ctx));
                    break;
                }
            }
            match matched {
                Some(request) => request,
                None => return false,
            }
        };
        if let Some(target) = requested {
            self.transition_to(target, ctx);
        }
        true
    }

    /// Switch the active state, running old `exit` then new `enter`.
    ///
    /// Transitioning to the active state is a no-op with zero hook calls.
    ///
    /// # Panics
    ///
    /// Panics if `target` was never declared: that is a wiring error, not
    /// a runtime condition, and must surface at the call site before any
    /// hook has fired.
    pub fn transition_to(&mut self, target: S, ctx: &mut C) {
        assert!(
            self.states.contains_key(&target),
            "transition to undeclared state {target:?}"
        );
        if target == self.active {
            return;
        }
        debug!(from = ?self.active, to = ?target, "state transition");
        if let Some(old) = self.states.get_mut(&self.active) {
            (old.exit)(ctx);
        }
        self.active = if self.states.contains_key(&target) {
            target
        } else {
            self.default_state
        };
        if let Some(new) = self.states.get_mut(&self.active) {
            (new.enter)(ctx);
        }
    }

    /// Snapshot the active state by symbol.
    ///
    /// # Panics
    ///
    /// Panics if the active token is somehow absent from the declared set;
    /// that means the machine's core invariant was corrupted and saving a
    /// fabricated name would only smear the corruption into save data.
    #[must_use]
    pub fn save_state(&self) -> SavedMachine {
        assert!(
            self.states.contains_key(&self.active),
            "active state {:?} escaped the declared set",
            self.active
        );
        SavedMachine {
            active_state: self.active.symbol().to_owned(),
        }
    }

    /// Re-establish a persisted active state.
    ///
    /// Unlike [`transition_to`](Self::transition_to) there is no identity
    /// no-op: the current state's `exit` and the resolved state's `enter`
    /// always run, because the surrounding session may have changed any
    /// external state the hooks maintain while the machine was unloaded.
    /// An unresolvable or missing symbol falls back to the default state.
    pub fn restore_state(&mut self, saved: Option<&SavedMachine>, ctx: &mut C) {
        if let Some(current) = self.states.get_mut(&self.active) {
            (current.exit)(ctx);
        }
        let resolved = saved
            .and_then(|s| S::from_symbol(&s.active_state))
            .filter(|token| self.states.contains_key(token))
            .unwrap_or_else(|| {
                debug!(
                    symbol = saved.map(|s| s.active_state.as_str()).unwrap_or("<none>"),
                    fallback = ?self.default_state,
                    "persisted state did not resolve, using default"
                );
                self.default_state
            });
        self.active = resolved;
        let state = self
            .states
            .get_mut(&self.active)
            .expect("default state is always declared");
        (state.enter)(ctx);
    }
}

#[cfg(test)]
mod tests {
    use std::panic::AssertUnwindSafe;

    use padmenu_core::event::GamepadAxis;

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Phase {
        Idle,
        Menu,
        Search,
    }

    impl StateToken for Phase {
        fn symbol(&self) -> &'static str {
            match self {
                Phase::Idle => "Idle",
                Phase::Menu => "Menu",
                Phase::Search => "Search",
            }
        }

        fn from_symbol(symbol: &str) -> Option<Self> {
            match symbol {
                "Idle" => Some(Phase::Idle),
                "Menu" => Some(Phase::Menu),
                "Search" => Some(Phase::Search),
                _ => None,
            }
        }
    }

    /// Context recording every hook and handler firing, in order.
    #[derive(Default)]
    struct Log {
        entries: Vec<String>,
    }

    impl Log {
        fn push(&mut self, entry: &str) {
            self.entries.push(entry.to_owned());
        }

        fn count(&self, entry: &str) -> usize {
            self.entries.iter().filter(|e| *e == entry).count()
        }
    }

    /// Two-state machine: Idle --Home--> Menu --B--> Idle, with
    /// logging hooks on Menu.
    fn menu_machine() -> Machine<Phase, Log> {
        let mut builder = MachineBuilder::new(InputMap::default());
        builder
            .state(Phase::Idle, |b| {
                b.on_press(GamepadButton::Home, |_| Some(Phase::Menu));
            })
            .unwrap();
        builder
            .state(Phase::Menu, |b| {
                b.on_press(GamepadButton::B, |_| Some(Phase::Idle));
                b.on_nav_left(|log: &mut Log| {
                    log.push("nav:left");
                    None
                });
                b.on_nav_right(|log: &mut Log| {
                    log.push("nav:right");
                    None
                });
            })
            .unwrap();
        builder.state(Phase::Search, |_| {}).unwrap();
        builder.on_enter(Phase::Menu, |log: &mut Log| log.push("enter:Menu"));
        builder.on_exit(Phase::Menu, |log: &mut Log| log.push("exit:Menu"));
        builder.build(Phase::Idle).unwrap()
    }

    #[test]
    fn initial_state_is_active_without_hooks() {
        let machine = menu_machine();
        assert_eq!(machine.active(), Phase::Idle);
    }

    #[test]
    fn press_transitions_and_runs_enter() {
        let mut log = Log::default();
        let mut machine = menu_machine();
        let consumed =
            machine.handle_event(&GamepadEvent::button_press(GamepadButton::Home), &mut log);
        assert!(consumed);
        assert_eq!(machine.active(), Phase::Menu);
        assert_eq!(log.entries, ["enter:Menu"]);
    }

    #[test]
    fn unmatched_event_is_not_consumed() {
        let mut log = Log::default();
        let mut machine = menu_machine();
        let consumed =
            machine.handle_event(&GamepadEvent::button_press(GamepadButton::X), &mut log);
        assert!(!consumed);
        assert_eq!(machine.active(), Phase::Idle);
        assert!(log.entries.is_empty());
    }

    #[test]
    fn identity_transition_fires_no_hooks() {
        let mut log = Log::default();
        let mut machine = menu_machine();
        machine.transition_to(Phase::Menu, &mut log);
        machine.transition_to(Phase::Menu, &mut log);
        assert_eq!(log.count("enter:Menu"), 1);
        assert_eq!(log.count("exit:Menu"), 0);
    }

    #[test]
    fn real_transition_runs_exit_then_enter() {
        let mut log = Log::default();
        let mut machine = menu_machine();
        machine.transition_to(Phase::Menu, &mut log);
        log.entries.clear();

        machine.transition_to(Phase::Idle, &mut log);
        assert_eq!(log.entries, ["exit:Menu"]);

        machine.transition_to(Phase::Menu, &mut log);
        assert_eq!(log.entries, ["exit:Menu", "enter:Menu"]);
    }

    #[test]
    #[should_panic(expected = "undeclared state")]
    fn transition_to_undeclared_state_panics() {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        struct Loose(u8);
        impl StateToken for Loose {
            fn symbol(&self) -> &'static str {
                "loose"
            }
            fn from_symbol(_: &str) -> Option<Self> {
                None
            }
        }
        let mut builder: MachineBuilder<Loose, ()> = MachineBuilder::new(InputMap::default());
        builder.state(Loose(0), |_| {}).unwrap();
        let mut machine = builder.build(Loose(0)).unwrap();
        machine.transition_to(Loose(9), &mut ());
    }

    #[test]
    fn failed_transition_leaves_active_state_unchanged() {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        struct Loose(u8);
        impl StateToken for Loose {
            fn symbol(&self) -> &'static str {
                "loose"
            }
            fn from_symbol(_: &str) -> Option<Self> {
                None
            }
        }
        let mut builder: MachineBuilder<Loose, ()> = MachineBuilder::new(InputMap::default());
        builder.state(Loose(0), |_| {}).unwrap();
        let mut machine = builder.build(Loose(0)).unwrap();

        let outcome = std::panic::catch_unwind(AssertUnwindSafe(|| {
            machine.transition_to(Loose(9), &mut ());
        }));
        assert!(outcome.is_err());
        assert_eq!(machine.active(), Loose(0));
    }

    #[test]
    fn later_registration_overrides_earlier_for_same_event() {
        let mut builder = MachineBuilder::new(InputMap::default());
        builder
            .state(Phase::Idle, |b| {
                b.on_press(GamepadButton::A, |log: &mut Log| {
                    log.push("general");
                    None
                });
                b.on_press(GamepadButton::A, |log: &mut Log| {
                    log.push("specific");
                    None
                });
            })
            .unwrap();
        let mut machine = builder.build(Phase::Idle).unwrap();

        let mut log = Log::default();
        machine.handle_event(&GamepadEvent::button_press(GamepadButton::A), &mut log);
        assert_eq!(log.entries, ["specific"]);
    }

    #[test]
    fn without_the_override_the_general_binding_fires() {
        let mut builder = MachineBuilder::new(InputMap::default());
        builder
            .state(Phase::Idle, |b| {
                b.on_press(GamepadButton::A, |log: &mut Log| {
                    log.push("general");
                    None
                });
            })
            .unwrap();
        let mut machine = builder.build(Phase::Idle).unwrap();

        let mut log = Log::default();
        machine.handle_event(&GamepadEvent::button_press(GamepadButton::A), &mut log);
        assert_eq!(log.entries, ["general"]);
    }

    #[test]
    fn release_trigger_ignores_presses() {
        let mut builder = MachineBuilder::new(InputMap::default());
        builder
            .state(Phase::Idle, |b| {
                b.on_release(GamepadButton::A, |log: &mut Log| {
                    log.push("released");
                    None
                });
            })
            .unwrap();
        let mut machine = builder.build(Phase::Idle).unwrap();

        let mut log = Log::default();
        assert!(!machine.handle_event(&GamepadEvent::button_press(GamepadButton::A), &mut log));
        assert!(machine.handle_event(&GamepadEvent::button_release(GamepadButton::A), &mut log));
        assert_eq!(log.entries, ["released"]);
    }

    #[test]
    fn nav_triggers_match_dpad_and_signed_axis() {
        let mut log = Log::default();
        let mut machine = menu_machine();
        machine.transition_to(Phase::Menu, &mut log);
        log.entries.clear();

        machine.handle_event(
            &GamepadEvent::button_press(GamepadButton::DpadLeft),
            &mut log,
        );
        machine.handle_event(
            &GamepadEvent::axis_motion(GamepadAxis::RightX, -0.4),
            &mut log,
        );
        machine.handle_event(
            &GamepadEvent::axis_motion(GamepadAxis::RightX, 0.4),
            &mut log,
        );
        assert_eq!(log.entries, ["nav:left", "nav:left", "nav:right"]);
    }

    #[test]
    fn nav_triggers_ignore_other_axes_and_zero() {
        let mut log = Log::default();
        let mut machine = menu_machine();
        machine.transition_to(Phase::Menu, &mut log);
        log.entries.clear();

        assert!(!machine.handle_event(
            &GamepadEvent::axis_motion(GamepadAxis::LeftX, -0.9),
            &mut log
        ));
        assert!(!machine.handle_event(
            &GamepadEvent::axis_motion(GamepadAxis::RightX, 0.0),
            &mut log
        ));
        assert!(log.entries.is_empty());
    }

    #[test]
    fn deadzone_suppresses_small_magnitudes() {
        let map = InputMap {
            nav_axis: GamepadAxis::RightX,
            deadzone: 0.25,
        };
        let mut builder = MachineBuilder::new(map);
        builder
            .state(Phase::Menu, |b| {
                b.on_nav_left(|log: &mut Log| {
                    log.push("nav:left");
                    None
                });
            })
            .unwrap();
        let mut machine = builder.build(Phase::Menu).unwrap();

        let mut log = Log::default();
        assert!(!machine.handle_event(
            &GamepadEvent::axis_motion(GamepadAxis::RightX, -0.25),
            &mut log
        ));
        assert!(machine.handle_event(
            &GamepadEvent::axis_motion(GamepadAxis::RightX, -0.26),
            &mut log
        ));
    }

    #[test]
    fn descriptor_runs_exactly_once() {
        let mut calls = 0;
        let mut builder: MachineBuilder<Phase, Log> = MachineBuilder::new(InputMap::default());
        builder
            .state(Phase::Idle, |_| {
                calls += 1;
            })
            .unwrap();
        builder.build(Phase::Idle).unwrap();
        assert_eq!(calls, 1);
    }

    #[test]
    fn duplicate_state_is_rejected_without_running_descriptor() {
        let mut builder: MachineBuilder<Phase, Log> = MachineBuilder::new(InputMap::default());
        builder.state(Phase::Idle, |_| {}).unwrap();
        let mut ran = false;
        let err = builder
            .state(Phase::Idle, |_| {
                ran = true;
            })
            .unwrap_err();
        assert_eq!(err, BuildError::DuplicateState("Idle"));
        assert!(!ran);
    }

    #[test]
    fn hook_for_undeclared_state_fails_build() {
        let mut builder: MachineBuilder<Phase, Log> = MachineBuilder::new(InputMap::default());
        builder.state(Phase::Idle, |_| {}).unwrap();
        builder.on_enter(Phase::Menu, |_| {});
        let err = builder.build(Phase::Idle).unwrap_err();
        assert_eq!(err, BuildError::UnknownState("Menu"));
    }

    #[test]
    fn undeclared_initial_state_fails_build() {
        let mut builder: MachineBuilder<Phase, Log> = MachineBuilder::new(InputMap::default());
        builder.state(Phase::Idle, |_| {}).unwrap();
        let err = builder.build(Phase::Search).unwrap_err();
        assert_eq!(err, BuildError::UnknownState("Search"));
    }

    #[test]
    fn save_then_restore_reenters_the_same_state() {
        let mut log = Log::default();
        let mut machine = menu_machine();
        machine.transition_to(Phase::Menu, &mut log);
        log.entries.clear();

        let saved = machine.save_state();
        assert_eq!(saved.active_state, "Menu");

        machine.restore_state(Some(&saved), &mut log);
        assert_eq!(machine.active(), Phase::Menu);
        // Restore re-establishes side effects: exit and enter once more.
        assert_eq!(log.entries, ["exit:Menu", "enter:Menu"]);
    }

    #[test]
    fn restore_of_unknown_symbol_falls_back_to_default() {
        let mut log = Log::default();
        let mut machine = menu_machine();
        machine.transition_to(Phase::Menu, &mut log);
        log.entries.clear();

        let saved = SavedMachine {
            active_state: "LongGoneState".to_owned(),
        };
        machine.restore_state(Some(&saved), &mut log);
        assert_eq!(machine.active(), Phase::Idle);
        assert_eq!(log.entries, ["exit:Menu"]);
    }

    #[test]
    fn restore_with_no_blob_uses_default_state() {
        let mut log = Log::default();
        let mut machine = menu_machine();
        machine.transition_to(Phase::Menu, &mut log);
        log.entries.clear();

        machine.restore_state(None, &mut log);
        assert_eq!(machine.active(), Phase::Idle);
        assert_eq!(log.entries, ["exit:Menu"]);
    }

    #[test]
    fn saved_machine_serializes_with_camel_case_key() {
        let saved = SavedMachine {
            active_state: "Menu".to_owned(),
        };
        let json = serde_json::to_value(&saved).unwrap();
        assert_eq!(json, serde_json::json!({ "activeState": "Menu" }));
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn any_transition_sequence_keeps_exactly_one_declared_state_active(
                seq in prop::collection::vec(0usize..3, 0..32)
            ) {
                let mut log = Log::default();
                let mut machine = menu_machine();
                let phases = [Phase::Idle, Phase::Menu, Phase::Search];
                for i in seq {
                    machine.transition_to(phases[i], &mut log);
                    prop_assert!(machine.is_declared(machine.active()));
                    prop_assert_eq!(machine.active(), phases[i]);
                }
            }
        }
    }

    #[test]
    fn end_to_end_menu_toggle() {
        let mut log = Log::default();
        let mut machine = menu_machine();

        machine.handle_event(&GamepadEvent::button_press(GamepadButton::Home), &mut log);
        machine.handle_event(&GamepadEvent::button_press(GamepadButton::B), &mut log);

        assert_eq!(machine.active(), Phase::Idle);
        assert_eq!(log.count("enter:Menu"), 1);
        assert_eq!(log.count("exit:Menu"), 1);
    }
}
