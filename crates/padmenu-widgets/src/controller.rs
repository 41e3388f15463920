#![forbid(unsafe_code)]

//! The gamepad menu controller: states, wiring, and session slots.
//!
//! This is the concrete client of the state machine. The menu pane is
//! closed in `NoMenu`; Home opens the bar, B closes it, left/right move
//! the selection, A activates the selected entry (Settings or Modules),
//! Y jumps straight to search. The `MenuBar` state's enter/exit hooks are
//! the only callers of [`MenuBar::set_active`].

use padmenu_core::config::{InputMap, MenuConfig};
use padmenu_core::event::{GamepadButton, GamepadEvent};
use padmenu_layout::LayoutEnv;
use padmenu_machine::machine::{
    BuildError, Machine, MachineBuilder, SavedMachine, StateToken,
};
use padmenu_machine::session::{
    ModuleLifecycle, SessionError, SessionRegistry, ShutdownReport, Subsystem,
};
use serde_json::Value;
use tracing::debug;

use crate::menu_bar::{MenuBar, SavedMenuBar};
use crate::visual::VisualFactory;

/// Menu navigation states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuState {
    /// No menu visible; gameplay input owns the pad.
    NoMenu,
    /// The button bar is open.
    MenuBar,
    /// Settings pane.
    Settings,
    /// Module browser pane.
    Modules,
    /// Search pane.
    Search,
}

impl StateToken for MenuState {
    fn symbol(&self) -> &'static str {
        match self {
            MenuState::NoMenu => "NoMenu",
            MenuState::MenuBar => "MenuBar",
            MenuState::Settings => "Settings",
            MenuState::Modules => "Modules",
            MenuState::Search => "Search",
        }
    }

    fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "NoMenu" => Some(MenuState::NoMenu),
            "MenuBar" => Some(MenuState::MenuBar),
            "Settings" => Some(MenuState::Settings),
            "Modules" => Some(MenuState::Modules),
            "Search" => Some(MenuState::Search),
            _ => None,
        }
    }
}

/// The controller's mutable world: the compiled machine plus the bar it
/// steers. Session slots reach into this through the registry context.
struct MenuModule {
    machine: Machine<MenuState, MenuBar>,
    bar: MenuBar,
}

/// Compile the menu state machine against `input`.
fn build_machine(input: InputMap) -> Result<Machine<MenuState, MenuBar>, BuildError> {
    let mut builder = MachineBuilder::new(input);
    builder.state(MenuState::NoMenu, |b| {
        b.on_press(GamepadButton::Home, |_| Some(MenuState::MenuBar));
    })?;
    builder.state(MenuState::MenuBar, |b| {
        b.on_press(GamepadButton::B, |_| Some(MenuState::NoMenu));
        b.on_nav_left(|bar: &mut MenuBar| {
            bar.select_next(-1);
            None
        });
        b.on_nav_right(|bar: &mut MenuBar| {
            bar.select_next(1);
            None
        });
        b.on_press(GamepadButton::A, |bar: &mut MenuBar| match bar.selected() {
            0 => Some(MenuState::Settings),
            1 => Some(MenuState::Modules),
            _ => None,
        });
        b.on_press(GamepadButton::Y, |_| Some(MenuState::Search));
    })?;
    builder.state(MenuState::Settings, |_| {})?;
    builder.state(MenuState::Modules, |_| {})?;
    builder.state(MenuState::Search, |_| {})?;
    builder.on_enter(MenuState::MenuBar, |bar: &mut MenuBar| bar.set_active(true));
    builder.on_exit(MenuState::MenuBar, |bar: &mut MenuBar| bar.set_active(false));
    builder.build(MenuState::NoMenu)
}

/// Session slot for the state machine: `{"activeState": ...}`.
struct MachineSlot;

impl Subsystem<MenuModule> for MachineSlot {
    fn save_state(&mut self, ctx: &mut MenuModule) -> Result<Value, SessionError> {
        Ok(serde_json::to_value(ctx.machine.save_state())?)
    }

    fn restore_state(
        &mut self,
        ctx: &mut MenuModule,
        blob: Option<&Value>,
    ) -> Result<(), SessionError> {
        let saved = blob.and_then(|b| serde_json::from_value::<SavedMachine>(b.clone()).ok());
        if blob.is_some() && saved.is_none() {
            debug!("malformed machine slot, restoring default state");
        }
        ctx.machine.restore_state(saved.as_ref(), &mut ctx.bar);
        Ok(())
    }

    fn release(&mut self, _ctx: &mut MenuModule) -> Result<(), SessionError> {
        // The dispatch table owns no engine resources.
        Ok(())
    }
}

/// Session slot for the bar: `{"selectedButton": ...}`.
struct BarSlot;

impl Subsystem<MenuModule> for BarSlot {
    fn save_state(&mut self, ctx: &mut MenuModule) -> Result<Value, SessionError> {
        Ok(serde_json::to_value(SavedMenuBar {
            selected_button: ctx.bar.selected(),
        })?)
    }

    fn restore_state(
        &mut self,
        ctx: &mut MenuModule,
        blob: Option<&Value>,
    ) -> Result<(), SessionError> {
        let saved = blob.and_then(|b| serde_json::from_value::<SavedMenuBar>(b.clone()).ok());
        ctx.bar
            .set_selected(saved.map_or(0, |s| s.selected_button));
        Ok(())
    }

    fn release(&mut self, ctx: &mut MenuModule) -> Result<(), SessionError> {
        let failures = ctx.bar.release();
        if failures.is_empty() {
            return Ok(());
        }
        let detail = failures
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(SessionError::Resource(detail))
    }
}

/// Top-level menu module: owns the machine, the bar, and the session
/// registry, and implements the host lifecycle contract.
pub struct MenuController {
    world: MenuModule,
    session: SessionRegistry<MenuModule>,
}

impl MenuController {
    /// Assemble the controller from configuration and an engine factory.
    pub fn new(
        config: &MenuConfig,
        input: InputMap,
        factory: &mut dyn VisualFactory,
    ) -> Result<Self, BuildError> {
        let machine = build_machine(input)?;
        let bar = MenuBar::new(config, factory);
        let mut session = SessionRegistry::new();
        session.register("gamepad_menu", MachineSlot);
        session.register("menu_bar", BarSlot);
        Ok(Self {
            world: MenuModule { machine, bar },
            session,
        })
    }

    /// Dispatch one gamepad event. Returns whether it was consumed.
    pub fn handle_event(&mut self, evt: &GamepadEvent) -> bool {
        let MenuModule { machine, bar } = &mut self.world;
        machine.handle_event(evt, bar)
    }

    /// The machine's active state.
    #[must_use]
    pub fn active(&self) -> MenuState {
        self.world.machine.active()
    }

    /// The menu bar.
    #[must_use]
    pub fn bar(&self) -> &MenuBar {
        &self.world.bar
    }

    /// The menu bar, mutable.
    pub fn bar_mut(&mut self) -> &mut MenuBar {
        &mut self.world.bar
    }

    /// Run the layout pass for the current frame.
    pub fn layout(&mut self, env: &LayoutEnv) {
        self.world.bar.layout(env);
    }

    /// Submit draw calls for the current frame.
    pub fn render(&mut self) {
        self.world.bar.render();
    }
}

impl ModuleLifecycle for MenuController {
    fn on_restore(&mut self, blob: &Value) {
        self.session.restore(&mut self.world, blob);
    }

    fn on_save(&mut self) -> Value {
        self.session.save(&mut self.world)
    }

    fn on_exit(&mut self) -> ShutdownReport {
        self.session.shutdown(&mut self.world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_round_trip_for_every_state() {
        for state in [
            MenuState::NoMenu,
            MenuState::MenuBar,
            MenuState::Settings,
            MenuState::Modules,
            MenuState::Search,
        ] {
            assert_eq!(MenuState::from_symbol(state.symbol()), Some(state));
        }
        assert_eq!(MenuState::from_symbol("Inventory"), None);
    }
}
