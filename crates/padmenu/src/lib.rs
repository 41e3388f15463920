#![forbid(unsafe_code)]

//! Public facade for the padmenu crates.
//!
//! Re-exports the full API surface and provides a [`prelude`] for the
//! common path: build a [`MenuController`](padmenu_widgets::MenuController)
//! from a [`MenuConfig`](padmenu_core::MenuConfig) and a visual factory,
//! feed it gamepad events each frame, and wire its
//! [`ModuleLifecycle`](padmenu_machine::ModuleLifecycle) into the host's
//! persistence hooks.

pub use padmenu_core as core;
pub use padmenu_layout as layout;
pub use padmenu_machine as machine;
pub use padmenu_widgets as widgets;

/// The commonly used subset of the API.
pub mod prelude {
    pub use padmenu_core::{
        ButtonSpec, Color, EventKind, GamepadAxis, GamepadButton, GamepadEvent, InputMap,
        MenuConfig, MenuMetrics, TextStyle, WindowSize,
    };
    pub use padmenu_layout::{
        DirtyFlags, FixedNode, FlowRow, LayoutCache, LayoutEnv, LayoutNode,
    };
    pub use padmenu_machine::{
        Bindings, BuildError, Machine, MachineBuilder, ModuleLifecycle, SavedMachine,
        SessionError, SessionRegistry, ShutdownReport, StateToken, Subsystem, Trigger,
    };
    pub use padmenu_widgets::{
        ButtonVisual, MenuBar, MenuController, MenuState, ReleaseError, Resource, SavedMenuBar,
        TextVisual, VisualFactory,
    };
}
