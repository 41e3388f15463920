#![forbid(unsafe_code)]

//! Declarative input state machine with symbolic save/restore.
//!
//! [`MachineBuilder`] compiles per-state descriptor closures into a
//! dispatch table of (trigger, handler) pairs plus enter/exit transition
//! hooks; [`Machine`] dispatches gamepad events against the single active
//! state and performs validated transitions. The [`session`] module layers
//! save/restore orchestration across a registry of subsystems and defines
//! the module-lifecycle contract the host drives.

pub mod machine;
pub mod session;

pub use machine::{
    Bindings, BuildError, Machine, MachineBuilder, SavedMachine, StateToken, Trigger,
};
pub use session::{
    ModuleLifecycle, SessionError, SessionRegistry, ShutdownReport, Subsystem,
};
