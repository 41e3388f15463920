#![forbid(unsafe_code)]

//! Core types for the padmenu gamepad menu system.
//!
//! This crate defines the input event model consumed by the menu state
//! machine, plus the configuration structures that parameterize the menu
//! (button list, text style, layout metrics, input mapping). Everything here
//! is plain data; behavior lives in `padmenu-machine`, `padmenu-layout`, and
//! `padmenu-widgets`.

pub mod config;
pub mod event;
pub mod style;

pub use config::{ButtonSpec, InputMap, MenuConfig, MenuMetrics, WindowSize};
pub use event::{EventKind, GamepadAxis, GamepadButton, GamepadEvent};
pub use style::{Color, ColorParseError, TextStyle};
