#![forbid(unsafe_code)]

//! Menu-bar widgets and the gamepad menu controller.
//!
//! This crate is the concrete client of `padmenu-machine` and
//! `padmenu-layout`: a horizontal bar of buttons with cyclic selection,
//! driven by a compiled input state machine, persisted through the session
//! registry. Engine-side drawing (shaders, fonts) stays behind the visual
//! traits in [`visual`]; everything here treats those objects as opaque.

pub mod controller;
pub mod menu_bar;
pub mod visual;

pub use controller::{MenuController, MenuState};
pub use menu_bar::{MenuBar, SavedMenuBar};
pub use visual::{ButtonVisual, ReleaseError, Resource, TextVisual, VisualFactory};
