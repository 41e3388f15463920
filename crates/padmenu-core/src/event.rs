#![forbid(unsafe_code)]

//! Canonical gamepad input events.
//!
//! The host engine polls physical controllers and delivers one
//! [`GamepadEvent`] per frame-step to the menu layer. Events are tagged
//! records: a [`EventKind`] bitmask says which payload fields are
//! meaningful (`button` for press/release, `axis` + `value` for axial
//! input). The dispatch layer treats events as read-only.
//!
//! # Design Notes
//!
//! - `kind` is a bitmask rather than an enum so a single event can carry
//!   both a digital and an analog interpretation (e.g. a trigger reported
//!   as button and axis at once).
//! - Axis magnitudes are signed and normalized to `[-1.0, 1.0]`; the sign
//!   carries direction (negative = left/up).

use bitflags::bitflags;

bitflags! {
    /// Event category bits.
    ///
    /// A press/release bit means [`GamepadEvent::button`] is set; the axis
    /// bit means [`GamepadEvent::axis`] and [`GamepadEvent::value`] are set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EventKind: u8 {
        /// A button transitioned from up to down.
        const BUTTON_PRESS   = 0b001;
        /// A button transitioned from down to up.
        const BUTTON_RELEASE = 0b010;
        /// An analog axis moved.
        const AXIS           = 0b100;
    }
}

/// Physical gamepad buttons.
///
/// Triggers appear both here (digital interpretation) and as
/// [`GamepadAxis`] variants (analog interpretation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadButton {
    /// Face button: A (bottom).
    A,
    /// Face button: B (right).
    B,
    /// Face button: X (left).
    X,
    /// Face button: Y (top).
    Y,
    /// Directional pad up.
    DpadUp,
    /// Directional pad down.
    DpadDown,
    /// Directional pad left.
    DpadLeft,
    /// Directional pad right.
    DpadRight,
    /// Left trigger, treated as a button past its threshold.
    LeftTrigger,
    /// Right trigger, treated as a button past its threshold.
    RightTrigger,
    /// Left bumper/shoulder.
    LeftBumper,
    /// Right bumper/shoulder.
    RightBumper,
    /// Left stick click.
    LeftStick,
    /// Right stick click.
    RightStick,
    /// Start button.
    Start,
    /// Select/back button.
    Select,
    /// Home/guide button.
    Home,
}

/// Analog gamepad axes.
///
/// The D-pad can be reported either as discrete buttons or as a 2D axis
/// pair, depending on the controller profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadAxis {
    /// Left stick, horizontal.
    LeftX,
    /// Left stick, vertical.
    LeftY,
    /// Right stick, horizontal.
    RightX,
    /// Right stick, vertical.
    RightY,
    /// Left trigger pull amount.
    LeftTrigger,
    /// Right trigger pull amount.
    RightTrigger,
    /// D-pad reported as a horizontal axis.
    DpadX,
    /// D-pad reported as a vertical axis.
    DpadY,
}

/// A single gamepad input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GamepadEvent {
    /// Which payload fields are meaningful.
    pub kind: EventKind,
    /// The button involved, when `kind` includes a button bit.
    pub button: Option<GamepadButton>,
    /// The axis involved, when `kind` includes [`EventKind::AXIS`].
    pub axis: Option<GamepadAxis>,
    /// Signed axis magnitude in `[-1.0, 1.0]`; 0.0 for button events.
    pub value: f32,
}

impl GamepadEvent {
    /// Create a button-press event.
    #[must_use]
    pub const fn button_press(button: GamepadButton) -> Self {
        Self {
            kind: EventKind::BUTTON_PRESS,
            button: Some(button),
            axis: None,
            value: 0.0,
        }
    }

    /// Create a button-release event.
    #[must_use]
    pub const fn button_release(button: GamepadButton) -> Self {
        Self {
            kind: EventKind::BUTTON_RELEASE,
            button: Some(button),
            axis: None,
            value: 0.0,
        }
    }

    /// Create an axis-motion event with a signed magnitude.
    #[must_use]
    pub const fn axis_motion(axis: GamepadAxis, value: f32) -> Self {
        Self {
            kind: EventKind::AXIS,
            button: None,
            axis: Some(axis),
            value,
        }
    }

    /// True when this event presses the given button.
    #[must_use]
    pub fn is_press(&self, button: GamepadButton) -> bool {
        self.kind.contains(EventKind::BUTTON_PRESS) && self.button == Some(button)
    }

    /// True when this event releases the given button.
    #[must_use]
    pub fn is_release(&self, button: GamepadButton) -> bool {
        self.kind.contains(EventKind::BUTTON_RELEASE) && self.button == Some(button)
    }
}
