#![forbid(unsafe_code)]

//! Menu and input configuration.
//!
//! Everything the menu used to read from ambient module state (button list,
//! font, spacing constants, window dimensions, stick mapping) is collected
//! here and passed explicitly into constructors.

use crate::event::GamepadAxis;
use crate::style::{Color, TextStyle};

/// Reference window dimensions the menu lays itself out against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSize {
    pub width: f32,
    pub height: f32,
}

impl WindowSize {
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// Spacing constants for the horizontal menu bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuMetrics {
    /// Gap between adjacent buttons.
    pub spacing_x: f32,
    /// Horizontal padding inside the bar, applied on both sides.
    pub padding_x: f32,
    /// Vertical padding inside the bar, applied top and bottom.
    pub padding_y: f32,
    /// Distance from the bottom edge of the window to the bar anchor.
    pub bottom_margin: f32,
}

impl Default for MenuMetrics {
    fn default() -> Self {
        Self {
            spacing_x: 16.0,
            padding_x: 24.0,
            padding_y: 12.0,
            bottom_margin: 48.0,
        }
    }
}

/// One menu button: label plus fixed dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonSpec {
    pub label: String,
    pub width: f32,
    pub height: f32,
}

impl ButtonSpec {
    /// A button with the default 160x40 footprint.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            width: 160.0,
            height: 40.0,
        }
    }

    /// Override the footprint.
    #[must_use]
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Mapping from physical inputs to menu navigation gestures.
///
/// Directional gestures match either a D-pad press or the configured stick
/// axis; the axis matches when its signed magnitude clears `deadzone` in
/// the matching direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputMap {
    /// Stick axis driving horizontal menu navigation.
    pub nav_axis: GamepadAxis,
    /// Magnitudes at or below this (in absolute value) match no direction.
    pub deadzone: f32,
}

impl Default for InputMap {
    fn default() -> Self {
        Self {
            nav_axis: GamepadAxis::RightX,
            deadzone: 0.0,
        }
    }
}

/// Full menu configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuConfig {
    pub buttons: Vec<ButtonSpec>,
    pub font: TextStyle,
    pub metrics: MenuMetrics,
    pub window: WindowSize,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            buttons: vec![
                ButtonSpec::new("Settings"),
                ButtonSpec::new("Modules"),
                ButtonSpec::new("OtherThing"),
            ],
            font: TextStyle::new(
                "sans-serif",
                14.0,
                Color::from_hex("#12af3f").expect("literal is valid"),
            ),
            metrics: MenuMetrics::default(),
            window: WindowSize::default(),
        }
    }
}
