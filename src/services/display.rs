//! Display sink: the watch face the engine renders into

use std::fmt;

use serde::{Deserialize, Serialize};

/// The two colors the watch face can use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Black,
    White,
}

/// Foreground/background color pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub foreground: Color,
    pub background: Color,
}

impl Style {
    /// Light background, dark text
    pub const NORMAL: Style = Style {
        foreground: Color::Black,
        background: Color::White,
    };

    /// Dark background, light text
    pub const INVERTED: Style = Style {
        foreground: Color::White,
        background: Color::Black,
    };

    /// Flash style for a seconds value: even is normal, odd is inverted
    pub fn for_parity(seconds: u32) -> Self {
        if seconds % 2 == 0 {
            Self::NORMAL
        } else {
            Self::INVERTED
        }
    }

    pub fn is_inverted(&self) -> bool {
        *self == Self::INVERTED
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// One rendered frame of the watch face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub minutes: u32,
    pub seconds: u32,
    pub style: Style,
}

impl Frame {
    /// Build a frame from a total-seconds time value
    pub fn new(total_seconds: u32, style: Style) -> Self {
        Self {
            minutes: total_seconds / 60,
            seconds: total_seconds % 60,
            style,
        }
    }

    /// Text as laid out on the watch: minutes and zero-padded seconds on their own lines
    pub fn text(&self) -> String {
        format!("\n{}\n{:02}", self.minutes, self.seconds)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes, self.seconds)
    }
}

/// Anything that can show a frame
pub trait DisplaySink: Send {
    fn render(&mut self, frame: &Frame);
}

/// Renders the face on the terminal, using reverse video for the inverted style
#[derive(Debug, Default)]
pub struct TerminalDisplay;

impl DisplaySink for TerminalDisplay {
    fn render(&mut self, frame: &Frame) {
        if frame.style.is_inverted() {
            println!("\x1b[7m {} \x1b[0m", frame);
        } else {
            println!(" {} ", frame);
        }
    }
}
