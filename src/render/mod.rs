//! Output adapters: DOT diagrams and Coq verification scripts.

mod coq;
mod dot;

pub use coq::{render_script, CHECK_JOIN_TACTIC};
pub use dot::{diagram_edges, render_dot, DiagramEdge};

use std::fmt;
use std::str::FromStr;

use crate::error::HierarchyError;

/// How one edge kind is drawn in the diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayMode {
    Off,
    On,
    /// Drawn, with this DOT color name
    Color(String),
}

impl DisplayMode {
    pub fn is_off(&self) -> bool {
        matches!(self, DisplayMode::Off)
    }

    /// Display attribute attached to edges drawn in this mode.
    pub fn color(&self) -> Option<&str> {
        match self {
            DisplayMode::Color(c) => Some(c.as_str()),
            _ => None,
        }
    }
}

impl FromStr for DisplayMode {
    type Err = HierarchyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Err(HierarchyError::InvalidInput(
                "display mode must be off, on or a color name".to_string(),
            )),
            "off" => Ok(DisplayMode::Off),
            "on" => Ok(DisplayMode::On),
            color => Ok(DisplayMode::Color(color.to_string())),
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayMode::Off => write!(f, "off"),
            DisplayMode::On => write!(f, "on"),
            DisplayMode::Color(c) => write!(f, "{}", c),
        }
    }
}
