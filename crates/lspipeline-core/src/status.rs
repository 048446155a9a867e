//! Stage status → display color mapping.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::ExecutionStatus;

/// Display color, independent of the rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Green,
    Blue,
    Red,
    Gray,
    /// Dark yellow on 16-color terminals.
    Brown,
    Cyan,
    Yellow,
    Magenta,
    White,
}

/// Default color for a known status.
pub const fn default_color(status: ExecutionStatus) -> Option<StatusColor> {
    match status {
        ExecutionStatus::Succeeded => Some(StatusColor::Green),
        ExecutionStatus::InProgress => Some(StatusColor::Blue),
        ExecutionStatus::Failed => Some(StatusColor::Red),
        ExecutionStatus::Cancelled => Some(StatusColor::Gray),
        ExecutionStatus::Stopped => Some(StatusColor::Brown),
        ExecutionStatus::Stopping => Some(StatusColor::Cyan),
        ExecutionStatus::Unknown => None,
    }
}

/// Immutable status → color table, built once at startup.
///
/// Keys are the raw status strings reported by the API, so overrides can
/// also color statuses we don't model (e.g. `"Abandoned"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPalette {
    colors: HashMap<String, StatusColor>,
    fallback: StatusColor,
}

impl Default for StatusPalette {
    fn default() -> Self {
        Self::new(StatusColor::White, HashMap::new())
    }
}

impl StatusPalette {
    /// Build the palette from the defaults, then apply `overrides`.
    pub fn new(fallback: StatusColor, overrides: HashMap<String, StatusColor>) -> Self {
        let mut colors: HashMap<String, StatusColor> = ExecutionStatus::KNOWN
            .into_iter()
            .filter_map(|s| default_color(s).map(|c| (s.as_str().to_string(), c)))
            .collect();
        colors.extend(overrides);
        Self { colors, fallback }
    }

    /// Color for a raw status string; unmapped statuses get the fallback.
    pub fn color_for(&self, status: &str) -> StatusColor {
        self.colors.get(status).copied().unwrap_or(self.fallback)
    }

    pub const fn fallback(&self) -> StatusColor {
        self.fallback
    }
}
