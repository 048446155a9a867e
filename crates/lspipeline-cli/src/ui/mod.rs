//! Rendering: cell writer, box layout, dashboard frame and status table.

pub mod cell;
pub mod dashboard;
pub mod message_box;
pub mod table;

use chrono::{DateTime, Utc};
use lspipeline_core::{DisplayZone, StageState, StatusColor};
use ratatui::style::Color;

pub use cell::{display_width, emit_string};
pub use message_box::{MessageBox, measure_message_box, render_message_box};

/// How a pipeline's state is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Renderer {
    /// One snapshot printed as a table, then exit.
    Table,
    /// Live full-screen dashboard refreshed on an interval.
    Dashboard,
}

impl Renderer {
    pub const fn from_flags(table: bool) -> Self {
        if table { Self::Table } else { Self::Dashboard }
    }
}

/// Shown in place of a change time for stages that never ran.
pub const NEVER_RAN: &str = "never";

/// When `stage` last changed status, relative to `now`.
pub fn last_change(stage: &StageState, now: DateTime<Utc>, zone: DisplayZone) -> String {
    stage
        .last_status_change
        .map_or_else(|| NEVER_RAN.to_string(), |t| zone.pretty_print(now, t))
}

/// Map a palette color onto the ratatui 16-color set.
pub const fn to_ratatui(color: StatusColor) -> Color {
    match color {
        StatusColor::Green => Color::Green,
        StatusColor::Blue => Color::Blue,
        StatusColor::Red => Color::Red,
        StatusColor::Gray => Color::DarkGray,
        StatusColor::Brown => Color::Yellow,
        StatusColor::Cyan => Color::Cyan,
        StatusColor::Yellow => Color::LightYellow,
        StatusColor::Magenta => Color::Magenta,
        StatusColor::White => Color::White,
    }
}

/// Map a palette color onto crossterm colors for plain stdout output.
pub const fn to_crossterm(color: StatusColor) -> crossterm::style::Color {
    use crossterm::style::Color as C;
    match color {
        StatusColor::Green => C::Green,
        StatusColor::Blue => C::Blue,
        StatusColor::Red => C::Red,
        StatusColor::Gray => C::DarkGrey,
        StatusColor::Brown => C::DarkYellow,
        StatusColor::Cyan => C::Cyan,
        StatusColor::Yellow => C::Yellow,
        StatusColor::Magenta => C::Magenta,
        StatusColor::White => C::White,
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brown_is_dark_yellow() {
        assert_eq!(to_ratatui(StatusColor::Brown), Color::Yellow);
        assert_eq!(
            to_crossterm(StatusColor::Brown),
            crossterm::style::Color::DarkYellow
        );
    }

    #[test]
    fn renderer_from_flags() {
        assert_eq!(Renderer::from_flags(true), Renderer::Table);
        assert_eq!(Renderer::from_flags(false), Renderer::Dashboard);
    }
}
