//! Live dashboard frame: header, one box per stage, footer.

use chrono::{DateTime, Utc};
use lspipeline_core::{DisplayZone, PipelineState, StageState, StatusPalette};
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use super::{
    display_width, emit_string, last_change, measure_message_box, render_message_box, to_ratatui,
};

/// Row of the first stage box, below the header.
pub const BASE_OFFSET: u16 = 2;

/// Vertical distance between stage boxes: a three-line box plus one blank row.
pub const ROW_HEIGHT: u16 = 6;

/// Text lines shown inside a stage's box.
pub fn stage_lines(stage: &StageState, now: DateTime<Utc>, zone: DisplayZone) -> Vec<String> {
    vec![
        stage.name.clone(),
        stage.raw_status.clone(),
        last_change(stage, now, zone),
    ]
}

/// Top row of the box for the stage at `index`.
pub fn stage_top(area: Rect, index: usize) -> u16 {
    let offset = u16::try_from(index)
        .unwrap_or(u16::MAX)
        .saturating_mul(ROW_HEIGHT);
    area.y.saturating_add(BASE_OFFSET).saturating_add(offset)
}

/// Left column that centers a box of `width` in `area`.
pub const fn centered_left(area: Rect, width: u16) -> u16 {
    area.x + area.width.saturating_sub(width) / 2
}

/// Draw the dashboard into a frame.
pub fn draw(
    frame: &mut Frame<'_>,
    state: &PipelineState,
    palette: &StatusPalette,
    now: DateTime<Utc>,
    zone: DisplayZone,
) {
    let area = frame.area();
    render(frame.buffer_mut(), area, state, palette, now, zone);
}

/// Draw the dashboard into `buf` within `area`.
pub fn render(
    buf: &mut Buffer,
    area: Rect,
    state: &PipelineState,
    palette: &StatusPalette,
    now: DateTime<Utc>,
    zone: DisplayZone,
) {
    let title = format!("Pipeline: {}", state.name);
    let title_width = u16::try_from(display_width(&title)).unwrap_or(u16::MAX);
    emit_string(
        buf,
        centered_left(area, title_width),
        area.y,
        Style::default().add_modifier(Modifier::BOLD),
        &title,
    );

    for (index, stage) in state.stages.iter().enumerate() {
        let lines = stage_lines(stage, now, zone);
        let (width, _) = measure_message_box(&lines);
        let style = Style::default().fg(to_ratatui(palette.color_for(&stage.raw_status)));
        render_message_box(
            buf,
            &lines,
            centered_left(area, width),
            stage_top(area, index),
            style,
        );
    }

    let footer = format!(
        "Last updated: {}  (Esc to quit)",
        zone.format_absolute(now)
    );
    emit_string(
        buf,
        area.x,
        area.bottom().saturating_sub(1),
        Style::default().fg(Color::DarkGray),
        &footer,
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ui::test_helpers::row_text;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 30).unwrap()
    }

    fn pipeline() -> PipelineState {
        PipelineState {
            name: "demo".to_string(),
            stages: vec![
                StageState::new("Build", "Succeeded", Some(now() - Duration::seconds(25))),
                StageState::new("Deploy", "Abandoned", None),
            ],
        }
    }

    fn render_demo(width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        render(
            &mut buf,
            area,
            &pipeline(),
            &StatusPalette::default(),
            now(),
            DisplayZone::UTC,
        );
        buf
    }

    #[test]
    fn stage_lines_show_name_status_and_age() {
        let state = pipeline();
        assert_eq!(
            stage_lines(&state.stages[0], now(), DisplayZone::UTC),
            vec!["Build", "Succeeded", "25 seconds ago"]
        );
        assert_eq!(
            stage_lines(&state.stages[1], now(), DisplayZone::UTC)[2],
            "never"
        );
    }

    #[test]
    fn stage_tops_step_by_row_height() {
        let area = Rect::new(0, 0, 80, 40);
        assert_eq!(stage_top(area, 0), BASE_OFFSET);
        assert_eq!(stage_top(area, 1), BASE_OFFSET + ROW_HEIGHT);
        assert_eq!(stage_top(area, 3), BASE_OFFSET + 3 * ROW_HEIGHT);
    }

    #[test]
    fn boxes_are_centered_and_colored() {
        let buf = render_demo(40, 20);
        // "25 seconds ago" is the widest line: 14 + 4 = 18 columns.
        let left: u16 = (40 - 18) / 2;
        assert_eq!(buf[(left, BASE_OFFSET)].symbol(), "┌");
        assert_eq!(buf[(left, BASE_OFFSET)].fg, Color::Green);
        assert_eq!(row_text(&buf, BASE_OFFSET + 1).trim(), "│     Build      │");

        // "Abandoned" is not in the palette: fallback color.
        let top = BASE_OFFSET + ROW_HEIGHT;
        let left: u16 = (40 - 13) / 2;
        assert_eq!(buf[(left, top)].symbol(), "┌");
        assert_eq!(buf[(left, top)].fg, Color::White);
        assert_eq!(row_text(&buf, top + 2).trim(), "│ Abandoned │");
    }

    #[test]
    fn header_and_footer() {
        let buf = render_demo(60, 20);
        assert_eq!(row_text(&buf, 0).trim(), "Pipeline: demo");
        assert_eq!(
            row_text(&buf, 19),
            "Last updated: 12:00:30 01-03-2024 UTC  (Esc to quit)"
        );
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        render_demo(3, 1);
        render_demo(0, 0);
    }
}
