//! Centered, bordered text boxes.
//!
//! A box is one border column plus one space of padding on each side of the
//! widest line, with a border row above and below:
//!
//! ```text
//! ┌─────┐
//! │  A  │
//! │ BB  │
//! │ CCC │
//! └─────┘
//! ```

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols::line;
use super::cell::{display_width, emit_string};

/// Border + padding columns added to the interior width.
const HORIZONTAL_CHROME: usize = 4;

/// A box of text lines anchored at `(left, top)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBox {
    pub lines: Vec<String>,
    pub left: u16,
    pub top: u16,
    pub style: Style,
}

impl MessageBox {
    /// `(width, height)` of the rendered box.
    pub fn size(&self) -> (u16, u16) {
        measure_message_box(&self.lines)
    }

    pub fn render(&self, buf: &mut Buffer) -> Rect {
        render_message_box(buf, &self.lines, self.left, self.top, self.style)
    }
}

fn interior_width<S: AsRef<str>>(lines: &[S]) -> usize {
    lines
        .iter()
        .map(|l| display_width(l.as_ref()))
        .max()
        .unwrap_or(0)
}

fn clamp_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Size of the box `lines` would render as: `(interior + 4, lines + 2)`.
pub fn measure_message_box<S: AsRef<str>>(lines: &[S]) -> (u16, u16) {
    (
        clamp_u16(interior_width(lines) + HORIZONTAL_CHROME),
        clamp_u16(lines.len() + 2),
    )
}

/// Draw `lines` as a bordered box with its top-left corner at `(left, top)`.
///
/// Each line is centered in the interior; when the spare width is odd the
/// extra column goes to the right, so text leans left. The whole box,
/// borders included, is drawn in `style`. Returns the area covered.
pub fn render_message_box<S: AsRef<str>>(
    buf: &mut Buffer,
    lines: &[S],
    left: u16,
    top: u16,
    style: Style,
) -> Rect {
    let interior = interior_width(lines);
    let width = interior + HORIZONTAL_CHROME;
    let horizontal = line::HORIZONTAL.repeat(width - 2);

    let mut y = top;
    emit_string(
        buf,
        left,
        y,
        style,
        &format!("{}{horizontal}{}", line::TOP_LEFT, line::TOP_RIGHT),
    );

    for text in lines {
        let text = text.as_ref();
        let spare = interior - display_width(text);
        let pad_left = spare / 2;
        let pad_right = spare - pad_left;
        y = y.saturating_add(1);
        emit_string(
            buf,
            left,
            y,
            style,
            &format!(
                "{v} {}{text}{} {v}",
                " ".repeat(pad_left),
                " ".repeat(pad_right),
                v = line::VERTICAL,
            ),
        );
    }

    y = y.saturating_add(1);
    emit_string(
        buf,
        left,
        y,
        style,
        &format!("{}{horizontal}{}", line::BOTTOM_LEFT, line::BOTTOM_RIGHT),
    );

    let (w, h) = measure_message_box(lines);
    Rect::new(left, top, w, h)
}
