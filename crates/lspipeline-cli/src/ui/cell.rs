//! Unicode-aware cell writer.

use ratatui::buffer::Buffer;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;

/// Columns `text` occupies when written with [`emit_string`].
///
/// This is the per-char sum, not `UnicodeWidthStr::width`: the two disagree
/// on emoji sequences (VS16, ZWJ), and the borders must line up with what
/// was emitted.
pub fn display_width(text: &str) -> usize {
    text.chars().filter_map(UnicodeWidthChar::width).sum()
}

/// Write `text` into `buf` starting at column `x` of row `y`.
///
/// Each char takes as many cells as its display width. Zero-width chars
/// (combining marks) are appended to the previous cell instead of taking
/// their own. Control chars are dropped. Cells outside the buffer are
/// skipped, so callers may draw partially off-screen.
///
/// Returns the number of columns the text spans, clipped or not.
pub fn emit_string(buf: &mut Buffer, x: u16, y: u16, style: Style, text: &str) -> u16 {
    let mut col = x;
    let mut last: Option<u16> = None;
    let mut utf8 = [0u8; 4];

    for ch in text.chars() {
        let Some(width) = ch.width() else {
            continue;
        };
        let symbol = ch.encode_utf8(&mut utf8);

        if width == 0 {
            if let Some(prev) = last {
                if let Some(cell) = buf.cell_mut((prev, y)) {
                    let joined = format!("{}{symbol}", cell.symbol());
                    cell.set_symbol(&joined);
                }
            }
            continue;
        }

        if let Some(cell) = buf.cell_mut((col, y)) {
            cell.set_symbol(symbol).set_style(style);
        }
        let width = u16::try_from(width).unwrap_or(1);
        // Cells hidden behind a wide char must not keep stale content.
        for hidden in col.saturating_add(1)..col.saturating_add(width) {
            if let Some(cell) = buf.cell_mut((hidden, y)) {
                cell.reset();
            }
        }
        last = Some(col);
        col = col.saturating_add(width);
    }

    col - x
}
