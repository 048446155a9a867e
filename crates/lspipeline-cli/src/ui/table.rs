//! One-shot status table printed to stdout.

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use crossterm::style::Stylize;
use lspipeline_core::{DisplayZone, PipelineApi, PipelineState, StatusPalette};

use super::{display_width, last_change, to_crossterm};

const HEADERS: [&str; 3] = ["Stage Name", "Status", "Last Change"];

/// Build a horizontal border: `left` + (`─` × width+2) per column + `right`.
fn border(widths: &[usize; 3], left: char, mid: char, right: char) -> String {
    let mut s = String::new();
    s.push(left);
    for (i, w) in widths.iter().enumerate() {
        s.push_str(&"─".repeat(w + 2));
        if i + 1 < widths.len() {
            s.push(mid);
        }
    }
    s.push(right);
    s
}

fn pad(content: &str, width: usize) -> String {
    " ".repeat(width.saturating_sub(display_width(content)))
}

/// Write the stage table for `state`.
///
/// With `color` set, each status cell is wrapped in ANSI color codes from
/// `palette`; padding is computed on the plain text so columns stay aligned.
pub fn write_stage_table(
    w: &mut impl Write,
    state: &PipelineState,
    palette: &StatusPalette,
    now: DateTime<Utc>,
    zone: DisplayZone,
    color: bool,
) -> io::Result<()> {
    let rows: Vec<[String; 3]> = state
        .stages
        .iter()
        .map(|stage| {
            [
                stage.name.clone(),
                stage.raw_status.clone(),
                last_change(stage, now, zone),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(display_width);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(display_width(cell));
        }
    }

    writeln!(w, "{}", border(&widths, '┌', '┬', '┐'))?;
    write!(w, "│")?;
    for (header, width) in HEADERS.iter().zip(widths) {
        let header = header.to_uppercase();
        write!(w, " {header}{} │", pad(&header, width))?;
    }
    writeln!(w)?;
    writeln!(w, "{}", border(&widths, '├', '┼', '┤'))?;

    for [name, status, changed] in &rows {
        write!(w, "│ {name}{} │", pad(name, widths[0]))?;
        let padding = pad(status, widths[1]);
        if color {
            let styled = status
                .as_str()
                .with(to_crossterm(palette.color_for(status)));
            write!(w, " {styled}{padding} │")?;
        } else {
            write!(w, " {status}{padding} │")?;
        }
        writeln!(w, " {changed}{} │", pad(changed, widths[2]))?;
    }

    writeln!(w, "{}", border(&widths, '└', '┴', '┘'))
}

/// Fetch `pipeline` once and print it as a table.
pub async fn print_snapshot<A>(
    api: &A,
    pipeline: &str,
    palette: &StatusPalette,
    zone: DisplayZone,
    color: bool,
    w: &mut impl Write,
) -> lspipeline_core::Result<()>
where
    A: PipelineApi + ?Sized,
{
    let state = api.get_pipeline_state(pipeline).await?;
    tracing::debug!(pipeline, stages = state.stages.len(), "Fetched pipeline state");
    write_stage_table(w, &state, palette, Utc::now(), zone, color)?;
    Ok(())
}
