//! Live dashboard: refresh loop plus keyboard listener.
//!
//! Polling and drawing run on the tokio runtime; terminal input runs on a
//! dedicated OS thread. The only thing they share is a `CancellationToken`.

mod input;
mod screen;

use std::time::Duration;

use chrono::Utc;
use lspipeline_core::{DisplayZone, PipelineApi, StatusPalette};
use tokio::time::MissedTickBehavior;
use tokio_stream::wrappers::IntervalStream;
use tokio_stream::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::ui::dashboard;

pub use input::{is_cancel_key, join_listener, spawn_listener};
pub use screen::{Surface, TerminalScreen};

/// Run the dashboard for `pipeline` until Esc is pressed.
///
/// A remote or render failure restores the terminal and is returned.
pub async fn run<A>(
    api: &A,
    pipeline: &str,
    palette: &StatusPalette,
    zone: DisplayZone,
    interval: Duration,
) -> lspipeline_core::Result<()>
where
    A: PipelineApi + ?Sized,
{
    let mut screen = TerminalScreen::acquire()?;
    screen.init()?;

    let cancel = CancellationToken::new();
    let input_thread = spawn_listener(cancel.clone());

    let mut tick = tokio::time::interval(interval);
    tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let ticks = IntervalStream::new(tick).map(|_| ());

    let result = refresh_loop(
        api,
        &mut screen,
        pipeline,
        palette,
        zone,
        ticks,
        cancel.clone(),
    )
    .await;

    // Stop the listener on error exits too; it notices within one poll interval.
    cancel.cancel();
    join_listener(input_thread).await;

    let frames = result?;
    info!(pipeline, frames, "Dashboard closed");
    Ok(())
}

/// Poll and redraw on every tick until `cancel` fires.
///
/// Cancellation is checked before the ticker, so a pending cancel always
/// wins. A tick starts exactly one poll-and-draw cycle; a slow poll delays
/// the next select. The surface is finalized exactly once on every exit
/// path. Returns the number of frames drawn.
pub async fn refresh_loop<A, S, T>(
    api: &A,
    surface: &mut S,
    pipeline: &str,
    palette: &StatusPalette,
    zone: DisplayZone,
    ticks: T,
    cancel: CancellationToken,
) -> lspipeline_core::Result<usize>
where
    A: PipelineApi + ?Sized,
    S: Surface,
    T: Stream<Item = ()>,
{
    tokio::pin!(ticks);

    let result: lspipeline_core::Result<usize> = async {
        surface.init()?;
        let mut frames = 0usize;
        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                tick = ticks.next() => {
                    if tick.is_none() {
                        // Ticker exhausted: nothing left to do but wait for Esc.
                        cancel.cancelled().await;
                        break;
                    }
                    render_cycle(api, surface, pipeline, palette, zone).await?;
                    frames += 1;
                }
            }
        }
        Ok(frames)
    }
    .await;

    match (result, surface.finalize()) {
        (Ok(frames), Ok(())) => Ok(frames),
        (Ok(_), Err(e)) => Err(e.into()),
        (Err(e), finalize) => {
            if let Err(fe) = finalize {
                warn!(%fe, "Terminal restore failed after error");
            }
            Err(e)
        }
    }
}

async fn render_cycle<A, S>(
    api: &A,
    surface: &mut S,
    pipeline: &str,
    palette: &StatusPalette,
    zone: DisplayZone,
) -> lspipeline_core::Result<()>
where
    A: PipelineApi + ?Sized,
    S: Surface,
{
    let state = api.get_pipeline_state(pipeline).await?;
    debug!(pipeline, stages = state.stages.len(), "Polled pipeline state");
    let now = Utc::now();
    surface.draw(|frame| dashboard::draw(frame, &state, palette, now, zone))?;
    Ok(())
}

#[cfg(test)]
mod refresh_tests;
