//! Tests for the dashboard refresh loop.

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use lspipeline_core::{
        DisplayZone, Error, PipelineApi, PipelineState, RemoteError, RenderError, StageState,
        StatusPalette,
    };
    use ratatui::Frame;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use tokio_util::sync::CancellationToken;

    use crate::tui::{Surface, refresh_loop};
    use crate::ui::test_helpers::row_text;

    struct FakeApi {
        polls: AtomicUsize,
        fail: bool,
    }

    impl FakeApi {
        fn new() -> Self {
            Self {
                polls: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }

        fn polls(&self) -> usize {
            self.polls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PipelineApi for FakeApi {
        async fn list_pipeline_names(&self) -> Result<Vec<String>, RemoteError> {
            Ok(vec!["demo".to_string()])
        }

        async fn get_pipeline_state(&self, name: &str) -> Result<PipelineState, RemoteError> {
            self.polls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(RemoteError::new("GetPipelineState", "access denied"));
            }
            Ok(PipelineState {
                name: name.to_string(),
                stages: vec![StageState::new("Build", "Succeeded", None)],
            })
        }
    }

    /// Surface over a `TestBackend` that counts lifecycle calls.
    struct FakeSurface {
        terminal: Terminal<TestBackend>,
        initialized: bool,
        inits: usize,
        finalize_calls: usize,
        draws: usize,
        /// Cancel this token once `draws` reaches the given count.
        cancel_after: Option<(usize, CancellationToken)>,
    }

    impl FakeSurface {
        fn new() -> Self {
            Self {
                terminal: Terminal::new(TestBackend::new(60, 20)).unwrap(),
                initialized: false,
                inits: 0,
                finalize_calls: 0,
                draws: 0,
                cancel_after: None,
            }
        }
    }

    impl Surface for FakeSurface {
        fn init(&mut self) -> Result<(), RenderError> {
            if !self.initialized {
                self.initialized = true;
                self.inits += 1;
            }
            Ok(())
        }

        fn draw<F>(&mut self, render: F) -> Result<(), RenderError>
        where
            F: FnOnce(&mut Frame<'_>),
        {
            self.init()?;
            self.terminal
                .draw(render)
                .map_err(|e| RenderError::Draw(e.to_string()))?;
            self.draws += 1;
            if let Some((n, token)) = &self.cancel_after {
                if self.draws == *n {
                    token.cancel();
                }
            }
            Ok(())
        }

        fn finalize(&mut self) -> Result<(), RenderError> {
            self.finalize_calls += 1;
            self.initialized = false;
            Ok(())
        }
    }

    fn endless_ticks() -> impl tokio_stream::Stream<Item = ()> {
        tokio_stream::iter(std::iter::repeat(()))
    }

    #[tokio::test]
    async fn two_ticks_then_cancel_renders_twice() {
        let api = FakeApi::new();
        let palette = StatusPalette::default();
        let mut surface = FakeSurface::new();
        let cancel = CancellationToken::new();
        let ticks = tokio_stream::iter([(), ()]);

        let canceller = {
            let cancel = cancel.clone();
            async move {
                tokio::task::yield_now().await;
                cancel.cancel();
            }
        };
        let (frames, ()) = tokio::join!(
            refresh_loop(
                &api,
                &mut surface,
                "demo",
                &palette,
                DisplayZone::UTC,
                ticks,
                cancel.clone(),
            ),
            canceller,
        );

        assert_eq!(frames.unwrap(), 2);
        assert_eq!(api.polls(), 2);
        assert_eq!(surface.draws, 2);
        assert_eq!(surface.inits, 1);
        assert_eq!(surface.finalize_calls, 1);
    }

    #[tokio::test]
    async fn cancel_during_render_stops_before_next_tick() {
        let api = FakeApi::new();
        let palette = StatusPalette::default();
        let mut surface = FakeSurface::new();
        let cancel = CancellationToken::new();
        surface.cancel_after = Some((2, cancel.clone()));

        let frames = refresh_loop(
            &api,
            &mut surface,
            "demo",
            &palette,
            DisplayZone::UTC,
            endless_ticks(),
            cancel,
        )
        .await
        .unwrap();

        assert_eq!(frames, 2);
        assert_eq!(api.polls(), 2);
        assert_eq!(surface.finalize_calls, 1);
    }

    #[tokio::test]
    async fn pending_cancel_wins_over_ready_tick() {
        let api = FakeApi::new();
        let palette = StatusPalette::default();
        let mut surface = FakeSurface::new();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let frames = refresh_loop(
            &api,
            &mut surface,
            "demo",
            &palette,
            DisplayZone::UTC,
            endless_ticks(),
            cancel,
        )
        .await
        .unwrap();

        assert_eq!(frames, 0);
        assert_eq!(api.polls(), 0);
        assert_eq!(surface.inits, 1);
        assert_eq!(surface.finalize_calls, 1);
    }

    #[tokio::test]
    async fn remote_error_ends_loop_and_restores_surface() {
        let api = FakeApi::failing();
        let palette = StatusPalette::default();
        let mut surface = FakeSurface::new();

        let result = refresh_loop(
            &api,
            &mut surface,
            "demo",
            &palette,
            DisplayZone::UTC,
            endless_ticks(),
            CancellationToken::new(),
        )
        .await;

        match result {
            Err(Error::Remote(e)) => assert_eq!(e.operation, "GetPipelineState"),
            other => panic!("expected remote error, got {other:?}"),
        }
        assert_eq!(api.polls(), 1);
        assert_eq!(surface.draws, 0);
        assert_eq!(surface.finalize_calls, 1);
    }

    #[tokio::test]
    async fn frame_shows_polled_pipeline() {
        let api = FakeApi::new();
        let palette = StatusPalette::default();
        let mut surface = FakeSurface::new();
        let cancel = CancellationToken::new();
        surface.cancel_after = Some((1, cancel.clone()));

        refresh_loop(
            &api,
            &mut surface,
            "demo",
            &palette,
            DisplayZone::UTC,
            endless_ticks(),
            cancel,
        )
        .await
        .unwrap();

        let buf = surface.terminal.backend().buffer();
        assert_eq!(row_text(buf, 0).trim(), "Pipeline: demo");
        assert!(row_text(buf, 3).contains("Build"));
        let footer = row_text(buf, 19);
        assert!(footer.starts_with("Last updated: "));
        assert!(footer.ends_with(" UTC  (Esc to quit)"));
    }
}
