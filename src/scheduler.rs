use std::time::Duration;

use color_eyre::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::Instant;

use crate::config::DashboardSettings;
use crate::event::Notice;
use crate::lifecycle::Cancellation;
use crate::rank::{rank_by_cpu, rank_by_ram};
use crate::system::provider::MetricsProvider;
use crate::system::snapshot::SnapshotBuilder;
use crate::ui::{self, DashboardView};
use crate::ui::theme::Theme;

const FPS_WINDOW: Duration = Duration::from_secs(1);

/// Frames presented per second, latched once a second.
#[derive(Debug)]
pub struct FpsCounter {
    tally: u32,
    current: u32,
    last_latch: Instant,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        FpsCounter {
            tally: 0,
            current: 0,
            last_latch: now,
        }
    }

    /// Counts one frame at `now` and returns the latched rate.
    pub fn record(&mut self, now: Instant) -> u32 {
        if now.saturating_duration_since(self.last_latch) >= FPS_WINDOW {
            self.current = self.tally;
            self.tally = 0;
            self.last_latch = now;
        }
        self.tally += 1;
        self.current
    }

    pub fn current(&self) -> u32 {
        self.current
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    Running,
    Stopped,
}

/// Drives capture, ranking and drawing once per tick until cancelled.
pub struct FrameScheduler<P> {
    builder: SnapshotBuilder<P>,
    settings: DashboardSettings,
    theme: Theme,
    fps: FpsCounter,
    cancel: Cancellation,
    state: SchedulerState,
    frames: u64,
}

impl<P: MetricsProvider> FrameScheduler<P> {
    pub fn new(
        builder: SnapshotBuilder<P>,
        settings: DashboardSettings,
        theme: Theme,
        cancel: Cancellation,
    ) -> Self {
        FrameScheduler {
            builder,
            settings,
            theme,
            fps: FpsCounter::new(Instant::now()),
            cancel,
            state: SchedulerState::Running,
            frames: 0,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames
    }

    /// One sample-rank-draw pass. Drawing errors are returned to the caller.
    pub fn tick<B>(&mut self, terminal: &mut Terminal<B>) -> Result<()>
    where
        B: Backend,
        B::Error: std::error::Error + Send + Sync + 'static,
    {
        let snapshot = self.builder.capture();
        let ranked_ram = rank_by_ram(&snapshot.processes);
        let ranked_cpu = rank_by_cpu(&snapshot.processes);
        let fps = self.fps.record(Instant::now());

        let view = DashboardView {
            snapshot: &snapshot,
            ranked_ram: &ranked_ram,
            ranked_cpu: &ranked_cpu,
            fps: Some(fps),
            settings: &self.settings,
            theme: &self.theme,
        };
        terminal.draw(|frame| {
            ui::render(frame, &view);
        })?;
        self.frames += 1;
        Ok(())
    }

    pub async fn run<B>(
        &mut self,
        terminal: &mut Terminal<B>,
        notices: &mut UnboundedReceiver<Notice>,
    ) -> Result<()>
    where
        B: Backend,
        B::Error: std::error::Error + Send + Sync + 'static,
    {
        tracing::info!(
            tick_ms = self.settings.tick_interval.as_millis() as u64,
            "frame scheduler started"
        );
        let cancel = self.cancel.clone();

        let outcome = loop {
            if cancel.is_cancelled() {
                break Ok(());
            }
            if let Err(err) = self.tick(terminal) {
                break Err(err);
            }

            let sleep = tokio::time::sleep(self.settings.tick_interval);
            tokio::pin!(sleep);
            let suspended: Result<()> = loop {
                tokio::select! {
                    _ = &mut sleep => break Ok(()),
                    _ = cancel.cancelled() => break Ok(()),
                    Some(notice) = notices.recv() => {
                        if let Err(err) = handle_notice(terminal, notice) {
                            break Err(err);
                        }
                    }
                }
            };
            if let Err(err) = suspended {
                break Err(err);
            }
        };

        self.state = SchedulerState::Stopped;
        tracing::info!(frames = self.frames, "frame scheduler stopped");
        outcome
    }
}

/// Applies an input-side notice to the terminal. Never draws.
pub fn handle_notice<B>(terminal: &mut Terminal<B>, notice: Notice) -> Result<()>
where
    B: Backend,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    match notice {
        Notice::Resize => {
            terminal.autoresize()?;
            tracing::debug!("viewport resynced after resize");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    use super::*;
    use crate::event::notice_channel;
    use crate::lifecycle::CancelSource;
    use crate::system::provider::fake::FakeProvider;
    use crate::system::snapshot::InterfaceFilter;

    fn scheduler(tick: Duration, cancel: Cancellation) -> FrameScheduler<FakeProvider> {
        let settings = DashboardSettings {
            tick_interval: tick,
            ..DashboardSettings::default()
        };
        FrameScheduler::new(
            SnapshotBuilder::new(FakeProvider::healthy(), InterfaceFilter::All),
            settings,
            Theme::dark(),
            cancel,
        )
    }

    #[test]
    fn fps_latches_once_per_window() {
        let t0 = Instant::now();
        let mut fps = FpsCounter::new(t0);
        for i in 0..10 {
            assert_eq!(fps.record(t0 + Duration::from_millis(100 * i)), 0);
        }
        assert_eq!(fps.record(t0 + Duration::from_millis(1000)), 10);
        assert_eq!(fps.record(t0 + Duration::from_millis(1500)), 10);
        assert_eq!(fps.record(t0 + Duration::from_millis(2000)), 2);
        assert_eq!(fps.current(), 2);
    }

    #[test]
    fn tick_draws_one_frame() {
        let mut sched = scheduler(Duration::from_secs(1), Cancellation::new());
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        sched.tick(&mut terminal).unwrap();
        assert_eq!(sched.frames_drawn(), 1);
        let first_line: String = (0..8)
            .map(|x| terminal.backend().buffer().cell((x, 0)).unwrap().symbol())
            .collect();
        assert_eq!(first_line, " sysdash");
    }

    #[tokio::test(start_paused = true)]
    async fn exit_key_stops_within_one_tick() {
        let tick = Duration::from_secs(1);
        let cancel = Cancellation::new();
        let mut sched = scheduler(tick, cancel.clone());
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let (_tx, mut rx) = notice_channel();

        let trigger = async {
            tokio::time::sleep(Duration::from_millis(2500)).await;
            cancel.cancel(CancelSource::ExitKey);
            Instant::now()
        };
        let (result, cancelled_at) = tokio::join!(sched.run(&mut terminal, &mut rx), trigger);
        result.unwrap();

        assert!(Instant::now() - cancelled_at < tick);
        assert_eq!(sched.state(), SchedulerState::Stopped);
        // Frames at 0s, 1s and 2s.
        assert_eq!(sched.frames_drawn(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_before_start_draws_nothing() {
        let cancel = Cancellation::new();
        cancel.cancel(CancelSource::Interrupt);
        let mut sched = scheduler(Duration::from_secs(1), cancel);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let (_tx, mut rx) = notice_channel();

        sched.run(&mut terminal, &mut rx).await.unwrap();
        assert_eq!(sched.frames_drawn(), 0);
        assert_eq!(sched.state(), SchedulerState::Stopped);
    }

    #[tokio::test(start_paused = true)]
    async fn resize_notices_do_not_draw() {
        let cancel = Cancellation::new();
        let mut sched = scheduler(Duration::from_secs(10), cancel.clone());
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let (tx, mut rx) = notice_channel();

        let trigger = async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            tx.send(Notice::Resize).unwrap();
            tx.send(Notice::Resize).unwrap();
            tokio::time::sleep(Duration::from_millis(100)).await;
            cancel.cancel(CancelSource::ExitKey);
        };
        let (result, ()) = tokio::join!(sched.run(&mut terminal, &mut rx), trigger);
        result.unwrap();
        assert_eq!(sched.frames_drawn(), 1);
    }

    #[test]
    fn resize_notice_resyncs_viewport() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.backend_mut().resize(40, 12);
        handle_notice(&mut terminal, Notice::Resize).unwrap();
        assert_eq!(terminal.get_frame().area(), Rect::new(0, 0, 40, 12));
    }

    #[tokio::test(start_paused = true)]
    async fn closed_notice_channel_keeps_ticking() {
        let cancel = Cancellation::new();
        let mut sched = scheduler(Duration::from_millis(500), cancel.clone());
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let (tx, mut rx) = notice_channel();
        drop(tx);

        let trigger = async {
            tokio::time::sleep(Duration::from_millis(1200)).await;
            cancel.cancel(CancelSource::Terminate);
        };
        let (result, ()) = tokio::join!(sched.run(&mut terminal, &mut rx), trigger);
        result.unwrap();
        assert_eq!(sched.frames_drawn(), 3);
    }
}
