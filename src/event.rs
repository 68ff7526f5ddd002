use std::io;
use std::ops::ControlFlow;

use crossterm::event::{Event, EventStream, KeyCode};
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;

use crate::action::{Action, map_event};
use crate::lifecycle::{CancelSource, Cancellation};

/// Messages from the input side to the frame scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    /// The viewport changed size; the backend must resync before the next draw.
    Resize,
}

pub fn notice_channel() -> (mpsc::UnboundedSender<Notice>, mpsc::UnboundedReceiver<Notice>) {
    mpsc::unbounded_channel()
}

/// Reads terminal events and turns them into cancellation or resize notices.
/// Never draws.
pub struct InputController {
    cancel: Cancellation,
    quit_key: KeyCode,
    notices: mpsc::UnboundedSender<Notice>,
}

impl InputController {
    pub fn new(
        cancel: Cancellation,
        quit_key: KeyCode,
        notices: mpsc::UnboundedSender<Notice>,
    ) -> Self {
        InputController {
            cancel,
            quit_key,
            notices,
        }
    }

    pub fn handle(&self, event: &Event) -> ControlFlow<()> {
        match map_event(event, self.quit_key) {
            Action::Quit => {
                self.cancel.cancel(CancelSource::ExitKey);
                ControlFlow::Break(())
            }
            Action::Resize => {
                // A closed channel means the scheduler already stopped.
                let _ = self.notices.send(Notice::Resize);
                ControlFlow::Continue(())
            }
            Action::None => ControlFlow::Continue(()),
        }
    }

    pub async fn run<S>(self, mut events: S)
    where
        S: Stream<Item = io::Result<Event>> + Unpin,
    {
        loop {
            tokio::select! {
                maybe_event = events.next() => {
                    match maybe_event {
                        Some(Ok(event)) => {
                            if self.handle(&event).is_break() {
                                return;
                            }
                        }
                        Some(Err(err)) => {
                            tracing::warn!(error = %err, "terminal event stream failed");
                            self.cancel.cancel(CancelSource::InputClosed);
                            return;
                        }
                        None => {
                            self.cancel.cancel(CancelSource::InputClosed);
                            return;
                        }
                    }
                }
                _ = self.cancel.cancelled() => return,
            }
        }
    }

    /// Runs the controller on crossterm's event stream in its own task.
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let reader = EventStream::new();
            self.run(reader).await;
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;

    fn key(code: KeyCode) -> io::Result<Event> {
        Ok(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    #[tokio::test]
    async fn resize_forwards_notice_and_exit_key_cancels() {
        let cancel = Cancellation::new();
        let (tx, mut rx) = notice_channel();
        let controller = InputController::new(cancel.clone(), KeyCode::Esc, tx);

        let events = futures::stream::iter(vec![
            Ok(Event::Resize(40, 12)),
            key(KeyCode::Char('x')),
            key(KeyCode::Esc),
            // Never reached: the controller returns on the exit key.
            Ok(Event::Resize(10, 5)),
        ]);
        controller.run(events).await;

        assert!(cancel.is_cancelled());
        assert_eq!(rx.recv().await, Some(Notice::Resize));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn stream_end_cancels() {
        let cancel = Cancellation::new();
        let (tx, _rx) = notice_channel();
        let controller = InputController::new(cancel.clone(), KeyCode::Esc, tx);

        controller.run(futures::stream::iter(Vec::new())).await;
        assert!(cancel.is_cancelled());
    }

    #[tokio::test]
    async fn stream_error_cancels() {
        let cancel = Cancellation::new();
        let (tx, _rx) = notice_channel();
        let controller = InputController::new(cancel.clone(), KeyCode::Esc, tx);

        let events = futures::stream::iter(vec![Err(io::Error::other("tty gone"))]);
        controller.run(events).await;
        assert!(cancel.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn returns_when_cancelled_elsewhere() {
        let cancel = Cancellation::new();
        let (tx, _rx) = notice_channel();
        let controller = InputController::new(cancel.clone(), KeyCode::Esc, tx);

        let task = tokio::spawn(controller.run(futures::stream::pending()));
        tokio::time::sleep(Duration::from_millis(5)).await;
        cancel.cancel(CancelSource::Interrupt);
        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("controller did not stop")
            .unwrap();
    }

    #[test]
    fn resize_after_scheduler_stopped_is_harmless() {
        let cancel = Cancellation::new();
        let (tx, rx) = notice_channel();
        drop(rx);
        let controller = InputController::new(cancel.clone(), KeyCode::Esc, tx);
        assert!(controller.handle(&Event::Resize(1, 1)).is_continue());
        assert!(!cancel.is_cancelled());
    }
}
