//! The auto-advance ticker task.
//!
//! A recurring, cancelable wake-up: while armed it delivers
//! [`Message::Tick`] to the engine loop every `period`. Stopping is
//! two-layered — the watch channel asks the task to exit cleanly and the
//! retained `JoinHandle` aborts it outright — and the generation tag on
//! every tick means even a message already sitting in the channel when the
//! ticker is replaced is discarded on arrival. Changing cadence is stop +
//! re-arm; the playback index is never touched by arming.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::debug;

use crate::message::Message;

/// Handle to one armed ticker task.
pub struct TickerHandle {
    generation: u64,
    shutdown_tx: watch::Sender<bool>,
    task: tokio::task::JoinHandle<()>,
}

impl TickerHandle {
    /// The generation this ticker tags its ticks with.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Stop the ticker. Signals a clean exit, then aborts so no tick can
    /// fire after this returns.
    pub fn stop(self) {
        let _ = self.shutdown_tx.send(true);
        self.task.abort();
    }
}

impl std::fmt::Debug for TickerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickerHandle")
            .field("generation", &self.generation)
            .field("finished", &self.task.is_finished())
            .finish()
    }
}

/// Spawn a ticker that sends `Message::Tick { generation }` every `period`.
///
/// The loop runs until:
/// - the shutdown channel receives `true` (ticker replaced or stopped), or
/// - `msg_tx` is closed (engine loop shutting down).
pub fn spawn_ticker(
    generation: u64,
    period: Duration,
    msg_tx: mpsc::Sender<Message>,
) -> TickerHandle {
    // Create the shutdown channel outside the task so both ends are
    // available before the task starts running.
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // The first tick of a tokio interval completes immediately; consume
        // it so the cadence is one full period after arming.
        interval.tick().await;

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if msg_tx.send(Message::Tick { generation }).await.is_err() {
                        // Engine loop is gone.
                        break;
                    }
                }

                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        debug!("ticker generation {generation} stopped");
                        break;
                    }
                }
            }
        }
    });

    TickerHandle {
        generation,
        shutdown_tx,
        task,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_ticks_arrive_at_the_period() {
        let (tx, mut rx) = mpsc::channel(16);
        let armed_at = tokio::time::Instant::now();
        let ticker = spawn_ticker(7, Duration::from_millis(100), tx);

        // Nothing before the first full period.
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());

        let first = rx.recv().await.unwrap();
        assert_eq!(first, Message::Tick { generation: 7 });
        assert!(armed_at.elapsed() >= Duration::from_millis(100));

        let second = rx.recv().await.unwrap();
        assert_eq!(second, Message::Tick { generation: 7 });

        ticker.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_prevents_further_ticks() {
        let (tx, mut rx) = mpsc::channel(16);
        let ticker = spawn_ticker(1, Duration::from_millis(50), tx);

        let _ = rx.recv().await.unwrap();
        ticker.stop();

        // Drain anything already queued, then the channel must stay quiet:
        // the sender side is gone once the task is stopped.
        tokio::time::sleep(Duration::from_millis(500)).await;
        while rx.try_recv().is_ok() {}
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_exits_when_receiver_drops() {
        let (tx, rx) = mpsc::channel(16);
        let ticker = spawn_ticker(1, Duration::from_millis(50), tx);
        drop(rx);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(ticker.task.is_finished());
    }
}
