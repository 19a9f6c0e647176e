//! The post-order countdown that hands the kiosk to the next student.
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tracing::debug;

/// Counts down once per second from `seconds` to zero.
///
/// The remaining time is published on a `watch` channel. [`Countdown::finish_now`] jumps
/// straight to zero. Dropping the countdown stops it where it is; observers then see the
/// channel close without ever reaching zero.
pub struct Countdown {
    remaining: watch::Receiver<u32>,
    skip: Arc<Notify>,
    task: JoinHandle<()>,
}

impl Countdown {
    pub fn start(seconds: u32) -> Self {
        let (publisher, remaining) = watch::channel(seconds);
        let skip = Arc::new(Notify::new());
        let task = tokio::spawn(tick(seconds, publisher, skip.clone()));
        Self {
            remaining,
            skip,
            task,
        }
    }

    pub fn remaining(&self) -> u32 {
        *self.remaining.borrow()
    }

    pub fn watch(&self) -> watch::Receiver<u32> {
        self.remaining.clone()
    }

    /// Skips the rest of the countdown.
    pub fn finish_now(&self) {
        self.skip.notify_one();
    }

    /// Waits until zero is reached. Returns `false` if the countdown was cancelled first.
    pub async fn finished(&self) -> bool {
        let mut remaining = self.remaining.clone();
        let reached = remaining.wait_for(|s| *s == 0).await.is_ok();
        reached
    }

    pub fn cancel(&self) {
        self.task.abort();
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn tick(seconds: u32, publisher: watch::Sender<u32>, skip: Arc<Notify>) {
    let mut left = seconds;
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    // The first tick completes immediately.
    interval.tick().await;

    while left > 0 {
        tokio::select! {
            _ = interval.tick() => {
                left -= 1;
            }
            _ = skip.notified() => {
                debug!(left, "Countdown skipped");
                left = 0;
            }
        }
        publisher.send_replace(left);
    }
}
