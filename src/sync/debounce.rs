//! Debounced values.
//!
//! A [`Debounced`] value only settles once its input has been quiet for the
//! configured delay. Each push cancels the pending single-shot timer and
//! starts a new one, so only the last value inside a burst takes effect.
//! Timers run on the ambient tokio runtime.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// A value whose updates are delayed until input quiesces.
pub struct Debounced<T> {
    delay: Duration,
    settled: Arc<watch::Sender<T>>,
    timer: Option<JoinHandle<()>>,
}

impl<T> Debounced<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Creates a debounced value that starts settled at `initial`.
    pub fn new(initial: T, delay: Duration) -> Self {
        let (settled, _) = watch::channel(initial);
        Self {
            delay,
            settled: Arc::new(settled),
            timer: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `value` to settle after the delay, cancelling any pending value.
    ///
    /// Must be called from within a tokio runtime.
    pub fn push(&mut self, value: T) {
        self.cancel();

        if self.delay.is_zero() {
            publish(&self.settled, value);
            return;
        }

        let settled = Arc::clone(&self.settled);
        let delay = self.delay;
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            publish(&settled, value);
        }));
    }

    /// Settles `value` immediately, cancelling any pending value.
    pub fn flush(&mut self, value: T) {
        self.cancel();
        publish(&self.settled, value);
    }

    /// The most recently settled value.
    pub fn settled(&self) -> T {
        self.settled.borrow().clone()
    }

    /// Whether a value is waiting for its timer.
    pub fn is_pending(&self) -> bool {
        self.timer.as_ref().is_some_and(|timer| !timer.is_finished())
    }

    /// Subscribes to settled values. The receiver is notified only when the
    /// settled value actually changes.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.settled.subscribe()
    }

    fn cancel(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl<T> Drop for Debounced<T> {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

fn publish<T: PartialEq>(sender: &watch::Sender<T>, value: T) {
    sender.send_if_modified(|current| {
        if *current == value {
            false
        } else {
            *current = value;
            true
        }
    });
}
