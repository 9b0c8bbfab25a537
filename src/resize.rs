//! Viewport resize notifications bridged into engine events.
//!
//! Hosts publish window size changes on a [`ViewportNotifier`]. While the
//! engine is running, a [`ResizeWatcher`] background task listens to it and
//! forwards every notification as a [`ResizeEvent`] on an unbounded channel
//! that the host drains into the engine on its own task.

use crate::input::ResizeEvent;
use crate::util::Viewport;
use log::{debug, warn};
use tokio::runtime::Handle;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Broadcast buffer used by [`ViewportNotifier::default`].
pub const DEFAULT_NOTIFIER_CAPACITY: usize = 16;

/// Host-side publisher of viewport size changes.
#[derive(Debug, Clone)]
pub struct ViewportNotifier {
    sender: broadcast::Sender<Viewport>,
}

impl ViewportNotifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes a new viewport size. Returns how many subscribers will see it.
    pub fn notify(&self, viewport: Viewport) -> usize {
        self.sender.send(viewport).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Viewport> {
        self.sender.subscribe()
    }

    /// Number of live subscriptions.
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ViewportNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFIER_CAPACITY)
    }
}

/// Background task forwarding viewport notifications as resize events.
///
/// Dropping the watcher aborts the task, which releases its subscription.
pub struct ResizeWatcher {
    task: Option<JoinHandle<()>>,
}

impl ResizeWatcher {
    /// Subscribes to `notifier` and spawns the forwarding task.
    ///
    /// The subscription is taken before this returns, so no notification
    /// published afterwards is missed.
    pub fn spawn(
        runtime_handle: &Handle,
        notifier: &ViewportNotifier,
    ) -> (Self, mpsc::UnboundedReceiver<ResizeEvent>) {
        let mut notifications = notifier.subscribe();
        let (event_tx, event_rx) = mpsc::unbounded_channel::<ResizeEvent>();

        let task = runtime_handle.spawn(async move {
            loop {
                match notifications.recv().await {
                    Ok(viewport) => {
                        debug!(
                            "Viewport changed to {}x{}",
                            viewport.width, viewport.height
                        );
                        if event_tx.send(ResizeEvent { viewport }).is_err() {
                            debug!("Resize event receiver dropped, stopping watcher");
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!("Resize watcher fell behind, skipped {} notification(s)", skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        debug!("Viewport notifier closed, stopping watcher");
                        break;
                    }
                }
            }
        });

        (Self { task: Some(task) }, event_rx)
    }

    /// Whether the forwarding task is still alive.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stops the task and waits until its subscription is released.
    pub async fn shutdown(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            match task.await {
                Ok(()) => debug!("Resize watcher already finished"),
                Err(err) if err.is_cancelled() => debug!("Resize watcher stopped"),
                Err(err) => warn!("Resize watcher ended abnormally: {}", err),
            }
        }
    }
}

impl Drop for ResizeWatcher {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    const WAIT: Duration = Duration::from_secs(2);

    async fn next_event(events: &mut mpsc::UnboundedReceiver<ResizeEvent>) -> Option<ResizeEvent> {
        timeout(WAIT, events.recv()).await.ok().flatten()
    }

    #[tokio::test]
    async fn forwards_every_notification_in_order() {
        let notifier = ViewportNotifier::default();
        let (watcher, mut events) = ResizeWatcher::spawn(&Handle::current(), &notifier);
        assert!(watcher.is_running());

        let sizes = [
            Viewport::new(800, 600),
            Viewport::new(1024, 768),
            Viewport::new(1024, 768),
        ];
        for size in sizes {
            assert_eq!(notifier.notify(size), 1);
        }

        for size in sizes {
            assert_eq!(next_event(&mut events).await, Some(ResizeEvent { viewport: size }));
        }
        watcher.shutdown().await;
    }

    #[tokio::test]
    async fn shutdown_releases_subscription() {
        let notifier = ViewportNotifier::default();
        let (watcher, mut events) = ResizeWatcher::spawn(&Handle::current(), &notifier);
        assert_eq!(notifier.receiver_count(), 1);

        watcher.shutdown().await;
        assert_eq!(notifier.receiver_count(), 0);
        assert_eq!(notifier.notify(Viewport::new(10, 10)), 0);
        assert_eq!(next_event(&mut events).await, None);
    }

    #[tokio::test]
    async fn drop_releases_subscription() {
        let notifier = ViewportNotifier::default();
        let (watcher, _events) = ResizeWatcher::spawn(&Handle::current(), &notifier);
        assert_eq!(notifier.receiver_count(), 1);

        drop(watcher);
        timeout(WAIT, async {
            while notifier.receiver_count() > 0 {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("subscription was not released");
    }

    #[tokio::test]
    async fn closed_notifier_stops_watcher() {
        let notifier = ViewportNotifier::default();
        let (watcher, mut events) = ResizeWatcher::spawn(&Handle::current(), &notifier);

        drop(notifier);
        assert_eq!(next_event(&mut events).await, None);
        assert!(!watcher.is_running());
    }

    #[tokio::test]
    async fn lagged_notifications_are_skipped() {
        let notifier = ViewportNotifier::new(1);
        let (watcher, mut events) = ResizeWatcher::spawn(&Handle::current(), &notifier);

        // The current-thread runtime has not polled the task yet, so the
        // single-slot buffer overflows.
        notifier.notify(Viewport::new(100, 100));
        notifier.notify(Viewport::new(200, 200));
        notifier.notify(Viewport::new(300, 300));

        assert_eq!(
            next_event(&mut events).await,
            Some(ResizeEvent {
                viewport: Viewport::new(300, 300)
            })
        );
        watcher.shutdown().await;
    }
}
