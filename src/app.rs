// Drives a DrawEngine on the host task and manages the resize watcher around
// the engine lifecycle: the watcher runs only while the engine is running.
use anyhow::{Context, Result, anyhow};
use log::{debug, info};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::input::{DrawEngine, EngineError, EngineEvent, Handled, ResizeEvent};
use crate::resize::{ResizeWatcher, ViewportNotifier};
use crate::util::Viewport;

/// How long a published resize may take to come back from the watcher.
pub const RESIZE_FORWARD_TIMEOUT: Duration = Duration::from_secs(2);

/// Host-side owner of the engine and its resize watcher.
pub struct Host {
    engine: DrawEngine,
    notifier: ViewportNotifier,
    runtime: Handle,
    watcher: Option<ResizeWatcher>,
    resize_events: Option<mpsc::UnboundedReceiver<ResizeEvent>>,
}

impl Host {
    pub fn new(engine: DrawEngine, notifier: ViewportNotifier, runtime: Handle) -> Self {
        Self {
            engine,
            notifier,
            runtime,
            watcher: None,
            resize_events: None,
        }
    }

    pub fn engine(&self) -> &DrawEngine {
        &self.engine
    }

    pub fn notifier(&self) -> &ViewportNotifier {
        &self.notifier
    }

    /// Whether resize notifications are currently being forwarded.
    pub fn is_watching(&self) -> bool {
        self.watcher.is_some()
    }

    /// Feeds one event to the engine and reconciles the watcher with the new state.
    pub fn dispatch(&mut self, event: EngineEvent) -> Result<Handled, EngineError> {
        let result = self.engine.handle(event);
        self.sync_watcher();
        result
    }

    fn sync_watcher(&mut self) {
        if self.engine.is_running() && self.watcher.is_none() {
            let (watcher, events) = ResizeWatcher::spawn(&self.runtime, &self.notifier);
            self.watcher = Some(watcher);
            self.resize_events = Some(events);
            debug!("Resize watcher started");
        } else if !self.engine.is_running() && self.watcher.is_some() {
            // Dropping aborts the task and releases the subscription
            self.watcher = None;
            self.resize_events = None;
            info!("Resize watcher stopped, engine no longer running");
        }
    }

    /// Delivers every resize event the watcher has already forwarded.
    pub fn pump_resizes(&mut self) -> Result<usize, EngineError> {
        let mut delivered = 0;
        while let Some(event) = self
            .resize_events
            .as_mut()
            .and_then(|events| events.try_recv().ok())
        {
            self.dispatch(event.into())?;
            delivered += 1;
        }
        Ok(delivered)
    }

    /// Publishes a viewport change the way a window would, then waits for the
    /// watcher to forward it and hands it to the engine.
    pub async fn publish_resize(&mut self, viewport: Viewport) -> Result<Handled> {
        let events = self
            .resize_events
            .as_mut()
            .ok_or_else(|| anyhow!("Resize watcher is not running"))?;

        self.notifier.notify(viewport);
        let event = tokio::time::timeout(RESIZE_FORWARD_TIMEOUT, events.recv())
            .await
            .context("Timed out waiting for resize event")?
            .ok_or_else(|| anyhow!("Resize watcher stopped unexpectedly"))?;

        Ok(self.dispatch(event.into())?)
    }

    /// Stops the watcher and hands the engine back.
    pub async fn shutdown(mut self) -> DrawEngine {
        self.resize_events = None;
        if let Some(watcher) = self.watcher.take() {
            watcher.shutdown().await;
        }
        self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeybindingsConfig;
    use crate::draw::DrawingSurface;
    use crate::input::{EngineSettings, InteractionState};

    fn host() -> Host {
        let action_map = KeybindingsConfig::default().build_action_map().unwrap();
        let engine = DrawEngine::new(EngineSettings::default(), action_map);
        Host::new(engine, ViewportNotifier::default(), Handle::current())
    }

    #[tokio::test]
    async fn watcher_follows_running_state() {
        let mut host = host();
        assert!(!host.is_watching());
        assert_eq!(host.notifier().receiver_count(), 0);

        host.dispatch(EngineEvent::SurfaceReady(DrawingSurface::new(40, 30).unwrap()))
            .unwrap();
        assert!(host.is_watching());
        assert_eq!(host.notifier().receiver_count(), 1);

        let notifier = host.notifier().clone();
        let engine = host.shutdown().await;
        assert!(engine.is_running());
        assert_eq!(notifier.receiver_count(), 0);
    }

    #[tokio::test]
    async fn watcher_never_starts_after_surface_failure() {
        let mut host = host();
        let err = host
            .dispatch(EngineEvent::SurfaceUnavailable("lost context".to_string()))
            .unwrap_err();
        assert_eq!(err, EngineError::SurfaceUnavailable("lost context".to_string()));
        assert!(!host.is_watching());
        assert!(host.publish_resize(Viewport::new(10, 10)).await.is_err());
    }

    #[tokio::test]
    async fn published_resize_reaches_engine() {
        let mut host = host();
        host.dispatch(EngineEvent::SurfaceReady(DrawingSurface::new(40, 30).unwrap()))
            .unwrap();
        host.dispatch(EngineEvent::PointerDown(crate::util::Point::new(1.0, 1.0)))
            .unwrap();

        let handled = host.publish_resize(Viewport::new(64, 48)).await.unwrap();
        assert_eq!(handled, Handled::Applied);

        let surface = host.engine().surface().unwrap();
        assert_eq!((surface.width(), surface.height()), (64, 48));
        assert_eq!(host.engine().interaction(), Some(InteractionState::Line));
    }

    #[tokio::test]
    async fn pump_delivers_forwarded_resizes() {
        let mut host = host();
        host.dispatch(EngineEvent::SurfaceReady(DrawingSurface::new(40, 30).unwrap()))
            .unwrap();

        host.notifier().notify(Viewport::new(50, 50));
        host.notifier().notify(Viewport::new(60, 60));
        // Yield so the watcher task can forward both notifications
        tokio::time::timeout(RESIZE_FORWARD_TIMEOUT, async {
            while host.engine().surface().unwrap().width() != 60 {
                tokio::task::yield_now().await;
                host.pump_resizes().unwrap();
            }
        })
        .await
        .unwrap();
        assert_eq!(host.engine().surface().unwrap().height(), 60);
    }
}
