//! Application actor.
//!
//! [`App`] owns the timer engine and the display-mode coordinator. Every
//! mutation happens on its single task: commands from [`AppHandle`]s, the
//! one-second tick interval and the completion-message deadline are
//! serialized through one `select!` loop. After each step a fresh
//! [`TimerSnapshot`] is published on a watch channel.

use std::future;

use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::time::{interval_at, sleep_until, Duration, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::timer::{TimerEngine, TimerEvent};
use crate::appearance::{FsImageLoader, ImageLoader};
use crate::completion::CompletionDispatcher;
use crate::types::{DisplayMode, SessionType, TimerConfig, TimerMode, TimerSnapshot};
use crate::window::{SurfaceHost, SurfaceStyle, WindowManager};

/// Tick period of the running timer.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

// ============================================================================
// AppCommand
// ============================================================================

/// Commands accepted by the application actor.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Toggle,
    Reset,
    SwitchSession(SessionType),
    SetMode(TimerMode),
    /// Load a Work countdown of the given minutes
    QuickFocus(u32),
    SetRemaining {
        minutes: u32,
        seconds: u32,
    },
    /// Replace the settings; rejected if validation fails
    UpdateConfig(Box<TimerConfig>),
    SetSessionLabel {
        session: SessionType,
        label: String,
    },
    /// Fire the completion action once without changing the session
    TestCompletion,
    DismissMessage,
    SwitchDisplay(DisplayMode),
    CloseOverlay,
    OpenSettings,
    /// Stop the actor
    Shutdown,
}

// ============================================================================
// AppHandle
// ============================================================================

/// Error returned when the actor is no longer running.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("the timer has shut down")]
pub struct AppClosed;

/// Cloneable handle for sending commands and observing snapshots.
#[derive(Debug, Clone)]
pub struct AppHandle {
    command_tx: mpsc::UnboundedSender<AppCommand>,
    snapshot_rx: watch::Receiver<TimerSnapshot>,
}

impl AppHandle {
    /// Queues a command for the actor.
    ///
    /// # Errors
    ///
    /// Returns [`AppClosed`] if the actor has stopped.
    pub fn send(&self, command: AppCommand) -> Result<(), AppClosed> {
        self.command_tx.send(command).map_err(|_| AppClosed)
    }

    /// Latest published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> TimerSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// A receiver that is notified on every published snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshot_rx.clone()
    }
}

// ============================================================================
// AppServices
// ============================================================================

/// Collaborators injected into the actor.
pub struct AppServices {
    pub dispatcher: CompletionDispatcher,
    pub host: Box<dyn SurfaceHost>,
    pub image_loader: Box<dyn ImageLoader>,
}

impl AppServices {
    /// Services with the file-system image loader.
    pub fn new(dispatcher: CompletionDispatcher, host: Box<dyn SurfaceHost>) -> Self {
        Self {
            dispatcher,
            host,
            image_loader: Box::new(FsImageLoader),
        }
    }

    #[must_use]
    pub fn with_image_loader(mut self, loader: Box<dyn ImageLoader>) -> Self {
        self.image_loader = loader;
        self
    }
}

// ============================================================================
// App
// ============================================================================

/// Single owner of the timer state and the active display mode.
pub struct App {
    engine: TimerEngine,
    windows: WindowManager,
    image_loader: Box<dyn ImageLoader>,
    command_tx: mpsc::UnboundedSender<AppCommand>,
    command_rx: mpsc::UnboundedReceiver<AppCommand>,
    snapshot_tx: watch::Sender<TimerSnapshot>,
    snapshot_rx: watch::Receiver<TimerSnapshot>,
    /// Interval backing the engine's tick subscription
    ticker: Option<(u64, Interval)>,
}

impl App {
    /// Creates the actor and the receiver for its timer events.
    pub fn new(
        config: TimerConfig,
        services: AppServices,
    ) -> (Self, mpsc::UnboundedReceiver<TimerEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        let engine = TimerEngine::new(config, services.dispatcher, event_tx);
        let windows = WindowManager::new(services.host);
        let (snapshot_tx, snapshot_rx) = watch::channel(engine.snapshot(windows.active_mode()));

        let app = Self {
            engine,
            windows,
            image_loader: services.image_loader,
            command_tx,
            command_rx,
            snapshot_tx,
            snapshot_rx,
            ticker: None,
        };
        (app, event_rx)
    }

    /// Returns a handle for this actor.
    pub fn handle(&self) -> AppHandle {
        AppHandle {
            command_tx: self.command_tx.clone(),
            snapshot_rx: self.snapshot_rx.clone(),
        }
    }

    /// Runs until [`AppCommand::Shutdown`] arrives.
    ///
    /// Returns the final snapshot.
    pub async fn run(mut self) -> TimerSnapshot {
        info!("App started");
        let style = self.surface_style();
        self.windows.present(&style);
        self.publish();

        loop {
            let deadline = self.engine.message_deadline();

            tokio::select! {
                command = self.command_rx.recv() => {
                    // The actor keeps a sender, so the channel never closes on its own.
                    let Some(command) = command else { break };
                    if !self.apply(command) {
                        break;
                    }
                }
                id = next_tick(&mut self.ticker) => {
                    debug!(subscription = id, "Tick");
                    self.engine.tick();
                }
                () = wait_until(deadline) => {
                    self.engine.expire_message(Instant::now());
                }
            }

            self.sync_ticker();
            self.publish();
        }

        info!("App stopped");
        self.engine.snapshot(self.windows.active_mode())
    }

    /// Applies one command. Returns `false` on shutdown.
    fn apply(&mut self, command: AppCommand) -> bool {
        debug!(?command, "Command received");

        match command {
            AppCommand::Toggle => self.engine.toggle(),
            AppCommand::Reset => self.engine.reset(),
            AppCommand::SwitchSession(session) => self.engine.switch_session(session),
            AppCommand::SetMode(mode) => self.engine.set_mode(mode),
            AppCommand::QuickFocus(minutes) => self.engine.quick_focus(minutes),
            AppCommand::SetRemaining { minutes, seconds } => {
                self.engine.set_remaining(minutes, seconds);
            }
            AppCommand::UpdateConfig(config) => match config.validate() {
                Ok(()) => self.engine.update_config(*config),
                Err(e) => warn!("Rejected configuration: {}", e),
            },
            AppCommand::SetSessionLabel { session, label } => {
                self.engine.set_session_label(session, label);
            }
            AppCommand::TestCompletion => {
                let outcome = self.engine.test_completion();
                debug!(?outcome, "Test completion");
            }
            AppCommand::DismissMessage => self.engine.dismiss_message(),
            AppCommand::SwitchDisplay(mode) => {
                let style = self.surface_style();
                self.windows.switch_to(mode, &style);
            }
            AppCommand::CloseOverlay => self.windows.close_overlay(),
            AppCommand::OpenSettings => self.windows.open_settings(),
            AppCommand::Shutdown => return false,
        }
        true
    }

    /// Matches the interval to the engine's tick subscription.
    ///
    /// A new subscription gets a fresh interval whose first tick is one
    /// period away; a cancelled one drops the interval immediately.
    fn sync_ticker(&mut self) {
        match (self.engine.tick_subscription(), &self.ticker) {
            (Some(id), Some((current, _))) if *current == id => {}
            (Some(id), _) => {
                let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                self.ticker = Some((id, interval));
            }
            (None, Some(_)) => self.ticker = None,
            (None, None) => {}
        }
    }

    fn surface_style(&self) -> SurfaceStyle {
        let preset = self.engine.selected_gradient();
        SurfaceStyle {
            overlay: self.engine.config().overlay.clone(),
            background: self.engine.background(self.image_loader.as_ref()),
            colors: preset.colors,
        }
    }

    fn publish(&self) {
        self.snapshot_tx
            .send_replace(self.engine.snapshot(self.windows.active_mode()));
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("engine", &self.engine)
            .field("windows", &self.windows)
            .finish_non_exhaustive()
    }
}

async fn next_tick(ticker: &mut Option<(u64, Interval)>) -> u64 {
    match ticker {
        Some((id, interval)) => {
            interval.tick().await;
            *id
        }
        None => future::pending().await,
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => future::pending().await,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use crate::completion::{MockAlert, MockSpeech};
    use crate::sound::MockSoundPlayer;
    use crate::types::CompletionAction;
    use crate::window::{HostCall, MockSurfaceHost, PanelKind};

    struct Harness {
        app: App,
        handle: AppHandle,
        host: Rc<MockSurfaceHost>,
        alert: Rc<MockAlert>,
        _events: mpsc::UnboundedReceiver<TimerEvent>,
    }

    fn harness(config: TimerConfig) -> Harness {
        let host = Rc::new(MockSurfaceHost::new());
        let alert = Rc::new(MockAlert::new());
        let dispatcher = CompletionDispatcher::new(
            Rc::new(MockSoundPlayer::new()),
            Box::new(MockSpeech::new()),
            Box::new(Rc::clone(&alert)),
        );
        let services = AppServices::new(dispatcher, Box::new(Rc::clone(&host)));
        let (app, events) = App::new(config, services);
        let handle = app.handle();
        Harness {
            app,
            handle,
            host,
            alert,
            _events: events,
        }
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_and_tick() {
        let h = harness(TimerConfig::default());
        let handle = h.handle.clone();

        let driver = async move {
            handle.send(AppCommand::Toggle).unwrap();
            tokio::time::sleep(Duration::from_millis(3500)).await;
            let snapshot = handle.snapshot();
            handle.send(AppCommand::Shutdown).unwrap();
            snapshot
        };

        let (_, snapshot) = tokio::join!(h.app.run(), driver);
        assert!(snapshot.is_running);
        assert_eq!(snapshot.pomodoro_remaining_seconds, 1497);
        assert_eq!(snapshot.formatted_time, "24:57");
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_stops_ticks() {
        let h = harness(TimerConfig::default());
        let handle = h.handle.clone();

        let driver = async move {
            handle.send(AppCommand::Toggle).unwrap();
            tokio::time::sleep(Duration::from_millis(2500)).await;
            handle.send(AppCommand::Toggle).unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
            handle.send(AppCommand::Shutdown).unwrap();
        };

        let (final_snapshot, ()) = tokio::join!(h.app.run(), driver);
        assert!(!final_snapshot.is_running);
        assert_eq!(final_snapshot.pomodoro_remaining_seconds, 1498);
    }

    #[tokio::test(start_paused = true)]
    async fn test_message_auto_dismiss() {
        let config = TimerConfig::default()
            .with_completion_action(CompletionAction::ShowMessage)
            .with_completion_text("Done");
        let h = harness(config);
        let handle = h.handle.clone();

        let driver = async move {
            handle.send(AppCommand::TestCompletion).unwrap();
            settle().await;
            let shown = handle.snapshot();
            tokio::time::sleep(Duration::from_secs(5)).await;
            let hidden = handle.snapshot();
            handle.send(AppCommand::Shutdown).unwrap();
            (shown, hidden)
        };

        let (_, (shown, hidden)) = tokio::join!(h.app.run(), driver);
        assert!(shown.is_showing_completion_message);
        assert_eq!(shown.completion_message_text, "Done");
        assert!(!hidden.is_showing_completion_message);
    }

    #[tokio::test(start_paused = true)]
    async fn test_display_switch_updates_snapshot() {
        let h = harness(TimerConfig::default());
        let handle = h.handle.clone();
        let host = Rc::clone(&h.host);

        let driver = async move {
            handle
                .send(AppCommand::SwitchDisplay(DisplayMode::Overlay))
                .unwrap();
            settle().await;
            let snapshot = handle.snapshot();
            handle.send(AppCommand::Shutdown).unwrap();
            snapshot
        };

        let (_, snapshot) = tokio::join!(h.app.run(), driver);
        assert_eq!(snapshot.display_mode, DisplayMode::Overlay);
        assert!(matches!(
            host.calls().as_slice(),
            [
                HostCall::ShowMainWindow,
                HostCall::HideMainWindow,
                HostCall::ShowPanel(PanelKind::Overlay, _)
            ]
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_config_rejected() {
        let h = harness(TimerConfig::default());
        let handle = h.handle.clone();

        let driver = async move {
            let config = TimerConfig::default().with_work_minutes(0);
            handle.send(AppCommand::UpdateConfig(Box::new(config))).unwrap();
            handle.send(AppCommand::Reset).unwrap();
            settle().await;
            let snapshot = handle.snapshot();
            handle.send(AppCommand::Shutdown).unwrap();
            snapshot
        };

        let (_, snapshot) = tokio::join!(h.app.run(), driver);
        assert_eq!(snapshot.pomodoro_remaining_seconds, 1500);
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_after_shutdown_fails() {
        let h = harness(TimerConfig::default());
        let handle = h.handle.clone();
        handle.send(AppCommand::Shutdown).unwrap();

        h.app.run().await;

        assert_eq!(handle.send(AppCommand::Toggle), Err(AppClosed));
        assert_eq!(h.alert.beep_count(), 0);
    }
}
