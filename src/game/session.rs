mod driver;
mod io;

pub use driver::LoopHandle;
pub use io::{LatestFrame, SessionIo};

use super::controller::SessionController;
use super::input::{direction_from_key, direction_from_swipe, PendingDirection};
use super::render::DrawList;
use super::simulation::TickOutcome;
use super::types::{Direction, SessionStats};
use crate::config::{ConfigOverrides, DeviceProfile, GameConfig};
use crate::protocol::{self, ClientMessage, ServerMessage};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use tokio::sync::{mpsc, Mutex};
use uuid::Uuid;

/// One player's game, hosted for the lifetime of a connection.
#[derive(Debug)]
pub struct Session {
    id: String,
    base_config: GameConfig,
    default_profile: DeviceProfile,
    controller: Mutex<SessionController>,
    input: Arc<PendingDirection>,
    frames: Arc<LatestFrame>,
    events: mpsc::UnboundedSender<String>,
    loop_handle: StdMutex<Option<LoopHandle>>,
}

impl Session {
    pub fn new(base_config: GameConfig, default_profile: DeviceProfile) -> (Arc<Self>, SessionIo) {
        let input = Arc::new(PendingDirection::new());
        let frames = Arc::new(LatestFrame::new());
        let (events, events_rx) = mpsc::unbounded_channel();
        let controller = SessionController::new(
            base_config.clone(),
            default_profile.render_profile(),
            Arc::clone(&input),
        );
        let session = Arc::new(Self {
            id: Uuid::new_v4().to_string(),
            base_config,
            default_profile,
            controller: Mutex::new(controller),
            input,
            frames: Arc::clone(&frames),
            events,
            loop_handle: StdMutex::new(None),
        });
        let io = SessionIo {
            frames,
            events_rx,
        };
        (session, io)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns `false` once the connection should be closed.
    pub async fn handle_text_message(self: &Arc<Self>, text: &str) -> bool {
        let Some(message) = protocol::decode_client_message(text) else {
            return true;
        };
        match message {
            ClientMessage::Start { config, profile } => {
                if let Err(error) = self.start(config, profile).await {
                    tracing::warn!(session_id = %self.id, %error, "rejected start configuration");
                    return self.send_event(&ServerMessage::Error {
                        error: error.to_string(),
                    });
                }
            }
            ClientMessage::Stop => {
                self.stop().await;
            }
            ClientMessage::Key { key } => {
                if let Some(direction) = direction_from_key(&key) {
                    self.propose_direction(direction);
                }
            }
            ClientMessage::Swipe {
                start_x,
                start_y,
                x,
                y,
            } => {
                if let Some(direction) = direction_from_swipe(start_x, start_y, x, y) {
                    self.propose_direction(direction);
                }
            }
            ClientMessage::Direction { direction } => {
                self.propose_direction(direction);
            }
        }
        true
    }

    pub fn propose_direction(&self, direction: Direction) -> bool {
        self.input.propose(direction)
    }

    pub async fn start(
        self: &Arc<Self>,
        overrides: Option<ConfigOverrides>,
        profile: Option<DeviceProfile>,
    ) -> anyhow::Result<()> {
        let config = match overrides {
            Some(overrides) => overrides.apply(&self.base_config)?,
            None => self.base_config.clone(),
        };
        let profile = profile.unwrap_or(self.default_profile);

        self.cancel_loop();
        let stats = {
            let mut controller = self.controller.lock().await;
            controller.start(config, profile.render_profile());
            self.publish_frame(&controller);
            controller.stats()
        };
        tracing::info!(session_id = %self.id, ?profile, "game started");
        self.send_event(&ServerMessage::Stats { stats });
        self.ensure_loop();
        Ok(())
    }

    pub async fn stop(&self) {
        self.cancel_loop();
        let stats = {
            let mut controller = self.controller.lock().await;
            controller.stop();
            controller.stats()
        };
        self.send_event(&ServerMessage::Stats { stats });
    }

    pub async fn stats(&self) -> SessionStats {
        self.controller.lock().await.stats()
    }

    pub async fn tick_count(&self) -> u64 {
        self.controller.lock().await.tick_count()
    }

    fn cancel_loop(&self) {
        if let Some(handle) = self.loop_handle.lock().unwrap().take() {
            handle.cancel();
        }
    }

    fn ensure_loop(self: &Arc<Self>) {
        let session = Arc::clone(self);
        let handle = LoopHandle::spawn(move |cancelled| async move {
            loop {
                let interval = session.controller.lock().await.interval();
                tokio::time::sleep(interval).await;
                if cancelled.load(Ordering::SeqCst) {
                    break;
                }
                let mut controller = session.controller.lock().await;
                if cancelled.load(Ordering::SeqCst) {
                    break;
                }
                let Some(outcome) = controller.tick() else { break };
                session.publish_frame(&controller);
                if let TickOutcome::GameOver(cause) = outcome {
                    let stats = controller.stats();
                    drop(controller);
                    tracing::info!(session_id = %session.id, score = stats.score, ?cause, "game over");
                    session.send_event(&ServerMessage::GameOver {
                        score: stats.score,
                        high_score: stats.high_score,
                        cause,
                    });
                    break;
                }
            }
        });
        if let Some(previous) = self.loop_handle.lock().unwrap().replace(handle) {
            previous.cancel();
        }
    }

    fn publish_frame(&self, controller: &SessionController) {
        let mut list = DrawList::new();
        controller.render(&mut list);
        let payload = protocol::encode_server_message(&ServerMessage::Frame {
            tick: controller.tick_count(),
            stats: controller.stats(),
            commands: list.into_commands(),
        });
        self.frames.store(payload);
    }

    fn send_event(&self, message: &ServerMessage) -> bool {
        self.events
            .send(protocol::encode_server_message(message))
            .is_ok()
    }
}

#[cfg(test)]
mod tests;
