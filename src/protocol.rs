use crate::config::{ConfigOverrides, DeviceProfile};
use crate::game::render::DrawCommand;
use crate::game::types::{Direction, GameOverCause, SessionStats};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
  Start {
    #[serde(default)]
    config: Option<ConfigOverrides>,
    #[serde(default)]
    profile: Option<DeviceProfile>,
  },
  Stop,
  Key {
    key: String,
  },
  Swipe {
    #[serde(rename = "startX")]
    start_x: f64,
    #[serde(rename = "startY")]
    start_y: f64,
    x: f64,
    y: f64,
  },
  Direction {
    direction: Direction,
  },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
  Frame {
    tick: u64,
    stats: SessionStats,
    commands: Vec<DrawCommand>,
  },
  Stats {
    stats: SessionStats,
  },
  GameOver {
    score: u32,
    #[serde(rename = "highScore")]
    high_score: u32,
    cause: GameOverCause,
  },
  Error {
    error: String,
  },
}

pub fn decode_client_message(text: &str) -> Option<ClientMessage> {
  serde_json::from_str(text).ok()
}

pub fn encode_server_message(message: &ServerMessage) -> String {
  match serde_json::to_string(message) {
    Ok(payload) => payload,
    Err(error) => {
      tracing::warn!(?error, "failed to encode server message");
      String::new()
    }
  }
}
