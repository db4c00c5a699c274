use super::input::PendingDirection;
use super::render::{render, render_board, Surface};
use super::simulation::{GameState, TickOutcome};
use super::types::{GameOverCause, Phase, SessionStats};
use crate::config::{GameConfig, RenderProfile};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;

/// Idle -> Running -> GameOver -> Running state machine for one player.
#[derive(Debug)]
pub struct SessionController {
  config: GameConfig,
  profile: RenderProfile,
  phase: Phase,
  game: Option<GameState>,
  high_score: u32,
  last_cause: Option<GameOverCause>,
  input: Arc<PendingDirection>,
}

impl SessionController {
  pub fn new(config: GameConfig, profile: RenderProfile, input: Arc<PendingDirection>) -> Self {
    Self {
      config,
      profile,
      phase: Phase::Idle,
      game: None,
      high_score: 0,
      last_cause: None,
      input,
    }
  }

  pub fn start(&mut self, config: GameConfig, profile: RenderProfile) {
    self.start_with_rng(config, profile, StdRng::from_entropy());
  }

  pub fn start_with_rng(&mut self, config: GameConfig, profile: RenderProfile, rng: StdRng) {
    self.input.reset();
    self.game = Some(GameState::new(config.clone(), Arc::clone(&self.input), rng));
    self.config = config;
    self.profile = profile;
    self.phase = Phase::Running;
    self.last_cause = None;
    tracing::debug!(phase = ?self.phase, high_score = self.high_score, "session started");
  }

  /// Ends a running game without recording a high score.
  pub fn stop(&mut self) {
    if self.phase == Phase::Running {
      self.game = None;
      self.phase = Phase::Idle;
      tracing::debug!("session stopped");
    }
  }

  /// Runs one simulation step. Returns `None` unless the session is running.
  pub fn tick(&mut self) -> Option<TickOutcome> {
    if self.phase != Phase::Running {
      return None;
    }
    let game = self.game.as_mut()?;
    let outcome = game.step();
    if let TickOutcome::GameOver(cause) = outcome {
      let score = game.score;
      self.high_score = self.high_score.max(score);
      self.phase = Phase::GameOver;
      self.last_cause = Some(cause);
      tracing::debug!(?cause, score, high_score = self.high_score, "game over");
    }
    Some(outcome)
  }

  pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
    match &self.game {
      Some(game) => render(game, &self.profile, surface),
      None => render_board(&self.config, surface),
    }
  }

  pub fn phase(&self) -> Phase {
    self.phase
  }

  #[cfg(test)]
  pub fn game_mut(&mut self) -> Option<&mut GameState> {
    self.game.as_mut()
  }

  pub fn high_score(&self) -> u32 {
    self.high_score
  }

  pub fn tick_count(&self) -> u64 {
    self.game.as_ref().map(|game| game.tick).unwrap_or(0)
  }

  pub fn interval(&self) -> Duration {
    let millis = self
      .game
      .as_ref()
      .map(|game| game.interval_ms)
      .unwrap_or(self.config.base_interval_ms);
    Duration::from_millis(millis.max(1))
  }

  pub fn stats(&self) -> SessionStats {
    let (score, level, interval_ms) = match &self.game {
      Some(game) => (game.score, game.level, game.interval_ms),
      None => (0, 1, self.config.base_interval_ms),
    };
    SessionStats {
      phase: self.phase,
      score,
      level,
      high_score: self.high_score,
      game_over: self.phase == Phase::GameOver,
      last_cause: self.last_cause,
      interval_ms,
    }
  }
}
