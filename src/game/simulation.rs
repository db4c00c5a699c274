use super::constants::{FOOD_SCORE, POINTS_PER_LEVEL, SPECIAL_FOOD_MULTIPLIER};
use super::grid::pick_free_cell;
use super::input::PendingDirection;
use super::particles::{advance_particles, spawn_burst};
use super::types::{Bounds, Direction, Food, GameOverCause, Particle, Position};
use crate::config::GameConfig;
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
  Continue { ate: bool },
  GameOver(GameOverCause),
}

pub fn level_for(score: u32) -> u32 {
  score / POINTS_PER_LEVEL + 1
}

/// Entity model of one running game. Only [`GameState::step`] mutates it.
#[derive(Debug)]
pub struct GameState {
  pub config: GameConfig,
  pub bounds: Bounds,
  pub snake: VecDeque<Position>,
  pub direction: Direction,
  pub food: Food,
  pub particles: Vec<Particle>,
  pub score: u32,
  pub level: u32,
  pub interval_ms: u64,
  pub tick: u64,
  input: Arc<PendingDirection>,
  rng: StdRng,
}

impl GameState {
  pub fn new(config: GameConfig, input: Arc<PendingDirection>, mut rng: StdRng) -> Self {
    let bounds = config.bounds();
    let start = bounds.center();
    let occupied: HashSet<Position> = [start].into_iter().collect();
    let food_position = pick_free_cell(&occupied, bounds, &mut rng).unwrap_or(Position::new(0, 0));
    let interval_ms = config.base_interval_ms;
    Self {
      config,
      bounds,
      snake: VecDeque::from([start]),
      direction: Direction::Idle,
      food: Food::regular(food_position),
      particles: Vec::new(),
      score: 0,
      level: 1,
      interval_ms,
      tick: 0,
      input,
      rng,
    }
  }

  pub fn head(&self) -> Position {
    self.snake.front().copied().unwrap_or(Position::new(0, 0))
  }

  pub fn occupied(&self) -> HashSet<Position> {
    self.snake.iter().copied().collect()
  }

  /// Advances the game by one tick.
  pub fn step(&mut self) -> TickOutcome {
    self.tick += 1;
    self.direction = self.input.commit();
    if self.direction.is_idle() {
      advance_particles(&mut self.particles);
      return TickOutcome::Continue { ate: false };
    }

    let next = self.head().offset(self.direction);
    if !self.bounds.contains(next) {
      return TickOutcome::GameOver(GameOverCause::Wall);
    }

    let eating = next == self.food.position;
    // The tail cell counts as occupied unless tail chasing is enabled and the tail will move.
    let tail_index = self.snake.len() - 1;
    let tail_vacates = self.config.allow_tail_chase && !eating;
    let hits_self = self
      .snake
      .iter()
      .enumerate()
      .any(|(index, segment)| *segment == next && !(tail_vacates && index == tail_index));
    if hits_self {
      return TickOutcome::GameOver(GameOverCause::SelfCollision);
    }

    self.snake.push_front(next);

    if eating {
      if let Some(cause) = self.eat_food() {
        return TickOutcome::GameOver(cause);
      }
    } else {
      self.snake.pop_back();
    }

    if let Some(remaining) = self.food.special_remaining {
      let remaining = remaining.saturating_sub(1);
      self.food.special_remaining = if remaining > 0 { Some(remaining) } else { None };
    }

    advance_particles(&mut self.particles);
    TickOutcome::Continue { ate: eating }
  }

  fn eat_food(&mut self) -> Option<GameOverCause> {
    let points = if self.food.is_special() {
      FOOD_SCORE * SPECIAL_FOOD_MULTIPLIER
    } else {
      FOOD_SCORE
    };
    self.score += points;

    let level = level_for(self.score);
    if level > self.level {
      let gained = (level - self.level) as u64;
      self.interval_ms = self
        .interval_ms
        .saturating_sub(self.config.interval_step_per_level_ms * gained)
        .max(self.config.min_interval_ms);
      self.level = level;
      tracing::debug!(level, interval_ms = self.interval_ms, "level up");
    }

    let cell = self.config.cell_size as f64;
    let center_x = self.food.position.x as f64 * cell + cell / 2.0;
    let center_y = self.food.position.y as f64 * cell + cell / 2.0;
    spawn_burst(
      &mut self.particles,
      center_x,
      center_y,
      self.config.particles_per_eat,
      self.config.particle_lifetime,
      &mut self.rng,
    );

    let occupied = self.occupied();
    let Some(position) = pick_free_cell(&occupied, self.bounds, &mut self.rng) else {
      return Some(GameOverCause::BoardFull);
    };
    let special = self.config.special_food_duration > 0
      && self.rng.gen_bool(self.config.special_food_chance.clamp(0.0, 1.0));
    self.food = Food {
      position,
      special_remaining: special.then_some(self.config.special_food_duration),
    };
    None
  }
}
