use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
  pub x: i32,
  pub y: i32,
}

impl Position {
  pub const fn new(x: i32, y: i32) -> Self {
    Self { x, y }
  }

  pub fn offset(self, direction: Direction) -> Self {
    let (dx, dy) = direction.vector();
    Self {
      x: self.x + dx,
      y: self.y + dy,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
  #[default]
  Idle,
  Up,
  Down,
  Left,
  Right,
}

impl Direction {
  pub fn vector(self) -> (i32, i32) {
    match self {
      Direction::Idle => (0, 0),
      Direction::Up => (0, -1),
      Direction::Down => (0, 1),
      Direction::Left => (-1, 0),
      Direction::Right => (1, 0),
    }
  }

  pub fn opposite(self) -> Self {
    match self {
      Direction::Idle => Direction::Idle,
      Direction::Up => Direction::Down,
      Direction::Down => Direction::Up,
      Direction::Left => Direction::Right,
      Direction::Right => Direction::Left,
    }
  }

  pub fn is_idle(self) -> bool {
    self == Direction::Idle
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bounds {
  pub max_x: i32,
  pub max_y: i32,
}

impl Bounds {
  pub fn contains(&self, position: Position) -> bool {
    position.x >= 0 && position.y >= 0 && position.x <= self.max_x && position.y <= self.max_y
  }

  pub fn cell_count(&self) -> usize {
    ((self.max_x + 1) as usize) * ((self.max_y + 1) as usize)
  }

  pub fn center(&self) -> Position {
    Position::new(self.max_x / 2, self.max_y / 2)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Food {
  pub position: Position,
  /// Ticks left while this food is worth the special bonus.
  pub special_remaining: Option<u32>,
}

impl Food {
  pub fn regular(position: Position) -> Self {
    Self {
      position,
      special_remaining: None,
    }
  }

  pub fn is_special(&self) -> bool {
    self.special_remaining.is_some()
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Particle {
  pub x: f64,
  pub y: f64,
  pub vx: f64,
  pub vy: f64,
  pub life: u32,
  pub max_life: u32,
  pub color: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GameOverCause {
  Wall,
  SelfCollision,
  BoardFull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
  #[default]
  Idle,
  Running,
  GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
  pub phase: Phase,
  pub score: u32,
  pub level: u32,
  pub high_score: u32,
  pub game_over: bool,
  pub last_cause: Option<GameOverCause>,
  pub interval_ms: u64,
}
