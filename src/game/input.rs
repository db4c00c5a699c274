use super::constants::SWIPE_MIN_DISTANCE;
use super::types::Direction;
use std::sync::Mutex as StdMutex;

pub fn direction_from_key(key: &str) -> Option<Direction> {
    match key {
        "ArrowUp" | "w" | "W" => Some(Direction::Up),
        "ArrowDown" | "s" | "S" => Some(Direction::Down),
        "ArrowLeft" | "a" | "A" => Some(Direction::Left),
        "ArrowRight" | "d" | "D" => Some(Direction::Right),
        _ => None,
    }
}

/// Reduces a gesture from `(start_x, start_y)` to `(x, y)` to a direction.
/// The dominant axis wins; ties go to the vertical axis.
pub fn direction_from_swipe(start_x: f64, start_y: f64, x: f64, y: f64) -> Option<Direction> {
    let dx = x - start_x;
    let dy = y - start_y;
    if !dx.is_finite() || !dy.is_finite() {
        return None;
    }
    if dx.abs().max(dy.abs()) < SWIPE_MIN_DISTANCE {
        return None;
    }
    if dx.abs() > dy.abs() {
        Some(if dx > 0.0 { Direction::Right } else { Direction::Left })
    } else {
        Some(if dy > 0.0 { Direction::Down } else { Direction::Up })
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct DirectionState {
    pending: Direction,
    committed: Direction,
}

/// The only state shared between the input side and the simulation.
///
/// Input writes `pending` (last valid write wins); the simulation calls
/// [`PendingDirection::commit`] once per tick.
#[derive(Debug, Default)]
pub struct PendingDirection {
    inner: StdMutex<DirectionState>,
}

impl PendingDirection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `candidate` unless it reverses the committed direction.
    pub fn propose(&self, candidate: Direction) -> bool {
        if candidate.is_idle() {
            return false;
        }
        let mut state = self.inner.lock().unwrap();
        if candidate == state.committed.opposite() && !state.committed.is_idle() {
            return false;
        }
        state.pending = candidate;
        true
    }

    pub fn commit(&self) -> Direction {
        let mut state = self.inner.lock().unwrap();
        state.committed = state.pending;
        state.committed
    }

    pub fn reset(&self) {
        *self.inner.lock().unwrap() = DirectionState::default();
    }

    #[cfg(test)]
    pub fn pending(&self) -> Direction {
        self.inner.lock().unwrap().pending
    }

    #[cfg(test)]
    pub fn committed(&self) -> Direction {
        self.inner.lock().unwrap().committed
    }
}
