use super::constants::MAX_FOOD_PLACEMENT_ATTEMPTS;
use super::types::{Bounds, Position};
use rand::Rng;
use std::collections::HashSet;

/// Cell counts beyond `i32::MAX` saturate; `GameConfig::validate` keeps real
/// grids far below that.
pub fn bounds_for(canvas_width: u32, canvas_height: u32, cell_size: u32) -> Bounds {
    let cell = cell_size.max(1);
    let cells = |pixels: u32| i32::try_from(pixels / cell).unwrap_or(i32::MAX);
    Bounds {
        max_x: cells(canvas_width) - 1,
        max_y: cells(canvas_height) - 1,
    }
}

/// Picks a cell outside `occupied`, uniformly among the free cells.
///
/// Rejection sampling is tried first; after `MAX_FOOD_PLACEMENT_ATTEMPTS`
/// misses the whole board is scanned. Returns `None` only when the board is
/// full.
pub fn pick_free_cell<R: Rng + ?Sized>(
    occupied: &HashSet<Position>,
    bounds: Bounds,
    rng: &mut R,
) -> Option<Position> {
    if bounds.max_x < 0 || bounds.max_y < 0 {
        return None;
    }
    if occupied.len() < bounds.cell_count() {
        for _ in 0..MAX_FOOD_PLACEMENT_ATTEMPTS {
            let candidate = Position::new(
                rng.gen_range(0..=bounds.max_x),
                rng.gen_range(0..=bounds.max_y),
            );
            if !occupied.contains(&candidate) {
                return Some(candidate);
            }
        }
    }

    let free: Vec<Position> = (0..=bounds.max_y)
        .flat_map(|y| (0..=bounds.max_x).map(move |x| Position::new(x, y)))
        .filter(|position| !occupied.contains(position))
        .collect();
    if free.is_empty() {
        return None;
    }
    Some(free[rng.gen_range(0..free.len())])
}
