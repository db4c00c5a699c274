pub const CANVAS_WIDTH: u32 = 600;
pub const CANVAS_HEIGHT: u32 = 400;
pub const CELL_SIZE: u32 = 20;
pub const BASE_INTERVAL_MS: u64 = 150;
pub const MIN_INTERVAL_MS: u64 = 60;
pub const INTERVAL_STEP_PER_LEVEL_MS: u64 = 10;
pub const SPECIAL_FOOD_CHANCE: f64 = 0.1;
pub const SPECIAL_FOOD_DURATION: u32 = 50;
pub const PARTICLES_PER_EAT: usize = 12;
pub const PARTICLE_LIFETIME: u32 = 20;

pub const FOOD_SCORE: u32 = 10;
pub const SPECIAL_FOOD_MULTIPLIER: u32 = 5;
pub const POINTS_PER_LEVEL: u32 = 100;

pub const MAX_GRID_CELLS_PER_AXIS: u32 = 500;
pub const MAX_INTERVAL_MS: u64 = 10_000;
pub const MAX_SPECIAL_FOOD_DURATION: u32 = 10_000;
pub const MAX_PARTICLES_PER_EAT: usize = 256;
pub const MAX_PARTICLE_LIFETIME: u32 = 600;

pub const MAX_FOOD_PLACEMENT_ATTEMPTS: usize = 64;
pub const SWIPE_MIN_DISTANCE: f64 = 10.0;

pub const PARTICLE_MIN_SPEED: f64 = 1.0;
pub const PARTICLE_MAX_SPEED: f64 = 4.0;

pub const BACKGROUND_COLOR: &str = "#080010";
pub const GRID_COLOR: &str = "#00ffff";
pub const GRID_ALPHA: f64 = 0.2;
pub const SNAKE_HEAD_COLOR: &str = "#ff0050";
pub const SNAKE_BODY_COLOR: &str = "#ff00ff";
pub const SNAKE_GLOW_COLOR: &str = "#ff00ff";
pub const FOOD_COLOR: &str = "#00ffff";
pub const HEAD_EYE_COLOR: &str = "#ffff00";
pub const GLOW_BLUR: f64 = 10.0;

pub const PARTICLE_COLORS: [&str; 4] = ["#ff0050", "#ff00ff", "#00ffff", "#ffff00"];

pub const SPECIAL_FOOD_COLORS: [&str; 6] = [
  "#ff0050",
  "#ff5500",
  "#ffff00",
  "#00ff88",
  "#00ffff",
  "#ff00ff",
];
