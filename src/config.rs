use crate::game::constants::{
    BASE_INTERVAL_MS, CANVAS_HEIGHT, CANVAS_WIDTH, CELL_SIZE, INTERVAL_STEP_PER_LEVEL_MS,
    MAX_GRID_CELLS_PER_AXIS, MAX_INTERVAL_MS, MAX_PARTICLES_PER_EAT, MAX_PARTICLE_LIFETIME,
    MAX_SPECIAL_FOOD_DURATION, MIN_INTERVAL_MS, PARTICLES_PER_EAT, PARTICLE_LIFETIME,
    SPECIAL_FOOD_CHANCE, SPECIAL_FOOD_DURATION,
};
use crate::game::grid::bounds_for;
use crate::game::types::Bounds;
use anyhow::{bail, ensure};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub cell_size: u32,
    #[serde(rename = "baseInterval")]
    pub base_interval_ms: u64,
    #[serde(rename = "minInterval")]
    pub min_interval_ms: u64,
    #[serde(rename = "intervalStepPerLevel")]
    pub interval_step_per_level_ms: u64,
    pub special_food_chance: f64,
    pub special_food_duration: u32,
    pub particles_per_eat: usize,
    pub particle_lifetime: u32,
    pub allow_tail_chase: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            cell_size: CELL_SIZE,
            base_interval_ms: BASE_INTERVAL_MS,
            min_interval_ms: MIN_INTERVAL_MS,
            interval_step_per_level_ms: INTERVAL_STEP_PER_LEVEL_MS,
            special_food_chance: SPECIAL_FOOD_CHANCE,
            special_food_duration: SPECIAL_FOOD_DURATION,
            particles_per_eat: PARTICLES_PER_EAT,
            particle_lifetime: PARTICLE_LIFETIME,
            allow_tail_chase: false,
        }
    }
}

fn env_or<T: FromStr>(name: &str, fallback: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(fallback)
}

impl GameConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let allow_tail_chase = env::var("SNAKE_ALLOW_TAIL_CHASE")
            .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE"))
            .unwrap_or(defaults.allow_tail_chase);
        Self {
            canvas_width: env_or("SNAKE_CANVAS_WIDTH", defaults.canvas_width),
            canvas_height: env_or("SNAKE_CANVAS_HEIGHT", defaults.canvas_height),
            cell_size: env_or("SNAKE_CELL_SIZE", defaults.cell_size),
            base_interval_ms: env_or("SNAKE_BASE_INTERVAL_MS", defaults.base_interval_ms),
            min_interval_ms: env_or("SNAKE_MIN_INTERVAL_MS", defaults.min_interval_ms),
            interval_step_per_level_ms: env_or(
                "SNAKE_INTERVAL_STEP_MS",
                defaults.interval_step_per_level_ms,
            ),
            special_food_chance: env_or("SNAKE_SPECIAL_FOOD_CHANCE", defaults.special_food_chance),
            special_food_duration: env_or(
                "SNAKE_SPECIAL_FOOD_DURATION",
                defaults.special_food_duration,
            ),
            particles_per_eat: env_or("SNAKE_PARTICLES_PER_EAT", defaults.particles_per_eat),
            particle_lifetime: env_or("SNAKE_PARTICLE_LIFETIME", defaults.particle_lifetime),
            allow_tail_chase,
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.cell_size > 0, "cellSize must be positive");
        let columns = self.canvas_width / self.cell_size;
        let rows = self.canvas_height / self.cell_size;
        if columns < 2 || rows < 2 {
            bail!(
                "canvas {}x{} is smaller than two cells of {}px",
                self.canvas_width,
                self.canvas_height,
                self.cell_size
            );
        }
        if columns > MAX_GRID_CELLS_PER_AXIS || rows > MAX_GRID_CELLS_PER_AXIS {
            bail!(
                "grid {}x{} exceeds {} cells per axis",
                columns,
                rows,
                MAX_GRID_CELLS_PER_AXIS
            );
        }
        ensure!(self.min_interval_ms > 0, "minInterval must be positive");
        ensure!(
            self.base_interval_ms <= MAX_INTERVAL_MS,
            "baseInterval must be at most {MAX_INTERVAL_MS}ms"
        );
        ensure!(
            self.min_interval_ms <= self.base_interval_ms,
            "minInterval ({}) exceeds baseInterval ({})",
            self.min_interval_ms,
            self.base_interval_ms
        );
        ensure!(
            (0.0..=1.0).contains(&self.special_food_chance),
            "specialFoodChance must be within [0, 1]"
        );
        ensure!(
            self.special_food_duration <= MAX_SPECIAL_FOOD_DURATION,
            "specialFoodDuration must be at most {MAX_SPECIAL_FOOD_DURATION}"
        );
        ensure!(
            self.particles_per_eat <= MAX_PARTICLES_PER_EAT,
            "particlesPerEat must be at most {MAX_PARTICLES_PER_EAT}"
        );
        ensure!(
            (1..=MAX_PARTICLE_LIFETIME).contains(&self.particle_lifetime),
            "particleLifetime must be within [1, {MAX_PARTICLE_LIFETIME}]"
        );
        Ok(())
    }

    pub fn bounds(&self) -> Bounds {
        bounds_for(self.canvas_width, self.canvas_height, self.cell_size)
    }
}

/// Partial configuration a client may send with its start command.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverrides {
    pub canvas_width: Option<u32>,
    pub canvas_height: Option<u32>,
    pub cell_size: Option<u32>,
    #[serde(rename = "baseInterval")]
    pub base_interval_ms: Option<u64>,
    #[serde(rename = "minInterval")]
    pub min_interval_ms: Option<u64>,
    #[serde(rename = "intervalStepPerLevel")]
    pub interval_step_per_level_ms: Option<u64>,
    pub special_food_chance: Option<f64>,
    pub special_food_duration: Option<u32>,
    pub particles_per_eat: Option<usize>,
    pub particle_lifetime: Option<u32>,
    pub allow_tail_chase: Option<bool>,
}

impl ConfigOverrides {
    pub fn apply(&self, base: &GameConfig) -> anyhow::Result<GameConfig> {
        let config = GameConfig {
            canvas_width: self.canvas_width.unwrap_or(base.canvas_width),
            canvas_height: self.canvas_height.unwrap_or(base.canvas_height),
            cell_size: self.cell_size.unwrap_or(base.cell_size),
            base_interval_ms: self.base_interval_ms.unwrap_or(base.base_interval_ms),
            min_interval_ms: self.min_interval_ms.unwrap_or(base.min_interval_ms),
            interval_step_per_level_ms: self
                .interval_step_per_level_ms
                .unwrap_or(base.interval_step_per_level_ms),
            special_food_chance: self.special_food_chance.unwrap_or(base.special_food_chance),
            special_food_duration: self
                .special_food_duration
                .unwrap_or(base.special_food_duration),
            particles_per_eat: self.particles_per_eat.unwrap_or(base.particles_per_eat),
            particle_lifetime: self.particle_lifetime.unwrap_or(base.particle_lifetime),
            allow_tail_chase: self.allow_tail_chase.unwrap_or(base.allow_tail_chase),
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeviceProfile {
    #[default]
    Desktop,
    LowPower,
}

const MOBILE_MARKERS: [&str; 5] = ["Mobi", "Android", "iPhone", "iPad", "iPod"];

impl DeviceProfile {
    pub fn detect(user_agent: Option<&str>) -> Self {
        match user_agent {
            Some(agent) if MOBILE_MARKERS.iter().any(|marker| agent.contains(marker)) => {
                DeviceProfile::LowPower
            }
            _ => DeviceProfile::Desktop,
        }
    }

    pub fn render_profile(self) -> RenderProfile {
        match self {
            DeviceProfile::Desktop => RenderProfile {
                glow: true,
                particle_stride: 1,
                sparkles: true,
            },
            DeviceProfile::LowPower => RenderProfile {
                glow: false,
                particle_stride: 2,
                sparkles: false,
            },
        }
    }
}

/// Decorative detail only; never consulted by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderProfile {
    pub glow: bool,
    pub particle_stride: usize,
    pub sparkles: bool,
}

impl Default for RenderProfile {
    fn default() -> Self {
        DeviceProfile::Desktop.render_profile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GameConfig::default();
        config.validate().expect("defaults should validate");
        assert_eq!(config.bounds().max_x, 29);
        assert_eq!(config.bounds().max_y, 19);
    }

    #[test]
    fn overrides_merge_onto_base() {
        let overrides: ConfigOverrides =
            serde_json::from_str(r#"{"cellSize":40,"specialFoodChance":0.5}"#).unwrap();
        let config = overrides.apply(&GameConfig::default()).unwrap();
        assert_eq!(config.cell_size, 40);
        assert_eq!(config.special_food_chance, 0.5);
        assert_eq!(config.base_interval_ms, BASE_INTERVAL_MS);
    }

    #[test]
    fn invalid_overrides_are_rejected() {
        let overrides: ConfigOverrides =
            serde_json::from_str(r#"{"minInterval":500,"baseInterval":100}"#).unwrap();
        assert!(overrides.apply(&GameConfig::default()).is_err());

        let overrides: ConfigOverrides = serde_json::from_str(r#"{"cellSize":0}"#).unwrap();
        assert!(overrides.apply(&GameConfig::default()).is_err());

        let overrides: ConfigOverrides =
            serde_json::from_str(r#"{"specialFoodChance":1.5}"#).unwrap();
        assert!(overrides.apply(&GameConfig::default()).is_err());
    }

    #[test]
    fn oversized_overrides_are_rejected() {
        let base = GameConfig::default();
        for payload in [
            r#"{"canvasWidth":4294967295,"cellSize":1}"#,
            r#"{"canvasHeight":100000,"cellSize":1}"#,
            r#"{"particlesPerEat":1152921504606846976}"#,
            r#"{"particleLifetime":4294967295}"#,
            r#"{"specialFoodDuration":4294967295}"#,
            r#"{"baseInterval":18446744073709551615}"#,
        ] {
            let overrides: ConfigOverrides = serde_json::from_str(payload).unwrap();
            assert!(overrides.apply(&base).is_err(), "accepted {payload}");
        }

        let largest: ConfigOverrides =
            serde_json::from_str(r#"{"canvasWidth":500,"canvasHeight":500,"cellSize":1}"#)
                .unwrap();
        let config = largest.apply(&base).unwrap();
        assert_eq!(config.bounds().max_x, 499);
        assert_eq!(config.bounds().max_y, 499);
    }

    #[test]
    fn serializes_with_option_names() {
        let value = serde_json::to_value(GameConfig::default()).unwrap();
        assert_eq!(value["baseInterval"], 150);
        assert_eq!(value["particlesPerEat"], 12);
        assert_eq!(value["allowTailChase"], false);
    }

    #[test]
    fn mobile_user_agents_select_low_power() {
        let agent = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)";
        assert_eq!(DeviceProfile::detect(Some(agent)), DeviceProfile::LowPower);
        assert_eq!(DeviceProfile::detect(None), DeviceProfile::Desktop);
        assert!(!DeviceProfile::LowPower.render_profile().glow);
    }
}
