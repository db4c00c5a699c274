use super::constants::{
    BACKGROUND_COLOR, FOOD_COLOR, GLOW_BLUR, GRID_ALPHA, GRID_COLOR, HEAD_EYE_COLOR,
    SNAKE_BODY_COLOR, SNAKE_GLOW_COLOR, SNAKE_HEAD_COLOR, SPECIAL_FOOD_COLORS,
};
use super::particles::particle_alpha;
use super::simulation::GameState;
use crate::config::{GameConfig, RenderProfile};
use serde::Serialize;

const HEAD_PULSE_RATE: f64 = 0.5;
const HEAD_PULSE_PX: f64 = 2.0;
const PARTICLE_RADIUS: f64 = 2.0;
const SPARKLE_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Glow {
    pub color: &'static str,
    pub blur: f64,
}

/// A canvas-like drawing target of known pixel size.
pub trait Surface {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &'static str, alpha: f64);
    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: &'static str, alpha: f64, width: f64);
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &'static str, alpha: f64);
    fn set_glow(&mut self, glow: Option<Glow>);
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawCommand {
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: &'static str,
        alpha: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: &'static str,
        alpha: f64,
        width: f64,
    },
    Circle {
        x: f64,
        y: f64,
        r: f64,
        color: &'static str,
        alpha: f64,
    },
    Glow {
        glow: Option<Glow>,
    },
}

/// Records draw calls so a remote canvas can replay them.
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}

impl Surface for DrawList {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &'static str, alpha: f64) {
        self.commands.push(DrawCommand::Rect {
            x,
            y,
            w: width,
            h: height,
            color,
            alpha,
        });
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: &'static str, alpha: f64, width: f64) {
        self.commands.push(DrawCommand::Line {
            x1: from.0,
            y1: from.1,
            x2: to.0,
            y2: to.1,
            color,
            alpha,
            width,
        });
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &'static str, alpha: f64) {
        self.commands.push(DrawCommand::Circle {
            x,
            y,
            r: radius,
            color,
            alpha,
        });
    }

    fn set_glow(&mut self, glow: Option<Glow>) {
        self.commands.push(DrawCommand::Glow { glow });
    }
}

/// Background and grid only; drawn while no game exists.
pub fn render_board<S: Surface + ?Sized>(config: &GameConfig, surface: &mut S) {
    let width = config.canvas_width as f64;
    let height = config.canvas_height as f64;
    let cell = config.cell_size.max(1) as f64;

    surface.set_glow(None);
    surface.fill_rect(0.0, 0.0, width, height, BACKGROUND_COLOR, 1.0);

    let mut x = 0.0;
    while x <= width {
        surface.line((x, 0.0), (x, height), GRID_COLOR, GRID_ALPHA, 1.0);
        x += cell;
    }
    let mut y = 0.0;
    while y <= height {
        surface.line((0.0, y), (width, y), GRID_COLOR, GRID_ALPHA, 1.0);
        y += cell;
    }
}

/// Full redraw of `state`. Reads the state only.
pub fn render<S: Surface + ?Sized>(state: &GameState, profile: &RenderProfile, surface: &mut S) {
    render_board(&state.config, surface);
    let cell = state.config.cell_size as f64;
    let phase = state.tick as f64;

    for particle in state.particles.iter().step_by(profile.particle_stride.max(1)) {
        surface.fill_circle(
            particle.x,
            particle.y,
            PARTICLE_RADIUS,
            particle.color,
            particle_alpha(particle),
        );
    }

    if profile.glow {
        surface.set_glow(Some(Glow {
            color: SNAKE_GLOW_COLOR,
            blur: GLOW_BLUR,
        }));
    }
    for segment in state.snake.iter().skip(1) {
        surface.fill_rect(
            segment.x as f64 * cell + 1.0,
            segment.y as f64 * cell + 1.0,
            cell - 2.0,
            cell - 2.0,
            SNAKE_BODY_COLOR,
            1.0,
        );
    }
    if let Some(head) = state.snake.front() {
        let size = (cell - 2.0 + (phase * HEAD_PULSE_RATE).sin() * HEAD_PULSE_PX).max(1.0);
        let center_x = head.x as f64 * cell + cell / 2.0;
        let center_y = head.y as f64 * cell + cell / 2.0;
        surface.fill_rect(
            center_x - size / 2.0,
            center_y - size / 2.0,
            size,
            size,
            SNAKE_HEAD_COLOR,
            1.0,
        );
        surface.fill_circle(center_x, center_y, (cell / 6.0).max(1.0), HEAD_EYE_COLOR, 1.0);
    }

    let food = state.food;
    let food_x = food.position.x as f64 * cell + cell / 2.0;
    let food_y = food.position.y as f64 * cell + cell / 2.0;
    let food_radius = (cell / 2.0 - 2.0).max(1.0);
    let food_color = if food.is_special() {
        SPECIAL_FOOD_COLORS[(state.tick as usize) % SPECIAL_FOOD_COLORS.len()]
    } else {
        FOOD_COLOR
    };
    if profile.glow {
        surface.set_glow(Some(Glow {
            color: food_color,
            blur: GLOW_BLUR,
        }));
    }
    surface.fill_circle(food_x, food_y, food_radius, food_color, 1.0);

    if food.is_special() && profile.sparkles {
        for index in 0..SPARKLE_COUNT {
            let angle = phase * 0.3 + index as f64 * std::f64::consts::TAU / SPARKLE_COUNT as f64;
            surface.fill_circle(
                food_x + angle.cos() * cell * 0.75,
                food_y + angle.sin() * cell * 0.75,
                1.5,
                HEAD_EYE_COLOR,
                0.8,
            );
        }
    }

    surface.set_glow(None);
}
