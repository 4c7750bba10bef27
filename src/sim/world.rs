/// WorldState: the single owned snapshot of a running game.
///
/// Everything the tick mutates lives here: snake, committed and pending
/// direction, food, particles, score, background and phase. The tick and
/// the input commands take `&mut WorldState`; nothing else holds state.
///
/// ## Direction
///
/// Input writes `pending`; the tick commits it to `direction` before
/// moving. The reversal guard compares against the committed direction,
/// so two quick presses between ticks can never fold the snake onto itself.

use rand::rngs::StdRng;
use rand::Rng;

use crate::config::{EffectsConfig, GameConfig};
use crate::domain::food::{generate_food, Food, FoodKind};
use crate::domain::grid::{Direction, Position};
use crate::domain::palette::{self, Rgb};
use crate::domain::particle::{Burst, Origin, ParticleSystem};
use crate::domain::snake::Snake;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Running,
    Paused,
    GameOver,
}

pub struct WorldState {
    // ── Board ──
    pub tile_count: i32,
    pub cell_px: f32,
    pub start: Position,

    // ── Entities ──
    pub snake: Snake,
    pub direction: Direction,
    pub pending: Direction,
    pub food: Food,
    pub catalog: Vec<FoodKind>,
    pub particles: ParticleSystem,
    pub effects: EffectsConfig,

    // ── Scoring ──
    pub score: u32,
    pub high_score: u32,
    pub new_high_score: bool,

    // ── Meta ──
    pub phase: Phase,
    pub background: Rgb,

    rng: StdRng,
}

// ── Construction ──

impl WorldState {
    pub fn new(config: &GameConfig, high_score: u32, mut rng: StdRng) -> Self {
        let tile_count = config.game.tile_count;
        let catalog = config.food.clone();
        let food = generate_food(&mut rng, tile_count, &catalog);
        let start = Position::new(config.game.start_x, config.game.start_y);

        WorldState {
            tile_count,
            cell_px: config.game.cell_px,
            start,
            snake: Snake::new(start),
            direction: Direction::Right,
            pending: Direction::Right,
            food,
            catalog,
            particles: ParticleSystem::new(config.effects.life_step),
            effects: config.effects.clone(),
            score: 0,
            high_score,
            new_high_score: false,
            phase: Phase::Running,
            background: palette::WHITE,
            rng,
        }
    }

    /// Back to a fresh Running game. High score is kept.
    pub fn restart(&mut self) {
        self.snake = Snake::new(self.start);
        self.direction = Direction::Right;
        self.pending = Direction::Right;
        self.score = 0;
        self.new_high_score = false;
        self.background = palette::WHITE;
        self.particles.clear();
        self.respawn_food();
        self.phase = Phase::Running;
    }
}

// ── Queries ──

impl WorldState {
    /// Edge of the square draw surface in pixels.
    pub fn surface_px(&self) -> f32 {
        self.tile_count as f32 * self.cell_px
    }

    /// Pixel centre of the snake head.
    pub fn head_px(&self) -> (f32, f32) {
        self.snake.head().pixel_center(self.cell_px)
    }
}

// ── Randomised mutations (the only users of the rng) ──

impl WorldState {
    pub fn respawn_food(&mut self) {
        self.food = generate_food(&mut self.rng, self.tile_count, &self.catalog);
    }

    pub fn resample_background(&mut self) {
        self.background = palette::BACKGROUNDS[self.rng.gen_range(0..palette::BACKGROUNDS.len())];
    }

    /// Even ring of particles from the centre of `tile`.
    pub fn spawn_explosion(&mut self, tile: Position) {
        let (x, y) = tile.pixel_center(self.cell_px);
        let burst = Burst::explosion(self.effects.explosion_count);
        self.particles.spawn_burst(&mut self.rng, Origin::Point(x, y), &burst);
    }

    /// Random scatter over the whole surface.
    pub fn spawn_celebration(&mut self) {
        let size = self.surface_px();
        let burst = Burst::celebration(self.effects.celebration_count);
        let origin = Origin::Anywhere { width: size, height: size };
        self.particles.spawn_burst(&mut self.rng, origin, &burst);
    }
}
