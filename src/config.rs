/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::food::{default_catalog, FoodKind};

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub game: PlayConfig,
    pub effects: EffectsConfig,
    pub food: Vec<FoodKind>,
    pub gamepad: GamepadConfig,
    pub high_score_file: PathBuf,
    pub log_file: PathBuf,
    /// File the settings came from; None when running on defaults.
    pub source: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct PlayConfig {
    pub tick_rate_ms: u64,
    pub tile_count: i32,
    pub cell_px: f32,      // pixel edge of one tile on the draw surface
    pub start_x: i32,
    pub start_y: i32,
}

#[derive(Clone, Debug)]
pub struct EffectsConfig {
    pub explosion_count: usize,
    pub celebration_count: usize,
    pub life_step: f32,    // life lost per tick; 0.02 = 50 ticks
    pub particle_radius: f32,
}

#[derive(Clone, Debug)]
pub struct GamepadConfig {
    pub confirm: Vec<String>,
    pub pause: Vec<String>,
    pub cancel: Vec<String>,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    game: TomlGame,
    #[serde(default)]
    effects: TomlEffects,
    #[serde(default)]
    food: Vec<TomlFood>,
    #[serde(default)]
    gamepad: TomlGamepad,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlGame {
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
    #[serde(default = "default_tile_count")]
    tile_count: i32,
    #[serde(default = "default_cell_px")]
    cell_px: f32,
    #[serde(default = "default_start")]
    start_x: i32,
    #[serde(default = "default_start")]
    start_y: i32,
}

#[derive(Deserialize, Debug)]
struct TomlEffects {
    #[serde(default = "default_explosion_count")]
    explosion_count: usize,
    #[serde(default = "default_celebration_count")]
    celebration_count: usize,
    #[serde(default = "default_life_step")]
    life_step: f32,
    #[serde(default = "default_particle_radius")]
    particle_radius: f32,
}

#[derive(Deserialize, Debug)]
struct TomlFood {
    glyph: String,
    reward: u32,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_confirm")]
    confirm: Vec<String>,
    #[serde(default = "default_pause")]
    pause: Vec<String>,
    #[serde(default = "default_cancel")]
    cancel: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_high_score_file")]
    high_score_file: String,
    #[serde(default = "default_log_file")]
    log_file: String,
}

// ── Defaults ──

fn default_tick_rate() -> u64 { 100 }
fn default_tile_count() -> i32 { 20 }
fn default_cell_px() -> f32 { 20.0 }
fn default_start() -> i32 { 5 }
fn default_explosion_count() -> usize { 20 }
fn default_celebration_count() -> usize { 50 }
fn default_life_step() -> f32 { 0.02 }
fn default_particle_radius() -> f32 { 3.0 }

fn default_confirm() -> Vec<String> { vec!["A".into(), "Start".into()] }
fn default_pause() -> Vec<String> { vec!["Start".into()] }
fn default_cancel() -> Vec<String> { vec!["Select".into()] }
fn default_high_score_file() -> String { "highscore.dat".into() }
fn default_log_file() -> String { "snakeburst.log".into() }

impl Default for TomlGame {
    fn default() -> Self {
        TomlGame {
            tick_rate_ms: default_tick_rate(),
            tile_count: default_tile_count(),
            cell_px: default_cell_px(),
            start_x: default_start(),
            start_y: default_start(),
        }
    }
}

impl Default for TomlEffects {
    fn default() -> Self {
        TomlEffects {
            explosion_count: default_explosion_count(),
            celebration_count: default_celebration_count(),
            life_step: default_life_step(),
            particle_radius: default_particle_radius(),
        }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad {
            confirm: default_confirm(),
            pause: default_pause(),
            cancel: default_cancel(),
        }
    }
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral {
            high_score_file: default_high_score_file(),
            log_file: default_log_file(),
        }
    }
}

// ── Loading ──

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::from_toml(TomlConfig::default())
    }
}

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let search_dirs = candidate_dirs();
        let (toml_cfg, source) = load_toml(&search_dirs);
        GameConfig { source, ..GameConfig::from_toml(toml_cfg) }
    }

    #[cfg(test)]
    fn parse(text: &str) -> Result<Self, toml::de::Error> {
        let cfg = toml::from_str::<TomlConfig>(text)?;
        Ok(GameConfig::from_toml(cfg))
    }

    fn from_toml(cfg: TomlConfig) -> Self {
        // Board must hold at least the start tile; values are clamped, not rejected
        let tile_count = cfg.game.tile_count.max(1);
        let food: Vec<FoodKind> = cfg.food.into_iter()
            .filter(|f| !f.glyph.is_empty())
            .map(|f| FoodKind { glyph: f.glyph, reward: f.reward })
            .collect();

        GameConfig {
            game: PlayConfig {
                tick_rate_ms: cfg.game.tick_rate_ms.max(1),
                tile_count,
                cell_px: if cfg.game.cell_px > 0.0 { cfg.game.cell_px } else { default_cell_px() },
                start_x: cfg.game.start_x.clamp(0, tile_count - 1),
                start_y: cfg.game.start_y.clamp(0, tile_count - 1),
            },
            effects: EffectsConfig {
                explosion_count: cfg.effects.explosion_count,
                celebration_count: cfg.effects.celebration_count,
                life_step: if cfg.effects.life_step > 0.0 { cfg.effects.life_step } else { default_life_step() },
                particle_radius: cfg.effects.particle_radius,
            },
            food: if food.is_empty() { default_catalog() } else { food },
            gamepad: GamepadConfig {
                confirm: cfg.gamepad.confirm,
                pause: cfg.gamepad.pause,
                cancel: cfg.gamepad.cancel,
            },
            high_score_file: PathBuf::from(cfg.general.high_score_file),
            log_file: PathBuf::from(cfg.general.log_file),
            source: None,
        }
    }
}

/// Candidate directories to search: exe dir + CWD + system paths (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    // 3. XDG data home (~/.local/share/snakeburst)
    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/snakeburst");
        if xdg.is_dir() && !dirs.iter().any(|d| d == &xdg) {
            dirs.push(xdg);
        }
    }

    // 4. System data directory
    let sys = PathBuf::from("/usr/share/snakeburst");
    if sys.is_dir() && !dirs.iter().any(|d| d == &sys) {
        dirs.push(sys);
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
/// Runs before the logger exists, so problems go to stderr.
fn load_toml(search_dirs: &[PathBuf]) -> (TomlConfig, Option<PathBuf>) {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return (cfg, Some(path)),
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return (TomlConfig::default(), None);
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    (TomlConfig::default(), None)
}
