/// Paints one frame of the world onto a `Surface`.
///
/// Fixed order: background → snake → food → particles → pause glyph →
/// game-over text block. Pure with respect to the world; particle aging
/// happens in the tick, not here.

use crate::domain::palette::{self, Rgb};
use crate::sim::world::{Phase, WorldState};
use super::surface::{Align, Surface, TextStyle};

const SEGMENT_GAP: f32 = 2.0;
const PAUSE_GLYPH: &str = "⏸";

pub fn draw_frame(w: &WorldState, s: &mut dyn Surface) {
    let g = w.cell_px;
    let (sw, sh) = s.size();

    s.set_global_alpha(1.0);
    s.fill_rect(0.0, 0.0, sw, sh, w.background);

    for seg in w.snake.segments() {
        s.fill_rect(seg.x as f32 * g, seg.y as f32 * g, g - SEGMENT_GAP, g - SEGMENT_GAP, palette::SNAKE_GREEN);
    }

    let (fx, fy) = w.food.pos.pixel_center(g);
    s.fill_text(&w.food.kind.glyph, fx, fy, TextStyle::new(g, Align::Center, palette::BLACK));

    draw_particles(w, s);

    if w.phase == Phase::Paused {
        let style = TextStyle::new(24.0, Align::Start, palette::BLACK).with_alpha(0.7);
        s.fill_text(PAUSE_GLYPH, g, g, style);
    }

    if w.phase == Phase::GameOver {
        draw_game_over(w, s, sw, sh);
    }
}

fn draw_particles(w: &WorldState, s: &mut dyn Surface) {
    let radius = w.effects.particle_radius;
    for p in w.particles.iter() {
        s.set_global_alpha(p.life());
        s.fill_circle(p.x, p.y, radius, p.color);
    }
    s.set_global_alpha(1.0);
}

fn draw_game_over(w: &WorldState, s: &mut dyn Surface, sw: f32, sh: f32) {
    let ink: Rgb = palette::BLACK;
    let cx = sw / 2.0;
    let cy = sh / 2.0;

    let headline = if w.new_high_score { "New High Score!" } else { "Game Over!" };
    s.fill_text(headline, cx, cy, TextStyle::new(30.0, Align::Center, ink));
    s.fill_text(&format!("Score: {}", w.score), cx, cy - 40.0, TextStyle::new(24.0, Align::Center, ink));
    s.fill_text("Press Space to Restart", cx, cy + 40.0, TextStyle::new(20.0, Align::Center, ink));
}
