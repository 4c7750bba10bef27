/// The tick function: advances the world by one fixed interval.
///
/// Processing order:
///   1. Commit pending direction
///   2. Particle update + prune (every phase, so effects keep fading
///      while paused or after game over)
///   3. Running only: advance snake
///        - collision → game over, high score check, celebration
///        - food      → score, explosion, background, new food
///
/// Drawing is done by the caller after the tick returns.

use crate::domain::collision::Collision;
use crate::domain::grid::Position;
use super::event::GameEvent;
use super::world::{Phase, WorldState};

// ══════════════════════════════════════════════════════════════
// Main entry point
// ══════════════════════════════════════════════════════════════

pub fn tick(world: &mut WorldState) -> Vec<GameEvent> {
    let mut events: Vec<GameEvent> = Vec::new();
    world.direction = world.pending;

    world.particles.update_and_prune();

    if world.phase != Phase::Running { return events; }

    let food = world.food.pos;
    match world.snake.advance(world.direction, food, world.tile_count) {
        Err(hit) => resolve_game_over(world, hit, &mut events),
        Ok(adv) if adv.ate => resolve_food(world, adv.head, &mut events),
        Ok(_) => {}
    }

    events
}

// ══════════════════════════════════════════════════════════════
// Food
// ══════════════════════════════════════════════════════════════

fn resolve_food(world: &mut WorldState, head: Position, events: &mut Vec<GameEvent>) {
    let reward = world.food.reward();
    world.score = world.score.saturating_add(reward);
    world.spawn_explosion(head);
    world.resample_background();
    world.respawn_food();

    events.push(GameEvent::FoodEaten { x: head.x, y: head.y, reward, score: world.score });
}

// ══════════════════════════════════════════════════════════════
// Game over
// ══════════════════════════════════════════════════════════════

fn resolve_game_over(world: &mut WorldState, hit: Collision, events: &mut Vec<GameEvent>) {
    world.phase = Phase::GameOver;
    events.push(GameEvent::GameOver {
        score: world.score,
        length: world.snake.len(),
        cause: hit,
    });

    if world.score > world.high_score {
        world.high_score = world.score;
        world.new_high_score = true;
        world.spawn_celebration();
        events.push(GameEvent::NewHighScore { score: world.score });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::Direction;
    use crate::sim::world::fixtures::world_with;

    fn cells(w: &WorldState) -> Vec<(i32, i32)> {
        w.snake.segments().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn moves_right_without_food() {
        let mut w = world_with(&[(5, 5)], (15, 15), 10);
        let events = tick(&mut w);
        assert!(events.is_empty());
        assert_eq!(cells(&w), vec![(6, 5)]);
        assert_eq!(w.score, 0);
    }

    #[test]
    fn eating_grows_scores_and_bursts() {
        let mut w = world_with(&[(5, 5)], (6, 5), 10);
        let events = tick(&mut w);

        assert_eq!(cells(&w), vec![(6, 5), (5, 5)]);
        assert_eq!(w.score, 10);
        assert_eq!(events, vec![GameEvent::FoodEaten { x: 6, y: 5, reward: 10, score: 10 }]);

        // burst of 20 at the pixel centre of (6,5)
        assert_eq!(w.particles.len(), 20);
        assert!(w.particles.iter().all(|p| (p.x, p.y) == (130.0, 110.0)));

        // new food, new background
        assert_ne!(w.background, crate::domain::palette::WHITE);
        assert!(w.food.pos.in_bounds(20));
    }

    #[test]
    fn huge_reward_saturates_score() {
        let mut w = world_with(&[(5, 5)], (6, 5), u32::MAX);
        w.score = 1;
        let events = tick(&mut w);
        assert_eq!(w.score, u32::MAX);
        assert_eq!(events, vec![GameEvent::FoodEaten { x: 6, y: 5, reward: u32::MAX, score: u32::MAX }]);
    }

    #[test]
    fn variable_reward_is_added() {
        let mut w = world_with(&[(5, 5)], (6, 5), 15);
        w.score = 20;
        tick(&mut w);
        assert_eq!(w.score, 35);
    }

    #[test]
    fn length_only_changes_on_eat() {
        let mut w = world_with(&[(2, 2), (1, 2)], (10, 2), 5);
        let mut prev = w.snake.len();
        for _ in 0..8 {
            let ate = w.snake.head().step(w.pending) == w.food.pos;
            tick(&mut w);
            let expected = if ate { prev + 1 } else { prev };
            assert_eq!(w.snake.len(), expected);
            prev = w.snake.len();
        }
        assert_eq!(w.snake.len(), 3);
    }

    #[test]
    fn wall_hit_ends_game_without_celebration() {
        let mut w = world_with(&[(0, 5)], (9, 9), 10);
        w.pending = Direction::Left;
        w.direction = Direction::Left;
        w.high_score = 50;
        let events = tick(&mut w);

        assert_eq!(w.phase, Phase::GameOver);
        assert_eq!(events, vec![GameEvent::GameOver { score: 0, length: 1, cause: Collision::Wall }]);
        assert!(w.particles.is_empty());
        assert_eq!(w.high_score, 50);
        assert!(!w.new_high_score);
        assert_eq!(cells(&w), vec![(0, 5)]);
    }

    #[test]
    fn zero_score_never_beats_zero_high_score() {
        let mut w = world_with(&[(0, 5)], (9, 9), 10);
        w.pending = Direction::Left;
        tick(&mut w);
        assert_eq!(w.phase, Phase::GameOver);
        assert!(w.particles.is_empty());
    }

    #[test]
    fn new_high_score_celebrates() {
        let mut w = world_with(&[(19, 3)], (0, 0), 10);
        w.score = 70;
        w.high_score = 40;
        let events = tick(&mut w);

        assert_eq!(w.phase, Phase::GameOver);
        assert_eq!(w.high_score, 70);
        assert!(w.new_high_score);
        assert_eq!(w.particles.len(), 50);
        assert!(events.contains(&GameEvent::NewHighScore { score: 70 }));
    }

    #[test]
    fn equal_score_is_not_a_new_high() {
        let mut w = world_with(&[(19, 3)], (0, 0), 10);
        w.score = 40;
        w.high_score = 40;
        tick(&mut w);
        assert!(!w.new_high_score);
        assert!(w.particles.is_empty());
    }

    #[test]
    fn self_hit_ends_game() {
        let mut w = world_with(&[(5, 5), (5, 6), (6, 6), (6, 5)], (0, 0), 10);
        let events = tick(&mut w);
        assert_eq!(events, vec![GameEvent::GameOver { score: 0, length: 4, cause: Collision::SelfHit }]);
        assert_eq!(w.phase, Phase::GameOver);
    }

    #[test]
    fn paused_ticks_only_fade_particles() {
        let mut w = world_with(&[(5, 5)], (6, 5), 10);
        w.spawn_explosion(Position::new(1, 1));
        w.phase = Phase::Paused;
        let food = w.food.clone();

        for _ in 0..3 {
            assert!(tick(&mut w).is_empty());
        }
        assert_eq!(cells(&w), vec![(5, 5)]);
        assert_eq!(w.food, food);
        assert_eq!(w.score, 0);
        let life = w.particles.iter().next().unwrap().life();
        assert!((life - 0.94).abs() < 1e-5);
    }

    #[test]
    fn game_over_freezes_board() {
        let mut w = world_with(&[(0, 5)], (9, 9), 10);
        w.pending = Direction::Left;
        tick(&mut w);
        for _ in 0..5 {
            assert!(tick(&mut w).is_empty());
        }
        assert_eq!(cells(&w), vec![(0, 5)]);
    }

    #[test]
    fn particles_fade_out_over_fifty_ticks() {
        let mut w = world_with(&[(0, 0)], (19, 19), 10);
        w.spawn_explosion(Position::new(3, 3));
        w.phase = Phase::Paused;
        for _ in 0..49 { tick(&mut w); }
        assert_eq!(w.particles.len(), 20);
        tick(&mut w);
        assert!(w.particles.is_empty());
    }

    #[test]
    fn pending_direction_is_committed() {
        let mut w = world_with(&[(5, 5)], (15, 15), 10);
        w.pending = Direction::Down;
        tick(&mut w);
        assert_eq!(w.direction, Direction::Down);
        assert_eq!(cells(&w), vec![(5, 6)]);
    }
}
