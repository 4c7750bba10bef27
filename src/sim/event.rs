/// Events emitted during a tick or by an input command.
/// The presentation layer consumes these for HUD text, sound and persistence.

use crate::domain::collision::Collision;

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    FoodEaten { x: i32, y: i32, reward: u32, score: u32 },
    GameOver { score: u32, length: usize, cause: Collision },
    NewHighScore { score: u32 },
    PauseToggled { paused: bool },
    Restarted,
}
