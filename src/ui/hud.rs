/// Score display: the text shown above the board.
///
/// Score text is refreshed when food is eaten or the game restarts;
/// high score text when a new high score is set.

use crate::sim::event::GameEvent;

pub struct ScoreBoard {
    pub score: String,
    pub high_score: String,
}

impl ScoreBoard {
    pub fn new(high_score: u32) -> Self {
        ScoreBoard { score: "0".into(), high_score: high_score.to_string() }
    }

    pub fn apply(&mut self, event: &GameEvent) {
        match event {
            GameEvent::FoodEaten { score, .. } => self.score = score.to_string(),
            GameEvent::NewHighScore { score } => self.high_score = score.to_string(),
            GameEvent::Restarted => self.score = "0".into(),
            _ => {}
        }
    }

    pub fn line(&self) -> String {
        format!(" Score: {:<6}  High: {}", self.score, self.high_score)
    }
}
