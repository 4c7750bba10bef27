/// Input commands and how they change the world.
///
/// Commands arrive between ticks. Steering only writes the pending
/// direction; pause and restart switch the phase immediately.

use crate::domain::grid::Direction;
use super::event::GameEvent;
use super::world::{Phase, WorldState};

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Command {
    Steer(Direction),
    /// Pointer press at surface pixel coordinates.
    Pointer { x: f32, y: f32 },
    Pause,
    Confirm,
}

pub fn apply(world: &mut WorldState, cmd: Command) -> Option<GameEvent> {
    match (world.phase, cmd) {
        (Phase::Running, Command::Steer(dir)) => {
            steer(world, dir);
            None
        }
        (Phase::Running, Command::Pointer { x, y }) => {
            let dir = Direction::from_pointer(world.head_px(), (x, y));
            steer(world, dir);
            None
        }
        (Phase::Running, Command::Pause) => {
            world.phase = Phase::Paused;
            Some(GameEvent::PauseToggled { paused: true })
        }
        (Phase::Paused, Command::Pause) => {
            world.phase = Phase::Running;
            Some(GameEvent::PauseToggled { paused: false })
        }
        (Phase::GameOver, Command::Confirm | Command::Pointer { .. }) => {
            world.restart();
            Some(GameEvent::Restarted)
        }
        _ => None,
    }
}

/// Set the pending direction unless it reverses the committed one.
fn steer(world: &mut WorldState, dir: Direction) {
    if dir != world.direction.opposite() {
        world.pending = dir;
    }
}
