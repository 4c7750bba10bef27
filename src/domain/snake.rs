/// Snake body state machine.
///
/// Head is the front of the deque. Each advance pushes a new head; the
/// tail is popped unless the new head lands on food. A detected collision
/// leaves the body untouched.

use std::collections::VecDeque;

use super::collision::{collision_at, Collision};
use super::grid::{Direction, Position};

/// Outcome of a successful advance.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Advance {
    pub head: Position,
    pub ate: bool,
}

#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    pub fn new(start: Position) -> Self {
        let mut body = VecDeque::with_capacity(64);
        body.push_back(start);
        Snake { body }
    }

    /// Build a snake from explicit segments, head first. Test fixtures only.
    #[cfg(test)]
    pub fn from_segments<I: IntoIterator<Item = Position>>(segments: I) -> Self {
        Snake { body: segments.into_iter().collect() }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    /// Move one tile in `dir`. `food` is the tile of the current food item.
    pub fn advance(&mut self, dir: Direction, food: Position, tile_count: i32) -> Result<Advance, Collision> {
        let head = self.head().step(dir);
        if let Some(hit) = collision_at(head, &self.body, tile_count) {
            return Err(hit);
        }

        self.body.push_front(head);
        let ate = head == food;
        if !ate {
            self.body.pop_back();
        }
        Ok(Advance { head, ate })
    }
}
