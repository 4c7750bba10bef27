/// Collision rules for a candidate head position.
///
/// The body is checked as it was BEFORE the move, tail included, even
/// though the tail would be dropped this tick. Steering into the cell the
/// tail is leaving is therefore a self hit.

use super::grid::Position;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Collision {
    Wall,
    SelfHit,
}

impl Collision {
    pub fn label(self) -> &'static str {
        match self {
            Collision::Wall => "wall",
            Collision::SelfHit => "self",
        }
    }
}

/// True when `head` leaves the board or lands on any pre-move segment.
pub fn check_collision<'a, I>(head: Position, body: I, tile_count: i32) -> bool
where
    I: IntoIterator<Item = &'a Position>,
{
    !head.in_bounds(tile_count) || body.into_iter().any(|seg| *seg == head)
}

/// Classify what `head` would hit. Wall takes precedence over body.
pub fn collision_at<'a, I>(head: Position, body: I, tile_count: i32) -> Option<Collision>
where
    I: IntoIterator<Item = &'a Position>,
{
    if !check_collision(head, body, tile_count) {
        None
    } else if head.in_bounds(tile_count) {
        Some(Collision::SelfHit)
    } else {
        Some(Collision::Wall)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(cells: &[(i32, i32)]) -> Vec<Position> {
        cells.iter().map(|&(x, y)| Position::new(x, y)).collect()
    }

    #[test]
    fn free_cell_is_no_collision() {
        let b = body(&[(5, 5), (4, 5)]);
        assert_eq!(collision_at(Position::new(6, 5), &b, 20), None);
        assert!(!check_collision(Position::new(6, 5), &b, 20));
    }

    #[test]
    fn every_edge_is_a_wall() {
        let b = body(&[(0, 0)]);
        for head in [
            Position::new(-1, 5),
            Position::new(20, 5),
            Position::new(5, -1),
            Position::new(5, 20),
        ] {
            assert_eq!(collision_at(head, &b, 20), Some(Collision::Wall), "{head:?}");
        }
    }

    #[test]
    fn body_segment_is_self_hit() {
        let b = body(&[(5, 5), (5, 6), (6, 6), (6, 5)]);
        assert_eq!(collision_at(Position::new(5, 6), &b, 20), Some(Collision::SelfHit));
    }

    #[test]
    fn tail_cell_counts_before_it_moves() {
        // square loop: head (5,5) moving right lands on the tail (6,5)
        let b = body(&[(5, 5), (5, 6), (6, 6), (6, 5)]);
        assert!(check_collision(Position::new(6, 5), &b, 20));
    }

    #[test]
    fn wall_wins_over_body() {
        let b = body(&[(-1, 0)]);
        assert_eq!(collision_at(Position::new(-1, 0), &b, 20), Some(Collision::Wall));
    }

    #[test]
    fn deterministic_for_same_input() {
        let b = body(&[(3, 3), (3, 4), (3, 5)]);
        for x in -1..=20 {
            for y in -1..=20 {
                let head = Position::new(x, y);
                let a = collision_at(head, &b, 20);
                assert_eq!(a, collision_at(head, &b, 20));
                let expect = !head.in_bounds(20) || b.contains(&head);
                assert_eq!(a.is_some(), expect, "{head:?}");
                assert_eq!(check_collision(head, &b, 20), expect, "{head:?}");
            }
        }
    }
}
