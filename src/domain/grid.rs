/// Grid geometry: tile positions and the four steering directions.
///
/// Tile coordinates are signed so that a head stepping off the board
/// (e.g. to x = -1) is representable and can be classified as a wall hit.

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// The neighbouring tile one step in `dir`.
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Position { x: self.x + dx, y: self.y + dy }
    }

    /// Is this tile inside a square board of `tile_count` tiles per side?
    pub fn in_bounds(self, tile_count: i32) -> bool {
        self.x >= 0 && self.x < tile_count && self.y >= 0 && self.y < tile_count
    }

    /// Pixel centre of this tile on a surface with `cell_px` pixels per tile.
    pub fn pixel_center(self, cell_px: f32) -> (f32, f32) {
        (
            self.x as f32 * cell_px + cell_px / 2.0,
            self.y as f32 * cell_px + cell_px / 2.0,
        )
    }
}

/// Steering direction. Screen space: y grows downward.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up    => (0, -1),
            Direction::Down  => (0, 1),
            Direction::Left  => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up    => Direction::Down,
            Direction::Down  => Direction::Up,
            Direction::Left  => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Direction of the pointer relative to an origin, both in pixels.
    ///
    /// Four 90° sectors centred on the cardinal axes:
    ///   [-45°, 45°)   → Right
    ///   [45°, 135°)   → Down
    ///   [-135°, -45°) → Up
    ///   otherwise     → Left
    pub fn from_pointer(origin: (f32, f32), pointer: (f32, f32)) -> Direction {
        let dx = pointer.0 - origin.0;
        let dy = pointer.1 - origin.1;
        let degrees = dy.atan2(dx).to_degrees();
        if (-45.0..45.0).contains(&degrees) {
            Direction::Right
        } else if (45.0..135.0).contains(&degrees) {
            Direction::Down
        } else if (-135.0..-45.0).contains(&degrees) {
            Direction::Up
        } else {
            Direction::Left
        }
    }
}
