//! The eight compass directions and their movement footprints
//!
//! Objects are anchored at their top-left corner. A one-step move only
//! needs a vacancy check on the cells just outside the leading edge: the
//! interior stays covered by the same object before and after the move.
//! The cells a move frees are the leading edge of the opposite direction,
//! evaluated at the new position.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::Position;

/// Cells touched by a one-step move; never contains duplicates
pub type Footprint = Vec<Position>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
        Direction::TopLeft,
        Direction::TopRight,
        Direction::BottomLeft,
        Direction::BottomRight,
    ];

    /// Unit step as (dx, dy)
    pub fn vector(&self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::TopLeft => (-1, -1),
            Direction::TopRight => (1, -1),
            Direction::BottomLeft => (-1, 1),
            Direction::BottomRight => (1, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::TopLeft => Direction::BottomRight,
            Direction::TopRight => Direction::BottomLeft,
            Direction::BottomLeft => Direction::TopRight,
            Direction::BottomRight => Direction::TopLeft,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Direction::Left => "Left",
            Direction::Right => "Right",
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::TopLeft => "Top Left",
            Direction::TopRight => "Top Right",
            Direction::BottomLeft => "Bottom Left",
            Direction::BottomRight => "Bottom Right",
        }
    }

    pub fn is_diagonal(&self) -> bool {
        let (dx, dy) = self.vector();
        dx != 0 && dy != 0
    }

    /// Position after one step in this direction
    #[inline]
    pub fn step(&self, pos: Position) -> Position {
        let (dx, dy) = self.vector();
        pos.offset(dx, dy)
    }

    /// Cells that become occupied when a `width` x `height` object at `pos`
    /// moves one step this way.
    ///
    /// Axis directions yield one edge; diagonals yield both adjacent edges
    /// plus the outer corner, `width + height + 1` cells.
    pub fn footprint(&self, pos: Position, width: usize, height: usize) -> Footprint {
        let (dx, dy) = self.vector();
        let mut cells = Vec::with_capacity(width + height + 1);
        match dx {
            -1 => cells.extend(left_edge(pos, height)),
            1 => cells.extend(right_edge(pos, width, height)),
            _ => {}
        }
        match dy {
            -1 => cells.extend(top_edge(pos, width)),
            1 => cells.extend(bottom_edge(pos, width, height)),
            _ => {}
        }
        if dx != 0 && dy != 0 {
            let corner_x = if dx < 0 { pos.x - 1 } else { pos.x + width as i32 };
            let corner_y = if dy < 0 { pos.y - 1 } else { pos.y + height as i32 };
            cells.push(Position::new(corner_x, corner_y));
        }
        cells
    }

    /// Cells released by a move in this direction, given the position
    /// *after* the move
    pub fn freed_footprint(&self, new_pos: Position, width: usize, height: usize) -> Footprint {
        self.opposite().footprint(new_pos, width, height)
    }

    /// Uniform pick among all eight directions
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Uniform pick among the seven directions other than `self`
    pub fn random_other<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        loop {
            let candidate = Self::random(rng);
            if candidate != *self {
                return candidate;
            }
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn left_edge(pos: Position, height: usize) -> impl Iterator<Item = Position> {
    (0..height as i32).map(move |i| Position::new(pos.x - 1, pos.y + i))
}

fn right_edge(pos: Position, width: usize, height: usize) -> impl Iterator<Item = Position> {
    let x = pos.x + width as i32;
    (0..height as i32).map(move |i| Position::new(x, pos.y + i))
}

fn top_edge(pos: Position, width: usize) -> impl Iterator<Item = Position> {
    (0..width as i32).map(move |i| Position::new(pos.x + i, pos.y - 1))
}

fn bottom_edge(pos: Position, width: usize, height: usize) -> impl Iterator<Item = Position> {
    let y = pos.y + height as i32;
    (0..width as i32).map(move |i| Position::new(pos.x + i, y))
}
