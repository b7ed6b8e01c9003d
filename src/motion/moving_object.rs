//! Sprite-shaped entities that wander a zone

use std::sync::Arc;

use rand::Rng;

use crate::body::shape::BodyShape;
use crate::core::types::Position;
use crate::motion::direction::{Direction, Footprint};

/// A body shape travelling in one of eight directions
///
/// `position` is `None` until a zone places the object. Cloning is a full
/// snapshot: the only shared part is the immutable shape.
#[derive(Debug, Clone, PartialEq)]
pub struct MovingObject {
    /// Key of the body record backing this object, if it came from a body source
    pub key: Option<String>,
    pub shape: Arc<BodyShape>,
    pub position: Option<Position>,
    pub direction: Direction,
}

impl MovingObject {
    /// Unplaced object heading in a random direction
    pub fn new<R: Rng + ?Sized>(shape: Arc<BodyShape>, rng: &mut R) -> Self {
        Self::with_direction(shape, Direction::random(rng))
    }

    pub fn with_direction(shape: Arc<BodyShape>, direction: Direction) -> Self {
        Self {
            key: None,
            shape,
            position: None,
            direction,
        }
    }

    /// Same object, already standing at `position`
    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Same object, tagged with the key of its body record
    pub fn keyed(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn width(&self) -> usize {
        self.shape.width()
    }

    pub fn height(&self) -> usize {
        self.shape.height()
    }

    pub fn is_placed(&self) -> bool {
        self.position.is_some()
    }

    /// Cells the next step in the current direction would occupy
    pub fn estimate_movement(&self) -> Option<Footprint> {
        self.position
            .map(|pos| self.direction.footprint(pos, self.width(), self.height()))
    }

    /// Take one step and return the cells left behind
    pub fn advance(&mut self) -> Option<Footprint> {
        let new_pos = self.direction.step(self.position?);
        self.position = Some(new_pos);
        Some(self.direction.freed_footprint(new_pos, self.width(), self.height()))
    }

    /// Switch to a different, randomly chosen direction
    pub fn evade_collision<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.direction = self.direction.random_other(rng);
    }

    /// Sprite rows top to bottom
    pub fn lines(&self) -> impl Iterator<Item = &[char]> + '_ {
        self.shape.lines()
    }
}

impl std::fmt::Display for MovingObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Obj: profile {}x{}", self.width(), self.height())?;
        if let Some(key) = &self.key {
            write!(f, "; body {}", key)?;
        }
        Ok(())
    }
}
