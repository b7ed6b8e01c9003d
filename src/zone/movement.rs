//! One simulation tick: every object tries to take a step
//!
//! Objects move one at a time in list order, so each one sees the grid as
//! left by the objects before it in the same tick. A blocked object picks a
//! new direction and tries again, up to the configured attempt limit.

use rand::Rng;
use serde::Serialize;

use crate::core::types::Tick;
use crate::motion::MovingObject;
use crate::spatial::grid::OccupancyGrid;
use crate::zone::Zone;

/// Outcome of one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TickReport {
    pub tick: Tick,
    pub moved: usize,
    pub stalled: usize,
}

impl Zone {
    /// Advance every object once, using the configured attempt limit
    pub fn move_objects(&mut self) -> TickReport {
        let max_attempts = self.config.movement.max_attempts;
        self.move_objects_with(max_attempts)
    }

    pub fn move_objects_with(&mut self, max_attempts: u32) -> TickReport {
        let mut report = TickReport::default();
        for obj in self.objects.iter_mut() {
            if step_object(obj, &mut self.occupancy, &mut self.rng, max_attempts) {
                report.moved += 1;
            } else {
                report.stalled += 1;
            }
        }
        self.tick += 1;
        report.tick = self.tick;

        tracing::trace!(
            "Tick {}: {} moved, {} stalled",
            report.tick,
            report.moved,
            report.stalled
        );
        report
    }
}

/// Try to move `obj` one step. Returns false if every attempt was blocked;
/// the object then keeps its position and its last direction.
fn step_object<R: Rng + ?Sized>(
    obj: &mut MovingObject,
    occupancy: &mut OccupancyGrid,
    rng: &mut R,
    max_attempts: u32,
) -> bool {
    for _ in 0..max_attempts {
        let Some(footprint) = obj.estimate_movement() else {
            return false;
        };
        if occupancy.all_vacant(&footprint) {
            occupancy.occupy(&footprint);
            if let Some(freed) = obj.advance() {
                occupancy.free(&freed);
            }
            return true;
        }
        obj.evade_collision(rng);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::shape::BodyShape;
    use crate::core::config::SimulationConfig;
    use crate::core::types::Position;
    use crate::motion::Direction;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::sync::Arc;

    fn block(width: usize, height: usize) -> Arc<BodyShape> {
        Arc::new(BodyShape::new(vec![vec!['o'; width]; height]).unwrap())
    }

    fn zone_with(objects: Vec<MovingObject>, width: usize, height: usize) -> Zone {
        let mut grid = OccupancyGrid::new(width, height);
        for obj in &objects {
            grid.occupy_region(obj.position.unwrap(), obj.width(), obj.height());
        }
        Zone::from_state(
            objects,
            grid,
            SimulationConfig::default(),
            ChaCha8Rng::seed_from_u64(5),
        )
        .unwrap()
    }

    #[test]
    fn test_unobstructed_move_left() {
        let obj = MovingObject::with_direction(block(4, 6), Direction::Left).at(Position::new(5, 5));
        let mut zone = zone_with(vec![obj], 20, 20);

        let report = zone.move_objects();
        assert_eq!(report.moved, 1);
        assert_eq!(report.tick, 1);

        let objects = zone.moving_objects();
        assert_eq!(objects[0].position, Some(Position::new(4, 5)));
        assert_eq!(objects[0].direction, Direction::Left);

        let grid = zone.occupancy();
        for y in 5..=10 {
            assert!(!grid.is_vacant(Position::new(4, y)));
            assert!(grid.is_vacant(Position::new(8, y)));
        }
        assert!(zone.occupancy_matches_objects());
    }

    #[test]
    fn test_diagonal_move_keeps_grid_exact() {
        let obj = MovingObject::with_direction(block(3, 2), Direction::TopLeft).at(Position::new(4, 4));
        let mut zone = zone_with(vec![obj], 12, 12);
        zone.move_objects();
        assert_eq!(zone.moving_objects()[0].position, Some(Position::new(3, 3)));
        assert!(zone.occupancy_matches_objects());
    }

    #[test]
    fn test_wall_forces_new_direction() {
        let obj = MovingObject::with_direction(block(2, 2), Direction::Left).at(Position::new(0, 4));
        let mut zone = zone_with(vec![obj], 10, 10);
        let report = zone.move_objects_with(50);
        assert_eq!(report.moved, 1);
        let obj = &zone.moving_objects()[0];
        assert!(!matches!(
            obj.direction,
            Direction::Left | Direction::TopLeft | Direction::BottomLeft
        ));
        assert!(zone.occupancy_matches_objects());
    }

    #[test]
    fn test_boxed_in_object_stalls() {
        // object fills the whole zone, every footprint leaves the grid
        let obj = MovingObject::with_direction(block(3, 3), Direction::Up).at(Position::new(0, 0));
        let mut zone = zone_with(vec![obj], 3, 3);
        let report = zone.move_objects();
        assert_eq!(report.moved, 0);
        assert_eq!(report.stalled, 1);
        assert_eq!(zone.moving_objects()[0].position, Some(Position::new(0, 0)));
        assert!(zone.occupancy_matches_objects());
    }

    #[test]
    fn test_zero_attempts_never_moves() {
        let obj = MovingObject::with_direction(block(2, 2), Direction::Right).at(Position::new(3, 3));
        let mut zone = zone_with(vec![obj], 10, 10);
        let report = zone.move_objects_with(0);
        assert_eq!(report.stalled, 1);
        assert_eq!(zone.moving_objects()[0].position, Some(Position::new(3, 3)));
    }

    #[test]
    fn test_later_object_sees_earlier_move() {
        // a moves right into the gap first, so b (moving left into the
        // same column) must turn away
        let a = MovingObject::with_direction(block(1, 1), Direction::Right).at(Position::new(0, 0));
        let b = MovingObject::with_direction(block(1, 1), Direction::Left).at(Position::new(2, 0));
        let mut zone = zone_with(vec![a, b], 3, 1);
        let report = zone.move_objects();
        assert_eq!(report.moved, 1);
        assert_eq!(report.stalled, 1);
        let objects = zone.moving_objects();
        assert_eq!(objects[0].position, Some(Position::new(1, 0)));
        assert_eq!(objects[1].position, Some(Position::new(2, 0)));
        assert!(zone.occupancy_matches_objects());
    }
}
