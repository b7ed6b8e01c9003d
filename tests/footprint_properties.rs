//! Property tests for movement footprints and the occupancy invariant

use std::sync::Arc;

use ahash::AHashSet;
use alien_radar::body::{BodyLibrary, BodyShape};
use alien_radar::core::{Position, SimulationConfig};
use alien_radar::motion::{Direction, MovingObject};
use alien_radar::spatial::{region, OccupancyGrid};
use alien_radar::zone::{ObjectRequest, Zone, ZoneBuilder};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn arb_direction() -> impl Strategy<Value = Direction> {
    (0..Direction::ALL.len()).prop_map(|i| Direction::ALL[i])
}

proptest! {
    #[test]
    fn footprint_size_matches_direction(
        x in -20i32..20, y in -20i32..20,
        w in 1usize..16, h in 1usize..16,
        direction in arb_direction(),
    ) {
        let cells = direction.footprint(Position::new(x, y), w, h);
        let expected = match direction {
            Direction::Left | Direction::Right => h,
            Direction::Up | Direction::Down => w,
            _ => w + h + 1,
        };
        prop_assert_eq!(cells.len(), expected);

        let unique: AHashSet<Position> = cells.iter().copied().collect();
        prop_assert_eq!(unique.len(), cells.len());
    }

    #[test]
    fn footprint_is_outside_own_rectangle(
        x in -20i32..20, y in -20i32..20,
        w in 1usize..16, h in 1usize..16,
        direction in arb_direction(),
    ) {
        let origin = Position::new(x, y);
        let own: AHashSet<Position> = region(origin, w, h).collect();
        for cell in direction.footprint(origin, w, h) {
            prop_assert!(!own.contains(&cell));
        }
    }

    #[test]
    fn step_covers_footprint_and_frees_the_rest(
        x in -20i32..20, y in -20i32..20,
        w in 1usize..16, h in 1usize..16,
        direction in arb_direction(),
    ) {
        let origin = Position::new(x, y);
        let before: AHashSet<Position> = region(origin, w, h).collect();
        let new_pos = direction.step(origin);
        let after: AHashSet<Position> = region(new_pos, w, h).collect();

        // occupying the footprint then freeing the opposite edge at the new
        // position leaves exactly the moved rectangle
        let mut cells = before.clone();
        cells.extend(direction.footprint(origin, w, h));
        for cell in direction.freed_footprint(new_pos, w, h) {
            cells.remove(&cell);
        }
        prop_assert_eq!(cells, after);
    }

    #[test]
    fn out_of_bounds_is_never_vacant(
        width in 1usize..30, height in 1usize..30,
        x in -40i32..40, y in -40i32..40,
    ) {
        let grid = OccupancyGrid::new(width, height);
        let inside = x >= 0 && y >= 0 && (x as usize) < width && (y as usize) < height;
        prop_assert_eq!(grid.is_vacant(Position::new(x, y)), inside);
    }

    #[test]
    fn grid_matches_objects_after_random_ticks(
        seed in any::<u64>(),
        sizes in prop::collection::vec((1usize..6, 1usize..6), 1..8),
        ticks in 1usize..40,
    ) {
        let library = BodyLibrary::new();
        let builder = ZoneBuilder::new(&library, SimulationConfig::default());
        let requests: Vec<ObjectRequest> = sizes
            .iter()
            .map(|&(w, h)| {
                let shape = BodyShape::new(vec![vec!['o'; w]; h]).expect("non-empty block");
                ObjectRequest::new(Arc::new(shape), 1)
            })
            .collect();

        let mut zone = builder
            .build_custom(60, 60, &requests, ChaCha8Rng::seed_from_u64(seed))
            .expect("small blocks fit a 60x60 zone");
        prop_assert!(zone.occupancy_matches_objects());
        for _ in 0..ticks {
            zone.move_objects();
            prop_assert!(zone.occupancy_matches_objects());
        }
    }

    #[test]
    fn evading_always_changes_direction(seed in any::<u64>(), direction in arb_direction()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let shape = Arc::new(BodyShape::new(vec![vec!['o']]).expect("single cell"));
        let mut obj = MovingObject::with_direction(shape, direction);
        obj.evade_collision(&mut rng);
        prop_assert_ne!(obj.direction, direction);
    }
}

#[test]
fn test_zone_from_state_round_trip_keeps_invariant() {
    let shape = Arc::new(BodyShape::new(vec![vec!['o'; 3]; 2]).expect("block"));
    let obj = MovingObject::with_direction(shape, Direction::BottomRight).at(Position::new(0, 0));
    let mut grid = OccupancyGrid::new(10, 10);
    grid.occupy_region(Position::new(0, 0), 3, 2);

    let mut zone = Zone::from_state(vec![obj], grid, SimulationConfig::default(), ChaCha8Rng::seed_from_u64(0))
        .expect("valid state");
    for _ in 0..50 {
        zone.move_objects();
        assert!(zone.occupancy_matches_objects());
    }
}
