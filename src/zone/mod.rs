//! The bounded simulation grid and its population
//!
//! A `Zone` owns its occupancy grid and its objects exclusively. Callers
//! get snapshots, never live references, so inspection cannot race a tick.

pub mod builder;
pub mod capacity;
pub mod movement;
pub mod render;
pub mod sync;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::SimulationConfig;
use crate::core::error::{CapacityShortfall, RadarError, Result};
use crate::core::types::{Position, Tick};
use crate::motion::{Direction, MovingObject};
use crate::spatial::grid::OccupancyGrid;

pub use builder::{ObjectRequest, ZoneBuilder, ZoneProfile};
pub use capacity::CapacityEstimate;
pub use movement::TickReport;

#[derive(Debug, Clone)]
pub struct Zone {
    width: usize,
    height: usize,
    occupancy: OccupancyGrid,
    /// Insertion order is simulation order
    objects: Vec<MovingObject>,
    config: SimulationConfig,
    rng: ChaCha8Rng,
    tick: Tick,
}

impl Zone {
    /// Create a zone and place `objects` at random vacant spots.
    ///
    /// Any positions the objects already carry are discarded. Fails when
    /// the zone is too large, when one object is bigger than the zone, or
    /// when the object set is estimated not to fit.
    pub fn new(
        objects: Vec<MovingObject>,
        width: usize,
        height: usize,
        config: SimulationConfig,
        rng: ChaCha8Rng,
    ) -> Result<Self> {
        check_dimensions(width, height, &config)?;
        for obj in &objects {
            check_fits(obj, width, height)?;
        }

        check_capacity(objects.iter(), width, height)?;

        let mut zone = Self {
            width,
            height,
            occupancy: OccupancyGrid::new(width, height),
            objects: Vec::with_capacity(objects.len()),
            config,
            rng,
            tick: 0,
        };
        for mut obj in objects {
            obj.position = None;
            zone.insert(obj)?;
        }

        tracing::info!(
            "Created {}x{} zone with {} moving objects",
            width,
            height,
            zone.objects.len()
        );
        Ok(zone)
    }

    /// Rebuild a zone from a saved occupancy grid and already placed objects.
    ///
    /// Objects must lie inside the grid without overlapping, and the grid
    /// must be occupied exactly where the objects are.
    pub fn from_state(
        objects: Vec<MovingObject>,
        occupancy: OccupancyGrid,
        config: SimulationConfig,
        rng: ChaCha8Rng,
    ) -> Result<Self> {
        let (width, height) = (occupancy.width(), occupancy.height());
        check_dimensions(width, height, &config)?;
        for (i, obj) in objects.iter().enumerate() {
            let pos = obj
                .position
                .ok_or_else(|| RadarError::InvalidState(format!("object #{} has no position", i)))?;
            if !rect_within(pos, obj.width(), obj.height(), width, height) {
                return Err(RadarError::InvalidState(format!(
                    "object #{} at {} does not fit a {}x{} zone",
                    i, pos, width, height
                )));
            }
        }

        let zone = Self {
            width,
            height,
            occupancy,
            objects,
            config,
            rng,
            tick: 0,
        };
        if !zone.occupancy_matches_objects() {
            return Err(RadarError::InvalidState(
                "occupancy grid does not match the object rectangles".to_string(),
            ));
        }
        Ok(zone)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Deep copy of the objects in simulation order
    pub fn moving_objects(&self) -> Vec<MovingObject> {
        self.objects.clone()
    }

    /// Copy of the vacancy grid
    pub fn occupancy(&self) -> OccupancyGrid {
        self.occupancy.clone()
    }

    pub fn fits_profile(&self, profile: ZoneProfile) -> bool {
        (self.width, self.height) == profile.dimensions()
    }

    /// Place one more object at a random vacant spot.
    ///
    /// The whole population, new object included, must still pass the
    /// capacity estimate.
    pub fn insert(&mut self, mut obj: MovingObject) -> Result<()> {
        check_fits(&obj, self.width, self.height)?;
        check_capacity(self.objects.iter().chain(std::iter::once(&obj)), self.width, self.height)?;
        let attempts = self.config.zone.placement_attempts;
        match find_vacant_spot(&self.occupancy, &mut self.rng, obj.width(), obj.height(), attempts) {
            Some(pos) => {
                self.occupancy.occupy_region(pos, obj.width(), obj.height());
                obj.position = Some(pos);
                tracing::debug!("Placed {} at {}", obj, pos);
                self.objects.push(obj);
                Ok(())
            }
            None => Err(RadarError::CapacityExceeded {
                width: self.width,
                height: self.height,
                shortfall: CapacityShortfall::Placement {
                    index: self.objects.len(),
                    attempts,
                },
            }),
        }
    }

    /// Remove every object matching `pred`, freeing the cells it covered
    pub fn remove_where<F>(&mut self, mut pred: F) -> Vec<MovingObject>
    where
        F: FnMut(&MovingObject) -> bool,
    {
        let (removed, kept): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.objects).into_iter().partition(|obj| pred(obj));
        for obj in &removed {
            if let Some(pos) = obj.position {
                self.occupancy.free_region(pos, obj.width(), obj.height());
            }
        }
        self.objects = kept;
        removed
    }

    /// True when the occupied cells are exactly the union of the object
    /// rectangles, with no overlaps and nothing out of bounds
    pub fn occupancy_matches_objects(&self) -> bool {
        let mut expected = OccupancyGrid::new(self.width, self.height);
        for obj in &self.objects {
            let Some(pos) = obj.position else {
                continue;
            };
            if !expected.region_is_vacant(pos, obj.width(), obj.height()) {
                return false;
            }
            expected.occupy_region(pos, obj.width(), obj.height());
        }
        expected == self.occupancy
    }

    /// Serializable view of the current state
    pub fn snapshot(&self) -> ZoneSnapshot {
        ZoneSnapshot {
            width: self.width,
            height: self.height,
            tick: self.tick,
            objects: self
                .objects
                .iter()
                .filter_map(|obj| {
                    obj.position.map(|position| ObjectSnapshot {
                        key: obj.key.clone(),
                        position,
                        direction: obj.direction,
                        width: obj.width(),
                        height: obj.height(),
                    })
                })
                .collect(),
            occupancy: self.draw_occupancy_grid().lines().map(str::to_string).collect(),
        }
    }
}

/// Placed object as seen in a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSnapshot {
    pub key: Option<String>,
    pub position: Position,
    pub direction: Direction,
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSnapshot {
    pub width: usize,
    pub height: usize,
    pub tick: Tick,
    pub objects: Vec<ObjectSnapshot>,
    /// Occupancy rows rendered with the void and matter symbols
    pub occupancy: Vec<String>,
}

impl ZoneSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn check_dimensions(width: usize, height: usize, config: &SimulationConfig) -> Result<()> {
    let max = config.zone.max_dimension;
    if width >= max || height >= max {
        return Err(RadarError::OversizedZone { width, height, max });
    }
    Ok(())
}

fn check_fits(obj: &MovingObject, width: usize, height: usize) -> Result<()> {
    if obj.width() > width || obj.height() > height {
        return Err(RadarError::UndersizedZone {
            width,
            height,
            shape_width: obj.width(),
            shape_height: obj.height(),
        });
    }
    Ok(())
}

fn check_capacity<'a>(
    objects: impl Iterator<Item = &'a MovingObject>,
    width: usize,
    height: usize,
) -> Result<()> {
    let estimate = CapacityEstimate::for_objects(objects.map(|o| (o.width(), o.height())), width);
    if !estimate.fits(width, height) {
        return Err(RadarError::CapacityExceeded {
            width,
            height,
            shortfall: CapacityShortfall::Estimate {
                needed_width: estimate.min_width,
                needed_height: estimate.min_height,
            },
        });
    }
    Ok(())
}

fn rect_within(pos: Position, w: usize, h: usize, width: usize, height: usize) -> bool {
    pos.x >= 0 && pos.y >= 0 && pos.x as usize + w <= width && pos.y as usize + h <= height
}

/// Sample random top-left corners until the whole rectangle is vacant
fn find_vacant_spot<R: Rng + ?Sized>(
    occupancy: &OccupancyGrid,
    rng: &mut R,
    width: usize,
    height: usize,
    attempts: u32,
) -> Option<Position> {
    let max_x = occupancy.width().checked_sub(width)? as i32;
    let max_y = occupancy.height().checked_sub(height)? as i32;
    for _ in 0..attempts {
        let pos = Position::new(rng.gen_range(0..=max_x), rng.gen_range(0..=max_y));
        if occupancy.region_is_vacant(pos, width, height) {
            return Some(pos);
        }
    }
    None
}
