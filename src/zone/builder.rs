//! Named zone sizes and a factory that populates zones from body requests

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::body::library::BodyLibrary;
use crate::body::shape::BodyShape;
use crate::core::config::SimulationConfig;
use crate::core::error::{RadarError, Result};
use crate::motion::MovingObject;
use crate::zone::Zone;

/// Objects of each default body in the default mix
const DEFAULT_COUNT_PER_BODY: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneProfile {
    Small,
    Medium,
    Large,
}

impl ZoneProfile {
    pub const ALL: [ZoneProfile; 3] = [ZoneProfile::Small, ZoneProfile::Medium, ZoneProfile::Large];

    pub fn width(&self) -> usize {
        self.dimensions().0
    }

    pub fn height(&self) -> usize {
        self.dimensions().1
    }

    pub fn dimensions(&self) -> (usize, usize) {
        match self {
            ZoneProfile::Small => (75, 25),
            ZoneProfile::Medium => (150, 50),
            ZoneProfile::Large => (300, 100),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ZoneProfile::Small => "small",
            ZoneProfile::Medium => "medium",
            ZoneProfile::Large => "large",
        }
    }
}

impl fmt::Display for ZoneProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ZoneProfile {
    type Err = RadarError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|profile| profile.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| RadarError::UnknownProfile(s.to_string()))
    }
}

/// `count` copies of one body shape
#[derive(Debug, Clone)]
pub struct ObjectRequest {
    pub shape: Arc<BodyShape>,
    pub count: usize,
}

impl ObjectRequest {
    pub fn new(shape: Arc<BodyShape>, count: usize) -> Self {
        Self { shape, count }
    }
}

/// Turns body requests into populated zones
pub struct ZoneBuilder<'a> {
    library: &'a BodyLibrary,
    config: SimulationConfig,
}

impl<'a> ZoneBuilder<'a> {
    pub fn new(library: &'a BodyLibrary, config: SimulationConfig) -> Self {
        Self { library, config }
    }

    /// Ten objects of every body in the library
    pub fn default_requests(&self) -> Vec<ObjectRequest> {
        self.library
            .iter()
            .map(|shape| ObjectRequest::new(shape.clone(), DEFAULT_COUNT_PER_BODY))
            .collect()
    }

    /// Zone of a named size; an empty request list means the default mix
    pub fn build(&self, profile: ZoneProfile, requests: &[ObjectRequest], rng: ChaCha8Rng) -> Result<Zone> {
        let (width, height) = profile.dimensions();
        self.build_custom(width, height, requests, rng)
    }

    pub fn build_custom(
        &self,
        width: usize,
        height: usize,
        requests: &[ObjectRequest],
        mut rng: ChaCha8Rng,
    ) -> Result<Zone> {
        let objects = if requests.is_empty() {
            create_moving_objects(&self.default_requests(), &mut rng)
        } else {
            create_moving_objects(requests, &mut rng)
        };
        tracing::debug!("Building {}x{} zone for {} objects", width, height, objects.len());
        Zone::new(objects, width, height, self.config.clone(), rng)
    }
}

/// Unplaced objects with random directions, in request order
pub fn create_moving_objects(requests: &[ObjectRequest], rng: &mut ChaCha8Rng) -> Vec<MovingObject> {
    requests
        .iter()
        .flat_map(|request| std::iter::repeat(&request.shape).take(request.count))
        .map(|shape| MovingObject::new(shape.clone(), rng))
        .collect()
}
