use std::fmt;

use thiserror::Error;

/// Why an object set does not fit a zone
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapacityShortfall {
    /// The bin-packing pre-check needs more room than the zone has
    Estimate {
        needed_width: usize,
        needed_height: usize,
    },
    /// Random placement ran out of attempts for one object
    Placement { index: usize, attempts: u32 },
}

impl fmt::Display for CapacityShortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapacityShortfall::Estimate {
                needed_width,
                needed_height,
            } => write!(f, "estimated {}x{} needed", needed_width, needed_height),
            CapacityShortfall::Placement { index, attempts } => write!(
                f,
                "object #{} could not be placed after {} attempts",
                index, attempts
            ),
        }
    }
}

#[derive(Error, Debug)]
pub enum RadarError {
    #[error("Zone size {width}x{height} is too big, both sides must be below {max}")]
    OversizedZone {
        width: usize,
        height: usize,
        max: usize,
    },

    #[error("Zone size {width}x{height} is too small for a {shape_width}x{shape_height} object")]
    UndersizedZone {
        width: usize,
        height: usize,
        shape_width: usize,
        shape_height: usize,
    },

    #[error("Too many moving objects for a {width}x{height} zone: {shortfall}")]
    CapacityExceeded {
        width: usize,
        height: usize,
        shortfall: CapacityShortfall,
    },

    #[error("Body string is too big: {width}x{height} exceeds {max_width}x{max_height}")]
    OversizedShape {
        width: usize,
        height: usize,
        max_width: usize,
        max_height: usize,
    },

    #[error("Body string is empty")]
    EmptyShape,

    #[error("Body row {row} has {found} cells, expected {expected}")]
    RaggedShape {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid zone state: {0}")]
    InvalidState(String),

    #[error("Unknown zone profile: {0}")]
    UnknownProfile(String),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl RadarError {
    /// True for both the pre-check estimate and exhausted placement
    pub fn is_capacity_error(&self) -> bool {
        matches!(self, RadarError::CapacityExceeded { .. })
    }
}

pub type Result<T> = std::result::Result<T, RadarError>;
