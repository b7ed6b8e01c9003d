//! Sprite definitions for moving objects

use serde::{Deserialize, Serialize};

use crate::core::config::BodyConfig;
use crate::core::error::{RadarError, Result};

/// Immutable character matrix drawn for a moving object
///
/// `width` is the length of the first row and `height` the number of rows;
/// construction rejects empty and ragged matrices. Shapes are shared
/// between objects through `Arc<BodyShape>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyShape {
    matrix: Vec<Vec<char>>,
    width: usize,
    height: usize,
}

impl BodyShape {
    /// Build a shape from rows of cells
    pub fn new(matrix: Vec<Vec<char>>) -> Result<Self> {
        let width = matrix.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(RadarError::EmptyShape);
        }
        for (row, cells) in matrix.iter().enumerate() {
            if cells.len() != width {
                return Err(RadarError::RaggedShape {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
        }
        let height = matrix.len();
        Ok(Self {
            matrix,
            width,
            height,
        })
    }

    /// Parse a multi-line sprite string, one row per line
    pub fn parse(text: &str) -> Result<Self> {
        Self::new(text.lines().map(|line| line.chars().collect()).collect())
    }

    /// Parse a sprite that arrived from outside the process.
    ///
    /// The text must pass the size rule first; oversized sprites are
    /// rejected rather than truncated.
    pub fn parse_external(text: &str, limits: &BodyConfig) -> Result<Self> {
        validate_body_str(text, limits)?;
        Self::parse(text)
    }

    /// Parse a file of external sprites separated by blank lines.
    ///
    /// Line endings may be `\n` or `\r\n`; every sprite must pass the size rule.
    pub fn parse_many(text: &str, limits: &BodyConfig) -> Result<Vec<Self>> {
        let mut shapes = Vec::new();
        let mut block: Vec<&str> = Vec::new();
        for line in text.lines().chain(std::iter::once("")) {
            if line.trim().is_empty() {
                if !block.is_empty() {
                    shapes.push(Self::parse_external(&block.join("\n"), limits)?);
                    block.clear();
                }
            } else {
                block.push(line);
            }
        }
        Ok(shapes)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row `index` of the sprite
    pub fn line(&self, index: usize) -> Option<&[char]> {
        self.matrix.get(index).map(Vec::as_slice)
    }

    /// Rows top to bottom
    pub fn lines(&self) -> impl Iterator<Item = &[char]> + '_ {
        self.matrix.iter().map(Vec::as_slice)
    }
}

impl std::fmt::Display for BodyShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, line) in self.lines().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for c in line {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

/// Check a raw sprite string against the configured size limits
pub fn validate_body_str(text: &str, limits: &BodyConfig) -> Result<()> {
    let mut lines = text.lines();
    let width = lines.next().map_or(0, |line| line.chars().count());
    if width == 0 {
        return Err(RadarError::EmptyShape);
    }
    let height = 1 + lines.count();
    if width > limits.max_width || height > limits.max_height {
        return Err(RadarError::OversizedShape {
            width,
            height,
            max_width: limits.max_width,
            max_height: limits.max_height,
        });
    }
    Ok(())
}
