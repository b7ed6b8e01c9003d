//! Built-in alien bodies
//!
//! `BodyLibrary` is created once by the entry point and handed to whatever
//! needs shapes; there is no process-wide pool.

use std::sync::Arc;

use crate::body::shape::BodyShape;
use crate::core::error::Result;

/// Sprite strings of the three default aliens (11x8, 8x8, 15x7)
pub const DEFAULT_BODIES: [&str; 3] = [
    "\
--o-----o--
---o---o---
--ooooooo--
-oo-ooo-oo-
ooooooooooo
o-ooooooo-o
o-o-----o-o
---oo-oo---",
    "\
---oo---
--oooo--
-oooooo-
oo-oo-oo
oooooooo
--o--o--
-o-oo-o-
o-o--o-o",
    "\
-------o-------
-----ooooo-----
---oo--o--oo---
ooooooooooooooo
---oo-----oo---
--o--ooooo--o--
-oo---------oo-",
];

/// Ordered set of shared body shapes
#[derive(Debug, Clone, Default)]
pub struct BodyLibrary {
    bodies: Vec<Arc<BodyShape>>,
}

impl BodyLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Library holding the three default aliens
    pub fn with_defaults() -> Result<Self> {
        let mut library = Self::new();
        for text in DEFAULT_BODIES {
            library.push(BodyShape::parse(text)?);
        }
        tracing::debug!("Generated {} default bodies", library.len());
        Ok(library)
    }

    /// Add a shape and return its index
    pub fn push(&mut self, shape: BodyShape) -> usize {
        self.bodies.push(Arc::new(shape));
        self.bodies.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<Arc<BodyShape>> {
        self.bodies.get(index).cloned()
    }

    pub fn first(&self) -> Option<Arc<BodyShape>> {
        self.get(0)
    }

    pub fn second(&self) -> Option<Arc<BodyShape>> {
        self.get(1)
    }

    pub fn third(&self) -> Option<Arc<BodyShape>> {
        self.get(2)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<BodyShape>> + '_ {
        self.bodies.iter()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
