//! Reconciliation of zone objects against an external body source
//!
//! A body source knows which sprite records are still alive. A zone hands
//! it the keys it currently simulates and gets back the keys to drop and
//! the new records it should start simulating.

use std::collections::BTreeMap;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::core::error::Result;

/// Answer of a body source to one reconciliation request
///
/// Invariants kept by implementors: every dropped key was in the known set,
/// and `new_records` holds only keys outside the known set, at most
/// `max_capacity - |known - dropped|` of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    #[serde(default)]
    pub dropped_keys: Vec<String>,
    #[serde(default)]
    pub new_records: BTreeMap<String, String>,
}

impl Reconciliation {
    /// Decode the JSON reply format `{"dropped_keys": [...], "new_records": {...}}`
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_empty(&self) -> bool {
        self.dropped_keys.is_empty() && self.new_records.is_empty()
    }
}

/// Source of live body records
pub trait Reconciler {
    fn reconcile(&mut self, known_keys: &AHashSet<String>, max_capacity: usize) -> Result<Reconciliation>;
}

/// What applying a reconciliation did to a zone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Keys whose objects were removed
    pub removed: Vec<String>,
    /// Keys whose objects were placed
    pub added: Vec<String>,
    /// Keys whose sprite failed validation, with the reason
    pub rejected: Vec<(String, String)>,
    /// Keys whose sprite was valid but found no free spot
    pub unplaced: Vec<String>,
}
