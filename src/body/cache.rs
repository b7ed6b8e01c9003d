//! In-memory body cache with expiring records
//!
//! Records are raw sprite strings keyed by `body:<id>`. Every record lives
//! for `ttl_ticks` of the cache clock unless it is pinged. The cache answers
//! reconciliation requests from zones: which of their keys died, and which
//! live records they have not seen yet.

use ahash::{AHashMap, AHashSet};
use uuid::Uuid;

use crate::body::shape::validate_body_str;
use crate::core::config::BodyConfig;
use crate::core::error::Result;
use crate::core::types::Tick;
use crate::reconcile::{Reconciliation, Reconciler};

const KEY_PREFIX: &str = "body:";

#[derive(Debug, Clone)]
struct CachedBody {
    body: String,
    expires_at: Tick,
}

/// Expiring store of externally supplied sprites
#[derive(Debug, Clone)]
pub struct BodyCache {
    records: AHashMap<String, CachedBody>,
    limits: BodyConfig,
    now: Tick,
}

impl BodyCache {
    pub fn new(limits: BodyConfig) -> Self {
        Self {
            records: AHashMap::new(),
            limits,
            now: 0,
        }
    }

    /// Full TTL given to new and pinged records
    pub fn body_expiration(&self) -> u64 {
        self.limits.ttl_ticks
    }

    pub fn make_body_key(id: &str) -> String {
        format!("{}{}", KEY_PREFIX, id)
    }

    /// Store a sprite under a fresh random id and return its key
    pub fn add_body(&mut self, body: &str) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        self.add_body_with_id(&id, body)
    }

    /// Store a sprite under `id`, replacing any previous record
    pub fn add_body_with_id(&mut self, id: &str, body: &str) -> Result<String> {
        validate_body_str(body, &self.limits)?;
        let key = Self::make_body_key(id);
        self.records.insert(
            key.clone(),
            CachedBody {
                body: body.to_string(),
                expires_at: self.now + self.limits.ttl_ticks,
            },
        );
        tracing::debug!("Cached body {}", key);
        Ok(key)
    }

    /// Reset a live record's TTL. Returns false for unknown or expired keys.
    pub fn ping_body(&mut self, key: &str) -> bool {
        let now = self.now;
        let ttl = self.limits.ttl_ticks;
        match self.records.get_mut(key) {
            Some(record) if record.expires_at > now => {
                record.expires_at = now + ttl;
                true
            }
            _ => false,
        }
    }

    /// Remaining lifetime of a live record
    pub fn ttl(&self, key: &str) -> Option<u64> {
        self.records
            .get(key)
            .filter(|r| r.expires_at > self.now)
            .map(|r| r.expires_at - self.now)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.records
            .get(key)
            .filter(|r| r.expires_at > self.now)
            .map(|r| r.body.as_str())
    }

    pub fn is_live(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Advance the cache clock
    pub fn advance(&mut self, ticks: u64) {
        self.now += ticks;
    }

    pub fn now(&self) -> Tick {
        self.now
    }

    /// Drop expired records, returning how many were removed
    pub fn purge_expired(&mut self) -> usize {
        let now = self.now;
        let before = self.records.len();
        self.records.retain(|_, r| r.expires_at > now);
        before - self.records.len()
    }

    /// Live keys in ascending order
    pub fn live_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .records
            .iter()
            .filter(|(_, r)| r.expires_at > self.now)
            .map(|(k, _)| k.clone())
            .collect();
        keys.sort();
        keys
    }
}

impl Reconciler for BodyCache {
    fn reconcile(&mut self, known_keys: &AHashSet<String>, max_capacity: usize) -> Result<Reconciliation> {
        let mut dropped_keys: Vec<String> = known_keys
            .iter()
            .filter(|key| !self.is_live(key))
            .cloned()
            .collect();
        dropped_keys.sort();

        let kept = known_keys.len() - dropped_keys.len();
        let room = max_capacity.saturating_sub(kept);

        let new_records = self
            .live_keys()
            .into_iter()
            .filter(|key| !known_keys.contains(key))
            .take(room)
            .filter_map(|key| self.get(&key).map(|body| (key.clone(), body.to_string())))
            .collect();

        let result = Reconciliation {
            dropped_keys,
            new_records,
        };
        tracing::debug!(
            "Reconciled {} known keys: {} dropped, {} new",
            known_keys.len(),
            result.dropped_keys.len(),
            result.new_records.len()
        );
        Ok(result)
    }
}
