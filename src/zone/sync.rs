//! Applying body-source reconciliations to a zone

use std::sync::Arc;

use ahash::AHashSet;

use crate::body::shape::BodyShape;
use crate::core::error::Result;
use crate::motion::MovingObject;
use crate::reconcile::{Reconciler, Reconciliation, SyncReport};
use crate::zone::Zone;

impl Zone {
    /// Keys of the objects that came from a body source
    pub fn known_keys(&self) -> AHashSet<String> {
        self.objects.iter().filter_map(|obj| obj.key.clone()).collect()
    }

    /// Drop retired objects and place the new ones.
    ///
    /// Never fails as a whole: bad sprites and objects that find no room
    /// are listed in the report and skipped.
    pub fn apply_reconciliation(&mut self, update: &Reconciliation) -> SyncReport {
        let mut report = SyncReport::default();

        let dropped: AHashSet<&str> = update.dropped_keys.iter().map(String::as_str).collect();
        let removed = self.remove_where(|obj| {
            obj.key
                .as_deref()
                .is_some_and(|key| dropped.contains(key))
        });
        report.removed = removed.into_iter().filter_map(|obj| obj.key).collect();

        let known = self.known_keys();
        for (key, body) in &update.new_records {
            if known.contains(key) {
                tracing::debug!("Skipping {}: already simulated", key);
                continue;
            }
            let shape = match BodyShape::parse_external(body, &self.config.bodies) {
                Ok(shape) => shape,
                Err(e) => {
                    tracing::warn!("Rejected body {}: {}", key, e);
                    report.rejected.push((key.clone(), e.to_string()));
                    continue;
                }
            };
            let obj = MovingObject::new(Arc::new(shape), &mut self.rng).keyed(key.clone());
            match self.insert(obj) {
                Ok(()) => report.added.push(key.clone()),
                Err(e) => {
                    tracing::warn!("Could not place body {}: {}", key, e);
                    report.unplaced.push(key.clone());
                }
            }
        }

        tracing::debug!(
            "Reconciled zone: {} removed, {} added, {} rejected, {} unplaced",
            report.removed.len(),
            report.added.len(),
            report.rejected.len(),
            report.unplaced.len()
        );
        report
    }

    /// Ask `source` what changed and apply it
    pub fn sync<S: Reconciler + ?Sized>(&mut self, source: &mut S) -> Result<SyncReport> {
        let update = source.reconcile(&self.known_keys(), self.config.zone.max_objects)?;
        Ok(self.apply_reconciliation(&update))
    }
}
