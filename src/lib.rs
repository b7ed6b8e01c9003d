//! Alien Radar - ASCII zone simulation of wandering sprite-shaped objects

pub mod body;
pub mod core;
pub mod motion;
pub mod reconcile;
pub mod spatial;
pub mod zone;
