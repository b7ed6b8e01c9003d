//! Integration tests for keeping a zone in step with the body cache

use alien_radar::body::{BodyCache, BodyLibrary, BodyShape};
use alien_radar::core::SimulationConfig;
use alien_radar::reconcile::{Reconciler, Reconciliation};
use alien_radar::zone::Zone;
use ahash::AHashSet;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn empty_zone(config: SimulationConfig) -> Zone {
    Zone::new(Vec::new(), 120, 60, config, ChaCha8Rng::seed_from_u64(21)).expect("empty zone")
}

#[test]
fn test_zone_follows_cache_lifecycle() {
    let config = SimulationConfig::default();
    let mut cache = BodyCache::new(config.bodies.clone());
    let mut zone = empty_zone(config);

    let library = BodyLibrary::with_defaults().expect("default bodies");
    let a = cache.add_body(&library.first().expect("first").to_string()).expect("valid body");
    let b = cache.add_body(&library.second().expect("second").to_string()).expect("valid body");

    let report = zone.sync(&mut cache).expect("sync");
    assert_eq!(report.added.len(), 2);
    let expected: AHashSet<String> = [a.clone(), b.clone()].into_iter().collect();
    assert_eq!(zone.known_keys(), expected);

    // keep a alive, let b lapse
    cache.advance(cache.body_expiration() - 1);
    assert!(cache.ping_body(&a));
    cache.advance(1);
    assert!(!cache.is_live(&b));

    let report = zone.sync(&mut cache).expect("sync");
    assert_eq!(report.removed, vec![b]);
    assert!(report.added.is_empty());
    assert_eq!(zone.len(), 1);
    assert!(zone.occupancy_matches_objects());

    // keyed objects keep moving like any other
    for _ in 0..20 {
        zone.move_objects();
    }
    assert!(zone.occupancy_matches_objects());
}

#[test]
fn test_sync_respects_zone_capacity() {
    let mut config = SimulationConfig::default();
    config.zone.max_objects = 3;
    let mut cache = BodyCache::new(config.bodies.clone());
    let mut zone = empty_zone(config);

    for i in 0..5 {
        cache.add_body_with_id(&format!("{:02}", i), "ooo\no-o").expect("valid body");
    }

    let report = zone.sync(&mut cache).expect("sync");
    assert_eq!(report.added, vec!["body:00", "body:01", "body:02"]);
    assert_eq!(zone.len(), 3);

    // full zone gets nothing new
    let report = zone.sync(&mut cache).expect("sync");
    assert!(report.added.is_empty());
    assert!(report.removed.is_empty());
}

#[test]
fn test_cache_rejects_oversized_body() {
    let config = SimulationConfig::default();
    let mut cache = BodyCache::new(config.bodies.clone());
    let tall = vec!["o"; 16].join("\n");
    assert!(cache.add_body(&tall).is_err());
    assert!(cache.live_keys().is_empty());
}

#[test]
fn test_json_reply_applies_like_a_source() {
    let mut zone = empty_zone(SimulationConfig::default());
    let wide = "o".repeat(20);
    let json = format!(
        r#"{{"dropped_keys":[],"new_records":{{"body:x":"oo\noo","body:y":"{}"}}}}"#,
        wide
    );
    let update = Reconciliation::from_json(&json).expect("valid reply");
    let report = zone.apply_reconciliation(&update);
    assert_eq!(report.added, vec!["body:x"]);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].0, "body:y");
}

#[test]
fn test_cache_reconcile_contract() {
    let mut cache = BodyCache::new(SimulationConfig::default().bodies);
    let kept = cache.add_body_with_id("kept", "o").expect("valid");
    let fresh = cache.add_body_with_id("fresh", "o").expect("valid");

    let known: AHashSet<String> = [kept.clone(), "body:gone".to_string()].into_iter().collect();
    let update = cache.reconcile(&known, 10).expect("reconcile");
    assert_eq!(update.dropped_keys, vec!["body:gone"]);
    assert_eq!(update.new_records.keys().collect::<Vec<_>>(), vec![&fresh]);
    assert!(!update.new_records.contains_key(&kept));
}

#[test]
fn test_periodic_sync_from_sprite_file() {
    let config = SimulationConfig::default();
    let sprites = "oo\r\noo\r\n\r\n-o-\r\nooo\r\n";
    let shapes = BodyShape::parse_many(sprites, &config.bodies).expect("valid sprites");

    let mut cache = BodyCache::new(config.bodies.clone());
    for shape in &shapes {
        cache.add_body(&shape.to_string()).expect("valid body");
    }
    let ttl = cache.body_expiration();
    let mut zone = empty_zone(config);
    zone.sync(&mut cache).expect("sync");
    assert_eq!(zone.len(), 2);

    // records are never pinged, so both leave once their TTL runs out
    let every = 10;
    for _ in 0..ttl + every {
        let report = zone.move_objects();
        cache.advance(1);
        if report.tick % every == 0 {
            cache.purge_expired();
            zone.sync(&mut cache).expect("sync");
        }
        assert!(zone.occupancy_matches_objects());
    }
    assert!(zone.is_empty());
    assert_eq!(zone.occupancy().occupied_count(), 0);
}
