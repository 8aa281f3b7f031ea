//! Property sweeps for configuration reconciliation and damage filtering.
//!
//! Exercises: default Document + arbitrary current Document → reconcile
//! → PluginConfig → classify → format_report
//!
//! Documents are generated from a deterministic seed so failures reproduce.

use skipzero_logic::config::PluginConfig;
use skipzero_logic::damage::{classify, DamageOutcome, DamageStats};
use skipzero_logic::document::{
    get_path, key_paths, reconcile, ConfigValue, Document, Scalar, Shape,
};
use skipzero_logic::report::format_report;

// ── Helpers ────────────────────────────────────────────────────────────

/// Deterministic hash for seeded generation, returns 0..modulo.
fn simple_hash(seed: u64, index: u64, modulo: u64) -> u64 {
    let mut h = seed
        .wrapping_mul(6364136223846793005)
        .wrapping_add(index);
    h ^= h >> 33;
    h = h.wrapping_mul(0xff51afd7ed558ccd);
    h ^= h >> 33;
    h % modulo
}

const KEYS: [&str; 6] = ["Alpha", "Beta", "Gamma", "Delta", "LowDamageThreshold", "Omega"];

fn gen_value(seed: u64, depth: u32, counter: &mut u64) -> ConfigValue {
    *counter += 1;
    let pick = simple_hash(seed, *counter, if depth >= 3 { 4 } else { 6 });
    match pick {
        0 => ConfigValue::from(simple_hash(seed, *counter + 1000, 100) as i64),
        1 => ConfigValue::from(simple_hash(seed, *counter, 2) == 0),
        2 => ConfigValue::from(format!("text-{}", *counter)),
        3 => ConfigValue::Scalar(Scalar::Null),
        4 => {
            let len = simple_hash(seed, *counter + 7, 3);
            ConfigValue::Sequence((0..len).map(|_| gen_value(seed, depth + 1, counter)).collect())
        }
        _ => ConfigValue::Mapping(gen_doc(seed, depth + 1, counter)),
    }
}

fn gen_doc(seed: u64, depth: u32, counter: &mut u64) -> Document {
    let mut doc = Document::new();
    for key in KEYS {
        *counter += 1;
        if simple_hash(seed, *counter, 3) != 0 {
            doc.insert(key.to_string(), gen_value(seed, depth, counter));
        }
    }
    doc
}

fn gen_pair(seed: u64) -> (Document, Document) {
    let mut counter = 0;
    let mut defaults = gen_doc(seed, 0, &mut counter);
    if defaults.is_empty() {
        defaults.insert("LowDamageThreshold".into(), ConfigValue::from(0));
    }
    let current = gen_doc(seed.wrapping_add(0x9e37), 0, &mut counter);
    (defaults, current)
}

/// Paths both documents share where the default is not a mapping; the
/// current value there must survive reconciliation untouched.
fn preserved_paths(defaults: &Document, current: &Document) -> Vec<(String, ConfigValue)> {
    key_paths(current)
        .into_iter()
        .filter_map(|path| {
            let d = get_path(defaults, &path)?;
            let c = get_path(current, &path)?;
            if d.shape() == Shape::Mapping {
                None
            } else {
                Some((path, c.clone()))
            }
        })
        .collect()
}

// ── Reconciliation properties ──────────────────────────────────────────

#[test]
fn reconcile_is_idempotent() {
    for seed in 0..300 {
        let (defaults, mut current) = gen_pair(seed);
        reconcile(&defaults, &mut current);
        let once = current.clone();
        assert!(
            !reconcile(&defaults, &mut current),
            "seed {}: second pass reported a change",
            seed
        );
        assert_eq!(current, once, "seed {}: second pass mutated", seed);
    }
}

#[test]
fn reconcile_fills_every_default_path() {
    for seed in 0..300 {
        let (defaults, mut current) = gen_pair(seed);
        reconcile(&defaults, &mut current);
        for path in key_paths(&defaults) {
            let d = get_path(&defaults, &path);
            let c = get_path(&current, &path);
            assert!(c.is_some(), "seed {}: path {} missing", seed, path);
            if d.map(ConfigValue::shape) == Some(Shape::Mapping) {
                assert_eq!(
                    c.map(ConfigValue::shape),
                    Some(Shape::Mapping),
                    "seed {}: mapping path {} has wrong shape",
                    seed,
                    path
                );
            }
        }
    }
}

#[test]
fn reconcile_never_overwrites_user_leaves() {
    for seed in 0..300 {
        let (defaults, original) = gen_pair(seed);
        let expected = preserved_paths(&defaults, &original);
        let mut current = original.clone();
        reconcile(&defaults, &mut current);
        for (path, value) in expected {
            assert_eq!(
                get_path(&current, &path),
                Some(&value),
                "seed {}: path {} overwritten",
                seed,
                path
            );
        }
    }
}

#[test]
fn reconcile_keeps_unknown_top_level_keys() {
    for seed in 0..100 {
        let (defaults, original) = gen_pair(seed);
        let mut current = original.clone();
        reconcile(&defaults, &mut current);
        for (key, value) in &original {
            if !defaults.contains_key(key) {
                assert_eq!(current.get(key), Some(value), "seed {}: key {}", seed, key);
            }
        }
    }
}

#[test]
fn reconcile_reports_change_iff_document_differs() {
    for seed in 0..300 {
        let (defaults, original) = gen_pair(seed);
        let mut current = original.clone();
        let changed = reconcile(&defaults, &mut current);
        assert_eq!(changed, current != original, "seed {}", seed);
    }
}

// ── Scenarios ──────────────────────────────────────────────────────────

#[test]
fn empty_document_takes_default_threshold() {
    let mut defaults = Document::new();
    defaults.insert("LowDamageThreshold".into(), ConfigValue::from(5));
    let mut current = Document::new();
    assert!(reconcile(&defaults, &mut current));
    assert_eq!(current, defaults);
}

#[test]
fn user_threshold_survives() {
    let mut defaults = Document::new();
    defaults.insert("LowDamageThreshold".into(), ConfigValue::from(5));
    let mut current = Document::new();
    current.insert("LowDamageThreshold".into(), ConfigValue::from(10));
    assert!(!reconcile(&defaults, &mut current));
    assert_eq!(current["LowDamageThreshold"], ConfigValue::from(10));
}

#[test]
fn persisted_text_flows_through_to_report() {
    let text = r#"{ "LowDamageThreshold": 5, "Legacy": { "Old": true } }"#;
    let mut current: Document = serde_json::from_str(text).unwrap();
    assert!(!reconcile(&PluginConfig::default_document().unwrap(), &mut current));
    let config = PluginConfig::from_document(&current).unwrap();

    let mut stats = DamageStats::default();
    let outcomes: Vec<DamageOutcome> = [0.0, 3.0, 5.0, 7.0]
        .iter()
        .map(|a| classify(*a, config.low_damage_threshold, &mut stats))
        .collect();
    assert_eq!(
        outcomes,
        vec![
            DamageOutcome::Suppress,
            DamageOutcome::Suppress,
            DamageOutcome::Allow,
            DamageOutcome::Allow
        ]
    );

    let report = format_report(&stats, config.low_damage_threshold);
    assert_eq!(
        report,
        "Zero-damage events blocked: 1\n\
         Low-damage events blocked (below 5): 1\n\
         Low-damage cumulatively blocked: 3"
    );
}

#[test]
fn classify_boundary_sweep() {
    for t in [0.5f32, 1.0, 5.0, 37.25, 500.0] {
        let mut stats = DamageStats::default();
        assert_eq!(classify(0.0, t, &mut stats), DamageOutcome::Suppress);
        assert_eq!(classify(t, t, &mut stats), DamageOutcome::Allow);
        let below = t - t * 0.01;
        assert_eq!(classify(below, t, &mut stats), DamageOutcome::Suppress);
        assert_eq!(stats.zero_damage_blocked, 1);
        assert_eq!(stats.low_damage_blocked, 1);
        assert_eq!(stats.low_damage_cumulative, below);
    }
}
