//! Skip Zero Damage Headless Harness
//!
//! Drives the plugin against an in-memory host: config store, callers and
//! permission registry. No game server, no files on disk.
//!
//! Usage:
//!   cargo run -p skipzero-simtest
//!   cargo run -p skipzero-simtest -- --verbose

use serde_json::json;
use skipzero_logic::access::DENIAL_MESSAGE;
use skipzero_logic::config::PluginConfig;
use skipzero_logic::constants::{damage_types, CONFIG_NAME, PERMISSION_REPORT};
use skipzero_logic::damage::{DamageEvent, DamageOutcome, DamageTypes, TargetKind};
use skipzero_logic::document::{get_path, key_paths, reconcile, Document};
use skipzero_plugin::host::{PermissionSet, RecordingCaller};
use skipzero_plugin::{plugin_info, ConfigLoad, MemoryStore, SkipZeroDamage};

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    let info = plugin_info();
    println!(
        "=== {} v{} Harness ===\n{}\n",
        info.name, info.version, info.description
    );

    let mut results = Vec::new();

    // 1. Document reconciliation
    results.extend(validate_reconciliation(verbose));

    // 2. Config load and recovery
    results.extend(validate_config_loading(verbose));

    // 3. Damage filter sweep
    results.extend(validate_damage_filter(verbose));

    // 4. Report command and access
    results.extend(validate_report_command(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn to_document(value: serde_json::Value) -> Option<Document> {
    serde_json::from_value(value).ok()
}

fn config_store(text: Option<&str>) -> MemoryStore {
    let name = format!("{}.json", CONFIG_NAME);
    match text {
        Some(t) => MemoryStore::with_text(&name, t),
        None => MemoryStore::new(&name),
    }
}

fn building_hit(amount: f32) -> DamageEvent {
    let mut damage = DamageTypes::new();
    damage.add(damage_types::BULLET, amount);
    DamageEvent::new(TargetKind::BuildingBlock, damage)
}

// ── 1. Reconciliation ───────────────────────────────────────────────────

fn validate_reconciliation(verbose: bool) -> Vec<TestResult> {
    println!("--- Document Reconciliation ---");
    let mut results = Vec::new();

    let (Some(defaults), Some(original)) = (
        to_document(json!({
            "LowDamageThreshold": 5,
            "Display": { "Color": "#ffffff", "Channels": ["chat"], "Limits": { "Max": 10 } }
        })),
        to_document(json!({
            "Legacy": true,
            "Display": { "Color": "red", "Limits": 3 }
        })),
    ) else {
        results.push(TestResult {
            name: "reconcile_fixture_parse".into(),
            passed: false,
            detail: "fixture JSON did not convert to documents".into(),
        });
        return results;
    };

    let mut current = original.clone();
    let changed = reconcile(&defaults, &mut current);
    results.push(TestResult {
        name: "reconcile_reports_change".into(),
        passed: changed,
        detail: format!("{} keys after first pass", key_paths(&current).len()),
    });

    let missing: Vec<String> = key_paths(&defaults)
        .into_iter()
        .filter(|p| get_path(&current, p).is_none())
        .collect();
    results.push(TestResult {
        name: "reconcile_default_complete".into(),
        passed: missing.is_empty(),
        detail: if missing.is_empty() {
            "every default path present".into()
        } else {
            format!("missing: {}", missing.join(", "))
        },
    });

    results.push(TestResult {
        name: "reconcile_keeps_user_values".into(),
        passed: get_path(&current, "Display.Color") == get_path(&original, "Display.Color")
            && current.get("Legacy") == original.get("Legacy"),
        detail: "Display.Color and Legacy untouched".into(),
    });

    results.push(TestResult {
        name: "reconcile_replaces_mapping_mismatch".into(),
        passed: get_path(&current, "Display.Limits.Max") == get_path(&defaults, "Display.Limits.Max"),
        detail: "scalar under a default mapping key replaced".into(),
    });

    let once = current.clone();
    let changed_again = reconcile(&defaults, &mut current);
    results.push(TestResult {
        name: "reconcile_idempotent".into(),
        passed: !changed_again && current == once,
        detail: "second pass is a no-op".into(),
    });

    if verbose {
        println!(
            "  reconciled: {}",
            serde_json::to_string(&current).unwrap_or_default()
        );
    }

    results
}

// ── 2. Config loading ───────────────────────────────────────────────────

fn validate_config_loading(verbose: bool) -> Vec<TestResult> {
    println!("--- Config Loading ---");
    let mut results = Vec::new();

    let cases: [(&str, Option<&str>, ConfigLoad, usize); 6] = [
        ("missing", None, ConfigLoad::Defaulted, 1),
        ("empty_object", Some("{}"), ConfigLoad::Updated, 1),
        ("complete", Some(r#"{"LowDamageThreshold": 10}"#), ConfigLoad::Unchanged, 0),
        ("malformed", Some("{ oops"), ConfigLoad::Defaulted, 1),
        ("null", Some("null"), ConfigLoad::Defaulted, 1),
        ("wrong_type", Some(r#"{"LowDamageThreshold": [1]}"#), ConfigLoad::Defaulted, 1),
    ];

    for (name, text, expected, expected_saves) in cases {
        let mut plugin = SkipZeroDamage::new(config_store(text));
        let load = plugin.load_config();
        let saves = plugin.store().saves();
        if verbose {
            println!("  {:<14} → {:?} ({} saves)", name, load, saves);
        }
        results.push(TestResult {
            name: format!("config_load_{}", name),
            passed: load == expected && saves == expected_saves,
            detail: format!("{:?}, {} saves", load, saves),
        });
    }

    let mut plugin = SkipZeroDamage::new(config_store(Some(r#"{"LowDamageThreshold": 10}"#)));
    plugin.load_config();
    results.push(TestResult {
        name: "config_user_threshold".into(),
        passed: plugin.config().low_damage_threshold == 10.0,
        detail: format!("threshold = {}", plugin.config().low_damage_threshold),
    });

    let mut plugin = SkipZeroDamage::new(config_store(None).fail_saves());
    let load = plugin.load_config();
    results.push(TestResult {
        name: "config_save_failure_non_fatal".into(),
        passed: load == ConfigLoad::Defaulted && plugin.config() == &PluginConfig::default(),
        detail: "defaults in effect despite failed save".into(),
    });

    results
}

// ── 3. Damage filter ────────────────────────────────────────────────────

fn validate_damage_filter(verbose: bool) -> Vec<TestResult> {
    println!("--- Damage Filter ---");
    let mut results = Vec::new();

    let mut plugin = SkipZeroDamage::new(config_store(Some(r#"{"LowDamageThreshold": 5}"#)));
    plugin.load_config();

    let outcomes: Vec<DamageOutcome> = [0.0, 3.0, 5.0, 7.0]
        .iter()
        .map(|a| plugin.on_entity_take_damage(&building_hit(*a)))
        .collect();
    results.push(TestResult {
        name: "filter_scenario_outcomes".into(),
        passed: outcomes
            == [
                DamageOutcome::Suppress,
                DamageOutcome::Suppress,
                DamageOutcome::Allow,
                DamageOutcome::Allow,
            ],
        detail: format!("{:?}", outcomes),
    });

    let stats = plugin.stats().clone();
    results.push(TestResult {
        name: "filter_scenario_counters".into(),
        passed: stats.zero_damage_blocked == 1
            && stats.low_damage_blocked == 1
            && stats.low_damage_cumulative == 3.0,
        detail: format!(
            "zero={} low={} cumulative={}",
            stats.zero_damage_blocked, stats.low_damage_blocked, stats.low_damage_cumulative
        ),
    });

    // Sweep amounts 0.0..10.0 in 0.25 steps against threshold 5
    let mut plugin = SkipZeroDamage::new(config_store(Some(r#"{"LowDamageThreshold": 5}"#)));
    plugin.load_config();
    let mut expected_low = 0u64;
    let mut expected_sum = 0.0f32;
    let mut consistent = true;
    for step in 0..40 {
        let amount = step as f32 * 0.25;
        let outcome = plugin.on_entity_take_damage(&building_hit(amount));
        let should_suppress = amount == 0.0 || amount < 5.0;
        if amount > 0.0 && amount < 5.0 {
            expected_low += 1;
            expected_sum += amount;
        }
        if outcome.is_suppressed() != should_suppress {
            consistent = false;
        }
    }
    let stats = plugin.stats();
    results.push(TestResult {
        name: "filter_sweep_consistent".into(),
        passed: consistent
            && stats.low_damage_blocked == expected_low
            && stats.low_damage_cumulative == expected_sum,
        detail: format!(
            "{} low events, {} cumulative",
            stats.low_damage_blocked, stats.low_damage_cumulative
        ),
    });

    // Threshold 0 only blocks exact zero
    let mut plugin = SkipZeroDamage::new(config_store(None));
    plugin.load_config();
    let tiny = plugin.on_entity_take_damage(&building_hit(0.0001));
    let zero = plugin.on_entity_take_damage(&building_hit(0.0));
    results.push(TestResult {
        name: "filter_zero_threshold".into(),
        passed: tiny == DamageOutcome::Allow && zero == DamageOutcome::Suppress,
        detail: "0.0001 allowed, 0 suppressed".into(),
    });

    // Non-building targets are not filtered
    let mut other = DamageTypes::new();
    other.add(damage_types::SLASH, 0.0);
    let before = plugin.stats().clone();
    let outcome = plugin.on_entity_take_damage(&DamageEvent::new(TargetKind::Other, other));
    results.push(TestResult {
        name: "filter_ignores_other_targets".into(),
        passed: outcome == DamageOutcome::Allow && plugin.stats() == &before,
        detail: "zero damage to a player passes through".into(),
    });

    if verbose {
        println!("  final stats: {:?}", plugin.stats());
    }

    results
}

// ── 4. Report command ───────────────────────────────────────────────────

fn validate_report_command(verbose: bool) -> Vec<TestResult> {
    println!("--- Report Command ---");
    let mut results = Vec::new();

    let mut registry = PermissionSet::default();
    let mut plugin = SkipZeroDamage::new(config_store(None));
    plugin.init(&mut registry);
    plugin.load_config();
    plugin.on_entity_take_damage(&building_hit(0.0));

    results.push(TestResult {
        name: "report_permission_registered".into(),
        passed: registry.is_registered(PERMISSION_REPORT),
        detail: PERMISSION_REPORT.into(),
    });

    let mut player = RecordingCaller::player(&[]);
    plugin.report_command(&mut player);
    results.push(TestResult {
        name: "report_denies_plain_player".into(),
        passed: player.last_reply() == Some(DENIAL_MESSAGE),
        detail: player.last_reply().unwrap_or("<no reply>").into(),
    });

    let mut granted = RecordingCaller::player(&[PERMISSION_REPORT]);
    plugin.report_command(&mut granted);
    let report = granted.last_reply().unwrap_or_default().to_string();
    results.push(TestResult {
        name: "report_zero_threshold_short".into(),
        passed: report == "Zero-damage events blocked: 1",
        detail: report.replace('\n', " | "),
    });

    let mut plugin = SkipZeroDamage::new(config_store(Some(r#"{"LowDamageThreshold": 5}"#)));
    plugin.load_config();
    plugin.on_entity_take_damage(&building_hit(3.0));
    let mut admin = RecordingCaller::admin();
    plugin.report_command(&mut admin);
    let report = admin.last_reply().unwrap_or_default().to_string();
    results.push(TestResult {
        name: "report_threshold_full".into(),
        passed: report.contains("(below 5): 1") && report.contains("cumulatively blocked: 3"),
        detail: report.replace('\n', " | "),
    });

    if verbose {
        println!("  {}", report.replace('\n', "\n  "));
    }

    results
}
