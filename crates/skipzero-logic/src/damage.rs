//! Damage classification and blocked-damage statistics.
//!
//! Every relevant damage event is classified exactly once, before the host
//! runs its damage pipeline. Suppressed events are fully cancelled by the
//! host; allowed events proceed unmodified.
//!
//! ```
//! use skipzero_logic::damage::{classify, DamageOutcome, DamageStats};
//!
//! let mut stats = DamageStats::default();
//! assert_eq!(classify(0.0, 5.0, &mut stats), DamageOutcome::Suppress);
//! assert_eq!(classify(3.0, 5.0, &mut stats), DamageOutcome::Suppress);
//! assert_eq!(classify(5.0, 5.0, &mut stats), DamageOutcome::Allow);
//! assert_eq!(stats.zero_damage_blocked, 1);
//! assert_eq!(stats.low_damage_blocked, 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::damage_types;

/// What the host must do with a damage event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageOutcome {
    /// Let the event proceed unmodified.
    Allow,
    /// Cancel the event entirely.
    Suppress,
}

impl DamageOutcome {
    pub fn is_suppressed(self) -> bool {
        matches!(self, Self::Suppress)
    }
}

/// Running counters of blocked damage. Process-lifetime.
///
/// The counts never decrease. The cumulative sum only grows while the host
/// reports non-negative totals; a negative total is below any non-negative
/// threshold and is summed as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageStats {
    /// Events whose total damage was exactly zero.
    pub zero_damage_blocked: u64,
    /// Events with non-zero damage below the threshold.
    pub low_damage_blocked: u64,
    /// Sum of the damage carried by low-damage events.
    pub low_damage_cumulative: f32,
}

/// Classify a damage amount against the threshold, updating `stats`.
///
/// Zero is always suppressed. Otherwise the comparison is strict, so an
/// amount equal to the threshold passes.
pub fn classify(amount: f32, threshold: f32, stats: &mut DamageStats) -> DamageOutcome {
    if amount == 0.0 {
        stats.zero_damage_blocked += 1;
        return DamageOutcome::Suppress;
    }

    if amount < threshold {
        stats.low_damage_blocked += 1;
        stats.low_damage_cumulative += amount;
        return DamageOutcome::Suppress;
    }

    DamageOutcome::Allow
}

/// What kind of entity is being damaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetKind {
    /// Walls, floors, foundations and other building parts.
    BuildingBlock,
    /// Players, NPCs, deployables, vehicles, ...
    Other,
}

impl TargetKind {
    /// Only damage to building blocks goes through the filter.
    pub fn is_filtered(self) -> bool {
        matches!(self, Self::BuildingBlock)
    }
}

/// Per-type damage amounts carried by one hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageTypes {
    amounts: Vec<(u8, f32)>,
}

impl DamageTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` of `damage_type`, merging with any amount already present.
    pub fn add(&mut self, damage_type: u8, amount: f32) -> &mut Self {
        match self.amounts.iter_mut().find(|(t, _)| *t == damage_type) {
            Some((_, existing)) => *existing += amount,
            None => self.amounts.push((damage_type, amount)),
        }
        self
    }

    /// Total damage across all types; this is what the filter sees.
    pub fn total(&self) -> f32 {
        self.amounts.iter().map(|(_, a)| a).sum()
    }

    pub fn describe(&self) -> String {
        self.amounts
            .iter()
            .map(|(t, a)| format!("{}={}", damage_types::name(*t), a))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A damage event as handed over by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageEvent {
    pub target: TargetKind,
    pub damage: DamageTypes,
}

impl DamageEvent {
    pub fn new(target: TargetKind, damage: DamageTypes) -> Self {
        Self { target, damage }
    }

    pub fn total_damage(&self) -> f32 {
        self.damage.total()
    }
}
