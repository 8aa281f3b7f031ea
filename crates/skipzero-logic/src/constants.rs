//! Plugin identity, permission and command names, damage type IDs.

/// Human-readable plugin name.
pub const PLUGIN_NAME: &str = "Skip Zero Damage";

/// Plugin author, as registered with the host.
pub const PLUGIN_AUTHOR: &str = "WhiteThunder";

/// Plugin version, as registered with the host.
pub const PLUGIN_VERSION: &str = "1.0.0";

/// One-line plugin description.
pub const PLUGIN_DESCRIPTION: &str = "Prevents processing damage that will amount to 0.";

/// File stem of the persisted configuration (`SkipZeroDamage.json`).
pub const CONFIG_NAME: &str = "SkipZeroDamage";

/// Permission that grants access to the damage-block report.
pub const PERMISSION_REPORT: &str = "skipzerodamage.report";

/// Command that prints the damage-block report.
pub const COMMAND_REPORT: &str = "skipzerodamage.report";

/// Damage type IDs carried by a hit (u8 for compact storage).
pub mod damage_types {
    pub const GENERIC: u8 = 0;
    pub const BULLET: u8 = 1;
    pub const SLASH: u8 = 2;
    pub const BLUNT: u8 = 3;
    pub const STAB: u8 = 4;
    pub const EXPLOSION: u8 = 5;
    pub const HEAT: u8 = 6;
    pub const DECAY: u8 = 7;
    pub const ARROW: u8 = 8;

    pub const COUNT: u8 = 9;

    pub fn name(damage_type: u8) -> &'static str {
        match damage_type {
            GENERIC => "Generic",
            BULLET => "Bullet",
            SLASH => "Slash",
            BLUNT => "Blunt",
            STAB => "Stab",
            EXPLOSION => "Explosion",
            HEAT => "Heat",
            DECAY => "Decay",
            ARROW => "Arrow",
            _ => "Unknown",
        }
    }
}
