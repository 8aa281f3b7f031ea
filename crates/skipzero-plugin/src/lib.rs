//! Skip Zero Damage host glue.
//!
//! Wires the pure logic in `skipzero-logic` to a simulation host: loads and
//! reconciles the persisted configuration, answers the damage hook, and
//! serves the report command. The host itself is reached only through the
//! traits in [`host`], so everything here runs the same against a real
//! server or an in-memory harness.

pub mod host;
pub mod plugin;
pub mod store;

pub use host::{Caller, ConfigStore, PermissionRegistry};
pub use plugin::{plugin_info, ConfigLoad, PluginInfo, SkipZeroDamage};
pub use store::{JsonFileStore, MemoryStore, StoreError};
