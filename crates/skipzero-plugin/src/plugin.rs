//! The Skip Zero Damage plugin object.
//!
//! Lifecycle, as driven by the host:
//!
//! 1. [`SkipZeroDamage::init`] registers the report permission.
//! 2. [`SkipZeroDamage::load_config`] loads, reconciles, and (if needed)
//!    saves the configuration, then publishes the typed config.
//! 3. [`SkipZeroDamage::on_entity_take_damage`] runs once per damage event.
//! 4. [`SkipZeroDamage::handle_command`] serves the report command.

use skipzero_logic::access::{check_report_access, ReportAccessRequest};
use skipzero_logic::config::PluginConfig;
use skipzero_logic::constants::{
    COMMAND_REPORT, PERMISSION_REPORT, PLUGIN_AUTHOR, PLUGIN_DESCRIPTION, PLUGIN_NAME,
    PLUGIN_VERSION,
};
use skipzero_logic::damage::{classify, DamageEvent, DamageOutcome, DamageStats};
use skipzero_logic::document::{reconcile, Document, DocumentError};
use skipzero_logic::report::format_report;

use crate::host::{Caller, ConfigStore, PermissionRegistry};
use crate::store::StoreError;

/// Plugin metadata registered with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginInfo {
    pub name: &'static str,
    pub author: &'static str,
    pub version: &'static str,
    pub description: &'static str,
}

pub fn plugin_info() -> PluginInfo {
    PluginInfo {
        name: PLUGIN_NAME,
        author: PLUGIN_AUTHOR,
        version: PLUGIN_VERSION,
        description: PLUGIN_DESCRIPTION,
    }
}

/// How the last configuration load went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLoad {
    /// Stored document already had every default key.
    Unchanged,
    /// Missing keys were filled in and the document was saved.
    Updated,
    /// Nothing usable was stored; defaults were used and saved.
    Defaulted,
}

#[derive(Debug, thiserror::Error)]
enum LoadFailure {
    #[error("no configuration file")]
    Missing,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Invalid(#[from] DocumentError),
}

/// Filters negligible damage and keeps blocked-damage statistics.
pub struct SkipZeroDamage<S: ConfigStore> {
    store: S,
    config: PluginConfig,
    stats: DamageStats,
}

impl<S: ConfigStore> SkipZeroDamage<S> {
    /// Create the plugin with default config. Call [`Self::load_config`]
    /// before dispatching events.
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: PluginConfig::default(),
            stats: DamageStats::default(),
        }
    }

    pub fn init(&mut self, registry: &mut impl PermissionRegistry) {
        registry.register_permission(PERMISSION_REPORT);
    }

    /// Load the persisted configuration and reconcile it with the defaults.
    ///
    /// Never fails: unreadable or invalid documents are replaced by the
    /// defaults. Any change is written back. The typed config is swapped in
    /// only once the new document is complete.
    pub fn load_config(&mut self) -> ConfigLoad {
        let defaults = match PluginConfig::default_document() {
            Ok(defaults) => defaults,
            Err(e) => {
                log::error!("Failed to build default configuration: {}", e);
                return ConfigLoad::Defaulted;
            }
        };

        let (document, config, load) = match self.read_reconciled(&defaults) {
            Ok((document, config, false)) => (document, config, ConfigLoad::Unchanged),
            Ok((document, config, true)) => {
                log::warn!("Configuration appears to be outdated; updating and saving");
                (document, config, ConfigLoad::Updated)
            }
            Err(LoadFailure::Missing) => {
                log::info!(
                    "Configuration file {} not found; creating defaults",
                    self.store.name()
                );
                (defaults, PluginConfig::default(), ConfigLoad::Defaulted)
            }
            Err(e) => {
                log::warn!(
                    "Configuration file {} is invalid; using defaults ({})",
                    self.store.name(),
                    e
                );
                (defaults, PluginConfig::default(), ConfigLoad::Defaulted)
            }
        };

        if load != ConfigLoad::Unchanged {
            self.save_document(&document);
        }

        self.config = config;
        load
    }

    /// Re-read the configuration. Statistics are kept.
    pub fn reload_config(&mut self) -> ConfigLoad {
        self.load_config()
    }

    fn read_reconciled(
        &self,
        defaults: &Document,
    ) -> Result<(Document, PluginConfig, bool), LoadFailure> {
        let mut document = self.store.load_raw()?.ok_or(LoadFailure::Missing)?;
        let changed = reconcile(defaults, &mut document);
        let config = PluginConfig::from_document(&document)?;
        Ok((document, config, changed))
    }

    fn save_document(&mut self, document: &Document) {
        match self.store.save_raw(document) {
            Ok(()) => log::info!("Configuration changes saved to {}", self.store.name()),
            Err(e) => log::error!(
                "Failed to save configuration to {}: {}",
                self.store.name(),
                e
            ),
        }
    }

    /// Damage hook. The host must cancel the event on `Suppress`.
    pub fn on_entity_take_damage(&mut self, event: &DamageEvent) -> DamageOutcome {
        if !event.target.is_filtered() {
            return DamageOutcome::Allow;
        }

        let outcome = classify(
            event.total_damage(),
            self.config.low_damage_threshold,
            &mut self.stats,
        );
        if outcome.is_suppressed() {
            log::trace!("Suppressed damage event [{}]", event.damage.describe());
        }
        outcome
    }

    /// Dispatch a chat/console command. Returns whether it was ours.
    pub fn handle_command(&self, command: &str, caller: &mut impl Caller) -> bool {
        if command.eq_ignore_ascii_case(COMMAND_REPORT) {
            self.report_command(caller);
            true
        } else {
            false
        }
    }

    /// Reply with the damage-block report, or a denial.
    pub fn report_command(&self, caller: &mut impl Caller) {
        let req = ReportAccessRequest {
            is_server: caller.is_server(),
            is_admin: caller.is_admin(),
            has_report_permission: caller.has_permission(PERMISSION_REPORT),
        };

        if let Some(reason) = check_report_access(&req).denial_reason {
            log::debug!("Report request denied: {:?}", reason);
            caller.reply(reason.message());
            return;
        }

        caller.reply(&self.report());
    }

    pub fn report(&self) -> String {
        format_report(&self.stats, self.config.low_damage_threshold)
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn stats(&self) -> &DamageStats {
        &self.stats
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
