// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of PsuControl RestAPI.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! The PSU backend the host drives through its lifecycle hooks

use crate::broker::{PsuBroker, PsuControl};
use crate::client::{RestClient, RestResponse};
use crate::config::{PsuConfig, PsuEndpoint, SETTINGS_VERSION};
use crate::errors::{PsuResult, SendResult, StateError};
use crate::metadata::{self, TemplateConfig, UpdateCheckConfig};
use crate::settings::SettingsStore;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Switches a PSU through a REST smart-plug endpoint
pub struct PsuRestPlugin {
    settings: Arc<dyn SettingsStore>,
    version: String,
    config: RwLock<PsuConfig>,
}

impl std::fmt::Debug for PsuRestPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let config = self.config.read();
        f.debug_struct("PsuRestPlugin")
            .field("version", &self.version)
            .field("address", &config.address)
            .field("verify_certificate", &config.verify_certificate)
            .finish_non_exhaustive()
    }
}

impl PsuRestPlugin {
    /// Create the plugin. The configuration stays at its defaults until settings are initialized.
    pub fn new(settings: Arc<dyn SettingsStore>, version: impl Into<String>) -> Self {
        Self {
            settings,
            version: version.into(),
            config: RwLock::new(PsuConfig::default()),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Snapshot of the in-memory configuration
    pub fn config(&self) -> PsuConfig {
        self.config.read().clone()
    }

    pub fn get_settings_defaults(&self) -> PsuConfig {
        PsuConfig::default()
    }

    pub fn on_settings_initialized(&self) {
        self.reload_settings();
    }

    /// Rebuild the whole configuration record from the settings store and swap it in
    pub fn reload_settings(&self) {
        let config = PsuConfig::load(self.settings.as_ref());
        *self.config.write() = config;
    }

    /// Persist `data`, then reload so the in-memory record matches what was saved.
    ///
    /// The reload happens even when persisting fails; the save error is returned afterwards.
    pub fn on_settings_save(&self, data: &Map<String, Value>) -> PsuResult<()> {
        let saved = self.settings.save(data);
        if let Err(e) = &saved {
            error!("Failed to save settings: {}", e);
        }
        self.reload_settings();
        saved
    }

    pub fn get_settings_version(&self) -> u32 {
        SETTINGS_VERSION
    }

    /// No migrations exist yet
    pub fn on_settings_migrate(&self, target: u32, current: Option<u32>) {
        debug!(
            "Settings migration requested: {:?} -> {}, nothing to do",
            current, target
        );
    }

    pub fn get_template_configs(&self) -> Vec<TemplateConfig> {
        metadata::template_configs()
    }

    pub fn get_update_information(&self) -> BTreeMap<String, UpdateCheckConfig> {
        metadata::update_information(&self.version)
    }

    /// Register with the host's PSU broker.
    ///
    /// Returns `false` when there is no broker or it cannot take registrations; the plugin
    /// still works when called directly but the host will not route capability calls to it.
    pub fn on_startup(
        self: &Arc<Self>,
        host: &str,
        port: u16,
        broker: Option<&dyn PsuBroker>,
    ) -> bool {
        debug!("Host started on {}:{}", host, port);

        let Some(broker) = broker.filter(|b| b.supports_registration()) else {
            warn!("The installed PSU control broker does not support plugin registration.");
            return false;
        };

        info!("Registering plugin with PSU control broker");
        broker.register_plugin(self.clone());
        true
    }

    /// Send `command` to the device with the current connection settings
    pub fn send(&self, command: &str, body: Option<&str>) -> SendResult<RestResponse> {
        let client = RestClient::from_config(&self.config.read());
        client.send(command, body)
    }

    fn change_psu_state(&self, endpoint: PsuEndpoint) {
        let command = self.config.read().endpoint_path(endpoint);
        debug!("Sending {} command to {}", endpoint, command);
        // Result is only logged; the host polls the state separately
        let _ = self.send(&command, None);
    }

    /// Query the state endpoint and interpret its `value` field
    pub fn read_psu_state(&self) -> Result<bool, StateError> {
        let command = self.config.read().endpoint_path(PsuEndpoint::State);
        let response = self.send(&command, None)?;
        if !response.is_ok() {
            return Err(StateError::ErrorStatus(response.status));
        }
        let data: Value = serde_json::from_str(&response.body)?;

        data.get("value")
            .and_then(truthiness)
            .ok_or(StateError::MissingValue)
    }
}

/// Boolean reading of a JSON value; `null` carries no state
fn truthiness(value: &Value) -> Option<bool> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(*b),
        Value::Number(n) => Some(n.as_f64().is_some_and(|v| v != 0.0)),
        Value::String(s) => Some(!s.is_empty()),
        Value::Array(items) => Some(!items.is_empty()),
        Value::Object(map) => Some(!map.is_empty()),
    }
}

impl PsuControl for PsuRestPlugin {
    fn turn_psu_on(&self) {
        debug!("Switching PSU On");
        self.change_psu_state(PsuEndpoint::On);
    }

    fn turn_psu_off(&self) {
        debug!("Switching PSU Off");
        self.change_psu_state(PsuEndpoint::Off);
    }

    fn get_psu_state(&self) -> bool {
        debug!("Getting PSU state");
        match self.read_psu_state() {
            Ok(state) => state,
            // Already logged by the client
            Err(StateError::Send(_)) => false,
            Err(StateError::ErrorStatus(status)) => {
                debug!("State request returned status {}, reporting off", status);
                false
            }
            Err(e @ (StateError::InvalidPayload(_) | StateError::MissingValue)) => {
                error!("Unable to determine status. Check settings.");
                debug!("   Cause: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MemorySettings;
    use serde_json::json;

    fn plugin_with(store: MemorySettings) -> PsuRestPlugin {
        let plugin = PsuRestPlugin::new(Arc::new(store), "0.1.0");
        plugin.on_settings_initialized();
        plugin
    }

    #[test]
    fn test_config_starts_at_defaults() {
        let store = MemorySettings::new();
        store.set("address", "http://switch.local");
        let plugin = PsuRestPlugin::new(Arc::new(store), "0.1.0");

        assert_eq!(plugin.config(), PsuConfig::default());
        assert_eq!(plugin.get_settings_defaults(), PsuConfig::default());
    }

    #[test]
    fn test_settings_initialized_loads_store() {
        let store = MemorySettings::new();
        store.set("address", "http://switch.local");
        let plugin = plugin_with(store);

        assert_eq!(plugin.config().address, "http://switch.local");
    }

    #[test]
    fn test_settings_save_reloads() {
        let plugin = plugin_with(MemorySettings::new());
        let data = json!({ "api_key": "new-key", "verify_certificate": false });
        plugin.on_settings_save(data.as_object().unwrap()).unwrap();

        let config = plugin.config();
        assert_eq!(config.api_key, "new-key");
        assert!(!config.verify_certificate);
    }

    #[test]
    fn test_settings_version_and_migrate() {
        let plugin = plugin_with(MemorySettings::new());
        assert_eq!(plugin.get_settings_version(), 1);

        let before = plugin.config();
        plugin.on_settings_migrate(1, None);
        assert_eq!(plugin.config(), before);
    }

    #[test]
    fn test_update_information_uses_plugin_version() {
        let plugin = PsuRestPlugin::new(Arc::new(MemorySettings::new()), "2.0.1");
        let info = plugin.get_update_information();

        assert_eq!(plugin.version(), "2.0.1");
        let entry = &info[metadata::PLUGIN_IDENTIFIER];
        assert_eq!(entry.current, "2.0.1");
        assert_eq!(entry.display_version, "2.0.1");
        assert_eq!(plugin.get_template_configs().len(), 1);
    }

    #[test]
    fn test_truthiness() {
        assert_eq!(truthiness(&json!(true)), Some(true));
        assert_eq!(truthiness(&json!(false)), Some(false));
        assert_eq!(truthiness(&json!(1)), Some(true));
        assert_eq!(truthiness(&json!(0)), Some(false));
        assert_eq!(truthiness(&json!("on")), Some(true));
        assert_eq!(truthiness(&json!("")), Some(false));
        assert_eq!(truthiness(&json!(null)), None);
    }

    #[test]
    fn test_debug_hides_api_key() {
        let store = MemorySettings::new();
        store.set("api_key", "secret");
        let plugin = plugin_with(store);

        assert!(!format!("{plugin:?}").contains("secret"));
    }
}
