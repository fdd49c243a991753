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

//! Typed configuration record for the remote switch

use crate::settings::SettingsStore;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Version of the persisted settings schema
pub const SETTINGS_VERSION: u32 = 1;

/// Persisted setting keys, in declaration order
pub const SETTINGS_KEYS: [&str; 6] = [
    "address",
    "api_key",
    "on_endpoint",
    "off_endpoint",
    "state_endpoint",
    "verify_certificate",
];

fn default_true() -> bool {
    true
}

/// Connection settings for the remote switch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PsuConfig {
    /// Base URL of the device API, e.g. http://homeassistant.local:8123
    #[serde(default)]
    pub address: String,

    /// Bearer token sent on every request
    #[serde(default)]
    pub api_key: String,

    #[serde(default)]
    pub on_endpoint: String,

    #[serde(default)]
    pub off_endpoint: String,

    /// Path answering with a JSON object carrying a `value` field
    #[serde(default)]
    pub state_endpoint: String,

    /// Enforce TLS certificate validation
    #[serde(default = "default_true")]
    pub verify_certificate: bool,
}

impl Default for PsuConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            api_key: String::new(),
            on_endpoint: String::new(),
            off_endpoint: String::new(),
            state_endpoint: String::new(),
            verify_certificate: true,
        }
    }
}

/// The three configurable device endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PsuEndpoint {
    On,
    Off,
    State,
}

impl PsuEndpoint {
    /// Settings key holding this endpoint's path
    pub fn key(self) -> &'static str {
        match self {
            Self::On => "on_endpoint",
            Self::Off => "off_endpoint",
            Self::State => "state_endpoint",
        }
    }
}

impl fmt::Display for PsuEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => write!(f, "on"),
            Self::Off => write!(f, "off"),
            Self::State => write!(f, "state"),
        }
    }
}

/// Strip one leading slash and prepend a fresh one, so "relay" and "/relay" match
pub fn normalize_endpoint(path: &str) -> String {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    format!("/{trimmed}")
}

impl PsuConfig {
    /// Build a complete record from the host's settings, one typed getter per field
    pub fn load(store: &dyn SettingsStore) -> Self {
        let defaults = Self::default();

        let config = Self {
            address: store.get_string("address").unwrap_or(defaults.address),
            api_key: store.get_string("api_key").unwrap_or(defaults.api_key),
            on_endpoint: store
                .get_string("on_endpoint")
                .unwrap_or(defaults.on_endpoint),
            off_endpoint: store
                .get_string("off_endpoint")
                .unwrap_or(defaults.off_endpoint),
            state_endpoint: store
                .get_string("state_endpoint")
                .unwrap_or(defaults.state_endpoint),
            verify_certificate: store
                .get_bool("verify_certificate")
                .unwrap_or(defaults.verify_certificate),
        };

        for (key, value) in config.entries() {
            debug!("{}: {}", key, value);
        }

        config
    }

    /// Configured path for `endpoint`, normalized to a single leading slash
    pub fn endpoint_path(&self, endpoint: PsuEndpoint) -> String {
        let raw = match endpoint {
            PsuEndpoint::On => &self.on_endpoint,
            PsuEndpoint::Off => &self.off_endpoint,
            PsuEndpoint::State => &self.state_endpoint,
        };
        normalize_endpoint(raw)
    }

    /// Key/value pairs for tracing, with the API key masked
    pub fn entries(&self) -> [(&'static str, String); 6] {
        let api_key = if self.api_key.is_empty() {
            String::new()
        } else {
            "********".to_owned()
        };

        [
            ("address", self.address.clone()),
            ("api_key", api_key),
            ("on_endpoint", self.on_endpoint.clone()),
            ("off_endpoint", self.off_endpoint.clone()),
            ("state_endpoint", self.state_endpoint.clone()),
            ("verify_certificate", self.verify_certificate.to_string()),
        ]
    }
}
