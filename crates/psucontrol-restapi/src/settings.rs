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

//! Host settings store seam
//!
//! The adapter never reads persisted settings by itself. The host hands it a
//! [`SettingsStore`], and [`crate::config::PsuConfig::load`] calls one typed getter per field.

use crate::errors::{PsuError, PsuResult};
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Persisted key/value settings owned by the host
pub trait SettingsStore: Send + Sync {
    /// Raw persisted value for `key`, if any
    fn get(&self, key: &str) -> Option<Value>;

    /// Merge `data` into the persisted settings
    fn save(&self, data: &Map<String, Value>) -> PsuResult<()>;

    fn get_string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s),
            Value::Null => None,
            other @ (Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_)) => {
                Some(other.to_string())
            }
        }
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            Value::Bool(_) | Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    fn get_float(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            Value::Bool(_) | Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            Value::Bool(b) => Some(b),
            Value::String(s) => Some(matches!(
                s.trim().to_lowercase().as_str(),
                "true" | "yes" | "y" | "on" | "1"
            )),
            Value::Number(n) => Some(n.as_f64().is_some_and(|v| v != 0.0)),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

/// In-memory settings, used by hosts that persist elsewhere and by tests
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: RwLock<Map<String, Value>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(values: Map<String, Value>) -> Self {
        Self {
            values: RwLock::new(values),
        }
    }

    /// Set a single key without going through the save path
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.write().insert(key.into(), value.into());
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.read().get(key).cloned()
    }

    fn save(&self, data: &Map<String, Value>) -> PsuResult<()> {
        let mut values = self.values.write();
        for (key, value) in data {
            values.insert(key.clone(), value.clone());
        }
        Ok(())
    }
}

/// Settings persisted as a flat TOML table
#[derive(Debug)]
pub struct FileSettings {
    path: PathBuf,
    values: RwLock<Map<String, Value>>,
}

impl FileSettings {
    /// Open the settings file at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> PsuResult<Self> {
        let path = path.into();
        let values = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let table: Value = toml::from_str(&content)?;
            let Value::Object(map) = table else {
                return Err(PsuError::Settings(format!(
                    "{} does not contain a settings table",
                    path.display()
                )));
            };
            map
        } else {
            info!(
                "Settings file {} not found, starting from defaults",
                path.display()
            );
            Map::new()
        };

        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, values: &Map<String, Value>) -> PsuResult<()> {
        if values.values().any(Value::is_null) {
            return Err(PsuError::Settings(
                "null values cannot be stored in a TOML settings file".to_owned(),
            ));
        }

        let content = toml::to_string_pretty(values)?;
        let temp_path = self.path.with_extension("tmp");

        // Atomic write
        std::fs::write(&temp_path, content)?;
        std::fs::rename(&temp_path, &self.path)?;

        debug!("Settings written to {}", self.path.display());
        Ok(())
    }
}

impl SettingsStore for FileSettings {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.read().get(key).cloned()
    }

    fn save(&self, data: &Map<String, Value>) -> PsuResult<()> {
        let mut values = self.values.write();
        let mut merged = values.clone();
        for (key, value) in data {
            merged.insert(key.clone(), value.clone());
        }
        self.write(&merged)?;
        *values = merged;
        Ok(())
    }
}
