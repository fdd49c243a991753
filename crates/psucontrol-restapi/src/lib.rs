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

//! PSU control backend for REST-capable smart plugs
//!
//! Lets a printer host switch its power supply through a remote HTTP endpoint
//! (a Home Assistant switch, a Tasmota plug, anything that answers a bearer-authenticated GET).
//!
//! ## Architecture
//!
//! - **PsuRestPlugin**: lifecycle hooks plus the [`PsuControl`] capability
//! - **SettingsStore**: typed access to the host's persisted settings
//! - **RestClient**: one blocking request per call, failures as [`SendError`]
//! - **PsuControlBroker**: routes generic on/off/state calls to the registered backend

pub mod broker;
pub mod client;
pub mod config;
pub mod errors;
pub mod metadata;
pub mod plugin;
pub mod settings;

pub use broker::{PsuBroker, PsuControl, PsuControlBroker};
pub use client::{RestClient, RestResponse};
pub use config::{PsuConfig, PsuEndpoint, SETTINGS_KEYS, SETTINGS_VERSION, normalize_endpoint};
pub use errors::{PsuError, PsuResult, SendError, SendResult, StateError};
pub use metadata::{PLUGIN_IDENTIFIER, PLUGIN_NAME, TemplateConfig, TemplateKind, UpdateCheckConfig};
pub use plugin::PsuRestPlugin;
pub use settings::{FileSettings, MemorySettings, SettingsStore};
