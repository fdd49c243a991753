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

//! Descriptors the host reads to render settings and check for updates

use serde::Serialize;
use std::collections::BTreeMap;

/// Identifier the host stores settings and update checks under
pub const PLUGIN_IDENTIFIER: &str = "psucontrol_restapi";

/// Human-readable plugin name
pub const PLUGIN_NAME: &str = "PSU Control - Rest API";

const RELEASE_USER: &str = "fsd16";
const RELEASE_REPO: &str = "OctoPrint-PSUControl-RestAPI";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    Settings,
}

/// A UI page the plugin contributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateConfig {
    #[serde(rename = "type")]
    pub kind: TemplateKind,
    pub custom_bindings: bool,
}

/// The single settings page, bound to the plain settings view model
pub fn template_configs() -> Vec<TemplateConfig> {
    vec![TemplateConfig {
        kind: TemplateKind::Settings,
        custom_bindings: false,
    }]
}

/// Software-update check configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCheckConfig {
    pub display_name: String,
    pub display_version: String,
    /// Version check source
    #[serde(rename = "type")]
    pub kind: String,
    pub user: String,
    pub repo: String,
    pub current: String,
    /// Archive URL with a literal `{target_version}` placeholder
    pub pip: String,
}

impl UpdateCheckConfig {
    pub fn for_version(version: &str) -> Self {
        Self {
            display_name: PLUGIN_NAME.to_owned(),
            display_version: version.to_owned(),
            kind: "github_release".to_owned(),
            user: RELEASE_USER.to_owned(),
            repo: RELEASE_REPO.to_owned(),
            current: version.to_owned(),
            pip: format!(
                "https://github.com/{RELEASE_USER}/{RELEASE_REPO}/archive/{{target_version}}.zip"
            ),
        }
    }
}

/// Update check configuration keyed by plugin identifier
pub fn update_information(version: &str) -> BTreeMap<String, UpdateCheckConfig> {
    BTreeMap::from([(
        PLUGIN_IDENTIFIER.to_owned(),
        UpdateCheckConfig::for_version(version),
    )])
}
