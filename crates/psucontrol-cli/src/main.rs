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

//! psuctl - reference host for the PSU control REST backend

mod args;

use anyhow::{Context, Result, bail};
use args::{Cli, Commands};
use clap::Parser;
use psucontrol_restapi::{FileSettings, PsuControlBroker, PsuRestPlugin, SETTINGS_KEYS};
use serde_json::{Map, Value};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if cli.verbose {
        filter = filter.add_directive("psucontrol_restapi=debug".parse()?);
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = Arc::new(
        FileSettings::open(&cli.settings)
            .with_context(|| format!("Failed to open settings: {}", cli.settings.display()))?,
    );
    let settings_path = settings.path().to_path_buf();

    let plugin = Arc::new(PsuRestPlugin::new(settings, env!("CARGO_PKG_VERSION")));
    plugin.on_settings_initialized();
    info!(
        "PSU backend {} loaded settings from {}",
        plugin.version(),
        settings_path.display()
    );

    let broker = PsuControlBroker::new();
    if !plugin.on_startup("127.0.0.1", 0, Some(&broker)) {
        bail!("PSU backend could not be registered");
    }

    match cli.command {
        Commands::On => {
            info!("Switching PSU on");
            broker.turn_on();
        }
        Commands::Off => {
            info!("Switching PSU off");
            broker.turn_off();
        }
        Commands::State => {
            let on = broker.get_state();
            println!("{}", if on { "on" } else { "off" });
            if !on {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Config => {
            let entries: Map<String, Value> = plugin
                .config()
                .entries()
                .into_iter()
                .map(|(key, value)| (key.to_owned(), Value::String(value)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        Commands::Set { key, value } => {
            if !SETTINGS_KEYS.contains(&key.as_str()) {
                bail!(
                    "Unknown setting '{}'. Supported settings: {}",
                    key,
                    SETTINGS_KEYS.join(", ")
                );
            }
            let data = Map::from_iter([(key.clone(), parse_setting_value(&value))]);
            plugin
                .on_settings_save(&data)
                .with_context(|| format!("Failed to save setting '{key}'"))?;
            info!("Saved {} to {}", key, settings_path.display());
        }
        Commands::UpdateInfo => {
            let info = plugin.get_update_information();
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn parse_setting_value(raw: &str) -> Value {
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        other => Value::String(other.to_owned()),
    }
}
