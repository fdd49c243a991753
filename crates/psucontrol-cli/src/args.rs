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

//! Command-line arguments for psuctl

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "psuctl", version, about = "Switch a PSU through a REST smart-plug endpoint")]
#[command(
    long_about = "Drives the PSU control REST backend the way a printer host would.\n\
    \nSettings are kept in a TOML file (address, api_key, on_endpoint, off_endpoint,\n\
    state_endpoint, verify_certificate).\n\
    \nExamples:\n  \
    psuctl set address http://homeassistant.local:8123\n  \
    psuctl set on_endpoint /api/webhook/psu_on\n  \
    psuctl on\n  \
    psuctl state"
)]
pub struct Cli {
    /// Settings file
    #[arg(short, long, default_value = "psucontrol.toml")]
    pub settings: PathBuf,

    /// Enable debug logging for the backend
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Switch the PSU on
    On,

    /// Switch the PSU off
    Off,

    /// Print the PSU state ("on" or "off"); exits non-zero when off
    State,

    /// Print the active configuration as JSON, API key masked
    Config,

    /// Persist one setting and reload the backend
    Set {
        /// Setting key, e.g. address or verify_certificate
        key: String,

        /// New value; "true"/"false" are stored as booleans
        value: String,
    },

    /// Print the software-update descriptor as JSON
    UpdateInfo,
}
