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

use thiserror::Error;

/// Settings and host-integration error types
#[derive(Error, Debug)]
pub enum PsuError {
    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings file: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to serialize settings file: {0}")]
    TomlWrite(#[from] toml::ser::Error),
}

pub type PsuResult<T> = Result<T, PsuError>;

/// Why a request to the remote switch produced no usable response
#[derive(Error, Debug)]
pub enum SendError {
    #[error("Unable to communicate with server: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Server returned 401 Unauthorized")]
    Unauthorized,

    #[error("Server returned 404 Not Found")]
    NotFound,

    #[error("Unexpected error while making API call: {0}")]
    Unexpected(String),
}

pub type SendResult<T> = Result<T, SendError>;

/// Why the PSU state could not be determined
#[derive(Error, Debug)]
pub enum StateError {
    #[error("State request failed: {0}")]
    Send(#[from] SendError),

    #[error("State request answered with error status {0}")]
    ErrorStatus(u16),

    #[error("State payload is not valid JSON: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("State payload has no 'value' field")]
    MissingValue,
}
