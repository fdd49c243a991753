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

//! REST client for the remote switch
//!
//! One blocking request per call, no retries and no timeout beyond reqwest's own.
//! 401 and 404 are treated as unusable responses; every other status is handed back.

use crate::config::PsuConfig;
use crate::errors::{SendError, SendResult};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use tracing::{debug, error, warn};

const USER_AGENT: &str = concat!("psucontrol-restapi/", env!("CARGO_PKG_VERSION"));

/// A response whose body has already been read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestResponse {
    pub status: u16,
    pub body: String,
}

impl RestResponse {
    /// Any status below 400 carries a usable body
    pub fn is_ok(&self) -> bool {
        self.status < 400
    }
}

/// Snapshot of the connection settings used for a single request
#[derive(Clone)]
pub struct RestClient {
    address: String,
    api_key: String,
    verify_certificate: bool,
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("address", &self.address)
            .field("verify_certificate", &self.verify_certificate)
            .finish_non_exhaustive()
    }
}

impl RestClient {
    pub fn from_config(config: &PsuConfig) -> Self {
        Self {
            address: config.address.clone(),
            api_key: config.api_key.clone(),
            verify_certificate: config.verify_certificate,
        }
    }

    /// Send `command` (a path with a leading slash) to the device.
    ///
    /// A non-empty `body` turns the request into a POST carrying it, otherwise it is a GET.
    pub fn send(&self, command: &str, body: Option<&str>) -> SendResult<RestResponse> {
        let url = format!("{}{}", self.address, command);
        let body = body.filter(|b| !b.is_empty());

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .danger_accept_invalid_certs(!self.verify_certificate)
            .build()
            .map_err(|e| {
                error!("Exception while making API call: {:?}", e);
                SendError::Unexpected(format!("Failed to build HTTP client: {e}"))
            })?;

        debug!("Starting request to: {}", url);
        let request = match body {
            Some(payload) => client
                .post(&url)
                .bearer_auth(&self.api_key)
                .body(payload.to_owned()),
            None => client.get(&url).bearer_auth(&self.api_key),
        };

        let response = request.send().map_err(classify_transport_error)?;
        let status = response.status();
        let text = response.text().map_err(|e| {
            error!("Exception while making API call: {:?}", e);
            SendError::Unexpected(format!("Failed to read response body: {e}"))
        })?;

        match body {
            Some(payload) => debug!(
                "cmd={}, data={}, status_code={}, text={}",
                command,
                payload,
                status.as_u16(),
                text
            ),
            None => debug!(
                "cmd={}, status_code={}, text={}",
                command,
                status.as_u16(),
                text
            ),
        }

        match status {
            StatusCode::UNAUTHORIZED => {
                warn!("Server returned 401 Unauthorized. Check API key.");
                Err(SendError::Unauthorized)
            }
            StatusCode::NOT_FOUND => {
                warn!("Server returned 404 Not Found. Check Entity ID.");
                Err(SendError::NotFound)
            }
            status => Ok(RestResponse {
                status: status.as_u16(),
                body: text,
            }),
        }
    }
}

/// Invalid URLs and connection failures are configuration problems, anything else is unexpected
fn classify_transport_error(e: reqwest::Error) -> SendError {
    if e.is_builder() || e.is_connect() {
        error!("Unable to communicate with server. Check settings.");
        debug!("   Cause: {}", e);
        SendError::Network(e)
    } else {
        error!("Exception while making API call: {:?}", e);
        SendError::Unexpected(e.to_string())
    }
}
