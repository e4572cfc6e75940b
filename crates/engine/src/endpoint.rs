// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Where the job list and the live channels live.
//!
//! The UI is reachable either directly (`http://host:8099/`) or through Home
//! Assistant ingress (`/api/hassio_ingress/<token>/...`). Under ingress every
//! backend path has to stay beneath the token segment.

use crate::error::EndpointError;
use sw_core::ScanId;
use url::Url;

/// Ingress tokens are the only path segments longer than this.
pub const TOKEN_SEGMENT_MIN_LEN: usize = 41;

const INGRESS_SEGMENT: &str = "hassio_ingress";

/// True when `path` is served through ingress.
pub fn is_ingress_path(path: &str) -> bool {
    segments(path).any(|s| s == INGRESS_SEGMENT || s.len() >= TOKEN_SEGMENT_MIN_LEN)
}

/// Path prefix up to and including the ingress token segment.
fn token_prefix(path: &str) -> Option<String> {
    let mut prefix = String::new();
    for segment in segments(path) {
        prefix.push('/');
        prefix.push_str(segment);
        if segment.len() >= TOKEN_SEGMENT_MIN_LEN {
            return Some(prefix);
        }
    }
    None
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Base that backend routes hang off for a page at `current_path`.
///
/// Empty for direct access. Under ingress: the token prefix, or the current
/// path without its trailing slash when no token segment can be found.
pub fn api_base(current_path: &str) -> String {
    if !is_ingress_path(current_path) {
        return String::new();
    }
    match token_prefix(current_path) {
        Some(prefix) => prefix,
        None => current_path.trim_end_matches('/').to_string(),
    }
}

/// Channel path for scan `id`, seen from a page at `current_path`.
pub fn channel_path(current_path: &str, id: &ScanId) -> String {
    format!("{}/ws/scan/{id}", api_base(current_path))
}

/// Job list path, seen from a page at `current_path`.
pub fn registry_path(current_path: &str) -> String {
    format!("{}/api/scan/", api_base(current_path))
}

/// Resolved backend locations for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    http_origin: Url,
    ws_origin: Url,
    page_path: String,
}

impl Endpoint {
    /// `server` is an `http` or `https` origin; any path on it is ignored.
    pub fn new(server: &str, page_path: &str) -> Result<Self, EndpointError> {
        let mut http_origin = Url::parse(server)
            .map_err(|source| EndpointError::InvalidServer { url: server.to_string(), source })?;
        let ws_scheme = match http_origin.scheme() {
            "http" => "ws",
            "https" => "wss",
            other => return Err(EndpointError::UnsupportedScheme(other.to_string())),
        };
        if !matches!(http_origin.host_str(), Some(host) if !host.is_empty()) {
            return Err(EndpointError::NoHost(server.to_string()));
        }
        http_origin.set_path("/");
        http_origin.set_query(None);
        http_origin.set_fragment(None);

        let mut ws_origin = http_origin.clone();
        ws_origin
            .set_scheme(ws_scheme)
            .map_err(|()| EndpointError::UnsupportedScheme(ws_scheme.to_string()))?;

        let page_path = if page_path.starts_with('/') {
            page_path.to_string()
        } else {
            format!("/{page_path}")
        };
        Ok(Self { http_origin, ws_origin, page_path })
    }

    pub fn page_path(&self) -> &str {
        &self.page_path
    }

    pub fn is_ingress(&self) -> bool {
        is_ingress_path(&self.page_path)
    }

    /// `GET` target for the job list.
    pub fn registry_url(&self) -> Url {
        let mut url = self.http_origin.clone();
        url.set_path(&registry_path(&self.page_path));
        url
    }

    /// WebSocket target for scan `id`.
    pub fn channel_url(&self, id: &ScanId) -> Url {
        let mut url = self.ws_origin.clone();
        url.set_path(&channel_path(&self.page_path, id));
        url
    }
}

#[cfg(test)]
#[path = "endpoint_tests.rs"]
mod tests;
