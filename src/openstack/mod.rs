//! OpenStack control plane access
//!
//! Holds the credential/endpoint object every query runs against and the
//! seam to the authenticated HTTP transport underneath it.

use std::future::Future;

use reqwest::Method;
use tracing::{debug, trace};

use crate::config::AppConfig;
use crate::error::OstackError;

pub mod models;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

/// Body and status of a control plane response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub body: Vec<u8>,
    pub status: u16,
}

/// Authenticated transport to the OpenStack APIs
pub trait ControlPlane {
    /// Authenticate, or refresh the session, if needed
    fn validate_auth(&self) -> impl Future<Output = Result<(), OstackError>> + Send;

    /// Issue a request against an absolute url
    fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<String>,
    ) -> impl Future<Output = Result<RawResponse, OstackError>> + Send;
}

/// Endpoint urls, project identity and agent classification for one cloud
#[derive(Debug)]
pub struct Ostack<C> {
    control_plane: C,
    network_url: Option<String>,
    compute_url: Option<String>,
    project_id: Option<String>,
    ovs_binaries: Vec<String>,
}

impl<C: ControlPlane> Ostack<C> {
    pub fn new(control_plane: C, network_url: Option<String>) -> Self {
        Self {
            control_plane,
            network_url,
            compute_url: None,
            project_id: None,
            ovs_binaries: crate::config::DEFAULT_OVS_BINARIES
                .iter()
                .map(|b| b.to_string())
                .collect(),
        }
    }

    pub fn from_config(control_plane: C, config: &AppConfig) -> Self {
        Self {
            control_plane,
            network_url: config.network_url.clone(),
            compute_url: config.compute_url.clone(),
            project_id: config.project_id.clone(),
            ovs_binaries: config.ovs_binaries.clone(),
        }
    }

    pub fn with_compute_url(mut self, url: impl Into<String>) -> Self {
        self.compute_url = Some(url.into());
        self
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_ovs_binaries(mut self, binaries: Vec<String>) -> Self {
        self.ovs_binaries = binaries;
        self
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    pub fn ovs_binaries(&self) -> &[String] {
        &self.ovs_binaries
    }

    pub fn control_plane(&self) -> &C {
        &self.control_plane
    }

    /// Absolute url for a path on the networking service
    pub(crate) fn network_url(&self, path: &str) -> Result<String, OstackError> {
        endpoint_url(self.network_url.as_deref(), "network", path)
    }

    /// Absolute url for a path on the compute service
    pub(crate) fn compute_url(&self, path: &str) -> Result<String, OstackError> {
        endpoint_url(self.compute_url.as_deref(), "compute", path)
    }

    /// Authenticated GET, returning the raw body
    pub(crate) async fn fetch(&self, url: &str) -> Result<Vec<u8>, OstackError> {
        self.control_plane.validate_auth().await?;

        debug!(url, "GET");
        let response = self.control_plane.send(Method::GET, url, None).await?;
        trace!(
            url,
            status = response.status,
            body = %String::from_utf8_lossy(&response.body),
            "response"
        );

        Ok(response.body)
    }
}

fn endpoint_url(
    base: Option<&str>,
    endpoint: &'static str,
    path: &str,
) -> Result<String, OstackError> {
    match base.map(str::trim) {
        Some(base) if !base.is_empty() => Ok(format!(
            "{}/{}",
            base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )),
        _ => Err(OstackError::MissingEndpoint { endpoint }),
    }
}
