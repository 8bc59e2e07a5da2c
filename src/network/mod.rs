//! Network service queries
//!
//! Each query authenticates, fetches one listing from the networking service
//! and reshapes it into the lookup tables callers work with.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::OstackError;

pub mod dump;
pub mod gateways;
pub mod hosts;
pub mod netinfo;

pub use gateways::GatewayMaps;
pub use hosts::{normalize_host, HostSet};

pub(crate) const AGENTS_PATH: &str = "v2.0/agents";
pub(crate) const NETWORKS_PATH: &str = "v2.0/networks";
pub(crate) const ROUTER_INTERFACE_PORTS_PATH: &str =
    "v2.0/ports?device_owner=network:router_interface";

/// Unpack a response body, logging the payload when it does not fit
pub(crate) fn decode<T: DeserializeOwned>(
    context: &'static str,
    payload: &[u8],
) -> Result<T, OstackError> {
    serde_json::from_slice(payload).map_err(|source| {
        debug!(
            context,
            offending_json = %String::from_utf8_lossy(payload),
            "unable to unpack json"
        );
        OstackError::Decode { context, source }
    })
}
