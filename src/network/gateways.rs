//! Router interface ports: gateway MAC and address lookups

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::OstackError;
use crate::network::{decode, ROUTER_INTERFACE_PORTS_PATH};
use crate::openstack::models::{Port, PortList};
use crate::openstack::{ControlPlane, Ostack};

/// Gateway MAC to address and address to MAC maps
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatewayMaps {
    pub mac2ip: HashMap<String, String>,
    pub ip2mac: HashMap<String, String>,
}

impl GatewayMaps {
    pub fn new() -> Self {
        Self::default()
    }
}

/// "tenant/ip" when `include_tenant` is set, otherwise the bare ip
pub fn gateway_address(port: &Port, ip: &str, include_tenant: bool) -> String {
    if include_tenant {
        format!("{}/{}", port.tenant(), ip)
    } else {
        ip.to_string()
    }
}

/// MAC and first fixed ip of a router interface port. Ports owned by
/// anything else, or missing either value, yield None.
fn gateway_port(port: &Port) -> Option<(&str, &str)> {
    if !port.is_router_interface() {
        debug!(owner = ?port.device_owner, "not a router interface port, skipped");
        return None;
    }

    match (port.mac(), port.first_ip()) {
        (Some(mac), Some(ip)) => Some((mac, ip)),
        (mac, ip) => {
            warn!(?mac, ?ip, "router interface port without mac or fixed ip, skipped");
            None
        }
    }
}

/// Add one entry per port, keyed by MAC or, with `reverse`, by address.
/// Only the first fixed ip of a port is used.
pub fn map_gateways(
    map: &mut HashMap<String, String>,
    ports: &[Port],
    include_tenant: bool,
    reverse: bool,
) {
    for port in ports {
        let Some((mac, ip)) = gateway_port(port) else {
            continue;
        };

        let addr = gateway_address(port, ip, include_tenant);
        if reverse {
            map.insert(addr, mac.to_string());
        } else {
            map.insert(mac.to_string(), addr);
        }
    }
}

/// "MAC IP" for every usable gateway port
pub fn gateway_entries(ports: &[Port]) -> Vec<String> {
    ports
        .iter()
        .filter_map(gateway_port)
        .map(|(mac, ip)| format!("{} {}", mac, ip))
        .collect()
}

impl<C: ControlPlane> Ostack<C> {
    fn gateway_ports_url(&self, project_scoped: bool) -> Result<String, OstackError> {
        let url = self.network_url(ROUTER_INTERFACE_PORTS_PATH)?;
        if !project_scoped {
            return Ok(url);
        }

        match self.project_id() {
            Some(project_id) => Ok(format!("{}&tenant_id={}", url, project_id)),
            None => Err(OstackError::MissingProjectId),
        }
    }

    /// Add gateway entries to `map`: MAC to address, or address to MAC with
    /// `reverse`. A `payload` from an earlier port listing is used as is,
    /// otherwise the router interface ports are fetched, scoped to the
    /// project when one is configured.
    pub async fn gateway_mac_to_addr(
        &self,
        map: &mut HashMap<String, String>,
        payload: Option<&[u8]>,
        include_tenant: bool,
        reverse: bool,
    ) -> Result<(), OstackError> {
        let fetched;
        let payload = match payload {
            Some(payload) => payload,
            None => {
                let url = self.gateway_ports_url(self.project_id().is_some())?;
                fetched = self.fetch(&url).await?;
                &fetched[..]
            }
        };

        let list: PortList = decode("gateway_mac_to_addr", payload)?;
        map_gateways(map, &list.ports, include_tenant, reverse);

        Ok(())
    }

    /// Fill both gateway maps from a single port listing.
    ///
    /// `use_project` restricts the listing to the configured project; releases
    /// from icehouse on no longer return every tenant's gateways to an admin.
    pub async fn gateway_maps(
        &self,
        maps: &mut GatewayMaps,
        include_tenant: bool,
        use_project: bool,
    ) -> Result<(), OstackError> {
        let url = self.gateway_ports_url(use_project)?;
        let payload = self.fetch(&url).await?;

        self.gateway_mac_to_addr(&mut maps.ip2mac, Some(payload.as_slice()), include_tenant, true)
            .await?;
        self.gateway_mac_to_addr(&mut maps.mac2ip, Some(payload.as_slice()), include_tenant, false)
            .await
    }

    /// One "MAC IP" string per gateway port
    pub async fn gateway_list(&self) -> Result<Vec<String>, OstackError> {
        let url = self.gateway_ports_url(self.project_id().is_some())?;
        let payload = self.fetch(&url).await?;
        let list: PortList = decode("gateway_list", &payload)?;

        Ok(gateway_entries(&list.ports))
    }
}
