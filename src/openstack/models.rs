//! Records decoded from networking service responses
//!
//! Neutron is not consistent about which fields it sends, so nearly
//! everything here is optional.

use serde::Deserialize;

/// `GET /v2.0/agents`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentList {
    #[serde(default)]
    pub agents: Vec<Agent>,
}

/// `GET /v2.0/networks`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetworkList {
    #[serde(default)]
    pub networks: Vec<Network>,
}

/// `GET /v2.0/ports`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PortList {
    #[serde(default)]
    pub ports: Vec<Port>,
}

/// A network service instance reporting from a physical host
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Agent {
    pub binary: Option<String>,
    /// Either a bare host name, "host.domain" or "host:uuid"
    pub host: Option<String>,
    pub alive: Option<bool>,
}

impl Agent {
    pub fn is_alive(&self) -> bool {
        self.alive.unwrap_or(false)
    }

    pub fn runs_binary(&self, binaries: &[String]) -> bool {
        self.binary
            .as_deref()
            .is_some_and(|binary| binaries.iter().any(|b| b == binary))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Network {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "provider:physical_network")]
    pub physical_network: Option<String>,
    #[serde(rename = "provider:network_type")]
    pub network_type: Option<String>,
    #[serde(rename = "provider:segmentation_id")]
    pub segmentation_id: Option<i64>,
}

impl Network {
    /// "id physnet type segment"; absent values render empty, or 0 for the segment
    pub fn descriptor(&self) -> String {
        format!(
            "{} {} {} {}",
            self.id.as_deref().unwrap_or_default(),
            self.physical_network.as_deref().unwrap_or_default(),
            self.network_type.as_deref().unwrap_or_default(),
            self.segmentation_id.unwrap_or_default()
        )
    }
}

/// Device owner tag of a router's inside interface
pub const ROUTER_INTERFACE_OWNER: &str = "network:router_interface";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Port {
    #[serde(default)]
    pub fixed_ips: Vec<FixedIp>,
    pub mac_address: Option<String>,
    pub tenant_id: Option<String>,
    pub project_id: Option<String>,
    pub device_owner: Option<String>,
}

impl Port {
    /// Owning tenant; newer releases send project_id alongside or instead of tenant_id
    pub fn tenant(&self) -> &str {
        self.tenant_id
            .as_deref()
            .or(self.project_id.as_deref())
            .unwrap_or_default()
    }

    pub fn mac(&self) -> Option<&str> {
        self.mac_address.as_deref()
    }

    /// Address of the first fixed ip; later ones are never consulted
    pub fn first_ip(&self) -> Option<&str> {
        self.fixed_ips.first().and_then(|f| f.ip_address.as_deref())
    }

    /// A port without a device owner is taken to be one
    pub fn is_router_interface(&self) -> bool {
        self.device_owner
            .as_deref()
            .map_or(true, |owner| owner == ROUTER_INTERFACE_OWNER)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixedIp {
    pub ip_address: Option<String>,
}
