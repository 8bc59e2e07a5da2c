//! Network name to provider attributes

use std::collections::HashMap;

use crate::error::OstackError;
use crate::network::{decode, NETWORKS_PATH};
use crate::openstack::models::{Network, NetworkList};
use crate::openstack::{ControlPlane, Ostack};

/// Map network name to "id physnet type segment". A later network with the
/// same name replaces an earlier one.
pub fn network_info(networks: &[Network]) -> HashMap<String, String> {
    let mut map = HashMap::with_capacity(networks.len());
    for network in networks {
        map.insert(
            network.name.clone().unwrap_or_default(),
            network.descriptor(),
        );
    }
    map
}

impl<C: ControlPlane> Ostack<C> {
    pub async fn network_info_map(&self) -> Result<HashMap<String, String>, OstackError> {
        let url = self.network_url(NETWORKS_PATH)?;
        let payload = self.fetch(&url).await?;
        let list: NetworkList = decode("network_info_map", &payload)?;

        Ok(network_info(&list.networks))
    }
}
