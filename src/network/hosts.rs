//! Physical hosts running network agents

use std::collections::HashSet;

use crate::error::OstackError;
use crate::network::{decode, AGENTS_PATH};
use crate::openstack::models::{Agent, AgentList};
use crate::openstack::{ControlPlane, Ostack};

/// Host names already reported, carried by the caller across queries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostSet {
    seen: HashSet<String>,
}

impl HostSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, host: &str) -> bool {
        self.seen.contains(host)
    }

    /// Returns false when the host was already present
    pub fn insert(&mut self, host: &str) -> bool {
        if self.seen.contains(host) {
            return false;
        }
        self.seen.insert(host.to_string())
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Strip any domain, then any ":uuid" suffix, from a reported host name.
///
/// Both cuts are positional: everything from the first '.' goes, then
/// everything from the first ':' of what is left.
pub fn normalize_host(raw: &str) -> &str {
    let host = raw.split_once('.').map_or(raw, |(host, _)| host);
    host.split_once(':').map_or(host, |(host, _)| host)
}

/// Space separated list of live agent hosts not yet in `seen`, in encounter
/// order. With `ovs_binaries` set only agents running one of them count.
pub fn collect_hosts(
    agents: &[Agent],
    seen: &mut HostSet,
    ovs_binaries: Option<&[String]>,
) -> String {
    let mut hosts: Vec<&str> = Vec::new();

    for agent in agents {
        if !agent.is_alive() {
            continue;
        }
        if let Some(binaries) = ovs_binaries {
            if !agent.runs_binary(binaries) {
                continue;
            }
        }

        let Some(raw) = agent.host.as_deref() else {
            continue;
        };
        let host = normalize_host(raw);
        if seen.insert(host) {
            hosts.push(host);
        }
    }

    hosts.join(" ")
}

impl<C: ControlPlane> Ostack<C> {
    /// List the hosts running network agents.
    ///
    /// Hosts already in `seen` are skipped and new ones are added to it, so
    /// repeated calls never report a host twice. `seen` keeps whatever was
    /// added even when the call fails.
    pub async fn list_net_hosts(
        &self,
        seen: &mut HostSet,
        ovs_only: bool,
    ) -> Result<String, OstackError> {
        let url = self.network_url(AGENTS_PATH)?;
        let payload = self.fetch(&url).await?;
        let list: AgentList = decode("list_net_hosts", &payload)?;

        let filter = ovs_only.then(|| self.ovs_binaries());
        Ok(collect_hosts(&list.agents, seen, filter))
    }
}
