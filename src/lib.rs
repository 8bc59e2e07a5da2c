//! ostack-net - OpenStack networking queries
//!
//! This library authenticates against an OpenStack cloud, lists agents, networks
//! and router interface ports from the networking service, and reshapes them into
//! host lists, network descriptors and gateway MAC/address maps.

pub mod config;
pub mod error;
pub mod network;
pub mod openstack;

pub use error::{AppError, OstackError};
pub use network::{GatewayMaps, HostSet};
pub use openstack::session::HttpControlPlane;
pub use openstack::{ControlPlane, Ostack};
