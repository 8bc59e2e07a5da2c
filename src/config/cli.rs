//! Command-line argument parsing

use crate::config::{env::parse_binary_list, AppConfig};
use crate::error::ConfigError;
use clap::{Parser, Subcommand};

/// Command-line arguments structure
#[derive(Parser, Debug)]
#[command(name = "ostack-net")]
#[command(about = "Query the OpenStack networking service for hosts, networks and gateways")]
#[command(version)]
pub struct CliArgs {
    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, help = "Set the logging level")]
    pub log_level: Option<String>,

    #[arg(long, help = "Keystone v3 url, e.g. http://keystone:5000/v3")]
    pub auth_url: Option<String>,

    #[arg(long, help = "User to authenticate as")]
    pub username: Option<String>,

    #[arg(long, help = "Project name to scope the token to")]
    pub project_name: Option<String>,

    #[arg(long, help = "Project id used for tenant scoped queries")]
    pub project_id: Option<String>,

    #[arg(long, help = "Base url of the networking service")]
    pub network_url: Option<String>,

    #[arg(long, help = "Base url of the compute service (used by dump)")]
    pub compute_url: Option<String>,

    /// Comma separated agent binaries treated as OVS agents
    #[arg(long, help = "Agent binaries considered OVS agents, e.g. 'a,b'")]
    pub ovs_binaries: Option<String>,

    /// Validate configuration and exit
    #[arg(
        long,
        help = "Validate configuration and exit without querying the service"
    )]
    pub validate_config: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in TOML format and exit")]
    pub print_default_config: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Queries exposed on the command line
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Space separated list of hosts running network agents
    Hosts {
        #[arg(long, help = "Only list hosts running an OVS agent")]
        ovs_only: bool,
    },
    /// Network name to "id physnet type segment" map
    Networks,
    /// Gateway MAC to address map
    Gateways {
        #[arg(long, help = "Prefix addresses with the owning tenant id")]
        tenant: bool,
        #[arg(long, help = "Restrict the port listing to the configured project")]
        use_project: bool,
        #[arg(long, help = "Print the address to MAC map instead")]
        reverse: bool,
    },
    /// One "MAC IP" line per gateway port
    Gwlist,
    /// Write raw json from a compute service path to stderr
    Dump { path: String },
}

impl CliArgs {
    /// Apply CLI arguments over base configuration
    pub fn apply_to_config(&self, mut base_config: AppConfig) -> Result<AppConfig, ConfigError> {
        if let Some(ref level) = self.log_level {
            base_config.log_level = level.clone();
        }

        if let Some(ref url) = self.auth_url {
            base_config.auth_url = Some(url.clone());
        }

        if let Some(ref user) = self.username {
            base_config.username = Some(user.clone());
        }

        if let Some(ref project) = self.project_name {
            base_config.project_name = Some(project.clone());
        }

        if let Some(ref project_id) = self.project_id {
            base_config.project_id = Some(project_id.clone());
        }

        if let Some(ref url) = self.network_url {
            base_config.network_url = Some(url.clone());
        }

        if let Some(ref url) = self.compute_url {
            base_config.compute_url = Some(url.clone());
        }

        if let Some(ref list) = self.ovs_binaries {
            base_config.ovs_binaries = parse_binary_list(list)?;
        }

        Ok(base_config)
    }
}

/// Print default configuration in TOML format
pub fn print_default_config() {
    let default_config = AppConfig::default();

    println!("# ostack-net configuration");
    println!("# This is the default configuration with all available options");
    println!();
    println!("[auth]");
    println!("# Keystone v3 endpoint and credentials");
    println!("url = \"http://keystone:5000/v3\"");
    println!("username = \"admin\"");
    println!("password = \"\"");
    println!("project_name = \"admin\"");
    println!("# project_id = \"\"");
    println!("user_domain = \"{}\"", default_config.user_domain);
    println!("project_domain = \"{}\"", default_config.project_domain);
    println!("# A pre-issued token replaces password authentication");
    println!("# token = \"\"");
    println!(
        "token_lifetime_secs = {}",
        default_config.token_lifetime_secs
    );
    println!();
    println!("[endpoints]");
    println!("network_url = \"http://neutron:9696\"");
    println!("# compute_url = \"http://nova:8774/v2.1\"");
    println!();
    println!("[agents]");
    println!("# Agent binaries treated as Open vSwitch agents");
    let binaries: Vec<String> = default_config
        .ovs_binaries
        .iter()
        .map(|b| format!("\"{}\"", b))
        .collect();
    println!("ovs_binaries = [{}]", binaries.join(", "));
    println!();
    println!("[http]");
    println!("timeout_secs = {}", default_config.timeout_secs);
    println!(
        "accept_invalid_certs = {}",
        default_config.accept_invalid_certs
    );
    println!();
    println!("[logging]");
    println!("# Log level: trace, debug, info, warn, error");
    println!("level = \"{}\"", default_config.log_level);
}
