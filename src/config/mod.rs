//! Configuration management module
//!
//! Handles loading configuration from multiple sources with proper precedence:
//! CLI arguments > environment variables > TOML files > defaults

use crate::error::ConfigError;

pub mod cli;
pub mod env;
pub mod toml;

/// Agent binaries that identify an Open vSwitch agent. Grizzly still reported
/// the quantum name, later releases report the neutron one.
pub const DEFAULT_OVS_BINARIES: [&str; 2] =
    ["neutron-openvswitch-agent", "quantum-openvswitch-agent"];

/// Main configuration structure
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub auth_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub project_name: Option<String>,
    pub project_id: Option<String>,
    pub user_domain: String,
    pub project_domain: String,
    /// Pre-issued token; disables password authentication when set
    pub token: Option<String>,
    pub network_url: Option<String>,
    pub compute_url: Option<String>,
    pub ovs_binaries: Vec<String>,
    pub timeout_secs: u64,
    pub token_lifetime_secs: u64,
    pub accept_invalid_certs: bool,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            auth_url: None,
            username: None,
            password: None,
            project_name: None,
            project_id: None,
            user_domain: "Default".to_string(),
            project_domain: "Default".to_string(),
            token: None,
            network_url: None,
            compute_url: None,
            ovs_binaries: DEFAULT_OVS_BINARIES.iter().map(|b| b.to_string()).collect(),
            timeout_secs: 30,
            token_lifetime_secs: 3000,
            accept_invalid_certs: false,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Check that enough is configured to run `command`. `dump` talks to the
    /// compute service, everything else (and no command) to the network service.
    pub fn validate(&self, command: Option<&cli::Command>) -> Result<(), ConfigError> {
        let (field, url) = match command {
            Some(cli::Command::Dump { .. }) => ("endpoints.compute_url", &self.compute_url),
            _ => ("endpoints.network_url", &self.network_url),
        };
        if is_blank(url) {
            return Err(ConfigError::MissingRequired {
                field: field.to_string(),
            });
        }

        if is_blank(&self.token) {
            for (field, value) in [
                ("auth.url", &self.auth_url),
                ("auth.username", &self.username),
                ("auth.password", &self.password),
            ] {
                if is_blank(value) {
                    return Err(ConfigError::MissingRequired {
                        field: field.to_string(),
                    });
                }
            }
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "http timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Build the effective configuration from every source
pub fn load_configuration(args: &cli::CliArgs) -> Result<AppConfig, ConfigError> {
    let mut config = AppConfig::default();

    if let Some(ref path) = args.config {
        let file = toml::load_toml_config(path)?;
        config = toml::apply_toml_config(config, file);
    }

    let config = env::apply_env_config(config)?;
    args.apply_to_config(config)
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

// environment is process wide, tests that touch it take this first
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
