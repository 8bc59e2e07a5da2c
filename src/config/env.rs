//! Environment variable configuration handling

use crate::config::AppConfig;
use crate::error::ConfigError;
use std::env;

/// Environment variable prefix
const ENV_PREFIX: &str = "OSTACK_NET_";

fn var(name: &str) -> Option<String> {
    env::var(format!("{}{}", ENV_PREFIX, name)).ok()
}

/// Apply environment variable configuration over base configuration
pub fn apply_env_config(mut base_config: AppConfig) -> Result<AppConfig, ConfigError> {
    if let Some(url) = var("AUTH_URL") {
        base_config.auth_url = Some(url);
    }

    if let Some(user) = var("USERNAME") {
        base_config.username = Some(user);
    }

    if let Some(password) = var("PASSWORD") {
        base_config.password = Some(password);
    }

    if let Some(project) = var("PROJECT_NAME") {
        base_config.project_name = Some(project);
    }

    if let Some(project_id) = var("PROJECT_ID") {
        base_config.project_id = Some(project_id);
    }

    if let Some(domain) = var("USER_DOMAIN") {
        base_config.user_domain = domain;
    }

    if let Some(domain) = var("PROJECT_DOMAIN") {
        base_config.project_domain = domain;
    }

    if let Some(token) = var("TOKEN") {
        base_config.token = Some(token);
    }

    if let Some(url) = var("NETWORK_URL") {
        base_config.network_url = Some(url);
    }

    if let Some(url) = var("COMPUTE_URL") {
        base_config.compute_url = Some(url);
    }

    // Format: OSTACK_NET_OVS_BINARIES="neutron-openvswitch-agent,quantum-openvswitch-agent"
    if let Some(list) = var("OVS_BINARIES") {
        base_config.ovs_binaries = parse_binary_list(&list)?;
    }

    if let Some(timeout) = var("TIMEOUT_SECS") {
        base_config.timeout_secs = parse_secs("TIMEOUT_SECS", &timeout)?;
    }

    if let Some(lifetime) = var("TOKEN_LIFETIME_SECS") {
        base_config.token_lifetime_secs = parse_secs("TOKEN_LIFETIME_SECS", &lifetime)?;
    }

    if let Some(insecure) = var("INSECURE") {
        base_config.accept_invalid_certs = parse_flag(&insecure)?;
    }

    if let Some(level) = var("LOG_LEVEL") {
        base_config.log_level = level;
    }

    Ok(base_config)
}

/// Parse a comma separated list of agent binary names
pub fn parse_binary_list(list: &str) -> Result<Vec<String>, ConfigError> {
    let binaries: Vec<String> = list
        .split(',')
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(str::to_string)
        .collect();

    if binaries.is_empty() {
        return Err(ConfigError::InvalidFormat(format!(
            "Invalid agent binary list: '{}'. Expected 'name1,name2'",
            list
        )));
    }

    Ok(binaries)
}

fn parse_secs(name: &str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse::<u64>().map_err(|_| {
        ConfigError::InvalidFormat(format!("Invalid {}{}: '{}'", ENV_PREFIX, name, value))
    })
}

fn parse_flag(value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::InvalidFormat(format!(
            "Invalid boolean value: '{}'",
            other
        ))),
    }
}
