//! TOML configuration file parsing

use crate::config::AppConfig;
use crate::error::ConfigError;
use serde::Deserialize;

/// TOML configuration structure
#[derive(Debug, Default, Deserialize)]
pub struct TomlConfig {
    pub auth: Option<AuthConfig>,
    pub endpoints: Option<EndpointsConfig>,
    pub agents: Option<AgentsConfig>,
    pub http: Option<HttpConfig>,
    pub logging: Option<LoggingConfig>,
}

/// Keystone credentials
#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub project_name: Option<String>,
    pub project_id: Option<String>,
    pub user_domain: Option<String>,
    pub project_domain: Option<String>,
    pub token: Option<String>,
    pub token_lifetime_secs: Option<u64>,
}

/// Service endpoint urls
#[derive(Debug, Deserialize)]
pub struct EndpointsConfig {
    pub network_url: Option<String>,
    pub compute_url: Option<String>,
}

/// Agent classification
#[derive(Debug, Deserialize)]
pub struct AgentsConfig {
    pub ovs_binaries: Option<Vec<String>>,
}

/// HTTP client settings
#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub timeout_secs: Option<u64>,
    pub accept_invalid_certs: Option<bool>,
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

/// Load configuration from TOML file
pub fn load_toml_config(path: &str) -> Result<TomlConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_string(),
    })?;

    toml::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))
}

/// Apply values present in the file over base configuration
pub fn apply_toml_config(mut base_config: AppConfig, file: TomlConfig) -> AppConfig {
    if let Some(auth) = file.auth {
        if auth.url.is_some() {
            base_config.auth_url = auth.url;
        }
        if auth.username.is_some() {
            base_config.username = auth.username;
        }
        if auth.password.is_some() {
            base_config.password = auth.password;
        }
        if auth.project_name.is_some() {
            base_config.project_name = auth.project_name;
        }
        if auth.project_id.is_some() {
            base_config.project_id = auth.project_id;
        }
        if let Some(domain) = auth.user_domain {
            base_config.user_domain = domain;
        }
        if let Some(domain) = auth.project_domain {
            base_config.project_domain = domain;
        }
        if auth.token.is_some() {
            base_config.token = auth.token;
        }
        if let Some(lifetime) = auth.token_lifetime_secs {
            base_config.token_lifetime_secs = lifetime;
        }
    }

    if let Some(endpoints) = file.endpoints {
        if endpoints.network_url.is_some() {
            base_config.network_url = endpoints.network_url;
        }
        if endpoints.compute_url.is_some() {
            base_config.compute_url = endpoints.compute_url;
        }
    }

    if let Some(binaries) = file.agents.and_then(|a| a.ovs_binaries) {
        base_config.ovs_binaries = binaries;
    }

    if let Some(http) = file.http {
        if let Some(timeout) = http.timeout_secs {
            base_config.timeout_secs = timeout;
        }
        if let Some(insecure) = http.accept_invalid_certs {
            base_config.accept_invalid_certs = insecure;
        }
    }

    if let Some(level) = file.logging.and_then(|l| l.level) {
        base_config.log_level = level;
    }

    base_config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
[auth]
url = "http://keystone:5000/v3"
username = "admin"
password = "secret"
project_name = "demo"

[endpoints]
network_url = "http://neutron:9696"

[agents]
ovs_binaries = ["neutron-openvswitch-agent"]

[http]
timeout_secs = 10

[logging]
level = "debug"
"#;

    #[test]
    fn test_load_and_apply_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let parsed = load_toml_config(file.path().to_str().unwrap()).unwrap();
        let config = apply_toml_config(AppConfig::default(), parsed);

        assert_eq!(config.auth_url.as_deref(), Some("http://keystone:5000/v3"));
        assert_eq!(config.username.as_deref(), Some("admin"));
        assert_eq!(config.project_name.as_deref(), Some("demo"));
        assert_eq!(config.network_url.as_deref(), Some("http://neutron:9696"));
        assert_eq!(config.compute_url, None);
        assert_eq!(config.ovs_binaries, vec!["neutron-openvswitch-agent"]);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.log_level, "debug");
        // untouched by the file
        assert_eq!(config.user_domain, "Default");
        assert_eq!(config.token_lifetime_secs, 3000);
    }

    #[test]
    fn test_empty_file_keeps_defaults() {
        let config = apply_toml_config(AppConfig::default(), toml::from_str("").unwrap());
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_missing_file() {
        let result = load_toml_config("/nonexistent/ostack-net.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }

    #[test]
    fn test_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[auth\nurl = ").unwrap();

        let result = load_toml_config(file.path().to_str().unwrap());
        assert!(matches!(result, Err(ConfigError::InvalidFormat(_))));
    }
}
