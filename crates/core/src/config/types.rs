use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub convert: ConvertConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding the browser tools, served for any non-API path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

/// Batch conversion configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConvertConfig {
    /// How many items of one batch may be in flight at once (1 = sequential).
    #[serde(default = "default_max_concurrent_items")]
    pub max_concurrent_items: usize,
    /// Upper bound on the request body accepted by the convert endpoint.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            max_concurrent_items: default_max_concurrent_items(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_max_concurrent_items() -> usize {
    1
}

fn default_max_upload_bytes() -> usize {
    50 * 1024 * 1024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        assert!(config.server.static_dir.is_none());
        assert_eq!(config.convert.max_concurrent_items, 1);
        assert_eq!(config.convert.max_upload_bytes, 50 * 1024 * 1024);
    }

    #[test]
    fn test_deserialize_server_section() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 9000
static_dir = "public"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host.to_string(), "127.0.0.1");
        assert_eq!(config.server.static_dir, Some(PathBuf::from("public")));
    }

    #[test]
    fn test_deserialize_convert_section() {
        let toml = r#"
[convert]
max_concurrent_items = 4
max_upload_bytes = 1024
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.convert.max_concurrent_items, 4);
        assert_eq!(config.convert.max_upload_bytes, 1024);
        // untouched section keeps defaults
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_serialize_skips_missing_static_dir() {
        let json = serde_json::to_value(Config::default()).unwrap();
        assert!(json["server"].get("static_dir").is_none());
        assert_eq!(json["convert"]["max_concurrent_items"], 1);
    }
}
