//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{shadowed_routes, validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
///
/// Shadowed route entries are legal but logged, since a shadowed prefix can
/// never match and usually means the table is ordered wrong.
pub fn load_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ProxyConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    for (earlier, later) in shadowed_routes(&config) {
        tracing::warn!(
            shadowing_prefix = %config.routes[earlier].local_prefix,
            shadowed_prefix = %config.routes[later].local_prefix,
            "Route is shadowed by an earlier entry and will never match"
        );
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_routes_in_file_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [listener]
            bind_address = "127.0.0.1:9001"

            [[routes]]
            local_prefix = "/wllama/single-thread/"
            upstream_base = "https://cdn.example.net/esm/single-thread/"

            [[routes]]
            local_prefix = "/wllama/"
            upstream_base = "https://cdn.example.net/esm/"
            "#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:9001");
        assert_eq!(config.routes[0].local_prefix, "/wllama/single-thread/");
        assert_eq!(config.routes[1].local_prefix, "/wllama/");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [[routes]]
            local_prefix = "no-slash/"
            upstream_base = "https://cdn.example.net/"
            "#
        )
        .unwrap();

        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            load_config(Path::new("/nonexistent/cdn-proxy.toml")),
            Err(ConfigError::Io(_))
        ));
    }
}
