//! Configuration management for the token services
//!
//! Sources, lowest priority first:
//! - Built-in defaults from `AppConfig::default()`
//! - An optional TOML file
//! - `APP__`-prefixed environment variables, e.g. `APP__AUTH__JWT__SECRET`
//!
//! A `.env` file in the working directory is loaded into the process
//! environment first.

use std::path::Path;

use config::{Config, Environment as EnvSource, File};
use tc_shared::AppConfig;
use tracing::{debug, info};

use crate::InfrastructureError;

/// Prefix for configuration environment variables
pub const ENV_PREFIX: &str = "APP";

/// Load application configuration from an optional file plus the environment
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, InfrastructureError> {
    dotenvy::dotenv().ok();

    let defaults = Config::try_from(&AppConfig::default()).map_err(config_error)?;
    let mut builder = Config::builder().add_source(defaults);

    if let Some(path) = path {
        debug!(path = %path.display(), "Adding configuration file");
        builder = builder.add_source(File::from(path).required(false));
    }

    let config: AppConfig = builder
        .add_source(
            EnvSource::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(config_error)?
        .try_deserialize()
        .map_err(config_error)?;

    info!(environment = %config.environment, "Configuration loaded");
    Ok(config)
}

fn config_error(err: config::ConfigError) -> InfrastructureError {
    InfrastructureError::Config(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = load_config(Some(Path::new("does-not-exist.toml"))).unwrap();
        assert!(!config.auth.jwt.issuer.is_empty());
        assert!(config.auth.rotation.max_attempts >= 1);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("tc-config-{}.toml", uuid::Uuid::new_v4()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[auth.jwt]
secret = "file-provided-secret-with-plenty-of-bytes"
issuer = "file-issuer"
audience = "file-audience"
access_token_expiry_minutes = 5
refresh_token_expiry_minutes = 60

[auth.rotation]
max_attempts = 3
store_timeout_ms = 500
"#
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.auth.jwt.issuer, "file-issuer");
        assert_eq!(config.auth.jwt.access_token_expiry_minutes, 5);
        assert_eq!(config.auth.rotation.max_attempts, 3);
        assert_eq!(config.auth.rotation.store_timeout_ms, 500);
    }

    #[test]
    fn test_environment_and_partial_sections_from_file() {
        let path = std::env::temp_dir().join(format!("tc-config-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            r#"
environment = "prod"

[database]
url = "mysql://db:3306/tokens"

[logging]
format = "json"
"#,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(config.environment.is_production());
        assert_eq!(config.database.url, "mysql://db:3306/tokens");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.logging.format, tc_shared::LogFormat::Json);
    }
}
