//! Deployment environment

use serde::{Deserialize, Serialize};
use std::fmt;

/// Environment the token services run in
///
/// Read from the `environment` key, e.g. `APP__ENVIRONMENT=prod`. Only
/// production changes behaviour: it refuses the well-known development
/// signing secret and picks quieter logging defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    #[serde(alias = "dev")]
    Development,
    #[serde(alias = "stage")]
    Staging,
    #[serde(alias = "prod")]
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Name as written in configuration and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
