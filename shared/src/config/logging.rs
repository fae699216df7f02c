//! Tracing output settings

use serde::{Deserialize, Serialize};

use super::environment::Environment;

/// How log lines are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
    Compact,
}

/// Subscriber settings; `RUST_LOG` overrides `filter` when set
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `warn,tc_core=info`
    pub filter: String,

    pub format: LogFormat,

    /// ANSI colours, for terminals only
    pub ansi: bool,

    /// File and line of each event
    pub source_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: String::from("info"),
            format: LogFormat::default(),
            ansi: true,
            source_location: false,
        }
    }
}

impl LoggingConfig {
    /// Defaults suited to an environment
    ///
    /// Outside development the output is JSON without colours. Production
    /// keeps the token crates at `info` so rotation conflicts and timeouts
    /// stay visible while everything else drops to `warn`.
    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Development => Self {
                filter: String::from("debug"),
                format: LogFormat::Pretty,
                ansi: true,
                source_location: true,
            },
            Environment::Staging => Self {
                filter: String::from("info"),
                format: LogFormat::Json,
                ansi: false,
                source_location: false,
            },
            Environment::Production => Self {
                filter: String::from("warn,tc_core=info,tc_infra=info"),
                format: LogFormat::Json,
                ansi: false,
                source_location: false,
            },
        }
    }
}
