use serde::Serialize;
use std::fmt;

/// Where a configuration value came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ConfigSource {
    /// Read from the named environment variable
    EnvVar(String),
    /// Built-in default, rendered as text
    Default(String),
    /// Set in code through the `with_*` builders or a deserialized config
    Programmatic,
}

impl ConfigSource {
    /// Attribute a value: environment first, then code, then the default
    pub(crate) fn detect<T: PartialEq + ToString>(var: &str, value: &T, default: &T) -> Self {
        if std::env::var(var).is_ok() {
            ConfigSource::EnvVar(var.to_string())
        } else if value != default {
            ConfigSource::Programmatic
        } else {
            ConfigSource::Default(default.to_string())
        }
    }

    pub fn is_env_var(&self) -> bool {
        matches!(self, ConfigSource::EnvVar(_))
    }

    pub fn is_default(&self) -> bool {
        matches!(self, ConfigSource::Default(_))
    }

    pub fn is_programmatic(&self) -> bool {
        matches!(self, ConfigSource::Programmatic)
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::EnvVar(var) => write!(f, "environment variable {}", var),
            ConfigSource::Default(value) => write!(f, "default ({})", value),
            ConfigSource::Programmatic => write!(f, "set in code"),
        }
    }
}
