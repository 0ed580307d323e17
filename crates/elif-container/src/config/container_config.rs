use crate::config::validation::parse_flag;
use crate::config::{ConfigError, ConfigSource};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;

pub const ENV_DETECT_CYCLES: &str = "CONTAINER_DETECT_CYCLES";
pub const ENV_MAX_DEPTH: &str = "CONTAINER_MAX_DEPTH";
pub const ENV_CACHE_TYPE_METADATA: &str = "CONTAINER_CACHE_TYPE_METADATA";

const DEFAULT_MAX_DEPTH: usize = 128;

/// Configuration loaded from the process environment
pub trait EnvConfig: Sized {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self, ConfigError>;

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError>;

    /// Get configuration source information for debugging
    fn config_sources(&self) -> HashMap<String, ConfigSource>;
}

/// Tunables for the resolution engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// Fail with a circular dependency error when a constructor graph loops
    pub detect_cycles: bool,
    /// Maximum number of nested service resolutions, one level per dependency
    pub max_depth: usize,
    /// Remember type descriptors after the first introspection
    pub cache_type_metadata: bool,
}

impl ContainerConfig {
    pub fn new() -> Self {
        Self {
            detect_cycles: true,
            max_depth: DEFAULT_MAX_DEPTH,
            cache_type_metadata: true,
        }
    }

    pub fn with_detect_cycles(mut self, enabled: bool) -> Self {
        self.detect_cycles = enabled;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_cache_type_metadata(mut self, enabled: bool) -> Self {
        self.cache_type_metadata = enabled;
        self
    }
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvConfig for ContainerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new();

        if let Ok(value) = env::var(ENV_DETECT_CYCLES) {
            config.detect_cycles = parse_flag("detect_cycles", &value)?;
        }

        if let Ok(value) = env::var(ENV_MAX_DEPTH) {
            config.max_depth = value.trim().parse().map_err(|_| {
                ConfigError::invalid_value("max_depth", &value, "positive integer")
            })?;
        }

        if let Ok(value) = env::var(ENV_CACHE_TYPE_METADATA) {
            config.cache_type_metadata = parse_flag("cache_type_metadata", &value)?;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::validation_failed(
                "max_depth must be at least 1",
            ));
        }
        Ok(())
    }

    fn config_sources(&self) -> HashMap<String, ConfigSource> {
        let defaults = Self::new();

        let mut sources = HashMap::new();
        sources.insert(
            "detect_cycles".to_string(),
            ConfigSource::detect(ENV_DETECT_CYCLES, &self.detect_cycles, &defaults.detect_cycles),
        );
        sources.insert(
            "max_depth".to_string(),
            ConfigSource::detect(ENV_MAX_DEPTH, &self.max_depth, &defaults.max_depth),
        );
        sources.insert(
            "cache_type_metadata".to_string(),
            ConfigSource::detect(
                ENV_CACHE_TYPE_METADATA,
                &self.cache_type_metadata,
                &defaults.cache_type_metadata,
            ),
        );
        sources
    }
}
