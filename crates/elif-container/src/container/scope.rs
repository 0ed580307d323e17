use serde::{Deserialize, Serialize};

/// Service lifetime of a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceScope {
    /// Single instance cached and shared by every `make` call
    Singleton,
    /// New instance built for each `make` call
    #[default]
    Transient,
}

impl ServiceScope {
    /// Check if the scope is singleton
    pub fn is_singleton(&self) -> bool {
        matches!(self, ServiceScope::Singleton)
    }

    /// Check if the scope is transient
    pub fn is_transient(&self) -> bool {
        matches!(self, ServiceScope::Transient)
    }

    /// Get the scope name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceScope::Singleton => "singleton",
            ServiceScope::Transient => "transient",
        }
    }
}

impl From<bool> for ServiceScope {
    fn from(shared: bool) -> Self {
        if shared {
            ServiceScope::Singleton
        } else {
            ServiceScope::Transient
        }
    }
}

impl std::fmt::Display for ServiceScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ServiceScope {
    type Err = crate::errors::ContainerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "singleton" | "shared" => Ok(ServiceScope::Singleton),
            "transient" => Ok(ServiceScope::Transient),
            _ => Err(crate::errors::ContainerError::invalid_configuration(format!(
                "unknown service scope `{}`",
                s
            ))),
        }
    }
}
