use crate::config::ConfigError;
use thiserror::Error;

/// Error type raised by container registration and resolution
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Circular reference detected: {}", .chain.join(" => "))]
    CircularReference { chain: Vec<String> },

    #[error("Binding error for '{service}': {message}")]
    Binding { service: String, message: String },

    #[error("Service not found: {service}")]
    NotFound { service: String },

    #[error("Circular dependency detected: {}", .path.join(" -> "))]
    CircularDependency { path: Vec<String> },

    #[error("Resolution of '{service}' exceeded the maximum depth of {depth}")]
    ResolutionDepthExceeded { service: String, depth: usize },

    #[error("Type mismatch for '{service}': expected {expected}, found {actual}")]
    TypeMismatch {
        service: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ContainerError {
    /// Create a new invalid configuration error
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Create a new binding error
    pub fn binding(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Binding {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Create a binding error for a type that cannot be instantiated
    pub fn not_instantiable(service: impl Into<String>) -> Self {
        let service = service.into();
        let message = format!("the `{}` type is not instantiable", service);
        Self::Binding { service, message }
    }

    /// Create a binding error for a constructor parameter nothing could satisfy
    pub fn unresolvable_parameter(service: impl Into<String>, parameter: &str) -> Self {
        Self::Binding {
            service: service.into(),
            message: format!("could not resolve parameter `{}`", parameter),
        }
    }

    /// Create a new not found error
    pub fn not_found(service: impl Into<String>) -> Self {
        Self::NotFound {
            service: service.into(),
        }
    }

    /// Check if the error is a binding error
    pub fn is_binding(&self) -> bool {
        matches!(self, Self::Binding { .. })
    }

    /// Check if the error is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if the error is an alias cycle
    pub fn is_circular_reference(&self) -> bool {
        matches!(self, Self::CircularReference { .. })
    }

    /// Check if the error is a constructor dependency cycle
    pub fn is_circular_dependency(&self) -> bool {
        matches!(self, Self::CircularDependency { .. })
    }

    /// Check if the error is a configuration error
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration { .. } | Self::Config(_))
    }
}

/// Result alias with [`ContainerError`] as the default error type
pub type Result<T, E = ContainerError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circular_reference_message_lists_chain() {
        let error = ContainerError::CircularReference {
            chain: vec!["a".to_string(), "b".to_string(), "a".to_string()],
        };
        assert_eq!(error.to_string(), "Circular reference detected: a => b => a");
        assert!(error.is_circular_reference());
        assert!(!error.is_binding());
    }

    #[test]
    fn test_binding_helpers() {
        let error = ContainerError::not_instantiable("FooInterface");
        assert!(error.is_binding());
        assert_eq!(
            error.to_string(),
            "Binding error for 'FooInterface': the `FooInterface` type is not instantiable"
        );

        let error = ContainerError::unresolvable_parameter("Bar", "value");
        assert!(error.to_string().contains("could not resolve parameter `value`"));
    }

    #[test]
    fn test_not_found_is_distinct_from_binding() {
        let error = ContainerError::not_found("missing");
        assert!(error.is_not_found());
        assert!(!error.is_binding());
    }
}
