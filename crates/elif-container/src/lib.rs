//! Dependency injection container for elif.rs
//!
//! Maps abstract identifiers to construction recipes (types or factories),
//! resolves alias chains, auto-wires constructor dependencies through a
//! [`TypeIntrospector`], caches singletons and runs extender chains.

pub mod config;
pub mod container;
pub mod errors;

pub use config::{ConfigError, ConfigSource, ContainerConfig, EnvConfig};
pub use container::{
    Arguments, Binding, BindingHandle, Concrete, ConstructorArgs, Container, ContainerBuilder,
    ContainerSnapshot, ExtenderHandle, Injectable, Instance, ParameterInfo, ServiceId,
    ServiceLocator, ServiceScope, TypeDescriptor, TypeIntrospector, TypeRegistry,
};
pub use errors::{ContainerError, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get crate version
pub fn version() -> &'static str {
    VERSION
}
