use crate::config::{ContainerConfig, EnvConfig};
use crate::container::binding::Concrete;
use crate::container::descriptor::ServiceId;
use crate::container::ioc_container::Container;
use crate::container::autowiring::{TypeIntrospector, TypeRegistry};
use crate::container::scope::ServiceScope;
use crate::errors::ContainerError;

/// Deferred registration applied when the container is built
#[derive(Debug)]
enum Registration {
    Bind {
        service: ServiceId,
        concrete: Option<Concrete>,
        scope: ServiceScope,
    },
    Alias {
        alias: ServiceId,
        target: ServiceId,
    },
}

/// Builder for a [`Container`] with fluent API
pub struct ContainerBuilder {
    config: ContainerConfig,
    introspector: Box<dyn TypeIntrospector>,
    registrations: Vec<Registration>,
}

impl ContainerBuilder {
    pub fn new() -> Self {
        Self {
            config: ContainerConfig::default(),
            introspector: Box::new(TypeRegistry::new()),
            registrations: Vec::new(),
        }
    }

    /// Start from configuration found in the environment
    pub fn from_env() -> Result<Self, ContainerError> {
        Ok(Self::new().config(ContainerConfig::from_env()?))
    }

    pub fn config(mut self, config: ContainerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn types<I: TypeIntrospector + 'static>(mut self, introspector: I) -> Self {
        self.introspector = Box::new(introspector);
        self
    }

    pub fn bind(mut self, service: impl Into<ServiceId>, concrete: impl Into<Concrete>) -> Self {
        self.registrations.push(Registration::Bind {
            service: service.into(),
            concrete: Some(concrete.into()),
            scope: ServiceScope::Transient,
        });
        self
    }

    pub fn singleton(mut self, service: impl Into<ServiceId>, concrete: impl Into<Concrete>) -> Self {
        self.registrations.push(Registration::Bind {
            service: service.into(),
            concrete: Some(concrete.into()),
            scope: ServiceScope::Singleton,
        });
        self
    }

    /// Bind `service` to itself with the given lifetime
    pub fn register(mut self, service: impl Into<ServiceId>, scope: ServiceScope) -> Self {
        self.registrations.push(Registration::Bind {
            service: service.into(),
            concrete: None,
            scope,
        });
        self
    }

    pub fn alias(mut self, alias: impl Into<ServiceId>, target: impl Into<ServiceId>) -> Self {
        self.registrations.push(Registration::Alias {
            alias: alias.into(),
            target: target.into(),
        });
        self
    }

    /// Validate the configuration and apply registrations in order
    pub fn build(self) -> Result<Container, ContainerError> {
        self.config.validate()?;

        let mut container = Container::from_parts(self.introspector, self.config);
        for registration in self.registrations {
            match registration {
                Registration::Bind {
                    service,
                    concrete,
                    scope,
                } => {
                    container.bind_with(service, concrete, scope)?;
                }
                Registration::Alias { alias, target } => {
                    container.alias(alias, target)?;
                }
            }
        }

        Ok(container)
    }
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
