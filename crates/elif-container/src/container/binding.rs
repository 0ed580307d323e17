use crate::container::arguments::{ArgKey, Arguments};
use crate::container::descriptor::ServiceId;
use crate::container::instance::Instance;
use crate::container::ioc_container::Container;
use crate::container::scope::ServiceScope;
use crate::errors::ContainerError;
use std::fmt;
use std::sync::Arc;

/// Factory recipe: receives the container and the fixed arguments
pub type Factory =
    Arc<dyn Fn(&mut Container, &Arguments) -> Result<Instance, ContainerError> + Send + Sync>;

/// Post-construction mutator
pub type Setter = Arc<dyn Fn(&Instance, &mut Container) -> Result<(), ContainerError> + Send + Sync>;

/// Decorator callback: `Ok(None)` or the same instance means "keep the current instance"
pub type ExtenderFn =
    Arc<dyn Fn(&Instance, &mut Container) -> Result<Option<Instance>, ContainerError> + Send + Sync>;

/// Construction recipe of a binding
#[derive(Clone)]
pub enum Concrete {
    /// Type the introspector knows how to build
    Type(ServiceId),
    /// Callable fully responsible for construction
    Factory(Factory),
}

impl Concrete {
    pub fn ty(id: impl Into<ServiceId>) -> Self {
        Concrete::Type(id.into())
    }

    pub fn factory<F>(factory: F) -> Self
    where
        F: Fn(&mut Container, &Arguments) -> Result<Instance, ContainerError> + Send + Sync + 'static,
    {
        Concrete::Factory(Arc::new(factory))
    }

    pub fn is_factory(&self) -> bool {
        matches!(self, Concrete::Factory(_))
    }

    pub fn type_id(&self) -> Option<&ServiceId> {
        match self {
            Concrete::Type(id) => Some(id),
            Concrete::Factory(_) => None,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ContainerError> {
        match self {
            Concrete::Type(id) => id.validate().map_err(|_| {
                ContainerError::invalid_configuration(
                    "the concrete must be a non-empty type identifier or a factory",
                )
            }),
            Concrete::Factory(_) => Ok(()),
        }
    }

    /// Human readable recipe, used by diagnostics
    pub fn describe(&self) -> String {
        match self {
            Concrete::Type(id) => id.to_string(),
            Concrete::Factory(_) => "<factory>".to_string(),
        }
    }
}

impl fmt::Debug for Concrete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Concrete::Type(id) => f.debug_tuple("Type").field(id).finish(),
            Concrete::Factory(_) => f.debug_tuple("Factory").field(&"<factory>").finish(),
        }
    }
}

impl From<ServiceId> for Concrete {
    fn from(id: ServiceId) -> Self {
        Concrete::Type(id)
    }
}

impl From<&ServiceId> for Concrete {
    fn from(id: &ServiceId) -> Self {
        Concrete::Type(id.clone())
    }
}

impl From<&str> for Concrete {
    fn from(id: &str) -> Self {
        Concrete::Type(ServiceId::new(id))
    }
}

impl From<String> for Concrete {
    fn from(id: String) -> Self {
        Concrete::Type(ServiceId::new(id))
    }
}

/// Extender callback plus the setters applied to its replacement instance
#[derive(Clone)]
pub struct Extender {
    callback: ExtenderFn,
    setters: Vec<Setter>,
}

impl Extender {
    pub(crate) fn new(callback: ExtenderFn) -> Self {
        Self {
            callback,
            setters: Vec::new(),
        }
    }

    pub fn callback(&self) -> &ExtenderFn {
        &self.callback
    }

    pub fn setters(&self) -> &[Setter] {
        &self.setters
    }
}

impl fmt::Debug for Extender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extender")
            .field("setters", &self.setters.len())
            .finish_non_exhaustive()
    }
}

/// Registered recipe for an abstract identifier
#[derive(Clone)]
pub struct Binding {
    concrete: Concrete,
    scope: ServiceScope,
    arguments: Arguments,
    setters: Vec<Setter>,
    extenders: Vec<Extender>,
}

impl Binding {
    pub fn new(concrete: Concrete, scope: ServiceScope) -> Self {
        Self {
            concrete,
            scope,
            arguments: Arguments::new(),
            setters: Vec::new(),
            extenders: Vec::new(),
        }
    }

    pub fn concrete(&self) -> &Concrete {
        &self.concrete
    }

    pub fn scope(&self) -> ServiceScope {
        self.scope
    }

    pub fn is_shared(&self) -> bool {
        self.scope.is_singleton()
    }

    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    pub fn setters(&self) -> &[Setter] {
        &self.setters
    }

    pub fn extenders(&self) -> &[Extender] {
        &self.extenders
    }

    pub(crate) fn set_arguments(&mut self, arguments: Arguments) {
        self.arguments = arguments;
    }

    pub(crate) fn push_setter(&mut self, setter: Setter) {
        self.setters.push(setter);
    }

    pub(crate) fn push_extender(&mut self, callback: ExtenderFn) -> usize {
        self.extenders.push(Extender::new(callback));
        self.extenders.len() - 1
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("concrete", &self.concrete)
            .field("scope", &self.scope)
            .field("arguments", &self.arguments)
            .field("setters", &self.setters.len())
            .field("extenders", &self.extenders)
            .finish()
    }
}

/// Fluent access to a freshly registered binding
pub struct BindingHandle<'a> {
    binding: &'a mut Binding,
}

impl<'a> BindingHandle<'a> {
    pub(crate) fn new(binding: &'a mut Binding) -> Self {
        Self { binding }
    }

    /// Replace the binding's fixed arguments
    pub fn arguments(self, arguments: Arguments) -> Self {
        self.binding.set_arguments(arguments);
        self
    }

    /// Add or replace one fixed argument
    pub fn argument(self, key: impl Into<ArgKey>, value: Instance) -> Self {
        self.binding.arguments.insert(key, value);
        self
    }

    /// Run `setter` on every freshly built instance, before extenders
    pub fn setter<F>(self, setter: F) -> Self
    where
        F: Fn(&Instance, &mut Container) -> Result<(), ContainerError> + Send + Sync + 'static,
    {
        self.binding.push_setter(Arc::new(setter));
        self
    }

    /// Append a decorator to the extender chain
    pub fn extender<F>(self, callback: F) -> ExtenderHandle<'a>
    where
        F: Fn(&Instance, &mut Container) -> Result<Option<Instance>, ContainerError>
            + Send
            + Sync
            + 'static,
    {
        let index = self.binding.push_extender(Arc::new(callback));
        ExtenderHandle {
            binding: self.binding,
            index,
        }
    }

    pub fn binding(&self) -> &Binding {
        self.binding
    }
}

/// Fluent access to the most recently appended extender
pub struct ExtenderHandle<'a> {
    binding: &'a mut Binding,
    index: usize,
}

impl<'a> ExtenderHandle<'a> {
    pub(crate) fn new(binding: &'a mut Binding, index: usize) -> Self {
        Self { binding, index }
    }

    /// Run `setter` on the instance this extender returns, when it replaces the previous one
    pub fn setter<F>(self, setter: F) -> Self
    where
        F: Fn(&Instance, &mut Container) -> Result<(), ContainerError> + Send + Sync + 'static,
    {
        self.binding.extenders[self.index]
            .setters
            .push(Arc::new(setter));
        self
    }

    /// Append another decorator after this one
    pub fn extender<F>(self, callback: F) -> ExtenderHandle<'a>
    where
        F: Fn(&Instance, &mut Container) -> Result<Option<Instance>, ContainerError>
            + Send
            + Sync
            + 'static,
    {
        let index = self.binding.push_extender(Arc::new(callback));
        ExtenderHandle {
            binding: self.binding,
            index,
        }
    }
}
