use crate::container::arguments::ConstructorArgs;
use crate::container::descriptor::ServiceId;
use crate::container::instance::Instance;
use crate::errors::ContainerError;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Builds an instance from its resolved constructor arguments
pub type Activator = Arc<dyn Fn(&ConstructorArgs) -> Result<Instance, ContainerError> + Send + Sync>;

/// Builds an instance of a type that has no constructor
pub type DefaultActivator = Arc<dyn Fn() -> Result<Instance, ContainerError> + Send + Sync>;

/// Trait for types the container can construct by auto-wiring their constructor
pub trait Injectable: Send + Sync + 'static {
    /// Constructor parameters in declaration order
    fn parameters() -> Vec<ParameterInfo> {
        Vec::new()
    }

    /// Create an instance from the resolved arguments
    fn construct(args: &ConstructorArgs) -> Result<Self, ContainerError>
    where
        Self: Sized;

    /// Wrap the constructed value; override to expose an `Arc<dyn Trait>` payload
    fn into_instance(self) -> Instance
    where
        Self: Sized,
    {
        Instance::new(self)
    }
}

/// Metadata about a constructor parameter
#[derive(Debug, Clone)]
pub struct ParameterInfo {
    pub name: String,
    /// Service the container should inject, `None` for plain values
    pub dependency: Option<ServiceId>,
    pub default: Option<Instance>,
    /// Whether a failed dependency may fall back to the default value
    pub optional: bool,
}

impl ParameterInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dependency: None,
            default: None,
            optional: false,
        }
    }

    /// Declare the service this parameter is injected with
    pub fn depends_on(mut self, service: impl Into<ServiceId>) -> Self {
        self.dependency = Some(service.into());
        self
    }

    /// Declare a dependency named after a Rust type
    pub fn depends_on_type<T: ?Sized + 'static>(self) -> Self {
        self.depends_on(ServiceId::of::<T>())
    }

    /// Set the default value, which also makes the parameter optional
    pub fn with_default(mut self, value: Instance) -> Self {
        self.default = Some(value);
        self.optional = true;
        self
    }

    pub fn with_default_value<T: Any + Send + Sync>(self, value: T) -> Self {
        self.with_default(Instance::new(value))
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// How a type comes into existence
#[derive(Clone)]
pub enum Activation {
    /// Interface or trait object, never instantiable
    Abstract,
    /// No constructor: instantiated with no arguments
    Default(DefaultActivator),
    /// Constructor with ordered parameters
    Constructor {
        parameters: Vec<ParameterInfo>,
        activator: Activator,
    },
}

impl fmt::Debug for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activation::Abstract => write!(f, "Abstract"),
            Activation::Default(_) => write!(f, "Default(<activator>)"),
            Activation::Constructor { parameters, .. } => f
                .debug_struct("Constructor")
                .field("parameters", parameters)
                .finish_non_exhaustive(),
        }
    }
}

/// Everything the container needs to know to build a type
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    pub service_id: ServiceId,
    pub activation: Activation,
}

impl TypeDescriptor {
    pub fn is_instantiable(&self) -> bool {
        !matches!(self.activation, Activation::Abstract)
    }

    /// Constructor parameters, `None` when the type has no constructor
    pub fn parameters(&self) -> Option<&[ParameterInfo]> {
        match &self.activation {
            Activation::Constructor { parameters, .. } => Some(parameters),
            _ => None,
        }
    }
}

/// Capability the container calls into to learn how to build a type
pub trait TypeIntrospector: Send + Sync {
    /// Describe a type, `None` when the type is unknown
    fn describe(&self, ty: &ServiceId) -> Option<Arc<TypeDescriptor>>;

    fn is_instantiable(&self, ty: &ServiceId) -> bool {
        self.describe(ty)
            .is_some_and(|descriptor| descriptor.is_instantiable())
    }

    fn constructor_parameters(&self, ty: &ServiceId) -> Option<Vec<ParameterInfo>> {
        self.describe(ty)
            .and_then(|descriptor| descriptor.parameters().map(<[ParameterInfo]>::to_vec))
    }
}

impl<I: TypeIntrospector + ?Sized> TypeIntrospector for Arc<I> {
    fn describe(&self, ty: &ServiceId) -> Option<Arc<TypeDescriptor>> {
        (**self).describe(ty)
    }
}

impl<I: TypeIntrospector + ?Sized> TypeIntrospector for Box<I> {
    fn describe(&self, ty: &ServiceId) -> Option<Arc<TypeDescriptor>> {
        (**self).describe(ty)
    }
}

/// Explicit registration table of constructible types
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<ServiceId, Arc<TypeDescriptor>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an auto-wired type under its Rust type name
    pub fn register<T: Injectable>(&mut self) -> &mut Self {
        self.register_as::<T>(ServiceId::of::<T>())
    }

    /// Register an auto-wired type under a custom identifier
    pub fn register_as<T: Injectable>(&mut self, id: impl Into<ServiceId>) -> &mut Self {
        let activator: Activator =
            Arc::new(|args: &ConstructorArgs| T::construct(args).map(Injectable::into_instance));
        self.register_with(id, T::parameters(), activator)
    }

    /// Register a type without constructor under its Rust type name
    pub fn register_default<T: Default + Send + Sync + 'static>(&mut self) -> &mut Self {
        self.register_default_as::<T>(ServiceId::of::<T>())
    }

    pub fn register_default_as<T: Default + Send + Sync + 'static>(
        &mut self,
        id: impl Into<ServiceId>,
    ) -> &mut Self {
        self.register_default_with(id, || Instance::new(T::default()))
    }

    /// Register a type without constructor whose instance comes from `make`
    pub fn register_default_with<F>(&mut self, id: impl Into<ServiceId>, make: F) -> &mut Self
    where
        F: Fn() -> Instance + Send + Sync + 'static,
    {
        let activator: DefaultActivator = Arc::new(move || Ok(make()));
        self.insert(id.into(), Activation::Default(activator))
    }

    /// Register a hand-written constructor recipe
    pub fn register_with(
        &mut self,
        id: impl Into<ServiceId>,
        parameters: Vec<ParameterInfo>,
        activator: Activator,
    ) -> &mut Self {
        self.insert(
            id.into(),
            Activation::Constructor {
                parameters,
                activator,
            },
        )
    }

    /// Register an interface that can only be satisfied through a binding
    pub fn register_abstract(&mut self, id: impl Into<ServiceId>) -> &mut Self {
        self.insert(id.into(), Activation::Abstract)
    }

    pub fn register_interface<T: ?Sized + 'static>(&mut self) -> &mut Self {
        self.register_abstract(ServiceId::of::<T>())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.types.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn insert(&mut self, service_id: ServiceId, activation: Activation) -> &mut Self {
        tracing::trace!(service = %service_id, ?activation, "registering type");
        self.types.insert(
            service_id.clone(),
            Arc::new(TypeDescriptor {
                service_id,
                activation,
            }),
        );
        self
    }
}

impl TypeIntrospector for TypeRegistry {
    fn describe(&self, ty: &ServiceId) -> Option<Arc<TypeDescriptor>> {
        self.types.get(ty).cloned()
    }
}
