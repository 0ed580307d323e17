use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::config::ContainerConfig;
use crate::container::aliases::AliasTable;
use crate::container::arguments::{Arguments, ConstructorArgs};
use crate::container::autowiring::{
    Activation, ParameterInfo, TypeDescriptor, TypeIntrospector, TypeRegistry,
};
use crate::container::binding::{Binding, BindingHandle, Concrete, ExtenderHandle};
use crate::container::descriptor::ServiceId;
use crate::container::instance::Instance;
use crate::container::registry::BindingRegistry;
use crate::container::scope::ServiceScope;
use crate::errors::ContainerError;

/// Entry of the resolution stack
#[derive(Debug, Clone, PartialEq, Eq)]
enum Frame {
    Make(ServiceId),
    Build(ServiceId),
}

impl Frame {
    fn service(&self) -> &ServiceId {
        match self {
            Frame::Make(id) | Frame::Build(id) => id,
        }
    }
}

/// Dependency injection container
///
/// Maps abstract identifiers to construction recipes and resolves object
/// graphs on demand:
///
/// ```
/// use elif_container::{Container, Instance};
///
/// let mut container = Container::new();
/// container
///     .singleton("clock", elif_container::Concrete::factory(|_, _| Ok(Instance::new(42u64))))
///     .unwrap();
///
/// let first = container.make("clock").unwrap();
/// let second = container.make("clock").unwrap();
/// assert!(first.ptr_eq(&second));
/// ```
///
/// The container is single-threaded by contract: every mutation and every
/// `make` call takes `&mut self`. Hosts sharing it across threads wrap it in
/// a mutex.
pub struct Container {
    bindings: BindingRegistry,
    aliases: AliasTable,
    /// Shared instances, keyed by terminal (non-aliased) identifier
    instances: HashMap<ServiceId, Instance>,
    introspector: Box<dyn TypeIntrospector>,
    type_cache: HashMap<ServiceId, Arc<TypeDescriptor>>,
    config: ContainerConfig,
    resolving: Vec<Frame>,
}

impl Container {
    /// Create a container without any known types
    pub fn new() -> Self {
        Self::from_parts(Box::new(TypeRegistry::new()), ContainerConfig::default())
    }

    /// Create a container that builds types through `introspector`
    pub fn with_types<I: TypeIntrospector + 'static>(introspector: I) -> Self {
        Self::from_parts(Box::new(introspector), ContainerConfig::default())
    }

    pub fn from_parts(introspector: Box<dyn TypeIntrospector>, config: ContainerConfig) -> Self {
        Self {
            bindings: BindingRegistry::new(),
            aliases: AliasTable::new(),
            instances: HashMap::new(),
            introspector,
            type_cache: HashMap::new(),
            config,
            resolving: Vec::new(),
        }
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    // --- Registration ---

    /// Register a transient binding of `abstract_id` to `concrete`
    pub fn bind(
        &mut self,
        abstract_id: impl Into<ServiceId>,
        concrete: impl Into<Concrete>,
    ) -> Result<BindingHandle<'_>, ContainerError> {
        self.bind_with(abstract_id, Some(concrete.into()), ServiceScope::Transient)
    }

    /// Register a transient binding of `abstract_id` to itself
    pub fn bind_self(
        &mut self,
        abstract_id: impl Into<ServiceId>,
    ) -> Result<BindingHandle<'_>, ContainerError> {
        self.bind_with(abstract_id, None, ServiceScope::Transient)
    }

    /// Register a shared binding of `abstract_id` to `concrete`
    pub fn singleton(
        &mut self,
        abstract_id: impl Into<ServiceId>,
        concrete: impl Into<Concrete>,
    ) -> Result<BindingHandle<'_>, ContainerError> {
        self.bind_with(abstract_id, Some(concrete.into()), ServiceScope::Singleton)
    }

    /// Register a shared binding of `abstract_id` to itself
    pub fn singleton_self(
        &mut self,
        abstract_id: impl Into<ServiceId>,
    ) -> Result<BindingHandle<'_>, ContainerError> {
        self.bind_with(abstract_id, None, ServiceScope::Singleton)
    }

    /// Register a transient binding together with its fixed arguments
    pub fn bind_with_arguments(
        &mut self,
        abstract_id: impl Into<ServiceId>,
        concrete: impl Into<Concrete>,
        arguments: Arguments,
    ) -> Result<BindingHandle<'_>, ContainerError> {
        Ok(self.bind(abstract_id, concrete)?.arguments(arguments))
    }

    /// Register a binding, replacing any previous binding under `abstract_id`
    ///
    /// Without a concrete the identifier is bound to itself. The cached
    /// instance and any alias registered under `abstract_id` are dropped.
    pub fn bind_with(
        &mut self,
        abstract_id: impl Into<ServiceId>,
        concrete: Option<Concrete>,
        scope: ServiceScope,
    ) -> Result<BindingHandle<'_>, ContainerError> {
        let service_id = abstract_id.into();
        service_id.validate()?;

        let concrete = concrete.unwrap_or_else(|| Concrete::Type(service_id.clone()));
        concrete.validate()?;

        tracing::debug!(
            service = %service_id,
            concrete = %concrete.describe(),
            scope = %scope,
            "binding service"
        );

        self.instances.remove(&service_id);
        self.aliases.remove(service_id.as_str());

        let binding = self
            .bindings
            .replace(service_id, Binding::new(concrete, scope));
        Ok(BindingHandle::new(binding))
    }

    /// Remove the binding, cached instance and alias registered under `abstract_id`
    pub fn unbind(&mut self, abstract_id: impl AsRef<str>) {
        let id = abstract_id.as_ref();
        let removed_binding = self.bindings.remove(id).is_some();
        let removed_instance = self.instances.remove(id).is_some();
        let removed_alias = self.aliases.remove(id).is_some();

        if removed_binding || removed_instance || removed_alias {
            tracing::debug!(service = %id, "unbound service");
        }
    }

    /// Make `alias` resolve to whatever `target` resolves to
    pub fn alias(
        &mut self,
        alias: impl Into<ServiceId>,
        target: impl Into<ServiceId>,
    ) -> Result<&mut Self, ContainerError> {
        let alias = alias.into();
        let target = target.into();
        alias.validate()?;
        target.validate()?;

        tracing::debug!(alias = %alias, target = %target, "registering alias");

        self.instances.remove(&alias);
        self.aliases.set(alias, target);
        Ok(self)
    }

    /// Set or, with `None`, remove the alias registered under `alias`
    pub fn set_alias(
        &mut self,
        alias: impl Into<ServiceId>,
        target: Option<ServiceId>,
    ) -> Result<&mut Self, ContainerError> {
        match target {
            Some(target) => self.alias(alias, target),
            None => {
                self.unalias(alias.into().as_str());
                Ok(self)
            }
        }
    }

    pub fn unalias(&mut self, alias: &str) {
        if self.aliases.remove(alias).is_some() {
            tracing::debug!(alias = %alias, "removed alias");
        }
    }

    /// Append an extender to the binding `abstract_id` resolves to
    ///
    /// An identifier without a binding gets a default self-binding first.
    /// Instances already cached are not re-extended.
    pub fn extend<F>(
        &mut self,
        abstract_id: impl Into<ServiceId>,
        callback: F,
    ) -> Result<ExtenderHandle<'_>, ContainerError>
    where
        F: Fn(&Instance, &mut Container) -> Result<Option<Instance>, ContainerError>
            + Send
            + Sync
            + 'static,
    {
        let service_id = self.aliases.resolve(&abstract_id.into())?;
        tracing::debug!(service = %service_id, "registering extender");

        let binding = self.bindings.get_or_create_default(&service_id);
        let index = binding.push_extender(Arc::new(callback));
        Ok(ExtenderHandle::new(binding, index))
    }

    // --- Resolution ---

    /// Resolve `abstract_id` to an instance
    pub fn make(&mut self, abstract_id: impl Into<ServiceId>) -> Result<Instance, ContainerError> {
        self.make_with(abstract_id, &Arguments::new())
    }

    /// Resolve `abstract_id`, with `arguments` taking precedence over the binding's fixed arguments
    ///
    /// A cached shared instance is returned as is.
    pub fn make_with(
        &mut self,
        abstract_id: impl Into<ServiceId>,
        arguments: &Arguments,
    ) -> Result<Instance, ContainerError> {
        let service_id = self.aliases.resolve(&abstract_id.into())?;

        if let Some(instance) = self.instances.get(&service_id) {
            tracing::trace!(service = %service_id, "returning shared instance");
            return Ok(instance.clone());
        }

        self.enter(Frame::Make(service_id.clone()))?;
        let result = self.make_uncached(&service_id, arguments);
        self.leave();
        result
    }

    /// Resolve and downcast to `T`
    pub fn make_as<T: Any + Send + Sync>(
        &mut self,
        abstract_id: impl Into<ServiceId>,
    ) -> Result<Arc<T>, ContainerError> {
        let service_id = abstract_id.into();
        let instance = self.make(service_id.clone())?;
        instance
            .downcast::<T>()
            .ok_or_else(|| type_mismatch::<T>(&service_id, &instance))
    }

    /// Resolve and clone the payload out, typically an `Arc<dyn Trait>`
    pub fn make_cloned<T: Any + Clone>(
        &mut self,
        abstract_id: impl Into<ServiceId>,
    ) -> Result<T, ContainerError> {
        let service_id = abstract_id.into();
        let instance = self.make(service_id.clone())?;
        instance
            .cloned::<T>()
            .ok_or_else(|| type_mismatch::<T>(&service_id, &instance))
    }

    /// Whether `id` has a binding or an alias
    pub fn has(&self, id: &str) -> bool {
        self.bindings.contains(id) || self.aliases.contains(id)
    }

    /// Like [`make`](Self::make), but fails with `NotFound` when nothing is registered under `id`
    pub fn get(&mut self, id: &str) -> Result<Instance, ContainerError> {
        if !self.has(id) {
            return Err(ContainerError::not_found(id));
        }
        self.make(id)
    }

    pub fn get_as<T: Any + Send + Sync>(&mut self, id: &str) -> Result<Arc<T>, ContainerError> {
        if !self.has(id) {
            return Err(ContainerError::not_found(id));
        }
        self.make_as::<T>(id)
    }

    // --- Inspection ---

    pub fn is_bound(&self, id: &str) -> bool {
        self.bindings.contains(id)
    }

    pub fn is_alias(&self, id: &str) -> bool {
        self.aliases.contains(id)
    }

    /// Whether `id` resolves to a shared binding
    pub fn is_shared(&self, id: &str) -> bool {
        self.aliases
            .resolve(&ServiceId::new(id))
            .ok()
            .and_then(|service_id| self.bindings.get(service_id.as_str()))
            .is_some_and(Binding::is_shared)
    }

    /// Whether a shared instance is cached for what `id` resolves to
    pub fn has_instance(&self, id: &str) -> bool {
        self.aliases
            .resolve(&ServiceId::new(id))
            .is_ok_and(|service_id| self.instances.contains_key(&service_id))
    }

    pub fn binding(&self, id: &str) -> Option<&Binding> {
        self.bindings.get(id)
    }

    pub fn bindings(&self) -> &BindingRegistry {
        &self.bindings
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Identifiers with a cached shared instance, sorted
    pub fn instance_ids(&self) -> Vec<ServiceId> {
        let mut ids: Vec<ServiceId> = self.instances.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Drop the cached shared instance for what `id` resolves to
    pub fn forget_instance(&mut self, id: &str) -> Result<Option<Instance>, ContainerError> {
        let service_id = self.aliases.resolve(&ServiceId::new(id))?;
        Ok(self.instances.remove(&service_id))
    }

    /// Drop every binding, alias, cached instance and cached type descriptor
    pub fn flush(&mut self) {
        tracing::debug!(
            bindings = self.bindings.count(),
            aliases = self.aliases.len(),
            instances = self.instances.len(),
            "flushing container"
        );
        self.bindings.clear();
        self.aliases.clear();
        self.instances.clear();
        self.type_cache.clear();
    }

    // --- Building ---

    fn make_uncached(
        &mut self,
        service_id: &ServiceId,
        arguments: &Arguments,
    ) -> Result<Instance, ContainerError> {
        let binding = self.bindings.get_or_create_default(service_id).clone();
        let arguments = if arguments.is_empty() {
            binding.arguments().clone()
        } else {
            binding.arguments().merged(arguments)
        };

        tracing::trace!(
            service = %service_id,
            concrete = %binding.concrete().describe(),
            "building service"
        );

        let mut instance = self.build(binding.concrete(), &arguments)?;

        for setter in binding.setters() {
            setter(&instance, self)?;
        }

        for extender in binding.extenders() {
            let replacement = match (extender.callback())(&instance, self)? {
                Some(replacement) if !replacement.ptr_eq(&instance) => replacement,
                _ => continue,
            };

            for setter in extender.setters() {
                setter(&replacement, self)?;
            }
            instance = replacement;
        }

        if binding.is_shared() {
            self.instances.insert(service_id.clone(), instance.clone());
        }

        Ok(instance)
    }

    fn build(&mut self, concrete: &Concrete, arguments: &Arguments) -> Result<Instance, ContainerError> {
        match concrete {
            Concrete::Factory(factory) => factory(self, arguments),
            Concrete::Type(ty) => self.build_type(ty, arguments),
        }
    }

    fn build_type(&mut self, ty: &ServiceId, arguments: &Arguments) -> Result<Instance, ContainerError> {
        self.enter(Frame::Build(ty.clone()))?;
        let result = self.instantiate(ty, arguments);
        self.leave();
        result
    }

    fn instantiate(&mut self, ty: &ServiceId, arguments: &Arguments) -> Result<Instance, ContainerError> {
        let descriptor = self
            .describe(ty)
            .ok_or_else(|| ContainerError::not_instantiable(ty.as_str()))?;

        match &descriptor.activation {
            Activation::Abstract => Err(ContainerError::not_instantiable(ty.as_str())),
            Activation::Default(activator) => {
                if !arguments.is_empty() {
                    tracing::debug!(service = %ty, "type has no constructor, ignoring arguments");
                }
                activator()
            }
            Activation::Constructor {
                parameters,
                activator,
            } => {
                let resolved = self.resolve_parameters(ty, parameters, arguments)?;
                activator(&resolved)
            }
        }
    }

    fn resolve_parameters(
        &mut self,
        ty: &ServiceId,
        parameters: &[ParameterInfo],
        arguments: &Arguments,
    ) -> Result<ConstructorArgs, ContainerError> {
        if let Some(unknown) = arguments
            .names()
            .find(|name| !parameters.iter().any(|parameter| parameter.name == *name))
        {
            tracing::warn!(service = %ty, argument = %unknown, "unknown named argument");
            return Err(ContainerError::binding(
                ty.as_str(),
                format!("the constructor has no parameter named `{}`", unknown),
            ));
        }

        let mut resolved = ConstructorArgs::new(ty.as_str());

        for (index, parameter) in parameters.iter().enumerate() {
            if let Some(value) = arguments.for_parameter(index, &parameter.name) {
                resolved.push(parameter, value.clone());
                continue;
            }

            let value = match &parameter.dependency {
                None => parameter.default.clone().ok_or_else(|| {
                    ContainerError::unresolvable_parameter(ty.as_str(), &parameter.name)
                })?,
                Some(dependency) => match self.resolve_dependency(dependency) {
                    Ok(value) => value,
                    Err(error) if error.is_binding() && parameter.optional => {
                        let Some(default) = parameter.default.clone() else {
                            return Err(error);
                        };
                        tracing::debug!(
                            service = %ty,
                            parameter = %parameter.name,
                            %error,
                            "falling back to default value"
                        );
                        default
                    }
                    Err(error) => return Err(error),
                },
            };
            resolved.push(parameter, value);
        }

        for value in arguments.positional_tail(parameters.len()) {
            resolved.push_variadic(value.clone());
        }

        Ok(resolved)
    }

    /// Registered dependencies go through `make`, anything else is built fresh
    fn resolve_dependency(&mut self, dependency: &ServiceId) -> Result<Instance, ContainerError> {
        if self.has(dependency.as_str()) {
            self.make(dependency)
        } else {
            self.build_type(dependency, &Arguments::new())
        }
    }

    fn describe(&mut self, ty: &ServiceId) -> Option<Arc<TypeDescriptor>> {
        if !self.config.cache_type_metadata {
            return self.introspector.describe(ty);
        }

        if let Some(descriptor) = self.type_cache.get(ty) {
            return Some(descriptor.clone());
        }

        let descriptor = self.introspector.describe(ty)?;
        self.type_cache.insert(ty.clone(), descriptor.clone());
        Some(descriptor)
    }

    fn enter(&mut self, frame: Frame) -> Result<(), ContainerError> {
        if self.config.detect_cycles && self.resolving.contains(&frame) {
            let mut path: Vec<String> = Vec::new();
            let cycle = self
                .resolving
                .iter()
                .skip_while(|entry| **entry != frame)
                .chain(std::iter::once(&frame));
            for entry in cycle {
                let name = entry.service().to_string();
                if path.last() != Some(&name) {
                    path.push(name);
                }
            }
            tracing::debug!(path = %path.join(" -> "), "dependency cycle detected");
            return Err(ContainerError::CircularDependency { path });
        }

        let nested = !matches!(
            (&frame, self.resolving.last()),
            (Frame::Build(_), Some(Frame::Make(_)))
        );
        if nested && self.depth() >= self.config.max_depth {
            return Err(ContainerError::ResolutionDepthExceeded {
                service: frame.service().to_string(),
                depth: self.config.max_depth,
            });
        }

        self.resolving.push(frame);
        Ok(())
    }

    fn leave(&mut self) {
        self.resolving.pop();
    }

    /// Nesting level of the current resolution
    ///
    /// A `Build` directly under a `Make` is that make's own construction and
    /// does not add a level.
    fn depth(&self) -> usize {
        self.resolving
            .iter()
            .enumerate()
            .filter(|(index, frame)| match frame {
                Frame::Make(_) => true,
                Frame::Build(_) => !matches!(
                    index.checked_sub(1).map(|previous| &self.resolving[previous]),
                    Some(Frame::Make(_))
                ),
            })
            .count()
    }
}

fn type_mismatch<T>(service_id: &ServiceId, instance: &Instance) -> ContainerError {
    ContainerError::TypeMismatch {
        service: service_id.to_string(),
        expected: std::any::type_name::<T>(),
        actual: instance.type_name(),
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("bindings", &self.bindings.count())
            .field("aliases", &self.aliases.len())
            .field("instances", &self.instances.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
