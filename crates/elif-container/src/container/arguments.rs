use crate::container::autowiring::ParameterInfo;
use crate::container::instance::Instance;
use crate::errors::ContainerError;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Position or name a fixed argument is supplied under
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArgKey {
    Index(usize),
    Name(String),
}

impl From<usize> for ArgKey {
    fn from(index: usize) -> Self {
        ArgKey::Index(index)
    }
}

impl From<&str> for ArgKey {
    fn from(name: &str) -> Self {
        ArgKey::Name(name.to_string())
    }
}

impl From<String> for ArgKey {
    fn from(name: String) -> Self {
        ArgKey::Name(name)
    }
}

impl fmt::Display for ArgKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgKey::Index(index) => write!(f, "#{}", index),
            ArgKey::Name(name) => write!(f, "${}", name),
        }
    }
}

/// Pre-supplied constructor values, keyed by position or parameter name
#[derive(Debug, Clone, Default)]
pub struct Arguments {
    values: BTreeMap<ArgKey, Instance>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value under a position or parameter name
    pub fn with(mut self, key: impl Into<ArgKey>, value: Instance) -> Self {
        self.insert(key, value);
        self
    }

    /// Shorthand for `with(key, Instance::new(value))`
    pub fn with_value<T: Any + Send + Sync>(self, key: impl Into<ArgKey>, value: T) -> Self {
        self.with(key, Instance::new(value))
    }

    pub fn insert(&mut self, key: impl Into<ArgKey>, value: Instance) -> Option<Instance> {
        self.values.insert(key.into(), value)
    }

    pub fn get(&self, key: &ArgKey) -> Option<&Instance> {
        self.values.get(key)
    }

    /// Look up the value meant for a parameter, by position first, then by name
    pub fn for_parameter(&self, index: usize, name: &str) -> Option<&Instance> {
        self.values
            .get(&ArgKey::Index(index))
            .or_else(|| self.values.get(&ArgKey::Name(name.to_string())))
    }

    pub fn keys(&self) -> impl Iterator<Item = &ArgKey> {
        self.values.keys()
    }

    /// Parameter names values are supplied under
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().filter_map(|key| match key {
            ArgKey::Name(name) => Some(name.as_str()),
            ArgKey::Index(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Combine two argument sets, values in `overrides` win
    pub fn merged(&self, overrides: &Arguments) -> Arguments {
        let mut values = self.values.clone();
        values.extend(
            overrides
                .values
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        Arguments { values }
    }

    /// Positional values past `count`, in index order
    pub(crate) fn positional_tail(&self, count: usize) -> impl Iterator<Item = &Instance> {
        self.values.iter().filter_map(move |(key, value)| match key {
            ArgKey::Index(index) if *index >= count => Some(value),
            _ => None,
        })
    }
}

/// Final ordered argument list handed to a constructor
#[derive(Debug, Clone)]
pub struct ConstructorArgs {
    service: String,
    names: Vec<String>,
    values: Vec<Instance>,
}

impl ConstructorArgs {
    pub(crate) fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            names: Vec::new(),
            values: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, parameter: &ParameterInfo, value: Instance) {
        self.names.push(parameter.name.clone());
        self.values.push(value);
    }

    pub(crate) fn push_variadic(&mut self, value: Instance) {
        self.names.push(String::new());
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw instance at a position
    pub fn at(&self, index: usize) -> Result<&Instance, ContainerError> {
        self.values.get(index).ok_or_else(|| {
            ContainerError::binding(&self.service, format!("missing argument at position {}", index))
        })
    }

    /// Raw instance for a named parameter
    pub fn instance(&self, name: &str) -> Result<&Instance, ContainerError> {
        self.names
            .iter()
            .position(|candidate| candidate == name)
            .map(|index| &self.values[index])
            .ok_or_else(|| ContainerError::unresolvable_parameter(&self.service, name))
    }

    /// Shared handle to a named argument of type `T`
    pub fn get<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>, ContainerError> {
        let instance = self.instance(name)?;
        instance
            .downcast::<T>()
            .ok_or_else(|| self.mismatch::<T>(name, instance))
    }

    /// Clone of a named argument of type `T`, typically a scalar or `Arc<dyn Trait>`
    pub fn cloned<T: Any + Clone>(&self, name: &str) -> Result<T, ContainerError> {
        let instance = self.instance(name)?;
        instance
            .cloned::<T>()
            .ok_or_else(|| self.mismatch::<T>(name, instance))
    }

    /// Arguments past the declared parameter list
    pub fn variadic(&self) -> impl Iterator<Item = &Instance> {
        self.names
            .iter()
            .zip(self.values.iter())
            .filter(|(name, _)| name.is_empty())
            .map(|(_, value)| value)
    }

    fn mismatch<T>(&self, name: &str, instance: &Instance) -> ContainerError {
        ContainerError::binding(
            &self.service,
            format!(
                "parameter `{}` expected {}, found {}",
                name,
                std::any::type_name::<T>(),
                instance.type_name()
            ),
        )
    }
}
