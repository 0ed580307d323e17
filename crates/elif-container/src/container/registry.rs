use crate::container::binding::{Binding, Concrete};
use crate::container::descriptor::ServiceId;
use crate::container::scope::ServiceScope;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Owns every registered binding, keyed by abstract identifier
#[derive(Debug, Default, Clone)]
pub struct BindingRegistry {
    bindings: HashMap<ServiceId, Binding>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a binding, returning the one it replaced
    pub fn insert(&mut self, id: ServiceId, binding: Binding) -> Option<Binding> {
        self.bindings.insert(id, binding)
    }

    /// Register a binding and hand back the stored value for further configuration
    pub fn replace(&mut self, id: ServiceId, binding: Binding) -> &mut Binding {
        match self.bindings.entry(id) {
            Entry::Occupied(mut entry) => {
                entry.insert(binding);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(binding),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Binding> {
        self.bindings.get(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<Binding> {
        self.bindings.remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.bindings.contains_key(id)
    }

    /// Binding for `id`, creating a transient self-binding when none exists
    pub fn get_or_create_default(&mut self, id: &ServiceId) -> &mut Binding {
        self.bindings.entry(id.clone()).or_insert_with(|| {
            tracing::debug!(service = %id, "creating implicit self-binding");
            Binding::new(Concrete::Type(id.clone()), ServiceScope::Transient)
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ServiceId, &Binding)> {
        self.bindings.iter()
    }

    /// Registered identifiers in sorted order
    pub fn service_ids(&self) -> Vec<ServiceId> {
        let mut ids: Vec<ServiceId> = self.bindings.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn count(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_create_default_self_binds() {
        let mut registry = BindingRegistry::new();
        let id = ServiceId::new("Foo");

        let binding = registry.get_or_create_default(&id);
        assert_eq!(binding.concrete().type_id(), Some(&id));
        assert!(!binding.is_shared());
        assert!(registry.contains("Foo"));
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_get_or_create_default_keeps_existing() {
        let mut registry = BindingRegistry::new();
        let id = ServiceId::new("Logger");
        registry.insert(
            id.clone(),
            Binding::new(Concrete::ty("ConsoleLogger"), ServiceScope::Singleton),
        );

        let binding = registry.get_or_create_default(&id);
        assert_eq!(binding.concrete().describe(), "ConsoleLogger");
        assert!(binding.is_shared());
    }

    #[test]
    fn test_insert_replaces_wholesale() {
        let mut registry = BindingRegistry::new();
        let id = ServiceId::new("Logger");
        registry.insert(id.clone(), Binding::new(Concrete::ty("A"), ServiceScope::Singleton));
        let previous = registry
            .insert(id.clone(), Binding::new(Concrete::ty("B"), ServiceScope::Transient))
            .unwrap();

        assert_eq!(previous.concrete().describe(), "A");
        assert_eq!(registry.get("Logger").unwrap().concrete().describe(), "B");
        assert!(registry.remove("Logger").is_some());
        assert!(registry.remove("Logger").is_none());
        assert!(registry.is_empty());
    }
}
