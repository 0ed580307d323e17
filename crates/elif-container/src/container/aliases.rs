use crate::container::descriptor::ServiceId;
use crate::errors::ContainerError;
use std::collections::HashMap;

/// Directed alias edges, resolved transitively
#[derive(Debug, Default, Clone)]
pub struct AliasTable {
    aliases: HashMap<ServiceId, ServiceId>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point `alias` at `target`, returning the previous target
    pub fn set(&mut self, alias: ServiceId, target: ServiceId) -> Option<ServiceId> {
        self.aliases.insert(alias, target)
    }

    pub fn remove(&mut self, alias: &str) -> Option<ServiceId> {
        self.aliases.remove(alias)
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.aliases.contains_key(alias)
    }

    /// Follow the alias chain from `id` to its terminal identifier
    ///
    /// A chain that revisits an identifier fails with
    /// [`ContainerError::CircularReference`] carrying the full chain.
    pub fn resolve(&self, id: &ServiceId) -> Result<ServiceId, ContainerError> {
        let mut chain = vec![id];
        let mut current = id;

        while let Some(next) = self.aliases.get(current) {
            let revisited = chain.contains(&next);
            chain.push(next);
            if revisited {
                return Err(ContainerError::CircularReference {
                    chain: chain.iter().map(|id| id.to_string()).collect(),
                });
            }
            tracing::trace!(alias = %current, target = %next, "following alias");
            current = next;
        }

        Ok(current.clone())
    }

    /// Aliases pointing directly at `target`, sorted
    pub fn aliases_of(&self, target: &str) -> Vec<ServiceId> {
        let mut aliases: Vec<ServiceId> = self
            .aliases
            .iter()
            .filter(|(_, to)| to.as_str() == target)
            .map(|(alias, _)| alias.clone())
            .collect();
        aliases.sort();
        aliases
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ServiceId, &ServiceId)> {
        self.aliases.iter()
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    pub fn clear(&mut self) {
        self.aliases.clear();
    }
}
