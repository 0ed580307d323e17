use crate::container::instance::Instance;
use crate::container::ioc_container::Container;
use crate::errors::ContainerError;

/// Minimal lookup contract for code that consumes any container
///
/// `get` fails with [`ContainerError::NotFound`] when nothing is registered
/// under the identifier, and with the underlying resolution error otherwise.
pub trait ServiceLocator {
    fn has(&self, id: &str) -> bool;

    fn get(&mut self, id: &str) -> Result<Instance, ContainerError>;

    /// Resolve `id`, treating an unregistered identifier as absent
    fn try_get(&mut self, id: &str) -> Result<Option<Instance>, ContainerError> {
        match self.get(id) {
            Ok(instance) => Ok(Some(instance)),
            Err(ContainerError::NotFound { .. }) => Ok(None),
            Err(error) => Err(error),
        }
    }
}

impl ServiceLocator for Container {
    fn has(&self, id: &str) -> bool {
        Container::has(self, id)
    }

    fn get(&mut self, id: &str) -> Result<Instance, ContainerError> {
        Container::get(self, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::binding::Concrete;

    fn lookup(locator: &mut dyn ServiceLocator, id: &str) -> Result<Option<Instance>, ContainerError> {
        locator.try_get(id)
    }

    #[test]
    fn test_try_get_distinguishes_missing_from_broken() {
        let mut container = Container::new();
        container
            .bind("answer", Concrete::factory(|_, _| Ok(Instance::new(42u32))))
            .unwrap();
        container.bind_self("Broken").unwrap();

        let answer = lookup(&mut container, "answer").unwrap().unwrap();
        assert_eq!(*answer.downcast::<u32>().unwrap(), 42);

        assert!(lookup(&mut container, "missing").unwrap().is_none());
        assert!(lookup(&mut container, "Broken").unwrap_err().is_binding());
    }
}
