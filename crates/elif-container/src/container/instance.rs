use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Opaque handle to a constructed service or argument value
///
/// Cloning an `Instance` clones the handle, not the value: two clones are
/// [`ptr_eq`](Instance::ptr_eq). To hand out a service through an interface,
/// store the trait object handle itself, e.g. `Instance::new(Arc::new(impl) as Arc<dyn Logger>)`,
/// and read it back with [`cloned::<Arc<dyn Logger>>`](Instance::cloned).
#[derive(Clone)]
pub struct Instance {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Instance {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            value: Arc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Wrap an existing shared value without another allocation
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            value,
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Name of the stored type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.value.clone().downcast::<T>().ok()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Clone the stored value out, typically an `Arc<dyn Trait>` payload
    pub fn cloned<T: Any + Clone>(&self) -> Option<T> {
        self.value.downcast_ref::<T>().cloned()
    }

    /// Identity comparison
    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Instance").field(&self.type_name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Greeter: Send + Sync {
        fn greet(&self) -> String;
    }

    struct English;

    impl Greeter for English {
        fn greet(&self) -> String {
            "hello".to_string()
        }
    }

    #[test]
    fn test_downcast_and_identity() {
        let instance = Instance::new(42u32);
        assert!(instance.is::<u32>());
        assert_eq!(*instance.downcast::<u32>().unwrap(), 42);
        assert!(instance.downcast::<i64>().is_none());

        let copy = instance.clone();
        assert!(copy.ptr_eq(&instance));
        assert!(!Instance::new(42u32).ptr_eq(&instance));
    }

    #[test]
    fn test_trait_object_payload() {
        let instance = Instance::new(Arc::new(English) as Arc<dyn Greeter>);
        let greeter = instance.cloned::<Arc<dyn Greeter>>().unwrap();
        assert_eq!(greeter.greet(), "hello");
        assert!(instance.type_name().contains("Greeter"));
    }
}
