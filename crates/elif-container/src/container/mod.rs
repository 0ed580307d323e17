pub mod aliases;
pub mod arguments;
pub mod autowiring;
pub mod binding;
pub mod debug;
pub mod descriptor;
pub mod instance;
pub mod ioc_builder;
pub mod ioc_container;
pub mod locator;
pub mod registry;
pub mod scope;

pub use aliases::AliasTable;
pub use arguments::{ArgKey, Arguments, ConstructorArgs};
pub use autowiring::{
    Activation, Activator, DefaultActivator, Injectable, ParameterInfo, TypeDescriptor,
    TypeIntrospector, TypeRegistry,
};
pub use binding::{Binding, BindingHandle, Concrete, Extender, ExtenderFn, ExtenderHandle, Factory, Setter};
pub use debug::{AliasInfo, BindingInfo, ContainerSnapshot};
pub use descriptor::ServiceId;
pub use instance::Instance;
pub use ioc_builder::ContainerBuilder;
pub use ioc_container::Container;
pub use locator::ServiceLocator;
pub use registry::BindingRegistry;
pub use scope::ServiceScope;
