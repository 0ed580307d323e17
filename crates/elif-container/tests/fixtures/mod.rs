//! Service types shared by the integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;

use elif_container::{
    ConstructorArgs, ContainerError, Injectable, Instance, ParameterInfo, TypeRegistry,
};

pub const FOO: &str = "Foo";
pub const FOO_INTERFACE: &str = "FooInterface";
pub const BAR: &str = "Bar";
pub const BAR_WITH_VALUE: &str = "BarWithValue";
pub const LOGGER: &str = "Logger";
pub const CONSOLE_LOGGER: &str = "ConsoleLogger";
pub const SERVICE: &str = "Service";
pub const MAILER_INTERFACE: &str = "MailerInterface";
pub const SMTP_MAILER: &str = "SmtpMailer";
pub const NOTIFIER: &str = "Notifier";
pub const STRICT_NOTIFIER: &str = "StrictNotifier";
pub const GREETING: &str = "Greeting";
pub const CHICKEN: &str = "Chicken";
pub const EGG: &str = "Egg";

pub trait FooInterface: Send + Sync {
    fn kind(&self) -> &'static str;
    fn property(&self) -> String;
    fn set_property(&self, value: &str);
}

pub type SharedFoo = Arc<dyn FooInterface>;

/// Read the `FooInterface` handle out of an instance
pub fn foo(instance: &Instance) -> SharedFoo {
    instance
        .cloned::<SharedFoo>()
        .expect("instance should expose FooInterface")
}

#[derive(Default)]
pub struct Foo {
    property: Mutex<String>,
}

impl FooInterface for Foo {
    fn kind(&self) -> &'static str {
        "Foo"
    }

    fn property(&self) -> String {
        self.property.lock().unwrap().clone()
    }

    fn set_property(&self, value: &str) {
        *self.property.lock().unwrap() = value.to_string();
    }
}

impl Injectable for Foo {
    fn construct(_args: &ConstructorArgs) -> Result<Self, ContainerError> {
        Ok(Self::default())
    }

    fn into_instance(self) -> Instance {
        Instance::new(Arc::new(self) as SharedFoo)
    }
}

/// Decorator reporting `parent:<inner>` until its own property is set
pub struct FooExtender {
    inner: SharedFoo,
    property: Mutex<Option<String>>,
}

impl FooExtender {
    pub fn wrap(inner: SharedFoo) -> Instance {
        Instance::new(Arc::new(Self {
            inner,
            property: Mutex::new(None),
        }) as SharedFoo)
    }
}

impl FooInterface for FooExtender {
    fn kind(&self) -> &'static str {
        "FooExtender"
    }

    fn property(&self) -> String {
        match self.property.lock().unwrap().as_ref() {
            Some(own) => format!("self:{}", own),
            None => format!("parent:{}", self.inner.property()),
        }
    }

    fn set_property(&self, value: &str) {
        *self.property.lock().unwrap() = Some(value.to_string());
    }
}

pub struct Bar {
    pub foo: SharedFoo,
}

impl Injectable for Bar {
    fn parameters() -> Vec<ParameterInfo> {
        vec![ParameterInfo::new("foo").depends_on(FOO_INTERFACE)]
    }

    fn construct(args: &ConstructorArgs) -> Result<Self, ContainerError> {
        Ok(Self {
            foo: args.cloned::<SharedFoo>("foo")?,
        })
    }
}

pub struct BarWithValue {
    pub foo: SharedFoo,
    pub value: i64,
}

impl Injectable for BarWithValue {
    fn parameters() -> Vec<ParameterInfo> {
        vec![
            ParameterInfo::new("foo").depends_on(FOO_INTERFACE),
            ParameterInfo::new("value").with_default_value(1i64),
        ]
    }

    fn construct(args: &ConstructorArgs) -> Result<Self, ContainerError> {
        Ok(Self {
            foo: args.cloned::<SharedFoo>("foo")?,
            value: args.cloned::<i64>("value")?,
        })
    }
}

pub trait Logger: Send + Sync {
    fn log(&self, message: &str);
    fn lines(&self) -> Vec<String>;
}

pub type SharedLogger = Arc<dyn Logger>;

#[derive(Default)]
pub struct ConsoleLogger {
    lines: Mutex<Vec<String>>,
}

impl Logger for ConsoleLogger {
    fn log(&self, message: &str) {
        self.lines.lock().unwrap().push(message.to_string());
    }

    fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl Injectable for ConsoleLogger {
    fn construct(_args: &ConstructorArgs) -> Result<Self, ContainerError> {
        Ok(Self::default())
    }

    fn into_instance(self) -> Instance {
        Instance::new(Arc::new(self) as SharedLogger)
    }
}

pub struct Service {
    pub logger: SharedLogger,
}

impl Injectable for Service {
    fn parameters() -> Vec<ParameterInfo> {
        vec![ParameterInfo::new("logger").depends_on(LOGGER)]
    }

    fn construct(args: &ConstructorArgs) -> Result<Self, ContainerError> {
        Ok(Self {
            logger: args.cloned::<SharedLogger>("logger")?,
        })
    }
}

#[derive(Default)]
pub struct SmtpMailer;

#[derive(Default)]
pub struct NullMailer;

/// Notifier with an optional mailer dependency that falls back to `NullMailer`
pub struct Notifier {
    pub via: &'static str,
}

impl Injectable for Notifier {
    fn parameters() -> Vec<ParameterInfo> {
        vec![ParameterInfo::new("mailer")
            .depends_on(MAILER_INTERFACE)
            .with_default(Instance::new(NullMailer))]
    }

    fn construct(args: &ConstructorArgs) -> Result<Self, ContainerError> {
        let mailer = args.instance("mailer")?;
        let via = if mailer.is::<SmtpMailer>() {
            "smtp"
        } else if mailer.is::<NullMailer>() {
            "null"
        } else {
            "unknown"
        };
        Ok(Self { via })
    }
}

/// Same as `Notifier`, but the mailer is required
pub struct StrictNotifier;

impl Injectable for StrictNotifier {
    fn parameters() -> Vec<ParameterInfo> {
        vec![ParameterInfo::new("mailer").depends_on(MAILER_INTERFACE)]
    }

    fn construct(args: &ConstructorArgs) -> Result<Self, ContainerError> {
        args.instance("mailer")?;
        Ok(Self)
    }
}

/// Needs a plain value nothing can auto-wire
pub struct Greeting {
    pub text: String,
}

impl Injectable for Greeting {
    fn parameters() -> Vec<ParameterInfo> {
        vec![ParameterInfo::new("text")]
    }

    fn construct(args: &ConstructorArgs) -> Result<Self, ContainerError> {
        Ok(Self {
            text: args.cloned::<String>("text")?,
        })
    }
}

pub struct Chicken;

impl Injectable for Chicken {
    fn parameters() -> Vec<ParameterInfo> {
        vec![ParameterInfo::new("egg").depends_on(EGG)]
    }

    fn construct(_args: &ConstructorArgs) -> Result<Self, ContainerError> {
        Ok(Self)
    }
}

pub struct Egg;

impl Injectable for Egg {
    fn parameters() -> Vec<ParameterInfo> {
        vec![ParameterInfo::new("chicken").depends_on(CHICKEN)]
    }

    fn construct(_args: &ConstructorArgs) -> Result<Self, ContainerError> {
        Ok(Self)
    }
}

/// Route container logs to the test output, filtered by `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Every fixture type under its short identifier
pub fn types() -> TypeRegistry {
    let mut types = TypeRegistry::new();
    types
        .register_as::<Foo>(FOO)
        .register_abstract(FOO_INTERFACE)
        .register_as::<Bar>(BAR)
        .register_as::<BarWithValue>(BAR_WITH_VALUE)
        .register_abstract(LOGGER)
        .register_as::<ConsoleLogger>(CONSOLE_LOGGER)
        .register_as::<Service>(SERVICE)
        .register_abstract(MAILER_INTERFACE)
        .register_default_as::<SmtpMailer>(SMTP_MAILER)
        .register_as::<Notifier>(NOTIFIER)
        .register_as::<StrictNotifier>(STRICT_NOTIFIER)
        .register_as::<Greeting>(GREETING)
        .register_as::<Chicken>(CHICKEN)
        .register_as::<Egg>(EGG);
    types
}
