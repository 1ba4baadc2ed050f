//! The engine: a shared member registry plus configuration.
//!
//! `Engine` is a cheap handle; clones share the same registry and config,
//! so a plugin installed through one clone is visible to assertions created
//! from any other.

use std::sync::{Arc, PoisonError, RwLock};

use crate::assertion::Assertion;
use crate::config::Config;
use crate::builtin;
use crate::member::{MemberId, MethodFn, MethodResult, PropertyFn};
use crate::prototype::{chain_default, Prototype};
use crate::value::Value;

/// Entry point for creating assertions and extending them.
///
/// # Example
/// ```
/// use chainassert::Engine;
///
/// let engine = Engine::new();
/// engine.expect(3).prop("to")?.prop("not")?.method("equal", &[4.into()])?;
/// # Ok::<(), chainassert::ChainError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    prototype: Arc<Prototype>,
    config: Arc<RwLock<Config>>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine with the core assertions installed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an engine with the core assertions and the given config.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        let engine = Self::bare_with_config(config);
        builtin::install(&engine.prototype);
        engine
    }

    /// Creates an engine with no members installed.
    #[must_use]
    pub fn bare() -> Self {
        Self::bare_with_config(Config::default())
    }

    fn bare_with_config(config: Config) -> Self {
        Self {
            prototype: Arc::new(Prototype::new()),
            config: Arc::new(RwLock::new(config)),
        }
    }

    /// The member registry.
    pub fn prototype(&self) -> &Prototype {
        &self.prototype
    }

    /// Snapshot of the current configuration.
    pub fn config(&self) -> Config {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Mutates the configuration in place.
    pub fn configure(&self, update: impl FnOnce(&mut Config)) {
        let mut guard = self.config.write().unwrap_or_else(PoisonError::into_inner);
        update(&mut guard);
    }

    /// Starts an assertion chain about `value`.
    #[track_caller]
    pub fn expect(&self, value: impl Into<Value>) -> Assertion {
        Assertion::new(self.clone(), value.into(), None)
    }

    /// Starts an assertion chain whose failures are prefixed with `message`.
    #[track_caller]
    pub fn expect_with_message(&self, value: impl Into<Value>, message: impl Into<String>) -> Assertion {
        Assertion::new(self.clone(), value.into(), Some(message.into()))
    }

    /// Adds a method; see [`Prototype::add_method`].
    pub fn add_method<F>(&self, name: &str, arity: usize, func: F) -> MemberId
    where
        F: Fn(&mut Assertion, &[Value]) -> MethodResult + Send + Sync + 'static,
    {
        self.prototype.add_method(name, arity, func)
    }

    /// Adds a property; see [`Prototype::add_property`].
    pub fn add_property<F>(&self, name: &str, getter: F) -> MemberId
    where
        F: Fn(&mut Assertion) -> MethodResult + Send + Sync + 'static,
    {
        self.prototype.add_property(name, getter)
    }

    /// Overwrites a method. When the new implementation returns nothing,
    /// the call yields a new assertion carrying every flag.
    pub fn overwrite_method<F>(&self, name: &str, factory: F) -> MemberId
    where
        F: Fn(MethodFn) -> MethodFn + Send + Sync + 'static,
    {
        self.prototype.overwrite_method(name, factory, Some(chain_default()))
    }

    /// Overwrites a property, continuing the chain like [`Self::overwrite_method`].
    pub fn overwrite_property<F>(&self, name: &str, factory: F) -> MemberId
    where
        F: Fn(PropertyFn) -> PropertyFn + Send + Sync + 'static,
    {
        self.prototype.overwrite_property(name, factory, Some(chain_default()))
    }
}
