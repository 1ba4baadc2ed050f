//! Assertion members: the named methods and properties an assertion exposes.
//!
//! Every access to a member goes through [`Member::invoke`] with an
//! [`Access`] describing whether it was read like a property or called like
//! a method. Reading a method invokes it with no arguments, so the arity
//! guard reports a missing argument exactly as a bare call would.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assertion::Assertion;
use crate::error::{ChainResult, UsageError};
use crate::guard::check_arity;
use crate::value::Value;

/// Unique identity of an installed member wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(Uuid);

impl MemberId {
    /// Creates a new random member ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for MemberId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a member hands back when it has something to return.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// A plain value.
    Value(Value),
    /// A new assertion continuing the chain.
    Chain(Box<Assertion>),
}

impl Outcome {
    /// Returns the chained assertion, if any.
    #[must_use]
    pub fn into_assertion(self) -> Option<Assertion> {
        match self {
            Self::Chain(a) => Some(*a),
            Self::Value(_) => None,
        }
    }

    /// Returns the plain value, if any.
    #[must_use]
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Value(v) => Some(v),
            Self::Chain(_) => None,
        }
    }
}

/// Result of running a member. `Ok(None)` is "returned nothing".
pub type MethodResult = ChainResult<Option<Outcome>>;

/// Implementation of a method.
pub type MethodFn = Arc<dyn Fn(&mut Assertion, &[Value]) -> MethodResult + Send + Sync>;

/// Implementation of a property getter.
pub type PropertyFn = Arc<dyn Fn(&mut Assertion) -> MethodResult + Send + Sync>;

/// How a member is being accessed.
#[derive(Debug, Clone, Copy)]
pub enum Access<'a> {
    /// Read like a property.
    Get,
    /// Called with arguments.
    Call(&'a [Value]),
}

/// A callable member with a declared arity.
#[derive(Clone)]
pub struct Method {
    id: MemberId,
    name: String,
    arity: usize,
    func: MethodFn,
}

impl Method {
    pub(crate) fn from_parts(id: MemberId, name: String, arity: usize, func: MethodFn) -> Self {
        Self {
            id,
            name,
            arity,
            func,
        }
    }

    pub const fn id(&self) -> MemberId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter count this method reports.
    pub const fn arity(&self) -> usize {
        self.arity
    }

    /// Runs the method after checking the arity guard.
    pub fn call(&self, assertion: &mut Assertion, args: &[Value]) -> MethodResult {
        check_arity(&self.name, self.arity, args.len())?;
        (self.func)(assertion, args)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// A getter-style member.
#[derive(Clone)]
pub struct Property {
    id: MemberId,
    name: String,
    getter: PropertyFn,
}

impl Property {
    pub(crate) fn new(id: MemberId, name: String, getter: PropertyFn) -> Self {
        Self { id, name, getter }
    }

    pub const fn id(&self) -> MemberId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw getter.
    pub fn getter(&self) -> PropertyFn {
        Arc::clone(&self.getter)
    }

    pub fn get(&self, assertion: &mut Assertion) -> MethodResult {
        (self.getter)(assertion)
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Anything installed under a name in a [`crate::Prototype`].
#[derive(Debug, Clone)]
pub enum Member {
    Method(Method),
    Property(Property),
}

impl Member {
    pub const fn id(&self) -> MemberId {
        match self {
            Self::Method(m) => m.id,
            Self::Property(p) => p.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Method(m) => &m.name,
            Self::Property(p) => &p.name,
        }
    }

    pub const fn as_method(&self) -> Option<&Method> {
        match self {
            Self::Method(m) => Some(m),
            Self::Property(_) => None,
        }
    }

    /// Uniform entry point for every member access.
    pub fn invoke(&self, assertion: &mut Assertion, access: Access<'_>) -> MethodResult {
        match (self, access) {
            (Self::Method(m), Access::Call(args)) => m.call(assertion, args),
            (Self::Method(m), Access::Get) => m.call(assertion, &[]),
            (Self::Property(p), Access::Get) => p.get(assertion),
            (Self::Property(p), Access::Call(_)) => Err(UsageError::NotCallable {
                name: p.name.clone(),
            }
            .into()),
        }
    }
}
