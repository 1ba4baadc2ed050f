//! Per-assertion flag storage.
//!
//! Every assertion carries a private `Flags` record: the subject under test,
//! negation, an optional message prefix, the stack-origin bookkeeping used
//! by failure reporting, and arbitrary plugin keys. The record lives and dies
//! with its assertion.

use std::collections::HashMap;
use std::fmt;
use std::panic::Location;

use crate::member::MemberId;
use crate::value::Value;

/// The member wrapper that failure reporting treats as the topmost internal
/// frame, together with the user call site that entered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackOrigin {
    member: MemberId,
    name: String,
    location: &'static Location<'static>,
}

impl StackOrigin {
    pub fn new(member: MemberId, name: impl Into<String>, location: &'static Location<'static>) -> Self {
        Self {
            member,
            name: name.into(),
            location,
        }
    }

    /// Identity of the installed wrapper.
    pub const fn member(&self) -> MemberId {
        self.member
    }

    /// Name the wrapper was installed under.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

impl fmt::Display for StackOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{} ({})",
            self.location.file(),
            self.location.line(),
            self.location.column(),
            self.name
        )
    }
}

/// Flag record of one assertion.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    object: Value,
    negate: bool,
    message: Option<String>,
    stack_origin: Option<StackOrigin>,
    stack_origin_locked: bool,
    custom: HashMap<String, Value>,
}

impl Flags {
    /// Creates the record for a new assertion about `object`.
    pub fn new(object: Value, message: Option<String>) -> Self {
        Self {
            object,
            message,
            ..Self::default()
        }
    }

    pub const fn object(&self) -> &Value {
        &self.object
    }

    pub fn set_object(&mut self, object: Value) {
        self.object = object;
    }

    pub const fn negate(&self) -> bool {
        self.negate
    }

    pub fn set_negate(&mut self, negate: bool) {
        self.negate = negate;
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn set_message(&mut self, message: Option<String>) {
        self.message = message;
    }

    pub const fn stack_origin(&self) -> Option<&StackOrigin> {
        self.stack_origin.as_ref()
    }

    pub fn set_stack_origin(&mut self, origin: StackOrigin) {
        self.stack_origin = Some(origin);
    }

    pub const fn stack_origin_locked(&self) -> bool {
        self.stack_origin_locked
    }

    pub fn set_stack_origin_locked(&mut self, locked: bool) {
        self.stack_origin_locked = locked;
    }

    /// Reads a plugin-defined flag.
    pub fn custom(&self, key: &str) -> Option<&Value> {
        self.custom.get(key)
    }

    /// Writes a plugin-defined flag, returning the previous value.
    pub fn set_custom(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.custom.insert(key.into(), value)
    }
}

/// Copies flags from `from` into `to`.
///
/// Without `include_all`, the subject, the stack-origin pair, and the message
/// stay untouched on `to`; only negation and plugin flags move.
pub fn transfer_flags(from: &Flags, to: &mut Flags, include_all: bool) {
    to.negate = from.negate;
    for (key, value) in &from.custom {
        to.custom.insert(key.clone(), value.clone());
    }

    if include_all {
        to.object = from.object.clone();
        to.message.clone_from(&from.message);
        to.stack_origin.clone_from(&from.stack_origin);
        to.stack_origin_locked = from.stack_origin_locked;
    }
}
