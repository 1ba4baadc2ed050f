//! Assertion instances.
//!
//! An `Assertion` is one chain: a subject, its flags, and a handle to the
//! engine whose members it can invoke. Members are reached only through
//! [`Assertion::invoke`] (or the `get`/`call`/`prop`/`method` shorthands),
//! which records the caller's location so the outermost member can claim it
//! as the failure's stack origin.

use std::fmt;
use std::panic::Location;

use crate::display::obj_display;
use crate::engine::Engine;
use crate::error::{AssertionError, ChainError, ChainResult, UsageError};
use crate::flag::{transfer_flags, Flags, StackOrigin};
use crate::member::{Access, MemberId, MethodResult, Outcome};
use crate::message::{get_message, MessageArgs};
use crate::value::Value;

/// One assertion chain.
#[derive(Clone)]
pub struct Assertion {
    engine: Engine,
    flags: Flags,
    call_site: &'static Location<'static>,
}

impl fmt::Debug for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assertion")
            .field("flags", &self.flags)
            .field("call_site", &self.call_site)
            .finish_non_exhaustive()
    }
}

impl Assertion {
    /// Creates an assertion about `object`.
    #[track_caller]
    pub fn new(engine: Engine, object: Value, message: Option<String>) -> Self {
        Self {
            engine,
            flags: Flags::new(object, message),
            call_site: Location::caller(),
        }
    }

    pub const fn engine(&self) -> &Engine {
        &self.engine
    }

    pub const fn flags(&self) -> &Flags {
        &self.flags
    }

    pub fn flags_mut(&mut self) -> &mut Flags {
        &mut self.flags
    }

    /// The subject under test.
    pub const fn object(&self) -> &Value {
        self.flags.object()
    }

    /// Reads a plugin-defined flag.
    pub fn flag(&self, key: &str) -> Option<&Value> {
        self.flags.custom(key)
    }

    /// Writes a plugin-defined flag.
    pub fn set_flag(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.flags.set_custom(key, value.into());
    }

    pub const fn stack_origin(&self) -> Option<&StackOrigin> {
        self.flags.stack_origin()
    }

    /// Location of the most recent member access on this assertion.
    pub const fn call_site(&self) -> &'static Location<'static> {
        self.call_site
    }

    /// A new assertion with every flag of this one.
    #[must_use]
    pub fn chained(&self) -> Self {
        let mut flags = Flags::default();
        transfer_flags(&self.flags, &mut flags, true);
        Self {
            engine: self.engine.clone(),
            flags,
            call_site: self.call_site,
        }
    }

    /// Accesses the member `name`.
    ///
    /// Unknown names fail with a suggestion unless unknown-member checks are
    /// disabled or the name is an excluded keyword, in which case the access
    /// returns nothing.
    #[track_caller]
    pub fn invoke(&mut self, name: &str, access: Access<'_>) -> MethodResult {
        self.call_site = Location::caller();
        match self.engine.prototype().get(name) {
            Some(member) => member.invoke(self, access),
            None => self.unknown_member(name),
        }
    }

    fn unknown_member(&self, name: &str) -> MethodResult {
        let config = self.engine.config();
        if !config.use_proxy || config.is_excluded_keyword(name) {
            return Ok(None);
        }
        Err(UsageError::UnknownMember {
            name: name.to_string(),
            suggestion: self.engine.prototype().suggest(name),
        }
        .into())
    }

    /// Reads `name` like a property.
    #[track_caller]
    pub fn get(&mut self, name: &str) -> MethodResult {
        self.invoke(name, Access::Get)
    }

    /// Calls `name` with `args`.
    #[track_caller]
    pub fn call(&mut self, name: &str, args: &[Value]) -> MethodResult {
        self.invoke(name, Access::Call(args))
    }

    /// Reads `name` and continues with the assertion it yields.
    #[track_caller]
    pub fn prop(mut self, name: &str) -> ChainResult<Self> {
        let outcome = self.invoke(name, Access::Get)?;
        Ok(self.continue_with(outcome))
    }

    /// Calls `name` and continues with the assertion it yields.
    #[track_caller]
    pub fn method(mut self, name: &str, args: &[Value]) -> ChainResult<Self> {
        let outcome = self.invoke(name, Access::Call(args))?;
        Ok(self.continue_with(outcome))
    }

    fn continue_with(self, outcome: Option<Outcome>) -> Self {
        match outcome {
            Some(Outcome::Chain(next)) => *next,
            Some(Outcome::Value(_)) | None => self,
        }
    }

    /// Renders `value` for a failure message under the engine's config.
    #[must_use]
    pub fn display(&self, value: &Value) -> String {
        obj_display(value, &self.engine.config())
    }

    /// Passes when `expr` differs from the negation flag; fails otherwise.
    ///
    /// `actual` defaults to the subject. The failure's origin is the stack
    /// origin flag, or this call's location when `include_stack` is set.
    #[track_caller]
    pub fn assert(
        &self,
        expr: bool,
        msg: &str,
        negate_msg: &str,
        expected: Option<Value>,
        actual: Option<Value>,
    ) -> ChainResult<()> {
        if expr != self.flags.negate() {
            return Ok(());
        }

        let config = self.engine.config();
        let show_diff = config.show_diff && (expected.is_some() || actual.is_some());
        let actual = actual.unwrap_or_else(|| self.flags.object().clone());
        let message = get_message(
            &self.flags,
            &config,
            &MessageArgs {
                msg,
                negate_msg,
                expected: expected.as_ref(),
                actual: Some(&actual),
            },
        );

        Err(AssertionError {
            message,
            actual: Some(actual),
            expected,
            show_diff,
            origin: self.failure_origin(config.include_stack),
        }
        .into())
    }

    /// A failure that ignores negation, for subjects an assertion cannot
    /// evaluate at all.
    #[track_caller]
    pub fn fail(&self, message: impl Into<String>) -> ChainError {
        let include_stack = self.engine.config().include_stack;
        let message = match self.flags.message() {
            Some(prefix) => format!("{prefix}: {}", message.into()),
            None => message.into(),
        };
        AssertionError {
            message,
            actual: Some(self.flags.object().clone()),
            expected: None,
            show_diff: false,
            origin: self.failure_origin(include_stack),
        }
        .into()
    }

    #[track_caller]
    fn failure_origin(&self, include_stack: bool) -> Option<StackOrigin> {
        if include_stack {
            let member = self
                .flags
                .stack_origin()
                .map_or_else(MemberId::new, StackOrigin::member);
            return Some(StackOrigin::new(member, "assert", Location::caller()));
        }
        self.flags.stack_origin().cloned()
    }
}
