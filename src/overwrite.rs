//! Member replacement with access to the replaced implementation.
//!
//! `make_override` is the whole mechanism as a pure decorator: it takes the
//! previous implementation and a factory, and returns the function to
//! install. Installing it under a name is [`crate::Prototype`]'s job.
//!
//! While a wrapper runs, `stack_origin_locked` is held true so members it
//! reaches (the previous implementation, or other assertions invoked on the
//! same instance) leave `stack_origin` pointing at the outermost wrapper.

use std::sync::Arc;

use crate::assertion::Assertion;
use crate::error::UsageError;
use crate::flag::StackOrigin;
use crate::member::{MemberId, MethodFn, MethodResult, Outcome, PropertyFn};
use crate::value::Value;

/// Produces a method's new implementation from its previous one.
pub type MethodFactory = Arc<dyn Fn(MethodFn) -> MethodFn + Send + Sync>;

/// Produces a property's new getter from its previous one.
pub type PropertyFactory = Arc<dyn Fn(PropertyFn) -> PropertyFn + Send + Sync>;

/// Produces the value returned when an implementation returns nothing.
pub type DefaultValueFn = Arc<dyn Fn(&Assertion) -> Outcome + Send + Sync>;

/// Stand-in previous implementation for a name that held no method.
#[must_use]
pub fn not_a_function(name: &str) -> MethodFn {
    let name = name.to_string();
    Arc::new(move |_: &mut Assertion, _: &[Value]| {
        Err(UsageError::NotAFunction { name: name.clone() }.into())
    })
}

/// Stand-in previous getter for a name that held no property.
#[must_use]
pub fn empty_getter() -> PropertyFn {
    Arc::new(|_: &mut Assertion| Ok(None))
}

/// Points `stack_origin` at member `id` unless an outer wrapper holds the lock.
pub(crate) fn claim_stack_origin(assertion: &mut Assertion, id: MemberId, name: &str) {
    if assertion.flags().stack_origin_locked() {
        return;
    }
    let origin = StackOrigin::new(id, name, assertion.call_site());
    log::trace!("stack origin claimed by `{name}` at {origin}");
    assertion.flags_mut().set_stack_origin(origin);
}

/// Builds the wrapper installed in place of a method.
///
/// On each call the wrapper claims the stack origin (if unlocked), locks it,
/// runs `factory(previous)`, restores the lock to its prior value, and then
/// returns the result, falling back to `create_default_value` when the
/// implementation returned nothing.
#[must_use]
pub fn make_override(
    id: MemberId,
    name: &str,
    previous: MethodFn,
    factory: MethodFactory,
    create_default_value: Option<DefaultValueFn>,
) -> MethodFn {
    let name = name.to_string();
    Arc::new(move |assertion: &mut Assertion, args: &[Value]| -> MethodResult {
        claim_stack_origin(assertion, id, &name);

        let saved = assertion.flags().stack_origin_locked();
        assertion.flags_mut().set_stack_origin_locked(true);
        let implementation = factory(Arc::clone(&previous));
        let result = implementation(assertion, args);
        assertion.flags_mut().set_stack_origin_locked(saved);

        if let Some(outcome) = result? {
            return Ok(Some(outcome));
        }
        Ok(create_default_value.as_ref().map(|create| create(assertion)))
    })
}

/// Property counterpart of [`make_override`].
#[must_use]
pub fn make_property_override(
    id: MemberId,
    name: &str,
    previous: PropertyFn,
    factory: PropertyFactory,
    create_default_value: Option<DefaultValueFn>,
) -> PropertyFn {
    let name = name.to_string();
    Arc::new(move |assertion: &mut Assertion| -> MethodResult {
        claim_stack_origin(assertion, id, &name);

        let saved = assertion.flags().stack_origin_locked();
        assertion.flags_mut().set_stack_origin_locked(true);
        let getter = factory(Arc::clone(&previous));
        let result = getter(assertion);
        assertion.flags_mut().set_stack_origin_locked(saved);

        if let Some(outcome) = result? {
            return Ok(Some(outcome));
        }
        Ok(create_default_value.as_ref().map(|create| create(assertion)))
    })
}
