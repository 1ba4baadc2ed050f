//! Arity guard for installed methods.

use crate::error::UsageError;
use crate::member::{MemberId, Method, MethodFn};
use crate::value::Value;

/// Wraps `func` as method `id` that reports `arity` parameters and rejects
/// invocations supplying fewer arguments than that.
pub fn add_length_guard(id: MemberId, name: impl Into<String>, arity: usize, func: MethodFn) -> Method {
    Method::from_parts(id, name.into(), arity, func)
}

/// The first argument of method `name`, or the same error the guard raises
/// when it is missing.
pub fn first_argument<'a>(name: &str, args: &'a [Value]) -> Result<&'a Value, UsageError> {
    check_arity(name, 1, args.len())?;
    Ok(&args[0])
}

/// Fails when `supplied` arguments cannot satisfy `arity`.
pub fn check_arity(name: &str, arity: usize, supplied: usize) -> Result<(), UsageError> {
    if supplied < arity {
        return Err(UsageError::MissingArguments {
            name: name.to_string(),
            expected: arity,
            actual: supplied,
        });
    }
    Ok(())
}
