//! Built-in assertions installed by [`crate::Engine::new`].
//!
//! Just enough of a matcher set for chains to read naturally and for
//! plugins to have real members to wrap.

use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock};

use regex::Regex;

use crate::assertion::Assertion;
use crate::error::{ChainError, UsageError};
use crate::guard::first_argument;
use crate::inspect::inspect;
use crate::member::MethodResult;
use crate::prototype::Prototype;
use crate::value::Value;

const REGEX_CACHE_MAX: usize = 256;

static REGEX_CACHE: OnceLock<RwLock<HashMap<String, Regex>>> = OnceLock::new();

fn cached_regex(pattern: &str) -> Result<Regex, UsageError> {
    let cache = REGEX_CACHE.get_or_init(|| RwLock::new(HashMap::new()));

    if let Some(re) = cache
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(pattern)
    {
        return Ok(re.clone());
    }

    let compiled = Regex::new(pattern)
        .map_err(|e| UsageError::invalid_argument("match", format!("invalid regex '{pattern}': {e}")))?;

    let mut guard = cache.write().unwrap_or_else(PoisonError::into_inner);
    if guard.len() >= REGEX_CACHE_MAX {
        guard.clear();
    }
    Ok(guard
        .entry(pattern.to_string())
        .or_insert(compiled)
        .clone())
}

/// Properties that only make a chain read well.
pub const LANGUAGE_CHAINS: [&str; 17] = [
    "to", "be", "been", "is", "that", "which", "and", "has", "have", "with", "at", "of", "same",
    "but", "does", "still", "also",
];

pub(crate) fn install(proto: &Prototype) {
    for chain in LANGUAGE_CHAINS {
        proto.add_property(chain, |_| Ok(None));
    }

    proto.add_property("not", |a| {
        a.flags_mut().set_negate(true);
        Ok(None)
    });
    proto.add_property("ok", ok);
    proto.add_property("true", |a| literal(a, &Value::Bool(true), "true"));
    proto.add_property("false", |a| literal(a, &Value::Bool(false), "false"));
    proto.add_property("null", |a| literal(a, &Value::Null, "null"));
    proto.add_property("undefined", |a| literal(a, &Value::Undefined, "undefined"));

    proto.add_method("equal", 1, equal);
    proto.add_method("eql", 1, eql);
    proto.add_method("above", 1, above);
    proto.add_method("below", 1, below);
    proto.add_method("a", 1, type_of);
    proto.add_method("an", 1, type_of);
    proto.add_method("lengthOf", 1, length_of);
    proto.add_method("include", 1, include);
    proto.add_method("match", 1, matches);
    proto.add_method("property", 1, property);
}

fn ok(a: &mut Assertion) -> MethodResult {
    a.assert(
        a.object().is_truthy(),
        "expected #{this} to be truthy",
        "expected #{this} to be falsy",
        None,
        None,
    )?;
    Ok(None)
}

fn literal(a: &mut Assertion, expected: &Value, label: &str) -> MethodResult {
    a.assert(
        a.object() == expected,
        &format!("expected #{{this}} to be {label}"),
        &format!("expected #{{this}} not to be {label}"),
        None,
        None,
    )?;
    Ok(None)
}

fn equal(a: &mut Assertion, args: &[Value]) -> MethodResult {
    let expected = first_argument("equal", args)?.clone();
    a.assert(
        *a.object() == expected,
        "expected #{this} to equal #{exp}",
        "expected #{this} to not equal #{exp}",
        Some(expected),
        Some(a.object().clone()),
    )?;
    Ok(None)
}

fn eql(a: &mut Assertion, args: &[Value]) -> MethodResult {
    let expected = first_argument("eql", args)?.clone();
    a.assert(
        *a.object() == expected,
        "expected #{this} to deeply equal #{exp}",
        "expected #{this} to not deeply equal #{exp}",
        Some(expected),
        Some(a.object().clone()),
    )?;
    Ok(None)
}

fn numeric_operands(a: &Assertion, name: &str, args: &[Value]) -> Result<(f64, f64, Value), ChainError> {
    let arg = first_argument(name, args)?;
    let bound = arg
        .as_f64()
        .ok_or_else(|| UsageError::invalid_argument(name, format!("{} is not a number", inspect(arg))))?;
    let subject = a
        .object()
        .as_f64()
        .ok_or_else(|| a.fail(format!("expected {} to be a number", a.display(a.object()))))?;
    Ok((subject, bound, arg.clone()))
}

fn above(a: &mut Assertion, args: &[Value]) -> MethodResult {
    let (subject, bound, expected) = numeric_operands(a, "above", args)?;
    a.assert(
        subject > bound,
        "expected #{this} to be above #{exp}",
        "expected #{this} to be at most #{exp}",
        Some(expected),
        None,
    )?;
    Ok(None)
}

fn below(a: &mut Assertion, args: &[Value]) -> MethodResult {
    let (subject, bound, expected) = numeric_operands(a, "below", args)?;
    a.assert(
        subject < bound,
        "expected #{this} to be below #{exp}",
        "expected #{this} to be at least #{exp}",
        Some(expected),
        None,
    )?;
    Ok(None)
}

fn type_of(a: &mut Assertion, args: &[Value]) -> MethodResult {
    let wanted = first_argument("a", args)?
        .as_str()
        .ok_or_else(|| UsageError::invalid_argument("a", "type name must be a string"))?
        .to_lowercase();
    let article = if wanted.starts_with(['a', 'e', 'i', 'o', 'u']) { "an" } else { "a" };
    a.assert(
        a.object().type_name() == wanted,
        &format!("expected #{{this}} to be {article} {wanted}"),
        &format!("expected #{{this}} not to be {article} {wanted}"),
        None,
        None,
    )?;
    Ok(None)
}

fn length_of(a: &mut Assertion, args: &[Value]) -> MethodResult {
    let expected = first_argument("lengthOf", args)?
        .as_int()
        .ok_or_else(|| UsageError::invalid_argument("lengthOf", "length must be an integer"))?;
    let actual = match a.object() {
        Value::Array(items) => items.len(),
        Value::String(s) => s.chars().count(),
        Value::Object(obj) => obj.len(),
        other => {
            let shown = a.display(other);
            return Err(a.fail(format!("expected {shown} to have a length")));
        }
    };
    a.assert(
        i64::try_from(actual).map_or(false, |len| len == expected),
        "expected #{this} to have a length of #{exp} but got #{act}",
        "expected #{this} to not have a length of #{act}",
        Some(Value::Int(expected)),
        Some(Value::from(actual)),
    )?;
    Ok(None)
}

fn include(a: &mut Assertion, args: &[Value]) -> MethodResult {
    let needle = first_argument("include", args)?;
    let found = match (a.object(), needle) {
        (Value::String(haystack), Value::String(part)) => haystack.contains(part.as_str()),
        (Value::String(_), _) => {
            return Err(UsageError::invalid_argument("include", "a string can only include a string").into());
        }
        (Value::Array(items), _) => items.contains(needle),
        (Value::Object(obj), Value::Object(subset)) => {
            subset.iter().all(|(k, v)| obj.get(k) == Some(v))
        }
        (Value::Object(_), _) => {
            return Err(UsageError::invalid_argument("include", "an object can only include an object").into());
        }
        (other, _) => {
            let shown = a.display(other);
            return Err(a.fail(format!("expected {shown} to be a string, array, or object")));
        }
    };
    a.assert(
        found,
        "expected #{this} to include #{exp}",
        "expected #{this} to not include #{exp}",
        Some(needle.clone()),
        None,
    )?;
    Ok(None)
}

fn matches(a: &mut Assertion, args: &[Value]) -> MethodResult {
    let pattern = first_argument("match", args)?
        .as_str()
        .ok_or_else(|| UsageError::invalid_argument("match", "pattern must be a string"))?;
    let re = cached_regex(pattern)?;
    let Some(subject) = a.object().as_str() else {
        let shown = a.display(a.object());
        return Err(a.fail(format!("expected {shown} to be a string")));
    };
    a.assert(
        re.is_match(subject),
        &format!("expected #{{this}} to match /{pattern}/"),
        &format!("expected #{{this}} not to match /{pattern}/"),
        None,
        None,
    )?;
    Ok(None)
}

/// `property(name[, value])`: on success the chain continues with the
/// property's value as its subject.
fn property(a: &mut Assertion, args: &[Value]) -> MethodResult {
    let name = first_argument("property", args)?
        .as_str()
        .ok_or_else(|| UsageError::invalid_argument("property", "name must be a string"))?
        .to_string();
    let value = a.object().as_object().and_then(|obj| obj.get(&name)).cloned();
    let described = inspect(&Value::from(name.as_str()));

    if !a.flags().negate() || args.len() == 1 {
        a.assert(
            value.is_some(),
            &format!("expected #{{this}} to have property {described}"),
            &format!("expected #{{this}} to not have property {described}"),
            None,
            None,
        )?;
    }

    if let Some(expected) = args.get(1) {
        a.assert(
            value.as_ref() == Some(expected),
            &format!("expected #{{this}} to have property {described} of #{{exp}}, but got #{{act}}"),
            &format!("expected #{{this}} to not have property {described} of #{{act}}"),
            Some(expected.clone()),
            Some(value.clone().unwrap_or_default()),
        )?;
    }

    a.flags_mut().set_object(value.unwrap_or_default());
    Ok(None)
}
