//! Error types for chainassert.
//!
//! Two families of failure exist: an assertion that did not hold, and a
//! misuse of the assertion API itself (unknown member, missing argument,
//! calling through to a previous implementation that never existed).
//! Both are strongly typed using thiserror.

use thiserror::Error;

use crate::flag::StackOrigin;
use crate::value::Value;

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(". Did you mean \"{name}\"?"),
        None => String::new(),
    }
}

/// Errors caused by using the assertion API incorrectly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("{name} is not a function")]
    NotAFunction {
        name: String,
    },

    #[error("Invalid property: {name}{}", suggestion_suffix(.suggestion))]
    UnknownMember {
        name: String,
        suggestion: Option<String>,
    },

    #[error("{name} expects at least {expected} argument(s), got {actual}")]
    MissingArguments {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("{name} is a property and cannot be called")]
    NotCallable {
        name: String,
    },

    #[error("Invalid argument for {name}: {reason}")]
    InvalidArgument {
        name: String,
        reason: String,
    },
}

impl UsageError {
    /// Creates an invalid-argument error.
    #[must_use]
    pub fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// A failed assertion.
///
/// `origin` is the boundary downstream reporters trim internal frames at:
/// normally the user call site of the outermost assertion member.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AssertionError {
    pub message: String,
    pub actual: Option<Value>,
    pub expected: Option<Value>,
    pub show_diff: bool,
    pub origin: Option<StackOrigin>,
}

impl AssertionError {
    /// Renders the message followed by the origin, if one is known.
    #[must_use]
    pub fn report(&self) -> String {
        match &self.origin {
            Some(origin) => format!("{}\n    at {origin}", self.message),
            None => self.message.clone(),
        }
    }
}

/// Top-level error type for chainassert.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("{0}")]
    Assertion(#[from] AssertionError),

    #[error("Usage error: {0}")]
    Usage(#[from] UsageError),
}

impl ChainError {
    /// Returns true if this is a failed assertion.
    #[must_use]
    pub const fn is_assertion(&self) -> bool {
        matches!(self, Self::Assertion(_))
    }

    /// Returns true if this is an API usage error.
    #[must_use]
    pub const fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }

    /// Returns the assertion failure, if this is one.
    #[must_use]
    pub const fn as_assertion(&self) -> Option<&AssertionError> {
        match self {
            Self::Assertion(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the usage error, if this is one.
    #[must_use]
    pub const fn as_usage(&self) -> Option<&UsageError> {
        match self {
            Self::Usage(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type alias for chainassert operations.
pub type ChainResult<T> = Result<T, ChainError>;
