//! # chainassert - fluent expect-style assertion chains
//!
//! Assertions are chains of named members (methods and properties) looked up
//! in an engine-wide registry. Plugins extend the registry, or replace
//! existing members while keeping access to the implementation they replace.
//!
//! ## Core Concepts
//!
//! - **Engine**: shared member registry and configuration
//! - **Assertion**: one chain, with its private flags (subject, negation, stack origin)
//! - **Member**: a named method or property, reached through a single `invoke` entry point
//! - **Stack origin**: the outermost member wrapper on a call, reported as the failure site
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use chainassert::{Assertion, Engine, MethodFn, Value};
//!
//! let engine = Engine::new();
//!
//! // Make `equal` accept any string when the subject is the string "*".
//! engine.overwrite_method("equal", |previous: MethodFn| -> MethodFn {
//!     Arc::new(move |a: &mut Assertion, args: &[Value]| {
//!         if a.object().as_str() == Some("*") && args[0].is_string() {
//!             return Ok(None);
//!         }
//!         previous(a, args)
//!     })
//! });
//!
//! engine.expect("*").prop("to")?.method("equal", &["anything".into()])?;
//! engine.expect(1).prop("to")?.method("equal", &[1.into()])?;
//! assert!(engine.expect(1).method("equal", &[2.into()]).is_err());
//! # Ok::<(), chainassert::ChainError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod assertion;
pub mod config;
pub mod builtin;
pub mod display;
pub mod engine;
pub mod error;
pub mod flag;
pub mod guard;
pub mod inspect;
pub mod member;
pub mod message;
pub mod overwrite;
pub mod prototype;
pub mod value;

// Re-export primary types at crate root for convenience
pub use assertion::Assertion;
pub use config::Config;
pub use display::obj_display;
pub use engine::Engine;
pub use error::{AssertionError, ChainError, ChainResult, UsageError};
pub use flag::{transfer_flags, Flags, StackOrigin};
pub use inspect::{inspect, inspect_with};
pub use member::{Access, Member, MemberId, MethodFn, MethodResult, Outcome, PropertyFn};
pub use message::{get_message, MessageArgs};
pub use overwrite::{make_override, make_property_override, DefaultValueFn};
pub use prototype::Prototype;
pub use value::{Function, Object, Value};
