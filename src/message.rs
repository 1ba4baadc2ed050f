//! Failure message templating.
//!
//! Templates may reference `#{this}` (the subject), `#{act}` (the actual
//! value) and `#{exp}` (the expected value); each is rendered with
//! [`obj_display`].

use crate::config::Config;
use crate::display::obj_display;
use crate::flag::Flags;
use crate::value::Value;

/// Inputs of one failure message.
#[derive(Debug, Clone, Copy)]
pub struct MessageArgs<'a> {
    /// Template used when the assertion is not negated.
    pub msg: &'a str,
    /// Template used when the assertion is negated.
    pub negate_msg: &'a str,
    pub expected: Option<&'a Value>,
    /// Defaults to the subject when absent.
    pub actual: Option<&'a Value>,
}

/// Builds the failure message for an assertion with the given flags.
#[must_use]
pub fn get_message(flags: &Flags, config: &Config, args: &MessageArgs<'_>) -> String {
    let template = if flags.negate() { args.negate_msg } else { args.msg };
    let mut msg = template.to_string();

    if msg.contains("#{this}") {
        msg = msg.replace("#{this}", &obj_display(flags.object(), config));
    }
    if msg.contains("#{act}") {
        let actual = args.actual.unwrap_or_else(|| flags.object());
        msg = msg.replace("#{act}", &obj_display(actual, config));
    }
    if msg.contains("#{exp}") {
        let expected = args.expected.unwrap_or(&Value::Undefined);
        msg = msg.replace("#{exp}", &obj_display(expected, config));
    }

    match flags.message() {
        Some(prefix) => format!("{prefix}: {msg}"),
        None => msg,
    }
}
