//! Bounded rendering of values for failure messages.

use crate::config::Config;
use crate::inspect::inspect_with;
use crate::value::Value;

/// Renders `value` for embedding in a failure message.
///
/// Below the configured threshold (or with truncation disabled) this is the
/// full `inspect` output. At or above it, functions, arrays and objects are
/// summarized by category; every other value keeps its full rendering.
///
/// ```
/// use chainassert::{obj_display, Config, Value};
///
/// let cfg = Config::default().with_truncate_threshold(5);
/// assert_eq!(obj_display(&Value::from(vec![1, 2, 3, 4, 5]), &cfg), "[ Array(5) ]");
/// ```
#[must_use]
pub fn obj_display(value: &Value, config: &Config) -> String {
    let rendered = inspect_with(value, config.inspect_depth);
    let threshold = config.truncate_threshold;

    if threshold == 0 || rendered.chars().count() < threshold {
        return rendered;
    }

    match value {
        Value::Function(f) => match f.name() {
            Some(name) => format!("[Function: {name}]"),
            None => "[Function]".to_string(),
        },
        Value::Array(items) => format!("[ Array({}) ]", items.len()),
        Value::Object(obj) => {
            let keys: Vec<&str> = obj.keys().collect();
            let listed = if keys.len() > 2 {
                format!("{}, ...", keys[..2].join(", "))
            } else {
                keys.join(", ")
            };
            format!("{{ Object ({listed}) }}")
        }
        _ => rendered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Function, Object};

    fn tight() -> Config {
        Config::default().with_truncate_threshold(1)
    }

    #[test]
    fn test_short_values_render_in_full() {
        let cfg = Config::default();
        assert_eq!(obj_display(&Value::from(vec![1, 2]), &cfg), "[ 1, 2 ]");
        assert_eq!(
            obj_display(&Value::Object(Object::new().with("a", 1)), &cfg),
            "{ a: 1 }"
        );
        assert_eq!(
            obj_display(&Value::Function(Function::named("foo", 0)), &cfg),
            "[Function foo]"
        );
    }

    #[test]
    fn test_length_equal_to_threshold_truncates() {
        // "[ 1, 2 ]" is eight characters long.
        let arr = Value::from(vec![1, 2]);
        assert_eq!(
            obj_display(&arr, &Config::default().with_truncate_threshold(9)),
            "[ 1, 2 ]"
        );
        assert_eq!(
            obj_display(&arr, &Config::default().with_truncate_threshold(8)),
            "[ Array(2) ]"
        );
    }

    #[test]
    fn test_functions_past_threshold() {
        assert_eq!(
            obj_display(&Value::Function(Function::anonymous(0)), &tight()),
            "[Function]"
        );
        assert_eq!(
            obj_display(&Value::Function(Function::named("", 0)), &tight()),
            "[Function]"
        );
        assert_eq!(
            obj_display(&Value::Function(Function::named("foo", 2)), &tight()),
            "[Function: foo]"
        );
    }

    #[test]
    fn test_array_past_threshold() {
        let arr = Value::from(vec![1, 2, 3, 4, 5]);
        assert_eq!(obj_display(&arr, &tight()), "[ Array(5) ]");
    }

    #[test]
    fn test_object_past_threshold_lists_two_keys() {
        let three = Object::new().with("a", 1).with("b", 2).with("c", 3);
        assert_eq!(
            obj_display(&Value::Object(three), &tight()),
            "{ Object (a, b, ...) }"
        );

        let two = Object::new().with("a", 1).with("b", 2);
        assert_eq!(obj_display(&Value::Object(two), &tight()), "{ Object (a, b) }");
    }

    #[test]
    fn test_other_values_never_truncate() {
        let long = "x".repeat(100);
        assert_eq!(
            obj_display(&Value::from(long.as_str()), &tight()),
            format!("'{long}'")
        );
        assert_eq!(obj_display(&Value::Int(123_456), &tight()), "123456");
    }

    #[test]
    fn test_zero_threshold_disables_truncation() {
        let cfg = Config::default().with_truncate_threshold(0);
        let arr = Value::from((0..50).collect::<Vec<i64>>());
        assert_eq!(obj_display(&arr, &cfg), crate::inspect::inspect(&arr));
        let obj = Value::Object(Object::new().with("a", 1).with("b", 2).with("c", 3));
        assert_eq!(obj_display(&obj, &cfg), "{ a: 1, b: 2, c: 3 }");
    }
}
