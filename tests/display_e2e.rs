use chainassert::{obj_display, Config, Engine, Function, Object, Value};

fn range(len: i64) -> Value {
    Value::from((0..len).collect::<Vec<i64>>())
}

fn failure_message(result: chainassert::ChainResult<chainassert::Assertion>) -> String {
    result
        .expect_err("assertion should fail")
        .as_assertion()
        .expect("assertion failure")
        .message
        .clone()
}

#[test]
fn long_arrays_are_summarized_in_messages() {
    let engine = Engine::new();
    let message = failure_message(
        engine
            .expect(range(20))
            .prop("to")
            .unwrap()
            .method("eql", &[range(19)]),
    );
    assert_eq!(message, "expected [ Array(20) ] to deeply equal [ Array(19) ]");
}

#[test]
fn short_values_render_in_full_in_messages() {
    let engine = Engine::new();
    let message = failure_message(
        engine
            .expect(range(2))
            .prop("to")
            .unwrap()
            .method("eql", &[range(3)]),
    );
    assert_eq!(message, "expected [ 0, 1 ] to deeply equal [ 0, 1, 2 ]");
}

#[test]
fn wide_objects_list_first_two_keys() {
    let engine = Engine::new();
    let subject = Value::from(serde_json::json!({
        "alpha": "first value",
        "beta": "second value",
        "gamma": "third value",
    }));
    let message = failure_message(engine.expect(subject).method("lengthOf", &[2.into()]));
    assert_eq!(
        message,
        "expected { Object (alpha, beta, ...) } to have a length of 2 but got 3"
    );
}

#[test]
fn truncation_follows_runtime_config() {
    let engine = Engine::new();
    engine.configure(|c| c.truncate_threshold = 0);

    let message = failure_message(engine.expect(range(12)).method("lengthOf", &[1.into()]));
    assert_eq!(
        message,
        "expected [ 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11 ] to have a length of 1 but got 12"
    );

    engine.configure(|c| c.truncate_threshold = 10);
    let message = failure_message(engine.expect(range(12)).method("lengthOf", &[1.into()]));
    assert_eq!(message, "expected [ Array(12) ] to have a length of 1 but got 12");
}

#[test]
fn message_prefix_and_negation() {
    let engine = Engine::new();
    let message = failure_message(
        engine
            .expect_with_message(range(20), "batch sizes")
            .prop("not")
            .unwrap()
            .method("lengthOf", &[20.into()]),
    );
    assert_eq!(
        message,
        "batch sizes: expected [ Array(20) ] to not have a length of 20"
    );
}

#[test]
fn strings_and_numbers_are_never_summarized() {
    let cfg = Config::default().with_truncate_threshold(1);
    let text = "a fairly long string that certainly exceeds any threshold";
    assert_eq!(obj_display(&Value::from(text), &cfg), format!("'{text}'"));
    assert_eq!(obj_display(&Value::Float(1.5), &cfg), "1.5");
    assert_eq!(obj_display(&Value::Bool(true), &cfg), "true");
    assert_eq!(obj_display(&Value::Null, &cfg), "null");
    assert_eq!(obj_display(&Value::Undefined, &cfg), "undefined");
}

#[test]
fn functions_and_small_objects_past_threshold() {
    let cfg = Config::default().with_truncate_threshold(1);
    assert_eq!(
        obj_display(&Value::Function(Function::named("handler", 1)), &cfg),
        "[Function: handler]"
    );
    assert_eq!(obj_display(&Value::Function(Function::anonymous(0)), &cfg), "[Function]");
    assert_eq!(
        obj_display(&Value::Object(Object::new().with("only", 1)), &cfg),
        "{ Object (only) }"
    );
    assert_eq!(obj_display(&Value::Object(Object::new()), &cfg), "{ Object () }");
    assert_eq!(obj_display(&Value::Array(Vec::new()), &cfg), "[ Array(0) ]");
}

#[test]
fn threshold_counts_characters_not_bytes() {
    // "[ 'é' ]" is seven characters and eight bytes.
    let arr = Value::from(vec!["é"]);
    let cfg = Config::default().with_truncate_threshold(8);
    assert_eq!(obj_display(&arr, &cfg), "[ 'é' ]");
}
