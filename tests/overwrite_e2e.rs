use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chainassert::{
    Assertion, ChainError, Config, Engine, MethodFn, MethodResult, Outcome, PropertyFn,
    UsageError, Value,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn usage(err: &ChainError) -> &UsageError {
    err.as_usage().expect("expected a usage error")
}

#[test]
fn overwrite_wraps_previous_equal() {
    init_logging();
    let engine = Engine::new();
    engine.overwrite_method("equal", |previous: MethodFn| -> MethodFn {
        Arc::new(move |a: &mut Assertion, args: &[Value]| -> MethodResult {
            if a.object().as_str() == Some("*") && args[0].is_string() {
                return Ok(None);
            }
            previous(a, args)
        })
    });

    assert!(engine.expect("*").prop("to").unwrap().method("equal", &["x".into()]).is_ok());
    assert!(engine.expect(2).prop("to").unwrap().method("equal", &[2.into()]).is_ok());

    let err = engine.expect(2).prop("to").unwrap().method("equal", &[3.into()]).unwrap_err();
    assert!(err.is_assertion());
    assert_eq!(err.to_string(), "expected 2 to equal 3");
}

#[test]
fn nested_overwritten_calls_keep_outermost_origin() {
    init_logging();
    let engine = Engine::new();
    engine.add_method("inner", 0, |_, _| Ok(None));
    let inner_id = engine.overwrite_method("inner", |previous: MethodFn| -> MethodFn {
        Arc::new(move |a: &mut Assertion, args: &[Value]| -> MethodResult {
            assert!(a.flags().stack_origin_locked());
            previous(a, args)
        })
    });
    let outer_id = engine.overwrite_method("outer", |_previous: MethodFn| -> MethodFn {
        Arc::new(|a: &mut Assertion, _: &[Value]| -> MethodResult {
            a.call("inner", &[])?;
            Ok(None)
        })
    });
    assert_ne!(inner_id, outer_id);

    let (result, line) = (engine.expect(1).method("outer", &[]), line!());
    let next = result.unwrap();

    let origin = next.stack_origin().expect("origin set");
    assert_eq!(origin.member(), outer_id);
    assert_eq!(origin.name(), "outer");
    assert_eq!(origin.location().line(), line);
    assert!(origin.location().file().ends_with("overwrite_e2e.rs"));
    assert!(!next.flags().stack_origin_locked());
}

#[test]
fn failure_inside_nested_call_reports_outer_origin() {
    let engine = Engine::new();
    let outer_id = engine.overwrite_method("strictlyTwo", |_previous: MethodFn| -> MethodFn {
        Arc::new(|a: &mut Assertion, _: &[Value]| -> MethodResult {
            a.call("equal", &[Value::Int(2)])?;
            Ok(None)
        })
    });

    let err = engine.expect(5).method("strictlyTwo", &[]).unwrap_err();
    let failure = err.as_assertion().expect("assertion failure");
    assert_eq!(failure.message, "expected 5 to equal 2");
    let origin = failure.origin.as_ref().expect("origin recorded");
    assert_eq!(origin.member(), outer_id);
    assert!(failure.report().contains("(strictlyTwo)"));
}

#[test]
fn missing_previous_fails_only_when_called() {
    let engine = Engine::new();
    engine.overwrite_method("foo", |previous| previous);
    let err = engine.expect(1).method("foo", &[]).unwrap_err();
    assert_eq!(
        usage(&err),
        &UsageError::NotAFunction {
            name: "foo".to_string()
        }
    );

    engine.overwrite_method("bar", |_previous: MethodFn| -> MethodFn {
        Arc::new(|_: &mut Assertion, _: &[Value]| -> MethodResult { Ok(None) })
    });
    assert!(engine.expect(1).method("bar", &[]).is_ok());
}

#[test]
fn explicit_value_is_returned_over_default() {
    let engine = Engine::new();
    engine.overwrite_method("answer", |_previous: MethodFn| -> MethodFn {
        Arc::new(|_: &mut Assertion, _: &[Value]| -> MethodResult {
            Ok(Some(Outcome::Value(Value::Int(42))))
        })
    });

    let mut a = engine.expect(0);
    let outcome = a.call("answer", &[]).unwrap();
    assert_eq!(outcome.and_then(Outcome::into_value), Some(Value::Int(42)));
}

#[test]
fn default_continues_chain_with_all_flags() {
    let engine = Engine::new();
    engine.overwrite_method("equal", |previous| previous);

    let mut a = engine.expect_with_message(3, "ctx");
    a.set_flag("plugin", true);
    let next = a
        .prop("not")
        .unwrap()
        .method("equal", &[4.into()])
        .unwrap();

    assert!(next.flags().negate());
    assert_eq!(next.flags().message(), Some("ctx"));
    assert_eq!(next.flag("plugin"), Some(&Value::Bool(true)));
    assert_eq!(next.object(), &Value::Int(3));
}

#[test]
fn get_on_method_with_arity_reports_missing_argument() {
    let engine = Engine::new();
    engine.overwrite_method("equal", |previous| previous);

    let err = engine.expect(1).prop("equal").unwrap_err();
    assert_eq!(
        usage(&err),
        &UsageError::MissingArguments {
            name: "equal".to_string(),
            expected: 1,
            actual: 0,
        }
    );
}

#[test]
fn overwrite_keeps_arity_of_replaced_method() {
    let engine = Engine::new();
    let before = engine.prototype().get("above").and_then(|m| m.as_method().map(|m| m.arity()));
    engine.overwrite_method("above", |previous| previous);
    let after = engine.prototype().get("above").and_then(|m| m.as_method().map(|m| m.arity()));
    assert_eq!(before, Some(1));
    assert_eq!(after, Some(1));
}

#[test]
fn implementation_called_once_per_invocation() {
    let engine = Engine::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    engine.overwrite_method("equal", move |previous: MethodFn| -> MethodFn {
        let counter = Arc::clone(&counter);
        Arc::new(move |a: &mut Assertion, args: &[Value]| -> MethodResult {
            counter.fetch_add(1, Ordering::SeqCst);
            previous(a, args)
        })
    });

    engine.expect(1).method("equal", &[1.into()]).unwrap();
    engine.expect(1).method("equal", &[1.into()]).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn overwrite_property_wraps_getter() {
    let engine = Engine::new();
    engine.overwrite_property("ok", |previous: PropertyFn| -> PropertyFn {
        Arc::new(move |a: &mut Assertion| -> MethodResult {
            if a.object().is_null() {
                return Ok(None);
            }
            previous(a)
        })
    });

    assert!(engine.expect(Value::Null).prop("ok").is_ok());
    assert!(engine.expect(1).prop("ok").is_ok());
    let err = engine.expect(0).prop("ok").unwrap_err();
    assert_eq!(err.to_string(), "expected 0 to be truthy");
}

#[test]
fn unknown_member_suggests_closest_name() {
    let engine = Engine::new();
    let err = engine.expect(1).prop("equale").unwrap_err();
    assert_eq!(
        usage(&err),
        &UsageError::UnknownMember {
            name: "equale".to_string(),
            suggestion: Some("equal".to_string()),
        }
    );
    assert_eq!(
        err.to_string(),
        "Usage error: Invalid property: equale. Did you mean \"equal\"?"
    );
}

#[test]
fn excluded_keywords_and_disabled_checks_return_nothing() {
    let engine = Engine::new();
    let mut a = engine.expect(1);
    assert!(a.get("then").unwrap().is_none());
    assert!(a.get("toJSON").unwrap().is_none());

    let relaxed = Engine::with_config(Config {
        use_proxy: false,
        ..Config::default()
    });
    let mut a = relaxed.expect(1);
    assert!(a.get("nonsense").unwrap().is_none());
}

#[test]
fn calling_a_property_is_rejected() {
    let engine = Engine::new();
    let err = engine.expect(1).method("ok", &[]).unwrap_err();
    assert_eq!(
        usage(&err),
        &UsageError::NotCallable {
            name: "ok".to_string()
        }
    );
}

#[test]
fn engine_is_shared_across_threads() {
    let engine = Engine::new();
    engine.overwrite_method("equal", |previous| previous);

    let handles: Vec<_> = (0..4i64)
        .map(|i| {
            let engine = engine.clone();
            std::thread::spawn(move || {
                engine
                    .expect(i)
                    .prop("to")
                    .and_then(|a| a.method("equal", &[Value::Int(i)]))
                    .is_ok()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn stacked_overwrites_report_outermost_origin() {
    let engine = Engine::new();
    let first_id = engine.overwrite_method("equal", |previous| previous);
    let second_id = engine.overwrite_method("equal", |previous: MethodFn| -> MethodFn {
        Arc::new(move |a: &mut Assertion, args: &[Value]| -> MethodResult {
            assert!(a.flags().stack_origin_locked());
            previous(a, args)
        })
    });
    assert_ne!(first_id, second_id);

    let next = engine.expect(1).method("equal", &[1.into()]).unwrap();
    let origin = next.stack_origin().expect("origin set");
    assert_eq!(origin.member(), second_id);
    assert_eq!(origin.name(), "equal");
    assert!(!next.flags().stack_origin_locked());

    let err = engine.expect(1).method("equal", &[2.into()]).unwrap_err();
    let failure = err.as_assertion().expect("assertion failure");
    assert_eq!(failure.message, "expected 1 to equal 2");
    assert_eq!(failure.origin.as_ref().map(|o| o.member()), Some(second_id));
}
