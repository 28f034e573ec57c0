//! Candidate-priority conformance matrix
//!
//! # Test Coverage
//!
//! One dispatcher carrying the full spread of candidate shapes - strict and
//! lenient fixed arities, optional trailing parameters, a variadic rest
//! parameter, floats, and object parameters - driven through a table of
//! argument lists. Exercises priority, fallback, both
//! unreachable-by-construction fixtures, and exhaustion in a single place.
//!
//! # Test Strategy
//!
//! Table-driven: each row is an argument list and the expected winning
//! candidate's result. The candidate bodies return distinct strings so the
//! selected implementation is observable from the outcome alone.


use polycall::{overload, raw, typed, variadic, CallError, ContractViolation, Dispatcher, FromArgs};
use serde_json::{json, Map, Value};
use tracing_util::TestTracing;

fn subject() -> Dispatcher {
    overload![
        // Exactly three integers; rejects the excess a lenient shape would
        // swallow, so four-integer calls fall through.
        raw(|args| {
            if args.len() > 3 {
                return Err(ContractViolation::entry("too many arguments provided").into());
            }
            let (a, b, c) = <(i64, i64, i64) as FromArgs>::from_args(args)?;
            Ok(json!(format!("three required integers: {a}, {b}, {c}")))
        }),
        typed(|a: i64, b: i64| format!("two required integers: {a}, {b}")).lenient(),
        // Unreachable: the preceding candidate swallows excess arguments.
        typed(|a: i64, b: i64, c: i64, d: i64| {
            format!("four required integers: {a}, {b}, {c}, {d}")
        })
        .lenient(),
        typed(|a: String, b: String| format!("two required strings: {a}, {b}")).lenient(),
        typed(|a: String, n: Option<i64>| {
            format!(
                "one required string, one optional integer: {a}, {}",
                n.unwrap_or(42)
            )
        })
        .lenient(),
        // Unreachable: the preceding candidate matches first.
        typed(|a: String, b: Option<String>| {
            format!(
                "one required string, one optional string: {a}, {}",
                b.unwrap_or_else(|| "default2".into())
            )
        })
        .lenient(),
        typed(|a: Option<String>, b: Option<String>| {
            format!(
                "two optional strings: {}, {}",
                a.unwrap_or_else(|| "default1".into()),
                b.unwrap_or_else(|| "default2".into())
            )
        })
        .lenient(),
        // Unreachable: the preceding candidates match first.
        variadic(|strings: Vec<String>| format!("many optional strings: {}", strings.join(", "))),
        typed(|a: f64, b: f64| format!("two required floats: {a}, {b}")).lenient(),
        typed(|_a: Map<String, Value>, _b: Map<String, Value>| "two required objects").lenient(),
    ]
    .expect("build")
}

#[test]
fn selects_by_priority_across_the_matrix() {
    let _tracing = TestTracing::init();
    let subject = subject();
    let cases: Vec<(Vec<Value>, &str)> = vec![
        (vec![json!(1), json!(2)], "two required integers: 1, 2"),
        (
            vec![json!(1), json!(2), json!(3)],
            "three required integers: 1, 2, 3",
        ),
        // The four-integer candidate is unreachable by construction.
        (
            vec![json!(1), json!(2), json!(3), json!(4)],
            "two required integers: 1, 2",
        ),
        (
            vec![json!("a")],
            "one required string, one optional integer: a, 42",
        ),
        (vec![json!("a"), json!("bb")], "two required strings: a, bb"),
        (
            vec![json!("a"), json!(2)],
            "one required string, one optional integer: a, 2",
        ),
        (vec![], "two optional strings: default1, default2"),
        // The variadic candidate is unreachable by construction.
        (
            vec![json!("a"), json!("b"), json!("c"), json!("d")],
            "two required strings: a, b",
        ),
        (
            vec![json!(1.41), json!(3.14)],
            "two required floats: 1.41, 3.14",
        ),
        (
            vec![json!(1), json!(3.14)],
            "two required floats: 1, 3.14",
        ),
        (
            vec![json!({}), json!({ "kind": "x" })],
            "two required objects",
        ),
    ];

    for (args, expected) in cases {
        let actual = subject
            .invoke(&args)
            .unwrap_or_else(|err| panic!("invoke({args:?}) failed: {err}"));
        assert_eq!(actual, json!(expected), "args {args:?}");
    }
}

#[test]
fn exhausts_when_no_candidate_accepts() {
    let _tracing = TestTracing::init();
    let subject = subject();
    let mismatches = [
        vec![json!(1)],
        vec![json!("a"), json!(2.71)],
        vec![json!({})],
        vec![json!({ "a": 1 }), json!(2)],
    ];

    for args in mismatches {
        let err = subject.invoke(&args).unwrap_err();
        assert!(
            matches!(err, CallError::Contract(_)),
            "args {args:?}: {err}"
        );
    }
}
