//! End-to-end scenarios: creator trees feeding namespaced reducers.

use relay_core::{Action, Namespace, NamespaceOptions, combine};
use relay_framework::prelude::*;
use relay_framework::spec_from_json;
use serde_json::{Value, json};

#[derive(Debug, Clone, PartialEq)]
struct Counter {
    counter: i64,
    message: String,
}

fn counter(counter: i64, message: &str) -> Counter {
    Counter {
        counter,
        message: message.to_string(),
    }
}

fn amount(action: &Action) -> i64 {
    action
        .payload
        .as_ref()
        .and_then(|p| p["amount"].as_i64())
        .unwrap_or_default()
}

fn app_actions(options: &NamespaceOptions) -> ActionTree {
    let spec = Namespace::new().branch(
        "app",
        Namespace::new()
            .branch(
                "counter",
                Namespace::new()
                    .leaf(
                        "increment",
                        ActionSpec::payload_meta(
                            |a| json!({ "amount": a[0] }),
                            |a| json!({ "key": "value", "amount": a[0] }),
                        ),
                    )
                    .leaf(
                        "decrement",
                        ActionSpec::payload(|a| json!({ "amount": -a[0].as_i64().unwrap_or_default() })),
                    ),
            )
            .leaf(
                "notify",
                ActionSpec::payload_meta(
                    |a| {
                        json!({
                            "message": format!(
                                "{}: {}",
                                a[0].as_str().unwrap_or_default(),
                                a.get(1).and_then(Value::as_str).unwrap_or_default()
                            )
                        })
                    },
                    |a| json!({ "username": a[0], "message": a.get(1) }),
                ),
            ),
    );
    create_actions(spec, Vec::<&str>::new(), options).unwrap()
}

fn notify_next(state: Counter, action: &Action) -> Counter {
    let message = action
        .payload
        .as_ref()
        .and_then(|p| p["message"].as_str())
        .unwrap_or_default();
    Counter {
        counter: state.counter,
        message: format!("{}---{}", state.message, message),
    }
}

#[test]
fn test_namespaced_actions() {
    let tree = app_actions(&NamespaceOptions::default());
    let increment = tree.get(&["app", "counter", "increment"]).unwrap().clone();
    let decrement = tree.get(&["app", "counter", "decrement"]).unwrap().clone();
    let notify = tree.get(&["app", "notify"]).unwrap().clone();

    let reducer = handle_actions(
        handlers! {
            combine!(increment, decrement).unwrap() => |s: Counter, a: &Action| Counter {
                counter: s.counter + amount(a),
                message: s.message,
            },
            notify.clone() => notify_next,
        },
        Some(counter(0, "")),
        &NamespaceOptions::default(),
    )
    .unwrap();

    assert_eq!(
        reducer.reduce(Some(counter(3, "hello")), &increment.call(2)),
        counter(5, "hello")
    );
    assert_eq!(
        reducer.reduce(Some(counter(10, "hello")), &decrement.call(3)),
        counter(7, "hello")
    );
    assert_eq!(
        reducer.reduce(
            Some(counter(10, "hello")),
            &notify.create(&[json!("me"), json!("goodbye")])
        ),
        counter(10, "hello---me: goodbye")
    );
}

#[test]
fn test_nested_handlers_with_custom_divider() {
    let options = NamespaceOptions::new().divider(":");
    let tree = app_actions(&options);
    let increment = tree.get(&["app", "counter", "increment"]).unwrap().clone();
    let decrement = tree.get(&["app", "counter", "decrement"]).unwrap().clone();
    let notify = tree.get(&["app", "notify"]).unwrap().clone();
    assert_eq!(increment.to_string(), "app:counter:increment");

    let handlers = HandlerTree::new()
        .on(
            combine!(increment, decrement).unwrap(),
            |s: Counter, a: &Action| Counter {
                counter: s.counter + amount(a),
                message: s.message,
            },
        )
        .nest(
            "app",
            HandlerTree::new().handle(
                "notify",
                NextThrow::new()
                    .next(notify_next)
                    .throw(|s: Counter, a: &Action| Counter {
                        counter: 0,
                        message: format!(
                            "{}-x-{}",
                            s.message,
                            a.payload.as_ref().and_then(Value::as_str).unwrap_or_default()
                        ),
                    }),
            ),
        );
    let reducer = handle_actions(handlers, Some(counter(0, "")), &options).unwrap();

    assert_eq!(
        reducer.reduce(Some(counter(3, "hello")), &increment.call(2)),
        counter(5, "hello")
    );
    assert_eq!(
        reducer.reduce(Some(counter(10, "hello")), &decrement.call(3)),
        counter(7, "hello")
    );
    assert_eq!(
        reducer.reduce(
            Some(counter(10, "hello")),
            &notify.create(&[json!("me"), json!("goodbye")])
        ),
        counter(10, "hello---me: goodbye")
    );
    assert_eq!(
        reducer.reduce(Some(counter(10, "hello")), &notify.fail("no notification")),
        counter(0, "hello-x-no notification")
    );
}

#[test]
fn test_nested_identity_handlers() {
    let noop = create_action("app/noop", None, None).unwrap();
    let increment = create_action("app/increment", None, None).unwrap();

    let reducer = handle_actions(
        handlers! {
            "app" => handlers! {
                "noop" => HandlerSpec::Identity,
                "increment" => NextThrow::new().next(|s: Counter, a: &Action| Counter {
                    counter: s.counter + a.payload.as_ref().and_then(Value::as_i64).unwrap_or_default(),
                    ..s
                }),
            },
        },
        Some(counter(0, "")),
        &NamespaceOptions::default(),
    )
    .unwrap();

    assert_eq!(
        reducer.reduce(Some(counter(3, "hello")), &noop.call("anything")),
        counter(3, "hello")
    );
    assert_eq!(
        reducer.reduce(Some(counter(3, "hello")), &increment.call(2)),
        counter(5, "hello")
    );
    assert_eq!(
        reducer.reduce(
            Some(counter(3, "hello")),
            &increment.fail("cannot increment by Infinity")
        ),
        counter(3, "hello")
    );
}

#[test]
fn test_combined_namespace_key() {
    let roots = create_actions(
        Namespace::new(),
        ["apiCall1", "apiCall2"],
        &NamespaceOptions::default(),
    )
    .unwrap();
    let loading = create_actions(
        spec_from_json(&json!({ "apiCall1": { "loading": null }, "apiCall2": { "loading": null } }))
            .unwrap(),
        Vec::<&str>::new(),
        &NamespaceOptions::default(),
    )
    .unwrap();

    let api1 = roots.get(&["apiCall1"]).unwrap();
    let api2 = roots.get(&["apiCall2"]).unwrap();
    let reducer = handle_actions(
        handlers! {
            combine!(api1, api2).unwrap() => handlers! {
                "loading" => |_: bool, a: &Action| a.payload.as_ref().and_then(Value::as_bool).unwrap_or_default(),
            },
        },
        Some(false),
        &NamespaceOptions::default(),
    )
    .unwrap();

    for path in [["apiCall1", "loading"], ["apiCall2", "loading"]] {
        let creator = loading.get(&path).unwrap();
        assert!(reducer.reduce(Some(false), &creator.call(true)));
    }
}

#[test]
fn test_from_pairs_with_full_types() {
    let reducer = handle_actions(
        HandlerTree::from_pairs([
            ("INCREMENT", HandlerSpec::reduce(|s: i64, a: &Action| {
                s + a.payload.as_ref().and_then(Value::as_i64).unwrap_or_default()
            })),
            ("DECREMENT", HandlerSpec::reduce(|s: i64, a: &Action| {
                s - a.payload.as_ref().and_then(Value::as_i64).unwrap_or_default()
            })),
        ]),
        Some(0),
        &NamespaceOptions::default(),
    )
    .unwrap();

    assert_eq!(reducer.reduce(Some(1), &Action::new("INCREMENT").with_payload(7)), 8);
    assert_eq!(reducer.reduce(Some(8), &Action::new("DECREMENT").with_payload(5)), 3);
    assert_eq!(reducer.reduce(None, &Action::new("INCREMENT").with_payload(7)), 7);
}

#[test]
fn test_empty_handlers_keep_state() {
    let unhandled = create_actions(Namespace::new(), ["unhandled"], &NamespaceOptions::default())
        .unwrap();
    let action = unhandled.get(&["unhandled"]).unwrap().create(&[]);
    let reducer =
        handle_actions(HandlerTree::new(), Some(counter(0, "")), &NamespaceOptions::default())
            .unwrap();

    assert_eq!(reducer.reduce(None, &action), counter(0, ""));
    assert_eq!(reducer.reduce(Some(counter(10, "")), &action), counter(10, ""));
}

#[test]
fn test_prefixed_creators_and_handlers_agree() {
    let options = NamespaceOptions::new().divider("--").prefix("my-awesome-feature");
    let tree = app_actions(&options);
    let increment = tree.get(&["app", "counter", "increment"]).unwrap();
    assert_eq!(
        increment.action_type(),
        "my-awesome-feature--app--counter--increment"
    );

    let reducer = handle_actions(
        handlers! {
            "app" => handlers! {
                "counter" => handlers! {
                    "increment" => |s: i64, a: &Action| s + amount(a),
                },
            },
        },
        Some(0),
        &options,
    )
    .unwrap();
    assert_eq!(reducer.reduce(Some(1), &increment.call(4)), 5);
}
