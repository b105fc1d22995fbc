//! Passthrough-output decoration: the dependency value rides along as an
//! extra output so ordering constraints can chain across several nodes.

use serde_json::json;
use tether::nodes;
use tether::prelude::*;

fn kwargs(pairs: &[(&str, NodeValue)]) -> Kwargs {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn stamp_node(name: &str) -> NodeDefinition {
    let stamp = format!("processed by {name}");
    NodeDefinition::new(name)
        .input_schema(InputSchema::new().required("value", InputSlot::wildcard()))
        .returns([TypeTag::Any])
        .entry_point(
            "process",
            NodeCallable::with_signature(
                move |kwargs: Kwargs| {
                    let value = kwargs.get("value").cloned().unwrap_or(NodeValue::Null);
                    Ok(vec![json!([value, stamp.clone()])])
                },
                Signature::new().param("value"),
            ),
        )
}

#[test]
fn test_add_output_extends_return_types() {
    let node = DependencyInput::new()
        .add_output(true)
        .apply(&stamp_node("A"))
        .unwrap();

    assert_eq!(node.return_types(), [TypeTag::Any, TypeTag::Any]);
    // Placeholder names are synthesized for the undeclared original outputs.
    assert_eq!(
        node.return_names_list().unwrap(),
        ["output_0", "depends_on_out"]
    );
}

#[test]
fn test_custom_output_name() {
    let node = DependencyInput::new()
        .input_name("wait_for")
        .output_name("waited")
        .apply(&stamp_node("A").return_names(["stamped"]))
        .unwrap();

    assert_eq!(node.return_names_list().unwrap(), ["stamped", "waited"]);
}

#[test]
fn test_dependency_value_rides_along() {
    let node = DependencyInput::new()
        .add_output(true)
        .apply(&stamp_node("A"))
        .unwrap();

    let row = node
        .call(kwargs(&[
            ("value", json!(1)),
            ("depends_on", json!("signal")),
        ]))
        .unwrap();
    assert_eq!(row.len(), 2);
    assert_eq!(row[1], json!("signal"));
}

#[test]
fn test_unconnected_dependency_rides_along_as_null() {
    let node = DependencyInput::new()
        .add_output(true)
        .apply(&stamp_node("A"))
        .unwrap();

    let row = node.call(kwargs(&[("value", json!(1))])).unwrap();
    assert_eq!(row[1], NodeValue::Null);
}

/// Simulates the engine running A -> B.depends_on -> C.depends_on by hand:
/// each node's passthrough output index feeds the next node's dependency
/// input, the way links would in a real graph.
#[test]
fn test_chained_dependencies_propagate_the_signal() {
    let decorate = |node: &NodeDefinition| {
        DependencyInput::new().add_output(true).apply(node).unwrap()
    };
    let b = decorate(&stamp_node("B"));
    let c = decorate(&stamp_node("C"));

    let signal = json!("from A");

    let b_row = b
        .call(kwargs(&[("value", json!(10)), ("depends_on", signal.clone())]))
        .unwrap();
    // B's real output is untouched by the decoration...
    assert_eq!(b_row[0], json!([10, "processed by B"]));
    // ...and its last output index carries the signal onward.
    let b_signal = b_row.last().unwrap().clone();
    assert_eq!(b_signal, signal);

    let c_row = c
        .call(kwargs(&[("value", json!(20)), ("depends_on", b_signal)]))
        .unwrap();
    assert_eq!(c_row[0], json!([20, "processed by C"]));
    assert_eq!(c_row[1], signal);
}

#[test]
fn test_stacked_passthroughs_append_in_application_order() {
    let node = DependencyInput::new()
        .input_name("d2")
        .add_output(true)
        .apply(
            &DependencyInput::new()
                .input_name("d1")
                .add_output(true)
                .apply(&stamp_node("A"))
                .unwrap(),
        )
        .unwrap();

    assert_eq!(
        node.return_names_list().unwrap(),
        ["output_0", "d1_out", "d2_out"]
    );

    let row = node
        .call(kwargs(&[
            ("value", json!(0)),
            ("d1", json!("one")),
            ("d2", json!("two")),
        ]))
        .unwrap();
    assert_eq!(row[1], json!("one"));
    assert_eq!(row[2], json!("two"));
}

/// The utility nodes cover the same chaining pattern without decoration.
#[test]
fn test_dependency_io_node_chains_like_add_output() {
    let io = nodes::dependency_io();
    let row = io
        .call(kwargs(&[
            ("value", json!("payload")),
            ("depends_on", json!("tick")),
        ]))
        .unwrap();
    assert_eq!(row, vec![json!("payload"), json!("tick")]);

    // Decorating a utility node stacks on top of its native sockets.
    let io = DependencyInput::new()
        .input_name("also_after")
        .apply(&io)
        .unwrap();
    let schema = io.parsed_schema().unwrap();
    assert_eq!(schema.lookup("depends_on"), Some(InputKind::Optional));
    assert_eq!(schema.lookup("also_after"), Some(InputKind::Optional));
}

#[test]
fn test_signal_source_feeds_a_barrier() {
    let signal = nodes::dependency_signal();
    let barrier = nodes::dependency_barrier();

    let tick = signal
        .call(kwargs(&[
            ("signal_type", json!("counter")),
            ("counter_value", json!(3)),
        ]))
        .unwrap()
        .remove(0);

    let row = barrier
        .call(kwargs(&[("value", json!("go")), ("dep1", tick)]))
        .unwrap();
    assert_eq!(row, vec![json!("go")]);
}
