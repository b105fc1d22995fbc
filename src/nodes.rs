//! Ready-made utility nodes for building dependency chains from the graph
//! editor, without decorating anything.
//!
//! These declare their dependency sockets natively instead of going through
//! [`DependencyInput`](crate::DependencyInput): they exist so a workflow
//! author can drop an ordering constraint between two third-party nodes
//! whose definitions they cannot touch.

use std::collections::HashMap;

use serde_json::json;

use crate::core::node::NodeDefinition;
use crate::core::rewrite::NodeCallable;
use crate::core::schema::{InputSchema, InputSlot, TypeTag};
use crate::core::signature::Signature;
use crate::core::{Kwargs, NodeValue};

/// Forwards `value` unchanged; the optional `depends_on` socket only exists
/// to pull an upstream node ahead of whatever consumes `value`.
pub fn pass_through() -> NodeDefinition {
    NodeDefinition::new("AddDependencyInput")
        .category("utils/dependencies")
        .input_schema(
            InputSchema::new()
                .required("value", InputSlot::wildcard())
                .optional("depends_on", InputSlot::wildcard()),
        )
        .returns([TypeTag::Any])
        .return_names(["value"])
        .entry_point(
            "passthrough",
            NodeCallable::with_signature(
                |mut kwargs: Kwargs| {
                    let value = kwargs.remove("value").unwrap_or(NodeValue::Null);
                    Ok(vec![value])
                },
                Signature::new()
                    .param("value")
                    .keyword_only("depends_on", Some(NodeValue::Null)),
            ),
        )
}

/// Like [`pass_through`], but also re-emits the dependency signal so chains
/// can continue: value out on index 0, signal out on index 1.
pub fn dependency_io() -> NodeDefinition {
    NodeDefinition::new("AddDependencyIO")
        .category("utils/dependencies")
        .input_schema(
            InputSchema::new()
                .required("value", InputSlot::wildcard())
                .optional("depends_on", InputSlot::wildcard()),
        )
        .returns([TypeTag::Any, TypeTag::Any])
        .return_names(["value", "signal_out"])
        .entry_point(
            "passthrough_with_signal",
            NodeCallable::with_signature(
                |mut kwargs: Kwargs| {
                    let value = kwargs.remove("value").unwrap_or(NodeValue::Null);
                    let signal = kwargs.remove("depends_on").unwrap_or(NodeValue::Null);
                    Ok(vec![value, signal])
                },
                Signature::new()
                    .param("value")
                    .keyword_only("depends_on", Some(NodeValue::Null)),
            ),
        )
}

/// A synchronization barrier: `value` only moves on once every connected
/// `dep*` upstream has completed. Five sockets is the original's arbitrary
/// but serviceable limit.
pub fn dependency_barrier() -> NodeDefinition {
    let mut schema = InputSchema::new().required("value", InputSlot::wildcard());
    let mut signature = Signature::new().param("value");
    for i in 1..=5 {
        schema = schema.optional(format!("dep{i}"), InputSlot::wildcard());
        signature = signature.keyword_only(format!("dep{i}"), Some(NodeValue::Null));
    }

    NodeDefinition::new("DependencyBarrier")
        .category("utils/dependencies")
        .input_schema(schema)
        .returns([TypeTag::Any])
        .return_names(["value"])
        .entry_point(
            "barrier",
            NodeCallable::with_signature(
                |mut kwargs: Kwargs| {
                    let value = kwargs.remove("value").unwrap_or(NodeValue::Null);
                    Ok(vec![value])
                },
                signature,
            ),
        )
}

/// Emits a signal value for feeding dependency sockets: nothing (ordering
/// only), a counter, or a message for debugging runs.
pub fn dependency_signal() -> NodeDefinition {
    NodeDefinition::new("DependencySignal")
        .category("utils/dependencies")
        .input_schema(
            InputSchema::new()
                .required(
                    "signal_type",
                    InputSlot::new(TypeTag::String).option("default", json!("empty")),
                )
                .optional(
                    "counter_value",
                    InputSlot::new(TypeTag::Int)
                        .option("default", json!(0))
                        .option("min", json!(0))
                        .option("max", json!(999_999)),
                )
                .optional(
                    "message",
                    InputSlot::new(TypeTag::String).option("default", json!("signal")),
                ),
        )
        .returns([TypeTag::Any])
        .return_names(["signal"])
        .entry_point(
            "generate_signal",
            NodeCallable::with_signature(
                |mut kwargs: Kwargs| {
                    let signal_type = kwargs
                        .remove("signal_type")
                        .and_then(|v| v.as_str().map(str::to_owned))
                        .unwrap_or_else(|| "empty".to_string());
                    let signal = match signal_type.as_str() {
                        "counter" => kwargs.remove("counter_value").unwrap_or(json!(0)),
                        "message" => kwargs.remove("message").unwrap_or(json!("signal")),
                        _ => NodeValue::Null,
                    };
                    Ok(vec![signal])
                },
                Signature::new()
                    .param("signal_type")
                    .keyword_only("counter_value", Some(json!(0)))
                    .keyword_only("message", Some(json!("signal"))),
            ),
        )
}

/// The registry entries for all utility nodes, keyed by node class name.
pub fn node_mappings() -> HashMap<String, NodeDefinition> {
    [
        pass_through(),
        dependency_io(),
        dependency_barrier(),
        dependency_signal(),
    ]
    .into_iter()
    .map(|node| (node.name().to_string(), node))
    .collect()
}

/// Human-readable display names, keyed like [`node_mappings`].
pub fn display_name_mappings() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("AddDependencyInput", "Add Dependency Input"),
        ("AddDependencyIO", "Add Dependency I/O"),
        ("DependencyBarrier", "Dependency Barrier"),
        ("DependencySignal", "Dependency Signal"),
    ])
}
