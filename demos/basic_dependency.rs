//! A complete example showing how to give nodes synthetic ordering edges.
//!
//! This example demonstrates:
//! - Defining a node the way the host engine sees it
//! - Decorating it with a `depends_on` input
//! - Inspecting the augmented schema and republished signature
//! - Calling the rewritten entry point the way the engine would
//! - Chaining ordering constraints with a passthrough output

use serde_json::json;
use std::collections::HashMap;
use tether::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // ========================================================================
    // Step 1: A plain node, one FLOAT input, doubles it
    // ========================================================================

    let double = NodeDefinition::new("Double")
        .category("math")
        .input_schema(InputSchema::new().required(
            "value",
            InputSlot::new(TypeTag::Float).option("default", json!(1.0)),
        ))
        .returns([TypeTag::Float])
        .entry_point(
            "process",
            NodeCallable::with_signature(
                |kwargs: Kwargs| {
                    let value = kwargs.get("value").and_then(|v| v.as_f64()).unwrap_or(0.0);
                    Ok(vec![json!(value * 2.0)])
                },
                Signature::new().param("value"),
            ),
        );

    // ========================================================================
    // Step 2: Decorate it
    // ========================================================================

    let double = depends_on(&double)?;

    println!("[schema] {}", double.schema());
    let signature = double
        .entry_point_callable()
        .and_then(|c| c.signature())
        .expect("the entry point declared a signature");
    println!(
        "[signature] {:?}",
        signature.names().collect::<Vec<_>>()
    );

    // ========================================================================
    // Step 3: Call it the way the engine would
    // ========================================================================

    // The upstream node's value arrives on `depends_on` and is discarded.
    let row = double.call(HashMap::from([
        ("value".to_string(), json!(3.0)),
        ("depends_on".to_string(), json!({"rendered": "image"})),
    ]))?;
    println!("[result] {row:?}");
    assert_eq!(row, vec![json!(6.0)]);

    // ========================================================================
    // Step 4: Chain ordering constraints with a passthrough output
    // ========================================================================

    let chainable = DependencyInput::new()
        .input_name("after")
        .output_name("after_out")
        .apply(&NodeDefinition::new("Stamp")
            .input_schema(InputSchema::new().required("value", InputSlot::wildcard()))
            .returns([TypeTag::Any])
            .return_names(["value"])
            .entry_point(
                "process",
                NodeCallable::with_signature(
                    |kwargs: Kwargs| {
                        Ok(vec![kwargs.get("value").cloned().unwrap_or(NodeValue::Null)])
                    },
                    Signature::new().param("value"),
                ),
            ))?;

    let row = chainable.call(HashMap::from([
        ("value".to_string(), json!("payload")),
        ("after".to_string(), json!("tick")),
    ]))?;
    // The signal rides along on the last output, ready for the next node.
    println!(
        "[chain] outputs {:?} as {:?}",
        chainable.return_names_list().unwrap_or_default(),
        row
    );

    Ok(())
}
