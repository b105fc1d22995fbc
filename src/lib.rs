//! # Tether
//!
//! Synthetic ordering edges for dataflow-graph nodes: give any node an
//! extra, value-ignoring dependency input so the graph's scheduler runs an
//! upstream node first, without touching the node's real data contract.
//!
//! ## Features
//!
//! - **Value-blind stripping**: whatever arrives on the injected input is
//!   discarded before the node's own logic runs
//! - **Honest introspection**: the injected input shows up in the node's
//!   declared schema and parameter signature, so the engine's validation
//!   sees it as native
//! - **Stacks cleanly**: decorate twice with different names and you get
//!   two independent ordering edges
//! - **Passthrough chaining**: opt-in extra output that re-emits the
//!   dependency value for the next node in the chain
//!
//! ## Quick Start
//!
//! ```rust
//! use tether::prelude::*;
//! use serde_json::json;
//! use std::collections::HashMap;
//!
//! // A node that doubles its input.
//! let double = NodeDefinition::new("Double")
//!     .input_schema(InputSchema::new().required("value", InputSlot::new(TypeTag::Float)))
//!     .returns([TypeTag::Float])
//!     .entry_point(
//!         "process",
//!         NodeCallable::with_signature(
//!             |kwargs: Kwargs| {
//!                 let value = kwargs.get("value").and_then(|v| v.as_f64()).unwrap_or(0.0);
//!                 Ok(vec![json!(value * 2.0)])
//!             },
//!             Signature::new().param("value"),
//!         ),
//!     );
//!
//! // One extra optional `depends_on` input, stripped before `process` runs.
//! let double = depends_on(&double).unwrap();
//!
//! let row = double
//!     .call(HashMap::from([
//!         ("value".to_string(), json!(3.0)),
//!         ("depends_on".to_string(), json!("whatever the upstream node made")),
//!     ]))
//!     .unwrap();
//! assert_eq!(row, vec![json!(6.0)]);
//! ```
//!
//! ## Module Organization
//!
//! - [`nodes`]: ready-made utility nodes (barrier, signal, passthrough)
//! - [`prelude`]: commonly used types and functions (import with `use tether::prelude::*`)
//!
//! Scheduling itself stays with the host engine: this crate only reshapes
//! what a node declares and how its entry point is called.

// ============================================================================
// Core Module
// ============================================================================

mod core;

pub mod nodes;

// ============================================================================
// Public Re-exports - Granular Imports
// ============================================================================

// Value and call conventions
pub use self::core::{Kwargs, NodeValue};

// Schema model
pub use self::core::schema::{
    InputKind, InputSchema, InputSlot, SchemaProvider, TypeTag, augment, provider_of,
};

// Callable rewriting and signatures
pub use self::core::rewrite::{EntryPoint, NodeCallable, StripSpec, rewrite};
pub use self::core::signature::{ParamKind, ParamSpec, Signature, republish};

// Node definitions and decoration
pub use self::core::decorate::{DEFAULT_INPUT_NAME, DependencyInput, depends_on, wrap_node_mappings};
pub use self::core::error::{ConfigError, ExecResult, NodeError};
pub use self::core::node::{DEFAULT_ENTRY_POINT, NodeDefinition};

// ============================================================================
// Prelude Module - Convenient Bulk Imports
// ============================================================================

/// The prelude: imports everything you need to define and decorate nodes.
///
/// # Example
/// ```rust
/// use tether::prelude::*;
/// ```
pub mod prelude {
    pub use super::{
        ConfigError,
        DependencyInput,
        ExecResult,
        InputKind,
        InputSchema,
        InputSlot,
        Kwargs,
        NodeCallable,
        NodeDefinition,
        NodeError,
        NodeValue,
        ParamKind,
        ParamSpec,
        SchemaProvider,
        Signature,
        StripSpec,
        TypeTag,
        depends_on,
        wrap_node_mappings,
    };
}

// ============================================================================
// Re-export commonly used external types for convenience
// ============================================================================

pub use serde_json::Value as JsonValue;
pub use std::collections::HashMap;

// ============================================================================
// Library Metadata
// ============================================================================

/// The version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of this crate.
pub const NAME: &str = env!("CARGO_PKG_NAME");
