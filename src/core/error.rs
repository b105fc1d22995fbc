use thiserror::Error;

use super::NodeValue;
use super::schema::InputKind;

/// Whatever a node's own logic decides to fail with. This crate never
/// constructs one of these outside of tests; it only forwards them.
pub type NodeError = Box<dyn std::error::Error + Send + Sync>;

/// One result row per declared output, or the node logic's own error.
pub type ExecResult = Result<Vec<NodeValue>, NodeError>;

/// Errors raised while decorating a node definition.
///
/// All of these are configuration errors: they fire at decoration time
/// (effectively at load time), never during graph execution, and they abort
/// the decoration before anything on the node has been touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The node's declared entry-point name does not resolve to a callable.
    #[error("node `{node}` has no callable named `{entry_point}` to use as entry point")]
    MissingEntryPoint { node: String, entry_point: String },

    /// The requested input name is already taken, either by a native input
    /// or by an earlier decoration. Shadowing it silently would be ambiguous.
    #[error("input `{input}` already exists in the {category} inputs of node `{node}`")]
    InputCollision {
        node: String,
        input: String,
        category: InputKind,
    },

    /// The schema provider did not return the engine's mapping-of-mappings shape.
    #[error("schema provider of node `{node}` returned a malformed schema: {source}")]
    MalformedSchema {
        node: String,
        #[source]
        source: serde_json::Error,
    },
}
