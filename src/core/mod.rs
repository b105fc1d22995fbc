pub mod decorate;
pub mod error;
pub mod node;
pub mod rewrite;
pub mod schema;
pub mod signature;

/// The alias for serde_json::Value since everything the engine moves around is JSON
pub type NodeValue = serde_json::Value;

/// The keyword-argument map the engine hands to a node's entry point.
///
/// Keys are input names. Extra keys the original callable understands pass
/// through untouched; only the names recorded as strip specs ever get removed.
pub type Kwargs = std::collections::HashMap<String, NodeValue>;
