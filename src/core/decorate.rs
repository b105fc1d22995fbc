//! The decoration coordinator: one extra dependency input per application.
//!
//! [`DependencyInput`] is the parameterized entry point, [`depends_on`] the
//! no-argument convenience form. Both are pure over the node definition:
//! validation runs first against the undecorated node, and only then is a
//! decorated clone assembled, so a failed decoration leaves the original
//! exactly as it was. Applications stack; each one contributes one schema
//! entry, one strip spec and one republished parameter.

use std::collections::HashMap;

use log::info;

use super::error::ConfigError;
use super::node::NodeDefinition;
use super::rewrite::rewrite;
use super::schema::{InputSchema, augment};
use super::signature::republish;

/// The input name used when the caller does not choose one.
pub const DEFAULT_INPUT_NAME: &str = "depends_on";

/// Configuration for one synthetic dependency input.
///
/// Defaults mirror the convenience form: an optional input named
/// `depends_on`, no passthrough output. `required` inputs force the engine
/// to demand a connection, which breaks workflows built before the
/// decoration, so optional is the sane default.
#[derive(Debug, Clone)]
pub struct DependencyInput {
    input_name: String,
    required: bool,
    add_output: bool,
    output_name: Option<String>,
}

impl Default for DependencyInput {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyInput {
    pub fn new() -> Self {
        Self {
            input_name: DEFAULT_INPUT_NAME.to_string(),
            required: false,
            add_output: false,
            output_name: None,
        }
    }

    /// Use a different name for the injected input.
    pub fn input_name(mut self, name: impl Into<String>) -> Self {
        self.input_name = name.into();
        self
    }

    /// Put the injected input in the `required` category instead of
    /// `optional`.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Also add a wildcard passthrough output carrying the dependency
    /// value, so downstream nodes can chain on it. Named
    /// `{input_name}_out` unless [`output_name`](Self::output_name) says
    /// otherwise.
    pub fn add_output(mut self, add_output: bool) -> Self {
        self.add_output = add_output;
        self
    }

    /// Name the passthrough output. Implies [`add_output`](Self::add_output).
    pub fn output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = Some(name.into());
        self.add_output = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.input_name
    }

    fn resolved_output_name(&self) -> String {
        self.output_name
            .clone()
            .unwrap_or_else(|| format!("{}_out", self.input_name))
    }

    /// Decorate `node` with this dependency input.
    ///
    /// Checks, in order: the entry-point name resolves to a callable, the
    /// schema provider returns the mapping-of-mappings shape, and the
    /// chosen input name is free in both categories (a stacked decoration
    /// shows up in the schema like any native input, so the same check
    /// covers it). Everything after that is assembly on a clone.
    pub fn apply(&self, node: &NodeDefinition) -> Result<NodeDefinition, ConfigError> {
        let callable = node.require_entry_point()?;

        let schema =
            InputSchema::from_value(&node.schema()).map_err(|source| ConfigError::MalformedSchema {
                node: node.name().to_string(),
                source,
            })?;
        if let Some(category) = schema.lookup(&self.input_name) {
            return Err(ConfigError::InputCollision {
                node: node.name().to_string(),
                input: self.input_name.clone(),
                category,
            });
        }

        let mut rewritten = rewrite(callable, &self.input_name, self.add_output);
        republish(&mut rewritten, &self.input_name, self.required);

        let mut decorated = node.clone();
        decorated.schema_provider = augment(
            node.schema_provider.clone(),
            &self.input_name,
            self.required,
        );
        decorated
            .callables
            .insert(decorated.entry_point.clone(), rewritten);
        if self.add_output {
            decorated.push_output(self.resolved_output_name());
        }
        Ok(decorated)
    }
}

/// The convenience form: an optional `depends_on` input, nothing else.
pub fn depends_on(node: &NodeDefinition) -> Result<NodeDefinition, ConfigError> {
    DependencyInput::new().apply(node)
}

/// Applies configured dependency inputs to selected entries of a node
/// registry at load time.
///
/// Nodes absent from `to_wrap` pass through untouched. Any failed
/// decoration aborts the whole pass so a registry is never published in a
/// half-augmented state.
pub fn wrap_node_mappings(
    mappings: HashMap<String, NodeDefinition>,
    to_wrap: &HashMap<String, DependencyInput>,
) -> Result<HashMap<String, NodeDefinition>, ConfigError> {
    let mut wrapped = HashMap::with_capacity(mappings.len());
    for (name, node) in mappings {
        let node = match to_wrap.get(&name) {
            Some(dep) => {
                let decorated = dep.apply(&node)?;
                info!("wrapped node `{name}` with dependency input `{}`", dep.name());
                decorated
            }
            None => node,
        };
        wrapped.insert(name, node);
    }
    Ok(wrapped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_convenience_form() {
        let dep = DependencyInput::new();
        assert_eq!(dep.name(), "depends_on");
        assert!(!dep.required);
        assert!(!dep.add_output);
    }

    #[test]
    fn test_output_name_implies_add_output() {
        let dep = DependencyInput::new().output_name("signal");
        assert!(dep.add_output);
        assert_eq!(dep.resolved_output_name(), "signal");
    }

    #[test]
    fn test_default_output_name_derives_from_input_name() {
        let dep = DependencyInput::new().input_name("wait_for").add_output(true);
        assert_eq!(dep.resolved_output_name(), "wait_for_out");
    }
}
