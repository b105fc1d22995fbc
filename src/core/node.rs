//! Node definitions: the immutable description the engine registers.
//!
//! A node definition carries its schema provider, its declared outputs and
//! the name of the callable the engine invokes at run time. The entry-point
//! name is a convention borrowed from the host engine: the definition may
//! register several named callables, and the one the entry-point name
//! resolves to is the one that runs.

use std::collections::HashMap;
use std::fmt;

use super::error::{ConfigError, ExecResult};
use super::rewrite::NodeCallable;
use super::schema::{InputSchema, SchemaProvider, TypeTag, provider_of};
use super::{Kwargs, NodeValue};

/// The entry-point name used when a node does not declare one.
pub const DEFAULT_ENTRY_POINT: &str = "execute";

/// A unit of computation in the dataflow graph, as declared to the engine.
///
/// Cloneable by design: providers and callables sit behind `Arc`, so
/// decoration can be a pure value-in/value-out function that leaves the
/// input definition untouched when it fails.
#[derive(Clone)]
pub struct NodeDefinition {
    pub(crate) name: String,
    pub(crate) category: Option<String>,
    pub(crate) schema_provider: SchemaProvider,
    pub(crate) return_types: Vec<TypeTag>,
    pub(crate) return_names: Option<Vec<String>>,
    pub(crate) entry_point: String,
    pub(crate) callables: HashMap<String, NodeCallable>,
}

impl NodeDefinition {
    /// A definition with an empty schema, no outputs and the default
    /// entry-point name. Flesh it out with the builder methods.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: None,
            schema_provider: provider_of(InputSchema::new()),
            return_types: Vec::new(),
            return_names: None,
            entry_point: DEFAULT_ENTRY_POINT.to_string(),
            callables: HashMap::new(),
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Declare a fixed input schema.
    pub fn input_schema(mut self, schema: InputSchema) -> Self {
        self.schema_provider = provider_of(schema);
        self
    }

    /// Declare a custom schema provider, for nodes that compute their
    /// schema instead of writing it down.
    pub fn schema_provider<F>(mut self, provider: F) -> Self
    where
        F: Fn() -> NodeValue + Send + Sync + 'static,
    {
        self.schema_provider = std::sync::Arc::new(provider);
        self
    }

    /// Declare the output types, in output-index order.
    pub fn returns(mut self, types: impl IntoIterator<Item = TypeTag>) -> Self {
        self.return_types = types.into_iter().collect();
        self
    }

    /// Declare display names for the outputs.
    pub fn return_names<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.return_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Register `callable` under `name` and designate it as the entry point.
    pub fn entry_point(mut self, name: impl Into<String>, callable: NodeCallable) -> Self {
        let name = name.into();
        self.entry_point = name.clone();
        self.callables.insert(name, callable);
        self
    }

    /// Register an additional named callable without designating it.
    pub fn callable(mut self, name: impl Into<String>, callable: NodeCallable) -> Self {
        self.callables.insert(name.into(), callable);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category_name(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn entry_point_name(&self) -> &str {
        &self.entry_point
    }

    pub fn return_types(&self) -> &[TypeTag] {
        &self.return_types
    }

    pub fn return_names_list(&self) -> Option<&[String]> {
        self.return_names.as_deref()
    }

    /// The engine-facing schema, as the provider reports it right now.
    pub fn schema(&self) -> NodeValue {
        (self.schema_provider)()
    }

    /// The typed view of the schema, or the serde error if the provider
    /// does not honor the mapping-of-mappings contract.
    pub fn parsed_schema(&self) -> Result<InputSchema, serde_json::Error> {
        InputSchema::from_value(&self.schema())
    }

    /// The callable the entry-point name resolves to, if present.
    pub fn entry_point_callable(&self) -> Option<&NodeCallable> {
        self.callables.get(&self.entry_point)
    }

    pub(crate) fn require_entry_point(&self) -> Result<&NodeCallable, ConfigError> {
        self.entry_point_callable()
            .ok_or_else(|| ConfigError::MissingEntryPoint {
                node: self.name.clone(),
                entry_point: self.entry_point.clone(),
            })
    }

    /// Invoke the entry point the way the engine does at execution time.
    pub fn call(&self, kwargs: Kwargs) -> ExecResult {
        let callable = self.require_entry_point()?;
        callable.call(kwargs)
    }

    /// Append a wildcard output, synthesizing `output_i` placeholders when
    /// the node never declared names for its existing outputs.
    pub(crate) fn push_output(&mut self, name: String) {
        self.return_types.push(TypeTag::Any);
        match &mut self.return_names {
            Some(names) => names.push(name),
            None => {
                let mut names: Vec<String> = (0..self.return_types.len() - 1)
                    .map(|i| format!("output_{i}"))
                    .collect();
                names.push(name);
                self.return_names = Some(names);
            }
        }
    }
}

impl fmt::Debug for NodeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut callables: Vec<&str> = self.callables.keys().map(String::as_str).collect();
        callables.sort_unstable();
        f.debug_struct("NodeDefinition")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("entry_point", &self.entry_point)
            .field("return_types", &self.return_types)
            .field("return_names", &self.return_names)
            .field("callables", &callables)
            .finish_non_exhaustive()
    }
}
