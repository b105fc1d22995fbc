//! Input schemas as the engine sees them.
//!
//! The engine scans a node's declared inputs to decide which sockets exist
//! and which links are legal, so this module speaks the engine's wire shape:
//! a mapping of category (`required`/`optional`) to input name to a
//! `[type_tag, options]` pair. [`InputSchema`] is the typed view used for
//! validation; providers themselves return raw [`NodeValue`] so that a node
//! can build its schema however it likes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, json};
use std::fmt;
use std::sync::Arc;

use super::NodeValue;

/// A type tag on an input or output slot.
///
/// [`TypeTag::Any`] is the wildcard: the engine treats it as connectable
/// from any output without a value-compatibility check, which is exactly
/// what a value-ignoring dependency input needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TypeTag {
    Any,
    Float,
    Int,
    String,
    Boolean,
    Other(String),
}

impl From<String> for TypeTag {
    fn from(s: String) -> Self {
        match s.as_str() {
            "*" => TypeTag::Any,
            "FLOAT" => TypeTag::Float,
            "INT" => TypeTag::Int,
            "STRING" => TypeTag::String,
            "BOOLEAN" => TypeTag::Boolean,
            _ => TypeTag::Other(s),
        }
    }
}

impl From<TypeTag> for String {
    fn from(tag: TypeTag) -> Self {
        match tag {
            TypeTag::Any => "*".to_string(),
            TypeTag::Float => "FLOAT".to_string(),
            TypeTag::Int => "INT".to_string(),
            TypeTag::String => "STRING".to_string(),
            TypeTag::Boolean => "BOOLEAN".to_string(),
            TypeTag::Other(s) => s,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from(self.clone()))
    }
}

/// Which category of the schema an input lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Required,
    Optional,
}

impl InputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Required => "required",
            InputKind::Optional => "optional",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declared input: a type tag plus its options object.
///
/// Serializes to the engine's `["FLOAT", {"default": 1.0}]` pair; the
/// options object may be omitted on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputSlot(pub TypeTag, pub Map<String, NodeValue>);

impl<'de> Deserialize<'de> for InputSlot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SlotVisitor;

        impl<'de> serde::de::Visitor<'de> for SlotVisitor {
            type Value = InputSlot;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a [type_tag, options] pair")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<InputSlot, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let tag: TypeTag = seq
                    .next_element()?
                    .ok_or_else(|| serde::de::Error::invalid_length(0, &self))?;
                let options: Map<String, NodeValue> = seq.next_element()?.unwrap_or_default();
                Ok(InputSlot(tag, options))
            }
        }

        deserializer.deserialize_seq(SlotVisitor)
    }
}

impl InputSlot {
    pub fn new(tag: TypeTag) -> Self {
        InputSlot(tag, Map::new())
    }

    /// The slot injected for every dependency input: wildcard type, no options.
    pub fn wildcard() -> Self {
        Self::new(TypeTag::Any)
    }

    /// Add an option such as `default`, `min` or `max`.
    pub fn option(mut self, key: impl Into<String>, value: NodeValue) -> Self {
        self.1.insert(key.into(), value);
        self
    }

    pub fn type_tag(&self) -> &TypeTag {
        &self.0
    }

    pub fn options(&self) -> &Map<String, NodeValue> {
        &self.1
    }
}

/// A node's declared input schema, split into required and optional inputs.
///
/// Categories are insertion-ordered: the engine's UI layer turns them into
/// sockets in declaration order, and injected inputs must land last.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSchema {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub required: IndexMap<String, InputSlot>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub optional: IndexMap<String, InputSlot>,
}

impl InputSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required input.
    pub fn required(mut self, name: impl Into<String>, slot: InputSlot) -> Self {
        self.required.insert(name.into(), slot);
        self
    }

    /// Add an optional input.
    pub fn optional(mut self, name: impl Into<String>, slot: InputSlot) -> Self {
        self.optional.insert(name.into(), slot);
        self
    }

    pub fn category(&self, kind: InputKind) -> &IndexMap<String, InputSlot> {
        match kind {
            InputKind::Required => &self.required,
            InputKind::Optional => &self.optional,
        }
    }

    /// Which category `name` lives in, if any.
    pub fn lookup(&self, name: &str) -> Option<InputKind> {
        if self.required.contains_key(name) {
            Some(InputKind::Required)
        } else if self.optional.contains_key(name) {
            Some(InputKind::Optional)
        } else {
            None
        }
    }

    /// Total number of declared inputs across both categories.
    pub fn len(&self) -> usize {
        self.required.len() + self.optional.len()
    }

    pub fn is_empty(&self) -> bool {
        self.required.is_empty() && self.optional.is_empty()
    }

    pub fn from_value(value: &NodeValue) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value.clone())
    }

    pub fn to_value(&self) -> NodeValue {
        serde_json::to_value(self).expect("an input schema always serializes to JSON")
    }
}

/// Produces the engine-facing schema for a node, on demand.
///
/// Providers return the raw wire shape rather than an [`InputSchema`] so the
/// augmenter can stack without re-validating on every call; shape validation
/// happens once, at decoration time.
pub type SchemaProvider = Arc<dyn Fn() -> NodeValue + Send + Sync>;

/// A provider that always returns the given schema.
pub fn provider_of(schema: InputSchema) -> SchemaProvider {
    Arc::new(move || schema.to_value())
}

/// Wraps `provider` so it also reports a wildcard input named `input_name`.
///
/// The original provider is captured, never mutated, so layers stack: each
/// decoration wraps the provider it found, and the categories it creates
/// along the way (`setdefault` style) are visible to the next layer.
/// Collision and shape checking belong to the coordinator, which runs the
/// unwrapped provider once before committing to anything.
pub fn augment(provider: SchemaProvider, input_name: &str, required: bool) -> SchemaProvider {
    let name = input_name.to_string();
    let kind = if required {
        InputKind::Required
    } else {
        InputKind::Optional
    };
    Arc::new(move || {
        let mut schema = provider();
        if let Some(root) = schema.as_object_mut() {
            let category = root
                .entry(kind.as_str())
                .or_insert_with(|| NodeValue::Object(Map::new()));
            if let Some(slots) = category.as_object_mut() {
                slots.insert(name.clone(), json!(["*", {}]));
            }
        }
        schema
    })
}
