//! Declared parameter descriptors for entry-point callables.
//!
//! The engine's validation layer walks a callable's parameters to decide
//! what may be bound from graph links, so a callable carries an explicit
//! [`Signature`] instead of relying on any runtime reflection. Injected
//! dependency parameters are appended here so that validation sees them as
//! if they were native to the function.

use serde::{Deserialize, Serialize};

use super::NodeValue;
use super::rewrite::NodeCallable;

/// How a parameter may be bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    Positional,
    KeywordOnly,
}

/// One declared parameter of an entry-point callable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamKind,
    /// `None` means the parameter must be bound; the engine's validator is
    /// the one that enforces that, not this crate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<NodeValue>,
}

impl ParamSpec {
    pub fn positional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Positional,
            default: None,
        }
    }

    pub fn keyword_only(name: impl Into<String>, default: Option<NodeValue>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::KeywordOnly,
            default,
        }
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// The declared parameter list of a callable, in binding order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    pub params: Vec<ParamSpec>,
    /// True for catch-all callables that accept arbitrary extra keyword
    /// arguments beyond the declared ones.
    #[serde(default)]
    pub accepts_extra_kwargs: bool,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a positional parameter.
    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.params.push(ParamSpec::positional(name));
        self
    }

    /// Add a keyword-only parameter.
    pub fn keyword_only(mut self, name: impl Into<String>, default: Option<NodeValue>) -> Self {
        self.params.push(ParamSpec::keyword_only(name, default));
        self
    }

    /// Mark the callable as accepting arbitrary extra keyword arguments.
    pub fn extra_kwargs(mut self) -> Self {
        self.accepts_extra_kwargs = true;
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }
}

/// Appends the injected parameter to the callable's declared signature.
///
/// The new parameter is keyword-only and lands last, with a null default
/// when optional and no default when required, matching what the augmented
/// schema already told the engine.
///
/// A callable without a declared signature cannot be republished; that is a
/// degraded state, not an error. Stripping still works at call time, only
/// the engine's signature-driven validation loses precision, so we warn and
/// move on.
pub fn republish(callable: &mut NodeCallable, input_name: &str, required: bool) {
    match callable.signature.as_mut() {
        Some(sig) => {
            let default = if required { None } else { Some(NodeValue::Null) };
            sig.params.push(ParamSpec::keyword_only(input_name, default));
        }
        None => {
            log::warn!(
                "cannot republish parameter `{input_name}`: callable has no declared signature; \
                 stripping still applies but engine-side validation will be less precise"
            );
        }
    }
}
