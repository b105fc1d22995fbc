//! Rewriting entry-point callables so injected inputs never reach node logic.
//!
//! Stacked decorations are modeled as one composed wrapper holding a list of
//! strip specs, built once at decoration time, rather than nested wrapping
//! layers re-resolved per call. Each spec removes exactly one name from the
//! keyword arguments before the original callable runs.

use std::fmt;
use std::sync::Arc;

use super::error::ExecResult;
use super::signature::Signature;
use super::{Kwargs, NodeValue};

/// The function the engine invokes to run a node's real logic.
pub type EntryPoint = Arc<dyn Fn(Kwargs) -> ExecResult + Send + Sync>;

/// One injected parameter to remove before delegating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripSpec {
    pub name: String,
    /// Forward the stripped value as an extra output row entry, for
    /// dependency chaining.
    pub passthrough: bool,
}

/// An entry-point callable plus everything decoration has attached to it.
///
/// The original callable is captured once and never mutated; strip specs
/// accumulate in application order. Immutable after construction, so the
/// engine may invoke it concurrently from as many workers as it likes
/// (assuming the original callable tolerates that).
#[derive(Clone)]
pub struct NodeCallable {
    inner: EntryPoint,
    strips: Vec<StripSpec>,
    pub(crate) signature: Option<Signature>,
}

impl NodeCallable {
    /// A callable with no declared signature. Stripping works, but the
    /// engine's signature-driven validation won't see injected parameters.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Kwargs) -> ExecResult + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(f),
            strips: Vec::new(),
            signature: None,
        }
    }

    /// A callable with a declared parameter list, the normal case.
    pub fn with_signature<F>(f: F, signature: Signature) -> Self
    where
        F: Fn(Kwargs) -> ExecResult + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(f),
            strips: Vec::new(),
            signature: Some(signature),
        }
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    pub fn strips(&self) -> &[StripSpec] {
        &self.strips
    }

    pub fn strip_names(&self) -> impl Iterator<Item = &str> {
        self.strips.iter().map(|s| s.name.as_str())
    }

    /// Invoke the callable the way the engine does.
    ///
    /// Every strip name is removed from the keyword arguments first,
    /// whatever value arrived under it (absent keys are fine, that is the
    /// unconnected-optional case). The original then runs with everything
    /// else unchanged and its result or error comes back unmodified, except
    /// that passthrough specs append their stripped value to the row.
    pub fn call(&self, mut kwargs: Kwargs) -> ExecResult {
        let mut carried = Vec::new();
        for spec in &self.strips {
            let value = kwargs.remove(&spec.name);
            if spec.passthrough {
                carried.push(value.unwrap_or(NodeValue::Null));
            }
        }
        let mut row = (self.inner)(kwargs)?;
        row.extend(carried);
        Ok(row)
    }
}

impl fmt::Debug for NodeCallable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeCallable")
            .field("strips", &self.strips)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// Returns a callable that strips one more name before delegating.
///
/// The input is untouched, so an engine already holding the undecorated
/// callable keeps its original behavior. Works the same whether `callable`
/// is pristine or already carries strips from earlier decorations.
pub fn rewrite(callable: &NodeCallable, input_name: &str, passthrough: bool) -> NodeCallable {
    let mut rewritten = callable.clone();
    rewritten.strips.push(StripSpec {
        name: input_name.to_string(),
        passthrough,
    });
    rewritten
}
