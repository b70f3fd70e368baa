//! Per-render evaluation context.

use std::collections::BTreeMap;

use tidal_types::Value;

use crate::filter::Filter;

/// Variable bindings by name.
pub type Bindings = BTreeMap<String, Value>;

/// Filter registry by name.
pub type Filters = BTreeMap<String, Box<dyn Filter>>;

/// Everything a render reads: variable bindings plus the filter registry.
///
/// A context is supplied fresh per render call and never mutated by
/// evaluation, so renders of one parsed tree against separate contexts
/// may run concurrently.
#[derive(Default)]
pub struct Context {
    pub bindings: Bindings,
    pub filters: Filters,
}

impl Context {
    pub fn new(bindings: Bindings, filters: Filters) -> Self {
        Self { bindings, filters }
    }

    /// Look up a variable; absent names read as nil.
    pub fn variable(&self, name: &str) -> Value {
        self.bindings.get(name).cloned().unwrap_or(Value::Nil)
    }
}
