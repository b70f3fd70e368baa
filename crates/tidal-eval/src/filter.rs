//! The filter contract.

use std::collections::BTreeMap;

use tidal_types::Value;

/// Named arguments passed to a filter. The core grammar produces none;
/// the map is part of the contract for callers that invoke filters
/// directly.
pub type NamedArgs = BTreeMap<String, Value>;

/// A named post-processing function applied to a value with `|`.
///
/// Filters are pure: they read their input and arguments and return a
/// new value. The engine ships no required filters — callers register
/// whatever set a render needs.
pub trait Filter {
    fn apply(&self, input: Value, args: &[Value], named: &NamedArgs) -> Value;
}

/// Any matching closure or function is a filter.
impl<F> Filter for F
where
    F: Fn(Value, &[Value], &NamedArgs) -> Value,
{
    fn apply(&self, input: Value, args: &[Value], named: &NamedArgs) -> Value {
        self(input, args, named)
    }
}
