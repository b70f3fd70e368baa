//! tidal tree-walking renderer.
//!
//! Walks a parsed template tree against an explicit [`Context`] —
//! variable bindings plus a filter registry, both supplied fresh per
//! render — and produces the output string. Evaluation is infallible:
//! absent variables read as nil and unknown filter names pass their
//! input through unchanged.

pub mod builtins;
mod context;
mod evaluator;
mod filter;

pub use context::{Bindings, Context, Filters};
pub use evaluator::{evaluate, render, render_node};
pub use filter::{Filter, NamedArgs};
