//! Tree-walking renderer.
//!
//! Walks parsed nodes against an explicit [`Context`] — there is no
//! hidden frame or global registry. Rendering is purely recursive and
//! keeps no per-node state, which is what makes a parsed tree safe to
//! render concurrently from several threads.

use tidal_types::ast::{FilterSpec, Node, Root};
use tidal_types::Value;

use crate::context::Context;
use crate::filter::NamedArgs;

/// Render a parsed template against a context.
pub fn render(root: &Root, ctx: &Context) -> String {
    root.nodes.iter().map(|node| render_node(node, ctx)).collect()
}

/// Render a single node to its text form.
pub fn render_node(node: &Node, ctx: &Context) -> String {
    match node {
        Node::Text(content) => content.clone(),
        Node::Object(child) => evaluate(child, ctx).to_string(),
        Node::If { condition, body } => {
            // The condition variable is looked up unfiltered.
            if ctx.variable(condition).is_truthy() {
                body.iter().map(|node| render_node(node, ctx)).collect()
            } else {
                String::new()
            }
        }
        other => evaluate(other, ctx).to_string(),
    }
}

/// Evaluate a node to a value.
pub fn evaluate(node: &Node, ctx: &Context) -> Value {
    match node {
        Node::Text(content) => Value::Str(content.clone()),
        Node::StringLit(s) => Value::Str(s.clone()),
        Node::NumberLit(n) => Value::Number(*n),
        Node::BoolLit(b) => Value::Bool(*b),
        Node::NilLit => Value::Nil,
        Node::Variable { name, filters } => {
            let mut value = ctx.variable(name);
            for spec in filters {
                value = apply_filter(value, spec, ctx);
            }
            value
        }
        Node::Object(child) => evaluate(child, ctx),
        Node::If { .. } => Value::Str(render_node(node, ctx)),
    }
}

/// Apply one filter of a chain. Arguments are evaluated against the same
/// context at call time; an unknown filter name passes the value through
/// unchanged.
fn apply_filter(input: Value, spec: &FilterSpec, ctx: &Context) -> Value {
    let args: Vec<Value> = spec.args.iter().map(|arg| evaluate(arg, ctx)).collect();
    match ctx.filters.get(&spec.name) {
        Some(filter) => filter.apply(input, &args, &NamedArgs::new()),
        None => input,
    }
}
