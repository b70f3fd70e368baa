//! Built-in text filters.
//!
//! These are ordinary [`crate::Filter`] implementations; the evaluator
//! never assumes they are installed. The CLI registers them before each
//! render, and library callers can do the same or bring their own set.

use tidal_types::Value;

use crate::context::Filters;
use crate::filter::NamedArgs;

/// Register the built-in filters into a registry.
pub fn install_into(filters: &mut Filters) {
    filters.insert("upcase".into(), Box::new(upcase));
    filters.insert("downcase".into(), Box::new(downcase));
    filters.insert("append".into(), Box::new(append));
    filters.insert("capitalize".into(), Box::new(capitalize));
    filters.insert("replace".into(), Box::new(replace));
}

fn upcase(input: Value, _args: &[Value], _named: &NamedArgs) -> Value {
    Value::Str(input.to_string().to_uppercase())
}

fn downcase(input: Value, _args: &[Value], _named: &NamedArgs) -> Value {
    Value::Str(input.to_string().to_lowercase())
}

fn append(input: Value, args: &[Value], _named: &NamedArgs) -> Value {
    let suffix = args.first().map(|v| v.to_string()).unwrap_or_default();
    Value::Str(format!("{input}{suffix}"))
}

fn capitalize(input: Value, _args: &[Value], _named: &NamedArgs) -> Value {
    let text = input.to_string();
    let mut chars = text.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    Value::Str(capitalized)
}

fn replace(input: Value, args: &[Value], _named: &NamedArgs) -> Value {
    let from = args.first().map(|v| v.to_string()).unwrap_or_default();
    let to = args.get(1).map(|v| v.to_string()).unwrap_or_default();
    Value::Str(input.to_string().replace(&from, &to))
}
