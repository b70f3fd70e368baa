//! Command-line front end for the tidal template engine.
//!
//! ```text
//! tidal --template 'hello {{ name | upcase }}' --vars '{"name": "ada"}'
//! tidal --file page.liquid --vars '{"title": "Tides"}'
//! cat page.liquid | tidal --file -
//! ```
//!
//! The template comes from `--template`, a file, or stdin (`--file -`);
//! variable bindings come from a JSON object. The built-in filters are
//! installed for every render. Exit status: 2 for a bad invocation,
//! 1 for a template that fails to lex or parse.

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tidal_engine::Template;
use tidal_eval::{builtins, Bindings, Context, Filters};
use tidal_types::Value;

#[derive(Parser)]
#[command(name = "tidal", version, about = "Render a tidal template")]
struct Cli {
    /// Template source text.
    #[arg(long, conflicts_with = "file")]
    template: Option<String>,

    /// Read the template from a file (`-` for stdin).
    #[arg(long)]
    file: Option<PathBuf>,

    /// Variable bindings as a JSON object.
    #[arg(long)]
    vars: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let bindings = match parse_bindings(cli.vars.as_deref()) {
        Ok(bindings) => bindings,
        Err(err) => {
            eprintln!("tidal: invalid --vars JSON: {err}");
            return ExitCode::from(2);
        }
    };

    let template = match load_template(&cli) {
        Ok(Some(template)) => template,
        Ok(None) => {
            eprintln!("tidal: provide --template or --file");
            return ExitCode::from(2);
        }
        Err(err) => {
            eprintln!("tidal: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut filters = Filters::new();
    builtins::install_into(&mut filters);
    let ctx = Context::new(bindings, filters);
    print!("{}", template.render(&ctx));
    ExitCode::SUCCESS
}

/// Parse the template from whichever source the invocation named.
fn load_template(cli: &Cli) -> Result<Option<Template>, LoadError> {
    if let Some(source) = &cli.template {
        return Ok(Some(Template::parse(source)?));
    }
    let Some(path) = &cli.file else {
        return Ok(None);
    };
    let template = if path.as_os_str() == "-" {
        Template::from_reader(io::stdin().lock())?
    } else {
        Template::from_reader(File::open(path)?)?
    };
    Ok(Some(template))
}

/// Deserialize a JSON object into variable bindings. Null, booleans,
/// numbers, and strings map directly; arrays and objects are carried as
/// opaque display values.
fn parse_bindings(vars: Option<&str>) -> Result<Bindings, serde_json::Error> {
    let Some(text) = vars else {
        return Ok(Bindings::new());
    };
    let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(text)?;
    Ok(map
        .iter()
        .map(|(name, value)| (name.clone(), Value::from(value)))
        .collect())
}

#[derive(Debug, thiserror::Error)]
enum LoadError {
    #[error(transparent)]
    Engine(#[from] tidal_engine::Error),
    #[error("cannot read template: {0}")]
    Io(#[from] io::Error),
}
