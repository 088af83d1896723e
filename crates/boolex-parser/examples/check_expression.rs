// Example: declare variables and parse an expression
//
// Usage:
//   cargo run --example check_expression -- width:integer user:string 'width > 5 and user = "me"'
//
// Every argument but the last is a `name:type` declaration. Set RUST_LOG=debug
// to see the registry and parser logs.

use anyhow::{bail, Context, Result};
use boolex_parser::{parse, Registry, VarType};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let Some(text) = args.pop() else {
        bail!("usage: check_expression [name:type ...] <expression>");
    };

    let mut registry = Registry::new();
    for decl in &args {
        let (name, ty) = decl
            .split_once(':')
            .with_context(|| format!("declaration {:?} is not name:type", decl))?;
        let var_type: VarType = ty.parse()?;
        registry.declare(name, var_type);
    }

    let expr = parse(&registry, &text)?;
    println!("{}", expr);

    for id in expr.variables() {
        if let Some(decl) = registry.declaration(id) {
            println!("  {} = {} ({})", id, decl.name, decl.var_type);
        }
    }

    Ok(())
}
