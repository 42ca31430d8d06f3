//! `lookup` CLI: resolve dotted paths against JSON documents from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Resolve a path (stdin → stdout, pretty JSON)
//! echo '{"server":{"port":8080}}' | lookup get server.port
//!
//! # Fan out over a sequence: the rest of the path is applied to every element
//! lookup get cluster.services.name -i cluster.json
//!
//! # Select one element, write compact JSON to a file
//! lookup get 'cluster.services[0].ports' -i cluster.json -o ports.json --compact
//!
//! # Show how a path is split and parsed
//! lookup segments 'cluster.services[0].name'
//!
//! # Trace fan-out and merge decisions
//! RUST_LOG=lookup_core=trace lookup get cluster.services.ports -i cluster.json
//! ```

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use lookup_core::{IndexSyntax, LookupOptions, Path, Resolver, Segment, Value};
use serde_json::json;
use std::io::{self, Read};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "lookup",
    version,
    about = "Resolve dotted paths against JSON documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log lookup decisions to stderr (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a path and print the result as JSON
    Get {
        /// Path to resolve, e.g. `items[0].name` or `items.name`
        path: String,
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Print compact JSON instead of pretty-printed JSON
        #[arg(long)]
        compact: bool,
        #[command(flatten)]
        syntax: SyntaxArgs,
    },
    /// Print the parsed segments of a path as JSON
    Segments {
        /// Path to parse
        path: String,
        #[command(flatten)]
        syntax: SyntaxArgs,
    },
}

#[derive(Args)]
struct SyntaxArgs {
    /// Segment separator
    #[arg(long, default_value_t = '.')]
    separator: char,
    /// Ignore text after an index selector's closing bracket
    #[arg(long)]
    lenient_index: bool,
}

impl SyntaxArgs {
    fn options(&self) -> LookupOptions {
        LookupOptions {
            separator: self.separator,
            index_syntax: if self.lenient_index {
                IndexSyntax::Lenient
            } else {
                IndexSyntax::Strict
            },
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Get {
            path,
            input,
            output,
            compact,
            syntax,
        } => {
            let json = read_input(input.as_deref())?;
            let document: serde_json::Value =
                serde_json::from_str(&json).context("Failed to parse input as JSON")?;
            let root = Value::from(document);

            let resolver = Resolver::new(syntax.options());
            debug!(path = %path, "resolving");
            let resolved = resolver
                .lookup_str(&root, &path)
                .with_context(|| format!("Failed to resolve path '{}'", path))?;

            let rendered = if compact {
                serde_json::to_string(&resolved)?
            } else {
                serde_json::to_string_pretty(&resolved)?
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Segments { path, syntax } => {
            let options = syntax.options();
            let segments = Path::parse_with(&path, options.separator)
                .segments()
                .iter()
                .map(|raw| {
                    let segment = Segment::parse_with(raw, options.index_syntax)
                        .with_context(|| format!("Failed to parse path '{}'", path))?;
                    Ok(json!({"key": segment.key, "index": segment.index}))
                })
                .collect::<Result<Vec<_>>>()?;
            println!("{}", serde_json::to_string_pretty(&segments)?);
        }
    }

    Ok(())
}

/// Install a stderr fmt subscriber. `RUST_LOG` wins when set; otherwise
/// `-v` enables debug and `-vv` trace output.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
