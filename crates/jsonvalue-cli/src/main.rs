//! `jsonvalue` CLI — re-encode, query and hash JSON documents from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Re-encode JSON in the compact wire format (stdin → stdout)
//! echo '{"url": "http://x/y", "n": 1.0}' | jsonvalue encode
//!
//! # Encode from file to file, sorting keys and leaving '/' unescaped
//! jsonvalue encode -i data.json -o data.min.json --sort-keys --no-escape-slash
//!
//! # Look up a dotted key path
//! jsonvalue get derp.blerp -i data.json
//!
//! # Print the order-independent content hash
//! jsonvalue hash -i data.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jsonvalue_core::{EncodeOptions, Value};
use std::io::{self, Read};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "jsonvalue",
    version,
    about = "Re-encode, query and hash JSON documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Re-encode JSON in the compact wire format
    Encode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Sort object keys at every depth
        #[arg(long)]
        sort_keys: bool,
        /// Write '/' as-is instead of "\/"
        #[arg(long)]
        no_escape_slash: bool,
    },
    /// Print the value at a key path such as `derp.blerp`
    Get {
        /// Key or dotted key path
        key_path: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Print the content hash as 16 hex digits
    Hash {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Encode {
            input,
            output,
            sort_keys,
            no_escape_slash,
        } => {
            let value = read_value(input.as_deref())?;
            let options = EncodeOptions::default()
                .sort_keys(sort_keys)
                .escape_slash(!no_escape_slash);
            let text = value
                .encode_with(&options)
                .context("Failed to encode JSON")?;
            write_output(output.as_deref(), &text)?;
        }
        Commands::Get { key_path, input } => {
            let value = read_value(input.as_deref())?;
            let Some(found) = value.get(&key_path) else {
                anyhow::bail!("No value at key path: '{}'", key_path);
            };
            debug!(key_path = %key_path, kind = found.type_name(), "key path resolved");
            let text = found.encode_as_string().context("Failed to encode JSON")?;
            println!("{}", text);
        }
        Commands::Hash { input } => {
            let value = read_value(input.as_deref())?;
            println!("{:016x}", value.content_hash());
        }
    }

    Ok(())
}

/// Install a stderr subscriber: `RUST_LOG` if set, otherwise `warn`
/// (`debug` with `--verbose`).
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_value(path: Option<&str>) -> Result<Value> {
    let text = read_input(path)?;
    let value: Value = text.parse().context("Failed to parse JSON input")?;
    debug!(kind = value.type_name(), bytes = text.len(), "input parsed");
    Ok(value)
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
            print!("{}", content);
        }
    }
    Ok(())
}
