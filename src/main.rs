//! Aposa JSON CLI.
//!
//! Reads one JSON object from stdin and either re-emits it compactly or
//! prints a single top-level member through a typed accessor.

use std::io::{self, Read};
use std::process::ExitCode;

use aposa_json::{value_to_string, Document, MapOrder, Parser as JsonParser, Value};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "aposa")]
#[command(about = "Aposa JSON - compact and inspect JSON documents", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version information
    Version,

    /// Read a JSON object from stdin and print it without whitespace
    Compact {
        /// Member order used for every object in the output
        #[arg(long, value_enum, default_value_t = OrderArg::Insertion)]
        order: OrderArg,
    },

    /// Read a JSON object from stdin and print one top-level member
    Get {
        /// Member name
        key: String,

        /// Accessor used to read the member
        #[arg(long = "as", value_enum, default_value_t = Accessor::Json)]
        accessor: Accessor,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OrderArg {
    Insertion,
    Sorted,
    Hashed,
}

impl From<OrderArg> for MapOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Insertion => MapOrder::Insertion,
            OrderArg::Sorted => MapOrder::Sorted,
            OrderArg::Hashed => MapOrder::Hashed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Accessor {
    Json,
    Bool,
    String,
    Int,
    Uint,
    Int64,
    Uint64,
    Int16,
    Double,
    Float,
}

impl Accessor {
    fn read(self, value: &Value) -> aposa_json::Result<String> {
        Ok(match self {
            Accessor::Json => value_to_string(value),
            Accessor::Bool => value.get_boolean()?.to_string(),
            Accessor::String => value.get_string()?.to_owned(),
            Accessor::Int => value.get_int()?.to_string(),
            Accessor::Uint => value.get_uint()?.to_string(),
            Accessor::Int64 => value.get_int64()?.to_string(),
            Accessor::Uint64 => value.get_uint64()?.to_string(),
            Accessor::Int16 => value.get_int16()?.to_string(),
            Accessor::Double => value.get_double()?.to_string(),
            Accessor::Float => value.get_float()?.to_string(),
        })
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Version) => {
            println!("Aposa JSON v{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Some(Commands::Compact { order }) => match read_document(order.into()) {
            Ok(doc) => {
                println!("{doc}");
                ExitCode::SUCCESS
            }
            Err(code) => code,
        },
        Some(Commands::Get { key, accessor }) => {
            let doc = match read_document(MapOrder::Insertion) {
                Ok(doc) => doc,
                Err(code) => return code,
            };
            let Some(value) = doc.get(&key) else {
                eprintln!("error: no member named {key:?}");
                return ExitCode::FAILURE;
            };
            match accessor.read(value) {
                Ok(text) => {
                    println!("{text}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("error: {e}");
                    ExitCode::FAILURE
                }
            }
        }
        None => {
            println!("Aposa JSON v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for usage information");
            ExitCode::SUCCESS
        }
    }
}

fn read_document(order: MapOrder) -> Result<Document, ExitCode> {
    let mut input = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input) {
        eprintln!("error: failed to read stdin: {e}");
        return Err(ExitCode::FAILURE);
    }
    JsonParser::new().with_order(order).parse(&input).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::FAILURE
    })
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}
