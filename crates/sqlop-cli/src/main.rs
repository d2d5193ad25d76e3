//! SQL operator resolution command-line interface

use clap::{Parser, Subcommand};
use sqlop_cli::commands::{self, list, lookup, resolve};
use sqlop_cli::output::{self, OutputFormat};
use sqlop_operators::{FunctionCategory, SyntaxKind};
use std::path::PathBuf;

/// SQL operator catalog tool
#[derive(Parser)]
#[command(name = "sqlop")]
#[command(author, version, about = "Inspect SQL operator catalogs and resolve calls", long_about = None)]
struct Cli {
    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Resolver configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    color: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every operator in priority order
    List {
        /// Only functions of this category
        #[arg(long, value_parser = commands::parse_category)]
        category: Option<FunctionCategory>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Show the overloads registered under a name
    Lookup {
        /// Operator or function name
        name: String,

        /// Call syntax (function, binary, prefix, postfix, ...)
        #[arg(short, long, value_parser = commands::parse_syntax, default_value = "function")]
        syntax: SyntaxKind,

        /// Only functions of this category
        #[arg(long, value_parser = commands::parse_category)]
        category: Option<FunctionCategory>,

        /// Match the name exactly
        #[arg(long)]
        case_sensitive: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Resolve a call and infer its return type
    Resolve {
        /// Operator or function name
        name: String,

        /// Operand types, e.g. INTEGER, "VARCHAR(20) NOT NULL", ? for unknown
        types: Vec<String>,

        /// Call syntax (function, binary, prefix, postfix, ...)
        #[arg(short, long, value_parser = commands::parse_syntax, default_value = "function")]
        syntax: SyntaxKind,

        /// Only functions of this category
        #[arg(long, value_parser = commands::parse_category)]
        category: Option<FunctionCategory>,

        /// Match the name exactly
        #[arg(long)]
        case_sensitive: bool,
    },
}

fn log_level(verbose: u8) -> log::LevelFilter {
    match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    output::setup_colors(&cli.color);
    env_logger::Builder::new()
        .filter_level(log_level(cli.verbose))
        .init();

    let result = commands::load_resolver(cli.config.as_deref()).and_then(|resolver| match cli.command {
        Commands::List { category, format } => list::list(&resolver, list::ListConfig { category, format }),
        Commands::Lookup {
            name,
            syntax,
            category,
            case_sensitive,
            format,
        } => {
            let config = lookup::LookupConfig {
                name,
                syntax,
                category,
                case_sensitive,
                format,
            };
            lookup::lookup(&resolver, config)
        }
        Commands::Resolve {
            name,
            types,
            syntax,
            category,
            case_sensitive,
        } => {
            let config = resolve::ResolveConfig {
                name,
                types,
                syntax,
                category,
                case_sensitive,
            };
            resolve::resolve(&resolver, config)
        }
    });

    if let Err(e) = result {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}
