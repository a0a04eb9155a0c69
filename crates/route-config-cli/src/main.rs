//! route-config CLI - check, dump and inspect route manager configuration.

mod commands;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "route-config")]
#[command(author, version, about = "Route manager configuration tool", long_about = None)]
struct Cli {
    /// Raise the log level (-v info, -vv debug, -vvv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a configuration document and summarize it
    Check(commands::check::CheckArgs),

    /// Decode a configuration document and print it as JSON or TOML
    Dump(commands::dump::DumpArgs),

    /// Print the element catalogue
    Schema(commands::schema::SchemaArgs),
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Check(args) => commands::check::run(args),
        Commands::Dump(args) => commands::dump::run(args),
        Commands::Schema(args) => commands::schema::run(args),
    }
}
