//! Decode a configuration document and print a summary.

use super::common;
use clap::Args;
use route_config::{DeserializeOptions, Module, VersionPolicy};
use std::path::PathBuf;

/// Check a configuration document.
#[derive(Args)]
pub struct CheckArgs {
    /// Path to the document (searched on the device partitions if omitted)
    pub file: Option<PathBuf>,

    /// Only accept the exact supported format version
    #[arg(long)]
    pub strict_version: bool,

    /// Reject routes whose endpoints name no port of their module
    #[arg(long)]
    pub check_routes: bool,
}

impl CheckArgs {
    fn options(&self) -> DeserializeOptions {
        let policy = if self.strict_version {
            VersionPolicy::Strict
        } else {
            VersionPolicy::ForwardCompatible
        };
        DeserializeOptions::default()
            .with_version_policy(policy)
            .with_route_reference_check(self.check_routes)
    }
}

/// Run the check command.
pub fn run(args: CheckArgs) -> anyhow::Result<()> {
    let options = args.options();
    let path = common::resolve_path(args.file)?;
    let config = common::load(&path, options)?;

    println!("File:            {}", path.display());
    if let Some(version) = config.version() {
        println!("Version:         {version}");
    }
    println!("Criterion types: {}", config.criterion_types().len());
    println!("Criteria:        {}", config.criteria().len());
    println!("Parameters:      {}", config.parameters().len());
    println!("Modules:         {}", config.modules().len());

    let mut unresolved = 0;
    for module in config.modules() {
        print_module(module);
        for endpoint in module.unresolved_route_endpoints() {
            unresolved += 1;
            eprintln!(
                "warning: module {}: route to '{}' names unknown endpoint '{}'",
                module.name().unwrap_or("<unnamed>"),
                endpoint.route_sink,
                endpoint.endpoint
            );
        }
    }

    if unresolved == 0 {
        println!("\nOK");
    } else {
        println!("\nOK ({unresolved} unresolved route endpoints)");
    }
    Ok(())
}

fn print_module(module: &Module) {
    println!(
        "\n  {}: {} device ports, {} routes, {} mix ports",
        module.name().unwrap_or("<unnamed>"),
        module.device_ports().len(),
        module.routes().len(),
        module.mix_ports().len()
    );
    for port in module.mix_ports() {
        println!(
            "    {:<20} {:<6} -> {}",
            port.name,
            port.role.to_string(),
            port.device_ports.join(", ")
        );
    }
}
