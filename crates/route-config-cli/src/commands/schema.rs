//! Print the element catalogue.

use clap::Args;
use route_config::{ElementKind, ElementSchema, ROOT_TAG, SUPPORTED_VERSION};

/// Show the tags and attributes each element kind accepts.
#[derive(Args)]
pub struct SchemaArgs {
    /// Element tag to describe (e.g. MixPort); all kinds if omitted
    pub kind: Option<String>,
}

/// Run the schema command.
pub fn run(args: SchemaArgs) -> anyhow::Result<()> {
    match args.kind {
        Some(tag) => {
            let kind = ElementKind::from_tag(&tag).ok_or_else(|| {
                anyhow::anyhow!("unknown element '{tag}'. Run 'route-config schema' to list them.")
            })?;
            print_schema(&kind.schema());
        }
        None => {
            println!("Root: <{ROOT_TAG} version=\"{SUPPORTED_VERSION}\">");
            for kind in ElementKind::ALL {
                let schema = kind.schema();
                println!("  {:<16} in <{}>", schema.tag, schema.collection_tag);
            }
        }
    }
    Ok(())
}

fn print_schema(schema: &ElementSchema) {
    println!("<{}> in <{}>", schema.tag, schema.collection_tag);
    for attribute in schema.attributes {
        let marker = if attribute.required { "required" } else { "optional" };
        println!("  {:<28} {marker}", attribute.name);
    }
}
