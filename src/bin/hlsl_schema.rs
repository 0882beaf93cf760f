use std::path::PathBuf;

use clap::Parser;
use intrinsic_schema::dxil::build_semantics;
use intrinsic_schema::SchemaBuilder;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Intrinsic definitions path
    #[clap(value_parser, default_value = "assets/intrinsics.def")]
    defs_path: PathBuf,

    /// Print every intrinsic, grouped by namespace
    #[clap(long)]
    list: bool,

    /// Log filter used when RUST_LOG isn't set
    #[clap(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    let defs = std::fs::read_to_string(&args.defs_path)?;
    debug!(path = %args.defs_path.display(), bytes = defs.len(), "read definitions");

    let semantics = build_semantics()?;
    let schema = SchemaBuilder::new()
        .intrinsics(&defs)
        .label_checks(semantics.label_checks())
        .build()?;

    println!(
        "{} intrinsics in {} namespaces, {} instructions",
        schema.intrinsic_count(),
        schema.namespace_count(),
        schema.instruction_count()
    );

    if args.list {
        for ns in schema.namespaces() {
            println!("namespace {} ({})", ns.name(), ns.namespace.ordinal);
            for intrinsic in ns.intrinsics() {
                let ret = match intrinsic.effective_shape(0) {
                    Some(shape) => shape.to_string(),
                    None => "?".to_owned(),
                };
                let args: Vec<&str> = intrinsic.args().iter().map(|p| p.type_name.as_str()).collect();
                println!(
                    "  {}::{}({}) -> {} {}",
                    ns.name(),
                    intrinsic.name,
                    args.join(", "),
                    intrinsic.return_param().component_class,
                    ret
                );
            }
        }
    }

    Ok(())
}
