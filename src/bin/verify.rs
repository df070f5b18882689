use clap::Parser;
use cogsmith_core::config::IoConfig;
use cogsmith_core::{init_logging, AppConfig, ItemLogic};
use cogsmith_lib::Inputs;

/// Reads and validates the input files without running the search.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "cogsmith.toml")]
    config: String,

    /// Cog inventory override
    #[arg(long)]
    items: Option<String>,

    /// Blocked cells override
    #[arg(long)]
    blocked: Option<String>,

    /// Flagged cells override
    #[arg(long)]
    flaggies: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging("warn");

    let config = AppConfig::load(&args.config);
    let io = IoConfig {
        items_path: args.items.unwrap_or(config.io.items_path),
        blocked_path: args.blocked.unwrap_or(config.io.blocked_path),
        flaggies_path: args.flaggies.or(config.io.flaggies_path),
        output_path: config.io.output_path,
    };

    println!("Verifying cog shelf inputs...");
    let inputs = Inputs::load(&io)?;
    let template = inputs.template();

    println!("Cogs:            {}", inputs.records.len());
    for (kind, count) in inputs.kind_counts() {
        println!("  {:<12} [{}] {count}", kind.tag(), kind.abbreviation());
    }
    println!("Blocked cells:   {}", inputs.blocked.len());
    println!("Flagged cells:   {}", inputs.flaggies.len());
    println!("Placeable cells: {}", template.mask().placeable_count());

    let spare = inputs
        .records
        .len()
        .saturating_sub(template.mask().placeable_count());
    if spare > 0 {
        println!("{spare} cogs will stay spare on any shelf.");
    }
    println!("\nInputs are valid.");
    Ok(())
}
