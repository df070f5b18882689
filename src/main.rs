use anyhow::Result;
use clap::Parser;
use cogsmith_core::{init_logging, AppConfig};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "cogsmith.toml")]
    config: String,

    /// Seed override for the random source
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output path override for the best placement
    #[arg(short, long)]
    output: Option<String>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let mut config = AppConfig::load(&args.config);
    if let Some(seed) = args.seed {
        config.search.seed = seed;
    }
    if let Some(output) = args.output {
        config.io.output_path = output;
    }

    let outcome = cogsmith_lib::run(&config)?;
    println!(
        "Best objective {:.4} (build rate {}, flaggy rate {}, exp {}%)",
        outcome.objective,
        outcome.best.build_rate().round(),
        outcome.best.flaggy_rate().round(),
        (outcome.best.experience_total() * 100.0).round()
    );
    println!("Writing best cog shelf to {}", config.io.output_path);
    Ok(())
}
