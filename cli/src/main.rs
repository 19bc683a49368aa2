use anyhow::Context;
use clap::Parser;

mod input;
mod logging;
mod play;

/// Minesweeper on a 9x9 grid, played from the terminal
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(log_level) = args.verbose.log_level() {
        logging::init(log_level);
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();
    let engine = play::play(stdin, &mut stdout, seed).context("Game aborted")?;

    let summary = serde_json::to_string(&engine.summary()).context("Could not encode summary")?;
    log::info!("Game summary: {}", summary);
    Ok(())
}
