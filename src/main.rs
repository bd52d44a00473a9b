use clap::Parser;

mod cli;
mod config;
mod core;
mod error;
mod utils;

use config::Config;
use error::Result;

#[derive(Parser)]
#[command(name = "lwlyric")]
#[command(about = "Fetch song lyrics and copy them to the clipboard")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Config file path (optional)
    #[arg(long)]
    config: Option<String>,

    #[command(flatten)]
    find: cli::FindArgs,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    utils::logging::init_logging(cli.verbose)?;

    let config = Config::load(cli.config.as_deref())?;

    cli::execute(cli.find, &config).await
}
