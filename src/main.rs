use anyhow::Result;
use clap::Parser;

use cloudfront_invalidate::cli::{self, args::Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();

    cli::init_logging(&cli.log_level);

    // One request per invocation: a current-thread runtime is all it needs
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(cli::run(cli))
}
