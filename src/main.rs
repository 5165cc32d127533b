use clap::Parser;
use tracing_subscriber::EnvFilter;
use yamltrimmer::cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!(config = %cli.config.display(), "verbose logging enabled");
    yamltrimmer::commands::run(&cli)
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "warn,yamltrimmer=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
