use clap::Parser;
use miette::Result;
use panotiles::cli::Cli;
use panotiles::output::Printer;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let printer = Printer::new();
    panotiles::cli::run::run(cli.run, &printer)?;

    Ok(())
}
