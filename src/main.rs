use clap::Parser;
use docnav::cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    docnav::tracing::init(cli.verbose);

    tracing::debug!("Starting docnav");
    let output = docnav::commands::run(&cli).inspect_err(|e| {
        tracing::error!("docnav failed: {:?}", e);
    })?;
    print!("{}", output);

    Ok(())
}
