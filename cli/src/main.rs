use clap::Parser;
use leap_cli::Cli;
use supports_color::Stream;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let outcome = leap_cli::run(&cli).await?;
    if cli.json {
        println!("{}", outcome.to_json()?);
    } else {
        let color = supports_color::on_cached(Stream::Stdout).is_some();
        print!("{}", outcome.to_text(color));
    }
    Ok(())
}
