use clap::Parser;
use tracing_subscriber::EnvFilter;

use device_qr::Cli;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let generated = device_qr::run(&cli)?;

    tracing::info!(
        version = %generated.version,
        ec_level = %generated.ec_level,
        modules = generated.modules,
        "Generated QR code"
    );
    println!(" QR Code saved as '{}'", generated.path.display());
    Ok(())
}
