//! Device registration labels: build a device record, encode it as JSON in a
//! QR code, and write the symbol as a PNG.

pub mod cli;
pub mod config;
pub mod json;
pub mod pipeline;
pub mod presets;
pub mod record;

use anyhow::Context;

pub use cli::Cli;
pub use config::{AppConfig, Backend};
pub use json::{JsonStyle, from_json, to_json};
pub use pipeline::{GeneratedQr, generate};
pub use presets::Preset;
pub use record::{DeviceRecord, FieldValue, RecordError};

/// Load configuration with the CLI overrides applied and generate the image.
pub fn run(cli: &Cli) -> Result<GeneratedQr, anyhow::Error> {
    let config = AppConfig::load_with_overrides(&cli.overrides()).context("Invalid configuration")?;
    tracing::debug!(?config, "Settings loaded");

    let record = config.record().context("Failed to load device record")?;
    if cli.print_json {
        println!("{}", String::from_utf8_lossy(&to_json(&record, config.json_style)));
    }

    let encoder = config.backend.encoder();
    generate(&record, &config, encoder.as_ref())
        .with_context(|| format!("Failed to generate {}", config.output_path().display()))
}
