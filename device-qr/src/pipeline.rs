//! End-to-end generation: record → JSON → symbol → image → PNG file.

use std::path::PathBuf;

use image_engine::{generate_qr, write_png};
use qr_codec::{EcLevel, Mask, SymbolEncoder, Version};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::json::to_json;
use crate::record::DeviceRecord;

/// Summary of a written QR image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedQr {
    pub path: PathBuf,
    pub version: Version,
    pub ec_level: EcLevel,
    /// `None` when the backend does not report its mask.
    pub mask: Option<Mask>,
    /// Modules per side.
    pub modules: usize,
    /// Pixels per side.
    pub pixels: u32,
    pub payload_len: usize,
}

/// Encode `record` with `encoder` and write the PNG to the configured output path.
///
/// Nothing is written unless every stage succeeds.
pub fn generate(
    record: &DeviceRecord,
    config: &AppConfig,
    encoder: &dyn SymbolEncoder,
) -> image_engine::Result<GeneratedQr> {
    let payload = to_json(record, config.json_style);
    debug!(fields = record.len(), bytes = payload.len(), style = ?config.json_style, "Serialized record");

    let (symbol, img) = generate_qr(
        &payload,
        encoder,
        &config.encode_options(),
        &config.raster_style(),
    )?;
    debug!(
        backend = encoder.name(),
        version = %symbol.version,
        ec_level = %symbol.ec_level,
        mask = ?symbol.mask.map(Mask::value),
        "Encoded symbol"
    );

    let path = config.output_path();
    write_png(&img, &path)?;
    info!(path = %path.display(), pixels = img.width(), "Wrote QR image");

    Ok(GeneratedQr {
        path,
        version: symbol.version,
        ec_level: symbol.ec_level,
        mask: symbol.mask,
        modules: symbol.size(),
        pixels: img.width(),
        payload_len: payload.len(),
    })
}
