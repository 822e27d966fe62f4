//! Command-line flags. Each flag overrides the matching `QR_*` setting.

use std::path::PathBuf;

use clap::Parser;

/// Encode a device record as a QR code PNG.
#[derive(Parser, Debug, Default)]
#[command(name = "device-qr", version, about = "Encode a device record as a QR code PNG")]
pub struct Cli {
    /// Built-in record to encode (test, esp).
    #[arg(long)]
    pub preset: Option<String>,

    /// JSON file holding the device record.
    #[arg(long)]
    pub record: Option<PathBuf>,

    /// Output PNG path.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Error correction level (L, M, Q, H).
    #[arg(long)]
    pub ec_level: Option<String>,

    /// Smallest symbol version (1-40).
    #[arg(long)]
    pub min_version: Option<u8>,

    /// Largest symbol version (1-40).
    #[arg(long)]
    pub max_version: Option<u8>,

    /// Raise the error correction level while the data still fits.
    #[arg(long)]
    pub boost_ec: bool,

    /// Mask pattern (auto or 0-7).
    #[arg(long)]
    pub mask: Option<String>,

    /// Pixels per module.
    #[arg(long)]
    pub box_size: Option<u32>,

    /// Quiet zone width in modules.
    #[arg(long)]
    pub border: Option<u32>,

    /// Dark module colour (#RRGGBB).
    #[arg(long)]
    pub fill_color: Option<String>,

    /// Background colour (#RRGGBB).
    #[arg(long)]
    pub back_color: Option<String>,

    /// Symbol encoder (builtin, qrcode).
    #[arg(long)]
    pub backend: Option<String>,

    /// JSON layout (spaced, compact).
    #[arg(long)]
    pub json_style: Option<String>,

    /// Print the encoded JSON payload to stdout.
    #[arg(long)]
    pub print_json: bool,
}

impl Cli {
    /// Setting overrides for the flags that were given.
    pub fn overrides(&self) -> Vec<(&'static str, String)> {
        let path = |p: &PathBuf| p.display().to_string();
        [
            ("QR_PRESET", self.preset.clone()),
            ("QR_RECORD_FILE", self.record.as_ref().map(path)),
            ("QR_OUTPUT", self.output.as_ref().map(path)),
            ("QR_EC_LEVEL", self.ec_level.clone()),
            ("QR_MIN_VERSION", self.min_version.map(|v| v.to_string())),
            ("QR_MAX_VERSION", self.max_version.map(|v| v.to_string())),
            ("QR_BOOST_EC", self.boost_ec.then(|| "true".to_string())),
            ("QR_MASK", self.mask.clone()),
            ("QR_BOX_SIZE", self.box_size.map(|v| v.to_string())),
            ("QR_BORDER", self.border.map(|v| v.to_string())),
            ("QR_FILL_COLOR", self.fill_color.clone()),
            ("QR_BACK_COLOR", self.back_color.clone()),
            ("QR_BACKEND", self.backend.clone()),
            ("QR_JSON_STYLE", self.json_style.clone()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect()
    }
}
