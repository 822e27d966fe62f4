//! QR code symbol encoder (ISO/IEC 18004, model 2).
//!
//! Turns an arbitrary byte payload into a square grid of dark/light modules:
//! mode selection, Reed-Solomon error correction, matrix layout and mask
//! selection. Rendering the grid into pixels is left to the caller.

mod encoder;
pub mod mask;
pub mod matrix;
pub mod reed_solomon;
pub mod segment;
pub mod version;

// Re-exports for convenience
pub use encoder::{BuiltinEncoder, EncodeOptions, QrSymbol, SymbolEncoder, encode};
pub use mask::Mask;
pub use matrix::ModuleGrid;
pub use segment::Mode;
pub use version::{EcLevel, Version};

/// Errors that can occur while encoding a QR symbol.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QrError {
    #[error("Payload of {len} bytes does not fit in version {max_version} at EC level {ec_level}")]
    DataTooLong {
        len: usize,
        ec_level: EcLevel,
        max_version: u8,
    },

    #[error("Invalid QR version {0} (expected 1..=40)")]
    InvalidVersion(u8),

    #[error("Invalid version range: min {min} is greater than max {max}")]
    InvalidVersionRange { min: u8, max: u8 },

    #[error("Invalid mask pattern {0} (expected 0..=7)")]
    InvalidMask(u8),

    #[error("Encoder backend error: {0}")]
    Backend(String),
}

/// Result type alias for QR encoding operations.
pub type Result<T> = std::result::Result<T, QrError>;
