//! Raster output for QR symbols.
//!
//! Renders a module grid into a monochrome (or two-colour) bitmap, writes it
//! as PNG, and provides a [`qr_codec::SymbolEncoder`] backed by the `qrcode` crate.

pub mod qr;
pub mod raster;
pub mod writer;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use qr::{QrcodeEncoder, generate_qr};
pub use raster::{RasterStyle, image_side, render};
pub use writer::{encode_png, write_png};

/// Errors that can occur while rendering or writing a QR image.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("Box size must be at least 1 pixel")]
    InvalidBoxSize,

    #[error("Image of {0} pixels per side is too large")]
    TooLarge(u64),

    #[error("QR encode error: {0}")]
    Encode(#[from] qr_codec::QrError),

    #[error("Image encode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for image-engine operations.
pub type Result<T> = std::result::Result<T, RasterError>;
