//! QR code generation: the `qrcode` crate backend and the encode-and-render helper.

use image::DynamicImage;
use qr_codec::{EcLevel, EncodeOptions, ModuleGrid, QrError, QrSymbol, SymbolEncoder, Version};
use qrcode::types::QrError as QrcodeError;
use qrcode::{Color, QrCode};
use tracing::{debug, warn};

use crate::raster::{RasterStyle, render};

/// [`SymbolEncoder`] backed by the `qrcode` crate.
///
/// The crate picks its own segmentation and mask, so `EncodeOptions::mask`
/// is ignored and the returned symbol reports no mask.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrcodeEncoder;

impl SymbolEncoder for QrcodeEncoder {
    fn name(&self) -> &'static str {
        "qrcode"
    }

    fn encode(&self, payload: &[u8], options: &EncodeOptions) -> qr_codec::Result<QrSymbol> {
        if options.min_version > options.max_version {
            return Err(QrError::InvalidVersionRange {
                min: options.min_version.number(),
                max: options.max_version.number(),
            });
        }
        if options.mask.is_some() {
            warn!("qrcode backend chooses its own mask, ignoring the forced mask");
        }

        let too_long = || QrError::DataTooLong {
            len: payload.len(),
            ec_level: options.ec_level,
            max_version: options.max_version.number(),
        };
        let map_err = |e: QrcodeError| match e {
            QrcodeError::DataTooLong => too_long(),
            other => QrError::Backend(other.to_string()),
        };

        let mut ec_level = options.ec_level;
        let mut code = QrCode::with_error_correction_level(payload, to_qrcode_ec(ec_level))
            .map_err(map_err)?;
        let mut version = normal_version(&code)?;

        if version > options.max_version {
            return Err(too_long());
        }
        if version < options.min_version {
            version = options.min_version;
            code = with_version(payload, version, ec_level).map_err(map_err)?;
        }

        if options.boost_ec_level {
            while let Some(next) = ec_level.stronger() {
                match with_version(payload, version, next) {
                    Ok(boosted) => {
                        code = boosted;
                        ec_level = next;
                    }
                    Err(_) => break,
                }
            }
        }

        let modules = code.to_colors().into_iter().map(|c| c == Color::Dark).collect();
        let grid = ModuleGrid::from_modules(code.width(), modules)
            .ok_or_else(|| QrError::Backend("module count does not match symbol width".into()))?;

        debug!(len = payload.len(), %version, %ec_level, "Encoded with qrcode backend");

        Ok(QrSymbol {
            version,
            ec_level,
            mask: None,
            grid,
        })
    }
}

fn with_version(payload: &[u8], version: Version, ec_level: EcLevel) -> Result<QrCode, QrcodeError> {
    QrCode::with_version(
        payload,
        qrcode::Version::Normal(i16::from(version.number())),
        to_qrcode_ec(ec_level),
    )
}

fn to_qrcode_ec(ec_level: EcLevel) -> qrcode::EcLevel {
    match ec_level {
        EcLevel::L => qrcode::EcLevel::L,
        EcLevel::M => qrcode::EcLevel::M,
        EcLevel::Q => qrcode::EcLevel::Q,
        EcLevel::H => qrcode::EcLevel::H,
    }
}

fn normal_version(code: &QrCode) -> qr_codec::Result<Version> {
    match code.version() {
        qrcode::Version::Normal(n) => u8::try_from(n)
            .map_err(|_| QrError::Backend(format!("version {n} out of range")))
            .and_then(Version::new),
        qrcode::Version::Micro(n) => Err(QrError::Backend(format!("unexpected Micro QR version M{n}"))),
    }
}

/// Encode `payload` with `encoder` and render it.
pub fn generate_qr(
    payload: &[u8],
    encoder: &dyn SymbolEncoder,
    options: &EncodeOptions,
    style: &RasterStyle,
) -> crate::Result<(QrSymbol, DynamicImage)> {
    let symbol = encoder.encode(payload, options)?;
    let img = render(&symbol.grid, style)?;
    Ok((symbol, img))
}
