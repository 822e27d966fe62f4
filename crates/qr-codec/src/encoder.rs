//! Payload-to-symbol pipeline: version selection, error correction, placement and masking.

use tracing::debug;

use crate::mask::{Mask, penalty};
use crate::matrix::{Canvas, ModuleGrid};
use crate::reed_solomon;
use crate::segment::{self, Segment};
use crate::version::{EcLevel, Version};
use crate::{QrError, Result};

/// Encoding parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Error correction level to encode at.
    pub ec_level: EcLevel,

    /// Smallest version to consider. Larger versions are used when the payload needs them.
    pub min_version: Version,

    /// Largest version to consider.
    pub max_version: Version,

    /// Force a mask pattern instead of choosing the lowest-penalty one.
    pub mask: Option<Mask>,

    /// Raise the EC level as far as the chosen version still fits the payload.
    pub boost_ec_level: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            ec_level: EcLevel::M,
            min_version: Version::MIN,
            max_version: Version::MAX,
            mask: None,
            boost_ec_level: false,
        }
    }
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ec_level(mut self, ec_level: EcLevel) -> Self {
        self.ec_level = ec_level;
        self
    }

    pub fn with_min_version(mut self, version: Version) -> Self {
        self.min_version = version;
        self
    }

    pub fn with_max_version(mut self, version: Version) -> Self {
        self.max_version = version;
        self
    }

    pub fn with_mask(mut self, mask: Option<Mask>) -> Self {
        self.mask = mask;
        self
    }

    pub fn with_boost_ec_level(mut self, val: bool) -> Self {
        self.boost_ec_level = val;
        self
    }
}

/// A finished QR symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrSymbol {
    pub version: Version,
    pub ec_level: EcLevel,
    /// `None` when the backend does not report which mask it applied.
    pub mask: Option<Mask>,
    pub grid: ModuleGrid,
}

impl QrSymbol {
    /// Side length in modules.
    pub fn size(&self) -> usize {
        self.grid.size()
    }
}

/// Anything able to turn payload bytes into a QR symbol.
pub trait SymbolEncoder {
    /// Short backend name for logs and configuration.
    fn name(&self) -> &'static str;

    fn encode(&self, payload: &[u8], options: &EncodeOptions) -> Result<QrSymbol>;
}

/// The encoder implemented in this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinEncoder;

impl SymbolEncoder for BuiltinEncoder {
    fn name(&self) -> &'static str {
        "builtin"
    }

    fn encode(&self, payload: &[u8], options: &EncodeOptions) -> Result<QrSymbol> {
        encode(payload, options)
    }
}

/// Encode `payload` into the smallest symbol allowed by `options`.
pub fn encode(payload: &[u8], options: &EncodeOptions) -> Result<QrSymbol> {
    if options.min_version > options.max_version {
        return Err(QrError::InvalidVersionRange {
            min: options.min_version.number(),
            max: options.max_version.number(),
        });
    }

    let segments = if payload.is_empty() {
        Vec::new()
    } else {
        vec![Segment::from_payload(payload)]
    };

    let (version, used_bits) = options
        .min_version
        .range_to(options.max_version)
        .find_map(|v| {
            let bits = segment::total_bits(&segments, v)?;
            (bits <= v.data_capacity_bits(options.ec_level)).then_some((v, bits))
        })
        .ok_or(QrError::DataTooLong {
            len: payload.len(),
            ec_level: options.ec_level,
            max_version: options.max_version.number(),
        })?;

    let mut ec_level = options.ec_level;
    if options.boost_ec_level {
        while let Some(next) = ec_level.stronger() {
            if used_bits > version.data_capacity_bits(next) {
                break;
            }
            ec_level = next;
        }
    }

    debug!(
        len = payload.len(),
        mode = ?segments.first().map(Segment::mode),
        %version,
        %ec_level,
        used_bits,
        "Selected QR version"
    );

    let data = segment::build_data_codewords(&segments, version, version.data_capacity_bits(ec_level));
    let codewords = add_ec_and_interleave(&data, version, ec_level);

    let mut canvas = Canvas::new(version, ec_level);
    canvas.draw_codewords(&codewords);

    let mask = match options.mask {
        Some(mask) => mask,
        None => choose_mask(&canvas),
    };
    canvas.apply_mask(mask);
    canvas.draw_format_bits(mask);
    debug!(%mask, forced = options.mask.is_some(), "Applied mask");

    Ok(QrSymbol {
        version,
        ec_level,
        mask: Some(mask),
        grid: canvas.into_grid(),
    })
}

/// Pick the mask with the lowest penalty; ties go to the lower mask number.
fn choose_mask(canvas: &Canvas) -> Mask {
    Mask::ALL
        .into_iter()
        .min_by_key(|&mask| {
            let mut trial = canvas.clone();
            trial.apply_mask(mask);
            trial.draw_format_bits(mask);
            penalty(trial.grid())
        })
        .unwrap_or(Mask::ALL[0])
}

/// Split data codewords into blocks, append Reed-Solomon codewords to each,
/// and interleave: data column by column, then error correction column by column.
fn add_ec_and_interleave(data: &[u8], version: Version, ec_level: EcLevel) -> Vec<u8> {
    debug_assert_eq!(data.len(), version.data_codewords(ec_level));
    let block_count = version.ec_blocks(ec_level);
    let ec_len = version.ec_codewords_per_block(ec_level);
    let total = version.total_codewords();

    // Trailing blocks carry one extra data codeword when the split is uneven.
    let short_blocks = block_count - total % block_count;
    let short_data_len = total / block_count - ec_len;
    let generator = reed_solomon::generator(ec_len);

    let mut data_blocks: Vec<&[u8]> = Vec::with_capacity(block_count);
    let mut ec_blocks: Vec<Vec<u8>> = Vec::with_capacity(block_count);
    let mut offset = 0;
    for i in 0..block_count {
        let len = short_data_len + usize::from(i >= short_blocks);
        let block = &data[offset..offset + len];
        offset += len;
        ec_blocks.push(reed_solomon::remainder(block, &generator));
        data_blocks.push(block);
    }

    let mut out = Vec::with_capacity(total);
    for i in 0..=short_data_len {
        out.extend(data_blocks.iter().filter_map(|block| block.get(i)));
    }
    for i in 0..ec_len {
        out.extend(ec_blocks.iter().map(|block| block[i]));
    }
    debug_assert_eq!(out.len(), total);
    out
}
