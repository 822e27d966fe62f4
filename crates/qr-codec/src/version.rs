//! Symbol versions, error correction levels, and the capacity tables that tie them together.

use std::fmt;
use std::str::FromStr;

use crate::{QrError, Result};

/// Error correction level, in increasing order of redundancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum EcLevel {
    /// Recovers about 7% of codewords.
    L,
    /// Recovers about 15% of codewords.
    #[default]
    M,
    /// Recovers about 25% of codewords.
    Q,
    /// Recovers about 30% of codewords.
    H,
}

impl EcLevel {
    pub const ALL: [EcLevel; 4] = [EcLevel::L, EcLevel::M, EcLevel::Q, EcLevel::H];

    /// Row index into the block tables.
    fn ordinal(self) -> usize {
        match self {
            EcLevel::L => 0,
            EcLevel::M => 1,
            EcLevel::Q => 2,
            EcLevel::H => 3,
        }
    }

    /// The two-bit value stored in the format information.
    pub fn format_bits(self) -> u32 {
        match self {
            EcLevel::L => 1,
            EcLevel::M => 0,
            EcLevel::Q => 3,
            EcLevel::H => 2,
        }
    }

    /// The next stronger level, if any.
    pub fn stronger(self) -> Option<EcLevel> {
        match self {
            EcLevel::L => Some(EcLevel::M),
            EcLevel::M => Some(EcLevel::Q),
            EcLevel::Q => Some(EcLevel::H),
            EcLevel::H => None,
        }
    }
}

impl fmt::Display for EcLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EcLevel::L => "L",
            EcLevel::M => "M",
            EcLevel::Q => "Q",
            EcLevel::H => "H",
        };
        f.write_str(s)
    }
}

impl FromStr for EcLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" | "LOW" => Ok(EcLevel::L),
            "M" | "MEDIUM" => Ok(EcLevel::M),
            "Q" | "QUARTILE" => Ok(EcLevel::Q),
            "H" | "HIGH" => Ok(EcLevel::H),
            other => Err(format!("unknown error correction level '{other}'")),
        }
    }
}

/// A QR symbol version (size class), 1 through 40.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u8);

impl Version {
    pub const MIN: Version = Version(1);
    pub const MAX: Version = Version(40);

    pub fn new(number: u8) -> Result<Self> {
        if (1..=40).contains(&number) {
            Ok(Self(number))
        } else {
            Err(QrError::InvalidVersion(number))
        }
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Side length of the symbol in modules.
    pub fn size(self) -> usize {
        usize::from(self.0) * 4 + 17
    }

    /// Versions from `self` up to and including `last`.
    pub fn range_to(self, last: Version) -> impl Iterator<Item = Version> {
        (self.0..=last.0).map(Version)
    }

    /// Centre coordinates of the alignment patterns along one axis.
    ///
    /// Every combination of two entries is a pattern centre, except the
    /// three that collide with finder patterns.
    pub fn alignment_positions(self) -> Vec<usize> {
        let ver = usize::from(self.0);
        if ver == 1 {
            return Vec::new();
        }
        let count = ver / 7 + 2;
        let step = if ver == 32 {
            26
        } else {
            (ver * 4 + count * 2 + 1) / (count * 2 - 2) * 2
        };
        let mut positions = vec![0; count];
        positions[0] = 6;
        let mut pos = self.size() - 7;
        for slot in positions.iter_mut().skip(1).rev() {
            *slot = pos;
            pos = pos.saturating_sub(step);
        }
        positions
    }

    /// Number of modules available for codewords once all function patterns are placed.
    /// Includes remainder bits, so it is not necessarily a multiple of 8.
    pub fn raw_data_modules(self) -> usize {
        let ver = usize::from(self.0);
        let mut result = (16 * ver + 128) * ver + 64;
        if ver >= 2 {
            let align = ver / 7 + 2;
            result -= (25 * align - 10) * align - 55;
            if ver >= 7 {
                result -= 36;
            }
        }
        result
    }

    /// Total codewords (data + error correction).
    pub fn total_codewords(self) -> usize {
        self.raw_data_modules() / 8
    }

    /// Error correction codewords in each block.
    pub fn ec_codewords_per_block(self, ec_level: EcLevel) -> usize {
        usize::from(EC_CODEWORDS_PER_BLOCK[ec_level.ordinal()][usize::from(self.0)])
    }

    /// Number of Reed-Solomon blocks.
    pub fn ec_blocks(self, ec_level: EcLevel) -> usize {
        usize::from(EC_BLOCKS[ec_level.ordinal()][usize::from(self.0)])
    }

    /// Data codewords available at the given level.
    pub fn data_codewords(self, ec_level: EcLevel) -> usize {
        self.total_codewords() - self.ec_codewords_per_block(ec_level) * self.ec_blocks(ec_level)
    }

    /// Data capacity in bits at the given level.
    pub fn data_capacity_bits(self, ec_level: EcLevel) -> usize {
        self.data_codewords(ec_level) * 8
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Index 0 is padding so that tables can be indexed by version number.
#[rustfmt::skip]
const EC_CODEWORDS_PER_BLOCK: [[u8; 41]; 4] = [
    [0,  7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28, 30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30],
    [0, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28],
    [0, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30, 30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30],
    [0, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30],
];

#[rustfmt::skip]
const EC_BLOCKS: [[u8; 41]; 4] = [
    [0, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4,  4,  4,  4,  4,  6,  6,  6,  6,  7,  8,  8,  9,  9, 10, 12, 12, 12, 13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25],
    [0, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5,  5,  8,  9,  9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21, 23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49],
    [0, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8,  8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27, 29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68],
    [0, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32, 35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81],
];
