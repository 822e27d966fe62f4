//! Data segments and the bit stream they are packed into.

use crate::version::Version;

/// Characters representable in alphanumeric mode, in code order.
const ALPHANUMERIC_CHARSET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Segment encoding mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Numeric,
    Alphanumeric,
    Byte,
}

impl Mode {
    /// The 4-bit mode indicator.
    pub fn indicator(self) -> u32 {
        match self {
            Mode::Numeric => 0b0001,
            Mode::Alphanumeric => 0b0010,
            Mode::Byte => 0b0100,
        }
    }

    /// Width of the character count field for a version.
    pub fn char_count_bits(self, version: Version) -> usize {
        let class = match version.number() {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        match self {
            Mode::Numeric => [10, 12, 14][class],
            Mode::Alphanumeric => [9, 11, 13][class],
            Mode::Byte => [8, 16, 16][class],
        }
    }

    /// The densest mode able to represent every byte of `data`.
    pub fn for_data(data: &[u8]) -> Mode {
        if data.iter().all(u8::is_ascii_digit) {
            Mode::Numeric
        } else if data.iter().all(|b| ALPHANUMERIC_CHARSET.contains(b)) {
            Mode::Alphanumeric
        } else {
            Mode::Byte
        }
    }
}

/// Growable big-endian bit sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    bits: Vec<bool>,
}

impl BitBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the low `len` bits of `value`, most significant first.
    pub fn append(&mut self, value: u32, len: usize) {
        debug_assert!(len <= 31 && value >> len == 0, "value {value} exceeds {len} bits");
        self.bits.extend((0..len).rev().map(|i| (value >> i) & 1 != 0));
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Pack into bytes. A trailing partial byte is zero-filled.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, &bit)| acc | (u8::from(bit) << (7 - i)))
            })
            .collect()
    }
}

/// One run of payload data encoded in a single mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    mode: Mode,
    char_count: usize,
    data: BitBuffer,
}

impl Segment {
    /// Encode `payload` as a single segment in the densest applicable mode.
    pub fn from_payload(payload: &[u8]) -> Segment {
        match Mode::for_data(payload) {
            Mode::Numeric => Self::numeric(payload),
            Mode::Alphanumeric => Self::alphanumeric(payload),
            Mode::Byte => Self::bytes(payload),
        }
    }

    pub fn bytes(data: &[u8]) -> Segment {
        let mut bits = BitBuffer::new();
        for &b in data {
            bits.append(u32::from(b), 8);
        }
        Segment {
            mode: Mode::Byte,
            char_count: data.len(),
            data: bits,
        }
    }

    /// Digits are packed three at a time into 10 bits (7 or 4 for a short tail).
    ///
    /// Callers guarantee `digits` holds only ASCII digits.
    pub fn numeric(digits: &[u8]) -> Segment {
        let mut bits = BitBuffer::new();
        for chunk in digits.chunks(3) {
            let value = chunk
                .iter()
                .fold(0u32, |acc, &d| acc * 10 + u32::from(d - b'0'));
            bits.append(value, chunk.len() * 3 + 1);
        }
        Segment {
            mode: Mode::Numeric,
            char_count: digits.len(),
            data: bits,
        }
    }

    /// Characters are packed in pairs into 11 bits (6 for an odd tail).
    ///
    /// Callers guarantee `text` holds only alphanumeric-mode characters.
    pub fn alphanumeric(text: &[u8]) -> Segment {
        let code = |c: u8| -> u32 {
            ALPHANUMERIC_CHARSET
                .iter()
                .position(|&x| x == c)
                .map_or(0, |p| p as u32)
        };
        let mut bits = BitBuffer::new();
        for pair in text.chunks(2) {
            match *pair {
                [a, b] => bits.append(code(a) * 45 + code(b), 11),
                [a] => bits.append(code(a), 6),
                _ => unreachable!("chunks(2) yields one or two items"),
            }
        }
        Segment {
            mode: Mode::Alphanumeric,
            char_count: text.len(),
            data: bits,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn char_count(&self) -> usize {
        self.char_count
    }

    /// Total bits this segment occupies at `version`, or `None` when the
    /// character count does not fit the count field.
    pub fn encoded_bits(&self, version: Version) -> Option<usize> {
        let count_bits = self.mode.char_count_bits(version);
        if self.char_count >= 1 << count_bits {
            return None;
        }
        Some(4 + count_bits + self.data.len())
    }

    /// Append header and data to `out`.
    pub fn write_to(&self, out: &mut BitBuffer, version: Version) {
        out.append(self.mode.indicator(), 4);
        out.append(self.char_count as u32, self.mode.char_count_bits(version));
        out.bits.extend_from_slice(&self.data.bits);
    }
}

/// Total bits for all segments at `version`, or `None` if any count overflows.
pub fn total_bits(segments: &[Segment], version: Version) -> Option<usize> {
    segments
        .iter()
        .try_fold(0usize, |acc, seg| Some(acc + seg.encoded_bits(version)?))
}

/// Build the full data codeword sequence for `version`, including terminator and padding.
///
/// `capacity_bits` must be a multiple of 8 and at least `total_bits(segments, version)`.
pub fn build_data_codewords(
    segments: &[Segment],
    version: Version,
    capacity_bits: usize,
) -> Vec<u8> {
    let mut bits = BitBuffer::new();
    for seg in segments {
        seg.write_to(&mut bits, version);
    }
    debug_assert!(bits.len() <= capacity_bits);

    let terminator = (capacity_bits - bits.len()).min(4);
    bits.append(0, terminator);
    let align = (8 - bits.len() % 8) % 8;
    bits.append(0, align);

    let mut codewords = bits.to_bytes();
    for pad in [0xEC, 0x11].into_iter().cycle() {
        if codewords.len() * 8 >= capacity_bits {
            break;
        }
        codewords.push(pad);
    }
    codewords
}
