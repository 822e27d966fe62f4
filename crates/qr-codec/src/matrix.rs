//! Module grid and symbol layout: function patterns, format/version
//! information, and zig-zag codeword placement.

use crate::mask::Mask;
use crate::version::{EcLevel, Version};

/// Square grid of modules; `true` is dark.
///
/// Coordinates are `(x, y)` with `x` the column and `y` the row, origin top-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleGrid {
    size: usize,
    modules: Vec<bool>,
}

impl ModuleGrid {
    /// An all-light grid.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            modules: vec![false; size * size],
        }
    }

    /// Wrap a row-major module vector. Returns `None` unless it holds `size * size` entries.
    pub fn from_modules(size: usize, modules: Vec<bool>) -> Option<Self> {
        (modules.len() == size * size).then_some(Self { size, modules })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.modules[y * self.size + x]
    }

    pub fn set(&mut self, x: usize, y: usize, dark: bool) {
        self.modules[y * self.size + x] = dark;
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.modules.chunks(self.size.max(1))
    }

    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|&&m| m).count()
    }

    /// Text rendering with `#` for dark modules, one line per row. Handy in logs and tests.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.size * (self.size + 1));
        for row in self.rows() {
            out.extend(row.iter().map(|&m| if m { '#' } else { '.' }));
            out.push('\n');
        }
        out
    }
}

/// 15-bit format information word: EC level and mask, BCH(15,5) protected and XOR-masked.
pub fn format_bits(ec_level: EcLevel, mask: Mask) -> u32 {
    let data = (ec_level.format_bits() << 3) | u32::from(mask.value());
    let mut rem = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * 0x537);
    }
    ((data << 10) | rem) ^ 0x5412
}

/// 18-bit version information word, BCH(18,6) protected. Only used from version 7 on.
pub fn version_bits(version: Version) -> u32 {
    let data = u32::from(version.number());
    let mut rem = data;
    for _ in 0..12 {
        rem = (rem << 1) ^ ((rem >> 11) * 0x1F25);
    }
    (data << 12) | rem
}

fn bit(word: u32, i: usize) -> bool {
    (word >> i) & 1 != 0
}

/// A grid under construction, tracking which modules belong to function patterns.
#[derive(Debug, Clone)]
pub(crate) struct Canvas {
    version: Version,
    ec_level: EcLevel,
    grid: ModuleGrid,
    function: Vec<bool>,
}

impl Canvas {
    /// Lay out every function pattern. Format modules are reserved but not yet final.
    pub(crate) fn new(version: Version, ec_level: EcLevel) -> Self {
        let size = version.size();
        let mut canvas = Self {
            version,
            ec_level,
            grid: ModuleGrid::new(size),
            function: vec![false; size * size],
        };
        canvas.draw_timing_patterns();
        canvas.draw_finder(3, 3);
        canvas.draw_finder(size - 4, 3);
        canvas.draw_finder(3, size - 4);
        canvas.draw_alignment_patterns();
        canvas.draw_format_bits(Mask::ALL[0]);
        canvas.draw_version();
        canvas
    }

    pub(crate) fn grid(&self) -> &ModuleGrid {
        &self.grid
    }

    pub(crate) fn into_grid(self) -> ModuleGrid {
        self.grid
    }

    pub(crate) fn is_function(&self, x: usize, y: usize) -> bool {
        self.function[y * self.grid.size + x]
    }

    fn set_function(&mut self, x: usize, y: usize, dark: bool) {
        self.grid.set(x, y, dark);
        self.function[y * self.grid.size + x] = true;
    }

    fn draw_timing_patterns(&mut self) {
        for i in 0..self.grid.size {
            self.set_function(6, i, i % 2 == 0);
            self.set_function(i, 6, i % 2 == 0);
        }
    }

    /// 7x7 finder centred on `(cx, cy)` with its light separator ring.
    fn draw_finder(&mut self, cx: usize, cy: usize) {
        let size = self.grid.size as isize;
        for dy in -4isize..=4 {
            for dx in -4isize..=4 {
                let x = cx as isize + dx;
                let y = cy as isize + dy;
                if !(0..size).contains(&x) || !(0..size).contains(&y) {
                    continue;
                }
                let dist = dx.abs().max(dy.abs());
                self.set_function(x as usize, y as usize, dist != 2 && dist != 4);
            }
        }
    }

    fn draw_alignment_patterns(&mut self) {
        let positions = self.version.alignment_positions();
        let last = positions.len().saturating_sub(1);
        for (i, &y) in positions.iter().enumerate() {
            for (j, &x) in positions.iter().enumerate() {
                let on_finder = (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0);
                if !on_finder {
                    self.draw_alignment(x, y);
                }
            }
        }
    }

    /// 5x5 alignment pattern centred on `(cx, cy)`.
    fn draw_alignment(&mut self, cx: usize, cy: usize) {
        for dy in 0..5usize {
            for dx in 0..5usize {
                let dist = dx.abs_diff(2).max(dy.abs_diff(2));
                self.set_function(cx + dx - 2, cy + dy - 2, dist != 1);
            }
        }
    }

    /// Write both copies of the format information, plus the always-dark module.
    pub(crate) fn draw_format_bits(&mut self, mask: Mask) {
        let bits = format_bits(self.ec_level, mask);
        let size = self.grid.size;

        // Around the top-left finder
        for i in 0..=5 {
            self.set_function(8, i, bit(bits, i));
        }
        self.set_function(8, 7, bit(bits, 6));
        self.set_function(8, 8, bit(bits, 7));
        self.set_function(7, 8, bit(bits, 8));
        for i in 9..15 {
            self.set_function(14 - i, 8, bit(bits, i));
        }

        // Split between the top-right and bottom-left finders
        for i in 0..8 {
            self.set_function(size - 1 - i, 8, bit(bits, i));
        }
        for i in 8..15 {
            self.set_function(8, size - 15 + i, bit(bits, i));
        }
        self.set_function(8, size - 8, true);
    }

    fn draw_version(&mut self) {
        if self.version.number() < 7 {
            return;
        }
        let bits = version_bits(self.version);
        let size = self.grid.size;
        for i in 0..18 {
            let a = size - 11 + i % 3;
            let b = i / 3;
            self.set_function(a, b, bit(bits, i));
            self.set_function(b, a, bit(bits, i));
        }
    }

    /// Place codewords in the two-column zig-zag, skipping function modules.
    /// Modules left over after the last codeword stay light (remainder bits).
    pub(crate) fn draw_codewords(&mut self, codewords: &[u8]) {
        debug_assert_eq!(codewords.len(), self.version.total_codewords());
        let size = self.grid.size;
        let total_bits = codewords.len() * 8;
        let mut i = 0;

        let mut right = size - 1;
        while right >= 1 {
            // The vertical timing pattern shifts the column pairs left by one.
            if right == 6 {
                right = 5;
            }
            let upward = (right + 1) & 2 == 0;
            for vert in 0..size {
                let y = if upward { size - 1 - vert } else { vert };
                for x in [right, right - 1] {
                    if i < total_bits && !self.is_function(x, y) {
                        let dark = (codewords[i >> 3] >> (7 - (i & 7))) & 1 != 0;
                        self.grid.set(x, y, dark);
                        i += 1;
                    }
                }
            }
            if right < 2 {
                break;
            }
            right -= 2;
        }
        debug_assert_eq!(i, total_bits);
    }

    /// XOR the mask pattern over every data module. Applying the same mask twice undoes it.
    pub(crate) fn apply_mask(&mut self, mask: Mask) {
        let size = self.grid.size;
        for y in 0..size {
            for x in 0..size {
                if !self.is_function(x, y) && mask.inverts(x, y) {
                    let current = self.grid.get(x, y);
                    self.grid.set(x, y, !current);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(n: u8) -> Mask {
        Mask::new(n).unwrap()
    }

    #[test]
    fn test_format_bits_known_values() {
        assert_eq!(format_bits(EcLevel::M, mask(0)), 0b101010000010010);
        assert_eq!(format_bits(EcLevel::L, mask(0)), 0b111011111000100);
        assert_eq!(format_bits(EcLevel::H, mask(7)), 0b000100000111011);
    }

    #[test]
    fn test_version_bits_known_values() {
        assert_eq!(version_bits(Version::new(7).unwrap()), 0x07C94);
        assert_eq!(version_bits(Version::new(40).unwrap()), 0x28C69);
    }

    #[test]
    fn test_finder_patterns_drawn() {
        let canvas = Canvas::new(Version::MIN, EcLevel::M);
        let grid = canvas.grid();
        let size = grid.size();
        for (cx, cy) in [(3, 3), (size - 4, 3), (3, size - 4)] {
            assert!(grid.get(cx, cy), "finder centre dark");
            assert!(grid.get(cx - 3, cy - 3), "finder corner dark");
            assert!(!grid.get(cx - 2, cy - 2), "finder inner ring light");
        }
        // separator next to the top-left finder
        assert!(!grid.get(7, 0));
        assert!(!grid.get(0, 7));
    }

    #[test]
    fn test_timing_and_dark_module() {
        let canvas = Canvas::new(Version::new(2).unwrap(), EcLevel::L);
        let grid = canvas.grid();
        let size = grid.size();
        for i in 8..size - 8 {
            assert_eq!(grid.get(i, 6), i % 2 == 0);
            assert_eq!(grid.get(6, i), i % 2 == 0);
        }
        assert!(grid.get(8, size - 8));
    }

    #[test]
    fn test_data_module_count_matches_raw_capacity() {
        for n in [1, 2, 6, 7, 14, 21, 32, 40] {
            let version = Version::new(n).unwrap();
            let canvas = Canvas::new(version, EcLevel::M);
            let size = version.size();
            let free = (0..size)
                .flat_map(|y| (0..size).map(move |x| (x, y)))
                .filter(|&(x, y)| !canvas.is_function(x, y))
                .count();
            assert_eq!(free, version.raw_data_modules(), "version {n}");
        }
    }

    #[test]
    fn test_alignment_pattern_version_2() {
        let canvas = Canvas::new(Version::new(2).unwrap(), EcLevel::M);
        let grid = canvas.grid();
        assert!(grid.get(18, 18));
        assert!(!grid.get(17, 18));
        assert!(grid.get(16, 16));
        assert!(canvas.is_function(20, 20));
    }

    #[test]
    fn test_alignment_pattern_rings_version_7() {
        // centres at 6, 22 and 38; (22, 22) is the middle pattern
        let canvas = Canvas::new(Version::new(7).unwrap(), EcLevel::M);
        let grid = canvas.grid();
        for dy in 0..5usize {
            for dx in 0..5usize {
                let dist = dx.abs_diff(2).max(dy.abs_diff(2));
                assert_eq!(grid.get(20 + dx, 20 + dy), dist != 1, "({dx}, {dy})");
                assert!(canvas.is_function(20 + dx, 20 + dy));
            }
        }
        assert!(!canvas.is_function(19, 19));
    }

    #[test]
    fn test_apply_mask_twice_is_identity() {
        let mut canvas = Canvas::new(Version::new(3).unwrap(), EcLevel::Q);
        let words = vec![0xA5; Version::new(3).unwrap().total_codewords()];
        canvas.draw_codewords(&words);
        let before = canvas.grid().clone();
        canvas.apply_mask(mask(5));
        assert_ne!(canvas.grid(), &before);
        canvas.apply_mask(mask(5));
        assert_eq!(canvas.grid(), &before);
    }

    #[test]
    fn test_module_grid_from_modules_checks_length() {
        assert!(ModuleGrid::from_modules(2, vec![true; 4]).is_some());
        assert!(ModuleGrid::from_modules(2, vec![true; 3]).is_none());
    }

    #[test]
    fn test_to_text() {
        let mut grid = ModuleGrid::new(2);
        grid.set(1, 0, true);
        assert_eq!(grid.to_text(), ".#\n..\n");
        assert_eq!(grid.dark_count(), 1);
    }
}
