//! The eight data mask patterns and the penalty score used to pick one.

use std::fmt;

use crate::matrix::ModuleGrid;
use crate::{QrError, Result};

const PENALTY_N1: u32 = 3;
const PENALTY_N2: u32 = 3;
const PENALTY_N3: u32 = 40;
const PENALTY_N4: u32 = 10;

/// 1:1:3:1:1 finder-like run followed (or preceded) by four light modules.
const FINDER_LIKE_AFTER: [bool; 11] = [
    true, false, true, true, true, false, true, false, false, false, false,
];
const FINDER_LIKE_BEFORE: [bool; 11] = [
    false, false, false, false, true, false, true, true, true, false, true,
];

/// A data mask pattern, 0 through 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Mask(u8);

impl Mask {
    pub const ALL: [Mask; 8] = [
        Mask(0),
        Mask(1),
        Mask(2),
        Mask(3),
        Mask(4),
        Mask(5),
        Mask(6),
        Mask(7),
    ];

    pub fn new(value: u8) -> Result<Self> {
        if value < 8 {
            Ok(Self(value))
        } else {
            Err(QrError::InvalidMask(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Whether the module at column `x`, row `y` is flipped by this mask.
    pub fn inverts(self, x: usize, y: usize) -> bool {
        match self.0 {
            0 => (x + y) % 2 == 0,
            1 => y % 2 == 0,
            2 => x % 3 == 0,
            3 => (x + y) % 3 == 0,
            4 => (x / 3 + y / 2) % 2 == 0,
            5 => x * y % 2 + x * y % 3 == 0,
            6 => (x * y % 2 + x * y % 3) % 2 == 0,
            7 => ((x + y) % 2 + x * y % 3) % 2 == 0,
            _ => unreachable!("mask value checked at construction"),
        }
    }
}

impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Total penalty score of a finished symbol. Lower is better.
pub fn penalty(grid: &ModuleGrid) -> u32 {
    let columns = columns(grid);
    let lines = grid.rows().chain(columns.iter().map(Vec::as_slice));

    let mut score = 0;
    for line in lines {
        score += run_penalty(line);
        score += finder_like_penalty(line);
    }
    score + block_penalty(grid) + balance_penalty(grid)
}

fn columns(grid: &ModuleGrid) -> Vec<Vec<bool>> {
    let size = grid.size();
    (0..size)
        .map(|x| (0..size).map(|y| grid.get(x, y)).collect())
        .collect()
}

/// N1: runs of five or more same-coloured modules.
fn run_penalty(line: &[bool]) -> u32 {
    let mut score = 0;
    let mut run = 0u32;
    let mut previous = None;
    for &module in line {
        if previous == Some(module) {
            run += 1;
        } else {
            if run >= 5 {
                score += PENALTY_N1 + run - 5;
            }
            run = 1;
            previous = Some(module);
        }
    }
    if run >= 5 {
        score += PENALTY_N1 + run - 5;
    }
    score
}

/// N3: occurrences of the finder-like sequence.
fn finder_like_penalty(line: &[bool]) -> u32 {
    let hits = line
        .windows(FINDER_LIKE_AFTER.len())
        .filter(|w| *w == FINDER_LIKE_AFTER || *w == FINDER_LIKE_BEFORE)
        .count();
    hits as u32 * PENALTY_N3
}

/// N2: every 2x2 block of one colour.
fn block_penalty(grid: &ModuleGrid) -> u32 {
    let size = grid.size();
    let mut score = 0;
    for y in 0..size.saturating_sub(1) {
        for x in 0..size.saturating_sub(1) {
            let c = grid.get(x, y);
            if c == grid.get(x + 1, y) && c == grid.get(x, y + 1) && c == grid.get(x + 1, y + 1) {
                score += PENALTY_N2;
            }
        }
    }
    score
}

/// N4: distance of the dark proportion from 50%, in whole 5% steps.
fn balance_penalty(grid: &ModuleGrid) -> u32 {
    let total = grid.size() * grid.size();
    if total == 0 {
        return 0;
    }
    let dark = grid.dark_count();
    let deviation = (dark * 20).abs_diff(total * 10);
    let steps = deviation / total;
    steps as u32 * PENALTY_N4
}
