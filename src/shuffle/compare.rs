/// Comparison under a shuffled alphabet.
/// Both functions are allocation-free and total over arbitrary bytes.
use std::cmp::Ordering;

use super::alphabet::Alphabet;

/// Number of leading positions packed into a [`rank_key`].
pub const KEY_DIGITS: usize = 14;

/// Bits per packed position. `rank + 1` tops out at 282, which needs 9.
const DIGIT_BITS: u32 = 9;

/// Compare two lines rank by rank.
///
/// The first differing rank decides; if one line is a prefix of the other
/// the shorter one sorts first; identical lines are equal.
#[inline]
pub fn compare_lines(a: &[u8], b: &[u8], alphabet: &Alphabet) -> Ordering {
    for (&x, &y) in a.iter().zip(b) {
        if x != y {
            let ord = alphabet.rank(x).cmp(&alphabet.rank(y));
            if ord != Ordering::Equal {
                return ord;
            }
        }
    }
    a.len().cmp(&b.len())
}

/// Pack the first [`KEY_DIGITS`] positions of `line` into an integer,
/// most significant first: `rank + 1` for a byte, 0 past the end.
///
/// When two keys differ their order matches [`compare_lines`]; equal keys
/// only mean the lines agree on the packed prefix.
#[inline]
pub fn rank_key(line: &[u8], alphabet: &Alphabet) -> u128 {
    let mut key = 0u128;
    for i in 0..KEY_DIGITS {
        key <<= DIGIT_BITS;
        if let Some(&b) = line.get(i) {
            key |= alphabet.rank(b) as u128 + 1;
        }
    }
    key
}

/// Position of the first byte outside `a..z`, if any.
#[inline]
pub fn find_foreign_byte(line: &[u8]) -> Option<usize> {
    line.iter().position(|b| !b.is_ascii_lowercase())
}
