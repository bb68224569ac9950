//! Shuffled alphabet and the rank lookup table derived from it.
//!
//! The sort order is built in two steps from the plain alphabet:
//!
//! 1. swap each adjacent pair of letters (`ab` -> `ba`, `cd` -> `dc`, ...)
//! 2. swap the first half of the result with the second half
//!
//! which yields `mporqtsvuxwzybadcfehgjilkn`. The lookup table is the
//! inverse of that rule: `rank(b'm') == 0`, `rank(b'n') == 25`.
//!
//! Everything here is `const fn`, so [`Alphabet::DEFAULT`] is computed at
//! compile time.
use std::fmt;

use super::error::SortError;

/// Number of letters in the alphabet.
pub const ALPHABET_LEN: usize = 26;

/// The plain `a..z` alphabet.
pub const PLAIN: [u8; ALPHABET_LEN] = *b"abcdefghijklmnopqrstuvwxyz";

/// The rule string the shuffled order is derived from. Every position is
/// overwritten by the construction, so only its length matters.
pub const BASE_RULE: [u8; ALPHABET_LEN] = *b"mporqtsvuxwzybadcfehgjilkn";

/// One past the largest rank the lookup table can hand out:
/// letters take 0..26, every other byte `b` takes `26 + b`.
pub const RANK_LIMIT: usize = ALPHABET_LEN + 256;

/// Swap each `2k`th element with the `2k+1`th.
pub const fn swap_pairs(mut arr: [u8; ALPHABET_LEN]) -> [u8; ALPHABET_LEN] {
    let mut i = 0;
    while i < ALPHABET_LEN {
        (arr[i], arr[i + 1]) = (arr[i + 1], arr[i]);
        i += 2;
    }
    arr
}

/// Derive the effective rule from `base`: the first half of the rule is
/// taken from the second half of the pair-swapped alphabet and vice versa.
pub const fn derive_rule(base: [u8; ALPHABET_LEN]) -> [u8; ALPHABET_LEN] {
    const HALF: usize = ALPHABET_LEN / 2;
    let shifted = swap_pairs(PLAIN);
    let mut rule = base;
    let mut i = 0;
    while i < HALF {
        rule[i] = shifted[HALF + i];
        i += 1;
    }
    let mut i = 0;
    while i < HALF {
        rule[HALF + i] = shifted[i];
        i += 1;
    }
    rule
}

/// Invert `rule` into a table indexed by byte value.
///
/// Bytes that are not in the rule get `26 + byte`, so they sort after all
/// letters and among themselves in byte order. The table stays a bijection
/// over all 256 byte values as long as `rule` is a permutation of `a..z`.
const fn build_table(rule: &[u8; ALPHABET_LEN]) -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut b = 0;
    while b < 256 {
        table[b] = (ALPHABET_LEN + b) as u16;
        b += 1;
    }
    let mut i = 0;
    while i < ALPHABET_LEN {
        table[rule[i] as usize] = i as u16;
        i += 1;
    }
    table
}

/// A sort order over bytes: the effective rule plus its lookup table.
///
/// Built once and passed by reference to every comparison.
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    rule: [u8; ALPHABET_LEN],
    table: [u16; 256],
}

impl Alphabet {
    /// The shuffled order derived from [`BASE_RULE`].
    pub const DEFAULT: Alphabet = Alphabet::shuffled(BASE_RULE);

    /// Run the pair-swap / half-swap construction on `base`.
    pub const fn shuffled(base: [u8; ALPHABET_LEN]) -> Self {
        let rule = derive_rule(base);
        Alphabet {
            table: build_table(&rule),
            rule,
        }
    }

    /// Use `rule` as the effective order as-is.
    ///
    /// Rejects anything that is not a permutation of the 26 lowercase
    /// letters, since a duplicate or missing letter would leave the
    /// lookup table non-bijective.
    pub fn from_rule(rule: &str) -> Result<Self, SortError> {
        let bytes = rule.as_bytes();
        if bytes.len() != ALPHABET_LEN {
            return Err(SortError::InvalidRule(format!(
                "expected {} letters, got {}",
                ALPHABET_LEN,
                bytes.len()
            )));
        }
        let mut seen = [false; ALPHABET_LEN];
        for &b in bytes {
            if !b.is_ascii_lowercase() {
                return Err(SortError::InvalidRule(format!(
                    "'{}' is not a lowercase letter",
                    b.escape_ascii()
                )));
            }
            let slot = &mut seen[(b - b'a') as usize];
            if *slot {
                return Err(SortError::InvalidRule(format!(
                    "letter '{}' appears more than once",
                    b as char
                )));
            }
            *slot = true;
        }

        let mut arr = [0u8; ALPHABET_LEN];
        arr.copy_from_slice(bytes);
        Ok(Alphabet {
            table: build_table(&arr),
            rule: arr,
        })
    }

    /// Sort rank of `byte`.
    #[inline(always)]
    pub fn rank(&self, byte: u8) -> u16 {
        self.table[byte as usize]
    }

    /// The effective rule: `rule()[r]` is the letter with rank `r`.
    pub fn rule(&self) -> &[u8; ALPHABET_LEN] {
        &self.rule
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.rule {
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Alphabet").field(&self.to_string()).finish()
    }
}
