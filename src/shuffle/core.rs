/// Core load -> sort -> emit pipeline for shufflesort.
///
/// The whole input is held in one buffer (read() or mmap) and lines are
/// slices into it, so sorting only moves fat pointers around.
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

use tracing::debug;

use super::algo::Algorithm;
use super::alphabet::Alphabet;
use super::compare::find_foreign_byte;
use super::error::SortError;
use crate::common::io::read_file;

/// Line capacity used when none is configured.
pub const DEFAULT_MAX_LINES: usize = 1_000_000;

/// What to do with bytes outside `a..z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharPolicy {
    /// Refuse the input and report the first offending byte.
    #[default]
    Strict,
    /// Rank other bytes after `z`, in byte order among themselves.
    Fallback,
}

/// Configuration for a sort run.
#[derive(Debug, Clone)]
pub struct SortConfig {
    pub algorithm: Algorithm,
    pub policy: CharPolicy,
    pub max_lines: usize,
    pub expect_lines: Option<usize>,
    pub alphabet: Alphabet,
}

impl Default for SortConfig {
    fn default() -> Self {
        SortConfig {
            algorithm: Algorithm::default(),
            policy: CharPolicy::default(),
            max_lines: DEFAULT_MAX_LINES,
            expect_lines: None,
            alphabet: Alphabet::DEFAULT,
        }
    }
}

/// Count lines the way [`split_lines`] will produce them.
fn count_lines(data: &[u8]) -> usize {
    let terminated = memchr::memchr_iter(b'\n', data).count();
    if data.last().is_some_and(|&b| b != b'\n') {
        terminated + 1
    } else {
        terminated
    }
}

/// Split `data` into lines, preserving order.
///
/// A trailing `\r` is stripped from each line and a final line without a
/// newline is kept. The line count is checked against the configured
/// capacity before anything is allocated, and under [`CharPolicy::Strict`]
/// every byte is validated.
pub fn split_lines<'a>(
    data: &'a [u8],
    config: &SortConfig,
) -> Result<Vec<&'a [u8]>, SortError> {
    let found = count_lines(data);
    if found > config.max_lines {
        return Err(SortError::CapacityExceeded {
            max: config.max_lines,
            found,
        });
    }
    if let Some(expected) = config.expect_lines {
        if expected != found {
            return Err(SortError::LineCountMismatch { expected, found });
        }
    }

    let mut lines = Vec::with_capacity(found);
    let mut start = 0usize;
    for pos in memchr::memchr_iter(b'\n', data) {
        lines.push(trim_cr(&data[start..pos]));
        start = pos + 1;
    }
    if start < data.len() {
        lines.push(trim_cr(&data[start..]));
    }

    if config.policy == CharPolicy::Strict {
        validate_lines(&lines)?;
    }
    Ok(lines)
}

#[inline]
fn trim_cr(line: &[u8]) -> &[u8] {
    match line.split_last() {
        Some((b'\r', rest)) => rest,
        _ => line,
    }
}

/// Reject the first byte outside `a..z`, with 1-based line and column.
pub fn validate_lines<T: AsRef<[u8]>>(lines: &[T]) -> Result<(), SortError> {
    for (i, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        if let Some(col) = find_foreign_byte(line) {
            return Err(SortError::MalformedChar {
                line: i + 1,
                column: col + 1,
                byte: line[col],
            });
        }
    }
    Ok(())
}

/// Split and sort `data` under `config`.
pub fn sort_lines<'a>(
    data: &'a [u8],
    config: &SortConfig,
) -> Result<Vec<&'a [u8]>, SortError> {
    let start = Instant::now();
    let mut lines = split_lines(data, config)?;
    debug!(
        lines = lines.len(),
        bytes = data.len(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "split input"
    );

    let start = Instant::now();
    config.algorithm.sort(&mut lines, &config.alphabet);
    debug!(
        algorithm = %config.algorithm,
        elapsed_us = start.elapsed().as_micros() as u64,
        "sorted"
    );
    Ok(lines)
}

/// Write every line followed by `\n` as one buffer and one flush.
pub fn emit_lines<T: AsRef<[u8]>>(lines: &[T], out: &mut impl Write) -> io::Result<()> {
    let total: usize = lines.iter().map(|l| l.as_ref().len() + 1).sum();
    let mut buf = Vec::with_capacity(total);
    for line in lines {
        buf.extend_from_slice(line.as_ref());
        buf.push(b'\n');
    }
    out.write_all(&buf)?;
    out.flush()
}

/// Load `path`, sort it, and write the result to `out`.
pub fn sort_and_output(
    path: &Path,
    config: &SortConfig,
    out: &mut impl Write,
) -> Result<(), SortError> {
    debug!(
        path = %path.display(),
        alphabet = %config.alphabet,
        policy = ?config.policy,
        "loading"
    );

    let data = read_file(path).map_err(|source| SortError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(mapped = data.is_mapped(), bytes = data.len(), "read input");

    let lines = sort_lines(&data, config)?;
    emit_lines(&lines, out).map_err(SortError::Output)
}
