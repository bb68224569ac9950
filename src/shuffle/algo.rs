/// Sorting strategies. Every strategy takes the alphabet explicitly and
/// sorts in place; merge, radix, prefix and std are stable.
use std::cmp::{Ordering, Reverse};
use std::fmt;
use std::str::FromStr;

use super::alphabet::{Alphabet, RANK_LIMIT};
use super::compare::{compare_lines, rank_key};
use super::error::SortError;

/// Which sorting strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// In-place quicksort with a first-element pivot. Quadratic on
    /// input that is already sorted.
    Quick,
    /// Top-down merge sort; stable.
    #[default]
    Merge,
    /// LSD radix sort over per-position ranks; stable.
    Radix,
    /// Sort by packed 14-position rank keys, ties broken by full comparison.
    Prefix,
    /// The standard library's stable sort driven by the same comparator.
    Std,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Quick,
        Algorithm::Merge,
        Algorithm::Radix,
        Algorithm::Prefix,
        Algorithm::Std,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Quick => "quick",
            Algorithm::Merge => "merge",
            Algorithm::Radix => "radix",
            Algorithm::Prefix => "prefix",
            Algorithm::Std => "std",
        }
    }

    /// Whether lines that compare equal keep their input order.
    pub fn is_stable(self) -> bool {
        !matches!(self, Algorithm::Quick)
    }

    pub fn sort<T: AsRef<[u8]> + Clone>(self, lines: &mut [T], alphabet: &Alphabet) {
        match self {
            Algorithm::Quick => quicksort(lines, alphabet),
            Algorithm::Merge => merge_sort(lines, alphabet),
            Algorithm::Radix => radix_sort(lines, alphabet),
            Algorithm::Prefix => prefix_sort(lines, alphabet),
            Algorithm::Std => {
                lines.sort_by(|a, b| compare_lines(a.as_ref(), b.as_ref(), alphabet))
            }
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quick" | "quicksort" => Ok(Algorithm::Quick),
            "merge" | "mergesort" => Ok(Algorithm::Merge),
            "radix" | "radixsort" => Ok(Algorithm::Radix),
            "prefix" => Ok(Algorithm::Prefix),
            "std" => Ok(Algorithm::Std),
            _ => Err(SortError::InvalidAlgorithm(s.to_string())),
        }
    }
}

pub fn quicksort<T: AsRef<[u8]>>(lines: &mut [T], alphabet: &Alphabet) {
    quicksort_by(lines, &mut |a: &T, b: &T| {
        compare_lines(a.as_ref(), b.as_ref(), alphabet)
    });
}

/// Quicksort with `v[0]` as pivot.
///
/// Recurses into the smaller partition and loops on the larger one, so the
/// stack stays O(log n) even for already-sorted input. Time does not: a
/// sorted range peels off one element per partition, O(n^2) comparisons.
pub fn quicksort_by<T, F>(mut v: &mut [T], cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    while v.len() > 1 {
        let p = partition(v, cmp);
        let (left, rest) = std::mem::take(&mut v).split_at_mut(p);
        let right = &mut rest[1..];
        if left.len() < right.len() {
            quicksort_by(left, cmp);
            v = right;
        } else {
            quicksort_by(right, cmp);
            v = left;
        }
    }
}

/// Partition around `v[0]` and return the pivot's final index.
///
/// `low` scans right past elements smaller than the pivot, `high` scans left
/// past elements larger than it; both stop on equal elements so runs of
/// duplicates split evenly instead of degrading to quadratic time.
/// Requires `v.len() >= 2`.
fn partition<T, F>(v: &mut [T], cmp: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let end = v.len() - 1;
    let mut low = 0;
    let mut high = v.len();
    loop {
        low += 1;
        while cmp(&v[low], &v[0]) == Ordering::Less {
            if low == end {
                break;
            }
            low += 1;
        }
        high -= 1;
        while cmp(&v[0], &v[high]) == Ordering::Less {
            high -= 1;
        }
        if low >= high {
            break;
        }
        v.swap(low, high);
    }
    v.swap(0, high);
    high
}

pub fn merge_sort<T: AsRef<[u8]> + Clone>(lines: &mut [T], alphabet: &Alphabet) {
    merge_sort_by(lines, &mut |a: &T, b: &T| {
        compare_lines(a.as_ref(), b.as_ref(), alphabet)
    });
}

/// Top-down merge sort. The left half gets the middle element, matching an
/// inclusive `(left + right) / 2` split.
pub fn merge_sort_by<T: Clone, F>(v: &mut [T], cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    if v.len() <= 1 {
        return;
    }
    let mid = v.len().div_ceil(2);
    merge_sort_by(&mut v[..mid], cmp);
    merge_sort_by(&mut v[mid..], cmp);
    merge(v, mid, cmp);
}

/// Merge the sorted runs `v[..mid]` and `v[mid..]` through a scratch buffer.
/// Ties take from the left run, which keeps the sort stable.
fn merge<T: Clone, F>(v: &mut [T], mid: usize, cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut merged = Vec::with_capacity(v.len());
    let (mut i, mut j) = (0, mid);

    while i < mid && j < v.len() {
        if cmp(&v[i], &v[j]) != Ordering::Greater {
            merged.push(v[i].clone());
            i += 1;
        } else {
            merged.push(v[j].clone());
            j += 1;
        }
    }
    merged.extend_from_slice(&v[i..mid]);
    merged.extend_from_slice(&v[j..]);

    v.clone_from_slice(&merged);
}

/// Bucket of `line` at `pos`: 0 past the end, `rank + 1` otherwise.
#[inline]
fn radix_bucket(line: &[u8], pos: usize, alphabet: &Alphabet) -> usize {
    match line.get(pos) {
        Some(&b) => alphabet.rank(b) as usize + 1,
        None => 0,
    }
}

/// Number of radix buckets: one for "past the end" plus one per rank.
pub const RADIX_BUCKETS: usize = RANK_LIMIT + 1;

/// Stable LSD radix sort.
///
/// One counting-sort pass per character position, from the last position
/// of the longest line down to the first. A line only takes part in the
/// passes for positions it actually has: lines past their end would all land
/// in bucket 0 and stay ahead of the rest in input order, so they are kept
/// out of the pass and joined (in input order) once `pos` reaches their last
/// byte. Total work is proportional to the input size, not to
/// `lines * longest line`.
pub fn radix_sort<T: AsRef<[u8]> + Clone>(lines: &mut [T], alphabet: &Alphabet) {
    let n = lines.len();
    if n <= 1 {
        return;
    }

    // Longest first; equal lengths keep input order.
    let mut by_len: Vec<usize> = (0..n).collect();
    by_len.sort_by_key(|&i| Reverse(lines[i].as_ref().len()));
    let width = lines[by_len[0]].as_ref().len();

    let mut active: Vec<usize> = Vec::with_capacity(n);
    let mut pass: Vec<usize> = Vec::with_capacity(n);
    let mut digits: Vec<usize> = Vec::with_capacity(n);
    let mut next = 0;

    for pos in (0..width).rev() {
        let joined = by_len[next..]
            .iter()
            .take_while(|&&i| lines[i].as_ref().len() > pos)
            .count();
        pass.clear();
        pass.extend_from_slice(&by_len[next..next + joined]);
        pass.extend_from_slice(&active);
        next += joined;

        let mut counts = [0usize; RADIX_BUCKETS];
        digits.clear();
        for &i in &pass {
            let d = radix_bucket(lines[i].as_ref(), pos, alphabet);
            digits.push(d);
            counts[d] += 1;
        }
        if counts[digits[0]] == pass.len() {
            std::mem::swap(&mut active, &mut pass);
            continue;
        }

        // Prefix sums -> starting offsets
        let mut sum = 0usize;
        for c in counts.iter_mut() {
            let tmp = *c;
            *c = sum;
            sum += tmp;
        }

        active.clear();
        active.resize(pass.len(), 0);
        for (&i, &d) in pass.iter().zip(&digits) {
            active[counts[d]] = i;
            counts[d] += 1;
        }
    }

    // Whatever never joined is empty and sorts first, in input order.
    let mut order = by_len[next..].to_vec();
    order.extend_from_slice(&active);
    let sorted: Vec<T> = order.iter().map(|&i| lines[i].clone()).collect();
    lines.clone_from_slice(&sorted);
}

/// Decorate each line with its [`rank_key`], sort the keys, and only fall
/// back to a full comparison when two keys collide.
pub fn prefix_sort<T: AsRef<[u8]> + Clone>(lines: &mut [T], alphabet: &Alphabet) {
    if lines.len() <= 1 {
        return;
    }
    let mut entries: Vec<(u128, usize)> = lines
        .iter()
        .enumerate()
        .map(|(i, l)| (rank_key(l.as_ref(), alphabet), i))
        .collect();

    entries.sort_by(|a, b| match a.0.cmp(&b.0) {
        Ordering::Equal => compare_lines(lines[a.1].as_ref(), lines[b.1].as_ref(), alphabet),
        ord => ord,
    });

    let sorted: Vec<T> = entries.iter().map(|&(_, i)| lines[i].clone()).collect();
    lines.clone_from_slice(&sorted);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &str) -> Vec<&[u8]> {
        s.split_whitespace().map(str::as_bytes).collect()
    }

    #[test]
    fn test_partition_places_pivot() {
        let mut v = vec![5, 3, 8, 1, 9, 5, 2];
        let p = partition(&mut v, &mut |a: &i32, b: &i32| a.cmp(b));
        assert_eq!(v[p], 5);
        assert!(v[..p].iter().all(|&x| x <= 5));
        assert!(v[p + 1..].iter().all(|&x| x >= 5));
    }

    #[test]
    fn test_partition_two_elements() {
        let mut v = vec![1, 2];
        let p = partition(&mut v, &mut |a: &i32, b: &i32| a.cmp(b));
        assert_eq!(p, 0);
        assert_eq!(v, vec![1, 2]);

        let mut v = vec![2, 1];
        let p = partition(&mut v, &mut |a: &i32, b: &i32| a.cmp(b));
        assert_eq!(p, 1);
        assert_eq!(v, vec![1, 2]);
    }

    #[test]
    fn test_partition_all_equal() {
        let mut v = vec![7; 9];
        let p = partition(&mut v, &mut |a: &i32, b: &i32| a.cmp(b));
        // Equal elements stop both scans, so the pivot lands mid-range.
        assert!(p > 0 && p < 8, "pivot at {}", p);
    }

    #[test]
    fn test_quicksort_by_integers() {
        let mut v = vec![9, 1, 8, 2, 7, 3, 6, 4, 5, 0, 5, 5];
        quicksort_by(&mut v, &mut |a: &i32, b: &i32| a.cmp(b));
        assert_eq!(v, vec![0, 1, 2, 3, 4, 5, 5, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_quicksort_sorted_input_deep() {
        let mut v: Vec<u32> = (0..5_000).collect();
        quicksort_by(&mut v, &mut |a: &u32, b: &u32| a.cmp(b));
        assert!(v.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_merge_sort_by_stable() {
        let mut v = vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')];
        merge_sort_by(&mut v, &mut |a: &(i32, char), b: &(i32, char)| a.0.cmp(&b.0));
        assert_eq!(v, vec![(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]);
    }

    #[test]
    fn test_radix_prefix_before_extension() {
        let alphabet = Alphabet::DEFAULT;
        let mut v = words("mpo mp m mpom");
        radix_sort(&mut v, &alphabet);
        assert_eq!(v, words("m mp mpo mpom"));
    }

    #[test]
    fn test_radix_follows_rank_not_bytes() {
        let alphabet = Alphabet::DEFAULT;
        let mut v = words("a n m z");
        radix_sort(&mut v, &alphabet);
        // m=0, z=11, a=14, n=25
        assert_eq!(v, words("m z a n"));
    }

    #[test]
    fn test_radix_with_empty_lines() {
        let alphabet = Alphabet::DEFAULT;
        let mut v: Vec<&[u8]> = vec![b"p", b"", b"m", b""];
        radix_sort(&mut v, &alphabet);
        assert_eq!(v, vec![&b""[..], b"", b"m", b"p"]);
    }

    #[test]
    fn test_radix_one_long_line_among_short() {
        let alphabet = Alphabet::DEFAULT;
        let mut state: u32 = 0x2545_F491;
        let mut next_letter = || {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            b'a' + (state % 26) as u8
        };
        let mut owned: Vec<Vec<u8>> = (0..20_000)
            .map(|_| (0..3).map(|_| next_letter()).collect())
            .collect();
        let long: Vec<u8> = (0..100_000).map(|_| next_letter()).collect();
        let mut longer = long.clone();
        longer.push(b'm');
        owned.insert(7_000, long);
        owned.insert(3_000, longer);

        let mut expected: Vec<&[u8]> = owned.iter().map(Vec::as_slice).collect();
        Algorithm::Std.sort(&mut expected, &alphabet);
        let mut v: Vec<&[u8]> = owned.iter().map(Vec::as_slice).collect();
        radix_sort(&mut v, &alphabet);
        assert_eq!(v, expected);
    }

    #[test]
    fn test_radix_stable_with_mixed_lengths() {
        let alphabet = Alphabet::DEFAULT;
        let (first, second) = (b"pm".to_vec(), b"pm".to_vec());
        let mut v: Vec<&[u8]> =
            vec![first.as_slice(), b"pmm", b"", b"p", second.as_slice(), b""];
        radix_sort(&mut v, &alphabet);
        assert_eq!(v, vec![&b""[..], b"", b"p", b"pm", b"pm", b"pmm"]);
        assert!(std::ptr::eq(v[3], first.as_slice()));
        assert!(std::ptr::eq(v[4], second.as_slice()));
    }

    #[test]
    fn test_prefix_sort_long_shared_prefix() {
        let alphabet = Alphabet::DEFAULT;
        // Lines agree on the first KEY_DIGITS positions and differ after.
        let mut v = words("aaaaaaaaaaaaaaaaaan aaaaaaaaaaaaaaaaaam aaaaaaaaaaaaaaaaaa");
        prefix_sort(&mut v, &alphabet);
        assert_eq!(
            v,
            words("aaaaaaaaaaaaaaaaaa aaaaaaaaaaaaaaaaaam aaaaaaaaaaaaaaaaaan")
        );
    }

    #[test]
    fn test_algorithm_from_str() {
        assert_eq!("quick".parse::<Algorithm>().unwrap(), Algorithm::Quick);
        assert_eq!("mergesort".parse::<Algorithm>().unwrap(), Algorithm::Merge);
        assert_eq!("radix".parse::<Algorithm>().unwrap(), Algorithm::Radix);
        assert!("bogo".parse::<Algorithm>().is_err());
        for algo in Algorithm::ALL {
            assert_eq!(algo.name().parse::<Algorithm>().unwrap(), algo);
        }
    }
}
