//! Similarity scores used to gate title detection and continuation.
//!
//! Both scores are pure functions of two strings so they can be tested
//! without any geometry. Lengths are counted in `char`s.

use std::collections::HashMap;

/// A block starts the title when `distance / len(text)` is below this.
pub const TITLE_DISTANCE_THRESHOLD: f64 = 1.0;

/// A line continues the title when `matching / len(text)` is above this.
pub const CONTINUATION_THRESHOLD: f64 = 0.95;

/// Sequences at least this long have their popular elements ignored.
const AUTOJUNK_MIN_LEN: usize = 200;

/// Edit distance between `title` and `text`, normalized by the length of `text`.
///
/// Returns `None` for empty text.
pub fn title_distance_ratio(title: &str, text: &str) -> Option<f64> {
    let len = text.chars().count();
    if len == 0 {
        return None;
    }
    Some(strsim::levenshtein(title, text) as f64 / len as f64)
}

/// Characters of `text` covered by blocks matching `title`, normalized by the
/// length of `text`.
///
/// Returns `None` for empty text.
pub fn continuation_ratio(title: &str, text: &str) -> Option<f64> {
    let len = text.chars().count();
    if len == 0 {
        return None;
    }
    Some(matching_chars(title, text) as f64 / len as f64)
}

/// Total size of the matching blocks between `a` and `b`.
pub fn matching_chars(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    SequenceMatcher::new(&a, &b)
        .matching_blocks()
        .iter()
        .map(|m| m.size)
        .sum()
}

/// A run of `size` equal elements at `a[a_start..]` and `b[b_start..]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchingBlock {
    pub a_start: usize,
    pub b_start: usize,
    pub size: usize,
}

/// Ratcliff/Obershelp matcher: finds the longest common contiguous block, then
/// recurses on the unmatched pieces to its left and right.
pub struct SequenceMatcher<'s, T> {
    a: &'s [T],
    b: &'s [T],
    b2j: HashMap<&'s T, Vec<usize>>,
}

impl<'s, T: Eq + std::hash::Hash> SequenceMatcher<'s, T> {
    pub fn new(a: &'s [T], b: &'s [T]) -> Self {
        let mut b2j: HashMap<&T, Vec<usize>> = HashMap::new();
        for (j, elt) in b.iter().enumerate() {
            b2j.entry(elt).or_default().push(j);
        }

        // Elements making up more than 1% of a long `b` are never used as anchors.
        if b.len() >= AUTOJUNK_MIN_LEN {
            let ntest = b.len() / 100 + 1;
            b2j.retain(|_, indices| indices.len() <= ntest);
        }

        Self { a, b, b2j }
    }

    /// Longest matching block in `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Ties resolve to the earliest start in `a`, then in `b`.
    fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> MatchingBlock {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
        let mut j2len: HashMap<usize, usize> = HashMap::new();

        for i in alo..ahi {
            let mut next_j2len = HashMap::new();
            if let Some(indices) = self.b2j.get(&self.a[i]) {
                for &j in indices {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_j2len.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            j2len = next_j2len;
        }

        // Grow over elements that were dropped from the index.
        while best_i > alo && best_j > blo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && self.a[best_i + best_size] == self.b[best_j + best_size]
        {
            best_size += 1;
        }

        MatchingBlock {
            a_start: best_i,
            b_start: best_j,
            size: best_size,
        }
    }

    /// All matching blocks, ordered by position.
    pub fn matching_blocks(&self) -> Vec<MatchingBlock> {
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];
        let mut blocks = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let m = self.find_longest_match(alo, ahi, blo, bhi);
            if m.size == 0 {
                continue;
            }
            if alo < m.a_start && blo < m.b_start {
                queue.push((alo, m.a_start, blo, m.b_start));
            }
            if m.a_start + m.size < ahi && m.b_start + m.size < bhi {
                queue.push((m.a_start + m.size, ahi, m.b_start + m.size, bhi));
            }
            blocks.push(m);
        }

        blocks.sort();
        blocks
    }
}
