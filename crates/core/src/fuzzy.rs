//! Fuzzy name matching
//!
//! Similarity is the Ratcliff/Obershelp "gestalt" ratio: find the longest
//! common block, recurse on the pieces to its left and right, and score
//! `2 * matched / (len(a) + len(b))`. Comparison is on chars, not bytes.

use std::collections::HashMap;

/// Minimum ratio for a candidate to count as a match
pub const DEFAULT_CUTOFF: f64 = 0.6;

/// Sequences at least this long get the popular-element heuristic
const AUTOJUNK_MIN_LEN: usize = 200;

/// Similarity of `a` and `b` in `[0.0, 1.0]`. Two empty strings score 1.0.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let matched = Matcher::new(&a, &b).matched_len();
    2.0 * matched as f64 / total as f64
}

/// Closest candidate to `query` scoring at least [`DEFAULT_CUTOFF`]
pub fn closest_name<'a, I>(query: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    closest_name_with_cutoff(query, candidates, DEFAULT_CUTOFF)
}

/// Closest candidate to `query` scoring at least `cutoff`.
///
/// On a tie the candidate seen first wins.
pub fn closest_name_with_cutoff<'a, I>(
    query: &str,
    candidates: I,
    cutoff: f64,
) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, f64)> = None;

    for candidate in candidates {
        let score = ratio(candidate, query);
        if score < cutoff {
            continue;
        }
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((candidate, score));
        }
    }

    best.map(|(name, _)| name)
}

struct Matcher<'a> {
    a: &'a [char],
    b: &'a [char],
    /// Positions of each char in `b`, ascending. Popular chars are left out.
    b2j: HashMap<char, Vec<usize>>,
}

impl<'a> Matcher<'a> {
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, c) in b.iter().enumerate() {
            b2j.entry(*c).or_default().push(j);
        }

        if b.len() >= AUTOJUNK_MIN_LEN {
            let limit = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= limit);
        }

        Self { a, b, b2j }
    }

    /// Total size of all matching blocks
    fn matched_len(&self) -> usize {
        let mut matched = 0;
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let (i, j, k) = self.longest_match(alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            matched += k;
            if alo < i && blo < j {
                queue.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                queue.push((i + k, ahi, j + k, bhi));
            }
        }

        matched
    }

    /// Longest block `a[i..i+k] == b[j..j+k]` inside the given window.
    /// Earliest in `a`, then earliest in `b`, wins ties.
    fn longest_match(
        &self,
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> (usize, usize, usize) {
        let (a, b) = (self.a, self.b);
        let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0);

        // j2len[j] = length of the match ending at a[i-1], b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
            let mut next: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(c) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let prev = if j > 0 { j2len.get(&(j - 1)).copied() } else { None };
                    let k = prev.unwrap_or(0) + 1;
                    next.insert(j, k);
                    if k > best_k {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_k = k;
                    }
                }
            }
            j2len = next;
        }

        // Popular chars never seed a block but may still extend one
        while best_i > alo && best_j > blo && a[best_i - 1] == b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_k += 1;
        }
        while best_i + best_k < ahi
            && best_j + best_k < bhi
            && a[best_i + best_k] == b[best_j + best_k]
        {
            best_k += 1;
        }

        (best_i, best_j, best_k)
    }
}
