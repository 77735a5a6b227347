// Sequence module - longest-matching-block similarity of two strings
//
// ratio = 2 × M / T, where M is the total size of the matching blocks and T
// the combined length of both inputs. Blocks are found greedily: take the
// longest common substring, then recurse on the pieces left and right of
// it. Ties go to the block that starts earliest in `a`, then in `b`.
//
// Used for reference fingerprints, which are long base64-like strings, so
// the matcher works on chars and indexes the second string once up front.

use std::collections::HashMap;

/// Second strings at least this long are subject to the autojunk heuristic
const AUTOJUNK_MIN_LEN: usize = 200;

/// A matching block: `a[a..a + size] == b[b..b + size]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchingBlock {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}

/// Greedy longest-common-substring matcher over two strings
///
/// With autojunk enabled (the default), a second string of 200 or more
/// chars does not use "popular" chars (occurring more than 1% + 1 times)
/// as match anchors. Popular chars can still extend a block found from
/// another anchor.
pub struct SequenceMatcher {
    a: Vec<char>,
    b: Vec<char>,
    b2j: HashMap<char, Vec<usize>>,
}

impl SequenceMatcher {
    /// Create a matcher with autojunk enabled
    pub fn new(a: &str, b: &str) -> Self {
        Self::with_autojunk(a, b, true)
    }

    /// Create a matcher, choosing whether popular chars are ignored as anchors
    pub fn with_autojunk(a: &str, b: &str, autojunk: bool) -> Self {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();

        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }

        if autojunk && b.len() >= AUTOJUNK_MIN_LEN {
            let popular_above = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= popular_above);
        }

        Self { a, b, b2j }
    }

    /// Longest matching block in `a[alo..ahi]` and `b[blo..bhi]`
    ///
    /// Returns a block of size 0 at (alo, blo) when nothing matches.
    pub fn find_longest_match(
        &self,
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> MatchingBlock {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0usize);

        // j2len[j] = length of the match ending at a[i - 1] and b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut next_j2len = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
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

        // Grow through equal chars that were dropped as anchors
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
            a: best_i,
            b: best_j,
            size: best_size,
        }
    }

    /// All matching blocks, ordered by position
    pub fn matching_blocks(&self) -> Vec<MatchingBlock> {
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];
        let mut blocks = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let block = self.find_longest_match(alo, ahi, blo, bhi);
            if block.size == 0 {
                continue;
            }
            if alo < block.a && blo < block.b {
                pending.push((alo, block.a, blo, block.b));
            }
            if block.a + block.size < ahi && block.b + block.size < bhi {
                pending.push((block.a + block.size, ahi, block.b + block.size, bhi));
            }
            blocks.push(block);
        }

        blocks.sort_by_key(|block| (block.a, block.b));
        blocks
    }

    /// Similarity ratio in [0, 1]
    ///
    /// Two empty strings are identical (1.0); one empty string shares nothing
    /// with a non-empty one (0.0).
    pub fn ratio(&self) -> f64 {
        let total = self.a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        let matched: usize = self.matching_blocks().iter().map(|block| block.size).sum();
        2.0 * matched as f64 / total as f64
    }
}

/// Similarity of two fingerprint strings (longest-matching-block ratio)
pub fn string_similarity(a: &str, b: &str) -> f64 {
    SequenceMatcher::new(a, b).ratio()
}
