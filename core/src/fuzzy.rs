//! Approximate title matching with the Ratcliff/Obershelp "gestalt" ratio.
//!
//! The ratio is `2 * M / (|a| + |b|)` where `M` is the total size of the
//! matching blocks found by recursively taking the longest common substring
//! and repeating on both sides of it. Strings are compared as Unicode scalar
//! values. The query is indexed once and scored against every title.

use std::collections::HashMap;

/// Queries at least this long have their over-represented characters ignored
/// when seeding matches.
const AUTOJUNK_MIN_LEN: usize = 200;

#[derive(Debug, Clone, PartialEq)]
pub struct TitleMatch<'a> {
    pub index: usize,
    pub title: &'a str,
    pub score: f64,
}

/// A query prepared for repeated comparison against candidate strings.
pub struct QueryMatcher {
    b: Vec<char>,
    b2j: HashMap<char, Vec<usize>>,
}

impl QueryMatcher {
    pub fn new(query: &str) -> Self {
        let b: Vec<char> = query.chars().collect();
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, c) in b.iter().enumerate() {
            b2j.entry(*c).or_default().push(j);
        }
        if b.len() >= AUTOJUNK_MIN_LEN {
            let ntest = b.len() / 100 + 1;
            b2j.retain(|_, js| js.len() <= ntest);
        }
        Self { b, b2j }
    }

    /// Similarity ratio in `[0, 1]` between `candidate` and the query.
    pub fn ratio(&self, candidate: &str) -> f64 {
        let a: Vec<char> = candidate.chars().collect();
        let total = a.len() + self.b.len();
        if total == 0 { return 1.0; }
        2.0 * self.matching_chars(&a) as f64 / total as f64
    }

    /// Upper bound on `ratio` computed from lengths alone.
    pub fn real_quick_ratio(&self, candidate: &str) -> f64 {
        let la = candidate.chars().count();
        let total = la + self.b.len();
        if total == 0 { return 1.0; }
        2.0 * la.min(self.b.len()) as f64 / total as f64
    }

    fn matching_chars(&self, a: &[char]) -> usize {
        let mut total = 0;
        let mut pending = vec![(0, a.len(), 0, self.b.len())];
        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let (i, j, k) = self.longest_match(a, alo, ahi, blo, bhi);
            if k == 0 { continue; }
            total += k;
            if alo < i && blo < j { pending.push((alo, i, blo, j)); }
            if i + k < ahi && j + k < bhi { pending.push((i + k, ahi, j + k, bhi)); }
        }
        total
    }

    /// Longest block `a[i..i+k] == b[j..j+k]` inside the given windows, preferring
    /// the earliest start in `a`, then in `b`.
    fn longest_match(&self, a: &[char], alo: usize, ahi: usize, blo: usize, bhi: usize) -> (usize, usize, usize) {
        let b = &self.b;
        let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0usize);
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut next: HashMap<usize, usize> = HashMap::new();
            if let Some(js) = self.b2j.get(&a[i]) {
                for &j in js {
                    if j < blo { continue; }
                    if j >= bhi { break; }
                    let k = j.checked_sub(1).and_then(|p| j2len.get(&p)).copied().unwrap_or(0) + 1;
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
        // Junked characters never seed a block but may still extend one
        while best_i > alo && best_j > blo && a[best_i - 1] == b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_k += 1;
        }
        while best_i + best_k < ahi && best_j + best_k < bhi && a[best_i + best_k] == b[best_j + best_k] {
            best_k += 1;
        }
        (best_i, best_j, best_k)
    }
}

/// Sequence ratio between two strings, with `b` taking the query role.
pub fn ratio(a: &str, b: &str) -> f64 { QueryMatcher::new(b).ratio(a) }

/// Best-scoring title at or above `cutoff`. Ties keep the earliest title.
pub fn match_title<'a, I>(query: &str, titles: I, cutoff: f64) -> Option<TitleMatch<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    let matcher = QueryMatcher::new(query);
    let mut best: Option<TitleMatch<'a>> = None;
    for (index, title) in titles.into_iter().enumerate() {
        let floor = best.as_ref().map_or(cutoff, |b| b.score.max(cutoff));
        if matcher.real_quick_ratio(title) < floor { continue; }
        let score = matcher.ratio(title);
        if score < cutoff { continue; }
        if best.as_ref().map_or(true, |b| score > b.score) {
            best = Some(TitleMatch { index, title, score });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool { (a - b).abs() < 1e-9 }

    #[test]
    fn gestalt_ratios() {
        assert!(approx(ratio("Intro to Python", "Into Python"), 22.0 / 26.0));
        assert!(approx(ratio("Advanced Python", "Into Python"), 16.0 / 26.0));
        assert!(approx(ratio("abcd", "bcda"), 0.75));
        assert!(approx(ratio("", ""), 1.0));
        assert!(approx(ratio("abc", ""), 0.0));
        assert!(approx(ratio("same", "same"), 1.0));
    }

    #[test]
    fn picks_closest_title() {
        let titles = ["Intro to Cooking", "Advanced Python", "Intro to Python"];
        let m = match_title("Into Python", titles, 0.1).unwrap();
        assert_eq!(m.title, "Intro to Python");
        assert_eq!(m.index, 2);
    }

    #[test]
    fn exact_title_matches_itself() {
        let titles = ["Rust for Beginners", "Rust", "Rusty Nails"];
        for t in titles {
            assert_eq!(match_title(t, titles, 0.1).unwrap().title, t);
        }
    }

    #[test]
    fn ties_resolve_to_first_title() {
        let m = match_title("ab", ["ax", "bx", "ab", "ab"], 0.1).unwrap();
        assert_eq!(m.index, 2);
        let m = match_title("zz", ["za", "zb"], 0.1).unwrap();
        assert_eq!(m.index, 0);
    }

    #[test]
    fn cutoff_rejects_unrelated_titles() {
        let titles = ["Aqua", "Plum", "Calculus", "Karma", "Quokka"];
        assert!(match_title("Nonexistent Gibberish Xyzzy", titles, 0.1).is_none());
        assert!(match_title("anything", std::iter::empty(), 0.1).is_none());
    }

    #[test]
    fn long_queries_junk_popular_characters() {
        let matcher = QueryMatcher::new(&"a".repeat(250));
        // every 'a' is popular, so nothing seeds a block away from the window start
        assert!(approx(matcher.ratio("baaaa"), 0.0));
        assert!(approx(matcher.ratio("aaaa"), 8.0 / 254.0));
        assert!(approx(ratio("aaaa", &"a".repeat(20)), 8.0 / 24.0));
    }
}
