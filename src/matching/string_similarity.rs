//! String similarity primitives for part-number comparison.
//!
//! Part numbers are dense alphanumeric codes, so besides the usual separator
//! split a token boundary is also placed wherever letters turn into digits or
//! back: `LM7805CT` tokenizes to `LM`, `7805`, `CT`.

use std::collections::HashSet;

/// Separators that split part-number tokens.
const TOKEN_SEPARATORS: [char; 5] = ['-', '.', '/', '+', '#'];

/// Split a part number into separator- and letter/digit-delimited tokens.
#[must_use]
pub fn tokenize(mpn: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    for chunk in mpn.split(TOKEN_SEPARATORS).filter(|t| !t.is_empty()) {
        let mut start = 0;
        let bytes = chunk.as_bytes();
        for i in 1..bytes.len() {
            if bytes[i].is_ascii_digit() != bytes[i - 1].is_ascii_digit() {
                tokens.push(&chunk[start..i]);
                start = i;
            }
        }
        tokens.push(&chunk[start..]);
    }
    tokens
}

/// Compute token-based similarity using the Jaccard index on part-number tokens.
///
/// Catches reordered or re-punctuated numbers such as `LM1117-3.3` and
/// `LM1117-3.3V` sharing the `LM`, `1117` and `3` tokens.
#[must_use]
pub fn compute_token_similarity(mpn_a: &str, mpn_b: &str) -> f64 {
    let tokens_a: HashSet<&str> = tokenize(mpn_a).into_iter().collect();
    let tokens_b: HashSet<&str> = tokenize(mpn_b).into_iter().collect();

    if tokens_a.is_empty() && tokens_b.is_empty() {
        return 1.0;
    }
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection = tokens_a.intersection(&tokens_b).count();
    let union = tokens_a.union(&tokens_b).count();

    if union > 0 {
        intersection as f64 / union as f64
    } else {
        0.0
    }
}

/// Length of the common prefix plus the non-overlapping common suffix,
/// relative to the longer string.
///
/// Ordering codes and packaging suffixes vary at the end of a part number
/// while the family lives at the start, so both ends are worth rewarding.
#[must_use]
pub fn common_affix_ratio(a: &str, b: &str) -> f64 {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 1.0;
    }
    let shortest = a.len().min(b.len());
    let prefix = a.iter().zip(b).take_while(|(x, y)| x == y).count();
    let suffix = a
        .iter()
        .rev()
        .zip(b.iter().rev())
        .take(shortest - prefix)
        .take_while(|(x, y)| x == y)
        .count();
    (prefix + suffix) as f64 / longest as f64
}
