//! Whole-document text similarity via normalized edit distance.
//!
//! OCR output is compared as one flat string: no paragraph or line alignment
//! is attempted. The measure is `1 - levenshtein / max(len)` over Unicode
//! code points, so multi-byte characters count once, as a reader would count
//! them.

/// Edit distance between two strings, counted over Unicode code points.
///
/// Classic dynamic program with a two-row rolling buffer; memory stays
/// proportional to the shorter dimension of the table, not its area.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    let mut current: Vec<usize> = vec![0; b_chars.len() + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        current[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let substitution_cost = usize::from(a_char != b_char);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + substitution_cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b_chars.len()]
}

/// Similarity in [0, 1]: `1 - distance / max(len)`, where both lengths are
/// code-point counts. Two empty strings are defined as identical (1.0).
///
/// Returned unrounded; callers that persist scores round at the edge.
pub fn text_similarity(expected: &str, actual: &str) -> f64 {
    let expected_len = expected.chars().count();
    let actual_len = actual.chars().count();
    let max_len = expected_len.max(actual_len);
    if max_len == 0 {
        return 1.0;
    }
    let distance = levenshtein(expected, actual);
    (1.0 - distance as f64 / max_len as f64).clamp(0.0, 1.0)
}
