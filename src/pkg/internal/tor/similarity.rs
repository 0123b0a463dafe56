//! Gestalt pattern matching (Ratcliff/Obershelp) over characters.
//!
//! The score is `2 * M / T` where `M` counts characters in matching blocks
//! found by repeatedly taking the longest common substring and recursing on
//! both sides of it, and `T` is the combined length of the inputs.
//!
//! No junk heuristic is applied: every character takes part in matching, so
//! long inputs (200+ characters) are scored on their full text.

/// Case-insensitive similarity of two texts in percent, `0.0..=100.0`.
/// Either side being empty scores zero.
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    let matched = matching_chars(&a, &b);
    200.0 * matched as f64 / (a.len() + b.len()) as f64
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (i, j, k) = longest_block(a, b);
    if k == 0 {
        return 0;
    }
    k + matching_chars(&a[..i], &b[..j]) + matching_chars(&a[i + k..], &b[j + k..])
}

/// Longest common substring as `(start_in_a, start_in_b, len)`; ties go to
/// the block that starts earliest in `a`, then in `b`.
fn longest_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut prev = vec![0usize; b.len() + 1];
    let mut cur = vec![0usize; b.len() + 1];
    for i in 0..a.len() {
        for j in 0..b.len() {
            cur[j + 1] = if a[i] == b[j] { prev[j] + 1 } else { 0 };
            let k = cur[j + 1];
            if k > best.2 {
                best = (i + 1 - k, j + 1 - k, k);
            }
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn identical_texts_score_full() {
        assert!(close(ratio("Data Structures", "Data Structures"), 100.0));
    }

    #[test]
    fn ignores_case() {
        assert!(close(ratio("COLLEGE ALGEBRA", "college algebra"), 100.0));
    }

    #[test]
    fn empty_side_scores_zero() {
        assert_eq!(ratio("", "Physics"), 0.0);
        assert_eq!(ratio("Physics", ""), 0.0);
    }

    #[test]
    fn disjoint_texts_score_zero() {
        assert_eq!(ratio("abc", "xyz"), 0.0);
    }

    #[test]
    fn recurses_on_both_sides_of_the_longest_block() {
        // "bcd" matches, nothing else does: 2 * 3 / 8
        assert!(close(ratio("abcd", "bcde"), 75.0));
        // "ab" then "d" to the right of it: 2 * 3 / 8
        assert!(close(ratio("abxd", "abyd"), 75.0));
    }

    #[test]
    fn is_symmetric_for_simple_inputs() {
        let a = "Computer Programming 1";
        let b = "Programming Fundamentals";
        assert!(close(ratio(a, b), ratio(b, a)));
    }
}
