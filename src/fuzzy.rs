use std::collections::BTreeSet;

/// Longest common subsequence length using two rows of O(min(m,n)) space.
fn lcs_len(s1: &str, s2: &str) -> usize {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    let (a, b) = if a.len() <= b.len() { (b, a) } else { (a, b) };
    let n = b.len();

    let mut prev = vec![0usize; n + 1];
    let mut curr = vec![0usize; n + 1];

    for ca in &a {
        for j in 1..=n {
            curr[j] = if *ca == b[j - 1] {
                prev[j - 1] + 1
            } else {
                prev[j].max(curr[j - 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Indel similarity on a 0-100 scale. Either side empty scores 0.
///
/// Exact halves round to even, so 12.5 scores 12.
pub fn ratio(s1: &str, s2: &str) -> u8 {
    let total = s1.chars().count() + s2.chars().count();
    if s1.is_empty() || s2.is_empty() {
        return 0;
    }
    let matched = 2 * lcs_len(s1, s2);
    (100.0 * (matched as f64 / total as f64)).round_ties_even() as u8
}

/// Word-set similarity: the shared words are compared against each side's
/// shared-plus-remaining words, keeping the best of the three pairings.
pub fn token_set_ratio(s1: &str, s2: &str) -> u8 {
    let a: BTreeSet<&str> = s1.split_whitespace().collect();
    let b: BTreeSet<&str> = s2.split_whitespace().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let shared = a.intersection(&b).copied().collect::<Vec<_>>().join(" ");
    let only_a = a.difference(&b).copied().collect::<Vec<_>>().join(" ");
    let only_b = b.difference(&a).copied().collect::<Vec<_>>().join(" ");

    let combined_a = format!("{shared} {only_a}").trim().to_string();
    let combined_b = format!("{shared} {only_b}").trim().to_string();

    ratio(&shared, &combined_a)
        .max(ratio(&shared, &combined_b))
        .max(ratio(&combined_a, &combined_b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lcs_basic() {
        assert_eq!(lcs_len("abc", "abc"), 3);
        assert_eq!(lcs_len("abc", "xyz"), 0);
        assert_eq!(lcs_len("farm green", "farm green hill"), 10);
        assert_eq!(lcs_len("", "abc"), 0);
    }

    #[test]
    fn test_ratio_identical_is_hundred() {
        assert_eq!(ratio("brookside dairy", "brookside dairy"), 100);
    }

    #[test]
    fn test_ratio_empty_is_zero() {
        assert_eq!(ratio("", "abc"), 0);
        assert_eq!(ratio("abc", ""), 0);
        assert_eq!(ratio("", ""), 0);
    }

    #[test]
    fn test_ratio_single_substitution() {
        // lcs 2 of 6 chars total -> 4/6
        assert_eq!(ratio("abc", "abd"), 67);
    }

    #[test]
    fn test_ratio_half_rounds_to_even() {
        // 2/16 and 6/16 land on exact halves
        assert_eq!(ratio("a", "abcdefghijklmno"), 12);
        assert_eq!(ratio("abc", "abcdefghijklm"), 38);
        assert_eq!(ratio("a", "abcdefghijk"), 17);
    }

    #[test]
    fn test_ratio_is_commutative() {
        assert_eq!(ratio("kenchic", "kenchik"), ratio("kenchik", "kenchic"));
    }

    #[test]
    fn test_token_set_subset_scores_hundred() {
        assert_eq!(token_set_ratio("kenchic chicken", "kenchic"), 100);
        assert_eq!(token_set_ratio("dairy brookside", "brookside dairy"), 100);
    }

    #[test]
    fn test_token_set_partial_overlap() {
        // shared "farm green" against "farm green hill": 20/25
        assert_eq!(token_set_ratio("green farm supplies", "green hill farm"), 80);
    }

    #[test]
    fn test_token_set_empty_side_is_zero() {
        assert_eq!(token_set_ratio("", "brookside"), 0);
        assert_eq!(token_set_ratio("   ", "brookside"), 0);
    }

    #[test]
    fn test_token_set_disjoint_is_low() {
        assert!(token_set_ratio("xyz unknown shop 123", "green valley farm") < 50);
    }
}
