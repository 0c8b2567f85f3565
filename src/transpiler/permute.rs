//! Permutation expansion of AND groups.
//!
//! A single-pass regex cannot say "contains x and contains y", so an AND of
//! `k` tokens on one column becomes the alternatives of all `k!` orderings,
//! each joined by a wildcard gap.

use std::collections::HashSet;

/// Gap placed between tokens of one ordering.
pub const WILDCARD_GAP: &str = ".*";

/// All orderings of `items`, in lexicographic index order.
pub fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }

    let mut out = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.to_vec();
        let head = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, head.clone());
            out.push(tail);
        }
    }
    out
}

/// Every ordering of `tokens` joined by [`WILDCARD_GAP`].
///
/// Orderings that render identically (repeated tokens) are emitted once.
pub fn ordered_patterns(tokens: &[&str]) -> Vec<String> {
    let mut seen = HashSet::new();
    permutations(tokens)
        .into_iter()
        .map(|ordering| ordering.join(WILDCARD_GAP))
        .filter(|pattern| seen.insert(pattern.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_permutation_order() {
        assert_eq!(
            permutations(&["x", "y", "z"]),
            vec![
                vec!["x", "y", "z"],
                vec!["x", "z", "y"],
                vec!["y", "x", "z"],
                vec!["y", "z", "x"],
                vec!["z", "x", "y"],
                vec!["z", "y", "x"],
            ]
        );
    }

    #[test]
    fn test_factorial_count() {
        let tokens = ["a", "b", "c", "d", "e"];
        for k in 1..=tokens.len() {
            let expected: usize = (1..=k).product();
            assert_eq!(ordered_patterns(&tokens[..k]).len(), expected);
        }
    }

    #[test]
    fn test_ordered_patterns() {
        assert_eq!(ordered_patterns(&["x", "y"]), vec!["x.*y", "y.*x"]);
        assert_eq!(ordered_patterns(&["x"]), vec!["x"]);
    }

    #[test]
    fn test_repeated_tokens_collapse() {
        assert_eq!(ordered_patterns(&["x", "x"]), vec!["x.*x"]);
        assert_eq!(
            ordered_patterns(&["x", "y", "x"]),
            vec!["x.*y.*x", "x.*x.*y", "y.*x.*x"]
        );
    }

    #[test]
    fn test_eight_terms_expand_quickly() {
        let tokens = ["t0", "t1", "t2", "t3", "t4", "t5", "t6", "t7"];
        let started = Instant::now();
        let patterns = ordered_patterns(&tokens);

        assert_eq!(patterns.len(), 40320);
        assert_eq!(patterns[0], "t0.*t1.*t2.*t3.*t4.*t5.*t6.*t7");
        assert_eq!(patterns[40319], "t7.*t6.*t5.*t4.*t3.*t2.*t1.*t0");
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
