use crate::types::{ParsedDocument, Token};
use std::collections::HashSet;

/// Follow head links from `start_index` and report whether the chain reaches `target_index`.
///
/// The check compares each visited token's *head* against the target, so a token only
/// points to itself when it is its own head. Walking into an already visited index ends the
/// search with `false`: the chain has entered a cycle that does not contain the target.
/// Every step adds a new index to the visited set, so the walk takes at most
/// `tokens.len()` steps.
pub fn eventually_points_to(tokens: &[Token], start_index: usize, target_index: usize) -> bool {
    let mut visited = HashSet::new();
    let mut current = start_index;

    loop {
        let Some(token) = tokens.get(current) else {
            return false;
        };
        visited.insert(current);

        if token.head_index == target_index {
            return true;
        }
        if visited.contains(&token.head_index) {
            return false;
        }

        current = token.head_index;
    }
}

impl ParsedDocument {
    /// Whether the head chain of token `start_index` reaches token `target_index`
    pub fn eventually_points_to(&self, start_index: usize, target_index: usize) -> bool {
        eventually_points_to(self.tokens(), start_index, target_index)
    }

    /// Tokens whose head chain reaches `target_index`, in document order, regardless of label.
    ///
    /// The target itself is included only when its own chain leads back to it (a root that
    /// heads itself, or a cycle through it).
    pub fn dependents_of(&self, target_index: usize) -> impl Iterator<Item = (usize, &Token)> {
        self.tokens()
            .iter()
            .enumerate()
            .filter(move |(idx, _)| self.eventually_points_to(*idx, target_index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::DependencyLabel;
    use proptest::prelude::*;

    fn chain(heads: &[usize]) -> Vec<Token> {
        heads
            .iter()
            .enumerate()
            .map(|(idx, &head)| Token::new(format!("t{idx}"), DependencyLabel::Dep, head))
            .collect()
    }

    /// `start, head(start), head(head(start)), ...`, cut right after the first repeated index.
    fn head_chain(tokens: &[Token], start: usize) -> Vec<usize> {
        let mut path = vec![start];
        for _ in 0..tokens.len() {
            let Some(&last) = path.last() else { break };
            let next = tokens[last].head_index;
            let repeated = path.contains(&next);
            path.push(next);
            if repeated {
                break;
            }
        }
        path
    }

    /// A token reaches `target` when `target` shows up as a head anywhere on its chain.
    fn reaches_via_head_chain(tokens: &[Token], start: usize, target: usize) -> bool {
        head_chain(tokens, start)[1..].contains(&target)
    }

    #[test]
    fn single_hop_reaches_head() {
        let tokens = chain(&[1, 1]);
        assert!(eventually_points_to(&tokens, 0, 1));
    }

    #[test]
    fn multi_hop_reaches_ancestor() {
        // 0 -> 1 -> 2 -> 3 (root)
        let tokens = chain(&[1, 2, 3, 3]);
        assert!(eventually_points_to(&tokens, 0, 3));
        assert!(eventually_points_to(&tokens, 0, 2));
        assert!(!eventually_points_to(&tokens, 3, 0));
    }

    #[test]
    fn cycle_without_target_is_negative() {
        // 0 -> 1 -> 2 -> 0, token 3 is unrelated
        let tokens = chain(&[1, 2, 0, 3]);
        assert!(!eventually_points_to(&tokens, 0, 3));
    }

    #[test]
    fn start_equal_to_target_needs_self_head() {
        let tokens = chain(&[1, 1]);
        // root heads itself
        assert!(eventually_points_to(&tokens, 1, 1));
        // token 0 heads 1 -> 1 heads itself, 0 is never reached again
        assert!(!eventually_points_to(&tokens, 0, 0));
    }

    #[test]
    fn out_of_range_start_is_negative() {
        let tokens = chain(&[0]);
        assert!(!eventually_points_to(&tokens, 5, 0));
        assert!(!eventually_points_to(&[], 0, 0));
    }

    #[test]
    fn chain_returning_to_start_reaches_start() {
        // 0 -> 1 -> 2 -> 0: the first revisit is the start token itself
        let tokens = chain(&[1, 2, 0]);
        assert!(eventually_points_to(&tokens, 0, 0));
        assert!(eventually_points_to(&tokens, 0, 2));
        assert!(eventually_points_to(&tokens, 2, 1));
    }

    #[test]
    fn cycle_entered_past_start_is_negative() {
        // 0 -> 1 -> 2 -> 1: the walk loops on 1 and 2 and never heads back to 0 or 3
        let tokens = chain(&[1, 2, 1, 3]);
        assert!(!eventually_points_to(&tokens, 0, 0));
        assert!(!eventually_points_to(&tokens, 0, 3));
        assert!(eventually_points_to(&tokens, 0, 1));
    }

    #[test]
    fn dependents_follow_document_order() {
        let doc = ParsedDocument::new(chain(&[2, 2, 2, 0]), Vec::new()).unwrap();
        let dependents: Vec<usize> = doc.dependents_of(2).map(|(idx, _)| idx).collect();
        // 2 heads itself, so it counts as its own dependent
        assert_eq!(dependents, vec![0, 1, 2, 3]);

        let doc = ParsedDocument::new(chain(&[1, 1, 0]), Vec::new()).unwrap();
        let dependents: Vec<usize> = doc.dependents_of(0).map(|(idx, _)| idx).collect();
        assert_eq!(dependents, vec![2]);
    }

    fn heads_strategy() -> impl Strategy<Value = Vec<usize>> {
        (1usize..24).prop_flat_map(|len| proptest::collection::vec(0..len, len))
    }

    proptest! {
        #[test]
        fn proptest_matches_head_chain_definition(
            heads in heads_strategy(),
            start_seed in any::<usize>(),
            target_seed in any::<usize>(),
        ) {
            let tokens = chain(&heads);
            let start = start_seed % tokens.len();
            let target = target_seed % tokens.len();
            prop_assert_eq!(
                eventually_points_to(&tokens, start, target),
                reaches_via_head_chain(&tokens, start, target)
            );
        }

        #[test]
        fn proptest_direct_head_is_always_reached(heads in heads_strategy(), seed in any::<usize>()) {
            let tokens = chain(&heads);
            let start = seed % tokens.len();
            prop_assert!(eventually_points_to(&tokens, start, tokens[start].head_index));
        }
    }
}
