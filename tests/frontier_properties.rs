//! Property tests for frontier exclusion, lookup and traversal

use frontier_set::{Frontier, Tier};
use proptest::prelude::*;
use sha2::Sha256;

/// Short strings over a tiny alphabet so that prefixes collide often
fn small_string() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(vec![b'a', b'b', b'c', 0u8, 255u8]), 0..6)
}

fn string_set() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(small_string(), 0..12)
}

fn build(strings: &[Vec<u8>]) -> Frontier {
    let mut f = Frontier::new();
    for s in strings {
        f.exclude(s);
    }
    f
}

fn dense_nodes_have_two_edges(tier: &Tier) -> bool {
    let ok = !matches!(tier, Tier::Dense(_)) || tier.edge_count() >= 2;
    ok && tier.edges().all(|(_, child)| dense_nodes_have_two_edges(child))
}

proptest! {
    #[test]
    fn fresh_frontier_matches_everything(s in small_string()) {
        let f = Frontier::new();
        let (prefix, matched) = f.check(&s);
        prop_assert!(matched);
        prop_assert!(prefix.is_empty());
    }

    #[test]
    fn excluded_strings_match_in_full(strings in string_set(), extra in small_string()) {
        let f = build(&strings);
        for s in strings.iter().filter(|s| !s.is_empty()) {
            // Only strings that nothing else extends end on a sentinel.
            let extended = strings.iter().any(|o| o.len() > s.len() && o.starts_with(s));
            let (prefix, matched) = f.check(s);
            prop_assert_eq!(prefix, &s[..]);
            prop_assert_eq!(matched, !extended);

            let mut longer = s.clone();
            longer.extend(&extra);
            prop_assert!(f.check(&longer).0.len() >= s.len());
        }
    }

    #[test]
    fn matched_prefix_never_shrinks(strings in string_set(), query in small_string()) {
        let mut f = Frontier::new();
        let mut last = 0;
        for s in &strings {
            f.exclude(s);
            let (prefix, _) = f.check(&query);
            if !f.is_empty() {
                prop_assert!(prefix.len() >= last);
                last = prefix.len();
            }
        }
    }

    #[test]
    fn unmatched_stays_unmatched(strings in string_set(), later in string_set(), query in small_string()) {
        let mut f = build(&strings);
        if f.check(&query).1 {
            return Ok(());
        }
        for s in later.iter().filter(|s| !query.starts_with(s)) {
            f.exclude(s);
            prop_assert!(!f.check(&query).1);
        }
    }

    #[test]
    fn exclude_is_idempotent(strings in string_set()) {
        let once = build(&strings);
        let mut twice = build(&strings);
        for s in &strings {
            twice.exclude(s);
        }
        prop_assert_eq!(once.leaves(), twice.leaves());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn walk_is_strictly_ascending(strings in string_set()) {
        let f = build(&strings);
        let leaves = f.leaves();
        for pair in leaves.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn leaves_stop_at_last_byte(strings in string_set()) {
        let f = build(&strings);
        // A leaf leaves the trie exactly at its last byte.
        f.walk(|leaf| {
            let (prefix, _) = f.check(leaf);
            assert_eq!(prefix.len(), leaf.len() - 1);
        });
    }

    #[test]
    fn order_does_not_matter(strings in string_set()) {
        let forward = build(&strings);
        let mut reversed_strings = strings.clone();
        reversed_strings.reverse();
        let reversed = build(&reversed_strings);

        prop_assert_eq!(forward.leaves(), reversed.leaves());
        prop_assert_eq!(
            forward.merkle_tree::<Sha256>().root(),
            reversed.merkle_tree::<Sha256>().root()
        );
    }

    #[test]
    fn no_empty_dense_nodes(strings in string_set()) {
        let f = build(&strings);
        if let Some(root) = f.root() {
            prop_assert!(dense_nodes_have_two_edges(root));
        }
    }
}
