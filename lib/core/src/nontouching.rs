//! Non-touching loop groups.
//!
//! Two loops touch when their node sets intersect. Mason's formula needs,
//! for every order k >= 2, all groups of k mutually non-touching loops.
//! Pairs are tested once; an order-k group is grown from an order-(k-1)
//! group by adding an index that forms an already-known non-touching pair
//! with every member. Non-touching is a pairwise relation, so pairwise
//! validity of a group is group validity and nothing is re-derived by
//! brute force. The search stops at the first empty order: every (k-1)-
//! subset of a valid order-k group is itself valid, so an empty order has
//! no successors.

use ahash::AHashSet;
use std::collections::BTreeMap;

use crate::loops::Loop;

/// All unordered index pairs `(i, j)` with `i < j` whose loops share no
/// node.
pub fn non_touching_pairs(loops: &[Loop]) -> AHashSet<(usize, usize)> {
    let mut pairs = AHashSet::new();
    for i in 0..loops.len() {
        for j in (i + 1)..loops.len() {
            if !loops[i].touches(&loops[j]) {
                pairs.insert((i, j));
            }
        }
    }
    pairs
}

/// Groups of mutually non-touching loops for every order >= 2, keyed by
/// order. Each group is a sorted index vector. Orders with no groups are
/// absent; an empty map means no two loops are non-touching.
pub fn non_touching_groups(loops: &[Loop]) -> BTreeMap<usize, Vec<Vec<usize>>> {
    let pairs = non_touching_pairs(loops);
    let mut groups: BTreeMap<usize, Vec<Vec<usize>>> = BTreeMap::new();
    if pairs.is_empty() {
        return groups;
    }

    let mut order_2: Vec<Vec<usize>> = pairs.iter().map(|&(i, j)| vec![i, j]).collect();
    order_2.sort();
    groups.insert(2, order_2);

    for order in 3..=loops.len() {
        let mut found: Vec<Vec<usize>> = Vec::new();
        let mut dedup: AHashSet<Vec<usize>> = AHashSet::new();

        for group in &groups[&(order - 1)] {
            for idx in 0..loops.len() {
                if group.contains(&idx) {
                    continue;
                }
                let extends_all = group.iter().all(|&member| {
                    pairs.contains(&(member.min(idx), member.max(idx)))
                });
                if extends_all {
                    let mut candidate = group.clone();
                    candidate.push(idx);
                    candidate.sort();
                    if dedup.insert(candidate.clone()) {
                        found.push(candidate);
                    }
                }
            }
        }

        if found.is_empty() {
            break;
        }
        found.sort();
        groups.insert(order, found);
    }

    groups
}
