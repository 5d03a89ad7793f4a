/// Best-first search in the style of
/// [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html),
/// with a tie-breaking rule that is part of the contract: among open nodes with equal
/// estimated total cost, the node that was discovered first is expanded first.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::debug;
use num_traits::Zero;

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

struct SmallestCostHolder<K> {
    estimated_cost: K,
    cost: K,
    index: usize,
}

impl<K: PartialEq> Eq for SmallestCostHolder<K> {}

impl<K: PartialEq> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost) && self.index == other.index
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Smallest estimated cost first. Ties go to the smallest index, which is the
        // discovery order of the node in the parents map.
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => other.index.cmp(&self.index),
            s => s,
        }
    }
}

fn reverse_path<N, V, F>(parents: &FxIndexMap<N, V>, mut parent: F, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
    F: FnMut(&V) -> usize,
{
    let mut i = start;
    let mut path: Vec<N> = std::iter::from_fn(|| {
        parents.get_index(i).map(|(node, value)| {
            i = parent(value);
            node.clone()
        })
    })
    .collect();
    path.reverse();
    path
}

/// Searches from `start` until a node satisfying `success` is popped. Returns the path including
/// `start` and the goal, together with its cost. All bookkeeping lives in this call.
pub(crate) fn astar<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
) -> Option<(Vec<N>, C)>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let mut to_see = BinaryHeap::new();
    to_see.push(SmallestCostHolder {
        estimated_cost: Zero::zero(),
        cost: Zero::zero(),
        index: 0,
    });
    let mut parents: FxIndexMap<N, (usize, C)> = FxIndexMap::default();
    parents.insert(start.clone(), (usize::MAX, Zero::zero()));
    let mut expanded = 0usize;
    while let Some(SmallestCostHolder { cost, index, .. }) = to_see.pop() {
        let successors = {
            let (node, &(_, c)) = parents.get_index(index)?;
            if success(node) {
                let path = reverse_path(&parents, |&(p, _)| p, index);
                debug!(
                    "Goal reached after expanding {} nodes ({} discovered)",
                    expanded,
                    parents.len()
                );
                return Some((path, cost));
            }
            // A node may sit in the heap several times if a cheaper way to reach it was found
            // later. Only the entry matching the best known cost gets expanded.
            if cost > c {
                continue;
            }
            expanded += 1;
            successors(node)
        };
        for (successor, move_cost) in successors {
            let new_cost = cost + move_cost;
            let h;
            let n;
            match parents.entry(successor) {
                Vacant(e) => {
                    h = heuristic(e.key());
                    n = e.index();
                    e.insert((index, new_cost));
                }
                Occupied(mut e) => {
                    if e.get().1 > new_cost {
                        h = heuristic(e.key());
                        n = e.index();
                        e.insert((index, new_cost));
                    } else {
                        continue;
                    }
                }
            }

            to_see.push(SmallestCostHolder {
                estimated_cost: new_cost + h,
                cost: new_cost,
                index: n,
            });
        }
    }
    debug!("Open set exhausted after expanding {} nodes, no path", expanded);
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A small directed graph on integers: 0 -> 1 -> 3 and 0 -> 2 -> 3 with equal costs.
    fn diamond(n: &u32) -> Vec<(u32, i32)> {
        match n {
            0 => vec![(1, 1), (2, 1)],
            1 => vec![(3, 1)],
            2 => vec![(3, 1)],
            _ => vec![],
        }
    }

    #[test]
    fn start_is_goal() {
        let (path, cost) = astar(&7u32, |_| Vec::<(u32, i32)>::new(), |_| 0, |n| *n == 7).unwrap();
        assert_eq!(path, vec![7]);
        assert_eq!(cost, 0);
    }

    /// With equal estimated costs the branch discovered first is expanded first.
    #[test]
    fn ties_prefer_first_discovered() {
        let (path, cost) = astar(&0u32, diamond, |_| 0, |n| *n == 3).unwrap();
        assert_eq!(path, vec![0, 1, 3]);
        assert_eq!(cost, 2);

        let reversed = |n: &u32| {
            let mut s = diamond(n);
            s.reverse();
            s
        };
        let (path, _) = astar(&0u32, reversed, |_| 0, |n| *n == 3).unwrap();
        assert_eq!(path, vec![0, 2, 3]);
    }

    #[test]
    fn cheaper_late_discovery_replaces_parent() {
        // 0 -> 2 directly costs 10, via 1 it costs 2.
        let succ = |n: &u32| match n {
            0 => vec![(2, 10), (1, 1)],
            1 => vec![(2, 1)],
            _ => vec![],
        };
        let (path, cost) = astar(&0u32, succ, |_| 0, |n| *n == 2).unwrap();
        assert_eq!(path, vec![0, 1, 2]);
        assert_eq!(cost, 2);
    }

    #[test]
    fn exhausted_open_set() {
        assert!(astar(&0u32, diamond, |_| 0, |n| *n == 9).is_none());
    }
}
