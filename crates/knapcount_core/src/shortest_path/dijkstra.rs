use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Heap entry for the search frontier. Ordered so the smallest tentative
/// cost pops first; ties break on the lower node index, which makes the
/// selected route deterministic.
#[derive(Debug, Clone, Copy)]
struct Visit {
    cost: f64,
    node: usize,
}

impl PartialEq for Visit {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Visit {}

impl PartialOrd for Visit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Visit {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse both keys for min-first order.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

/// Single-source shortest path over nonnegative-weighted adjacency lists.
///
/// Returns the minimal-cost node sequence from `source` to `target`
/// inclusive, or `None` when `target` is unreachable.
pub fn shortest_path(
    adjacency: &[Vec<(usize, f64)>],
    source: usize,
    target: usize,
) -> Option<Vec<usize>> {
    let mut best = vec![f64::INFINITY; adjacency.len()];
    let mut parent: Vec<Option<usize>> = vec![None; adjacency.len()];
    let mut frontier = BinaryHeap::new();

    best[source] = 0.0;
    frontier.push(Visit {
        cost: 0.0,
        node: source,
    });

    while let Some(Visit { cost, node }) = frontier.pop() {
        if node == target {
            break;
        }
        if cost > best[node] {
            continue; // stale entry
        }
        for &(neighbor, weight) in &adjacency[node] {
            let candidate = cost + weight;
            if candidate < best[neighbor] {
                best[neighbor] = candidate;
                parent[neighbor] = Some(node);
                frontier.push(Visit {
                    cost: candidate,
                    node: neighbor,
                });
            }
        }
    }

    if best[target].is_infinite() {
        return None;
    }

    let mut path = vec![target];
    let mut node = target;
    while let Some(previous) = parent[node] {
        path.push(previous);
        node = previous;
    }
    path.reverse();
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::shortest_path;

    #[test]
    fn picks_the_cheaper_of_two_routes() {
        // 0 -> 1 -> 3 costs 2; 0 -> 2 -> 3 costs 10.
        let adjacency = vec![
            vec![(1, 1.0), (2, 5.0)],
            vec![(3, 1.0)],
            vec![(3, 5.0)],
            vec![],
        ];
        let path = shortest_path(&adjacency, 0, 3).expect("target reachable");
        assert_eq!(path, vec![0, 1, 3]);
    }

    #[test]
    fn detour_wins_over_heavy_direct_edge() {
        let adjacency = vec![
            vec![(1, 10.0), (2, 1.0)],
            vec![],
            vec![(3, 1.0)],
            vec![(1, 1.0)],
        ];
        let path = shortest_path(&adjacency, 0, 1).expect("target reachable");
        assert_eq!(path, vec![0, 2, 3, 1]);
    }

    #[test]
    fn unreachable_target_is_reported() {
        let adjacency = vec![vec![(1, 1.0)], vec![], vec![]];
        assert!(shortest_path(&adjacency, 0, 2).is_none());
    }

    #[test]
    fn source_equal_to_target_yields_singleton_path() {
        let adjacency = vec![vec![(1, 1.0)], vec![]];
        let path = shortest_path(&adjacency, 0, 0).expect("trivially reachable");
        assert_eq!(path, vec![0]);
    }

    #[test]
    fn zero_cost_edges_are_handled() {
        let adjacency = vec![vec![(1, 0.0)], vec![(2, 0.0)], vec![]];
        let path = shortest_path(&adjacency, 0, 2).expect("target reachable");
        assert_eq!(path, vec![0, 1, 2]);
    }
}
