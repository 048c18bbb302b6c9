use std::collections::VecDeque;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::graph::{NodeId, RoadNetwork};

/// Result of a graph traversal: the visitation order and the number of
/// junctions reached. `elapsed` is advisory wall-clock time.
#[derive(Debug, Clone, Serialize)]
pub struct Traversal {
    pub order: Vec<NodeId>,
    pub reached: usize,
    pub elapsed: Duration,
}

impl Traversal {
    fn empty() -> Self {
        Self {
            order: Vec::new(),
            reached: 0,
            elapsed: Duration::ZERO,
        }
    }
}

impl RoadNetwork {
    /// Queue-based breadth-first traversal from `source`, following outgoing
    /// edges. Absent junctions are traversable like any other; the walk does
    /// not special-case tombstoned slots. Empty result when `source` is out
    /// of range.
    pub fn breadth_first(&self, source: NodeId) -> Traversal {
        if source >= self.capacity() {
            return Traversal::empty();
        }

        let started = Instant::now();

        let mut visited = vec![false; self.capacity()];
        let mut queue = VecDeque::new();
        let mut order = Vec::new();

        visited[source] = true;
        queue.push_back(source);

        while let Some(u) = queue.pop_front() {
            order.push(u);
            for link in self.links(u) {
                if !visited[link.target] {
                    visited[link.target] = true;
                    queue.push_back(link.target);
                }
            }
        }

        let reached = order.len();
        Traversal {
            order,
            reached,
            elapsed: started.elapsed(),
        }
    }

    /// Pre-order depth-first traversal from `source`, following outgoing
    /// edges. Implemented with an explicit stack so deep networks cannot
    /// exhaust the call stack; the visitation order is exactly the one a
    /// recursive descent over the adjacency lists would produce.
    pub fn depth_first(&self, source: NodeId) -> Traversal {
        if source >= self.capacity() {
            return Traversal::empty();
        }

        let started = Instant::now();

        let mut visited = vec![false; self.capacity()];
        let mut stack = vec![source];
        let mut order = Vec::new();

        while let Some(u) = stack.pop() {
            if visited[u] {
                continue;
            }
            visited[u] = true;
            order.push(u);
            // Reverse push so the first listed neighbor is explored first,
            // matching the recursive order.
            for link in self.links(u).iter().rev() {
                if !visited[link.target] {
                    stack.push(link.target);
                }
            }
        }

        let reached = order.len();
        Traversal {
            order,
            reached,
            elapsed: started.elapsed(),
        }
    }

    /// Forward-reachability clusters: repeated BFS seeded from each not yet
    /// visited live junction in ascending id order, following outgoing edges
    /// only. On a directed network these are NOT undirected connected
    /// components: a junction reachable from an earlier seed is claimed by
    /// that seed's cluster even if no path leads back. The asymmetry is part
    /// of the contract; callers must not expect a symmetric definition.
    ///
    /// Returns per-cluster membership in discovery order.
    pub fn components(&self) -> Vec<Vec<NodeId>> {
        let mut visited = vec![false; self.capacity()];
        let mut clusters = Vec::new();

        for seed in 0..self.capacity() {
            if visited[seed] || !self.is_present(seed) {
                continue;
            }

            let mut members = Vec::new();
            let mut queue = VecDeque::new();
            visited[seed] = true;
            queue.push_back(seed);

            while let Some(u) = queue.pop_front() {
                members.push(u);
                for link in self.links(u) {
                    if !visited[link.target] {
                        visited[link.target] = true;
                        queue.push_back(link.target);
                    }
                }
            }

            clusters.push(members);
        }

        clusters
    }
}
