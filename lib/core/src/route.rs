use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::graph::{NodeId, RoadNetwork};

/// A shortest route between two junctions.
///
/// `elapsed` is advisory wall-clock time for the computation, not part of
/// the routing result proper.
#[derive(Debug, Clone, Serialize)]
pub struct Route {
    pub distance: f32,
    pub nodes: Vec<NodeId>,
    pub elapsed: Duration,
}

impl RoadNetwork {
    /// Single-source Dijkstra over the non-negative edge weights.
    ///
    /// The frontier is a binary min-heap keyed by tentative distance; stale
    /// entries for already-finalised junctions are skipped lazily on pop.
    /// The route is read off predecessor back-pointers from `target` and
    /// reversed. Returns `None` when `target` is unreachable (a normal
    /// outcome) or when either endpoint is out of range.
    ///
    /// O((V + E) log V).
    pub fn shortest_path(&self, source: NodeId, target: NodeId) -> Option<Route> {
        let n = self.capacity();
        if source >= n || target >= n {
            return None;
        }

        let started = Instant::now();

        let mut dist = vec![f32::INFINITY; n];
        let mut prev: Vec<Option<NodeId>> = vec![None; n];
        let mut done = vec![false; n];
        let mut frontier: BinaryHeap<Reverse<(OrderedFloat<f32>, NodeId)>> = BinaryHeap::new();

        dist[source] = 0.0;
        frontier.push(Reverse((OrderedFloat(0.0), source)));

        while let Some(Reverse((_, u))) = frontier.pop() {
            if done[u] {
                continue;
            }
            done[u] = true;

            for link in self.links(u) {
                let v = link.target;
                let next = dist[u] + link.weight;
                if !done[v] && next < dist[v] {
                    dist[v] = next;
                    prev[v] = Some(u);
                    frontier.push(Reverse((OrderedFloat(next), v)));
                }
            }
        }

        if dist[target].is_infinite() {
            return None;
        }

        let mut nodes = vec![target];
        let mut at = target;
        while let Some(p) = prev[at] {
            nodes.push(p);
            at = p;
        }
        nodes.reverse();

        Some(Route {
            distance: dist[target],
            nodes,
            elapsed: started.elapsed(),
        })
    }
}
