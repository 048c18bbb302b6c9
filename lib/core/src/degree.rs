use serde::Serialize;

use crate::graph::{NodeId, RoadNetwork};

/// Degree figures for one junction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegreeEntry {
    pub id: NodeId,
    pub name: String,
    pub in_degree: usize,
    pub out_degree: usize,
    pub total: usize,
}

impl RoadNetwork {
    /// Rank live junctions by total degree, highest first: the bottleneck
    /// report. Out-degree is the adjacency-list length; in-degree is counted
    /// by a full scan of every adjacency list.
    ///
    /// Ordering is the `(total, id)` pair descending: ties on total break by
    /// descending id. Downstream output is compared byte-for-byte against
    /// this ordering, so it must not be changed to an ascending tie-break.
    pub fn degree_ranking(&self) -> Vec<DegreeEntry> {
        let mut entries: Vec<DegreeEntry> = self
            .present_nodes()
            .map(|id| {
                let out_degree = self.links(id).len();
                let in_degree = (0..self.capacity())
                    .flat_map(|j| self.links(j))
                    .filter(|l| l.target == id)
                    .count();
                DegreeEntry {
                    id,
                    name: self.node_name(id).unwrap_or_default().to_owned(),
                    in_degree,
                    out_degree,
                    total: in_degree + out_degree,
                }
            })
            .collect();

        entries.sort_by(|a, b| (b.total, b.id).cmp(&(a.total, a.id)));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hub_ranks_first() {
        let mut net = RoadNetwork::new();
        for i in 0..4 {
            net.add_node(i, format!("J{}", i));
        }
        // Junction 1 is the hub: two in, one out.
        net.add_edge(0, 1, 1.0);
        net.add_edge(2, 1, 1.0);
        net.add_edge(1, 3, 1.0);

        let ranking = net.degree_ranking();
        assert_eq!(ranking[0].id, 1);
        assert_eq!(ranking[0].in_degree, 2);
        assert_eq!(ranking[0].out_degree, 1);
        assert_eq!(ranking[0].total, 3);
    }

    #[test]
    fn test_ties_break_by_descending_id() {
        let mut net = RoadNetwork::new();
        for i in 0..3 {
            net.add_node(i, format!("J{}", i));
        }
        // Every junction ends up with total degree 2.
        net.add_edge(0, 1, 1.0);
        net.add_edge(1, 2, 1.0);
        net.add_edge(2, 0, 1.0);

        let ids: Vec<_> = net.degree_ranking().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 1, 0]);
    }

    #[test]
    fn test_absent_nodes_excluded() {
        let mut net = RoadNetwork::new();
        net.add_node(0, "A");
        net.add_node(1, "B");
        net.add_edge(0, 1, 1.0);
        net.remove_node(1);

        let ranking = net.degree_ranking();
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].id, 0);
        assert_eq!(ranking[0].total, 0);
    }

    #[test]
    fn test_parallel_edges_count_individually() {
        let mut net = RoadNetwork::new();
        net.add_node(0, "A");
        net.add_node(1, "B");
        net.add_edge(0, 1, 1.0);
        net.add_edge(0, 1, 2.0);

        let ranking = net.degree_ranking();
        let b = ranking.iter().find(|e| e.id == 1).unwrap();
        assert_eq!(b.in_degree, 2);
    }
}
