//! Shortest-path solver (`spec.md` §4.6).
//!
//! Single-source Dijkstra generalized from the `petgraph::algo::astar` call
//! in `layers/road_network.rs::get_road_distance`: that helper only returns
//! a node path, but `edge_of(route_id, k)` needs the actual edge sequence
//! (parallel edges between the same two stops can carry different weights,
//! e.g. two lines serving the same pair), so this tracks a predecessor
//! *edge* per settled vertex rather than just a predecessor node.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::graph::{EdgeId, VertexId, WeightedDigraph};
use crate::weight::RouteWeight;

/// A minimum-time path from one vertex to another.
///
/// The idiomatic-Rust stand-in for `spec.md`'s "route id + `edge_of(id, k)`"
/// contract: rather than handing back an opaque handle into solver-owned
/// storage, the edge sequence is owned directly by the `Route` value.
#[derive(Debug, Clone)]
pub struct Route {
    pub weight: RouteWeight,
    edges: Vec<EdgeId>,
}

impl Route {
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// The k-th edge id on the path (`spec.md`'s `edge_of`).
    pub fn edge_at(&self, k: usize) -> EdgeId {
        self.edges[k]
    }

    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }
}

#[derive(Clone)]
struct HeapEntry {
    weight: RouteWeight,
    vertex: VertexId,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight
    }
}
impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    // Reversed so `BinaryHeap` (a max-heap) pops the smallest time first.
    fn cmp(&self, other: &Self) -> Ordering {
        other.weight.cmp(&self.weight)
    }
}

/// Minimum-time path from `from` to `to`, or `None` if `to` is unreachable.
///
/// Weights are non-negative, so a standard Dijkstra relaxation is correct;
/// ties between equal-time alternatives are resolved by whichever edge was
/// relaxed first; the contract (`spec.md` §4.6) treats any optimal path as
/// acceptable.
pub fn shortest_path(
    graph: &WeightedDigraph<RouteWeight>,
    from: VertexId,
    to: VertexId,
) -> Option<Route> {
    if from == to {
        return Some(Route {
            weight: RouteWeight::zero(),
            edges: Vec::new(),
        });
    }

    let mut best: HashMap<VertexId, RouteWeight> = HashMap::new();
    let mut incoming: HashMap<VertexId, EdgeId> = HashMap::new();
    let mut heap = BinaryHeap::new();

    best.insert(from, RouteWeight::zero());
    heap.push(HeapEntry {
        weight: RouteWeight::zero(),
        vertex: from,
    });

    while let Some(HeapEntry { weight, vertex }) = heap.pop() {
        if let Some(known) = best.get(&vertex) {
            if weight > *known {
                continue; // stale heap entry
            }
        }
        if vertex == to {
            break;
        }
        for edge_id in graph.incident_edges(vertex) {
            let (_, next, edge_weight) = graph.edge(edge_id);
            let candidate = weight.add(edge_weight);
            let better = match best.get(&next) {
                Some(existing) => candidate < *existing,
                None => true,
            };
            if better {
                best.insert(next, candidate.clone());
                incoming.insert(next, edge_id);
                heap.push(HeapEntry {
                    weight: candidate,
                    vertex: next,
                });
            }
        }
    }

    let weight = best.get(&to)?.clone();
    let mut edges = Vec::new();
    let mut current = to;
    while let Some(&edge_id) = incoming.get(&current) {
        edges.push(edge_id);
        let (prev, _, _) = graph.edge(edge_id);
        current = prev;
    }
    edges.reverse();
    Some(Route { weight, edges })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_vertex_is_zero_weight_empty_path() {
        let mut g: WeightedDigraph<RouteWeight> = WeightedDigraph::new();
        let a = g.add_vertex();
        let route = shortest_path(&g, a, a).unwrap();
        assert_eq!(route.weight.time, 0.0);
        assert_eq!(route.edge_count(), 0);
    }

    #[test]
    fn unreachable_vertex_returns_none() {
        let mut g: WeightedDigraph<RouteWeight> = WeightedDigraph::new();
        let a = g.add_vertex();
        let b = g.add_vertex();
        assert!(shortest_path(&g, a, b).is_none());
    }

    #[test]
    fn picks_cheaper_of_two_parallel_edges() {
        let mut g: WeightedDigraph<RouteWeight> = WeightedDigraph::new();
        let a = g.add_vertex();
        let b = g.add_vertex();
        let cheap = g.add_edge(a, b, RouteWeight::boarding(1.0));
        g.add_edge(a, b, RouteWeight::boarding(5.0));
        let route = shortest_path(&g, a, b).unwrap();
        assert_eq!(route.weight.time, 1.0);
        assert_eq!(route.edges(), &[cheap]);
    }

    #[test]
    fn reconstructs_multi_hop_path_in_order() {
        let mut g: WeightedDigraph<RouteWeight> = WeightedDigraph::new();
        let a = g.add_vertex();
        let b = g.add_vertex();
        let c = g.add_vertex();
        let e1 = g.add_edge(a, b, RouteWeight::boarding(1.0));
        let e2 = g.add_edge(b, c, RouteWeight::boarding(2.0));
        g.add_edge(a, c, RouteWeight::boarding(10.0));
        let route = shortest_path(&g, a, c).unwrap();
        assert_eq!(route.weight.time, 3.0);
        assert_eq!(route.edges(), &[e1, e2]);
    }
}
