//! Weighted directed graph (`spec.md` §4.3).
//!
//! A dense-vertex multigraph: vertices are `0..V`, edges carry a generic
//! weight. Built once by the expander, read-only thereafter. Grounded on
//! `layers/road_network.rs`'s `Graph<Node, Edge, Directed>` usage, but here
//! vertices carry no payload — the expander keeps the (stop, kind) ↔ vertex
//! association in its own index (§4.5) rather than on the graph itself.

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};

/// Opaque vertex handle. Dense and stable once the graph is built.
pub type VertexId = NodeIndex<u32>;
/// Opaque edge handle, returned by `add_edge` and consumed by `edge`.
pub type EdgeId = EdgeIndex<u32>;

pub struct WeightedDigraph<W> {
    inner: DiGraph<(), W, u32>,
}

impl<W> WeightedDigraph<W> {
    pub fn new() -> Self {
        WeightedDigraph {
            inner: DiGraph::default(),
        }
    }

    pub fn add_vertex(&mut self) -> VertexId {
        self.inner.add_node(())
    }

    pub fn add_edge(&mut self, from: VertexId, to: VertexId, weight: W) -> EdgeId {
        self.inner.add_edge(from, to, weight)
    }

    /// Returns the endpoints and weight of an edge.
    pub fn edge(&self, id: EdgeId) -> (VertexId, VertexId, &W) {
        let (from, to) = self
            .inner
            .edge_endpoints(id)
            .expect("edge id came from this graph");
        (from, to, &self.inner[id])
    }

    /// Edge ids outgoing from `v`, in insertion order.
    pub fn incident_edges(&self, v: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        use petgraph::visit::EdgeRef;
        self.inner
            .edges_directed(v, petgraph::Direction::Outgoing)
            .map(|e| e.id())
    }

    pub fn vertex_count(&self) -> usize {
        self.inner.node_count()
    }
}

impl<W> Default for WeightedDigraph<W> {
    fn default() -> Self {
        Self::new()
    }
}
