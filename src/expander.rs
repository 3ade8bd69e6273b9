//! Graph expander (`spec.md` §4.5): turns a sealed catalogue into the
//! routing graph whose shortest paths encode minimum-time itineraries.

use std::sync::Arc;

use crate::catalogue::{LineKind, StopId, TransitCatalogue};
use crate::graph::{VertexId, WeightedDigraph};
use crate::weight::RouteWeight;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexKind {
    /// Standing at the stop, waiting for a bus.
    Wait,
    /// About to ride from the stop.
    Bus,
}

/// Bijection between `(stop, kind)` and the dense routing-graph vertex ids.
///
/// Per `spec.md` §4.5, vertices are assigned by iterating the catalogue's
/// stops in order and giving each a Wait id then a Bus id, so the mapping is
/// a closed-form O(1) computation rather than a hash table.
pub struct VertexIndex {
    stop_count: usize,
}

impl VertexIndex {
    pub fn wait_vertex(&self, stop: StopId) -> VertexId {
        VertexId::new(stop.0 * 2)
    }

    pub fn bus_vertex(&self, stop: StopId) -> VertexId {
        VertexId::new(stop.0 * 2 + 1)
    }

    /// Inverse of `wait_vertex`/`bus_vertex`.
    pub fn stop_of(&self, vertex: VertexId) -> (StopId, VertexKind) {
        let idx = vertex.index();
        let stop = StopId(idx / 2);
        let kind = if idx % 2 == 0 {
            VertexKind::Wait
        } else {
            VertexKind::Bus
        };
        (stop, kind)
    }

    pub fn vertex_count(&self) -> usize {
        self.stop_count * 2
    }
}

/// Builds the routing graph over a sealed catalogue.
///
/// `velocity_kmh` is converted to metres/minute internally; `wait_time_min`
/// is the uniform passenger wait applied at every stop.
pub fn build_routing_graph(
    catalogue: &TransitCatalogue,
    velocity_kmh: f64,
    wait_time_min: f64,
) -> (WeightedDigraph<RouteWeight>, VertexIndex) {
    let velocity = velocity_kmh * 1000.0 / 60.0;
    let stop_count = catalogue.stop_count();
    let index = VertexIndex { stop_count };

    let mut graph = WeightedDigraph::new();
    for _ in 0..index.vertex_count() {
        graph.add_vertex();
    }

    // Single canonical Wait->Bus edge per stop, independent of how many
    // lines touch it (spec.md §9 Open Question): wait_time is uniform, so a
    // per-line duplicate would never be picked by the solver anyway, but
    // omitting it shrinks the graph.
    for (stop_id, _) in catalogue.stops() {
        graph.add_edge(
            index.wait_vertex(stop_id),
            index.bus_vertex(stop_id),
            RouteWeight::boarding(wait_time_min),
        );
    }

    for (_, line) in catalogue.lines() {
        let line_name: Arc<str> = Arc::from(line.name.as_str());
        add_ride_edges(&mut graph, &index, catalogue, &line.stops, &line_name, velocity);
        if line.kind == LineKind::Linear {
            let reversed: Vec<StopId> = line.stops.iter().rev().copied().collect();
            add_ride_edges(&mut graph, &index, catalogue, &reversed, &line_name, velocity);
        }
    }

    (graph, index)
}

/// Adds every `Bus(s_i) -> Wait(s_j)` ride edge for `0 <= i < j < n` along a
/// single traversal direction of a line.
fn add_ride_edges(
    graph: &mut WeightedDigraph<RouteWeight>,
    index: &VertexIndex,
    catalogue: &TransitCatalogue,
    traversal: &[StopId],
    line_name: &Arc<str>,
    velocity: f64,
) {
    let n = traversal.len();
    if n == 0 {
        return;
    }
    let mut prefix = vec![0.0; n];
    for i in 1..n {
        let d = catalogue.effective_distance(traversal[i - 1], traversal[i]);
        prefix[i] = prefix[i - 1] + d / velocity;
    }
    for i in 0..n {
        for j in (i + 1)..n {
            graph.add_edge(
                index.bus_vertex(traversal[i]),
                index.wait_vertex(traversal[j]),
                RouteWeight::ride(prefix[j] - prefix[i], (j - i) as u32, line_name.clone()),
            );
        }
    }
}
