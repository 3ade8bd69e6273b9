//! Route cache and interpreter (`spec.md` §4.7).
//!
//! Memoises solver results per (from, to) stop pair and turns a raw edge
//! sequence into the user-facing alternating Wait/Bus itinerary.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::catalogue::{StopId, TransitCatalogue};
use crate::expander::{VertexIndex, VertexKind};
use crate::graph::WeightedDigraph;
use crate::solver::{self, Route};
use crate::weight::RouteWeight;

/// One leg of an interpreted itinerary.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteItem {
    /// Standing at `stop_name`, about to board.
    Wait { stop_name: String, time: f64 },
    /// Riding `line_name` for `span` stops.
    Bus {
        line_name: String,
        time: f64,
        span: u32,
    },
}

/// The interpreted, human-readable form of a `Route`.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    pub total_time: f64,
    pub items: Vec<RouteItem>,
}

/// Converts a solver `Route` into an alternating Wait/Bus item sequence.
///
/// A ride edge's tail sits in the Bus partition (`spec.md` §4.7); a boarding
/// edge's tail sits in the Wait partition. Each edge is read independently —
/// the accumulated `line` field on `Route::weight` is never consulted here.
pub fn interpret(
    graph: &WeightedDigraph<RouteWeight>,
    index: &VertexIndex,
    catalogue: &TransitCatalogue,
    route: &Route,
) -> Itinerary {
    let mut items = Vec::with_capacity(route.edge_count());
    for k in 0..route.edge_count() {
        let edge_id = route.edge_at(k);
        let (from, _, weight) = graph.edge(edge_id);
        let (stop_id, kind) = index.stop_of(from);
        let item = match kind {
            VertexKind::Wait => RouteItem::Wait {
                stop_name: catalogue.stop(stop_id).name.clone(),
                time: weight.time,
            },
            VertexKind::Bus => RouteItem::Bus {
                line_name: weight
                    .line
                    .as_ref()
                    .map(|s| s.to_string())
                    .unwrap_or_default(),
                time: weight.time,
                span: weight.span,
            },
        };
        items.push(item);
    }
    Itinerary {
        total_time: route.weight.time,
        items,
    }
}

/// Unbounded memoisation of solver results, keyed by stop-id pair.
///
/// `spec.md` §9 notes an unbounded cache as the reference design, with LRU
/// bounding left as a future extension. Behind a `Mutex` per §5, so a
/// `TransitSystem` can answer route queries from multiple threads.
#[derive(Default)]
pub struct RouteCache {
    entries: Mutex<HashMap<(StopId, StopId), Option<Route>>>,
}

impl RouteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached route for `(from, to)`, computing and storing it
    /// via `compute` on a miss. `None` means "known to be unreachable" and is
    /// itself cached.
    pub fn get_or_compute(
        &self,
        from: StopId,
        to: StopId,
        compute: impl FnOnce() -> Option<Route>,
    ) -> Option<Route> {
        let mut entries = self.entries.lock().expect("route cache mutex poisoned");
        if let Some(cached) = entries.get(&(from, to)) {
            log::debug!("route cache hit for ({}, {})", from.0, to.0);
            return cached.clone();
        }
        log::debug!("route cache miss for ({}, {}); invoking solver", from.0, to.0);
        let computed = compute();
        entries.insert((from, to), computed.clone());
        computed
    }
}

/// Resolves a route between two stop ids, consulting the cache before
/// invoking the solver (`spec.md` §4.7 steps 2-3).
pub fn route(
    cache: &RouteCache,
    graph: &WeightedDigraph<RouteWeight>,
    index: &VertexIndex,
    from: StopId,
    to: StopId,
) -> Option<Route> {
    cache.get_or_compute(from, to, || {
        solver::shortest_path(graph, index.wait_vertex(from), index.wait_vertex(to))
    })
}
