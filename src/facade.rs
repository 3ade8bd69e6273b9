//! Query facade (`spec.md` §4.8): orchestrates catalogue construction, the
//! one-shot routing-graph build, and answers to line/stop/route queries.

use std::sync::OnceLock;

use crate::catalogue::{LineKind, TransitCatalogue};
use crate::error::{Error, Result};
use crate::expander::{self, VertexIndex};
use crate::graph::WeightedDigraph;
use crate::router::{self, Itinerary, RouteCache};
use crate::weight::RouteWeight;

/// Startup configuration supplied once (`spec.md` §6 "Settings").
#[derive(Debug, Clone, Copy)]
pub struct RouterSettings {
    pub bus_velocity_kmh: f64,
    pub bus_wait_time_min: f64,
}

struct RouterState {
    graph: WeightedDigraph<RouteWeight>,
    index: VertexIndex,
    cache: RouteCache,
}

/// `LineInfo` returned by `info_for_line` (`spec.md` §4.8 / §6 `GetLine`).
#[derive(Debug, Clone, PartialEq)]
pub struct LineInfo {
    pub stops_on_route: usize,
    pub unique_stops: usize,
    pub route_length: f64,
    pub curvature: Option<f64>,
}

/// `StopInfo` returned by `info_for_stop` (`spec.md` §4.8 / §6 `GetStop`).
#[derive(Debug, Clone, PartialEq)]
pub struct StopInfo {
    pub buses: Vec<String>,
}

/// `RouteInfo` returned by `info_for_route` (`spec.md` §4.8 / §6 `GetRoute`).
#[derive(Debug, Clone, PartialEq)]
pub struct RouteInfo {
    pub total_time: f64,
    pub items: Vec<router::RouteItem>,
}

/// A sealed-on-first-route-query transit system: the catalogue plus,
/// lazily, the expanded routing graph and its memoised route cache.
pub struct TransitSystem {
    catalogue: TransitCatalogue,
    settings: RouterSettings,
    router: OnceLock<RouterState>,
}

impl TransitSystem {
    pub fn new(settings: RouterSettings) -> Self {
        TransitSystem {
            catalogue: TransitCatalogue::new(),
            settings,
            router: OnceLock::new(),
        }
    }

    /// `spec.md` §6 `AddStop`. Must not be called after the first route query.
    pub fn add_stop(
        &mut self,
        name: &str,
        lat: f64,
        lon: f64,
        road_distances: &[(String, f64)],
    ) -> Result<()> {
        self.assert_not_sealed()?;
        self.catalogue.add_stop(name, lat, lon, road_distances)?;
        Ok(())
    }

    /// `spec.md` §6 `AddLine`. `is_roundtrip` true => Circular, false => Linear.
    pub fn add_line(&mut self, name: &str, stops: &[String], is_roundtrip: bool) -> Result<()> {
        self.assert_not_sealed()?;
        let kind = if is_roundtrip {
            LineKind::Circular
        } else {
            LineKind::Linear
        };
        self.catalogue.add_line(name, stops, kind)?;
        Ok(())
    }

    fn assert_not_sealed(&self) -> Result<()> {
        if self.router.get().is_some() {
            return Err(Error::InvalidInput(
                "cannot mutate the catalogue after the router has been initialised".into(),
            ));
        }
        Ok(())
    }

    /// Seals the catalogue, expands the routing graph, and builds the
    /// solver's memoisation cache, if not already done.
    ///
    /// Idempotent; subsequent calls are no-ops. Triggered automatically by
    /// the first `info_for_route` call.
    pub fn initialise_router(&self) {
        self.router.get_or_init(|| {
            log::debug!(
                "initialising router over {} stops",
                self.catalogue.stop_count()
            );
            let uninitialised = self
                .catalogue
                .stops()
                .filter(|(_, stop)| !stop.is_initialised())
                .count();
            if uninitialised > 0 {
                log::debug!(
                    "{uninitialised} stop(s) referenced by a line but never given coordinates via add_stop"
                );
            }
            let (graph, index) = expander::build_routing_graph(
                &self.catalogue,
                self.settings.bus_velocity_kmh,
                self.settings.bus_wait_time_min,
            );
            RouterState {
                graph,
                index,
                cache: RouteCache::new(),
            }
        });
    }

    pub fn info_for_line(&self, name: &str) -> Result<LineInfo> {
        let line = self.catalogue.get_line(name)?;
        Ok(LineInfo {
            stops_on_route: self.catalogue.stops_on_route(line),
            unique_stops: self.catalogue.unique_stops(line),
            route_length: self.catalogue.route_length(line),
            curvature: self.catalogue.curvature(line),
        })
    }

    pub fn info_for_stop(&self, name: &str) -> Result<StopInfo> {
        let stop_id = self
            .catalogue
            .stop_id(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        Ok(StopInfo {
            buses: self.catalogue.line_names_for_stop(stop_id),
        })
    }

    pub fn info_for_route(&self, from: &str, to: &str) -> Result<RouteInfo> {
        self.initialise_router();
        let from_id = self
            .catalogue
            .stop_id(from)
            .ok_or_else(|| Error::NotFound(from.to_string()))?;
        let to_id = self
            .catalogue
            .stop_id(to)
            .ok_or_else(|| Error::NotFound(to.to_string()))?;
        let state = self.router.get().expect("initialise_router just ran");
        let route = router::route(&state.cache, &state.graph, &state.index, from_id, to_id)
            .ok_or_else(|| Error::NotFound(format!("no route from {from} to {to}")))?;
        let itinerary: Itinerary = router::interpret(&state.graph, &state.index, &self.catalogue, &route);
        Ok(RouteInfo {
            total_time: itinerary.total_time,
            items: itinerary.items,
        })
    }
}
