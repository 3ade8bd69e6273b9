//! Transit catalogue (`spec.md` §4.2): stops and lines as declared by the
//! caller, plus the per-line descriptive statistics derived from them.

use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::geo_util::haversine;

/// Dense id of a stop, stable once assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopId(pub usize);

/// Dense id of a line, stable once assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Circular,
    Linear,
}

#[derive(Debug, Clone)]
pub struct Stop {
    pub name: String,
    coords: Option<(f64, f64)>,
    /// `road_dist[b] = metres`, directional: this stop's distance *to* `b`.
    road_dist: HashMap<StopId, f64>,
    serving_lines: HashSet<LineId>,
}

impl Stop {
    fn new(name: String) -> Self {
        Stop {
            name,
            coords: None,
            road_dist: HashMap::new(),
            serving_lines: HashSet::new(),
        }
    }

    /// Whether `add_stop` has set this stop's coordinates, as opposed to it
    /// only existing because a line or a neighbour declaration referenced it.
    pub fn is_initialised(&self) -> bool {
        self.coords.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct Line {
    pub name: String,
    pub stops: Vec<StopId>,
    pub kind: LineKind,
}

/// Stops and lines declared by the caller, with name-based lookup.
///
/// Mutable only during ingestion; `TransitSystem` (facade) treats it as
/// immutable once `initialise_router()` has run (`spec.md` §3 "Lifecycles").
#[derive(Debug, Clone, Default)]
pub struct TransitCatalogue {
    stops: Vec<Stop>,
    stop_index: HashMap<String, StopId>,
    lines: Vec<Line>,
    line_index: HashMap<String, LineId>,
}

impl TransitCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    fn get_or_create_stop(&mut self, name: &str) -> StopId {
        if let Some(&id) = self.stop_index.get(name) {
            return id;
        }
        let id = StopId(self.stops.len());
        self.stops.push(Stop::new(name.to_string()));
        self.stop_index.insert(name.to_string(), id);
        id
    }

    /// Creates or finds the named stop, sets its coordinates, and records
    /// its road distances to each declared neighbour.
    ///
    /// For each `(neighbour, metres)`: the neighbour is created if absent
    /// (without coordinates — it may be declared later by its own
    /// `add_stop`), `road_dist(name → neighbour)` is set (overwriting any
    /// prior value), and `road_dist(neighbour → name)` is set only if it is
    /// not already defined — the first declaration of a direction wins.
    pub fn add_stop(
        &mut self,
        name: &str,
        lat: f64,
        lon: f64,
        road_distances: &[(String, f64)],
    ) -> Result<StopId> {
        if name.is_empty() {
            return Err(Error::InvalidInput("stop name must not be empty".into()));
        }
        let id = self.get_or_create_stop(name);
        self.stops[id.0].coords = Some((lat, lon));
        for (neighbour, metres) in road_distances {
            if *metres < 0.0 {
                return Err(Error::InvalidInput(format!(
                    "negative road distance {name} -> {neighbour}"
                )));
            }
            let nid = self.get_or_create_stop(neighbour);
            self.stops[id.0].road_dist.insert(nid, *metres);
            self.stops[nid.0].road_dist.entry(id).or_insert(*metres);
        }
        Ok(id)
    }

    /// Creates the line; each stop name is looked up or created
    /// uninitialised, and gains this line in its `serving_lines`.
    pub fn add_line(&mut self, name: &str, stops: &[String], kind: LineKind) -> Result<LineId> {
        if name.is_empty() {
            return Err(Error::InvalidInput("line name must not be empty".into()));
        }
        if stops.is_empty() {
            return Err(Error::InvalidInput(format!("line {name} has no stops")));
        }
        let id = LineId(self.lines.len());
        let mut stop_ids = Vec::with_capacity(stops.len());
        for stop_name in stops {
            let sid = self.get_or_create_stop(stop_name);
            self.stops[sid.0].serving_lines.insert(id);
            stop_ids.push(sid);
        }
        self.lines.push(Line {
            name: name.to_string(),
            stops: stop_ids,
            kind,
        });
        self.line_index.insert(name.to_string(), id);
        Ok(id)
    }

    pub fn get_line(&self, name: &str) -> Result<&Line> {
        self.line_index
            .get(name)
            .map(|&id| &self.lines[id.0])
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    pub fn get_stop(&self, name: &str) -> Result<&Stop> {
        self.stop_index
            .get(name)
            .map(|&id| &self.stops[id.0])
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    pub fn stop(&self, id: StopId) -> &Stop {
        &self.stops[id.0]
    }

    pub fn stop_id(&self, name: &str) -> Option<StopId> {
        self.stop_index.get(name).copied()
    }

    pub fn line(&self, id: LineId) -> &Line {
        &self.lines[id.0]
    }

    pub fn line_id(&self, name: &str) -> Option<LineId> {
        self.line_index.get(name).copied()
    }

    /// Stop count, used by the expander to size the routing graph's vertex index.
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn stops(&self) -> impl Iterator<Item = (StopId, &Stop)> {
        self.stops
            .iter()
            .enumerate()
            .map(|(i, s)| (StopId(i), s))
    }

    pub fn lines(&self) -> impl Iterator<Item = (LineId, &Line)> {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, l)| (LineId(i), l))
    }

    /// Sorted, ascending line names serving the stop.
    pub fn line_names_for_stop(&self, id: StopId) -> Vec<String> {
        let mut names: Vec<String> = self.stops[id.0]
            .serving_lines
            .iter()
            .map(|&lid| self.lines[lid.0].name.clone())
            .collect();
        names.sort();
        names
    }

    /// Effective road distance `a -> b` (`spec.md` §3): the declared
    /// distance in that direction if known, else the reverse direction's
    /// declared distance, else great-circle distance.
    pub fn effective_distance(&self, a: StopId, b: StopId) -> f64 {
        if let Some(&d) = self.stops[a.0].road_dist.get(&b) {
            return d;
        }
        if let Some(&d) = self.stops[b.0].road_dist.get(&a) {
            return d;
        }
        match (self.stops[a.0].coords, self.stops[b.0].coords) {
            (Some((lat1, lon1)), Some((lat2, lon2))) => haversine(lat1, lon1, lat2, lon2),
            _ => 0.0,
        }
    }

    fn haversine_between(&self, a: StopId, b: StopId) -> f64 {
        match (self.stops[a.0].coords, self.stops[b.0].coords) {
            (Some((lat1, lon1)), Some((lat2, lon2))) => haversine(lat1, lon1, lat2, lon2),
            _ => 0.0,
        }
    }

    /// Distinct stops traversed by the line.
    pub fn unique_stops(&self, line: &Line) -> usize {
        line.stops.iter().collect::<HashSet<_>>().len()
    }

    /// Sum of great-circle distance between consecutive stops; doubled for
    /// Linear lines (out and back).
    pub fn geometric_length(&self, line: &Line) -> f64 {
        let one_way: f64 = line
            .stops
            .windows(2)
            .map(|w| self.haversine_between(w[0], w[1]))
            .sum();
        match line.kind {
            LineKind::Circular => one_way,
            LineKind::Linear => one_way * 2.0,
        }
    }

    /// Sum of effective road distance along the traversal; for Linear lines
    /// the return leg is summed separately (not simply doubled) since
    /// effective distances may be asymmetric.
    pub fn route_length(&self, line: &Line) -> f64 {
        let forward: f64 = line
            .stops
            .windows(2)
            .map(|w| self.effective_distance(w[0], w[1]))
            .sum();
        match line.kind {
            LineKind::Circular => forward,
            LineKind::Linear => {
                let reverse: f64 = line
                    .stops
                    .windows(2)
                    .map(|w| self.effective_distance(w[1], w[0]))
                    .sum();
                forward + reverse
            }
        }
    }

    /// Number of stops actually traversed (`spec.md` §4.2 edge case).
    pub fn stops_on_route(&self, line: &Line) -> usize {
        let n = line.stops.len();
        match line.kind {
            LineKind::Circular => n,
            LineKind::Linear => {
                if n == 0 {
                    0
                } else {
                    2 * n - 1
                }
            }
        }
    }

    /// `route_length / geometric_length`, or `None` when the geometric
    /// length is zero (undefined — a single-stop Linear line).
    pub fn curvature(&self, line: &Line) -> Option<f64> {
        let geom = self.geometric_length(line);
        if geom == 0.0 {
            None
        } else {
            Some(self.route_length(line) / geom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbour_referenced_before_declared_inherits_distance_both_ways() {
        let mut cat = TransitCatalogue::new();
        cat.add_stop("A", 0.0, 0.0, &[("B".into(), 1000.0)]).unwrap();
        // B's own add_stop does not mention A.
        cat.add_stop("B", 0.0, 0.01, &[]).unwrap();
        let a = cat.stop_id("A").unwrap();
        let b = cat.stop_id("B").unwrap();
        assert_eq!(cat.effective_distance(a, b), 1000.0);
        assert_eq!(cat.effective_distance(b, a), 1000.0);
    }

    #[test]
    fn forward_distance_overwrites_but_reverse_is_first_wins() {
        let mut cat = TransitCatalogue::new();
        cat.add_stop("A", 0.0, 0.0, &[("B".into(), 1000.0)]).unwrap();
        cat.add_stop("B", 0.0, 0.01, &[("A".into(), 500.0)]).unwrap();
        let a = cat.stop_id("A").unwrap();
        let b = cat.stop_id("B").unwrap();
        // A->B was set directly to 1000 by A's own declaration.
        assert_eq!(cat.effective_distance(a, b), 1000.0);
        // B->A was set directly to 500 by B's own declaration.
        assert_eq!(cat.effective_distance(b, a), 500.0);
    }

    #[test]
    fn unknown_line_is_not_found() {
        let cat = TransitCatalogue::new();
        assert!(matches!(cat.get_line("NoSuch"), Err(Error::NotFound(_))));
    }

    #[test]
    fn stop_with_no_lines_has_empty_buses() {
        let mut cat = TransitCatalogue::new();
        cat.add_stop("X", 0.0, 0.0, &[]).unwrap();
        let x = cat.stop_id("X").unwrap();
        assert!(cat.line_names_for_stop(x).is_empty());
    }

    #[test]
    fn linear_two_stop_line_stats() {
        // spec.md §8 scenario 1: road distance 1000m is shorter than the
        // ~1112m great-circle distance between these coordinates, so
        // curvature (route_length / geometric_length) comes out ≈ 0.898,
        // under 1.0.
        let mut cat = TransitCatalogue::new();
        cat.add_stop("A", 0.0, 0.0, &[("B".into(), 1000.0)]).unwrap();
        cat.add_stop("B", 0.0, 0.01, &[]).unwrap();
        cat.add_line("L", &["A".into(), "B".into()], LineKind::Linear)
            .unwrap();
        let line = cat.get_line("L").unwrap();
        assert_eq!(cat.stops_on_route(line), 3);
        assert_eq!(cat.unique_stops(line), 2);
        assert_eq!(cat.route_length(line), 2000.0);
        let curvature = cat.curvature(line).unwrap();
        assert!(curvature < 1.0);
    }

    #[test]
    fn single_stop_linear_line_has_no_curvature() {
        let mut cat = TransitCatalogue::new();
        cat.add_stop("A", 0.0, 0.0, &[]).unwrap();
        cat.add_line("L", &["A".into()], LineKind::Linear).unwrap();
        let line = cat.get_line("L").unwrap();
        assert_eq!(cat.stops_on_route(line), 1);
        assert_eq!(cat.geometric_length(line), 0.0);
        assert_eq!(cat.route_length(line), 0.0);
        assert_eq!(cat.curvature(line), None);
    }

    #[test]
    fn curvature_is_at_least_one_for_positive_geometric_length() {
        let mut cat = TransitCatalogue::new();
        cat.add_stop("A", 43.65, -79.38, &[("B".into(), 10_000.0)])
            .unwrap();
        cat.add_stop("B", 43.70, -79.40, &[]).unwrap();
        cat.add_line("L", &["A".into(), "B".into()], LineKind::Circular)
            .unwrap();
        // Not actually circular geometrically (single hop) but exercises the formula.
        let line = cat.get_line("L").unwrap();
        assert!(cat.curvature(line).unwrap() >= 1.0);
    }
}
