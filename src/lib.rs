//! Transit-routing engine: turns a user-defined bus network (stops, lines,
//! a uniform velocity and wait time) into a weighted directed multigraph
//! and answers fastest-itinerary and descriptive-statistic queries over it.
//!
//! See `SPEC_FULL.md` for the full functional specification and
//! `DESIGN.md` for the grounding of each module in the reference corpus.

pub mod catalogue;
pub mod error;
pub mod expander;
pub mod facade;
pub mod geo_util;
pub mod graph;
pub mod protocol;
pub mod router;
pub mod solver;
pub mod weight;

pub use catalogue::{LineKind, TransitCatalogue};
pub use error::{Error, Result};
pub use facade::{LineInfo, RouteInfo, RouterSettings, StopInfo, TransitSystem};

#[cfg(test)]
mod integration_tests {
    use super::*;

    /// `spec.md` §8 "Triangle inequality": `time(X,Z) <= time(X,Y) + time(Y,Z) + wait_time`.
    #[test]
    fn triangle_inequality_holds_across_a_transfer() {
        let mut sys = TransitSystem::new(RouterSettings {
            bus_velocity_kmh: 60.0,
            bus_wait_time_min: 2.0,
        });
        sys.add_stop("X", 0.0, 0.0, &[("Y".into(), 1000.0)])
            .unwrap();
        sys.add_stop("Y", 0.0, 0.01, &[("Z".into(), 3000.0)])
            .unwrap();
        sys.add_stop("Z", 0.0, 0.03, &[]).unwrap();
        sys.add_line("L1", &["X".into(), "Y".into()], false)
            .unwrap();
        sys.add_line("L2", &["Y".into(), "Z".into()], false)
            .unwrap();

        let xz = sys.info_for_route("X", "Z").unwrap().total_time;
        let xy = sys.info_for_route("X", "Y").unwrap().total_time;
        let yz = sys.info_for_route("Y", "Z").unwrap().total_time;
        assert!(xz <= xy + yz + 2.0 + 1e-9);
    }

    /// `spec.md` §8 "Wait-edge invariant": time >= (ride segments) * wait_time.
    #[test]
    fn every_itinerary_time_is_at_least_rides_times_wait_time() {
        let mut sys = TransitSystem::new(RouterSettings {
            bus_velocity_kmh: 60.0,
            bus_wait_time_min: 2.0,
        });
        sys.add_stop("A", 0.0, 0.0, &[("B".into(), 1000.0)])
            .unwrap();
        sys.add_stop("B", 0.0, 0.01, &[("C".into(), 2000.0)])
            .unwrap();
        sys.add_stop("C", 0.0, 0.02, &[]).unwrap();
        sys.add_line("L1", &["A".into(), "B".into()], false)
            .unwrap();
        sys.add_line("L2", &["B".into(), "C".into()], false)
            .unwrap();

        let info = sys.info_for_route("A", "C").unwrap();
        let ride_segments = info
            .items
            .iter()
            .filter(|item| matches!(item, router::RouteItem::Bus { .. }))
            .count();
        assert!(info.total_time >= ride_segments as f64 * 2.0);
    }

    /// `spec.md` §8 "Interpretation soundness": item times sum to total_time.
    #[test]
    fn item_times_sum_to_total_time() {
        let mut sys = TransitSystem::new(RouterSettings {
            bus_velocity_kmh: 45.0,
            bus_wait_time_min: 3.0,
        });
        sys.add_stop("A", 43.0, -79.0, &[("B".into(), 1500.0)])
            .unwrap();
        sys.add_stop("B", 43.01, -79.0, &[]).unwrap();
        sys.add_line("L", &["A".into(), "B".into()], false)
            .unwrap();

        let info = sys.info_for_route("A", "B").unwrap();
        let summed: f64 = info.items.iter().map(|item| match item {
            router::RouteItem::Wait { time, .. } => *time,
            router::RouteItem::Bus { time, .. } => *time,
        }).sum();
        assert!((summed - info.total_time).abs() < 1e-6);
    }

    /// A circular line whose stored stop sequence repeats the terminal stop
    /// (`spec.md` §9 Open Question, resolved in `DESIGN.md`).
    #[test]
    fn circular_line_preserves_repeated_terminal_stop_in_stats() {
        let mut sys = TransitSystem::new(RouterSettings {
            bus_velocity_kmh: 60.0,
            bus_wait_time_min: 1.0,
        });
        sys.add_stop("A", 0.0, 0.0, &[]).unwrap();
        sys.add_stop("B", 0.0, 0.01, &[]).unwrap();
        sys.add_stop("C", 0.01, 0.0, &[]).unwrap();
        sys.add_line(
            "Loop",
            &["A".into(), "B".into(), "C".into(), "A".into()],
            true,
        )
        .unwrap();

        let info = sys.info_for_line("Loop").unwrap();
        assert_eq!(info.stops_on_route, 4); // n+1 stored entries, preserved
        assert_eq!(info.unique_stops, 3);
    }
}
