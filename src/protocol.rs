//! Wire-facing request/response shapes (`spec.md` §6, §9).
//!
//! This module defines the *shape* of the protocol only. Turning a textual
//! or tree-structured document into these types, and rendering a response
//! back out, are the caller's job (`spec.md` §1 "Out of scope: external
//! collaborators") — this crate only derives `serde::{Serialize,
//! Deserialize}` so a caller can hang any `serde` format off them.
//!
//! A tagged enum per request kind, per the design note in `spec.md` §9
//! ("a tagged variant with variants ... and a parallel result variant — no
//! virtual dispatch needed"), reworked from `original_source/Command.h`'s
//! `Request`/`ReadRequest<T>`/`ModifyRequest` virtual-dispatch hierarchy.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::facade::TransitSystem;
use crate::router::RouteItem;

/// A mutation, applied to the catalogue before any query (`spec.md` §6).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum BaseRequest {
    AddStop {
        name: String,
        lat: f64,
        long: f64,
        #[serde(default)]
        road_distances: HashMap<String, u64>,
    },
    AddLine {
        name: String,
        stops: Vec<String>,
        is_roundtrip: bool,
    },
}

/// Applies a mutation to the system (`spec.md` §6 "Base requests").
pub fn apply_base_request(system: &mut TransitSystem, request: BaseRequest) -> Result<(), Error> {
    match request {
        BaseRequest::AddStop {
            name,
            lat,
            long,
            road_distances,
        } => {
            let distances: Vec<(String, f64)> = road_distances
                .into_iter()
                .map(|(stop, metres)| (stop, metres as f64))
                .collect();
            system.add_stop(&name, lat, long, &distances)
        }
        BaseRequest::AddLine {
            name,
            stops,
            is_roundtrip,
        } => system.add_line(&name, &stops, is_roundtrip),
    }
}

/// A query, carrying an opaque id echoed in the reply (`spec.md` §6).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum StatRequest {
    GetLine { id: u64, name: String },
    GetStop { id: u64, name: String },
    GetRoute { id: u64, from: String, to: String },
}

/// One leg of a `GetRoute` reply, on the wire.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum RouteItemWire {
    Wait { stop_name: String, time: f64 },
    Bus {
        bus: String,
        time: f64,
        span_count: u32,
    },
}

impl From<&RouteItem> for RouteItemWire {
    fn from(item: &RouteItem) -> Self {
        match item {
            RouteItem::Wait { stop_name, time } => RouteItemWire::Wait {
                stop_name: stop_name.clone(),
                time: *time,
            },
            RouteItem::Bus {
                line_name,
                time,
                span,
            } => RouteItemWire::Bus {
                bus: line_name.clone(),
                time: *time,
                span_count: *span,
            },
        }
    }
}

/// The reply to a `StatRequest`. The only error defined on the wire is
/// `"not found"` (`spec.md` §7); every variant below either echoes the
/// successful payload or that single error shape.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum StatResponse {
    Line {
        id: u64,
        stop_count: usize,
        unique_stop_count: usize,
        route_length: f64,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        curvature: Option<f64>,
    },
    Stop {
        id: u64,
        buses: Vec<String>,
    },
    Route {
        id: u64,
        total_time: f64,
        items: Vec<RouteItemWire>,
    },
    Error {
        id: u64,
        error_message: String,
    },
}

/// Answers a query against the system (`spec.md` §6 "Stat requests").
///
/// `NotFound` becomes the wire's `"not found"` error response; every other
/// `Error` variant is a fatal programming error (`spec.md` §7.2) and is
/// propagated rather than rendered, since the core aborts the request
/// instead of answering it.
pub fn answer(system: &TransitSystem, request: StatRequest) -> Result<StatResponse, Error> {
    match request {
        StatRequest::GetLine { id, name } => match system.info_for_line(&name) {
            Ok(info) => Ok(StatResponse::Line {
                id,
                stop_count: info.stops_on_route,
                unique_stop_count: info.unique_stops,
                route_length: info.route_length,
                curvature: info.curvature,
            }),
            Err(Error::NotFound(_)) => Ok(not_found(id)),
            Err(e) => Err(e),
        },
        StatRequest::GetStop { id, name } => match system.info_for_stop(&name) {
            Ok(info) => Ok(StatResponse::Stop {
                id,
                buses: info.buses,
            }),
            Err(Error::NotFound(_)) => Ok(not_found(id)),
            Err(e) => Err(e),
        },
        StatRequest::GetRoute { id, from, to } => match system.info_for_route(&from, &to) {
            Ok(info) => Ok(StatResponse::Route {
                id,
                total_time: info.total_time,
                items: info.items.iter().map(RouteItemWire::from).collect(),
            }),
            Err(Error::NotFound(_)) => Ok(not_found(id)),
            Err(e) => Err(e),
        },
    }
}

fn not_found(id: u64) -> StatResponse {
    StatResponse::Error {
        id,
        error_message: "not found".to_string(),
    }
}
