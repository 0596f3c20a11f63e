//! Routing trait and default Dijkstra implementation.
//!
//! # Search weight vs. measured time
//!
//! A route is found and timed in two separate steps:
//!
//! 1. **Search.**  Dijkstra minimises a single [`EdgeWeight`]: the
//!    precomputed travel time if *any* edge in the network carries one,
//!    physical length otherwise.
//! 2. **Measurement.**  The chosen path is then walked node pair by node
//!    pair.  Each pair contributes the fastest of its parallel edges, timed
//!    with [`EdgeAttrs::time_secs`].  The sum is the route's travel time.
//!
//! So a length-optimal path on a graph without travel times still reports
//! seconds, not metres.
//!
//! # Pluggability
//!
//! Callers route through the [`Router`] trait, so alternative engines (A*,
//! contraction hierarchies) can be dropped in.  [`DijkstraRouter`] is the
//! default.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use log::trace;
use ordered_float::OrderedFloat;

use ed_core::{EdgeId, NodeId};

use crate::network::{EdgeAttrs, RoadNetwork};
use crate::{LookupError, SpatialError, SpatialResult};

/// Search cost of an edge with no travel time when searching by travel
/// time.  Matches the unit default weight of common graph libraries.
pub const MISSING_TRAVEL_TIME_WEIGHT: f64 = 1.0;

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query: the node sequence and its measured
/// travel time.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Nodes from origin to destination, both inclusive.  Routes returned by
    /// a [`Router`] are never empty.
    pub nodes: Vec<NodeId>,
    /// Sum of per-pair fastest-edge times, in seconds.
    pub total_travel_secs: f64,
}

impl Route {
    /// Route of a node to itself.
    pub fn trivial(node: NodeId) -> Self {
        Self { nodes: vec![node], total_travel_secs: 0.0 }
    }

    /// First node, or `None` for a hand-built empty route.
    pub fn origin(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn destination(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    /// Number of node-to-node hops.
    pub fn hop_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() == 1
    }
}

// ── Edge weight ───────────────────────────────────────────────────────────────

/// The attribute Dijkstra minimises.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EdgeWeight {
    /// `travel_time_s`, with [`MISSING_TRAVEL_TIME_WEIGHT`] for edges lacking it.
    TravelTime,
    /// `length_m`.
    Length,
}

impl EdgeWeight {
    /// Travel time if any edge in `network` has one, else length.
    pub fn select(network: &RoadNetwork) -> Self {
        if network.has_travel_times() {
            EdgeWeight::TravelTime
        } else {
            EdgeWeight::Length
        }
    }

    /// Search cost of one edge.  Negative and NaN values count as zero.
    #[inline]
    pub fn cost(self, attrs: &EdgeAttrs) -> f64 {
        let raw = match self {
            EdgeWeight::TravelTime => attrs.travel_time_s.unwrap_or(MISSING_TRAVEL_TIME_WEIGHT),
            EdgeWeight::Length => attrs.length_m,
        };
        raw.max(0.0)
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
pub trait Router {
    /// Compute a route from `from` to `to`.
    ///
    /// `from == to` yields a trivial route; an unknown node yields
    /// [`SpatialError::Lookup`]; a disconnected pair yields
    /// [`SpatialError::NoPath`].
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<Route>;
}

/// Dijkstra search with the two-step weight/measurement scheme described
/// in the module docs.
#[derive(Copy, Clone, Debug, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<Route> {
        route_travel_time(network, from, to)
    }
}

/// Least-cost path from `from` to `to` and its measured travel time.
pub fn route_travel_time(network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<Route> {
    for node in [from, to] {
        if !network.contains(node) {
            return Err(LookupError::NodeNotFound(node).into());
        }
    }
    if from == to {
        return Ok(Route::trivial(from));
    }

    let weight = EdgeWeight::select(network);
    let nodes = shortest_path(network, from, to, weight)?;
    let total_travel_secs = nodes
        .windows(2)
        .map(|pair| pair_time_secs(network, pair[0], pair[1]))
        .sum();

    trace!("route {from} -> {to}: {} hops, {total_travel_secs:.1} s ({weight:?})", nodes.len() - 1);
    Ok(Route { nodes, total_travel_secs })
}

/// Time to cross from `from` to adjacent `to`: the fastest parallel edge.
///
/// A pair with no edge at all contributes `0.0`.  That cannot happen for a
/// path this module produced.
pub fn pair_time_secs(network: &RoadNetwork, from: NodeId, to: NodeId) -> f64 {
    network
        .edges_between(from, to)
        .map(|e| network.attrs(e).time_secs())
        .min_by(f64::total_cmp)
        .unwrap_or(0.0)
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

fn shortest_path(
    network: &RoadNetwork,
    from: NodeId,
    to: NodeId,
    weight: EdgeWeight,
) -> SpatialResult<Vec<NodeId>> {
    let n = network.node_count();
    let mut dist      = vec![f64::INFINITY; n];
    // prev_edge[v] = EdgeId that reached v; EdgeId::INVALID for unreached nodes.
    let mut prev_edge = vec![EdgeId::INVALID; n];

    dist[from.index()] = 0.0;

    // Min-heap on (cost, node); NodeId breaks cost ties deterministically.
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((OrderedFloat(0.0), from)));

    while let Some(Reverse((OrderedFloat(cost), node))) = heap.pop() {
        if node == to {
            return Ok(reconstruct(network, &prev_edge, from, to));
        }

        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        for edge in network.out_edges(node) {
            let neighbor = network.edge_to[edge.index()];
            let new_cost = cost + weight.cost(network.attrs(edge));

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(Reverse((OrderedFloat(new_cost), neighbor)));
            }
        }
    }

    Err(SpatialError::NoPath { from, to })
}

fn reconstruct(network: &RoadNetwork, prev_edge: &[EdgeId], from: NodeId, to: NodeId) -> Vec<NodeId> {
    let mut nodes = vec![to];
    let mut cur = to;
    while cur != from {
        let e = prev_edge[cur.index()];
        cur = network.edge_from[e.index()];
        nodes.push(cur);
    }
    nodes.reverse();
    nodes
}
