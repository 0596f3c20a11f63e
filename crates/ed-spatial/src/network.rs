//! Road network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! Edge arrays (`edge_from`, `edge_to`, `edge_attrs`) are sorted by source
//! node and indexed by `EdgeId`.  The graph is a **multigraph**: two edges may
//! share the same `(from, to)` pair, each carrying its own [`EdgeAttrs`].
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `[lon, lat]` to the nearest `NodeId` under
//! planar squared distance in degree space.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use ed_core::{EdgeId, GeoPoint, NodeId};

use crate::{LookupError, SpatialError, SpatialResult};

/// Assumed speed for an edge with no speed attribute.
pub const DEFAULT_SPEED_KPH: f64 = 30.0;

/// Speed used when an edge's speed attribute is present but zero.
pub const ZERO_SPEED_FALLBACK_MPS: f64 = 8.33;

// ── Edge attributes ───────────────────────────────────────────────────────────

/// Per-edge attributes supplied by whoever built the graph.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeAttrs {
    /// Physical length in metres.
    pub length_m: f64,
    /// Precomputed traversal time in seconds, if known.
    pub travel_time_s: Option<f64>,
    /// Posted or imputed speed in km/h, if known.
    pub speed_kph: Option<f64>,
}

impl EdgeAttrs {
    /// An edge with only a length.
    pub fn new(length_m: f64) -> Self {
        Self { length_m, travel_time_s: None, speed_kph: None }
    }

    pub fn with_speed(mut self, speed_kph: f64) -> Self {
        self.speed_kph = Some(speed_kph);
        self
    }

    pub fn with_travel_time(mut self, travel_time_s: f64) -> Self {
        self.travel_time_s = Some(travel_time_s);
        self
    }

    /// Estimated traversal time in seconds.
    ///
    /// Uses `travel_time_s` when present.  Otherwise `length / speed`, where
    /// the speed is `speed_kph` (default [`DEFAULT_SPEED_KPH`]) converted to
    /// m/s.  A zero speed falls back to [`ZERO_SPEED_FALLBACK_MPS`] and a
    /// negative one to 1 m/s.
    pub fn time_secs(&self) -> f64 {
        if let Some(t) = self.travel_time_s {
            return t;
        }
        let kph = self.speed_kph.unwrap_or(DEFAULT_SPEED_KPH);
        let mps = if kph == 0.0 { ZERO_SPEED_FALLBACK_MPS } else { kph / 3.6 };
        let mps = if mps > 0.0 { mps } else { 1.0 };
        self.length_m / mps
    }
}

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 2-D `[lon, lat]` point with
/// the associated `NodeId`.
#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2], // [lon, lat]
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in lon/lat space.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlon = self.point[0] - point[0];
        let dlat = self.point[1] - point[1];
        dlon * dlon + dlat * dlat
    }
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Directed road multigraph in CSR format plus a spatial index for node
/// snapping.
///
/// Read-only once built; construct with [`RoadNetworkBuilder`].
pub struct RoadNetwork {
    /// Geographic position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<GeoPoint>,

    /// CSR row pointer.  Outgoing edges of node `n` are at EdgeIds
    /// `node_out_start[n] .. node_out_start[n+1]`.
    /// Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    /// Source node of each edge.  Needed to walk `prev_edge` back to the
    /// origin during path reconstruction.
    pub edge_from: Vec<NodeId>,

    /// Destination node of each edge.
    pub edge_to: Vec<NodeId>,

    /// Attributes of each edge.
    pub edge_attrs: Vec<EdgeAttrs>,

    /// `true` if at least one edge carries `travel_time_s`.
    any_travel_time: bool,

    spatial_idx: RTree<NodeEntry>,
}

impl RoadNetwork {
    /// Construct an empty network with no nodes or edges.
    ///
    /// Every lookup against it fails with [`LookupError::EmptyNetwork`] or
    /// [`LookupError::NodeNotFound`].
    pub fn empty() -> Self {
        RoadNetworkBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    /// `true` if `node` names a node of this network.
    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }

    /// `true` if any edge carries a precomputed travel time.
    #[inline]
    pub fn has_travel_times(&self) -> bool {
        self.any_travel_time
    }

    pub fn position(&self, node: NodeId) -> Option<GeoPoint> {
        self.node_pos.get(node.index()).copied()
    }

    /// Positions of every node along `path`, in order.  Used to draw a
    /// route on a map.
    pub fn path_positions(&self, path: &[NodeId]) -> SpatialResult<Vec<GeoPoint>> {
        path.iter()
            .map(|&n| {
                self.position(n)
                    .ok_or(SpatialError::Lookup(LookupError::NodeNotFound(n)))
            })
            .collect()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    ///
    /// `node` must be in the network (see [`contains`](Self::contains)).
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// Every parallel edge from `from` to `to`.  Empty if either node is
    /// unknown or the pair is not adjacent.
    pub fn edges_between(&self, from: NodeId, to: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let range = if self.contains(from) {
            self.node_out_start[from.index()]..self.node_out_start[from.index() + 1]
        } else {
            0..0
        };
        range
            .map(EdgeId)
            .filter(move |e| self.edge_to[e.index()] == to)
    }

    #[inline]
    pub fn attrs(&self, edge: EdgeId) -> &EdgeAttrs {
        &self.edge_attrs[edge.index()]
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Return the `NodeId` of the nearest road node to `pos`.
    ///
    /// Returns `None` only if the network has no nodes.
    pub fn snap_to_node(&self, pos: GeoPoint) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.lon, pos.lat])
            .map(|e| e.id)
    }
}

/// Resolve a geographic point to the closest node of `network`.
pub fn nearest_node(network: &RoadNetwork, point: GeoPoint) -> SpatialResult<NodeId> {
    if !point.is_finite() {
        return Err(LookupError::InvalidPoint(point).into());
    }
    network
        .snap_to_node(point)
        .ok_or(SpatialError::Lookup(LookupError::EmptyNetwork))
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// Nodes and directed edges may be added in any order.  `build()` sorts
/// edges by source node, constructs the CSR arrays, and bulk-loads the
/// R-tree.
///
/// # Example
///
/// ```
/// use ed_core::GeoPoint;
/// use ed_spatial::{EdgeAttrs, RoadNetworkBuilder};
///
/// let mut b = RoadNetworkBuilder::new();
/// let a = b.add_node(GeoPoint::new(72.83, 21.20));
/// let c = b.add_node(GeoPoint::new(72.84, 21.20));
/// b.add_road(a, c, EdgeAttrs::new(1_200.0).with_speed(40.0));
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // bidirectional
/// ```
pub struct RoadNetworkBuilder {
    nodes:     Vec<GeoPoint>,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    from:  NodeId,
    to:    NodeId,
    attrs: EdgeAttrs,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), raw_edges: Vec::new() }
    }

    /// Pre-allocate for the expected number of nodes and edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes:     Vec::with_capacity(nodes),
            raw_edges: Vec::with_capacity(edges),
        }
    }

    /// Add a road node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, pos: GeoPoint) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        id
    }

    /// Add a **directed** edge from `from` to `to`.  Adding the same pair
    /// twice creates a parallel edge rather than replacing the first.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, attrs: EdgeAttrs) {
        self.raw_edges.push(RawEdge { from, to, attrs });
    }

    /// Convenience: add edges in **both directions** for a two-way street.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, attrs: EdgeAttrs) {
        self.add_directed_edge(a, b, attrs);
        self.add_directed_edge(b, a, attrs);
    }

    /// Fill `travel_time_s` on every edge that lacks it, using
    /// [`EdgeAttrs::time_secs`].  Edges that already carry a time keep it.
    pub fn impute_travel_times(&mut self) -> &mut Self {
        for e in &mut self.raw_edges {
            if e.attrs.travel_time_s.is_none() {
                e.attrs.travel_time_s = Some(e.attrs.time_secs());
            }
        }
        self
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`RoadNetwork`].
    ///
    /// # Panics
    /// Panics if an edge references a node that was never added.
    pub fn build(self) -> RoadNetwork {
        let node_count = self.nodes.len();
        let edge_count = self.raw_edges.len();

        // Stable sort keeps parallel edges in insertion order.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from:  Vec<NodeId>    = raw.iter().map(|e| e.from).collect();
        let edge_to:    Vec<NodeId>    = raw.iter().map(|e| e.to).collect();
        let edge_attrs: Vec<EdgeAttrs> = raw.iter().map(|e| e.attrs).collect();
        let any_travel_time = edge_attrs.iter().any(|a| a.travel_time_s.is_some());

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            assert!(e.from.index() < node_count, "edge source {} was never added", e.from);
            assert!(e.to.index() < node_count, "edge target {} was never added", e.to);
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, &pos)| NodeEntry {
                point: [pos.lon, pos.lat],
                id: NodeId(i as u32),
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        RoadNetwork {
            node_pos: self.nodes,
            node_out_start,
            edge_from,
            edge_to,
            edge_attrs,
            any_travel_time,
            spatial_idx,
        }
    }
}

impl Default for RoadNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
