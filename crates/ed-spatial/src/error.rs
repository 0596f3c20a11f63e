//! Spatial-subsystem error type.

use thiserror::Error;

use ed_core::{GeoPoint, NodeId};

/// Errors produced by `ed-spatial`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpatialError {
    #[error("lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error("no path from {from} to {to}")]
    NoPath { from: NodeId, to: NodeId },
}

/// Why a point or node id could not be resolved against the network.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("network has no nodes")]
    EmptyNetwork,

    #[error("point {0} has a non-finite coordinate")]
    InvalidPoint(GeoPoint),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
