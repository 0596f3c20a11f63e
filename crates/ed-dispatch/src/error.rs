use ed_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("routing error: {0}")]
    Spatial(#[from] SpatialError),

    #[error("scenario needs {requested} ambulance nodes but the network has {available}")]
    NotEnoughNodes {
        requested: usize,
        available: usize,
    },

    #[error("incident {0} already has an ambulance assigned")]
    AlreadyAssigned(String),

    #[error("hospital data parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DispatchResult<T> = Result<T, DispatchError>;
