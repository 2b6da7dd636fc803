use hs_core::HsError;
use hs_orders::OrderError;
use hs_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] HsError),

    #[error("layout error: {0}")]
    Spatial(#[from] SpatialError),

    #[error("order rejected: {0}")]
    Order(#[from] OrderError),

    #[error("layout has no machine or warehouse to park manipulants at")]
    EmptyLayout,

    #[error("session is paused")]
    Paused,

    #[error("session has already finished")]
    Finished,
}

pub type SimResult<T> = Result<T, SimError>;
