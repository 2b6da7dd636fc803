use thiserror::Error;

use hs_core::{ObjectId, OrderId};

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("order parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("order {0}: pieces per pallet must be at least 1")]
    ZeroPiecesPerPallet(OrderId),

    #[error("order {0}: pallet weight must be finite and not negative")]
    InvalidWeight(OrderId),

    #[error("order {order} references unknown object {object}")]
    UnknownObject { order: OrderId, object: ObjectId },

    #[error("order id {0} is used more than once")]
    DuplicateOrder(OrderId),
}

pub type OrderResult<T> = Result<T, OrderError>;
