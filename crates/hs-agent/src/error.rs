use hs_core::AgentId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("agent {0:?} already has a job")]
    Busy(AgentId),
}

pub type AgentResult<T> = Result<T, AgentError>;
