use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),

    #[error("Invalid record ({reason}): {line}")]
    InvalidRecord { line: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
