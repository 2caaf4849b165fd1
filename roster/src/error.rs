//====================================================================

use thiserror::Error;

//====================================================================

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Position not present in roster: {0}")]
    UnknownPosition(String),

    #[error("Invalid character template '{id}': {reason}")]
    InvalidTemplate { id: String, reason: String },

    #[error("No squad has been saved")]
    MissingSquad,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RosterError>;

//====================================================================
