use thiserror::Error;

use crate::BoardId;

pub type Result<T, E = RegistryError> = core::result::Result<T, E>;

/// Lookup failures. Always caller input, never a broken table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("unknown board id: {0}")]
    UnknownIdentifier(i32),
    #[error("unknown board name: {0:?}")]
    UnknownName(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} requires a master_board")]
    MissingMasterBoard(BoardId),
    #[error("{master} cannot act as master board for {board}")]
    InvalidMasterBoard { board: BoardId, master: BoardId },
    #[error("{board} requires field `{field}`")]
    MissingField { board: BoardId, field: &'static str },
    #[error("{0} cannot be used as a session board")]
    UnusableBoard(BoardId),
    #[error("duplicate board config name: {0:?}")]
    DuplicateName(String),
    #[error("unknown ip protocol: {0}")]
    UnknownIpProtocol(String),
}
