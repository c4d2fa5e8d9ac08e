//! Process-wide reverse lookup from published code (and name) to [`BoardId`].

use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::debug;

use crate::error::{RegistryError, Result};
use crate::BoardId;

#[derive(Debug, Clone)]
pub struct BoardRegistry {
    by_code: HashMap<i32, BoardId>,
    by_name: HashMap<&'static str, BoardId>,
}

impl BoardRegistry {
    fn new() -> Self {
        let mut by_code = HashMap::with_capacity(BoardId::ALL.len());
        let mut by_name = HashMap::with_capacity(BoardId::ALL.len());
        for &board in BoardId::ALL {
            by_code.insert(board.code(), board);
            by_name.insert(board.name(), board);
        }
        debug!(boards = by_code.len(), "board registry initialised");
        Self { by_code, by_name }
    }

    pub fn from_code(&self, code: i32) -> Result<BoardId> {
        match self.by_code.get(&code) {
            Some(board) => Ok(*board),
            None => {
                debug!(code, "unknown board id");
                Err(RegistryError::UnknownIdentifier(code))
            }
        }
    }

    /// Name for `code`; a miss is reported, never dereferenced.
    pub fn name_of_code(&self, code: i32) -> Result<&'static str> {
        self.from_code(code).map(BoardId::name)
    }

    /// Exact, case-sensitive match on the canonical name.
    pub fn from_name(&self, name: &str) -> Result<BoardId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| RegistryError::UnknownName(name.to_string()))
    }

    pub fn contains_code(&self, code: i32) -> bool {
        self.by_code.contains_key(&code)
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    /// All boards sorted by code.
    pub fn boards(&self) -> Vec<BoardId> {
        let mut boards: Vec<BoardId> = self.by_code.values().copied().collect();
        boards.sort_by_key(|b| b.code());
        boards
    }
}

static REGISTRY: OnceLock<BoardRegistry> = OnceLock::new();

/// Get the global board registry
pub fn board_registry() -> &'static BoardRegistry {
    REGISTRY.get_or_init(BoardRegistry::new)
}

pub fn code_of(board: BoardId) -> i32 {
    board.code()
}

pub fn board_from_code(code: i32) -> Result<BoardId> {
    board_registry().from_code(code)
}

pub fn name_of_code(code: i32) -> Result<&'static str> {
    board_registry().name_of_code(code)
}

pub fn board_from_name(name: &str) -> Result<BoardId> {
    board_registry().from_name(name)
}
