use queuezero_core::{Board, BoardConfig, BoardConfigExt, FileStorage, SystemClock};
use std::sync::Arc;
use tokio::sync::RwLock;

/// The board as driven from the terminal: on-disk storage, wall clock.
pub type CliBoard = Board<FileStorage, SystemClock>;

/// Holds all shared state for the CLI application.
/// This is a lightweight container - logic lives in the core board.
#[derive(Clone)]
pub struct CliContext {
    pub config: Arc<RwLock<BoardConfig>>,
    pub board: Arc<RwLock<CliBoard>>,
}

impl CliContext {
    /// Load config from disk and open the board it points at.
    pub fn new() -> Self {
        Self::with_config(BoardConfig::load())
    }

    pub fn with_config(config: BoardConfig) -> Self {
        let board = Board::open(config.storage(), SystemClock);
        Self {
            config: Arc::new(RwLock::new(config)),
            board: Arc::new(RwLock::new(board)),
        }
    }
}

impl Default for CliContext {
    fn default() -> Self {
        Self::new()
    }
}
