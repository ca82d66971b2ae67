pub mod aggregate;
pub mod board;
pub mod clock;
pub mod config;
pub mod error;
pub mod storage;
pub mod store;

// Re-exports for convenience
pub use aggregate::{average, busy_level, confidence, staleness_text, summarize, wait_color, wait_severity};
pub use board::{Board, FormState};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{BoardConfig, BoardConfigExt};
pub use error::{BoardError, ConfigError, StorageError, ValidationError};
pub use queuezero_types::{Confidence, Location, LocationSummary, Severity};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::{STORAGE_KEY, load, parse_locations, record_wait, save, seed_locations};
#[cfg(target_arch = "wasm32")]
pub use storage::WebStorage;
