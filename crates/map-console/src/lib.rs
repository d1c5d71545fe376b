//! Headless driver for the map store.
//!
//! Owns a [`MapStore`](map_store::MapStore) as the application's composition
//! root, replays a JSONL script of control and renderer events against it,
//! and writes the derived overlay layers as JSONL frames.

pub mod commands;
pub mod session;

pub use commands::{Command, Frame};
pub use session::{RunSummary, Session};

use map_store::{ConfigError, StoreError};
use thiserror::Error;

/// Errors surfaced by the console.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("script line {line}: {source}")]
    Script {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode frame: {0}")]
    Encode(#[source] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
