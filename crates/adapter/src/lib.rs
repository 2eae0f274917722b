//! Adapter module - cascade events as line-delimited JSON
//!
//! This crate turns core values into JSON messages for external tooling
//! (bots, replays, log analysis) and holds the runner's configuration.
//!
//! # Message Types
//!
//! - **pass**: one resolving pass (matched cells, score delta, combo depth, cross bonus)
//! - **outcome**: how a swap ended (`settled`, `reverted`, `no_moves_left`, `combo_goal`)
//! - **rejected**: a refused request and its reason code
//! - **snapshot**: full session state with the grid as symbol labels
//!
//! Every message carries `type`, `seq` and `ts` (milliseconds since the epoch).
//!
//! # Configuration
//!
//! [`RunConfig::from_env`] reads `MATCH3_SEED`, `MATCH3_GRID_SIZE`,
//! `MATCH3_SYMBOLS`, `MATCH3_MAX_MOVES`, `MATCH3_COMBO_GOAL`,
//! `MATCH3_LOOP_THRESHOLD` and `MATCH3_LOG_PATH`. When a log path is set,
//! every emitted line is also appended to that file.

pub mod config;
pub mod log;
pub mod protocol;

pub use match_cascade_core as core;
pub use match_cascade_types as types;

// Re-export protocol types for convenience
pub use config::RunConfig;
pub use log::{Emitter, EventLog};
pub use protocol::*;
