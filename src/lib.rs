//! Match cascade (workspace facade crate).
//!
//! Exposes `match_cascade::{core,adapter,types}` while the implementation
//! lives in dedicated crates under `crates/`.

pub use match_cascade_adapter as adapter;
pub use match_cascade_core as core;
pub use match_cascade_types as types;
