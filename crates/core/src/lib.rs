//! Core cascade engine - pure, deterministic, and testable
//!
//! This crate contains the match-three rules, session state machine and
//! symbol sources. It has **no dependencies** on rendering, input or I/O:
//!
//! - **Deterministic**: a seed (or a scripted [`SequenceSource`]) fixes every refill
//! - **Headless**: presentation layers read snapshots and cascade events
//! - **Testable**: every rule is a free function over a [`Grid`]
//!
//! # Module Structure
//!
//! - [`grid`]: N×N cell storage with checked access
//! - [`detector`]: horizontal and vertical run detection
//! - [`gravity`]: column compaction and top-down refill
//! - [`scoring`]: per-pass points, intersection bonus and combo multiplier
//! - [`oracle`]: is there still a productive swap?
//! - [`session`]: the swap/resolve/settle state machine
//! - [`config`]: rule parameters and variants
//! - [`rng`]: seeded LCG and scripted symbol sources
//! - [`snapshot`]: read-only copies for rendering and hashing
//!
//! # Example
//!
//! ```
//! use match_cascade_core::{EngineConfig, Outcome, Session};
//!
//! let mut session = Session::new(EngineConfig::default(), 12345).unwrap();
//! let mv = session.hint().expect("freshly dealt boards have a move");
//!
//! let report = session.attempt_swap(mv.from, mv.to).unwrap();
//! assert!(!report.passes.is_empty());
//! assert!(session.score() > 0);
//! assert_ne!(report.outcome, Outcome::Reverted);
//! ```

pub mod config;
pub mod detector;
pub mod gravity;
pub mod grid;
pub mod oracle;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use match_cascade_types as types;

// Re-export commonly used types for convenience
pub use config::EngineConfig;
pub use detector::{detect_matches, has_match, MatchGroup, MatchSet};
pub use gravity::{apply_gravity, refill};
pub use grid::Grid;
pub use oracle::{available_moves, find_move, has_available_move};
pub use rng::{SequenceSource, SimpleRng, SymbolSource};
pub use scoring::{score_pass, ScoreBreakdown, ScoreRules};
pub use session::{CascadeEvent, CascadeReport, Outcome, Session, Step};
pub use snapshot::{GridSnapshot, Phase, SessionSnapshot};
