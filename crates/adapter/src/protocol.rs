//! Protocol module - JSON message types for cascade events
//!
//! Line-delimited JSON: one message per line, each carrying `type`, `seq`
//! (sequence number) and `ts` (timestamp in ms).

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::core::{CascadeEvent, Outcome, Phase, SessionSnapshot};
use crate::types::{Cell, Coord, EngineError, Move};

// ============== Message tags ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PassType {
    #[serde(rename = "pass")]
    Pass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeType {
    #[serde(rename = "outcome")]
    Outcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectedType {
    #[serde(rename = "rejected")]
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SnapshotType {
    #[serde(rename = "snapshot")]
    Snapshot,
}

// ============== Game -> Client Messages ==============

/// One resolving pass of a cascade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassMessage {
    #[serde(rename = "type")]
    pub msg_type: PassType,
    pub seq: u64,
    pub ts: u64,
    /// `[row, col]` pairs, row-major
    pub matched_cells: Vec<[usize; 2]>,
    pub score_delta: u32,
    pub combo_depth: u32,
    pub cross_bonus: u32,
    #[serde(default)]
    pub relaxed: bool,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub loops_completed: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Settled,
    Reverted,
    NoMovesLeft,
    ComboGoal,
}

/// How a swap's cascade ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeMessage {
    #[serde(rename = "type")]
    pub msg_type: OutcomeType,
    pub seq: u64,
    pub ts: u64,
    pub result: OutcomeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_combo: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    InvalidMove,
    Busy,
    GameOver,
    OutOfBounds,
    RelaxedLocked,
    InvalidConfig,
}

impl From<EngineError> for RejectReason {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidMove => RejectReason::InvalidMove,
            EngineError::Busy => RejectReason::Busy,
            EngineError::GameOver => RejectReason::GameOver,
            EngineError::OutOfBounds { .. } => RejectReason::OutOfBounds,
            EngineError::RelaxedLocked => RejectReason::RelaxedLocked,
            EngineError::InvalidConfig(_) => RejectReason::InvalidConfig,
        }
    }
}

/// A request the engine refused; nothing changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedMessage {
    #[serde(rename = "type")]
    pub msg_type: RejectedType,
    pub seq: u64,
    pub ts: u64,
    pub reason: RejectReason,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseLower {
    Idle,
    Resolving,
    NoMovesLeft,
    ComboGoal,
}

impl From<Phase> for PhaseLower {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Idle => PhaseLower::Idle,
            Phase::Resolving => PhaseLower::Resolving,
            Phase::NoMovesLeft => PhaseLower::NoMovesLeft,
            Phase::ComboGoalReached => PhaseLower::ComboGoal,
        }
    }
}

/// Full session state (sent at start, end, or on request).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotMessage {
    #[serde(rename = "type")]
    pub msg_type: SnapshotType,
    pub seq: u64,
    pub ts: u64,
    pub episode_id: u32,
    pub seed: u32,
    pub rng_state: u32,
    pub phase: PhaseLower,
    pub size: usize,
    /// Symbol labels (`"A"`, `"B"`, ...), `"."` for empty
    pub rows: Vec<Vec<String>>,
    pub score: u32,
    pub combo: u32,
    pub best_combo: u32,
    pub relaxed_combos_left: u32,
    pub loops: u32,
    pub moves: u32,
    pub grid_hash: GridHash,
}

/// Grid hash serialized as 16 lowercase hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridHash(pub u64);

impl Serialize for GridHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        const HEX: &[u8; 16] = b"0123456789abcdef";
        let mut buf = [0u8; 16];
        let mut v = self.0;
        for i in 0..16 {
            buf[15 - i] = HEX[(v & 0x0f) as usize];
            v >>= 4;
        }
        let s = std::str::from_utf8(&buf).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(s)
    }
}

impl<'de> Deserialize<'de> for GridHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        u64::from_str_radix(s.trim(), 16)
            .map(GridHash)
            .map_err(serde::de::Error::custom)
    }
}

fn is_zero(v: &u32) -> bool {
    *v == 0
}

// ============== Builders ==============

pub fn create_pass(seq: u64, event: &CascadeEvent) -> PassMessage {
    PassMessage {
        msg_type: PassType::Pass,
        seq,
        ts: current_timestamp_ms(),
        matched_cells: event.matched_cells.iter().map(|c| [c.row, c.col]).collect(),
        score_delta: event.score_delta,
        combo_depth: event.combo_depth,
        cross_bonus: event.breakdown.cross_bonus,
        relaxed: event.relaxed,
        loops_completed: event.loops_completed,
    }
}

pub fn create_outcome(seq: u64, outcome: &Outcome) -> OutcomeMessage {
    let (result, final_score, max_combo) = match *outcome {
        Outcome::Settled {
            final_score,
            max_combo_reached,
        } => (
            OutcomeKind::Settled,
            Some(final_score),
            Some(max_combo_reached),
        ),
        Outcome::Reverted => (OutcomeKind::Reverted, None, None),
        Outcome::NoMovesLeft { final_score } => (OutcomeKind::NoMovesLeft, Some(final_score), None),
        Outcome::ComboGoalReached {
            final_score,
            max_combo_reached,
        } => (
            OutcomeKind::ComboGoal,
            Some(final_score),
            Some(max_combo_reached),
        ),
    };

    OutcomeMessage {
        msg_type: OutcomeType::Outcome,
        seq,
        ts: current_timestamp_ms(),
        result,
        final_score,
        max_combo,
    }
}

pub fn create_rejected(seq: u64, err: EngineError) -> RejectedMessage {
    RejectedMessage {
        msg_type: RejectedType::Rejected,
        seq,
        ts: current_timestamp_ms(),
        reason: err.into(),
        message: err.to_string(),
    }
}

pub fn create_snapshot(seq: u64, snap: &SessionSnapshot) -> SnapshotMessage {
    let rows = snap
        .grid
        .rows()
        .map(|row| row.iter().map(|cell| cell_label(*cell)).collect())
        .collect();

    SnapshotMessage {
        msg_type: SnapshotType::Snapshot,
        seq,
        ts: current_timestamp_ms(),
        episode_id: snap.episode_id,
        seed: snap.seed,
        rng_state: snap.rng_state,
        phase: snap.phase.into(),
        size: snap.grid.size,
        rows,
        score: snap.score,
        combo: snap.combo,
        best_combo: snap.best_combo,
        relaxed_combos_left: snap.relaxed_combos_left,
        loops: snap.loops,
        moves: snap.moves,
        grid_hash: GridHash(snap.grid.grid_hash),
    }
}

fn cell_label(cell: Cell) -> String {
    cell.map_or_else(|| ".".to_string(), |s| s.label().to_string())
}

// ============== Parsing ==============

/// Parse a text move of the form `r1,c1 r2,c2`.
///
/// Only the syntax is checked; bounds and adjacency are the session's job.
pub fn parse_move(text: &str) -> Result<Move> {
    let mut parts = text.split_whitespace();
    let from = parts
        .next()
        .ok_or_else(|| anyhow!("move: expected `r1,c1 r2,c2`, got empty input"))?;
    let to = parts
        .next()
        .ok_or_else(|| anyhow!("move: missing second coordinate in {:?}", text))?;
    if parts.next().is_some() {
        return Err(anyhow!("move: trailing input in {:?}", text));
    }
    Ok(Move::new(parse_coord(from)?, parse_coord(to)?))
}

fn parse_coord(text: &str) -> Result<Coord> {
    let (row, col) = text
        .split_once(',')
        .ok_or_else(|| anyhow!("move: invalid coordinate {:?}", text))?;
    let row = row
        .trim()
        .parse::<usize>()
        .map_err(|_| anyhow!("move: invalid row in {:?}", text))?;
    let col = col
        .trim()
        .parse::<usize>()
        .map_err(|_| anyhow!("move: invalid column in {:?}", text))?;
    Ok(Coord::new(row, col))
}

/// Get current timestamp in milliseconds
fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
