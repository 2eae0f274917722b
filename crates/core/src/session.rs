//! Session module - the cascade state machine
//!
//! A [`Session`] owns the grid, score and combo state of one game. Every swap
//! runs through the same loop:
//!
//! ```text
//! Idle --swap--> Resolving --(matches)--> score, clear, gravity, refill --+
//!                   ^                                                   |
//!                   +---------------------------------------------------+
//!                   |
//!                   +--(no matches, first pass)--> revert --> Idle
//!                   +--(no matches)--> Settled --> Idle | NoMovesLeft | ComboGoalReached
//! ```
//!
//! Callers either run a whole cascade with [`Session::attempt_swap`] or drive
//! it one pass at a time with [`Session::begin_swap`] and [`Session::step`],
//! animating between passes at their own pace.

use crate::config::EngineConfig;
use crate::detector::{detect_matches, MatchGroup};
use crate::gravity::{apply_gravity, refill, safe_symbols};
use crate::grid::Grid;
use crate::oracle::find_move;
use crate::rng::{SimpleRng, SymbolSource};
use crate::scoring::{score_pass, ScoreBreakdown, ScoreRules};
use crate::snapshot::{GridSnapshot, Phase, SessionSnapshot};
use crate::types::{Coord, EngineError, Move, Symbol, RELAXED_MATCH_LEN};

/// Boards dealt by `new_game` before accepting one without a productive swap.
const MAX_DEAL_ATTEMPTS: u32 = 64;

/// One non-empty resolving pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeEvent {
    /// Cleared cells, each once, row-major
    pub matched_cells: Vec<Coord>,
    pub groups: Vec<MatchGroup>,
    pub score_delta: u32,
    pub combo_depth: u32,
    pub breakdown: ScoreBreakdown,
    /// Whether this pass used relaxed (length 2) matching
    pub relaxed: bool,
    /// Cells that received fresh symbols, column by column
    pub refilled: Vec<Coord>,
    /// Score loops completed by this pass
    pub loops_completed: u32,
}

/// How a cascade ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Settled {
        final_score: u32,
        max_combo_reached: u32,
    },
    /// The swap produced no match and was undone
    Reverted,
    NoMovesLeft {
        final_score: u32,
    },
    ComboGoalReached {
        final_score: u32,
        max_combo_reached: u32,
    },
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Outcome::NoMovesLeft { .. } | Outcome::ComboGoalReached { .. }
        )
    }
}

/// Result of a single [`Session::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Pass(CascadeEvent),
    Done(Outcome),
}

/// Every pass of one swap plus its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeReport {
    pub passes: Vec<CascadeEvent>,
    pub outcome: Outcome,
}

impl CascadeReport {
    pub fn total_delta(&self) -> u32 {
        self.passes
            .iter()
            .fold(0u32, |acc, p| acc.saturating_add(p.score_delta))
    }
}

/// A single game.
#[derive(Debug, Clone)]
pub struct Session<S: SymbolSource = SimpleRng> {
    config: EngineConfig,
    grid: Grid,
    source: S,
    phase: Phase,
    /// Swap to undo if the first pass finds nothing.
    pending: Option<Move>,
    /// Whether the cascade in flight opened with a relaxed pass.
    relaxed_cascade: bool,
    score: u32,
    combo: u32,
    max_combo: u32,
    best_combo: u32,
    relaxed_combos_left: u32,
    loops: u32,
    /// Monotonic game id (increments on `new_game`).
    episode_id: u32,
    /// Source state this game was dealt from.
    seed: u32,
    moves: u32,
}

impl Session<SimpleRng> {
    /// Start a seeded game with the default LCG.
    pub fn new(config: EngineConfig, seed: u32) -> Result<Self, EngineError> {
        Self::with_source(config, SimpleRng::new(seed))
    }
}

impl Default for Session<SimpleRng> {
    fn default() -> Self {
        let mut session = Self::blank(EngineConfig::default(), SimpleRng::default());
        session.deal();
        session
    }
}

impl<S: SymbolSource> Session<S> {
    /// Start a game drawing symbols from `source`.
    pub fn with_source(config: EngineConfig, source: S) -> Result<Self, EngineError> {
        config.validate()?;
        let mut session = Self::blank(config, source);
        session.deal();
        Ok(session)
    }

    /// Resume play on a hand-built grid; `config.grid_size` follows the grid.
    ///
    /// The grid is taken as-is: existing matches are only resolved by the
    /// next swap's cascade.
    pub fn with_grid(config: EngineConfig, grid: Grid, source: S) -> Result<Self, EngineError> {
        let config = config.with_grid_size(grid.size());
        config.validate()?;
        let mut session = Self::blank(config, source);
        session.grid = grid;
        Ok(session)
    }

    fn blank(config: EngineConfig, source: S) -> Self {
        let seed = source.state();
        Self {
            grid: Grid::new(config.grid_size),
            config,
            source,
            phase: Phase::Idle,
            pending: None,
            relaxed_cascade: false,
            score: 0,
            combo: 0,
            max_combo: 0,
            best_combo: 0,
            relaxed_combos_left: 0,
            loops: 0,
            episode_id: 0,
            seed,
            moves: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    /// Deepest combo of the current (or last) cascade
    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    /// Deepest combo this game
    pub fn best_combo(&self) -> u32 {
        self.best_combo
    }

    pub fn loops(&self) -> u32 {
        self.loops
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    /// Accepted (non-reverted) swaps this game
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn relaxed_combos_left(&self) -> u32 {
        self.relaxed_combos_left
    }

    pub fn is_relaxed(&self) -> bool {
        self.relaxed_combos_left > 0
    }

    /// A productive swap on the current board, if any.
    pub fn hint(&self) -> Option<Move> {
        find_move(&self.grid, self.config.min_match_length)
    }

    pub fn grid_snapshot(&self) -> GridSnapshot {
        GridSnapshot::capture(&self.grid)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            grid: self.grid_snapshot(),
            phase: self.phase,
            score: self.score,
            combo: self.combo,
            max_combo: self.max_combo,
            best_combo: self.best_combo,
            relaxed_combos_left: self.relaxed_combos_left,
            loops: self.loops,
            episode_id: self.episode_id,
            seed: self.seed,
            rng_state: self.source.state(),
            moves: self.moves,
        }
    }

    /// Reset to a freshly dealt board with zero score and combo.
    ///
    /// `Some(seed)` restarts the symbol stream; `None` keeps drawing from it.
    pub fn new_game(&mut self, seed: Option<u32>) {
        if let Some(seed) = seed {
            self.source.reseed(seed);
        }
        self.seed = self.source.state();
        self.episode_id = self.episode_id.wrapping_add(1);
        self.phase = Phase::Idle;
        self.pending = None;
        self.relaxed_cascade = false;
        self.score = 0;
        self.combo = 0;
        self.max_combo = 0;
        self.best_combo = 0;
        self.relaxed_combos_left = 0;
        self.loops = 0;
        self.moves = 0;
        self.deal();
    }

    /// Deal a board with no runs and, when possible, at least one productive swap.
    fn deal(&mut self) {
        let size = self.config.grid_size;
        let min_len = self.config.min_match_length;
        let symbol_count = self.config.symbol_count;

        for _ in 0..MAX_DEAL_ATTEMPTS {
            self.grid = Grid::new(size);
            for row in 0..size {
                for col in 0..size {
                    let coord = Coord::new(row, col);
                    let safe = safe_symbols(&self.grid, coord, symbol_count, min_len);
                    let pick = safe[self.source.next_index(safe.len())];
                    self.grid.put(coord, Some(Symbol::new(pick)));
                }
            }
            if find_move(&self.grid, min_len).is_some() {
                self.phase = Phase::Idle;
                return;
            }
        }

        self.phase = Phase::NoMovesLeft;
    }

    /// Unlock relaxed matching for the next `relaxed_combo_budget` cascades.
    ///
    /// Returns the remaining budget. Does not spend score.
    pub fn activate_relaxed_mode(&mut self) -> Result<u32, EngineError> {
        self.ensure_accepting()?;
        if self.relaxed_combos_left > 0 {
            return Ok(self.relaxed_combos_left);
        }
        if self.score < self.config.relaxed_unlock_score {
            return Err(EngineError::RelaxedLocked);
        }
        self.relaxed_combos_left = self.config.relaxed_combo_budget;
        Ok(self.relaxed_combos_left)
    }

    fn ensure_accepting(&self) -> Result<(), EngineError> {
        match self.phase {
            Phase::Idle => Ok(()),
            Phase::Resolving => Err(EngineError::Busy),
            Phase::NoMovesLeft | Phase::ComboGoalReached => Err(EngineError::GameOver),
        }
    }

    /// Swap two adjacent cells and enter `Resolving`.
    ///
    /// Drive the cascade with [`step`](Self::step) until it returns
    /// [`Step::Done`]. Nothing is mutated on error.
    pub fn begin_swap(&mut self, a: Coord, b: Coord) -> Result<(), EngineError> {
        self.ensure_accepting()?;
        if !self.grid.contains(a) || !self.grid.contains(b) || !a.is_adjacent(b) {
            return Err(EngineError::InvalidMove);
        }

        self.grid.swap(a, b)?;
        self.combo = 0;
        self.max_combo = 0;
        self.pending = Some(Move::new(a, b));
        self.relaxed_cascade = self.is_relaxed();
        self.phase = Phase::Resolving;
        Ok(())
    }

    /// Run one resolving pass. Returns `None` when no cascade is in flight.
    pub fn step(&mut self) -> Option<Step> {
        if self.phase != Phase::Resolving {
            return None;
        }
        Some(self.resolve_pass())
    }

    /// Swap and resolve the whole cascade.
    pub fn attempt_swap(&mut self, a: Coord, b: Coord) -> Result<CascadeReport, EngineError> {
        self.begin_swap(a, b)?;
        let mut passes = Vec::new();
        loop {
            match self.resolve_pass() {
                Step::Pass(event) => passes.push(event),
                Step::Done(outcome) => return Ok(CascadeReport { passes, outcome }),
            }
        }
    }

    fn resolve_pass(&mut self) -> Step {
        let relaxed = self.relaxed_cascade && self.combo == 0;
        let min_len = if relaxed {
            RELAXED_MATCH_LEN
        } else {
            self.config.min_match_length
        };

        let matches = detect_matches(&self.grid, min_len);
        if matches.is_empty() {
            if self.combo == 0 {
                if let Some(mv) = self.pending.take() {
                    // Both coordinates were validated in begin_swap.
                    let a = self.grid.at(mv.from);
                    self.grid.put(mv.from, self.grid.at(mv.to));
                    self.grid.put(mv.to, a);
                    self.phase = Phase::Idle;
                    return Step::Done(Outcome::Reverted);
                }
            }
            return Step::Done(self.settle());
        }

        self.pending = None;
        self.combo += 1;
        self.max_combo = self.max_combo.max(self.combo);
        self.best_combo = self.best_combo.max(self.combo);
        if relaxed {
            self.relaxed_combos_left = self.relaxed_combos_left.saturating_sub(1);
        }

        let rules = if relaxed {
            ScoreRules::relaxed(self.config.base_unit)
        } else {
            ScoreRules::standard(self.config.base_unit)
        };
        let breakdown = score_pass(&matches, self.combo, rules);
        let loops_completed = self.add_score(breakdown.total);

        let matched_cells = matches.matched_cells();
        for &cell in &matched_cells {
            self.grid.put(cell, None);
        }
        apply_gravity(&mut self.grid);
        let refilled = refill(&mut self.grid, &mut self.source, self.config.symbol_count);

        Step::Pass(CascadeEvent {
            matched_cells,
            groups: matches.groups().to_vec(),
            score_delta: breakdown.total,
            combo_depth: self.combo,
            breakdown,
            relaxed,
            refilled,
            loops_completed,
        })
    }

    /// Add `delta` to the score; returns how many loop thresholds were crossed.
    fn add_score(&mut self, delta: u32) -> u32 {
        self.score = self.score.saturating_add(delta);
        let Some(threshold) = self.config.score_loop_threshold else {
            return 0;
        };
        let loops = self.score / threshold;
        let crossed = loops - self.loops;
        self.loops = loops;
        crossed
    }

    fn settle(&mut self) -> Outcome {
        self.pending = None;
        self.moves = self.moves.wrapping_add(1);

        if let Some(goal) = self.config.combo_victory_threshold {
            if self.max_combo >= goal {
                self.phase = Phase::ComboGoalReached;
                return Outcome::ComboGoalReached {
                    final_score: self.score,
                    max_combo_reached: self.max_combo,
                };
            }
        }

        if find_move(&self.grid, self.config.min_match_length).is_none() {
            self.phase = Phase::NoMovesLeft;
            return Outcome::NoMovesLeft {
                final_score: self.score,
            };
        }

        self.phase = Phase::Idle;
        Outcome::Settled {
            final_score: self.score,
            max_combo_reached: self.max_combo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::has_match;
    use crate::rng::SequenceSource;
    use crate::types::{Direction, MIN_MATCH_LEN};

    const CASCADE: [&str; 5] = ["BCABC", "CDBCD", "AABAC", "DBCDB", "BCDBD"];

    fn c(row: usize, col: usize) -> Coord {
        Coord::new(row, col)
    }

    fn scripted(
        config: EngineConfig,
        rows: &[&str],
        refill: &str,
    ) -> Session<SequenceSource> {
        Session::with_grid(config, Grid::parse(rows), SequenceSource::from_labels(refill)).unwrap()
    }

    fn relaxed_config() -> EngineConfig {
        EngineConfig {
            relaxed_unlock_score: 0,
            ..EngineConfig::default()
        }
    }

    #[test]
    fn test_single_run_settles() {
        let mut session = scripted(
            EngineConfig::default(),
            &["ABAAD", "CDCDA", "BCBAC", "DADCB", "CBCBD"],
            "CDB",
        );
        let report = session.attempt_swap(c(0, 0), c(0, 1)).unwrap();

        assert_eq!(report.passes.len(), 1);
        let pass = &report.passes[0];
        assert_eq!(pass.matched_cells, vec![c(0, 1), c(0, 2), c(0, 3)]);
        assert_eq!(pass.score_delta, 30);
        assert_eq!(pass.combo_depth, 1);
        assert!(!pass.relaxed);
        assert_eq!(
            report.outcome,
            Outcome::Settled {
                final_score: 30,
                max_combo_reached: 1
            }
        );
        assert_eq!(
            session.grid().to_strings(),
            vec!["BCDBD", "CDCDA", "BCBAC", "DADCB", "CBCBD"]
        );
        assert_eq!(session.source.consumed(), 3);
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.moves(), 1);
    }

    #[test]
    fn test_cross_match_scores_bonus() {
        let mut session = scripted(
            EngineConfig::default(),
            &["BCDBC", "CDBCD", "AABAC", "DBADB", "BCABD"],
            "CDBDCB",
        );
        let report = session.attempt_swap(c(2, 2), c(2, 3)).unwrap();

        let pass = &report.passes[0];
        assert_eq!(
            pass.groups,
            vec![
                MatchGroup::new(c(2, 0), Direction::Row, 3),
                MatchGroup::new(c(2, 2), Direction::Column, 3),
            ]
        );
        assert_eq!(pass.breakdown.group_points, 60);
        assert_eq!(pass.breakdown.cross_bonus, 30);
        assert_eq!(pass.score_delta, 90);
        assert_eq!(pass.matched_cells.len(), 5);
        assert_eq!(
            pass.refilled,
            vec![c(0, 0), c(0, 1), c(0, 2), c(1, 2), c(2, 2)]
        );
        assert_eq!(session.score(), 90);
        assert_eq!(
            session.grid().to_strings(),
            vec!["CDBBC", "BCDCD", "CDCBC", "DBDDB", "BCBBD"]
        );
    }

    #[test]
    fn test_long_runs() {
        let mut four = scripted(
            EngineConfig::default(),
            &["BCDBC", "CDACD", "AABAC", "DBCDB", "BCDBD"],
            "CDBD",
        );
        let report = four.attempt_swap(c(2, 2), c(1, 2)).unwrap();
        assert_eq!(
            report.passes[0].groups,
            vec![MatchGroup::new(c(2, 0), Direction::Row, 4)]
        );
        assert_eq!(report.total_delta(), 60);

        let mut five = scripted(
            EngineConfig::default(),
            &["BCDBC", "CDACD", "AABAA", "DBCDB", "BCDBD"],
            "CDBDCB",
        );
        let report = five.attempt_swap(c(2, 2), c(1, 2)).unwrap();
        assert_eq!(report.total_delta(), 100);
    }

    #[test]
    fn test_cascade_applies_combo_multiplier() {
        let mut session = scripted(EngineConfig::default(), &CASCADE, "DDDCAB");
        let report = session.attempt_swap(c(2, 2), c(2, 3)).unwrap();

        assert_eq!(report.passes.len(), 2);
        assert_eq!(report.passes[0].score_delta, 30);
        assert_eq!(report.passes[1].combo_depth, 2);
        assert_eq!(report.passes[1].breakdown.group_points, 30);
        assert!(report.passes[1].breakdown.combo_multiplier_applied);
        assert_eq!(report.passes[1].score_delta, 42);
        assert_eq!(report.total_delta(), 72);
        assert_eq!(
            report.outcome,
            Outcome::Settled {
                final_score: 72,
                max_combo_reached: 2
            }
        );
        assert_eq!(
            session.grid().to_strings(),
            vec!["CABBC", "BCACD", "CDBBC", "DBCDB", "BCDBD"]
        );
        assert_eq!(session.combo(), 2);
        assert_eq!(session.best_combo(), 2);
    }

    #[test]
    fn test_stepwise_matches_full_cascade() {
        let mut whole = scripted(EngineConfig::default(), &CASCADE, "DDDCAB");
        let mut stepped = whole.clone();
        let report = whole.attempt_swap(c(2, 2), c(2, 3)).unwrap();

        stepped.begin_swap(c(2, 2), c(2, 3)).unwrap();
        assert_eq!(stepped.phase(), Phase::Resolving);
        let mut passes = Vec::new();
        let outcome = loop {
            match stepped.step() {
                Some(Step::Pass(event)) => passes.push(event),
                Some(Step::Done(outcome)) => break outcome,
                None => panic!("cascade ended without an outcome"),
            }
        };

        assert_eq!(passes, report.passes);
        assert_eq!(outcome, report.outcome);
        assert_eq!(stepped.grid(), whole.grid());
        assert_eq!(stepped.step(), None);
    }

    #[test]
    fn test_swap_refused_while_resolving() {
        let mut session = scripted(EngineConfig::default(), &CASCADE, "DDDCAB");
        session.begin_swap(c(2, 2), c(2, 3)).unwrap();
        assert_eq!(
            session.attempt_swap(c(0, 0), c(0, 1)),
            Err(EngineError::Busy)
        );
        assert_eq!(session.activate_relaxed_mode(), Err(EngineError::Busy));
    }

    #[test]
    fn test_unproductive_swap_reverts() {
        let rows = ["ABCD", "CDAB", "ABCD", "CDAB"];
        let mut session = scripted(EngineConfig::default(), &rows, "A");
        let report = session.attempt_swap(c(0, 0), c(0, 1)).unwrap();

        assert!(report.passes.is_empty());
        assert_eq!(report.outcome, Outcome::Reverted);
        assert_eq!(session.grid(), &Grid::parse(&rows));
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.score(), 0);
        assert_eq!(session.moves(), 0);
        assert_eq!(session.source.consumed(), 0);
    }

    #[test]
    fn test_invalid_moves_leave_state_untouched() {
        let mut session = scripted(EngineConfig::default(), &CASCADE, "DDDCAB");
        let before = session.grid().clone();

        for (a, b) in [
            (c(0, 0), c(1, 1)),
            (c(0, 0), c(0, 2)),
            (c(2, 2), c(2, 2)),
            (c(4, 4), c(4, 5)),
            (c(9, 0), c(9, 1)),
        ] {
            assert_eq!(session.attempt_swap(a, b), Err(EngineError::InvalidMove));
        }
        assert_eq!(session.grid(), &before);
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_stuck_board_ends_game() {
        let mut session = scripted(
            EngineConfig::default(),
            &["BBAD", "CDBB", "ABCD", "CDAB"],
            "ABC",
        );
        let report = session.attempt_swap(c(0, 2), c(1, 2)).unwrap();

        assert_eq!(report.outcome, Outcome::NoMovesLeft { final_score: 30 });
        assert!(report.outcome.is_terminal());
        assert!(session.is_game_over());
        assert_eq!(session.hint(), None);
        assert_eq!(
            session.attempt_swap(c(0, 0), c(0, 1)),
            Err(EngineError::GameOver)
        );
    }

    #[test]
    fn test_combo_goal_ends_game() {
        let config = EngineConfig::default().with_combo_goal(2);
        let mut session = scripted(config, &CASCADE, "DDDCAB");
        let report = session.attempt_swap(c(2, 2), c(2, 3)).unwrap();

        assert_eq!(
            report.outcome,
            Outcome::ComboGoalReached {
                final_score: 72,
                max_combo_reached: 2
            }
        );
        assert_eq!(session.phase(), Phase::ComboGoalReached);
        assert_eq!(
            session.begin_swap(c(0, 0), c(0, 1)),
            Err(EngineError::GameOver)
        );
    }

    #[test]
    fn test_score_loops_are_counted() {
        let config = EngineConfig::default().with_score_loop(50);
        let mut session = scripted(config, &CASCADE, "DDDCAB");
        let report = session.attempt_swap(c(2, 2), c(2, 3)).unwrap();

        // 30 stays below the threshold, 72 crosses it once
        assert_eq!(report.passes[0].loops_completed, 0);
        assert_eq!(report.passes[1].loops_completed, 1);
        assert_eq!(session.loops(), 1);
        assert_eq!(session.score(), 72);
    }

    #[test]
    fn test_relaxed_mode_locked_below_unlock_score() {
        let mut session = scripted(EngineConfig::default(), &CASCADE, "A");
        assert_eq!(
            session.activate_relaxed_mode(),
            Err(EngineError::RelaxedLocked)
        );
        assert!(!session.is_relaxed());
    }

    #[test]
    fn test_relaxed_first_pass_clears_pairs() {
        let rows = ["ABCDA", "CDABC", "ABCDA", "CDABC", "ABCDA"];

        let mut standard = scripted(EngineConfig::default(), &rows, "BD");
        let report = standard.attempt_swap(c(0, 0), c(1, 0)).unwrap();
        assert_eq!(report.outcome, Outcome::Reverted);

        let mut relaxed = scripted(relaxed_config(), &rows, "BD");
        assert_eq!(relaxed.activate_relaxed_mode(), Ok(100));
        let report = relaxed.attempt_swap(c(0, 0), c(1, 0)).unwrap();

        assert_eq!(report.passes.len(), 1);
        let pass = &report.passes[0];
        assert!(pass.relaxed);
        assert_eq!(
            pass.groups,
            vec![MatchGroup::new(c(1, 0), Direction::Column, 2)]
        );
        assert_eq!(pass.score_delta, 10);
        // The refilled pair in row 0 is left for the next swap.
        assert_eq!(
            relaxed.grid().to_strings(),
            vec!["BBCDA", "DDABC", "CBCDA", "CDABC", "ABCDA"]
        );
        assert_eq!(relaxed.relaxed_combos_left(), 99);
        assert_eq!(report.outcome, Outcome::NoMovesLeft { final_score: 10 });
    }

    #[test]
    fn test_relaxed_cascade_scores_later_passes_normally() {
        let mut session = scripted(relaxed_config(), &CASCADE, "DDDCAB");
        session.activate_relaxed_mode().unwrap();
        let report = session.attempt_swap(c(2, 2), c(2, 3)).unwrap();

        assert!(report.passes[0].relaxed);
        assert_eq!(report.passes[0].score_delta, 15);
        assert!(!report.passes[1].relaxed);
        assert_eq!(report.passes[1].score_delta, 42);
        assert_eq!(session.score(), 57);
        assert_eq!(session.relaxed_combos_left(), 99);
    }

    #[test]
    fn test_relaxed_budget_runs_out() {
        let config = EngineConfig {
            relaxed_combo_budget: 1,
            ..relaxed_config()
        };
        let mut session = scripted(config, &CASCADE, "DDDCAB");
        assert_eq!(session.activate_relaxed_mode(), Ok(1));
        // Already active: no top-up
        assert_eq!(session.activate_relaxed_mode(), Ok(1));
        assert!(session.is_relaxed());

        let report = session.attempt_swap(c(2, 2), c(2, 3)).unwrap();
        assert_eq!(report.passes.len(), 2);
        assert!(report.passes[0].relaxed);
        assert_eq!(session.relaxed_combos_left(), 0);
        assert!(!session.is_relaxed());

        // The next cascade opens with a standard pass
        let mv = session.hint().unwrap();
        let report = session.attempt_swap(mv.from, mv.to).unwrap();
        assert!(!report.passes[0].relaxed);
        assert_eq!(report.passes[0].score_delta, 30);
        assert_eq!(report.total_delta(), 30 + 84);
    }

    #[test]
    fn test_relaxed_refused_after_game_over() {
        let mut session = scripted(relaxed_config(), &["BBAD", "CDBB", "ABCD", "CDAB"], "ABC");
        let report = session.attempt_swap(c(0, 2), c(1, 2)).unwrap();
        assert!(report.outcome.is_terminal());
        assert_eq!(session.activate_relaxed_mode(), Err(EngineError::GameOver));
        assert!(!session.is_relaxed());
    }

    #[test]
    fn test_snapshot_seed_replays_deal() {
        let mut session = Session::new(EngineConfig::default(), 42).unwrap();
        let snap = session.snapshot();
        assert_eq!(snap.seed, 42);
        assert_ne!(snap.rng_state, 42);

        // A continued stream records where the new deal started
        session.new_game(None);
        let seed = session.snapshot().seed;
        assert_eq!(seed, snap.rng_state);
        let replay = Session::new(EngineConfig::default(), seed).unwrap();
        assert_eq!(replay.grid(), session.grid());
    }

    #[test]
    fn test_new_game_deals_playable_board() {
        let mut session = Session::new(EngineConfig::default(), 12345).unwrap();
        assert_eq!(session.episode_id(), 0);
        assert!(!session.grid().has_empty());
        assert!(!has_match(session.grid(), MIN_MATCH_LEN));
        assert!(session.hint().is_some());
        assert_eq!(session.phase(), Phase::Idle);

        let mv = session.hint().unwrap();
        session.attempt_swap(mv.from, mv.to).unwrap();
        assert!(session.score() > 0);

        session.new_game(Some(7));
        assert_eq!(session.episode_id(), 1);
        assert_eq!(session.score(), 0);
        assert_eq!(session.combo(), 0);
        assert_eq!(session.best_combo(), 0);
        assert_eq!(session.moves(), 0);
        assert!(!has_match(session.grid(), MIN_MATCH_LEN));
        assert!(session.hint().is_some());
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = Session::new(EngineConfig::default(), 42).unwrap();
        let mut b = Session::new(EngineConfig::default(), 42).unwrap();
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.snapshot().grid.grid_hash, b.snapshot().grid.grid_hash);

        b.new_game(Some(42));
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig::default().with_symbol_count(2);
        assert_eq!(
            Session::new(config, 1).err(),
            Some(EngineError::InvalidConfig("symbol_count must be within 3..=8"))
        );
    }

    #[test]
    fn test_snapshot_reflects_session() {
        let mut session = scripted(EngineConfig::default(), &CASCADE, "DDDCAB");
        session.attempt_swap(c(2, 2), c(2, 3)).unwrap();
        let snap = session.snapshot();
        assert_eq!(snap.score, 72);
        assert_eq!(snap.max_combo, 2);
        assert_eq!(snap.moves, 1);
        assert!(snap.playable());
        assert_eq!(snap.grid, session.grid_snapshot());
    }
}
