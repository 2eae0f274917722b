//! Run configuration for the autoplay runner
//!
//! Values come from `MATCH3_*` environment variables, then command-line
//! flags override them. Unparsable environment values fall back to defaults.

use anyhow::{anyhow, Result};

use crate::core::EngineConfig;
use crate::types::{GRID_SIZE, SYMBOL_COUNT};

pub const DEFAULT_SEED: u32 = 12345;
pub const DEFAULT_MAX_MOVES: u32 = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub seed: u32,
    pub grid_size: usize,
    pub symbol_count: u8,
    pub max_moves: u32,
    pub combo_goal: Option<u32>,
    pub loop_threshold: Option<u32>,
    pub log_path: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            grid_size: GRID_SIZE,
            symbol_count: SYMBOL_COUNT,
            max_moves: DEFAULT_MAX_MOVES,
            combo_goal: None,
            loop_threshold: None,
            log_path: None,
        }
    }
}

impl RunConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parsed = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u32>().ok());

        let seed = parsed("MATCH3_SEED").unwrap_or(defaults.seed);
        let grid_size = parsed("MATCH3_GRID_SIZE")
            .map(|v| v as usize)
            .unwrap_or(defaults.grid_size);
        let symbol_count = lookup("MATCH3_SYMBOLS")
            .and_then(|s| s.trim().parse::<u8>().ok())
            .unwrap_or(defaults.symbol_count);
        let max_moves = parsed("MATCH3_MAX_MOVES").unwrap_or(defaults.max_moves);
        let combo_goal = parsed("MATCH3_COMBO_GOAL").filter(|v| *v > 0);
        let loop_threshold = parsed("MATCH3_LOOP_THRESHOLD").filter(|v| *v > 0);

        let log_path = lookup("MATCH3_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            seed,
            grid_size,
            symbol_count,
            max_moves,
            combo_goal,
            loop_threshold,
            log_path,
        }
    }

    /// Apply `--seed`, `--moves`, `--size` and `--log` overrides.
    pub fn apply_args(&mut self, args: &[String]) -> Result<()> {
        let mut i = 0usize;
        while i < args.len() {
            let flag = args[i].as_str();
            match flag {
                "--seed" | "--moves" | "--size" | "--log" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("autoplay: missing value for {}", flag))?;
                    match flag {
                        "--seed" => self.seed = parse_flag(flag, v)?,
                        "--moves" => self.max_moves = parse_flag(flag, v)?,
                        "--size" => self.grid_size = parse_flag(flag, v)?,
                        _ => self.log_path = Some(v.clone()),
                    }
                }
                other => {
                    return Err(anyhow!("autoplay: unknown argument: {}", other));
                }
            }
            i += 1;
        }
        Ok(())
    }

    pub fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig::default()
            .with_grid_size(self.grid_size)
            .with_symbol_count(self.symbol_count);
        config.combo_victory_threshold = self.combo_goal;
        config.score_loop_threshold = self.loop_threshold;
        config
    }
}

fn parse_flag<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T> {
    value
        .parse::<T>()
        .map_err(|_| anyhow!("autoplay: invalid {} value: {}", flag, value))
}
