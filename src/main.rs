//! Headless autoplay runner (default binary).
//!
//! Plays the oracle's first productive swap until the game ends or the move
//! limit is reached, printing every message as a JSON line on stdout and
//! `[Autoplay]` status lines on stderr.
//!
//! Usage: `match-cascade [--seed N] [--moves N] [--size N] [--log PATH]`

use std::io::{self, Write};

use anyhow::{anyhow, Result};

use match_cascade::adapter::{Emitter, EventLog, RunConfig};
use match_cascade::core::{Session, SimpleRng};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut config = RunConfig::from_env();
    config.apply_args(&args)?;

    let engine = config.engine_config();
    let mut session =
        Session::new(engine, config.seed).map_err(|e| anyhow!("autoplay: {}", e))?;
    let log = EventLog::open(config.log_path.as_deref())?;

    eprintln!(
        "[Autoplay] seed={} size={} symbols={} max_moves={}",
        config.seed, engine.grid_size, engine.symbol_count, config.max_moves
    );
    if let Some(path) = config.log_path.as_deref() {
        eprintln!("[Autoplay] logging to {}", path);
    }

    let stdout = io::stdout();
    let mut emitter = Emitter::new(stdout.lock(), log);
    let result = run(&mut session, &mut emitter, config.max_moves);
    emitter.flush()?;
    result?;

    eprintln!(
        "[Autoplay] done: phase={} score={} moves={} best_combo={} loops={}",
        session.phase().as_str(),
        session.score(),
        session.moves(),
        session.best_combo(),
        session.loops()
    );
    Ok(())
}

fn run<W: Write>(
    session: &mut Session<SimpleRng>,
    emitter: &mut Emitter<W>,
    max_moves: u32,
) -> Result<()> {
    emitter.snapshot(&session.snapshot())?;

    for _ in 0..max_moves {
        if !session.is_relaxed() && session.score() >= session.config().relaxed_unlock_score {
            if let Ok(budget) = session.activate_relaxed_mode() {
                eprintln!("[Autoplay] relaxed mode on for {} cascades", budget);
            }
        }

        let Some(mv) = session.hint() else {
            break;
        };
        match session.attempt_swap(mv.from, mv.to) {
            Ok(report) => {
                for pass in &report.passes {
                    emitter.pass(pass)?;
                }
                emitter.outcome(&report.outcome)?;
                if report.outcome.is_terminal() {
                    break;
                }
            }
            Err(e) => {
                emitter.rejected(e)?;
                break;
            }
        }
    }

    emitter.snapshot(&session.snapshot())
}
