//! JSONL output: the event stream and its optional log file
//!
//! [`Emitter`] numbers every message, writes it as one line to its output
//! and mirrors the same line into an [`EventLog`] when one is open.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};

use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::core::{CascadeEvent, Outcome, SessionSnapshot};
use crate::protocol::{create_outcome, create_pass, create_rejected, create_snapshot};
use crate::types::EngineError;

/// Append-only JSONL file; a disabled log swallows writes.
#[derive(Debug)]
pub struct EventLog {
    file: Option<BufWriter<File>>,
}

impl EventLog {
    pub fn disabled() -> Self {
        Self { file: None }
    }

    /// Open `path` for appending, or return a disabled log for `None`.
    pub fn open(path: Option<&str>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::disabled());
        };
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| anyhow!("log: open {} failed: {}", path, e))?;
        Ok(Self {
            file: Some(BufWriter::new(file)),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }

    /// Append one already-encoded line (newline included).
    pub fn write_line(&mut self, line: &[u8]) -> Result<()> {
        if let Some(file) = self.file.as_mut() {
            file.write_all(line)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        if let Some(file) = self.file.as_mut() {
            file.flush()?;
        }
        Ok(())
    }
}

/// Sequenced message writer.
pub struct Emitter<W: Write> {
    out: W,
    log: EventLog,
    seq: u64,
    buf: Vec<u8>,
}

impl<W: Write> Emitter<W> {
    pub fn new(out: W, log: EventLog) -> Self {
        Self {
            out,
            log,
            seq: 0,
            buf: Vec::with_capacity(1024),
        }
    }

    /// Sequence number of the last emitted message
    pub fn seq(&self) -> u64 {
        self.seq
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    pub fn emit<T: Serialize>(&mut self, msg: &T) -> Result<()> {
        self.buf.clear();
        serde_json::to_writer(&mut self.buf, msg)?;
        self.buf.push(b'\n');
        self.out.write_all(&self.buf)?;
        self.log.write_line(&self.buf)
    }

    pub fn pass(&mut self, event: &CascadeEvent) -> Result<()> {
        let msg = create_pass(self.next_seq(), event);
        self.emit(&msg)
    }

    pub fn outcome(&mut self, outcome: &Outcome) -> Result<()> {
        let msg = create_outcome(self.next_seq(), outcome);
        self.emit(&msg)
    }

    pub fn rejected(&mut self, err: EngineError) -> Result<()> {
        let msg = create_rejected(self.next_seq(), err);
        self.emit(&msg)
    }

    pub fn snapshot(&mut self, snap: &SessionSnapshot) -> Result<()> {
        let msg = create_snapshot(self.next_seq(), snap);
        self.emit(&msg)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        self.log.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
