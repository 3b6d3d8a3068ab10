//! Append-only NDJSON run logs. One JSON object per line, each carrying
//! an `event` tag with a version suffix so old logs stay parseable when
//! a schema grows a field.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use bg_core::config::LoggingConfig;
use bg_core::Seat;
use serde::Serialize;
use thiserror::Error;


const DEFAULT_FLUSH_EVERY_LINES: usize = 64;

#[derive(Debug, Error)]
pub enum NdjsonError {
    #[error("log io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("event serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Milliseconds since the Unix epoch; 0 when the clock reads before it.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Line-buffered NDJSON sink. Lines are flushed in batches; drop or an
/// explicit [`flush`](Self::flush) pushes out the tail.
pub struct NdjsonWriter {
    out: BufWriter<File>,
    lines_since_flush: usize,
    flush_every_lines: usize,
}

impl NdjsonWriter {
    pub fn open_append(path: impl AsRef<Path>) -> Result<Self, NdjsonError> {
        Self::open_append_with_flush(path, DEFAULT_FLUSH_EVERY_LINES)
    }

    /// Open `file_name` inside the configured log directory, flushing at
    /// the configured cadence.
    pub fn open_in(
        config: &LoggingConfig,
        file_name: impl AsRef<Path>,
    ) -> Result<Self, NdjsonError> {
        Self::open_append_with_flush(
            Path::new(&config.dir).join(file_name),
            config.flush_every_lines,
        )
    }

    pub fn open_append_with_flush(
        path: impl AsRef<Path>,
        flush_every_lines: usize,
    ) -> Result<Self, NdjsonError> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            out: BufWriter::new(file),
            lines_since_flush: 0,
            flush_every_lines: flush_every_lines.max(1),
        })
    }

    pub fn write_event<T: Serialize>(&mut self, event: &T) -> Result<(), NdjsonError> {
        serde_json::to_writer(&mut self.out, event)?;
        self.out.write_all(b"\n")?;
        self.lines_since_flush += 1;
        if self.lines_since_flush >= self.flush_every_lines {
            self.flush()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), NdjsonError> {
        self.out.flush()?;
        self.lines_since_flush = 0;
        Ok(())
    }
}

impl Drop for NdjsonWriter {
    fn drop(&mut self) {
        let _ = self.out.flush();
    }
}

/// One applied (or skipped) ply.
#[derive(Debug, Serialize)]
pub struct TurnEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub task_id: usize,
    pub ply: u64,
    pub seat: Seat,
    pub checker_id: Option<u8>,
    pub to: Option<i32>,
    pub winner: Option<Seat>,
}

impl TurnEventV1 {
    pub const EVENT: &'static str = "turn.v1";
}

/// One rule's contribution inside a selection event.
#[derive(Debug, Serialize)]
pub struct RuleDeltaV1 {
    pub rule: String,
    pub delta: i32,
}

/// The scored selection behind an applied ply.
#[derive(Debug, Serialize)]
pub struct SelectionEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub task_id: usize,
    pub ply: u64,
    pub seat: Seat,
    pub checker_id: u8,
    pub from: i32,
    pub to: i32,
    pub cost: i32,
    pub deltas: Vec<RuleDeltaV1>,
}

impl SelectionEventV1 {
    pub const EVENT: &'static str = "selection.v1";
}

/// Periodic scheduler counters.
#[derive(Debug, Serialize)]
pub struct RunStatsEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub ticks: u64,
    pub plies: u64,
    pub no_moves: u64,
    pub games_completed: u64,
    pub reward_max: f64,
}

impl RunStatsEventV1 {
    pub const EVENT: &'static str = "run_stats.v1";
}
