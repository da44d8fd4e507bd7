//! Periodic flushing of the ledger to the report sink.

use log::{debug, info};

use super::ledger::{DiffRecord, ResultLedger};
use crate::output::ReportSink;
use crate::utils::error::ReportError;

/// Owns the ledger and writes it out every `every` diffs
///
/// Every flush hands the sink the full ledger so far, so each checkpoint
/// overwrites the previous one with a longer prefix of the same records.
pub struct Checkpointer<S> {
    ledger: ResultLedger,
    sink: S,
    every: usize,
    diff_count: usize,
    checkpoints: usize,
}

impl<S: ReportSink> Checkpointer<S> {
    /// `every == 0` disables intermediate checkpoints
    pub fn new(sink: S, every: usize) -> Self {
        Self {
            ledger: ResultLedger::new(),
            sink,
            every,
            diff_count: 0,
            checkpoints: 0,
        }
    }

    pub fn set_every(&mut self, every: usize) {
        self.every = every;
    }

    /// Append a record; returns whether a checkpoint was written
    pub fn push(&mut self, record: DiffRecord) -> Result<bool, ReportError> {
        let has_diff = record.has_diff;
        self.ledger.push(record);

        if !has_diff {
            return Ok(false);
        }

        self.diff_count += 1;
        if self.every == 0 || self.diff_count % self.every != 0 {
            return Ok(false);
        }

        debug!(
            "Checkpoint after {} diffs ({} records)",
            self.diff_count,
            self.ledger.len()
        );
        self.flush()?;
        self.checkpoints += 1;
        Ok(true)
    }

    /// Write the complete ledger one last time
    pub fn finish(&mut self) -> Result<(), ReportError> {
        info!("Writing final report with {} records", self.ledger.len());
        self.flush()
    }

    fn flush(&mut self) -> Result<(), ReportError> {
        self.sink.write(self.ledger.records())
    }

    pub fn ledger(&self) -> &ResultLedger {
        &self.ledger
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn diff_count(&self) -> usize {
        self.diff_count
    }

    pub fn checkpoints(&self) -> usize {
        self.checkpoints
    }
}
