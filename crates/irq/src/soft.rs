//! Software-interrupt table.
//!
//! Same engine as the hardware table with two deliberate differences that
//! mirror the controller's register interface: the public numbering is
//! 0-based (`0..nlines`), and the controller still claims 1-based source ids,
//! which the dispatcher decrements before indexing.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use log::{debug, warn};

use hal::{IrqPriority, SwIrqChip};

use crate::chain::{IrqHandler, LineStore};
use crate::stats::IrqStats;
use crate::IrqError;

/// Entry table for software-triggered interrupt lines `0..nlines`.
pub struct SwIrqTable {
    chip: Arc<dyn SwIrqChip>,
    lines: LineStore,
    nlines: usize,
}

impl SwIrqTable {
    /// Creates a table for software lines `0..nlines`.
    pub fn new(chip: Arc<dyn SwIrqChip>, nlines: usize) -> Self {
        Self {
            chip,
            lines: LineStore::new(nlines),
            nlines,
        }
    }

    fn index(&self, line: u32) -> Result<usize, IrqError> {
        if (line as usize) < self.nlines {
            Ok(line as usize)
        } else {
            Err(IrqError::InvalidLine(line))
        }
    }

    /// Registers `handler` under `name` on software `line` and enables it.
    ///
    /// Same insert-or-update and last-writer-wins priority contract as
    /// [`crate::IrqTable::request`].
    pub fn request(
        &self,
        line: u32,
        handler: Arc<dyn IrqHandler>,
        name: &str,
        priority: IrqPriority,
    ) -> Result<(), IrqError> {
        let index = self.index(line)?;
        self.lines.insert(index, name, handler, priority);
        self.chip.set_priority(line, priority);
        self.chip.enable(line);
        Ok(())
    }

    /// Removes the first handler named `name` from software `line`,
    /// disabling the line first and leaving it disabled when the chain
    /// empties.
    pub fn free(&self, line: u32, name: &str) {
        let Ok(index) = self.index(line) else {
            debug!("free: software line {line} out of range");
            return;
        };
        self.chip.disable(line);
        if self.lines.remove(index, name) {
            self.chip.enable(line);
        }
    }

    /// Raises software `line` at the controller.
    pub fn trigger(&self, line: u32) -> Result<(), IrqError> {
        self.index(line)?;
        self.chip.trigger(line);
        Ok(())
    }

    /// Walks the chain for software `line` (0-based), same contract as the
    /// hardware dispatch.
    pub fn dispatch(&self, line: u32) {
        let Ok(index) = self.index(line) else {
            debug!("spurious software interrupt {line}");
            return;
        };
        for entry in self.lines.snapshot(index) {
            if let Err(err) = entry.handler.handle(line) {
                warn!("sw irq {line}: handler {} failed: {err}", entry.name);
            }
            entry.count.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Trap entry for software interrupts.
    ///
    /// The controller reports 1-based source ids; the table stores lines
    /// 0-based, hence the decrement before dispatch. Completion uses the
    /// claimed id unchanged.
    pub fn handle_software(&self) {
        if let Some(source) = self.chip.claim() {
            self.dispatch(source.wrapping_sub(1));
            self.chip.complete(source);
        }
    }

    /// Statistics for every software line with at least one handler.
    pub fn stats(&self) -> IrqStats {
        self.lines.collect_stats(0)
    }
}
