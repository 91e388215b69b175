//! Hardware interrupt table: registration, teardown and dispatch.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use log::{debug, warn};

use hal::{IrqChip, IrqPriority};

use crate::chain::{IrqHandler, LineStore};
use crate::stats::IrqStats;
use crate::IrqError;

/// Entry table for external interrupt lines.
///
/// External lines follow the controller convention and are numbered
/// `1..=nlines`; line 0 does not exist (a claim of 0 means nothing pending).
///
/// Line life cycle: a line with no handlers is disabled at the controller;
/// the first registration enables it and removing the last handler leaves it
/// disabled again.
pub struct IrqTable {
    chip: Arc<dyn IrqChip>,
    lines: LineStore,
    nlines: usize,
}

impl IrqTable {
    /// Creates a table for external lines `1..=nlines`.
    pub fn new(chip: Arc<dyn IrqChip>, nlines: usize) -> Self {
        Self {
            chip,
            lines: LineStore::new(nlines),
            nlines,
        }
    }

    fn index(&self, line: u32) -> Result<usize, IrqError> {
        if line == 0 || line as usize > self.nlines {
            return Err(IrqError::InvalidLine(line));
        }
        Ok(line as usize - 1)
    }

    /// Registers `handler` under `name` on `line` and enables the line.
    ///
    /// Registering the same `(name, handler)` pair again does not grow the
    /// chain; it re-applies `priority`. Either way the controller priority
    /// for the whole line is reprogrammed: priority is a per-line hardware
    /// resource, and a later registration with a lower value downgrades the
    /// line for every handler sharing it.
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

    /// Removes the first handler named `name` from `line`.
    ///
    /// The line is disabled before the chain is touched, so a firing
    /// interrupt cannot dispatch against a half-updated chain, and re-enabled
    /// only when other handlers remain — at whatever priority was last
    /// programmed, since no per-handler history is kept. Unknown lines and
    /// names are ignored with a debug diagnostic.
    pub fn free(&self, line: u32, name: &str) {
        let Ok(index) = self.index(line) else {
            debug!("free: interrupt line {line} out of range");
            return;
        };
        self.chip.disable(line);
        if self.lines.remove(index, name) {
            self.chip.enable(line);
        }
    }

    /// Walks the chain for `line`, invoking every handler in registration
    /// order.
    ///
    /// Runs in interrupt context: a spurious line number is dropped with a
    /// debug diagnostic, a handler error is logged and does not suppress
    /// later handlers, and each handler's service count increments
    /// unconditionally after it runs.
    pub fn dispatch(&self, line: u32) {
        let Ok(index) = self.index(line) else {
            debug!("spurious interrupt {line}");
            return;
        };
        for entry in self.lines.snapshot(index) {
            if let Err(err) = entry.handler.handle(line) {
                warn!("irq {line}: handler {} failed: {err}", entry.name);
            }
            entry.count.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Trap entry for external interrupts.
    ///
    /// Claims the pending source, dispatches it, then completes the claim.
    /// The claim/complete pairing is mandatory controller protocol and is
    /// honored even when the claimed number turns out to be spurious.
    pub fn handle_external(&self) {
        if let Some(line) = self.chip.claim() {
            self.dispatch(line);
            self.chip.complete(line);
        }
    }

    /// Statistics for every line with at least one handler.
    pub fn stats(&self) -> IrqStats {
        self.lines.collect_stats(1)
    }
}
