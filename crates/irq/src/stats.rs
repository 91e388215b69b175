//! Per-line service statistics for the debug/CLI surface.
//!
//! The text rendering is a diagnostic aid, not a stable machine format; only
//! the semantic content (counts, priority, handler names per line) is part of
//! the contract.

use std::fmt;

/// Statistics for one interrupt line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineStats {
    /// Line number in the owning table's public convention.
    pub line: u32,
    /// Total services across every handler on the line.
    pub count: u64,
    /// Priority last programmed into the controller for the line.
    pub priority: u8,
    /// Handler names in registration order.
    pub handlers: Vec<String>,
}

/// Snapshot of every line with at least one registered handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IrqStats {
    pub lines: Vec<LineStats>,
}

impl IrqStats {
    /// Looks up the statistics for one line, if any handler is registered.
    pub fn line(&self, line: u32) -> Option<&LineStats> {
        self.lines.iter().find(|l| l.line == line)
    }
}

impl fmt::Display for IrqStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>4} {:>10} {:>4}  handlers", "line", "count", "prio")?;
        for l in &self.lines {
            writeln!(
                f,
                "{:>4} {:>10} {:>4}  {}",
                l.line,
                l.count,
                l.priority,
                l.handlers.join(",")
            )?;
        }
        Ok(())
    }
}
