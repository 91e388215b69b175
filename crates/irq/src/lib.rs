//! # irq
//!
//! Interrupt entry table and dispatch engine for PLIC-style priority
//! interrupt controllers.
//!
//! ## Module Overview
//! - [`chain`] – handler records and the per-line chain store.
//! - [`table`] – the hardware table: registration, teardown, claim/complete
//!   dispatch.
//! - [`soft`]  – the software-interrupt variant with its 0-based numbering.
//! - [`stats`] – per-line service counters for the debug/CLI surface.
//!
//! The engine owns no hardware knowledge: the controller is reached only
//! through [`hal::IrqChip`] / [`hal::SwIrqChip`]. Tables are plain values
//! with no global state, so tests construct a fresh one per case.
//!
//! Two conventions are deliberate and load-bearing for callers:
//! handlers on one line always run in registration order, and the line
//! priority programmed into the controller is a per-line resource — the most
//! recent registration wins for every handler sharing the line.

use thiserror::Error;

pub mod chain;
pub mod soft;
pub mod stats;
pub mod table;

pub use chain::IrqHandler;
pub use soft::SwIrqTable;
pub use stats::{IrqStats, LineStats};
pub use table::IrqTable;

/// Errors surfaced by the registration API.
///
/// Dispatch paths run in interrupt context and cannot propagate errors;
/// they drop invalid work with a diagnostic instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IrqError {
    /// The line number does not exist on this table.
    #[error("interrupt line {0} out of range")]
    InvalidLine(u32),
}

#[cfg(test)]
mod tests;
