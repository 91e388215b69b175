//! Priority interrupt controller binding.
//!
//! Models a PLIC-style controller: per-line priority and enable bits, and a
//! two-phase claim/complete handshake. `claim` reads which pending source
//! fired; `complete` tells the controller dispatch is done and it may re-arm
//! that source. The pairing is mandatory hardware protocol — a claimed source
//! that is never completed stalls the controller.

/// Interrupt priority. Controllers typically implement a few bits of this.
pub type IrqPriority = u8;

/// Hardware priority interrupt controller.
///
/// Line numbers follow the controller convention: external sources are
/// numbered from 1, and `claim` never returns 0 (0 means "nothing pending").
pub trait IrqChip: Send + Sync {
    /// Program the priority for one line. Last writer wins for the line.
    fn set_priority(&self, line: u32, priority: IrqPriority);

    /// Set the enable bit for one line.
    fn enable(&self, line: u32);

    /// Clear the enable bit for one line.
    fn disable(&self, line: u32);

    /// Whether the enable bit for one line is currently set.
    fn is_enabled(&self, line: u32) -> bool;

    /// Claim the highest-priority pending source, or `None` if none fired.
    /// A successful claim masks the source until [`IrqChip::complete`].
    fn claim(&self) -> Option<u32>;

    /// Signal that dispatch for a claimed source is finished.
    fn complete(&self, line: u32);
}

/// Software-triggered interrupt controller.
///
/// Same register model as [`IrqChip`] plus a trigger operation that raises a
/// line from software. Lines are numbered from 0 at this interface, but
/// `claim` still reports the controller's 1-based source id — dispatchers
/// subtract one before indexing.
pub trait SwIrqChip: Send + Sync {
    /// Program the priority for one line.
    fn set_priority(&self, line: u32, priority: IrqPriority);

    /// Set the enable bit for one line.
    fn enable(&self, line: u32);

    /// Clear the enable bit for one line.
    fn disable(&self, line: u32);

    /// Whether the enable bit for one line is currently set.
    fn is_enabled(&self, line: u32) -> bool;

    /// Raise the pending bit for one line from software.
    fn trigger(&self, line: u32);

    /// Claim the highest-priority pending source as a 1-based source id.
    fn claim(&self) -> Option<u32>;

    /// Signal that dispatch for a claimed source id is finished.
    fn complete(&self, source: u32);
}
