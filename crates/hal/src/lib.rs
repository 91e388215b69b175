//! Hardware abstraction traits for the interrupt and pin-control layers.
//!
//! This crate carries no policy of its own. It defines the contracts between
//! the SoC-agnostic engines and the per-SoC register code:
//!
//! - [`interrupt`] – priority interrupt controller binding with the
//!   claim/complete handshake, plus the software-interrupt variant.
//! - [`pinmux`]    – pin multiplexer and GPIO backend vtables.
//! - [`gpio`]      – value, edge and configuration types shared across the
//!   GPIO surface.
//! - [`sync`]      – unified locking for std and lock-free builds.
//!
//! Concrete implementations live in `ports/` (one crate per target); the
//! engines in `crates/irq` and `crates/pinctrl` consume these traits only.

pub mod error;
pub mod gpio;
pub mod interrupt;
pub mod pinmux;
pub mod sync;

pub use error::{HalError, HalResult};
pub use gpio::{Direction, Edge, Level, PinConfig};
pub use interrupt::{IrqChip, IrqPriority, SwIrqChip};
pub use pinmux::{DeviceId, GpioOps, PinMuxOps};
