//! # pinctrl
//!
//! Pin ownership arbitration for scarce physical pins shared by independent
//! peripheral drivers.
//!
//! ## Module Overview
//! - [`controller`] – the descriptor registry: ref-counted ownership, the
//!   admission gate, and GPIO pass-throughs.
//! - [`pinmap`]     – the static board pin map consulted at probe time.
//! - [`registry`]   – process-wide controller/pin-map registration mirroring
//!   the single-controller contract.
//! - [`error`]      – `PinError`.
//!
//! Ownership bookkeeping is SoC-agnostic; every register-level mux or GPIO
//! operation is delegated to a backend implementing [`hal::PinMuxOps`] /
//! [`hal::GpioOps`]. The arbitration rule is strict: a pin may be shared only
//! by the *same* `(device, function)` identity re-requesting it, never by two
//! distinct claimants, and ownership is committed only after the backend
//! accepted the pin. Arbitration happens at request/free time only — nothing
//! here sits on the interrupt hot path.

pub mod controller;
pub mod error;
pub mod pinmap;
pub mod registry;

pub use controller::{PinController, PinOwner};
pub use error::PinError;
pub use pinmap::{PinMap, PinMapEntry};

#[cfg(test)]
mod tests;
