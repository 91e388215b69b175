//! Simulated SoC backend.
//!
//! Register-level models of a PLIC-style priority interrupt controller and a
//! pin multiplexer, implementing the `hal` backend traits. No hardware is
//! involved: the models exist so the dispatch and arbitration engines can be
//! exercised end to end on a host, including the failure paths real silicon
//! makes hard to provoke.

pub mod intc;
pub mod pinmux;

pub use intc::{SimIntc, SimSwIntc};
pub use pinmux::SimPinmux;
