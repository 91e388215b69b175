//! Pin arbitration errors.
//!
//! All failures here are local to the requesting driver: an error return plus
//! a diagnostic, never a system-wide abort. Backing out partially-acquired
//! pin sets is the caller's responsibility.

use hal::{DeviceId, HalError};
use thiserror::Error;

/// Errors surfaced by the pin ownership registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PinError {
    /// No pin controller has been registered yet.
    #[error("no pin controller registered")]
    NoController,
    /// A controller is already registered; only one may exist.
    #[error("pin controller already registered")]
    ControllerBusy,
    /// The backend exposes no pins.
    #[error("pin controller has an empty pin table")]
    EmptyPinTable,
    /// The pin index does not exist on this controller.
    #[error("pin {0} out of range")]
    InvalidPin(u32),
    /// The pin is owned by a different `(device, function)` identity.
    #[error("pin {pin} busy: owned by {owner}/{function}")]
    PinBusy {
        pin: u32,
        owner: DeviceId,
        function: String,
    },
    /// The caller does not match the recorded owner.
    #[error("pin {pin} not owned by {device}/{function}")]
    NotOwner {
        pin: u32,
        device: DeviceId,
        function: String,
    },
    /// The pin has no active owner.
    #[error("pin {0} has no active owner")]
    NotClaimed(u32),
    /// A platform pin map is already installed; it is immutable once set.
    #[error("platform pin map already installed")]
    PinMapBusy,
    /// The backend refused the operation; the registry was left unchanged.
    #[error("backend: {0}")]
    Backend(#[from] HalError),
}
