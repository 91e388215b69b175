//! Pin multiplexer and GPIO backend vtables.
//!
//! The ownership registry in `crates/pinctrl` is SoC-agnostic; everything
//! that actually touches mux or GPIO registers goes through these two traits.
//! One implementation per SoC lives in `ports/`.

use core::fmt;

use crate::error::HalResult;
use crate::gpio::{Direction, Edge, Level, PinConfig};

/// Opaque identity of a client device claiming pins.
///
/// Two claims are considered the same owner only when both the device and
/// the function string match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceId(pub &'static str);

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Pin multiplexer operations.
///
/// `request` reserves a pin at the register level, `set_mux` routes it to the
/// function requested by a device, and the `gpio_*` pair short-circuits both
/// for plain GPIO use. The registry only calls `set_mux` after `request`
/// succeeded, and never calls either for a pin owned by someone else.
pub trait PinMuxOps: Send + Sync {
    /// Reserve a pin at the mux level.
    fn request(&self, pin: u32) -> HalResult<()>;

    /// Release a previously reserved pin.
    fn free(&self, pin: u32) -> HalResult<()>;

    /// Route a pin to the function requested by a device.
    fn set_mux(&self, device: DeviceId, function: &str, pin: u32) -> HalResult<()>;

    /// Reserve a pin and switch it to GPIO in one step.
    fn gpio_request_enable(&self, pin: u32) -> HalResult<()>;

    /// Undo [`PinMuxOps::gpio_request_enable`].
    fn gpio_disable_free(&self, pin: u32) -> HalResult<()>;

    /// Set the direction of a GPIO-muxed pin.
    fn gpio_set_direction(&self, pin: u32, direction: Direction) -> HalResult<()>;
}

/// GPIO value and interrupt operations.
pub trait GpioOps: Send + Sync {
    /// Read the current level of a pin.
    fn get(&self, pin: u32) -> HalResult<Level>;

    /// Drive a pin to a level.
    fn set(&self, pin: u32, level: Level) -> HalResult<()>;

    /// Apply an electrical configuration to a pin.
    fn set_config(&self, pin: u32, config: PinConfig) -> HalResult<()>;

    /// Map a pin to its external interrupt line number.
    fn to_irq(&self, pin: u32) -> HalResult<u32>;

    /// Enable the pin's edge interrupt.
    fn irq_enable(&self, pin: u32, edge: Edge) -> HalResult<()>;

    /// Disable the pin's edge interrupt.
    fn irq_disable(&self, pin: u32) -> HalResult<()>;
}
