//! Process-wide controller and pin-map registration.
//!
//! Exactly one pin controller may register for the life of the process, and
//! the platform pin map is set once at boot. The free functions here mirror
//! the driver-facing surface by resolving the registered controller first;
//! they fail with [`PinError::NoController`] before registration.
//!
//! Unlike the IRQ tables (plain values), this layer is deliberately global:
//! the single-controller contract is part of the external interface. Tests
//! get an explicit teardown instead.

use std::sync::Arc;

use hal::sync::Mutex;
use hal::{DeviceId, Edge, Level, PinConfig};

use crate::{PinController, PinError, PinMap, PinMapEntry};

static CONTROLLER: Mutex<Option<Arc<PinController>>> = Mutex::new(None);
static PINMAP: Mutex<Option<PinMap>> = Mutex::new(None);

/// Registers the process-wide pin controller. A second caller is rejected.
pub fn register_controller(controller: Arc<PinController>) -> Result<(), PinError> {
    let mut slot = CONTROLLER.lock();
    if slot.is_some() {
        return Err(PinError::ControllerBusy);
    }
    *slot = Some(controller);
    Ok(())
}

/// The registered controller.
pub fn controller() -> Result<Arc<PinController>, PinError> {
    CONTROLLER.lock().clone().ok_or(PinError::NoController)
}

/// Installs the board pin map. Immutable once set.
pub fn set_platform_pinmap(entries: Vec<PinMapEntry>) -> Result<(), PinError> {
    let mut slot = PINMAP.lock();
    if slot.is_some() {
        return Err(PinError::PinMapBusy);
    }
    *slot = Some(PinMap::new(entries));
    Ok(())
}

/// Looks up `(device, function)` in the installed board pin map.
pub fn lookup_platform_pinmap(device: DeviceId, function: &str) -> Option<PinMapEntry> {
    PINMAP
        .lock()
        .as_ref()
        .and_then(|map| map.lookup(device, function).copied())
}

/// Drops the registered controller and pin map. Lifecycle support for tests;
/// production code never unregisters.
pub fn reset_for_tests() {
    *CONTROLLER.lock() = None;
    *PINMAP.lock() = None;
}

/// Claims `pin` for `(device, function)` through the registered controller.
pub fn request_pin(device: DeviceId, function: &str, pin: u32) -> Result<(), PinError> {
    controller()?.request_pin(device, function, pin)
}

/// Releases a mux-path claim through the registered controller.
pub fn free_pin(device: DeviceId, function: &str, pin: u32) -> Result<(), PinError> {
    controller()?.free_pin(device, function, pin)
}

/// Claims `pin` as a GPIO through the registered controller.
pub fn gpio_request(device: DeviceId, function: &str, pin: u32) -> Result<(), PinError> {
    controller()?.gpio_request(device, function, pin)
}

/// Releases a GPIO claim through the registered controller.
pub fn gpio_free(device: DeviceId, function: &str, pin: u32) -> Result<(), PinError> {
    controller()?.gpio_free(device, function, pin)
}

/// Switches a claimed pin to input.
pub fn gpio_direction_input(pin: u32) -> Result<(), PinError> {
    controller()?.gpio_direction_input(pin)
}

/// Switches a claimed pin to output, driving `level`.
pub fn gpio_direction_output(pin: u32, level: Level) -> Result<(), PinError> {
    controller()?.gpio_direction_output(pin, level)
}

/// Reads the level of a claimed pin.
pub fn gpio_get_value(pin: u32) -> Result<Level, PinError> {
    controller()?.gpio_get_value(pin)
}

/// Drives a claimed pin to `level`.
pub fn gpio_set_value(pin: u32, level: Level) -> Result<(), PinError> {
    controller()?.gpio_set_value(pin, level)
}

/// Applies an electrical configuration to a claimed pin.
pub fn gpio_set_config(pin: u32, config: PinConfig) -> Result<(), PinError> {
    controller()?.gpio_set_config(pin, config)
}

/// Maps a claimed pin to its external interrupt line.
pub fn gpio_to_irq(pin: u32) -> Result<u32, PinError> {
    controller()?.gpio_to_irq(pin)
}

/// Enables the edge interrupt of a claimed pin.
pub fn gpio_interrupt_enable(pin: u32, edge: Edge) -> Result<(), PinError> {
    controller()?.gpio_interrupt_enable(pin, edge)
}

/// Disables the edge interrupt of a claimed pin.
pub fn gpio_interrupt_disable(pin: u32) -> Result<(), PinError> {
    controller()?.gpio_interrupt_disable(pin)
}
