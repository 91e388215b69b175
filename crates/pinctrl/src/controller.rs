//! The pin descriptor registry and its arbitration rules.

use std::sync::Arc;

use log::warn;

use hal::sync::Mutex;
use hal::{DeviceId, Direction, Edge, GpioOps, Level, PinConfig, PinMuxOps};

use crate::PinError;

/// Recorded owner of a claimed pin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinOwner {
    /// Client device holding the pin.
    pub device: DeviceId,
    /// Function the pin serves for that client, e.g. `"txd"`.
    pub function: String,
}

impl PinOwner {
    fn matches(&self, device: DeviceId, function: &str) -> bool {
        self.device == device && self.function == function
    }
}

/// One descriptor per physical pin.
///
/// Invariant: `refcnt > 0` iff `owner` is set. The owner identity stays
/// recorded for any positive refcnt and is cleared only when the count
/// returns to zero.
#[derive(Default)]
struct PinDescriptor {
    refcnt: u32,
    owner: Option<PinOwner>,
}

/// SoC-agnostic pin ownership registry.
///
/// Admission control runs before any backend call: a pin owned by a
/// different `(device, function)` identity is rejected without the backend
/// ever seeing the request. Ownership metadata is committed only after the
/// backend call succeeded, so a backend failure leaves no partial state.
pub struct PinController {
    mux: Arc<dyn PinMuxOps>,
    gpio: Arc<dyn GpioOps>,
    pins: Mutex<Vec<PinDescriptor>>,
}

impl PinController {
    /// Creates a controller over `npins` descriptors. An empty pin table is
    /// rejected.
    pub fn new(
        mux: Arc<dyn PinMuxOps>,
        gpio: Arc<dyn GpioOps>,
        npins: usize,
    ) -> Result<Self, PinError> {
        if npins == 0 {
            return Err(PinError::EmptyPinTable);
        }
        let mut pins = Vec::with_capacity(npins);
        pins.resize_with(npins, PinDescriptor::default);
        Ok(Self {
            mux,
            gpio,
            pins: Mutex::new(pins),
        })
    }

    /// Number of pins this controller arbitrates.
    pub fn npins(&self) -> usize {
        self.pins.lock().len()
    }

    /// Claims `pin` for `(device, function)` through the general mux path.
    pub fn request_pin(
        &self,
        device: DeviceId,
        function: &str,
        pin: u32,
    ) -> Result<(), PinError> {
        self.claim(device, function, pin, false)
    }

    /// Releases a mux-path claim on `pin`.
    pub fn free_pin(&self, device: DeviceId, function: &str, pin: u32) -> Result<(), PinError> {
        self.release(device, function, pin, false)
    }

    /// Claims `pin` for `(device, function)` as a GPIO.
    pub fn gpio_request(
        &self,
        device: DeviceId,
        function: &str,
        pin: u32,
    ) -> Result<(), PinError> {
        self.claim(device, function, pin, true)
    }

    /// Releases a GPIO claim on `pin`.
    pub fn gpio_free(&self, device: DeviceId, function: &str, pin: u32) -> Result<(), PinError> {
        self.release(device, function, pin, true)
    }

    fn claim(
        &self,
        device: DeviceId,
        function: &str,
        pin: u32,
        gpio_path: bool,
    ) -> Result<(), PinError> {
        let mut pins = self.pins.lock();
        let desc = pins
            .get_mut(pin as usize)
            .ok_or(PinError::InvalidPin(pin))?;

        if desc.refcnt > 0 {
            if let Some(owner) = &desc.owner {
                if !owner.matches(device, function) {
                    warn!(
                        "pin {pin}: {device}/{function} rejected, owned by {}/{}",
                        owner.device, owner.function
                    );
                    return Err(PinError::PinBusy {
                        pin,
                        owner: owner.device,
                        function: owner.function.clone(),
                    });
                }
            }
        }

        let applied = if gpio_path {
            self.mux.gpio_request_enable(pin)
        } else {
            match self.mux.request(pin) {
                Ok(()) => match self.mux.set_mux(device, function, pin) {
                    Ok(()) => Ok(()),
                    Err(err) => {
                        // Back out the mux reservation; the descriptor was
                        // never touched.
                        let _ = self.mux.free(pin);
                        Err(err)
                    }
                },
                Err(err) => Err(err),
            }
        };

        if let Err(err) = applied {
            warn!("pin {pin}: {device}/{function}: backend refused: {err}");
            return Err(err.into());
        }

        desc.refcnt += 1;
        if desc.owner.is_none() {
            desc.owner = Some(PinOwner {
                device,
                function: function.to_owned(),
            });
        }
        Ok(())
    }

    fn release(
        &self,
        device: DeviceId,
        function: &str,
        pin: u32,
        gpio_path: bool,
    ) -> Result<(), PinError> {
        let mut pins = self.pins.lock();
        let desc = pins
            .get_mut(pin as usize)
            .ok_or(PinError::InvalidPin(pin))?;

        if desc.refcnt == 0 {
            return Err(PinError::NotClaimed(pin));
        }
        match &desc.owner {
            Some(owner) if owner.matches(device, function) => {}
            _ => {
                warn!("pin {pin}: free by non-owner {device}/{function}");
                return Err(PinError::NotOwner {
                    pin,
                    device,
                    function: function.to_owned(),
                });
            }
        }

        let released = if gpio_path {
            self.mux.gpio_disable_free(pin)
        } else {
            self.mux.free(pin)
        };
        if let Err(err) = released {
            warn!("pin {pin}: {device}/{function}: backend free failed: {err}");
            return Err(err.into());
        }

        desc.refcnt -= 1;
        if desc.refcnt == 0 {
            desc.owner = None;
        }
        Ok(())
    }

    /// Current reference count for `pin`.
    pub fn refcount(&self, pin: u32) -> Result<u32, PinError> {
        let pins = self.pins.lock();
        pins.get(pin as usize)
            .map(|d| d.refcnt)
            .ok_or(PinError::InvalidPin(pin))
    }

    /// Recorded owner of `pin`, if any.
    pub fn owner(&self, pin: u32) -> Result<Option<PinOwner>, PinError> {
        let pins = self.pins.lock();
        pins.get(pin as usize)
            .map(|d| d.owner.clone())
            .ok_or(PinError::InvalidPin(pin))
    }

    /// Claimed-pin gate for the raw GPIO operations below. These carry no
    /// device identity, so only the existence of an owner can be checked.
    fn ensure_claimed(&self, pin: u32) -> Result<(), PinError> {
        let pins = self.pins.lock();
        let desc = pins.get(pin as usize).ok_or(PinError::InvalidPin(pin))?;
        if desc.refcnt == 0 {
            return Err(PinError::NotClaimed(pin));
        }
        Ok(())
    }

    /// Switches a claimed pin to input.
    pub fn gpio_direction_input(&self, pin: u32) -> Result<(), PinError> {
        self.ensure_claimed(pin)?;
        self.mux.gpio_set_direction(pin, Direction::Input)?;
        Ok(())
    }

    /// Switches a claimed pin to output, driving `level`.
    pub fn gpio_direction_output(&self, pin: u32, level: Level) -> Result<(), PinError> {
        self.ensure_claimed(pin)?;
        self.mux.gpio_set_direction(pin, Direction::Output)?;
        self.gpio.set(pin, level)?;
        Ok(())
    }

    /// Reads the level of a claimed pin.
    pub fn gpio_get_value(&self, pin: u32) -> Result<Level, PinError> {
        self.ensure_claimed(pin)?;
        Ok(self.gpio.get(pin)?)
    }

    /// Drives a claimed pin to `level`.
    pub fn gpio_set_value(&self, pin: u32, level: Level) -> Result<(), PinError> {
        self.ensure_claimed(pin)?;
        self.gpio.set(pin, level)?;
        Ok(())
    }

    /// Applies an electrical configuration to a claimed pin.
    pub fn gpio_set_config(&self, pin: u32, config: PinConfig) -> Result<(), PinError> {
        self.ensure_claimed(pin)?;
        self.gpio.set_config(pin, config)?;
        Ok(())
    }

    /// Maps a claimed pin to its external interrupt line.
    pub fn gpio_to_irq(&self, pin: u32) -> Result<u32, PinError> {
        self.ensure_claimed(pin)?;
        Ok(self.gpio.to_irq(pin)?)
    }

    /// Enables the edge interrupt of a claimed pin.
    pub fn gpio_interrupt_enable(&self, pin: u32, edge: Edge) -> Result<(), PinError> {
        self.ensure_claimed(pin)?;
        self.gpio.irq_enable(pin, edge)?;
        Ok(())
    }

    /// Disables the edge interrupt of a claimed pin.
    pub fn gpio_interrupt_disable(&self, pin: u32) -> Result<(), PinError> {
        self.ensure_claimed(pin)?;
        self.gpio.irq_disable(pin)?;
        Ok(())
    }
}
