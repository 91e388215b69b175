//! Pin multiplexer and GPIO register model.

use std::collections::HashSet;

use hal::sync::Mutex;
use hal::{
    DeviceId, Direction, Edge, GpioOps, HalError, HalResult, Level, PinConfig, PinMuxOps,
};

struct PinState {
    requested: bool,
    gpio: bool,
    function: Option<String>,
    direction: Direction,
    level: Level,
    config: PinConfig,
    irq: Option<Edge>,
}

impl PinState {
    fn new() -> Self {
        Self {
            requested: false,
            gpio: false,
            function: None,
            direction: Direction::Input,
            level: Level::Low,
            config: PinConfig::Floating,
            irq: None,
        }
    }
}

/// Simulated pin-mux backend.
///
/// Pins marked reserved refuse every request, standing in for pads that are
/// strapped or fused on real silicon; tests use them to drive the
/// backend-failure paths of the arbitration layer.
pub struct SimPinmux {
    pins: Mutex<Vec<PinState>>,
    reserved: HashSet<u32>,
    irq_base: u32,
}

impl SimPinmux {
    /// Creates a model with `npins` pads. GPIO interrupt lines start at
    /// `irq_base + pin`.
    pub fn new(npins: usize, irq_base: u32) -> Self {
        let mut pins = Vec::with_capacity(npins);
        pins.resize_with(npins, PinState::new);
        Self {
            pins: Mutex::new(pins),
            reserved: HashSet::new(),
            irq_base,
        }
    }

    /// Marks pads that refuse every request.
    pub fn with_reserved(mut self, pins: &[u32]) -> Self {
        self.reserved.extend(pins.iter().copied());
        self
    }

    fn check(&self, pin: u32) -> HalResult<()> {
        if (pin as usize) >= self.pins.lock().len() {
            return Err(HalError::InvalidParameter);
        }
        if self.reserved.contains(&pin) {
            return Err(HalError::Busy);
        }
        Ok(())
    }

    /// The function currently muxed onto `pin`, as `"device/function"`.
    pub fn function_of(&self, pin: u32) -> Option<String> {
        self.pins.lock().get(pin as usize)?.function.clone()
    }

    /// Whether `pin` is currently muxed as a GPIO.
    pub fn is_gpio(&self, pin: u32) -> bool {
        self.pins
            .lock()
            .get(pin as usize)
            .is_some_and(|p| p.gpio)
    }

    /// Drives the input level of `pin` from the simulated pad side.
    pub fn drive(&self, pin: u32, level: Level) {
        if let Some(state) = self.pins.lock().get_mut(pin as usize) {
            state.level = level;
        }
    }
}

impl PinMuxOps for SimPinmux {
    fn request(&self, pin: u32) -> HalResult<()> {
        self.check(pin)?;
        let mut pins = self.pins.lock();
        let state = &mut pins[pin as usize];
        if state.requested {
            return Err(HalError::Busy);
        }
        state.requested = true;
        Ok(())
    }

    fn free(&self, pin: u32) -> HalResult<()> {
        self.check(pin)?;
        let mut pins = self.pins.lock();
        let state = &mut pins[pin as usize];
        state.requested = false;
        state.function = None;
        Ok(())
    }

    fn set_mux(&self, device: DeviceId, function: &str, pin: u32) -> HalResult<()> {
        self.check(pin)?;
        let mut pins = self.pins.lock();
        let state = &mut pins[pin as usize];
        if !state.requested {
            return Err(HalError::InvalidParameter);
        }
        state.function = Some(format!("{device}/{function}"));
        state.gpio = false;
        Ok(())
    }

    fn gpio_request_enable(&self, pin: u32) -> HalResult<()> {
        self.check(pin)?;
        let mut pins = self.pins.lock();
        let state = &mut pins[pin as usize];
        if state.requested {
            return Err(HalError::Busy);
        }
        state.requested = true;
        state.gpio = true;
        Ok(())
    }

    fn gpio_disable_free(&self, pin: u32) -> HalResult<()> {
        self.check(pin)?;
        let mut pins = self.pins.lock();
        let state = &mut pins[pin as usize];
        state.requested = false;
        state.gpio = false;
        state.irq = None;
        Ok(())
    }

    fn gpio_set_direction(&self, pin: u32, direction: Direction) -> HalResult<()> {
        self.check(pin)?;
        self.pins.lock()[pin as usize].direction = direction;
        Ok(())
    }
}

impl GpioOps for SimPinmux {
    fn get(&self, pin: u32) -> HalResult<Level> {
        self.check(pin)?;
        Ok(self.pins.lock()[pin as usize].level)
    }

    fn set(&self, pin: u32, level: Level) -> HalResult<()> {
        self.check(pin)?;
        let mut pins = self.pins.lock();
        let state = &mut pins[pin as usize];
        if state.direction != Direction::Output {
            return Err(HalError::InvalidParameter);
        }
        state.level = level;
        Ok(())
    }

    fn set_config(&self, pin: u32, config: PinConfig) -> HalResult<()> {
        self.check(pin)?;
        self.pins.lock()[pin as usize].config = config;
        Ok(())
    }

    fn to_irq(&self, pin: u32) -> HalResult<u32> {
        self.check(pin)?;
        Ok(self.irq_base + pin)
    }

    fn irq_enable(&self, pin: u32, edge: Edge) -> HalResult<()> {
        self.check(pin)?;
        self.pins.lock()[pin as usize].irq = Some(edge);
        Ok(())
    }

    fn irq_disable(&self, pin: u32) -> HalResult<()> {
        self.check(pin)?;
        self.pins.lock()[pin as usize].irq = None;
        Ok(())
    }
}
