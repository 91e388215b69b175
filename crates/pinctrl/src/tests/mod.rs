use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use hal::{DeviceId, Direction, Edge, GpioOps, HalError, HalResult, Level, PinConfig, PinMuxOps};

use crate::PinController;

mod pinmap;
mod registry;

#[derive(Default)]
struct BackendState {
    calls: Vec<String>,
    fail_request: HashSet<u32>,
    fail_set_mux: HashSet<u32>,
    fail_gpio_enable: HashSet<u32>,
    levels: HashMap<u32, Level>,
}

/// Records every backend call and fails on demand.
#[derive(Default)]
pub(crate) struct MockBackend {
    state: Mutex<BackendState>,
}

impl MockBackend {
    fn record(&self, call: String) {
        self.state.lock().unwrap().calls.push(call);
    }

    pub(crate) fn fail_request(&self, pin: u32) {
        self.state.lock().unwrap().fail_request.insert(pin);
    }

    pub(crate) fn fail_set_mux(&self, pin: u32) {
        self.state.lock().unwrap().fail_set_mux.insert(pin);
    }

    pub(crate) fn fail_gpio_enable(&self, pin: u32) {
        self.state.lock().unwrap().fail_gpio_enable.insert(pin);
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }
}

impl PinMuxOps for MockBackend {
    fn request(&self, pin: u32) -> HalResult<()> {
        self.record(format!("request {pin}"));
        if self.state.lock().unwrap().fail_request.contains(&pin) {
            return Err(HalError::Busy);
        }
        Ok(())
    }

    fn free(&self, pin: u32) -> HalResult<()> {
        self.record(format!("free {pin}"));
        Ok(())
    }

    fn set_mux(&self, device: DeviceId, function: &str, pin: u32) -> HalResult<()> {
        self.record(format!("set_mux {device}/{function} {pin}"));
        if self.state.lock().unwrap().fail_set_mux.contains(&pin) {
            return Err(HalError::HardwareError);
        }
        Ok(())
    }

    fn gpio_request_enable(&self, pin: u32) -> HalResult<()> {
        self.record(format!("gpio_enable {pin}"));
        if self.state.lock().unwrap().fail_gpio_enable.contains(&pin) {
            return Err(HalError::Busy);
        }
        Ok(())
    }

    fn gpio_disable_free(&self, pin: u32) -> HalResult<()> {
        self.record(format!("gpio_disable {pin}"));
        Ok(())
    }

    fn gpio_set_direction(&self, pin: u32, direction: Direction) -> HalResult<()> {
        self.record(format!("dir {pin} {direction:?}"));
        Ok(())
    }
}

impl GpioOps for MockBackend {
    fn get(&self, pin: u32) -> HalResult<Level> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .levels
            .get(&pin)
            .copied()
            .unwrap_or(Level::Low))
    }

    fn set(&self, pin: u32, level: Level) -> HalResult<()> {
        self.state.lock().unwrap().levels.insert(pin, level);
        Ok(())
    }

    fn set_config(&self, pin: u32, config: PinConfig) -> HalResult<()> {
        self.record(format!("config {pin} {config:?}"));
        Ok(())
    }

    fn to_irq(&self, pin: u32) -> HalResult<u32> {
        Ok(32 + pin)
    }

    fn irq_enable(&self, pin: u32, edge: Edge) -> HalResult<()> {
        self.record(format!("irq_enable {pin} {edge:?}"));
        Ok(())
    }

    fn irq_disable(&self, pin: u32) -> HalResult<()> {
        self.record(format!("irq_disable {pin}"));
        Ok(())
    }
}

pub(crate) fn controller_with(backend: &Arc<MockBackend>, npins: usize) -> PinController {
    PinController::new(backend.clone(), backend.clone(), npins).unwrap()
}
