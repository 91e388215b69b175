//! Static board pin map.
//!
//! Distinct from the dynamic ownership registry: this table answers "which
//! physical pin is `uart0/txd` on this board" at probe time, before the
//! driver claims the pin. It is configured once and immutable thereafter.

use log::warn;

use hal::DeviceId;

/// One board-level assignment of a physical pin to a device function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinMapEntry {
    pub device: DeviceId,
    pub function: &'static str,
    pub pin: u32,
}

/// Immutable board pin map.
pub struct PinMap {
    entries: Vec<PinMapEntry>,
}

impl PinMap {
    /// Builds a map from board configuration.
    ///
    /// Runs a duplicate-pin scan and logs a warning per collision. The scan
    /// is quadratic on purpose: board maps are tens of entries and this runs
    /// once at boot. Duplicates are diagnosed, not rejected — the ownership
    /// registry is what actually prevents double use.
    pub fn new(entries: Vec<PinMapEntry>) -> Self {
        for (i, a) in entries.iter().enumerate() {
            for b in entries.iter().skip(i + 1) {
                if a.pin == b.pin {
                    warn!(
                        "pin {} mapped to both {}/{} and {}/{}",
                        a.pin, a.device, a.function, b.device, b.function
                    );
                }
            }
        }
        Self { entries }
    }

    /// Looks up the pin assigned to `(device, function)`; first match wins.
    pub fn lookup(&self, device: DeviceId, function: &str) -> Option<&PinMapEntry> {
        self.entries
            .iter()
            .find(|e| e.device == device && e.function == function)
    }

    /// All entries, in board-configuration order.
    pub fn entries(&self) -> &[PinMapEntry] {
        &self.entries
    }
}
