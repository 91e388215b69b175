//! Demo board bring-up over the simulated SoC.
//!
//! Walks the same path firmware does on real silicon: install the board pin
//! map, register the pin controller, probe peripherals (claiming pins with
//! reverse-order rollback on partial failure), hook interrupt handlers, then
//! service interrupts through the claim/complete handshake and dump the
//! per-line statistics.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};

use hal::{DeviceId, Edge, Level};
use irq::{IrqHandler, IrqTable};
use pinctrl::{registry, PinController, PinError, PinMapEntry};
use soc_sim::{SimIntc, SimPinmux};

const UART0: DeviceId = DeviceId("uart0");
const SPI1: DeviceId = DeviceId("spi1");
const BUTTON: DeviceId = DeviceId("button0");

/// External line wired to the serial block on this board.
const UART0_IRQ: u32 = 17;

fn board_pinmap() -> Vec<PinMapEntry> {
    vec![
        PinMapEntry {
            device: UART0,
            function: "txd",
            pin: 10,
        },
        PinMapEntry {
            device: UART0,
            function: "rxd",
            pin: 11,
        },
        PinMapEntry {
            device: BUTTON,
            function: "sense",
            pin: 4,
        },
    ]
}

/// Claims every pin a peripheral needs, backing out already-claimed pins in
/// reverse order when one of them fails. The pin layer enables this pattern
/// but the rollback itself is the driver's job.
fn probe_pins(device: DeviceId, functions: &[&'static str]) -> Result<Vec<u32>, PinError> {
    let mut claimed: Vec<(&'static str, u32)> = Vec::new();
    for function in functions {
        let entry = match registry::lookup_platform_pinmap(device, function) {
            Some(entry) => entry,
            None => {
                log::warn!("{device}: no board pin for {function}");
                continue;
            }
        };
        if let Err(err) = registry::request_pin(device, function, entry.pin) {
            for (function, pin) in claimed.into_iter().rev() {
                let _ = registry::free_pin(device, function, pin);
            }
            return Err(err);
        }
        claimed.push((function, entry.pin));
    }
    Ok(claimed.into_iter().map(|(_, pin)| pin).collect())
}

fn counting(hits: &Arc<AtomicU32>) -> Arc<dyn IrqHandler> {
    let hits = Arc::clone(hits);
    Arc::new(move |_line: u32| {
        hits.fetch_add(1, Ordering::Relaxed);
        Ok(())
    })
}

fn main() -> Result<()> {
    registry::set_platform_pinmap(board_pinmap()).context("install board pin map")?;

    let pinmux = Arc::new(SimPinmux::new(32, 32));
    let controller = Arc::new(
        PinController::new(pinmux.clone(), pinmux.clone(), 32).context("build pin controller")?,
    );
    registry::register_controller(controller).context("register pin controller")?;

    let intc = Arc::new(SimIntc::new(64));
    let table = IrqTable::new(intc.clone(), 64);

    // Serial probe: two pins, two handlers sharing one line.
    let uart_pins = probe_pins(UART0, &["txd", "rxd"]).context("probe uart0 pins")?;
    println!("uart0 claimed pins {uart_pins:?}");

    let rx_hits = Arc::new(AtomicU32::new(0));
    let err_hits = Arc::new(AtomicU32::new(0));
    table
        .request(UART0_IRQ, counting(&rx_hits), "uart0-rx", 4)
        .context("hook uart0 rx")?;
    table
        .request(UART0_IRQ, counting(&err_hits), "uart0-err", 4)
        .context("hook uart0 err")?;

    // Button: GPIO claim, input direction, edge interrupt on its own line.
    registry::gpio_request(BUTTON, "sense", 4).context("claim button pin")?;
    registry::gpio_direction_input(4)?;
    registry::gpio_interrupt_enable(4, Edge::Falling)?;
    let button_line = registry::gpio_to_irq(4)?;

    let button_hits = Arc::new(AtomicU32::new(0));
    table
        .request(button_line, counting(&button_hits), "button0", 2)
        .context("hook button")?;

    // A competing driver loses the arbitration and reports it locally.
    if let Err(err) = registry::request_pin(SPI1, "clk", 10) {
        println!("spi1 probe rejected as expected: {err}");
    }

    // Fire some traffic and service it.
    pinmux.drive(4, Level::High);
    intc.raise(UART0_IRQ);
    intc.raise(button_line);
    intc.raise(UART0_IRQ);
    for _ in 0..4 {
        table.handle_external();
    }

    println!(
        "serviced: rx={} err={} button={}",
        rx_hits.load(Ordering::Relaxed),
        err_hits.load(Ordering::Relaxed),
        button_hits.load(Ordering::Relaxed),
    );
    print!("{}", table.stats());
    Ok(())
}
