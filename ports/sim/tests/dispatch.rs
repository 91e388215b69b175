//! End-to-end exercises of the dispatch and arbitration engines over the
//! simulated controller models.

use std::sync::{Arc, Mutex};

use hal::{DeviceId, Edge, IrqChip, Level};
use irq::{IrqHandler, IrqTable, SwIrqTable};
use pinctrl::PinController;
use soc_sim::{SimIntc, SimPinmux, SimSwIntc};

fn tagging(log: &Arc<Mutex<Vec<&'static str>>>, tag: &'static str) -> Arc<dyn IrqHandler> {
    let log = Arc::clone(log);
    Arc::new(move |_line: u32| {
        log.lock().unwrap().push(tag);
        Ok(())
    })
}

#[test]
fn higher_priority_source_is_claimed_first() {
    let intc = Arc::new(SimIntc::new(16));
    let table = IrqTable::new(intc.clone(), 16);
    let log = Arc::new(Mutex::new(Vec::new()));

    table.request(3, tagging(&log, "low"), "low", 1).unwrap();
    table.request(5, tagging(&log, "high"), "high", 5).unwrap();

    intc.raise(3);
    intc.raise(5);
    table.handle_external();
    table.handle_external();
    table.handle_external(); // nothing left pending

    assert_eq!(*log.lock().unwrap(), vec!["high", "low"]);
}

#[test]
fn equal_priority_ties_go_to_the_lowest_source() {
    let intc = Arc::new(SimIntc::new(16));
    let table = IrqTable::new(intc.clone(), 16);
    let log = Arc::new(Mutex::new(Vec::new()));

    table.request(7, tagging(&log, "seven"), "seven", 2).unwrap();
    table.request(4, tagging(&log, "four"), "four", 2).unwrap();

    intc.raise(7);
    intc.raise(4);
    table.handle_external();
    table.handle_external();

    assert_eq!(*log.lock().unwrap(), vec!["four", "seven"]);
}

#[test]
fn reraise_during_service_waits_for_completion() {
    let intc = SimIntc::new(8);
    intc.set_priority(2, 3);
    intc.enable(2);

    intc.raise(2);
    assert_eq!(intc.claim(), Some(2));

    // The gateway holds a re-raise until the first service completes.
    intc.raise(2);
    assert_eq!(intc.claim(), None);

    intc.complete(2);
    assert_eq!(intc.claim(), Some(2));
    intc.complete(2);
}

#[test]
fn threshold_masks_low_priority_sources() {
    let intc = SimIntc::new(8);
    intc.set_priority(1, 2);
    intc.set_priority(2, 4);
    intc.enable(1);
    intc.enable(2);
    intc.set_threshold(3);

    intc.raise(1);
    intc.raise(2);
    assert_eq!(intc.claim(), Some(2));
    intc.complete(2);
    assert_eq!(intc.claim(), None);
}

#[test]
fn software_controller_round_trip() {
    let intc = Arc::new(SimSwIntc::new(4));
    let table = SwIrqTable::new(intc, 4);
    let log = Arc::new(Mutex::new(Vec::new()));

    table.request(0, tagging(&log, "ipc"), "ipc", 1).unwrap();
    table.trigger(0).unwrap();
    table.handle_software();

    assert_eq!(*log.lock().unwrap(), vec!["ipc"]);
    assert_eq!(table.stats().line(0).unwrap().count, 1);
}

#[test]
fn probe_claim_and_service_a_gpio_interrupt() {
    let pinmux = Arc::new(SimPinmux::new(32, 32));
    let ctrl = PinController::new(pinmux.clone(), pinmux.clone(), 32).unwrap();
    let intc = Arc::new(SimIntc::new(64));
    let table = IrqTable::new(intc.clone(), 64);

    let button = DeviceId("button0");
    ctrl.gpio_request(button, "sense", 4).unwrap();
    ctrl.gpio_direction_input(4).unwrap();
    ctrl.gpio_interrupt_enable(4, Edge::Falling).unwrap();

    let line = ctrl.gpio_to_irq(4).unwrap();
    assert_eq!(line, 36);

    let hits = Arc::new(Mutex::new(0u32));
    let handler = {
        let hits = Arc::clone(&hits);
        Arc::new(move |_line: u32| {
            *hits.lock().unwrap() += 1;
            Ok(())
        })
    };
    table.request(line, handler, "button0", 3).unwrap();

    pinmux.drive(4, Level::High);
    assert_eq!(ctrl.gpio_get_value(4).unwrap(), Level::High);

    intc.raise(line);
    table.handle_external();
    assert_eq!(*hits.lock().unwrap(), 1);
    assert_eq!(table.stats().line(line).unwrap().count, 1);
}
