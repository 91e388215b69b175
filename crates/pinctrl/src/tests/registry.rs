use std::sync::Arc;

use hal::DeviceId;

use crate::tests::MockBackend;
use crate::{registry, PinController, PinError, PinMapEntry};

// The registry is process-wide state, so everything touching it lives in one
// test function; the other suites construct controllers directly.
#[test]
fn registration_lifecycle() {
    registry::reset_for_tests();

    let uart = DeviceId("uart0");
    assert_eq!(registry::controller().err(), Some(PinError::NoController));
    assert_eq!(
        registry::request_pin(uart, "txd", 10),
        Err(PinError::NoController)
    );

    let backend = Arc::new(MockBackend::default());
    let ctrl = Arc::new(PinController::new(backend.clone(), backend, 16).unwrap());
    registry::register_controller(ctrl.clone()).unwrap();
    assert_eq!(
        registry::register_controller(ctrl).err(),
        Some(PinError::ControllerBusy)
    );

    registry::set_platform_pinmap(vec![PinMapEntry {
        device: uart,
        function: "txd",
        pin: 10,
    }])
    .unwrap();
    assert_eq!(
        registry::set_platform_pinmap(Vec::new()).err(),
        Some(PinError::PinMapBusy)
    );

    // Probe-time flow: look the pin up, then claim it through the module
    // surface.
    let entry = registry::lookup_platform_pinmap(uart, "txd").unwrap();
    assert_eq!(entry.pin, 10);
    assert!(registry::lookup_platform_pinmap(uart, "rxd").is_none());

    registry::request_pin(uart, "txd", entry.pin).unwrap();
    assert_eq!(
        registry::controller().unwrap().refcount(entry.pin).unwrap(),
        1
    );
    registry::free_pin(uart, "txd", entry.pin).unwrap();

    registry::reset_for_tests();
    assert_eq!(registry::controller().err(), Some(PinError::NoController));
}
