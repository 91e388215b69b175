use hal::DeviceId;

use crate::{PinMap, PinMapEntry};

const UART: DeviceId = DeviceId("uart0");
const SPI: DeviceId = DeviceId("spi1");

fn board_map() -> Vec<PinMapEntry> {
    vec![
        PinMapEntry {
            device: UART,
            function: "txd",
            pin: 10,
        },
        PinMapEntry {
            device: UART,
            function: "rxd",
            pin: 11,
        },
        PinMapEntry {
            device: SPI,
            function: "clk",
            pin: 12,
        },
    ]
}

#[test]
fn lookup_finds_the_assigned_pin() {
    let map = PinMap::new(board_map());
    assert_eq!(map.lookup(UART, "rxd").unwrap().pin, 11);
    assert_eq!(map.lookup(SPI, "clk").unwrap().pin, 12);
}

#[test]
fn lookup_misses_unknown_functions() {
    let map = PinMap::new(board_map());
    assert!(map.lookup(UART, "cts").is_none());
    assert!(map.lookup(DeviceId("i2c0"), "sda").is_none());
}

#[test]
fn duplicate_pins_are_diagnosed_but_kept() {
    let mut entries = board_map();
    entries.push(PinMapEntry {
        device: SPI,
        function: "mosi",
        pin: 10,
    });
    // The scan warns; the map still answers for both claimants. The
    // ownership registry is what arbitrates the conflict at request time.
    let map = PinMap::new(entries);
    assert_eq!(map.entries().len(), 4);
    assert_eq!(map.lookup(UART, "txd").unwrap().pin, 10);
    assert_eq!(map.lookup(SPI, "mosi").unwrap().pin, 10);
}

#[test]
fn first_match_wins_on_repeated_functions() {
    let mut entries = board_map();
    entries.push(PinMapEntry {
        device: UART,
        function: "txd",
        pin: 15,
    });
    let map = PinMap::new(entries);
    assert_eq!(map.lookup(UART, "txd").unwrap().pin, 10);
}
