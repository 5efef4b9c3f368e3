//! Bring-up through the public API against the mock board
//!
//! Run with `cargo test --features mock`.

#![cfg(feature = "mock")]

use brain_board::board::{board_init, mark_boot_successful, FlashBootCounter};
use brain_board::platform::mock::{Event, MockBoard, MockFlash};
use brain_board::platform::traits::BootCounter;
use brain_board_core::alarms::AlarmSeverity;
use brain_board_core::parameters::{register_all, ParamValue, ParameterStore};
use brain_board_core::ports::{ChannelPurpose, PortFunction};
use brain_board_core::Capabilities;

fn store_with(main: PortFunction, flexi: PortFunction) -> ParameterStore {
    let mut store = ParameterStore::new();
    register_all(&mut store).unwrap();
    store
        .set("HW_MAINPORT", ParamValue::Int(main.code()))
        .unwrap();
    store
        .set("HW_FLXPORT", ParamValue::Int(flexi.code()))
        .unwrap();
    store
}

#[test]
fn board_init_returns_resources() {
    let mut board = MockBoard::new();
    let mut store = store_with(PortFunction::Telemetry, PortFunction::Gps);
    let mut counter = FlashBootCounter::new(MockFlash::new(), 0);

    let res = board_init(&mut board, &mut store, &mut counter, Capabilities::BRAIN);

    assert!(res.has_telemetry());
    assert!(res.channels.is_bound(ChannelPurpose::Gps));
    assert_eq!(res.boot_fault, AlarmSeverity::Ok);
    assert!(board.has(Event::AdcInit));
    assert_eq!(counter.read().unwrap(), 1);
}

#[test]
fn marked_boots_never_reset_settings() {
    let mut store = store_with(PortFunction::Gps, PortFunction::Telemetry);
    let mut counter = FlashBootCounter::new(MockFlash::new(), 0);

    for _ in 0..6 {
        let mut board = MockBoard::new();
        let res = board_init(&mut board, &mut store, &mut counter, Capabilities::BRAIN);
        assert_eq!(res.boot_fault, AlarmSeverity::Ok);
        assert_eq!(res.config.main_port, PortFunction::Gps);
        mark_boot_successful(&mut counter).unwrap();
    }
}

#[test]
fn counter_survives_in_flash() {
    let mut store = store_with(PortFunction::Gps, PortFunction::Telemetry);
    let mut flash = MockFlash::new();

    for _ in 0..3 {
        let mut counter = FlashBootCounter::new(flash, 0);
        let mut board = MockBoard::new();
        board_init(&mut board, &mut store, &mut counter, Capabilities::BRAIN);
        flash = counter.into_inner();
    }

    let mut counter = FlashBootCounter::new(flash, 0);
    let mut board = MockBoard::new();
    let res = board_init(&mut board, &mut store, &mut counter, Capabilities::BRAIN);
    assert_eq!(res.boot_fault, AlarmSeverity::Critical);
    assert_eq!(res.config.main_port, PortFunction::Telemetry);
}
