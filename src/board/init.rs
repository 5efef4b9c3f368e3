//! Bring-up orchestrator
//!
//! Runs once, before any task exists, in dependency order:
//!
//! 1. Delay, LED, internal I2C (stuck-bus check), flash SPI
//! 2. Flash drivers and filesystem mounts
//! 3. Settings, RTC, watchdog, timer clocks
//! 4. Boot counter, then the hardware configuration snapshot
//! 5. USB stack and its VCP/HID channels
//! 6. Ports: Main, Flexi, RxPort, RxPortUsart, then the GCS receiver
//! 7. Servo outputs or debug pins, GPIO
//! 8. Barometer, IMU
//! 9. ADC, video overlay
//! 10. Telemetry link check
//!
//! Every stage that may block on a bus is followed by a watchdog clear.

use brain_board_core::handle::BusHandle;
use brain_board_core::parameters::{
    register_all, HardwareConfiguration, ModuleParams, OsdParams, ParameterStore,
};
use brain_board_core::ports::PortRole;
use brain_board_core::{Capabilities, FaultCode};

use super::abort::{BootAbort, OrAbort};
use super::boot_count::apply_boot_count;
use super::dispatcher::{configure_gcs_receiver, configure_port, configure_rx_port, PortAssignment};
use super::fault;
use super::resources::BoardResources;
use super::sensors::{bring_up_barometer, bring_up_external_mag, bring_up_imu, wait_bus_clear};
use super::usb::bring_up_usb;
use crate::platform::traits::{Board, BootCounter, Filesystem, I2cBus, SpiBus, TimerBank};

/// Stage name reported when no telemetry link was configured
pub const NO_TELEMETRY: &str = "telemetry link check";

/// One bring-up pass
pub struct Bringup<'a, B, C> {
    board: &'a mut B,
    store: &'a mut ParameterStore,
    counter: &'a mut C,
    capabilities: Capabilities,
}

impl<'a, B: Board, C: BootCounter> Bringup<'a, B, C> {
    /// Prepare bring-up of `board`
    ///
    /// `store` holds the settings restored from flash (it may be empty);
    /// `capabilities` lists the drivers compiled into this build.
    pub fn new(
        board: &'a mut B,
        store: &'a mut ParameterStore,
        counter: &'a mut C,
        capabilities: Capabilities,
    ) -> Self {
        Self {
            board,
            store,
            counter,
            capabilities,
        }
    }

    /// Run every stage, stopping at the first fatal failure
    pub fn run(self) -> Result<BoardResources, BootAbort> {
        let Self {
            board,
            store,
            counter,
            capabilities: caps,
        } = self;
        crate::log_info!("bring-up start");

        let internal_i2c = init_buses_and_flash(board, caps)?;

        register_all(store).or_halt("settings")?;
        init_system(board, caps)?;

        let boot_fault = apply_boot_count(counter, store)?;

        let (config, substituted) = HardwareConfiguration::decode(store);
        for name in substituted.iter() {
            crate::log_warn!("{} unusable, default applied", *name);
        }
        let mut res = BoardResources::new(config, caps);
        res.modules = ModuleParams::from_store(store);
        res.osd = OsdParams::from_store(store);
        res.boot_fault = boot_fault;
        res.internal_i2c = internal_i2c;

        bring_up_usb(board, &mut res)?;

        board.sensors_init().or_halt("sensor registry")?;
        configure_ports(board, &mut res)?;
        configure_gcs_receiver(board, &mut res)?;
        configure_outputs(board, &mut res)?;

        board.watchdog_clear();
        bring_up_barometer(board, &mut res)?;
        board.watchdog_clear();
        bring_up_imu(board, &mut res)?;
        board.watchdog_clear();

        init_late(board, &res)?;

        if res.external_mag_failed() {
            crate::log_warn!("external magnetometer failed, alarm pending");
        }
        if !res.has_telemetry() {
            crate::log_error!("no telemetry link configured");
            return Err(BootAbort::Halt(NO_TELEMETRY));
        }

        crate::log_info!("bring-up complete, {} channels", res.channels.len());
        Ok(res)
    }
}

/// Delay, LED, buses, flash and filesystems
///
/// Returns the internal I2C bus when it is built in.
fn init_buses_and_flash<B: Board>(
    board: &mut B,
    caps: Capabilities,
) -> Result<Option<BusHandle>, BootAbort> {
    board.delay_init().or_halt("delay")?;
    if caps.contains(Capabilities::LED) {
        board.led_init().or_halt("LED")?;
    }

    let mut internal_i2c = None;
    if caps.contains(Capabilities::I2C) {
        let bus = board.i2c_init(I2cBus::Internal).or_halt("internal I2C")?;
        wait_bus_clear(board, bus, FaultCode::GyroBusStuck)?;
        internal_i2c = Some(bus);
    }

    let mut spi = None;
    if caps.contains(Capabilities::SPI) {
        spi = Some(board.spi_init(SpiBus::Flash).or_halt("flash SPI")?);
    }

    if caps.contains(Capabilities::FLASH) {
        let spi = spi.ok_or(BootAbort::Fault(FaultCode::FlashOrImuIrq))?;
        board
            .flash_internal_init()
            .or_fault(FaultCode::FlashOrImuIrq)?;
        board
            .flash_jedec_init(spi)
            .or_fault(FaultCode::FlashOrImuIrq)?;
        for fs in [Filesystem::Settings, Filesystem::Waypoints] {
            board
                .mount_filesystem(fs)
                .or_fault(FaultCode::FlashOrImuIrq)?;
            crate::log_debug!("{} filesystem mounted", fs.label());
        }
    }
    Ok(internal_i2c)
}

/// RTC, watchdog and timer clocks
fn init_system<B: Board>(board: &mut B, caps: Capabilities) -> Result<(), BootAbort> {
    if caps.contains(Capabilities::RTC) {
        board.rtc_init().or_halt("RTC")?;
    }

    if board.debugger_attached() {
        crate::log_warn!("debugger attached, watchdog left unarmed");
    } else {
        board.watchdog_init().or_halt("watchdog")?;
    }

    for bank in [TimerBank::RcvrInputs, TimerBank::AuxInputs, TimerBank::ServoOutputs] {
        board.timer_clock_init(bank).or_halt("timer clock")?;
    }
    Ok(())
}

fn configure_ports<B: Board>(board: &mut B, res: &mut BoardResources) -> Result<(), BootAbort> {
    let config = res.config;
    for role in PortRole::ALL {
        if role == PortRole::RxPort {
            configure_rx_port(board, res, config.rx_port)?;
        } else if let Some(PortAssignment::AuxBus(bus)) =
            configure_port(board, res, role, config.function_for(role))?
        {
            bring_up_external_mag(board, res, bus);
        }
        board.watchdog_clear();
    }
    Ok(())
}

fn configure_outputs<B: Board>(board: &mut B, res: &mut BoardResources) -> Result<(), BootAbort> {
    if res.capabilities.contains(Capabilities::DEBUG_PINS) {
        board.debug_pins_init();
    } else if res.capabilities.contains(Capabilities::SERVO) {
        if let Some(layout) = res.config.rx_port.servo_layout() {
            board.servo_init(layout).or_halt("servo outputs")?;
        }
    }

    if res.capabilities.contains(Capabilities::GPIO) {
        board.gpio_init().or_halt("GPIO")?;
    }
    Ok(())
}

/// ADC and the video overlay
fn init_late<B: Board>(board: &mut B, res: &BoardResources) -> Result<(), BootAbort> {
    if res.capabilities.contains(Capabilities::ADC) {
        board.adc_init().or_halt("ADC")?;
    }

    if res.capabilities.contains(Capabilities::VIDEO) {
        board.video_mask_low();
        if res.osd.enabled {
            board.bw_levels_init().or_halt("video levels")?;
            board.video_init().or_halt("video")?;
        }
    }
    Ok(())
}

/// Bring the board up or never return
///
/// Entry point for the reset handler. A fault code ends in the blink loop,
/// any other failure in the generic halt.
pub fn board_init<B: Board, C: BootCounter>(
    board: &mut B,
    store: &mut ParameterStore,
    counter: &mut C,
    capabilities: Capabilities,
) -> BoardResources {
    match Bringup::new(board, store, counter, capabilities).run() {
        Ok(res) => res,
        Err(BootAbort::Fault(code)) => fault::signal(board, code),
        Err(BootAbort::Halt(stage)) => fault::halt(board, stage),
    }
}
