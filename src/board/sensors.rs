//! Sensor bring-up
//!
//! Barometer and IMU failures are fatal and blink a sensor-specific code.
//! The external magnetometer falls back to the internal one instead.

use brain_board_core::handle::BusHandle;
use brain_board_core::sensors::{
    BarometerType, ImuVariant, MagSource, SensorStatus, MPU_I2C_ADDR_A0_LOW,
};
use brain_board_core::{Capabilities, FaultCode};

use super::abort::BootAbort;
use super::resources::BoardResources;
use crate::platform::error::{PlatformError, SensorError};
use crate::platform::traits::Board;

/// Stuck-bus checks before giving up
pub const BUS_CLEAR_ATTEMPTS: u32 = 3;

/// Delay between stuck-bus checks (ms)
const BUS_CLEAR_RETRY_MS: u32 = 1;

/// Wait for a slave to release SDA, failing with `code` after
/// [`BUS_CLEAR_ATTEMPTS`] checks
pub fn wait_bus_clear<B: Board>(
    board: &mut B,
    bus: BusHandle,
    code: FaultCode,
) -> Result<(), BootAbort> {
    for attempt in 1..=BUS_CLEAR_ATTEMPTS {
        board.watchdog_clear();
        if board.i2c_check_clear(bus).is_ok() {
            return Ok(());
        }
        crate::log_warn!("I2C bus {} stuck (check {})", bus.0, attempt);
        if attempt < BUS_CLEAR_ATTEMPTS {
            board.delay_ms(BUS_CLEAR_RETRY_MS);
        }
    }
    Err(BootAbort::Fault(code))
}

/// Configured barometer on the internal bus
pub fn bring_up_barometer<B: Board>(
    board: &mut B,
    res: &mut BoardResources,
) -> Result<(), BootAbort> {
    let Some(bus) = res.internal_i2c else {
        crate::log_debug!("barometer skipped: no internal bus");
        return Ok(());
    };

    let caps = res.capabilities;
    let (result, code, part) = match res.config.barometer {
        BarometerType::None => return Ok(()),
        BarometerType::Lps25h if caps.contains(Capabilities::LPS25H) => {
            (board.lps25h_init(bus), FaultCode::Lps25h, "LPS25H")
        }
        BarometerType::Ms5611 if caps.contains(Capabilities::MS5611) => (
            board.ms5611_init(bus).and_then(|()| board.ms5611_test()),
            FaultCode::Ms5611,
            "MS5611",
        ),
        _ => {
            crate::log_debug!("barometer driver not built in");
            return Ok(());
        }
    };

    if result.is_err() {
        res.sensors.barometer = SensorStatus::InitFailed;
        return Err(BootAbort::Fault(code));
    }
    res.sensors.barometer = SensorStatus::InitOk;
    crate::log_info!("{} barometer up", part);
    Ok(())
}

fn imu_variant<B: Board>(board: &mut B, caps: Capabilities, bus: BusHandle) -> Option<ImuVariant> {
    if caps.imu_autoprobe() {
        return match board.mpu9250_probe(bus, MPU_I2C_ADDR_A0_LOW) {
            Ok(()) => Some(ImuVariant::Mpu9250),
            Err(_) => Some(ImuVariant::Mpu6050),
        };
    }
    if caps.contains(Capabilities::MPU9250) {
        Some(ImuVariant::Mpu9250)
    } else if caps.contains(Capabilities::MPU6050) {
        Some(ImuVariant::Mpu6050)
    } else {
        None
    }
}

/// IMU on the internal bus, with the configured full-scale ranges
///
/// A missing data-ready interrupt blinks code 1, any other IMU failure
/// code 2.
pub fn bring_up_imu<B: Board>(board: &mut B, res: &mut BoardResources) -> Result<(), BootAbort> {
    let Some(bus) = res.internal_i2c else {
        crate::log_debug!("IMU skipped: no internal bus");
        return Ok(());
    };
    let Some(variant) = imu_variant(board, res.capabilities, bus) else {
        crate::log_debug!("IMU driver not built in");
        return Ok(());
    };

    let result = match variant {
        ImuVariant::Mpu9250 => {
            board.mpu9250_init(bus, MPU_I2C_ADDR_A0_LOW, res.sensors.use_internal_mag)
        }
        ImuVariant::Mpu6050 => board.mpu6050_init(bus, MPU_I2C_ADDR_A0_LOW),
    };
    match result {
        Ok(()) => {}
        Err(PlatformError::Sensor(SensorError::MissingIrq)) => {
            res.sensors.imu = SensorStatus::InitFailed;
            return Err(BootAbort::Fault(FaultCode::FlashOrImuIrq));
        }
        Err(_) => {
            res.sensors.imu = SensorStatus::InitFailed;
            return Err(BootAbort::Fault(FaultCode::Imu));
        }
    }

    board.imu_set_ranges(res.config.gyro_range.into(), res.config.accel_range.into());
    res.sensors.imu = SensorStatus::InitOk;
    res.sensors.imu_variant = Some(variant);
    let part = match variant {
        ImuVariant::Mpu9250 => "MPU9250",
        ImuVariant::Mpu6050 => "MPU6050",
    };
    crate::log_info!("IMU up ({})", part);
    Ok(())
}

/// External magnetometer on the Flexi-port bus
///
/// Runs only when the configuration selects the external magnetometer. On
/// success the internal magnetometer is switched off; on failure it stays in
/// use and `external_mag_failed` is set.
pub fn bring_up_external_mag<B: Board>(board: &mut B, res: &mut BoardResources, bus: BusHandle) {
    if res.config.magnetometer != MagSource::ExternalFlexiPort {
        return;
    }
    if !res.capabilities.contains(Capabilities::HMC5883) {
        crate::log_debug!("external magnetometer driver not built in");
        return;
    }

    let up = board.hmc5883_init(bus).is_ok() && board.hmc5883_test().is_ok();
    if up {
        board.hmc5883_set_orientation(res.config.ext_mag_orientation.into());
        res.sensors.external_mag = SensorStatus::InitOk;
        res.sensors.use_internal_mag = false;
        crate::log_info!("external HMC5883 up");
    } else {
        res.sensors.external_mag = SensorStatus::InitFailed;
        res.sensors.external_mag_failed = true;
        crate::log_warn!("external HMC5883 failed, keeping internal magnetometer");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{Event, Fail, MockBoard};
    use crate::platform::traits::{BusInterface, I2cBus};
    use brain_board_core::parameters::HardwareConfiguration;
    use brain_board_core::sensors::{
        AccelRange, AccelScale, ExtMagOrientation, GyroRange, GyroScale, MagOrientation,
    };

    fn setup(config: HardwareConfiguration, caps: Capabilities) -> (MockBoard, BoardResources) {
        let mut board = MockBoard::new();
        let mut res = BoardResources::new(config, caps);
        res.internal_i2c = Some(board.i2c_init(I2cBus::Internal).unwrap());
        board.clear_events();
        (board, res)
    }

    fn external_mag_config() -> HardwareConfiguration {
        HardwareConfiguration {
            magnetometer: MagSource::ExternalFlexiPort,
            ext_mag_orientation: ExtMagOrientation::Bottom90DegCw,
            ..HardwareConfiguration::default()
        }
    }

    #[test]
    fn test_bus_clears_within_attempts() {
        let (mut board, res) = setup(HardwareConfiguration::default(), Capabilities::BRAIN);
        let bus = res.internal_i2c.unwrap();
        board.set_bus_stuck(I2cBus::Internal, BUS_CLEAR_ATTEMPTS - 1);
        assert_eq!(wait_bus_clear(&mut board, bus, FaultCode::GyroBusStuck), Ok(()));
        assert_eq!(
            board.count(|e| *e == Event::I2cCheckClear(I2cBus::Internal)),
            BUS_CLEAR_ATTEMPTS as usize
        );
    }

    #[test]
    fn test_stuck_bus_is_bounded() {
        let (mut board, res) = setup(HardwareConfiguration::default(), Capabilities::BRAIN);
        let bus = res.internal_i2c.unwrap();
        board.set_bus_stuck(I2cBus::Internal, u32::MAX);
        assert_eq!(
            wait_bus_clear(&mut board, bus, FaultCode::GyroBusStuck),
            Err(BootAbort::Fault(FaultCode::GyroBusStuck))
        );
        assert_eq!(
            board.count(|e| *e == Event::I2cCheckClear(I2cBus::Internal)),
            BUS_CLEAR_ATTEMPTS as usize
        );
        assert_eq!(
            board.count(|e| *e == Event::WatchdogClear),
            BUS_CLEAR_ATTEMPTS as usize
        );
    }

    #[test]
    fn test_ms5611_failures_blink_four() {
        for step in [Fail::MS5611_INIT, Fail::MS5611_TEST] {
            let (mut board, mut res) =
                setup(HardwareConfiguration::default(), Capabilities::BRAIN);
            board.fail_on(step);
            assert_eq!(
                bring_up_barometer(&mut board, &mut res),
                Err(BootAbort::Fault(FaultCode::Ms5611))
            );
            assert_eq!(res.sensors.barometer, SensorStatus::InitFailed);
        }
    }

    #[test]
    fn test_lps25h_failure_blinks_five() {
        let config = HardwareConfiguration {
            barometer: BarometerType::Lps25h,
            ..HardwareConfiguration::default()
        };
        let (mut board, mut res) = setup(config, Capabilities::BRAIN);
        board.fail_on(Fail::LPS25H);
        assert_eq!(
            bring_up_barometer(&mut board, &mut res),
            Err(BootAbort::Fault(FaultCode::Lps25h))
        );
        assert_eq!(res.sensors.barometer, SensorStatus::InitFailed);
        assert!(!board.has(Event::Ms5611Init));
    }

    #[test]
    fn test_no_barometer() {
        let config = HardwareConfiguration {
            barometer: BarometerType::None,
            ..HardwareConfiguration::default()
        };
        let (mut board, mut res) = setup(config, Capabilities::BRAIN);
        bring_up_barometer(&mut board, &mut res).unwrap();
        assert!(board.events().is_empty());
        assert_eq!(res.sensors.barometer, SensorStatus::NotPresent);
    }

    #[test]
    fn test_imu_ranges_applied() {
        let config = HardwareConfiguration {
            gyro_range: GyroRange::Dps2000,
            accel_range: AccelRange::G16,
            ..HardwareConfiguration::default()
        };
        let (mut board, mut res) = setup(config, Capabilities::BRAIN);
        bring_up_imu(&mut board, &mut res).unwrap();
        assert_eq!(
            board.events(),
            &[
                Event::Mpu9250Init {
                    use_internal_mag: true
                },
                Event::ImuRanges(GyroScale::Deg2000, AccelScale::G16),
            ]
        );
        assert_eq!(res.sensors.imu, SensorStatus::InitOk);
        assert_eq!(res.sensors.imu_variant, Some(ImuVariant::Mpu9250));
    }

    #[test]
    fn test_imu_missing_irq_blinks_one() {
        let (mut board, mut res) = setup(HardwareConfiguration::default(), Capabilities::BRAIN);
        board.fail_on(Fail::MPU9250_IRQ);
        assert_eq!(
            bring_up_imu(&mut board, &mut res),
            Err(BootAbort::Fault(FaultCode::FlashOrImuIrq))
        );
        assert_eq!(res.sensors.imu, SensorStatus::InitFailed);
    }

    #[test]
    fn test_imu_failure_blinks_two() {
        let (mut board, mut res) = setup(HardwareConfiguration::default(), Capabilities::BRAIN);
        board.fail_on(Fail::MPU9250_INIT);
        assert_eq!(
            bring_up_imu(&mut board, &mut res),
            Err(BootAbort::Fault(FaultCode::Imu))
        );
        assert!(!board.has(Event::ImuRanges(GyroScale::Deg500, AccelScale::G8)));
    }

    #[test]
    fn test_imu_autoprobe_falls_back_to_mpu6050() {
        let caps = Capabilities::BRAIN | Capabilities::MPU6050;
        let (mut board, mut res) = setup(HardwareConfiguration::default(), caps);
        board.fail_on(Fail::MPU9250_PROBE);
        bring_up_imu(&mut board, &mut res).unwrap();
        assert_eq!(res.sensors.imu_variant, Some(ImuVariant::Mpu6050));
        assert!(board.has(Event::Mpu9250Probe));
        assert!(board.has(Event::Mpu6050Init));
        assert!(board.has(Event::ImuRanges(GyroScale::Deg500, AccelScale::G8)));
    }

    #[test]
    fn test_no_probe_with_one_variant() {
        let (mut board, mut res) = setup(HardwareConfiguration::default(), Capabilities::BRAIN);
        bring_up_imu(&mut board, &mut res).unwrap();
        assert!(!board.has(Event::Mpu9250Probe));
    }

    #[test]
    fn test_external_mag_success() {
        let (mut board, mut res) = setup(external_mag_config(), Capabilities::BRAIN);
        let bus = board.i2c_init(I2cBus::Flexi).unwrap();
        bring_up_external_mag(&mut board, &mut res, bus);

        assert!(board.has(Event::Hmc5883Init(bus)));
        assert!(board.has(Event::Hmc5883Orientation(MagOrientation::Bottom90Deg)));
        assert_eq!(res.sensors.external_mag, SensorStatus::InitOk);
        assert!(!res.sensors.use_internal_mag);
        assert!(!res.sensors.external_mag_failed);

        // the IMU is told to leave its own magnetometer off
        bring_up_imu(&mut board, &mut res).unwrap();
        assert!(board.has(Event::Mpu9250Init {
            use_internal_mag: false
        }));
    }

    #[test]
    fn test_external_mag_self_test_failure_falls_back() {
        let (mut board, mut res) = setup(external_mag_config(), Capabilities::BRAIN);
        let bus = board.i2c_init(I2cBus::Flexi).unwrap();
        board.fail_on(Fail::HMC5883_TEST);
        bring_up_external_mag(&mut board, &mut res, bus);

        assert_eq!(res.sensors.external_mag, SensorStatus::InitFailed);
        assert!(res.sensors.use_internal_mag);
        assert!(res.sensors.external_mag_failed);
        assert!(!board.has(Event::Hmc5883Orientation(MagOrientation::Bottom90Deg)));
    }

    #[test]
    fn test_internal_mag_selected_skips_external() {
        let (mut board, mut res) = setup(HardwareConfiguration::default(), Capabilities::BRAIN);
        let bus = board.i2c_init(I2cBus::Flexi).unwrap();
        board.clear_events();
        bring_up_external_mag(&mut board, &mut res, bus);
        assert!(board.events().is_empty());
        assert_eq!(res.sensors.external_mag, SensorStatus::NotPresent);
    }
}
