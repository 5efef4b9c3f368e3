//! Sensor driver entry points
//!
//! Probe, init and self-test for the IMU, barometers and the external
//! magnetometer. Driver internals (register maps, sample queues) are out of
//! scope; bring-up only sequences these calls and maps their outcome.

use brain_board_core::handle::BusHandle;
use brain_board_core::sensors::{AccelScale, GyroScale, MagOrientation};

use crate::platform::Result;

/// Sensor driver interface
pub trait SensorInterface {
    /// Initialize the sensor queue registry
    fn sensors_init(&mut self) -> Result<()>;

    /// ST LPS25H barometer
    fn lps25h_init(&mut self, bus: BusHandle) -> Result<()>;

    /// MEAS MS5611 barometer
    fn ms5611_init(&mut self, bus: BusHandle) -> Result<()>;

    /// MS5611 PROM CRC and conversion self-test
    fn ms5611_test(&mut self) -> Result<()>;

    /// Read WHO_AM_I and check for an MPU9250
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Sensor(SensorError::BadId)` if another part
    /// answers at `addr`.
    fn mpu9250_probe(&mut self, bus: BusHandle, addr: u8) -> Result<()>;

    /// Initialize the MPU9250
    ///
    /// With `use_internal_mag` the AK8963 inside the package is started too.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Sensor(SensorError::MissingIrq)` if the data
    /// ready interrupt never fires.
    fn mpu9250_init(&mut self, bus: BusHandle, addr: u8, use_internal_mag: bool) -> Result<()>;

    /// Initialize the MPU6050
    fn mpu6050_init(&mut self, bus: BusHandle, addr: u8) -> Result<()>;

    /// Set full-scale ranges on the initialized IMU
    fn imu_set_ranges(&mut self, gyro: GyroScale, accel: AccelScale);

    /// Honeywell HMC5883 magnetometer
    fn hmc5883_init(&mut self, bus: BusHandle) -> Result<()>;

    /// HMC5883 self-test using the internal bias current
    fn hmc5883_test(&mut self) -> Result<()>;

    /// Mounting orientation applied to HMC5883 samples
    fn hmc5883_set_orientation(&mut self, orientation: MagOrientation);
}
