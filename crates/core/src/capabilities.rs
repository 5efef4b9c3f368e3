//! Compiled-in driver capabilities
//!
//! The board firmware is built with a fixed set of drivers. Each flag below
//! says whether one driver (or one optional feature) is present in the build.
//! A port function whose driver is absent is skipped at dispatch time and the
//! port is left unbound.

use bitflags::bitflags;

bitflags! {
    /// Driver capability flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u64 {
        /// Heartbeat LED
        const LED = 1 << 0;
        /// I2C buses (internal sensor bus and Flexi port)
        const I2C = 1 << 1;
        /// SPI bus for the external flash
        const SPI = 1 << 2;
        /// Internal + external flash and the settings filesystems
        const FLASH = 1 << 3;
        /// Real-time clock tick
        const RTC = 1 << 4;
        /// USB core
        const USB = 1 << 5;
        /// USB CDC (virtual COM port) class
        const USB_CDC = 1 << 6;
        /// USB HID class
        const USB_HID = 1 << 7;
        /// GPS stream
        const GPS = 1 << 8;
        /// RF telemetry stream
        const TELEMETRY_RF = 1 << 9;
        /// Debug console stream
        const DEBUG_CONSOLE = 1 << 10;
        /// MAVLink transmit stream
        const MAVLINK = 1 << 11;
        /// HoTT telemetry stream
        const HOTT = 1 << 12;
        /// FrSky sensor hub stream
        const FRSKY_SENSOR_HUB = 1 << 13;
        /// Light telemetry stream
        const LIGHT_TELEMETRY = 1 << 14;
        /// PicoC interpreter stream
        const PICOC = 1 << 15;
        /// Futaba S.Bus decoder
        const SBUS = 1 << 16;
        /// Spektrum DSM decoder
        const DSM = 1 << 17;
        /// Graupner HoTT SUMD/SUMH decoder
        const HSUM = 1 << 18;
        /// PWM receiver input
        const PWM = 1 << 19;
        /// PPM receiver input
        const PPM = 1 << 20;
        /// Ground-station virtual receiver
        const GCS_RCVR = 1 << 21;
        /// Servo outputs
        const SERVO = 1 << 22;
        /// Servo timer channels used as debug pins instead of outputs
        const DEBUG_PINS = 1 << 23;
        /// Generic GPIO driver
        const GPIO = 1 << 24;
        /// HMC5883 external magnetometer
        const HMC5883 = 1 << 25;
        /// MS5611 barometer
        const MS5611 = 1 << 26;
        /// LPS25H barometer
        const LPS25H = 1 << 27;
        /// MPU9250 IMU
        const MPU9250 = 1 << 28;
        /// MPU6050 IMU (enables auto-probing together with MPU9250)
        const MPU6050 = 1 << 29;
        /// Internal ADC
        const ADC = 1 << 30;
        /// Video overlay (OSD)
        const VIDEO = 1 << 31;
        /// Stuck-line check on the Flexi I2C bus
        const AUX_BUS_CHECK = 1 << 32;
    }
}

impl Capabilities {
    /// Capabilities of the stock Brain firmware build
    pub const BRAIN: Self = Self::LED
        .union(Self::I2C)
        .union(Self::SPI)
        .union(Self::FLASH)
        .union(Self::RTC)
        .union(Self::USB)
        .union(Self::USB_CDC)
        .union(Self::USB_HID)
        .union(Self::GPS)
        .union(Self::TELEMETRY_RF)
        .union(Self::DEBUG_CONSOLE)
        .union(Self::MAVLINK)
        .union(Self::HOTT)
        .union(Self::FRSKY_SENSOR_HUB)
        .union(Self::LIGHT_TELEMETRY)
        .union(Self::PICOC)
        .union(Self::SBUS)
        .union(Self::DSM)
        .union(Self::HSUM)
        .union(Self::PWM)
        .union(Self::PPM)
        .union(Self::GCS_RCVR)
        .union(Self::SERVO)
        .union(Self::GPIO)
        .union(Self::HMC5883)
        .union(Self::MS5611)
        .union(Self::LPS25H)
        .union(Self::MPU9250)
        .union(Self::ADC)
        .union(Self::VIDEO);

    /// True when both IMU variants are built in and must be told apart by probing
    pub fn imu_autoprobe(self) -> bool {
        self.contains(Self::MPU9250 | Self::MPU6050)
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::BRAIN
    }
}
