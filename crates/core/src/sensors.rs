//! Sensor selections and bring-up results
//!
//! Settings store sensor choices as small enumerations. Drivers want their
//! own register-level codes. The translations live here as total matches so
//! that every settings value maps to exactly one driver value.

/// 7-bit I2C address of the MPU9250/MPU6050 with AD0 tied low
pub const MPU_I2C_ADDR_A0_LOW: u8 = 0x68;

/// Barometer fitted on the internal bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarometerType {
    /// No barometer
    None,
    /// ST LPS25H
    Lps25h,
    /// MEAS MS5611
    Ms5611,
}

impl BarometerType {
    /// Settings code
    pub fn code(self) -> i32 {
        match self {
            BarometerType::None => 0,
            BarometerType::Lps25h => 1,
            BarometerType::Ms5611 => 2,
        }
    }

    /// Decode a settings code
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(BarometerType::None),
            1 => Some(BarometerType::Lps25h),
            2 => Some(BarometerType::Ms5611),
            _ => None,
        }
    }
}

/// Magnetometer source selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagSource {
    /// Magnetometer inside the IMU package
    Internal,
    /// HMC5883 on the Flexi port I2C bus
    ExternalFlexiPort,
}

impl MagSource {
    /// Settings code
    pub fn code(self) -> i32 {
        match self {
            MagSource::Internal => 0,
            MagSource::ExternalFlexiPort => 1,
        }
    }

    /// Decode a settings code
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(MagSource::Internal),
            1 => Some(MagSource::ExternalFlexiPort),
            _ => None,
        }
    }
}

/// Mounting of the external magnetometer, as stored in settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtMagOrientation {
    Top0DegCw,
    Top90DegCw,
    Top180DegCw,
    Top270DegCw,
    Bottom0DegCw,
    Bottom90DegCw,
    Bottom180DegCw,
    Bottom270DegCw,
}

impl ExtMagOrientation {
    const ALL: [ExtMagOrientation; 8] = [
        ExtMagOrientation::Top0DegCw,
        ExtMagOrientation::Top90DegCw,
        ExtMagOrientation::Top180DegCw,
        ExtMagOrientation::Top270DegCw,
        ExtMagOrientation::Bottom0DegCw,
        ExtMagOrientation::Bottom90DegCw,
        ExtMagOrientation::Bottom180DegCw,
        ExtMagOrientation::Bottom270DegCw,
    ];

    /// Settings code
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Decode a settings code
    pub fn from_code(code: i32) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }
}

/// HMC5883 driver orientation code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MagOrientation {
    Top0Deg = 0,
    Top90Deg = 1,
    Top180Deg = 2,
    Top270Deg = 3,
    Bottom0Deg = 4,
    Bottom90Deg = 5,
    Bottom180Deg = 6,
    Bottom270Deg = 7,
}

impl From<ExtMagOrientation> for MagOrientation {
    fn from(o: ExtMagOrientation) -> Self {
        match o {
            ExtMagOrientation::Top0DegCw => MagOrientation::Top0Deg,
            ExtMagOrientation::Top90DegCw => MagOrientation::Top90Deg,
            ExtMagOrientation::Top180DegCw => MagOrientation::Top180Deg,
            ExtMagOrientation::Top270DegCw => MagOrientation::Top270Deg,
            ExtMagOrientation::Bottom0DegCw => MagOrientation::Bottom0Deg,
            ExtMagOrientation::Bottom90DegCw => MagOrientation::Bottom90Deg,
            ExtMagOrientation::Bottom180DegCw => MagOrientation::Bottom180Deg,
            ExtMagOrientation::Bottom270DegCw => MagOrientation::Bottom270Deg,
        }
    }
}

/// Gyro full-scale range, as stored in settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GyroRange {
    Dps250,
    Dps500,
    Dps1000,
    Dps2000,
}

impl GyroRange {
    /// Settings code
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Decode a settings code
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(GyroRange::Dps250),
            1 => Some(GyroRange::Dps500),
            2 => Some(GyroRange::Dps1000),
            3 => Some(GyroRange::Dps2000),
            _ => None,
        }
    }
}

/// MPU60x0-family GYRO_CONFIG FS_SEL value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum GyroScale {
    Deg250 = 0x00,
    Deg500 = 0x08,
    Deg1000 = 0x10,
    Deg2000 = 0x18,
}

impl From<GyroRange> for GyroScale {
    fn from(r: GyroRange) -> Self {
        match r {
            GyroRange::Dps250 => GyroScale::Deg250,
            GyroRange::Dps500 => GyroScale::Deg500,
            GyroRange::Dps1000 => GyroScale::Deg1000,
            GyroRange::Dps2000 => GyroScale::Deg2000,
        }
    }
}

/// Accelerometer full-scale range, as stored in settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccelRange {
    G2,
    G4,
    G8,
    G16,
}

impl AccelRange {
    /// Settings code
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Decode a settings code
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(AccelRange::G2),
            1 => Some(AccelRange::G4),
            2 => Some(AccelRange::G8),
            3 => Some(AccelRange::G16),
            _ => None,
        }
    }
}

/// MPU60x0-family ACCEL_CONFIG AFS_SEL value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AccelScale {
    G2 = 0x00,
    G4 = 0x08,
    G8 = 0x10,
    G16 = 0x18,
}

impl From<AccelRange> for AccelScale {
    fn from(r: AccelRange) -> Self {
        match r {
            AccelRange::G2 => AccelScale::G2,
            AccelRange::G4 => AccelScale::G4,
            AccelRange::G8 => AccelScale::G8,
            AccelRange::G16 => AccelScale::G16,
        }
    }
}

/// IMU part found on the internal bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImuVariant {
    Mpu9250,
    Mpu6050,
}

/// Outcome of bringing up one sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SensorStatus {
    /// Not configured or not built in
    #[default]
    NotPresent,
    /// Configured but did not come up
    InitFailed,
    /// Initialized and self-tested where a self-test exists
    InitOk,
}

/// Bring-up outcome of all sensors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorReport {
    /// IMU status
    pub imu: SensorStatus,
    /// Which IMU answered
    pub imu_variant: Option<ImuVariant>,
    /// External magnetometer status
    pub external_mag: SensorStatus,
    /// Barometer status
    pub barometer: SensorStatus,
    /// Internal magnetometer stays in use
    pub use_internal_mag: bool,
    /// External magnetometer was configured but failed; raised as an alarm later
    pub external_mag_failed: bool,
}

impl Default for SensorReport {
    fn default() -> Self {
        Self {
            imu: SensorStatus::NotPresent,
            imu_variant: None,
            external_mag: SensorStatus::NotPresent,
            barometer: SensorStatus::NotPresent,
            use_internal_mag: true,
            external_mag_failed: false,
        }
    }
}
