//! Bring-up context
//!
//! Everything bring-up produces lives in one value. The orchestrator threads
//! it through every stage mutably, then hands it to the running system.

use brain_board_core::alarms::AlarmSeverity;
use brain_board_core::handle::BusHandle;
use brain_board_core::parameters::{HardwareConfiguration, ModuleParams, OsdParams};
use brain_board_core::ports::{ChannelPurpose, ChannelTable, CommunicationChannel, ReceiverGroupMap};
use brain_board_core::sensors::SensorReport;
use brain_board_core::Capabilities;

use super::allocator::BufferPool;
use crate::platform::traits::UsbDescriptor;

/// Resources populated by bring-up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardResources {
    /// Hardware configuration snapshot used for this boot
    pub config: HardwareConfiguration,
    /// Module admin states
    pub modules: ModuleParams,
    /// Video overlay settings
    pub osd: OsdParams,
    /// Drivers compiled into this build
    pub capabilities: Capabilities,
    /// Stream channels and the purposes bound to them
    pub channels: ChannelTable,
    /// Receiver handles per channel group
    pub receivers: ReceiverGroupMap,
    /// Sensor bring-up outcome
    pub sensors: SensorReport,
    /// Boot-fault alarm
    pub boot_fault: AlarmSeverity,
    /// USB descriptor set, if USB was brought up
    pub usb_descriptor: Option<UsbDescriptor>,
    /// Internal (IMU) I2C bus
    pub internal_i2c: Option<BusHandle>,
    /// Flexi-port I2C bus, when the Flexi port carries I2C
    pub aux_i2c: Option<BusHandle>,
    /// Channel buffer pool
    pub pool: BufferPool,
}

impl BoardResources {
    /// Empty context for a configuration
    pub fn new(config: HardwareConfiguration, capabilities: Capabilities) -> Self {
        Self {
            config,
            modules: ModuleParams::default(),
            osd: OsdParams::default(),
            capabilities,
            channels: ChannelTable::new(),
            receivers: ReceiverGroupMap::new(),
            sensors: SensorReport::default(),
            boot_fault: AlarmSeverity::Uninitialised,
            usb_descriptor: None,
            internal_i2c: None,
            aux_i2c: None,
            pool: BufferPool::default(),
        }
    }

    /// Channel bound to a purpose
    pub fn channel(&self, purpose: ChannelPurpose) -> Option<&CommunicationChannel> {
        self.channels.get(purpose)
    }

    /// A telemetry link (RF or USB) exists
    pub fn has_telemetry(&self) -> bool {
        self.channels.has_telemetry()
    }

    /// External magnetometer was configured but did not come up
    pub fn external_mag_failed(&self) -> bool {
        self.sensors.external_mag_failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context_is_empty() {
        let res = BoardResources::new(HardwareConfiguration::default(), Capabilities::BRAIN);
        assert!(res.channels.is_empty());
        assert!(!res.has_telemetry());
        assert_eq!(res.receivers.bound().count(), 0);
        assert_eq!(res.boot_fault, AlarmSeverity::Uninitialised);
        assert!(res.sensors.use_internal_mag);
        assert!(!res.external_mag_failed());
        assert_eq!(res.pool.used(), 0);
    }
}
