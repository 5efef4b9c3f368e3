//! Hardware configuration parameters
//!
//! One snapshot of the board's port and sensor choices, read once at boot.
//! Changes take effect on the next boot.
//!
//! # Parameters
//!
//! - `HW_MAINPORT` - Main port function
//! - `HW_FLXPORT` - Flexi port function
//! - `HW_RXPORT` - Receiver port mode
//! - `HW_RXPORTUSART` - Function of the receiver port UART
//! - `HW_USB_VCPPORT` - USB virtual COM port function
//! - `HW_USB_HIDPORT` - USB HID function
//! - `HW_DSMXBIND` - DSMx bind pulses sent at power-up (0 = none)
//! - `HW_GYRO_RANGE` - Gyro full scale
//! - `HW_ACCEL_RANGE` - Accelerometer full scale
//! - `HW_MAG` - Magnetometer source
//! - `HW_EXTMAG_ORIENT` - External magnetometer mounting
//! - `HW_BARO` - Barometer fitted
//!
//! Every value is stored as the integer code of its enumeration. A missing
//! value, a value of the wrong type, an unknown code, or a port function the
//! role cannot carry decodes to the compiled-in default; [`HardwareConfiguration::decode`]
//! reports which names were substituted.

use heapless::Vec;

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};
use crate::ports::{PortFunction, PortRole, PortTable, RxPortMode, UsbHidFunction, UsbVcpFunction};
use crate::sensors::{AccelRange, BarometerType, ExtMagOrientation, GyroRange, MagSource};

pub const HW_MAINPORT: &str = "HW_MAINPORT";
pub const HW_FLXPORT: &str = "HW_FLXPORT";
pub const HW_RXPORT: &str = "HW_RXPORT";
pub const HW_RXPORTUSART: &str = "HW_RXPORTUSART";
pub const HW_USB_VCPPORT: &str = "HW_USB_VCPPORT";
pub const HW_USB_HIDPORT: &str = "HW_USB_HIDPORT";
pub const HW_DSMXBIND: &str = "HW_DSMXBIND";
pub const HW_GYRO_RANGE: &str = "HW_GYRO_RANGE";
pub const HW_ACCEL_RANGE: &str = "HW_ACCEL_RANGE";
pub const HW_MAG: &str = "HW_MAG";
pub const HW_EXTMAG_ORIENT: &str = "HW_EXTMAG_ORIENT";
pub const HW_BARO: &str = "HW_BARO";

/// Every hardware configuration parameter name
pub const HW_PARAM_NAMES: [&str; 12] = [
    HW_MAINPORT,
    HW_FLXPORT,
    HW_RXPORT,
    HW_RXPORTUSART,
    HW_USB_VCPPORT,
    HW_USB_HIDPORT,
    HW_DSMXBIND,
    HW_GYRO_RANGE,
    HW_ACCEL_RANGE,
    HW_MAG,
    HW_EXTMAG_ORIENT,
    HW_BARO,
];

/// Names whose stored value was replaced by the default during decode
pub type Substitutions = Vec<&'static str, 12>;

/// Hardware configuration snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HardwareConfiguration {
    pub main_port: PortFunction,
    pub flexi_port: PortFunction,
    pub rx_port: RxPortMode,
    pub rx_port_usart: PortFunction,
    pub usb_vcp_port: UsbVcpFunction,
    pub usb_hid_port: UsbHidFunction,
    pub dsmx_bind: u8,
    pub gyro_range: GyroRange,
    pub accel_range: AccelRange,
    pub magnetometer: MagSource,
    pub ext_mag_orientation: ExtMagOrientation,
    pub barometer: BarometerType,
}

impl Default for HardwareConfiguration {
    fn default() -> Self {
        Self {
            main_port: PortFunction::Telemetry,
            flexi_port: PortFunction::Gps,
            rx_port: RxPortMode::Pwm,
            rx_port_usart: PortFunction::Disabled,
            usb_vcp_port: UsbVcpFunction::UsbTelemetry,
            usb_hid_port: UsbHidFunction::UsbTelemetry,
            dsmx_bind: 0,
            gyro_range: GyroRange::Dps500,
            accel_range: AccelRange::G8,
            magnetometer: MagSource::Internal,
            ext_mag_orientation: ExtMagOrientation::Top0DegCw,
            barometer: BarometerType::Ms5611,
        }
    }
}

struct Decoder<'a> {
    store: &'a ParameterStore,
    substituted: Substitutions,
}

impl Decoder<'_> {
    fn field<T>(&mut self, name: &'static str, decode: impl Fn(i32) -> Option<T>, default: T) -> T {
        let decoded = match self.store.get(name) {
            Some(ParamValue::Int(v)) => decode(*v),
            _ => None,
        };
        decoded.unwrap_or_else(|| {
            self.substituted.push(name).ok();
            default
        })
    }

    fn port(&mut self, name: &'static str, role: PortRole, default: PortFunction) -> PortFunction {
        let table = PortTable::for_role(role);
        self.field(
            name,
            |code| PortFunction::from_code(code).filter(|f| table.supports(*f)),
            default,
        )
    }
}

impl HardwareConfiguration {
    /// Register hardware configuration parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        for (name, value) in Self::default().values() {
            store.register(name, value, ParamFlags::empty())?;
        }
        Ok(())
    }

    fn values(&self) -> [(&'static str, ParamValue); 12] {
        let int = ParamValue::Int;
        [
            (HW_MAINPORT, int(self.main_port.code())),
            (HW_FLXPORT, int(self.flexi_port.code())),
            (HW_RXPORT, int(self.rx_port.code())),
            (HW_RXPORTUSART, int(self.rx_port_usart.code())),
            (HW_USB_VCPPORT, int(self.usb_vcp_port.code())),
            (HW_USB_HIDPORT, int(self.usb_hid_port.code())),
            (HW_DSMXBIND, int(i32::from(self.dsmx_bind))),
            (HW_GYRO_RANGE, int(self.gyro_range.code())),
            (HW_ACCEL_RANGE, int(self.accel_range.code())),
            (HW_MAG, int(self.magnetometer.code())),
            (HW_EXTMAG_ORIENT, int(self.ext_mag_orientation.code())),
            (HW_BARO, int(self.barometer.code())),
        ]
    }

    /// Load the snapshot from the parameter store, substituting defaults
    pub fn from_store(store: &ParameterStore) -> Self {
        Self::decode(store).0
    }

    /// Load the snapshot and report which parameters fell back to defaults
    pub fn decode(store: &ParameterStore) -> (Self, Substitutions) {
        let d = Self::default();
        let mut dec = Decoder {
            store,
            substituted: Vec::new(),
        };

        let config = Self {
            main_port: dec.port(HW_MAINPORT, PortRole::Main, d.main_port),
            flexi_port: dec.port(HW_FLXPORT, PortRole::Flexi, d.flexi_port),
            rx_port: dec.field(HW_RXPORT, RxPortMode::from_code, d.rx_port),
            rx_port_usart: dec.port(HW_RXPORTUSART, PortRole::RxPortUsart, d.rx_port_usart),
            usb_vcp_port: dec.field(HW_USB_VCPPORT, UsbVcpFunction::from_code, d.usb_vcp_port),
            usb_hid_port: dec.field(HW_USB_HIDPORT, UsbHidFunction::from_code, d.usb_hid_port),
            dsmx_bind: dec.field(HW_DSMXBIND, |v| u8::try_from(v).ok(), d.dsmx_bind),
            gyro_range: dec.field(HW_GYRO_RANGE, GyroRange::from_code, d.gyro_range),
            accel_range: dec.field(HW_ACCEL_RANGE, AccelRange::from_code, d.accel_range),
            magnetometer: dec.field(HW_MAG, MagSource::from_code, d.magnetometer),
            ext_mag_orientation: dec.field(
                HW_EXTMAG_ORIENT,
                ExtMagOrientation::from_code,
                d.ext_mag_orientation,
            ),
            barometer: dec.field(HW_BARO, BarometerType::from_code, d.barometer),
        };

        (config, dec.substituted)
    }

    /// Write this snapshot into the store
    pub fn save(&self, store: &mut ParameterStore) -> Result<(), ParameterError> {
        for (name, value) in self.values() {
            store.set(name, value)?;
        }
        Ok(())
    }

    /// Put every hardware configuration parameter back to its default
    pub fn reset_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        for name in HW_PARAM_NAMES {
            store.reset(name)?;
        }
        Ok(())
    }

    /// Serial function configured on a role
    ///
    /// `RxPort` carries an [`RxPortMode`] rather than a function and always
    /// reports `Disabled` here. `RxPortUsart` reports `Disabled` unless the
    /// receiver port mode enables its UART.
    pub fn function_for(&self, role: PortRole) -> PortFunction {
        match role {
            PortRole::Main => self.main_port,
            PortRole::Flexi => self.flexi_port,
            PortRole::RxPort => PortFunction::Disabled,
            PortRole::RxPortUsart if self.rx_port.enables_usart() => self.rx_port_usart,
            PortRole::RxPortUsart => PortFunction::Disabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::DsmProtocol;

    fn store() -> ParameterStore {
        let mut store = ParameterStore::new();
        HardwareConfiguration::register_defaults(&mut store).unwrap();
        store
    }

    #[test]
    fn test_defaults_round_through_store() {
        let store = store();
        let (config, substituted) = HardwareConfiguration::decode(&store);
        assert_eq!(config, HardwareConfiguration::default());
        assert!(substituted.is_empty());
    }

    #[test]
    fn test_custom_values() {
        let mut store = store();
        store.set(HW_MAINPORT, ParamValue::Int(2)).unwrap();
        store.set(HW_FLXPORT, ParamValue::Int(1)).unwrap();
        store.set(HW_RXPORTUSART, ParamValue::Int(6)).unwrap();
        store.set(HW_DSMXBIND, ParamValue::Int(9)).unwrap();

        let config = HardwareConfiguration::from_store(&store);
        assert_eq!(config.main_port, PortFunction::Gps);
        assert_eq!(config.flexi_port, PortFunction::Telemetry);
        assert_eq!(config.rx_port_usart, PortFunction::Dsm(DsmProtocol::Dsmx11Bit));
        assert_eq!(config.dsmx_bind, 9);
    }

    #[test]
    fn test_unknown_code_falls_back() {
        let mut store = store();
        store.set(HW_BARO, ParamValue::Int(42)).unwrap();
        store.set(HW_GYRO_RANGE, ParamValue::Float(1.0)).unwrap();

        let (config, substituted) = HardwareConfiguration::decode(&store);
        assert_eq!(config.barometer, BarometerType::Ms5611);
        assert_eq!(config.gyro_range, GyroRange::Dps500);
        assert_eq!(substituted.as_slice(), &[HW_GYRO_RANGE, HW_BARO]);
    }

    #[test]
    fn test_function_unsupported_by_role_falls_back() {
        let mut store = store();
        // S.Bus needs the main port inverter
        store.set(HW_FLXPORT, ParamValue::Int(PortFunction::SBus.code())).unwrap();
        // The auxiliary I2C bus is only on the flexi port
        store.set(HW_MAINPORT, ParamValue::Int(PortFunction::I2c.code())).unwrap();

        let (config, substituted) = HardwareConfiguration::decode(&store);
        assert_eq!(config.flexi_port, PortFunction::Gps);
        assert_eq!(config.main_port, PortFunction::Telemetry);
        assert_eq!(substituted.len(), 2);
    }

    #[test]
    fn test_missing_store_uses_defaults() {
        let store = ParameterStore::new();
        let (config, substituted) = HardwareConfiguration::decode(&store);
        assert_eq!(config, HardwareConfiguration::default());
        assert_eq!(substituted.len(), HW_PARAM_NAMES.len());
    }

    #[test]
    fn test_every_wrong_type_is_reported() {
        let mut store = store();
        for name in HW_PARAM_NAMES {
            store.set(name, ParamValue::Bool(true)).unwrap();
        }
        let (config, substituted) = HardwareConfiguration::decode(&store);
        assert_eq!(config, HardwareConfiguration::default());
        assert_eq!(substituted.len(), HW_PARAM_NAMES.len());
        for name in HW_PARAM_NAMES {
            assert!(substituted.contains(&name), "{}", name);
        }
    }

    #[test]
    fn test_negative_bind_count_falls_back() {
        let mut store = store();
        store.set(HW_DSMXBIND, ParamValue::Int(-1)).unwrap();
        assert_eq!(HardwareConfiguration::from_store(&store).dsmx_bind, 0);
    }

    #[test]
    fn test_save_then_reset() {
        let mut store = store();
        let config = HardwareConfiguration {
            main_port: PortFunction::MavlinkTxGpsRx,
            rx_port: RxPortMode::Usart,
            magnetometer: MagSource::ExternalFlexiPort,
            ..HardwareConfiguration::default()
        };
        config.save(&mut store).unwrap();
        assert_eq!(HardwareConfiguration::from_store(&store), config);

        HardwareConfiguration::reset_defaults(&mut store).unwrap();
        assert_eq!(
            HardwareConfiguration::from_store(&store),
            HardwareConfiguration::default()
        );
    }

    #[test]
    fn test_rx_port_usart_follows_mode() {
        let mut config = HardwareConfiguration {
            rx_port_usart: PortFunction::Gps,
            ..HardwareConfiguration::default()
        };
        assert_eq!(config.function_for(PortRole::RxPortUsart), PortFunction::Disabled);
        config.rx_port = RxPortMode::PpmUsart;
        assert_eq!(config.function_for(PortRole::RxPortUsart), PortFunction::Gps);
        assert_eq!(config.function_for(PortRole::RxPort), PortFunction::Disabled);
    }
}
