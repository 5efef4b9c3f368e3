//! Per-role port tables
//!
//! What a function does is the same on every role: [`binding_for`] maps a
//! function to a stream channel spec, a receiver spec, the auxiliary bus, or
//! nothing. A role only contributes which UART it drives and which functions
//! its pins can carry.

use bitflags::bitflags;

use super::channel::*;
use super::function::{
    DsmProtocol, HsumProtocol, PortFunction, PortRole, UsbHidFunction, UsbVcpFunction,
};
use super::receiver::ChannelGroup;
use crate::capabilities::Capabilities;

/// Hardware UART behind a port role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UsartPort {
    Main,
    Flexi,
    RxPort,
}

/// UART line settings family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UsartMode {
    /// 57600 8N1
    Standard,
    /// 100000 8E2, inverted
    SBus,
    /// 115200 8N1, receive only
    DsmHsum,
}

/// Frame decoder started by a receiver function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameDecoder {
    SBus,
    Dsm(DsmProtocol),
    Hsum(HsumProtocol),
}

impl FrameDecoder {
    /// UART settings the decoder needs
    pub fn usart_mode(self) -> UsartMode {
        match self {
            FrameDecoder::SBus => UsartMode::SBus,
            FrameDecoder::Dsm(_) | FrameDecoder::Hsum(_) => UsartMode::DsmHsum,
        }
    }
}

/// Byte-stream channel opened by a function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamSpec {
    /// Purpose slot the channel is bound to
    pub purpose: ChannelPurpose,
    /// Receive buffer length, 0 for none
    pub rx_len: u16,
    /// Transmit buffer length, 0 for none
    pub tx_len: u16,
    /// Second purpose that shares the same channel
    pub alias: Option<ChannelPurpose>,
    /// Capabilities that must be compiled in
    pub requires: Capabilities,
}

/// Receiver decoder registered by a function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiverSpec {
    pub decoder: FrameDecoder,
    pub group: ChannelGroup,
    pub requires: Capabilities,
}

/// What dispatching a function does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortBinding {
    /// Nothing
    Unbound,
    /// Open a UART stream channel
    Stream(StreamSpec),
    /// Start a frame decoder
    Receiver(ReceiverSpec),
    /// Bring up the auxiliary I2C bus and its external sensors
    AuxBus,
}

impl PortBinding {
    /// Capabilities the binding needs
    pub fn requires(&self) -> Capabilities {
        match self {
            PortBinding::Unbound => Capabilities::empty(),
            PortBinding::Stream(s) => s.requires,
            PortBinding::Receiver(r) => r.requires,
            PortBinding::AuxBus => Capabilities::I2C,
        }
    }
}

const fn stream(
    purpose: ChannelPurpose,
    rx_len: u16,
    tx_len: u16,
    requires: Capabilities,
) -> PortBinding {
    PortBinding::Stream(StreamSpec {
        purpose,
        rx_len,
        tx_len,
        alias: None,
        requires,
    })
}

/// Role-independent binding of a function
pub fn binding_for(function: PortFunction) -> PortBinding {
    use ChannelPurpose as P;
    match function {
        PortFunction::Disabled => PortBinding::Unbound,
        PortFunction::Telemetry => stream(
            P::TelemetryRf,
            TELEM_RF_RX_BUF_LEN,
            TELEM_RF_TX_BUF_LEN,
            Capabilities::TELEMETRY_RF,
        ),
        PortFunction::Gps => stream(P::Gps, GPS_RX_BUF_LEN, GPS_TX_BUF_LEN, Capabilities::GPS),
        PortFunction::I2c => PortBinding::AuxBus,
        PortFunction::DebugConsole => stream(
            P::DebugConsole,
            0,
            DEBUG_CONSOLE_TX_BUF_LEN,
            Capabilities::DEBUG_CONSOLE,
        ),
        PortFunction::ComBridge => stream(
            P::ComBridge,
            BRIDGE_RX_BUF_LEN,
            BRIDGE_TX_BUF_LEN,
            Capabilities::empty(),
        ),
        PortFunction::MavlinkTx => stream(P::Mavlink, 0, MAVLINK_TX_BUF_LEN, Capabilities::MAVLINK),
        PortFunction::MavlinkTxGpsRx => PortBinding::Stream(StreamSpec {
            purpose: P::Gps,
            rx_len: GPS_RX_BUF_LEN,
            tx_len: MAVLINK_TX_BUF_LEN,
            alias: Some(P::Mavlink),
            requires: Capabilities::MAVLINK.union(Capabilities::GPS),
        }),
        PortFunction::HottTelemetry => {
            stream(P::Hott, HOTT_RX_BUF_LEN, HOTT_TX_BUF_LEN, Capabilities::HOTT)
        }
        PortFunction::FrskySensorHub => stream(
            P::FrskySensorHub,
            0,
            FRSKY_SENSOR_HUB_TX_BUF_LEN,
            Capabilities::FRSKY_SENSOR_HUB,
        ),
        PortFunction::LightTelemetryTx => stream(
            P::LightTelemetry,
            0,
            LIGHT_TELEMETRY_TX_BUF_LEN,
            Capabilities::LIGHT_TELEMETRY,
        ),
        PortFunction::PicoC => stream(P::PicoC, PICOC_RX_BUF_LEN, PICOC_TX_BUF_LEN, Capabilities::PICOC),
        PortFunction::SBus => PortBinding::Receiver(ReceiverSpec {
            decoder: FrameDecoder::SBus,
            group: ChannelGroup::SBus,
            requires: Capabilities::SBUS,
        }),
        PortFunction::Dsm(protocol) => PortBinding::Receiver(ReceiverSpec {
            decoder: FrameDecoder::Dsm(protocol),
            group: ChannelGroup::DsmMainPort,
            requires: Capabilities::DSM,
        }),
        PortFunction::HottSum(protocol) => PortBinding::Receiver(ReceiverSpec {
            decoder: FrameDecoder::Hsum(protocol),
            group: ChannelGroup::HottSum,
            requires: Capabilities::HSUM,
        }),
    }
}

/// Binding of the USB virtual COM port function
pub fn vcp_binding(function: UsbVcpFunction) -> PortBinding {
    use ChannelPurpose as P;
    match function {
        UsbVcpFunction::Disabled => PortBinding::Unbound,
        UsbVcpFunction::UsbTelemetry => stream(
            P::TelemetryUsb,
            TELEM_USB_RX_BUF_LEN,
            TELEM_USB_TX_BUF_LEN,
            Capabilities::empty(),
        ),
        UsbVcpFunction::ComBridge => stream(
            P::VcpBridge,
            BRIDGE_RX_BUF_LEN,
            BRIDGE_TX_BUF_LEN,
            Capabilities::empty(),
        ),
        UsbVcpFunction::DebugConsole => stream(
            P::DebugConsole,
            0,
            DEBUG_CONSOLE_TX_BUF_LEN,
            Capabilities::DEBUG_CONSOLE,
        ),
    }
}

/// Binding of the USB HID interface function
pub fn hid_binding(function: UsbHidFunction) -> PortBinding {
    match function {
        UsbHidFunction::Disabled => PortBinding::Unbound,
        UsbHidFunction::UsbTelemetry => stream(
            ChannelPurpose::TelemetryUsb,
            TELEM_USB_RX_BUF_LEN,
            TELEM_USB_TX_BUF_LEN,
            Capabilities::empty(),
        ),
    }
}

bitflags! {
    /// Set of function kinds a role can carry
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FunctionSet: u32 {
        const DISABLED = 1 << 0;
        const TELEMETRY = 1 << 1;
        const GPS = 1 << 2;
        const I2C = 1 << 3;
        const DSM = 1 << 4;
        const DEBUG_CONSOLE = 1 << 5;
        const COM_BRIDGE = 1 << 6;
        const MAVLINK_TX = 1 << 7;
        const MAVLINK_TX_GPS_RX = 1 << 8;
        const HOTT_SUM = 1 << 9;
        const HOTT_TELEMETRY = 1 << 10;
        const FRSKY_SENSOR_HUB = 1 << 11;
        const LIGHT_TELEMETRY_TX = 1 << 12;
        const PICOC = 1 << 13;
        const SBUS = 1 << 14;

        /// Functions any plain UART can carry
        const SERIAL = Self::DISABLED.bits()
            | Self::TELEMETRY.bits()
            | Self::GPS.bits()
            | Self::DSM.bits()
            | Self::DEBUG_CONSOLE.bits()
            | Self::COM_BRIDGE.bits()
            | Self::MAVLINK_TX.bits()
            | Self::MAVLINK_TX_GPS_RX.bits()
            | Self::HOTT_SUM.bits()
            | Self::HOTT_TELEMETRY.bits()
            | Self::FRSKY_SENSOR_HUB.bits()
            | Self::LIGHT_TELEMETRY_TX.bits()
            | Self::PICOC.bits();
    }
}

impl FunctionSet {
    /// Kind flag of a function
    pub fn of(function: PortFunction) -> Self {
        match function {
            PortFunction::Disabled => Self::DISABLED,
            PortFunction::Telemetry => Self::TELEMETRY,
            PortFunction::Gps => Self::GPS,
            PortFunction::I2c => Self::I2C,
            PortFunction::Dsm(_) => Self::DSM,
            PortFunction::DebugConsole => Self::DEBUG_CONSOLE,
            PortFunction::ComBridge => Self::COM_BRIDGE,
            PortFunction::MavlinkTx => Self::MAVLINK_TX,
            PortFunction::MavlinkTxGpsRx => Self::MAVLINK_TX_GPS_RX,
            PortFunction::HottSum(_) => Self::HOTT_SUM,
            PortFunction::HottTelemetry => Self::HOTT_TELEMETRY,
            PortFunction::FrskySensorHub => Self::FRSKY_SENSOR_HUB,
            PortFunction::LightTelemetryTx => Self::LIGHT_TELEMETRY_TX,
            PortFunction::PicoC => Self::PICOC,
            PortFunction::SBus => Self::SBUS,
        }
    }
}

/// Role-specific data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortTable {
    pub role: PortRole,
    /// UART driven by serial functions on this role
    pub usart: Option<UsartPort>,
    /// Functions the role's pins can carry
    pub supported: FunctionSet,
}

const MAIN_PORT: PortTable = PortTable {
    role: PortRole::Main,
    usart: Some(UsartPort::Main),
    supported: FunctionSet::SERIAL.union(FunctionSet::SBUS),
};

const FLEXI_PORT: PortTable = PortTable {
    role: PortRole::Flexi,
    usart: Some(UsartPort::Flexi),
    supported: FunctionSet::SERIAL.union(FunctionSet::I2C),
};

// Pin functions are selected by RxPortMode; its serial half is RxPortUsart.
const RX_PORT: PortTable = PortTable {
    role: PortRole::RxPort,
    usart: None,
    supported: FunctionSet::DISABLED,
};

const RX_PORT_USART: PortTable = PortTable {
    role: PortRole::RxPortUsart,
    usart: Some(UsartPort::RxPort),
    supported: FunctionSet::SERIAL,
};

impl PortTable {
    /// Table of a role
    pub fn for_role(role: PortRole) -> &'static PortTable {
        match role {
            PortRole::Main => &MAIN_PORT,
            PortRole::Flexi => &FLEXI_PORT,
            PortRole::RxPort => &RX_PORT,
            PortRole::RxPortUsart => &RX_PORT_USART,
        }
    }

    /// Whether the role can carry a function
    pub fn supports(&self, function: PortFunction) -> bool {
        self.supported.contains(FunctionSet::of(function))
    }

    /// Binding of a function on this role; unsupported functions are unbound
    pub fn binding(&self, function: PortFunction) -> PortBinding {
        if self.supports(function) {
            binding_for(function)
        } else {
            PortBinding::Unbound
        }
    }
}
