//! Communication channels and the purpose table
//!
//! A channel is a byte stream over one lower driver (a UART, the USB CDC
//! interface or the USB HID interface) with an optional receive buffer and an
//! optional transmit buffer. Channels are created during bring-up and live
//! until reset.
//!
//! Subsystems look channels up by purpose. Each purpose slot refers to at most
//! one channel; two slots may refer to the same channel (GPS in and MAVLink
//! out on one UART).

use crate::handle::{BusHandle, ComHandle};
use heapless::Vec;

use super::table::UsartPort;

/// GPS receive buffer length
pub const GPS_RX_BUF_LEN: u16 = 32;
/// GPS transmit buffer length
pub const GPS_TX_BUF_LEN: u16 = 16;
/// Radio telemetry receive buffer length
pub const TELEM_RF_RX_BUF_LEN: u16 = 512;
/// Radio telemetry transmit buffer length
pub const TELEM_RF_TX_BUF_LEN: u16 = 512;
/// USB telemetry receive buffer length
pub const TELEM_USB_RX_BUF_LEN: u16 = 65;
/// USB telemetry transmit buffer length
pub const TELEM_USB_TX_BUF_LEN: u16 = 65;
/// Com-bridge receive buffer length
pub const BRIDGE_RX_BUF_LEN: u16 = 65;
/// Com-bridge transmit buffer length
pub const BRIDGE_TX_BUF_LEN: u16 = 12;
/// MAVLink transmit buffer length
pub const MAVLINK_TX_BUF_LEN: u16 = 128;
/// HoTT telemetry receive buffer length
pub const HOTT_RX_BUF_LEN: u16 = 16;
/// HoTT telemetry transmit buffer length
pub const HOTT_TX_BUF_LEN: u16 = 16;
/// FrSky sensor hub transmit buffer length
pub const FRSKY_SENSOR_HUB_TX_BUF_LEN: u16 = 128;
/// Light telemetry transmit buffer length
pub const LIGHT_TELEMETRY_TX_BUF_LEN: u16 = 19;
/// PicoC receive buffer length
pub const PICOC_RX_BUF_LEN: u16 = 128;
/// PicoC transmit buffer length
pub const PICOC_TX_BUF_LEN: u16 = 128;
/// Debug console transmit buffer length
pub const DEBUG_CONSOLE_TX_BUF_LEN: u16 = 40;

/// Maximum number of channels opened in one boot
pub const MAX_CHANNELS: usize = 12;

/// Logical use of a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelPurpose {
    Gps,
    TelemetryRf,
    TelemetryUsb,
    /// USB VCP bridged to a UART
    VcpBridge,
    /// UART side of the com bridge
    ComBridge,
    Mavlink,
    Hott,
    FrskySensorHub,
    LightTelemetry,
    PicoC,
    DebugConsole,
}

impl ChannelPurpose {
    /// Number of purposes
    pub const COUNT: usize = 11;

    /// Every purpose in slot order
    pub const ALL: [ChannelPurpose; Self::COUNT] = [
        ChannelPurpose::Gps,
        ChannelPurpose::TelemetryRf,
        ChannelPurpose::TelemetryUsb,
        ChannelPurpose::VcpBridge,
        ChannelPurpose::ComBridge,
        ChannelPurpose::Mavlink,
        ChannelPurpose::Hott,
        ChannelPurpose::FrskySensorHub,
        ChannelPurpose::LightTelemetry,
        ChannelPurpose::PicoC,
        ChannelPurpose::DebugConsole,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Short name used in logs
    pub fn name(self) -> &'static str {
        match self {
            ChannelPurpose::Gps => "gps",
            ChannelPurpose::TelemetryRf => "telem_rf",
            ChannelPurpose::TelemetryUsb => "telem_usb",
            ChannelPurpose::VcpBridge => "vcp",
            ChannelPurpose::ComBridge => "bridge",
            ChannelPurpose::Mavlink => "mavlink",
            ChannelPurpose::Hott => "hott",
            ChannelPurpose::FrskySensorHub => "frsky_sensor_hub",
            ChannelPurpose::LightTelemetry => "lighttelemetry",
            ChannelPurpose::PicoC => "picoc",
            ChannelPurpose::DebugConsole => "debug",
        }
    }
}

/// A buffer carved out of the channel buffer pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelBuffer {
    /// Byte offset into the pool
    pub offset: u32,
    /// Length in bytes (never zero)
    pub len: u16,
}

/// Lower driver a channel runs over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComDriver {
    Usart(UsartPort),
    UsbCdc,
    UsbHid,
}

/// A stream channel opened during bring-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommunicationChannel {
    /// Handle from the com layer
    pub com: ComHandle,
    /// Handle of the lower driver instance
    pub lower: BusHandle,
    /// Lower driver kind
    pub driver: ComDriver,
    /// Receive buffer; `None` for transmit-only channels
    pub rx: Option<ChannelBuffer>,
    /// Transmit buffer; `None` for receive-only channels
    pub tx: Option<ChannelBuffer>,
}

impl CommunicationChannel {
    /// Receive buffer length (0 when absent)
    pub fn rx_len(&self) -> u16 {
        self.rx.map(|b| b.len).unwrap_or(0)
    }

    /// Transmit buffer length (0 when absent)
    pub fn tx_len(&self) -> u16 {
        self.tx.map(|b| b.len).unwrap_or(0)
    }
}

/// Index of a channel in the [`ChannelTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelId(u8);

impl ChannelId {
    /// Position in open order
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The channel table is full
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelTableFull;

/// All channels opened in this boot and the purpose slots that refer to them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelTable {
    channels: Vec<CommunicationChannel, MAX_CHANNELS>,
    slots: [Option<ChannelId>; ChannelPurpose::COUNT],
}

impl ChannelTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            channels: Vec::new(),
            slots: [None; ChannelPurpose::COUNT],
        }
    }

    /// Add a channel without binding it to any purpose
    pub fn push(&mut self, channel: CommunicationChannel) -> Result<ChannelId, ChannelTableFull> {
        let id = ChannelId(self.channels.len() as u8);
        self.channels.push(channel).map_err(|_| ChannelTableFull)?;
        Ok(id)
    }

    /// Point a purpose slot at a channel
    ///
    /// Returns the channel the slot referred to before, if any. That channel
    /// stays open.
    pub fn bind(&mut self, purpose: ChannelPurpose, id: ChannelId) -> Option<ChannelId> {
        self.slots[purpose.index()].replace(id)
    }

    /// Make `alias` refer to the same channel as `target`
    ///
    /// Returns `None` when `target` is unbound; `alias` is left untouched.
    pub fn alias(&mut self, alias: ChannelPurpose, target: ChannelPurpose) -> Option<ChannelId> {
        let id = self.slots[target.index()]?;
        self.slots[alias.index()] = Some(id);
        Some(id)
    }

    /// Channel id bound to a purpose
    pub fn id_of(&self, purpose: ChannelPurpose) -> Option<ChannelId> {
        self.slots[purpose.index()]
    }

    /// Channel bound to a purpose
    pub fn get(&self, purpose: ChannelPurpose) -> Option<&CommunicationChannel> {
        self.id_of(purpose).and_then(|id| self.channel(id))
    }

    /// Channel by id
    pub fn channel(&self, id: ChannelId) -> Option<&CommunicationChannel> {
        self.channels.get(id.index())
    }

    /// Whether a purpose slot is bound
    pub fn is_bound(&self, purpose: ChannelPurpose) -> bool {
        self.id_of(purpose).is_some()
    }

    /// Bound purposes with their channel ids, in slot order
    pub fn bindings(&self) -> impl Iterator<Item = (ChannelPurpose, ChannelId)> + '_ {
        ChannelPurpose::ALL
            .iter()
            .filter_map(move |p| self.id_of(*p).map(|id| (*p, id)))
    }

    /// Every opened channel in open order, bound or not
    pub fn channels(&self) -> &[CommunicationChannel] {
        &self.channels
    }

    /// Number of opened channels
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Whether no channel was opened
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// At least one ground-station link exists
    pub fn has_telemetry(&self) -> bool {
        self.is_bound(ChannelPurpose::TelemetryRf) || self.is_bound(ChannelPurpose::TelemetryUsb)
    }
}

impl Default for ChannelTable {
    fn default() -> Self {
        Self::new()
    }
}
