//! Port roles and the functions a role can be given
//!
//! Receiver protocols that share one decoder (the three DSM flavours, the two
//! HoTT SUM flavours) are a single variant carrying the protocol, so every
//! role configures them the same way.

use core::fmt;

/// Physical connector on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortRole {
    /// Main port (UART, inverted-capable for SBus)
    Main,
    /// Flexi port (UART or auxiliary I2C)
    Flexi,
    /// Receiver port (PWM/PPM inputs, optional UART on two pins)
    RxPort,
    /// UART half of the receiver port
    RxPortUsart,
}

impl PortRole {
    /// Roles in dispatch order
    pub const ALL: [PortRole; 4] = [
        PortRole::Main,
        PortRole::Flexi,
        PortRole::RxPort,
        PortRole::RxPortUsart,
    ];

    /// Short name used in logs
    pub fn name(self) -> &'static str {
        match self {
            PortRole::Main => "MainPort",
            PortRole::Flexi => "FlxPort",
            PortRole::RxPort => "RxPort",
            PortRole::RxPortUsart => "RxPortUsart",
        }
    }
}

impl fmt::Display for PortRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Spektrum satellite protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DsmProtocol {
    Dsm2,
    Dsmx10Bit,
    Dsmx11Bit,
}

/// Graupner HoTT sum-signal protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HsumProtocol {
    SumD,
    SumH,
}

/// Function assigned to a serial-capable port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortFunction {
    Disabled,
    Telemetry,
    Gps,
    /// Auxiliary I2C bus (Flexi only)
    I2c,
    Dsm(DsmProtocol),
    DebugConsole,
    ComBridge,
    MavlinkTx,
    /// GPS in, MAVLink out, on one UART
    MavlinkTxGpsRx,
    HottSum(HsumProtocol),
    HottTelemetry,
    FrskySensorHub,
    LightTelemetryTx,
    PicoC,
    /// Futaba S.Bus (Main only, needs the inverter)
    SBus,
}

impl PortFunction {
    /// Every function, in settings-code order
    pub const ALL: [PortFunction; 18] = [
        PortFunction::Disabled,
        PortFunction::Telemetry,
        PortFunction::Gps,
        PortFunction::I2c,
        PortFunction::Dsm(DsmProtocol::Dsm2),
        PortFunction::Dsm(DsmProtocol::Dsmx10Bit),
        PortFunction::Dsm(DsmProtocol::Dsmx11Bit),
        PortFunction::DebugConsole,
        PortFunction::ComBridge,
        PortFunction::MavlinkTx,
        PortFunction::MavlinkTxGpsRx,
        PortFunction::HottSum(HsumProtocol::SumD),
        PortFunction::HottSum(HsumProtocol::SumH),
        PortFunction::HottTelemetry,
        PortFunction::FrskySensorHub,
        PortFunction::LightTelemetryTx,
        PortFunction::PicoC,
        PortFunction::SBus,
    ];

    /// Settings code
    pub fn code(self) -> i32 {
        match self {
            PortFunction::Disabled => 0,
            PortFunction::Telemetry => 1,
            PortFunction::Gps => 2,
            PortFunction::I2c => 3,
            PortFunction::Dsm(DsmProtocol::Dsm2) => 4,
            PortFunction::Dsm(DsmProtocol::Dsmx10Bit) => 5,
            PortFunction::Dsm(DsmProtocol::Dsmx11Bit) => 6,
            PortFunction::DebugConsole => 7,
            PortFunction::ComBridge => 8,
            PortFunction::MavlinkTx => 9,
            PortFunction::MavlinkTxGpsRx => 10,
            PortFunction::HottSum(HsumProtocol::SumD) => 11,
            PortFunction::HottSum(HsumProtocol::SumH) => 12,
            PortFunction::HottTelemetry => 13,
            PortFunction::FrskySensorHub => 14,
            PortFunction::LightTelemetryTx => 15,
            PortFunction::PicoC => 16,
            PortFunction::SBus => 17,
        }
    }

    /// Decode a settings code
    pub fn from_code(code: i32) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// Name used in logs and by the ground station
    pub fn name(self) -> &'static str {
        match self {
            PortFunction::Disabled => "Disabled",
            PortFunction::Telemetry => "Telemetry",
            PortFunction::Gps => "GPS",
            PortFunction::I2c => "I2C",
            PortFunction::Dsm(DsmProtocol::Dsm2) => "DSM2",
            PortFunction::Dsm(DsmProtocol::Dsmx10Bit) => "DSMX (10bit)",
            PortFunction::Dsm(DsmProtocol::Dsmx11Bit) => "DSMX (11bit)",
            PortFunction::DebugConsole => "DebugConsole",
            PortFunction::ComBridge => "ComBridge",
            PortFunction::MavlinkTx => "MavLinkTX",
            PortFunction::MavlinkTxGpsRx => "MavLinkTX_GPS_RX",
            PortFunction::HottSum(HsumProtocol::SumD) => "HOTT SUMD",
            PortFunction::HottSum(HsumProtocol::SumH) => "HOTT SUMH",
            PortFunction::HottTelemetry => "HoTT Telemetry",
            PortFunction::FrskySensorHub => "FrSKY Sensor Hub",
            PortFunction::LightTelemetryTx => "LighttelemetryTx",
            PortFunction::PicoC => "PicoC",
            PortFunction::SBus => "S.Bus",
        }
    }
}

impl fmt::Display for PortFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Receiver port pin usage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RxPortMode {
    Disabled,
    Pwm,
    Ppm,
    /// PPM on pin 1, remaining pins as servo outputs
    PpmOutputs,
    /// All pins as servo outputs
    Outputs,
    /// Two pins as a UART (see `RxPortUsart`)
    Usart,
    /// PPM on pin 1 plus the UART
    PpmUsart,
}

/// Servo output layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServoLayout {
    /// Output timer only
    Standard,
    /// Output timer plus receiver-port pins not used by PPM
    RcvrPortOutputs,
    /// Output timer plus every receiver-port pin
    AllOutputs,
}

impl RxPortMode {
    const ALL: [RxPortMode; 7] = [
        RxPortMode::Disabled,
        RxPortMode::Pwm,
        RxPortMode::Ppm,
        RxPortMode::PpmOutputs,
        RxPortMode::Outputs,
        RxPortMode::Usart,
        RxPortMode::PpmUsart,
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

    /// Whether the `RxPortUsart` role is dispatched
    pub fn enables_usart(self) -> bool {
        matches!(self, RxPortMode::Usart | RxPortMode::PpmUsart)
    }

    /// Whether a PPM decoder is started
    pub fn starts_ppm(self) -> bool {
        matches!(
            self,
            RxPortMode::Ppm | RxPortMode::PpmOutputs | RxPortMode::PpmUsart
        )
    }

    /// Servo outputs for this mode; `None` leaves servos unconfigured
    pub fn servo_layout(self) -> Option<ServoLayout> {
        match self {
            RxPortMode::Disabled | RxPortMode::Pwm | RxPortMode::Ppm => Some(ServoLayout::Standard),
            RxPortMode::PpmOutputs => Some(ServoLayout::RcvrPortOutputs),
            RxPortMode::Outputs => Some(ServoLayout::AllOutputs),
            RxPortMode::Usart | RxPortMode::PpmUsart => None,
        }
    }
}

/// USB virtual COM port function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UsbVcpFunction {
    Disabled,
    UsbTelemetry,
    ComBridge,
    DebugConsole,
}

impl UsbVcpFunction {
    /// Settings code
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Decode a settings code
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(UsbVcpFunction::Disabled),
            1 => Some(UsbVcpFunction::UsbTelemetry),
            2 => Some(UsbVcpFunction::ComBridge),
            3 => Some(UsbVcpFunction::DebugConsole),
            _ => None,
        }
    }
}

/// USB HID interface function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UsbHidFunction {
    Disabled,
    UsbTelemetry,
}

impl UsbHidFunction {
    /// Settings code
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Decode a settings code
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(UsbHidFunction::Disabled),
            1 => Some(UsbHidFunction::UsbTelemetry),
            _ => None,
        }
    }
}
