//! Opaque driver handles
//!
//! Driver init entry points hand back small integer identifiers. The
//! bring-up code never interprets them; it only stores them and passes them
//! on to the next driver in the chain (bus -> decoder -> receiver).

/// Handle to an initialized bus (USART, I2C, SPI, USB class)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BusHandle(pub u32);

/// Handle to a byte-stream com instance layered on a bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComHandle(pub u32);

/// Handle to a frame decoder (SBus, DSM, HoTT SUMD/SUMH, PWM, PPM, GCS)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecoderHandle(pub u32);

/// Handle to a receiver driver registered in a channel group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RcvrHandle(pub u32);
