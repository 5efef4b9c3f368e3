//! Receiver decoder bring-up
//!
//! Each decoder turns frames (or pulses) into channel values. A generic
//! receiver driver is then layered on the decoder; the receiver handle is
//! what manual control reads through its channel group.

use brain_board_core::handle::{BusHandle, DecoderHandle, RcvrHandle};
use brain_board_core::ports::{DsmProtocol, HsumProtocol};

use crate::platform::Result;

/// Receiver decoder interface
pub trait ReceiverInterface {
    /// Futaba S.Bus on an inverted USART
    fn sbus_init(&mut self, usart: BusHandle) -> Result<DecoderHandle>;

    /// Spektrum satellite
    ///
    /// `bind_pulses` > 0 puts the satellite into bind mode at power-up.
    fn dsm_init(
        &mut self,
        usart: BusHandle,
        protocol: DsmProtocol,
        bind_pulses: u8,
    ) -> Result<DecoderHandle>;

    /// Graupner HoTT SUMD/SUMH
    fn hsum_init(&mut self, usart: BusHandle, protocol: HsumProtocol) -> Result<DecoderHandle>;

    /// PWM input capture on the receiver port
    fn pwm_init(&mut self) -> Result<DecoderHandle>;

    /// PPM input capture on receiver port pin 1
    fn ppm_init(&mut self) -> Result<DecoderHandle>;

    /// Virtual receiver fed by the ground station
    fn gcs_init(&mut self) -> Result<DecoderHandle>;

    /// Layer the generic receiver driver on a decoder
    fn rcvr_init(&mut self, decoder: DecoderHandle) -> Result<RcvrHandle>;
}
