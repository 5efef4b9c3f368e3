//! USART and com-layer bring-up
//!
//! A com instance is the byte-stream layer used by every stream channel. It
//! sits on a lower driver (a USART or a USB class) and owns the buffers it
//! is given for the rest of the boot.

use brain_board_core::handle::{BusHandle, ComHandle};
use brain_board_core::ports::{ChannelBuffer, ComDriver, UsartMode, UsartPort};

use crate::platform::Result;

/// Serial bring-up interface
pub trait SerialInterface {
    /// Configure a USART for a line-settings family
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Usart` if the port cannot be configured.
    fn usart_init(&mut self, port: UsartPort, mode: UsartMode) -> Result<BusHandle>;

    /// Create a com instance on a lower driver
    ///
    /// `rx` or `tx` is `None` for a simplex channel.
    fn com_init(
        &mut self,
        driver: ComDriver,
        lower: BusHandle,
        rx: Option<ChannelBuffer>,
        tx: Option<ChannelBuffer>,
    ) -> Result<ComHandle>;
}
