//! USB device stack bring-up

use brain_board_core::handle::BusHandle;

use crate::platform::Result;

/// USB descriptor set advertised to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsbDescriptor {
    /// Composite device: HID plus CDC (virtual COM port)
    HidCdc,
    /// HID interface only
    HidOnly,
}

impl UsbDescriptor {
    /// The descriptor advertises a CDC interface
    pub fn has_cdc(self) -> bool {
        matches!(self, UsbDescriptor::HidCdc)
    }

    /// The descriptor advertises a HID interface
    pub fn has_hid(self) -> bool {
        matches!(self, UsbDescriptor::HidCdc | UsbDescriptor::HidOnly)
    }
}

/// USB stack interface
pub trait UsbInterface {
    /// Initialize board-specific USB data (serial number, board revision)
    fn usb_board_init(&mut self) -> Result<()>;

    /// Install the descriptor set
    fn usb_desc_init(&mut self, descriptor: UsbDescriptor) -> Result<()>;

    /// Initialize the USB core
    fn usb_init(&mut self) -> Result<BusHandle>;

    /// Attach the CDC class driver
    fn usb_cdc_init(&mut self, usb: BusHandle) -> Result<BusHandle>;

    /// Attach the HID class driver
    fn usb_hid_init(&mut self, usb: BusHandle) -> Result<BusHandle>;

    /// Connect to the host
    fn usb_hook_activate(&mut self);
}
