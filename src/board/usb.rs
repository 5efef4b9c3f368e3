//! USB stack bring-up and USB sub-port dispatch
//!
//! The virtual COM port and the HID interface are dispatched like serial
//! ports, keyed on their own function enumerations. A function on an
//! interface the descriptor does not advertise is forced to `Disabled`.

use brain_board_core::handle::BusHandle;
use brain_board_core::ports::{
    hid_binding, vcp_binding, ComDriver, PortBinding, UsbHidFunction, UsbVcpFunction,
};
use brain_board_core::Capabilities;

use super::abort::{BootAbort, OrAbort};
use super::dispatcher::open_stream;
use super::resources::BoardResources;
use crate::platform::traits::{Board, UsbDescriptor};

/// Descriptor set for the compiled-in USB classes
pub fn descriptor_for(capabilities: Capabilities) -> UsbDescriptor {
    if capabilities.contains(Capabilities::USB_CDC) {
        UsbDescriptor::HidCdc
    } else {
        UsbDescriptor::HidOnly
    }
}

/// VCP function after the descriptor check
pub fn effective_vcp(descriptor: UsbDescriptor, function: UsbVcpFunction) -> UsbVcpFunction {
    if descriptor.has_cdc() {
        function
    } else {
        UsbVcpFunction::Disabled
    }
}

/// HID function after the descriptor check
pub fn effective_hid(descriptor: UsbDescriptor, function: UsbHidFunction) -> UsbHidFunction {
    if descriptor.has_hid() {
        function
    } else {
        UsbHidFunction::Disabled
    }
}

fn open_usb_binding<B: Board>(
    board: &mut B,
    res: &mut BoardResources,
    driver: ComDriver,
    class: BusHandle,
    binding: PortBinding,
) -> Result<(), BootAbort> {
    match binding {
        PortBinding::Stream(spec) if res.capabilities.contains(spec.requires) => {
            open_stream(board, res, driver, class, &spec)?;
        }
        PortBinding::Stream(spec) => {
            crate::log_debug!("USB {} not built in", spec.purpose.name());
        }
        _ => {}
    }
    Ok(())
}

/// Bring up the USB stack and its VCP/HID channels
pub fn bring_up_usb<B: Board>(board: &mut B, res: &mut BoardResources) -> Result<(), BootAbort> {
    if !res.capabilities.contains(Capabilities::USB) {
        crate::log_debug!("USB not built in");
        return Ok(());
    }

    board.usb_board_init().or_halt("USB board data")?;
    let descriptor = descriptor_for(res.capabilities);
    board.usb_desc_init(descriptor).or_halt("USB descriptor")?;
    res.usb_descriptor = Some(descriptor);
    let usb = board.usb_init().or_halt("USB core")?;

    if res.capabilities.contains(Capabilities::USB_CDC) {
        let vcp = effective_vcp(descriptor, res.config.usb_vcp_port);
        if vcp != res.config.usb_vcp_port {
            crate::log_warn!("VCP not advertised, function disabled");
        }
        let cdc = board.usb_cdc_init(usb).or_halt("USB CDC")?;
        open_usb_binding(board, res, ComDriver::UsbCdc, cdc, vcp_binding(vcp))?;
    }

    if res.capabilities.contains(Capabilities::USB_HID) {
        let hid_function = effective_hid(descriptor, res.config.usb_hid_port);
        if hid_function != res.config.usb_hid_port {
            crate::log_warn!("HID not advertised, function disabled");
        }
        let hid = board.usb_hid_init(usb).or_halt("USB HID")?;
        open_usb_binding(board, res, ComDriver::UsbHid, hid, hid_binding(hid_function))?;
    }

    if descriptor.has_cdc() || descriptor.has_hid() {
        board.usb_hook_activate();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{Event, Fail, MockBoard};
    use brain_board_core::parameters::HardwareConfiguration;
    use brain_board_core::ports::ChannelPurpose;

    fn config(vcp: UsbVcpFunction, hid: UsbHidFunction) -> HardwareConfiguration {
        HardwareConfiguration {
            usb_vcp_port: vcp,
            usb_hid_port: hid,
            ..HardwareConfiguration::default()
        }
    }

    #[test]
    fn test_descriptor_choice() {
        assert_eq!(descriptor_for(Capabilities::BRAIN), UsbDescriptor::HidCdc);
        assert_eq!(
            descriptor_for(Capabilities::BRAIN - Capabilities::USB_CDC),
            UsbDescriptor::HidOnly
        );
    }

    #[test]
    fn test_vcp_forced_off_without_cdc() {
        assert_eq!(
            effective_vcp(UsbDescriptor::HidOnly, UsbVcpFunction::ComBridge),
            UsbVcpFunction::Disabled
        );
        assert_eq!(
            effective_vcp(UsbDescriptor::HidCdc, UsbVcpFunction::ComBridge),
            UsbVcpFunction::ComBridge
        );
        assert_eq!(
            effective_hid(UsbDescriptor::HidOnly, UsbHidFunction::UsbTelemetry),
            UsbHidFunction::UsbTelemetry
        );
    }

    #[test]
    fn test_stack_order() {
        let mut board = MockBoard::new();
        let mut res = BoardResources::new(
            config(UsbVcpFunction::ComBridge, UsbHidFunction::Disabled),
            Capabilities::BRAIN,
        );
        bring_up_usb(&mut board, &mut res).unwrap();

        let at = |e| board.position(e).unwrap();
        assert!(at(Event::UsbBoardInit) < at(Event::UsbDescInit(UsbDescriptor::HidCdc)));
        assert!(at(Event::UsbDescInit(UsbDescriptor::HidCdc)) < at(Event::UsbInit));
        assert!(at(Event::UsbInit) < at(Event::UsbCdcInit));
        assert!(at(Event::UsbCdcInit) < at(Event::UsbHidInit));
        assert!(at(Event::UsbHidInit) < at(Event::UsbHookActivate));
        assert_eq!(res.usb_descriptor, Some(UsbDescriptor::HidCdc));
    }

    #[test]
    fn test_vcp_bridge_and_hid_telemetry() {
        let mut board = MockBoard::new();
        let mut res = BoardResources::new(
            config(UsbVcpFunction::ComBridge, UsbHidFunction::UsbTelemetry),
            Capabilities::BRAIN,
        );
        bring_up_usb(&mut board, &mut res).unwrap();

        let vcp = res.channel(ChannelPurpose::VcpBridge).unwrap();
        assert_eq!((vcp.driver, vcp.rx_len(), vcp.tx_len()), (ComDriver::UsbCdc, 65, 12));
        let telem = res.channel(ChannelPurpose::TelemetryUsb).unwrap();
        assert_eq!(
            (telem.driver, telem.rx_len(), telem.tx_len()),
            (ComDriver::UsbHid, 65, 65)
        );
        assert!(!res.channels.is_bound(ChannelPurpose::ComBridge));
        assert!(res.has_telemetry());
    }

    #[test]
    fn test_vcp_debug_console() {
        let mut board = MockBoard::new();
        let mut res = BoardResources::new(
            config(UsbVcpFunction::DebugConsole, UsbHidFunction::Disabled),
            Capabilities::BRAIN,
        );
        bring_up_usb(&mut board, &mut res).unwrap();
        let debug = res.channel(ChannelPurpose::DebugConsole).unwrap();
        assert_eq!((debug.rx, debug.tx_len()), (None, 40));
        assert!(!res.has_telemetry());
    }

    #[test]
    fn test_hid_only_build() {
        let mut board = MockBoard::new();
        let mut res = BoardResources::new(
            config(UsbVcpFunction::UsbTelemetry, UsbHidFunction::UsbTelemetry),
            Capabilities::BRAIN - Capabilities::USB_CDC,
        );
        bring_up_usb(&mut board, &mut res).unwrap();

        assert!(board.has(Event::UsbDescInit(UsbDescriptor::HidOnly)));
        assert!(!board.has(Event::UsbCdcInit));
        assert_eq!(
            res.channel(ChannelPurpose::TelemetryUsb).map(|c| c.driver),
            Some(ComDriver::UsbHid)
        );
        assert!(board.has(Event::UsbHookActivate));
    }

    #[test]
    fn test_usb_not_built_in() {
        let mut board = MockBoard::new();
        let mut res = BoardResources::new(
            HardwareConfiguration::default(),
            Capabilities::BRAIN - Capabilities::USB,
        );
        bring_up_usb(&mut board, &mut res).unwrap();
        assert!(board.events().is_empty());
        assert_eq!(res.usb_descriptor, None);
    }

    #[test]
    fn test_class_failure_halts() {
        let mut board = MockBoard::new();
        let mut res = BoardResources::new(HardwareConfiguration::default(), Capabilities::BRAIN);
        board.fail_on(Fail::USB_HID);
        assert_eq!(
            bring_up_usb(&mut board, &mut res),
            Err(BootAbort::Halt("USB HID"))
        );
        assert!(!board.has(Event::UsbHookActivate));
    }
}
