//! Port configuration dispatch
//!
//! One entry point serves every role. The role's table decides whether the
//! function is allowed and which UART it drives; [`binding_for`] decides
//! what the function opens. The same function therefore yields the same
//! channel configuration on every role.
//!
//! [`binding_for`]: brain_board_core::ports::binding_for

use brain_board_core::handle::{BusHandle, DecoderHandle, RcvrHandle};
use brain_board_core::ports::{
    ChannelGroup, ChannelId, ComDriver, CommunicationChannel, FrameDecoder, PortBinding,
    PortFunction, PortRole, PortTable, ReceiverSpec, RxPortMode, StreamSpec, UsartMode,
};
use brain_board_core::{Capabilities, FaultCode};

use super::abort::{BootAbort, OrAbort};
use super::resources::BoardResources;
use super::sensors::wait_bus_clear;
use crate::platform::traits::{Board, I2cBus};

/// What a port ended up carrying
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortAssignment {
    /// A stream channel
    Channel(ChannelId),
    /// A frame decoder registered under a channel group
    Receiver {
        group: ChannelGroup,
        rcvr: RcvrHandle,
    },
    /// The auxiliary I2C bus
    AuxBus(BusHandle),
}

/// Bring up `function` on `role`
///
/// Returns `None` when nothing was started: the function is `Disabled`, the
/// role cannot carry it, or its driver is not built in.
pub fn configure_port<B: Board>(
    board: &mut B,
    res: &mut BoardResources,
    role: PortRole,
    function: PortFunction,
) -> Result<Option<PortAssignment>, BootAbort> {
    let table = PortTable::for_role(role);
    if !table.supports(function) {
        crate::log_warn!("{} cannot carry {}", role.name(), function.name());
        return Ok(None);
    }

    let binding = table.binding(function);
    if !res.capabilities.contains(binding.requires()) {
        crate::log_debug!("{}: {} not built in", role.name(), function.name());
        return Ok(None);
    }

    match binding {
        PortBinding::Unbound => Ok(None),
        PortBinding::Stream(spec) => {
            let port = table.usart.ok_or(BootAbort::Halt(role.name()))?;
            let lower = board
                .usart_init(port, UsartMode::Standard)
                .or_halt(role.name())?;
            let id = open_stream(board, res, ComDriver::Usart(port), lower, &spec)?;
            Ok(Some(PortAssignment::Channel(id)))
        }
        PortBinding::Receiver(spec) => {
            let port = table.usart.ok_or(BootAbort::Halt(role.name()))?;
            let usart = board
                .usart_init(port, spec.decoder.usart_mode())
                .or_halt(role.name())?;
            let rcvr = start_decoder(board, res, usart, &spec)?;
            Ok(Some(PortAssignment::Receiver {
                group: spec.group,
                rcvr,
            }))
        }
        PortBinding::AuxBus => {
            let bus = board.i2c_init(I2cBus::Flexi).or_halt("flexi I2C")?;
            if res.capabilities.contains(Capabilities::AUX_BUS_CHECK) {
                wait_bus_clear(board, bus, FaultCode::AuxBusStuck)?;
            }
            res.aux_i2c = Some(bus);
            crate::log_info!("{}: auxiliary I2C bus up", role.name());
            Ok(Some(PortAssignment::AuxBus(bus)))
        }
    }
}

/// Open a stream channel over an initialized lower driver and bind it
///
/// Buffers are taken from the pool receive first, then transmit. A purpose
/// that was already bound is rebound to the new channel; the old channel
/// stays open.
pub(crate) fn open_stream<B: Board>(
    board: &mut B,
    res: &mut BoardResources,
    driver: ComDriver,
    lower: BusHandle,
    spec: &StreamSpec,
) -> Result<ChannelId, BootAbort> {
    let name = spec.purpose.name();
    let rx = res.pool.alloc(spec.rx_len).or_halt("channel buffers")?;
    let tx = res.pool.alloc(spec.tx_len).or_halt("channel buffers")?;
    let com = board.com_init(driver, lower, rx, tx).or_halt(name)?;

    let id = res
        .channels
        .push(CommunicationChannel {
            com,
            lower,
            driver,
            rx,
            tx,
        })
        .or_halt("channel table")?;

    if let Some(previous) = res.channels.bind(spec.purpose, id) {
        crate::log_warn!("{} rebound, channel {} left open", name, previous.index());
    }
    if let Some(alias) = spec.alias {
        if let Some(previous) = res.channels.id_of(alias) {
            crate::log_warn!("{} rebound, channel {} left open", alias.name(), previous.index());
        }
        res.channels.alias(alias, spec.purpose);
    }

    crate::log_info!("{} channel open (rx {} tx {})", name, spec.rx_len, spec.tx_len);
    Ok(id)
}

fn start_decoder<B: Board>(
    board: &mut B,
    res: &mut BoardResources,
    usart: BusHandle,
    spec: &ReceiverSpec,
) -> Result<RcvrHandle, BootAbort> {
    let decoder = match spec.decoder {
        FrameDecoder::SBus => board.sbus_init(usart).or_halt("S.Bus")?,
        FrameDecoder::Dsm(protocol) => board
            .dsm_init(usart, protocol, res.config.dsmx_bind)
            .or_halt("DSM")?,
        FrameDecoder::Hsum(protocol) => board.hsum_init(usart, protocol).or_halt("HoTT SUM")?,
    };
    register_receiver(board, res, spec.group, decoder)
}

/// Wrap a decoder in a receiver and map it under `group`
fn register_receiver<B: Board>(
    board: &mut B,
    res: &mut BoardResources,
    group: ChannelGroup,
    decoder: DecoderHandle,
) -> Result<RcvrHandle, BootAbort> {
    let rcvr = board.rcvr_init(decoder).or_halt("receiver")?;
    if res.receivers.set(group, rcvr).is_some() {
        crate::log_warn!("receiver group {} replaced", group.name());
    }
    crate::log_info!("receiver group {} registered", group.name());
    Ok(rcvr)
}

/// Receiver-port pins: PWM or PPM decoders
///
/// In `PpmUsart` mode the PPM decoder runs but is not mapped to a group.
pub fn configure_rx_port<B: Board>(
    board: &mut B,
    res: &mut BoardResources,
    mode: RxPortMode,
) -> Result<(), BootAbort> {
    if mode == RxPortMode::Pwm && res.capabilities.contains(Capabilities::PWM) {
        let decoder = board.pwm_init().or_halt("PWM")?;
        register_receiver(board, res, ChannelGroup::Pwm, decoder)?;
    }

    if mode.starts_ppm() && res.capabilities.contains(Capabilities::PPM) {
        let decoder = board.ppm_init().or_halt("PPM")?;
        if mode == RxPortMode::PpmUsart {
            board.rcvr_init(decoder).or_halt("receiver")?;
            crate::log_debug!("PPM started without a channel group");
        } else {
            register_receiver(board, res, ChannelGroup::Ppm, decoder)?;
        }
    }
    Ok(())
}

/// Stick input from the ground station
pub fn configure_gcs_receiver<B: Board>(
    board: &mut B,
    res: &mut BoardResources,
) -> Result<(), BootAbort> {
    if !res.capabilities.contains(Capabilities::GCS_RCVR) {
        return Ok(());
    }
    let decoder = board.gcs_init().or_halt("GCS receiver")?;
    register_receiver(board, res, ChannelGroup::Gcs, decoder)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{Event, Fail, MockBoard};
    use brain_board_core::parameters::HardwareConfiguration;
    use brain_board_core::ports::{ChannelPurpose, DsmProtocol, HsumProtocol, UsartPort};

    fn res() -> BoardResources {
        BoardResources::new(HardwareConfiguration::default(), Capabilities::BRAIN)
    }

    fn stream_shape(res: &BoardResources, purpose: ChannelPurpose) -> Option<(ComDriver, u16, u16)> {
        res.channel(purpose)
            .map(|c| (c.driver, c.rx_len(), c.tx_len()))
    }

    #[test]
    fn test_gps_on_main() {
        let mut board = MockBoard::new();
        let mut res = res();
        let got = configure_port(&mut board, &mut res, PortRole::Main, PortFunction::Gps).unwrap();

        assert!(matches!(got, Some(PortAssignment::Channel(_))));
        assert_eq!(
            stream_shape(&res, ChannelPurpose::Gps),
            Some((ComDriver::Usart(UsartPort::Main), 32, 16))
        );
        assert!(board.has(Event::UsartInit(UsartPort::Main, UsartMode::Standard)));
    }

    #[test]
    fn test_same_function_same_shape_on_every_role() {
        for function in PortFunction::ALL {
            let mut shapes: heapless::Vec<(u16, u16), 3> = heapless::Vec::new();
            for role in [PortRole::Main, PortRole::Flexi, PortRole::RxPortUsart] {
                let mut board = MockBoard::new();
                let mut res = res();
                if let Some(PortAssignment::Channel(id)) =
                    configure_port(&mut board, &mut res, role, function).unwrap()
                {
                    let ch = res.channels.channel(id).unwrap();
                    shapes.push((ch.rx_len(), ch.tx_len())).unwrap();
                }
            }
            for shape in shapes.iter() {
                assert_eq!(*shape, shapes[0], "{}", function.name());
            }
        }
    }

    #[test]
    fn test_mavlink_gps_share_one_channel() {
        let mut board = MockBoard::new();
        let mut res = res();
        configure_port(&mut board, &mut res, PortRole::Main, PortFunction::MavlinkTxGpsRx).unwrap();

        let gps = res.channels.id_of(ChannelPurpose::Gps).unwrap();
        assert_eq!(res.channels.id_of(ChannelPurpose::Mavlink), Some(gps));
        assert_eq!(res.channels.len(), 1);
        assert_eq!(
            stream_shape(&res, ChannelPurpose::Mavlink),
            Some((ComDriver::Usart(UsartPort::Main), 32, 128))
        );
    }

    #[test]
    fn test_unsupported_function_is_skipped() {
        let mut board = MockBoard::new();
        let mut res = res();
        assert_eq!(
            configure_port(&mut board, &mut res, PortRole::Flexi, PortFunction::SBus),
            Ok(None)
        );
        assert_eq!(
            configure_port(&mut board, &mut res, PortRole::Main, PortFunction::I2c),
            Ok(None)
        );
        assert!(board.events().is_empty());
    }

    #[test]
    fn test_missing_capability_is_skipped() {
        let mut board = MockBoard::new();
        let mut res = BoardResources::new(
            HardwareConfiguration::default(),
            Capabilities::BRAIN - Capabilities::GPS,
        );
        assert_eq!(
            configure_port(&mut board, &mut res, PortRole::Flexi, PortFunction::Gps),
            Ok(None)
        );
        assert!(!res.channels.is_bound(ChannelPurpose::Gps));
        assert!(board.events().is_empty());
    }

    #[test]
    fn test_disabled_does_nothing() {
        let mut board = MockBoard::new();
        let mut res = res();
        for role in PortRole::ALL {
            assert_eq!(
                configure_port(&mut board, &mut res, role, PortFunction::Disabled),
                Ok(None)
            );
        }
        assert!(board.events().is_empty());
    }

    #[test]
    fn test_dsm_registers_main_port_group() {
        let mut board = MockBoard::new();
        let mut res = res();
        res.config.dsmx_bind = 7;
        let got = configure_port(
            &mut board,
            &mut res,
            PortRole::Flexi,
            PortFunction::Dsm(DsmProtocol::Dsmx10Bit),
        )
        .unwrap();

        let Some(PortAssignment::Receiver { group, rcvr }) = got else {
            panic!("{:?}", got);
        };
        assert_eq!(group, ChannelGroup::DsmMainPort);
        assert_eq!(res.receivers.get(ChannelGroup::DsmMainPort), Some(rcvr));
        assert!(board.has(Event::UsartInit(UsartPort::Flexi, UsartMode::DsmHsum)));
        assert!(board.has(Event::DsmInit(DsmProtocol::Dsmx10Bit, 7)));
        assert!(res.channels.is_empty());
    }

    #[test]
    fn test_sbus_and_hsum_decoders() {
        let mut board = MockBoard::new();
        let mut res = res();
        configure_port(&mut board, &mut res, PortRole::Main, PortFunction::SBus).unwrap();
        configure_port(
            &mut board,
            &mut res,
            PortRole::RxPortUsart,
            PortFunction::HottSum(HsumProtocol::SumD),
        )
        .unwrap();

        assert!(board.has(Event::UsartInit(UsartPort::Main, UsartMode::SBus)));
        assert!(board.has(Event::HsumInit(HsumProtocol::SumD)));
        assert!(res.receivers.get(ChannelGroup::SBus).is_some());
        assert!(res.receivers.get(ChannelGroup::HottSum).is_some());
    }

    #[test]
    fn test_rebinding_keeps_later_channel() {
        let mut board = MockBoard::new();
        let mut res = res();
        configure_port(&mut board, &mut res, PortRole::Main, PortFunction::Telemetry).unwrap();
        configure_port(&mut board, &mut res, PortRole::Flexi, PortFunction::Telemetry).unwrap();

        assert_eq!(res.channels.len(), 2);
        assert_eq!(
            stream_shape(&res, ChannelPurpose::TelemetryRf),
            Some((ComDriver::Usart(UsartPort::Flexi), 512, 512))
        );
    }

    #[test]
    fn test_buffers_follow_dispatch_order() {
        let mut board = MockBoard::new();
        let mut res = res();
        configure_port(&mut board, &mut res, PortRole::Main, PortFunction::ComBridge).unwrap();
        configure_port(&mut board, &mut res, PortRole::Flexi, PortFunction::Gps).unwrap();

        let bridge = res.channel(ChannelPurpose::ComBridge).unwrap();
        let gps = res.channel(ChannelPurpose::Gps).unwrap();
        assert_eq!(bridge.rx.unwrap().offset, 0);
        assert!(bridge.tx.unwrap().offset < gps.rx.unwrap().offset);
        assert!(gps.rx.unwrap().offset < gps.tx.unwrap().offset);
    }

    #[test]
    fn test_transmit_only_channel_has_no_rx_buffer() {
        let mut board = MockBoard::new();
        let mut res = res();
        configure_port(&mut board, &mut res, PortRole::Main, PortFunction::FrskySensorHub).unwrap();
        let ch = res.channel(ChannelPurpose::FrskySensorHub).unwrap();
        assert_eq!(ch.rx, None);
        assert_eq!(ch.tx_len(), 128);
    }

    #[test]
    fn test_driver_failure_halts() {
        let mut board = MockBoard::new();
        let mut res = res();
        board.fail_on(Fail::USART);
        assert_eq!(
            configure_port(&mut board, &mut res, PortRole::Main, PortFunction::Gps),
            Err(BootAbort::Halt("MainPort"))
        );

        let mut board = MockBoard::new();
        board.fail_on(Fail::COM);
        assert_eq!(
            configure_port(&mut board, &mut res, PortRole::Main, PortFunction::Gps),
            Err(BootAbort::Halt("gps"))
        );
    }

    #[test]
    fn test_flexi_i2c() {
        let mut board = MockBoard::new();
        let mut res = res();
        let got = configure_port(&mut board, &mut res, PortRole::Flexi, PortFunction::I2c).unwrap();
        assert_eq!(got, res.aux_i2c.map(PortAssignment::AuxBus));
        assert!(res.aux_i2c.is_some());
        // stuck-bus check is not built into the stock firmware
        assert!(!board.has(Event::I2cCheckClear(I2cBus::Flexi)));
    }

    #[test]
    fn test_flexi_i2c_stuck_blinks_six() {
        let mut board = MockBoard::new();
        let mut res = BoardResources::new(
            HardwareConfiguration::default(),
            Capabilities::BRAIN | Capabilities::AUX_BUS_CHECK,
        );
        board.set_bus_stuck(I2cBus::Flexi, u32::MAX);
        assert_eq!(
            configure_port(&mut board, &mut res, PortRole::Flexi, PortFunction::I2c),
            Err(BootAbort::Fault(FaultCode::AuxBusStuck))
        );
    }

    #[test]
    fn test_rx_port_modes() {
        let mut board = MockBoard::new();
        let mut res = res();
        configure_rx_port(&mut board, &mut res, RxPortMode::Pwm).unwrap();
        assert!(res.receivers.get(ChannelGroup::Pwm).is_some());
        assert!(!board.has(Event::PpmInit));

        let mut board = MockBoard::new();
        let mut res = self::res();
        configure_rx_port(&mut board, &mut res, RxPortMode::PpmOutputs).unwrap();
        assert!(res.receivers.get(ChannelGroup::Ppm).is_some());

        let mut board = MockBoard::new();
        let mut res = self::res();
        configure_rx_port(&mut board, &mut res, RxPortMode::PpmUsart).unwrap();
        assert!(board.has(Event::PpmInit));
        assert_eq!(board.count(|e| matches!(e, Event::RcvrInit(_))), 1);
        assert_eq!(res.receivers.bound().count(), 0);

        let mut board = MockBoard::new();
        let mut res = self::res();
        for mode in [RxPortMode::Disabled, RxPortMode::Outputs, RxPortMode::Usart] {
            configure_rx_port(&mut board, &mut res, mode).unwrap();
        }
        assert!(board.events().is_empty());
    }

    #[test]
    fn test_gcs_receiver() {
        let mut board = MockBoard::new();
        let mut res = res();
        configure_gcs_receiver(&mut board, &mut res).unwrap();
        assert!(res.receivers.get(ChannelGroup::Gcs).is_some());

        board.fail_on(Fail::GCS);
        assert_eq!(
            configure_gcs_receiver(&mut board, &mut res),
            Err(BootAbort::Halt("GCS receiver"))
        );
    }
}
