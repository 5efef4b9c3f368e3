//! Mock board implementation for testing
//!
//! Implements every bring-up interface in memory. Each driver call is
//! appended to an event log so tests can assert on ordering, and any step can
//! be made to fail. Delays advance a simulated clock instead of sleeping.

use bitflags::bitflags;
use std::vec::Vec;

use brain_board_core::handle::{BusHandle, ComHandle, DecoderHandle, RcvrHandle};
use brain_board_core::ports::{
    ChannelBuffer, ComDriver, DsmProtocol, HsumProtocol, ServoLayout, UsartMode, UsartPort,
};
use brain_board_core::sensors::{AccelScale, GyroScale, MagOrientation};
use embedded_hal::delay::DelayNs;

use crate::platform::error::{
    FlashError, I2cError, PlatformError, SensorError, SpiError, UsartError, UsbError,
};
use crate::platform::traits::{
    BusInterface, Filesystem, I2cBus, LedInterface, OutputInterface, ReceiverInterface,
    SensorInterface, SerialInterface, SpiBus, StorageInterface, SystemInterface, TimerBank,
    TimerInterface, UsbDescriptor, UsbInterface, WatchdogInterface,
};
use crate::platform::Result;

bitflags! {
    /// Driver steps that report failure
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Fail: u64 {
        const DELAY = 1 << 0;
        const LED = 1 << 1;
        const I2C_INTERNAL = 1 << 2;
        const I2C_FLEXI = 1 << 3;
        const SPI = 1 << 4;
        const FLASH_INTERNAL = 1 << 5;
        const FLASH_JEDEC = 1 << 6;
        const MOUNT_SETTINGS = 1 << 7;
        const MOUNT_WAYPOINTS = 1 << 8;
        const RTC = 1 << 9;
        const WATCHDOG = 1 << 10;
        const TIMER_CLOCK = 1 << 11;
        const GPIO = 1 << 12;
        const ADC = 1 << 13;
        const USB_BOARD = 1 << 14;
        const USB_DESC = 1 << 15;
        const USB = 1 << 16;
        const USB_CDC = 1 << 17;
        const USB_HID = 1 << 18;
        const USART = 1 << 19;
        const COM = 1 << 20;
        const SBUS = 1 << 21;
        const DSM = 1 << 22;
        const HSUM = 1 << 23;
        const PWM = 1 << 24;
        const PPM = 1 << 25;
        const GCS = 1 << 26;
        const RCVR = 1 << 27;
        const SENSORS = 1 << 28;
        const LPS25H = 1 << 29;
        const MS5611_INIT = 1 << 30;
        const MS5611_TEST = 1 << 31;
        /// No MPU9250 answers the probe (an MPU6050 does)
        const MPU9250_PROBE = 1 << 32;
        const MPU9250_INIT = 1 << 33;
        /// MPU9250 init reports a missing data-ready interrupt
        const MPU9250_IRQ = 1 << 34;
        const MPU6050 = 1 << 35;
        const HMC5883_INIT = 1 << 36;
        const HMC5883_TEST = 1 << 37;
        const SERVO = 1 << 38;
        const BW_LEVELS = 1 << 39;
        const VIDEO = 1 << 40;
    }
}

/// One recorded driver call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    DelayInit,
    DelayMs(u32),
    LedInit,
    LedOn,
    LedOff,
    WatchdogInit,
    WatchdogClear,
    RtcInit,
    TimerClock(TimerBank),
    GpioInit,
    AdcInit,
    I2cInit(I2cBus),
    I2cCheckClear(I2cBus),
    SpiInit(SpiBus),
    FlashInternalInit,
    FlashJedecInit,
    Mount(Filesystem),
    UsbBoardInit,
    UsbDescInit(UsbDescriptor),
    UsbInit,
    UsbCdcInit,
    UsbHidInit,
    UsbHookActivate,
    UsartInit(UsartPort, UsartMode),
    ComInit {
        driver: ComDriver,
        com: ComHandle,
        rx_len: u16,
        tx_len: u16,
    },
    SbusInit,
    DsmInit(DsmProtocol, u8),
    HsumInit(HsumProtocol),
    PwmInit,
    PpmInit,
    GcsInit,
    RcvrInit(RcvrHandle),
    SensorsInit,
    Lps25hInit,
    Ms5611Init,
    Ms5611Test,
    Mpu9250Probe,
    Mpu9250Init { use_internal_mag: bool },
    Mpu6050Init,
    ImuRanges(GyroScale, AccelScale),
    Hmc5883Init(BusHandle),
    Hmc5883Test,
    Hmc5883Orientation(MagOrientation),
    ServoInit(ServoLayout),
    DebugPinsInit,
    VideoMaskLow,
    BwLevelsInit,
    VideoInit,
}

/// Mock board
///
/// # Example
///
/// ```ignore
/// use brain_board::platform::mock::{Event, Fail, MockBoard};
/// use brain_board::platform::traits::LedInterface;
///
/// let mut board = MockBoard::new();
/// board.fail_on(Fail::LED);
/// assert!(board.led_init().is_err());
/// assert_eq!(board.events(), &[Event::LedInit]);
/// ```
#[derive(Debug)]
pub struct MockBoard {
    events: Vec<Event>,
    fail: Fail,
    now_us: u64,
    next_handle: u32,
    debugger: bool,
    i2c_buses: Vec<(BusHandle, I2cBus)>,
    /// Remaining stuck checks per bus (internal, flexi); `u32::MAX` never clears
    stuck: [u32; 2],
}

impl MockBoard {
    /// Create a board where every step succeeds
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            fail: Fail::empty(),
            now_us: 0,
            next_handle: 1,
            debugger: false,
            i2c_buses: Vec::new(),
            stuck: [0; 2],
        }
    }

    /// Make the given steps fail from now on
    pub fn fail_on(&mut self, steps: Fail) {
        self.fail |= steps;
    }

    /// Let the given steps succeed again
    pub fn clear_failures(&mut self, steps: Fail) {
        self.fail -= steps;
    }

    /// Simulate a debug probe holding the core
    pub fn set_debugger_attached(&mut self, attached: bool) {
        self.debugger = attached;
    }

    /// Report SDA held low for the next `checks` stuck-bus checks of `bus`
    pub fn set_bus_stuck(&mut self, bus: I2cBus, checks: u32) {
        self.stuck[Self::bus_index(bus)] = checks;
    }

    /// Recorded driver calls in call order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Forget recorded calls (simulated time keeps running)
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Whether an event was recorded
    pub fn has(&self, event: Event) -> bool {
        self.events.contains(&event)
    }

    /// Index of the first occurrence of an event
    pub fn position(&self, event: Event) -> Option<usize> {
        self.events.iter().position(|e| *e == event)
    }

    /// Number of events matching a predicate
    pub fn count(&self, pred: impl Fn(&Event) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    /// Simulated time spent in delays (ms)
    pub fn elapsed_ms(&self) -> u64 {
        self.now_us / 1000
    }

    fn bus_index(bus: I2cBus) -> usize {
        match bus {
            I2cBus::Internal => 0,
            I2cBus::Flexi => 1,
        }
    }

    fn record(&mut self, event: Event) {
        self.events.push(event);
    }

    fn handle(&mut self) -> u32 {
        let h = self.next_handle;
        self.next_handle += 1;
        h
    }

    fn check(&self, step: Fail, error: PlatformError) -> Result<()> {
        if self.fail.contains(step) {
            Err(error)
        } else {
            Ok(())
        }
    }

    fn step(&mut self, event: Event, step: Fail, error: PlatformError) -> Result<()> {
        self.record(event);
        self.check(step, error)
    }
}

impl Default for MockBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl DelayNs for MockBoard {
    fn delay_ns(&mut self, ns: u32) {
        self.now_us = self.now_us.wrapping_add(u64::from(ns / 1000));
    }

    fn delay_us(&mut self, us: u32) {
        self.now_us = self.now_us.wrapping_add(u64::from(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.record(Event::DelayMs(ms));
        self.now_us = self.now_us.wrapping_add(u64::from(ms) * 1000);
    }
}

impl TimerInterface for MockBoard {
    fn now_us(&self) -> u64 {
        self.now_us
    }
}

impl LedInterface for MockBoard {
    fn led_init(&mut self) -> Result<()> {
        self.step(Event::LedInit, Fail::LED, PlatformError::InitializationFailed)
    }

    fn led_on(&mut self) {
        self.record(Event::LedOn);
    }

    fn led_off(&mut self) {
        self.record(Event::LedOff);
    }
}

impl WatchdogInterface for MockBoard {
    fn watchdog_init(&mut self) -> Result<()> {
        self.step(
            Event::WatchdogInit,
            Fail::WATCHDOG,
            PlatformError::InitializationFailed,
        )
    }

    fn watchdog_clear(&mut self) {
        self.record(Event::WatchdogClear);
    }

    fn debugger_attached(&self) -> bool {
        self.debugger
    }
}

impl SystemInterface for MockBoard {
    fn delay_init(&mut self) -> Result<()> {
        self.step(Event::DelayInit, Fail::DELAY, PlatformError::InitializationFailed)
    }

    fn rtc_init(&mut self) -> Result<()> {
        self.step(Event::RtcInit, Fail::RTC, PlatformError::InitializationFailed)
    }

    fn timer_clock_init(&mut self, bank: TimerBank) -> Result<()> {
        self.step(
            Event::TimerClock(bank),
            Fail::TIMER_CLOCK,
            PlatformError::InitializationFailed,
        )
    }

    fn gpio_init(&mut self) -> Result<()> {
        self.step(Event::GpioInit, Fail::GPIO, PlatformError::InitializationFailed)
    }

    fn adc_init(&mut self) -> Result<()> {
        self.step(Event::AdcInit, Fail::ADC, PlatformError::InitializationFailed)
    }
}

impl BusInterface for MockBoard {
    fn i2c_init(&mut self, bus: I2cBus) -> Result<BusHandle> {
        let step = match bus {
            I2cBus::Internal => Fail::I2C_INTERNAL,
            I2cBus::Flexi => Fail::I2C_FLEXI,
        };
        self.step(Event::I2cInit(bus), step, I2cError::BusError.into())?;
        let handle = BusHandle(self.handle());
        self.i2c_buses.push((handle, bus));
        Ok(handle)
    }

    fn i2c_check_clear(&mut self, handle: BusHandle) -> Result<()> {
        let bus = self
            .i2c_buses
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, b)| *b)
            .ok_or(PlatformError::ResourceUnavailable)?;
        self.record(Event::I2cCheckClear(bus));
        let remaining = &mut self.stuck[Self::bus_index(bus)];
        if *remaining == 0 {
            return Ok(());
        }
        if *remaining != u32::MAX {
            *remaining -= 1;
        }
        Err(I2cError::BusStuck.into())
    }

    fn spi_init(&mut self, bus: SpiBus) -> Result<BusHandle> {
        self.step(
            Event::SpiInit(bus),
            Fail::SPI,
            PlatformError::Spi(SpiError::ModeFault),
        )?;
        Ok(BusHandle(self.handle()))
    }
}

impl StorageInterface for MockBoard {
    fn flash_internal_init(&mut self) -> Result<()> {
        self.step(
            Event::FlashInternalInit,
            Fail::FLASH_INTERNAL,
            FlashError::ReadFailed.into(),
        )
    }

    fn flash_jedec_init(&mut self, _spi: BusHandle) -> Result<()> {
        self.step(
            Event::FlashJedecInit,
            Fail::FLASH_JEDEC,
            FlashError::UnknownDevice.into(),
        )
    }

    fn mount_filesystem(&mut self, fs: Filesystem) -> Result<()> {
        let step = match fs {
            Filesystem::Settings => Fail::MOUNT_SETTINGS,
            Filesystem::Waypoints => Fail::MOUNT_WAYPOINTS,
        };
        self.step(Event::Mount(fs), step, FlashError::MountFailed.into())
    }
}

impl UsbInterface for MockBoard {
    fn usb_board_init(&mut self) -> Result<()> {
        self.step(Event::UsbBoardInit, Fail::USB_BOARD, UsbError::Descriptor.into())
    }

    fn usb_desc_init(&mut self, descriptor: UsbDescriptor) -> Result<()> {
        self.step(
            Event::UsbDescInit(descriptor),
            Fail::USB_DESC,
            UsbError::Descriptor.into(),
        )
    }

    fn usb_init(&mut self) -> Result<BusHandle> {
        self.step(Event::UsbInit, Fail::USB, UsbError::ClassInit.into())?;
        Ok(BusHandle(self.handle()))
    }

    fn usb_cdc_init(&mut self, _usb: BusHandle) -> Result<BusHandle> {
        self.step(Event::UsbCdcInit, Fail::USB_CDC, UsbError::ClassInit.into())?;
        Ok(BusHandle(self.handle()))
    }

    fn usb_hid_init(&mut self, _usb: BusHandle) -> Result<BusHandle> {
        self.step(Event::UsbHidInit, Fail::USB_HID, UsbError::ClassInit.into())?;
        Ok(BusHandle(self.handle()))
    }

    fn usb_hook_activate(&mut self) {
        self.record(Event::UsbHookActivate);
    }
}

impl SerialInterface for MockBoard {
    fn usart_init(&mut self, port: UsartPort, mode: UsartMode) -> Result<BusHandle> {
        self.step(
            Event::UsartInit(port, mode),
            Fail::USART,
            PlatformError::Usart(UsartError::InvalidConfig),
        )?;
        Ok(BusHandle(self.handle()))
    }

    fn com_init(
        &mut self,
        driver: ComDriver,
        _lower: BusHandle,
        rx: Option<ChannelBuffer>,
        tx: Option<ChannelBuffer>,
    ) -> Result<ComHandle> {
        self.check(Fail::COM, PlatformError::InitializationFailed)?;
        let com = ComHandle(self.handle());
        self.record(Event::ComInit {
            driver,
            com,
            rx_len: rx.map(|b| b.len).unwrap_or(0),
            tx_len: tx.map(|b| b.len).unwrap_or(0),
        });
        Ok(com)
    }
}

impl ReceiverInterface for MockBoard {
    fn sbus_init(&mut self, _usart: BusHandle) -> Result<DecoderHandle> {
        self.step(Event::SbusInit, Fail::SBUS, PlatformError::InitializationFailed)?;
        Ok(DecoderHandle(self.handle()))
    }

    fn dsm_init(
        &mut self,
        _usart: BusHandle,
        protocol: DsmProtocol,
        bind_pulses: u8,
    ) -> Result<DecoderHandle> {
        self.step(
            Event::DsmInit(protocol, bind_pulses),
            Fail::DSM,
            PlatformError::InitializationFailed,
        )?;
        Ok(DecoderHandle(self.handle()))
    }

    fn hsum_init(&mut self, _usart: BusHandle, protocol: HsumProtocol) -> Result<DecoderHandle> {
        self.step(
            Event::HsumInit(protocol),
            Fail::HSUM,
            PlatformError::InitializationFailed,
        )?;
        Ok(DecoderHandle(self.handle()))
    }

    fn pwm_init(&mut self) -> Result<DecoderHandle> {
        self.step(Event::PwmInit, Fail::PWM, PlatformError::InitializationFailed)?;
        Ok(DecoderHandle(self.handle()))
    }

    fn ppm_init(&mut self) -> Result<DecoderHandle> {
        self.step(Event::PpmInit, Fail::PPM, PlatformError::InitializationFailed)?;
        Ok(DecoderHandle(self.handle()))
    }

    fn gcs_init(&mut self) -> Result<DecoderHandle> {
        self.step(Event::GcsInit, Fail::GCS, PlatformError::InitializationFailed)?;
        Ok(DecoderHandle(self.handle()))
    }

    fn rcvr_init(&mut self, _decoder: DecoderHandle) -> Result<RcvrHandle> {
        self.check(Fail::RCVR, PlatformError::InitializationFailed)?;
        let rcvr = RcvrHandle(self.handle());
        self.record(Event::RcvrInit(rcvr));
        Ok(rcvr)
    }
}

impl SensorInterface for MockBoard {
    fn sensors_init(&mut self) -> Result<()> {
        self.step(Event::SensorsInit, Fail::SENSORS, PlatformError::InitializationFailed)
    }

    fn lps25h_init(&mut self, _bus: BusHandle) -> Result<()> {
        self.step(Event::Lps25hInit, Fail::LPS25H, SensorError::NotFound.into())
    }

    fn ms5611_init(&mut self, _bus: BusHandle) -> Result<()> {
        self.step(Event::Ms5611Init, Fail::MS5611_INIT, SensorError::NotFound.into())
    }

    fn ms5611_test(&mut self) -> Result<()> {
        self.step(
            Event::Ms5611Test,
            Fail::MS5611_TEST,
            SensorError::SelfTestFailed.into(),
        )
    }

    fn mpu9250_probe(&mut self, _bus: BusHandle, _addr: u8) -> Result<()> {
        self.step(Event::Mpu9250Probe, Fail::MPU9250_PROBE, SensorError::BadId.into())
    }

    fn mpu9250_init(&mut self, _bus: BusHandle, _addr: u8, use_internal_mag: bool) -> Result<()> {
        self.record(Event::Mpu9250Init { use_internal_mag });
        self.check(Fail::MPU9250_IRQ, SensorError::MissingIrq.into())?;
        self.check(Fail::MPU9250_INIT, SensorError::NotFound.into())
    }

    fn mpu6050_init(&mut self, _bus: BusHandle, _addr: u8) -> Result<()> {
        self.step(Event::Mpu6050Init, Fail::MPU6050, SensorError::NotFound.into())
    }

    fn imu_set_ranges(&mut self, gyro: GyroScale, accel: AccelScale) {
        self.record(Event::ImuRanges(gyro, accel));
    }

    fn hmc5883_init(&mut self, bus: BusHandle) -> Result<()> {
        self.step(
            Event::Hmc5883Init(bus),
            Fail::HMC5883_INIT,
            SensorError::NotFound.into(),
        )
    }

    fn hmc5883_test(&mut self) -> Result<()> {
        self.step(
            Event::Hmc5883Test,
            Fail::HMC5883_TEST,
            SensorError::SelfTestFailed.into(),
        )
    }

    fn hmc5883_set_orientation(&mut self, orientation: MagOrientation) {
        self.record(Event::Hmc5883Orientation(orientation));
    }
}

impl OutputInterface for MockBoard {
    fn servo_init(&mut self, layout: ServoLayout) -> Result<()> {
        self.step(
            Event::ServoInit(layout),
            Fail::SERVO,
            PlatformError::InitializationFailed,
        )
    }

    fn debug_pins_init(&mut self) {
        self.record(Event::DebugPinsInit);
    }

    fn video_mask_low(&mut self) {
        self.record(Event::VideoMaskLow);
    }

    fn bw_levels_init(&mut self) -> Result<()> {
        self.step(Event::BwLevelsInit, Fail::BW_LEVELS, PlatformError::InitializationFailed)
    }

    fn video_init(&mut self) -> Result<()> {
        self.step(Event::VideoInit, Fail::VIDEO, PlatformError::InitializationFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delays_advance_simulated_time() {
        let mut board = MockBoard::new();
        board.delay_ms(200);
        board.delay_us(1500);
        assert_eq!(board.now_us(), 201_500);
        assert_eq!(board.elapsed_ms(), 201);
        assert_eq!(board.events(), &[Event::DelayMs(200)]);
    }

    #[test]
    fn test_failure_injection() {
        let mut board = MockBoard::new();
        assert!(board.rtc_init().is_ok());
        board.fail_on(Fail::RTC);
        assert_eq!(board.rtc_init(), Err(PlatformError::InitializationFailed));
        board.clear_failures(Fail::RTC);
        assert!(board.rtc_init().is_ok());
        assert_eq!(board.count(|e| *e == Event::RtcInit), 3);
    }

    #[test]
    fn test_combined_failures_clear_independently() {
        let mut board = MockBoard::new();
        board.fail_on(Fail::RTC | Fail::ADC);
        board.clear_failures(Fail::RTC);
        assert!(board.rtc_init().is_ok());
        assert!(board.adc_init().is_err());
    }

    #[test]
    fn test_handles_are_unique() {
        let mut board = MockBoard::new();
        let a = board.usart_init(UsartPort::Main, UsartMode::Standard).unwrap();
        let b = board.usart_init(UsartPort::Flexi, UsartMode::Standard).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_stuck_bus_clears_after_checks() {
        let mut board = MockBoard::new();
        let bus = board.i2c_init(I2cBus::Internal).unwrap();
        board.set_bus_stuck(I2cBus::Internal, 2);
        assert_eq!(
            board.i2c_check_clear(bus),
            Err(PlatformError::I2c(I2cError::BusStuck))
        );
        assert!(board.i2c_check_clear(bus).is_err());
        assert!(board.i2c_check_clear(bus).is_ok());
    }

    #[test]
    fn test_permanently_stuck_bus() {
        let mut board = MockBoard::new();
        let bus = board.i2c_init(I2cBus::Flexi).unwrap();
        board.set_bus_stuck(I2cBus::Flexi, u32::MAX);
        for _ in 0..10 {
            assert!(board.i2c_check_clear(bus).is_err());
        }
    }

    #[test]
    fn test_mpu9250_irq_reported_distinctly() {
        let mut board = MockBoard::new();
        board.fail_on(Fail::MPU9250_IRQ);
        assert_eq!(
            board.mpu9250_init(BusHandle(1), 0x68, true),
            Err(PlatformError::Sensor(SensorError::MissingIrq))
        );
    }
}
