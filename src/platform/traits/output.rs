//! Servo outputs, debug pins and the video overlay

use brain_board_core::ports::ServoLayout;

use crate::platform::Result;

/// Output bring-up interface
pub trait OutputInterface {
    /// Configure servo output timers for a layout
    fn servo_init(&mut self, layout: ServoLayout) -> Result<()>;

    /// Use the servo timer pins as debug pins
    fn debug_pins_init(&mut self);

    /// Drive the video mask pin low so the overlay stays transparent
    fn video_mask_low(&mut self);

    /// Black and white level PWM for the overlay
    fn bw_levels_init(&mut self) -> Result<()>;

    /// Start the video overlay driver
    fn video_init(&mut self) -> Result<()>;
}
