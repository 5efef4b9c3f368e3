//! Board bring-up
//!
//! Drives the Brain board from reset to a wired peripheral set. The entry
//! point is [`board_init`]; [`Bringup`] runs the same sequence but returns the
//! abort instead of entering the fault loop, which is what host tests use.

pub mod abort;
pub mod allocator;
pub mod boot_count;
pub mod dispatcher;
pub mod fault;
pub mod init;
pub mod resources;
pub mod sensors;
pub mod usb;

pub use abort::BootAbort;
pub use allocator::{BufferPool, PoolExhausted, CHANNEL_POOL_LEN};
pub use boot_count::{apply_boot_count, mark_boot_successful, FlashBootCounter};
pub use dispatcher::{configure_gcs_receiver, configure_port, configure_rx_port, PortAssignment};
pub use init::{board_init, Bringup, NO_TELEMETRY};
pub use resources::BoardResources;
