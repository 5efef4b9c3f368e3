//! Port roles, functions and what they bind to
//!
//! - [`function`]: roles, serial functions, receiver-port modes, USB functions
//! - [`table`]: role-independent function bindings and per-role tables
//! - [`channel`]: channel purposes, buffer sizes, the channel table
//! - [`receiver`]: receiver channel groups

pub mod channel;
pub mod function;
pub mod receiver;
pub mod table;

pub use channel::{
    ChannelBuffer, ChannelId, ChannelPurpose, ChannelTable, ChannelTableFull, ComDriver,
    CommunicationChannel,
};
pub use function::{
    DsmProtocol, HsumProtocol, PortFunction, PortRole, RxPortMode, ServoLayout, UsbHidFunction,
    UsbVcpFunction,
};
pub use receiver::{ChannelGroup, ReceiverGroupMap};
pub use table::{
    binding_for, hid_binding, vcp_binding, FrameDecoder, FunctionSet, PortBinding, PortTable, ReceiverSpec, StreamSpec,
    UsartMode, UsartPort,
};
