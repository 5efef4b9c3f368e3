//! Crate-wide infrastructure shared by the platform and board layers

pub mod logging;
