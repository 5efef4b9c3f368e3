//! On-screen display parameters
//!
//! - `OSD_ENABLE` - Start the video overlay (black/white level PWM and the
//!   video driver) at boot

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};

pub const OSD_ENABLE: &str = "OSD_ENABLE";

/// OSD parameters loaded from parameter store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OsdParams {
    pub enabled: bool,
}

impl OsdParams {
    /// Register OSD parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register(OSD_ENABLE, ParamValue::Bool(false), ParamFlags::empty())
    }

    /// Load OSD parameters from parameter store
    pub fn from_store(store: &ParameterStore) -> Self {
        let enabled = match store.get(OSD_ENABLE) {
            Some(ParamValue::Bool(v)) => *v,
            Some(ParamValue::Int(v)) => *v != 0,
            _ => false,
        };
        Self { enabled }
    }

    /// Put OSD parameters back to defaults
    pub fn reset_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.reset(OSD_ENABLE)
    }
}
