//! Parameter management types and settings groups
//!
//! The store holds typed values by name. The groups decode the names they
//! own into typed snapshots, substituting defaults for anything unusable.

pub mod error;
pub mod hw_brain;
pub mod module;
pub mod osd;
pub mod storage;

pub use error::ParameterError;
pub use hw_brain::{HardwareConfiguration, Substitutions, HW_PARAM_NAMES};
pub use module::{AdminState, ModuleParams};
pub use osd::OsdParams;
pub use storage::{ParamFlags, ParamMetadata, ParamValue, ParameterStore, MAX_PARAMS, PARAM_NAME_LEN};

/// Register every settings group consumed during bring-up
pub fn register_all(store: &mut ParameterStore) -> Result<(), ParameterError> {
    HardwareConfiguration::register_defaults(store)?;
    ModuleParams::register_defaults(store)?;
    OsdParams::register_defaults(store)?;
    Ok(())
}
