//! Optional module parameters
//!
//! Admin state of the optional flight software modules that consume the
//! channels bound during bring-up. These are reset together with the hardware
//! configuration when repeated failed boots are detected.
//!
//! # Parameters
//!
//! - `MOD_GPS` - GPS module
//! - `MOD_HOTT_TELEM` - HoTT telemetry module
//! - `MOD_FRSKY_HUB` - FrSky sensor hub module
//! - `MOD_LIGHTTELEM` - Light telemetry module
//! - `MOD_PICOC` - PicoC interpreter
//! - `MOD_COMBRIDGE` - Com bridge

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};

pub const MOD_GPS: &str = "MOD_GPS";
pub const MOD_HOTT_TELEM: &str = "MOD_HOTT_TELEM";
pub const MOD_FRSKY_HUB: &str = "MOD_FRSKY_HUB";
pub const MOD_LIGHTTELEM: &str = "MOD_LIGHTTELEM";
pub const MOD_PICOC: &str = "MOD_PICOC";
pub const MOD_COMBRIDGE: &str = "MOD_COMBRIDGE";

/// Module admin state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminState {
    Disabled = 0,
    Enabled = 1,
}

impl AdminState {
    fn from_value(value: Option<&ParamValue>, default: AdminState) -> Self {
        match value {
            Some(ParamValue::Int(0)) | Some(ParamValue::Bool(false)) => AdminState::Disabled,
            Some(ParamValue::Int(1)) | Some(ParamValue::Bool(true)) => AdminState::Enabled,
            _ => default,
        }
    }
}

/// Module admin states loaded from parameter store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleParams {
    pub gps: AdminState,
    pub hott_telemetry: AdminState,
    pub frsky_sensor_hub: AdminState,
    pub light_telemetry: AdminState,
    pub picoc: AdminState,
    pub com_bridge: AdminState,
}

impl Default for ModuleParams {
    fn default() -> Self {
        Self {
            gps: AdminState::Enabled,
            hott_telemetry: AdminState::Disabled,
            frsky_sensor_hub: AdminState::Disabled,
            light_telemetry: AdminState::Disabled,
            picoc: AdminState::Disabled,
            com_bridge: AdminState::Disabled,
        }
    }
}

impl ModuleParams {
    fn entries(&self) -> [(&'static str, AdminState); 6] {
        [
            (MOD_GPS, self.gps),
            (MOD_HOTT_TELEM, self.hott_telemetry),
            (MOD_FRSKY_HUB, self.frsky_sensor_hub),
            (MOD_LIGHTTELEM, self.light_telemetry),
            (MOD_PICOC, self.picoc),
            (MOD_COMBRIDGE, self.com_bridge),
        ]
    }

    /// Register module parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        for (name, state) in Self::default().entries() {
            store.register(name, ParamValue::Int(state as i32), ParamFlags::empty())?;
        }
        Ok(())
    }

    /// Load module parameters from parameter store
    pub fn from_store(store: &ParameterStore) -> Self {
        let d = Self::default();
        let get = |name: &str, default: AdminState| AdminState::from_value(store.get(name), default);
        Self {
            gps: get(MOD_GPS, d.gps),
            hott_telemetry: get(MOD_HOTT_TELEM, d.hott_telemetry),
            frsky_sensor_hub: get(MOD_FRSKY_HUB, d.frsky_sensor_hub),
            light_telemetry: get(MOD_LIGHTTELEM, d.light_telemetry),
            picoc: get(MOD_PICOC, d.picoc),
            com_bridge: get(MOD_COMBRIDGE, d.com_bridge),
        }
    }

    /// Put every module parameter back to its default
    pub fn reset_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        for (name, _) in Self::default().entries() {
            store.reset(name)?;
        }
        Ok(())
    }
}
