//! Parameter Storage Types
//!
//! Provides the parameter value types and the `ParameterStore` the bring-up
//! settings groups are read from. The store remembers each parameter's
//! registered default so whole groups can be put back to factory values.

use super::error::ParameterError;
use bitflags::bitflags;
use heapless::FnvIndexMap;
use heapless::String;

/// Maximum parameter name length
pub const PARAM_NAME_LEN: usize = 16;

/// Maximum number of parameters
pub const MAX_PARAMS: usize = 32;

bitflags! {
    /// Parameter flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ParamFlags: u8 {
        /// Parameter is hidden from listings
        const HIDDEN = 0b00000001;
        /// Parameter is read-only (cannot be modified through `set`)
        const READ_ONLY = 0b00000010;
    }
}

/// Parameter value types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    /// Boolean parameter
    Bool(bool),
    /// 32-bit signed integer (enumerations are stored as their code)
    Int(i32),
    /// 32-bit floating point
    Float(f32),
}

impl ParamValue {
    /// Get type discriminant for serialization
    pub fn type_id(&self) -> u8 {
        match self {
            ParamValue::Bool(_) => 1,
            ParamValue::Int(_) => 2,
            ParamValue::Float(_) => 3,
        }
    }
}

/// Parameter metadata
#[derive(Debug, Clone, Copy)]
pub struct ParamMetadata {
    /// Parameter flags
    pub flags: ParamFlags,
    /// Value given at registration
    pub default: ParamValue,
}

/// Parameter store for configuration management
///
/// Stores parameters as key-value pairs with metadata (flags, default).
pub struct ParameterStore {
    /// Parameter values
    parameters: FnvIndexMap<String<PARAM_NAME_LEN>, ParamValue, MAX_PARAMS>,
    /// Parameter metadata
    metadata: FnvIndexMap<String<PARAM_NAME_LEN>, ParamMetadata, MAX_PARAMS>,
    /// Dirty flag (needs Flash write)
    dirty: bool,
}

fn key(name: &str) -> Result<String<PARAM_NAME_LEN>, ParameterError> {
    let mut key = String::<PARAM_NAME_LEN>::new();
    key.push_str(name)
        .map_err(|_| ParameterError::InvalidConfig)?;
    Ok(key)
}

impl ParameterStore {
    /// Create a new empty parameter store
    pub fn new() -> Self {
        Self {
            parameters: FnvIndexMap::new(),
            metadata: FnvIndexMap::new(),
            dirty: false,
        }
    }

    /// Get parameter value
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.parameters.get(&key(name).ok()?)
    }

    /// Set parameter value
    ///
    /// Marks the store as dirty (needs Flash write).
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ParameterError> {
        let key = key(name)?;

        if !self.parameters.contains_key(&key) {
            return Err(ParameterError::InvalidConfig);
        }

        if let Some(meta) = self.metadata.get(&key) {
            if meta.flags.contains(ParamFlags::READ_ONLY) {
                return Err(ParameterError::ReadOnly);
            }
        }

        self.parameters
            .insert(key, value)
            .map_err(|_| ParameterError::StoreFull)?;
        self.dirty = true;
        Ok(())
    }

    /// Register a new parameter with default value and flags
    ///
    /// An existing value is kept (idempotent). A value restored with
    /// [`insert_raw`](Self::insert_raw) before registration keeps its value
    /// and gains the metadata.
    pub fn register(
        &mut self,
        name: &str,
        default_value: ParamValue,
        flags: ParamFlags,
    ) -> Result<(), ParameterError> {
        let key = key(name)?;

        if !self.parameters.contains_key(&key) {
            self.parameters
                .insert(key.clone(), default_value)
                .map_err(|_| ParameterError::StoreFull)?;
            self.dirty = true;
        }
        if !self.metadata.contains_key(&key) {
            self.metadata
                .insert(
                    key,
                    ParamMetadata {
                        flags,
                        default: default_value,
                    },
                )
                .map_err(|_| ParameterError::StoreFull)?;
        }
        Ok(())
    }

    /// Put a parameter back to the value it was registered with
    ///
    /// Read-only parameters are reset as well; the default is not a user edit.
    pub fn reset(&mut self, name: &str) -> Result<(), ParameterError> {
        let key = key(name)?;
        let default = self
            .metadata
            .get(&key)
            .map(|meta| meta.default)
            .ok_or(ParameterError::InvalidConfig)?;
        self.parameters
            .insert(key, default)
            .map_err(|_| ParameterError::StoreFull)?;
        self.dirty = true;
        Ok(())
    }

    /// Check if parameter is hidden
    pub fn is_hidden(&self, name: &str) -> bool {
        self.get_metadata(name)
            .map(|meta| meta.flags.contains(ParamFlags::HIDDEN))
            .unwrap_or(false)
    }

    /// Get all parameter names (excluding hidden parameters)
    pub fn iter_names(&self) -> impl Iterator<Item = &String<PARAM_NAME_LEN>> {
        self.parameters
            .keys()
            .filter(|name| !self.is_hidden(name.as_str()))
    }

    /// Get parameter count (excluding hidden parameters)
    pub fn count(&self) -> usize {
        self.iter_names().count()
    }

    /// Check if store has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear dirty flag (called after successful flash save)
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Get total parameter count (including hidden parameters)
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Get metadata for a parameter by name
    pub fn get_metadata(&self, name: &str) -> Option<&ParamMetadata> {
        self.metadata.get(&key(name).ok()?)
    }

    /// Insert a parameter directly without validation
    ///
    /// Used when restoring a persisted snapshot. Bypasses read-only and
    /// existence checks and does not touch the registered default. Values
    /// restored this way may be of the wrong type or out of range; the
    /// settings groups decode them defensively.
    pub fn insert_raw(&mut self, name: &str, value: ParamValue) -> Result<(), ParameterError> {
        let key = key(name)?;
        self.parameters
            .insert(key, value)
            .map_err(|_| ParameterError::StoreFull)?;
        Ok(())
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_value_type_id() {
        assert_eq!(ParamValue::Bool(true).type_id(), 1);
        assert_eq!(ParamValue::Int(42).type_id(), 2);
        assert_eq!(ParamValue::Float(1.0).type_id(), 3);
    }

    #[test]
    fn test_parameter_store_new() {
        let store = ParameterStore::new();
        assert_eq!(store.count(), 0);
        assert!(store.is_empty());
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_parameter_store_register_and_get() {
        let mut store = ParameterStore::new();
        store
            .register("TEST", ParamValue::Int(42), ParamFlags::empty())
            .unwrap();
        assert_eq!(store.get("TEST"), Some(&ParamValue::Int(42)));
    }

    #[test]
    fn test_parameter_store_set_unknown() {
        let mut store = ParameterStore::new();
        assert_eq!(
            store.set("UNKNOWN", ParamValue::Int(1)),
            Err(ParameterError::InvalidConfig)
        );
    }

    #[test]
    fn test_parameter_store_register_idempotent() {
        let mut store = ParameterStore::new();
        store
            .register("TEST", ParamValue::Int(42), ParamFlags::empty())
            .unwrap();
        store.set("TEST", ParamValue::Int(100)).unwrap();
        // Re-register should not overwrite
        store
            .register("TEST", ParamValue::Int(7), ParamFlags::empty())
            .unwrap();
        assert_eq!(store.get("TEST"), Some(&ParamValue::Int(100)));
    }

    #[test]
    fn test_reset_restores_registered_default() {
        let mut store = ParameterStore::new();
        store
            .register("TEST", ParamValue::Int(42), ParamFlags::empty())
            .unwrap();
        store.set("TEST", ParamValue::Int(100)).unwrap();
        store.clear_dirty();

        store.reset("TEST").unwrap();
        assert_eq!(store.get("TEST"), Some(&ParamValue::Int(42)));
        assert!(store.is_dirty());
        assert_eq!(store.reset("NOPE"), Err(ParameterError::InvalidConfig));
    }

    #[test]
    fn test_insert_raw_keeps_default() {
        let mut store = ParameterStore::new();
        store
            .register("TEST", ParamValue::Int(1), ParamFlags::READ_ONLY)
            .unwrap();
        store.insert_raw("TEST", ParamValue::Float(9.5)).unwrap();
        assert_eq!(store.get("TEST"), Some(&ParamValue::Float(9.5)));
        assert_eq!(
            store.get_metadata("TEST").map(|m| m.default),
            Some(ParamValue::Int(1))
        );
    }

    #[test]
    fn test_restore_before_register() {
        let mut store = ParameterStore::new();
        store.insert_raw("TEST", ParamValue::Int(7)).unwrap();
        store
            .register("TEST", ParamValue::Int(1), ParamFlags::empty())
            .unwrap();
        assert_eq!(store.get("TEST"), Some(&ParamValue::Int(7)));

        store.reset("TEST").unwrap();
        assert_eq!(store.get("TEST"), Some(&ParamValue::Int(1)));
    }

    #[test]
    fn test_parameter_hidden() {
        let mut store = ParameterStore::new();
        store
            .register("SECRET", ParamValue::Int(3), ParamFlags::HIDDEN)
            .unwrap();
        assert!(store.is_hidden("SECRET"));
        assert_eq!(store.count(), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_parameter_read_only() {
        let mut store = ParameterStore::new();
        store
            .register("READONLY", ParamValue::Int(42), ParamFlags::READ_ONLY)
            .unwrap();
        assert_eq!(
            store.set("READONLY", ParamValue::Int(100)),
            Err(ParameterError::ReadOnly)
        );
    }

    #[test]
    fn test_name_too_long() {
        let mut store = ParameterStore::new();
        assert_eq!(
            store.register(
                "THIS_NAME_IS_TOO_LONG",
                ParamValue::Bool(true),
                ParamFlags::empty()
            ),
            Err(ParameterError::InvalidConfig)
        );
    }
}
