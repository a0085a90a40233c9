// Boundary to the emulator's memory store. The decoder only ever calls these
// four operations; thread safety of an implementation is its own concern.

use std::collections::{HashMap, HashSet};

/// External collaborator answering "read N bits at key K"
pub trait MemoryStore {
    /// Associate `key` with an absolute address and bit-field
    fn register_address(&mut self, key: &str, address: i64, bit_width: u32, bit_offset: u32);

    /// Associate `key` with a pointer dereference plus offset and bit-field
    fn register_pointer(
        &mut self,
        key: &str,
        base: i64,
        value_offset: i64,
        bit_width: u32,
        bit_offset: u32,
    );

    /// Current value for a registered key. Live values can change every
    /// frame, so results must never be cached across decode calls.
    fn read_value(&self, key: &str) -> i64;

    /// Drop all registrations
    fn reset(&mut self);
}

/// Table-backed store for tests and offline decoding: values are scripted per
/// key, unregistered or unscripted keys read as zero.
#[derive(Debug, Default)]
pub struct MemoryMap {
    values: HashMap<String, i64>,
    registered: HashSet<String>,
}

impl MemoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the value returned for `key`
    pub fn set(&mut self, key: impl Into<String>, value: i64) {
        self.values.insert(key.into(), value);
    }

    pub fn is_registered(&self, key: &str) -> bool {
        self.registered.contains(key)
    }

    pub fn registered_count(&self) -> usize {
        self.registered.len()
    }
}

impl MemoryStore for MemoryMap {
    fn register_address(&mut self, key: &str, _address: i64, _bit_width: u32, _bit_offset: u32) {
        self.registered.insert(key.to_string());
    }

    fn register_pointer(
        &mut self,
        key: &str,
        _base: i64,
        _value_offset: i64,
        _bit_width: u32,
        _bit_offset: u32,
    ) {
        self.registered.insert(key.to_string());
    }

    fn read_value(&self, key: &str) -> i64 {
        self.values.get(key).copied().unwrap_or(0)
    }

    fn reset(&mut self) {
        self.registered.clear();
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_map_round_trip() {
        let mut memory = MemoryMap::new();
        memory.register_address("256:8>>0", 256, 8, 0);
        assert!(memory.is_registered("256:8>>0"));
        assert_eq!(memory.read_value("256:8>>0"), 0);

        memory.set("256:8>>0", 42);
        assert_eq!(memory.read_value("256:8>>0"), 42);

        memory.reset();
        assert!(!memory.is_registered("256:8>>0"));
        assert_eq!(memory.read_value("256:8>>0"), 0);
    }
}
