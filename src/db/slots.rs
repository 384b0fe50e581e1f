use std::collections::HashMap;

use crate::error::StoreError;

/// A durable key-value slot mechanism. Each collection lives under one key as
/// a JSON document.
pub trait SlotStore {
    /// `Ok(None)` when nothing was ever written under `key`.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the whole value stored under `key`.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Slots kept in a plain map. Nothing survives the process, which makes it the
/// backend of choice for tests and scratch sessions.
#[derive(Debug, Clone, Default)]
pub struct MemorySlots {
    entries: HashMap<String, String>,
}

impl MemorySlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw slot text, exactly as last written.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Put arbitrary text into a slot, bypassing serialization.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }
}

impl SlotStore for MemorySlots {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let slots = MemorySlots::new();
        assert_eq!(slots.read("courses").unwrap(), None);
    }

    #[test]
    fn write_replaces_previous_value() {
        let mut slots = MemorySlots::new();
        slots.write("courses", "[]").unwrap();
        slots.write("courses", "[1]").unwrap();
        assert_eq!(slots.get("courses"), Some("[1]"));
    }
}
