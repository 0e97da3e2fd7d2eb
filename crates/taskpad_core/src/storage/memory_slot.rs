use super::{KeyValueSlot, StorageResult};
use std::collections::HashMap;

/// In-process slot. Nothing survives the process; used by tests and
/// ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    entries: HashMap<String, String>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot pre-populated with one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self { entries }
    }
}

impl KeyValueSlot for MemorySlot {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemorySlot;
    use crate::storage::KeyValueSlot;

    #[test]
    fn write_overwrites_previous_value() {
        let mut slot = MemorySlot::new();
        assert_eq!(slot.read("k").unwrap(), None);

        slot.write("k", "first").unwrap();
        slot.write("k", "second").unwrap();
        assert_eq!(slot.read("k").unwrap().as_deref(), Some("second"));
    }
}
