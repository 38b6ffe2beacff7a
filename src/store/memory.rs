use std::collections::HashMap;

use crate::error::PilotError;
use crate::traits::DurableStore;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Value {
    Bool(bool),
    Int(i64),
}

/// In-process store, for tests and hosts that keep their own persistence
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl DurableStore for MemoryStore {
    fn get_bool(&self, key: &str) -> Option<bool> {
        match self.values.get(key) {
            Some(Value::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    fn set_bool(&mut self, key: &str, value: bool) -> Result<(), PilotError> {
        self.values.insert(key.to_string(), Value::Bool(value));
        Ok(())
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        match self.values.get(key) {
            Some(Value::Int(i)) => Some(*i),
            _ => None,
        }
    }

    fn set_int(&mut self, key: &str, value: i64) -> Result<(), PilotError> {
        self.values.insert(key.to_string(), Value::Int(value));
        Ok(())
    }

    fn delete_key(&mut self, key: &str) -> Result<(), PilotError> {
        self.values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_read_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get_bool("flag"), None);
        assert_eq!(store.get_int("id"), None);
    }

    #[test]
    fn test_type_mismatch_reads_none() {
        let mut store = MemoryStore::new();
        store.set_int("flag", 1).unwrap();
        assert_eq!(store.get_bool("flag"), None);
        assert_eq!(store.get_int("flag"), Some(1));
    }

    #[test]
    fn test_overwrite_and_delete() {
        let mut store = MemoryStore::new();
        store.set_bool("flag", true).unwrap();
        store.set_bool("flag", false).unwrap();
        assert_eq!(store.get_bool("flag"), Some(false));
        assert_eq!(store.len(), 1);

        store.delete_key("flag").unwrap();
        store.delete_key("flag").unwrap();
        assert!(store.is_empty());
    }
}
