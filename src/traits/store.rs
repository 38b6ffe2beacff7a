use crate::error::PilotError;

/// Persisted key/value storage that survives process restarts
///
/// Getters return `None` for keys that were never written or were deleted.
pub trait DurableStore {
    fn get_bool(&self, key: &str) -> Option<bool>;

    fn set_bool(&mut self, key: &str, value: bool) -> Result<(), PilotError>;

    fn get_int(&self, key: &str) -> Option<i64>;

    fn set_int(&mut self, key: &str, value: i64) -> Result<(), PilotError>;

    fn delete_key(&mut self, key: &str) -> Result<(), PilotError>;

    /// Hold back durable writes until [`commit`](Self::commit)
    fn begin_batch(&mut self) {}

    /// Make every write since [`begin_batch`](Self::begin_batch) durable at once
    fn commit(&mut self) -> Result<(), PilotError> {
        Ok(())
    }
}
