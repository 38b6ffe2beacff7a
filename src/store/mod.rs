//! Durable state: the persisted projection of a pilot session and the
//! stores that hold it.

mod json_file;
mod memory;

pub use json_file::{JsonFileStore, StoreDocument, StoredValue};
pub use memory::MemoryStore;

use crate::error::PilotError;
use crate::traits::DurableStore;
use crate::types::StableId;

/// Piloting-active flag
pub const PILOTING_STATE_KEY: &str = "CamViewSync_IsPiloting";
/// Stable id of the piloted object
pub const PILOTED_TARGET_ID_KEY: &str = "CamViewSync_CameraInstanceID";

/// What survives a restart of a pilot session
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PersistedPilotRecord {
    pub active: bool,
    pub target: StableId,
}

impl PersistedPilotRecord {
    pub fn piloting(target: StableId) -> Self {
        Self {
            active: true,
            target,
        }
    }

    /// Read the record; `None` means nothing was persisted
    ///
    /// A missing id key reads back as [`StableId::NONE`].
    pub fn load(store: &dyn DurableStore) -> Option<Self> {
        let active = store.get_bool(PILOTING_STATE_KEY)?;
        let target = store
            .get_int(PILOTED_TARGET_ID_KEY)
            .map(StableId)
            .unwrap_or(StableId::NONE);
        Some(Self { active, target })
    }

    /// True when the record names a session worth resuming
    pub fn is_resumable(&self) -> bool {
        self.active && !self.target.is_none()
    }

    /// Write both keys as one batch
    pub fn save(&self, store: &mut dyn DurableStore) -> Result<(), PilotError> {
        store.begin_batch();
        let written = store
            .set_bool(PILOTING_STATE_KEY, self.active)
            .and_then(|_| store.set_int(PILOTED_TARGET_ID_KEY, self.target.get()));
        let committed = store.commit();
        written.and(committed)
    }

    pub fn clear(store: &mut dyn DurableStore) -> Result<(), PilotError> {
        store.begin_batch();
        let deleted = store
            .delete_key(PILOTING_STATE_KEY)
            .and_then(|_| store.delete_key(PILOTED_TARGET_ID_KEY));
        let committed = store.commit();
        deleted.and(committed)
    }
}
