use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier that keeps resolving to the same scene object across frames and restarts
///
/// The core never holds a reference to the object itself, only this handle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StableId(pub i64);

impl StableId {
    /// Zero is never handed out by a host and reads back as "no object"
    pub const NONE: StableId = StableId(0);

    pub fn is_none(&self) -> bool {
        self.0 == 0
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for StableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<i64> for StableId {
    fn from(value: i64) -> Self {
        StableId(value)
    }
}
