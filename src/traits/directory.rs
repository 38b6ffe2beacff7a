use crate::math::Pose;
use crate::types::StableId;

/// Scene object presenting the "has a transform" capability
pub trait PilotTarget {
    /// Display name used in log lines
    fn name(&self) -> &str;

    /// Current world pose of the object
    fn pose(&self) -> Pose;

    /// Whether the object also carries a camera
    fn has_camera(&self) -> bool {
        false
    }
}

/// Resolves stable ids to live objects owned by the host scene
pub trait ObjectDirectory {
    /// Look up a live object with a transform, or `None` if it is gone
    fn resolve(&self, id: StableId) -> Option<&dyn PilotTarget>;
}
