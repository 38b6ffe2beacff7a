use super::directory::ObjectDirectory;
use crate::error::PilotError;
use crate::math::Pose;
use crate::types::StableId;

/// Host editing capabilities the pilot core mutates the scene through
pub trait SceneEditor: ObjectDirectory {
    /// Record the object's current pose into an undo entry named `label`,
    /// then apply `pose`, as one step.
    ///
    /// Returns `false` without touching anything if `id` no longer resolves.
    fn apply_undoable(&mut self, id: StableId, pose: Pose, label: &str) -> bool;

    /// Flag the object as having unsaved changes
    fn mark_dirty(&mut self, id: StableId);

    /// True while a live simulation (play mode) is running
    fn is_simulating(&self) -> bool;

    /// Ask dependent views to repaint
    fn request_redraw(&mut self);

    /// Show a non-blocking warning to the user
    fn notify(&mut self, warning: &PilotError);
}
