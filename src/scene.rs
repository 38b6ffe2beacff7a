use std::collections::{BTreeMap, BTreeSet};

use glam::{Quat, Vec3};

use crate::error::PilotError;
use crate::math::Pose;
use crate::traits::{ObjectDirectory, PilotTarget, SceneEditor};
use crate::types::StableId;

/// Object living in an [`EditorScene`]
#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
    pub id: StableId,
    pub name: String,
    pub pose: Pose,
    pub camera: bool,
}

impl PilotTarget for SceneObject {
    fn name(&self) -> &str {
        &self.name
    }

    fn pose(&self) -> Pose {
        self.pose
    }

    fn has_camera(&self) -> bool {
        self.camera
    }
}

/// One undoable pose change
#[derive(Clone, Debug, PartialEq)]
pub struct UndoEntry {
    pub target: StableId,
    pub before: Pose,
    pub after: Pose,
    pub label: String,
}

/// In-memory host scene: object directory, undo history, dirty tracking
#[derive(Debug)]
pub struct EditorScene {
    objects: BTreeMap<StableId, SceneObject>,
    next_id: i64,
    undo_stack: Vec<UndoEntry>,
    dirty: BTreeSet<StableId>,
    redraws: u64,
    warnings: Vec<String>,
    simulating: bool,
}

impl EditorScene {
    pub fn new() -> Self {
        Self {
            objects: BTreeMap::new(),
            next_id: 1,
            undo_stack: Vec::new(),
            dirty: BTreeSet::new(),
            redraws: 0,
            warnings: Vec::new(),
            simulating: false,
        }
    }

    pub fn spawn(&mut self, name: &str, pose: Pose, camera: bool) -> StableId {
        let id = StableId(self.next_id);
        self.insert(SceneObject {
            id,
            name: name.to_string(),
            pose,
            camera,
        });
        id
    }

    pub fn spawn_camera(&mut self, name: &str, pose: Pose) -> StableId {
        self.spawn(name, pose, true)
    }

    /// Insert an object under its own id (reloading a saved scene)
    pub fn insert(&mut self, object: SceneObject) {
        self.next_id = self.next_id.max(object.id.get() + 1);
        self.objects.insert(object.id, object);
    }

    /// Remove an object; later lookups by its id fail
    pub fn destroy(&mut self, id: StableId) -> bool {
        self.dirty.remove(&id);
        self.objects.remove(&id).is_some()
    }

    pub fn object(&self, id: StableId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.values()
    }

    pub fn find_by_name(&self, name: &str) -> Option<StableId> {
        self.objects.values().find(|o| o.name == name).map(|o| o.id)
    }

    pub fn pose_of(&self, id: StableId) -> Option<Pose> {
        self.objects.get(&id).map(|o| o.pose)
    }

    pub fn undo_entries(&self) -> &[UndoEntry] {
        &self.undo_stack
    }

    /// Revert the most recent pose change, if its object still exists
    pub fn undo(&mut self) -> Option<UndoEntry> {
        let entry = self.undo_stack.pop()?;
        if let Some(object) = self.objects.get_mut(&entry.target) {
            object.pose = entry.before;
        }
        Some(entry)
    }

    /// Drop all undo entries
    pub fn clear_history(&mut self) {
        self.undo_stack.clear();
    }

    pub fn is_dirty(&self, id: StableId) -> bool {
        self.dirty.contains(&id)
    }

    /// Forget unsaved-change flags (the scene was saved)
    pub fn clear_dirty(&mut self) {
        self.dirty.clear();
    }

    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn set_simulating(&mut self, simulating: bool) {
        self.simulating = simulating;
    }
}

impl Default for EditorScene {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectDirectory for EditorScene {
    fn resolve(&self, id: StableId) -> Option<&dyn PilotTarget> {
        self.objects.get(&id).map(|o| o as &dyn PilotTarget)
    }
}

impl SceneEditor for EditorScene {
    fn apply_undoable(&mut self, id: StableId, pose: Pose, label: &str) -> bool {
        let Some(object) = self.objects.get_mut(&id) else {
            return false;
        };
        self.undo_stack.push(UndoEntry {
            target: id,
            before: object.pose,
            after: pose,
            label: label.to_string(),
        });
        object.pose = pose;
        true
    }

    fn mark_dirty(&mut self, id: StableId) {
        if self.objects.contains_key(&id) {
            self.dirty.insert(id);
        }
    }

    fn is_simulating(&self) -> bool {
        self.simulating
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
    }

    fn notify(&mut self, warning: &PilotError) {
        self.warnings.push(warning.to_string());
    }
}

/// Small scene with two cameras and a prop without a camera
pub fn create_demo_scene() -> EditorScene {
    let mut scene = EditorScene::new();
    scene.spawn_camera(
        "Main Camera",
        Pose::new(Vec3::new(0.0, 1.0, -10.0), Quat::IDENTITY),
    );
    scene.spawn_camera(
        "Overview Camera",
        Pose::new(
            Vec3::new(0.0, 20.0, 0.0),
            Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2),
        ),
    );
    scene.spawn("Cube", Pose::from_position(Vec3::new(2.0, 0.5, 0.0)), false);
    scene
}
