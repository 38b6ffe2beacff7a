use super::machine::PilotStateMachine;
use crate::config::{PilotConfig, SyncThresholds};
use crate::math::Pose;
use crate::traits::SceneEditor;
use crate::types::StableId;

/// What a single frame did
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The frame arrived outside a startup/shutdown window
    Unsubscribed,
    /// Not piloting
    Inactive,
    /// First frame of the session: pose recorded, target untouched
    Captured,
    /// Viewport moved less than both thresholds
    Unchanged,
    /// Target now matches the viewport
    Applied { target: StableId },
    /// Target stopped resolving and piloting was stopped
    TargetLost { target: StableId },
}

/// Per-frame change detection and transform copy
#[derive(Clone, Debug)]
pub struct TransformSync {
    thresholds: SyncThresholds,
    undo_label: String,
}

impl TransformSync {
    pub fn new(thresholds: SyncThresholds, undo_label: impl Into<String>) -> Self {
        Self {
            thresholds,
            undo_label: undo_label.into(),
        }
    }

    pub fn from_config(config: &PilotConfig) -> Self {
        Self::new(config.thresholds, config.undo_label.clone())
    }

    pub fn thresholds(&self) -> &SyncThresholds {
        &self.thresholds
    }

    /// Copy `viewport` onto the piloted target if it moved enough since the
    /// last copy
    ///
    /// The last observed pose only advances when a copy happens, so slow
    /// sub-threshold drift still adds up to a copy eventually.
    pub fn sync(
        &self,
        machine: &mut PilotStateMachine,
        editor: &mut dyn SceneEditor,
        viewport: Pose,
    ) -> SyncOutcome {
        let Some(target) = machine.current_target() else {
            return SyncOutcome::Inactive;
        };

        if editor.resolve(target).is_none() {
            machine.handle_target_loss(editor);
            return SyncOutcome::TargetLost { target };
        }

        let Some(last) = machine.last_observed_pose() else {
            log::debug!("captured initial viewport pose for {target}");
            machine.observe(viewport);
            return SyncOutcome::Captured;
        };

        log::trace!(
            "viewport delta: {:.5} units, {:.4} deg",
            last.distance(&viewport),
            last.angle_degrees(&viewport)
        );

        // A delta that is not a number never counts as movement
        if !last.differs_from(&viewport, &self.thresholds) {
            return SyncOutcome::Unchanged;
        }

        if !editor.apply_undoable(target, viewport, &self.undo_label) {
            machine.handle_target_loss(editor);
            return SyncOutcome::TargetLost { target };
        }
        machine.observe(viewport);

        if !editor.is_simulating() {
            editor.mark_dirty(target);
        }

        log::debug!("copied viewport pose onto {target}");
        SyncOutcome::Applied { target }
    }
}

impl Default for TransformSync {
    fn default() -> Self {
        Self::from_config(&PilotConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::EditorScene;
    use glam::{Quat, Vec3};

    fn piloting(scene: &mut EditorScene) -> (PilotStateMachine, StableId) {
        let cam = scene.spawn_camera("cam", Pose::IDENTITY);
        let mut machine = PilotStateMachine::new();
        machine.start(scene, Some(cam)).unwrap();
        (machine, cam)
    }

    #[test]
    fn test_idle_is_noop() {
        let mut scene = EditorScene::new();
        let mut machine = PilotStateMachine::new();
        let engine = TransformSync::default();

        let outcome = engine.sync(&mut machine, &mut scene, Pose::IDENTITY);

        assert_eq!(outcome, SyncOutcome::Inactive);
        assert!(scene.undo_entries().is_empty());
    }

    #[test]
    fn test_first_frame_only_captures() {
        let mut scene = EditorScene::new();
        let (mut machine, cam) = piloting(&mut scene);
        let engine = TransformSync::default();
        let far = Pose::new(Vec3::new(50.0, 0.0, 0.0), Quat::from_rotation_y(1.0));

        let outcome = engine.sync(&mut machine, &mut scene, far);

        assert_eq!(outcome, SyncOutcome::Captured);
        assert_eq!(scene.pose_of(cam), Some(Pose::IDENTITY));
        assert_eq!(machine.last_observed_pose(), Some(far));
    }

    #[test]
    fn test_moved_pose_is_copied_exactly() {
        let mut scene = EditorScene::new();
        let (mut machine, cam) = piloting(&mut scene);
        let engine = TransformSync::default();
        let p0 = Pose::from_position(Vec3::new(1.0, 1.0, 1.0));
        let p1 = Pose::new(Vec3::new(1.5, 1.0, 1.0), Quat::from_rotation_z(0.3));

        engine.sync(&mut machine, &mut scene, p0);
        let outcome = engine.sync(&mut machine, &mut scene, p1);

        assert_eq!(outcome, SyncOutcome::Applied { target: cam });
        assert_eq!(scene.pose_of(cam), Some(p1));
        assert_eq!(machine.last_observed_pose(), Some(p1));
        assert_eq!(scene.undo_entries().len(), 1);
        assert_eq!(scene.undo_entries()[0].label, "Camera Pilot Movement");
        assert!(scene.is_dirty(cam));
    }

    #[test]
    fn test_simulating_skips_dirty_flag() {
        let mut scene = EditorScene::new();
        let (mut machine, cam) = piloting(&mut scene);
        scene.set_simulating(true);
        let engine = TransformSync::default();

        engine.sync(&mut machine, &mut scene, Pose::IDENTITY);
        let outcome = engine.sync(&mut machine, &mut scene, Pose::from_position(Vec3::X));

        assert_eq!(outcome, SyncOutcome::Applied { target: cam });
        assert!(!scene.is_dirty(cam));
    }

    #[test]
    fn test_sub_threshold_noise_leaves_state_alone() {
        let mut scene = EditorScene::new();
        let (mut machine, cam) = piloting(&mut scene);
        let engine = TransformSync::default();
        let p0 = Pose::from_position(Vec3::new(0.0, 2.0, 0.0));
        let jitter = Pose::new(
            Vec3::new(0.0005, 2.0, 0.0),
            Quat::from_rotation_y(0.05_f32.to_radians()),
        );

        engine.sync(&mut machine, &mut scene, p0);
        let outcome = engine.sync(&mut machine, &mut scene, jitter);

        assert_eq!(outcome, SyncOutcome::Unchanged);
        assert_eq!(machine.last_observed_pose(), Some(p0));
        assert_eq!(scene.pose_of(cam), Some(Pose::IDENTITY));
        assert!(scene.undo_entries().is_empty());
    }

    #[test]
    fn test_drift_accumulates_until_threshold() {
        let mut scene = EditorScene::new();
        let (mut machine, cam) = piloting(&mut scene);
        let engine = TransformSync::default();

        engine.sync(&mut machine, &mut scene, Pose::IDENTITY);
        let mut applied = 0;
        for step in 1..=5 {
            let pose = Pose::from_position(Vec3::new(step as f32 * 0.0004, 0.0, 0.0));
            if let SyncOutcome::Applied { .. } = engine.sync(&mut machine, &mut scene, pose) {
                applied += 1;
            }
        }

        // 0.0012 from the origin after three steps, then 0.0008 more is below epsilon
        assert_eq!(applied, 1);
        assert_eq!(scene.undo_entries().len(), 1);
        assert!(scene.pose_of(cam).unwrap().position.x > 0.001);
    }

    #[test]
    fn test_rotation_alone_triggers_copy() {
        let mut scene = EditorScene::new();
        let (mut machine, cam) = piloting(&mut scene);
        let engine = TransformSync::default();
        let turned = Pose::new(Vec3::ZERO, Quat::from_rotation_x(0.5_f32.to_radians()));

        engine.sync(&mut machine, &mut scene, Pose::IDENTITY);
        let outcome = engine.sync(&mut machine, &mut scene, turned);

        assert_eq!(outcome, SyncOutcome::Applied { target: cam });
        assert_eq!(scene.pose_of(cam), Some(turned));
    }

    #[test]
    fn test_custom_thresholds() {
        let mut scene = EditorScene::new();
        let (mut machine, _cam) = piloting(&mut scene);
        let engine = TransformSync::new(
            SyncThresholds {
                position_epsilon: 1.0,
                rotation_epsilon_degrees: 45.0,
            },
            "Fly",
        );

        engine.sync(&mut machine, &mut scene, Pose::IDENTITY);
        let small = Pose::from_position(Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(
            engine.sync(&mut machine, &mut scene, small),
            SyncOutcome::Unchanged
        );

        let big = Pose::from_position(Vec3::new(2.0, 0.0, 0.0));
        assert!(matches!(
            engine.sync(&mut machine, &mut scene, big),
            SyncOutcome::Applied { .. }
        ));
        assert_eq!(scene.undo_entries()[0].label, "Fly");
    }

    #[test]
    fn test_degenerate_viewport_pose_is_ignored() {
        let mut scene = EditorScene::new();
        let (mut machine, cam) = piloting(&mut scene);
        let engine = TransformSync::default();
        engine.sync(&mut machine, &mut scene, Pose::IDENTITY);

        let zero_rotation = Pose::new(Vec3::ZERO, Quat::from_xyzw(0.0, 0.0, 0.0, 0.0));
        for _ in 0..5 {
            assert_eq!(
                engine.sync(&mut machine, &mut scene, zero_rotation),
                SyncOutcome::Unchanged
            );
        }
        let nan_position = Pose::from_position(Vec3::new(f32::NAN, 0.0, 0.0));
        assert_eq!(
            engine.sync(&mut machine, &mut scene, nan_position),
            SyncOutcome::Unchanged
        );

        assert!(scene.undo_entries().is_empty());
        assert!(!scene.is_dirty(cam));
        assert_eq!(scene.pose_of(cam), Some(Pose::IDENTITY));
        assert_eq!(machine.last_observed_pose(), Some(Pose::IDENTITY));

        let moved = Pose::from_position(Vec3::X);
        assert_eq!(
            engine.sync(&mut machine, &mut scene, moved),
            SyncOutcome::Applied { target: cam }
        );
    }

    #[test]
    fn test_lost_target_stops_piloting() {
        let mut scene = EditorScene::new();
        let (mut machine, cam) = piloting(&mut scene);
        let engine = TransformSync::default();
        engine.sync(&mut machine, &mut scene, Pose::IDENTITY);
        scene.destroy(cam);

        let outcome = engine.sync(&mut machine, &mut scene, Pose::from_position(Vec3::Y));

        assert_eq!(outcome, SyncOutcome::TargetLost { target: cam });
        assert!(!machine.is_active());
        assert_eq!(scene.warnings().len(), 1);
        assert_eq!(
            engine.sync(&mut machine, &mut scene, Pose::IDENTITY),
            SyncOutcome::Inactive
        );
    }
}
