//! Start/stop commands as a menu or toolbar button would issue them.

use crate::error::PilotError;
use crate::lifecycle::LifecycleController;
use crate::pilot::PilotStateMachine;
use crate::traits::{DurableStore, ObjectDirectory, SceneEditor};
use crate::types::StableId;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PilotCommand {
    Start,
    Stop,
    /// Start when idle, stop when piloting
    Toggle,
}

/// Start is offered only when idle and the selection is a camera
pub fn can_start<D: ObjectDirectory + ?Sized>(
    machine: &PilotStateMachine,
    directory: &D,
    selection: Option<StableId>,
) -> bool {
    !machine.is_active()
        && selection
            .and_then(|id| directory.resolve(id))
            .is_some_and(|target| target.has_camera())
}

pub fn can_stop(machine: &PilotStateMachine) -> bool {
    machine.is_active()
}

pub fn toggle_tooltip(active: bool) -> &'static str {
    if active {
        "Stop Piloting"
    } else {
        "Start Piloting"
    }
}

impl<S: DurableStore> LifecycleController<S> {
    /// Run a command against the current selection
    ///
    /// Commands that are not currently offered do nothing. Starting on a
    /// selection that is not a camera is an `InvalidSelection` warning.
    pub fn execute(
        &mut self,
        command: PilotCommand,
        editor: &mut dyn SceneEditor,
        selection: Option<StableId>,
    ) -> Result<(), PilotError> {
        let command = match command {
            PilotCommand::Toggle if self.machine().is_active() => PilotCommand::Stop,
            PilotCommand::Toggle => PilotCommand::Start,
            other => other,
        };

        match command {
            PilotCommand::Start if self.machine().is_active() => Ok(()),
            PilotCommand::Start => {
                if !can_start(self.machine(), &*editor, selection) {
                    let warning = PilotError::InvalidSelection;
                    log::warn!("{warning}");
                    editor.notify(&warning);
                    return Err(warning);
                }
                self.start_piloting(editor, selection).map(|_| ())
            }
            PilotCommand::Stop if !can_stop(self.machine()) => Ok(()),
            PilotCommand::Stop | PilotCommand::Toggle => self.stop_piloting(editor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PilotConfig;
    use crate::math::Pose;
    use crate::scene::EditorScene;
    use crate::store::MemoryStore;

    fn setup() -> (EditorScene, StableId, StableId, LifecycleController<MemoryStore>) {
        let mut scene = EditorScene::new();
        let cam = scene.spawn_camera("cam", Pose::IDENTITY);
        let prop = scene.spawn("prop", Pose::IDENTITY, false);
        let lifecycle = LifecycleController::new(MemoryStore::new(), &PilotConfig::default());
        (scene, cam, prop, lifecycle)
    }

    #[test]
    fn test_can_start_requires_idle_camera() {
        let (mut scene, cam, prop, mut lifecycle) = setup();

        assert!(can_start(lifecycle.machine(), &scene, Some(cam)));
        assert!(!can_start(lifecycle.machine(), &scene, Some(prop)));
        assert!(!can_start(lifecycle.machine(), &scene, None));
        assert!(!can_stop(lifecycle.machine()));

        lifecycle.start_piloting(&mut scene, Some(cam)).unwrap();
        assert!(!can_start(lifecycle.machine(), &scene, Some(cam)));
        assert!(can_stop(lifecycle.machine()));
    }

    #[test]
    fn test_start_on_non_camera_warns() {
        let (mut scene, _cam, prop, mut lifecycle) = setup();

        let err = lifecycle
            .execute(PilotCommand::Start, &mut scene, Some(prop))
            .unwrap_err();

        assert!(matches!(err, PilotError::InvalidSelection));
        assert!(!lifecycle.machine().is_active());
        assert_eq!(scene.warnings().len(), 1);
    }

    #[test]
    fn test_toggle_flips_state() {
        let (mut scene, cam, _prop, mut lifecycle) = setup();

        lifecycle
            .execute(PilotCommand::Toggle, &mut scene, Some(cam))
            .unwrap();
        assert_eq!(lifecycle.machine().current_target(), Some(cam));
        assert_eq!(toggle_tooltip(lifecycle.machine().is_active()), "Stop Piloting");

        lifecycle
            .execute(PilotCommand::Toggle, &mut scene, Some(cam))
            .unwrap();
        assert!(!lifecycle.machine().is_active());
        assert_eq!(toggle_tooltip(lifecycle.machine().is_active()), "Start Piloting");
    }

    #[test]
    fn test_commands_not_offered_do_nothing() {
        let (mut scene, cam, prop, mut lifecycle) = setup();

        lifecycle.execute(PilotCommand::Stop, &mut scene, None).unwrap();
        assert_eq!(scene.redraw_count(), 0);

        lifecycle
            .execute(PilotCommand::Start, &mut scene, Some(cam))
            .unwrap();
        lifecycle
            .execute(PilotCommand::Start, &mut scene, Some(prop))
            .unwrap();
        assert_eq!(lifecycle.machine().current_target(), Some(cam));
    }
}
