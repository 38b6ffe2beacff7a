use super::session::{PilotSession, PilotState};
use crate::error::PilotError;
use crate::math::Pose;
use crate::traits::{ObjectDirectory, SceneEditor};
use crate::types::StableId;

/// Owns the pilot session and decides whether synchronization is active
///
/// Cycles between `Idle` and `Piloting(target)` for the life of the process.
#[derive(Debug, Default)]
pub struct PilotStateMachine {
    session: PilotSession,
}

impl PilotStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &PilotSession {
        &self.session
    }

    pub fn state(&self) -> PilotState {
        self.session.state()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    pub fn current_target(&self) -> Option<StableId> {
        self.session.target()
    }

    pub fn last_observed_pose(&self) -> Option<Pose> {
        self.session.last_observed_pose()
    }

    /// Begin piloting `selection`
    ///
    /// The selection must resolve to an object with a transform. Otherwise the
    /// user is warned, the state is left as it was, and `InvalidSelection` is
    /// returned. Starting always re-arms the first-frame capture.
    pub fn start(
        &mut self,
        editor: &mut dyn SceneEditor,
        selection: Option<StableId>,
    ) -> Result<StableId, PilotError> {
        let resolved = selection
            .and_then(|id| editor.resolve(id).map(|target| (id, target.name().to_string())));
        let Some((target, name)) = resolved else {
            let warning = PilotError::InvalidSelection;
            log::warn!("{warning}");
            editor.notify(&warning);
            return Err(warning);
        };

        self.session.begin(target);
        log::info!("Started piloting: {name}");
        editor.request_redraw();
        Ok(target)
    }

    /// Return to `Idle`; harmless when already idle
    pub fn stop(&mut self, editor: &mut dyn SceneEditor) {
        if let Some(target) = self.session.target() {
            let name = editor
                .resolve(target)
                .map(|t| t.name().to_string())
                .unwrap_or_else(|| "Unknown".to_string());
            log::info!("Stopped piloting: {name}");
        }

        self.session.end();
        editor.request_redraw();
    }

    /// Stop because the piloted object no longer resolves, and warn the user
    pub fn handle_target_loss(&mut self, editor: &mut dyn SceneEditor) -> Option<PilotError> {
        let target = self.session.target()?;
        let warning = PilotError::TargetLost(target);
        log::warn!("{warning}");
        self.stop(editor);
        editor.notify(&warning);
        Some(warning)
    }

    /// Continue a session persisted by a previous process
    ///
    /// Unlike [`start`](Self::start) this neither redraws nor logs a fresh start;
    /// there is no observed pose yet, so the next frame still only captures.
    pub(crate) fn resume<D: ObjectDirectory + ?Sized>(
        &mut self,
        directory: &D,
        target: StableId,
    ) -> bool {
        match directory.resolve(target) {
            Some(object) => {
                log::info!("Restored piloting state for: {}", object.name());
                self.session.begin(target);
                true
            }
            None => false,
        }
    }

    pub(crate) fn observe(&mut self, pose: Pose) {
        self.session.observe(pose);
    }
}
