use crate::math::Pose;
use crate::types::StableId;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PilotState {
    #[default]
    Idle,
    Piloting { target: StableId },
}

/// The one piece of mutable state shared by the pilot components
///
/// Only [`PilotStateMachine`](super::PilotStateMachine) mutates it. The
/// target is held by id and re-resolved on every use.
#[derive(Clone, Debug, Default)]
pub struct PilotSession {
    state: PilotState,
    last_observed: Option<Pose>,
}

impl PilotSession {
    pub fn state(&self) -> PilotState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, PilotState::Piloting { .. })
    }

    pub fn target(&self) -> Option<StableId> {
        match self.state {
            PilotState::Idle => None,
            PilotState::Piloting { target } => Some(target),
        }
    }

    /// `None` until the first frame after the session became active
    pub fn last_observed_pose(&self) -> Option<Pose> {
        self.last_observed
    }

    pub(crate) fn begin(&mut self, target: StableId) {
        self.state = PilotState::Piloting { target };
        self.last_observed = None;
    }

    pub(crate) fn end(&mut self) {
        self.state = PilotState::Idle;
        self.last_observed = None;
    }

    pub(crate) fn observe(&mut self, pose: Pose) {
        self.last_observed = Some(pose);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_new_session_is_idle() {
        let session = PilotSession::default();
        assert_eq!(session.state(), PilotState::Idle);
        assert!(!session.is_active());
        assert_eq!(session.target(), None);
        assert_eq!(session.last_observed_pose(), None);
    }

    #[test]
    fn test_begin_clears_observed_pose() {
        let mut session = PilotSession::default();
        session.begin(StableId(1));
        session.observe(Pose::from_position(Vec3::X));
        session.begin(StableId(2));

        assert_eq!(session.target(), Some(StableId(2)));
        assert_eq!(session.last_observed_pose(), None);
    }

    #[test]
    fn test_end_resets_everything() {
        let mut session = PilotSession::default();
        session.begin(StableId(5));
        session.observe(Pose::IDENTITY);
        session.end();

        assert!(!session.is_active());
        assert_eq!(session.last_observed_pose(), None);
    }
}
