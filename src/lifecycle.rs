//! Startup, shutdown and per-frame entry point for the pilot core.

use crate::config::PilotConfig;
use crate::error::PilotError;
use crate::math::Pose;
use crate::pilot::{PilotStateMachine, SyncOutcome, TransformSync};
use crate::store::PersistedPilotRecord;
use crate::traits::{DurableStore, ObjectDirectory, SceneEditor};
use crate::types::StableId;

/// Frame callback registration held between `startup` and `shutdown`
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum FrameSubscription {
    #[default]
    Closed,
    Open { frames: u64 },
}

/// Orchestrates restore, persist and target-loss recovery around one
/// [`PilotStateMachine`]
pub struct LifecycleController<S: DurableStore> {
    machine: PilotStateMachine,
    engine: TransformSync,
    store: S,
    subscription: FrameSubscription,
}

impl<S: DurableStore> LifecycleController<S> {
    pub fn new(store: S, config: &PilotConfig) -> Self {
        Self {
            machine: PilotStateMachine::new(),
            engine: TransformSync::from_config(config),
            store,
            subscription: FrameSubscription::Closed,
        }
    }

    pub fn machine(&self) -> &PilotStateMachine {
        &self.machine
    }

    pub fn engine(&self) -> &TransformSync {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_subscribed(&self) -> bool {
        matches!(self.subscription, FrameSubscription::Open { .. })
    }

    /// Frames handled since the subscription opened
    pub fn frames_observed(&self) -> u64 {
        match self.subscription {
            FrameSubscription::Closed => 0,
            FrameSubscription::Open { frames } => frames,
        }
    }

    /// Restore from the store, then start receiving frames
    ///
    /// Call once the host can resolve object ids. The subscription opens even
    /// when the store cannot be read; the session just starts idle.
    pub fn startup<D: ObjectDirectory + ?Sized>(
        &mut self,
        directory: &D,
    ) -> Result<(), PilotError> {
        if self.is_subscribed() {
            return Ok(());
        }
        let restored = self.restore(directory);
        self.subscription = FrameSubscription::Open { frames: 0 };
        if let Err(e) = &restored {
            log::warn!("could not restore piloting state: {e}");
        }
        restored.map(|_| ())
    }

    /// Persist, then stop receiving frames
    pub fn shutdown<D: ObjectDirectory + ?Sized>(
        &mut self,
        directory: &D,
    ) -> Result<(), PilotError> {
        let persisted = self.persist(directory);
        self.subscription = FrameSubscription::Closed;
        persisted
    }

    /// Rebuild the session from the store; returns whether piloting resumed
    ///
    /// A record whose target no longer resolves is cleared silently.
    pub fn restore<D: ObjectDirectory + ?Sized>(
        &mut self,
        directory: &D,
    ) -> Result<bool, PilotError> {
        let Some(record) = PersistedPilotRecord::load(&self.store) else {
            return Ok(false);
        };

        if record.is_resumable() && self.machine.resume(directory, record.target) {
            return Ok(true);
        }

        log::debug!("discarding stale piloting record for {}", record.target);
        PersistedPilotRecord::clear(&mut self.store)?;
        Ok(false)
    }

    /// Write the session to the store
    ///
    /// Clears the store instead when idle or when the target no longer
    /// resolves.
    pub fn persist<D: ObjectDirectory + ?Sized>(
        &mut self,
        directory: &D,
    ) -> Result<(), PilotError> {
        let live_target = self
            .machine
            .current_target()
            .filter(|&target| directory.resolve(target).is_some());
        let result = match live_target {
            Some(target) => PersistedPilotRecord::piloting(target).save(&mut self.store),
            None => PersistedPilotRecord::clear(&mut self.store),
        };
        if let Err(e) = &result {
            log::warn!("could not persist piloting state: {e}");
        }
        result
    }

    /// Per-frame callback
    pub fn on_viewport_frame(
        &mut self,
        editor: &mut dyn SceneEditor,
        viewport: Pose,
    ) -> SyncOutcome {
        let FrameSubscription::Open { frames } = &mut self.subscription else {
            return SyncOutcome::Unsubscribed;
        };
        *frames += 1;

        let outcome = self.engine.sync(&mut self.machine, editor, viewport);
        if let SyncOutcome::TargetLost { .. } = outcome {
            self.forget_persisted();
        }
        outcome
    }

    pub fn start_piloting(
        &mut self,
        editor: &mut dyn SceneEditor,
        selection: Option<StableId>,
    ) -> Result<StableId, PilotError> {
        self.machine.start(editor, selection)
    }

    /// Stop piloting and drop the persisted record
    pub fn stop_piloting(&mut self, editor: &mut dyn SceneEditor) -> Result<(), PilotError> {
        self.machine.stop(editor);
        PersistedPilotRecord::clear(&mut self.store)
    }

    fn forget_persisted(&mut self) {
        if let Err(e) = PersistedPilotRecord::clear(&mut self.store) {
            log::warn!("could not clear piloting state: {e}");
        }
    }
}
