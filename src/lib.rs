pub mod camera;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod lifecycle;
pub mod math;
pub mod pilot;
pub mod scene;
pub mod store;
pub mod traits;
pub mod types;

pub use commands::PilotCommand;
pub use config::{PilotConfig, SyncThresholds};
pub use error::PilotError;
pub use lifecycle::LifecycleController;
pub use math::Pose;
pub use pilot::{PilotSession, PilotState, PilotStateMachine, SyncOutcome, TransformSync};
pub use types::StableId;
