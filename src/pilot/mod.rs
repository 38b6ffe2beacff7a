mod machine;
mod session;
mod sync;

pub use machine::PilotStateMachine;
pub use session::{PilotSession, PilotState};
pub use sync::{SyncOutcome, TransformSync};
