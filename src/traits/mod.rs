pub mod directory;
pub mod editor;
pub mod store;

pub use directory::*;
pub use editor::*;
pub use store::*;
