pub mod controller;
pub mod timer;
