pub mod agent;
pub mod play;
