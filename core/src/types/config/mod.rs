mod core;
mod engine;

pub use core::Config;
pub use engine::{EngineConfig, EngineConfigError, ImageSettings, NotifySettings};
