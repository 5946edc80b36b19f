pub mod engine;
pub mod imaging;
pub mod notify;
pub mod store;
pub mod types;

pub use engine::LostFoundCore;
