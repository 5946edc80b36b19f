pub(crate) mod config;
pub use config::{Config, EngineConfig, EngineConfigError, ImageSettings, NotifySettings};

pub(crate) mod item;
pub use item::{Item, ItemDraft};

pub(crate) mod item_id;
pub use item_id::{ItemId, ItemIdError, MAX_ITEM_ID_LENGTH};

pub(crate) mod record;

pub(crate) mod status;
pub use status::ItemStatus;

pub(crate) mod summary;
pub use summary::{DashboardSummary, RecentItem};

pub(crate) mod user;
pub use user::{User, UserId, UserIdError};
