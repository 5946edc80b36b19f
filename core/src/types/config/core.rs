use std::path::PathBuf;

/// Paths for the embedded store backend.
#[derive(Clone)]
pub struct Config {
    pub base_path: PathBuf,
}

impl Config {
    pub fn db_path(&self) -> PathBuf {
        self.base_path.join("lostfound.redb")
    }
}
