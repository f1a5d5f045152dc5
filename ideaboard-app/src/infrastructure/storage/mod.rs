//! Durable key-value slots backing the session and the vote ledger.
//!
//! Two slots are used: [`CREDENTIAL_KEY`] holds the raw access token and
//! [`VOTED_IDEAS_KEY`] holds a JSON array of idea ids. Every backend must be
//! shareable across the components of one client, hence `Send + Sync`.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(feature = "browser")]
mod browser;

pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(feature = "browser")]
pub use browser::BrowserStore;

use ideaboard_errors::AppError;

pub const CREDENTIAL_KEY: &str = "access_token";
pub const VOTED_IDEAS_KEY: &str = "voted_polls";

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;

    fn remove(&self, key: &str);
}
