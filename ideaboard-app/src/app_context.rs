use crate::application::{Authenticate, ManageIdeas, ManageUsers, VoteIdea};
use crate::config::ClientConfig;
use crate::infrastructure::api::ApiClient;
use crate::infrastructure::ledger::VoteLedger;
use crate::infrastructure::session::SessionManager;
use crate::infrastructure::storage::{KeyValueStore, MemoryStore};
use ideaboard_errors::AppError;
use std::sync::Arc;

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_STATE_FILE: &str = ".ideaboard/state.json";

/// Everything a client needs, wired to one store: the session, its ledger
/// and the API client that shares them.
#[derive(Clone)]
pub struct ClientContext {
    pub session: SessionManager,
    pub api: ApiClient,
}

impl ClientContext {
    pub fn new(config: &ClientConfig, store: Arc<dyn KeyValueStore>) -> Result<Self, AppError> {
        let ledger = VoteLedger::new(store.clone());
        let session = SessionManager::new(store, ledger);
        let api = ApiClient::new(config, session.clone())?;
        Ok(Self { session, api })
    }

    /// Nothing survives the process. Used for server-side rendering and tests.
    pub fn in_memory(config: &ClientConfig) -> Result<Self, AppError> {
        Self::new(config, Arc::new(MemoryStore::new()))
    }

    /// State kept in the file named by `IDEABOARD_STATE_FILE`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self, AppError> {
        use crate::infrastructure::storage::FileStore;

        let config = ClientConfig::from_env();
        let path = std::env::var("IDEABOARD_STATE_FILE")
            .unwrap_or_else(|_| DEFAULT_STATE_FILE.to_string());
        let store = FileStore::open(&path)?;
        tracing::info!("Client state in {}, API at {}", path, config.api_base_url);
        Self::new(&config, Arc::new(store))
    }

    /// State kept in the browser's localStorage.
    #[cfg(feature = "browser")]
    pub fn browser() -> Result<Self, AppError> {
        use crate::infrastructure::storage::BrowserStore;

        Self::new(&ClientConfig::from_env(), Arc::new(BrowserStore))
    }

    pub fn ledger(&self) -> &VoteLedger {
        self.session.ledger()
    }

    pub fn authenticate(&self) -> Authenticate<ApiClient> {
        Authenticate::new(self.api.clone(), self.session.clone())
    }

    pub fn vote_idea(&self) -> VoteIdea<ApiClient> {
        VoteIdea::new(self.api.clone(), self.session.clone())
    }

    pub fn ideas(&self) -> ManageIdeas<ApiClient> {
        ManageIdeas::new(self.api.clone(), self.session.clone())
    }

    pub fn users(&self) -> ManageUsers<ApiClient> {
        ManageUsers::new(self.api.clone(), self.session.clone())
    }
}
