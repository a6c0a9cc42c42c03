//! Application state wiring the pipeline together.
//!
//! AppState holds the conversation service and the in-memory session
//! registry used by both the CLI and the REST API. The service is generic
//! over the token/transport ports, but AppState pins it to the concrete
//! infra implementations.

use std::path::Path;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use wellspring_core::conversation::ConversationService;
use wellspring_infra::agent::HttpAgentTransport;
use wellspring_infra::config::{load_pipeline_config, load_settings};
use wellspring_infra::iam::IamClient;
use wellspring_types::chat::ChatSession;
use wellspring_types::config::Settings;

/// Concrete conversation service pinned to the infra implementations.
pub type CoachService = ConversationService<IamClient, HttpAgentTransport>;

/// A registered session behind its own lock.
///
/// The mutex serializes turns: a second message for the same session waits
/// for the in-flight turn instead of interleaving transcript appends.
pub type SharedSession = Arc<Mutex<ChatSession>>;

/// Shared application state for CLI commands and REST handlers.
///
/// Sessions live only in this map: one entry per browser conversation,
/// dropped on delete or process exit.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub coach: Arc<CoachService>,
    pub sessions: Arc<DashMap<Uuid, SharedSession>>,
}

impl AppState {
    /// Initialize the application state: load config, wire the pipeline.
    pub async fn init() -> anyhow::Result<Self> {
        let (settings, api_key) = load_settings()?;
        let pipeline = load_pipeline_config(Path::new(".")).await;

        let iam = IamClient::new(api_key, settings.token_url.clone());
        let transport =
            HttpAgentTransport::new(settings.agent_url.clone(), pipeline.request_timeout_secs);
        let coach = ConversationService::new(iam, transport, &pipeline, settings.send_profile);

        Ok(AppState {
            settings: Arc::new(settings),
            coach: Arc::new(coach),
            sessions: Arc::new(DashMap::new()),
        })
    }

    /// Register a new session and return it.
    pub fn create_session(&self) -> (Uuid, SharedSession) {
        let session = ChatSession::new();
        let id = session.id;
        let shared: SharedSession = Arc::new(Mutex::new(session));
        self.sessions.insert(id, shared.clone());
        (id, shared)
    }

    /// Look up a registered session.
    pub fn session(&self, id: &Uuid) -> Option<SharedSession> {
        self.sessions.get(id).map(|entry| entry.value().clone())
    }
}
