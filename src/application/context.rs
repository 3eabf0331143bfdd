use std::sync::Arc;

use crate::application::client::ProcessesClient;
use crate::config::Settings;

/// Shared application resources used by the HTTP handlers.
pub struct AppContext {
    pub client: Arc<dyn ProcessesClient>,
    pub settings: Settings,
}

impl AppContext {
    /// Build a new application context around a backend client.
    pub fn new(client: Arc<dyn ProcessesClient>, settings: Settings) -> Self {
        Self { client, settings }
    }
}
