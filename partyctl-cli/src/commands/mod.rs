pub mod party;

use std::sync::Arc;

use anyhow::{Context, Result};
use partyctl_core::{
    notifier_from_config, HttpPartyStore, Notifier, PartyConfig, PartyView, SilentNotifier,
};

/// Resolved settings shared by every command that talks to the store
#[derive(Debug, Clone)]
pub struct Session {
    pub config: PartyConfig,
    pub endpoint: String,
    pub no_sound: bool,
}

impl Session {
    pub fn new(config: PartyConfig, endpoint_flag: Option<&str>, no_sound: bool) -> Self {
        let endpoint = config.resolve_endpoint(endpoint_flag);
        tracing::debug!(%endpoint, "using party store");
        Self {
            config,
            endpoint,
            no_sound,
        }
    }

    /// Build a view over the HTTP store. Nothing is fetched yet.
    pub fn view(&self) -> Result<PartyView> {
        let store = HttpPartyStore::new(&self.endpoint, self.config.request_timeout())
            .context("Failed to set up party store client")?;

        let notifier: Arc<dyn Notifier> = if self.no_sound {
            Arc::new(SilentNotifier)
        } else {
            Arc::from(notifier_from_config(&self.config.sound))
        };

        Ok(PartyView::new(Arc::new(store), notifier))
    }
}
