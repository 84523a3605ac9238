use crate::client::LinearClient;
use crate::config::{get_api_key, load_config, save_config, Config};
use crate::error::{LinearError, LinearResult};
use std::sync::Arc;

/// Central context for CLI operations, managing configuration and client instances
pub struct CliContext {
    config: Config,
    api_key: Option<String>,
    client: Option<Arc<LinearClient>>,
}

impl CliContext {
    /// Load context from saved configuration
    pub fn load() -> LinearResult<Self> {
        Ok(Self {
            config: load_config(),
            api_key: get_api_key().ok(),
            client: None,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// A client that may be unconfigured; callers that go through the
    /// resolver get a `NotConfigured` outcome instead of an early error.
    pub fn client(&mut self) -> LinearResult<Arc<LinearClient>> {
        if let Some(client) = &self.client {
            return Ok(client.clone());
        }

        let client = Arc::new(LinearClient::new(self.api_key.clone().unwrap_or_default())?);
        self.client = Some(client.clone());
        Ok(client)
    }

    /// A client backed by an API key; fails with `NotConfigured` otherwise.
    pub fn verified_client(&mut self) -> LinearResult<Arc<LinearClient>> {
        if !self.has_api_key() {
            return Err(LinearError::NotConfigured);
        }
        self.client()
    }

    /// Set and save a new API key
    pub fn set_api_key(&mut self, api_key: String) -> LinearResult<()> {
        self.config.api_key = Some(api_key.clone());
        save_config(&self.config)?;
        self.api_key = Some(api_key);
        self.client = None;
        Ok(())
    }

    pub fn set_debug_mode(&mut self, enabled: bool) -> LinearResult<()> {
        self.config.debug_mode = enabled;
        save_config(&self.config)
    }

    /// Check if context has a usable API key
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().map(|key| !key.trim().is_empty()).unwrap_or(false)
    }
}

/// Builder pattern for creating CLI contexts with specific configurations
pub struct CliContextBuilder {
    api_key: Option<String>,
    debug_mode: bool,
}

impl CliContextBuilder {
    pub fn new() -> Self {
        Self {
            api_key: None,
            debug_mode: false,
        }
    }

    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.api_key = Some(api_key);
        self
    }

    pub fn with_debug_mode(mut self, debug_mode: bool) -> Self {
        self.debug_mode = debug_mode;
        self
    }

    /// Without an explicit key the saved configuration is used.
    pub fn build(self) -> LinearResult<CliContext> {
        match self.api_key {
            Some(api_key) => Ok(CliContext {
                config: Config {
                    api_key: Some(api_key.clone()),
                    debug_mode: self.debug_mode,
                },
                api_key: Some(api_key),
                client: None,
            }),
            None => CliContext::load(),
        }
    }
}

impl Default for CliContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
