//! Domain tools.
//!
//! Every tool is one `async` method on [`Toolbox`]: it fills a fixed prompt
//! template with its arguments, calls exactly one dispatch helper, and returns
//! the typed result. Tools never branch, loop, retry or keep state.

pub mod developer;
pub mod education;
pub mod imaging;
pub mod lifestyle;
pub mod marketing;
pub mod writing;

use crate::backend::{GeminiBackend, GenerativeBackend};
use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::error::Result;
use std::sync::Arc;

/// Composition root that owns the dispatcher every tool goes through.
pub struct Toolbox {
    dispatcher: Dispatcher,
}

impl Toolbox {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Wires a toolbox to any backend, e.g. a [`crate::MockBackend`].
    pub fn with_backend(config: Config, backend: Arc<dyn GenerativeBackend>) -> Self {
        Self::new(Dispatcher::new(config, backend))
    }

    /// Builds a Gemini-backed toolbox from the given configuration.
    pub fn with_config(config: Config) -> Result<Self> {
        let backend = GeminiBackend::new(&config)?;
        Ok(Self::with_backend(config, Arc::new(backend)))
    }

    /// Loads configuration from the environment and builds a Gemini-backed
    /// toolbox.
    ///
    /// A missing API key does not fail here; each tool call will return
    /// [`crate::AppError::Configuration`] instead.
    pub fn from_env() -> Result<Self> {
        Self::with_config(Config::load()?)
    }

    pub fn config(&self) -> &Config {
        self.dispatcher.config()
    }

    pub(crate) fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}
