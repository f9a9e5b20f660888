//! High-level configuration API

use crate::error::{ApiError, Result};
use crate::MarkdownSplitter;
use mdsplit_engine::{ChunkerConfig, OverflowPolicy, DEFAULT_LOOKAHEAD};

/// High-level configuration for splitting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    inner: ChunkerConfig,
}

impl Config {
    /// Telegram messages: 4000 characters
    pub fn telegram() -> Self {
        Self {
            inner: ChunkerConfig::telegram(),
        }
    }

    /// Discord messages: 2000 characters
    pub fn discord() -> Self {
        Self {
            inner: ChunkerConfig::discord(),
        }
    }

    /// Create a builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Maximum chunk length in characters
    pub fn max_length(&self) -> usize {
        self.inner.max_length
    }

    /// Overflow policy
    pub fn overflow(&self) -> OverflowPolicy {
        self.inner.overflow
    }

    /// Whether math spans are tracked
    pub fn math(&self) -> bool {
        self.inner.markup.math
    }

    pub(crate) fn chunker_config(&self) -> ChunkerConfig {
        self.inner
    }
}

/// Configuration builder
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the maximum chunk length in characters
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.config.inner.max_length = max_length;
        self
    }

    /// Set the overflow policy
    pub fn overflow(mut self, policy: OverflowPolicy) -> Self {
        self.config.inner.overflow = policy;
        self
    }

    /// Set the overflow policy by name (`hard-cut`, `lookahead`, `reopen`)
    pub fn policy(self, name: &str) -> Result<Self> {
        let policy = OverflowPolicy::from_name(name, DEFAULT_LOOKAHEAD)
            .map_err(|e| ApiError::Config(e.to_string()))?;
        Ok(self.overflow(policy))
    }

    /// Use the lookahead policy with the given extra budget
    pub fn lookahead(self, max_extra: usize) -> Self {
        self.overflow(OverflowPolicy::Lookahead { max_extra })
    }

    /// Use the reopen policy
    pub fn reopen(self) -> Self {
        self.overflow(OverflowPolicy::Reopen)
    }

    /// Use the hard-cut policy
    pub fn hard_cut(self) -> Self {
        self.overflow(OverflowPolicy::HardCut)
    }

    /// Enable or disable math span tracking
    pub fn math(mut self, enabled: bool) -> Self {
        self.config.inner.markup.math = enabled;
        self
    }

    /// Use the Telegram preset, keeping policy and markup settings
    pub fn telegram(self) -> Self {
        self.max_length(ChunkerConfig::telegram().max_length)
    }

    /// Use the Discord preset, keeping policy and markup settings
    pub fn discord(self) -> Self {
        self.max_length(ChunkerConfig::discord().max_length)
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config> {
        self.config.inner.validate()?;
        Ok(self.config)
    }

    /// Build a splitter directly
    pub fn build_splitter(self) -> Result<MarkdownSplitter> {
        MarkdownSplitter::with_config(self.build()?)
    }
}
