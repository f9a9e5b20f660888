//! Configuration types for the engine

use crate::error::{EngineError, Result};
use mdsplit_core::MarkupOptions;

/// Default chunk length in characters (Telegram's practical message limit)
pub const DEFAULT_MAX_LENGTH: usize = 4000;

/// Default number of extra characters searched by [`OverflowPolicy::Lookahead`]
pub const DEFAULT_LOOKAHEAD: usize = 500;

/// What to do when no balanced boundary fits within the limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Cut exactly at the limit, even inside a formatting span
    #[default]
    HardCut,
    /// Extend the chunk up to the first balanced boundary past the limit
    Lookahead {
        /// Maximum number of characters allowed past the limit
        max_extra: usize,
    },
    /// Close open spans at the cut and re-open them in the next chunk
    Reopen,
}

impl OverflowPolicy {
    /// Policy names accepted by [`OverflowPolicy::from_name`]
    pub const NAMES: [&'static str; 3] = ["hard-cut", "lookahead", "reopen"];

    /// Parse a policy name; `lookahead` supplies the extra budget when needed
    pub fn from_name(name: &str, lookahead: usize) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "hard-cut" | "hardcut" | "hard" => Ok(OverflowPolicy::HardCut),
            "lookahead" => Ok(OverflowPolicy::Lookahead {
                max_extra: lookahead,
            }),
            "reopen" => Ok(OverflowPolicy::Reopen),
            other => Err(EngineError::Config(format!(
                "unknown overflow policy '{other}', expected one of: {}",
                Self::NAMES.join(", ")
            ))),
        }
    }

    /// Canonical name of the policy
    pub fn name(&self) -> &'static str {
        match self {
            OverflowPolicy::HardCut => "hard-cut",
            OverflowPolicy::Lookahead { .. } => "lookahead",
            OverflowPolicy::Reopen => "reopen",
        }
    }

    /// Extra characters the boundary window must cover
    pub fn lookahead(&self) -> usize {
        match self {
            OverflowPolicy::Lookahead { max_extra } => *max_extra,
            _ => 0,
        }
    }
}

/// Chunker configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkerConfig {
    /// Maximum chunk length in characters
    pub max_length: usize,
    /// Fallback when no balanced boundary fits
    pub overflow: OverflowPolicy,
    /// Markup families tracked by the span scanner
    pub markup: MarkupOptions,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            overflow: OverflowPolicy::default(),
            markup: MarkupOptions::default(),
        }
    }
}

impl ChunkerConfig {
    /// Configuration for Telegram messages (4000 characters)
    pub fn telegram() -> Self {
        Self::default()
    }

    /// Configuration for Discord messages (2000 characters)
    pub fn discord() -> Self {
        Self {
            max_length: 2000,
            ..Self::default()
        }
    }

    /// Default configuration with a custom length limit
    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            max_length,
            ..Self::default()
        }
    }

    /// Check that the configuration can drive a chunker
    pub fn validate(&self) -> Result<()> {
        if self.max_length == 0 {
            return Err(EngineError::InvalidArgument {
                name: "max_length",
                reason: "must be at least 1".to_string(),
            });
        }
        if let OverflowPolicy::Lookahead { max_extra: 0 } = self.overflow {
            return Err(EngineError::InvalidArgument {
                name: "lookahead",
                reason: "lookahead policy needs a budget of at least 1".to_string(),
            });
        }
        Ok(())
    }
}
