//! Configuration for the answering pipeline.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// Default minimum similarity a candidate must exceed to be used.
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.3;

/// Default pause between streamed words in interactive use.
pub const DEFAULT_STREAM_DELAY: Duration = Duration::from_millis(30);

/// Configuration parameters for the answering pipeline.
///
/// The number of retrieved candidates is not configurable — see
/// [`TOP_K`](crate::ranking::TOP_K).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RagConfig {
    /// Minimum similarity score; candidates at or below it are dropped.
    pub similarity_threshold: f32,
    /// Pause between streamed words. `Duration::ZERO` disables pacing,
    /// which is what tests want.
    pub stream_delay: Duration,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            stream_delay: DEFAULT_STREAM_DELAY,
        }
    }
}

impl RagConfig {
    /// Create a new builder for constructing a [`RagConfig`].
    pub fn builder() -> RagConfigBuilder {
        RagConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`RagConfig`].
#[derive(Debug, Clone, Default)]
pub struct RagConfigBuilder {
    config: RagConfig,
}

impl RagConfigBuilder {
    /// Set the minimum similarity threshold for candidates.
    pub fn similarity_threshold(mut self, threshold: f32) -> Self {
        self.config.similarity_threshold = threshold;
        self
    }

    /// Set the pause between streamed words.
    pub fn stream_delay(mut self, delay: Duration) -> Self {
        self.config.stream_delay = delay;
        self
    }

    /// Build the [`RagConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if `similarity_threshold` lies outside
    /// the cosine range [-1, 1].
    pub fn build(self) -> Result<RagConfig> {
        let threshold = self.config.similarity_threshold;
        if !(-1.0..=1.0).contains(&threshold) || threshold.is_nan() {
            return Err(RagError::Config(format!(
                "similarity_threshold ({threshold}) must lie in [-1, 1]"
            )));
        }
        Ok(self.config)
    }
}
