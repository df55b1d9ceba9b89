//! Cache-aware composition root
//!
//! [`Analyzer`] owns both classifiers and the injected result cache. Each
//! request does one cache lookup, runs the engine on a miss, and stores the
//! result. Cache faults are logged and never fail a request.

use crate::config::AnalyzerConfig;
use crate::polarity::{LexiconPolarity, PolarityScorer};
use crate::sentiment::SentimentClassifier;
use crate::stance::StanceClassifier;
use stancelens_core::{
    CacheKey, ClassificationResult, NoopCache, Result, ResultCache, SentimentResult, StanceResult,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct Analyzer {
    sentiment: Arc<SentimentClassifier>,
    stance: Arc<StanceClassifier>,
    cache: Arc<dyn ResultCache>,
    ttl: Duration,
}

impl Analyzer {
    /// Analyzer with the default configuration and no cache
    pub fn new() -> Result<Self> {
        Self::from_config(&AnalyzerConfig::default(), Arc::new(NoopCache))
    }

    /// Build both classifiers from one configuration, sharing the bundled
    /// polarity scorer
    pub fn from_config(config: &AnalyzerConfig, cache: Arc<dyn ResultCache>) -> Result<Self> {
        Self::with_polarity(config, Arc::new(LexiconPolarity::new()), cache)
    }

    pub fn with_polarity(
        config: &AnalyzerConfig,
        polarity: Arc<dyn PolarityScorer>,
        cache: Arc<dyn ResultCache>,
    ) -> Result<Self> {
        config.validate()?;
        info!(
            polarity = polarity.name(),
            ttl_secs = config.cache.ttl_secs,
            require_english = config.language.require_english,
            "Analyzer initialized"
        );
        Ok(Self {
            sentiment: Arc::new(SentimentClassifier::with_config(config, polarity.clone())?),
            stance: Arc::new(StanceClassifier::with_config(config, polarity)?),
            cache,
            ttl: config.cache.ttl(),
        })
    }

    /// Load the configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>, cache: Arc<dyn ResultCache>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading analyzer config from {}", path.display());
        let config = AnalyzerConfig::from_file(path)?;
        Self::from_config(&config, cache)
    }

    pub fn sentiment_classifier(&self) -> &Arc<SentimentClassifier> {
        &self.sentiment
    }

    pub fn stance_classifier(&self) -> &Arc<StanceClassifier> {
        &self.stance
    }

    /// Classify overall sentiment, consulting the cache first
    pub async fn classify_sentiment(&self, text: &str) -> Result<SentimentResult> {
        let key = CacheKey::sentiment(text);
        if let Some(hit) = self.lookup(&key).await.and_then(ClassificationResult::into_sentiment) {
            return Ok(hit);
        }

        let result = self.sentiment.analyze(text)?;
        self.store(&key, ClassificationResult::Sentiment(result.clone())).await;
        Ok(result)
    }

    /// Classify stance toward `target`, consulting the cache first
    pub async fn classify_stance(&self, text: &str, target: &str) -> Result<StanceResult> {
        let key = CacheKey::stance(text, target);
        if let Some(hit) = self.lookup(&key).await.and_then(ClassificationResult::into_stance) {
            return Ok(hit);
        }

        let result = self.stance.analyze(text, target)?;
        self.store(&key, ClassificationResult::Stance(result.clone())).await;
        Ok(result)
    }

    async fn lookup(&self, key: &CacheKey) -> Option<ClassificationResult> {
        match self.cache.get(key).await {
            Ok(Some(hit)) => {
                debug!(%key, "cache hit");
                Some(hit)
            }
            Ok(None) => {
                debug!(%key, "cache miss");
                None
            }
            Err(e) => {
                warn!(%key, error = %e, "cache lookup failed, treating as miss");
                None
            }
        }
    }

    async fn store(&self, key: &CacheKey, value: ClassificationResult) {
        if let Err(e) = self.cache.set(key, &value, self.ttl).await {
            warn!(%key, error = %e, "cache store failed");
        }
    }
}
