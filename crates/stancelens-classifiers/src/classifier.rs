//! Classifier trait and common types

use async_trait::async_trait;
use stancelens_core::{ClassificationResult, Result};

/// Trait for all classifiers
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify the given text
    async fn classify(&self, text: &str) -> Result<ClassificationResult>;

    /// Get the classifier name
    fn name(&self) -> &str;

    /// Get the tier (performance category)
    fn tier(&self) -> ClassifierTier;
}

/// Classifier performance tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierTier {
    /// Ultra-fast (<2ms) - single polarity pass
    A,
    /// Fast (<5ms) - per-mention windowed scoring
    B,
}

impl ClassifierTier {
    /// Get the latency budget for this tier in microseconds
    pub fn latency_budget_us(&self) -> u64 {
        match self {
            Self::A => 2_000,
            Self::B => 5_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latency_budgets_increase() {
        assert!(ClassifierTier::A.latency_budget_us() < ClassifierTier::B.latency_budget_us());
        assert_eq!(ClassifierTier::B.latency_budget_us(), 5_000);
    }
}
