use thiserror::Error;

use crate::key::HintKey;

/// Invalid [`HintDbConfig`](crate::HintDbConfig) settings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("decay exponent must be positive and finite, got {0}")]
    DecayExponent(f64),
    #[error("scale must be positive and finite, got {0}")]
    Scale(f64),
    #[error("base points for {key} must be positive, got {points}")]
    BasePoints { key: HintKey, points: i64 },
}
