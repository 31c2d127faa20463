//! Configuration for relay scoring.

use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::error::ConfigError;
use crate::key::{HintKey, KEY_COUNT};

/// Tuning knobs for the decay function.
///
/// The defaults are empirical and shared with other hint databases, so scores stay comparable
/// unless a caller deliberately retunes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HintDbConfig {
    /// Added to "now" before computing elapsed time (default: 1 day).
    ///
    /// Keeps very fresh evidence from producing huge, unstable scores.
    pub grace_period: Duration,
    /// Power applied to elapsed seconds (default: 1.3).
    pub decay_exponent: f64,
    /// Multiplier that keeps truncated per-key scores meaningful (default: 1e10).
    pub scale: f64,
    /// Base weight of each evidence category.
    pub base_points: BasePoints,
}

impl Default for HintDbConfig {
    fn default() -> Self {
        Self {
            grace_period: Duration::from_secs(24 * 60 * 60),
            decay_exponent: 1.3,
            scale: 10_000_000_000.0,
            base_points: BasePoints::default(),
        }
    }
}

impl HintDbConfig {
    /// Create config with a custom grace period.
    pub fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }

    /// Create config with a custom decay exponent.
    pub fn with_decay_exponent(mut self, exponent: f64) -> Self {
        self.decay_exponent = exponent;
        self
    }

    /// Create config with a custom scale.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Create config with custom base points.
    pub fn with_base_points(mut self, base_points: BasePoints) -> Self {
        self.base_points = base_points;
        self
    }

    /// Reject settings that would break monotonic decay.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.decay_exponent.is_finite() || self.decay_exponent <= 0.0 {
            return Err(ConfigError::DecayExponent(self.decay_exponent));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ConfigError::Scale(self.scale));
        }
        for key in HintKey::ALL {
            let points = self.base_points.get(key);
            if points <= 0 {
                return Err(ConfigError::BasePoints { key, points });
            }
        }
        Ok(())
    }

    /// Grace period in whole seconds.
    pub(crate) fn grace_secs(&self) -> u64 {
        self.grace_period.as_secs()
    }
}

/// Base weight per [`HintKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BasePoints {
    pub last_fetch_attempt: i64,
    pub most_recent_event_fetched: i64,
    pub last_in_relay_list: i64,
    pub last_in_hint: i64,
}

impl Default for BasePoints {
    fn default() -> Self {
        Self {
            last_fetch_attempt: HintKey::LastFetchAttempt.base_points(),
            most_recent_event_fetched: HintKey::MostRecentEventFetched.base_points(),
            last_in_relay_list: HintKey::LastInRelayList.base_points(),
            last_in_hint: HintKey::LastInHint.base_points(),
        }
    }
}

impl BasePoints {
    /// Same weight for every key.
    pub fn uniform(points: i64) -> Self {
        Self {
            last_fetch_attempt: points,
            most_recent_event_fetched: points,
            last_in_relay_list: points,
            last_in_hint: points,
        }
    }

    pub fn get(&self, key: HintKey) -> i64 {
        match key {
            HintKey::LastFetchAttempt => self.last_fetch_attempt,
            HintKey::MostRecentEventFetched => self.most_recent_event_fetched,
            HintKey::LastInRelayList => self.last_in_relay_list,
            HintKey::LastInHint => self.last_in_hint,
        }
    }

    /// Weights laid out in slot order.
    pub fn to_array(&self) -> [i64; KEY_COUNT] {
        HintKey::ALL.map(|key| self.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HintDbConfig::default();
        assert_eq!(config.grace_period, Duration::from_secs(86_400));
        assert_eq!(config.decay_exponent, 1.3);
        assert_eq!(config.scale, 1e10);
        assert_eq!(config.base_points.get(HintKey::MostRecentEventFetched), 700);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = HintDbConfig::default()
            .with_grace_period(Duration::from_secs(60))
            .with_decay_exponent(2.0)
            .with_scale(1e6)
            .with_base_points(BasePoints::uniform(10));

        assert_eq!(config.grace_secs(), 60);
        assert_eq!(config.decay_exponent, 2.0);
        assert_eq!(config.scale, 1e6);
        assert_eq!(config.base_points.to_array(), [10; KEY_COUNT]);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = HintDbConfig::default().with_decay_exponent(0.0);
        assert!(matches!(config.validate(), Err(ConfigError::DecayExponent(_))));

        let config = HintDbConfig::default().with_decay_exponent(f64::NAN);
        assert!(matches!(config.validate(), Err(ConfigError::DecayExponent(_))));

        let config = HintDbConfig::default().with_scale(-1.0);
        assert!(matches!(config.validate(), Err(ConfigError::Scale(_))));

        let mut points = BasePoints::default();
        points.last_fetch_attempt = -500;
        let config = HintDbConfig::default().with_base_points(points);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BasePoints {
                key: HintKey::LastFetchAttempt,
                points: -500
            })
        ));
    }

    #[test]
    fn test_partial_toml() {
        let config: HintDbConfig = toml::from_str(
            r#"
            decay_exponent = 1.5

            [base_points]
            last-in-hint = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.decay_exponent, 1.5);
        assert_eq!(config.scale, 1e10);
        assert_eq!(config.base_points.last_in_hint, 5);
        assert_eq!(config.base_points.last_in_relay_list, 350);
    }
}
