//! Session configuration.

use crate::error::{GameError, Result};

/// Inactivity window before the session auto-returns to the intro (5 minutes).
pub const DEFAULT_INACTIVITY_TIMEOUT_MS: f64 = 5.0 * 60.0 * 1000.0;
pub const DEFAULT_CLOCK_INTERVAL_MS: f64 = 1000.0;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct GameConfig {
    pub inactivity_timeout_ms: f64,
    pub clock_interval_ms: f64,
    /// Fixed seed for shuffles; `None` seeds from entropy.
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            inactivity_timeout_ms: DEFAULT_INACTIVITY_TIMEOUT_MS,
            clock_interval_ms: DEFAULT_CLOCK_INTERVAL_MS,
            rng_seed: None,
        }
    }
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_inactivity_timeout_ms(mut self, ms: f64) -> Self {
        self.inactivity_timeout_ms = ms;
        self
    }

    /// Parse and validate a JSON config. Missing fields keep their defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: GameConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("inactivityTimeoutMs", self.inactivity_timeout_ms),
            ("clockIntervalMs", self.clock_interval_ms),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(GameError::Config(format!(
                    "{name} must be a positive duration, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.inactivity_timeout_ms, 300_000.0);
        assert_eq!(cfg.clock_interval_ms, 1_000.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_durations() {
        let cfg = GameConfig::default().with_inactivity_timeout_ms(0.0);
        assert!(matches!(cfg.validate(), Err(GameError::Config(_))));
        let cfg = GameConfig { clock_interval_ms: f64::NAN, ..GameConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let cfg = GameConfig::from_json(r#"{"inactivityTimeoutMs": 60000, "rngSeed": 7}"#).unwrap();
        assert_eq!(cfg.inactivity_timeout_ms, 60_000.0);
        assert_eq!(cfg.clock_interval_ms, DEFAULT_CLOCK_INTERVAL_MS);
        assert_eq!(cfg.rng_seed, Some(7));
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn json_errors_surface_as_config_errors() {
        assert!(matches!(GameConfig::from_json("{not json"), Err(GameError::Config(_))));
        assert!(matches!(
            GameConfig::from_json(r#"{"clockIntervalMs": -5}"#),
            Err(GameError::Config(_))
        ));
    }
}
