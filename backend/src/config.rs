//! Service configuration
//!
//! Every setting has a default and can be overridden through a
//! `MINICHESS_*` environment variable. Durations use humantime syntax
//! (`90s`, `30m`, `1h 30m`).

use std::time::Duration;
use thiserror::Error;

pub const ENV_SESSION_TTL: &str = "MINICHESS_SESSION_TTL";
pub const ENV_SWEEP_INTERVAL: &str = "MINICHESS_SWEEP_INTERVAL";
pub const ENV_AI_DEADLINE: &str = "MINICHESS_AI_DEADLINE";
pub const ENV_TIE_EPSILON: &str = "MINICHESS_TIE_EPSILON";
pub const ENV_RNG_SEED: &str = "MINICHESS_RNG_SEED";

/// Shortest AI budget that still lets a depth-1 search finish on the
/// largest supported board.
pub const MIN_AI_DEADLINE: Duration = Duration::from_millis(50);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: invalid duration '{value}': {reason}")]
    InvalidDuration {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("{var}: invalid number '{value}'")]
    InvalidNumber { var: &'static str, value: String },

    #[error("session TTL must be greater than zero")]
    ZeroSessionTtl,

    #[error("sweep interval must be greater than zero")]
    ZeroSweepInterval,

    #[error("AI deadline {0:?} is below the minimum of {min:?}", min = MIN_AI_DEADLINE)]
    DeadlineTooShort(Duration),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Inactivity after which a session expires
    pub session_ttl: Duration,
    /// Period of the background expiry sweep
    pub sweep_interval: Duration,
    /// Wall-clock budget for one AI move
    pub ai_deadline: Duration,
    /// Tie window for Easy move choice, in centipawns
    pub tie_epsilon: i32,
    /// Base seed for per-session RNGs; OS entropy when unset
    pub rng_seed: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            session_ttl: Duration::from_secs(30 * 60),
            sweep_interval: Duration::from_secs(60),
            ai_deadline: Duration::from_secs(3),
            tie_epsilon: minichess_engine::constants::DEFAULT_TIE_EPSILON,
            rng_seed: None,
        }
    }
}

impl ServiceConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variables. Unset variables keep their
    /// defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_SESSION_TTL) {
            config.session_ttl = parse_duration(ENV_SESSION_TTL, &value)?;
        }
        if let Some(value) = lookup(ENV_SWEEP_INTERVAL) {
            config.sweep_interval = parse_duration(ENV_SWEEP_INTERVAL, &value)?;
        }
        if let Some(value) = lookup(ENV_AI_DEADLINE) {
            config.ai_deadline = parse_duration(ENV_AI_DEADLINE, &value)?;
        }
        if let Some(value) = lookup(ENV_TIE_EPSILON) {
            config.tie_epsilon = parse_number(ENV_TIE_EPSILON, &value)?;
        }
        if let Some(value) = lookup(ENV_RNG_SEED) {
            config.rng_seed = Some(parse_number(ENV_RNG_SEED, &value)?);
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session_ttl.is_zero() {
            return Err(ConfigError::ZeroSessionTtl);
        }
        if self.sweep_interval.is_zero() {
            return Err(ConfigError::ZeroSweepInterval);
        }
        if self.ai_deadline < MIN_AI_DEADLINE {
            return Err(ConfigError::DeadlineTooShort(self.ai_deadline));
        }
        Ok(())
    }
}

pub fn parse_duration(var: &'static str, value: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(value.trim()).map_err(|err| ConfigError::InvalidDuration {
        var,
        value: value.to_string(),
        reason: err.to_string(),
    })
}

fn parse_number<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            var,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.ai_deadline, Duration::from_secs(3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            (ENV_SESSION_TTL, "5m"),
            (ENV_SWEEP_INTERVAL, "10s"),
            (ENV_AI_DEADLINE, "500ms"),
            (ENV_TIE_EPSILON, "25"),
            (ENV_RNG_SEED, "42"),
        ]))
        .unwrap();

        assert_eq!(config.session_ttl, Duration::from_secs(300));
        assert_eq!(config.sweep_interval, Duration::from_secs(10));
        assert_eq!(config.ai_deadline, Duration::from_millis(500));
        assert_eq!(config.tie_epsilon, 25);
        assert_eq!(config.rng_seed, Some(42));
    }

    #[test]
    fn test_bad_values_rejected() {
        let err = ServiceConfig::from_lookup(lookup_from(&[(ENV_SESSION_TTL, "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDuration { var: ENV_SESSION_TTL, .. }));

        let err = ServiceConfig::from_lookup(lookup_from(&[(ENV_RNG_SEED, "-1")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { .. }));
    }

    #[test]
    fn test_validate_limits() {
        let config = ServiceConfig {
            ai_deadline: Duration::from_millis(10),
            ..ServiceConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::DeadlineTooShort(Duration::from_millis(10)))
        );

        let config = ServiceConfig {
            session_ttl: Duration::ZERO,
            ..ServiceConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroSessionTtl));
    }
}
