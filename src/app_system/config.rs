use std::{env, fmt::Display, str::FromStr};

use thiserror::Error;
use tracing::{info, warn};

use crate::clients::CheckoutPolicy;
use crate::domain::DeliveryPolicy;

#[derive(Debug, Error, PartialEq)]
#[error("Invalid value for {key}: {message}")]
pub struct ConfigError {
    pub key: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub free_delivery_above: u64,
    pub delivery_fee: u64,
    pub price_tolerance_bps: u32,
    pub actor_buffer: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            free_delivery_above: 99_900,
            delivery_fee: 4_900,
            price_tolerance_bps: 0,
            actor_buffer: 64,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            port: try_load(&lookup, "STORE_PORT", defaults.port)?,
            free_delivery_above: try_load(&lookup, "STORE_FREE_DELIVERY_ABOVE", defaults.free_delivery_above)?,
            delivery_fee: try_load(&lookup, "STORE_DELIVERY_FEE", defaults.delivery_fee)?,
            price_tolerance_bps: try_load(&lookup, "STORE_PRICE_TOLERANCE_BPS", defaults.price_tolerance_bps)?,
            actor_buffer: try_load::<usize>(&lookup, "STORE_ACTOR_BUFFER", defaults.actor_buffer)?.max(1),
        })
    }

    pub fn checkout_policy(&self) -> CheckoutPolicy {
        CheckoutPolicy {
            delivery: DeliveryPolicy {
                free_above: self.free_delivery_above,
                flat_fee: self.delivery_fee,
            },
            price_tolerance_bps: self.price_tolerance_bps,
        }
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");
            ConfigError { key: key.to_string(), message: e.to_string() }
        }),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(Config::from_lookup(lookup(&[])).unwrap(), Config::default());
    }

    #[test]
    fn test_overrides_and_policy() {
        let config = Config::from_lookup(lookup(&[
            ("STORE_PORT", "9090"),
            ("STORE_FREE_DELIVERY_ABOVE", "0"),
            ("STORE_PRICE_TOLERANCE_BPS", " 50 "),
        ]))
        .unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.price_tolerance_bps, 50);
        assert_eq!(config.checkout_policy().delivery.charge_for(10), 0);
    }

    #[test]
    fn test_invalid_value_is_an_error() {
        let err = Config::from_lookup(lookup(&[("STORE_PORT", "eighty")])).unwrap_err();
        assert_eq!(err.key, "STORE_PORT");
    }
}
