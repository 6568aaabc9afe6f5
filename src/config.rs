use std::env;
use std::str::FromStr;

use serde::Serialize;
use tracing::Level;

use crate::error::Error;

const BIND: &str = "MKTDASH_BIND";
const LOG: &str = "MKTDASH_LOG";
const AUTO_LOGIN: &str = "MKTDASH_AUTO_LOGIN";
const ON_TARGET: &str = "MKTDASH_ON_TARGET";
const AT_RISK: &str = "MKTDASH_AT_RISK";
const UTILIZATION_WARNING: &str = "MKTDASH_UTILIZATION_WARNING";

#[derive(Clone, Debug)]
pub struct Config {
    pub bind: String,
    pub log_level: Level,
    pub auto_login: bool,
    pub thresholds: Thresholds,
}

/// Percent boundaries used to classify campaign performance and to flag
/// budget utilization.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Thresholds {
    pub on_target: f64,
    pub at_risk: f64,
    pub utilization_warning: f64,
}

impl Default for Thresholds {
    fn default() -> Thresholds {
        Thresholds {
            on_target: 100.0,
            at_risk: 75.0,
            utilization_warning: 85.0,
        }
    }
}

impl Default for Config {
    fn default() -> Config {
        Config {
            bind: "127.0.0.1:8080".to_string(),
            log_level: Level::INFO,
            auto_login: true,
            thresholds: Thresholds::default(),
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment, after loading a
    /// `.env` file if one exists.
    pub fn from_env() -> Result<Config, Error> {
        // a missing .env file is normal
        let _ = dotenvy::dotenv();

        Config::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let thresholds = Thresholds {
            on_target: parse_or(&lookup, ON_TARGET, defaults.thresholds.on_target)?,
            at_risk: parse_or(&lookup, AT_RISK, defaults.thresholds.at_risk)?,
            utilization_warning: parse_or(
                &lookup,
                UTILIZATION_WARNING,
                defaults.thresholds.utilization_warning,
            )?,
        };

        if thresholds.at_risk > thresholds.on_target {
            return Err(Error::InvalidConfig {
                key: AT_RISK,
                value: thresholds.at_risk.to_string(),
            });
        }

        Ok(Config {
            bind: lookup(BIND).unwrap_or(defaults.bind),
            log_level: parse_or(&lookup, LOG, defaults.log_level)?,
            auto_login: parse_or(&lookup, AUTO_LOGIN, defaults.auto_login)?,
            thresholds,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, Error>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| Error::InvalidConfig { key, value }),
        None => Ok(default),
    }
}
