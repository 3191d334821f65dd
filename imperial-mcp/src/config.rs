//! Server configuration, read from the environment
//!
//! - `IMPERIAL_LOCALE`: locale for formatted results. Falls back to
//!   `LC_ALL`, `LC_NUMERIC`, `LANG`, then en-US.
//! - `IMPERIAL_UNKNOWN_UNITS`: `fallback` (default) or `reject`.
//! - `RUST_LOG`: log filter, read by the subscriber in `main`.

use imperial::units::NumberLocale;
use imperial::UnknownUnitPolicy;
use std::env;
use tracing::warn;

const LOCALE_VARS: [&str; 4] = ["IMPERIAL_LOCALE", "LC_ALL", "LC_NUMERIC", "LANG"];
const POLICY_VAR: &str = "IMPERIAL_UNKNOWN_UNITS";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub locale: NumberLocale,
    pub unknown_units: UnknownUnitPolicy,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Bad values are logged and replaced by
    /// defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let locale = LOCALE_VARS
            .iter()
            .find_map(|&key| lookup(key).filter(|v| !v.trim().is_empty()).map(|v| (key, v)))
            .map(|(key, tag)| {
                NumberLocale::from_tag(&tag).unwrap_or_else(|| {
                    warn!(var = key, value = %tag, "unsupported locale, using en-US");
                    NumberLocale::default()
                })
            })
            .unwrap_or_default();

        let unknown_units = match lookup(POLICY_VAR) {
            Some(raw) => raw.parse().unwrap_or_else(|e: String| {
                warn!(var = POLICY_VAR, error = %e, "using default policy");
                UnknownUnitPolicy::default()
            }),
            None => UnknownUnitPolicy::default(),
        };

        Config { locale, unknown_units }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(config(&[]), Config::default());
        assert_eq!(Config::default().locale, NumberLocale::EN_US);
        assert_eq!(Config::default().unknown_units, UnknownUnitPolicy::FallbackToMeters);
    }

    #[test]
    fn test_explicit_locale_wins() {
        let cfg = config(&[("IMPERIAL_LOCALE", "de-DE"), ("LANG", "fr_FR.UTF-8")]);
        assert_eq!(cfg.locale, NumberLocale::DE_DE);
    }

    #[test]
    fn test_posix_locale_chain() {
        assert_eq!(config(&[("LANG", "fr_FR.UTF-8")]).locale, NumberLocale::FR_FR);
        let cfg = config(&[("LC_NUMERIC", "it_IT"), ("LANG", "fr_FR")]);
        assert_eq!(cfg.locale, NumberLocale::IT_IT);
        assert_eq!(config(&[("LC_ALL", ""), ("LANG", "pt_BR.UTF-8")]).locale, NumberLocale::PT_BR);
        assert_eq!(config(&[("LANG", "C.UTF-8")]).locale, NumberLocale::EN_US);
    }

    #[test]
    fn test_unsupported_locale_uses_default() {
        assert_eq!(config(&[("IMPERIAL_LOCALE", "xx-YY")]).locale, NumberLocale::EN_US);
    }

    #[test]
    fn test_policy() {
        let cfg = config(&[("IMPERIAL_UNKNOWN_UNITS", "reject")]);
        assert_eq!(cfg.unknown_units, UnknownUnitPolicy::Reject);
        assert_eq!(
            config(&[("IMPERIAL_UNKNOWN_UNITS", "bogus")]).unknown_units,
            UnknownUnitPolicy::FallbackToMeters
        );
    }
}
