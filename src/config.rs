use anyhow::{bail, Context, Result};
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

pub const TMDB_BASE: &str = "https://api.themoviedb.org/3";
pub const POSTER_BASE: &str = "https://image.tmdb.org/t/p/original";
const DEFAULT_BIND: &str = "0.0.0.0:3146";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_base: String,
    pub image_base: String,
    pub bind: SocketAddr,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup so parsing can be exercised
    /// without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("TMDB_API_KEY").context("TMDB_API_KEY not set")?;
        let api_base = get("TMDB_BASE_URL")
            .unwrap_or_else(|| TMDB_BASE.to_string())
            .trim_end_matches('/')
            .to_string();
        let image_base = get("TMDB_IMAGE_BASE_URL")
            .unwrap_or_else(|| POSTER_BASE.to_string())
            .trim_end_matches('/')
            .to_string();
        let bind = get("MOVIEPAL_BIND")
            .unwrap_or_else(|| DEFAULT_BIND.to_string())
            .parse::<SocketAddr>()
            .context("MOVIEPAL_BIND must be a socket address like 0.0.0.0:3146")?;
        let timeout_secs = match get("TMDB_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .context("TMDB_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            bail!("TMDB_TIMEOUT_SECS must be at least 1 second");
        }

        Ok(Self {
            api_key,
            api_base,
            image_base,
            bind,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let cfg = Config::from_lookup(lookup(&[("TMDB_API_KEY", "abc")])).unwrap();
        assert_eq!(cfg.api_key, "abc");
        assert_eq!(cfg.api_base, TMDB_BASE);
        assert_eq!(cfg.image_base, POSTER_BASE);
        assert_eq!(cfg.bind.port(), 3146);
        assert_eq!(cfg.timeout, Duration::from_secs(10));
    }

    #[test]
    fn missing_or_blank_key_is_rejected() {
        assert!(Config::from_lookup(lookup(&[])).is_err());
        assert!(Config::from_lookup(lookup(&[("TMDB_API_KEY", "  ")])).is_err());
    }

    #[test]
    fn overrides_are_parsed_and_trimmed() {
        let cfg = Config::from_lookup(lookup(&[
            ("TMDB_API_KEY", "abc"),
            ("TMDB_BASE_URL", "http://localhost:9000/3/"),
            ("MOVIEPAL_BIND", "127.0.0.1:8080"),
            ("TMDB_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();
        assert_eq!(cfg.api_base, "http://localhost:9000/3");
        assert_eq!(cfg.bind.to_string(), "127.0.0.1:8080");
        assert_eq!(cfg.timeout, Duration::from_secs(3));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("TMDB_API_KEY", "abc"),
            ("TMDB_TIMEOUT_SECS", "0"),
        ]))
        .expect_err("zero timeout");
        assert!(err.to_string().contains("TMDB_TIMEOUT_SECS"));
    }

    #[test]
    fn bad_timeout_is_an_error() {
        let err = Config::from_lookup(lookup(&[
            ("TMDB_API_KEY", "abc"),
            ("TMDB_TIMEOUT_SECS", "soon"),
        ]));
        assert!(err.is_err());
    }
}
