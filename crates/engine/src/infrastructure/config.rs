//! Engine configuration read from the environment.
//!
//! | Variable                     | Default |
//! |------------------------------|---------|
//! | `SPIRIT77_SUCCESS_THRESHOLD` | 10      |
//! | `SPIRIT77_PARTIAL_THRESHOLD` | 7       |
//! | `SPIRIT77_SOMETHING_LESS_AT` | 4       |
//! | `SPIRIT77_DATA_PATH`         | unset   |
//!
//! `RUST_LOG` is read by the runner's log subscriber, falling back to
//! [`DEFAULT_LOG_FILTER`]. Call [`load_dotenv`] before installing it so
//! `.env` files can set it, and build the config after it so warnings about
//! bad values are not dropped.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use spirit77_domain::RulesConfig;

pub const DEFAULT_LOG_FILTER: &str = "spirit77_engine=info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub rules: RulesConfig,
    /// Snapshot used when the runner is not given one on the command line
    pub data_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rules: RulesConfig::default(),
            data_path: None,
        }
    }
}

impl EngineConfig {
    /// Read the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = RulesConfig::default();
        let rules = RulesConfig {
            success_threshold: parse_or(
                &lookup,
                "SPIRIT77_SUCCESS_THRESHOLD",
                defaults.success_threshold,
            ),
            partial_threshold: parse_or(
                &lookup,
                "SPIRIT77_PARTIAL_THRESHOLD",
                defaults.partial_threshold,
            ),
            something_less_at: parse_or(
                &lookup,
                "SPIRIT77_SOMETHING_LESS_AT",
                defaults.something_less_at,
            ),
        };

        let rules = match rules.validate() {
            Ok(()) => rules,
            Err(e) => {
                tracing::warn!(error = %e, "Rules configuration rejected, using defaults");
                defaults
            }
        };

        Self {
            rules,
            data_path: lookup("SPIRIT77_DATA_PATH")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, default = %default, "Unparseable value, using default");
            default
        }),
    }
}

/// Load `.env.local` and `.env` into the process environment. Variables
/// already set win.
pub fn load_dotenv() {
    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = Path::new(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = EngineConfig::from_lookup(|_| None);
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            ("SPIRIT77_SUCCESS_THRESHOLD", "11"),
            ("SPIRIT77_PARTIAL_THRESHOLD", " 8 "),
            ("SPIRIT77_SOMETHING_LESS_AT", "5"),
            ("SPIRIT77_DATA_PATH", "party.json"),
        ]));
        assert_eq!(config.rules.success_threshold, 11);
        assert_eq!(config.rules.partial_threshold, 8);
        assert_eq!(config.rules.something_less_at, 5);
        assert_eq!(config.data_path, Some(PathBuf::from("party.json")));
    }

    #[test]
    fn garbage_falls_back_per_key() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            ("SPIRIT77_SUCCESS_THRESHOLD", "lots"),
            ("SPIRIT77_SOMETHING_LESS_AT", "-3"),
            ("SPIRIT77_PARTIAL_THRESHOLD", "6"),
        ]));
        assert_eq!(config.rules.success_threshold, 10);
        assert_eq!(config.rules.partial_threshold, 6);
        assert_eq!(config.rules.something_less_at, 4);
    }

    #[test]
    fn inconsistent_thresholds_fall_back_together() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            ("SPIRIT77_SUCCESS_THRESHOLD", "5"),
            ("SPIRIT77_PARTIAL_THRESHOLD", "9"),
        ]));
        assert_eq!(config.rules, RulesConfig::default());
    }

    #[test]
    fn fallback_warnings_reach_the_installed_subscriber() {
        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let config = tracing::subscriber::with_default(subscriber, || {
            EngineConfig::from_lookup(lookup_from(&[("SPIRIT77_SUCCESS_THRESHOLD", "lots")]))
        });
        assert_eq!(config.rules.success_threshold, 10);

        let output = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"));
        assert!(output.contains("SPIRIT77_SUCCESS_THRESHOLD"));
    }
}
