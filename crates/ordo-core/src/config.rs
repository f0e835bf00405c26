//! Runtime configuration.
//!
//! Configuration is thread-local: the engine is single-threaded and every
//! enumerator reads the active config when it is iterated, not when built.

use crate::error::{Error, ErrorKind};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

thread_local! {
    static CONFIG: RefCell<Config> = RefCell::new(Config::default());
}

///
/// TextMode
///
/// Text comparison mode used by the canonical `Value` comparer.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextMode {
    #[default]
    Cs, // case-sensitive
    Ci, // case-insensitive
}

///
/// Config
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Emit `MetricsEvent`s from the ordering engine.
    pub metrics: bool,

    pub text_mode: TextMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            metrics: true,
            text_mode: TextMode::Cs,
        }
    }
}

impl Config {
    /// Parse a config from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        toml::from_str(text)
            .map_err(|err| Error::new(ErrorKind::InvalidType, format!("invalid config: {err}")))
    }
}

/// Return a copy of the active config.
#[must_use]
pub fn current() -> Config {
    CONFIG.with(|cell| cell.borrow().clone())
}

/// Replace the active config for this thread.
pub fn set(config: Config) {
    CONFIG.with(|cell| *cell.borrow_mut() = config);
}

/// Run a closure with a temporary config, restoring the previous one afterwards.
pub fn with_config<T>(config: Config, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Config>);

    impl Drop for Guard {
        fn drop(&mut self) {
            if let Some(prev) = self.0.take() {
                set(prev);
            }
        }
    }

    let prev = CONFIG.with(|cell| std::mem::replace(&mut *cell.borrow_mut(), config));
    let _guard = Guard(Some(prev));

    f()
}

pub(crate) fn metrics_enabled() -> bool {
    CONFIG.with(|cell| cell.borrow().metrics)
}

pub(crate) fn text_mode() -> TextMode {
    CONFIG.with(|cell| cell.borrow().text_mode)
}

///
/// TESTS
///
