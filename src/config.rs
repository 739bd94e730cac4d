//! Configuration constants and profile loading for codeline
//!
//! Profiles live in an INI file, one section per profile:
//!
//! ```ini
//! [default]
//! server = http://localhost:5000
//! debounce_ms = 800
//! timeout_secs = 30
//! ```

use anyhow::{Context, Result};
use ini::{Ini, Properties};
use std::path::Path;
use std::time::Duration;

use crate::repl::services::DEFAULT_QUIESCENCE;

/// Default profile file path for codeline
pub const DEFAULT_PROFILE_PATH: &str = "~/.codeline/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "CODELINE_PROFILE_PATH";

/// Analysis service used when no profile names one
pub const DEFAULT_SERVER: &str = "http://localhost:5000";

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    std::env::var_os(PROFILE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}

/// Settings for one editor session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub server: String,
    pub debounce: Duration,
    pub timeout: Option<Duration>,
}

impl Profile {
    /// Profile used when nothing is configured
    pub fn blank() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            debounce: DEFAULT_QUIESCENCE,
            timeout: None,
        }
    }

    /// Apply command line overrides
    pub fn with_overrides(mut self, server: Option<&str>, debounce_ms: Option<u64>) -> Self {
        if let Some(server) = server {
            self.server = server.to_string();
        }
        if let Some(ms) = debounce_ms {
            self.debounce = Duration::from_millis(ms);
        }
        self
    }

    fn from_section(name: &str, section: &Properties) -> Result<Self> {
        let mut profile = Self::blank();
        if let Some(server) = section.get("server") {
            profile.server = server.trim().to_string();
        }
        if let Some(ms) = section.get("debounce_ms") {
            let ms: u64 = ms
                .trim()
                .parse()
                .with_context(|| format!("invalid debounce_ms '{ms}' in profile '{name}'"))?;
            profile.debounce = Duration::from_millis(ms);
        }
        if let Some(secs) = section.get("timeout_secs") {
            let secs: u64 = secs
                .trim()
                .parse()
                .with_context(|| format!("invalid timeout_secs '{secs}' in profile '{name}'"))?;
            profile.timeout = Some(Duration::from_secs(secs));
        }
        Ok(profile)
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::blank()
    }
}

/// Profile store backed by an INI file
#[derive(Debug, Clone)]
pub struct IniProfileStore {
    path: String,
}

impl IniProfileStore {
    /// `path` may start with `~`
    pub fn new(path: &str) -> Self {
        Self {
            path: shellexpand::tilde(path).into_owned(),
        }
    }

    /// Load the named profile. A missing file or section is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Fails when the file exists but cannot be parsed, or a value is invalid.
    pub fn get_profile(&self, name: &str) -> Result<Option<Profile>> {
        if !Path::new(&self.path).exists() {
            tracing::debug!("profile file '{}' not found", self.path);
            return Ok(None);
        }

        let ini = Ini::load_from_file(&self.path)
            .with_context(|| format!("failed to read profile file '{}'", self.path))?;

        match ini.section(Some(name)) {
            Some(section) => Profile::from_section(name, section).map(Some),
            None => Ok(None),
        }
    }
}

/// Load `name` from `path`, falling back to [`Profile::blank`]
///
/// # Errors
///
/// See [`IniProfileStore::get_profile`].
pub fn load_profile(name: &str, path: &str) -> Result<Profile> {
    tracing::debug!("loading profile '{}' from '{}'", name, path);
    match IniProfileStore::new(path).get_profile(name)? {
        Some(profile) => {
            tracing::debug!(server = %profile.server, "profile loaded");
            Ok(profile)
        }
        None => {
            tracing::debug!("profile '{}' not found, using blank profile", name);
            Ok(Profile::blank())
        }
    }
}
