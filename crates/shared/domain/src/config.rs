use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration shared across the workspace.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfigInner {
    pub registration: RegistrationConfig,
    pub sites: SitesConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(flatten, default)]
    inner: Arc<AppConfigInner>,
}

impl Deref for AppConfig {
    type Target = AppConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for AppConfig {
    fn deref_mut(&mut self) -> &mut AppConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Registration workflow knobs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegistrationConfig {
    /// Whether new sign-ups are accepted. Absent means open.
    pub open: bool,
    /// Days an activation key stays valid after the account was created.
    pub activation_days: u32,
    /// Addresses notified when an account is waiting for manual activation.
    pub admins: Vec<String>,
}

/// Multi-site support.
///
/// With `installed = false` every request is served under a pseudo-site
/// derived from the request host.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SitesConfig {
    pub installed: bool,
    pub current: SiteConfig,
}

/// The site this deployment serves when multi-site support is installed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub id: u32,
    pub domain: String,
    pub name: String,
}

/// Subscriber settings consumed by `signup-logger`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level (`trace`, `debug`, `info`, `warn`, `error`, `off`).
    pub level: String,
    /// Extra directives, e.g. `signup_registration=debug`.
    pub filter: Option<String>,
    /// Directory for rolling log files; console only when absent.
    pub directory: Option<PathBuf>,
    pub json: bool,
    pub console: bool,
    pub max_files: usize,
}

// --- Default ---

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self { open: true, activation_days: 7, admins: Vec::new() }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self { id: 1, domain: "example.com".to_owned(), name: "example.com".to_owned() }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            filter: None,
            directory: None,
            json: false,
            console: true,
            max_files: 10,
        }
    }
}
