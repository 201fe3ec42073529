use config::{Config, Environment, File, FileFormat, FileSourceFile};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, info};

/// Prefix of environment overrides, e.g. `SIGNUP__REGISTRATION__OPEN=false`.
pub const ENV_PREFIX: &str = "SIGNUP";
/// File stem probed in the working directory when no path is given.
pub const DEFAULT_FILE: &str = "signup";

#[signup_derive::signup_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads layered configuration: a file, then `SIGNUP__*` environment overrides.
///
/// With `Some(path)` the file must exist. Without a path, `signup.{toml,json,yaml,..}`
/// in the working directory is used if present, so a bare environment is enough
/// to run with defaults. Nested keys are separated by a double underscore
/// (`SIGNUP__SITES__CURRENT__DOMAIN` maps to `sites.current.domain`).
///
/// # Errors
/// Returns [`ConfigError::Config`] when an explicit file is missing or unreadable,
/// or when the merged values do not deserialize into `T`.
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let file = match path {
        Some(path) => {
            info!(path = %path.as_ref().display(), "Loading config");
            File::from(path.as_ref()).required(true)
        },
        None => {
            debug!(stem = DEFAULT_FILE, "No config path given, probing default file");
            File::with_name(DEFAULT_FILE).required(false)
        },
    };

    load_layered(file, environment())
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("registration.admins")
        .try_parsing(true)
}

fn load_layered<T>(file: File<FileSourceFile, FileFormat>, env: Environment) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    Config::builder()
        .add_source(file)
        .add_source(env)
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::Map;
    use signup_domain::config::AppConfig;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: Map<String, String> =
            vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
        environment().source(Some(map))
    }

    fn no_file() -> File<FileSourceFile, FileFormat> {
        File::with_name("definitely-not-a-signup-config").required(false)
    }

    #[test]
    fn defaults_without_file_or_env() {
        let cfg: AppConfig = load_layered(no_file(), env(&[])).unwrap();
        assert!(cfg.registration.open);
        assert_eq!(cfg.registration.activation_days, 7);
    }

    #[test]
    fn env_overrides_nested_keys() {
        let cfg: AppConfig = load_layered(
            no_file(),
            env(&[
                ("SIGNUP__REGISTRATION__OPEN", "false"),
                ("SIGNUP__REGISTRATION__ACTIVATION_DAYS", "2"),
                ("SIGNUP__REGISTRATION__ADMINS", "a@example.org,b@example.org"),
                ("SIGNUP__SITES__CURRENT__DOMAIN", "lab.example.org"),
            ]),
        )
        .unwrap();

        assert!(!cfg.registration.open);
        assert_eq!(cfg.registration.activation_days, 2);
        assert_eq!(cfg.registration.admins, ["a@example.org", "b@example.org"]);
        assert_eq!(cfg.sites.current.domain, "lab.example.org");
    }

    #[test]
    fn foreign_prefix_is_ignored() {
        let cfg: AppConfig =
            load_layered(no_file(), env(&[("OTHER__REGISTRATION__OPEN", "false")])).unwrap();
        assert!(cfg.registration.open);
    }

    #[test]
    fn malformed_value_reports_context() {
        let err = load_layered::<AppConfig>(
            no_file(),
            env(&[("SIGNUP__REGISTRATION__ACTIVATION_DAYS", "soon")]),
        )
        .unwrap_err();
        assert_eq!(err.context(), Some("Failed to deserialize config"));
    }
}
