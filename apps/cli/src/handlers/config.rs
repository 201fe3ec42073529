use signup_domain::config::AppConfig;
use std::fmt;

/// Renders the settings that drive the registration workflow.
#[must_use]
pub fn render(cfg: &AppConfig) -> String {
    Settings(cfg).to_string()
}

struct Settings<'a>(&'a AppConfig);

impl fmt::Display for Settings<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reg = &self.0.registration;
        let sites = &self.0.sites;

        writeln!(f, "registration.open           = {}", reg.open)?;
        writeln!(f, "registration.activation_days = {}", reg.activation_days)?;
        writeln!(f, "registration.admins         = [{}]", reg.admins.join(", "))?;
        writeln!(f, "sites.installed             = {}", sites.installed)?;
        if sites.installed {
            writeln!(
                f,
                "sites.current               = #{} {} ({})",
                sites.current.id, sites.current.domain, sites.current.name
            )?;
        }
        writeln!(f, "logging.level               = {}", self.0.logging.level)
    }
}
