use signup_domain::config::SitesConfig;
use signup_domain::request::RequestContext;
use signup_domain::site::Site;

/// Picks the site a registration happens under.
///
/// With multi-site support installed the configured current site is used;
/// otherwise a pseudo-site is derived from each request's host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteResolver {
    Installed(Site),
    Request,
}

impl SiteResolver {
    #[must_use]
    pub fn from_config(cfg: &SitesConfig) -> Self {
        if cfg.installed { Self::Installed(Site::from(&cfg.current)) } else { Self::Request }
    }

    #[must_use]
    pub fn resolve(&self, request: &RequestContext) -> Site {
        match self {
            Self::Installed(site) => site.clone(),
            Self::Request => Site::from_request(request),
        }
    }
}

impl Default for SiteResolver {
    fn default() -> Self {
        Self::from_config(&SitesConfig::default())
    }
}
