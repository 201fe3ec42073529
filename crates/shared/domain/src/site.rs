use crate::config::SiteConfig;
use crate::request::RequestContext;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an installed site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(pub u32);

/// The deployment context a registration happens under.
///
/// Installed sites carry an id. A request-derived pseudo-site has none and
/// uses the request host as both its domain and its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: Option<SiteId>,
    pub domain: String,
    pub name: String,
}

impl Site {
    #[must_use]
    pub fn from_request(request: &RequestContext) -> Self {
        Self { id: None, domain: request.host.clone(), name: request.host.clone() }
    }

    #[must_use]
    pub const fn is_request_site(&self) -> bool {
        self.id.is_none()
    }
}

impl From<&SiteConfig> for Site {
    fn from(cfg: &SiteConfig) -> Self {
        Self { id: Some(SiteId(cfg.id)), domain: cfg.domain.clone(), name: cfg.name.clone() }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.domain)
    }
}
