use serde::{Deserialize, Serialize};

/// What the registration workflow knows about the incoming request.
///
/// Built by the calling layer (HTTP handler, CLI) and passed through untouched
/// to collaborators and event listeners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    /// Host the request was addressed to, without scheme (e.g. `signup.example.org`).
    pub host: String,
    pub secure: bool,
    pub request_id: Option<String>,
}

impl RequestContext {
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into(), secure: false, request_id: None }
    }

    #[must_use]
    pub const fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    #[must_use]
    pub fn request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    #[must_use]
    pub const fn scheme(&self) -> &'static str {
        if self.secure { "https" } else { "http" }
    }
}
