use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// A named route plus the positional and keyword arguments needed to reverse it.
///
/// The calling layer turns it into a concrete redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteReference {
    pub name: Cow<'static, str>,
    pub args: Vec<String>,
    pub kwargs: BTreeMap<String, String>,
}

impl RouteReference {
    /// A route without arguments.
    #[must_use]
    pub const fn named(name: &'static str) -> Self {
        Self { name: Cow::Borrowed(name), args: Vec::new(), kwargs: BTreeMap::new() }
    }

    #[must_use]
    pub fn has_arguments(&self) -> bool {
        !self.args.is_empty() || !self.kwargs.is_empty()
    }
}
