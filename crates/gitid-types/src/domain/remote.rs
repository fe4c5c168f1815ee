use serde::{Deserialize, Serialize};
use std::fmt;

/// `{host, org, repo}` triple derived from a remote URL.
///
/// Transient: derived per resolution call and never persisted. `org` may
/// contain `/` for nested groups (e.g. GitLab subgroups).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRemote {
    pub host: String,
    pub org: String,
    pub repo: String,
}

impl ParsedRemote {
    pub fn new(host: impl Into<String>, org: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            org: org.into(),
            repo: repo.into(),
        }
    }
}

/// Renders as `host/org/repo`, the string remote patterns are matched against
impl fmt::Display for ParsedRemote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.host, self.org, self.repo)
    }
}
