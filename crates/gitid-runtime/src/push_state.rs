use crate::git::Git;
use crate::Result;
use std::collections::HashSet;

/// Which commits are already visible on the upstream tracking ref.
///
/// Without an upstream nothing can be proven local, so every commit is
/// reported as pushed.
#[derive(Debug, Clone, Default)]
pub struct PushState {
    upstream: Option<String>,
    local_only: HashSet<String>,
}

impl PushState {
    /// Compare HEAD against its upstream: commits reachable from HEAD but not
    /// from the upstream are local-only.
    pub fn detect(git: &Git) -> Result<Self> {
        let Some(upstream) = git.upstream_ref()? else {
            tracing::debug!("no upstream tracking ref; treating all commits as pushed");
            return Ok(Self::unknown());
        };

        let range = format!("{}..HEAD", upstream);
        match git.try_run(["rev-list", range.as_str()])? {
            Some(output) => Ok(Self {
                local_only: output
                    .lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(String::from)
                    .collect(),
                upstream: Some(upstream),
            }),
            None => {
                tracing::warn!(upstream = %upstream, "could not compare with upstream; treating all commits as pushed");
                Ok(Self::unknown())
            }
        }
    }

    /// Upstream could not be determined
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn is_upstream_unknown(&self) -> bool {
        self.upstream.is_none()
    }

    pub fn is_pushed(&self, hash: &str) -> bool {
        self.upstream.is_none() || !self.local_only.contains(hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_upstream_reports_everything_pushed() {
        let state = PushState::unknown();
        assert!(state.is_upstream_unknown());
        assert!(state.is_pushed("anything"));
    }

    #[test]
    fn test_local_only_membership() {
        let state = PushState {
            upstream: Some("origin/main".to_string()),
            local_only: ["aaa".to_string()].into_iter().collect(),
        };
        assert!(!state.is_pushed("aaa"));
        assert!(state.is_pushed("bbb"));
        assert!(!state.is_upstream_unknown());
    }
}
