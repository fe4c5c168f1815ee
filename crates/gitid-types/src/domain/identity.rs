use serde::{Deserialize, Serialize};

/// A named commit identity (`user.name` / `user.email` pair plus optional keys)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Unique key referenced by rules
    pub name: String,
    pub user_name: String,
    pub email: String,
    /// Path to the SSH private key used for this identity (may start with `~`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_key: Option<String>,
    /// GPG key ID used for `user.signingkey`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpg_key: Option<String>,
}

impl Identity {
    pub fn new(
        name: impl Into<String>,
        user_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            user_name: user_name.into(),
            email: email.into(),
            ssh_key: None,
            gpg_key: None,
        }
    }

    /// Case-insensitive email comparison. Git treats the local part as opaque,
    /// but every hosting provider folds case, so we do too.
    pub fn email_matches(&self, email: &str) -> bool {
        emails_equal(&self.email, email)
    }
}

pub fn emails_equal(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}
