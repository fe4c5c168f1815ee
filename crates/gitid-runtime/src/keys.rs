use gitid_core::expand_tilde;
use std::process::{Command, Stdio};

/// Presence checks for an identity's keys. Generation is handled elsewhere.
pub trait KeyInspector {
    fn has_ssh_key(&self, path: &str) -> bool;
    fn has_gpg_key(&self, key_id: &str) -> bool;
}

/// Checks the filesystem for SSH keys and the local GPG keyring for secret keys
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemKeyInspector;

impl KeyInspector for SystemKeyInspector {
    fn has_ssh_key(&self, path: &str) -> bool {
        expand_tilde(path).is_file()
    }

    fn has_gpg_key(&self, key_id: &str) -> bool {
        Command::new("gpg")
            .args(["--list-secret-keys", key_id])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }
}
