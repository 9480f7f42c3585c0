use super::profile::{ProfileKind, SystemProfile};

/// A Linux distribution without a dedicated profile.
///
/// Package operations are no-ops; only distribution-independent steps
/// (home directories, shell profile edits, dotfiles) take effect.
#[derive(Debug, Default)]
pub struct Linux;

impl SystemProfile for Linux {
    fn kind(&self) -> ProfileKind {
        ProfileKind::Linux
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_operation_is_noop() {
        let linux = Linux;
        assert!(linux.install_applications(&["git"]).is_empty());
        assert!(linux.install_application("git").is_empty());
        assert!(linux.install_user_applications(&["yay"]).is_empty());
        assert!(linux.update_os_repo().is_empty());
        assert!(linux.update_os().is_empty());
        assert!(linux.enable_service("sshd").is_empty());
        assert!(linux.system_dependencies().is_empty());
    }
}
