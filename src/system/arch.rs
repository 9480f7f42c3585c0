use super::profile::{flathub_install, systemd, with_applications, ProfileKind, SystemProfile};
use crate::utils::Command;

/// Arch Linux: pacman for official packages, yay for the AUR
#[derive(Debug, Default)]
pub struct Arch;

impl SystemProfile for Arch {
    fn kind(&self) -> ProfileKind {
        ProfileKind::Arch
    }

    fn install_applications(&self, applications: &[&str]) -> Vec<Command> {
        with_applications(&["pacman", "-S", "--noconfirm", "--needed"], applications)
            .map(Command::elevated)
            .into_iter()
            .collect()
    }

    // makepkg refuses to run as root
    fn install_user_applications(&self, applications: &[&str]) -> Vec<Command> {
        with_applications(&["yay", "-S", "--noconfirm", "--needed"], applications)
            .map(Command::new)
            .into_iter()
            .collect()
    }

    fn install_flatpaks(&self, applications: &[&str]) -> Vec<Command> {
        flathub_install(applications)
    }

    fn update_os_repo(&self) -> Vec<Command> {
        vec![Command::elevated(["pacman", "-Sy"])]
    }

    fn update_os(&self) -> Vec<Command> {
        vec![Command::elevated(["pacman", "-Syu", "--noconfirm"])]
    }

    fn enable_service(&self, service: &str) -> Vec<Command> {
        systemd::enable(service)
    }

    fn reload_service_daemons(&self) -> Vec<Command> {
        systemd::daemon_reload()
    }

    fn system_dependencies(&self) -> Vec<Command> {
        self.install_applications(&["base-devel", "git", "flatpak"])
    }

    fn package_manager(&self) -> Option<&'static str> {
        Some("pacman")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_uses_pacman_elevated() {
        let commands = Arch.install_applications(&["git", "jq"]);
        assert_eq!(commands.len(), 1);
        assert!(commands[0].is_elevated());
        assert_eq!(
            commands[0].tokens(),
            ["pacman", "-S", "--noconfirm", "--needed", "git", "jq"]
        );
    }

    #[test]
    fn test_aur_install_runs_as_user() {
        let commands = Arch.install_user_applications(&["slack-desktop"]);
        assert!(!commands[0].is_elevated());
        assert_eq!(commands[0].program(), "yay");
    }

    #[test]
    fn test_empty_install_is_noop() {
        assert!(Arch.install_applications(&[]).is_empty());
    }

    #[test]
    fn test_enable_service() {
        let commands = Arch.enable_service("bluetooth");
        assert_eq!(commands[0].tokens(), ["systemctl", "enable", "bluetooth"]);
    }
}
