use super::profile::{with_applications, ProfileKind, SystemProfile};
use crate::utils::Command;

const HOMEBREW_INSTALLER: &str =
    "https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh";

/// macOS with Homebrew. brew refuses to run as root, so nothing here is elevated.
#[derive(Debug, Default)]
pub struct Mac;

impl SystemProfile for Mac {
    fn kind(&self) -> ProfileKind {
        ProfileKind::Mac
    }

    fn install_applications(&self, applications: &[&str]) -> Vec<Command> {
        with_applications(&["brew", "install"], applications)
            .map(Command::new)
            .into_iter()
            .collect()
    }

    fn install_casks(&self, casks: &[&str]) -> Vec<Command> {
        with_applications(&["brew", "install", "--cask"], casks)
            .map(Command::new)
            .into_iter()
            .collect()
    }

    fn update_os_repo(&self) -> Vec<Command> {
        vec![Command::new(["brew", "update"])]
    }

    fn update_os(&self) -> Vec<Command> {
        let mut commands = self.update_os_repo();
        commands.push(Command::new(["brew", "upgrade"]));
        commands
    }

    fn system_dependencies(&self) -> Vec<Command> {
        vec![Command::new([
            "/bin/bash".to_string(),
            "-c".to_string(),
            format!(
                "command -v brew >/dev/null || NONINTERACTIVE=1 /bin/bash -c \"$(curl -fsSL {})\"",
                HOMEBREW_INSTALLER
            ),
        ])]
    }

    fn package_manager(&self) -> Option<&'static str> {
        Some("brew")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brew_runs_as_user() {
        let commands = Mac.install_applications(&["jq"]);
        assert_eq!(commands[0].tokens(), ["brew", "install", "jq"]);
        assert!(!commands[0].is_elevated());
    }

    #[test]
    fn test_casks() {
        let commands = Mac.install_casks(&["visual-studio-code", "iterm2"]);
        assert_eq!(
            commands[0].tokens(),
            ["brew", "install", "--cask", "visual-studio-code", "iterm2"]
        );
        assert!(Mac.install_casks(&[]).is_empty());
    }

    #[test]
    fn test_update_os_upgrades_after_update() {
        let commands = Mac.update_os();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0].tokens(), ["brew", "update"]);
        assert_eq!(commands[1].tokens(), ["brew", "upgrade"]);
    }

    #[test]
    fn test_homebrew_bootstrap_is_guarded_in_the_shell() {
        let commands = Mac.system_dependencies();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].program(), "/bin/bash");
        assert!(commands[0].args()[1].starts_with("command -v brew >/dev/null || "));
        assert!(commands[0].args()[1].contains(HOMEBREW_INSTALLER));
        assert!(!commands[0].is_elevated());
    }

    #[test]
    fn test_no_services_or_snaps() {
        assert!(Mac.enable_service("docker").is_empty());
        assert!(Mac.install_snaps(&["helm"], true).is_empty());
        assert!(Mac.install_flatpaks(&["org.gimp.GIMP"]).is_empty());
    }
}
