use super::profile::{with_applications, ProfileKind, SystemProfile};
use crate::utils::Command;

const CHOCOLATEY_BOOTSTRAP: &str = "if (-not (Get-Command choco -ErrorAction SilentlyContinue)) { \
Set-ExecutionPolicy Bypass -Scope Process -Force; \
[System.Net.ServicePointManager]::SecurityProtocol = 3072; \
iex ((New-Object System.Net.WebClient).DownloadString('https://community.chocolatey.org/install.ps1')) }";

/// Windows with Chocolatey, run from an elevated shell
#[derive(Debug, Default)]
pub struct Windows;

impl SystemProfile for Windows {
    fn kind(&self) -> ProfileKind {
        ProfileKind::Windows
    }

    fn install_applications(&self, applications: &[&str]) -> Vec<Command> {
        with_applications(&["choco", "install", "--yes"], applications)
            .map(Command::elevated)
            .into_iter()
            .collect()
    }

    // Chocolatey has no separate index refresh
    fn update_os(&self) -> Vec<Command> {
        vec![Command::elevated(["choco", "upgrade", "all", "--yes"])]
    }

    fn system_dependencies(&self) -> Vec<Command> {
        vec![Command::elevated([
            "powershell",
            "-NoProfile",
            "-ExecutionPolicy",
            "Bypass",
            "-Command",
            CHOCOLATEY_BOOTSTRAP,
        ])]
    }

    fn package_manager(&self) -> Option<&'static str> {
        Some("choco")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_uses_choco() {
        let commands = Windows.install_applications(&["git", "7zip"]);
        assert_eq!(commands[0].tokens(), ["choco", "install", "--yes", "git", "7zip"]);
        assert!(commands[0].is_elevated());
    }

    #[test]
    fn test_update_index_is_noop() {
        assert!(Windows.update_os_repo().is_empty());
        assert_eq!(
            Windows.update_os()[0].tokens(),
            ["choco", "upgrade", "all", "--yes"]
        );
    }

    #[test]
    fn test_chocolatey_bootstrap_is_guarded_in_powershell() {
        let commands = Windows.system_dependencies();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].program(), "powershell");
        let script = commands[0].args().last().unwrap();
        assert!(script.starts_with("if (-not (Get-Command choco"));
        assert!(commands[0].is_elevated());
    }

    #[test]
    fn test_user_install_is_native_install() {
        assert_eq!(
            Windows.install_user_applications(&["vscode"]),
            Windows.install_applications(&["vscode"])
        );
    }
}
