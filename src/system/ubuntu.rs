//! Ubuntu and its desktop flavours.
//!
//! The flavours share every apt command; they exist as separate profiles so
//! the catalogue can key flavour-specific packages (restricted extras,
//! desktop tools) on them.

use super::profile::{flathub_install, systemd, with_applications, ProfileKind, SystemProfile};
use crate::utils::Command;

fn apt_install(applications: &[&str]) -> Vec<Command> {
    with_applications(&["apt-get", "install", "-y"], applications)
        .map(Command::elevated)
        .into_iter()
        .collect()
}

fn snap_install(applications: &[&str], classic: bool) -> Vec<Command> {
    applications
        .iter()
        .map(|&app| {
            let mut tokens = vec!["snap", "install", app];
            if classic {
                tokens.push("--classic");
            }
            Command::elevated(tokens)
        })
        .collect()
}

fn apt_update() -> Vec<Command> {
    vec![Command::elevated(["apt-get", "update"])]
}

fn apt_upgrade() -> Vec<Command> {
    let mut commands = apt_update();
    commands.push(Command::elevated(["apt-get", "-y", "full-upgrade"]));
    commands
}

macro_rules! ubuntu_profile {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Default)]
        pub struct $name;

        impl SystemProfile for $name {
            fn kind(&self) -> ProfileKind {
                ProfileKind::$name
            }

            fn install_applications(&self, applications: &[&str]) -> Vec<Command> {
                apt_install(applications)
            }

            fn install_flatpaks(&self, applications: &[&str]) -> Vec<Command> {
                flathub_install(applications)
            }

            fn install_snaps(&self, applications: &[&str], classic: bool) -> Vec<Command> {
                snap_install(applications, classic)
            }

            fn update_os_repo(&self) -> Vec<Command> {
                apt_update()
            }

            fn update_os(&self) -> Vec<Command> {
                apt_upgrade()
            }

            fn enable_service(&self, service: &str) -> Vec<Command> {
                systemd::enable(service)
            }

            fn reload_service_daemons(&self) -> Vec<Command> {
                systemd::daemon_reload()
            }

            fn system_dependencies(&self) -> Vec<Command> {
                let mut commands = apt_update();
                commands.extend(apt_install(&[
                    "software-properties-common",
                    "ca-certificates",
                    "curl",
                    "flatpak",
                ]));
                commands
            }

            fn package_manager(&self) -> Option<&'static str> {
                Some("apt-get")
            }
        }
    };
}

ubuntu_profile!(
    /// Ubuntu with GNOME or any desktop without a dedicated flavour
    Ubuntu
);
ubuntu_profile!(
    /// Ubuntu running KDE Plasma
    Kubuntu
);
ubuntu_profile!(
    /// Ubuntu running LXQt or LXDE
    Lubuntu
);
ubuntu_profile!(
    /// Ubuntu running Xfce
    Xubuntu
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_uses_apt_get() {
        let commands = Ubuntu.install_applications(&["git"]);
        assert_eq!(commands[0].tokens(), ["apt-get", "install", "-y", "git"]);
        assert!(commands[0].is_elevated());
    }

    #[test]
    fn test_flavours_share_commands() {
        assert_eq!(
            Kubuntu.install_applications(&["tmux"]),
            Ubuntu.install_applications(&["tmux"])
        );
        assert_eq!(Xubuntu.update_os(), Lubuntu.update_os());
        assert_eq!(Kubuntu.kind(), ProfileKind::Kubuntu);
    }

    #[test]
    fn test_update_os_refreshes_index_first() {
        let commands = Ubuntu.update_os();
        assert_eq!(commands[0].tokens(), ["apt-get", "update"]);
        assert_eq!(commands[1].tokens(), ["apt-get", "-y", "full-upgrade"]);
    }

    #[test]
    fn test_classic_snaps_install_one_at_a_time() {
        let commands = Ubuntu.install_snaps(&["kubectl", "helm"], true);
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[1].tokens(), ["snap", "install", "helm", "--classic"]);
    }
}
