use crate::utils::Command;
use std::fmt;

/// The concrete platform a profile targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileKind {
    Linux,
    Arch,
    Ubuntu,
    Kubuntu,
    Lubuntu,
    Xubuntu,
    Mac,
    Windows,
}

/// Keys for catalogue recipes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Arch,
    Ubuntu,
    Kubuntu,
    Lubuntu,
    Xubuntu,
    Linux,
    Mac,
    Unix,
    Windows,
}

impl ProfileKind {
    pub fn name(&self) -> &'static str {
        match self {
            ProfileKind::Linux => "Linux",
            ProfileKind::Arch => "Arch",
            ProfileKind::Ubuntu => "Ubuntu",
            ProfileKind::Kubuntu => "Kubuntu",
            ProfileKind::Lubuntu => "Lubuntu",
            ProfileKind::Xubuntu => "Xubuntu",
            ProfileKind::Mac => "Mac",
            ProfileKind::Windows => "Windows",
        }
    }

    /// Recipe keys this profile accepts, most specific first
    pub fn lineage(&self) -> &'static [Target] {
        match self {
            ProfileKind::Linux => &[Target::Linux, Target::Unix],
            ProfileKind::Arch => &[Target::Arch, Target::Linux, Target::Unix],
            ProfileKind::Ubuntu => &[Target::Ubuntu, Target::Linux, Target::Unix],
            ProfileKind::Kubuntu => &[Target::Kubuntu, Target::Ubuntu, Target::Linux, Target::Unix],
            ProfileKind::Lubuntu => &[Target::Lubuntu, Target::Ubuntu, Target::Linux, Target::Unix],
            ProfileKind::Xubuntu => &[Target::Xubuntu, Target::Ubuntu, Target::Linux, Target::Unix],
            ProfileKind::Mac => &[Target::Mac, Target::Unix],
            ProfileKind::Windows => &[Target::Windows],
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Package-manager commands for one platform.
///
/// Every operation only formats commands; nothing runs here. Operations a
/// platform has no equivalent for keep the default, which produces no
/// commands.
pub trait SystemProfile: fmt::Debug {
    fn kind(&self) -> ProfileKind;

    /// Install packages with the native package manager
    fn install_applications(&self, _applications: &[&str]) -> Vec<Command> {
        Vec::new()
    }

    fn install_application(&self, application: &str) -> Vec<Command> {
        self.install_applications(&[application])
    }

    /// Install packages from a user-level source (AUR helper on Arch)
    fn install_user_applications(&self, applications: &[&str]) -> Vec<Command> {
        self.install_applications(applications)
    }

    /// Install GUI application bundles (Homebrew casks)
    fn install_casks(&self, _casks: &[&str]) -> Vec<Command> {
        Vec::new()
    }

    fn install_flatpaks(&self, _applications: &[&str]) -> Vec<Command> {
        Vec::new()
    }

    fn install_snaps(&self, _applications: &[&str], _classic: bool) -> Vec<Command> {
        Vec::new()
    }

    /// Refresh the package index
    fn update_os_repo(&self) -> Vec<Command> {
        Vec::new()
    }

    fn update_os(&self) -> Vec<Command> {
        Vec::new()
    }

    fn enable_service(&self, _service: &str) -> Vec<Command> {
        Vec::new()
    }

    fn reload_service_daemons(&self) -> Vec<Command> {
        Vec::new()
    }

    /// Bootstrap whatever the package manager itself needs
    fn system_dependencies(&self) -> Vec<Command> {
        Vec::new()
    }

    /// Program the native installs go through
    fn package_manager(&self) -> Option<&'static str> {
        None
    }
}

/// `prefix` followed by `applications`, or nothing when there is nothing to install
pub(crate) fn with_applications(prefix: &[&str], applications: &[&str]) -> Option<Vec<String>> {
    if applications.is_empty() {
        return None;
    }
    Some(
        prefix
            .iter()
            .chain(applications.iter())
            .map(|s| s.to_string())
            .collect(),
    )
}

/// `systemctl` operations shared by the systemd-based profiles
pub(crate) mod systemd {
    use crate::utils::Command;

    pub fn enable(service: &str) -> Vec<Command> {
        vec![Command::elevated(["systemctl", "enable", service])]
    }

    pub fn daemon_reload() -> Vec<Command> {
        vec![Command::elevated(["systemctl", "daemon-reload"])]
    }
}

/// Flathub installs shared by the Linux profiles
pub(crate) fn flathub_install(applications: &[&str]) -> Vec<Command> {
    with_applications(
        &["flatpak", "install", "-y", "--noninteractive", "flathub"],
        applications,
    )
    .map(Command::elevated)
    .into_iter()
    .collect()
}
