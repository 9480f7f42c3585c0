//! Declarative description of everything rigup can set up.
//!
//! A [`Capability`] lists recipes keyed by [`Target`]. The profile's lineage
//! picks the most specific recipe, and [`actions_for`] renders its steps into
//! concrete [`Action`]s through the profile's command formatting.

pub mod bundles;
pub mod registry;

use crate::config::GitIdentity;
use crate::error::RigupError;
use crate::system::{Hardware, ProfileKind, SystemProfile, Target};
use crate::utils::Command;
use std::fmt;
use std::path::{Path, PathBuf};

pub use bundles::{Bundle, Desktop, BASE_CAPABILITIES};
pub use registry::CAPABILITIES;

/// One declarative step of a recipe.
///
/// Paths in `AppendLine` and `MakeDir` are relative to the invoking user's
/// home; absolute paths are system files and are edited as root. Tokens and
/// lines may use `{home}` and `{user}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Install(&'static [&'static str]),
    UserInstall(&'static [&'static str]),
    Cask(&'static [&'static str]),
    Flatpak(&'static [&'static str]),
    Snap {
        apps: &'static [&'static str],
        classic: bool,
    },
    EnableService(&'static str),
    ReloadServiceDaemons,
    UpdateOsRepo,
    UpdateOs,
    SystemDependencies,
    Run {
        tokens: &'static [&'static str],
        elevated: bool,
    },
    AppendLine {
        file: &'static str,
        marker: &'static str,
        line: &'static str,
    },
    MakeDir(&'static str),
    EnablePacmanRepo(&'static str),
    /// Global git name and email from the config
    GitIdentity,
    Notice(&'static str),
    /// Only rendered when the machine has `hardware`
    When {
        hardware: Hardware,
        steps: &'static [Step],
    },
}

/// Something rigup can install or configure
#[derive(Debug)]
pub struct Capability {
    pub name: &'static str,
    pub label: &'static str,
    /// Skipped with `--cli-only`
    pub gui: bool,
    /// Steps for profiles without a matching recipe
    pub default: &'static [Step],
    pub recipes: &'static [(Target, &'static [Step])],
}

impl Capability {
    /// Get capability by name
    pub fn get_by_name(name: &str) -> Option<&'static Capability> {
        CAPABILITIES.iter().find(|c| c.name == name)
    }

    /// Get all capability names
    pub fn all_names() -> Vec<&'static str> {
        CAPABILITIES.iter().map(|c| c.name).collect()
    }

    /// Steps of the most specific recipe for `kind`
    pub fn steps_for(&self, kind: ProfileKind) -> &'static [Step] {
        kind.lineage()
            .iter()
            .find_map(|target| {
                self.recipes
                    .iter()
                    .find(|(t, _)| t == target)
                    .map(|(_, steps)| *steps)
            })
            .unwrap_or(self.default)
    }
}

/// A concrete, ready-to-apply unit of work
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Run(Command),
    AppendLine {
        path: PathBuf,
        marker: String,
        line: String,
        elevated: bool,
    },
    MakeDir {
        path: PathBuf,
        elevated: bool,
    },
    EnablePacmanRepo {
        path: PathBuf,
        repo: String,
    },
    CopyDotfiles {
        source: PathBuf,
        home: PathBuf,
    },
    Notice(String),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Run(command) => write!(f, "run: {}", command),
            Action::AppendLine { path, line, .. } => {
                write!(f, "append {:?} to {}", line, path.display())
            }
            Action::MakeDir { path, .. } => write!(f, "create directory {}", path.display()),
            Action::EnablePacmanRepo { path, repo } => {
                write!(f, "enable [{}] in {}", repo, path.display())
            }
            Action::CopyDotfiles { source, home } => write!(
                f,
                "copy *.symlink files from {} into {}",
                source.display(),
                home.display()
            ),
            Action::Notice(text) => write!(f, "show: {}", text),
        }
    }
}

/// Values substituted into recipes
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub home: PathBuf,
    pub user: String,
    pub git: Option<GitIdentity>,
    pub hardware: Vec<Hardware>,
}

impl RenderContext {
    fn expand(&self, template: &str) -> String {
        template
            .replace("{home}", &self.home.to_string_lossy())
            .replace("{user}", &self.user)
    }

    /// Absolute paths are system files; anything else lives in the home directory
    fn locate(&self, file: &str) -> (PathBuf, bool) {
        let expanded = self.expand(file);
        let path = Path::new(&expanded);
        if path.is_absolute() {
            (path.to_path_buf(), true)
        } else {
            (self.home.join(path), false)
        }
    }
}

const PACMAN_CONF: &str = "/etc/pacman.conf";

/// Render the named capability for a profile
pub fn actions_for(
    profile: &dyn SystemProfile,
    name: &str,
    ctx: &RenderContext,
) -> Result<Vec<Action>, RigupError> {
    let capability = Capability::get_by_name(name)
        .ok_or_else(|| RigupError::UnknownCapability(name.to_string()))?;

    Ok(capability
        .steps_for(profile.kind())
        .iter()
        .flat_map(|step| render(profile, step, ctx))
        .collect())
}

fn render(profile: &dyn SystemProfile, step: &Step, ctx: &RenderContext) -> Vec<Action> {
    let commands = match *step {
        Step::Install(apps) => profile.install_applications(apps),
        Step::UserInstall(apps) => profile.install_user_applications(apps),
        Step::Cask(casks) => profile.install_casks(casks),
        Step::Flatpak(apps) => profile.install_flatpaks(apps),
        Step::Snap { apps, classic } => profile.install_snaps(apps, classic),
        Step::EnableService(service) => profile.enable_service(service),
        Step::ReloadServiceDaemons => profile.reload_service_daemons(),
        Step::UpdateOsRepo => profile.update_os_repo(),
        Step::UpdateOs => profile.update_os(),
        Step::SystemDependencies => profile.system_dependencies(),
        Step::Run { tokens, elevated } => {
            let tokens = tokens.iter().map(|t| ctx.expand(t));
            if elevated {
                vec![Command::elevated(tokens)]
            } else {
                vec![Command::new(tokens).current_dir(&ctx.home)]
            }
        }
        Step::GitIdentity => git_identity(ctx),
        Step::AppendLine { file, marker, line } => {
            let (path, elevated) = ctx.locate(file);
            return vec![Action::AppendLine {
                path,
                marker: ctx.expand(marker),
                line: ctx.expand(line),
                elevated,
            }];
        }
        Step::MakeDir(dir) => {
            let (path, elevated) = ctx.locate(dir);
            return vec![Action::MakeDir { path, elevated }];
        }
        Step::EnablePacmanRepo(repo) => {
            return vec![Action::EnablePacmanRepo {
                path: PathBuf::from(PACMAN_CONF),
                repo: repo.to_string(),
            }];
        }
        Step::Notice(text) => return vec![Action::Notice(ctx.expand(text))],
        Step::When { hardware, steps } => {
            if !ctx.hardware.contains(&hardware) {
                log::debug!("No {} found, skipping {} step(s)", hardware, steps.len());
                return Vec::new();
            }
            return steps
                .iter()
                .flat_map(|step| render(profile, step, ctx))
                .collect();
        }
    };

    commands.into_iter().map(Action::Run).collect()
}

fn git_identity(ctx: &RenderContext) -> Vec<Command> {
    let mut commands = Vec::new();
    if let Some(git) = &ctx.git {
        commands.push(Command::new([
            "git",
            "config",
            "--global",
            "user.name",
            git.name.as_str(),
        ]));
        commands.push(Command::new([
            "git",
            "config",
            "--global",
            "user.email",
            git.email.as_str(),
        ]));
    } else {
        log::debug!("No [git] identity configured, leaving user.name and user.email alone");
    }
    commands.push(Command::new([
        "git",
        "config",
        "--global",
        "credential.helper",
        "cache --timeout=86400",
    ]));
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::{arch::Arch, linux::Linux, mac::Mac, ubuntu, windows::Windows};

    fn ctx() -> RenderContext {
        RenderContext {
            home: PathBuf::from("/home/jane"),
            user: "jane".to_string(),
            git: Some(GitIdentity {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
            }),
            hardware: Vec::new(),
        }
    }

    fn commands(actions: &[Action]) -> Vec<String> {
        actions
            .iter()
            .filter_map(|a| match a {
                Action::Run(c) => Some(c.tokens().join(" ")),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_capability_names_are_unique() {
        let mut names = Capability::all_names();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_unknown_capability() {
        let err = actions_for(&Arch, "emacs-but-better", &ctx()).unwrap_err();
        assert!(matches!(err, RigupError::UnknownCapability(ref n) if n == "emacs-but-better"));
    }

    #[test]
    fn test_arch_jdk_uses_pacman_and_sets_java_home() {
        let actions = actions_for(&Arch, "jdk", &ctx()).unwrap();

        assert_eq!(
            commands(&actions),
            ["pacman -S --noconfirm --needed jdk-openjdk"]
        );
        assert!(actions.contains(&Action::AppendLine {
            path: PathBuf::from("/home/jane/.zshrc"),
            marker: "JAVA_HOME".to_string(),
            line: "export JAVA_HOME=/usr/lib/jvm/default".to_string(),
            elevated: false,
        }));
    }

    #[test]
    fn test_flavour_falls_back_to_ubuntu_recipe() {
        let kubuntu = actions_for(&ubuntu::Kubuntu, "jq", &ctx()).unwrap();
        let plain = actions_for(&ubuntu::Ubuntu, "jq", &ctx()).unwrap();
        assert_eq!(kubuntu, plain);
        assert_eq!(commands(&plain), ["apt-get install -y jq"]);
    }

    #[test]
    fn test_flavour_specific_recipe_wins() {
        let lubuntu = commands(&actions_for(&ubuntu::Lubuntu, "openvpn", &ctx()).unwrap());
        let ubuntu = commands(&actions_for(&ubuntu::Ubuntu, "openvpn", &ctx()).unwrap());
        assert_eq!(lubuntu, ["apt-get install -y openvpn network-manager-openvpn"]);
        assert_ne!(lubuntu, ubuntu);
    }

    #[test]
    fn test_generic_linux_skips_package_steps() {
        let actions = actions_for(&Linux, "jq", &ctx()).unwrap();
        assert!(actions.is_empty());

        // File edits still happen
        let settings = actions_for(&Linux, "development-settings", &ctx()).unwrap();
        assert!(settings
            .iter()
            .any(|a| matches!(a, Action::AppendLine { elevated: true, .. })));
    }

    #[test]
    fn test_user_templates_are_expanded() {
        let actions = actions_for(&Arch, "docker", &ctx()).unwrap();
        assert!(commands(&actions).contains(&"usermod -aG docker jane".to_string()));
    }

    #[test]
    fn test_git_identity_runs_as_user() {
        let actions = actions_for(&Mac, "git", &ctx()).unwrap();
        let identity: Vec<&Command> = actions
            .iter()
            .filter_map(|a| match a {
                Action::Run(c) if c.args().first().map(String::as_str) == Some("config") => {
                    Some(c)
                }
                _ => None,
            })
            .collect();

        assert_eq!(identity.len(), 3);
        assert!(identity.iter().all(|c| !c.is_elevated()));
        assert_eq!(
            identity[0].tokens(),
            ["git", "config", "--global", "user.name", "Jane Doe"]
        );
    }

    #[test]
    fn test_git_without_identity_only_sets_helper() {
        let mut context = ctx();
        context.git = None;
        let actions = actions_for(&Windows, "git", &context).unwrap();
        assert_eq!(
            commands(&actions),
            [
                "choco install --yes git",
                "git config --global credential.helper cache --timeout=86400"
            ]
        );
    }

    #[test]
    fn test_user_bin_is_home_relative() {
        let actions = actions_for(&Windows, "user-bin", &ctx()).unwrap();
        assert_eq!(
            actions,
            [
                Action::MakeDir {
                    path: PathBuf::from("/home/jane/bin"),
                    elevated: false
                },
                Action::MakeDir {
                    path: PathBuf::from("/home/jane/.local/bin"),
                    elevated: false
                },
            ]
        );
    }

    #[test]
    fn test_arch_system_extras_enable_multilib() {
        let actions = actions_for(&Arch, "system-extras", &ctx()).unwrap();
        assert!(actions.contains(&Action::EnablePacmanRepo {
            path: PathBuf::from("/etc/pacman.conf"),
            repo: "multilib".to_string(),
        }));
    }

    #[test]
    fn test_zsh_is_left_alone_on_unknown_linux() {
        assert!(actions_for(&Linux, "zsh", &ctx()).unwrap().is_empty());

        let ubuntu = commands(&actions_for(&ubuntu::Xubuntu, "zsh", &ctx()).unwrap());
        assert_eq!(ubuntu[0], "apt-get install -y zsh");
        assert!(ubuntu.contains(&"chsh -s /usr/bin/zsh jane".to_string()));
    }

    #[test]
    fn test_hardware_steps_need_matching_hardware() {
        let mut context = ctx();
        assert!(actions_for(&Arch, "graphics-drivers", &context)
            .unwrap()
            .is_empty());

        context.hardware = vec![Hardware::IntelCpu, Hardware::NvidiaGpu];
        let drivers = commands(&actions_for(&Arch, "graphics-drivers", &context).unwrap());
        assert_eq!(drivers.len(), 1);
        assert!(drivers[0].starts_with("pacman -S --noconfirm --needed nvidia nvidia-utils"));

        let microcode = commands(&actions_for(&ubuntu::Ubuntu, "microcode", &context).unwrap());
        assert_eq!(microcode, ["apt-get install -y intel-microcode"]);
    }

    #[test]
    fn test_laptop_graphics_follow_each_gpu() {
        let mut context = ctx();
        context.hardware = vec![Hardware::IntelGpu, Hardware::NvidiaGpu];
        let actions = commands(&actions_for(&Arch, "laptop-graphics", &context).unwrap());
        assert_eq!(
            actions,
            [
                "pacman -S --noconfirm --needed nvidia-prime",
                "pacman -S --noconfirm --needed xf86-video-intel"
            ]
        );
    }

    #[test]
    fn test_firefox_enables_wayland_on_ubuntu() {
        let actions = actions_for(&ubuntu::Ubuntu, "firefox", &ctx()).unwrap();
        assert!(actions.contains(&Action::AppendLine {
            path: PathBuf::from("/home/jane/.config/environment.d/envvars.conf"),
            marker: "MOZ_ENABLE_WAYLAND".to_string(),
            line: "MOZ_ENABLE_WAYLAND=1".to_string(),
            elevated: false,
        }));
    }

    #[test]
    fn test_action_display() {
        let action = Action::Run(Command::elevated(["pacman", "-Sy"]));
        assert_eq!(action.to_string(), "run: [root] pacman -Sy");
        let notice = Action::Notice("Remove ctrl + alt + l".to_string());
        assert_eq!(notice.to_string(), "show: Remove ctrl + alt + l");
    }
}
