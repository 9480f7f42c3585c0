use super::Capability;
use super::Step::*;
use crate::system::Hardware;
use crate::system::Target::*;

const OH_MY_ZSH: super::Step = Run {
    tokens: &[
        "sh",
        "-c",
        "[ -d \"$HOME/.oh-my-zsh\" ] || sh -c \"$(curl -fsSL https://raw.githubusercontent.com/ohmyzsh/ohmyzsh/master/tools/install.sh)\" \"\" --unattended",
    ],
    elevated: false,
};

const CHSH_ZSH: super::Step = Run {
    tokens: &["chsh", "-s", "/usr/bin/zsh", "{user}"],
    elevated: true,
};

const MSCOREFONTS_EULA: super::Step = Run {
    tokens: &[
        "sh",
        "-c",
        "echo ttf-mscorefonts-installer msttcorefonts/accepted-mscorefonts-eula select true | debconf-set-selections",
    ],
    elevated: true,
};

const DOCKER_GROUP: super::Step = Run {
    tokens: &["usermod", "-aG", "docker", "{user}"],
    elevated: true,
};

const RUSTUP_STABLE: super::Step = Run {
    tokens: &["rustup", "default", "stable"],
    elevated: false,
};

// makepkg must run unprivileged, pacman -U must not
const YAY_BUILD: super::Step = Run {
    tokens: &[
        "sh",
        "-c",
        "command -v yay >/dev/null || { rm -rf /tmp/yay-bin && git clone https://aur.archlinux.org/yay-bin.git /tmp/yay-bin && cd /tmp/yay-bin && makepkg --noconfirm; }",
    ],
    elevated: false,
};

const YAY_INSTALL: super::Step = Run {
    tokens: &[
        "sh",
        "-c",
        "command -v yay >/dev/null || pacman -U --noconfirm /tmp/yay-bin/yay-bin-*.pkg.tar.zst",
    ],
    elevated: true,
};

const GNOME_SHORTCUTS: &[super::Step] = &[
    Run {
        tokens: &["gsettings", "set", "org.gnome.desktop.wm.keybindings", "switch-to-workspace-up", "[]"],
        elevated: false,
    },
    Run {
        tokens: &["gsettings", "set", "org.gnome.desktop.wm.keybindings", "switch-to-workspace-down", "[]"],
        elevated: false,
    },
    Run {
        tokens: &["gsettings", "set", "org.gnome.desktop.wm.keybindings", "switch-to-workspace-left", "[]"],
        elevated: false,
    },
    Run {
        tokens: &["gsettings", "set", "org.gnome.desktop.wm.keybindings", "switch-to-workspace-right", "[]"],
        elevated: false,
    },
    Run {
        tokens: &["gsettings", "set", "org.gnome.desktop.wm.keybindings", "begin-move", "[]"],
        elevated: false,
    },
];

// KDE and Xfce keep shortcuts in files we do not own; tell the user instead
const MANUAL_SHORTCUTS: &[super::Step] = &[
    Notice("Remove setting for alt + mouse dragging moving window"),
    Notice("Remove keyboard shortcuts under Navigation for ctrl + alt + left/right"),
    Notice("Remove keyboard shortcut under System for ctrl + alt + l"),
    Notice("Remove keyboard shortcuts under Windows for ctrl + alt + s, alt + f7"),
];

const SYSCTL_CONF: &str = "/etc/sysctl.d/99-rigup.conf";

const NVIDIA_PRIME: super::Step = When {
    hardware: Hardware::NvidiaGpu,
    steps: &[Install(&["nvidia-prime"])],
};

const NORDVPN_GROUP: super::Step = Run {
    tokens: &["usermod", "-aG", "nordvpn", "{user}"],
    elevated: true,
};

const NETWORK_MANAGER: super::Step = EnableService("NetworkManager");

/// Registry of everything rigup can set up, in no particular order
pub static CAPABILITIES: &[Capability] = &[
    // Base phases
    Capability {
        name: "user-bin",
        label: "Creating user bin directories",
        gui: false,
        default: &[MakeDir("bin"), MakeDir(".local/bin")],
        recipes: &[],
    },
    Capability {
        name: "system-dependencies",
        label: "Installing system dependencies",
        gui: false,
        default: &[SystemDependencies],
        recipes: &[],
    },
    Capability {
        name: "system-extras",
        label: "Installing distro specific extras",
        gui: false,
        default: &[],
        recipes: &[
            (
                Arch,
                &[
                    Install(&["base-devel", "ttf-dejavu", "wget"]),
                    EnablePacmanRepo("multilib"),
                    UpdateOsRepo,
                    YAY_BUILD,
                    YAY_INSTALL,
                ],
            ),
            (
                Kubuntu,
                &[MSCOREFONTS_EULA, Install(&["kubuntu-restricted-extras"])],
            ),
            (
                Lubuntu,
                &[MSCOREFONTS_EULA, Install(&["lubuntu-restricted-extras"])],
            ),
            (
                Xubuntu,
                &[MSCOREFONTS_EULA, Install(&["xubuntu-restricted-extras"])],
            ),
            (
                Ubuntu,
                &[MSCOREFONTS_EULA, Install(&["ubuntu-restricted-extras"])],
            ),
            (Windows, &[Install(&["7zip", "microsoft-windows-terminal"])]),
        ],
    },
    Capability {
        name: "update-os",
        label: "Updating the operating system",
        gui: false,
        default: &[UpdateOs],
        recipes: &[],
    },
    // Development
    Capability {
        name: "git",
        label: "Installing Git",
        gui: false,
        default: &[Install(&["git"]), GitIdentity],
        recipes: &[
            (Ubuntu, &[Install(&["git", "git-flow"]), GitIdentity]),
            (Mac, &[Install(&["git", "git-flow"]), GitIdentity]),
        ],
    },
    Capability {
        name: "curl",
        label: "Installing Curl",
        gui: false,
        default: &[Install(&["curl"])],
        recipes: &[],
    },
    Capability {
        name: "cplusplus",
        label: "Installing C++ toolchain",
        gui: false,
        default: &[],
        recipes: &[
            (Arch, &[Install(&["gcc", "gdb", "cmake", "clang"])]),
            (Ubuntu, &[Install(&["build-essential", "gdb", "cmake", "clang"])]),
            (Mac, &[Install(&["cmake", "llvm"])]),
            (Windows, &[Install(&["mingw", "cmake"])]),
        ],
    },
    Capability {
        name: "jdk",
        label: "Installing Java",
        gui: false,
        default: &[],
        recipes: &[
            (
                Arch,
                &[
                    Install(&["jdk-openjdk"]),
                    AppendLine {
                        file: ".zshrc",
                        marker: "JAVA_HOME",
                        line: "export JAVA_HOME=/usr/lib/jvm/default",
                    },
                    AppendLine {
                        file: ".bashrc",
                        marker: "JAVA_HOME",
                        line: "export JAVA_HOME=/usr/lib/jvm/default",
                    },
                ],
            ),
            (
                Ubuntu,
                &[
                    Install(&["openjdk-17-jdk"]),
                    AppendLine {
                        file: ".zshrc",
                        marker: "JAVA_HOME",
                        line: "export JAVA_HOME=/usr/lib/jvm/java-17-openjdk-amd64",
                    },
                    AppendLine {
                        file: ".bashrc",
                        marker: "JAVA_HOME",
                        line: "export JAVA_HOME=/usr/lib/jvm/java-17-openjdk-amd64",
                    },
                ],
            ),
            (
                Mac,
                &[
                    Install(&["openjdk"]),
                    AppendLine {
                        file: ".zshrc",
                        marker: "JAVA_HOME",
                        line: "export JAVA_HOME=$(/usr/libexec/java_home)",
                    },
                ],
            ),
            (Windows, &[Install(&["openjdk"])]),
        ],
    },
    Capability {
        name: "gradle",
        label: "Installing Gradle",
        gui: false,
        default: &[Install(&["gradle"])],
        recipes: &[],
    },
    Capability {
        name: "maven",
        label: "Installing Maven",
        gui: false,
        default: &[Install(&["maven"])],
        recipes: &[],
    },
    Capability {
        name: "nodejs",
        label: "Installing NodeJS",
        gui: false,
        default: &[],
        recipes: &[
            (Arch, &[Install(&["nodejs", "npm"])]),
            (Ubuntu, &[Install(&["nodejs", "npm"])]),
            (Mac, &[Install(&["node"])]),
            (Windows, &[Install(&["nodejs"])]),
        ],
    },
    Capability {
        name: "python",
        label: "Installing Python",
        gui: false,
        default: &[],
        recipes: &[
            (Arch, &[Install(&["python", "python-pip"])]),
            (Ubuntu, &[Install(&["python3", "python3-pip", "python3-venv"])]),
            (Mac, &[Install(&["python"])]),
            (Windows, &[Install(&["python"])]),
        ],
    },
    Capability {
        name: "rust",
        label: "Installing Rust",
        gui: false,
        default: &[],
        recipes: &[
            (Arch, &[Install(&["rustup"]), RUSTUP_STABLE]),
            (
                Ubuntu,
                &[
                    Snap {
                        apps: &["rustup"],
                        classic: true,
                    },
                    RUSTUP_STABLE,
                ],
            ),
            (Mac, &[Install(&["rustup"]), RUSTUP_STABLE]),
            (Windows, &[Install(&["rustup.install"])]),
        ],
    },
    Capability {
        name: "jq",
        label: "Installing jq",
        gui: false,
        default: &[Install(&["jq"])],
        recipes: &[],
    },
    Capability {
        name: "tmux",
        label: "Installing tmux",
        gui: false,
        default: &[],
        recipes: &[
            (Linux, &[Install(&["tmux", "xclip"])]),
            (Mac, &[Install(&["tmux"])]),
        ],
    },
    Capability {
        name: "zsh",
        label: "Installing ZSH",
        gui: false,
        default: &[],
        recipes: &[
            (
                Arch,
                &[Install(&["zsh", "zsh-completions"]), OH_MY_ZSH, CHSH_ZSH],
            ),
            (Ubuntu, &[Install(&["zsh"]), OH_MY_ZSH, CHSH_ZSH]),
            // zsh is already the login shell on macOS
            (Mac, &[OH_MY_ZSH]),
        ],
    },
    Capability {
        name: "vscode",
        label: "Installing Visual Studio Code",
        gui: true,
        default: &[],
        recipes: &[
            (Arch, &[Install(&["code"])]),
            (
                Ubuntu,
                &[Snap {
                    apps: &["code"],
                    classic: true,
                }],
            ),
            (Mac, &[Cask(&["visual-studio-code"])]),
            (Windows, &[Install(&["vscode"])]),
        ],
    },
    Capability {
        name: "intellij",
        label: "Installing IntelliJ",
        gui: true,
        default: &[],
        recipes: &[
            (Arch, &[UserInstall(&["intellij-idea-ultimate-edition"])]),
            (
                Ubuntu,
                &[Snap {
                    apps: &["intellij-idea-ultimate"],
                    classic: true,
                }],
            ),
            (Mac, &[Cask(&["intellij-idea"])]),
            (Windows, &[Install(&["intellijidea-ultimate"])]),
        ],
    },
    Capability {
        name: "development-settings",
        label: "Setting development environment settings",
        gui: false,
        default: &[],
        recipes: &[(
            Linux,
            &[
                AppendLine {
                    file: SYSCTL_CONF,
                    marker: "vm.max_map_count",
                    line: "vm.max_map_count=262144",
                },
                AppendLine {
                    file: SYSCTL_CONF,
                    marker: "fs.inotify.max_user_watches",
                    line: "fs.inotify.max_user_watches=524288",
                },
                Run {
                    tokens: &["sysctl", "--system"],
                    elevated: true,
                },
            ],
        )],
    },
    Capability {
        name: "development-shortcuts",
        label: "Setting development specific shortcuts",
        gui: true,
        default: &[],
        recipes: &[
            (Kubuntu, MANUAL_SHORTCUTS),
            (Xubuntu, MANUAL_SHORTCUTS),
            (Ubuntu, GNOME_SHORTCUTS),
            (Arch, GNOME_SHORTCUTS),
        ],
    },
    // Personal
    Capability {
        name: "gpg",
        label: "Installing GPG tools",
        gui: true,
        default: &[],
        recipes: &[
            (Kubuntu, &[Install(&["kleopatra"])]),
            (Xubuntu, &[Install(&["kleopatra"])]),
            (Linux, &[Install(&["seahorse"])]),
            (Mac, &[Cask(&["gpg-suite"])]),
            (Windows, &[Install(&["gpg4win"])]),
        ],
    },
    Capability {
        name: "keepassxc",
        label: "Installing KeepassXC",
        gui: true,
        default: &[Install(&["keepassxc"])],
        recipes: &[(Mac, &[Cask(&["keepassxc"])])],
    },
    Capability {
        name: "nextcloud",
        label: "Installing Nextcloud Client",
        gui: true,
        default: &[],
        recipes: &[
            (Arch, &[Install(&["nextcloud-client"])]),
            (
                Ubuntu,
                &[
                    Run {
                        tokens: &["add-apt-repository", "-y", "ppa:nextcloud-devs/client"],
                        elevated: true,
                    },
                    UpdateOsRepo,
                    Install(&["nextcloud-desktop"]),
                ],
            ),
            (Mac, &[Cask(&["nextcloud"])]),
            (Windows, &[Install(&["nextcloud-client"])]),
        ],
    },
    Capability {
        name: "dropbox",
        label: "Installing Dropbox",
        gui: true,
        default: &[],
        recipes: &[
            (Arch, &[UserInstall(&["dropbox"])]),
            (Ubuntu, &[Install(&["nautilus-dropbox"])]),
            (Mac, &[Cask(&["dropbox"])]),
            (Windows, &[Install(&["dropbox"])]),
        ],
    },
    Capability {
        name: "chromium",
        label: "Installing Chromium",
        gui: true,
        default: &[],
        recipes: &[
            (Arch, &[Install(&["chromium"])]),
            (
                Ubuntu,
                &[Snap {
                    apps: &["chromium"],
                    classic: false,
                }],
            ),
            (Mac, &[Cask(&["chromium"])]),
            (Windows, &[Install(&["chromium"])]),
        ],
    },
    Capability {
        name: "codecs",
        label: "Installing Codecs",
        gui: false,
        default: &[],
        recipes: &[
            (
                Arch,
                &[
                    Install(&["libdvdread", "libdvdcss", "libdvdnav", "libbluray", "libaacs"]),
                    MakeDir(".config/aacs"),
                ],
            ),
            (
                Ubuntu,
                &[
                    Install(&["libdvd-pkg", "libaacs0", "libbluray-bdj", "libbluray2"]),
                    Run {
                        tokens: &["dpkg-reconfigure", "-f", "noninteractive", "libdvd-pkg"],
                        elevated: true,
                    },
                    MakeDir(".config/aacs"),
                ],
            ),
        ],
    },
    Capability {
        name: "openvpn",
        label: "Installing OpenVPN",
        gui: false,
        default: &[],
        recipes: &[
            (Arch, &[Install(&["openvpn", "networkmanager-openvpn"])]),
            (Lubuntu, &[Install(&["openvpn", "network-manager-openvpn"])]),
            (
                Ubuntu,
                &[Install(&[
                    "openvpn",
                    "network-manager-openvpn",
                    "network-manager-openvpn-gnome",
                ])],
            ),
            (Mac, &[Cask(&["tunnelblick"])]),
            (Windows, &[Install(&["openvpn"])]),
        ],
    },
    Capability {
        name: "steam",
        label: "Installing Steam",
        gui: true,
        default: &[],
        recipes: &[
            (Arch, &[Install(&["steam"])]),
            (Ubuntu, &[Install(&["steam-installer"])]),
            (Mac, &[Cask(&["steam"])]),
            (Windows, &[Install(&["steam"])]),
        ],
    },
    Capability {
        name: "lutris",
        label: "Installing Lutris",
        gui: true,
        default: &[],
        recipes: &[
            (Arch, &[Install(&["lutris"])]),
            (Ubuntu, &[Flatpak(&["net.lutris.Lutris"])]),
        ],
    },
    Capability {
        name: "spotify",
        label: "Installing Spotify",
        gui: true,
        default: &[],
        recipes: &[
            (Arch, &[UserInstall(&["spotify"])]),
            (
                Ubuntu,
                &[Snap {
                    apps: &["spotify"],
                    classic: false,
                }],
            ),
            (Mac, &[Cask(&["spotify"])]),
            (Windows, &[Install(&["spotify"])]),
        ],
    },
    // Media
    Capability {
        name: "makemkv",
        label: "Installing MakeMKV",
        gui: true,
        default: &[],
        recipes: &[
            (Arch, &[UserInstall(&["makemkv", "ccextractor"])]),
            (
                Ubuntu,
                &[
                    Run {
                        tokens: &["add-apt-repository", "-y", "ppa:heyarje/makemkv-beta"],
                        elevated: true,
                    },
                    UpdateOsRepo,
                    Install(&["makemkv-bin", "makemkv-oss"]),
                ],
            ),
            (Mac, &[Cask(&["makemkv"])]),
            (Windows, &[Install(&["makemkv"])]),
        ],
    },
    Capability {
        name: "mkvtoolnix",
        label: "Installing MKVToolNix",
        gui: true,
        default: &[],
        recipes: &[
            (Arch, &[Install(&["mkvtoolnix-gui"])]),
            (Ubuntu, &[Install(&["mkvtoolnix", "mkvtoolnix-gui"])]),
            (Mac, &[Cask(&["mkvtoolnix"])]),
            (Windows, &[Install(&["mkvtoolnix"])]),
        ],
    },
    Capability {
        name: "handbrake",
        label: "Installing HandBrake",
        gui: true,
        default: &[],
        recipes: &[
            (Arch, &[Install(&["handbrake"])]),
            (Ubuntu, &[Flatpak(&["fr.handbrake.ghb"])]),
            (Mac, &[Cask(&["handbrake"])]),
            (Windows, &[Install(&["handbrake"])]),
        ],
    },
    Capability {
        name: "vlc",
        label: "Installing VLC",
        gui: true,
        default: &[Install(&["vlc"])],
        recipes: &[(Mac, &[Cask(&["vlc"])])],
    },
    // Server and containers
    Capability {
        name: "docker",
        label: "Installing Docker",
        gui: false,
        default: &[],
        recipes: &[
            (
                Arch,
                &[
                    Install(&["docker", "docker-compose"]),
                    DOCKER_GROUP,
                    ReloadServiceDaemons,
                    EnableService("docker"),
                ],
            ),
            (
                Ubuntu,
                &[
                    Install(&["docker.io", "docker-compose"]),
                    DOCKER_GROUP,
                    EnableService("docker"),
                ],
            ),
            (Mac, &[Cask(&["docker"])]),
            (Windows, &[Install(&["docker-desktop"])]),
        ],
    },
    Capability {
        name: "ssh-server",
        label: "Installing SSH server",
        gui: false,
        default: &[],
        recipes: &[
            (Arch, &[Install(&["openssh"]), EnableService("sshd")]),
            (Ubuntu, &[Install(&["openssh-server"]), EnableService("ssh")]),
        ],
    },
    Capability {
        name: "vm-tools",
        label: "Installing VM Tools",
        gui: false,
        default: &[],
        recipes: &[
            (Arch, &[Install(&["open-vm-tools"]), EnableService("vmtoolsd")]),
            (Ubuntu, &[Install(&["open-vm-tools"])]),
            (Windows, &[Install(&["vmware-tools"])]),
        ],
    },
    Capability {
        name: "kubectl",
        label: "Installing Kubectl",
        gui: false,
        default: &[],
        recipes: &[
            (Arch, &[Install(&["kubectl"])]),
            (
                Ubuntu,
                &[Snap {
                    apps: &["kubectl"],
                    classic: true,
                }],
            ),
            (Mac, &[Install(&["kubernetes-cli"])]),
            (Windows, &[Install(&["kubernetes-cli"])]),
        ],
    },
    Capability {
        name: "helm",
        label: "Installing Helm",
        gui: false,
        default: &[],
        recipes: &[
            (Arch, &[Install(&["helm"])]),
            (
                Ubuntu,
                &[Snap {
                    apps: &["helm"],
                    classic: true,
                }],
            ),
            (Mac, &[Install(&["helm"])]),
            (Windows, &[Install(&["kubernetes-helm"])]),
        ],
    },
    Capability {
        name: "minikube",
        label: "Installing Minikube",
        gui: false,
        default: &[],
        recipes: &[
            (Arch, &[Install(&["minikube"])]),
            (
                Ubuntu,
                &[Snap {
                    apps: &["minikube"],
                    classic: true,
                }],
            ),
            (Mac, &[Install(&["minikube"])]),
            (Windows, &[Install(&["minikube"])]),
        ],
    },
    // Laptop
    Capability {
        name: "bluetooth",
        label: "Installing Bluetooth",
        gui: false,
        default: &[],
        recipes: &[
            (Arch, &[Install(&["bluez", "bluez-utils"]), EnableService("bluetooth")]),
            (Ubuntu, &[Install(&["bluez"]), EnableService("bluetooth")]),
        ],
    },
    Capability {
        name: "firmware-updater",
        label: "Installing firmware updater",
        gui: false,
        default: &[],
        recipes: &[
            (Arch, &[Install(&["fwupd"]), EnableService("fwupd")]),
            (Ubuntu, &[Install(&["fwupd"])]),
        ],
    },
    Capability {
        name: "powertop",
        label: "Installing Powertop",
        gui: false,
        default: &[],
        recipes: &[(Linux, &[Install(&["powertop"])])],
    },
    Capability {
        name: "tlp",
        label: "Installing TLP",
        gui: false,
        default: &[],
        recipes: &[(Linux, &[Install(&["tlp"]), EnableService("tlp")])],
    },
    // Cloud
    Capability {
        name: "google-cloud-sdk",
        label: "Installing Google Cloud SDK",
        gui: false,
        default: &[],
        recipes: &[
            (Arch, &[UserInstall(&["google-cloud-cli"])]),
            (
                Ubuntu,
                &[Snap {
                    apps: &["google-cloud-cli"],
                    classic: true,
                }],
            ),
            (Mac, &[Cask(&["google-cloud-sdk"])]),
            (Windows, &[Install(&["gcloudsdk"])]),
        ],
    },
    // Browsers
    Capability {
        name: "firefox",
        label: "Installing Firefox",
        gui: true,
        default: &[Install(&["firefox"])],
        recipes: &[
            (
                Ubuntu,
                &[
                    Install(&["firefox"]),
                    AppendLine {
                        file: ".config/environment.d/envvars.conf",
                        marker: "MOZ_ENABLE_WAYLAND",
                        line: "MOZ_ENABLE_WAYLAND=1",
                    },
                ],
            ),
            (Mac, &[Cask(&["firefox"])]),
        ],
    },
    Capability {
        name: "google-chrome",
        label: "Installing Google Chrome",
        gui: true,
        default: &[],
        recipes: &[
            (Arch, &[UserInstall(&["google-chrome"])]),
            (
                Ubuntu,
                &[
                    Run {
                        tokens: &[
                            "sh",
                            "-c",
                            "dpkg -s google-chrome-stable >/dev/null 2>&1 || { curl -fsSL -o /tmp/google-chrome.deb https://dl.google.com/linux/direct/google-chrome-stable_current_amd64.deb && apt-get install -y /tmp/google-chrome.deb; }",
                        ],
                        elevated: true,
                    },
                    Notice("Screen sharing under Wayland needs chrome://flags/#enable-webrtc-pipewire-capturer"),
                ],
            ),
            (Mac, &[Cask(&["google-chrome"])]),
            (Windows, &[Install(&["googlechrome"])]),
        ],
    },
    Capability {
        name: "microsoft-edge",
        label: "Installing Microsoft Edge",
        gui: true,
        default: &[],
        recipes: &[
            (Arch, &[UserInstall(&["microsoft-edge-stable-bin"])]),
            (
                Ubuntu,
                &[
                    Run {
                        tokens: &[
                            "sh",
                            "-c",
                            "curl -fsSL https://packages.microsoft.com/keys/microsoft.asc | gpg --dearmor --yes -o /usr/share/keyrings/microsoft-edge.gpg",
                        ],
                        elevated: true,
                    },
                    AppendLine {
                        file: "/etc/apt/sources.list.d/microsoft-edge.list",
                        marker: "packages.microsoft.com/repos/edge",
                        line: "deb [arch=amd64 signed-by=/usr/share/keyrings/microsoft-edge.gpg] https://packages.microsoft.com/repos/edge stable main",
                    },
                    UpdateOsRepo,
                    Install(&["microsoft-edge-stable"]),
                ],
            ),
            (Mac, &[Cask(&["microsoft-edge"])]),
        ],
    },
    // Gaming
    Capability {
        name: "discord",
        label: "Installing Discord",
        gui: true,
        default: &[],
        recipes: &[
            (Arch, &[Install(&["discord"])]),
            (
                Ubuntu,
                &[Snap {
                    apps: &["discord"],
                    classic: false,
                }],
            ),
            (Mac, &[Cask(&["discord"])]),
            (Windows, &[Install(&["discord"])]),
        ],
    },
    Capability {
        name: "epic-games",
        label: "Installing Epic Games Launcher",
        gui: true,
        default: &[],
        recipes: &[
            (Mac, &[Cask(&["epic-games"])]),
            (Windows, &[Install(&["epicgameslauncher"])]),
        ],
    },
    Capability {
        name: "gog-galaxy",
        label: "Installing GOG Galaxy",
        gui: true,
        default: &[],
        recipes: &[
            (Mac, &[Cask(&["gog-galaxy"])]),
            (Windows, &[Install(&["goggalaxy"])]),
        ],
    },
    Capability {
        name: "retroarch",
        label: "Installing RetroArch",
        gui: true,
        default: &[],
        recipes: &[
            (Arch, &[Install(&["retroarch"])]),
            (Ubuntu, &[Flatpak(&["org.libretro.RetroArch"])]),
            (Windows, &[Install(&["retroarch"])]),
        ],
    },
    Capability {
        name: "wine",
        label: "Installing Wine",
        gui: false,
        default: &[],
        recipes: &[(Arch, &[Install(&["wine"])]), (Ubuntu, &[Install(&["wine"])])],
    },
    // Images and modelling
    Capability {
        name: "affinity-suite",
        label: "Installing Affinity Suite",
        gui: true,
        default: &[],
        recipes: &[(
            Mac,
            &[Cask(&["affinity-photo", "affinity-publisher", "affinity-designer"])],
        )],
    },
    Capability {
        name: "gimp",
        label: "Installing GIMP",
        gui: true,
        default: &[Install(&["gimp"])],
        recipes: &[(Mac, &[Cask(&["gimp"])])],
    },
    Capability {
        name: "inkscape",
        label: "Installing Inkscape",
        gui: true,
        default: &[Install(&["inkscape"])],
        recipes: &[(Mac, &[Cask(&["inkscape"])])],
    },
    Capability {
        name: "blender",
        label: "Installing Blender",
        gui: true,
        default: &[Install(&["blender"])],
        recipes: &[(Mac, &[Cask(&["blender"])])],
    },
    Capability {
        name: "bambu-studio",
        label: "Installing Bambu Studio",
        gui: true,
        default: &[],
        recipes: &[
            (Arch, &[UserInstall(&["bambustudio-bin"])]),
            (Ubuntu, &[Flatpak(&["com.bambulab.BambuStudio"])]),
            (Mac, &[Cask(&["bambu-studio"])]),
        ],
    },
    // Infrastructure
    Capability {
        name: "terraform",
        label: "Installing Terraform",
        gui: false,
        default: &[Install(&["terraform"])],
        recipes: &[
            (
                Ubuntu,
                &[
                    Run {
                        tokens: &[
                            "sh",
                            "-c",
                            "curl -fsSL https://apt.releases.hashicorp.com/gpg | gpg --dearmor --yes -o /usr/share/keyrings/hashicorp.gpg",
                        ],
                        elevated: true,
                    },
                    AppendLine {
                        file: "/etc/apt/sources.list.d/hashicorp.list",
                        marker: "apt.releases.hashicorp.com",
                        line: "deb [signed-by=/usr/share/keyrings/hashicorp.gpg] https://apt.releases.hashicorp.com jammy main",
                    },
                    UpdateOsRepo,
                    Install(&["terraform"]),
                ],
            ),
        ],
    },
    // Printer
    Capability {
        name: "printer-drivers",
        label: "Installing printer drivers",
        gui: false,
        default: &[],
        recipes: &[
            (Arch, &[Install(&["cups"]), EnableService("cups")]),
            (Ubuntu, &[Install(&["cups"]), EnableService("cups")]),
        ],
    },
    // Recording
    Capability {
        name: "audacity",
        label: "Installing Audacity",
        gui: true,
        default: &[Install(&["audacity", "ffmpeg"])],
        recipes: &[
            (Ubuntu, &[Install(&["audacity", "ffmpeg", "lame"])]),
            (Mac, &[Cask(&["audacity"]), Install(&["ffmpeg"])]),
        ],
    },
    Capability {
        name: "obs-studio",
        label: "Installing OBS Studio",
        gui: true,
        default: &[Install(&["obs-studio"])],
        recipes: &[
            (
                Ubuntu,
                &[
                    Run {
                        tokens: &["add-apt-repository", "-y", "ppa:obsproject/obs-studio"],
                        elevated: true,
                    },
                    UpdateOsRepo,
                    Install(&["obs-studio"]),
                ],
            ),
            (Mac, &[Cask(&["obs"])]),
        ],
    },
    // Ripping
    Capability {
        name: "exact-audio-copy",
        label: "Installing Exact Audio Copy",
        gui: true,
        default: &[],
        recipes: &[(Windows, &[Install(&["exactaudiocopy"])])],
    },
    // Video editing
    Capability {
        name: "davinci-resolve",
        label: "Installing DaVinci Resolve",
        gui: true,
        default: &[Notice(
            "Download DaVinci Resolve Studio from https://www.blackmagicdesign.com/products/davinciresolve/studio",
        )],
        recipes: &[(Arch, &[UserInstall(&["davinci-resolve-studio"])])],
    },
    // VPN
    Capability {
        name: "nordvpn",
        label: "Installing NordVPN",
        gui: false,
        default: &[],
        recipes: &[
            (
                Arch,
                &[
                    UserInstall(&["nordvpn-bin"]),
                    EnableService("nordvpnd"),
                    NORDVPN_GROUP,
                ],
            ),
            (
                Ubuntu,
                &[
                    Run {
                        tokens: &[
                            "sh",
                            "-c",
                            "dpkg -s nordvpn-release >/dev/null 2>&1 || { curl -fsSL -o /tmp/nordvpn-release.deb https://repo.nordvpn.com/deb/nordvpn/debian/pool/main/nordvpn-release_1.0.0_all.deb && apt-get install -y /tmp/nordvpn-release.deb; }",
                        ],
                        elevated: true,
                    },
                    UpdateOsRepo,
                    Install(&["nordvpn"]),
                    NORDVPN_GROUP,
                ],
            ),
            (Mac, &[Cask(&["nordvpn"])]),
            (Windows, &[Install(&["nordvpn"])]),
        ],
    },
    // Hardware
    Capability {
        name: "graphics-drivers",
        label: "Installing graphics card tools",
        gui: true,
        default: &[],
        recipes: &[
            (
                Arch,
                &[When {
                    hardware: Hardware::NvidiaGpu,
                    steps: &[Install(&[
                        "nvidia",
                        "nvidia-utils",
                        "lib32-nvidia-utils",
                        "nvidia-settings",
                        "vulkan-icd-loader",
                        "lib32-vulkan-icd-loader",
                    ])],
                }],
            ),
            (
                Ubuntu,
                &[When {
                    hardware: Hardware::NvidiaGpu,
                    steps: &[
                        Run {
                            tokens: &["add-apt-repository", "-y", "ppa:graphics-drivers/ppa"],
                            elevated: true,
                        },
                        UpdateOsRepo,
                        Install(&["ubuntu-drivers-common"]),
                        Run {
                            tokens: &["ubuntu-drivers", "autoinstall"],
                            elevated: true,
                        },
                    ],
                }],
            ),
            (
                Windows,
                &[When {
                    hardware: Hardware::NvidiaGpu,
                    steps: &[Install(&["geforce-experience"])],
                }],
            ),
        ],
    },
    Capability {
        name: "laptop-graphics",
        label: "Installing graphics card tools for laptops",
        gui: true,
        default: &[],
        recipes: &[
            (
                Arch,
                &[
                    NVIDIA_PRIME,
                    When {
                        hardware: Hardware::IntelGpu,
                        steps: &[Install(&["xf86-video-intel"])],
                    },
                ],
            ),
            (
                Ubuntu,
                &[
                    NVIDIA_PRIME,
                    When {
                        hardware: Hardware::IntelGpu,
                        steps: &[Install(&["xserver-xorg-video-intel"])],
                    },
                ],
            ),
        ],
    },
    Capability {
        name: "microcode",
        label: "Installing CPU microcode",
        gui: false,
        default: &[],
        recipes: &[
            (
                Arch,
                &[
                    When {
                        hardware: Hardware::IntelCpu,
                        steps: &[Install(&["intel-ucode"])],
                    },
                    When {
                        hardware: Hardware::AmdCpu,
                        steps: &[Install(&["amd-ucode"])],
                    },
                ],
            ),
            (
                Ubuntu,
                &[
                    When {
                        hardware: Hardware::IntelCpu,
                        steps: &[Install(&["intel-microcode"])],
                    },
                    When {
                        hardware: Hardware::AmdCpu,
                        steps: &[Install(&["amd64-microcode"])],
                    },
                ],
            ),
        ],
    },
    // Desktop environments
    Capability {
        name: "gnome-desktop",
        label: "Installing GNOME",
        gui: true,
        default: &[],
        recipes: &[
            (
                Arch,
                &[
                    Install(&["gnome", "libcanberra", "libappindicator-gtk3"]),
                    UserInstall(&["gnome-shell-extension-appindicator"]),
                    EnableService("gdm"),
                    NETWORK_MANAGER,
                ],
            ),
            (
                Ubuntu,
                &[
                    Install(&[
                        "ubuntu-desktop-minimal",
                        "network-manager-gnome",
                        "gnome-tweaks",
                        "xdg-desktop-portal-gnome",
                        "gnome-shell-extension-appindicator",
                        "chrome-gnome-shell",
                    ]),
                    NETWORK_MANAGER,
                ],
            ),
        ],
    },
    Capability {
        name: "kde-desktop",
        label: "Installing KDE Plasma",
        gui: true,
        default: &[],
        recipes: &[
            (
                Arch,
                &[
                    Install(&["plasma-meta", "dolphin", "konsole"]),
                    EnableService("sddm"),
                    NETWORK_MANAGER,
                ],
            ),
            (
                Ubuntu,
                &[
                    Install(&[
                        "kde-plasma-desktop",
                        "baloo",
                        "dolphin",
                        "dolphin-plugins",
                        "ffmpegthumbs",
                        "gwenview",
                        "kdegraphics-thumbnailers",
                        "konsole",
                        "phonon-qt5-vlc",
                        "sddm",
                        "xdg-desktop-portal-kde",
                    ]),
                    AppendLine {
                        file: ".config/plasma-workspace/env/gtk.sh",
                        marker: "GTK_USE_PORTAL",
                        line: "export GTK_USE_PORTAL=1",
                    },
                    NETWORK_MANAGER,
                ],
            ),
        ],
    },
];
