use std::fmt;

/// Capabilities every run starts with, in order
pub const BASE_CAPABILITIES: &[&str] = &[
    "user-bin",
    "system-dependencies",
    "system-extras",
    "update-os",
    "graphics-drivers",
];

/// A named group of capabilities selected by one command-line flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bundle {
    Development,
    Personal,
    Media,
    Server,
    Vm,
    Docker,
    Laptop,
    Gcp,
    Browsers,
    Gaming,
    Images,
    Infrastructure,
    Modelling,
    Printer,
    Recording,
    Ripping,
    Video,
    VideoEditing,
    Vpn,
}

impl Bundle {
    /// All bundles, in the order their phases run
    pub const ALL: [Bundle; 19] = [
        Bundle::Development,
        Bundle::Personal,
        Bundle::Media,
        Bundle::Server,
        Bundle::Vm,
        Bundle::Docker,
        Bundle::Laptop,
        Bundle::Gcp,
        Bundle::Browsers,
        Bundle::Gaming,
        Bundle::Images,
        Bundle::Infrastructure,
        Bundle::Modelling,
        Bundle::Printer,
        Bundle::Recording,
        Bundle::Ripping,
        Bundle::Video,
        Bundle::VideoEditing,
        Bundle::Vpn,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Bundle::Development => "development",
            Bundle::Personal => "personal",
            Bundle::Media => "media",
            Bundle::Server => "server",
            Bundle::Vm => "vm",
            Bundle::Docker => "docker",
            Bundle::Laptop => "laptop",
            Bundle::Gcp => "gcp",
            Bundle::Browsers => "browsers",
            Bundle::Gaming => "gaming",
            Bundle::Images => "images",
            Bundle::Infrastructure => "infrastructure",
            Bundle::Modelling => "modelling",
            Bundle::Printer => "printer",
            Bundle::Recording => "recording",
            Bundle::Ripping => "ripping",
            Bundle::Video => "video",
            Bundle::VideoEditing => "video-editing",
            Bundle::Vpn => "vpn",
        }
    }

    pub fn from_name(name: &str) -> Option<Bundle> {
        Bundle::ALL.into_iter().find(|b| b.name() == name)
    }

    pub fn capabilities(&self) -> &'static [&'static str] {
        match self {
            Bundle::Development => &[
                "git",
                "curl",
                "cplusplus",
                "jdk",
                "gradle",
                "maven",
                "nodejs",
                "python",
                "rust",
                "jq",
                "tmux",
                "zsh",
                "chromium",
                "vscode",
                "intellij",
                "docker",
                "kubectl",
                "openvpn",
                "development-shortcuts",
                "development-settings",
            ],
            Bundle::Personal => &[
                "chromium",
                "dropbox",
                "codecs",
                "gpg",
                "keepassxc",
                "lutris",
                "nextcloud",
                "openvpn",
                "spotify",
                "steam",
                "tmux",
                "zsh",
            ],
            Bundle::Media => &["codecs", "vlc", "makemkv", "mkvtoolnix", "handbrake"],
            Bundle::Server => &["docker", "ssh-server"],
            Bundle::Vm => &["vm-tools"],
            Bundle::Docker => &["docker", "kubectl", "helm", "minikube"],
            Bundle::Laptop => &[
                "bluetooth",
                "firmware-updater",
                "microcode",
                "powertop",
                "tlp",
                "laptop-graphics",
            ],
            Bundle::Gcp => &["google-cloud-sdk"],
            Bundle::Browsers => &["firefox", "google-chrome", "microsoft-edge"],
            Bundle::Gaming => &[
                "discord",
                "epic-games",
                "gog-galaxy",
                "lutris",
                "retroarch",
                "steam",
                "wine",
            ],
            Bundle::Images => &["affinity-suite", "gimp", "inkscape"],
            Bundle::Infrastructure => &["terraform"],
            Bundle::Modelling => &["blender", "bambu-studio"],
            Bundle::Printer => &["printer-drivers"],
            Bundle::Recording => &["audacity", "obs-studio"],
            Bundle::Ripping => &["exact-audio-copy", "handbrake", "makemkv", "mkvtoolnix"],
            Bundle::Video => &["codecs", "vlc"],
            Bundle::VideoEditing => &["davinci-resolve"],
            Bundle::Vpn => &["nordvpn"],
        }
    }
}

impl fmt::Display for Bundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Desktop environment installed on request, right after the base phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Desktop {
    Gnome,
    Kde,
}

impl Desktop {
    pub fn capability(&self) -> &'static str {
        match self {
            Desktop::Gnome => "gnome-desktop",
            Desktop::Kde => "kde-desktop",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::Capability;

    #[test]
    fn test_every_referenced_capability_exists() {
        let desktops = [Desktop::Gnome.capability(), Desktop::Kde.capability()];
        let referenced = BASE_CAPABILITIES
            .iter()
            .chain(desktops.iter())
            .chain(Bundle::ALL.iter().flat_map(|b| b.capabilities()));
        for name in referenced {
            assert!(Capability::get_by_name(name).is_some(), "missing {}", name);
        }
    }

    #[test]
    fn test_no_duplicates_within_a_bundle() {
        for bundle in Bundle::ALL {
            let mut names = bundle.capabilities().to_vec();
            let total = names.len();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), total, "{}", bundle);
        }
    }

    #[test]
    fn test_name_round_trip() {
        for bundle in Bundle::ALL {
            assert_eq!(Bundle::from_name(bundle.name()), Some(bundle));
        }
        assert_eq!(Bundle::from_name("video_editing"), None);
        assert_eq!(Bundle::from_name("video-editing"), Some(Bundle::VideoEditing));
    }
}
