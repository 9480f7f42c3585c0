use crate::catalogue::{Bundle, Desktop};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "rigup")]
#[command(author, version, about, long_about = None)]
#[command(about = "A thin provisioning tool for personal Linux, Mac and Windows machines")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Developer tools: compilers, runtimes, editors, git, docker
    #[arg(short, long)]
    pub development: bool,

    /// Personal applications: browsers, sync clients, password manager, games
    #[arg(short, long)]
    pub personal: bool,

    /// Media ripping and playback
    #[arg(short, long)]
    pub media: bool,

    /// Server tools: docker, SSH server
    #[arg(short, long)]
    pub server: bool,

    /// Guest tools for virtual machines
    #[arg(long)]
    pub vm: bool,

    /// Container tooling: docker, kubectl, helm, minikube
    #[arg(long)]
    pub docker: bool,

    /// Laptop power and hardware support
    #[arg(long)]
    pub laptop: bool,

    /// Google Cloud SDK
    #[arg(long)]
    pub gcp: bool,

    /// Firefox, Google Chrome and Microsoft Edge
    #[arg(long)]
    pub browsers: bool,

    /// Game launchers, emulators and Wine
    #[arg(long)]
    pub gaming: bool,

    /// Image editors
    #[arg(long)]
    pub images: bool,

    /// Terraform
    #[arg(long)]
    pub infrastructure: bool,

    /// 3D modelling and printing
    #[arg(long)]
    pub modelling: bool,

    /// Printing support
    #[arg(long)]
    pub printer: bool,

    /// Audio and screen recording
    #[arg(long)]
    pub recording: bool,

    /// CD, DVD and Blu-ray ripping
    #[arg(long)]
    pub ripping: bool,

    /// Codecs and video playback
    #[arg(long)]
    pub video: bool,

    /// Video editing
    #[arg(long)]
    pub video_editing: bool,

    /// NordVPN client
    #[arg(long)]
    pub vpn: bool,

    /// Install the GNOME desktop
    #[arg(long)]
    pub gnome: bool,

    /// Install the KDE Plasma desktop
    #[arg(long)]
    pub kde: bool,

    /// Skip GUI applications
    #[arg(long)]
    pub cli_only: bool,

    /// Only show what would be done, don't make changes
    #[arg(long)]
    pub dry_run: bool,

    /// Abort at the first failed phase
    #[arg(long)]
    pub fail_fast: bool,

    /// Don't ask for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Print the detected platform and profile, then exit
    #[arg(long)]
    pub show_profile: bool,
}

impl Cli {
    /// Bundles selected by flags, in run order
    pub fn selected_bundles(&self) -> Vec<Bundle> {
        Bundle::ALL
            .into_iter()
            .filter(|bundle| match bundle {
                Bundle::Development => self.development,
                Bundle::Personal => self.personal,
                Bundle::Media => self.media,
                Bundle::Server => self.server,
                Bundle::Vm => self.vm,
                Bundle::Docker => self.docker,
                Bundle::Laptop => self.laptop,
                Bundle::Gcp => self.gcp,
                Bundle::Browsers => self.browsers,
                Bundle::Gaming => self.gaming,
                Bundle::Images => self.images,
                Bundle::Infrastructure => self.infrastructure,
                Bundle::Modelling => self.modelling,
                Bundle::Printer => self.printer,
                Bundle::Recording => self.recording,
                Bundle::Ripping => self.ripping,
                Bundle::Video => self.video,
                Bundle::VideoEditing => self.video_editing,
                Bundle::Vpn => self.vpn,
            })
            .collect()
    }

    pub fn selected_desktops(&self) -> Vec<Desktop> {
        let mut desktops = Vec::new();
        if self.gnome {
            desktops.push(Desktop::Gnome);
        }
        if self.kde {
            desktops.push(Desktop::Kde);
        }
        desktops
    }

    /// Whether any bundle or desktop was asked for
    pub fn has_selection(&self) -> bool {
        !self.selected_bundles().is_empty() || !self.selected_desktops().is_empty()
    }
}
