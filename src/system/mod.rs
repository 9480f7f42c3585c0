pub mod arch;
pub mod hardware;
pub mod linux;
pub mod mac;
pub mod profile;
pub mod ubuntu;
pub mod windows;

use crate::error::RigupError;
use std::env;
use sysinfo::System;

pub use hardware::Hardware;
pub use profile::{ProfileKind, SystemProfile, Target};

/// What we know about the host before picking a profile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformFacts {
    pub os: String,
    pub distro: Option<String>,
    pub desktop: Option<String>,
}

impl PlatformFacts {
    pub fn detect() -> PlatformFacts {
        let os = env::consts::OS.to_string();
        // NAME from os-release, e.g. "Ubuntu" or "Arch Linux"
        let distro = if is_linux(&os) {
            System::name().filter(|name| !name.trim().is_empty())
        } else {
            None
        };
        let desktop = env::var("XDG_CURRENT_DESKTOP")
            .ok()
            .filter(|d| !d.trim().is_empty());

        let facts = PlatformFacts {
            os,
            distro,
            desktop,
        };
        log::debug!("Detected platform: {:?}", facts);
        facts
    }
}

fn is_linux(os: &str) -> bool {
    matches!(os, "linux" | "linux2")
}

/// Pick exactly one profile for the given facts
pub fn resolve(facts: &PlatformFacts) -> Result<Box<dyn SystemProfile>, RigupError> {
    let os = facts.os.to_ascii_lowercase();

    if is_linux(&os) {
        return Ok(resolve_linux(facts.distro.as_deref(), facts.desktop.as_deref()));
    }

    match os.as_str() {
        "macos" | "darwin" => Ok(Box::new(mac::Mac)),
        "windows" | "win32" | "cygwin" | "msys" => Ok(Box::new(windows::Windows)),
        _ => Err(RigupError::UnsupportedPlatform {
            os: facts.os.clone(),
        }),
    }
}

/// Detect the host and resolve its profile
pub fn resolve_current() -> Result<Box<dyn SystemProfile>, RigupError> {
    resolve(&PlatformFacts::detect())
}

fn resolve_linux(distro: Option<&str>, desktop: Option<&str>) -> Box<dyn SystemProfile> {
    match distro.map(str::trim) {
        Some(name) if name.starts_with("Ubuntu") => resolve_ubuntu(desktop),
        Some(name) if name == "Arch" || name.starts_with("Arch Linux") => Box::new(arch::Arch),
        other => {
            log::debug!("No dedicated profile for {:?}, using generic Linux", other);
            Box::new(linux::Linux)
        }
    }
}

fn resolve_ubuntu(desktop: Option<&str>) -> Box<dyn SystemProfile> {
    let components: Vec<String> = desktop
        .unwrap_or_default()
        .split(':')
        .map(|c| c.trim().to_ascii_uppercase())
        .collect();
    let has = |names: &[&str]| components.iter().any(|c| names.contains(&c.as_str()));

    if has(&["KDE"]) {
        Box::new(ubuntu::Kubuntu)
    } else if has(&["LXQT", "LXDE"]) {
        Box::new(ubuntu::Lubuntu)
    } else if has(&["XFCE"]) {
        Box::new(ubuntu::Xubuntu)
    } else {
        Box::new(ubuntu::Ubuntu)
    }
}
