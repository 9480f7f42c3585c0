//! CPU and graphics vendors, for steps that only apply to some machines.

use std::fmt;
use std::fs;
use std::path::Path;
use sysinfo::{CpuRefreshKind, RefreshKind, System};
use walkdir::WalkDir;

const PCI_DEVICES: &str = "/sys/bus/pci/devices";

/// PCI base class of display controllers
const DISPLAY_CLASS: &str = "0x03";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hardware {
    NvidiaGpu,
    IntelGpu,
    AmdGpu,
    IntelCpu,
    AmdCpu,
}

impl Hardware {
    pub fn name(&self) -> &'static str {
        match self {
            Hardware::NvidiaGpu => "NVIDIA graphics",
            Hardware::IntelGpu => "Intel graphics",
            Hardware::AmdGpu => "AMD graphics",
            Hardware::IntelCpu => "Intel CPU",
            Hardware::AmdCpu => "AMD CPU",
        }
    }
}

impl fmt::Display for Hardware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything we can tell about the host's processor and graphics
pub fn detect() -> Vec<Hardware> {
    let mut found: Vec<Hardware> = detect_cpu().into_iter().collect();
    for gpu in detect_gpus(Path::new(PCI_DEVICES)) {
        if !found.contains(&gpu) {
            found.push(gpu);
        }
    }
    log::debug!("Detected hardware: {:?}", found);
    found
}

fn detect_cpu() -> Option<Hardware> {
    let system =
        System::new_with_specifics(RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing()));
    system
        .cpus()
        .first()
        .and_then(|cpu| cpu_from_vendor_id(cpu.vendor_id()))
}

fn cpu_from_vendor_id(vendor_id: &str) -> Option<Hardware> {
    match vendor_id.trim() {
        "GenuineIntel" => Some(Hardware::IntelCpu),
        "AuthenticAMD" => Some(Hardware::AmdCpu),
        _ => None,
    }
}

/// Display controllers the kernel lists under `devices`, one entry per vendor
fn detect_gpus(devices: &Path) -> Vec<Hardware> {
    let mut gpus = Vec::new();

    let entries = WalkDir::new(devices)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok);

    for entry in entries {
        let read = |name: &str| fs::read_to_string(entry.path().join(name)).ok();
        let (Some(class), Some(vendor)) = (read("class"), read("vendor")) else {
            continue;
        };
        if let Some(gpu) = gpu_from_pci(&class, &vendor) {
            if !gpus.contains(&gpu) {
                gpus.push(gpu);
            }
        }
    }
    gpus
}

fn gpu_from_pci(class: &str, vendor: &str) -> Option<Hardware> {
    if !class.trim().starts_with(DISPLAY_CLASS) {
        return None;
    }
    match vendor.trim() {
        "0x10de" => Some(Hardware::NvidiaGpu),
        "0x8086" => Some(Hardware::IntelGpu),
        "0x1002" => Some(Hardware::AmdGpu),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn pci_device(root: &Path, slot: &str, class: &str, vendor: &str) {
        let dir = root.join(slot);
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("class"), format!("{}\n", class)).unwrap();
        fs::write(dir.join("vendor"), format!("{}\n", vendor)).unwrap();
    }

    #[test]
    fn test_cpu_vendor() {
        assert_eq!(cpu_from_vendor_id("GenuineIntel"), Some(Hardware::IntelCpu));
        assert_eq!(cpu_from_vendor_id("AuthenticAMD\n"), Some(Hardware::AmdCpu));
        assert_eq!(cpu_from_vendor_id("Apple"), None);
    }

    #[test]
    fn test_only_display_controllers_count() {
        assert_eq!(gpu_from_pci("0x030000", "0x10de"), Some(Hardware::NvidiaGpu));
        assert_eq!(gpu_from_pci("0x038000\n", "0x8086\n"), Some(Hardware::IntelGpu));
        assert_eq!(gpu_from_pci("0x030200", "0x1002"), Some(Hardware::AmdGpu));
        // Intel host bridge
        assert_eq!(gpu_from_pci("0x060000", "0x8086"), None);
        assert_eq!(gpu_from_pci("0x030000", "0x1af4"), None);
    }

    #[test]
    fn test_detect_gpus_from_device_tree() {
        let root = TempDir::new().unwrap();
        pci_device(root.path(), "0000:00:00.0", "0x060000", "0x8086");
        pci_device(root.path(), "0000:00:02.0", "0x030000", "0x8086");
        pci_device(root.path(), "0000:01:00.0", "0x030000", "0x10de");
        pci_device(root.path(), "0000:02:00.0", "0x030000", "0x10de");

        let mut gpus = detect_gpus(root.path());
        gpus.sort_by_key(|g| g.name());

        assert_eq!(gpus, [Hardware::IntelGpu, Hardware::NvidiaGpu]);
    }

    #[test]
    fn test_missing_device_tree_means_no_gpus() {
        let root = TempDir::new().unwrap();
        assert!(detect_gpus(&root.path().join("absent")).is_empty());
    }
}
