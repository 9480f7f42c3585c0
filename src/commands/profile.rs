use crate::system::{self, PlatformFacts};
use crate::utils::command_exists;
use anyhow::Result;
use colored::Colorize;

/// Print what was detected and which profile it resolves to
pub fn run() -> Result<()> {
    let facts = PlatformFacts::detect();

    println!("{}", "Detected platform".bright_cyan().bold());
    println!("  OS:      {}", facts.os);
    println!(
        "  Distro:  {}",
        facts.distro.as_deref().unwrap_or("-")
    );
    println!(
        "  Desktop: {}",
        facts.desktop.as_deref().unwrap_or("-")
    );
    println!();

    let hardware = system::hardware::detect();
    if hardware.is_empty() {
        println!("  Hardware: -");
    } else {
        let names: Vec<&str> = hardware.iter().map(|h| h.name()).collect();
        println!("  Hardware: {}", names.join(", "));
    }
    println!();

    let profile = system::resolve(&facts)?;
    println!("  ✓ Profile: {}", profile.kind().name().green().bold());

    if let Some(manager) = profile.package_manager() {
        if command_exists(manager) {
            println!("  ✓ Package manager: {}", manager.green());
        } else {
            println!(
                "  ✗ Package manager: {} {}",
                manager.yellow(),
                "(not found)".dimmed()
            );
        }
    }

    Ok(())
}
