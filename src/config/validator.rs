use super::Config;
use crate::catalogue::{Bundle, Capability};
use anyhow::Result;

/// Validate config for correctness
pub fn validate_config(config: &Config) -> Result<()> {
    validate_settings(config)?;
    validate_bundles(config)?;
    validate_git(config)?;
    validate_dotfiles(config)?;
    Ok(())
}

fn validate_settings(config: &Config) -> Result<()> {
    if config.settings.command_timeout_secs == Some(0) {
        anyhow::bail!("settings.command_timeout_secs must be greater than 0");
    }
    Ok(())
}

/// Bundle extras must name a known bundle and known capabilities
fn validate_bundles(config: &Config) -> Result<()> {
    for (bundle, extras) in &config.bundles {
        if Bundle::from_name(bundle).is_none() {
            let known: Vec<&str> = Bundle::ALL.iter().map(|b| b.name()).collect();
            anyhow::bail!(
                "Unknown bundle '{}' in [bundles]. Known bundles: {}",
                bundle,
                known.join(", ")
            );
        }
        for extra in extras {
            if Capability::get_by_name(extra).is_none() {
                anyhow::bail!(
                    "Unknown capability '{}' in [bundles] {}. Known capabilities: {}",
                    extra,
                    bundle,
                    Capability::all_names().join(", ")
                );
            }
        }
    }
    Ok(())
}

fn validate_git(config: &Config) -> Result<()> {
    if let Some(git) = &config.git {
        if git.name.trim().is_empty() {
            anyhow::bail!("git.name must not be empty");
        }
        if !git.email.contains('@') {
            anyhow::bail!("git.email '{}' is not an email address", git.email);
        }
    }
    Ok(())
}

fn validate_dotfiles(config: &Config) -> Result<()> {
    if let Some(dotfiles) = &config.dotfiles {
        if !dotfiles.source.is_dir() {
            anyhow::bail!(
                "dotfiles.source '{}' is not a directory",
                dotfiles.source.display()
            );
        }
    }
    Ok(())
}
