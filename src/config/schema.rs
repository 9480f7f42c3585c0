use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,

    #[serde(default)]
    pub git: Option<GitIdentity>,

    /// Extra capabilities appended to a bundle, keyed by bundle name
    #[serde(default)]
    pub bundles: BTreeMap<String, Vec<String>>,

    #[serde(default)]
    pub dotfiles: Option<DotfilesConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Abort the run at the first failed phase
    #[serde(default)]
    pub fail_fast: bool,

    #[serde(default)]
    pub command_timeout_secs: Option<u64>,

    /// Stream command output to the console while it runs
    #[serde(default = "default_true")]
    pub echo_output: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fail_fast: false,
            command_timeout_secs: None,
            echo_output: default_true(),
        }
    }
}

impl Settings {
    pub fn command_timeout(&self) -> Option<Duration> {
        self.command_timeout_secs.map(Duration::from_secs)
    }
}

/// Global git identity written with `git config --global`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GitIdentity {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DotfilesConfig {
    /// Directory searched recursively for `*.symlink` files
    pub source: PathBuf,
}

impl Config {
    /// Extra capabilities configured for a bundle
    pub fn bundle_extras(&self, bundle: &str) -> &[String] {
        self.bundles.get(bundle).map(Vec::as_slice).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(!config.settings.fail_fast);
        assert!(config.settings.echo_output);
        assert_eq!(config.settings.command_timeout(), None);
        assert!(config.git.is_none());
        assert!(config.bundles.is_empty());
        assert!(config.dotfiles.is_none());
    }

    #[test]
    fn test_full_config() {
        let config: Config = toml::from_str(
            r#"
[settings]
fail_fast = true
command_timeout_secs = 600
echo_output = false

[git]
name = "Jane Doe"
email = "jane@example.com"

[bundles]
development = ["helm", "minikube"]

[dotfiles]
source = "/home/jane/dotfiles"
"#,
        )
        .unwrap();

        assert!(config.settings.fail_fast);
        assert!(!config.settings.echo_output);
        assert_eq!(
            config.settings.command_timeout(),
            Some(Duration::from_secs(600))
        );
        assert_eq!(config.git.as_ref().unwrap().email, "jane@example.com");
        assert_eq!(config.bundle_extras("development"), ["helm", "minikube"]);
        assert!(config.bundle_extras("media").is_empty());
        assert_eq!(
            config.dotfiles.unwrap().source,
            PathBuf::from("/home/jane/dotfiles")
        );
    }

    #[test]
    fn test_unknown_section_is_rejected() {
        assert!(toml::from_str::<Config>("[brew]\nformulae = []\n").is_err());
    }
}
