use super::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Find config file in order of priority:
/// 1. Explicit --config flag path
/// 2. ./rigup.toml (current directory)
/// 3. ~/.config/rigup/rigup.toml
/// 4. ~/.rigup.toml
///
/// Returns `None` when no file exists; an explicit path that is missing is an error.
/// `home` overrides the process home, since under sudo that is root's.
pub fn find_config_file(explicit_path: Option<&Path>, home: Option<&Path>) -> Result<Option<PathBuf>> {
    match home {
        Some(home) => find_config_file_in(
            explicit_path,
            Some(home.join(".config")),
            Some(home.to_path_buf()),
        ),
        None => find_config_file_in(explicit_path, dirs::config_dir(), dirs::home_dir()),
    }
}

fn find_config_file_in(
    explicit_path: Option<&Path>,
    config_dir: Option<PathBuf>,
    home_dir: Option<PathBuf>,
) -> Result<Option<PathBuf>> {
    // 1. Explicit path
    if let Some(path) = explicit_path {
        if path.exists() {
            return Ok(Some(path.to_path_buf()));
        }
        anyhow::bail!("Config file not found: {}", path.display());
    }

    // 2. Current directory
    let cwd_config = PathBuf::from("./rigup.toml");
    if cwd_config.exists() {
        return Ok(Some(cwd_config));
    }

    // 3. ~/.config/rigup/rigup.toml
    if let Some(config_dir) = config_dir {
        let config_path = config_dir.join("rigup/rigup.toml");
        if config_path.exists() {
            return Ok(Some(config_path));
        }
    }

    // 4. ~/.rigup.toml
    if let Some(home_dir) = home_dir {
        let home_config = home_dir.join(".rigup.toml");
        if home_config.exists() {
            return Ok(Some(home_config));
        }
    }

    Ok(None)
}

/// Load and parse config file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?;

    Ok(config)
}

/// Load config with automatic discovery, falling back to defaults
pub fn load_config_auto(
    explicit_path: Option<&Path>,
    home: Option<&Path>,
) -> Result<(Option<PathBuf>, Config)> {
    match find_config_file(explicit_path, home)? {
        Some(path) => {
            let config = load_config(&path)?;
            log::debug!("Loaded config from {}", path.display());
            Ok((Some(path), config))
        }
        None => {
            log::debug!("No config file found, using defaults");
            Ok((None, Config::default()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.toml");
        let err = find_config_file(Some(&missing), None).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "").unwrap();
        assert_eq!(find_config_file(Some(&path), None).unwrap(), Some(path));
    }

    #[test]
    fn test_config_dir_before_home() {
        let config_dir = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        fs::create_dir(config_dir.path().join("rigup")).unwrap();
        fs::write(config_dir.path().join("rigup/rigup.toml"), "").unwrap();
        fs::write(home.path().join(".rigup.toml"), "").unwrap();

        let found = find_config_file_in(
            None,
            Some(config_dir.path().to_path_buf()),
            Some(home.path().to_path_buf()),
        )
        .unwrap();

        if !Path::new("./rigup.toml").exists() {
            assert_eq!(found, Some(config_dir.path().join("rigup/rigup.toml")));
        }
    }

    #[test]
    fn test_nothing_found_is_none() {
        let empty = TempDir::new().unwrap();
        let found = find_config_file_in(
            None,
            Some(empty.path().to_path_buf()),
            Some(empty.path().to_path_buf()),
        )
        .unwrap();

        if !Path::new("./rigup.toml").exists() {
            assert_eq!(found, None);
        }
    }

    #[test]
    fn test_home_override_is_searched() {
        let home = TempDir::new().unwrap();
        fs::write(home.path().join(".rigup.toml"), "").unwrap();

        let found = find_config_file(None, Some(home.path())).unwrap();

        if !Path::new("./rigup.toml").exists() {
            assert_eq!(found, Some(home.path().join(".rigup.toml")));
        }
    }

    #[test]
    fn test_load_config_reports_parse_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rigup.toml");
        fs::write(&path, "[settings\nfail_fast = true").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML config"));
    }

    #[test]
    fn test_load_config_auto_with_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rigup.toml");
        fs::write(&path, "[settings]\nfail_fast = true\n").unwrap();

        let (found, config) = load_config_auto(Some(&path), None).unwrap();
        assert_eq!(found, Some(path));
        assert!(config.settings.fail_fast);
    }
}
