use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Append `line` to `path` unless the file already mentions `marker`.
///
/// The file is created when missing. Returns whether anything was written,
/// so repeated runs leave the file as a single run would.
pub fn ensure_line_appended(path: &Path, marker: &str, line: &str) -> io::Result<bool> {
    let mut file = OpenOptions::new()
        .read(true)
        .append(true)
        .create(true)
        .open(path)?;

    // Shell profiles are not always valid UTF-8
    let mut contents = Vec::new();
    file.seek(SeekFrom::Start(0))?;
    file.read_to_end(&mut contents)?;

    if contains_bytes(&contents, marker.as_bytes()) {
        log::debug!("{} already contains {:?}", path.display(), marker);
        return Ok(false);
    }

    let mut addition = String::with_capacity(line.len() + 2);
    if contents.last().is_some_and(|&b| b != b'\n') {
        addition.push('\n');
    }
    addition.push_str(line);
    addition.push('\n');

    file.write_all(addition.as_bytes())?;
    log::debug!("Appended {:?} to {}", line, path.display());
    Ok(true)
}

fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|window| window == needle)
}

/// Uncomment a repository section such as `[multilib]` in `pacman.conf`.
///
/// Only the header and the `Include` lines of that section are touched.
/// Returns `false` when the section is already enabled or not present.
pub fn enable_pacman_repo(path: &Path, repo: &str) -> io::Result<bool> {
    let contents = fs::read_to_string(path)?;
    let header = format!("[{}]", repo);
    let commented_header = format!("#{}", header);

    let mut in_section = false;
    let mut changed = false;
    let mut lines = Vec::new();

    for line in contents.lines() {
        let trimmed = line.trim();
        if trimmed == commented_header {
            in_section = true;
            changed = true;
            lines.push(header.clone());
            continue;
        }
        if trimmed.starts_with('[') || trimmed.starts_with("#[") {
            in_section = false;
        }
        if in_section {
            if let Some(include) = trimmed.strip_prefix('#') {
                if include.trim_start().starts_with("Include") {
                    lines.push(include.trim_start().to_string());
                    continue;
                }
            }
        }
        lines.push(line.to_string());
    }

    if !changed {
        log::debug!("{} already has {} enabled or lacks it", path.display(), header);
        return Ok(false);
    }

    let mut updated = lines.join("\n");
    if contents.ends_with('\n') {
        updated.push('\n');
    }
    fs::write(path, updated)?;
    log::debug!("Enabled {} in {}", header, path.display());
    Ok(true)
}

/// Copy every `*.symlink` file under `source` to `~/.<name>`
pub fn copy_symlink_files(source: &Path, home: &Path) -> Result<Vec<PathBuf>> {
    let mut copied = Vec::new();

    for entry in WalkDir::new(source).follow_links(true) {
        let entry = entry.with_context(|| format!("Failed to walk {}", source.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        let Some(stem) = file_name.strip_suffix(".symlink") else {
            continue;
        };
        if stem.is_empty() {
            continue;
        }

        let target = home.join(format!(".{}", stem));
        fs::copy(entry.path(), &target).with_context(|| {
            format!(
                "Failed to copy {} to {}",
                entry.path().display(),
                target.display()
            )
        })?;
        log::debug!("Copied {} -> {}", entry.path().display(), target.display());
        copied.push(target);
    }

    copied.sort();
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_line_appended_creates_file() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join(".zshrc");

        let written = ensure_line_appended(&path, "JAVA_HOME", "export JAVA_HOME=/x")?;

        assert!(written);
        assert_eq!(fs::read_to_string(&path)?, "export JAVA_HOME=/x\n");
        Ok(())
    }

    #[test]
    fn test_ensure_line_appended_is_idempotent() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("f");
        fs::write(&path, "")?;

        assert!(ensure_line_appended(&path, "JAVA_HOME", "export JAVA_HOME=/x")?);
        let once = fs::read_to_string(&path)?;
        assert!(!ensure_line_appended(&path, "JAVA_HOME", "export JAVA_HOME=/x")?);
        let twice = fs::read_to_string(&path)?;

        assert_eq!(once, twice);
        assert_eq!(twice.matches("export JAVA_HOME=/x").count(), 1);
        Ok(())
    }

    #[test]
    fn test_ensure_line_appended_respects_existing_marker() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join(".bashrc");
        fs::write(&path, "export JAVA_HOME=/usr/lib/jvm/other\n")?;

        assert!(!ensure_line_appended(&path, "JAVA_HOME", "export JAVA_HOME=/x")?);
        assert_eq!(
            fs::read_to_string(&path)?,
            "export JAVA_HOME=/usr/lib/jvm/other\n"
        );
        Ok(())
    }

    #[test]
    fn test_ensure_line_appended_starts_on_fresh_line() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join(".bashrc");
        fs::write(&path, "alias ll='ls -l'")?;

        ensure_line_appended(&path, "EDITOR", "export EDITOR=vim")?;

        assert_eq!(
            fs::read_to_string(&path)?,
            "alias ll='ls -l'\nexport EDITOR=vim\n"
        );
        Ok(())
    }

    #[test]
    fn test_ensure_line_appended_tolerates_non_utf8() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join(".bashrc");
        fs::write(&path, b"# caf\xe9\nexport EDITOR=vim")?;

        assert!(!ensure_line_appended(&path, "EDITOR", "export EDITOR=nano")?);
        assert!(ensure_line_appended(&path, "JAVA_HOME", "export JAVA_HOME=/x")?);

        assert_eq!(
            fs::read(&path)?,
            b"# caf\xe9\nexport EDITOR=vim\nexport JAVA_HOME=/x\n".to_vec()
        );
        Ok(())
    }

    const PACMAN_CONF: &str = "[options]\nHoldPkg = pacman glibc\n\n[core]\nInclude = /etc/pacman.d/mirrorlist\n\n#[multilib-testing]\n#Include = /etc/pacman.d/mirrorlist\n\n#[multilib]\n#Include = /etc/pacman.d/mirrorlist\n\n#[custom]\n#Server = file:///home/custompkgs\n";

    #[test]
    fn test_enable_pacman_repo_uncomments_section() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("pacman.conf");
        fs::write(&path, PACMAN_CONF)?;

        assert!(enable_pacman_repo(&path, "multilib")?);

        let updated = fs::read_to_string(&path)?;
        assert!(updated.contains("\n[multilib]\nInclude = /etc/pacman.d/mirrorlist\n"));
        assert!(updated.contains("#[multilib-testing]\n#Include = /etc/pacman.d/mirrorlist"));
        assert!(updated.contains("#[custom]\n#Server = file:///home/custompkgs\n"));
        Ok(())
    }

    #[test]
    fn test_enable_pacman_repo_is_idempotent() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("pacman.conf");
        fs::write(&path, PACMAN_CONF)?;

        assert!(enable_pacman_repo(&path, "multilib")?);
        let once = fs::read_to_string(&path)?;
        assert!(!enable_pacman_repo(&path, "multilib")?);

        assert_eq!(fs::read_to_string(&path)?, once);
        Ok(())
    }

    #[test]
    fn test_enable_pacman_repo_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(enable_pacman_repo(&dir.path().join("nope.conf"), "multilib").is_err());
    }

    #[test]
    fn test_copy_symlink_files() -> Result<()> {
        let source = TempDir::new()?;
        let home = TempDir::new()?;
        fs::create_dir(source.path().join("git"))?;
        fs::write(source.path().join("git/gitconfig.symlink"), "[user]\n")?;
        fs::write(source.path().join("vimrc.symlink"), "set number\n")?;
        fs::write(source.path().join("README.md"), "ignored")?;

        let copied = copy_symlink_files(source.path(), home.path())?;

        assert_eq!(
            copied,
            vec![home.path().join(".gitconfig"), home.path().join(".vimrc")]
        );
        assert_eq!(fs::read_to_string(home.path().join(".vimrc"))?, "set number\n");
        assert!(!home.path().join(".README.md").exists());
        Ok(())
    }
}
