//! Scoped switching of the process effective identity.
//!
//! The tool is started through `sudo`, so the real uid is root and the
//! invoking user is known from `SUDO_UID`/`SUDO_GID`/`SUDO_USER`. At startup
//! the effective identity drops to the invoking user so that files written in
//! the home directory belong to them. Elevated commands run inside an
//! [`IdentityGuard`], which raises the effective identity to root and puts the
//! previous one back when dropped.

use crate::error::RigupError;
use std::env;
use std::io;
use std::path::PathBuf;

/// A uid/gid pair plus the account details we need to run commands as it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub uid: u32,
    pub gid: u32,
    pub name: String,
    pub home: PathBuf,
}

impl Identity {
    /// The effective identity of this process right now
    pub fn current_effective() -> Identity {
        let (uid, gid) = effective_ids();
        Identity {
            uid,
            gid,
            name: env::var("USER").unwrap_or_default(),
            home: dirs::home_dir().unwrap_or_else(|| PathBuf::from("/")),
        }
    }

    fn root() -> Identity {
        Identity {
            uid: 0,
            gid: 0,
            name: "root".to_string(),
            home: PathBuf::from("/root"),
        }
    }
}

/// Who invoked the tool and whether we may switch to root
#[derive(Debug, Clone)]
pub struct Privileges {
    invoking: Identity,
    can_switch: bool,
}

impl Privileges {
    /// Inspect the process credentials and the sudo environment
    pub fn detect() -> Privileges {
        if !real_uid_is_root() {
            return Privileges::inherit();
        }

        let sudo_ids = env::var("SUDO_UID")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .zip(env::var("SUDO_GID").ok().and_then(|v| v.parse::<u32>().ok()));

        match sudo_ids {
            Some((uid, gid)) if uid != 0 => {
                let name = env::var("SUDO_USER").unwrap_or_default();
                let home = home_of(uid).unwrap_or_else(|| PathBuf::from("/home").join(&name));
                Privileges {
                    invoking: Identity {
                        uid,
                        gid,
                        name,
                        home,
                    },
                    can_switch: true,
                }
            }
            // Logged in as root directly
            _ => Privileges {
                invoking: Identity::root(),
                can_switch: false,
            },
        }
    }

    /// Run everything as the current identity, never switching
    pub fn inherit() -> Privileges {
        Privileges {
            invoking: Identity::current_effective(),
            can_switch: false,
        }
    }

    /// Switch between root and `invoking` regardless of how we were started
    #[cfg(test)]
    pub(crate) fn switching_to(invoking: Identity) -> Privileges {
        Privileges {
            invoking,
            can_switch: true,
        }
    }

    pub fn invoking(&self) -> &Identity {
        &self.invoking
    }

    /// Whether elevated commands will really run with superuser rights
    pub fn has_superuser(&self) -> bool {
        self.can_switch || real_uid_is_root() || is_elevated()
    }

    /// Identity to give user-level child processes, when it differs from ours
    pub fn user_child_identity(&self) -> Option<&Identity> {
        self.can_switch.then_some(&self.invoking)
    }

    /// Make the invoking user the resting effective identity of the process
    pub fn drop_to_invoking(&self) -> Result<(), RigupError> {
        if !self.can_switch {
            return Ok(());
        }
        log::debug!(
            "Dropping effective identity to {} ({}:{})",
            self.invoking.name,
            self.invoking.uid,
            self.invoking.gid
        );
        set_effective(self.invoking.uid, self.invoking.gid).map_err(RigupError::Privilege)
    }

    /// Become root until the returned guard is dropped
    pub fn elevate(&self) -> Result<IdentityGuard, RigupError> {
        if !self.can_switch {
            return Ok(IdentityGuard { restore: None });
        }
        IdentityGuard::switch_to(0, 0)
    }
}

/// Restores the saved effective identity when dropped
#[derive(Debug)]
#[must_use = "the identity is restored as soon as the guard is dropped"]
pub struct IdentityGuard {
    restore: Option<(u32, u32)>,
}

impl IdentityGuard {
    /// Switch the effective identity, remembering the current one
    pub fn switch_to(uid: u32, gid: u32) -> Result<IdentityGuard, RigupError> {
        let saved = effective_ids();
        if saved == (uid, gid) {
            return Ok(IdentityGuard { restore: None });
        }

        log::debug!("Switching effective identity {:?} -> {:?}", saved, (uid, gid));
        set_effective(uid, gid).map_err(RigupError::Privilege)?;

        Ok(IdentityGuard {
            restore: Some(saved),
        })
    }
}

impl Drop for IdentityGuard {
    fn drop(&mut self) {
        if let Some((uid, gid)) = self.restore.take() {
            log::debug!("Restoring effective identity {:?}", (uid, gid));
            if let Err(e) = set_effective(uid, gid) {
                // Never keep running as root after a scoped elevation
                eprintln!("FATAL: could not restore effective identity: {}", e);
                std::process::abort();
            }
        }
    }
}

#[cfg(unix)]
pub(crate) fn effective_ids() -> (u32, u32) {
    (
        nix::unistd::geteuid().as_raw(),
        nix::unistd::getegid().as_raw(),
    )
}

#[cfg(not(unix))]
pub(crate) fn effective_ids() -> (u32, u32) {
    (0, 0)
}

#[cfg(unix)]
pub(crate) fn real_uid_is_root() -> bool {
    nix::unistd::getuid().is_root()
}

#[cfg(not(unix))]
pub(crate) fn real_uid_is_root() -> bool {
    false
}

/// Go through root so that both raising and lowering work from any state
#[cfg(unix)]
fn set_effective(uid: u32, gid: u32) -> io::Result<()> {
    use nix::unistd::{geteuid, setegid, seteuid, Gid, Uid};

    if !geteuid().is_root() {
        seteuid(Uid::from_raw(0))?;
    }
    setegid(Gid::from_raw(gid))?;
    seteuid(Uid::from_raw(uid))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_effective(_uid: u32, _gid: u32) -> io::Result<()> {
    Ok(())
}

#[cfg(unix)]
fn home_of(uid: u32) -> Option<PathBuf> {
    use nix::unistd::{Uid, User};

    User::from_uid(Uid::from_raw(uid))
        .ok()
        .flatten()
        .map(|user| user.dir)
}

#[cfg(not(unix))]
fn home_of(_uid: u32) -> Option<PathBuf> {
    None
}

/// Windows has no per-call elevation, so the whole process must hold an
/// elevated token
#[cfg(windows)]
pub fn is_elevated() -> bool {
    ::is_elevated::is_elevated()
}

#[cfg(not(windows))]
pub fn is_elevated() -> bool {
    false
}

/// Fail unless elevated commands can actually run with superuser rights
pub fn require_superuser(privileges: &Privileges) -> Result<(), RigupError> {
    if privileges.has_superuser() {
        return Ok(());
    }

    let hint = if cfg!(windows) {
        "run rigup from an administrator prompt"
    } else {
        "run rigup with sudo"
    };
    Err(RigupError::InsufficientPrivilege(format!(
        "installing system packages needs superuser rights; {}",
        hint
    )))
}
