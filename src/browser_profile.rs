//! Persistent Chrome profile directory management
//!
//! The scraper reuses one user data directory across runs so the operator's
//! authenticated session survives. A crashed previous run can leave a
//! `SingletonLock` behind that makes Chrome refuse the directory; it is
//! removed here when the owning process is gone.

use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Create the profile directory if needed and clear a stale lock.
///
/// # Errors
///
/// Fails when the directory cannot be created, or when another live Chrome
/// process still holds it.
pub fn prepare_persistent_profile(profile_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(profile_dir).with_context(|| {
        format!("Failed to create profile directory: {}", profile_dir.display())
    })?;

    let absolute = profile_dir
        .canonicalize()
        .with_context(|| format!("Failed to resolve profile directory: {}", profile_dir.display()))?;

    if has_singleton_lock(&absolute) {
        if is_singleton_lock_stale(&absolute) {
            cleanup_stale_lock(&absolute)?;
        } else {
            bail!(
                "Profile directory {} is in use by another browser; close it and retry",
                absolute.display()
            );
        }
    }

    info!("Using persistent Chrome profile: {}", absolute.display());
    Ok(absolute)
}

fn has_singleton_lock(profile_dir: &Path) -> bool {
    let lock_path = profile_dir.join("SingletonLock");
    // Broken symlinks report false for exists()
    lock_path.exists() || lock_path.is_symlink()
}

/// Check if a SingletonLock file is stale (Chrome process no longer running)
///
/// SingletonLock is a symlink with target `{hostname}-{PID}`.
/// We parse the PID and check if that process still exists.
#[cfg(unix)]
pub fn is_singleton_lock_stale(profile_dir: &Path) -> bool {
    let lock_path = profile_dir.join("SingletonLock");

    if !has_singleton_lock(profile_dir) {
        return true;
    }

    match std::fs::read_link(&lock_path) {
        Ok(target) => {
            let target_str = target.to_string_lossy();
            debug!("SingletonLock target: {}", target_str);

            if let Some(pid_str) = target_str.rsplit('-').next()
                && let Ok(pid) = pid_str.parse::<i32>()
            {
                // kill(pid, 0) probes for existence without signalling
                let exists = unsafe { libc::kill(pid, 0) == 0 };
                if !exists {
                    info!("SingletonLock is stale: PID {} no longer exists", pid);
                    return true;
                }
                debug!("SingletonLock is active: PID {} is running", pid);
                return false;
            }
            warn!("Could not parse PID from SingletonLock target: {}", target_str);
            false
        }
        Err(e) => {
            debug!("Could not read SingletonLock as symlink: {}", e);
            // A regular file where a symlink belongs is leftover debris
            lock_path.is_file()
        }
    }
}

/// Non-Unix fallback: Chrome uses a lockfile the OS releases on exit
#[cfg(not(unix))]
pub fn is_singleton_lock_stale(_profile_dir: &Path) -> bool {
    true
}

/// Remove the SingletonLock file from a profile directory
///
/// Only call this after `is_singleton_lock_stale()` returns true.
pub fn cleanup_stale_lock(profile_dir: &Path) -> Result<()> {
    let lock_path = profile_dir.join("SingletonLock");

    if has_singleton_lock(profile_dir) {
        info!("Removing stale SingletonLock: {}", lock_path.display());
        std::fs::remove_file(&lock_path)
            .with_context(|| format!("Failed to remove SingletonLock: {}", lock_path.display()))?;
    }

    Ok(())
}
