// Boot-time registration
//
// `blinkipd install` adds an `@reboot` entry for this executable to root's
// crontab. Running it again is a no-op reported as `AlreadyInstalled`.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::{debug, info};

/// Installation failures
#[derive(Debug, Error)]
pub enum InstallError {
    /// Not running as root
    #[error("Superuser privileges required to manipulate root's crontab")]
    NotPrivileged,

    /// An entry for this program already exists
    #[error("{0} is already on the crontab of root")]
    AlreadyInstalled(String),

    /// The `crontab` command failed
    #[error("crontab failed: {0}")]
    Crontab(String),

    /// Spawning `crontab` or locating the executable failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Register the running executable to start at every boot
///
/// Returns the command line that was added.
///
/// Privilege is not checked up front: `crontab -u root` refuses non-root
/// callers and that refusal is reported as [`InstallError::NotPrivileged`].
pub fn install() -> Result<String, InstallError> {
    let exe = std::env::current_exe()?.canonicalize()?;
    let name = program_name(&exe)?;

    let existing = read_root_crontab()?;
    let (updated, command) = add_reboot_entry(&existing, &name, &exe)?;
    write_root_crontab(&updated)?;

    info!("{} added to crontab of user root", name);
    Ok(command)
}

/// Append an `@reboot` line for `command` unless `name` is already present
///
/// Comment and blank lines are ignored when looking for an existing entry.
pub fn add_reboot_entry(
    existing: &str,
    name: &str,
    command: &Path,
) -> Result<(String, String), InstallError> {
    let already = existing
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .any(|line| line.contains(name));
    if already {
        return Err(InstallError::AlreadyInstalled(name.to_string()));
    }

    let entry = format!("@reboot {}", command.display());
    let mut updated = existing.to_string();
    if !updated.is_empty() && !updated.ends_with('\n') {
        updated.push('\n');
    }
    updated.push_str(&entry);
    updated.push('\n');

    Ok((updated, entry))
}

fn program_name(exe: &Path) -> Result<String, InstallError> {
    exe.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            InstallError::Crontab(format!("cannot name executable {}", exe.display()))
        })
}

/// Map a failed `crontab` invocation to an install error
fn crontab_failure(stderr: &str) -> InstallError {
    let lower = stderr.to_lowercase();
    if lower.contains("must be privileged")
        || lower.contains("permission denied")
        || lower.contains("not allowed")
    {
        return InstallError::NotPrivileged;
    }
    InstallError::Crontab(stderr.trim().to_string())
}

fn read_root_crontab() -> Result<String, InstallError> {
    let output = Command::new("crontab").args(["-l", "-u", "root"]).output()?;
    if output.status.success() {
        return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    if stderr.to_lowercase().contains("no crontab") {
        debug!("root has no crontab yet");
        return Ok(String::new());
    }
    Err(crontab_failure(&stderr))
}

fn write_root_crontab(contents: &str) -> Result<(), InstallError> {
    let mut child = Command::new("crontab")
        .args(["-u", "root", "-"])
        .stdin(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    child
        .stdin
        .take()
        .ok_or_else(|| InstallError::Crontab("stdin not captured".to_string()))?
        .write_all(contents.as_bytes())?;

    let output = child.wait_with_output()?;
    if !output.status.success() {
        return Err(crontab_failure(&String::from_utf8_lossy(&output.stderr)));
    }
    Ok(())
}
