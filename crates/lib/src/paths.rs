use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

/// Player executable expected next to the launcher
pub const DEFAULT_PLAYER: &str = "Spark.exe";

/// Locations derived from the launcher's own invocation path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// Directory the launcher was started from
    pub launcher_dir: PathBuf,
    /// Executable to launch
    pub player: PathBuf,
    /// Directory the player is started in
    pub working_dir: PathBuf,
}

/// Whether an invocation path is absolute.
///
/// `/...` on Unix; `C:\...` or `\...` on Windows.
pub fn is_absolute(path: &Path) -> bool {
    path.has_root()
}

/// Path minus its final component, or `.` when there is no separator
pub fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Directory containing the launcher, given how it was invoked
pub fn launcher_dir(invocation: &Path, cwd: &Path) -> PathBuf {
    if is_absolute(invocation) {
        parent_dir(invocation)
    } else {
        cwd.join(parent_dir(invocation))
    }
}

/// Resolve the player executable and its working directory.
///
/// A relative player override is taken relative to `cwd`, since the working
/// directory changes before the player is started.
pub fn resolve(invocation: &Path, cwd: &Path, player: Option<&Path>) -> ResolvedPaths {
    let launcher_dir = launcher_dir(invocation, cwd);
    let player = match player {
        Some(player) if is_absolute(player) => player.to_path_buf(),
        Some(player) => cwd.join(player),
        None => launcher_dir.join(DEFAULT_PLAYER),
    };
    let working_dir = parent_dir(&player);

    ResolvedPaths {
        launcher_dir,
        player,
        working_dir,
    }
}

/// Change the process working directory
pub fn change_working_dir(dir: &Path) -> io::Result<()> {
    info!(dir = %dir.display(), "Setting working directory");
    std::env::set_current_dir(dir)
}
