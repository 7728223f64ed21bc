//! Player process launching
//!
//! Each platform starts the player differently. Windows hands the player to
//! the shell. Other hosts run native binaries directly, and run Windows
//! executables through a compatibility layer such as wine. All of them sit
//! behind [`Launch`] so the caller only sees "start player with composition,
//! get an exit status back".

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use tracing::info;

use crate::error::{FAILURE_EXIT, LaunchError};

/// Compatibility layer used when none is configured
pub const DEFAULT_COMPAT_LAYER: &str = "/opt/wine-staging/bin/wine";

/// Start the player with a single composition argument and wait for it
pub trait Launch {
    /// Short name for logging
    fn name(&self) -> &'static str;

    /// Run the player and return the status the launcher should exit with
    fn launch(&self, player: &Path, composition: &str) -> Result<u8, LaunchError>;
}

/// Executes the player binary itself, without a shell
#[derive(Debug, Default)]
pub struct DirectLauncher;

impl Launch for DirectLauncher {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn launch(&self, player: &Path, composition: &str) -> Result<u8, LaunchError> {
        run(Command::new(player).arg(composition), player)
    }
}

/// Runs the player through a compatibility layer (`<program> <player> <composition>`)
#[derive(Debug)]
pub struct CompatLauncher {
    program: PathBuf,
}

impl CompatLauncher {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for CompatLauncher {
    fn default() -> Self {
        Self::new(DEFAULT_COMPAT_LAYER)
    }
}

impl Launch for CompatLauncher {
    fn name(&self) -> &'static str {
        "compat"
    }

    fn launch(&self, player: &Path, composition: &str) -> Result<u8, LaunchError> {
        run(
            Command::new(&self.program).arg(player).arg(composition),
            &self.program,
        )
    }
}

/// Opens the player through the Windows shell (`ShellExecuteW`).
///
/// The shell does not hand back a process to wait on, so success is 0.
#[cfg(windows)]
#[derive(Debug, Default)]
pub struct ShellOpenLauncher;

#[cfg(windows)]
impl Launch for ShellOpenLauncher {
    fn name(&self) -> &'static str {
        "shell-open"
    }

    fn launch(&self, player: &Path, composition: &str) -> Result<u8, LaunchError> {
        use windows::Win32::Foundation::HWND;
        use windows::Win32::UI::Shell::ShellExecuteW;
        use windows::Win32::UI::WindowsAndMessaging::SW_SHOWNORMAL;
        use windows::core::{HSTRING, PCWSTR};

        let result = unsafe {
            ShellExecuteW(
                HWND::default(),
                &HSTRING::from("open"),
                &HSTRING::from(player.as_os_str()),
                &HSTRING::from(composition),
                PCWSTR::null(),
                SW_SHOWNORMAL,
            )
        };

        // Values above 32 are instance handles, anything else is an error code
        let code = result.0 as isize;
        if code <= 32 {
            let message = windows::core::Error::from_win32().message().to_string();
            return Err(LaunchError::ShellOpen {
                player: player.to_path_buf(),
                code,
                message,
            });
        }

        info!(player = %player.display(), "Opened player through the shell");
        Ok(0)
    }
}

/// Whether a player path names a Windows executable
pub fn is_windows_executable(player: &Path) -> bool {
    player
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("exe"))
}

/// Pick the launcher for this host and player
#[cfg(windows)]
pub fn launcher_for(_player: &Path, _compat_layer: &Path) -> Box<dyn Launch> {
    Box::new(ShellOpenLauncher)
}

/// Pick the launcher for this host and player
#[cfg(not(windows))]
pub fn launcher_for(player: &Path, compat_layer: &Path) -> Box<dyn Launch> {
    if is_windows_executable(player) {
        Box::new(CompatLauncher::new(compat_layer))
    } else {
        Box::new(DirectLauncher)
    }
}

fn run(command: &mut Command, program: &Path) -> Result<u8, LaunchError> {
    let spawn_error = |source| LaunchError::Spawn {
        program: program.to_path_buf(),
        source,
    };

    let mut child = command.spawn().map_err(spawn_error)?;
    info!(pid = child.id(), program = %program.display(), "Process created");

    // wait() retries on EINTR until the child has actually exited
    let status = child.wait().map_err(spawn_error)?;
    let code = exit_code(status);
    info!(code, "Process exited");
    Ok(code)
}

/// Map a child's exit status onto a launcher exit code
fn exit_code(status: ExitStatus) -> u8 {
    if let Some(code) = status.code() {
        return u8::try_from(code).unwrap_or(FAILURE_EXIT);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return u8::try_from(128 + signal).unwrap_or(FAILURE_EXIT);
        }
    }

    FAILURE_EXIT
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    /// Write an executable script that records its arguments to `<name>.args`
    fn fake_program(dir: &Path, name: &str, body: &str) -> PathBuf {
        let out = dir.join(format!("{name}.args"));
        let path = dir.join(name);
        let script = format!(
            "#!/bin/sh\nprintf '%s\\n' \"$@\" > \"{}\"\n{body}\n",
            out.display()
        );
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn recorded_args(dir: &Path, name: &str) -> Vec<String> {
        fs::read_to_string(dir.join(format!("{name}.args")))
            .unwrap()
            .lines()
            .map(String::from)
            .collect()
    }

    #[test]
    fn direct_passes_single_argument_and_forwards_status() {
        let dir = tempfile::tempdir().unwrap();
        let player = fake_program(dir.path(), "fakeplayer", "exit 7");

        let code = DirectLauncher
            .launch(&player, "/home/user/game.comp#web_auth_token=s1%3As2%3As3")
            .unwrap();

        assert_eq!(code, 7);
        assert_eq!(
            recorded_args(dir.path(), "fakeplayer"),
            vec!["/home/user/game.comp#web_auth_token=s1%3As2%3As3"]
        );
    }

    #[test]
    fn compat_layer_receives_player_then_composition() {
        let dir = tempfile::tempdir().unwrap();
        let wine = fake_program(dir.path(), "wine", "exit 0");
        let player = dir.path().join("Spark.exe");

        let code = CompatLauncher::new(&wine)
            .launch(&player, "game.comp")
            .unwrap();

        assert_eq!(code, 0);
        assert_eq!(
            recorded_args(dir.path(), "wine"),
            vec![player.display().to_string(), "game.comp".to_string()]
        );
    }

    #[test]
    fn signal_maps_to_128_plus_signal() {
        let dir = tempfile::tempdir().unwrap();
        let player = fake_program(dir.path(), "crasher", "kill -9 $$");
        assert_eq!(DirectLauncher.launch(&player, "x").unwrap(), 137);
    }

    #[test]
    fn missing_player_is_a_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DirectLauncher
            .launch(&dir.path().join("nope"), "x")
            .unwrap_err();
        assert!(matches!(err, LaunchError::Spawn { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn exe_players_go_through_compat_layer() {
        let wine = Path::new(DEFAULT_COMPAT_LAYER);
        assert_eq!(launcher_for(Path::new("/opt/game/Spark.exe"), wine).name(), "compat");
        assert_eq!(launcher_for(Path::new("/opt/game/SPARK.EXE"), wine).name(), "compat");
        assert_eq!(launcher_for(Path::new("/usr/bin/fakeplayer"), wine).name(), "direct");
    }
}
