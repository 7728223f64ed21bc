mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use config::Config;
use libtaw::error::FAILURE_EXIT;
use libtaw::{Invocation, LaunchError, composition, launcher_for, paths};

/// taw-launcher - start the game client from a taw:// link
#[derive(Parser)]
#[command(
    name = "taw-launcher",
    version,
    about,
    arg_required_else_help = true,
    args_override_self = true
)]
struct Cli {
    /// Player executable to launch (default: Spark.exe next to the launcher)
    #[arg(long, value_name = "PLAYER_EXE")]
    player: Option<PathBuf>,

    /// taw://<sessionName>:<sessionId>:<uid>:<composition> URL or a composition
    /// path/URL, optionally followed by extra arguments
    #[arg(value_name = "TAW_URL_OR_PATH", allow_hyphen_values = true)]
    targets: Vec<String>,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(FAILURE_EXIT);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("taw_launcher=info,libtaw=info")),
        )
        .init();

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

/// Resolve, finalize and launch; returns the player's exit status
fn run(cli: Cli) -> Result<u8, LaunchError> {
    let config = Config::load();
    debug!(?config, "Config loaded");

    let invocation = Invocation::build(cli.player.or(config.player), cli.targets)?;
    if !invocation.passthrough.is_empty() {
        // Extra arguments have never reached the player; keep it that way
        info!(args = ?invocation.passthrough, "Ignoring extra arguments");
    }

    let exe = std::env::args_os()
        .next()
        .map(PathBuf::from)
        .or_else(|| std::env::current_exe().ok())
        .unwrap_or_default();
    let cwd = std::env::current_dir().unwrap_or_else(|e| {
        warn!("Cannot read current directory: {e}");
        PathBuf::from(".")
    });
    let paths = paths::resolve(&exe, &cwd, invocation.player.as_deref());

    let final_composition = composition::finalize(
        invocation.composition.as_deref(),
        invocation.session.as_ref(),
    )?;

    if let Err(e) = paths::change_working_dir(&paths.working_dir) {
        warn!(dir = %paths.working_dir.display(), "Cannot change working directory: {e}");
    }

    info!(player = %paths.player.display(), "Player");
    info!(
        composition = invocation.composition.as_deref().unwrap_or_default(),
        session = invocation.session.is_some(),
        "Composition"
    );

    let launcher = launcher_for(&paths.player, &config.compat_layer);
    debug!(launcher = launcher.name(), "Launching player");
    launcher.launch(&paths.player, &final_composition)
}
