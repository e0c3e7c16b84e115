// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # Metro 2033 Redux config editor.
//!
//! Edits the game's flat `user.cfg` key/value file and launches the game.
//!
//! On startup the Steam installation is located by probing a small set of
//! per-platform candidate directories, the game and saves directories are
//! discovered from Steam's descriptor files, and the config file is read and
//! applied to a typed field schema. The frontend here is a CLI; the sync and
//! discovery modules are frontend-agnostic and would back a graphical form
//! the same way.
//!
//! A missing Steam installation ends the program with a diagnostic; every
//! later discovery step degrades instead, leaving the affected paths unset.

mod launch;
mod platform;
mod steam;
mod usercfg;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::platform::Platform;
use crate::steam::METRO_2033_REDUX_APP_ID;
use crate::usercfg::ConfigEntries;
use crate::usercfg::fields::{self, BINDINGS, FieldStore, FormState};
use crate::usercfg::sync::{self, SyncIssue};

#[derive(Debug, Parser)]
#[command(name = "mce", version, about = "Metro 2033 Redux configuration editor")]
struct Cli {
    /// Read and write the config in this directory instead of the discovered
    /// game directory.
    #[arg(long, global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Option<Action>,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// Print every form field with its current value (the default action).
    Show,
    /// Print the discovered Steam and game paths.
    Paths,
    /// Print the raw value of a single config key.
    Get { key: String },
    /// Change a single config value and rewrite user.cfg.
    Set { key: String, value: String },
    /// Start the game through Steam, or directly with --direct.
    Launch {
        /// Run the game executable instead of going through Steam.
        #[arg(long)]
        direct: bool,
    },
    /// Open the saved-games folder in the system file manager.
    Saves,
}

/// Paths resolved once at startup.
struct Session {
    platform: Box<dyn Platform>,
    install_root: PathBuf,
    game_dir: Option<PathBuf>,
    config_dir: Option<PathBuf>,
    saves_dir: Option<PathBuf>,
    user_id: Option<u64>,
}

impl Session {
    /// Resolves every path the editor works with.
    ///
    /// # Errors
    ///
    /// Fails only when no Steam installation exists; library and user
    /// descriptor problems are logged and leave the corresponding paths
    /// unset.
    fn discover(platform: Box<dyn Platform>, config_override: Option<PathBuf>) -> Result<Self> {
        let install_root = steam::find_install_root(&platform.install_root_candidates())
            .context("Steam installation not found, exiting")?;

        let game_dir = match steam::game_library_path(&install_root, METRO_2033_REDUX_APP_ID) {
            Ok(library) => Some(library.join(steam::GAME_INSTALL_SUBDIR)),
            Err(e) => {
                warn!("Game directory not found: {e}");
                None
            }
        };

        let user_id = match steam::first_login_user(&install_root) {
            Ok(id) => id,
            Err(e) => {
                warn!("Could not read login users: {e}");
                None
            }
        };

        let config_dir = config_override.or_else(|| game_dir.clone());
        let saves_dir = game_dir
            .as_deref()
            .and_then(|dir| platform.saves_path(dir, user_id));

        Ok(Self {
            platform,
            install_root,
            game_dir,
            config_dir,
            saves_dir,
            user_id,
        })
    }

    /// Reads the config from the session's config directory; an unknown
    /// directory yields an empty map.
    fn read_config(&self) -> Result<ConfigEntries> {
        match &self.config_dir {
            Some(dir) => usercfg::read(dir)
                .with_context(|| format!("Failed to read config in {}", dir.display())),
            None => {
                warn!("No config directory known, starting from an empty config");
                Ok(ConfigEntries::new())
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let session = Session::discover(platform::current(), cli.config_dir)?;

    match cli.action.unwrap_or(Action::Show) {
        Action::Show => show(&session),
        Action::Paths => paths(&session),
        Action::Get { key } => get(&session, &key),
        Action::Set { key, value } => set(&session, &key, &value),
        Action::Launch { direct } => launch_game(&session, direct),
        Action::Saves => {
            let Some(saves_dir) = &session.saves_dir else {
                bail!("No saved-games folder known");
            };
            launch::open_folder(saves_dir)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "mce=debug" } else { "mce=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();
}

fn warn_issues(issues: &[SyncIssue]) {
    for issue in issues {
        warn!("{}: {}", issue.key, issue.error);
    }
}

/// Applies the config to a fresh form and prints every field.
fn show(session: &Session) -> Result<()> {
    let entries = session.read_config()?;

    let mut form = FormState::with_defaults(BINDINGS);
    debug!(
        "Applying {} entries to schema v{}",
        entries.len(),
        fields::SCHEMA_VERSION
    );
    warn_issues(&sync::apply(&entries, BINDINGS, &mut form));

    for binding in BINDINGS {
        let Some(value) = form.get(binding.field) else {
            continue;
        };
        // encode cannot fail here; apply never stores an out-of-range choice
        let text = sync::encode(binding.kind, &value).unwrap_or_default();
        println!("{:<20} {text}", binding.key);
    }
    Ok(())
}

fn paths(session: &Session) -> Result<()> {
    let display = |path: &Option<PathBuf>| match path {
        Some(path) => path.display().to_string(),
        None => "(not found)".to_string(),
    };
    println!("Steam installation   {}", session.install_root.display());
    println!("Game directory       {}", display(&session.game_dir));
    println!("Config directory     {}", display(&session.config_dir));
    println!("Saved games          {}", display(&session.saves_dir));
    match session.user_id {
        Some(id) => println!("Steam user id        {id}"),
        None => println!("Steam user id        (not logged in)"),
    }
    Ok(())
}

fn get(session: &Session, key: &str) -> Result<()> {
    let entries = session.read_config()?;
    match entries.get(key) {
        Some(value) => {
            println!("{value}");
            Ok(())
        }
        None => bail!("{key} is not set"),
    }
}

/// Validates the value against the key's binding, then rewrites the config
/// with the collected field values merged over the existing entries, so keys
/// outside the schema survive the rewrite.
fn set(session: &Session, key: &str, value: &str) -> Result<()> {
    let Some(config_dir) = &session.config_dir else {
        bail!("No config directory known, pass --config-dir");
    };
    let Some(binding) = fields::binding_for_key(key) else {
        bail!("{key} is not a known config key");
    };
    let decoded = sync::decode(binding.kind, value)
        .with_context(|| format!("Invalid value for {key}"))?;

    let mut entries = session.read_config()?;
    let mut form = FormState::with_defaults(BINDINGS);
    warn_issues(&sync::apply(&entries, BINDINGS, &mut form));
    form.set(binding.field, decoded);

    let (collected, issues) = sync::collect(BINDINGS, &form);
    warn_issues(&issues);
    entries.extend(collected);

    usercfg::write(config_dir, &entries)
        .with_context(|| format!("Failed to write config in {}", config_dir.display()))
}

fn launch_game(session: &Session, direct: bool) -> Result<()> {
    if !direct {
        return launch::via_steam(
            session.platform.as_ref(),
            &session.install_root,
            METRO_2033_REDUX_APP_ID,
        );
    }

    let Some(game_dir) = &session.game_dir else {
        bail!("Game directory not found");
    };
    launch::direct(&game_dir.join(session.platform.executable_name()))
}
