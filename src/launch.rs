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

//! External process actions: starting the game and opening folders.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};
use tracing::debug;

use crate::platform::Platform;

/// Builds the Steam run URL for an app id.
pub(crate) fn run_url(app_id: u32) -> String {
    format!("steam://rungameid/{app_id}")
}

/// Asks the Steam client to start the game.
pub(crate) fn via_steam(platform: &dyn Platform, install_root: &Path, app_id: u32) -> Result<()> {
    let command = platform.steam_command(install_root);
    let url = run_url(app_id);
    debug!("Running {} {url}", command.display());
    Command::new(&command)
        .arg(url)
        .spawn()
        .with_context(|| format!("Failed to start {}", command.display()))?;
    Ok(())
}

/// Runs the game executable directly, waiting for it to finish and logging
/// its captured output streams.
pub(crate) fn direct(executable: &Path) -> Result<()> {
    let output = Command::new(executable)
        .output()
        .with_context(|| format!("Failed to start {}", executable.display()))?;
    debug!("{}", String::from_utf8_lossy(&output.stdout));
    debug!("{}", String::from_utf8_lossy(&output.stderr));
    if !output.status.success() {
        bail!("{} exited with {}", executable.display(), output.status);
    }
    Ok(())
}

/// Opens a directory in the system file manager.
pub(crate) fn open_folder(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("{} does not exist", path.display());
    }
    let opener = if cfg!(windows) { "explorer" } else { "xdg-open" };
    Command::new(opener)
        .arg(path)
        .spawn()
        .with_context(|| format!("Failed to run {opener}"))?;
    Ok(())
}
