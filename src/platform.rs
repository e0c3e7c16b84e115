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

//! Per-platform path conventions.
//!
//! One [`Platform`] implementation per target OS, selected once at startup,
//! so that the rest of the application never branches on the operating
//! system.

use std::path::{Path, PathBuf};

pub(crate) trait Platform {
    /// Candidate Steam installation roots, in probe order.
    fn install_root_candidates(&self) -> Vec<PathBuf>;

    /// File name of the game executable inside the game directory.
    fn executable_name(&self) -> &'static str;

    /// Command used to invoke the Steam client.
    fn steam_command(&self, install_root: &Path) -> PathBuf;

    /// Directory holding saved games, when it can be determined.
    fn saves_path(&self, game_dir: &Path, user_id: Option<u64>) -> Option<PathBuf>;
}

/// Selects the implementation for the running operating system.
pub(crate) fn current() -> Box<dyn Platform> {
    if cfg!(windows) {
        Box::new(Windows)
    } else {
        Box::new(Linux)
    }
}

pub(crate) struct Linux;

/// Home-relative installation roots, in probe order: the classic dotfile
/// location, the XDG data location, then the snap sandbox.
const LINUX_ROOT_CANDIDATES: [&str; 3] =
    [".steam", ".local/share/Steam/steam", "snap/steam/common/.steam"];

impl Platform for Linux {
    fn install_root_candidates(&self) -> Vec<PathBuf> {
        let Some(home) = dirs::home_dir() else {
            return Vec::new();
        };
        LINUX_ROOT_CANDIDATES.iter().map(|c| home.join(c)).collect()
    }

    fn executable_name(&self) -> &'static str {
        "metro"
    }

    fn steam_command(&self, _install_root: &Path) -> PathBuf {
        // The client is on PATH on every mainstream distribution
        PathBuf::from("steam")
    }

    fn saves_path(&self, game_dir: &Path, user_id: Option<u64>) -> Option<PathBuf> {
        // The game keeps saves under the install directory, in a folder named
        // after the Steam user id in lower-case hex
        user_id.map(|id| game_dir.join(format!("{id:x}")))
    }
}

pub(crate) struct Windows;

impl Platform for Windows {
    fn install_root_candidates(&self) -> Vec<PathBuf> {
        vec![PathBuf::from(r"c:\program files (x86)\steam")]
    }

    fn executable_name(&self) -> &'static str {
        "metro.exe"
    }

    fn steam_command(&self, install_root: &Path) -> PathBuf {
        install_root.join("Steam.exe")
    }

    fn saves_path(&self, _game_dir: &Path, _user_id: Option<u64>) -> Option<PathBuf> {
        dirs::document_dir().map(|documents| documents.join("4A Games").join("Metro 2033"))
    }
}
