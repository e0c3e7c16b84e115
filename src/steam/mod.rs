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

//! Steam installation and library discovery.
//!
//! Everything here is a pure function of its arguments and the filesystem:
//! probe a list of candidate directories for the installation root, then read
//! the `libraryfolders.vdf` and `loginusers.vdf` descriptors under it to find
//! where a given app is installed and which user is logged in. The
//! descriptors are read-only and re-read on every call.

pub(crate) mod vdf;

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::steam::vdf::Value;

/// Steam app id of Metro 2033 Redux.
pub(crate) const METRO_2033_REDUX_APP_ID: u32 = 286690;

/// Location of the game files relative to a Steam library folder.
pub(crate) const GAME_INSTALL_SUBDIR: &str = "steamapps/common/Metro 2033 Redux";

const LIBRARY_FOLDERS_PATH: &str = "steam/config/libraryfolders.vdf";
const LOGIN_USERS_PATH: &str = "steam/config/loginusers.vdf";

/// Non-library bookkeeping entry that some installations (Steam on Debian)
/// write into `libraryfolders.vdf` alongside the real sections.
const CONTENT_STATS_SENTINEL: &str = "contentstatsid";

#[derive(Debug, Error)]
pub(crate) enum SteamError {
    #[error("Steam installation not found")]
    InstallNotFound,

    #[error("Steam library descriptor not found at {0}")]
    LibraryDescriptorMissing(PathBuf),

    #[error("app {0} is not installed in any Steam library")]
    AppNotFound(u32),

    #[error("malformed descriptor {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },

    #[error("failed to parse {path}: {source}")]
    Vdf {
        path: PathBuf,
        #[source]
        source: vdf::ParseError,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Probes the candidate directories in order and returns the first that
/// exists on disk.
///
/// # Errors
///
/// Returns [`SteamError::InstallNotFound`] when none of the candidates exist.
/// This is terminal for the application; there is nothing to edit without a
/// Steam installation.
pub(crate) fn find_install_root(candidates: &[PathBuf]) -> Result<PathBuf, SteamError> {
    for candidate in candidates {
        debug!("checking for {}...", candidate.display());
        if candidate.exists() {
            return Ok(candidate.clone());
        }
    }
    Err(SteamError::InstallNotFound)
}

/// Reads a descriptor file, distinguishing "absent" from "unreadable".
fn read_descriptor(path: &Path) -> Result<Option<vdf::Obj>, SteamError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(SteamError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    vdf::parse(&text).map(Some).map_err(|source| SteamError::Vdf {
        path: path.to_path_buf(),
        source,
    })
}

/// Finds the Steam library folder that has `app_id` installed.
///
/// Sections of the descriptor are scanned in stored order and the first one
/// whose `apps` map registers the id wins; the `contentstatsid` bookkeeping
/// entry is skipped even when it structurally resembles a section.
///
/// # Errors
///
/// Returns [`SteamError::LibraryDescriptorMissing`] when the descriptor file
/// does not exist and [`SteamError::AppNotFound`] when no section registers
/// the id. Both are recoverable; the caller can fall back to a manually
/// entered path.
pub(crate) fn game_library_path(root: &Path, app_id: u32) -> Result<PathBuf, SteamError> {
    let descriptor_path = root.join(LIBRARY_FOLDERS_PATH);
    let Some(descriptor) = read_descriptor(&descriptor_path)? else {
        return Err(SteamError::LibraryDescriptorMissing(descriptor_path));
    };

    let folders = descriptor
        .get("libraryfolders")
        .and_then(Value::as_obj)
        .ok_or_else(|| SteamError::Malformed {
            path: descriptor_path.clone(),
            reason: "missing libraryfolders section".to_string(),
        })?;

    let app_key = app_id.to_string();
    for (name, section) in folders.iter() {
        if name == CONTENT_STATS_SENTINEL {
            continue;
        }
        let Some(section) = section.as_obj() else {
            continue;
        };

        let registered = section
            .get("apps")
            .and_then(Value::as_obj)
            .is_some_and(|apps| apps.get(&app_key).is_some());
        if !registered {
            continue;
        }

        let path = section
            .get("path")
            .and_then(Value::as_str)
            .ok_or_else(|| SteamError::Malformed {
                path: descriptor_path.clone(),
                reason: format!("library section {name:?} has no path"),
            })?;
        debug!("Found app {app_id} in {path}.");
        return Ok(PathBuf::from(path));
    }

    Err(SteamError::AppNotFound(app_id))
}

/// Returns the id of the first registered login user, or `None` when no user
/// descriptor exists.
///
/// Absence is a legitimate state (a fresh installation), not an error, and is
/// never collapsed to a zero id.
pub(crate) fn first_login_user(root: &Path) -> Result<Option<u64>, SteamError> {
    let descriptor_path = root.join(LOGIN_USERS_PATH);
    let Some(descriptor) = read_descriptor(&descriptor_path)? else {
        return Ok(None);
    };

    let users = descriptor
        .get("users")
        .and_then(Value::as_obj)
        .ok_or_else(|| SteamError::Malformed {
            path: descriptor_path.clone(),
            reason: "missing users section".to_string(),
        })?;

    match users.iter().next() {
        Some((id, _)) => id.parse::<u64>().map(Some).map_err(|_| SteamError::Malformed {
            path: descriptor_path,
            reason: format!("user id {id:?} is not numeric"),
        }),
        None => Ok(None),
    }
}
