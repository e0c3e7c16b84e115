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

//! The game's flat `user.cfg` configuration file.
//!
//! One directive per line: `<key> <value>`, or a bare `<key>` standing for a
//! flag with an empty value. No comments, quoting or escaping. The file is
//! re-read in full on every use and never cached; a missing file is a valid
//! unconfigured state, not an error.

pub(crate) mod fields;
pub(crate) mod sync;

use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use tracing::{debug, warn};

pub(crate) const CONFIG_FILE_NAME: &str = "user.cfg";

/// Parsed config entries. Keys are unique; the spec leaves ordering
/// irrelevant, so a sorted map keeps rewrites deterministic.
pub(crate) type ConfigEntries = BTreeMap<String, String>;

/// Parses config text into entries.
///
/// Each line is trimmed and split on the first space; a line without a space
/// is a bare flag key with an empty value. Unknown keys are retained,
/// duplicate keys overwrite earlier ones (last line wins), and blank lines
/// are skipped.
pub(crate) fn parse(text: &str) -> ConfigEntries {
    let mut entries = ConfigEntries::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (key, value) = match line.split_once(' ') {
            Some((key, value)) => (key, value),
            None => (line, ""),
        };
        if value.starts_with(char::is_whitespace) {
            // More than one space after the key; kept verbatim, but the
            // original intent of such a line is anyone's guess
            warn!("ambiguous spacing after {key:?}, keeping value {value:?}");
        }
        debug!("{key}");
        entries.insert(key.to_string(), value.to_string());
    }

    entries
}

/// Reads and parses `user.cfg` from the given directory.
///
/// # Errors
///
/// A missing directory or file yields an empty map; any other I/O failure is
/// returned to the caller.
pub(crate) fn read(dir: &Path) -> io::Result<ConfigEntries> {
    let path = dir.join(CONFIG_FILE_NAME);
    match std::fs::read_to_string(&path) {
        Ok(text) => {
            let entries = parse(&text);
            debug!(
                "Finished. {} configuration options read from {}.",
                entries.len(),
                path.display()
            );
            Ok(entries)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(ConfigEntries::new()),
        Err(e) => Err(e),
    }
}

/// Renders entries back to the flat text format, one directive per line,
/// writing a bare key when the value is empty.
pub(crate) fn render(entries: &ConfigEntries) -> String {
    let mut out = String::new();
    for (key, value) in entries {
        out.push_str(key);
        if !value.is_empty() {
            out.push(' ');
            out.push_str(value);
        }
        out.push('\n');
    }
    out
}

/// Writes entries to `user.cfg` in the given directory.
pub(crate) fn write(dir: &Path, entries: &ConfigEntries) -> io::Result<()> {
    std::fs::write(dir.join(CONFIG_FILE_NAME), render(entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_token_line_parses_to_key_and_value() {
        let entries = parse("r_res_hor 1920\n");
        assert_eq!(entries.get("r_res_hor").map(String::as_str), Some("1920"));
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn single_token_line_parses_to_flag_with_empty_value() {
        let entries = parse("g_god\n");
        assert_eq!(entries.get("g_god").map(String::as_str), Some(""));
    }

    #[test]
    fn later_duplicate_wins() {
        let entries = parse("r_vsync off\nr_vsync on\n");
        assert_eq!(entries.get("r_vsync").map(String::as_str), Some("on"));
    }

    #[test]
    fn value_keeps_everything_after_first_space() {
        let entries = parse("_comment some note here\n");
        assert_eq!(
            entries.get("_comment").map(String::as_str),
            Some("some note here")
        );
    }

    #[test]
    fn blank_lines_are_skipped() {
        let entries = parse("\n\n   \ng_god on\n\n");
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn empty_text_parses_to_empty_map() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn missing_file_reads_as_empty_map() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(read(tmp.path()).unwrap().is_empty());
        assert!(read(&tmp.path().join("no-such-dir")).unwrap().is_empty());
    }

    #[test]
    fn write_then_read_preserves_entries() {
        let tmp = tempfile::tempdir().unwrap();
        let mut entries = ConfigEntries::new();
        entries.insert("g_god".to_string(), String::new());
        entries.insert("r_res_hor".to_string(), "1920".to_string());

        write(tmp.path(), &entries).unwrap();
        assert_eq!(read(tmp.path()).unwrap(), entries);
    }

    #[test]
    fn render_writes_bare_key_for_empty_value() {
        let mut entries = ConfigEntries::new();
        entries.insert("fast_wpn_change".to_string(), String::new());
        assert_eq!(render(&entries), "fast_wpn_change\n");
    }
}
