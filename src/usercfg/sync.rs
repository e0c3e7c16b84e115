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

//! Two-way synchronization between config entries and form fields.
//!
//! [`apply`] pushes parsed entries into a [`FieldStore`] through the binding
//! table; [`collect`] is its inverse. Failures are scoped to the single
//! offending entry: the field keeps its prior value, the failure is returned
//! in the issue list, and the pass continues. Whether to ignore, report or
//! act on the issues is the caller's call.

use thiserror::Error;
use tracing::debug;

use crate::usercfg::ConfigEntries;
use crate::usercfg::fields::{FieldBinding, FieldKind, FieldStore, FieldValue, Vocabulary};

#[derive(Debug, Error, PartialEq)]
pub(crate) enum SyncError {
    #[error("{value:?} is not a valid {expected}")]
    MalformedValue {
        value: String,
        expected: &'static str,
    },

    #[error("{value:?} is not a {vocabulary:?} language")]
    UnknownChoice { value: String, vocabulary: Vocabulary },

    #[error("choice index {index} is out of range for the {vocabulary:?} languages")]
    ChoiceOutOfRange { index: usize, vocabulary: Vocabulary },

    #[error("field value does not match its declared kind")]
    KindMismatch,
}

/// A failure decoding or encoding a single entry.
#[derive(Debug)]
pub(crate) struct SyncIssue {
    pub(crate) key: &'static str,
    pub(crate) error: SyncError,
}

/// Decodes a config value into the typed form dictated by the field kind.
pub(crate) fn decode(kind: FieldKind, value: &str) -> Result<FieldValue, SyncError> {
    match kind {
        FieldKind::Flag => Ok(FieldValue::Flag(value == "on" || value == "1")),
        FieldKind::Text => Ok(FieldValue::Text(value.to_string())),
        FieldKind::IndexChoice => value
            .parse::<usize>()
            .map(FieldValue::Choice)
            .map_err(|_| SyncError::MalformedValue {
                value: value.to_string(),
                expected: "choice index",
            }),
        FieldKind::VocabChoice(vocabulary) => vocabulary
            .words()
            .iter()
            .position(|word| *word == value)
            .map(FieldValue::Choice)
            .ok_or_else(|| SyncError::UnknownChoice {
                value: value.to_string(),
                vocabulary,
            }),
        FieldKind::Decimal => value
            .parse::<f64>()
            .map(FieldValue::Decimal)
            .map_err(|_| SyncError::MalformedValue {
                value: value.to_string(),
                expected: "decimal number",
            }),
    }
}

/// Encodes a typed field value back to its config text form.
pub(crate) fn encode(kind: FieldKind, value: &FieldValue) -> Result<String, SyncError> {
    match (kind, value) {
        (FieldKind::Flag, FieldValue::Flag(set)) => {
            Ok(if *set { "on" } else { "off" }.to_string())
        }
        (FieldKind::Text, FieldValue::Text(text)) => Ok(text.clone()),
        (FieldKind::IndexChoice, FieldValue::Choice(index)) => Ok(index.to_string()),
        (FieldKind::VocabChoice(vocabulary), FieldValue::Choice(index)) => vocabulary
            .words()
            .get(*index)
            .map(|word| (*word).to_string())
            .ok_or(SyncError::ChoiceOutOfRange {
                index: *index,
                vocabulary,
            }),
        (FieldKind::Decimal, FieldValue::Decimal(number)) => Ok(number.to_string()),
        _ => Err(SyncError::KindMismatch),
    }
}

/// Applies entries to the bound fields, one pass, collecting per-entry
/// failures. Entries with no matching binding are ignored.
pub(crate) fn apply(
    entries: &ConfigEntries,
    bindings: &[FieldBinding],
    store: &mut dyn FieldStore,
) -> Vec<SyncIssue> {
    let mut issues = Vec::new();

    for binding in bindings {
        let Some(value) = entries.get(binding.key) else {
            continue;
        };
        match decode(binding.kind, value) {
            Ok(decoded) => store.set(binding.field, decoded),
            Err(error) => {
                debug!("skipping {}: {error}", binding.key);
                issues.push(SyncIssue {
                    key: binding.key,
                    error,
                });
            }
        }
    }

    issues
}

/// The inverse of [`apply`]: encodes every bound field back into entries.
/// Fields the store does not hold are left out.
pub(crate) fn collect(
    bindings: &[FieldBinding],
    store: &dyn FieldStore,
) -> (ConfigEntries, Vec<SyncIssue>) {
    let mut entries = ConfigEntries::new();
    let mut issues = Vec::new();

    for binding in bindings {
        let Some(value) = store.get(binding.field) else {
            continue;
        };
        match encode(binding.kind, &value) {
            Ok(text) => {
                entries.insert(binding.key.to_string(), text);
            }
            Err(error) => issues.push(SyncIssue {
                key: binding.key,
                error,
            }),
        }
    }

    (entries, issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usercfg;
    use crate::usercfg::fields::{BINDINGS, FormState};

    fn entries(text: &str) -> ConfigEntries {
        usercfg::parse(text)
    }

    #[test]
    fn flag_truth_table() {
        assert_eq!(decode(FieldKind::Flag, "on"), Ok(FieldValue::Flag(true)));
        assert_eq!(decode(FieldKind::Flag, "1"), Ok(FieldValue::Flag(true)));
        assert_eq!(decode(FieldKind::Flag, "off"), Ok(FieldValue::Flag(false)));
        assert_eq!(decode(FieldKind::Flag, "yes"), Ok(FieldValue::Flag(false)));
        // A bare flag key carries an empty value and reads as false
        assert_eq!(decode(FieldKind::Flag, ""), Ok(FieldValue::Flag(false)));
    }

    #[test]
    fn index_choice_selects_the_numeric_index() {
        let mut form = FormState::with_defaults(BINDINGS);
        let issues = apply(&entries("r_quality_level 2"), BINDINGS, &mut form);
        assert!(issues.is_empty());
        assert_eq!(
            form.get("comboBox_r_quality_level"),
            Some(FieldValue::Choice(2))
        );
    }

    #[test]
    fn malformed_index_is_reported_and_leaves_the_field_untouched() {
        let mut form = FormState::with_defaults(BINDINGS);
        form.set("comboBox_r_quality_level", FieldValue::Choice(3));

        let issues = apply(&entries("r_quality_level high"), BINDINGS, &mut form);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].key, "r_quality_level");
        assert!(matches!(issues[0].error, SyncError::MalformedValue { .. }));
        assert_eq!(
            form.get("comboBox_r_quality_level"),
            Some(FieldValue::Choice(3))
        );
    }

    #[test]
    fn vocabulary_lookup_is_positional() {
        assert_eq!(
            decode(FieldKind::VocabChoice(Vocabulary::Voice), "ru"),
            Ok(FieldValue::Choice(1))
        );
        // "po" is text-only: index 7 there, unknown to the voice list
        assert_eq!(
            decode(FieldKind::VocabChoice(Vocabulary::Text), "po"),
            Ok(FieldValue::Choice(7))
        );
        assert_eq!(
            decode(FieldKind::VocabChoice(Vocabulary::Voice), "po"),
            Err(SyncError::UnknownChoice {
                value: "po".to_string(),
                vocabulary: Vocabulary::Voice,
            })
        );
    }

    #[test]
    fn one_bad_entry_does_not_abort_the_pass() {
        let mut form = FormState::with_defaults(BINDINGS);
        let issues = apply(
            &entries("lang_voice po\ng_god on\nmouse_sens 0.5"),
            BINDINGS,
            &mut form,
        );

        assert_eq!(issues.len(), 1);
        assert_eq!(form.get("checkBox_g_god"), Some(FieldValue::Flag(true)));
        assert_eq!(
            form.get("doubleSpinBox_mouse_sens"),
            Some(FieldValue::Decimal(0.5))
        );
        // The failing entry leaves its field at the default
        assert_eq!(form.get("comboBox_lang_voice"), Some(FieldValue::Choice(0)));
    }

    #[test]
    fn entries_without_a_binding_are_ignored() {
        let mut form = FormState::with_defaults(BINDINGS);
        let issues = apply(&entries("some_modded_key 42"), BINDINGS, &mut form);
        assert!(issues.is_empty());
    }

    #[test]
    fn collect_reports_out_of_range_vocabulary_index() {
        let mut form = FormState::with_defaults(BINDINGS);
        form.set("comboBox_lang_voice", FieldValue::Choice(42));

        let (collected, issues) = collect(BINDINGS, &form);
        assert!(!collected.contains_key("lang_voice"));
        assert_eq!(issues.len(), 1);
        assert!(matches!(
            issues[0].error,
            SyncError::ChoiceOutOfRange { index: 42, .. }
        ));
    }

    #[test]
    fn round_trip_reproduces_every_field_kind() {
        let mut form = FormState::with_defaults(BINDINGS);
        form.set("checkBox_g_god", FieldValue::Flag(true));
        form.set("checkBox_r_vsync", FieldValue::Flag(false));
        form.set("lineEdit_r_res_hor", FieldValue::Text("1920".to_string()));
        form.set("comboBox_g_game_difficulty", FieldValue::Choice(3));
        form.set("comboBox_lang_voice", FieldValue::Choice(1));
        form.set("comboBox_lang_text", FieldValue::Choice(7));
        form.set("doubleSpinBox_mouse_sens", FieldValue::Decimal(0.25));

        let (collected, issues) = collect(BINDINGS, &form);
        assert!(issues.is_empty());

        let text = usercfg::render(&collected);
        let mut fresh = FormState::with_defaults(BINDINGS);
        let issues = apply(&usercfg::parse(&text), BINDINGS, &mut fresh);
        assert!(issues.is_empty());

        for binding in BINDINGS {
            assert_eq!(fresh.get(binding.field), form.get(binding.field));
        }
    }
}
