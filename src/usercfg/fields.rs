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

//! The options-form field schema.
//!
//! A single static table declares every config key the form knows about,
//! together with its decoding kind and the handle of the control that shows
//! it. The handle keeps the widget-prefix naming of the original form
//! (`checkBox_`, `lineEdit_`, `comboBox_`, `doubleSpinBox_`), but as an
//! explicit declaration instead of a runtime name-matching convention, so an
//! unmatched key is visible here rather than silently dropped.

use std::collections::HashMap;

/// Schema revision of [`BINDINGS`]; bump when fields are added or retyped.
pub(crate) const SCHEMA_VERSION: u32 = 1;

/// Voice-over languages shipped with the game, in menu order.
pub(crate) const VOICE_LANGUAGES: [&str; 6] = ["us", "ru", "de", "es", "fr", "it"];

/// Subtitle/menu languages: the voice languages plus text-only ones, in the
/// same order.
pub(crate) const TEXT_LANGUAGES: [&str; 9] =
    ["us", "ru", "de", "es", "fr", "it", "nl", "po", "cz"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Vocabulary {
    Voice,
    Text,
}

impl Vocabulary {
    pub(crate) fn words(self) -> &'static [&'static str] {
        match self {
            Vocabulary::Voice => &VOICE_LANGUAGES,
            Vocabulary::Text => &TEXT_LANGUAGES,
        }
    }
}

/// How a config value is decoded into (and encoded back out of) a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FieldKind {
    /// `on`/`1` is true, anything else false.
    Flag,
    /// Copied verbatim.
    Text,
    /// A base-10 integer used directly as the selected index.
    IndexChoice,
    /// A word looked up in a fixed language list; its position is the index.
    VocabChoice(Vocabulary),
    /// A floating-point number.
    Decimal,
}

impl FieldKind {
    /// The value a field holds before any config entry touches it.
    pub(crate) fn default_value(self) -> FieldValue {
        match self {
            FieldKind::Flag => FieldValue::Flag(false),
            FieldKind::Text => FieldValue::Text(String::new()),
            FieldKind::IndexChoice | FieldKind::VocabChoice(_) => FieldValue::Choice(0),
            FieldKind::Decimal => FieldValue::Decimal(0.0),
        }
    }
}

/// A typed value held by a form field.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum FieldValue {
    Flag(bool),
    Text(String),
    Choice(usize),
    Decimal(f64),
}

/// One row of the schema: a config key bound to a typed, named field.
#[derive(Debug)]
pub(crate) struct FieldBinding {
    /// Key as it appears in `user.cfg`.
    pub(crate) key: &'static str,
    /// Handle of the form control, widget prefix included.
    pub(crate) field: &'static str,
    pub(crate) kind: FieldKind,
}

/// The fixed schema of the options form.
pub(crate) const BINDINGS: &[FieldBinding] = &[
    FieldBinding { key: "g_god", field: "checkBox_g_god", kind: FieldKind::Flag },
    FieldBinding { key: "g_unlimitedammo", field: "checkBox_g_unlimitedammo", kind: FieldKind::Flag },
    FieldBinding { key: "g_quick_hints", field: "checkBox_g_quick_hints", kind: FieldKind::Flag },
    FieldBinding { key: "g_show_crosshair", field: "checkBox_g_show_crosshair", kind: FieldKind::Flag },
    FieldBinding { key: "g_subtitles", field: "checkBox_g_subtitles", kind: FieldKind::Flag },
    FieldBinding { key: "fast_wpn_change", field: "checkBox_fast_wpn_change", kind: FieldKind::Flag },
    FieldBinding { key: "invert_y_axis", field: "checkBox_invert_y_axis", kind: FieldKind::Flag },
    FieldBinding { key: "r_vsync", field: "checkBox_r_vsync", kind: FieldKind::Flag },
    FieldBinding { key: "r_res_hor", field: "lineEdit_r_res_hor", kind: FieldKind::Text },
    FieldBinding { key: "r_res_vert", field: "lineEdit_r_res_vert", kind: FieldKind::Text },
    FieldBinding { key: "g_game_difficulty", field: "comboBox_g_game_difficulty", kind: FieldKind::IndexChoice },
    FieldBinding { key: "vibration", field: "comboBox_vibration", kind: FieldKind::IndexChoice },
    FieldBinding { key: "r_msaa_level", field: "comboBox_r_msaa_level", kind: FieldKind::IndexChoice },
    FieldBinding { key: "r_quality_level", field: "comboBox_r_quality_level", kind: FieldKind::IndexChoice },
    FieldBinding { key: "lang_voice", field: "comboBox_lang_voice", kind: FieldKind::VocabChoice(Vocabulary::Voice) },
    FieldBinding { key: "lang_text", field: "comboBox_lang_text", kind: FieldKind::VocabChoice(Vocabulary::Text) },
    FieldBinding { key: "mouse_sens", field: "doubleSpinBox_mouse_sens", kind: FieldKind::Decimal },
    FieldBinding { key: "mouse_aim_sens", field: "doubleSpinBox_mouse_aim_sens", kind: FieldKind::Decimal },
    FieldBinding { key: "s_master_volume", field: "doubleSpinBox_s_master_volume", kind: FieldKind::Decimal },
    FieldBinding { key: "s_music_volume", field: "doubleSpinBox_s_music_volume", kind: FieldKind::Decimal },
];

/// Looks up the binding for a config key.
pub(crate) fn binding_for_key(key: &str) -> Option<&'static FieldBinding> {
    BINDINGS.iter().find(|binding| binding.key == key)
}

/// Typed get/set access to named fields, the seam between the sync pass and
/// whatever is presenting the form.
pub(crate) trait FieldStore {
    fn set(&mut self, field: &str, value: FieldValue);
    fn get(&self, field: &str) -> Option<FieldValue>;
}

/// In-memory field store standing in for the options form.
#[derive(Debug, Default)]
pub(crate) struct FormState {
    values: HashMap<String, FieldValue>,
}

impl FormState {
    /// Creates a store holding the default value of every bound field.
    pub(crate) fn with_defaults(bindings: &[FieldBinding]) -> Self {
        let mut state = Self::default();
        for binding in bindings {
            state
                .values
                .insert(binding.field.to_string(), binding.kind.default_value());
        }
        state
    }
}

impl FieldStore for FormState {
    fn set(&mut self, field: &str, value: FieldValue) {
        self.values.insert(field.to_string(), value);
    }

    fn get(&self, field: &str) -> Option<FieldValue> {
        self.values.get(field).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_keys_are_unique() {
        for (i, a) in BINDINGS.iter().enumerate() {
            for b in &BINDINGS[i + 1..] {
                assert_ne!(a.key, b.key);
                assert_ne!(a.field, b.field);
            }
        }
    }

    #[test]
    fn field_handles_carry_the_widget_prefix_for_their_kind() {
        for binding in BINDINGS {
            let prefix = match binding.kind {
                FieldKind::Flag => "checkBox_",
                FieldKind::Text => "lineEdit_",
                FieldKind::IndexChoice | FieldKind::VocabChoice(_) => "comboBox_",
                FieldKind::Decimal => "doubleSpinBox_",
            };
            assert_eq!(binding.field, format!("{prefix}{}", binding.key));
        }
    }

    #[test]
    fn text_languages_extend_voice_languages_in_order() {
        assert_eq!(&TEXT_LANGUAGES[..VOICE_LANGUAGES.len()], &VOICE_LANGUAGES);
    }

    #[test]
    fn defaults_populate_every_field() {
        let state = FormState::with_defaults(BINDINGS);
        for binding in BINDINGS {
            assert_eq!(state.get(binding.field), Some(binding.kind.default_value()));
        }
    }

    #[test]
    fn binding_lookup_by_key() {
        let binding = binding_for_key("r_quality_level").unwrap();
        assert_eq!(binding.kind, FieldKind::IndexChoice);
        assert!(binding_for_key("no_such_key").is_none());
    }
}
