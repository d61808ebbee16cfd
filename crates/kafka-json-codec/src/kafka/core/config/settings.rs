/*
 * Copyright (C) 2025 Movibase Platform Private Limited
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use std::collections::HashMap;
use std::env;

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::error::ConfigurationError;
use crate::kafka::core::{ADD_TYPE_INFO_HEADERS, TYPE_MAPPINGS};

/// Prefix of environment variables mapped onto serializer settings.
pub const ENV_PREFIX: &str = "KAFKA_JSON_";

static ENV_SETTINGS: Lazy<Settings> = Lazy::new(|| {
    // non-unicode variables cannot name a setting, skip them
    Settings::from_vars(
        env::vars_os().filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
    )
});

/// Configuration snapshot handed to a serializer once at setup time.
///
/// Values are arbitrary JSON so callers can pass either typed values or the
/// strings typically found in property files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    values: HashMap<String, Value>,
}

impl Settings {
    pub fn new() -> Self {
        Default::default()
    }

    /// Process-wide snapshot of `KAFKA_JSON_*` variables, read on first use.
    ///
    /// `KAFKA_JSON_ADD_TYPE_INFO_HEADERS` maps to `add-type-info-headers` and
    /// `KAFKA_JSON_TYPE_MAPPINGS` to `type-mappings`.
    pub fn from_env() -> &'static Settings {
        &ENV_SETTINGS
    }

    /// Same mapping as [`Settings::from_env`] over an explicit set of variables.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut settings = Settings::new();
        for (key, value) in vars {
            let Some(name) = key.as_ref().strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let name = name.to_ascii_lowercase().replace('_', "-");
            if name == ADD_TYPE_INFO_HEADERS || name == TYPE_MAPPINGS {
                settings.insert(name, Value::String(value.into()));
            }
        }
        settings
    }

    pub fn insert<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Builder-style [`Settings::insert`].
    pub fn with<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The `add-type-info-headers` switch, if present.
    ///
    /// Strings parse as `true` when equal to `"true"` ignoring case and as
    /// `false` otherwise.
    pub fn add_type_info_headers(&self) -> Result<Option<bool>, ConfigurationError> {
        match self.get(ADD_TYPE_INFO_HEADERS) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(Value::String(s)) => Ok(Some(s.eq_ignore_ascii_case("true"))),
            Some(_) => Err(ConfigurationError::InvalidOptionType {
                key: ADD_TYPE_INFO_HEADERS,
                expected: "Boolean or String",
            }),
        }
    }

    /// The `type-mappings` entries, if present, split on commas.
    pub fn type_mappings(&self) -> Result<Option<Vec<&str>>, ConfigurationError> {
        match self.get(TYPE_MAPPINGS) {
            None => Ok(None),
            Some(Value::String(s)) if s.is_empty() => Ok(Some(Vec::new())),
            Some(Value::String(s)) => Ok(Some(s.split(',').collect())),
            Some(_) => Err(ConfigurationError::InvalidOptionType {
                key: TYPE_MAPPINGS,
                expected: "String",
            }),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Settings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut settings = Settings::new();
        for (k, v) in iter {
            settings.insert(k, v);
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(true), true)]
    #[case(json!(false), false)]
    #[case(json!("true"), true)]
    #[case(json!("TRUE"), true)]
    #[case(json!("false"), false)]
    #[case(json!("yes"), false)]
    fn parses_add_type_info(#[case] value: Value, #[case] expected: bool) {
        let settings = Settings::new().with(ADD_TYPE_INFO_HEADERS, value);
        assert_eq!(settings.add_type_info_headers().unwrap(), Some(expected));
    }

    #[rstest]
    #[case(json!(1))]
    #[case(json!(null))]
    #[case(json!(["true"]))]
    fn rejects_non_boolean_add_type_info(#[case] value: Value) {
        let settings = Settings::new().with(ADD_TYPE_INFO_HEADERS, value);
        let err = settings.add_type_info_headers().unwrap_err();
        assert_eq!(
            err.to_string(),
            "add-type-info-headers must be Boolean or String"
        );
    }

    #[test]
    fn splits_type_mappings() {
        let settings = Settings::new().with(TYPE_MAPPINGS, "a:x.A, b:x.B");
        assert_eq!(
            settings.type_mappings().unwrap(),
            Some(vec!["a:x.A", " b:x.B"])
        );
        assert_eq!(Settings::new().type_mappings().unwrap(), None);
        assert_eq!(
            Settings::new().with(TYPE_MAPPINGS, "").type_mappings().unwrap(),
            Some(vec![])
        );
    }

    #[test]
    fn non_string_type_mappings_fail() {
        let settings = Settings::new().with(TYPE_MAPPINGS, json!({"a": "x.A"}));
        assert!(matches!(
            settings.type_mappings(),
            Err(ConfigurationError::InvalidOptionType { key: TYPE_MAPPINGS, .. })
        ));
    }

    #[test]
    fn maps_prefixed_variables() {
        let settings = Settings::from_vars([
            ("KAFKA_JSON_ADD_TYPE_INFO_HEADERS", "false"),
            ("KAFKA_JSON_TYPE_MAPPINGS", "evt:com.example.Event"),
            ("KAFKA_JSON_UNKNOWN", "x"),
            ("PATH", "/usr/bin"),
        ]);

        assert_eq!(settings.add_type_info_headers().unwrap(), Some(false));
        assert_eq!(
            settings.type_mappings().unwrap(),
            Some(vec!["evt:com.example.Event"])
        );
        assert!(!settings.contains_key("unknown"));
    }
}
