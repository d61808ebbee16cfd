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

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use std::fmt;

/// JSON engine settings shared by the serializers.
///
/// Objects without any serializable fields encode to `{}` and are never an
/// error.
#[derive(Debug, Clone, Default)]
pub struct ObjectMapper {
    /// If true, `null` fields are dropped from objects and arrays, recursively.
    pub omit_null_values: bool,
}

impl ObjectMapper {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn omitting_nulls() -> Self {
        ObjectMapper {
            omit_null_values: true,
        }
    }

    /// Encode `value` to JSON bytes honoring mapper settings.
    pub fn to_vec<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, serde_json::Error> {
        // Fast path: stream directly when no filtering is needed
        if !self.omit_null_values {
            return serde_json::to_vec(value);
        }
        let v = self.to_json_value(value)?;
        serde_json::to_vec(&v)
    }

    /// Convenience: encode into a `serde_json::Value` instead of bytes.
    pub fn to_json_value<T: Serialize + ?Sized>(&self, value: &T) -> Result<Value, serde_json::Error> {
        let mut v = serde_json::to_value(value)?;
        if self.omit_null_values {
            v = remove_nulls(v);
        }
        Ok(v)
    }

    /// Decode JSON bytes into a concrete type.
    pub fn from_slice<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

/// Remove all `null` entries from objects and arrays recursively.
fn remove_nulls(v: Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (k, val) in map {
                let cleaned = remove_nulls(val);
                if !cleaned.is_null() {
                    out.insert(k, cleaned);
                }
            }
            Value::Object(out)
        }
        Value::Array(arr) => arr
            .into_iter()
            .map(remove_nulls)
            .filter(|val| !val.is_null())
            .collect(),
        other => other,
    }
}

impl fmt::Display for ObjectMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectMapper(omit_nulls={})", self.omit_null_values)
    }
}
