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

use std::fmt;
use std::str;

/// A single record header. Values are raw bytes; string data is UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    key: String,
    value: Vec<u8>,
}

impl Header {
    pub fn new<K: Into<String>, V: Into<Vec<u8>>>(key: K, value: V) -> Self {
        Header {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// The value as UTF-8 text, or `None` if it is not valid UTF-8.
    pub fn value_str(&self) -> Option<&str> {
        str::from_utf8(&self.value).ok()
    }
}

/// Ordered multimap of header name to raw bytes, attached to one outgoing record.
///
/// Insertion order is preserved and the same key may appear more than once,
/// matching the header model of the broker client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<Header>,
}

impl Headers {
    pub fn new() -> Self {
        Default::default()
    }

    /// Append a header, keeping any existing headers with the same key.
    pub fn add<K: Into<String>, V: Into<Vec<u8>>>(&mut self, key: K, value: V) -> &mut Self {
        self.entries.push(Header::new(key, value));
        self
    }

    /// Remove every header with the given key.
    pub fn remove(&mut self, key: &str) -> &mut Self {
        self.entries.retain(|h| h.key != key);
        self
    }

    /// The most recently added header with the given key.
    pub fn last_header(&self, key: &str) -> Option<&Header> {
        self.entries.iter().rev().find(|h| h.key == key)
    }

    /// Convenience: the last value for `key`, decoded as UTF-8.
    pub fn last_header_str(&self, key: &str) -> Option<&str> {
        self.last_header(key).and_then(Header::value_str)
    }

    /// All headers with the given key, in insertion order.
    pub fn headers<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Header> + 'a {
        self.entries.iter().filter(move |h| h.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Header> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Vec<u8>>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (k, v) in iter {
            headers.add(k, v);
        }
        headers
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = &'a Header;
    type IntoIter = std::slice::Iter<'a, Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Headers(")?;
        for (i, h) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match h.value_str() {
                Some(s) => write!(f, "{}={}", h.key, s)?,
                None => write!(f, "{}=<{} bytes>", h.key, h.value.len())?,
            }
        }
        write!(f, ")")
    }
}
