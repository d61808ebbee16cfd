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

pub mod json_serializer;

use crate::error::{ConfigurationError, SerializationError};
use crate::kafka::core::config::settings::Settings;
use crate::kafka::core::header::headers::Headers;

/// Producer-side contract for turning a record key or value into bytes.
///
/// `configure` is called once before the first `serialize`; afterwards the
/// serializer is shared read-only across publishing threads.
pub trait Serializer<T: ?Sized>: Send + Sync {
    fn configure(&mut self, _settings: &Settings, _is_key: bool) -> Result<(), ConfigurationError> {
        Ok(())
    }

    /// Encode `data`. `None` means "no payload" and yields `Ok(None)`.
    fn serialize(&self, topic: &str, data: Option<&T>) -> Result<Option<Vec<u8>>, SerializationError>;

    /// Encode `data`, recording metadata in `headers` where supported.
    fn serialize_with_headers(
        &self,
        topic: &str,
        _headers: &mut Headers,
        data: Option<&T>,
    ) -> Result<Option<Vec<u8>>, SerializationError> {
        self.serialize(topic, data)
    }

    /// Release resources. Must be idempotent.
    fn close(&self) {}
}
