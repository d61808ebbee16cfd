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

//! Typed JSON serializer for Kafka producers.
//!
//! Values are encoded as plain JSON. When a record's header carrier is
//! available, the serializer also stamps it with a type token (the value's
//! canonical type name, or a configured short alias) so a consumer can select
//! the concrete type to decode into.
//!
//! # Features
//!
//! - `JsonSerializer<T>` implementing the producer-side [`Serializer`] contract
//! - Pluggable [`TypeMapper`] with a default header-based implementation
//! - Alias table configured from code or from `type-mappings` settings
//! - Explicit [`TypeRegistry`] naming types on the wire
//! - Settings from code or `KAFKA_JSON_*` environment variables
//! - Integrated tracing
//!
//! # Example
//!
//! ```
//! use kafka_json_codec::{Headers, JsonSerializer, Serializer};
//! use serde::Serialize;
//!
//! #[derive(Debug, Serialize)]
//! struct UserCreated {
//!     user_id: String,
//! }
//!
//! let serializer = JsonSerializer::<UserCreated>::new().no_type_info();
//! let mut headers = Headers::new();
//! let payload = serializer
//!     .serialize_with_headers(
//!         "user.created",
//!         &mut headers,
//!         Some(&UserCreated { user_id: "123".to_string() }),
//!     )
//!     .unwrap();
//!
//! assert_eq!(payload.as_deref(), Some(&br#"{"user_id":"123"}"#[..]));
//! assert!(headers.is_empty());
//! ```

pub mod error;
pub mod kafka;

pub use error::{ConfigurationError, SerializationError, TypeResolutionError};
pub use kafka::core::config::settings::Settings;
pub use kafka::core::header::headers::{Header, Headers};
pub use kafka::core::mapper::type_mapper::{ConfigurableTypeMapper, DefaultTypeMapper, TypeMapper};
pub use kafka::core::serdes::object_mapper::ObjectMapper;
pub use kafka::core::serdes::type_registry::{TypeIdentity, TypeRegistry};
pub use kafka::core::serializer::Serializer;
pub use kafka::core::serializer::json_serializer::JsonSerializer;
pub use kafka::core::{
    ADD_TYPE_INFO_HEADERS, IS_KEY_HEADER, KEY_TYPE_ID_HEADER, TYPE_ID_HEADER, TYPE_MAPPINGS,
};
