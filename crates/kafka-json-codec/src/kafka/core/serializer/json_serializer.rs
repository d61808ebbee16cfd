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
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::debug;

use crate::error::{ConfigurationError, SerializationError};
use crate::kafka::core::TYPE_MAPPINGS;
use crate::kafka::core::config::settings::Settings;
use crate::kafka::core::header::headers::Headers;
use crate::kafka::core::mapper::type_mapper::{
    ConfigurableTypeMapper, DefaultTypeMapper, TypeMapper,
};
use crate::kafka::core::serdes::object_mapper::ObjectMapper;
use crate::kafka::core::serdes::type_registry::TypeRegistry;
use crate::kafka::core::serializer::Serializer;

/// Serializer for sending typed values to Kafka as JSON.
///
/// When type info is enabled and a header carrier is supplied, the value's
/// type token is written to the headers before the payload is encoded, so a
/// consumer can pick the concrete target type. The payload itself is the plain
/// JSON encoding of the value, with no envelope.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use kafka_json_codec::{Headers, JsonSerializer, Serializer, Settings, TypeRegistry};
/// use serde::Serialize;
///
/// #[derive(Debug, Serialize)]
/// struct Event {
///     id: u32,
/// }
///
/// let registry = Arc::new(TypeRegistry::new().register::<Event>("com.example.Event"));
/// let mut serializer = JsonSerializer::<Event>::with_registry(registry);
/// serializer
///     .configure(&Settings::new().with("type-mappings", "evt:com.example.Event"), false)
///     .unwrap();
///
/// let mut headers = Headers::new();
/// let bytes = serializer
///     .serialize_with_headers("general-data", &mut headers, Some(&Event { id: 1 }))
///     .unwrap();
///
/// assert_eq!(bytes.as_deref(), Some(&br#"{"id":1}"#[..]));
/// assert_eq!(headers.last_header_str("__TypeId__"), Some("evt"));
/// ```
pub struct JsonSerializer<T: ?Sized> {
    object_mapper: ObjectMapper,
    add_type_info: bool,
    type_mapper: Box<dyn TypeMapper>,
    type_mapper_explicitly_set: bool,
    registry: Arc<TypeRegistry>,
    _marker: PhantomData<fn(&T)>,
}

impl<T: ?Sized> JsonSerializer<T> {
    /// Serializer with a default object mapper and an empty type registry.
    pub fn new() -> Self {
        Self::with_parts(ObjectMapper::new(), Arc::default())
    }

    pub fn with_object_mapper(object_mapper: ObjectMapper) -> Self {
        Self::with_parts(object_mapper, Arc::default())
    }

    /// Serializer whose type names come from `registry`.
    ///
    /// The registry names types in headers and resolves the right-hand side
    /// of `type-mappings` entries.
    pub fn with_registry(registry: Arc<TypeRegistry>) -> Self {
        Self::with_parts(ObjectMapper::new(), registry)
    }

    pub fn with_parts(object_mapper: ObjectMapper, registry: Arc<TypeRegistry>) -> Self {
        JsonSerializer {
            object_mapper,
            add_type_info: true,
            type_mapper: Box::new(DefaultTypeMapper::with_registry(Arc::clone(&registry))),
            type_mapper_explicitly_set: false,
            registry,
            _marker: PhantomData,
        }
    }

    pub fn is_add_type_info(&self) -> bool {
        self.add_type_info
    }

    /// Set to false to disable adding type info headers.
    pub fn set_add_type_info(&mut self, add_type_info: bool) {
        self.add_type_info = add_type_info;
    }

    pub fn type_mapper(&self) -> &dyn TypeMapper {
        self.type_mapper.as_ref()
    }

    pub fn object_mapper(&self) -> &ObjectMapper {
        &self.object_mapper
    }

    /// Replace the type mapper. Configuration never touches it afterwards.
    pub fn set_type_mapper<M: TypeMapper + 'static>(&mut self, type_mapper: M) {
        self.type_mapper = Box::new(type_mapper);
        self.type_mapper_explicitly_set = true;
    }

    /// Make the default type mapper write key type headers.
    ///
    /// No effect once a type mapper was set explicitly.
    pub fn set_use_type_mapper_for_key(&mut self, is_key: bool) {
        if let Some(mapper) = self.configurable_mapper() {
            mapper.set_use_for_key(is_key);
        }
    }

    // Fluent API

    /// Designate this serializer for keys (default is values); only applies
    /// to the default type mapper.
    pub fn for_keys(mut self) -> Self {
        self.set_use_type_mapper_for_key(true);
        self
    }

    /// Do not include type info headers.
    pub fn no_type_info(mut self) -> Self {
        self.set_add_type_info(false);
        self
    }

    /// Use the supplied type mapper.
    pub fn with_type_mapper<M: TypeMapper + 'static>(mut self, type_mapper: M) -> Self {
        self.set_type_mapper(type_mapper);
        self
    }

    fn configurable_mapper(&mut self) -> Option<&mut dyn ConfigurableTypeMapper> {
        if self.type_mapper_explicitly_set {
            return None;
        }
        self.type_mapper.configurable()
    }
}

impl<T> JsonSerializer<T>
where
    T: Serialize + fmt::Debug + ?Sized + 'static,
{
    fn encode(&self, topic: &str, data: &T) -> Result<Vec<u8>, SerializationError> {
        let payload = self
            .object_mapper
            .to_vec(data)
            .map_err(|source| SerializationError {
                topic: topic.to_string(),
                data: format!("{:?}", data),
                source,
            })?;

        debug!(
            "Serialized record for topic '{}' ({} bytes)",
            topic,
            payload.len()
        );
        Ok(payload)
    }
}

impl<T> Serializer<T> for JsonSerializer<T>
where
    T: Serialize + fmt::Debug + ?Sized + 'static,
{
    fn configure(&mut self, settings: &Settings, is_key: bool) -> Result<(), ConfigurationError> {
        self.set_use_type_mapper_for_key(is_key);

        if let Some(add_type_info) = settings.add_type_info_headers()? {
            self.add_type_info = add_type_info;
        }

        if settings.contains_key(TYPE_MAPPINGS) {
            match self.configurable_mapper() {
                Some(mapper) => {
                    if let Some(entries) = settings.type_mappings()? {
                        mapper.set_alias_mappings(&entries)?;
                        debug!("Configured {} type alias entries", entries.len());
                    }
                }
                None => debug!("Ignoring '{}': type mapper was set explicitly", TYPE_MAPPINGS),
            }
        }

        debug!(
            "Configured JSON serializer (is_key: {}, add_type_info: {})",
            is_key, self.add_type_info
        );
        Ok(())
    }

    fn serialize(&self, topic: &str, data: Option<&T>) -> Result<Option<Vec<u8>>, SerializationError> {
        match data {
            Some(data) => self.encode(topic, data).map(Some),
            None => Ok(None),
        }
    }

    fn serialize_with_headers(
        &self,
        topic: &str,
        headers: &mut Headers,
        data: Option<&T>,
    ) -> Result<Option<Vec<u8>>, SerializationError> {
        let Some(data) = data else {
            return Ok(None);
        };
        // headers first, so they always describe the payload that follows
        if self.add_type_info {
            let ty = self.registry.identity_of::<T>();
            self.type_mapper.from_runtime_type(&ty, headers);
        }
        self.encode(topic, data).map(Some)
    }

    fn close(&self) {
        // No-op
    }
}

impl<T: ?Sized> Default for JsonSerializer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for JsonSerializer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSerializer")
            .field("object_mapper", &self.object_mapper)
            .field("add_type_info", &self.add_type_info)
            .field("type_mapper", &self.type_mapper)
            .field("type_mapper_explicitly_set", &self.type_mapper_explicitly_set)
            .finish()
    }
}
