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

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::error::ConfigurationError;
use crate::kafka::core::header::headers::Headers;
use crate::kafka::core::serdes::type_registry::{TypeIdentity, TypeRegistry};
use crate::kafka::core::{IS_KEY_HEADER, KEY_TYPE_ID_HEADER, TYPE_ID_HEADER};

/// Translates a runtime type into a wire-level type token stored in headers.
///
/// Called concurrently from every publishing thread, so implementations must
/// not mutate shared state in `from_runtime_type`.
pub trait TypeMapper: Send + Sync + fmt::Debug {
    /// Record the type token for `ty` in `headers`.
    fn from_runtime_type(&self, ty: &TypeIdentity, headers: &mut Headers);

    /// Read back the type recorded in `headers`, if this mapper can resolve it.
    fn to_runtime_type(&self, _headers: &Headers) -> Option<TypeIdentity> {
        None
    }

    /// Access to settings the serializer may apply during `configure`.
    ///
    /// Mappers that cannot be reconfigured keep the default `None`.
    fn configurable(&mut self) -> Option<&mut dyn ConfigurableTypeMapper> {
        None
    }
}

/// Settings a serializer may push into its type mapper from configuration.
pub trait ConfigurableTypeMapper {
    fn set_use_for_key(&mut self, is_key: bool);

    /// Parse `alias:canonical.Type` entries and add them to the alias table.
    fn set_alias_mappings(&mut self, entries: &[&str]) -> Result<(), ConfigurationError>;
}

/// Header-based type mapper with an optional alias table.
///
/// Writes the alias of a type when one is configured and the canonical name
/// otherwise. In key mode the token goes under [`KEY_TYPE_ID_HEADER`] so key
/// and value type information can travel on the same record.
#[derive(Debug, Clone, Default)]
pub struct DefaultTypeMapper {
    id_type_mapping: HashMap<String, TypeIdentity>,
    type_id_mapping: HashMap<TypeId, String>,
    use_for_key: bool,
    registry: Arc<TypeRegistry>,
}

impl DefaultTypeMapper {
    pub fn new() -> Self {
        Default::default()
    }

    /// Mapper resolving aliased type names against `registry`.
    pub fn with_registry(registry: Arc<TypeRegistry>) -> Self {
        DefaultTypeMapper {
            registry,
            ..Default::default()
        }
    }

    pub fn is_use_for_key(&self) -> bool {
        self.use_for_key
    }

    /// Header carrying the type token in the current mode.
    pub fn class_id_field_name(&self) -> &'static str {
        if self.use_for_key {
            KEY_TYPE_ID_HEADER
        } else {
            TYPE_ID_HEADER
        }
    }

    /// Map `alias` directly to `T`, bypassing name resolution.
    pub fn register_alias<T: ?Sized + 'static>(&mut self, alias: impl Into<String>) {
        let identity = self.registry.identity_of::<T>();
        self.insert_alias(alias.into(), identity);
    }

    /// Add resolved aliases. Later entries win for both the alias and the type.
    pub fn set_id_type_mapping<I>(&mut self, mapping: I)
    where
        I: IntoIterator<Item = (String, TypeIdentity)>,
    {
        for (alias, identity) in mapping {
            self.insert_alias(alias, identity);
        }
    }

    pub fn alias_for(&self, ty: &TypeIdentity) -> Option<&str> {
        self.type_id_mapping.get(&ty.id()).map(String::as_str)
    }

    pub fn aliases(&self) -> &HashMap<String, TypeIdentity> {
        &self.id_type_mapping
    }

    fn insert_alias(&mut self, alias: String, identity: TypeIdentity) {
        if let Some(previous) = self.id_type_mapping.insert(alias.clone(), identity.clone()) {
            let stale = previous.id() != identity.id()
                && self.type_id_mapping.get(&previous.id()) == Some(&alias);
            if stale {
                // the previous type keeps a remaining alias or falls back to its name
                let other = self
                    .id_type_mapping
                    .iter()
                    .find(|(_, ty)| ty.id() == previous.id())
                    .map(|(other, _)| other.clone());
                match other {
                    Some(other) => {
                        self.type_id_mapping.insert(previous.id(), other);
                    }
                    None => {
                        self.type_id_mapping.remove(&previous.id());
                    }
                }
            }
        }
        self.type_id_mapping.insert(identity.id(), alias);
    }

    fn add_header(headers: &mut Headers, name: &str, value: &str) {
        headers.remove(name);
        headers.add(name, value.as_bytes());
    }
}

impl TypeMapper for DefaultTypeMapper {
    fn from_runtime_type(&self, ty: &TypeIdentity, headers: &mut Headers) {
        let token = self.alias_for(ty).unwrap_or(ty.name());
        let field = self.class_id_field_name();
        trace!("writing type header {}={} for {}", field, token, ty);

        Self::add_header(headers, field, token);
        Self::add_header(
            headers,
            IS_KEY_HEADER,
            if self.use_for_key { "true" } else { "false" },
        );
    }

    fn to_runtime_type(&self, headers: &Headers) -> Option<TypeIdentity> {
        let token = headers.last_header_str(self.class_id_field_name())?;
        if let Some(identity) = self.id_type_mapping.get(token) {
            return Some(identity.clone());
        }
        self.registry.resolve(token).ok()
    }

    fn configurable(&mut self) -> Option<&mut dyn ConfigurableTypeMapper> {
        Some(self)
    }
}

impl ConfigurableTypeMapper for DefaultTypeMapper {
    fn set_use_for_key(&mut self, is_key: bool) {
        self.use_for_key = is_key;
    }

    fn set_alias_mappings(&mut self, entries: &[&str]) -> Result<(), ConfigurationError> {
        let mapping = parse_mappings(entries, &self.registry)?;
        self.set_id_type_mapping(mapping);
        Ok(())
    }
}

/// Parse every entry before touching the table so a bad entry leaves it as it was.
fn parse_mappings(
    entries: &[&str],
    registry: &TypeRegistry,
) -> Result<Vec<(String, TypeIdentity)>, ConfigurationError> {
    entries
        .iter()
        .map(|entry| {
            let (alias, name) = split_entry(entry)?;
            let identity = registry
                .resolve(name)
                .map_err(|source| ConfigurationError::UnresolvableType {
                    alias: alias.to_string(),
                    source,
                })?;
            Ok((alias.to_string(), identity))
        })
        .collect()
}

fn split_entry(entry: &str) -> Result<(&str, &str), ConfigurationError> {
    let malformed = || ConfigurationError::MalformedMapping {
        entry: entry.to_string(),
    };
    let (alias, name) = entry.split_once(':').ok_or_else(malformed)?;
    let (alias, name) = (alias.trim(), name.trim());
    if name.contains(':') || name.is_empty() {
        return Err(malformed());
    }
    Ok((alias, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug)]
    struct Foo;
    #[derive(Debug)]
    struct Bar;

    fn registry() -> Arc<TypeRegistry> {
        Arc::new(
            TypeRegistry::new()
                .register::<Foo>("com.example.Foo")
                .register::<Bar>("com.example.Bar"),
        )
    }

    #[test]
    fn writes_alias_when_mapped() {
        let mut mapper = DefaultTypeMapper::with_registry(registry());
        mapper.set_alias_mappings(&["short:com.example.Foo"]).unwrap();

        let mut headers = Headers::new();
        mapper.from_runtime_type(&registry().identity_of::<Foo>(), &mut headers);

        assert_eq!(headers.last_header_str(TYPE_ID_HEADER), Some("short"));
        assert_eq!(headers.last_header_str(IS_KEY_HEADER), Some("false"));
    }

    #[test]
    fn writes_canonical_name_when_unmapped() {
        let mut mapper = DefaultTypeMapper::with_registry(registry());
        mapper.set_alias_mappings(&["short:com.example.Foo"]).unwrap();

        let mut headers = Headers::new();
        mapper.from_runtime_type(&registry().identity_of::<Bar>(), &mut headers);

        assert_eq!(headers.last_header_str(TYPE_ID_HEADER), Some("com.example.Bar"));
    }

    #[test]
    fn key_mode_uses_key_header() {
        let mut mapper = DefaultTypeMapper::with_registry(registry());
        mapper.set_use_for_key(true);

        let mut headers = Headers::new();
        mapper.from_runtime_type(&registry().identity_of::<Foo>(), &mut headers);

        assert!(headers.last_header(TYPE_ID_HEADER).is_none());
        assert_eq!(headers.last_header_str(KEY_TYPE_ID_HEADER), Some("com.example.Foo"));
        assert_eq!(headers.last_header_str(IS_KEY_HEADER), Some("true"));
    }

    #[test]
    fn rewriting_replaces_previous_headers() {
        let mapper = DefaultTypeMapper::with_registry(registry());
        let mut headers = Headers::new();
        mapper.from_runtime_type(&registry().identity_of::<Foo>(), &mut headers);
        mapper.from_runtime_type(&registry().identity_of::<Bar>(), &mut headers);

        assert_eq!(headers.len(), 2);
        assert_eq!(headers.last_header_str(TYPE_ID_HEADER), Some("com.example.Bar"));
    }

    #[test]
    fn trims_entries_and_last_alias_wins() {
        let mut mapper = DefaultTypeMapper::with_registry(registry());
        mapper
            .set_alias_mappings(&[" a : com.example.Foo ", "a:com.example.Bar"])
            .unwrap();

        assert!(mapper.aliases()["a"].is::<Bar>());
        assert_eq!(mapper.alias_for(&TypeIdentity::of::<Bar>()), Some("a"));
        assert_eq!(mapper.alias_for(&TypeIdentity::of::<Foo>()), None);
    }

    #[test]
    fn reassigned_alias_no_longer_names_previous_type() {
        let mut mapper = DefaultTypeMapper::with_registry(registry());
        mapper.set_alias_mappings(&["a:com.example.Foo"]).unwrap();
        mapper.set_alias_mappings(&["a:com.example.Bar"]).unwrap();

        let mut headers = Headers::new();
        mapper.from_runtime_type(&registry().identity_of::<Foo>(), &mut headers);

        assert_eq!(headers.last_header_str(TYPE_ID_HEADER), Some("com.example.Foo"));
        assert!(mapper.to_runtime_type(&headers).unwrap().is::<Foo>());
    }

    #[test]
    fn reassigned_alias_keeps_other_alias_of_previous_type() {
        let mut mapper = DefaultTypeMapper::with_registry(registry());
        mapper.register_alias::<Foo>("b");
        mapper.register_alias::<Foo>("a");
        mapper.register_alias::<Bar>("a");

        assert_eq!(mapper.alias_for(&TypeIdentity::of::<Foo>()), Some("b"));
        assert_eq!(mapper.alias_for(&TypeIdentity::of::<Bar>()), Some("a"));
        assert!(mapper.aliases()["b"].is::<Foo>());
    }

    #[test]
    fn reads_back_alias_and_canonical_tokens() {
        let mut mapper = DefaultTypeMapper::with_registry(registry());
        mapper.register_alias::<Foo>("f");

        let mut headers = Headers::new();
        mapper.from_runtime_type(&registry().identity_of::<Foo>(), &mut headers);
        assert_eq!(headers.last_header_str(TYPE_ID_HEADER), Some("f"));
        assert!(mapper.to_runtime_type(&headers).unwrap().is::<Foo>());

        mapper.from_runtime_type(&registry().identity_of::<Bar>(), &mut headers);
        assert!(mapper.to_runtime_type(&headers).unwrap().is::<Bar>());
    }

    #[rstest]
    #[case("bad-entry-no-colon")]
    #[case("a:b:c")]
    #[case("a:")]
    #[case("")]
    fn rejects_malformed_entries(#[case] entry: &str) {
        let mut mapper = DefaultTypeMapper::with_registry(registry());
        let err = mapper.set_alias_mappings(&[entry]).unwrap_err();
        assert!(matches!(err, ConfigurationError::MalformedMapping { .. }));
    }

    #[test]
    fn unresolvable_type_leaves_table_untouched() {
        let mut mapper = DefaultTypeMapper::with_registry(registry());
        let err = mapper
            .set_alias_mappings(&["foo:com.example.Foo", "x:com.example.Missing"])
            .unwrap_err();

        match err {
            ConfigurationError::UnresolvableType { alias, source } => {
                assert_eq!(alias, "x");
                assert_eq!(source.name, "com.example.Missing");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(mapper.aliases().is_empty());
    }
}
