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

//! End-to-end tests of the producer-side serializer.

use std::sync::Arc;

use kafka_json_codec::{
    ADD_TYPE_INFO_HEADERS, DefaultTypeMapper, Headers, IS_KEY_HEADER, JsonSerializer,
    KEY_TYPE_ID_HEADER, Serializer, Settings, TYPE_ID_HEADER, TYPE_MAPPINGS, TypeRegistry,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Event {
    id: String,
    count: u32,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct EventKey {
    partition: u16,
}

fn registry() -> Arc<TypeRegistry> {
    Arc::new(
        TypeRegistry::new()
            .register::<Event>("com.example.Event")
            .register::<EventKey>("com.example.EventKey"),
    )
}

fn event() -> Event {
    Event {
        id: "e-1".to_string(),
        count: 3,
    }
}

#[test]
fn aliased_value_on_general_data_topic() {
    let mut serializer = JsonSerializer::<Event>::with_registry(registry());
    let settings: Settings = [
        (ADD_TYPE_INFO_HEADERS, "true"),
        (TYPE_MAPPINGS, "evt:com.example.Event"),
    ]
    .into_iter()
    .collect();
    serializer.configure(&settings, false).unwrap();

    let mut headers = Headers::new();
    let payload = serializer
        .serialize_with_headers("general-data", &mut headers, Some(&event()))
        .unwrap()
        .unwrap();

    assert_eq!(headers.last_header_str(TYPE_ID_HEADER), Some("evt"));
    assert_eq!(headers.last_header_str(IS_KEY_HEADER), Some("false"));
    assert_eq!(headers.len(), 2);
    assert_eq!(payload, serde_json::to_vec(&event()).unwrap());
}

#[test]
fn key_and_value_serializers_share_headers() {
    let mut key_serializer = JsonSerializer::<EventKey>::with_registry(registry());
    let mut value_serializer = JsonSerializer::<Event>::with_registry(registry());
    let settings = Settings::new().with(TYPE_MAPPINGS, "key:com.example.EventKey,evt:com.example.Event");
    key_serializer.configure(&settings, true).unwrap();
    value_serializer.configure(&settings, false).unwrap();

    let mut headers = Headers::new();
    let key = key_serializer
        .serialize_with_headers("general-data", &mut headers, Some(&EventKey { partition: 2 }))
        .unwrap()
        .unwrap();
    let value = value_serializer
        .serialize_with_headers("general-data", &mut headers, Some(&event()))
        .unwrap()
        .unwrap();

    assert_eq!(key, br#"{"partition":2}"#);
    assert_eq!(serde_json::from_slice::<Event>(&value).unwrap(), event());
    assert_eq!(headers.last_header_str(KEY_TYPE_ID_HEADER), Some("key"));
    assert_eq!(headers.last_header_str(TYPE_ID_HEADER), Some("evt"));
}

#[test]
fn explicit_mapper_wins_over_repeated_configuration() {
    let mut mapper = DefaultTypeMapper::with_registry(registry());
    mapper.register_alias::<Event>("explicit");
    let mut serializer = JsonSerializer::<Event>::with_registry(registry());
    serializer.set_type_mapper(mapper);

    serializer
        .configure(&Settings::new().with(TYPE_MAPPINGS, "evt:com.example.Event"), false)
        .unwrap();
    serializer
        .configure(&Settings::new().with(TYPE_MAPPINGS, "other:com.example.Event"), false)
        .unwrap();

    let mut headers = Headers::new();
    serializer
        .serialize_with_headers("general-data", &mut headers, Some(&event()))
        .unwrap();
    assert_eq!(headers.last_header_str(TYPE_ID_HEADER), Some("explicit"));

    let resolved = serializer.type_mapper().to_runtime_type(&headers).unwrap();
    assert!(resolved.is::<Event>());
}

#[test]
fn configuration_from_environment_variables() {
    let settings = Settings::from_vars([
        ("KAFKA_JSON_ADD_TYPE_INFO_HEADERS", "FALSE"),
        ("KAFKA_JSON_TYPE_MAPPINGS", "evt:com.example.Event"),
    ]);
    let mut serializer = JsonSerializer::<Event>::with_registry(registry());
    serializer.configure(&settings, false).unwrap();

    let mut headers = Headers::new();
    serializer
        .serialize_with_headers("general-data", &mut headers, Some(&event()))
        .unwrap();
    assert!(!serializer.is_add_type_info());
    assert!(headers.is_empty());
}

#[test]
fn process_environment_snapshot_is_stable() {
    let first = Settings::from_env();
    let second = Settings::from_env();
    assert!(std::ptr::eq(first, second));
}
