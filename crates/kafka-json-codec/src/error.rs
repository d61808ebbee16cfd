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

//! Error types for the typed JSON codec.

use thiserror::Error;

/// Raised when a type name cannot be resolved against a [`TypeRegistry`].
///
/// [`TypeRegistry`]: crate::kafka::core::serdes::type_registry::TypeRegistry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no type registered under name '{name}'")]
pub struct TypeResolutionError {
    pub name: String,
}

/// Invalid or unparsable setup input. Surfaced at configuration time only.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// A recognized option carried a value of the wrong type.
    #[error("{key} must be {expected}")]
    InvalidOptionType {
        key: &'static str,
        expected: &'static str,
    },

    /// A type mapping entry did not contain exactly one ':'.
    #[error("each comma-delimited mapping entry must have exactly one ':', got '{entry}'")]
    MalformedMapping { entry: String },

    /// The right-hand side of a type mapping names an unknown type.
    #[error("cannot resolve aliased type for '{alias}'")]
    UnresolvableType {
        alias: String,
        #[source]
        source: TypeResolutionError,
    },
}

/// The JSON engine could not encode a value.
#[derive(Error, Debug)]
#[error("can't serialize data [{data}] for topic [{topic}]")]
pub struct SerializationError {
    pub topic: String,
    pub data: String,
    #[source]
    pub source: serde_json::Error,
}
