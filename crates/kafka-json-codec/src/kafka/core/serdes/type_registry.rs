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

use std::any::{self, TypeId};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::TypeResolutionError;

/// Runtime identity of a concrete type plus the canonical name written on the wire.
///
/// Two identities are equal when they refer to the same Rust type, whatever
/// name they carry.
#[derive(Debug, Clone)]
pub struct TypeIdentity {
    id: TypeId,
    name: Cow<'static, str>,
}

impl TypeIdentity {
    /// Identity of `T` named after `std::any::type_name`.
    ///
    /// The name includes module paths and is not guaranteed stable across
    /// compiler versions, so register a canonical name when producer and
    /// consumer are built separately.
    pub fn of<T: ?Sized + 'static>() -> Self {
        TypeIdentity {
            id: TypeId::of::<T>(),
            name: Cow::Borrowed(any::type_name::<T>()),
        }
    }

    pub fn named<T: ?Sized + 'static, N: Into<Cow<'static, str>>>(name: N) -> Self {
        TypeIdentity {
            id: TypeId::of::<T>(),
            name: name.into(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeIdentity {}

impl Hash for TypeIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Explicit table of canonical type names, populated at startup.
///
/// Stands in for loading a type by its fully-qualified name: alias
/// configuration such as `evt:com.example.Event` resolves the right-hand side
/// here.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    by_name: HashMap<String, TypeIdentity>,
    by_id: HashMap<TypeId, TypeIdentity>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Default::default()
    }

    /// Register `T` under `name`. Re-registering a name or a type replaces the
    /// previous entry.
    pub fn register<T: ?Sized + 'static>(mut self, name: impl Into<String>) -> Self {
        self.insert::<T>(name);
        self
    }

    pub fn insert<T: ?Sized + 'static>(&mut self, name: impl Into<String>) {
        let name = name.into();
        let identity = TypeIdentity::named::<T, _>(name.clone());
        if let Some(previous) = self.by_id.insert(identity.id, identity.clone()) {
            if previous.name() != name {
                self.by_name.remove(previous.name());
            }
        }
        if let Some(previous) = self.by_name.insert(name, identity) {
            if previous.id != TypeId::of::<T>() {
                self.by_id.remove(&previous.id);
            }
        }
    }

    /// Look up a type by canonical name. Surrounding whitespace is ignored.
    pub fn resolve(&self, name: &str) -> Result<TypeIdentity, TypeResolutionError> {
        let name = name.trim();
        self.by_name
            .get(name)
            .cloned()
            .ok_or_else(|| TypeResolutionError {
                name: name.to_string(),
            })
    }

    /// The registered identity of `T`, or one named by `std::any::type_name`.
    pub fn identity_of<T: ?Sized + 'static>(&self) -> TypeIdentity {
        self.by_id
            .get(&TypeId::of::<T>())
            .cloned()
            .unwrap_or_else(TypeIdentity::of::<T>)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
