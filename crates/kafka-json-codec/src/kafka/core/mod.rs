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

pub mod config;
pub mod header;
pub mod mapper;
pub mod serdes;
pub mod serializer;

/// Header carrying the type token of a record value.
pub const TYPE_ID_HEADER: &str = "__TypeId__";

/// Header carrying the type token of a record key.
pub const KEY_TYPE_ID_HEADER: &str = "__Key_TypeId__";

/// Header marking whether the type token was written by a key serializer.
pub const IS_KEY_HEADER: &str = "__IsKey__";

/// Config key for disabling type info headers. Boolean or `"true"`/`"false"`.
pub const ADD_TYPE_INFO_HEADERS: &str = "add-type-info-headers";

/// Config key adding aliases to the default type mapper: `foo:com.Foo,bar:com.Bar`.
pub const TYPE_MAPPINGS: &str = "type-mappings";
