// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Tag records: the opaque, self-describing attribute bags that morph payloads,
//! creature snapshots and persisted player state are made of.
//!
//! A [`TagCompound`] is a string-keyed map of JSON values. Structural equality
//! is map equality, and hashing walks the keys in sorted order, so two
//! compounds that compare equal always hash equal regardless of how they were
//! built.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Errors produced while building tag records from text.
#[derive(Debug, Error)]
pub enum TagError {
    /// The text was valid JSON but not an object.
    #[error("expected a tag compound (JSON object), found {found}")]
    NotACompound {
        /// A short description of what was found instead.
        found: &'static str,
    },
    /// The text was not valid JSON.
    #[error("malformed tag data: {0}")]
    Json(#[from] serde_json::Error),
}

/// A string-keyed record of tag values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagCompound(Map<String, Value>);

impl TagCompound {
    /// Creates an empty compound.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Parses a compound from JSON text, e.g. `{"Age":-1}`.
    pub fn from_json_str(text: &str) -> Result<Self, TagError> {
        match serde_json::from_str::<Value>(text)? {
            Value::Object(map) => Ok(Self(map)),
            other => Err(TagError::NotACompound {
                found: value_kind(&other),
            }),
        }
    }

    /// Wraps an existing JSON value if it is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Returns `true` if `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the raw value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Stores a raw value under `key`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Removes `key`, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Returns the string stored under `key`.
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Returns the number stored under `key` as an `f32`.
    pub fn get_f32(&self, key: &str) -> Option<f32> {
        self.0.get(key).and_then(Value::as_f64).map(|v| v as f32)
    }

    /// Returns the integer stored under `key`.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.0.get(key).and_then(Value::as_i64)
    }

    /// Returns a boolean flag. Numeric flags (`0`/`1`) are accepted as well.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.0.get(key)? {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_i64().map(|v| v != 0),
            _ => None,
        }
    }

    /// Returns a three-element numeric list stored under `key`.
    pub fn get_f32_triple(&self, key: &str) -> Option<[f32; 3]> {
        let list = self.0.get(key)?.as_array()?;
        if list.len() != 3 {
            return None;
        }
        let mut out = [0.0; 3];
        for (slot, v) in out.iter_mut().zip(list) {
            *slot = v.as_f64()? as f32;
        }
        Some(out)
    }

    /// Returns a copy of the nested compound stored under `key`.
    pub fn get_compound(&self, key: &str) -> Option<TagCompound> {
        match self.0.get(key)? {
            Value::Object(map) => Some(Self(map.clone())),
            _ => None,
        }
    }

    /// Stores a nested compound under `key`.
    pub fn set_compound(&mut self, key: impl Into<String>, compound: TagCompound) {
        self.0.insert(key.into(), Value::Object(compound.0));
    }

    /// Recursively merges `other` into `self`.
    ///
    /// Nested compounds present on both sides are merged key by key; any other
    /// value from `other` overwrites the one in `self`.
    pub fn merge(&mut self, other: &TagCompound) {
        merge_maps(&mut self.0, &other.0);
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the compound has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the entries.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Consumes the compound, returning it as a JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

fn merge_maps(target: &mut Map<String, Value>, source: &Map<String, Value>) {
    for (key, value) in source {
        match (target.get_mut(key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                merge_maps(existing, incoming)
            }
            _ => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a compound",
    }
}

fn hash_value<H: Hasher>(value: &Value, state: &mut H) {
    match value {
        Value::Null => 0u8.hash(state),
        Value::Bool(b) => {
            1u8.hash(state);
            b.hash(state);
        }
        Value::Number(n) => {
            2u8.hash(state);
            n.to_string().hash(state);
        }
        Value::String(s) => {
            3u8.hash(state);
            s.hash(state);
        }
        Value::Array(items) => {
            4u8.hash(state);
            items.len().hash(state);
            for item in items {
                hash_value(item, state);
            }
        }
        Value::Object(map) => {
            5u8.hash(state);
            hash_map(map, state);
        }
    }
}

fn hash_map<H: Hasher>(map: &Map<String, Value>, state: &mut H) {
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();
    keys.len().hash(state);
    for key in keys {
        key.hash(state);
        if let Some(value) = map.get(key) {
            hash_value(value, state);
        }
    }
}

impl Hash for TagCompound {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_map(&self.0, state);
    }
}

impl fmt::Display for TagCompound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(&self.0) {
            Ok(text) => f.write_str(&text),
            Err(_) => f.write_str("{}"),
        }
    }
}

impl From<Map<String, Value>> for TagCompound {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
