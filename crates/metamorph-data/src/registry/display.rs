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

use std::collections::HashMap;

/// Names shown under another kind's label.
pub const DISPLAY_ALIASES: &[(&str, &str)] = &[("WitherSkeleton", "Skeleton")];

/// Localized labels by translation key.
#[derive(Debug, Clone, Default)]
pub struct Localization {
    entries: HashMap<String, String>,
}

impl Localization {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a label.
    pub fn insert(&mut self, key: impl Into<String>, label: impl Into<String>) {
        self.entries.insert(key.into(), label.into());
    }

    /// Looks up a label.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no labels.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Translation key for a morph name, after aliasing.
pub fn translation_key(name: &str) -> String {
    let name = DISPLAY_ALIASES
        .iter()
        .find(|(from, _)| *from == name)
        .map_or(name, |(_, to)| *to);
    format!("entity.{name}.name")
}

/// Human-readable label for a morph name. Falls back to the name itself.
pub fn display_name(name: &str, localization: Option<&Localization>) -> String {
    localization
        .and_then(|l| l.get(&translation_key(name)))
        .map_or_else(|| name.to_string(), str::to_string)
}
