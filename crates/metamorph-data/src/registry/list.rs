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

use crate::morph::Morph;
use std::collections::HashMap;

/// All variants of one morph name, owned by the factory that contributed it
/// first.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    /// Morph name.
    pub name: String,
    /// Id of the contributing factory.
    pub factory: String,
    /// Position of the contributing factory in the registry. Two factories
    /// may share an id, never a position.
    pub owner: usize,
    /// Variants in contribution order.
    pub variants: Vec<Morph>,
}

/// The catalog of known morphs, grouped by name.
///
/// Factories contribute in turn. Once a name is owned by one factory, other
/// factories cannot add variants under it.
#[derive(Debug, Clone, Default)]
pub struct MorphList {
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
    contributor: String,
    owner: usize,
}

impl MorphList {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the contribution of the factory at registry position `owner`.
    /// Subsequent additions are attributed to it; `factory` is its id, kept
    /// for display and logs.
    pub fn begin_contribution(&mut self, owner: usize, factory: &str) {
        self.owner = owner;
        self.contributor = factory.to_string();
    }

    /// Adds a variant. Returns `false` if the name belongs to another factory
    /// or the same variant is already listed.
    pub fn add_morph(&mut self, morph: Morph) -> bool {
        match self.index.get(morph.name()) {
            Some(&i) => {
                let entry = &mut self.entries[i];
                if entry.owner != self.owner {
                    log::debug!(
                        "Catalog: '{}' already provided by '{}' (#{}), ignoring '{}' (#{})",
                        entry.name,
                        entry.factory,
                        entry.owner,
                        self.contributor,
                        self.owner
                    );
                    return false;
                }
                if entry.variants.contains(&morph) {
                    return false;
                }
                entry.variants.push(morph);
                true
            }
            None => {
                self.index
                    .insert(morph.name().to_string(), self.entries.len());
                self.entries.push(CatalogEntry {
                    name: morph.name().to_string(),
                    factory: self.contributor.clone(),
                    owner: self.owner,
                    variants: vec![morph],
                });
                true
            }
        }
    }

    /// Whether any variant is listed under `name`.
    pub fn has_morph(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Variants listed under `name`.
    pub fn get(&self, name: &str) -> Option<&[Morph]> {
        self.index
            .get(name)
            .map(|&i| self.entries[i].variants.as_slice())
    }

    /// The factory owning `name`.
    pub fn factory_of(&self, name: &str) -> Option<&str> {
        self.index.get(name).map(|&i| self.entries[i].factory.as_str())
    }

    /// Entries in the order their names were first contributed.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    /// Every variant, entry by entry.
    pub fn iter(&self) -> impl Iterator<Item = &Morph> {
        self.entries.iter().flat_map(|e| e.variants.iter())
    }

    /// Whether this exact morph is listed.
    pub fn contains(&self, morph: &Morph) -> bool {
        self.get(morph.name())
            .is_some_and(|variants| variants.contains(morph))
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of variants across all names.
    pub fn morph_count(&self) -> usize {
        self.entries.iter().map(|e| e.variants.len()).sum()
    }

    pub(crate) fn for_each_mut(&mut self, mut f: impl FnMut(&mut Morph)) {
        for entry in &mut self.entries {
            entry.variants.iter_mut().for_each(&mut f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morph::{EntityMorph, MorphKind};
    use metamorph_core::TagCompound;

    fn morph(name: &str, data: &str) -> Morph {
        let data = TagCompound::from_json_str(data).unwrap();
        Morph::new(name, MorphKind::Entity(EntityMorph::new(data, 1.0, 1.0)))
    }

    #[test]
    fn first_contributor_owns_the_name() {
        let mut list = MorphList::new();
        list.begin_contribution(1, "addon");
        assert!(list.add_morph(morph("minecraft:pig", r#"{"Saddle":true}"#)));

        list.begin_contribution(0, "vanilla");
        assert!(!list.add_morph(morph("minecraft:pig", "{}")));
        assert!(list.add_morph(morph("minecraft:cow", "{}")));

        assert_eq!(list.factory_of("minecraft:pig"), Some("addon"));
        assert_eq!(list.get("minecraft:pig").unwrap().len(), 1);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn same_factory_adds_variants_once() {
        let mut list = MorphList::new();
        list.begin_contribution(0, "vanilla");
        assert!(list.add_morph(morph("minecraft:sheep", "{}")));
        assert!(list.add_morph(morph("minecraft:sheep", r#"{"Color":14}"#)));
        assert!(!list.add_morph(morph("minecraft:sheep", r#"{"Color":14}"#)));
        assert_eq!(list.morph_count(), 2);
        assert!(list.contains(&morph("minecraft:sheep", r#"{"Color":14}"#)));
    }

    #[test]
    fn ownership_follows_position_not_id() {
        let mut list = MorphList::new();
        list.begin_contribution(1, "entity");
        assert!(list.add_morph(morph("minecraft:pig", "{}")));

        list.begin_contribution(0, "entity");
        assert!(!list.add_morph(morph("minecraft:pig", r#"{"Saddle":true}"#)));

        let entry = list.entries().next().unwrap();
        assert_eq!(entry.owner, 1);
        assert_eq!(list.morph_count(), 1);
    }
}
