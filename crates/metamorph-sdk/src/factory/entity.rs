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

use super::label_for;
use crate::creature::CreatureTable;
use metamorph_core::TagCompound;
use metamorph_data::morph::{name_of, EntityMorph, ENTITY_DATA_KEY};
use metamorph_data::registry::{translation_key, Presentation, DISPLAY_ALIASES};
use metamorph_data::{Morph, MorphError, MorphFactory, MorphKind, MorphList};
use std::sync::Arc;

/// Builds morphs from creature snapshots.
///
/// Claims every living kind in its [`CreatureTable`] except the carrier.
#[derive(Debug, Clone)]
pub struct EntityMorphFactory {
    table: Arc<CreatureTable>,
}

impl EntityMorphFactory {
    /// A factory over `table`.
    pub fn new(table: Arc<CreatureTable>) -> Self {
        Self { table }
    }

    /// A factory over the stock creatures.
    pub fn vanilla() -> Self {
        Self::new(Arc::new(CreatureTable::vanilla()))
    }

    /// The creature table.
    pub fn table(&self) -> &Arc<CreatureTable> {
        &self.table
    }

    /// Builds a morph of kind `type_id` from a raw snapshot.
    pub fn from_snapshot(&self, type_id: &str, snapshot: TagCompound) -> Result<Morph, MorphError> {
        let kind = self
            .table
            .get(type_id)
            .filter(|_| self.table.is_morphable(type_id))
            .ok_or_else(|| MorphError::UnknownCreature(type_id.to_string()))?;
        let (width, height) = self
            .table
            .dimensions(type_id, &snapshot)
            .unwrap_or((kind.width, kind.height));
        let morph = EntityMorph::new(snapshot, width, height);
        Ok(Morph::new(type_id, MorphKind::Entity(morph)).with_settings(kind.settings.clone()))
    }
}

impl MorphFactory for EntityMorphFactory {
    fn id(&self) -> &str {
        "entity"
    }

    fn register_presentation(&self, presentation: &mut Presentation) {
        let aliased = |type_id: &str| DISPLAY_ALIASES.iter().any(|(from, _)| *from == type_id);
        for kind in self.table.kinds() {
            if self.table.is_morphable(&kind.type_id) && !aliased(&kind.type_id) {
                presentation
                    .localization
                    .insert(translation_key(&kind.type_id), label_for(&kind.type_id));
            }
        }
    }

    fn has_morph(&self, name: &str) -> bool {
        self.table.is_morphable(name)
    }

    fn build(&self, tag: &TagCompound) -> Result<Morph, MorphError> {
        let name = name_of(tag).ok_or(MorphError::MissingName)?;
        let snapshot = match tag.get(ENTITY_DATA_KEY) {
            None => TagCompound::new(),
            Some(value) => TagCompound::from_value(value.clone()).ok_or_else(|| {
                MorphError::MalformedPayload {
                    name: name.to_string(),
                    reason: format!("`{ENTITY_DATA_KEY}` is not a compound"),
                }
            })?,
        };
        self.from_snapshot(name, snapshot)
    }

    fn collect_morphs(&self, list: &mut MorphList) {
        for kind in self.table.kinds().filter(|k| self.table.is_morphable(&k.type_id)) {
            match self.from_snapshot(&kind.type_id, TagCompound::new()) {
                Ok(morph) => {
                    list.add_morph(morph);
                }
                Err(e) => log::warn!("EntityMorphFactory: {e}"),
            }
        }

        for (type_id, json) in self.table.variants() {
            if !self.table.is_morphable(type_id) {
                log::warn!("EntityMorphFactory: variant for unknown creature '{type_id}' skipped");
                continue;
            }
            let overrides = match TagCompound::from_json_str(json) {
                Ok(overrides) => overrides,
                Err(source) => {
                    let error = MorphError::MalformedOverride {
                        name: type_id.clone(),
                        source,
                    };
                    log::warn!("EntityMorphFactory: variant skipped: {error}");
                    continue;
                }
            };
            let mut snapshot = TagCompound::new();
            snapshot.merge(&overrides);
            match self.from_snapshot(type_id, snapshot) {
                Ok(morph) => {
                    list.add_morph(morph);
                }
                Err(e) => log::warn!("EntityMorphFactory: variant skipped: {e}"),
            }
        }
    }
}
