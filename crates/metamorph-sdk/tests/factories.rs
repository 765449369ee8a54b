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


mod common;

use approx::assert_relative_eq;
use common::{manager, models, tag};
use metamorph_data::morph::SESSION_FIELDS;
use metamorph_data::{MorphError, MorphFactory, MorphKind, MorphManager, PoseName};
use metamorph_sdk::creature::{CreatureKind, CreatureTable};
use metamorph_sdk::{CustomMorphFactory, EntityMorphFactory};
use std::sync::Arc;

#[test]
fn creature_snapshots_are_stripped_and_sized() {
    let manager = manager();
    let morph = manager
        .resolve(&tag(
            r#"{"Name": "Cow", "EntityData": {"Age": -1, "UUID": "abc", "Health": 3.0, "Pos": [1, 2, 3]}}"#,
        ))
        .unwrap();

    let MorphKind::Entity(entity) = morph.kind() else {
        panic!("expected an entity morph");
    };
    for key in SESSION_FIELDS {
        assert!(!entity.data().contains(key), "{key} survived");
    }
    assert_eq!(entity.data().get_i64("Age"), Some(-1));

    let [width, height] = morph.size_for(PoseName::Standing);
    assert_relative_eq!(width, 0.45);
    assert_relative_eq!(height, 0.7);
}

#[test]
fn only_living_creatures_resolve() {
    let manager = manager();
    assert!(manager.resolve(&tag(r#"{"Name": "ArmorStand"}"#)).is_none());
    assert!(manager.resolve(&tag(r#"{"Name": "metamorph.Morph"}"#)).is_none());
    assert!(matches!(
        manager.try_resolve(&tag(r#"{"Name": "Unicorn"}"#)),
        Err(MorphError::UnknownMorph(_))
    ));
    assert!(matches!(
        manager.try_resolve(&tag(r#"{"Name": "Pig", "EntityData": "oink"}"#)),
        Err(MorphError::MalformedPayload { .. })
    ));
}

#[test]
fn catalog_lists_variants_and_skips_broken_ones() {
    let mut table = CreatureTable::new();
    table.insert(CreatureKind::living("Pig", 0.9, 0.9));
    table.insert(CreatureKind::living("Creeper", 0.6, 1.7));
    table.add_variant("Creeper", r#"{"powered": true}"#);
    table.add_variant("Pig", "{not json");
    table.add_variant("Dragon", r#"{"Phase": 1}"#);

    let mut manager = MorphManager::new();
    manager.add_factory(Arc::new(EntityMorphFactory::new(Arc::new(table))));
    manager.register();
    let catalog = manager.morphs();

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.get("Pig").map(<[_]>::len), Some(1));
    let creepers = catalog.get("Creeper").unwrap();
    assert_eq!(creepers.len(), 2);
    assert_eq!(creepers[1].payload().get_bool("powered"), Some(true));
    assert!(!catalog.has_morph("Dragon"));
    assert_eq!(catalog.factory_of("Creeper"), Some("entity"));
}

#[test]
fn catalog_entries_never_mix_same_id_factories() {
    let mut base = CreatureTable::new();
    base.insert(CreatureKind::living("Pig", 0.9, 0.9));
    base.add_variant("Pig", r#"{"Saddle": true}"#);
    let mut addon = CreatureTable::new();
    addon.insert(CreatureKind::living("Pig", 1.2, 1.2));

    let mut manager = MorphManager::new();
    manager.add_factory(Arc::new(EntityMorphFactory::new(Arc::new(base))));
    manager.add_factory(Arc::new(EntityMorphFactory::new(Arc::new(addon))));
    manager.register();

    let catalog = manager.morphs();
    let pigs = catalog.get("Pig").unwrap();
    assert_eq!(pigs.len(), 1);
    assert_relative_eq!(pigs[0].size_for(PoseName::Standing)[0], 1.2);
    assert_eq!(catalog.entries().next().map(|e| e.owner), Some(1));

    let resolved = manager.resolve(&tag(r#"{"Name": "Pig"}"#)).unwrap();
    assert_eq!(&resolved, &pigs[0]);
}

#[test]
fn vanilla_catalog_has_every_living_kind() {
    let manager = manager();
    let catalog = manager.morphs();
    let table = CreatureTable::vanilla();
    let living = table.kinds().filter(|k| k.living).count();
    assert_eq!(catalog.len(), living + 1);
    assert!(catalog.has_morph("custom:robot"));
    assert!(!catalog.has_morph("ArmorStand"));
    assert_eq!(catalog.get("Slime").map(<[_]>::len), Some(3));
}

#[test]
fn default_settings_bind_behaviour() {
    let manager = manager();
    let blaze = manager.resolve(&tag(r#"{"Name": "Blaze"}"#)).unwrap();
    assert!(blaze.has_action());
    assert_eq!(blaze.settings().action.as_deref(), Some("fireball"));
    assert_eq!(blaze.settings().hostile, Some(true));

    let pig = manager.resolve(&tag(r#"{"Name": "Pig"}"#)).unwrap();
    assert!(!pig.has_action());
    assert_eq!(pig.ability_count(), 0);
}

#[test]
fn custom_morphs_carry_overrides() {
    let manager = manager();
    let morph = manager
        .resolve(&tag(r#"{"Name": "custom:robot", "Custom": {"Scale": [2, 2, 2]}}"#))
        .unwrap();
    let MorphKind::Custom(custom) = morph.kind() else {
        panic!("expected a custom morph");
    };
    assert_eq!(custom.scale(), [2.0, 2.0, 2.0]);
    assert_eq!(custom.model().name, "robot");
    assert_eq!(morph.settings().speed, Some(1.5));
    assert_eq!(morph.size_for(PoseName::Sneaking), [0.8, 1.6]);
    assert_eq!(morph.size_for(PoseName::Flying), [0.8, 2.2]);

    assert!(manager.resolve(&tag(r#"{"Name": "custom:ghost"}"#)).is_none());
}

#[test]
fn custom_factory_reports_missing_models() {
    let factory = CustomMorphFactory::new(models());
    assert!(factory.has_morph("custom:robot"));
    assert!(!factory.has_morph("robot"));
    assert!(matches!(
        factory.build(&tag(r#"{"Name": "custom:ghost"}"#)),
        Err(MorphError::UnknownModel(name)) if name == "ghost"
    ));
    assert!(matches!(
        factory.build(&tag(r#"{"Name": "custom:robot", "Custom": 7}"#)),
        Err(MorphError::MalformedPayload { .. })
    ));
}

#[test]
fn labels_come_from_the_presentation_phase() {
    let manager = manager();
    assert_eq!(manager.display_name("CaveSpider"), "Cave Spider");
    assert_eq!(manager.display_name("WitherSkeleton"), "Skeleton");
    assert_eq!(manager.display_name("custom:robot"), "robot");
    assert_eq!(manager.display_name("Nobody"), "Nobody");

    let presentation = manager.presentation().unwrap();
    assert_eq!(presentation.models().len(), 1);
}
