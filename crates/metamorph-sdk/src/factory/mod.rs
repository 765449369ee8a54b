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

//! Stock [`MorphFactory`](metamorph_data::MorphFactory) implementations.

mod custom;
mod entity;

pub use custom::{CustomMorphFactory, CUSTOM_PREFIX};
pub use entity::EntityMorphFactory;

/// Splits a CamelCase type id into words: `"WitherSkeleton"` becomes
/// `"Wither Skeleton"`.
pub(crate) fn label_for(type_id: &str) -> String {
    let mut label = String::with_capacity(type_id.len() + 4);
    for (i, c) in type_id.chars().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            label.push(' ');
        }
        label.push(c);
    }
    label
}

#[cfg(test)]
mod tests {
    use super::label_for;

    #[test]
    fn labels_split_camel_case() {
        assert_eq!(label_for("WitherSkeleton"), "Wither Skeleton");
        assert_eq!(label_for("Pig"), "Pig");
    }
}
