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

//! Runs every player's capability for one tick.

use metamorph_data::{MorphHolder, Morphing};

/// Updates each capability against its holder. Returns how many players are
/// morphed.
pub fn update_morphing<'a, H>(players: impl IntoIterator<Item = (&'a mut Morphing, &'a mut H)>) -> usize
where
    H: MorphHolder + 'a,
{
    let mut morphed = 0;
    for (morphing, holder) in players {
        morphing.update(holder);
        if morphing.is_morphed() {
            morphed += 1;
        }
    }
    morphed
}
