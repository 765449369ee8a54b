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

//! Resolution of tag records into morphs.
//!
//! The [`MorphManager`] holds an ordered list of [`MorphFactory`] plug-ins and
//! scans it most-recently-registered first, so an add-on factory registered
//! late overrides a default one for the names they both claim.

mod display;
mod factory;
mod list;
mod manager;

pub use display::{display_name, translation_key, Localization, DISPLAY_ALIASES};
pub use factory::{MorphFactory, Presentation, Registration};
pub use list::{CatalogEntry, MorphList};
pub use manager::MorphManager;
