// Copyright 2024 OctoFHIR Team
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

//! Path evaluation against parsed documents

pub mod error;
pub mod navigator;

pub use error::{NavigationError, NavigationFault, QueryResult};
pub use navigator::Navigator;

use crate::model::Node;
use crate::parser::JsonPath;

/// Walk `path` from `root` with the default strict index policy
pub fn navigate<'a>(root: Node<'a>, path: &JsonPath) -> QueryResult<'a> {
    Navigator::new().navigate(root, path)
}
