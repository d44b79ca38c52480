// Copyright 2025 JiangLong.
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

//! Kustomization file discovery

use crate::infrastructure::constants::KUSTOMIZATION_NAMES;
use crate::shared::error::{KustomizeError, Result};
use std::path::{Path, PathBuf};

/// Find the kustomization file in `dir`, trying the recognized names in
/// priority order
pub fn locate(dir: impl AsRef<Path>) -> Result<PathBuf> {
    let dir = dir.as_ref();
    KUSTOMIZATION_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| KustomizeError::not_found(dir))
}

/// Whether a bare file name is one of the recognized kustomization names
pub fn is_kustomization_filename(name: &str) -> bool {
    KUSTOMIZATION_NAMES.contains(&name)
}
