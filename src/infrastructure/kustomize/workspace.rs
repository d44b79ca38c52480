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

//! Disposable copies of kustomization directories

use crate::shared::error::{KustomizeError, Result};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;
use walkdir::WalkDir;

const SCRATCH_PREFIX: &str = "kustomize-runner-";

/// A private copy of a directory tree, removed when dropped
#[derive(Debug)]
pub struct ScratchDir {
    root: PathBuf,
    // Held for its Drop; removes the copy
    _temp: TempDir,
}

impl ScratchDir {
    /// Copy `src` recursively into a new temporary directory
    pub fn copy_of(src: &Path) -> Result<Self> {
        if !src.is_dir() {
            return Err(KustomizeError::config_error(format!(
                "Not a directory: {}",
                src.display()
            )));
        }

        let temp = tempfile::Builder::new().prefix(SCRATCH_PREFIX).tempdir()?;
        let name = src.file_name().unwrap_or_else(|| OsStr::new("source"));
        let root = temp.path().join(name);

        copy_tree(src, &root)?;
        debug!("Copied {} to {}", src.display(), root.display());

        Ok(Self { root, _temp: temp })
    }

    /// Root of the copied tree
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Path inside the copy corresponding to `original`, which must lie
    /// under `original_root`
    pub fn translate(&self, original_root: &Path, original: &Path) -> Result<PathBuf> {
        let relative = original.strip_prefix(original_root).map_err(|_| {
            KustomizeError::config_error(format!(
                "{} is not inside {}",
                original.display(),
                original_root.display()
            ))
        })?;
        Ok(self.root.join(relative))
    }
}

fn copy_tree(src: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.map_err(|e| {
            KustomizeError::Io(e.into_io_error().unwrap_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::Other, "symlink loop")
            }))
        })?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| KustomizeError::config_error(e.to_string()))?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
