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

//! Build source: the overrides applied on top of a kustomization

pub mod image;

pub use self::image::Image;

use crate::shared::error::{KustomizeError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::read_to_string;
use std::path::Path;

/// Overrides applied to a kustomization before it is built
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KustomizeSource {
    pub name_prefix: Option<String>,
    pub name_suffix: Option<String>,
    /// Image overrides in kustomize's `edit set image` syntax (`nginx:1.15.5`)
    pub images: Vec<String>,
    /// Labels added to every object, emitted sorted by key
    pub common_labels: BTreeMap<String, String>,
    #[serde(rename = "configMapGenerators")]
    pub config_map_generators: Vec<ConfigMapGenerator>,
    /// Extra `kustomize build` options, split on whitespace
    pub build_options: Option<String>,
}

/// A `configMapGenerator` entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigMapGenerator {
    pub name: String,
    /// `key=value` pairs
    pub literals: Vec<String>,
    /// `dest=src` or bare `src`, relative to the kustomization directory
    pub files: Vec<String>,
    pub envs: Vec<String>,
}

impl KustomizeSource {
    /// Load a source description from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = read_to_string(path).map_err(|e| {
            KustomizeError::config_error(format!(
                "Failed to read source file {}: {}",
                path.display(),
                e
            ))
        })?;
        let source: Self = serde_yaml::from_str(&content)?;
        source.validate()?;
        Ok(source)
    }

    /// True when building with this source is the same as a plain build
    pub fn is_empty(&self) -> bool {
        self.name_prefix.as_deref().map_or(true, str::is_empty)
            && self.name_suffix.as_deref().map_or(true, str::is_empty)
            && self.images.is_empty()
            && self.common_labels.is_empty()
            && self.config_map_generators.is_empty()
            && self.build_options.as_deref().map_or(true, |o| o.trim().is_empty())
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(image) = self.images.iter().find(|i| i.trim().is_empty()) {
            return Err(KustomizeError::invalid_source(format!(
                "empty image override: '{}'",
                image
            )));
        }

        for (key, value) in &self.common_labels {
            if key.is_empty() {
                return Err(KustomizeError::invalid_source(format!(
                    "common label with empty key (value '{}')",
                    value
                )));
            }
            // `edit add label` uses ':' and ',' as separators
            if key.contains([':', ',']) || value.contains([':', ',']) {
                return Err(KustomizeError::invalid_source(format!(
                    "common label '{}={}' must not contain ':' or ','",
                    key, value
                )));
            }
        }

        for generator in &self.config_map_generators {
            generator.validate()?;
        }

        Ok(())
    }
}

impl ConfigMapGenerator {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !is_valid_k8s_name(&self.name) {
            return Err(KustomizeError::invalid_source(format!(
                "invalid ConfigMap generator name: '{}'",
                self.name
            )));
        }

        for literal in &self.literals {
            match literal.split_once('=') {
                Some((key, _)) if !key.is_empty() => {}
                _ => {
                    return Err(KustomizeError::invalid_source(format!(
                        "invalid literal '{}' in generator '{}'. Expected 'key=value'",
                        literal, self.name
                    )))
                }
            }
        }

        for file in &self.files {
            let (dest, src) = split_file_source(file);
            if src.is_empty() || dest.is_some_and(str::is_empty) {
                return Err(KustomizeError::invalid_source(format!(
                    "invalid file source '{}' in generator '{}'",
                    file, self.name
                )));
            }
        }

        if let Some(env) = self.envs.iter().find(|e| e.trim().is_empty()) {
            return Err(KustomizeError::invalid_source(format!(
                "empty env file '{}' in generator '{}'",
                env, self.name
            )));
        }

        Ok(())
    }

    /// Source paths this generator reads, relative to the kustomization directory
    pub fn source_paths(&self) -> impl Iterator<Item = &str> {
        self.files
            .iter()
            .map(|f| split_file_source(f).1)
            .chain(self.envs.iter().map(String::as_str))
    }
}

/// Split `dest=src` into its parts; a bare `src` has no destination key
pub(crate) fn split_file_source(file: &str) -> (Option<&str>, &str) {
    match file.split_once('=') {
        Some((dest, src)) => (Some(dest), src),
        None => (None, file),
    }
}

pub(crate) fn is_valid_k8s_name(name: &str) -> bool {
    if name.is_empty() || name.len() > 253 {
        return false;
    }

    if !name.chars().next().unwrap_or(' ').is_ascii_alphanumeric() {
        return false;
    }
    if !name.chars().last().unwrap_or(' ').is_ascii_alphanumeric() {
        return false;
    }

    name.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
}
