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

//! ConfigMap generator materialization
//!
//! Generators are declared in the kustomization file rather than passed to
//! `kustomize build`, so they are appended to the `configMapGenerator` list
//! of a scratch copy before building.

use crate::domain::source::ConfigMapGenerator;
use crate::infrastructure::constants::FIELD_CONFIG_MAP_GENERATOR;
use crate::shared::error::{KustomizeError, Result};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Check that every file and env file the generators read exists under `dir`
pub fn check_generator_sources(dir: &Path, generators: &[ConfigMapGenerator]) -> Result<()> {
    for generator in generators {
        for source in generator.source_paths() {
            let path = dir.join(source);
            fs::metadata(&path).map_err(|e| {
                io::Error::new(
                    e.kind(),
                    format!(
                        "generator '{}' source {}: {}",
                        generator.name,
                        path.display(),
                        e
                    ),
                )
            })?;
        }
    }
    Ok(())
}

/// Append `generators` to the kustomization file at `kustomization`
pub fn materialize_generators(kustomization: &Path, generators: &[ConfigMapGenerator]) -> Result<()> {
    if generators.is_empty() {
        return Ok(());
    }

    let content = fs::read_to_string(kustomization)?;
    let mut document: Value = serde_yaml::from_str(&content)?;
    if document.is_null() {
        document = Value::Mapping(Mapping::new());
    }

    let root = document.as_mapping_mut().ok_or_else(|| {
        KustomizeError::invalid_source(format!(
            "{} is not a YAML mapping",
            kustomization.display()
        ))
    })?;

    let entries = root
        .entry(Value::from(FIELD_CONFIG_MAP_GENERATOR))
        .or_insert_with(|| Value::Sequence(Vec::new()));
    if entries.is_null() {
        *entries = Value::Sequence(Vec::new());
    }
    let entries = entries.as_sequence_mut().ok_or_else(|| {
        KustomizeError::invalid_source(format!(
            "{} in {} is not a list",
            FIELD_CONFIG_MAP_GENERATOR,
            kustomization.display()
        ))
    })?;

    for generator in generators {
        let declared = entries
            .iter()
            .any(|e| e.get("name").and_then(Value::as_str) == Some(generator.name.as_str()));
        if declared {
            return Err(KustomizeError::invalid_source(format!(
                "ConfigMap generator '{}' is already declared in {}",
                generator.name,
                kustomization.display()
            )));
        }
        entries.push(generator_entry(generator));
    }

    debug!(
        "Adding {} ConfigMap generator(s) to {}",
        generators.len(),
        kustomization.display()
    );
    fs::write(kustomization, serde_yaml::to_string(&document)?)?;
    Ok(())
}

fn generator_entry(generator: &ConfigMapGenerator) -> Value {
    let mut entry = Mapping::new();
    entry.insert(Value::from("name"), Value::from(generator.name.as_str()));

    for (key, values) in [
        ("literals", &generator.literals),
        ("files", &generator.files),
        ("envs", &generator.envs),
    ] {
        if !values.is_empty() {
            let list = values.iter().map(|v| Value::from(v.as_str())).collect();
            entry.insert(Value::from(key), Value::Sequence(list));
        }
    }

    Value::Mapping(entry)
}
