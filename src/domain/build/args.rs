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

//! Argument assembly for `kustomize edit` and `kustomize build`

use crate::domain::source::{ConfigMapGenerator, KustomizeSource};
use crate::infrastructure::constants::{
    LABEL_KEY_VALUE_SEPARATOR, LABEL_PAIR_SEPARATOR, SUBCOMMAND_BUILD, SUBCOMMAND_EDIT,
};
use std::collections::BTreeMap;
use std::path::Path;

/// Everything needed to build one kustomization with a given source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildPlan {
    /// `kustomize edit` invocations, run in order inside the scratch copy
    pub edits: Vec<Vec<String>>,
    /// Generators appended to the scratch copy's kustomization file
    pub generators: Vec<ConfigMapGenerator>,
    /// Arguments of the final `kustomize build`
    pub build: Vec<String>,
}

impl BuildPlan {
    /// Whether the plan mutates the kustomization directory
    pub fn mutates_kustomization(&self) -> bool {
        !self.edits.is_empty() || !self.generators.is_empty()
    }
}

/// Assemble the invocations for building `path` with `source`
pub fn assemble(path: &Path, source: &KustomizeSource) -> BuildPlan {
    let path = path.to_string_lossy();
    let build = parse_build_options(&path, source.build_options.as_deref().unwrap_or_default());

    BuildPlan {
        edits: edit_args(source),
        generators: source.config_map_generators.clone(),
        build,
    }
}

/// `kustomize edit` argument lists for the source's name, image and label
/// overrides. Only non-empty fields produce an invocation.
pub fn edit_args(source: &KustomizeSource) -> Vec<Vec<String>> {
    let mut edits = Vec::new();

    // `--` keeps a leading dash in the value from being read as a flag
    if let Some(prefix) = source.name_prefix.as_deref().filter(|p| !p.is_empty()) {
        edits.push(edit(&["set", "nameprefix", "--", prefix]));
    }

    if let Some(suffix) = source.name_suffix.as_deref().filter(|s| !s.is_empty()) {
        edits.push(edit(&["set", "namesuffix", "--", suffix]));
    }

    if !source.images.is_empty() {
        let mut args = edit(&["set", "image"]);
        args.extend(source.images.iter().cloned());
        edits.push(args);
    }

    if !source.common_labels.is_empty() {
        let mut args = edit(&["add", "label"]);
        args.push(label_arg(&source.common_labels));
        edits.push(args);
    }

    edits
}

/// `kustomize build <path>` followed by the whitespace-separated options
pub fn parse_build_options(path: &str, build_options: &str) -> Vec<String> {
    let mut args = vec![SUBCOMMAND_BUILD.to_string(), path.to_string()];
    args.extend(build_options.split_whitespace().map(str::to_string));
    args
}

/// `k1:v1,k2:v2`, ordered by key
fn label_arg(labels: &BTreeMap<String, String>) -> String {
    labels
        .iter()
        .map(|(k, v)| format!("{}{}{}", k, LABEL_KEY_VALUE_SEPARATOR, v))
        .collect::<Vec<_>>()
        .join(&LABEL_PAIR_SEPARATOR.to_string())
}

fn edit(args: &[&str]) -> Vec<String> {
    std::iter::once(SUBCOMMAND_EDIT)
        .chain(args.iter().copied())
        .map(str::to_string)
        .collect()
}
