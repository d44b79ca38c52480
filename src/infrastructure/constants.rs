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

/// Kustomization file names, in lookup priority order
pub const KUSTOMIZATION_NAMES: [&str; 3] = ["kustomization.yaml", "kustomization.yml", "Kustomization"];

/// Default kustomize executable, resolved through PATH
pub const DEFAULT_KUSTOMIZE_BINARY: &str = "kustomize";

/// Environment variable pointing at the runner configuration file
pub const RUNNER_CONF_ENV: &str = "KUSTOMIZE_RUNNER_CONF";

/// kustomize subcommands
pub const SUBCOMMAND_BUILD: &str = "build";
pub const SUBCOMMAND_EDIT: &str = "edit";
pub const SUBCOMMAND_VERSION: &str = "version";

/// Version flag for the short form
pub const FLAG_VERSION_SHORT: &str = "--short";

/// Kustomization fields amended in the scratch copy
pub const FIELD_CONFIG_MAP_GENERATOR: &str = "configMapGenerator";

/// Container list keys walked for image extraction
pub const CONTAINER_KEYS: [&str; 2] = ["containers", "initContainers"];
pub const IMAGE_KEY: &str = "image";

/// Separator between label pairs for `edit add label`
pub const LABEL_PAIR_SEPARATOR: char = ',';
pub const LABEL_KEY_VALUE_SEPARATOR: char = ':';
