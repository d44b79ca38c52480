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

use crate::domain::config::RunnerConf;
use crate::shared::error::{KustomizeError, Result};
use std::collections::HashMap;

/// Parse `-D key=value` properties
pub fn parse_dynamic_configs(configs: &[String]) -> Result<HashMap<String, String>> {
    let mut map = HashMap::new();

    for config in configs {
        let (key, value) = config.split_once('=').ok_or_else(|| {
            KustomizeError::config_error(format!(
                "Invalid config format: '{}'. Expected 'key=value'",
                config
            ))
        })?;

        let key = key.trim();
        if key.is_empty() {
            return Err(KustomizeError::config_error(format!(
                "Empty key in config: '{}'",
                config
            )));
        }

        map.insert(key.to_string(), value.trim().to_string());
    }

    Ok(map)
}

/// Apply recognized properties to the configuration. Unknown keys are
/// rejected so typos do not go unnoticed.
pub fn apply_to_runner_conf(configs: &HashMap<String, String>, conf: &mut RunnerConf) -> Result<()> {
    for (key, value) in configs {
        match key.as_str() {
            "kustomize.binary" => conf.kustomize.binary = value.clone(),
            "kustomize.build-options" => conf.kustomize.build_options = value.clone(),
            "kustomize.repo-root" => conf.kustomize.repo_root = Some(value.clone()),
            _ => {
                return Err(KustomizeError::config_error(format!(
                    "Unknown property: '{}'",
                    key
                )))
            }
        }
    }

    conf.validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_dynamic_configs() {
        let map = parse_dynamic_configs(&props(&[
            "kustomize.binary=/opt/kustomize",
            "kustomize.build-options=--load-restrictor=LoadRestrictionsNone",
        ]))
        .unwrap();
        assert_eq!(map.get("kustomize.binary").unwrap(), "/opt/kustomize");
        assert_eq!(
            map.get("kustomize.build-options").unwrap(),
            "--load-restrictor=LoadRestrictionsNone"
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_dynamic_configs(&props(&["novalue"])).is_err());
        assert!(parse_dynamic_configs(&props(&["=value"])).is_err());
    }

    #[test]
    fn test_apply() {
        let mut conf = RunnerConf::default();
        let map = parse_dynamic_configs(&props(&[
            "kustomize.binary=/opt/kustomize",
            "kustomize.repo-root=/src/repo",
        ]))
        .unwrap();
        apply_to_runner_conf(&map, &mut conf).unwrap();
        assert_eq!(conf.kustomize.binary, "/opt/kustomize");
        assert_eq!(conf.kustomize.repo_root.as_deref(), Some("/src/repo"));
    }

    #[test]
    fn test_apply_unknown_key() {
        let mut conf = RunnerConf::default();
        let map = parse_dynamic_configs(&props(&["kustomize.timeout=5"])).unwrap();
        assert!(apply_to_runner_conf(&map, &mut conf).is_err());
    }

    #[test]
    fn test_apply_empty_binary() {
        let mut conf = RunnerConf::default();
        let map = parse_dynamic_configs(&props(&["kustomize.binary="])).unwrap();
        assert!(apply_to_runner_conf(&map, &mut conf).is_err());
    }
}
