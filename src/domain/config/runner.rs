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

use crate::infrastructure::constants::{DEFAULT_KUSTOMIZE_BINARY, RUNNER_CONF_ENV};
use crate::infrastructure::kustomize::ProcessRunner;
use crate::shared::error::{KustomizeError, Result};
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;

/// Runner configuration, usually loaded from `kustomize-runner.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConf {
    pub kustomize: KustomizeConf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KustomizeConf {
    /// Executable name or path
    pub binary: String,
    /// Build options used when the source does not set any
    pub build_options: String,
    /// Directory copied for builds that modify the kustomization
    pub repo_root: Option<String>,
}

impl Default for KustomizeConf {
    fn default() -> Self {
        Self {
            binary: DEFAULT_KUSTOMIZE_BINARY.to_string(),
            build_options: String::new(),
            repo_root: None,
        }
    }
}

impl RunnerConf {
    /// Load configuration from TOML file
    pub fn from<T: AsRef<str>>(path: T) -> Result<Self> {
        let content = read_to_string(path.as_ref()).map_err(|e| {
            KustomizeError::config_error(format!(
                "Failed to read config file {}: {}",
                path.as_ref(),
                e
            ))
        })?;

        let conf: Self = toml::from_str(&content)?;
        conf.validate()?;
        Ok(conf)
    }

    /// Load from the given path, else from `KUSTOMIZE_RUNNER_CONF`, else defaults
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::from(path),
            None => match std::env::var(RUNNER_CONF_ENV) {
                Ok(env_path) if !env_path.is_empty() => Self::from(env_path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.kustomize.binary.trim().is_empty() {
            return Err(KustomizeError::config_error(
                "kustomize.binary must not be empty",
            ));
        }
        Ok(())
    }

    pub fn runner(&self) -> ProcessRunner {
        ProcessRunner::new(self.kustomize.binary.clone())
    }

    /// Configured default build options, if any
    pub fn build_options(&self) -> Option<&str> {
        Some(self.kustomize.build_options.as_str()).filter(|o| !o.trim().is_empty())
    }
}
