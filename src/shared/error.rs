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

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, KustomizeError>;

#[derive(Error, Debug)]
pub enum KustomizeError {
    #[error("did not find kustomization in {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("{binary} exited with {}: {stderr}", .code.map_or_else(|| "signal".to_string(), |c| format!("code {}", c)))]
    Execution {
        binary: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Failed to execute {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse document {document} of build output: {source}")]
    Parse {
        document: usize,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid kustomize source: {0}")]
    InvalidSource(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl KustomizeError {
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn execution(binary: impl Into<String>, code: Option<i32>, stderr: &[u8]) -> Self {
        Self::Execution {
            binary: binary.into(),
            code,
            stderr: String::from_utf8_lossy(stderr).trim().to_string(),
        }
    }

    pub fn invalid_source(context: impl Into<String>) -> Self {
        Self::InvalidSource(context.into())
    }

    pub fn config_error(context: impl Into<String>) -> Self {
        Self::ConfigError(context.into())
    }

    /// Whether the error was raised because no kustomization file exists
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
