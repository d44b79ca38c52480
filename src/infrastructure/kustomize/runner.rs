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

//! Invocation of the external kustomize binary

use crate::infrastructure::constants::DEFAULT_KUSTOMIZE_BINARY;
use crate::shared::error::{KustomizeError, Result};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, error};

/// Runs kustomize with the given arguments and returns its stdout.
///
/// This is the only place the rest of the crate touches a subprocess, so
/// tests can substitute a fake.
pub trait KustomizeRunner {
    /// Executable name used in logs and error messages
    fn binary(&self) -> &str;

    /// Run with `args`, in `dir` when given. A non-zero exit is an
    /// [`KustomizeError::Execution`] carrying the exit code and stderr.
    fn run(&self, args: &[String], dir: Option<&Path>) -> Result<Vec<u8>>;
}

impl<R: KustomizeRunner + ?Sized> KustomizeRunner for &R {
    fn binary(&self) -> &str {
        (**self).binary()
    }

    fn run(&self, args: &[String], dir: Option<&Path>) -> Result<Vec<u8>> {
        (**self).run(args, dir)
    }
}

/// Runner spawning a real kustomize process
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    binary: String,
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(DEFAULT_KUSTOMIZE_BINARY)
    }
}

impl ProcessRunner {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl KustomizeRunner for ProcessRunner {
    fn binary(&self) -> &str {
        &self.binary
    }

    fn run(&self, args: &[String], dir: Option<&Path>) -> Result<Vec<u8>> {
        let mut cmd = Command::new(&self.binary);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = dir {
            cmd.current_dir(dir);
        }

        debug!("Running {} {}", self.binary, args.join(" "));

        let output = cmd.output().map_err(|source| KustomizeError::Spawn {
            binary: self.binary.clone(),
            source,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("{} {} failed: {}", self.binary, args.join(" "), stderr.trim());
            return Err(KustomizeError::execution(
                self.binary.clone(),
                output.status.code(),
                &output.stderr,
            ));
        }

        Ok(output.stdout)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn args(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_missing_binary() {
        let runner = ProcessRunner::new("kustomize-runner-does-not-exist");
        let err = runner.run(&args(&["version"]), None).unwrap_err();
        assert!(matches!(err, KustomizeError::Spawn { .. }));
    }

    #[test]
    fn test_captures_stdout() {
        let runner = ProcessRunner::new("sh");
        let out = runner.run(&args(&["-c", "printf 'kind: List'"]), None).unwrap();
        assert_eq!(out, b"kind: List");
    }

    #[test]
    fn test_non_zero_exit() {
        let runner = ProcessRunner::new("sh");
        let err = runner
            .run(&args(&["-c", "echo 'Error: boom' >&2; exit 3"]), None)
            .unwrap_err();
        match err {
            KustomizeError::Execution { code, stderr, .. } => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "Error: boom");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_runs_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker"), "here").unwrap();
        let runner = ProcessRunner::new("sh");
        let out = runner
            .run(&args(&["-c", "cat marker"]), Some(dir.path()))
            .unwrap();
        assert_eq!(out, b"here");
    }
}
