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

//! kustomize version probe

use crate::infrastructure::constants::{FLAG_VERSION_SHORT, SUBCOMMAND_VERSION};
use crate::infrastructure::kustomize::{KustomizeRunner, ProcessRunner};
use crate::shared::error::{KustomizeError, Result};
use tracing::info;

/// Version reported by the default `kustomize` binary on PATH
pub fn version(short: bool) -> Result<String> {
    probe_version(&ProcessRunner::default(), short)
}

/// Run `<binary> version [--short]` and return the trimmed output
pub fn probe_version<R: KustomizeRunner>(runner: &R, short: bool) -> Result<String> {
    let mut args = vec![SUBCOMMAND_VERSION.to_string()];
    if short {
        args.push(FLAG_VERSION_SHORT.to_string());
    }

    let stdout = runner.run(&args, None)?;
    let raw = String::from_utf8_lossy(&stdout);
    let version = normalize_version(&raw, short);
    if version.is_empty() {
        return Err(KustomizeError::execution(
            runner.binary(),
            Some(0),
            b"empty version output",
        ));
    }

    info!("{} version: {}", runner.binary(), version);
    Ok(version)
}

/// Trim the output; kustomize v3 prints the short form as
/// `{kustomize/v3.8.1  2020-07-16T00:58:46Z  }`, reduced to its first field
fn normalize_version(raw: &str, short: bool) -> String {
    let trimmed = raw.trim();
    if short {
        if let Some(inner) = trimmed
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
        {
            return inner
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_string();
        }
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    struct FixedOutput(&'static str);

    impl KustomizeRunner for FixedOutput {
        fn binary(&self) -> &str {
            "kustomize"
        }

        fn run(&self, args: &[String], _dir: Option<&Path>) -> Result<Vec<u8>> {
            assert_eq!(args[0], "version");
            Ok(self.0.as_bytes().to_vec())
        }
    }

    #[test]
    fn test_trims_output() {
        let version = probe_version(&FixedOutput("v5.4.3\n"), false).unwrap();
        assert_eq!(version, "v5.4.3");
    }

    #[test]
    fn test_short_braced_form() {
        let version =
            probe_version(&FixedOutput("{kustomize/v3.8.1  2020-07-16T00:58:46Z  }\n"), true)
                .unwrap();
        assert_eq!(version, "kustomize/v3.8.1");
    }

    #[test]
    fn test_long_form_kept() {
        let raw = "{Version:kustomize/v4.5.7 GitCommit:56d82a8 BuildDate:2022-08-02T16:35:54Z}\n";
        let version = probe_version(&FixedOutput(raw), false).unwrap();
        assert_eq!(version, raw.trim());
    }

    #[test]
    fn test_empty_output_is_error() {
        assert!(probe_version(&FixedOutput("  \n"), false).is_err());
    }
}
