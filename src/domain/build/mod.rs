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

//! Building kustomizations

pub mod args;
pub mod generator;
pub mod output;
pub mod version;

pub use self::args::{assemble, edit_args, parse_build_options, BuildPlan};
pub use self::output::{kind_of, object_images, parse_output, BuildOutput};
pub use self::version::{probe_version, version};

use crate::domain::kustomization::locate;
use crate::domain::source::KustomizeSource;
use crate::infrastructure::kustomize::{KustomizeRunner, ProcessRunner, ScratchDir};
use crate::shared::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A kustomization directory and the runner used to build it
#[derive(Debug, Clone)]
pub struct KustomizeApp<R = ProcessRunner> {
    path: PathBuf,
    repo_root: Option<PathBuf>,
    runner: R,
}

impl KustomizeApp<ProcessRunner> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_runner(path, ProcessRunner::default())
    }
}

impl<R: KustomizeRunner> KustomizeApp<R> {
    pub fn with_runner(path: impl Into<PathBuf>, runner: R) -> Self {
        Self {
            path: path.into(),
            repo_root: None,
            runner,
        }
    }

    /// Copy `root` instead of the kustomization directory when the build
    /// needs a scratch copy, so overlays can still reach `../base`
    pub fn repo_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.repo_root = Some(root.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Path of the kustomization file of this app
    pub fn kustomization(&self) -> Result<PathBuf> {
        locate(&self.path)
    }

    /// Build the kustomization with the given overrides.
    ///
    /// Overrides are applied to a scratch copy; the app directory itself is
    /// never modified. The copy is removed on every exit path.
    pub fn build(&self, source: Option<&KustomizeSource>) -> Result<BuildOutput> {
        let default_source = KustomizeSource::default();
        let source = source.unwrap_or(&default_source);

        locate(&self.path)?;
        source.validate()?;
        generator::check_generator_sources(&self.path, &source.config_map_generators)?;

        let plan = assemble(&self.path, source);
        if !plan.mutates_kustomization() {
            info!("Running kustomize build on path: {}", self.path.display());
            return self.run_build(&plan.build, None);
        }

        let app_path = fs::canonicalize(&self.path)?;
        let root = match &self.repo_root {
            Some(root) => fs::canonicalize(root)?,
            None => app_path.clone(),
        };
        let scratch = ScratchDir::copy_of(&root)?;
        let workdir = scratch.translate(&root, &app_path)?;
        debug!(
            "Building {} in scratch copy {}",
            self.path.display(),
            workdir.display()
        );

        let plan = assemble(&workdir, source);
        for edit in &plan.edits {
            self.runner.run(edit, Some(&workdir))?;
        }
        generator::materialize_generators(&locate(&workdir)?, &plan.generators)?;

        info!(
            "Running kustomize build on path: {} ({} edit(s), {} generator(s))",
            self.path.display(),
            plan.edits.len(),
            plan.generators.len()
        );
        self.run_build(&plan.build, Some(&workdir))
    }

    /// Version of the runner's kustomize binary
    pub fn version(&self, short: bool) -> Result<String> {
        probe_version(&self.runner, short)
    }

    fn run_build(&self, args: &[String], dir: Option<&Path>) -> Result<BuildOutput> {
        let stdout = self.runner.run(args, dir)?;
        let output = parse_output(&stdout)?;
        debug!(
            "kustomize build produced {} object(s), {} image(s)",
            output.objects.len(),
            output.images.len()
        );
        Ok(output)
    }
}
