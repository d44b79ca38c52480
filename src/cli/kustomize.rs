//! kustomize commands

use super::display::TableRenderer;
use crate::domain::build::{BuildOutput, KustomizeApp};
use crate::domain::config::{apply_to_runner_conf, parse_dynamic_configs, RunnerConf};
use crate::domain::kustomization::locate;
use crate::domain::source::KustomizeSource;
use crate::infrastructure::kustomize::KustomizeRunner;
use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Summary table of objects and images
    Table,
    /// The built YAML stream
    Yaml,
    /// One image per line
    Images,
}

#[derive(Parser, Debug, Clone)]
pub struct BuildCommand {
    /// Directory containing the kustomization
    pub path: PathBuf,

    /// Prefix added to the names of all resources
    #[arg(long, allow_hyphen_values = true)]
    pub name_prefix: Option<String>,

    /// Suffix added to the names of all resources
    #[arg(long, allow_hyphen_values = true)]
    pub name_suffix: Option<String>,

    /// Image override in kustomize syntax (e.g. nginx:1.15.5), repeatable
    #[arg(long = "image", value_name = "IMAGE")]
    pub images: Vec<String>,

    /// Label added to every resource (key=value), repeatable
    #[arg(long = "label", value_name = "KEY=VALUE")]
    pub labels: Vec<String>,

    /// YAML file describing overrides (namePrefix, images, commonLabels, configMapGenerators, ...)
    /// Command line flags take precedence over it
    #[arg(long, value_name = "PATH")]
    pub source: Option<PathBuf>,

    /// Extra options passed to `kustomize build`
    #[arg(long, allow_hyphen_values = true)]
    pub build_options: Option<String>,

    /// Directory copied when overrides are applied (defaults to PATH)
    /// Use the repository root when overlays reference ../base
    #[arg(long, value_name = "DIR")]
    pub repo_root: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Path to runner configuration file (kustomize-runner.toml)
    /// If not provided, KUSTOMIZE_RUNNER_CONF is used when set
    #[arg(long, value_name = "PATH")]
    pub config_file: Option<String>,

    /// Dynamic configuration properties (-D key=value)
    ///
    /// kustomize.binary, kustomize.build-options, kustomize.repo-root
    #[arg(short = 'D', value_name = "KEY=VALUE")]
    pub properties: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct LocateCommand {
    /// Directory to search
    pub dir: PathBuf,
}

#[derive(Parser, Debug)]
pub struct VersionCommand {
    /// Print the short version form
    #[arg(long)]
    pub short: bool,

    #[arg(long, value_name = "PATH")]
    pub config_file: Option<String>,

    #[arg(short = 'D', value_name = "KEY=VALUE")]
    pub properties: Vec<String>,
}

impl BuildCommand {
    pub fn execute(&self) -> anyhow::Result<()> {
        let conf = load_conf(self.config_file.as_deref(), &self.properties)?;
        let source = self.resolve_source(&conf)?;

        // Priority: --repo-root > config file
        let repo_root = self
            .repo_root
            .clone()
            .or_else(|| conf.kustomize.repo_root.as_ref().map(PathBuf::from));

        let mut app = KustomizeApp::with_runner(&self.path, conf.runner());
        if let Some(root) = repo_root {
            app = app.repo_root(root);
        }

        let output = app
            .build(Some(&source))
            .with_context(|| format!("Failed to build {}", self.path.display()))?;

        print!("{}", self.render(&output)?);
        Ok(())
    }

    /// Merge the source file, command line flags and configured defaults
    fn resolve_source(&self, conf: &RunnerConf) -> anyhow::Result<KustomizeSource> {
        let mut source = match &self.source {
            Some(path) => KustomizeSource::from_file(path)
                .with_context(|| format!("Failed to load source from {}", path.display()))?,
            None => KustomizeSource::default(),
        };

        if self.name_prefix.is_some() {
            source.name_prefix = self.name_prefix.clone();
        }
        if self.name_suffix.is_some() {
            source.name_suffix = self.name_suffix.clone();
        }
        source.images.extend(self.images.iter().cloned());

        for label in &self.labels {
            let (key, value) = label
                .split_once('=')
                .with_context(|| format!("Invalid label '{}'. Expected 'key=value'", label))?;
            source
                .common_labels
                .insert(key.trim().to_string(), value.trim().to_string());
        }

        // Priority: --build-options > source file > config file
        if self.build_options.is_some() {
            source.build_options = self.build_options.clone();
        } else if source.build_options.is_none() {
            source.build_options = conf.build_options().map(str::to_string);
        }

        source.validate()?;
        Ok(source)
    }

    fn render(&self, output: &BuildOutput) -> anyhow::Result<String> {
        let rendered = match self.output {
            OutputFormat::Table => {
                let renderer = TableRenderer::new();
                let mut text = renderer.render_build_output(output);
                if !output.images.is_empty() {
                    text.push_str(&renderer.render_images(&output.images));
                    text.push('\n');
                }
                text
            }
            OutputFormat::Yaml => {
                let documents = output
                    .objects
                    .iter()
                    .map(serde_yaml::to_string)
                    .collect::<Result<Vec<_>, _>>()
                    .context("Failed to serialize build output")?;
                documents.join("---\n")
            }
            OutputFormat::Images => output
                .images
                .iter()
                .map(|image| format!("{}\n", image))
                .collect(),
        };
        Ok(rendered)
    }
}

impl LocateCommand {
    pub fn execute(&self) -> anyhow::Result<()> {
        let kustomization = locate(&self.dir)?;
        println!("{}", kustomization.display());
        Ok(())
    }
}

impl VersionCommand {
    pub fn execute(&self) -> anyhow::Result<()> {
        let conf = load_conf(self.config_file.as_deref(), &self.properties)?;
        let runner = conf.runner();
        let version = crate::domain::build::probe_version(&runner, self.short)
            .with_context(|| format!("Failed to get version of {}", runner.binary()))?;
        println!("{}", version);
        Ok(())
    }
}

/// Priority: -D properties > config file > defaults
fn load_conf(config_file: Option<&str>, properties: &[String]) -> anyhow::Result<RunnerConf> {
    let mut conf = RunnerConf::load(config_file)?;
    if !properties.is_empty() {
        let dynamic_configs = parse_dynamic_configs(properties)
            .map_err(|e| anyhow::anyhow!("Failed to parse dynamic configs: {}", e))?;
        apply_to_runner_conf(&dynamic_configs, &mut conf)?;
    }
    Ok(conf)
}
