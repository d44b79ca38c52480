// CLI command definitions

use super::kustomize::{BuildCommand, LocateCommand, VersionCommand};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "kustomize-runner",
    version,
    about = "Run kustomize builds with name, image, label and ConfigMap overrides",
    long_about = "A standalone CLI tool that builds kustomizations in a scratch copy, applying overrides without touching the original files"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Build a kustomization and print the resulting objects
    Build(BuildCommand),

    /// Print the kustomization file of a directory
    Locate(LocateCommand),

    /// Show the kustomize version
    Version(VersionCommand),
}
